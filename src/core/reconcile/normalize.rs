//! Text normalization for keyword and status matching

use unicode_normalization::UnicodeNormalization;

/// Normalize text for case- and accent-insensitive comparison
///
/// The text is decomposed (NFKD), every non-ASCII code point is dropped
/// (combining marks included) and the rest is lower-cased. `"Imprägnol"`
/// becomes `"impragnol"`.
pub fn normalize_token(value: &str) -> String {
    value
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
