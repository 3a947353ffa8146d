//! Admission policy for orders and positions
//!
//! The channel allow-list, the excluded article keywords, the minimum unit
//! price and the status tokens counting as "completed" are plain data. The
//! [`Default`] is the configuration the weekly export ships with; the
//! `[policy]` section of the configuration file may override any of it.

use super::normalize::normalize_token;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Distribution channels included in the export
pub const DEFAULT_ALLOWED_CHANNELS: [&str; 12] = [
    "Shop DE netto",
    "Shop AT netto",
    "Shop DE brutto",
    "Shop AT brutto",
    "Ebay brutto",
    "Otto brutto",
    "Kaufland brutto",
    "Kaufland netto",
    "Amazon FBA brutto",
    "Amazon FBM brutto",
    "bol.com netto",
    "bol.com brutto",
];

/// Article-name keywords that exclude a position (normalized form)
pub const DEFAULT_EXCLUDED_KEYWORDS: [&str; 8] = [
    "impragnol",
    "impraegnol",
    "bb",
    "sneakerasers",
    "heitmann",
    "wenco",
    "roundup",
    "bootbananas",
];

/// Status tokens marking a completed position
pub const DEFAULT_COMPLETED_STATUS_TOKENS: [&str; 2] = ["abgeschlossen", "completed"];

/// Order and position admission rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportPolicy {
    /// Distribution channel names admitted (exact match)
    pub allowed_channels: Vec<String>,

    /// Keywords that exclude a position when its normalized article name contains one
    pub excluded_keywords: Vec<String>,

    /// Minimum resolved unit price of an admitted position
    pub min_unit_price: Decimal,

    /// Normalized substrings marking a completed status
    pub completed_status_tokens: Vec<String>,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            allowed_channels: to_strings(&DEFAULT_ALLOWED_CHANNELS),
            excluded_keywords: to_strings(&DEFAULT_EXCLUDED_KEYWORDS),
            min_unit_price: Decimal::new(1, 2),
            completed_status_tokens: to_strings(&DEFAULT_COMPLETED_STATUS_TOKENS),
        }
    }
}

impl ExportPolicy {
    /// Validates the policy
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_channels.is_empty() {
            return Err("policy.allowed_channels cannot be empty".to_string());
        }

        if self.allowed_channels.iter().any(|c| c.trim().is_empty()) {
            return Err("policy.allowed_channels cannot contain empty names".to_string());
        }

        if self.min_unit_price.is_sign_negative() {
            return Err("policy.min_unit_price must be >= 0".to_string());
        }

        if self
            .excluded_keywords
            .iter()
            .any(|k| normalize_token(k).is_empty())
        {
            return Err("policy.excluded_keywords cannot contain empty keywords".to_string());
        }

        if self.completed_status_tokens.is_empty() {
            return Err("policy.completed_status_tokens cannot be empty".to_string());
        }

        Ok(())
    }

    /// Whether `channel` is on the allow-list
    pub fn allows_channel(&self, channel: Option<&str>) -> bool {
        channel.is_some_and(|c| self.allowed_channels.iter().any(|allowed| allowed == c))
    }

    /// Whether a status label denotes a completed position
    ///
    /// A missing status is accepted: the positions endpoint is already
    /// queried with a status filter.
    pub fn is_completed_status(&self, status: Option<&str>) -> bool {
        let token = normalize_token(status.unwrap_or_default());
        if token.is_empty() {
            return true;
        }

        self.completed_status_tokens
            .iter()
            .any(|completed| token.contains(&normalize_token(completed)))
    }

    /// Whether an article name contains none of the excluded keywords
    ///
    /// Names and keywords are compared in normalized form, so `Imprägnol`
    /// and `Impraegnol` both match `impragnol`/`impraegnol`.
    pub fn allows_article_name(&self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return true;
        };

        let normalized = normalize_token(name);
        !self
            .excluded_keywords
            .iter()
            .any(|keyword| normalized.contains(&normalize_token(keyword)))
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test]
    fn test_default_policy() {
        let policy = ExportPolicy::default();
        assert_eq!(policy.allowed_channels.len(), 12);
        assert_eq!(policy.excluded_keywords.len(), 8);
        assert_eq!(policy.min_unit_price, dec!(0.01));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_channel_match_is_exact() {
        let policy = ExportPolicy::default();
        assert!(policy.allows_channel(Some("Shop DE netto")));
        assert!(!policy.allows_channel(Some("shop de netto")));
        assert!(!policy.allows_channel(Some("Shop CH netto")));
        assert!(!policy.allows_channel(None));
    }

    #[test_case(Some("abgeschlossen"), true ; "german")]
    #[test_case(Some("COMPLETED"), true ; "english upper case")]
    #[test_case(Some("Auftrag abgeschlossen"), true ; "substring")]
    #[test_case(Some("offen"), false ; "open")]
    #[test_case(None, true ; "missing status")]
    #[test_case(Some(""), true ; "empty status")]
    #[test_case(Some("Storniert"), false ; "cancelled")]
    fn test_completed_status(status: Option<&str>, expected: bool) {
        assert_eq!(ExportPolicy::default().is_completed_status(status), expected);
    }

    #[test_case("Imprägnol Spray", false ; "umlaut")]
    #[test_case("Impraegnol Spray", false ; "transliterated")]
    #[test_case("ImprÃ¤gnol Spray", false ; "mojibake")]
    #[test_case("Grüne Seife", true ; "unrelated umlaut")]
    #[test_case("BB Cream", false ; "short keyword")]
    #[test_case("Sneaker Cleaner", true ; "no keyword")]
    fn test_article_name(name: &str, expected: bool) {
        assert_eq!(ExportPolicy::default().allows_article_name(Some(name)), expected);
    }

    #[test]
    fn test_missing_article_name_is_allowed() {
        assert!(ExportPolicy::default().allows_article_name(None));
    }

    #[test]
    fn test_validate_rejects_empty_allow_list() {
        let policy = ExportPolicy {
            allowed_channels: Vec::new(),
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_minimum() {
        let policy = ExportPolicy {
            min_unit_price: dec!(-1),
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_partial_override_from_toml() {
        let policy: ExportPolicy = toml::from_str(
            r#"
allowed_channels = ["Shop DE netto"]
min_unit_price = "0.50"
"#,
        )
        .unwrap();

        assert_eq!(policy.allowed_channels, vec!["Shop DE netto".to_string()]);
        assert_eq!(policy.min_unit_price, dec!(0.50));
        assert_eq!(policy.excluded_keywords.len(), 8);
    }
}
