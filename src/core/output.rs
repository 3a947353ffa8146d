//! Tab-delimited report output

use crate::core::reconcile::{OrderRow, COLUMNS};
use crate::domain::{ReportingWindow, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default report location: `<dir>/<prefix>_<YYYYMMDD>_<YYYYMMDD>.csv`
pub fn default_output_path(dir: impl AsRef<Path>, prefix: &str, window: &ReportingWindow) -> PathBuf {
    dir.as_ref().join(format!(
        "{prefix}_{}_{}.csv",
        window.start.format("%Y%m%d"),
        window.end.format("%Y%m%d")
    ))
}

/// Write the header and all rows to `path`, creating the parent directory
///
/// An existing file is overwritten.
///
/// # Errors
///
/// Returns an I/O error if the directory or the file cannot be written.
pub fn write_report(rows: &[OrderRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(path)?;
    write_rows(rows, io::BufWriter::new(file))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "Report written");
    Ok(())
}

/// Serialize the header and rows to any writer
///
/// Fields are tab-separated, records end with CRLF and a field is quoted only
/// when it contains a tab, a quote or a line break.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_rows<W: io::Write>(rows: &[OrderRow], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(())
}
