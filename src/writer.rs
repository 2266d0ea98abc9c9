//! Report file output
//!
//! Writes the rendered markdown to `reports/weekly-report-<date>.md` under
//! the workspace root, creating the directory if needed. Same-day reruns
//! overwrite the previous report: last writer wins.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;

/// Compute the dated report path under `base`.
pub fn report_path(base: &Path, date: NaiveDate) -> PathBuf {
    base.join("reports")
        .join(format!("weekly-report-{}.md", date.format("%Y-%m-%d")))
}

/// Write the report, creating `reports/` if missing. Returns the path.
pub fn write_report(base: &Path, date: NaiveDate, contents: &str) -> Result<PathBuf> {
    let path = report_path(base, date);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Open the report in the platform default handler.
pub fn open_report(path: &Path) -> std::io::Result<()> {
    open::that(path)
}
