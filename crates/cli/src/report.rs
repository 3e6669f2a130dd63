//! Writes the raw results payload to `<test_name>_report.json`.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use te_monitor_common::Result;

/// Deterministic report filename for a test name
pub fn report_filename(test_name: &str) -> String {
    format!("{test_name}_report.json")
}

/// Serialize the full payload as indented JSON into `dir`, overwriting any
/// existing report for the same test name. A write failure is fatal to the
/// run and propagates to the caller.
pub fn save_report<T: Serialize>(dir: &Path, test_name: &str, payload: &T) -> Result<PathBuf> {
    let path = dir.join(report_filename(test_name));

    let body = serde_json::to_string_pretty(payload)?;
    std::fs::write(&path, body)?;

    info!("Report saved to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename("foo"), "foo_report.json");
    }
}
