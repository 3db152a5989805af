//! Final report rendering.

use crate::download::BatchResult;

use std::fmt::Write;
use std::path::Path;

/// Render the end-of-run report.
///
/// ```rust
/// use harvester::download::BatchResult;
/// use harvester::progress::render_report;
/// use std::path::Path;
///
/// let result = BatchResult::new(2, 0, 2, Vec::new());
/// let report = render_report(&result, "PDF", Path::new("downloads"), 3);
/// assert!(report.contains("2/2 PDF file(s) downloaded"));
/// assert!(report.contains("100.0%"));
/// ```
pub fn render_report(
    result: &BatchResult,
    category_name: &str,
    directory: &Path,
    max_retries: u32,
) -> String {
    let mut report = String::new();

    let _ = writeln!(
        report,
        "Done: {}/{} {} file(s) downloaded",
        result.succeeded_count(),
        result.total_count(),
        category_name
    );
    if result.skipped_count() > 0 {
        let _ = writeln!(report, "Already present: {}", result.skipped_count());
    }
    let _ = writeln!(report, "Success rate: {:.1}%", result.success_rate());
    let _ = writeln!(report, "Saved to: {}", directory.display());

    if !result.terminally_failed().is_empty() {
        let _ = writeln!(
            report,
            "\n{} file(s) failed after {} retry round(s):",
            result.failed_count(),
            max_retries
        );
        for failure in result.terminally_failed() {
            let _ = writeln!(
                report,
                "  - {} ({})",
                failure.target.file_name(),
                failure.last_error
            );
        }
    }

    report
}

/// Message shown when discovery found nothing to download.
pub fn no_files_found(category_name: &str) -> String {
    format!("No {} files found to download.", category_name)
}
