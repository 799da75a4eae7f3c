//! URL list loading

use std::path::Path;

use crate::core::error::AppResult;
use crate::download::report::{ReportContext, ReportKind, Reporter};

/// Splits the URL list into trimmed, non-blank lines, keeping order.
pub fn parse_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the URL list file.
pub fn read_urls(path: &Path) -> AppResult<Vec<String>> {
    Ok(parse_urls(&fs_err::read_to_string(path)?))
}

/// Loads the URL list, reporting the outcome.
///
/// An unreadable file is reported and yields an empty list, which turns the
/// batch into a no-op.
pub fn load_urls(path: &Path, reporter: &mut dyn Reporter) -> Vec<String> {
    match read_urls(path) {
        Ok(urls) => {
            log::info!("Loaded {} URLs from {}", urls.len(), path.display());
            reporter.report(ReportKind::Success, "URLs loaded.", &ReportContext::default());
            urls
        }
        Err(e) => {
            reporter.report(
                ReportKind::Failure,
                &format!("Error loading URLs: {}", e),
                &ReportContext::default(),
            );
            Vec::new()
        }
    }
}
