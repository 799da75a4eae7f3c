//! Batch orchestration
//!
//! Walks the URL list in order and dispatches every entry:
//! - video: one task through the executor; any failure is isolated
//! - course: resolve, show the structure, ask, then one task per video;
//!   an unresolvable course stops the batch
//! - anything else stops the batch

use std::path::Path;

use crate::core::config::BatchConfig;
use crate::core::error::BatchError;
use crate::download::classify::{classify_url, UrlKind};
use crate::download::client::PlatformClient;
use crate::download::cookies::load_cookies;
use crate::download::course::{expand_course, DownloadTask};
use crate::download::executor::{execute_task, TaskOutcome};
use crate::download::report::{Confirmer, ReportContext, ReportKind, Reporter};
use crate::download::urls::load_urls;

/// Question asked before a course download starts
pub const COURSE_CONFIRMATION: &str = "Would you like to download this course?";

/// Counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// URL entries processed (declined courses included)
    pub entries: usize,
    pub videos_succeeded: usize,
    pub videos_failed: usize,
    /// Courses where every task downloaded
    pub courses_completed: usize,
    /// Courses that ran to the end with at least one failed task
    pub courses_incomplete: usize,
    pub courses_declined: usize,
    /// Download attempts made across all tasks
    pub download_attempts: u32,
}

impl BatchSummary {
    fn record(&mut self, outcome: &TaskOutcome) {
        self.download_attempts += outcome.attempts();
        if outcome.is_success() {
            self.videos_succeeded += 1;
        } else {
            self.videos_failed += 1;
        }
    }

    /// One-line human summary
    pub fn describe(&self) -> String {
        format!(
            "{} entries: {} videos downloaded, {} failed, {} courses completed, {} incomplete, {} declined ({} download attempts)",
            self.entries,
            self.videos_succeeded,
            self.videos_failed,
            self.courses_completed,
            self.courses_incomplete,
            self.courses_declined,
            self.download_attempts
        )
    }
}

/// Refuses to start when the client's external tooling is missing.
pub async fn preflight<C: PlatformClient + ?Sized>(client: &C, reporter: &mut dyn Reporter) -> Result<(), BatchError> {
    let missing = client.missing_tools().await;
    if missing.is_empty() {
        return Ok(());
    }

    let tools = missing.join(", ");
    let verb = if missing.len() == 1 { "is" } else { "are" };
    reporter.report(
        ReportKind::Error,
        &format!("{} {} not installed.", tools, verb),
        &ReportContext::default(),
    );
    Err(BatchError::MissingTool { tools })
}

/// Processes every URL entry in order.
///
/// Stops early with `BatchError` on an invalid URL, an unresolvable course,
/// or a non-download error inside a course task.
pub async fn process_entries<C: PlatformClient + ?Sized>(
    client: &mut C,
    urls: &[String],
    config: &BatchConfig,
    reporter: &mut dyn Reporter,
    confirmer: &mut dyn Confirmer,
) -> Result<BatchSummary, BatchError> {
    let mut summary = BatchSummary::default();

    for url in urls {
        match classify_url(client, url) {
            UrlKind::Video => {
                summary.entries += 1;
                process_video(client, url, config, reporter, &mut summary).await;
            }
            UrlKind::Course => {
                summary.entries += 1;
                process_course(client, url, config, reporter, confirmer, &mut summary).await?;
            }
            UrlKind::Invalid => {
                reporter.report(
                    ReportKind::Error,
                    &format!("URL not valid for [VIDEO|COURSE]: {}", url),
                    &ReportContext::url(url),
                );
                return Err(BatchError::InvalidUrl { url: url.clone() });
            }
        }
    }

    Ok(summary)
}

async fn process_video<C: PlatformClient + ?Sized>(
    client: &mut C,
    url: &str,
    config: &BatchConfig,
    reporter: &mut dyn Reporter,
    summary: &mut BatchSummary,
) {
    let task = DownloadTask::standalone(url, &config.downloads_root);
    match execute_task(client, &task, config.quality, &config.retry, reporter).await {
        Ok(outcome) => summary.record(&outcome),
        Err(e) => {
            summary.videos_failed += 1;
            log::error!("Video {} failed ({}): {}", url, e.subcategory(), e);
            reporter.report(
                ReportKind::Failure,
                &format!("Error downloading {}: {}", url, e),
                &ReportContext::url(url),
            );
        }
    }
}

async fn process_course<C: PlatformClient + ?Sized>(
    client: &mut C,
    url: &str,
    config: &BatchConfig,
    reporter: &mut dyn Reporter,
    confirmer: &mut dyn Confirmer,
    summary: &mut BatchSummary,
) -> Result<(), BatchError> {
    let context = ReportContext::url(url);

    let course = match client.resolve_course(url).await {
        Ok(course) => course,
        Err(e) => {
            reporter.report(ReportKind::Failure, "Could not download the course.", &context);
            return Err(BatchError::CourseUnavailable {
                url: url.to_string(),
                source: e,
            });
        }
    };

    reporter.report(ReportKind::Info, &course.summary_table(), &context);

    if !confirmer.confirm(COURSE_CONFIRMATION) {
        log::info!("Course {} declined", url);
        summary.courses_declined += 1;
        return Ok(());
    }

    let tasks = expand_course(&course, &config.downloads_root);
    log::info!("Course {} expanded into {} tasks", course.title, tasks.len());

    let mut all_succeeded = true;
    for task in &tasks {
        match execute_task(client, task, config.quality, &config.retry, reporter).await {
            Ok(outcome) => {
                all_succeeded &= outcome.is_success();
                summary.record(&outcome);
            }
            Err(e) => {
                reporter.report(
                    ReportKind::Error,
                    &format!("Course aborted at {}: {}", task.video_url, e),
                    &ReportContext::url(&task.video_url).with_section(task.section_title.as_deref()),
                );
                return Err(BatchError::TaskAborted {
                    url: url.to_string(),
                    source: e,
                });
            }
        }
    }

    if all_succeeded {
        summary.courses_completed += 1;
    } else {
        summary.courses_incomplete += 1;
    }
    Ok(())
}

/// Full run: pre-flight check, URL list, cookies, then every entry.
pub async fn run_batch<C: PlatformClient + ?Sized>(
    client: &mut C,
    urls_file: &Path,
    cookies_file: &Path,
    config: &BatchConfig,
    reporter: &mut dyn Reporter,
    confirmer: &mut dyn Confirmer,
) -> Result<BatchSummary, BatchError> {
    preflight(client, reporter).await?;

    let urls = load_urls(urls_file, reporter);
    load_cookies(cookies_file, client, reporter);

    let summary = process_entries(client, &urls, config, reporter, confirmer).await?;
    reporter.report(ReportKind::Info, &summary.describe(), &ReportContext::default());
    Ok(summary)
}
