//! Download task executor
//!
//! Runs one task through `Resolving -> Attempting(n) -> {Succeeded, Failed}`:
//! - a resolution failure fails the task without any download attempt
//! - cookies are refreshed before every attempt, the first one included
//! - a download failure is retried until the policy's attempt bound
//! - any other error is returned to the caller untouched

use crate::core::error::PlatformError;
use crate::core::retry::{RetryPolicy, Retryable};
use crate::download::client::PlatformClient;
use crate::download::course::DownloadTask;
use crate::download::quality::Quality;
use crate::download::report::{ReportContext, ReportKind, Reporter};

/// Why a task ended in `Failed`
#[derive(Debug)]
pub enum FailureReason {
    /// The video could not be resolved; no attempt was made
    Unresolvable(PlatformError),
    /// Every allowed attempt failed; holds the last error
    RetriesExhausted(PlatformError),
}

/// Terminal state of a task
#[derive(Debug)]
pub enum TaskOutcome {
    Succeeded { title: String, attempts: u32 },
    Failed { reason: FailureReason, attempts: u32 },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded { .. })
    }

    /// Download attempts consumed by the task
    pub fn attempts(&self) -> u32 {
        match self {
            TaskOutcome::Succeeded { attempts, .. } | TaskOutcome::Failed { attempts, .. } => *attempts,
        }
    }
}

/// Executes one task.
///
/// Returns `Ok` with exactly one terminal outcome, or `Err` for errors the
/// executor does not handle (anything other than video resolution and
/// download failures).
pub async fn execute_task<C: PlatformClient + ?Sized>(
    client: &mut C,
    task: &DownloadTask,
    quality: Quality,
    policy: &RetryPolicy,
    reporter: &mut dyn Reporter,
) -> Result<TaskOutcome, PlatformError> {
    let context = ReportContext::url(&task.video_url).with_section(task.section_title.as_deref());

    let video = match client.resolve_video(&task.video_url).await {
        Ok(video) => video,
        Err(e @ PlatformError::Video(_)) => {
            reporter.report(ReportKind::Failure, "Could not fetch the video details.", &context);
            log::error!(
                "[SECTION] {} [VIDEO] {}",
                task.section_title.as_deref().unwrap_or("-"),
                task.video_url
            );
            return Ok(TaskOutcome::Failed {
                reason: FailureReason::Unresolvable(e),
                attempts: 0,
            });
        }
        Err(e) => return Err(e),
    };

    let mut attempt = 0;
    loop {
        attempt += 1;
        let context = context.clone().with_attempt(attempt);

        reporter.report(ReportKind::Progress, "Downloading...", &context);
        reporter.report(ReportKind::Progress, &format!("{} ...", video.title), &context);

        client.refresh_cookies().await?;

        match client
            .download(&video, quality, &task.target_directory, &task.filename_prefix)
            .await
        {
            Ok(()) => {
                reporter.report(ReportKind::Success, &format!("Done: {}", video.title), &context);
                return Ok(TaskOutcome::Succeeded {
                    title: video.title,
                    attempts: attempt,
                });
            }
            Err(e) if e.is_retryable() => {
                log::warn!(
                    "Attempt {}/{} for {} failed: {}",
                    attempt,
                    policy.max_attempts,
                    task.video_url,
                    e
                );
                if policy.allows_retry_after(attempt) {
                    reporter.report(ReportKind::Progress, "An error occurred while downloading :(", &context);
                    reporter.report(ReportKind::Progress, "Retrying ...", &context);
                    policy.pause().await;
                } else {
                    reporter.report(ReportKind::Failure, "Could not download the video.", &context);
                    return Ok(TaskOutcome::Failed {
                        reason: FailureReason::RetriesExhausted(e),
                        attempts: attempt,
                    });
                }
            }
            Err(e) => return Err(e),
        }
    }
}
