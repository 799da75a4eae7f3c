//! Integration tests for the download task executor
//!
//! Run with: cargo test -p facilcore --test executor_test

mod common;
mod mocks;

use std::path::Path;

use common::{course, video_url};
use facilcore::core::error::PlatformError;
use facilcore::core::retry::RetryPolicy;
use facilcore::download::{
    execute_task, expand_course, DownloadTask, FailureReason, Quality, ReportKind, TaskOutcome, YtDlpClient,
};
use mocks::{DownloadBehavior, MockPlatformClient, RecordingReporter};

fn standalone(slug: &str) -> DownloadTask {
    DownloadTask::standalone(video_url(slug), Path::new("/dl"))
}

#[tokio::test]
async fn test_succeeds_on_first_attempt() {
    let mut client = MockPlatformClient::new().with_video(&video_url("a"), "A");
    let mut reporter = RecordingReporter::default();

    let outcome = execute_task(&mut client, &standalone("a"), Quality::P720, &RetryPolicy::default(), &mut reporter)
        .await
        .unwrap();

    assert!(matches!(outcome, TaskOutcome::Succeeded { attempts: 1, ref title } if title == "A"));
    assert_eq!(client.refreshes, 1);
    assert_eq!(reporter.count(ReportKind::Success), 1);
    assert_eq!(reporter.count(ReportKind::Failure), 0);
}

#[tokio::test]
async fn test_four_failures_then_success_uses_five_attempts() {
    let url = video_url("flaky");
    let mut client = MockPlatformClient::new().with_video_behavior(&url, "Flaky", DownloadBehavior::FailTimes(4));
    let mut reporter = RecordingReporter::default();

    let outcome = execute_task(&mut client, &standalone("flaky"), Quality::P720, &RetryPolicy::default(), &mut reporter)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.attempts(), 5);
    assert_eq!(client.attempts_for(&url), 5);
    assert!(reporter.contains(ReportKind::Progress, "Retrying"));
}

#[tokio::test]
async fn test_always_failing_download_stops_after_five_attempts() {
    let url = video_url("broken");
    let mut client = MockPlatformClient::new().with_video_behavior(&url, "Broken", DownloadBehavior::AlwaysFail);
    let mut reporter = RecordingReporter::default();

    let outcome = execute_task(&mut client, &standalone("broken"), Quality::P720, &RetryPolicy::default(), &mut reporter)
        .await
        .unwrap();

    match outcome {
        TaskOutcome::Failed {
            reason: FailureReason::RetriesExhausted(PlatformError::Download(_)),
            attempts,
        } => assert_eq!(attempts, 5),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(client.attempts_for(&url), 5);
    // exactly one terminal signal
    assert_eq!(reporter.count(ReportKind::Failure), 1);
    assert_eq!(reporter.count(ReportKind::Success), 0);
}

#[tokio::test]
async fn test_cookies_refreshed_before_every_attempt() {
    let url = video_url("flaky");
    let mut client = MockPlatformClient::new().with_video_behavior(&url, "Flaky", DownloadBehavior::FailTimes(2));
    let mut reporter = RecordingReporter::default();

    execute_task(&mut client, &standalone("flaky"), Quality::P720, &RetryPolicy::default(), &mut reporter)
        .await
        .unwrap();

    let download = format!("download:{}", url);
    assert_eq!(
        client.events,
        vec!["refresh", download.as_str(), "refresh", download.as_str(), "refresh", download.as_str()]
    );
}

#[tokio::test]
async fn test_unresolvable_video_consumes_no_attempt() {
    let mut client = MockPlatformClient::new();
    let mut reporter = RecordingReporter::default();

    let outcome = execute_task(&mut client, &standalone("gone"), Quality::P720, &RetryPolicy::default(), &mut reporter)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        TaskOutcome::Failed {
            reason: FailureReason::Unresolvable(_),
            attempts: 0
        }
    ));
    assert!(client.downloads.is_empty());
    assert_eq!(client.refreshes, 0);
    assert_eq!(reporter.count(ReportKind::Failure), 1);
}

#[tokio::test]
async fn test_ytdlp_spawn_failure_during_resolution_is_unresolvable() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = YtDlpClient::with_binary("/nonexistent/facildl-yt-dlp", dir.path().join("jar.txt"), true);
    let mut reporter = RecordingReporter::default();

    let outcome = execute_task(&mut client, &standalone("a"), Quality::P720, &RetryPolicy::default(), &mut reporter)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        TaskOutcome::Failed {
            reason: FailureReason::Unresolvable(PlatformError::Video(_)),
            attempts: 0
        }
    ));
    assert!(reporter.contains(ReportKind::Failure, "Could not fetch the video details."));
}

#[tokio::test]
async fn test_non_download_error_propagates_without_retry() {
    let url = video_url("ro");
    let mut client = MockPlatformClient::new().with_video_behavior(&url, "RO", DownloadBehavior::IoError);
    let mut reporter = RecordingReporter::default();

    let result = execute_task(&mut client, &standalone("ro"), Quality::P720, &RetryPolicy::default(), &mut reporter).await;

    assert!(matches!(result, Err(PlatformError::Io(_))));
    assert_eq!(client.attempts_for(&url), 1);
}

#[tokio::test]
async fn test_custom_attempt_bound() {
    let url = video_url("broken");
    let mut client = MockPlatformClient::new().with_video_behavior(&url, "Broken", DownloadBehavior::AlwaysFail);
    let mut reporter = RecordingReporter::default();
    let policy = RetryPolicy::new().max_attempts(2);

    let outcome = execute_task(&mut client, &standalone("broken"), Quality::P360, &policy, &mut reporter)
        .await
        .unwrap();

    assert_eq!(outcome.attempts(), 2);
    assert_eq!(client.downloads[0].quality, Quality::P360);
}

#[tokio::test]
async fn test_course_task_passes_directory_and_prefix() {
    let course = course("Rust", &[("Intro", 2)]);
    let tasks = expand_course(&course, Path::new("/dl"));
    let mut client = MockPlatformClient::new()
        .with_video(&video_url("Intro-1"), "Hola")
        .with_video(&video_url("Intro-2"), "Mundo");
    let mut reporter = RecordingReporter::default();

    execute_task(&mut client, &tasks[1], Quality::P720, &RetryPolicy::default(), &mut reporter)
        .await
        .unwrap();

    assert_eq!(client.downloads[0].dir, Path::new("/dl").join("Rust").join("01. Intro"));
    assert_eq!(client.downloads[0].prefix, "02. ");
    assert_eq!(
        reporter.lines.last().unwrap().2.section.as_deref(),
        Some("Intro")
    );
}
