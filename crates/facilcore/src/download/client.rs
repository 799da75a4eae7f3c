//! Platform client abstraction.
//!
//! The batch loop never talks to the platform directly: resolution, cookie
//! handling and the media download all go through `PlatformClient`. The
//! built-in backend is `YtDlpClient`; tests plug in a scripted mock.

use async_trait::async_trait;
use std::path::Path;

use crate::core::error::PlatformError;
use crate::download::classify;
use crate::download::cookies::CookieRecord;
use crate::download::course::CourseRef;
use crate::download::quality::Quality;

/// A video resolved by the client. Lives for one task only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    /// Display title
    pub title: String,
    /// Page URL the video was resolved from
    pub url: String,
}

/// Capabilities the batch loop needs from the platform.
///
/// Calls are made one at a time; `&mut self` is the session handle.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Human-readable backend name (e.g., "yt-dlp")
    fn name(&self) -> &str;

    /// Installs one cookie into the session.
    fn install_cookie(&mut self, cookie: &CookieRecord);

    /// Refreshes the session's authentication cookies. Idempotent; called
    /// before every download attempt.
    async fn refresh_cookies(&mut self) -> Result<(), PlatformError>;

    /// Whether `url` has the shape of a single-video page.
    fn is_video_url(&self, url: &str) -> bool {
        classify::is_video_url(url)
    }

    /// Whether `url` has the shape of a course page.
    fn is_course_url(&self, url: &str) -> bool {
        classify::is_course_url(url)
    }

    /// Whether the external codec/merge tooling is present on the host.
    async fn is_required_tool_installed(&self) -> bool;

    /// Names of the missing tools; empty when everything is present.
    async fn missing_tools(&self) -> Vec<String> {
        if self.is_required_tool_installed().await {
            Vec::new()
        } else {
            vec!["ffmpeg".to_string()]
        }
    }

    /// Resolves a video page; fails with `PlatformError::Video`.
    async fn resolve_video(&mut self, url: &str) -> Result<VideoRef, PlatformError>;

    /// Resolves a course page; fails with `PlatformError::Course`.
    async fn resolve_course(&mut self, url: &str) -> Result<CourseRef, PlatformError>;

    /// Downloads `video` into `dir` with files named `<prefix><title>.<ext>`;
    /// a failed attempt is `PlatformError::Download`.
    async fn download(
        &mut self,
        video: &VideoRef,
        quality: Quality,
        dir: &Path,
        prefix: &str,
    ) -> Result<(), PlatformError>;
}
