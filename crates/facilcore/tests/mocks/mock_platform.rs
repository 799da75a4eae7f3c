//! Scripted platform client

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use facilcore::core::error::PlatformError;
use facilcore::download::{
    Confirmer, CookieRecord, CourseRef, PlatformClient, Quality, ReportContext, ReportKind, Reporter, VideoRef,
};

/// What `download` does for a given video URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadBehavior {
    Succeed,
    /// Fail with `PlatformError::Download` this many times, then succeed
    FailTimes(u32),
    AlwaysFail,
    /// Fail with a non-download error
    IoError,
}

/// One recorded download call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCall {
    pub url: String,
    pub quality: Quality,
    pub dir: PathBuf,
    pub prefix: String,
}

/// Platform client driven by in-memory tables
#[derive(Debug)]
pub struct MockPlatformClient {
    pub tool_installed: bool,
    pub missing: Option<Vec<String>>,
    videos: HashMap<String, String>,
    courses: HashMap<String, CourseRef>,
    behaviors: HashMap<String, DownloadBehavior>,
    failures_so_far: HashMap<String, u32>,
    pub installed_cookies: Vec<CookieRecord>,
    pub refreshes: u32,
    pub resolved_videos: Vec<String>,
    pub downloads: Vec<DownloadCall>,
    /// Interleaving of refresh/download calls, e.g. `["refresh", "download:<url>"]`
    pub events: Vec<String>,
}

impl Default for MockPlatformClient {
    fn default() -> Self {
        Self {
            tool_installed: true,
            missing: None,
            videos: HashMap::new(),
            courses: HashMap::new(),
            behaviors: HashMap::new(),
            failures_so_far: HashMap::new(),
            installed_cookies: Vec::new(),
            refreshes: 0,
            resolved_videos: Vec::new(),
            downloads: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl MockPlatformClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resolvable video that downloads on the first attempt
    pub fn with_video(self, url: &str, title: &str) -> Self {
        self.with_video_behavior(url, title, DownloadBehavior::Succeed)
    }

    pub fn with_video_behavior(mut self, url: &str, title: &str, behavior: DownloadBehavior) -> Self {
        self.videos.insert(url.to_string(), title.to_string());
        self.behaviors.insert(url.to_string(), behavior);
        self
    }

    pub fn with_course(mut self, url: &str, course: CourseRef) -> Self {
        self.courses.insert(url.to_string(), course);
        self
    }

    pub fn without_tool(mut self) -> Self {
        self.tool_installed = false;
        self
    }

    /// Reports these tools by name as missing
    pub fn missing(mut self, tools: &[&str]) -> Self {
        self.tool_installed = false;
        self.missing = Some(tools.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Download attempts made for one video URL
    pub fn attempts_for(&self, url: &str) -> usize {
        self.downloads.iter().filter(|d| d.url == url).count()
    }
}

#[async_trait]
impl PlatformClient for MockPlatformClient {
    fn name(&self) -> &str {
        "mock"
    }

    fn install_cookie(&mut self, cookie: &CookieRecord) {
        self.installed_cookies.push(cookie.clone());
    }

    async fn refresh_cookies(&mut self) -> Result<(), PlatformError> {
        self.refreshes += 1;
        self.events.push("refresh".to_string());
        Ok(())
    }

    async fn is_required_tool_installed(&self) -> bool {
        self.tool_installed
    }

    async fn missing_tools(&self) -> Vec<String> {
        match &self.missing {
            Some(tools) => tools.clone(),
            None if self.tool_installed => Vec::new(),
            None => vec!["ffmpeg".to_string()],
        }
    }

    async fn resolve_video(&mut self, url: &str) -> Result<VideoRef, PlatformError> {
        self.resolved_videos.push(url.to_string());
        match self.videos.get(url) {
            Some(title) => Ok(VideoRef {
                title: title.clone(),
                url: url.to_string(),
            }),
            None => Err(PlatformError::Video(format!("{} not found", url))),
        }
    }

    async fn resolve_course(&mut self, url: &str) -> Result<CourseRef, PlatformError> {
        self.courses
            .get(url)
            .cloned()
            .ok_or_else(|| PlatformError::Course(format!("{} not found", url)))
    }

    async fn download(
        &mut self,
        video: &VideoRef,
        quality: Quality,
        dir: &Path,
        prefix: &str,
    ) -> Result<(), PlatformError> {
        self.events.push(format!("download:{}", video.url));
        self.downloads.push(DownloadCall {
            url: video.url.clone(),
            quality,
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        });

        let behavior = self
            .behaviors
            .get(&video.url)
            .copied()
            .unwrap_or(DownloadBehavior::Succeed);
        let failures = self.failures_so_far.entry(video.url.clone()).or_insert(0);

        match behavior {
            DownloadBehavior::Succeed => Ok(()),
            DownloadBehavior::FailTimes(n) if *failures < n => {
                *failures += 1;
                Err(PlatformError::Download("HTTP 503".to_string()))
            }
            DownloadBehavior::FailTimes(_) => Ok(()),
            DownloadBehavior::AlwaysFail => Err(PlatformError::Download("HTTP 403".to_string())),
            DownloadBehavior::IoError => Err(PlatformError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only filesystem",
            ))),
        }
    }
}

/// Reporter that keeps every line
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub lines: Vec<(ReportKind, String, ReportContext)>,
}

impl RecordingReporter {
    pub fn count(&self, kind: ReportKind) -> usize {
        self.lines.iter().filter(|(k, _, _)| *k == kind).count()
    }

    pub fn contains(&self, kind: ReportKind, needle: &str) -> bool {
        self.lines.iter().any(|(k, m, _)| *k == kind && m.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, kind: ReportKind, message: &str, context: &ReportContext) {
        self.lines.push((kind, message.to_string(), context.clone()));
    }
}

/// Confirmer answering from a script; answers "no" once the script runs out
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: VecDeque<bool>,
    pub questions: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            questions: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
