//! yt-dlp backed platform client.
//!
//! Resolution and the media download are delegated to the external `yt-dlp`
//! program; this module only builds its command lines, parses its JSON and
//! keeps the session cookies in a Netscape jar that yt-dlp reads and rewrites.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::PlatformError;
use crate::core::process::{first_stderr_line, is_ffmpeg_available, is_tool_available, run_with_timeout};
use crate::download::client::{PlatformClient, VideoRef};
use crate::download::cookies::{parse_netscape_line, CookieRecord, NetscapeCookie};
use crate::download::course::{CourseRef, SectionRef};
use crate::download::quality::Quality;

const NETSCAPE_HEADER: &str = "# Netscape HTTP Cookie File\n";
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// JSON structure from yt-dlp --dump-single-json (videos and playlists alike)
#[derive(Debug, Deserialize)]
struct YtdlpInfoJson {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    entries: Option<Vec<YtdlpInfoJson>>,
}

impl YtdlpInfoJson {
    fn page_url(&self) -> Option<&str> {
        self.webpage_url.as_deref().or(self.url.as_deref())
    }
}

/// Builds a `VideoRef` from yt-dlp's single-video JSON.
pub fn parse_video_json(json: &str, url: &str) -> Result<VideoRef, PlatformError> {
    let info: YtdlpInfoJson =
        serde_json::from_str(json).map_err(|e| PlatformError::Video(format!("unreadable metadata: {}", e)))?;
    let title = info
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| PlatformError::Video(format!("no title for {}", url)))?;
    Ok(VideoRef {
        title,
        url: url.to_string(),
    })
}

/// Builds a `CourseRef` from yt-dlp's flat-playlist JSON.
///
/// Nested playlists become sections; a flat playlist becomes one section
/// named after the course.
pub fn parse_course_json(json: &str) -> Result<CourseRef, PlatformError> {
    let info: YtdlpInfoJson =
        serde_json::from_str(json).map_err(|e| PlatformError::Course(format!("unreadable metadata: {}", e)))?;
    let title = info
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| PlatformError::Course("course has no title".to_string()))?;
    let entries = info.entries.unwrap_or_default();
    if entries.is_empty() {
        return Err(PlatformError::Course(format!("course {} lists no videos", title)));
    }

    let nested = entries.iter().any(|e| e.entries.is_some());
    let sections = if nested {
        entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| match &entry.entries {
                Some(videos) => SectionRef {
                    title: entry.title.clone().unwrap_or_else(|| format!("Section {}", idx + 1)),
                    videos_url: videos.iter().filter_map(|v| v.page_url().map(str::to_string)).collect(),
                },
                None => SectionRef {
                    title: entry.title.clone().unwrap_or_else(|| format!("Section {}", idx + 1)),
                    videos_url: entry.page_url().map(str::to_string).into_iter().collect(),
                },
            })
            .collect()
    } else {
        vec![SectionRef {
            title: title.clone(),
            videos_url: entries.iter().filter_map(|e| e.page_url().map(str::to_string)).collect(),
        }]
    };

    Ok(CourseRef { title, sections })
}

/// Platform client driving the `yt-dlp` binary.
pub struct YtDlpClient {
    bin: String,
    cookie_jar: PathBuf,
    cookies: Vec<CookieRecord>,
    headless: bool,
    /// The jar on disk was written from this session and nothing was
    /// installed since. A jar found on disk before that is never read.
    jar_synced: bool,
}

impl YtDlpClient {
    /// Client using `YTDL_BIN` and the default cookie jar path.
    pub fn new(headless: bool) -> Self {
        Self::with_binary(config::YTDL_BIN.as_str(), config::download::COOKIE_JAR_FILE, headless)
    }

    pub fn with_binary(bin: impl Into<String>, cookie_jar: impl Into<PathBuf>, headless: bool) -> Self {
        Self {
            bin: bin.into(),
            cookie_jar: cookie_jar.into(),
            cookies: Vec::new(),
            headless,
            jar_synced: false,
        }
    }

    /// Cookies currently held by the session
    pub fn cookies(&self) -> &[CookieRecord] {
        &self.cookies
    }

    /// Netscape jar contents for the current session
    pub fn render_jar(&self) -> String {
        let mut jar = String::from(NETSCAPE_HEADER);
        for cookie in &self.cookies {
            jar.push_str(&NetscapeCookie::from(cookie).to_netscape_line());
            jar.push('\n');
        }
        jar
    }

    /// Replaces the cookie with the same domain, path and name, or appends it.
    fn upsert_cookie(&mut self, cookie: &CookieRecord) {
        match self
            .cookies
            .iter_mut()
            .find(|c| c.domain == cookie.domain && c.path == cookie.path && c.name == cookie.name)
        {
            Some(existing) => *existing = cookie.clone(),
            None => self.cookies.push(cookie.clone()),
        }
    }

    /// Merges cookies yt-dlp wrote back into the jar.
    fn merge_jar(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.strip_prefix(HTTP_ONLY_PREFIX).unwrap_or(line);
            if let Some(cookie) = parse_netscape_line(line) {
                self.upsert_cookie(&CookieRecord::from(cookie));
            }
        }
    }

    async fn write_jar(&mut self) -> Result<(), PlatformError> {
        fs_err::tokio::write(&self.cookie_jar, self.render_jar())
            .await
            .map_err(|e| PlatformError::Session(e.to_string()))?;
        self.jar_synced = true;
        Ok(())
    }

    /// Writes the session into the jar unless it already holds it.
    async fn sync_jar(&mut self) -> Result<(), PlatformError> {
        if self.jar_synced {
            return Ok(());
        }
        self.write_jar().await
    }

    async fn dump_json(&mut self, url: &str, flat: bool) -> Result<Result<String, String>, PlatformError> {
        self.sync_jar().await?;

        let jar = self.cookie_jar.to_string_lossy();
        let mut args: Vec<&str> = vec!["--dump-single-json", "--skip-download", "--no-warnings"];
        if flat {
            args.push("--flat-playlist");
        } else {
            args.push("--no-playlist");
        }
        args.extend(["--cookies", jar.as_ref(), url]);

        log::info!("Resolving {} (flat: {})", url, flat);
        let mut cmd = Command::new(&self.bin);
        cmd.args(&args).stdout(Stdio::piped()).stderr(Stdio::piped());
        let output = run_with_timeout(&mut cmd, config::download::ytdlp_timeout()).await?;

        if output.status.success() {
            Ok(Ok(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            Ok(Err(first_stderr_line(&output)))
        }
    }

    /// yt-dlp arguments for one download
    pub fn download_args(&self, video: &VideoRef, quality: Quality, dir: &Path, prefix: &str) -> Vec<String> {
        let template = dir.join(format!("{}%(title)s.%(ext)s", prefix));
        let mut args = vec![
            "-f".to_string(),
            quality.format_selector(),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
            "--no-playlist".to_string(),
            "--cookies".to_string(),
            self.cookie_jar.to_string_lossy().into_owned(),
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
        ];
        if self.headless {
            args.push("--quiet".to_string());
            args.push("--no-progress".to_string());
        }
        args.push(video.url.clone());
        args
    }
}

#[async_trait]
impl PlatformClient for YtDlpClient {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    fn install_cookie(&mut self, cookie: &CookieRecord) {
        self.upsert_cookie(cookie);
        self.jar_synced = false;
    }

    async fn refresh_cookies(&mut self) -> Result<(), PlatformError> {
        // Only a jar written by this session can carry cookies yt-dlp rotated
        if self.jar_synced {
            if let Ok(content) = fs_err::tokio::read_to_string(&self.cookie_jar).await {
                self.merge_jar(&content);
            }
        }
        self.write_jar().await
    }

    async fn is_required_tool_installed(&self) -> bool {
        self.missing_tools().await.is_empty()
    }

    async fn missing_tools(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !is_ffmpeg_available().await {
            missing.push(config::FFMPEG_BIN.to_string());
        }
        if !is_tool_available(&self.bin, "--version").await {
            missing.push(self.bin.clone());
        }
        missing
    }

    async fn resolve_video(&mut self, url: &str) -> Result<VideoRef, PlatformError> {
        // Spawn failures, timeouts and jar errors still mean "video unavailable"
        match self.dump_json(url, false).await.map_err(|e| PlatformError::Video(e.to_string()))? {
            Ok(json) => parse_video_json(&json, url),
            Err(stderr) => Err(PlatformError::Video(stderr)),
        }
    }

    async fn resolve_course(&mut self, url: &str) -> Result<CourseRef, PlatformError> {
        match self.dump_json(url, true).await.map_err(|e| PlatformError::Course(e.to_string()))? {
            Ok(json) => parse_course_json(&json),
            Err(stderr) => Err(PlatformError::Course(stderr)),
        }
    }

    async fn download(
        &mut self,
        video: &VideoRef,
        quality: Quality,
        dir: &Path,
        prefix: &str,
    ) -> Result<(), PlatformError> {
        fs_err::tokio::create_dir_all(dir).await?;

        let args = self.download_args(video, quality, dir, prefix);
        log::info!("Downloading {} at {} into {}", video.url, quality, dir.display());

        let mut cmd = Command::new(&self.bin);
        cmd.args(&args).kill_on_drop(true);

        if self.headless {
            let output = cmd.stdout(Stdio::null()).stderr(Stdio::piped()).output().await?;
            if !output.status.success() {
                return Err(PlatformError::Download(first_stderr_line(&output)));
            }
        } else {
            let status = cmd.status().await?;
            if !status.success() {
                return Err(PlatformError::Download(format!("yt-dlp exited with {}", status)));
            }
        }
        Ok(())
    }
}
