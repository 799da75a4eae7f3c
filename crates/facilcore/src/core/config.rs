use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::retry::RetryPolicy;
use crate::download::quality::Quality;

/// Root directory for every download
/// Read from DOWNLOADS_DIR environment variable
/// Supports tilde (~) expansion for home directory
/// Default: downloads (relative to the working directory)
pub static DOWNLOADS_DIR: Lazy<String> =
    Lazy::new(|| env::var("DOWNLOADS_DIR").unwrap_or_else(|_| "downloads".to_string()));

/// Path to the JSON cookie file installed into the session at startup
/// Read from COOKIES_FILE environment variable
/// Default: cookies.json
pub static COOKIES_FILE: Lazy<String> =
    Lazy::new(|| env::var("COOKIES_FILE").unwrap_or_else(|_| "cookies.json".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: facildl.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "facildl.log".to_string()));

/// yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// ffmpeg binary path
/// Read once at startup from FFMPEG_BIN environment variable or defaults to "ffmpeg"
pub static FFMPEG_BIN: Lazy<String> =
    Lazy::new(|| env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()));

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Download attempts per task, first attempt included
    pub const MAX_ATTEMPTS: u32 = 5;

    /// Pause between attempts (milliseconds); attempts follow each other directly
    pub const RETRY_DELAY_MS: u64 = 0;

    /// Retry delay duration
    pub fn delay() -> Duration {
        Duration::from_millis(RETRY_DELAY_MS)
    }
}

/// Download configuration
pub mod download {
    use super::Duration;

    /// Timeout for yt-dlp metadata queries (in seconds)
    pub const YTDLP_TIMEOUT_SECS: u64 = 240;

    /// Timeout for `--version` probes of external tools (in seconds)
    pub const VERSION_CHECK_TIMEOUT_SECS: u64 = 10;

    /// Name of the Netscape cookie jar handed to yt-dlp
    pub const COOKIE_JAR_FILE: &str = ".facildl-cookies.txt";

    /// yt-dlp metadata timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }

    /// Version probe timeout duration
    pub fn version_check_timeout() -> Duration {
        Duration::from_secs(VERSION_CHECK_TIMEOUT_SECS)
    }
}

/// Expands `~` in a configured path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Settings fixed for the duration of one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory every course tree and standalone video lands in
    pub downloads_root: PathBuf,
    /// Resolution applied to every download of the run
    pub quality: Quality,
    /// Attempt bound and pacing for each task
    pub retry: RetryPolicy,
}

impl BatchConfig {
    pub fn new(downloads_root: impl Into<PathBuf>, quality: Quality) -> Self {
        Self {
            downloads_root: downloads_root.into(),
            quality,
            retry: RetryPolicy::default(),
        }
    }

    /// Builds the config from `DOWNLOADS_DIR` and the requested quality.
    pub fn from_env(quality: Quality) -> Self {
        Self::new(expand_path(&DOWNLOADS_DIR), quality)
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
