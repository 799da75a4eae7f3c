use thiserror::Error;

use crate::core::retry::Retryable;

/// Errors raised while loading local input (cookie file, URL list, config).
///
/// None of these stop a batch by themselves: the loaders report them and
/// carry on with empty data.
///
/// # Example
///
/// ```
/// use facilcore::core::error::AppError;
///
/// let err = AppError::Validation("empty cookie name".into());
/// assert_eq!(err.to_string(), "Validation error: empty cookie name");
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Error kinds returned by a platform client.
///
/// Only [`PlatformError::Download`] is retried by the task executor; every
/// other kind ends the attempt loop on the spot.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Video metadata could not be obtained (removed video, auth scope mismatch)
    #[error("video unavailable: {0}")]
    Video(String),

    /// Course metadata could not be obtained
    #[error("course unavailable: {0}")]
    Course(String),

    /// A single download attempt failed
    #[error("download failed: {0}")]
    Download(String),

    /// Cookie jar or session state could not be read or written
    #[error("session error: {0}")]
    Session(String),

    /// Process spawn or filesystem failure inside the client
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlatformError {
    /// Returns subcategory for log lines
    pub fn subcategory(&self) -> &'static str {
        match self {
            PlatformError::Video(_) => "video",
            PlatformError::Course(_) => "course",
            PlatformError::Download(_) => "download",
            PlatformError::Session(_) => "session",
            PlatformError::Io(_) => "io",
        }
    }
}

impl Retryable for PlatformError {
    fn is_retryable(&self) -> bool {
        matches!(self, PlatformError::Download(_))
    }
}

/// Reasons a batch stops before the end of the URL list.
#[derive(Error, Debug)]
pub enum BatchError {
    /// ffmpeg (or another tool the client needs) is not on the host
    #[error("required tooling is not installed: {tools}")]
    MissingTool { tools: String },

    /// The entry matches neither a video nor a course URL
    #[error("URL is neither a video nor a course: {url}")]
    InvalidUrl { url: String },

    /// Course metadata could not be resolved
    #[error("could not resolve course {url}: {source}")]
    CourseUnavailable {
        url: String,
        #[source]
        source: PlatformError,
    },

    /// A non-download error escaped a course task
    #[error("course {url} aborted: {source}")]
    TaskAborted {
        url: String,
        #[source]
        source: PlatformError,
    },
}
