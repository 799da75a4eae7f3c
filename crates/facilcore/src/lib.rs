//! facilcore - batch download engine for an online learning platform
//!
//! Takes a list of video/course URLs and a stored cookie set, resolves each
//! URL through a platform client, expands courses into ordered per-video
//! tasks and downloads them one at a time with bounded retries.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, retry policy, process helpers
//! - `download`: cookies, URL loading and classification, course expansion,
//!   the task executor, the batch orchestrator and the yt-dlp client

pub mod core;
pub mod download;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, BatchConfig, BatchError, PlatformError};
pub use download::{run_batch, BatchSummary, PlatformClient, Quality};
