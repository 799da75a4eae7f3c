//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod retry;
pub mod utils;

// Re-exports for convenience
pub use config::BatchConfig;
pub use error::{AppError, AppResult, BatchError, PlatformError};
pub use logging::{init_logger, log_startup_configuration};
