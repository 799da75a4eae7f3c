//! Process execution utilities with timeout support
//!
//! Helpers for running external programs (yt-dlp, ffmpeg) so a hung process
//! cannot stall the batch forever.

use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::PlatformError;

/// Run an async Command with a timeout.
///
/// Returns the process Output on success. A spawn failure surfaces as
/// `PlatformError::Io`; hitting the timeout kills the child and returns
/// `PlatformError::Io` with `TimedOut` kind.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, PlatformError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(PlatformError::Io(e)),
        Err(_) => Err(PlatformError::Io(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("process timed out after {}s", timeout.as_secs()),
        ))),
    }
}

/// Checks whether `bin` runs and answers `version_arg` successfully
pub async fn is_tool_available(bin: &str, version_arg: &str) -> bool {
    let mut cmd = Command::new(bin);
    cmd.arg(version_arg).stdout(Stdio::null()).stderr(Stdio::null());
    run_with_timeout(&mut cmd, config::download::version_check_timeout())
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Checks if ffmpeg is available
pub async fn is_ffmpeg_available() -> bool {
    is_tool_available(&config::FFMPEG_BIN, "-version").await
}

/// Checks if yt-dlp is available
pub async fn is_ytdlp_available() -> bool {
    is_tool_available(&config::YTDL_BIN, "--version").await
}

/// First non-empty line of a process' stderr, for error messages
pub fn first_stderr_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("unknown error")
        .to_string()
}
