//! Logging initialization
//!
//! Warnings and errors go to the terminal; everything from `info` up is
//! appended to the log file so a run can be audited afterwards.

use anyhow::Result;
use simplelog::*;
use std::fs::OpenOptions;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file (appended to, created if missing)
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to open the file or install the logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", log_file_path, e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Warn,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup
pub fn log_startup_configuration(cookies_file: &str, urls_file: &str) {
    use crate::core::config;

    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("facildl starting");
    log::info!("  urls file:     {}", urls_file);
    log::info!("  cookies file:  {}", cookies_file);
    log::info!("  downloads dir: {}", config::expand_path(&config::DOWNLOADS_DIR).display());
    log::info!("  yt-dlp:        {}", config::YTDL_BIN.as_str());
    log::info!("  ffmpeg:        {}", config::FFMPEG_BIN.as_str());
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
