use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;

use facildl::cli::{Cli, Commands};
use facilcore::core::{config, init_logger, log_startup_configuration};
use facilcore::download::{ConsoleReporter, DialoguerConfirmer, YtDlpClient};
use facilcore::{run_batch, BatchConfig, Quality};

/// Entry point for the batch downloader
///
/// # Errors
/// Returns an error (non-zero exit) when the required tooling is missing, a URL
/// is neither a video nor a course, or a course cannot be resolved.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env before any config static is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    if let Err(e) = init_logger(&config::LOG_FILE_PATH) {
        eprintln!("Logging to file disabled: {}", e);
    }

    match cli.command {
        Commands::Download {
            file_path,
            quality,
            headless,
            cookies,
        } => run_download(file_path, quality, headless, cookies).await,
    }
}

async fn run_download(file_path: PathBuf, quality: Quality, headless: bool, cookies: Option<PathBuf>) -> Result<()> {
    let cookies_file = cookies.unwrap_or_else(|| config::expand_path(&config::COOKIES_FILE));
    log_startup_configuration(&cookies_file.to_string_lossy(), &file_path.to_string_lossy());
    log::info!("Quality: {}, headless: {}", quality, headless);

    let batch_config = BatchConfig::from_env(quality);
    let mut client = YtDlpClient::new(headless);
    let mut reporter = ConsoleReporter;
    let mut confirmer = DialoguerConfirmer;

    let summary = run_batch(
        &mut client,
        &file_path,
        &cookies_file,
        &batch_config,
        &mut reporter,
        &mut confirmer,
    )
    .await?;

    log::info!("Batch finished: {}", summary.describe());
    Ok(())
}
