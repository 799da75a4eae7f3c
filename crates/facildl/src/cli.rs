use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use facilcore::Quality;

#[derive(Parser)]
#[command(name = "facildl")]
#[command(author, version, about = "Batch downloader for videos and whole courses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every video and course listed in the URL file
    Download {
        /// File with one video or course URL per line
        #[arg(long, default_value = "urls.txt")]
        file_path: PathBuf,

        /// Output resolution applied to every download
        #[arg(long, value_enum, default_value_t = Quality::P720)]
        quality: Quality,

        /// Run the downloader without a visible window / progress output
        #[arg(long, default_value_t = false, action = ArgAction::Set)]
        headless: bool,

        /// JSON cookie file (defaults to COOKIES_FILE or cookies.json)
        #[arg(long)]
        cookies: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
