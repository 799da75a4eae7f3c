//! Converts a browser-exported Netscape cookie file into the JSON cookie file
//! read by `facildl download`.
//!
//! Usage: cookies-convert [--input cookies_get.json] [--output cookies.json]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use facilcore::download::cookies::convert_netscape_file;

#[derive(Parser)]
#[command(name = "cookies-convert")]
#[command(about = "Convert a Netscape cookie export into cookies.json", long_about = None)]
struct Args {
    /// Netscape (tab-separated) cookie export
    #[arg(long, default_value = "cookies_get.json")]
    input: PathBuf,

    /// JSON cookie file to write
    #[arg(long, default_value = "cookies.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let count = convert_netscape_file(&args.input, &args.output)?;
    println!(
        "✓ {} cookies converted and saved to {}",
        count,
        args.output.display()
    );
    Ok(())
}
