// vidpub-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidpub: Multi-platform video publisher",
    long_about = "Publishes videos to YouTube, YouTube Shorts, TikTok and Instagram with \
                  orientation-based routing, daily rate limits, risk screening and an emergency stop."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload one or more videos
    Upload(UploadArgs),

    /// Show emergency stop state and today's quota per platform
    Status,

    /// Authenticate a platform through its configured uploader
    Auth(AuthArgs),

    /// Trigger the emergency stop (blocks all new uploads)
    Stop,

    /// Clear the emergency stop sentinel file
    Resume,

    /// Print the default metadata template as JSON
    Template,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Video files to publish, processed one at a time
    #[arg(required = true, value_name = "VIDEO")]
    pub videos: Vec<PathBuf>,

    /// Comma-separated platforms (youtube, youtube_shorts, tiktok, instagram) or "all".
    /// Omit to route by video orientation.
    #[arg(short, long, value_delimiter = ',', value_name = "PLATFORMS")]
    pub platforms: Option<Vec<String>>,

    /// Metadata JSON file (see `vidpub template`)
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Video title (overrides the metadata file)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Video description (overrides the metadata file)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Comma-separated tags (override the metadata file)
    #[arg(long, value_delimiter = ',', value_name = "TAGS")]
    pub tags: Option<Vec<String>>,

    /// Run every step except the final publish, without counting quota.
    /// Also enabled by DRY_RUN=true or TEST_MODE=true.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Print results as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Platform to authenticate (youtube, youtube_shorts, tiktok, instagram)
    #[arg(value_name = "PLATFORM")]
    pub platform: String,
}
