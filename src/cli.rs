use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_QUERY: &str = "1920x1080 background images";
pub const DEFAULT_LIMIT: usize = 1000;
pub const DEFAULT_OUTPUT_DIR: &str = "backgrounds";

/// Search Bing Images and download the first matching wallpapers.
#[derive(Debug, Parser)]
#[command(name = "wallgrab", version)]
pub struct Cli {
    /// Search query sent to Bing Images.
    #[arg(long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Maximum number of results to download.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Directory images are saved into (created if missing).
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub query: String,
    pub limit: usize,
    pub output_dir: PathBuf,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            query: self.query,
            limit: self.limit,
            output_dir: self.output_dir,
        }
    }
}
