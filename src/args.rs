use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wiki-detail")]
#[command(about = "Search a wiki and print pages as formatted text")]
#[command(version)]
pub struct Args {
    /// Search text (empty searches for the configured default query)
    #[arg(default_value = "")]
    pub query: String,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of search results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print a single page by title instead of searching
    #[arg(short, long)]
    pub title: Option<String>,

    /// Skip probing image URLs
    #[arg(long)]
    pub no_image_check: bool,

    /// File the converted pages are cached in
    #[arg(long)]
    pub cache: Option<PathBuf>,
}
