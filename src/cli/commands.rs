use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tabstrip", about = concat!("tabstrip v", env!("CARGO_PKG_VERSION"), " - tabs that fit, and a menu for the rest"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from this file instead of ./tabstrip.toml
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute which tabs fit in an area and print the layout
    Fit(FitArgs),
    /// Draw the bar into an off-screen buffer and print it as text
    Render(RenderArgs),
}

/// The bar to lay out. Without labels or --tabs the config's tabs are used.
#[derive(Args, Clone)]
pub struct StripArgs {
    /// Tab label (repeat for several tabs)
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,

    /// Generate N tabs named "Tab 1".."Tab N"
    #[arg(long, conflicts_with = "labels")]
    pub tabs: Option<usize>,

    /// Area width in cells
    #[arg(long, default_value_t = 80)]
    pub width: u16,

    /// Area height in cells
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// Edge the bar sits on (top, bottom, leading, trailing)
    #[arg(short, long)]
    pub placement: Option<String>,

    /// Lay out for a compact device (icons above labels, grid buttons)
    #[arg(long)]
    pub compact: bool,

    /// Index of the tab to select
    #[arg(short, long)]
    pub select: Option<usize>,

    /// Leave the close marker off the tab buttons
    #[arg(long)]
    pub no_close: bool,

    /// Leave the add button out
    #[arg(long)]
    pub no_add: bool,

    /// Search strategy for the fit (linear, bisect)
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct FitArgs {
    #[command(flatten)]
    pub strip: StripArgs,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub strip: StripArgs,

    /// Open the overflow menu before drawing
    #[arg(long)]
    pub menu: bool,
}
