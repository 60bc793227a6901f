//! CLI definitions using clap.

use clap::Parser;

use tandem::BuildMode;

/// tandem - build mixed CMake and Cargo projects in one go
///
/// Without arguments, rebuilds the last configuration that built
/// successfully, or both Release and Debug if none is recorded.
#[derive(Parser)]
#[command(name = "tandem")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build only this configuration (Debug or Release)
    #[arg(long, value_name = "CONFIG", conflicts_with = "all_configs")]
    pub config: Option<BuildMode>,

    /// Build every configuration, ignoring the last successful one
    #[arg(long)]
    pub all_configs: bool,

    /// Remove build outputs and forget the last successful configuration
    #[arg(long, conflicts_with_all = ["config", "all_configs"])]
    pub clean: bool,

    /// Run the project's test script instead of building
    #[arg(long, conflicts_with_all = ["config", "all_configs", "clean"])]
    pub validate: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
