use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths will be interpreted relative to this directory.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Logging level (overrides env/config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level", global = true)]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color", global = true)]
    pub log_color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example mutlens.toml in the current directory
    Init,

    /// Build source-annotated HTML reports and print run statistics
    Report(ReportArgs),

    /// Print run statistics without writing reports
    Stats(StatsArgs),

    /// Print various information about the configuration
    Print {
        #[command(subcommand)]
        command: PrintArgs,
    },
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Engine result files (JSON Lines) or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Base directory for report runs.
    /// Replaces config [report].dir if provided.
    #[arg(long)]
    pub out: Option<String>,

    /// Directory searched for source files, in order. Repeatable.
    /// Replaces config [source].roots if provided.
    #[arg(long = "source-root", value_name = "DIR")]
    pub source_roots: Vec<String>,

    /// Comma-separated list of mutator names listed in each class report.
    /// Replaces config mutators if provided.
    #[arg(long)]
    pub mutators: Option<String>,

    /// Number of classes rendered in parallel (defaults to available cores)
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Statistics output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Engine result files (JSON Lines) or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print command
#[derive(Subcommand, Debug)]
pub enum PrintArgs {
    /// Print the effective global configuration
    Config(PrintConfigArgs),
}

/// Arguments for the print config subcommand
#[derive(Parser, Debug)]
pub struct PrintConfigArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}
