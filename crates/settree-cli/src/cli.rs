use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "settree - inspect, layer and render hierarchical settings files (TOML or JSON).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load one or more settings files, layer them, and print the result.
    Show(ShowArgs),
    /// Print the value stored at a dotted path.
    Get(GetArgs),
    /// Render a settings branch as keyword-block input text.
    Block(BlockArgs),
}

/// How settings files given on the command line are combined.
#[derive(Args, Debug, Clone, Default)]
pub struct LayerArgs {
    /// Only fill in keys missing from earlier files instead of overriding them.
    #[arg(long)]
    pub soft: bool,

    /// Set a specific value after all files are layered.
    /// Can be used multiple times. Example: -S input.global.run_type=energy
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented `key: value` tree
    #[default]
    Tree,
    Toml,
    Json,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Settings files (.toml or .json), layered from first to last.
    #[arg(required = true, value_name = "PATH")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub layering: LayerArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
    pub format: OutputFormat,
}

/// Arguments for the `get` subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Settings file (.toml or .json).
    #[arg(required = true, value_name = "PATH")]
    pub file: PathBuf,

    /// Dotted key path, e.g. `input.global.run_type`.
    #[arg(required = true, value_name = "KEY")]
    pub key: String,

    /// Match every path segment ignoring case.
    #[arg(short, long)]
    pub ignore_case: bool,
}

/// Arguments for the `block` subcommand.
#[derive(Args, Debug)]
pub struct BlockArgs {
    /// Settings files (.toml or .json), layered from first to last.
    #[arg(required = true, value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Branch of the layered settings to render.
    #[arg(short, long, default_value = "input", value_name = "KEY")]
    pub branch: String,

    #[command(flatten)]
    pub layering: LayerArgs,
}
