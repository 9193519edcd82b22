use clap::Parser;
use std::num::NonZeroU64;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Henrique Musseli Cezar",
    version,
    about = "dihedral-plot - Scatter plots of a dihedral angle sampled along a Monte Carlo run, written as PDF and PNG.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the `.dat` file holding one dihedral angle (degrees) per line.
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of Monte Carlo cycles between two consecutive samples.
    #[arg(value_name = "STEP_MULTIPLIER", default_value = "1")]
    pub step_multiplier: NonZeroU64,

    /// Draw the short-twist composite (two zoomed panels above an overview)
    /// instead of the full-range scatter.
    #[arg(long)]
    pub short_twist: bool,

    /// Accepted for compatibility with older invocations; has no effect.
    #[arg(short = 'I', long, value_name = "INT", allow_negative_numbers = true)]
    pub interphi: Option<i64>,

    /// Path to a TOML file with figure and short-twist layout settings.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S figure.dpi=150
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    /// Directory for the PDF and PNG outputs (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip LaTeX detection and always use plain-text axis labels.
    #[arg(long)]
    pub plain_text: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
