use abokit::core::io::abo::FormatVersion;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The abokit developers",
    version,
    about = "abo - inspect, convert and export ABO/ABOF molecular scene containers.",
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

    /// Path to a configuration file in TOML format with [load] and [convert] defaults
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the header and a per-frame summary of a container.
    Info(InfoArgs),
    /// Re-encode a container in another format version or compression setting.
    Convert(ConvertArgs),
    /// Export the atoms of every frame to a text format.
    Export(ExportArgs),
}

/// Options controlling how the input container is loaded.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Path to the input container file.
    #[arg(required = true, value_name = "FILE")]
    pub input: PathBuf,

    /// Do not interpolate containers flagged as NEB pathways.
    #[arg(long)]
    pub no_interpolation: bool,

    /// Override the number of interpolated frames per NEB segment.
    #[arg(long, value_name = "INT")]
    pub neb_steps: Option<usize>,

    /// Override the covalent-radius multiplier used to derive bonds.
    #[arg(long, value_name = "FLOAT")]
    pub bond_tolerance: Option<f64>,

    /// TOML file with bonding tolerance and per-element radius overrides.
    #[arg(long, value_name = "PATH")]
    pub bonding_rules: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S load.neb-steps=20
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Also list every atom of every frame.
    #[arg(long)]
    pub atoms: bool,
}

/// Target layout for `convert`.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetVersion {
    Legacy,
    V1,
    V2,
}

impl From<TargetVersion> for FormatVersion {
    fn from(v: TargetVersion) -> Self {
        match v {
            TargetVersion::Legacy => FormatVersion::LegacyV0,
            TargetVersion::V1 => FormatVersion::AbofV1,
            TargetVersion::V2 => FormatVersion::AbofV2,
        }
    }
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Path for the output container file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Format version to write. Defaults to the version of the input.
    #[arg(long, value_enum, value_name = "VERSION")]
    pub to: Option<TargetVersion>,

    /// Compress the output body with Zstandard.
    #[arg(long, conflicts_with = "no_compress")]
    pub compress: bool,

    /// Write an uncompressed body even if the input was compressed.
    #[arg(long)]
    pub no_compress: bool,

    /// Zstandard compression level.
    #[arg(long, value_name = "INT")]
    pub level: Option<i32>,

    /// Keep a NEB pathway as stored, with its flag, instead of writing interpolated frames.
    #[arg(long)]
    pub keep_neb: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Multi-frame XYZ trajectory.
    #[default]
    Xyz,
    /// Flat CSV table with one row per atom per frame.
    Csv,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Path for the exported file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Xyz)]
    pub format: ExportFormat,
}
