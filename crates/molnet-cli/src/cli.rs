use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Manas Mahale",
    version,
    about = "molnet CLI - Build molecular similarity networks from SMILES collections and inspect the resulting graph files.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a similarity network from a CSV of SMILES strings and labels.
    Build(BuildArgs),
    /// Summarize a previously saved network file.
    Info(InfoArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the input CSV file with `smiles` and `label` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output network file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Configuration Overrides ---
    /// Override the fingerprint descriptor kind
    /// (atompairs | maccs | morgan2 | morgan3 | rdkit | topo).
    #[arg(short, long, value_name = "KIND")]
    pub descriptor: Option<String>,

    /// Override the similarity metric (e.g. tanimoto, dice, cosine, tversky).
    #[arg(short, long, value_name = "METRIC")]
    pub metric: Option<String>,

    /// Override the exclusive similarity threshold for edge creation.
    #[arg(short, long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Alpha weight for the tversky metric.
    #[arg(long, value_name = "FLOAT")]
    pub tversky_alpha: Option<f64>,

    /// Beta weight for the tversky metric.
    #[arg(long, value_name = "FLOAT")]
    pub tversky_beta: Option<f64>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the network file to summarize.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}
