use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod convert;

pub use config::Config;

/// amiante-json - LICIEL asbestos survey exports to JSON
///
/// Reads the export tables from the input directory (default: current
/// directory), writes one JSON document per table, the merged material
/// table to amiante_auto.json and generate_amiante_json.json, and the survey
/// synthesis to synthese_amiante.json and synthese_amiante.html.
#[derive(Parser, Debug)]
#[command(name = "amiante-json")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory holding the XML export tables
    #[arg(short, long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Directory receiving the JSON documents (defaults to the input directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    convert::run(cli.input_dir, cli.output_dir, cli.config)
}
