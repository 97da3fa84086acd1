//! # amiante-json
//!
//! Command-line converter for LICIEL asbestos survey exports.
//!
//! ## Usage
//!
//! ```bash
//! # Convert the export tables of the current directory in place
//! amiante-json
//!
//! # Read from one directory, write to another
//! amiante-json --input-dir exports --output-dir json -v
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
