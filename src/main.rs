//! # chromapeak
//!
//! Command-line front-end for chromatogram trace analysis.
//!
//! ## Usage
//!
//! ```bash
//! # Detect peaks and write them as a reference list
//! chromapeak detect run01.txt -o run01.ref
//!
//! # Calibrate against a calibrant list
//! chromapeak calibrate run01.txt calibrants.ref
//!
//! # Calibrate and quantify a whole batch on 4 workers
//! chromapeak batch runs/*.txt -r calibrants.ref -a analytes.ref -o out -j 4
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
