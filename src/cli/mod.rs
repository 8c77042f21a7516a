use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod baseline;
mod batch;
mod calibrate;
mod config;
mod detect;
mod quantify;
mod smooth;

/// chromapeak - Chromatogram peak detection, calibration and quantitation
#[derive(Parser)]
#[command(name = "chromapeak")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect peaks by iterative Gaussian deconvolution
    Detect {
        /// Input trace (time<TAB>intensity)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Write the peaks as a reference list (Peak, RT, Window)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Keep only the most intense peak of each time chunk
        #[arg(long)]
        calibrants: bool,

        /// Print the peaks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Subtract a polynomial baseline
    Baseline {
        /// Input trace
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output trace
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Polynomial order
        #[arg(long)]
        order: Option<usize>,

        /// Chunk size in samples
        #[arg(long)]
        points: Option<usize>,
    },

    /// Savitzky-Golay smoothing
    Smooth {
        /// Input trace
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output trace
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Odd window length in samples
        #[arg(short = 'w', long)]
        window_length: Option<usize>,

        /// Polynomial order
        #[arg(long)]
        order: Option<usize>,
    },

    /// Calibrate retention times against a reference peak list
    Calibrate {
        /// Input trace
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Reference list (label<TAB>time<TAB>window)
        #[arg(value_name = "REFERENCES")]
        references: PathBuf,

        /// Output trace (defaults to calibrated_<INPUT>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Also try the PCHIP and Akima interpolants
        #[arg(long)]
        interpolate: bool,

        /// Print the candidate log as JSON
        #[arg(long)]
        json: bool,
    },

    /// Measure area, S/N and peak quality of listed analytes
    Quantify {
        /// Input (calibrated) trace
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Analyte list (label<TAB>time<TAB>window)
        #[arg(value_name = "ANALYTES")]
        analytes: PathBuf,

        /// Results file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Calibrate and quantify many traces in parallel
    Batch {
        /// Input traces
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Calibrant list; skip calibration when omitted
        #[arg(short, long, value_name = "FILE")]
        references: Option<PathBuf>,

        /// Analyte list; skip quantitation when omitted
        #[arg(short, long, value_name = "FILE")]
        analytes: Option<PathBuf>,

        /// Directory for calibrated traces, results and the summary
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Worker threads (0 = one per CPU)
        #[arg(short = 'j', long)]
        workers: Option<usize>,

        /// Skip baseline correction
        #[arg(long)]
        no_baseline: bool,
    },
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
    match cli.command {
        Commands::Detect {
            input,
            output,
            config,
            calibrants,
            json,
        } => detect::run(input, output, config, calibrants, json),
        Commands::Baseline {
            input,
            output,
            config,
            order,
            points,
        } => baseline::run(input, output, config, order, points),
        Commands::Smooth {
            input,
            output,
            config,
            window_length,
            order,
        } => smooth::run(input, output, config, window_length, order),
        Commands::Calibrate {
            input,
            references,
            output,
            config,
            interpolate,
            json,
        } => calibrate::run(input, references, output, config, interpolate, json),
        Commands::Quantify {
            input,
            analytes,
            output,
            config,
        } => quantify::run(input, analytes, output, config),
        Commands::Batch {
            files,
            references,
            analytes,
            output_dir,
            config,
            workers,
            no_baseline,
        } => batch::run(
            files,
            references,
            analytes,
            output_dir,
            config,
            workers,
            no_baseline,
        ),
    }
}
