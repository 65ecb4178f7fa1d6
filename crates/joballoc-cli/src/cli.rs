//! CLI definition using clap

use clap::{Parser, Subcommand};
use joballoc_infra::rename::DEFAULT_REPORT_PREFIX;
use joballoc_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "joballoc")]
#[command(version)]
#[command(about = "Vehicle job-time allocation for the monthly accounting close")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the allocation pipeline and write the billing workbook
    Run {
        /// Directory of report CSV files, one per job
        input: PathBuf,

        /// Vehicle lookup CSV (asset, vehicle name; no header row)
        #[arg(long, short = 'l')]
        lookup: PathBuf,

        /// Output workbook path. Uses the config file name in the
        /// current directory if not specified.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Run the pipeline and report without writing the workbook
        #[arg(long)]
        dry_run: bool,
    },

    /// Strip the export tool's prefix from report file names
    Rename {
        /// Directory of downloaded report files
        folder: PathBuf,

        /// Prefix to strip from file names
        #[arg(long, default_value = DEFAULT_REPORT_PREFIX)]
        prefix: String,

        /// List the renames without touching any files
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the distinct-job count at which an asset becomes overhead
        #[arg(long)]
        set_overhead_jobs: Option<u32>,

        /// Set the business-day count granting a full-month allocation
        #[arg(long)]
        set_full_days: Option<u32>,

        /// Set the assumed working days per month
        #[arg(long)]
        set_working_days: Option<u32>,

        /// Set the monthly pickup repair cost
        #[arg(long)]
        set_pickup_cost: Option<f64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set the default workbook file name
        #[arg(long)]
        set_output_file: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
