//! Job Allocation - vehicle job-time allocation for the monthly close
//!
//! A CLI tool that turns a folder of per-vehicle site-visit reports into
//! a billing workbook with a cost-allocation percentage per vehicle per job.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
