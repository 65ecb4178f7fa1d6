//! Command handlers

use std::path::PathBuf;

use joballoc_app::export::export_workbook;
use joballoc_app::{run_pipeline, Config};
use joballoc_infra::rename::strip_from_file_names;
use joballoc_types::{OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match &cli.command {
        Commands::Run {
            input,
            lookup,
            output,
            dry_run,
        } => {
            let output_format = cli.format.unwrap_or(config.output_format);
            let output_path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output_file));
            cmd_run(
                &config,
                input.clone(),
                lookup.clone(),
                output_path,
                *dry_run,
                output_format,
            )
        }

        Commands::Rename {
            folder,
            prefix,
            dry_run,
        } => {
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_rename(folder.clone(), prefix, *dry_run, output_format)
        }

        Commands::Config {
            show,
            set_overhead_jobs,
            set_full_days,
            set_working_days,
            set_pickup_cost,
            set_output,
            set_output_file,
            reset,
        } => cmd_config(
            *show,
            *set_overhead_jobs,
            *set_full_days,
            *set_working_days,
            *set_pickup_cost,
            *set_output,
            set_output_file.clone(),
            *reset,
        ),
    }
}

fn cmd_run(
    config: &Config,
    input: PathBuf,
    lookup: PathBuf,
    output_path: PathBuf,
    dry_run: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let result = run_pipeline(&input, &lookup, &config.allocation_settings())?;

    let workbook = if dry_run {
        None
    } else {
        export_workbook(&result, &output_path)?;
        Some(output_path)
    };

    output::print_run(output_format, &result, workbook.as_deref())
}

fn cmd_rename(
    folder: PathBuf,
    prefix: &str,
    dry_run: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let renames = strip_from_file_names(&folder, prefix, dry_run)?;
    output::print_renames(output_format, &renames, dry_run)
}

fn cmd_config(
    show: bool,
    set_overhead_jobs: Option<u32>,
    set_full_days: Option<u32>,
    set_working_days: Option<u32>,
    set_pickup_cost: Option<f64>,
    set_output: Option<OutputFormat>,
    set_output_file: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(threshold) = set_overhead_jobs {
        config.overhead_job_threshold = threshold;
        modified = true;
    }

    if let Some(days) = set_full_days {
        config.full_allocation_business_days = days;
        modified = true;
    }

    if let Some(days) = set_working_days {
        config.working_days_per_month = days;
        modified = true;
    }

    if let Some(cost) = set_pickup_cost {
        config.monthly_pickup_cost = cost;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(output_file) = set_output_file {
        config.output_file = output_file;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
