//! Configuration management for joballoc
//!
//! Config stored at: ~/.config/joballoc/config.json

use joballoc_domain::service::AllocationSettings;
use joballoc_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Assets on at least this many distinct jobs count as overhead
    #[serde(default = "default_overhead_job_threshold")]
    pub overhead_job_threshold: u32,

    /// Business days at or above this mean a full-month allocation
    #[serde(default = "default_full_allocation_business_days")]
    pub full_allocation_business_days: u32,

    /// Assumed working days per month for the pro-rata fraction
    #[serde(default = "default_working_days_per_month")]
    pub working_days_per_month: u32,

    /// Monthly pickup repair cost in dollars
    #[serde(default = "default_monthly_pickup_cost")]
    pub monthly_pickup_cost: f64,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Workbook file name used when `run` is not given an output path
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_overhead_job_threshold() -> u32 {
    4
}

fn default_full_allocation_business_days() -> u32 {
    14
}

fn default_working_days_per_month() -> u32 {
    21
}

fn default_monthly_pickup_cost() -> f64 {
    620.0
}

fn default_output_file() -> String {
    "job_allocation.xlsx".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overhead_job_threshold: default_overhead_job_threshold(),
            full_allocation_business_days: default_full_allocation_business_days(),
            working_days_per_month: default_working_days_per_month(),
            monthly_pickup_cost: default_monthly_pickup_cost(),
            output_format: OutputFormat::default(),
            output_file: default_output_file(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("joballoc");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// The tunables in the shape the allocator takes
    pub fn allocation_settings(&self) -> AllocationSettings {
        AllocationSettings {
            overhead_job_threshold: self.overhead_job_threshold,
            full_allocation_business_days: self.full_allocation_business_days,
            working_days_per_month: self.working_days_per_month,
            monthly_pickup_cost: self.monthly_pickup_cost,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Job Allocation Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(f, "Overhead job threshold:  {}", self.overhead_job_threshold)?;
        writeln!(
            f,
            "Full-allocation days:    {}",
            self.full_allocation_business_days
        )?;
        writeln!(f, "Working days per month:  {}", self.working_days_per_month)?;
        writeln!(f, "Monthly pickup cost:     {}", self.monthly_pickup_cost)?;
        writeln!(f, "Output format:           {}", self.output_format)?;
        writeln!(f, "Output file:             {}", self.output_file)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:             {}", path.display())?;
        }

        Ok(())
    }
}
