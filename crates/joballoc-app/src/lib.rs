//! Application layer - configuration, pipeline orchestration, workbook export

pub mod config;
pub mod export;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{run_pipeline, PipelineOutput};
