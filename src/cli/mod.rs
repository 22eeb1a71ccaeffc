// src/cli/mod.rs — CLI definition (clap derive)

pub mod ask;
pub mod check;
pub mod roi;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::history::InteractionKind;
use crate::core::types::TaskRow;

#[derive(Parser)]
#[command(
    name = "prodkit",
    about = "AI tools to evaluate ideas, reduce unnecessary meetings, and identify automation opportunities",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level for prodkit itself (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default when no subcommand is given)
    Serve {
        /// Bind address override
        #[arg(long)]
        host: Option<String>,
        /// Port override
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Compute monthly hours, annual savings and ROI without calling a model
    Roi {
        /// Task row as "name:hours_per_week[:tool]" (repeatable; defaults to the sample rows)
        #[arg(long = "task", value_parser = parse_task_row)]
        tasks: Vec<TaskRow>,
        /// Hourly rate (5-200)
        #[arg(long, default_value = "25")]
        hourly_rate: f64,
        /// One-off automation cost (0-50000)
        #[arg(long, default_value = "0")]
        automation_cost: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run one feature against the model in a fresh session
    Ask {
        /// Feature: idea, meeting or automation
        feature: InteractionKind,
        /// JSON file holding the form fields
        #[arg(long)]
        form: PathBuf,
        /// Write the downloadable report here (file or directory)
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Validate configuration and check the API key is present
    Check,
}

/// Parse "name:hours_per_week[:tool]".
pub fn parse_task_row(s: &str) -> Result<TaskRow, String> {
    let mut parts = s.splitn(3, ':');
    let task = parts.next().unwrap_or("").trim();
    if task.is_empty() {
        return Err(format!("task row '{s}' has no name"));
    }
    let hours = parts
        .next()
        .ok_or_else(|| format!("task row '{s}' is missing hours per week"))?
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("task row '{s}': bad hours per week ({e})"))?;
    let tool = parts.next().unwrap_or("").trim();
    Ok(TaskRow::new(task, hours, tool))
}
