// src/cli/roi.rs — Offline ROI calculator

use crate::core::prompts::{format_hours, task_table};
use crate::core::roi;
use crate::core::types::{AutomationForm, TaskRow};

pub fn run_roi(
    tasks: Vec<TaskRow>,
    hourly_rate: f64,
    automation_cost: f64,
    json: bool,
) -> anyhow::Result<()> {
    let form = AutomationForm {
        tasks: if tasks.is_empty() {
            TaskRow::sample_rows()
        } else {
            tasks
        },
        hourly_rate,
        automation_cost,
    };
    form.validate()?;
    let rows = form.filled_rows();
    let summary = roi::calculate(&rows, form.hourly_rate, form.automation_cost);

    if json {
        let out = serde_json::json!({
            "workload": roi::workload_breakdown(&rows),
            "roi": summary,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", task_table(&rows));
    println!();
    print!("{}", render_summary(&summary));
    Ok(())
}

pub fn render_summary(s: &roi::RoiSummary) -> String {
    format!(
        "  Monthly hours:   {} hrs\n  Annual hours:    {} hrs\n  Annual savings:  {:.2}\n  ROI:             {:.1}%\n",
        format_hours(s.monthly_hours),
        format_hours(s.annual_hours),
        s.annual_savings,
        s.roi_percent,
    )
}
