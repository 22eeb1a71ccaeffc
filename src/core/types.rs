// src/core/types.rs — Form submissions for the three toolkit features

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::infra::errors::ToolkitError;

pub const ATTENDEES_RANGE: RangeInclusive<u32> = 1..=50;
pub const HOURLY_RATE_RANGE: RangeInclusive<f64> = 5.0..=200.0;
pub const AUTOMATION_COST_RANGE: RangeInclusive<f64> = 0.0..=50_000.0;

/// Weeks per month used for every monthly-hours figure.
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// Three-step scale used for effort and urgency selectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        };
        f.write_str(s)
    }
}

/// Free-text fields plus effort; effort labels are checked when deserializing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeaForm {
    pub name: String,
    pub problem: String,
    pub users: String,
    pub benefits: String,
    pub effort: Level,
    /// Dependencies and risks.
    pub dependencies: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingForm {
    pub topic: String,
    pub objective: String,
    pub decisions_required: bool,
    pub attendees: u32,
    pub urgency: Level,
}

impl Default for MeetingForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            objective: String::new(),
            decisions_required: true,
            attendees: 5,
            urgency: Level::Low,
        }
    }
}

impl MeetingForm {
    pub fn validate(&self) -> Result<(), ToolkitError> {
        if !ATTENDEES_RANGE.contains(&self.attendees) {
            return Err(ToolkitError::InvalidInput(format!(
                "attendees must be between {} and {}",
                ATTENDEES_RANGE.start(),
                ATTENDEES_RANGE.end()
            )));
        }
        Ok(())
    }

    pub fn decisions_label(&self) -> &'static str {
        if self.decisions_required {
            "Yes"
        } else {
            "No"
        }
    }
}

/// One row of the recurring-work grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub task: String,
    #[serde(default)]
    pub hours_per_week: f64,
    #[serde(default)]
    pub tool: String,
}

impl TaskRow {
    pub fn new(task: impl Into<String>, hours_per_week: f64, tool: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            hours_per_week,
            tool: tool.into(),
        }
    }

    pub fn monthly_hours(&self) -> f64 {
        self.hours_per_week * WEEKS_PER_MONTH
    }

    /// Rows the grid starts out with.
    pub fn sample_rows() -> Vec<TaskRow> {
        vec![
            TaskRow::new("Updating weekly Excel report", 4.0, "Excel"),
            TaskRow::new("Copying data from emails", 3.0, "Outlook"),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationForm {
    #[serde(default = "TaskRow::sample_rows")]
    pub tasks: Vec<TaskRow>,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    #[serde(default)]
    pub automation_cost: f64,
}

fn default_hourly_rate() -> f64 {
    25.0
}

impl Default for AutomationForm {
    fn default() -> Self {
        Self {
            tasks: TaskRow::sample_rows(),
            hourly_rate: default_hourly_rate(),
            automation_cost: 0.0,
        }
    }
}

impl AutomationForm {
    /// Rows with a task name; blank grid rows are dropped.
    pub fn filled_rows(&self) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .filter(|r| !r.task.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn validate(&self) -> Result<(), ToolkitError> {
        let rows = self.filled_rows();
        if rows.is_empty() {
            return Err(ToolkitError::InvalidInput(
                "at least one task row is required".into(),
            ));
        }
        if let Some(bad) = rows
            .iter()
            .find(|r| !r.hours_per_week.is_finite() || r.hours_per_week < 0.0)
        {
            return Err(ToolkitError::InvalidInput(format!(
                "hours per week for '{}' must be a non-negative number",
                bad.task
            )));
        }
        if !HOURLY_RATE_RANGE.contains(&self.hourly_rate) {
            return Err(ToolkitError::InvalidInput(format!(
                "hourly rate must be between {} and {}",
                HOURLY_RATE_RANGE.start(),
                HOURLY_RATE_RANGE.end()
            )));
        }
        if !AUTOMATION_COST_RANGE.contains(&self.automation_cost) {
            return Err(ToolkitError::InvalidInput(format!(
                "automation cost must be between {} and {}",
                AUTOMATION_COST_RANGE.start(),
                AUTOMATION_COST_RANGE.end()
            )));
        }
        Ok(())
    }
}
