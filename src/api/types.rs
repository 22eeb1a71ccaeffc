// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::core::roi::{RoiSummary, TaskHours};
use crate::core::types::{AutomationForm, TaskRow};

/// Response for session creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
    pub max_calls: u32,
}

/// Request body for the offline ROI calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiRequest {
    #[serde(default = "TaskRow::sample_rows")]
    pub tasks: Vec<TaskRow>,
    pub hourly_rate: f64,
    #[serde(default)]
    pub automation_cost: f64,
}

impl From<RoiRequest> for AutomationForm {
    fn from(r: RoiRequest) -> Self {
        AutomationForm {
            tasks: r.tasks,
            hourly_rate: r.hourly_rate,
            automation_cost: r.automation_cost,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoiResponse {
    pub workload: Vec<TaskHours>,
    pub roi: RoiSummary,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
