// src/core/roi.rs — Time-savings and ROI arithmetic for recurring work

use serde::{Deserialize, Serialize};

use super::types::TaskRow;

pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiSummary {
    pub monthly_hours: f64,
    pub annual_hours: f64,
    pub annual_savings: f64,
    /// Percentage; 0 when there is no automation cost to divide by.
    pub roi_percent: f64,
}

/// One bar of the monthly-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskHours {
    pub task: String,
    pub tool: String,
    pub monthly_hours: f64,
}

pub fn workload_breakdown(rows: &[TaskRow]) -> Vec<TaskHours> {
    rows.iter()
        .map(|r| TaskHours {
            task: r.task.clone(),
            tool: r.tool.clone(),
            monthly_hours: r.monthly_hours(),
        })
        .collect()
}

pub fn total_monthly_hours(rows: &[TaskRow]) -> f64 {
    rows.iter().map(TaskRow::monthly_hours).sum()
}

pub fn calculate(rows: &[TaskRow], hourly_rate: f64, automation_cost: f64) -> RoiSummary {
    let monthly_hours = total_monthly_hours(rows);
    let annual_hours = monthly_hours * MONTHS_PER_YEAR;
    let annual_savings = annual_hours * hourly_rate;
    let roi_percent = if automation_cost > 0.0 {
        (annual_savings - automation_cost) / automation_cost * 100.0
    } else {
        0.0
    };

    RoiSummary {
        monthly_hours,
        annual_hours,
        annual_savings,
        roi_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scenario_rows() -> Vec<TaskRow> {
        vec![
            TaskRow::new("Report", 4.0, "Excel"),
            TaskRow::new("Email copy", 3.0, "Outlook"),
        ]
    }

    #[test]
    fn test_reference_scenario() {
        let s = calculate(&scenario_rows(), 25.0, 2000.0);
        assert_eq!(
            s,
            RoiSummary {
                monthly_hours: 28.0,
                annual_hours: 336.0,
                annual_savings: 8400.0,
                roi_percent: 320.0,
            }
        );
    }

    #[test]
    fn test_zero_cost_yields_zero_roi() {
        let s = calculate(&scenario_rows(), 25.0, 0.0);
        assert_eq!(s.roi_percent, 0.0);
        assert_eq!(s.annual_savings, 8400.0);
    }

    #[test]
    fn test_idempotent() {
        let rows = scenario_rows();
        assert_eq!(calculate(&rows, 42.5, 1234.0), calculate(&rows, 42.5, 1234.0));
    }

    #[test]
    fn test_cost_above_savings_is_negative() {
        let s = calculate(&[TaskRow::new("Tiny", 1.0, "")], 10.0, 960.0);
        // 4 h/month * 12 * 10 = 480
        assert_eq!(s.roi_percent, -50.0);
    }

    #[test]
    fn test_empty_rows() {
        let s = calculate(&[], 25.0, 100.0);
        assert_eq!(s.monthly_hours, 0.0);
        assert_eq!(s.roi_percent, -100.0);
    }

    #[test]
    fn test_breakdown_keeps_order() {
        let b = workload_breakdown(&scenario_rows());
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].task, "Report");
        assert_eq!(b[0].monthly_hours, 16.0);
        assert_eq!(b[1].monthly_hours, 12.0);
    }
}
