// src/core/prompts.rs — Prompt templates for each toolkit feature
//
// Templates are compiled once into a shared minijinja environment. Output is
// deterministic for a given form.

use minijinja::{context, Environment};
use std::sync::OnceLock;

use super::roi::workload_breakdown;
use super::types::{IdeaForm, MeetingForm, TaskRow};
use crate::infra::errors::ToolkitError;

/// System context plus user instruction for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const IDEA_SYSTEM: &str = "You are a pragmatic business analyst who reviews internal project \
proposals and gives candid, structured verdicts.";

const MEETING_SYSTEM: &str = "You are a meeting-efficiency coach who helps teams decide whether \
a meeting is worth everyone's time.";

const AUTOMATION_SYSTEM: &str = "You are a workplace automation consultant familiar with RPA, \
scripting, low-code workflow tools and reporting dashboards.";

const IDEA_TEMPLATE: &str = "Evaluate this business idea.

Idea: {{ name }}
Problem: {{ problem }}
Users: {{ users }}
Benefits: {{ benefits }}
Effort: {{ effort }}
Risks/Dependencies: {{ dependencies }}

Score from 1-10 for:
- Business Impact
- Clarity
- Risk Level
- Effort Level

Then provide:
1. Overall Recommendation (GO / REWORK / NOT WORTH IT)
2. Short reasoning
3. 2 improvement suggestions
";

const MEETING_TEMPLATE: &str = "Determine if this meeting is necessary.

Topic: {{ topic }}
Objective: {{ objective }}
Decisions Needed: {{ decisions }}
Number of Attendees: {{ attendees }}
Urgency: {{ urgency }}

Provide:
1. Verdict (Meeting Needed / Send Email Instead / Reduce Scope)
2. Suggested Duration
3. Suggested Attendee Roles
4. Simple Agenda
";

const AUTOMATION_TEMPLATE: &str = "These are recurring work tasks:

{{ table }}

Identify:
1. Which tasks can be automated
2. Suggested tools (RPA, Python, Power Automate, Dashboards, etc.)
3. Estimated difficulty (Easy/Medium/Hard)
4. Potential time savings
";

fn env() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        for (name, source) in [
            ("idea", IDEA_TEMPLATE),
            ("meeting", MEETING_TEMPLATE),
            ("automation", AUTOMATION_TEMPLATE),
        ] {
            if let Err(e) = env.add_template(name, source) {
                tracing::error!("built-in template '{name}' failed to compile: {e}");
            }
        }
        env
    })
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String, ToolkitError> {
    Ok(env().get_template(name)?.render(ctx)?)
}

pub fn idea_prompt(form: &IdeaForm) -> Result<Prompt, ToolkitError> {
    let user = render(
        "idea",
        context! {
            name => form.name,
            problem => form.problem,
            users => form.users,
            benefits => form.benefits,
            effort => form.effort.to_string(),
            dependencies => form.dependencies,
        },
    )?;
    Ok(Prompt {
        system: IDEA_SYSTEM.to_string(),
        user,
    })
}

pub fn meeting_prompt(form: &MeetingForm) -> Result<Prompt, ToolkitError> {
    let user = render(
        "meeting",
        context! {
            topic => form.topic,
            objective => form.objective,
            decisions => form.decisions_label(),
            attendees => form.attendees,
            urgency => form.urgency.to_string(),
        },
    )?;
    Ok(Prompt {
        system: MEETING_SYSTEM.to_string(),
        user,
    })
}

pub fn automation_prompt(rows: &[TaskRow]) -> Result<Prompt, ToolkitError> {
    let user = render("automation", context! { table => task_table(rows) })?;
    Ok(Prompt {
        system: AUTOMATION_SYSTEM.to_string(),
        user,
    })
}

/// Fixed-width table of task rows, including the derived monthly hours.
pub fn task_table(rows: &[TaskRow]) -> String {
    const HEADERS: [&str; 4] = ["Task", "Hours per Week", "Tool Used", "Monthly Hours"];

    let cells: Vec<[String; 4]> = workload_breakdown(rows)
        .into_iter()
        .zip(rows)
        .map(|(b, r)| {
            [
                b.task,
                format_hours(r.hours_per_week),
                b.tool,
                format_hours(b.monthly_hours),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (c, w))| {
                // Numeric columns right-aligned.
                if i == 1 || i == 3 {
                    format!("{c:>w$}")
                } else {
                    format!("{c:<w$}")
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Whole hours print without a decimal point.
pub fn format_hours(h: f64) -> String {
    if h.fract() == 0.0 {
        format!("{h:.0}")
    } else {
        format!("{h:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Level;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_idea_prompt_interpolates_fields() {
        let form = IdeaForm {
            name: "Self-serve reports".into(),
            problem: "Analysts rebuild the same report weekly".into(),
            users: "Ops managers".into(),
            benefits: "Fewer ad-hoc requests".into(),
            effort: Level::Medium,
            dependencies: "Data warehouse access".into(),
        };
        let p = idea_prompt(&form).unwrap();
        assert!(p.user.starts_with("Evaluate this business idea.\n\nIdea: Self-serve reports\n"));
        assert!(p.user.contains("Effort: Medium\n"));
        assert!(p.user.contains("Risks/Dependencies: Data warehouse access\n"));
        assert!(p.user.contains("(GO / REWORK / NOT WORTH IT)"));
        assert!(p.system.contains("business analyst"));
    }

    #[test]
    fn test_form_text_is_not_escaped() {
        let form = IdeaForm {
            name: "R&D <pilot> \"alpha\"".into(),
            ..Default::default()
        };
        let p = idea_prompt(&form).unwrap();
        assert!(p.user.contains("Idea: R&D <pilot> \"alpha\"\n"));
    }

    #[test]
    fn test_meeting_prompt() {
        let form = MeetingForm {
            topic: "Q3 planning".into(),
            objective: "Agree roadmap".into(),
            decisions_required: false,
            attendees: 12,
            urgency: Level::High,
        };
        let p = meeting_prompt(&form).unwrap();
        assert!(p.user.contains("Topic: Q3 planning\n"));
        assert!(p.user.contains("Decisions Needed: No\n"));
        assert!(p.user.contains("Number of Attendees: 12\n"));
        assert!(p.user.contains("Urgency: High\n"));
        assert!(p.user.contains("Send Email Instead"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let form = MeetingForm::default();
        assert_eq!(meeting_prompt(&form).unwrap(), meeting_prompt(&form).unwrap());
    }

    #[test]
    fn test_task_table_layout() {
        let rows = vec![
            TaskRow::new("Report", 4.0, "Excel"),
            TaskRow::new("Email copy", 3.5, "Outlook"),
        ];
        let table = task_table(&rows);
        let expected = "\
Task        Hours per Week  Tool Used  Monthly Hours
Report                   4  Excel                 16
Email copy             3.5  Outlook               14";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_automation_prompt_embeds_table() {
        let rows = TaskRow::sample_rows();
        let p = automation_prompt(&rows).unwrap();
        assert!(p.user.starts_with("These are recurring work tasks:\n\nTask"));
        assert!(p.user.contains("Updating weekly Excel report"));
        assert!(p.user.contains("4. Potential time savings"));
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(28.0), "28");
        assert_eq!(format_hours(3.5), "3.5");
    }
}
