// src/cli/ask.rs — One-shot feature run in a throwaway session

use std::path::{Path, PathBuf};

use crate::cli::roi::render_summary;
use crate::cli::serve::build_toolkit;
use crate::core::history::InteractionKind;
use crate::core::prompts::task_table;
use crate::core::report;
use crate::core::session::Session;
use crate::core::types::{AutomationForm, IdeaForm, MeetingForm};
use crate::infra::config::Config;

pub async fn run_ask(
    config: &Config,
    feature: InteractionKind,
    form_path: &Path,
    report_path: Option<&Path>,
) -> anyhow::Result<()> {
    let toolkit = build_toolkit(config)?;
    let mut session = Session::new(config.session.max_calls);
    let raw = std::fs::read_to_string(form_path)?;

    match feature {
        InteractionKind::Idea => {
            let form: IdeaForm = serde_json::from_str(&raw)?;
            let reply = toolkit.evaluate_idea(&mut session, form).await?;
            println!("{}", reply.result);
            write_report(feature, &reply.result, report_path)?;
        }
        InteractionKind::Meeting => {
            let form: MeetingForm = serde_json::from_str(&raw)?;
            let reply = toolkit.check_meeting(&mut session, form).await?;
            println!("{}", reply.result);
            write_report(feature, &reply.result, report_path)?;
        }
        InteractionKind::Automation => {
            let form: AutomationForm = serde_json::from_str(&raw)?;
            let rows = form.filled_rows();
            let reply = toolkit.analyze_workload(&mut session, form).await?;
            println!("{}", task_table(&rows));
            println!();
            print!("{}", render_summary(&reply.roi));
            if let Some(warning) = reply.warning {
                eprintln!("warning: {warning}");
            }
            if let Some(analysis) = reply.analysis {
                println!();
                println!("{analysis}");
            }
            if report_path.is_some() {
                eprintln!("note: the automation finder has no downloadable report");
            }
        }
    }
    Ok(())
}

fn write_report(kind: InteractionKind, reply: &str, target: Option<&Path>) -> anyhow::Result<()> {
    let Some(target) = target else {
        return Ok(());
    };
    let Some(report) = report::build(kind, reply) else {
        return Ok(());
    };
    let path = resolve_report_path(target, &report.filename);
    std::fs::write(&path, &report.body)?;
    eprintln!("Report written to {}", path.display());
    Ok(())
}

/// A directory target gets the feature's fixed filename appended.
fn resolve_report_path(target: &Path, filename: &str) -> PathBuf {
    if target.is_dir() {
        target.join(filename)
    } else {
        target.to_path_buf()
    }
}
