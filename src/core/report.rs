// src/core/report.rs — Plain-text downloads built from model replies

use serde::Serialize;

use super::history::{HistoryLog, InteractionKind};
use crate::infra::errors::ToolkitError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub filename: String,
    pub body: String,
}

/// Download filename and header for a feature, if it offers one.
pub fn report_spec(kind: InteractionKind) -> Option<(&'static str, &'static str)> {
    match kind {
        InteractionKind::Idea => Some(("idea_evaluation.txt", "AI Idea Evaluation")),
        InteractionKind::Meeting => Some(("meeting_minutes.txt", "AI Meeting Verdict")),
        InteractionKind::Automation => None,
    }
}

pub fn filename_for(kind: InteractionKind) -> Option<&'static str> {
    report_spec(kind).map(|(filename, _)| filename)
}

/// Fixed header followed by the reply, verbatim.
pub fn build(kind: InteractionKind, reply: &str) -> Option<Report> {
    let (filename, title) = report_spec(kind)?;
    let mut body = String::with_capacity(reply.len() + 128);
    body.push_str(title);
    body.push('\n');
    body.push_str(&"=".repeat(title.len()));
    body.push_str("\n\n");
    body.push_str(reply);
    if !reply.ends_with('\n') {
        body.push('\n');
    }
    Some(Report {
        filename: filename.to_string(),
        body,
    })
}

/// Report for the newest interaction of `kind` in a session's history.
pub fn latest(history: &HistoryLog, kind: InteractionKind) -> Result<Report, ToolkitError> {
    let interaction = history
        .latest(kind)
        .ok_or(ToolkitError::NoReport(kind))?;
    build(kind, &interaction.result).ok_or(ToolkitError::NoReport(kind))
}
