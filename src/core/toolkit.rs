// src/core/toolkit.rs — Feature handlers: validate, gate on quota, ask the model, record

use serde::Serialize;
use std::sync::Arc;

use super::history::{Interaction, InteractionDetail, InteractionKind};
use super::prompts::{self, Prompt};
use super::report;
use super::roi::{self, RoiSummary, TaskHours};
use super::session::{Session, SessionStore};
use super::types::{AutomationForm, IdeaForm, MeetingForm};
use crate::infra::errors::ToolkitError;
use crate::provider::{self, CompletionSettings, ModelProvider};

/// Where a handler reserves quota and records its interaction.
///
/// Implemented for an owned [`Session`] and for a session living in a
/// [`SessionStore`]; the latter never holds the store lock across the model call.
pub trait SessionSlot {
    fn reserve_call(&mut self) -> Result<(), ToolkitError>;
    fn record(&mut self, interaction: Interaction) -> Result<(), ToolkitError>;
    fn calls_remaining(&self) -> u32;
}

impl SessionSlot for Session {
    fn reserve_call(&mut self) -> Result<(), ToolkitError> {
        self.quota.acquire()
    }

    fn record(&mut self, interaction: Interaction) -> Result<(), ToolkitError> {
        self.history.append(interaction);
        Ok(())
    }

    fn calls_remaining(&self) -> u32 {
        self.quota.remaining()
    }
}

/// Handle to a session by id inside a shared store.
pub struct StoredSession<'a> {
    store: &'a SessionStore,
    id: &'a str,
}

impl<'a> StoredSession<'a> {
    pub fn new(store: &'a SessionStore, id: &'a str) -> Self {
        Self { store, id }
    }
}

impl SessionSlot for StoredSession<'_> {
    fn reserve_call(&mut self) -> Result<(), ToolkitError> {
        self.store.reserve_call(self.id)
    }

    fn record(&mut self, interaction: Interaction) -> Result<(), ToolkitError> {
        self.store.record(self.id, interaction)
    }

    /// Zero when the session was ended while the model call was in flight.
    fn calls_remaining(&self) -> u32 {
        match self.store.with(self.id, |s| s.quota.remaining()) {
            Ok(remaining) => remaining,
            Err(e) => {
                tracing::debug!(session = %self.id, "no remaining-call count: {e}");
                0
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureReply {
    pub kind: InteractionKind,
    pub name: String,
    pub result: String,
    /// Filename of the downloadable report, for features that offer one.
    pub report_filename: Option<String>,
    pub calls_remaining: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutomationReply {
    pub workload: Vec<TaskHours>,
    pub roi: RoiSummary,
    /// Model analysis; absent when the session quota was already spent.
    pub analysis: Option<String>,
    pub warning: Option<String>,
    pub calls_remaining: u32,
}

pub struct Toolkit {
    provider: Arc<dyn ModelProvider>,
    settings: CompletionSettings,
}

impl Toolkit {
    pub fn new(provider: Arc<dyn ModelProvider>, settings: CompletionSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    async fn ask(&self, kind: InteractionKind, prompt: &Prompt) -> Result<String, ToolkitError> {
        tracing::info!(feature = %kind, model = %self.settings.model, "calling model");
        provider::complete(
            self.provider.as_ref(),
            &self.settings,
            &prompt.system,
            &prompt.user,
        )
        .await
        .inspect_err(|e| tracing::error!(feature = %kind, "model call failed: {e}"))
    }

    /// Idea Evaluator: scores and a GO / REWORK / NOT WORTH IT verdict.
    pub async fn evaluate_idea<S: SessionSlot + Send>(
        &self,
        slot: &mut S,
        form: IdeaForm,
    ) -> Result<FeatureReply, ToolkitError> {
        let prompt = prompts::idea_prompt(&form)?;
        slot.reserve_call()?;

        let result = self.ask(InteractionKind::Idea, &prompt).await?;
        slot.record(Interaction::new(&form.name, &result, InteractionDetail::Idea))?;

        Ok(FeatureReply {
            kind: InteractionKind::Idea,
            name: form.name,
            result,
            report_filename: report::filename_for(InteractionKind::Idea).map(String::from),
            calls_remaining: slot.calls_remaining(),
        })
    }

    /// Meeting Checker: verdict, duration, roles and agenda.
    pub async fn check_meeting<S: SessionSlot + Send>(
        &self,
        slot: &mut S,
        form: MeetingForm,
    ) -> Result<FeatureReply, ToolkitError> {
        form.validate()?;
        let prompt = prompts::meeting_prompt(&form)?;
        slot.reserve_call()?;

        let result = self.ask(InteractionKind::Meeting, &prompt).await?;
        slot.record(Interaction::new(
            &form.topic,
            &result,
            InteractionDetail::Meeting,
        ))?;

        Ok(FeatureReply {
            kind: InteractionKind::Meeting,
            name: form.topic,
            result,
            report_filename: report::filename_for(InteractionKind::Meeting).map(String::from),
            calls_remaining: slot.calls_remaining(),
        })
    }

    /// Work Automation Finder. Workload figures are computed even when the
    /// quota is spent; only the model analysis is withheld then.
    pub async fn analyze_workload<S: SessionSlot + Send>(
        &self,
        slot: &mut S,
        form: AutomationForm,
    ) -> Result<AutomationReply, ToolkitError> {
        form.validate()?;
        let rows = form.filled_rows();
        let workload = roi::workload_breakdown(&rows);
        let summary = roi::calculate(&rows, form.hourly_rate, form.automation_cost);
        let prompt = prompts::automation_prompt(&rows)?;

        if let Err(e) = slot.reserve_call() {
            return match e {
                ToolkitError::QuotaExceeded { .. } => Ok(AutomationReply {
                    workload,
                    roi: summary,
                    analysis: None,
                    warning: Some(e.to_string()),
                    calls_remaining: 0,
                }),
                other => Err(other),
            };
        }

        let analysis = self.ask(InteractionKind::Automation, &prompt).await?;
        slot.record(Interaction::new(
            format!("Workload analysis ({} tasks)", rows.len()),
            &analysis,
            InteractionDetail::Automation {
                hours: summary.monthly_hours,
                savings: summary.annual_savings,
            },
        ))?;

        Ok(AutomationReply {
            workload,
            roi: summary,
            analysis: Some(analysis),
            warning: None,
            calls_remaining: slot.calls_remaining(),
        })
    }
}
