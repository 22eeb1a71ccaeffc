// src/core/session.rs — Session-scoped state and the in-process session store

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use super::history::{HistoryLog, Interaction, InteractionKind};
use super::quota::CallQuota;
use crate::infra::errors::ToolkitError;

/// Everything one user visit owns. Handlers receive it by `&mut`.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub quota: CallQuota,
    pub history: HistoryLog,
}

impl Session {
    pub fn new(max_calls: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            quota: CallQuota::new(max_calls),
            history: HistoryLog::new(),
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        let agg = self.history.aggregate();
        let type_frequency = InteractionKind::ALL
            .iter()
            .map(|k| ChartBar {
                label: k.label().to_string(),
                value: agg.count(*k) as f64,
            })
            .collect();

        Dashboard {
            total_interactions: agg.total(),
            automation_hours: agg.total_hours,
            automation_savings: agg.total_savings,
            type_frequency,
            calls_used: self.quota.call_count(),
            calls_remaining: self.quota.remaining(),
            counts_by_type: agg.counts_by_type,
        }
    }
}

/// One bar of a dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total_interactions: usize,
    pub counts_by_type: BTreeMap<InteractionKind, usize>,
    pub automation_hours: f64,
    pub automation_savings: f64,
    pub type_frequency: Vec<ChartBar>,
    pub calls_used: u32,
    pub calls_remaining: u32,
}

/// Live sessions keyed by id. Each operation holds the lock only briefly;
/// callers must not keep it across a model call.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    max_calls: u32,
}

impl SessionStore {
    pub fn new(max_calls: u32) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_calls,
        }
    }

    pub fn max_calls(&self) -> u32 {
        self.max_calls
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Session>>, ToolkitError> {
        self.sessions
            .lock()
            .map_err(|_| ToolkitError::Other(anyhow::anyhow!("session store lock poisoned")))
    }

    /// Start a session and return its id.
    pub fn create(&self) -> Result<String, ToolkitError> {
        let session = Session::new(self.max_calls);
        let id = session.id.clone();
        self.lock()?.insert(id.clone(), session);
        tracing::info!(session = %id, max_calls = self.max_calls, "session started");
        Ok(id)
    }

    pub fn end(&self, id: &str) -> Result<(), ToolkitError> {
        let removed = self.lock()?.remove(id);
        match removed {
            Some(s) => {
                tracing::info!(
                    session = %id,
                    interactions = s.history.len(),
                    "session ended"
                );
                Ok(())
            }
            None => Err(ToolkitError::SessionNotFound(id.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against one session under the lock.
    pub fn with<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, ToolkitError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| ToolkitError::SessionNotFound(id.to_string()))?;
        Ok(f(session))
    }

    /// Check-and-increment the session's quota atomically.
    pub fn reserve_call(&self, id: &str) -> Result<(), ToolkitError> {
        self.with(id, |s| s.quota.acquire())?
    }

    pub fn record(&self, id: &str, interaction: Interaction) -> Result<(), ToolkitError> {
        self.with(id, |s| s.history.append(interaction))
    }

    pub fn history(&self, id: &str) -> Result<Vec<Interaction>, ToolkitError> {
        self.with(id, |s| s.history.entries().to_vec())
    }

    pub fn dashboard(&self, id: &str) -> Result<Dashboard, ToolkitError> {
        self.with(id, |s| s.dashboard())
    }
}
