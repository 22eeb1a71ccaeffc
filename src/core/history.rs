// src/core/history.rs — Append-only interaction log and dashboard aggregation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Idea,
    Meeting,
    Automation,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::Idea,
        InteractionKind::Meeting,
        InteractionKind::Automation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Idea => "idea",
            InteractionKind::Meeting => "meeting",
            InteractionKind::Automation => "automation",
        }
    }

    /// Label used on dashboard charts.
    pub fn label(&self) -> &'static str {
        match self {
            InteractionKind::Idea => "Idea",
            InteractionKind::Meeting => "Meeting",
            InteractionKind::Automation => "Automation",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idea" => Ok(InteractionKind::Idea),
            "meeting" => Ok(InteractionKind::Meeting),
            "automation" => Ok(InteractionKind::Automation),
            other => Err(format!(
                "Unknown feature '{other}'. Options: idea, meeting, automation"
            )),
        }
    }
}

/// Per-kind payload. Only automation runs carry numeric metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InteractionDetail {
    Idea,
    Meeting,
    Automation {
        /// Monthly hours spent on the analysed tasks.
        #[serde(default)]
        hours: f64,
        /// Projected annual savings.
        #[serde(default)]
        savings: f64,
    },
}

impl InteractionDetail {
    pub fn kind(&self) -> InteractionKind {
        match self {
            InteractionDetail::Idea => InteractionKind::Idea,
            InteractionDetail::Meeting => InteractionKind::Meeting,
            InteractionDetail::Automation { .. } => InteractionKind::Automation,
        }
    }
}

/// One completed model exchange. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub name: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub detail: InteractionDetail,
}

impl Interaction {
    pub fn new(name: impl Into<String>, result: impl Into<String>, detail: InteractionDetail) -> Self {
        Self {
            name: name.into(),
            result: result.into(),
            timestamp: Utc::now(),
            detail,
        }
    }

    pub fn kind(&self) -> InteractionKind {
        self.detail.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub counts_by_type: BTreeMap<InteractionKind, usize>,
    pub total_hours: f64,
    pub total_savings: f64,
}

impl Default for Aggregate {
    fn default() -> Self {
        Self {
            counts_by_type: InteractionKind::ALL.iter().map(|k| (*k, 0)).collect(),
            total_hours: 0.0,
            total_savings: 0.0,
        }
    }
}

impl Aggregate {
    pub fn count(&self, kind: InteractionKind) -> usize {
        self.counts_by_type.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts_by_type.values().sum()
    }

    fn absorb(mut self, interaction: &Interaction) -> Self {
        *self.counts_by_type.entry(interaction.kind()).or_default() += 1;
        if let InteractionDetail::Automation { hours, savings } = interaction.detail {
            self.total_hours += hours;
            self.total_savings += savings;
        }
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryLog {
    entries: Vec<Interaction>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, interaction: Interaction) {
        self.entries.push(interaction);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interaction> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Interaction] {
        &self.entries
    }

    /// Most recent interaction of `kind`, if any.
    pub fn latest(&self, kind: InteractionKind) -> Option<&Interaction> {
        self.entries.iter().rev().find(|i| i.kind() == kind)
    }

    /// Recomputed from scratch on every call.
    pub fn aggregate(&self) -> Aggregate {
        self.entries
            .iter()
            .fold(Aggregate::default(), Aggregate::absorb)
    }
}
