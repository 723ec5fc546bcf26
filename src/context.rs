//! The structured project description handed over by the extraction stage.

use serde::{Deserialize, Serialize};

/// Project attributes extracted from a user request.
///
/// Only `raw_request_text` is required; every other field may be missing
/// when the upstream extractor could not populate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub raw_request_text: String,
    #[serde(default)]
    pub project_type: Option<String>,
    /// Deliverable descriptions in display order.
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tech_hints: Vec<String>,
    /// Raw budget hint, e.g. "$50k-75k".
    #[serde(default)]
    pub budget_hint: Option<String>,
    /// Raw timeline hint, e.g. "2 weeks".
    #[serde(default)]
    pub timeline_hint: Option<String>,
}

impl ProjectContext {
    /// Create a context holding only the raw request text.
    pub fn new(raw_request_text: impl Into<String>) -> Self {
        Self {
            raw_request_text: raw_request_text.into(),
            ..Self::default()
        }
    }

    /// Set the project type label, e.g. "E-commerce".
    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    /// Replace the deliverable list.
    pub fn with_deliverables<I, S>(mut self, deliverables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deliverables = deliverables.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the technology mentions.
    pub fn with_tech_hints<I, S>(mut self, tech_hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech_hints = tech_hints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the budget as the client stated it, e.g. "$50k-75k".
    pub fn with_budget_hint(mut self, budget_hint: impl Into<String>) -> Self {
        self.budget_hint = Some(budget_hint.into());
        self
    }

    /// Set the timeline as the client stated it, e.g. "3 months".
    pub fn with_timeline_hint(mut self, timeline_hint: impl Into<String>) -> Self {
        self.timeline_hint = Some(timeline_hint.into());
        self
    }
}

/// The extractor emits `null` for an unknown tech list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
