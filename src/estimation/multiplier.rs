//! Project-type and context multipliers.

use serde::{Deserialize, Serialize};

use crate::config::{ContextMultiplier, ThresholdConfig};
use crate::keywords::KeywordSet;

/// A context factor that was applied to the running multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFactor {
    pub name: String,
    pub factor: f64,
}

/// How the final multiplier was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplierBreakdown {
    /// Label of the project-type entry that matched, if any.
    pub project_type: Option<String>,
    pub base: f64,
    /// Context groups found in the request, in table order.
    pub applied: Vec<AppliedFactor>,
    pub total: f64,
}

/// Project-type and context tables compiled once from a [`ThresholdConfig`].
pub struct MultiplierEngine<'c> {
    config: &'c ThresholdConfig,
    context_groups: Vec<(&'c ContextMultiplier, KeywordSet<'c>)>,
}

impl<'c> MultiplierEngine<'c> {
    /// Create a new engine. A context group whose keywords fail to compile
    /// is left out.
    pub fn new(config: &'c ThresholdConfig) -> Self {
        let context_groups = config
            .context_multipliers
            .iter()
            .filter_map(|group| match KeywordSet::new(&group.keywords) {
                Ok(set) => Some((group, set)),
                Err(e) => {
                    tracing::warn!("Skipping context multiplier {}: {}", group.name, e);
                    None
                }
            })
            .collect();
        Self {
            config,
            context_groups,
        }
    }

    /// Compute the effort multiplier for a request.
    ///
    /// The project type picks a base from the first matching table entry;
    /// every context group found in the request text then multiplies into it.
    pub fn compute(&self, project_type: Option<&str>, request_text: &str) -> MultiplierBreakdown {
        let matched_type = project_type.and_then(|label| {
            let label = label.to_lowercase();
            self.config.project_type_multipliers.iter().find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|k| !k.is_empty() && label.contains(&k.to_lowercase()))
            })
        });
        let base = matched_type
            .map(|entry| entry.factor)
            .unwrap_or(self.config.default_project_multiplier);

        let mut total = base;
        let mut applied = Vec::new();
        for (group, set) in &self.context_groups {
            if set.contains_any(request_text) {
                total *= group.factor;
                applied.push(AppliedFactor {
                    name: group.name.clone(),
                    factor: group.factor,
                });
            }
        }

        MultiplierBreakdown {
            project_type: matched_type.map(|entry| entry.label.clone()),
            base,
            applied,
            total,
        }
    }
}

/// Compute the effort multiplier for a request with the given configuration.
pub fn compute_multiplier(
    project_type: Option<&str>,
    request_text: &str,
    config: &ThresholdConfig,
) -> MultiplierBreakdown {
    MultiplierEngine::new(config).compute(project_type, request_text)
}

/// The compounded multiplier alone.
pub fn multiplier(project_type: Option<&str>, request_text: &str, config: &ThresholdConfig) -> f64 {
    compute_multiplier(project_type, request_text, config).total
}
