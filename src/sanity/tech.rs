//! Outdated technologies, conflicting choices and old versions.

use regex::Regex;

use crate::config::{ConflictGroup, OutdatedTech, ThresholdConfig, VersionFloor};
use crate::error::CheckError;
use crate::keywords::KeywordSet;

use super::{RequestFacts, Warning, WarningCategory};

/// Tech tables compiled once from a [`ThresholdConfig`].
pub(super) struct TechCheck<'c> {
    outdated: Vec<(&'c OutdatedTech, KeywordSet<'c>)>,
    conflicts: Vec<(&'c ConflictGroup, KeywordSet<'c>, KeywordSet<'c>)>,
    versions: Vec<(&'c VersionFloor, Regex)>,
}

impl<'c> TechCheck<'c> {
    /// Compile every alias table and version pattern.
    pub fn new(config: &'c ThresholdConfig) -> Result<Self, CheckError> {
        let outdated = config
            .outdated_tech_table
            .iter()
            .map(|tech| -> Result<_, CheckError> {
                Ok((tech, KeywordSet::new(&tech.aliases)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let conflicts = config
            .conflicting_pairs
            .iter()
            .map(|group| -> Result<_, CheckError> {
                Ok((
                    group,
                    KeywordSet::new(&group.left)?,
                    KeywordSet::new(&group.right)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let versions = config
            .version_floors
            .iter()
            .map(|floor| version_pattern(floor).map(|pattern| (floor, pattern)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            outdated,
            conflicts,
            versions,
        })
    }

    /// Outdated entries, then conflicts, then version floors.
    pub fn check(&self, facts: &RequestFacts<'_>) -> Vec<Warning> {
        let context = facts.context;
        if context.tech_hints.is_empty() && context.raw_request_text.trim().is_empty() {
            return Vec::new();
        }

        // Hints first, then the request text for anything the extractor missed.
        let text = context
            .tech_hints
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(context.raw_request_text.as_str()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut warnings = Vec::new();

        for (tech, aliases) in &self.outdated {
            if aliases.contains_any(&text) {
                warnings.push(Warning::new(
                    WarningCategory::TechStack,
                    format!(
                        "'{}' is outdated/deprecated. Consider using {} instead for better \
                         performance, security, and maintainability.",
                        tech.name, tech.alternative
                    ),
                ));
            }
        }

        for (group, left, right) in &self.conflicts {
            let left = left.find(&text);
            let right = right.find(&text);
            if left.is_empty() || right.is_empty() {
                continue;
            }
            warnings.push(Warning::new(
                WarningCategory::TechStack,
                format!(
                    "Multiple {} detected ({} and {}). This may indicate confusion in \
                     requirements. Typically, projects use one primary choice for {}. Please \
                     clarify which one should be used.",
                    group.category,
                    left.join(", "),
                    right.join(", "),
                    group.category
                ),
            ));
        }

        for (floor, pattern) in &self.versions {
            let Some(version) = stated_version(pattern, &text) else {
                continue;
            };
            if version < floor.min_major {
                warnings.push(Warning::new(
                    WarningCategory::TechStack,
                    format!(
                        "{} {} is outdated. Consider upgrading to {} for better features, \
                         performance, and security.",
                        floor.name, version, floor.recommended
                    ),
                ));
            }
        }

        warnings
    }
}

fn version_pattern(floor: &VersionFloor) -> Result<Regex, CheckError> {
    Regex::new(&format!(r"(?i)\b(?:{})\s*v?(\d+)\b", floor.pattern)).map_err(|e| {
        CheckError::Pattern {
            name: floor.name.clone(),
            reason: e.to_string(),
        }
    })
}

/// Major version of the first "<name> <n>" mention, e.g. "Node 8" or "react v15".
fn stated_version(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
