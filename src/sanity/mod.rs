//! Reality checks for budget, timeline, scope, and technology choices.
//!
//! The checker runs four independent rule groups in a fixed order:
//! - Scope: comparisons with massive platforms ("like Amazon")
//! - Budget: stated budget against deliverable count and estimated hours
//! - Timeline: stated timeline against deliverables and estimated hours
//! - Tech stack: outdated technologies, conflicting choices, old versions
//!
//! An estimation is optional. Without one, the hour-based rules are skipped
//! and everything else still runs, so the checker can sit before or after the
//! estimator. A rule group that fails is reported as a single warning and
//! does not stop the groups after it.

mod budget;
mod scope;
mod tech;
mod timeline;

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ThresholdConfig;
use crate::context::ProjectContext;
use crate::error::CheckError;
use crate::estimation::EstimationResult;
use crate::extract::{parse_budget, parse_timeline_months, scan_timeline_months};

use self::tech::TechCheck;
use self::timeline::TimelineCheck;

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCategory {
    Budget,
    Timeline,
    TechStack,
    Scope,
}

impl WarningCategory {
    /// Heading used when a warning is displayed.
    pub fn title(self) -> &'static str {
        match self {
            Self::Budget => "Budget Warning",
            Self::Timeline => "Timeline Warning",
            Self::TechStack => "Tech Stack Warning",
            Self::Scope => "Scope Warning",
        }
    }
}

/// A non-blocking reality-check finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub category: WarningCategory,
    pub message: String,
}

impl Warning {
    /// Create a new warning in the given category.
    pub fn new(category: WarningCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category.title(), self.message)
    }
}

/// Values derived once from the context and shared by every rule group.
pub(crate) struct RequestFacts<'a> {
    pub context: &'a ProjectContext,
    pub budget: Option<Decimal>,
    pub timeline_months: Option<f64>,
    pub deliverable_count: usize,
}

impl<'a> RequestFacts<'a> {
    /// Parse the budget and timeline out of the context.
    pub fn new(context: &'a ProjectContext) -> Self {
        let budget = context.budget_hint.as_deref().and_then(parse_budget);
        let timeline_months = context
            .timeline_hint
            .as_deref()
            .and_then(parse_timeline_months)
            .or_else(|| scan_timeline_months(&context.raw_request_text));

        Self {
            context,
            budget,
            timeline_months,
            deliverable_count: context.deliverables.len(),
        }
    }
}

/// Rule groups in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleGroup {
    Scope,
    Budget,
    Timeline,
    TechStack,
}

impl RuleGroup {
    const ORDER: [RuleGroup; 4] = [
        RuleGroup::Scope,
        RuleGroup::Budget,
        RuleGroup::Timeline,
        RuleGroup::TechStack,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Scope => "scope",
            Self::Budget => "budget",
            Self::Timeline => "timeline",
            Self::TechStack => "tech stack",
        }
    }

    fn category(self) -> WarningCategory {
        match self {
            Self::Scope => WarningCategory::Scope,
            Self::Budget => WarningCategory::Budget,
            Self::Timeline => WarningCategory::Timeline,
            Self::TechStack => WarningCategory::TechStack,
        }
    }

    fn run(
        self,
        checker: &SanityChecker<'_>,
        facts: &RequestFacts<'_>,
        estimation: Option<&EstimationResult>,
    ) -> Result<Vec<Warning>, CheckError> {
        match self {
            Self::Scope => scope::check(facts, checker.config),
            Self::Budget => budget::check(facts, estimation, checker.config),
            Self::Timeline => checker
                .timeline
                .as_ref()
                .map_err(Clone::clone)?
                .check(facts, estimation),
            Self::TechStack => Ok(checker.tech.as_ref().map_err(Clone::clone)?.check(facts)),
        }
    }
}

/// Sanity checker over a [`ThresholdConfig`].
///
/// Keyword tables and version patterns are compiled once here. A table that
/// fails to compile disables only its own rule group, which then reports the
/// failure on every check.
pub struct SanityChecker<'c> {
    config: &'c ThresholdConfig,
    timeline: Result<TimelineCheck<'c>, CheckError>,
    tech: Result<TechCheck<'c>, CheckError>,
}

impl<'c> SanityChecker<'c> {
    /// Create a new checker, compiling its rule tables once.
    pub fn new(config: &'c ThresholdConfig) -> Self {
        Self {
            config,
            timeline: TimelineCheck::new(config),
            tech: TechCheck::new(config),
        }
    }

    /// Run every rule group and collect warnings in group order.
    pub fn check(
        &self,
        context: &ProjectContext,
        estimation: Option<&EstimationResult>,
    ) -> Vec<Warning> {
        let facts = RequestFacts::new(context);
        let mut warnings = Vec::new();

        for group in RuleGroup::ORDER {
            match group.run(self, &facts, estimation) {
                Ok(found) => warnings.extend(found),
                Err(e) => {
                    tracing::warn!("Sanity {} check failed: {}", group.name(), e);
                    warnings.push(Warning::new(
                        group.category(),
                        format!(
                            "The {} check encountered an error and was skipped: {}",
                            group.name(),
                            e
                        ),
                    ));
                }
            }
        }

        if warnings.is_empty() {
            tracing::info!("Sanity check found no issues");
        } else {
            tracing::info!("Sanity check found {} warning(s)", warnings.len());
        }
        warnings
    }
}

/// Run the sanity checker with the given configuration.
pub fn check(
    context: &ProjectContext,
    estimation: Option<&EstimationResult>,
    config: &ThresholdConfig,
) -> Vec<Warning> {
    SanityChecker::new(config).check(context, estimation)
}
