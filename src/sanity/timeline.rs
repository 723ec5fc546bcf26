//! Stated timeline against deliverables and estimated hours.

use crate::config::ThresholdConfig;
use crate::error::CheckError;
use crate::estimation::EstimationResult;
use crate::extract::WEEKS_PER_MONTH;
use crate::keywords::KeywordSet;

use super::{RequestFacts, Warning, WarningCategory};

/// Timeline rules with the domain keywords compiled once.
pub(super) struct TimelineCheck<'c> {
    config: &'c ThresholdConfig,
    domain: KeywordSet<'c>,
}

impl<'c> TimelineCheck<'c> {
    /// Compile the domain keywords.
    pub fn new(config: &'c ThresholdConfig) -> Result<Self, CheckError> {
        Ok(Self {
            config,
            domain: KeywordSet::new(&config.timeline_rules.domain_keywords)?,
        })
    }

    /// At most one warning: the first matching rule wins.
    pub fn check(
        &self,
        facts: &RequestFacts<'_>,
        estimation: Option<&EstimationResult>,
    ) -> Result<Vec<Warning>, CheckError> {
        let Some(months) = facts.timeline_months else {
            return Ok(Vec::new());
        };

        if let Some(message) = check_scope(facts, months, &self.domain, self.config) {
            return Ok(vec![Warning::new(WarningCategory::Timeline, message)]);
        }

        let Some(estimation) = estimation else {
            return Ok(Vec::new());
        };
        Ok(check_hours(months, estimation, self.config)?
            .map(|message| Warning::new(WarningCategory::Timeline, message))
            .into_iter()
            .collect())
    }
}

/// Rules that need only the request itself.
fn check_scope(
    facts: &RequestFacts<'_>,
    months: f64,
    domain: &KeywordSet<'_>,
    config: &ThresholdConfig,
) -> Option<String> {
    let rules = &config.timeline_rules;
    let count = facts.deliverable_count;
    let weeks = (months * WEEKS_PER_MONTH).round();

    if months <= rules.domain_max_months && domain.contains_any(&facts.context.raw_request_text) {
        return Some(format!(
            "{:.1} months (about {} weeks) for an e-commerce/platform project is unrealistic. \
             E-commerce sites typically require 3-6 months minimum for a basic MVP, even with \
             existing frameworks. Consider extending timeline to at least 3 months.",
            months, weeks
        ));
    }

    if months < rules.aggressive_months && count >= rules.aggressive_min_deliverables {
        let floor_weeks = count as f64 * rules.weeks_per_deliverable;
        return Some(format!(
            "{:.1} months (about {} weeks) for {} deliverables is extremely aggressive. Even a \
             simple feature typically takes 1-2 weeks minimum. Consider timeline of at least {} \
             weeks ({:.1} months).",
            months,
            weeks,
            count,
            floor_weeks,
            floor_weeks / WEEKS_PER_MONTH
        ));
    }

    if count > rules.many_deliverables && months < rules.tight_months {
        let per_feature = months * WEEKS_PER_MONTH / count as f64;
        let low = count as f64 * rules.weeks_per_deliverable / WEEKS_PER_MONTH;
        return Some(format!(
            "{} deliverables in {:.1} months is very tight. This allows only ~{:.1} weeks per \
             feature. Realistic timeline would be {:.1}-{:.1} months.",
            count,
            months,
            per_feature,
            low,
            low * 2.0
        ));
    }

    None
}

/// Rules comparing the timeline with a single developer working the estimate.
fn check_hours(
    months: f64,
    estimation: &EstimationResult,
    config: &ThresholdConfig,
) -> Result<Option<String>, CheckError> {
    let rules = &config.timeline_rules;
    let hours = estimation.total_hours;
    if hours == 0 {
        return Ok(None);
    }
    if config.hours_per_week <= 0.0 {
        return Err(CheckError::InvalidThreshold {
            name: "hoursPerWeek",
            value: config.hours_per_week.to_string(),
        });
    }

    let expected = estimation.timeline_months;

    if hours > rules.heavy_hours && months < rules.tight_months {
        let developers = f64::from(hours) / config.hours_per_week / (months * WEEKS_PER_MONTH);
        return Ok(Some(format!(
            "{} hours would take ~{:.1} months with 1 full-time developer, but timeline suggests \
             {:.1} months. This would require {:.1} developers working in parallel, which may \
             not be feasible for all tasks.",
            hours, expected, months, developers
        )));
    }

    if hours < rules.light_hours && months > rules.long_months {
        return Ok(Some(format!(
            "{} hours would take ~{:.1} months, but timeline suggests {:.1} months. Timeline \
             seems longer than necessary, unless there are external dependencies or part-time \
             resources.",
            hours, expected, months
        )));
    }

    if months < expected * rules.short_ratio {
        return Ok(Some(format!(
            "Timeline of {:.1} months may be too aggressive for {} hours of work (expected \
             ~{:.1} months). Consider extending timeline or increasing team size.",
            months, hours, expected
        )));
    }

    if months > expected * rules.long_ratio {
        return Ok(Some(format!(
            "Timeline of {:.1} months seems longer than necessary for {} hours of work \
             (expected ~{:.1} months). Consider if there are specific reasons for the extended \
             timeline.",
            months, hours, expected
        )));
    }

    Ok(None)
}
