//! Effort, cost, and timeline estimation.
//!
//! Estimates are based on:
//! - A complexity tier per deliverable, from keyword tables
//! - A compounding multiplier from the project type and request context
//! - A fixed hourly band and a single full-time developer
//!
//! An MVP-scoped request lowers deliverable tiers before the multiplier is
//! applied, so context factors such as "enterprise" still scale the reduced
//! hours.

mod classifier;
mod cost;
mod multiplier;
mod time;

pub use classifier::{ClassifiedDeliverable, ComplexityTier, DeliverableClassifier};
pub use cost::{cost_range, expected_budget, format_usd};
pub use multiplier::{
    AppliedFactor, MultiplierBreakdown, MultiplierEngine, compute_multiplier, multiplier,
};
pub use time::{timeline_label, timeline_months, timeline_weeks};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ThresholdConfig;
use crate::context::ProjectContext;

/// Combined estimation for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Hours after the multiplier, rounded to the nearest hour.
    pub total_hours: u32,
    /// Sum of the per-deliverable hours.
    pub base_hours: u32,
    pub cost_min: Decimal,
    pub cost_max: Decimal,
    pub timeline_weeks: f64,
    pub timeline_months: f64,
    pub applied_multiplier: f64,
    /// Breakdown by deliverable, in input order.
    pub deliverables: Vec<ClassifiedDeliverable>,
}

impl EstimationResult {
    /// "6 weeks" or "4.7 months".
    pub fn timeline_label(&self) -> String {
        timeline_label(self.timeline_weeks, self.timeline_months)
    }

    /// "$60,000 - $90,000".
    pub fn cost_range_label(&self) -> String {
        format!(
            "{} - {}",
            format_usd(self.cost_min),
            format_usd(self.cost_max)
        )
    }
}

/// Deterministic estimator over a [`ThresholdConfig`].
pub struct Estimator<'c> {
    config: &'c ThresholdConfig,
    classifier: DeliverableClassifier<'c>,
    multipliers: MultiplierEngine<'c>,
}

impl<'c> Estimator<'c> {
    /// Create a new estimator, compiling its keyword tables once.
    pub fn new(config: &'c ThresholdConfig) -> Self {
        Self {
            config,
            classifier: DeliverableClassifier::new(config),
            multipliers: MultiplierEngine::new(config),
        }
    }

    /// Estimate a project from its extracted context.
    pub fn estimate(&self, context: &ProjectContext) -> EstimationResult {
        self.estimate_deliverables(
            &context.deliverables,
            context.project_type.as_deref(),
            &context.raw_request_text,
        )
    }

    /// Estimate from the individual inputs.
    pub fn estimate_deliverables(
        &self,
        deliverables: &[String],
        project_type: Option<&str>,
        request_text: &str,
    ) -> EstimationResult {
        let classified = self.classifier.classify_all(deliverables, request_text);
        let base_hours: u32 = classified.iter().map(|d| d.hours).sum();

        let breakdown = self.multipliers.compute(project_type, request_text);
        let total_hours = (f64::from(base_hours) * breakdown.total).round() as u32;

        let (cost_min, cost_max) = cost_range(total_hours, &self.config.hourly_rate);
        let weeks = timeline_weeks(total_hours, self.config.hours_per_week);
        let months = timeline_months(
            total_hours,
            self.config.hours_per_week,
            self.config.weeks_per_month,
        );

        tracing::info!(
            deliverables = classified.len(),
            base_hours,
            multiplier = breakdown.total,
            total_hours,
            "Estimated project effort"
        );

        EstimationResult {
            total_hours,
            base_hours,
            cost_min,
            cost_max,
            timeline_weeks: weeks,
            timeline_months: months,
            applied_multiplier: breakdown.total,
            deliverables: classified,
        }
    }

    /// Get the deliverable classifier.
    pub fn classifier(&self) -> &DeliverableClassifier<'c> {
        &self.classifier
    }
}

/// Estimate a project with the given configuration.
pub fn estimate(context: &ProjectContext, config: &ThresholdConfig) -> EstimationResult {
    Estimator::new(config).estimate(context)
}
