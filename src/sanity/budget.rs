//! Budget against scope and estimated hours.

use rust_decimal::Decimal;

use crate::config::ThresholdConfig;
use crate::error::CheckError;
use crate::estimation::{EstimationResult, expected_budget, format_usd};

use super::{RequestFacts, Warning, WarningCategory};

/// Every rule here is independent; several may fire for one request.
pub(super) fn check(
    facts: &RequestFacts<'_>,
    estimation: Option<&EstimationResult>,
    config: &ThresholdConfig,
) -> Result<Vec<Warning>, CheckError> {
    let mut warnings = Vec::new();

    let Some(budget) = facts.budget else {
        return Ok(warnings);
    };
    let count = facts.deliverable_count;
    if count == 0 {
        return Ok(warnings);
    }

    let rules = &config.budget_rules;
    let count_dec = Decimal::from(count as u64);
    let per_deliverable = budget / count_dec;

    if count < rules.few_deliverables && budget > rules.high_budget {
        warnings.push(Warning::new(
            WarningCategory::Budget,
            format!(
                "Budget of {} seems high for only {} deliverable{}. Consider breaking down into \
                 more specific features or verifying budget expectations.",
                format_usd(budget),
                count,
                if count == 1 { "" } else { "s" }
            ),
        ));
    }

    if count > rules.many_deliverables && budget < rules.low_budget {
        warnings.push(Warning::new(
            WarningCategory::Budget,
            format!(
                "Budget of {} may be insufficient for {} deliverables. Each deliverable would \
                 average {}, which is typically too low for quality implementation. Consider \
                 increasing budget or reducing scope.",
                format_usd(budget),
                count,
                format_usd(per_deliverable)
            ),
        ));
    }

    if count >= rules.per_deliverable_min_count
        && per_deliverable < config.per_deliverable_budget_floor
    {
        warnings.push(Warning::new(
            WarningCategory::Budget,
            format!(
                "Budget of {} for {} deliverables averages {} per deliverable. This is \
                 unrealistically low for quality software development (typical minimum: {}-{} \
                 per feature). Budget should be {}-{} minimum.",
                format_usd(budget),
                count,
                format_usd(per_deliverable),
                format_usd(rules.suggested_per_feature_low),
                format_usd(rules.suggested_per_feature_high),
                format_usd(rules.suggested_per_feature_low * count_dec),
                format_usd(rules.suggested_per_feature_high * count_dec)
            ),
        ));
    }

    if budget < config.absolute_budget_floor {
        warnings.push(Warning::new(
            WarningCategory::Budget,
            format!(
                "Budget of {} is extremely low for any software project with {} deliverable{}. \
                 Even a simple MVP typically costs $15,000-$30,000 minimum. Please revise budget \
                 expectations or significantly reduce scope.",
                format_usd(budget),
                count,
                if count == 1 { "" } else { "s" }
            ),
        ));
    }

    if let Some(estimation) = estimation {
        if let Some(warning) = check_hours(budget, estimation, config)? {
            warnings.push(warning);
        }
    }

    Ok(warnings)
}

/// Stated budget against the hours the estimator produced.
fn check_hours(
    budget: Decimal,
    estimation: &EstimationResult,
    config: &ThresholdConfig,
) -> Result<Option<Warning>, CheckError> {
    let rate = config.hourly_rate.mid();
    if rate <= Decimal::ZERO {
        return Err(CheckError::InvalidThreshold {
            name: "hourlyRate",
            value: rate.to_string(),
        });
    }
    if estimation.total_hours == 0 {
        return Ok(None);
    }

    let hours = estimation.total_hours;
    let expected = expected_budget(hours, &config.hourly_rate);
    let rules = &config.budget_rules;

    let verdict = if budget < expected * rules.mismatch_low_ratio {
        "Budget may be insufficient for the estimated scope."
    } else if budget > expected * rules.mismatch_high_ratio {
        "Budget seems higher than necessary, or scope may be underestimated."
    } else {
        return Ok(None);
    };

    Ok(Some(Warning::new(
        WarningCategory::Budget,
        format!(
            "Estimated {} hours suggests ~{} budget, but provided budget is {}. {}",
            hours,
            format_usd(expected),
            format_usd(budget),
            verdict
        ),
    )))
}
