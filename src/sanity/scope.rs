//! Massive-platform comparisons.

use crate::config::ThresholdConfig;
use crate::error::CheckError;
use crate::estimation::format_usd;
use crate::extract::scan_platform_mentions;

use super::{RequestFacts, Warning, WarningCategory};

pub(super) fn check(
    facts: &RequestFacts<'_>,
    config: &ThresholdConfig,
) -> Result<Vec<Warning>, CheckError> {
    let platforms = scan_platform_mentions(
        &facts.context.raw_request_text,
        &config.massive_platform_table,
    );

    let budget_msg = match facts.budget {
        Some(budget) => format!("The stated budget of {}", format_usd(budget)),
        None => "Any realistic budget".to_string(),
    };

    Ok(platforms
        .into_iter()
        .map(|platform| {
            Warning::new(
                WarningCategory::Scope,
                format!(
                    "Building a '{}' platform requires {} in development costs and years of work \
                     by large teams. {} is insufficient by orders of magnitude. Consider building \
                     an MVP with core features only, or significantly increasing budget and \
                     timeline expectations.",
                    platform.scale_label, platform.typical_cost, budget_msg
                ),
            )
        })
        .collect())
}
