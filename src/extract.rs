//! Free-text budget and timeline parsing.
//!
//! Nothing in here fails: input that cannot be understood yields `None` and
//! the checks depending on it are skipped.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::MassivePlatform;

/// Calendar weeks per month used when converting stated timelines.
pub const WEEKS_PER_MONTH: f64 = 4.33;
/// Calendar days per month used when converting stated timelines.
pub const DAYS_PER_MONTH: f64 = 30.0;

static BUDGET_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    // A suffix only counts when no other letter follows it ("5k", not "5 max").
    Regex::new(
        r"(\d+(?:\.\d+)?)\s*([km]?)(?:\s*(?:-|–|to)\s*(\d+(?:\.\d+)?)\s*([km]?))?(?:[^a-z0-9]|$)",
    )
    .expect("budget pattern is valid")
});

static TIMELINE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?)(?:\s*(?:-|–|to)\s*(\d+(?:\.\d+)?))?\s*(days?|weeks?|wks?|months?|mos?|years?|yrs?)\b",
    )
    .expect("timeline pattern is valid")
});

static REQUEST_TIMELINES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i)\bin\s+(\d+)\s+(day|week|month)s?\b",
        r"(?i)\b(\d+)\s+(day|week|month)s?\s+(?:timeline|deadline|timeframe)\b",
        r"(?i)\bwithin\s+(\d+)\s+(day|week|month)s?\b",
    ]
    .map(|pattern| Regex::new(pattern).expect("request timeline pattern is valid"))
});

/// Parse a budget hint into a single dollar amount.
///
/// Ranges resolve to their midpoint and `k`/`m` suffixes scale the amount. A
/// suffix written only on the upper bound applies to both ends, so
/// `"50-75k"` reads as 50k to 75k.
pub fn parse_budget(hint: &str) -> Option<Decimal> {
    let cleaned: String = hint
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect::<String>()
        .to_lowercase();

    let caps = BUDGET_AMOUNT.captures(&cleaned)?;
    let low = Decimal::from_str(caps.get(1)?.as_str()).ok()?;
    let low_suffix = suffix(caps.get(2));

    let amount = match caps.get(3) {
        Some(high) => {
            let high = Decimal::from_str(high.as_str()).ok()?;
            let high_suffix = suffix(caps.get(4));
            let low = low.checked_mul(scale(low_suffix.or(high_suffix)))?;
            let high = high.checked_mul(scale(high_suffix))?;
            low.checked_add(high)? / dec!(2)
        }
        None => low.checked_mul(scale(low_suffix))?,
    };

    (amount > Decimal::ZERO).then(|| amount.normalize())
}

fn suffix(m: Option<regex::Match<'_>>) -> Option<&str> {
    m.map(|m| m.as_str()).filter(|s| !s.is_empty())
}

fn scale(suffix: Option<&str>) -> Decimal {
    match suffix {
        Some("k") => dec!(1000),
        Some("m") => dec!(1000000),
        _ => Decimal::ONE,
    }
}

/// Parse a timeline hint into months.
///
/// Weeks divide by [`WEEKS_PER_MONTH`], days by [`DAYS_PER_MONTH`], years
/// multiply by twelve. Ranges are averaged.
pub fn parse_timeline_months(hint: &str) -> Option<f64> {
    let caps = TIMELINE_SPAN.captures(hint)?;
    let low: f64 = caps.get(1)?.as_str().parse().ok()?;
    let value = match caps.get(2) {
        Some(high) => (low + high.as_str().parse::<f64>().ok()?) / 2.0,
        None => low,
    };
    let months = to_months(value, caps.get(3)?.as_str())?;
    (months > 0.0).then_some(months)
}

/// Find a timeline stated in the raw request text.
///
/// Recognizes "in N weeks", "N month deadline" and "within N days" style
/// phrases; the first pattern that matches wins.
pub fn scan_timeline_months(text: &str) -> Option<f64> {
    REQUEST_TIMELINES.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        to_months(value, caps.get(2)?.as_str()).filter(|months| *months > 0.0)
    })
}

fn to_months(value: f64, unit: &str) -> Option<f64> {
    let unit = unit.to_lowercase();
    if unit.starts_with('d') {
        Some(value / DAYS_PER_MONTH)
    } else if unit.starts_with('w') {
        Some(value / WEEKS_PER_MONTH)
    } else if unit.starts_with('m') {
        Some(value)
    } else if unit.starts_with('y') {
        Some(value * 12.0)
    } else {
        None
    }
}

/// Platforms from `table` the request compares itself to.
///
/// A mention is "like amazon", "amazon-like", "amazon-scale" or
/// "amazon clone". Each platform appears at most once, in table order.
pub fn scan_platform_mentions<'t>(
    text: &str,
    table: &'t [MassivePlatform],
) -> Vec<&'t MassivePlatform> {
    let lower = text.to_lowercase();
    table
        .iter()
        .filter(|platform| {
            let name = platform.name.to_lowercase();
            if name.is_empty() {
                return false;
            }
            [
                format!("like {}", name),
                format!("{}-like", name),
                format!("{}-scale", name),
                format!("{} clone", name),
            ]
            .iter()
            .any(|phrase| lower.contains(phrase.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdConfig;

    #[test]
    fn test_budget_ranges_and_suffixes() {
        assert_eq!(parse_budget("$50,000 - $75,000"), Some(dec!(62500)));
        assert_eq!(parse_budget("50k-75k"), Some(dec!(62500)));
        assert_eq!(parse_budget("$5,000"), Some(dec!(5000)));
        assert_eq!(parse_budget("50-75k"), Some(dec!(62500)));
        assert_eq!(parse_budget("$1.5M"), Some(dec!(1500000)));
        assert_eq!(parse_budget("around 20k to 30k"), Some(dec!(25000)));
    }

    #[test]
    fn test_budget_unparseable() {
        assert_eq!(parse_budget("flexible"), None);
        assert_eq!(parse_budget(""), None);
        assert_eq!(parse_budget("$0"), None);
    }

    #[test]
    fn test_budget_trailing_words_are_not_suffixes() {
        assert_eq!(parse_budget("$20,000 max"), Some(dec!(20000)));
        assert_eq!(parse_budget("$5k max"), Some(dec!(5000)));
        assert_eq!(parse_budget("$8000 monthly"), Some(dec!(8000)));
        assert_eq!(parse_budget("10k-15k total"), Some(dec!(12500)));
        assert_eq!(parse_budget("$2m"), Some(dec!(2000000)));
    }

    #[test]
    fn test_budget_overflow_is_unparseable() {
        assert_eq!(parse_budget("9999999999999999999999999999k"), None);
        assert_eq!(parse_budget("79228162514264337593543950335-79228162514264337593543950335"), None);
    }

    #[test]
    fn test_timeline_units() {
        let two_weeks = parse_timeline_months("2 weeks").unwrap();
        assert!((two_weeks - 0.46).abs() < 0.01);
        assert_eq!(parse_timeline_months("3 months"), Some(3.0));
        let six_weeks = parse_timeline_months("6 weeks").unwrap();
        assert!((six_weeks - 1.38).abs() < 0.01);
        assert_eq!(parse_timeline_months("45 days"), Some(1.5));
        assert_eq!(parse_timeline_months("1 year"), Some(12.0));
    }

    #[test]
    fn test_timeline_range_is_averaged() {
        assert_eq!(parse_timeline_months("2-4 months"), Some(3.0));
        assert_eq!(parse_timeline_months("3 to 6 Months"), Some(4.5));
    }

    #[test]
    fn test_timeline_unparseable() {
        assert_eq!(parse_timeline_months("asap"), None);
        assert_eq!(parse_timeline_months("0 weeks"), None);
    }

    #[test]
    fn test_scan_request_text() {
        let months = scan_timeline_months("Need e-commerce site in 2 weeks").unwrap();
        assert!((months - 2.0 / WEEKS_PER_MONTH).abs() < 1e-9);
        assert_eq!(scan_timeline_months("We have a 3 month deadline"), Some(3.0));
        assert_eq!(scan_timeline_months("Deliver within 15 days"), Some(0.5));
        assert_eq!(scan_timeline_months("Launch sometime next year"), None);
    }

    #[test]
    fn test_scan_prefers_first_pattern() {
        let months = scan_timeline_months("A 6 month timeline, demo in 2 weeks");
        assert!((months.unwrap() - 2.0 / WEEKS_PER_MONTH).abs() < 1e-9);
    }

    #[test]
    fn test_platform_mentions() {
        let config = ThresholdConfig::default();
        let found = scan_platform_mentions(
            "Marketplace like Amazon with Uber-scale logistics",
            &config.massive_platform_table,
        );
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["amazon", "uber"]);

        assert!(
            scan_platform_mentions("We sell on Amazon already", &config.massive_platform_table)
                .is_empty()
        );
    }
}
