//! Cost estimation.

use rust_decimal::Decimal;

use crate::config::HourlyRate;

/// Cost range for a number of hours at the configured hourly band.
pub fn cost_range(total_hours: u32, rate: &HourlyRate) -> (Decimal, Decimal) {
    let hours = Decimal::from(total_hours);
    (hours * rate.low, hours * rate.high)
}

/// Expected budget for a number of hours at the middle of the band.
pub fn expected_budget(total_hours: u32, rate: &HourlyRate) -> Decimal {
    Decimal::from(total_hours) * rate.mid()
}

/// Format a dollar amount as `$12,345`, rounded to whole dollars.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_cost_range() {
        let rate = HourlyRate::default();
        assert_eq!(cost_range(1000, &rate), (dec!(80000), dec!(120000)));
        assert_eq!(cost_range(0, &rate), (dec!(0), dec!(0)));
        assert_eq!(expected_budget(750, &rate), dec!(75000));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(0)), "$0");
        assert_eq!(format_usd(dec!(999)), "$999");
        assert_eq!(format_usd(dec!(5000)), "$5,000");
        assert_eq!(format_usd(dec!(62500)), "$62,500");
        assert_eq!(format_usd(dec!(1234567.6)), "$1,234,568");
        assert_eq!(format_usd(dec!(714.2857)), "$714");
    }
}
