//! Time estimation.

/// Months of single-developer work for a number of hours.
pub fn timeline_months(total_hours: u32, hours_per_week: f64, weeks_per_month: f64) -> f64 {
    timeline_weeks(total_hours, hours_per_week) / weeks_per_month
}

/// Weeks of single-developer work for a number of hours.
pub fn timeline_weeks(total_hours: u32, hours_per_week: f64) -> f64 {
    f64::from(total_hours) / hours_per_week
}

/// Human-readable duration: whole weeks below eight weeks, months above.
pub fn timeline_label(weeks: f64, months: f64) -> String {
    if weeks < 8.0 {
        let whole = (weeks.floor() as u32).max(1);
        format!("{} week{}", whole, if whole == 1 { "" } else { "s" })
    } else {
        format!("{:.1} months", months)
    }
}
