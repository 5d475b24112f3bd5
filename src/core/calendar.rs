use chrono::{Months, NaiveDate};

/// Calendar-month addition. The day of month is kept where it exists and
/// clamped to the last day otherwise, so Jan 31 + 1 month is Feb 28 or 29.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Human readable span such as "2 years, 3 months" or "5 months".
pub fn describe_months(months: u32, separator: &str) -> String {
    let years = months / 12;
    let remaining = months % 12;
    if years == 0 {
        return plural(months, "month");
    }
    if remaining == 0 {
        return plural(years, "year");
    }
    format!(
        "{}{separator}{}",
        plural(years, "year"),
        plural(remaining, "month")
    )
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
