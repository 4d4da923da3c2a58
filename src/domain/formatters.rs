//! Display helpers for table cells.

use chrono::{DateTime, NaiveDate};

/// Parses a stored or typed date of birth.
///
/// Accepts a plain ISO date (`2022-04-17`) or a full RFC 3339 timestamp,
/// which is what older seed files carry.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Long form date, e.g. "April 17, 2022". Unset or unreadable dates show "NA".
pub fn format_date(dob: &str) -> String {
    match parse_date(dob) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => "NA".to_string(),
    }
}

pub fn format_status(active: bool) -> &'static str {
    if active { "Active" } else { "Inactive" }
}

pub fn format_salary(salary: f64) -> String {
    salary.to_string()
}

pub fn format_total_salary(total: f64) -> String {
    format!("Total Salary: {} Lacs", format_salary(total))
}
