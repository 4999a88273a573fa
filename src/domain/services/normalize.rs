use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::error::AppError;

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid time regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

/// Lowercases, collapses every run of non `[a-z0-9]` characters into one dash
/// and strips dashes from both ends. `"Hello, World! 2025"` becomes `hello-world-2025`.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    NON_ALNUM_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Parses anything that reads as a calendar date and returns it as `YYYY-MM-DD`.
/// Date-times with an offset are converted to UTC first.
pub fn normalize_date(input: &str) -> Result<String, AppError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(format_date(dt.with_timezone(&Utc).date_naive()));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(format_date(dt.date()));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Ok(format_date(date));
        }
    }

    Err(AppError::Validation("Invalid date format".into()))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Accepts `H:MM` or `HH:MM` on a 24 hour clock and returns zero-padded `HH:MM`.
pub fn normalize_time(input: &str) -> Result<String, AppError> {
    let caps = TIME_RE
        .captures(input.trim())
        .ok_or_else(|| AppError::Validation("Invalid time format".into()))?;

    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| AppError::Validation("Invalid time format".into()))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| AppError::Validation("Invalid time format".into()))?;

    if hour > 23 || minute > 59 {
        return Err(AppError::Validation("Invalid time value".into()));
    }

    Ok(format!("{:02}:{:02}", hour, minute))
}

pub fn normalize_email(input: &str) -> Result<String, AppError> {
    let email = input.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(AppError::Validation("Please provide a valid email address".into()));
    }
    Ok(email)
}

pub fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

pub fn require_list(field: &str, values: &[String]) -> Result<Vec<String>, AppError> {
    if values.is_empty() {
        return Err(AppError::Validation(format!("At least one {} item is required", field)));
    }
    values
        .iter()
        .map(|value| require_text(field, value))
        .collect()
}
