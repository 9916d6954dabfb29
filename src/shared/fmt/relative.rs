//! Human-readable "time elapsed from now" strings.
//!
//! Thresholds follow the common relative-time convention used by dashboard
//! frontends: seconds collapse to "a few seconds", then minutes up to 45, hours up
//! to 22, days up to 26, months up to 11, then years.

use chrono::{DateTime, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const MONTH: f64 = DAY * 30.436875;
const YEAR: f64 = DAY * 365.2425;

/// Describe `then` relative to `now`, e.g. `"5 minutes ago"` or `"in 2 hours"`.
pub fn from_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then).num_seconds();
    let phrase = humanize(delta.unsigned_abs() as f64);

    if delta < 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

/// Shorthand for [`from_now`] against the current wall clock.
pub fn from_now_utc(then: DateTime<Utc>) -> String {
    from_now(then, Utc::now())
}

fn humanize(seconds: f64) -> String {
    let minutes = (seconds / MINUTE).round() as u64;
    let hours = (seconds / HOUR).round() as u64;
    let days = (seconds / DAY).round() as u64;
    let months = (seconds / MONTH).round() as u64;
    let years = (seconds / YEAR).round() as u64;

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if minutes <= 1 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if hours <= 1 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{} hours", hours)
    } else if days <= 1 {
        "a day".to_string()
    } else if days < 26 {
        format!("{} days", days)
    } else if months <= 1 {
        "a month".to_string()
    } else if months < 11 {
        format!("{} months", months)
    } else if years <= 1 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    }
}
