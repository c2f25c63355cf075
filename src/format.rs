//! Display helpers for movie data
//!
//! Turns raw TMDB values (minutes, ratings, ISO dates, dollar amounts) into
//! the short strings shown in listings.

use chrono::{Datelike, NaiveDate};

/// Formats a runtime in minutes as hours and minutes.
///
/// # Example
///
/// ```
/// use reelscout::format::format_runtime;
///
/// assert_eq!(format_runtime(142), "2h 22m");
/// assert_eq!(format_runtime(45), "0h 45m");
/// ```
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a vote average with one decimal place; NaN becomes `0.0`
pub fn format_rating(rating: f64) -> String {
    if rating.is_nan() {
        return "0.0".to_string();
    }
    format!("{:.1}", rating)
}

/// Shortens `text` to at most `max_len` characters, ending in `...`
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if max_len <= 3 {
        return "...".to_string();
    }
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Year part of a `YYYY-MM-DD` release date, or an empty string
pub fn year_from_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.year().to_string())
        .unwrap_or_default()
}

/// Long-form date such as `January 15, 2023`; `TBA` when blank or invalid
pub fn format_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "TBA".to_string())
}

/// Whole-dollar amount with thousands separators, e.g. `$10,000,000`
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

/// Coarse bucket for a vote average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    /// 7.0 and above
    High,
    /// 5.0 up to 7.0
    Medium,
    /// Below 5.0
    Low,
}

impl RatingTier {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 7.0 {
            RatingTier::High
        } else if rating >= 5.0 {
            RatingTier::Medium
        } else {
            RatingTier::Low
        }
    }

    /// Single-character marker used in list output
    pub fn marker(&self) -> char {
        match self {
            RatingTier::High => '+',
            RatingTier::Medium => '~',
            RatingTier::Low => '-',
        }
    }
}
