//! Year mention extraction.
//!
//! A single pattern with two alternatives: a standalone 4-digit year, or a
//! range `YEAR - YEAR|present|now` where the separator is a hyphen, an en-dash
//! or the word "to". The standalone alternative is tried first, so a range
//! written with spaces yields its endpoints as two separate matches; the range
//! alternative only fires where the first year has no word boundary after it
//! (`2015to2019`). Mentions are never deduplicated. Only ASCII digits form a
//! year.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(19[0-9]{2}|20[0-9]{2})\b|\b(19[0-9]{2}|20[0-9]{2})\s*(?:-|–|to)\s*(19[0-9]{2}|20[0-9]{2}|present|now)\b",
    )
    .expect("year pattern is valid")
});

/// Earliest year accepted as a real mention.
pub const MIN_YEAR: i32 = 1950;

/// Extracts year mentions using the current UTC year as the upper bound.
pub fn extract_years(raw_text: &str) -> Vec<i32> {
    extract_years_as_of(raw_text, Utc::now().year())
}

/// Extracts every year mention within `[MIN_YEAR, current_year + 1]`, in
/// discovery order. Years outside the window (old dates, phone-number
/// fragments) are dropped silently.
pub fn extract_years_as_of(raw_text: &str, current_year: i32) -> Vec<i32> {
    let max_year = current_year + 1;
    let mut years = Vec::new();

    for caps in YEAR_RE.captures_iter(raw_text) {
        for group in caps.iter().skip(1).flatten() {
            let Ok(year) = group.as_str().parse::<i32>() else {
                // "present" / "now"
                continue;
            };
            if (MIN_YEAR..=max_year).contains(&year) {
                years.push(year);
            }
        }
    }

    years
}

/// Year → mention count, ascending by year.
pub fn year_counts(years: &[i32]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for &year in years {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}
