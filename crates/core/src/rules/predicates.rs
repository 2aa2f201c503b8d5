//! Text and threshold predicates shared by the profile rules.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::profile::LtvSegment;

pub const HIGH_VALUE_FLOOR: i64 = 150;
pub const MEDIUM_VALUE_FLOOR: i64 = 75;
pub const CHURN_AFTER_DAYS: u64 = 180;

static DAYS_AGO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s+days\s+ago").expect("days-ago pattern is valid"));

/// Buckets an average order value. Each band includes its lower bound.
pub fn segment_for_order_value(average_order_value: Option<Decimal>) -> LtvSegment {
    match average_order_value {
        None => LtvSegment::Unknown,
        Some(value) if value >= Decimal::from(HIGH_VALUE_FLOOR) => LtvSegment::High,
        Some(value) if value >= Decimal::from(MEDIUM_VALUE_FLOOR) => LtvSegment::Medium,
        Some(_) => LtvSegment::Low,
    }
}

/// `>` stands in for phrases like "> 20% off".
pub fn is_discount_phrase(text: &str) -> bool {
    let normalized = text.to_lowercase();
    normalized.contains("high") || normalized.contains('>')
}

pub fn is_camping_item(item: &str) -> bool {
    let normalized = item.to_lowercase();
    normalized.contains("camp") || normalized.contains("tent")
}

pub fn mentions_camping(item: &str) -> bool {
    item.to_lowercase().contains("camp")
}

pub fn is_outdoor_footwear(name: &str) -> bool {
    let normalized = name.to_lowercase();
    normalized.contains("boot") || normalized.contains("hiking")
}

/// Extracts `N` from text starting with "`N` days ago".
///
/// Only the prefix has to match. A count too large for `u64` saturates.
pub fn parse_days_ago(text: &str) -> Option<u64> {
    let captures = DAYS_AGO_PATTERN.captures(text)?;
    let digits = captures.get(1)?.as_str();
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}
