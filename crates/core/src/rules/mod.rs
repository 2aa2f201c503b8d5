pub mod batch;
pub mod predicates;

use rust_decimal::Decimal;

use crate::domain::customer::{BrowsingEvent, CustomerRecord, LastPurchase};
use crate::domain::profile::{CustomerProfile, LtvSegment, CAMPING_TENTS};

use self::predicates::{
    is_camping_item, is_discount_phrase, is_outdoor_footwear, mentions_camping, parse_days_ago,
    segment_for_order_value, CHURN_AFTER_DAYS,
};

/// Derives a [`CustomerProfile`] from a [`CustomerRecord`] in one pass.
///
/// Generation is total: every rule falls back to a defined value when its
/// inputs are absent, empty or unparseable.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileGenerator;

impl ProfileGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, record: &CustomerRecord) -> CustomerProfile {
        let profile = CustomerProfile {
            ltv_segment: ltv_segment(record),
            discount_sensitive: discount_sensitive(record),
            recommendations: recommendations(record),
            loyalty_flag: loyalty_flag(record),
            churn_risk: churn_risk(record),
            cross_sell_opportunity: cross_sell_opportunity(record),
            needs_more_data: needs_more_data(record),
        };

        tracing::debug!(
            event_name = "profile.generated",
            ltv_segment = %profile.ltv_segment,
            discount_sensitive = profile.discount_sensitive,
            recommendation_count = profile.recommendations.len(),
            loyalty_flag = profile.loyalty_flag,
            churn_risk = profile.churn_risk,
            cross_sell_opportunity = profile.cross_sell_opportunity,
            needs_more_data = profile.needs_more_data,
            "customer profile generated"
        );

        profile
    }
}

pub fn generate_profile(record: &CustomerRecord) -> CustomerProfile {
    ProfileGenerator::new().generate(record)
}

fn ltv_segment(record: &CustomerRecord) -> LtvSegment {
    match record.ltv_segment.as_deref() {
        Some(assigned) if !assigned.is_empty() => LtvSegment::from(assigned.to_string()),
        _ => segment_for_order_value(record.average_order_value),
    }
}

fn discount_sensitive(record: &CustomerRecord) -> bool {
    is_discount_phrase(record.discount_sensitivity.as_deref().unwrap_or_default())
}

fn recommendations(record: &CustomerRecord) -> Vec<String> {
    browsing(record)
        .iter()
        .filter(|event| is_camping_item(&event.item) && event.count > Decimal::ZERO)
        .map(|_| CAMPING_TENTS.to_string())
        .collect()
}

fn loyalty_flag(record: &CustomerRecord) -> bool {
    record.brand_affinity.as_ref().is_some_and(|brands| brands.len() == 1)
}

fn churn_risk(record: &CustomerRecord) -> bool {
    let days = record.last_purchase.as_text().and_then(parse_days_ago);

    match (days, &record.last_purchase) {
        (Some(days), _) => days > CHURN_AFTER_DAYS,
        (None, LastPurchase::Absent) => !has_entries(&record.purchases),
        // Present but unparseable carries no recency signal and is not flagged.
        // TODO: confirm with the domain owner whether this should behave like absence.
        (None, LastPurchase::Text(_) | LastPurchase::Other) => false,
    }
}

fn cross_sell_opportunity(record: &CustomerRecord) -> bool {
    let bought_footwear = record
        .purchases
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|purchase| is_outdoor_footwear(&purchase.name));

    bought_footwear && browsing(record).iter().any(|event| mentions_camping(&event.item))
}

/// `ltv_segment` is an optional override and does not count toward missing data.
fn needs_more_data(record: &CustomerRecord) -> bool {
    !has_entries(&record.purchases)
        || last_purchase_missing(&record.last_purchase)
        || record.average_order_value.is_none()
        || !has_entries(&record.browsing_events)
        || !has_entries(&record.brand_affinity)
        || record.discount_sensitivity.as_deref().map_or(true, str::is_empty)
}

fn last_purchase_missing(last_purchase: &LastPurchase) -> bool {
    match last_purchase {
        LastPurchase::Absent => true,
        LastPurchase::Text(text) => text.is_empty(),
        LastPurchase::Other => false,
    }
}

fn has_entries<T>(entries: &Option<Vec<T>>) -> bool {
    entries.as_ref().is_some_and(|entries| !entries.is_empty())
}

fn browsing(record: &CustomerRecord) -> &[BrowsingEvent] {
    record.browsing_events.as_deref().unwrap_or_default()
}
