use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DecodeError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsingEvent {
    pub item: String,
    /// View count as sent; fractional values are kept so `> 0` stays numeric.
    pub count: Decimal,
}

impl BrowsingEvent {
    pub fn new(item: impl Into<String>, count: impl Into<Decimal>) -> Self {
        Self { item: item.into(), count: count.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub name: String,
}

impl Purchase {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Recency marker for the customer's most recent purchase.
///
/// `Other` holds any non-null value that is not a string; it counts as present
/// but can never be parsed into a day count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LastPurchase {
    #[default]
    Absent,
    Text(String),
    Other,
}

impl LastPurchase {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Absent | Self::Other => None,
        }
    }
}

/// Customer input with every field optional.
///
/// `None` on a sequence field means the key was absent (or null) in the raw
/// record; `Some(vec![])` means it was present and empty. Both count as missing
/// data, but only absence changes how churn is judged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerRecord {
    pub average_order_value: Option<Decimal>,
    pub ltv_segment: Option<String>,
    pub discount_sensitivity: Option<String>,
    pub browsing_events: Option<Vec<BrowsingEvent>>,
    pub brand_affinity: Option<Vec<String>>,
    pub last_purchase: LastPurchase,
    pub purchases: Option<Vec<Purchase>>,
}

impl CustomerRecord {
    pub fn from_json_str(raw: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|error| DecodeError::InvalidJson(error.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Resolves a raw JSON object into a record.
    ///
    /// Keys may use the short (`aov`, `browsing`) or long
    /// (`average_order_value`, `browsing_events`) spelling. A field holding a
    /// JSON type the rules cannot use is treated as absent, except
    /// `last_purchase` which keeps its presence as [`LastPurchase::Other`].
    pub fn from_json_value(value: &Value) -> Result<Self, DecodeError> {
        let object = value
            .as_object()
            .ok_or_else(|| DecodeError::NotAnObject { found: json_type_name(value) })?;

        Ok(Self {
            average_order_value: field(object, &["aov", "average_order_value"])
                .and_then(Value::as_number)
                .map(decimal_from_number),
            ltv_segment: field(object, &["ltv_segment"]).and_then(string_value),
            discount_sensitivity: field(object, &["discount_sensitivity"]).and_then(string_value),
            browsing_events: field(object, &["browsing", "browsing_events"])
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(browsing_event).collect()),
            brand_affinity: field(object, &["brand_affinity"])
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(brand_label).collect()),
            last_purchase: match field(object, &["last_purchase"]) {
                None => LastPurchase::Absent,
                Some(Value::String(text)) => LastPurchase::Text(text.clone()),
                Some(_) => LastPurchase::Other,
            },
            purchases: field(object, &["purchases"])
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(purchase).collect()),
        })
    }
}

fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|key| object.get(*key)).find(|value| !value.is_null())
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn browsing_event(entry: &Value) -> BrowsingEvent {
    let item = entry.get("item").and_then(Value::as_str).unwrap_or_default();
    let count = entry
        .get("count")
        .and_then(Value::as_number)
        .map(decimal_from_number)
        .unwrap_or_default();
    BrowsingEvent::new(item, count)
}

fn purchase(entry: &Value) -> Purchase {
    Purchase::new(entry.get("name").and_then(Value::as_str).unwrap_or_default())
}

fn brand_label(entry: &Value) -> String {
    match entry {
        Value::String(label) => label.clone(),
        other => other.to_string(),
    }
}

fn decimal_from_number(number: &serde_json::Number) -> Decimal {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or_else(|_| saturate(number.as_f64().unwrap_or_default()))
}

// Values outside the decimal range only need to land on the right side of the
// segment thresholds.
fn saturate(value: f64) -> Decimal {
    if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
