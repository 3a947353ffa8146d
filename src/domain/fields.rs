//! Candidate-key resolution for upstream records
//!
//! weclapp field names differ between resources and API versions. Each logical
//! attribute is described by an ordered list of candidate keys, and a record is
//! resolved by taking the first candidate that is present and non-empty.
//! All candidate lists live here so the rest of the crate never performs ad hoc
//! lookups on raw records.

use crate::domain::money::to_decimal;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Untyped record as delivered by the weclapp API
pub type RawRecord = Map<String, Value>;

/// Ordered candidate keys for one logical attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateKeys(&'static [&'static str]);

impl CandidateKeys {
    /// Create a candidate list
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self(keys)
    }

    /// First present, non-empty raw value
    pub fn first_value<'a>(&self, record: &'a RawRecord) -> Option<&'a Value> {
        self.0
            .iter()
            .filter_map(|key| record.get(*key))
            .find(|value| !is_empty(value))
    }

    /// First present, non-empty value rendered as text
    ///
    /// Nested objects contribute their `name` (or `value`) member.
    pub fn first_text(&self, record: &RawRecord) -> Option<String> {
        self.0
            .iter()
            .filter_map(|key| record.get(*key))
            .filter(|value| !is_empty(value))
            .find_map(value_text)
    }

    /// First candidate that parses as a calendar date
    pub fn first_date(&self, record: &RawRecord) -> Option<NaiveDate> {
        self.0
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(parse_date)
    }

    /// Decimal of the first present, non-empty value (zero when none or unparseable)
    pub fn first_decimal(&self, record: &RawRecord) -> Decimal {
        to_decimal(self.first_value(record))
    }

    /// First candidate whose decimal value is strictly positive
    pub fn first_positive_decimal(&self, record: &RawRecord) -> Option<Decimal> {
        self.0
            .iter()
            .map(|key| to_decimal(record.get(*key)))
            .find(|amount| *amount > Decimal::ZERO)
    }
}

pub const ORDER_NUMBER: CandidateKeys =
    CandidateKeys::new(&["orderNumber", "number", "documentNumber", "salesOrderNumber"]);

pub const DOCUMENT_DATE: CandidateKeys =
    CandidateKeys::new(&["orderDate", "docDate", "createdDate", "deliveryDate"]);

pub const DISTRIBUTION_CHANNEL: CandidateKeys = CandidateKeys::new(&[
    "distributionChannelName",
    "salesChannelName",
    "shopName",
    "marketplace",
    "marketplaceName",
]);

pub const STATUS: CandidateKeys = CandidateKeys::new(&["status", "statusName"]);

pub const ARTICLE_NUMBER: CandidateKeys =
    CandidateKeys::new(&["articleNumber", "productNumber", "sku", "itemNumber"]);

pub const ARTICLE_NAME: CandidateKeys = CandidateKeys::new(&["articleName", "productName"]);

pub const UNIT_PRICE: CandidateKeys =
    CandidateKeys::new(&["unitPriceNet", "unitPrice", "unitPriceGross", "price"]);

pub const QUANTITY: CandidateKeys =
    CandidateKeys::new(&["quantity", "orderedQuantity", "amount"]);

pub const NET_VALUE: CandidateKeys = CandidateKeys::new(&["netValue", "netAmount"]);

pub const GROSS_VALUE: CandidateKeys = CandidateKeys::new(&["grossValue", "grossAmount"]);

pub const CURRENCY: CandidateKeys = CandidateKeys::new(&["currency"]);

pub const COUNTRY: CandidateKeys = CandidateKeys::new(&["shipToCountry", "country"]);

pub const POSTAL_CODE: CandidateKeys = CandidateKeys::new(&["shipToZip", "zip"]);

pub const MARKETPLACE: CandidateKeys = CandidateKeys::new(&[
    "marketplace",
    "marketplaceName",
    "shopName",
    "salesChannelName",
]);

/// Whether a raw value counts as absent
///
/// `null`, `false`, zero, empty strings and empty collections are all absent.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Object(map) => ["name", "value"]
            .iter()
            .filter_map(|key| map.get(*key))
            .filter(|nested| !is_empty(nested))
            .find_map(value_text),
        _ => None,
    }
}

/// Parse an upstream date value
///
/// Accepts `YYYY-MM-DD`, `YYYYMMDD` and ISO datetimes (the time part is
/// discarded). Anything else is treated as absent.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let date_part = text.split('T').next().unwrap_or_default();
    if date_part.is_empty() {
        return None;
    }
    NaiveDate::from_str(date_part)
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y%m%d"))
        .ok()
}
