//! Typed sales-order and order-position records
//!
//! Raw weclapp entities are resolved once, at ingestion, into [`SalesOrder`]
//! and [`OrderPosition`]. Filtering and aggregation only ever see these types.

use crate::domain::fields::{self, RawRecord};
use crate::domain::money::round_amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

/// A sales order header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesOrder {
    /// Order number
    pub number: Option<String>,

    /// Order (document) date
    pub date: Option<NaiveDate>,

    /// Distribution channel name
    pub channel: Option<String>,

    /// Destination country code
    pub country: String,

    /// Destination postal code
    pub postal_code: String,

    /// Shop or marketplace label
    pub marketplace: Option<String>,

    /// Currency code
    pub currency: Option<String>,
}

impl SalesOrder {
    /// Resolve an order from a raw record
    pub fn from_raw(record: &RawRecord) -> Self {
        Self {
            number: fields::ORDER_NUMBER.first_text(record),
            date: fields::DOCUMENT_DATE.first_date(record),
            channel: fields::DISTRIBUTION_CHANNEL.first_text(record),
            country: fields::COUNTRY.first_text(record).unwrap_or_default(),
            postal_code: fields::POSTAL_CODE.first_text(record).unwrap_or_default(),
            marketplace: fields::MARKETPLACE.first_text(record),
            currency: fields::CURRENCY.first_text(record),
        }
    }

    /// Resolve an order from any JSON value
    ///
    /// Non-object values resolve to an order with no fields set.
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_raw).unwrap_or_default()
    }
}

/// A single sales-order position (order line)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPosition {
    /// Number of the order this position belongs to
    pub order_number: Option<String>,

    /// Document date
    pub date: Option<NaiveDate>,

    /// Distribution channel name
    pub channel: Option<String>,

    /// Status label as delivered
    pub status: Option<String>,

    /// Article identifier
    pub article_number: Option<String>,

    /// Article name
    pub article_name: Option<String>,

    /// Resolved unit price
    pub unit_price: Decimal,

    /// Resolved quantity
    pub quantity: Decimal,

    /// Explicit net value (zero when absent)
    pub net_value: Decimal,

    /// Gross value (zero when absent)
    pub gross_value: Decimal,

    /// Currency code
    pub currency: Option<String>,
}

impl OrderPosition {
    /// Resolve a position from a raw record
    ///
    /// The unit price is the first strictly positive price candidate. Without
    /// one it is derived from `net value / quantity`, rounded to two places.
    pub fn from_raw(record: &RawRecord) -> Self {
        let quantity = fields::QUANTITY
            .first_positive_decimal(record)
            .unwrap_or(Decimal::ZERO);
        let net_value = fields::NET_VALUE.first_decimal(record);
        let unit_price = fields::UNIT_PRICE
            .first_positive_decimal(record)
            .unwrap_or_else(|| derive_unit_price(net_value, quantity));

        Self {
            order_number: fields::ORDER_NUMBER.first_text(record),
            date: fields::DOCUMENT_DATE.first_date(record),
            channel: fields::DISTRIBUTION_CHANNEL.first_text(record),
            status: fields::STATUS.first_text(record),
            article_number: fields::ARTICLE_NUMBER.first_text(record),
            article_name: fields::ARTICLE_NAME.first_text(record),
            unit_price,
            quantity,
            net_value,
            gross_value: fields::GROSS_VALUE.first_decimal(record),
            currency: fields::CURRENCY.first_text(record),
        }
    }

    /// Resolve a position from any JSON value
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_raw).unwrap_or_default()
    }

    /// Net amount contributed to the order total
    ///
    /// The explicit net value wins; when it is zero the amount is
    /// `unit price × quantity`.
    pub fn net_amount(&self) -> Decimal {
        if self.net_value.is_zero() {
            self.unit_price
                .checked_mul(self.quantity)
                .unwrap_or(Decimal::ZERO)
        } else {
            self.net_value
        }
    }
}

fn derive_unit_price(net_value: Decimal, quantity: Decimal) -> Decimal {
    if quantity > Decimal::ZERO {
        net_value
            .checked_div(quantity)
            .map(round_amount)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}
