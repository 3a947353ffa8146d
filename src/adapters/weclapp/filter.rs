//! Filter specification and its translation to weclapp query parameters
//!
//! Filters are written as `field__operator` keys, e.g. `docDate__ge`. A key
//! without an operator suffix means equality. [`build_filter_params`] turns a
//! [`FilterSpec`] into the `filter[<field>][<operator>]` parameters the
//! weclapp API expects.

use chrono::NaiveDate;

/// Separator between field name and operator in a filter key
const OPERATOR_SEPARATOR: &str = "__";

/// Filter comparison operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equality (default)
    Eq,
    /// Greater than or equal
    Ge,
    /// Less than or equal
    Le,
    /// Membership in a list
    In,
    /// Any other operator, passed through verbatim
    Other(String),
}

impl FilterOperator {
    /// Parse an operator suffix; an empty suffix is equality
    pub fn parse(token: &str) -> Self {
        match token {
            "" | "eq" => FilterOperator::Eq,
            "ge" => FilterOperator::Ge,
            "le" => FilterOperator::Le,
            "in" => FilterOperator::In,
            other => FilterOperator::Other(other.to_string()),
        }
    }

    /// Operator segment used in the parameter name
    pub fn as_str(&self) -> &str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ge => "ge",
            FilterOperator::Le => "le",
            FilterOperator::In => "in",
            FilterOperator::Other(other) => other,
        }
    }
}

/// Split a compound key into field and operator at the first `__`
pub fn split_key(key: &str) -> (&str, FilterOperator) {
    match key.split_once(OPERATOR_SEPARATOR) {
        Some((field, operator)) => (field, FilterOperator::parse(operator)),
        None => (key, FilterOperator::Eq),
    }
}

/// Value of a filter entry
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Absent value; the entry is never encoded
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    /// Calendar date, encoded as `YYYY-MM-DD`
    Date(NaiveDate),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Whether the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    /// Text of a scalar value; `None` for nulls and nested lists
    fn scalar_text(&self) -> Option<String> {
        match self {
            FilterValue::Null | FilterValue::List(_) => None,
            FilterValue::Bool(b) => Some(b.to_string()),
            FilterValue::Integer(i) => Some(i.to_string()),
            FilterValue::Text(s) => Some(s.clone()),
            FilterValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::Text(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Integer(i64::from(value))
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::Null, Into::into)
    }
}

/// Ordered mapping from `field[__operator]` keys to values
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use weclapp_export::adapters::weclapp::filter::{build_filter_params, FilterSpec};
///
/// let filters = FilterSpec::new()
///     .with("docDate__ge", NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
///     .with("distributionChannelName__in", vec!["Shop DE netto"])
///     .with("status", None::<String>);
///
/// let params = build_filter_params(&filters);
/// assert_eq!(params, vec![
///     ("filter[docDate][ge]".to_string(), "2025-01-06".to_string()),
///     ("filter[distributionChannelName][in][0]".to_string(), "Shop DE netto".to_string()),
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSpec {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the value for a key, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries, absent values included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the specification has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = FilterSpec::new();
        for (key, value) in iter {
            spec.insert(key, value);
        }
        spec
    }
}

/// Translate a filter specification into query parameters
///
/// - `in` produces `filter[<field>][in][<index>]`, one parameter per item; a
///   scalar counts as a one-element list.
/// - Every other operator produces `filter[<field>][<operator>]`; a list value
///   is sent as repeated parameters with the same name.
/// - Absent values are dropped.
pub fn build_filter_params(filters: &FilterSpec) -> Vec<(String, String)> {
    let mut encoded = Vec::new();

    for (key, value) in filters.iter() {
        if value.is_null() {
            continue;
        }

        let (field, operator) = split_key(key);
        let items: &[FilterValue] = match value {
            FilterValue::List(items) => items,
            scalar => std::slice::from_ref(scalar),
        };

        match operator {
            FilterOperator::In => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(text) = item.scalar_text() {
                        encoded.push((format!("filter[{field}][in][{index}]"), text));
                    }
                }
            }
            operator => {
                let name = format!("filter[{field}][{}]", operator.as_str());
                for item in items {
                    if let Some(text) = item.scalar_text() {
                        encoded.push((name.clone(), text));
                    }
                }
            }
        }
    }

    encoded
}
