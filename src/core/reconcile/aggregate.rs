//! Joining orders with their admitted positions and building report rows

use super::filters::{order_passes_filters, position_passes_filters};
use super::policy::ExportPolicy;
use crate::domain::money::{format_amount, round_amount};
use crate::domain::{OrderPosition, ReportingWindow, SalesOrder};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

/// Currency reported when neither the order nor its first position has one
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Column headers of the report, in output order
pub const COLUMNS: [&str; 11] = [
    "Auftragsnummer",
    "Auftragsdatum",
    "Vertriebsweg",
    "Land",
    "PLZ",
    "Anzahl Positionen",
    "Nettobetrag",
    "Shop/Marktplatz",
    "Artikel",
    "Positionen",
    "Währung",
];

/// One report line: an order with its admitted positions folded in
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order_number: String,
    /// ISO date, empty when the order is undated
    pub order_date: String,
    pub channel: String,
    pub country: String,
    pub postal_code: String,
    pub position_count: usize,
    /// Sum of the positions' net amounts, rounded to two places
    pub net_total: Decimal,
    pub marketplace: String,
    /// Distinct article names, sorted, joined by `", "`
    pub articles: String,
    /// Position summaries joined by `" | "`
    pub positions: String,
    pub currency: String,
}

impl OrderRow {
    /// Field values in [`COLUMNS`] order
    pub fn to_record(&self) -> [String; 11] {
        [
            self.order_number.clone(),
            self.order_date.clone(),
            self.channel.clone(),
            self.country.clone(),
            self.postal_code.clone(),
            self.position_count.to_string(),
            format_amount(self.net_total),
            self.marketplace.clone(),
            self.articles.clone(),
            self.positions.clone(),
            self.currency.clone(),
        ]
    }

    fn sort_key(&self) -> (&str, &str) {
        (self.order_date.as_str(), self.order_number.as_str())
    }
}

/// Build the sorted report rows
///
/// Positions are filtered and grouped by order number first; positions
/// without one are dropped. Each admitted order with at least one admitted
/// position yields one row. Rows are ordered by date, then order number.
pub fn prepare_order_rows(
    orders: &[SalesOrder],
    positions: &[OrderPosition],
    window: &ReportingWindow,
    policy: &ExportPolicy,
) -> Vec<OrderRow> {
    let mut positions_by_order: HashMap<&str, Vec<&OrderPosition>> = HashMap::new();
    let mut admitted_positions = 0usize;
    for position in positions {
        if !position_passes_filters(position, window, policy) {
            continue;
        }
        let Some(order_number) = position.order_number.as_deref() else {
            continue;
        };
        positions_by_order.entry(order_number).or_default().push(position);
        admitted_positions += 1;
    }

    let mut rows: Vec<OrderRow> = orders
        .iter()
        .filter(|order| order_passes_filters(order, window, policy))
        .filter_map(|order| {
            let number = order.number.as_deref()?;
            let order_positions = positions_by_order.get(number)?;
            (!order_positions.is_empty()).then(|| build_order_row(order, order_positions))
        })
        .collect();

    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    tracing::debug!(
        orders = orders.len(),
        positions = positions.len(),
        admitted_positions = admitted_positions,
        rows = rows.len(),
        "Reconciled orders with positions"
    );

    rows
}

/// Fold an order and its admitted positions into one row
///
/// `positions` must not be empty; the first position supplies the currency
/// when the order has none.
pub fn build_order_row(order: &SalesOrder, positions: &[&OrderPosition]) -> OrderRow {
    let channel = order.channel.clone().unwrap_or_default();
    let marketplace = order.marketplace.clone().unwrap_or_else(|| channel.clone());
    let currency = order
        .currency
        .clone()
        .or_else(|| positions.first().and_then(|p| p.currency.clone()))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let net_total = sum_net_amounts(positions).unwrap_or_else(|| {
        tracing::warn!(
            order = order.number.as_deref().unwrap_or_default(),
            positions = positions.len(),
            "Net total out of decimal range, saturating"
        );
        positions
            .iter()
            .fold(Decimal::ZERO, |total, p| total.saturating_add(p.net_amount()))
    });
    let articles: BTreeSet<&str> = positions
        .iter()
        .filter_map(|p| p.article_name.as_deref())
        .collect();
    let summaries: Vec<String> = positions.iter().map(|p| position_summary(p)).collect();

    OrderRow {
        order_number: order.number.clone().unwrap_or_default(),
        order_date: order
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        channel,
        country: order.country.clone(),
        postal_code: order.postal_code.clone(),
        position_count: positions.len(),
        net_total: round_amount(net_total),
        marketplace,
        articles: articles.into_iter().collect::<Vec<_>>().join(", "),
        positions: summaries.join(" | "),
        currency,
    }
}

/// Exact sum of the positions' net amounts; `None` when it overflows
fn sum_net_amounts(positions: &[&OrderPosition]) -> Option<Decimal> {
    positions
        .iter()
        .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.net_amount()))
}

/// Human-readable summary of one position
///
/// `"<article no>: <name>, Menge <qty>, Preis <unit>[, Brutto <gross>][, Status <status>]"`
pub fn position_summary(position: &OrderPosition) -> String {
    let mut parts = vec![
        format!(
            "{}: {}",
            position.article_number.as_deref().unwrap_or("-"),
            position.article_name.as_deref().unwrap_or_default()
        ),
        format!("Menge {}", format_amount(position.quantity)),
        format!("Preis {}", format_amount(position.unit_price)),
    ];

    if position.gross_value > Decimal::ZERO {
        parts.push(format!("Brutto {}", format_amount(position.gross_value)));
    }
    if let Some(status) = position.status.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("Status {status}"));
    }

    parts.join(", ")
}
