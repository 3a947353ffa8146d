//! Admission predicates for orders and positions
//!
//! Both predicates are pure and applied exactly once per record by
//! [`prepare_order_rows`](super::aggregate::prepare_order_rows).

use super::policy::ExportPolicy;
use crate::domain::{OrderPosition, ReportingWindow, SalesOrder};

/// Article identifiers that stand for "no article"
const ARTICLE_PLACEHOLDERS: [&str; 2] = ["", "-"];

/// Whether an order is eligible for the report
///
/// The channel must be on the allow-list and the date, when present, must lie
/// within the window.
pub fn order_passes_filters(order: &SalesOrder, window: &ReportingWindow, policy: &ExportPolicy) -> bool {
    policy.allows_channel(order.channel.as_deref()) && window.admits(order.date)
}

/// Whether a position is admitted into its order's row
///
/// A position must:
/// - belong to an allowed channel
/// - carry a completed status (or none at all)
/// - have a real article identifier
/// - not name an excluded article
/// - cost at least the minimum unit price
/// - be dated within the window, when dated
pub fn position_passes_filters(
    position: &OrderPosition,
    window: &ReportingWindow,
    policy: &ExportPolicy,
) -> bool {
    if !policy.allows_channel(position.channel.as_deref()) {
        return false;
    }

    if !policy.is_completed_status(position.status.as_deref()) {
        return false;
    }

    let has_article = position
        .article_number
        .as_deref()
        .is_some_and(|number| !ARTICLE_PLACEHOLDERS.contains(&number.trim()));
    if !has_article {
        return false;
    }

    let article_name = position
        .article_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    if !policy.allows_article_name(article_name) {
        return false;
    }

    if position.unit_price < policy.min_unit_price {
        return false;
    }

    window.admits(position.date)
}
