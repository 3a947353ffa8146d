//! Paginated weclapp collection client
//!
//! [`WeclappClient::iter_entities`] turns a resource name and a filter
//! specification into a lazy stream of raw JSON entities. Each page is
//! requested only when the consumer pulls past the previous one.

use super::filter::{build_filter_params, FilterSpec};
use super::transport::{HttpTransport, ResponseBody, Transport};
use crate::config::{secret_string, SecretString, WeclappConfig};
use crate::domain::errors::ERROR_BODY_LIMIT;
use crate::domain::{OrderPosition, ReportError, Result, SalesOrder, WeclappError};
use chrono::NaiveDate;
use futures::stream::{self, Stream, TryStreamExt};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Resource name of sales orders
pub const ORDER_RESOURCE: &str = "salesOrder";

/// Resource name of sales-order positions
pub const POSITION_RESOURCE: &str = "salesOrderPosition";

/// Keys probed, in order, for the entity array of a page
const ENTITY_KEYS: [&str; 3] = ["result", "entities", "rows"];

/// Top-level keys probed for the total page count
const TOTAL_PAGE_KEYS: [&str; 2] = ["totalPages", "totalpages"];

/// weclapp REST client
///
/// # Example
///
/// ```no_run
/// use futures::TryStreamExt;
/// use weclapp_export::adapters::weclapp::{FilterSpec, WeclappClient};
///
/// # async fn example() -> weclapp_export::domain::Result<()> {
/// let client = WeclappClient::from_env()?;
/// let filters = FilterSpec::new().with("status", "abgeschlossen");
/// let positions: Vec<serde_json::Value> = client
///     .iter_entities("salesOrderPosition", Some(&filters), None)
///     .try_collect()
///     .await?;
/// println!("{} positions", positions.len());
/// # Ok(())
/// # }
/// ```
pub struct WeclappClient {
    /// API base URL without trailing slash
    base_url: String,

    /// Per-request timeout
    timeout: Duration,

    /// Entities requested per page
    page_size: u32,

    /// Request/response seam
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for WeclappClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeclappClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl WeclappClient {
    /// Create a client talking HTTP through reqwest
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL or the token is missing.
    pub fn new(config: &WeclappConfig) -> Result<Self> {
        let token = require_token(config)?;
        let transport = HttpTransport::new(token)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of an arbitrary transport
    ///
    /// The token is still required, even though the transport decides how
    /// (or whether) it is sent.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL or the token is missing.
    pub fn with_transport(config: &WeclappConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ReportError::Configuration(
                "weclapp base_url is required".to_string(),
            ));
        }
        require_token(config)?;

        Ok(Self {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
            page_size: config.page_size,
            transport,
        })
    }

    /// Create a client from `WECLAPP_BASE_URL` and `WECLAPP_API_TOKEN`
    ///
    /// Timeout and page size take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("WECLAPP_BASE_URL").unwrap_or_default();
        let token = std::env::var("WECLAPP_API_TOKEN").unwrap_or_default();
        if base_url.trim().is_empty() || token.trim().is_empty() {
            return Err(ReportError::Configuration(
                "WECLAPP_BASE_URL and WECLAPP_API_TOKEN must be set in the environment"
                    .to_string(),
            ));
        }

        let config = WeclappConfig {
            base_url,
            api_token: Some(secret_string(token)),
            ..Default::default()
        };
        Self::new(&config)
    }

    /// Stream every entity of `resource`, page by page
    ///
    /// Each request carries `pageSize`, the extra parameters, the encoded
    /// filters and `page` (starting at 1). The stream ends after the page
    /// whose number reaches the declared total page count. It stops at the
    /// first error.
    pub fn iter_entities<'a>(
        &'a self,
        resource: &'a str,
        filters: Option<&'a FilterSpec>,
        extra_params: Option<&'a [(String, String)]>,
    ) -> impl Stream<Item = Result<Value>> + 'a {
        let url = self.resource_url(resource);

        let mut params = vec![("pageSize".to_string(), self.page_size.to_string())];
        for (name, value) in extra_params.unwrap_or_default() {
            merge_param(&mut params, name, value.clone());
        }
        if let Some(filters) = filters {
            apply_filter_params(&mut params, build_filter_params(filters));
        }

        stream::try_unfold(Some(1u32), move |next_page| {
            let url = url.clone();
            let mut query = params.clone();
            async move {
                let Some(page) = next_page else {
                    return Ok::<_, ReportError>(None);
                };

                merge_param(&mut query, "page", page.to_string());
                let payload = self.get_page(&url, &query).await?;
                let total_pages = extract_total_pages(&payload);
                let entities = extract_entities(payload)?;

                tracing::debug!(
                    resource = resource,
                    page = page,
                    total_pages = total_pages,
                    entities = entities.len(),
                    "Fetched page"
                );

                let next = (page < total_pages).then_some(page + 1);
                Ok(Some((entities, next)))
            }
        })
        .map_ok(|entities| stream::iter(entities.into_iter().map(Ok::<Value, ReportError>)))
        .try_flatten()
    }

    /// Fetch all sales orders dated within `[start, end]` on the given channels
    ///
    /// # Errors
    ///
    /// Returns the first transport or response error.
    pub async fn fetch_orders(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        channels: &[String],
    ) -> Result<Vec<SalesOrder>> {
        let filters = window_filters(start, end, channels);
        let records: Vec<Value> = self
            .iter_entities(ORDER_RESOURCE, Some(&filters), None)
            .try_collect()
            .await?;

        tracing::info!(count = records.len(), %start, %end, "Fetched sales orders");
        Ok(records.iter().map(SalesOrder::from_value).collect())
    }

    /// Fetch all sales-order positions dated within `[start, end]` on the
    /// given channels, optionally restricted to one status
    ///
    /// # Errors
    ///
    /// Returns the first transport or response error.
    pub async fn fetch_positions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        channels: &[String],
        status: Option<&str>,
    ) -> Result<Vec<OrderPosition>> {
        let mut filters = window_filters(start, end, channels);
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            filters.insert("status__eq", status);
        }

        let records: Vec<Value> = self
            .iter_entities(POSITION_RESOURCE, Some(&filters), None)
            .try_collect()
            .await?;

        tracing::info!(count = records.len(), %start, %end, "Fetched sales-order positions");
        Ok(records.iter().map(OrderPosition::from_value).collect())
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
    }

    async fn get_page(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        let response = self
            .transport
            .request(Method::GET, url, query, self.timeout)
            .await?;

        if response.status >= 400 {
            let body = response.body.text();
            tracing::warn!(status = response.status, url = url, "weclapp request failed");
            return Err(WeclappError::from_status(response.status, url, &body).into());
        }

        match response.body {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Text(text) => {
                let snippet: String = text.chars().take(ERROR_BODY_LIMIT).collect();
                Err(WeclappError::InvalidResponse(format!(
                    "Response from {url} is not JSON: {snippet}"
                ))
                .into())
            }
        }
    }
}

fn require_token(config: &WeclappConfig) -> Result<&SecretString> {
    use secrecy::ExposeSecret;

    match &config.api_token {
        Some(token) if !token.expose_secret().is_empty() => Ok(token),
        _ => Err(ReportError::Configuration(
            "weclapp api_token is required".to_string(),
        )),
    }
}

/// Date-range and channel filters shared by both fetch helpers
fn window_filters(start: NaiveDate, end: NaiveDate, channels: &[String]) -> FilterSpec {
    FilterSpec::new()
        .with("docDate__ge", start)
        .with("docDate__le", end)
        .with("distributionChannelName__in", channels.to_vec())
}

/// Set `name` to `value`, replacing an earlier parameter of the same name
fn merge_param(params: &mut Vec<(String, String)>, name: &str, value: String) {
    match params.iter_mut().find(|(existing, _)| existing == name) {
        Some(param) => param.1 = value,
        None => params.push((name.to_string(), value)),
    }
}

/// Append filter parameters, replacing earlier parameters of the same name
///
/// Repeated names within `filter_params` are all kept.
fn apply_filter_params(params: &mut Vec<(String, String)>, filter_params: Vec<(String, String)>) {
    params.retain(|(name, _)| !filter_params.iter().any(|(filter, _)| filter == name));
    params.extend(filter_params);
}

/// Entities carried by one page
///
/// The first of `result`, `entities`, `rows` holding an array wins. Any other
/// JSON object is a single-entity response.
fn extract_entities(payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Object(mut map) => {
            for key in ENTITY_KEYS {
                if let Some(Value::Array(_)) = map.get(key) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return Ok(items);
                    }
                }
            }
            Ok(vec![Value::Object(map)])
        }
        other => Err(WeclappError::InvalidResponse(format!(
            "Unexpected response payload structure: expected a JSON object, got {}",
            json_kind(&other)
        ))
        .into()),
    }
}

/// Declared total page count, 1 when absent or unreadable
fn extract_total_pages(payload: &Value) -> u32 {
    TOTAL_PAGE_KEYS
        .iter()
        .filter_map(|key| payload.get(*key))
        .chain(payload.get("meta").and_then(|meta| meta.get("totalPages")))
        .find_map(page_count)
        .unwrap_or(1)
}

fn page_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::weclapp::transport::TransportResponse;
    use async_trait::async_trait;
    use futures::StreamExt;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport replaying canned responses and recording every request
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<TransportResponse>>>,
        requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<TransportResponse>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.requests.lock().unwrap().clone()
        }

        fn pages_requested(&self) -> Vec<String> {
            self.requests()
                .into_iter()
                .filter_map(|(_, query)| {
                    query
                        .into_iter()
                        .find(|(name, _)| name == "page")
                        .map(|(_, value)| value)
                })
                .collect()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn request(
            &self,
            _method: Method,
            url: &str,
            query: &[(String, String)],
            _timeout: Duration,
        ) -> Result<TransportResponse> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), query.to_vec()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ReportError::Other("no scripted response left".to_string())))
        }
    }

    fn config() -> WeclappConfig {
        WeclappConfig {
            base_url: "https://tenant.weclapp.com/webapp/api/v1/".to_string(),
            api_token: Some(secret_string("token".to_string())),
            page_size: 2,
            ..Default::default()
        }
    }

    fn page(ids: &[u32], total_pages: u32) -> Result<TransportResponse> {
        let result: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
        Ok(TransportResponse::json(
            200,
            json!({"result": result, "totalPages": total_pages}),
        ))
    }

    #[test]
    fn test_missing_base_url_is_configuration_error() {
        let mut config = config();
        config.base_url = "  ".to_string();
        let result = WeclappClient::with_transport(&config, ScriptedTransport::new(vec![]));
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let mut config = config();
        config.api_token = None;
        let result = WeclappClient::with_transport(&config, ScriptedTransport::new(vec![]));
        assert!(matches!(result, Err(ReportError::Configuration(_))));

        config.api_token = Some(secret_string(String::new()));
        assert!(WeclappClient::new(&config).is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = WeclappClient::with_transport(&config(), ScriptedTransport::new(vec![])).unwrap();
        assert_eq!(client.resource_url("/salesOrder"), "https://tenant.weclapp.com/webapp/api/v1/salesOrder");
    }

    #[tokio::test]
    async fn test_iterates_all_declared_pages() {
        let transport = ScriptedTransport::new(vec![page(&[1, 2], 3), page(&[3, 4], 3), page(&[5], 3)]);
        let client = WeclappClient::with_transport(&config(), transport.clone()).unwrap();

        let entities: Vec<Value> = client
            .iter_entities(ORDER_RESOURCE, None, None)
            .try_collect()
            .await
            .unwrap();

        let ids: Vec<u64> = entities.iter().filter_map(|e| e["id"].as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(transport.pages_requested(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_pages_are_fetched_lazily() {
        let transport = ScriptedTransport::new(vec![page(&[1, 2], 3), page(&[3], 3), page(&[4], 3)]);
        let client = WeclappClient::with_transport(&config(), transport.clone()).unwrap();

        let mut stream = Box::pin(client.iter_entities(ORDER_RESOURCE, None, None));
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(transport.requests().len(), 1);

        stream.next().await.unwrap().unwrap();
        assert_eq!(transport.requests().len(), 1);

        stream.next().await.unwrap().unwrap();
        assert_eq!(transport.requests().len(), 2);

        drop(stream);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let transport = ScriptedTransport::new(vec![page(&[1], 1)]);
        let client = WeclappClient::with_transport(&config(), transport.clone()).unwrap();
        let filters = FilterSpec::new()
            .with("docDate__ge", NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
            .with("distributionChannelName__in", vec!["Shop DE netto"]);
        let extra = vec![
            ("sort".to_string(), "orderNumber".to_string()),
            ("pageSize".to_string(), "500".to_string()),
        ];

        let _: Vec<Value> = client
            .iter_entities(POSITION_RESOURCE, Some(&filters), Some(&extra))
            .try_collect()
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let (url, query) = &requests[0];
        assert_eq!(url, "https://tenant.weclapp.com/webapp/api/v1/salesOrderPosition");

        let expected: Vec<(String, String)> = [
            ("pageSize", "500"),
            ("sort", "orderNumber"),
            ("filter[docDate][ge]", "2025-01-06"),
            ("filter[distributionChannelName][in][0]", "Shop DE netto"),
            ("page", "1"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(query, &expected);
    }

    #[tokio::test]
    async fn test_missing_total_pages_means_single_page() {
        let transport = ScriptedTransport::new(vec![Ok(TransportResponse::json(
            200,
            json!({"entities": [{"id": 1}, {"id": 2}]}),
        ))]);
        let client = WeclappClient::with_transport(&config(), transport.clone()).unwrap();

        let entities: Vec<Value> = client
            .iter_entities(ORDER_RESOURCE, None, None)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let transport = ScriptedTransport::new(vec![
            page(&[1], 2),
            Ok(TransportResponse::text(401, "Unauthorized")),
        ]);
        let client = WeclappClient::with_transport(&config(), transport).unwrap();

        let result: Result<Vec<Value>> = client
            .iter_entities(ORDER_RESOURCE, None, None)
            .try_collect()
            .await;

        let Err(ReportError::Weclapp(WeclappError::ClientError { status, message })) = result else {
            panic!("Expected client error");
        };
        assert_eq!(status, 401);
        assert!(message.contains("HTTP 401 error for"));
        assert!(message.ends_with("Unauthorized"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let transport = ScriptedTransport::new(vec![Ok(TransportResponse::text(200, "<html>"))]);
        let client = WeclappClient::with_transport(&config(), transport).unwrap();

        let result: Result<Vec<Value>> = client
            .iter_entities(ORDER_RESOURCE, None, None)
            .try_collect()
            .await;
        assert!(matches!(
            result,
            Err(ReportError::Weclapp(WeclappError::InvalidResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_fetch_positions_adds_status_filter() {
        let transport = ScriptedTransport::new(vec![Ok(TransportResponse::json(
            200,
            json!({"result": [{
                "orderNumber": "A-1",
                "articleNumber": "SKU-1",
                "unitPrice": "4.50",
                "quantity": 2
            }]}),
        ))]);
        let client = WeclappClient::with_transport(&config(), transport.clone()).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();

        let positions = client
            .fetch_positions(start, end, &["Shop DE netto".to_string()], Some("abgeschlossen"))
            .await
            .unwrap();

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].order_number.as_deref(), Some("A-1"));

        let (_, query) = &transport.requests()[0];
        assert!(query.contains(&("filter[status][eq]".to_string(), "abgeschlossen".to_string())));
        assert!(query.contains(&("filter[docDate][le]".to_string(), "2025-01-12".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_orders_without_status_filter() {
        let transport = ScriptedTransport::new(vec![page(&[1], 1)]);
        let client = WeclappClient::with_transport(&config(), transport.clone()).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();

        let orders = client.fetch_orders(day, day, &[]).await.unwrap();
        assert_eq!(orders.len(), 1);

        let (url, query) = &transport.requests()[0];
        assert!(url.ends_with("/salesOrder"));
        assert!(query.iter().all(|(name, _)| !name.contains("status")));
    }

    #[test]
    fn test_extract_entities_key_order() {
        let entities = extract_entities(json!({"rows": [1], "result": [2, 3]})).unwrap();
        assert_eq!(entities, vec![json!(2), json!(3)]);

        let entities = extract_entities(json!({"result": "nope", "rows": [1]})).unwrap();
        assert_eq!(entities, vec![json!(1)]);
    }

    #[test]
    fn test_extract_entities_single_object() {
        let entities = extract_entities(json!({"id": "42"})).unwrap();
        assert_eq!(entities, vec![json!({"id": "42"})]);
    }

    #[test]
    fn test_extract_entities_rejects_non_object() {
        assert!(extract_entities(json!([1, 2])).is_err());
        assert!(extract_entities(json!("text")).is_err());
    }

    #[test]
    fn test_extract_total_pages() {
        assert_eq!(extract_total_pages(&json!({"totalPages": 4})), 4);
        assert_eq!(extract_total_pages(&json!({"totalpages": "3"})), 3);
        assert_eq!(extract_total_pages(&json!({"meta": {"totalPages": 5}})), 5);
        assert_eq!(extract_total_pages(&json!({"result": []})), 1);
    }

    #[test]
    fn test_extract_total_pages_skips_unreadable_values() {
        assert_eq!(
            extract_total_pages(&json!({"totalPages": null, "totalpages": 2})),
            2
        );
        assert_eq!(
            extract_total_pages(&json!({"totalPages": null, "meta": {"totalPages": "6"}})),
            6
        );
        assert_eq!(
            extract_total_pages(&json!({"totalPages": "many", "meta": {"totalPages": null}})),
            1
        );
    }

    #[test]
    fn test_filter_params_replace_extra_params() {
        let mut params = vec![
            ("pageSize".to_string(), "100".to_string()),
            ("filter[status][eq]".to_string(), "offen".to_string()),
        ];
        apply_filter_params(
            &mut params,
            vec![
                ("filter[status][eq]".to_string(), "a".to_string()),
                ("filter[status][eq]".to_string(), "b".to_string()),
            ],
        );
        assert_eq!(
            params,
            vec![
                ("pageSize".to_string(), "100".to_string()),
                ("filter[status][eq]".to_string(), "a".to_string()),
                ("filter[status][eq]".to_string(), "b".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_filter_overrides_extra_parameter_of_same_name() {
        let transport = ScriptedTransport::new(vec![page(&[1], 1)]);
        let client = WeclappClient::with_transport(&config(), transport.clone()).unwrap();
        let filters = FilterSpec::new().with("status", "abgeschlossen");
        let extra = vec![("filter[status][eq]".to_string(), "offen".to_string())];

        let _: Vec<Value> = client
            .iter_entities(POSITION_RESOURCE, Some(&filters), Some(&extra))
            .try_collect()
            .await
            .unwrap();

        let (_, query) = &transport.requests()[0];
        let statuses: Vec<&str> = query
            .iter()
            .filter(|(name, _)| name == "filter[status][eq]")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(statuses, vec!["abgeschlossen"]);
    }

    #[test]
    fn test_merge_param_replaces() {
        let mut params = vec![("page".to_string(), "1".to_string())];
        merge_param(&mut params, "page", "2".to_string());
        merge_param(&mut params, "pageSize", "10".to_string());
        assert_eq!(
            params,
            vec![
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "10".to_string()),
            ]
        );
    }
}
