//! Single-shot request builder and sender

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::error::Error;
use crate::method::RequestMethod;
use crate::response::{content_type_essence, ResponseBody};

/// Default timeout applied to the connect and read phases, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Start building a request for the given method and URL.
///
/// The returned [`Request`] is seeded with defaults: no caller headers, an
/// empty JSON object body, a [`DEFAULT_TIMEOUT_SECS`] timeout, no proxy,
/// and dry run disabled. Call [`Request::send`] to perform the round trip.
///
/// # Example
///
/// ```no_run
/// use rest_requests::{request, RequestMethod, ResponseBody};
///
/// async fn ping() -> Result<ResponseBody, rest_requests::Error> {
///     request(RequestMethod::Get, "http://localhost:6820/slurm/v0.0.40/ping")
///         .timeout_secs(30)
///         .send()
///         .await
/// }
/// ```
pub fn request(method: RequestMethod, url: impl Into<String>) -> Request {
    Request {
        method,
        url: url.into(),
        headers: HashMap::new(),
        body: Value::Object(serde_json::Map::new()),
        timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        proxy_url: None,
        dry_run: false,
    }
}

/// A single request, configured and ready to send.
///
/// Every call owns its own transport client for the duration of the round
/// trip; nothing is shared or reused across calls.
#[derive(Debug, Clone)]
pub struct Request {
    method: RequestMethod,
    url: String,
    headers: HashMap<String, String>,
    body: Value,
    timeout: Duration,
    proxy_url: Option<String>,
    dry_run: bool,
}

impl Request {
    /// Add a single header. `Content-Type` is always forced to
    /// `application/json` at send time, overriding any value set here.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge a map of headers into the request
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set the JSON body. Defaults to an empty object.
    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Set the timeout in seconds, applied to the connect and read phases
    /// individually. Total request duration is unbounded.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Route this request through a SOCKS or HTTP proxy
    pub fn proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// When enabled, [`send`](Self::send) performs no network I/O and
    /// returns an empty JSON object.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Perform the request.
    ///
    /// Decodes the response by its declared content type
    /// (`application/json` or `text/plain`, parameters ignored), then
    /// fails with [`Error::Status`] on a 4xx/5xx status. Transport
    /// failures propagate unchanged as [`Error::Transport`].
    pub async fn send(self) -> Result<ResponseBody, Error> {
        let headers = effective_headers(&self.headers)?;

        tracing::debug!(
            "Sending {} request to '{}' with headers={:?} and body={}",
            self.method,
            self.url,
            headers,
            self.body
        );

        if self.dry_run {
            tracing::info!(
                "Dry run enabled - not sending {} request to '{}'. Request headers: {:?}. Request body: {}",
                self.method,
                self.url,
                headers,
                self.body
            );
            return Ok(ResponseBody::Json(Value::Object(serde_json::Map::new())));
        }

        // Client lives for this call only and is dropped on every path.
        let client = build_client(self.timeout, self.proxy_url.as_deref())?;

        let response = dispatch(&client, self.method, &self.url)
            .headers(headers)
            .json(&self.body)
            .send()
            .await?;

        let status = response.status();
        let url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = match content_type_essence(&content_type) {
            "application/json" => ResponseBody::Json(response.json().await?),
            essence if essence.starts_with("text/plain") => {
                ResponseBody::Text(response.text().await?)
            }
            _ => return Err(Error::UnsupportedContentType(content_type)),
        };

        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                url,
            });
        }

        Ok(body)
    }
}

/// Caller headers with `Content-Type: application/json` forced on top
fn effective_headers(headers: &HashMap<String, String>) -> Result<HeaderMap, Error> {
    let mut header_map = HeaderMap::with_capacity(headers.len() + 1);
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("value for '{name}': {e}")))?;
        header_map.insert(name, value);
    }
    header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(header_map)
}

/// Build the per-call client with connect/read timeouts and an optional
/// proxy. No total timeout is set.
fn build_client(timeout: Duration, proxy_url: Option<&str>) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(timeout)
        .read_timeout(timeout);

    if let Some(proxy_url) = proxy_url {
        let proxy_url = Url::parse(proxy_url).map_err(|e| Error::Proxy(e.to_string()))?;
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| Error::Proxy(e.to_string()))?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Resolve the verb to the client's corresponding sender
fn dispatch(client: &reqwest::Client, method: RequestMethod, url: &str) -> reqwest::RequestBuilder {
    match method {
        RequestMethod::Get => client.get(url),
        RequestMethod::Head => client.head(url),
        RequestMethod::Post => client.post(url),
        RequestMethod::Put => client.put(url),
        RequestMethod::Delete => client.delete(url),
        // reqwest has no options() convenience method
        RequestMethod::Options => client.request(reqwest::Method::OPTIONS, url),
        RequestMethod::Patch => client.patch(url),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = request(RequestMethod::Get, "http://localhost/jobs");
        assert_eq!(request.method, RequestMethod::Get);
        assert_eq!(request.url, "http://localhost/jobs");
        assert!(request.headers.is_empty());
        assert_eq!(request.body, json!({}));
        assert_eq!(request.timeout, Duration::from_secs(600));
        assert!(request.proxy_url.is_none());
        assert!(!request.dry_run);
    }

    #[test]
    fn test_effective_headers_forces_content_type() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());
        headers.insert("X-Token".to_string(), "secret".to_string());

        let merged = effective_headers(&headers).expect("Headers should be valid");

        assert_eq!(
            merged.get(CONTENT_TYPE).expect("Content type should be set"),
            "application/json"
        );
        assert_eq!(merged.get("X-Token").expect("X-Token should be kept"), "secret");
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_effective_headers_empty_input() {
        let merged = effective_headers(&HashMap::new()).expect("Empty headers should be valid");
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged.get(CONTENT_TYPE).expect("Content type should be set"),
            "application/json"
        );
    }

    #[test]
    fn test_effective_headers_rejects_invalid_name() {
        let mut headers = HashMap::new();
        headers.insert("Bad Header".to_string(), "value".to_string());

        let result = effective_headers(&headers);
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_effective_headers_rejects_invalid_value() {
        let mut headers = HashMap::new();
        headers.insert("X-Token".to_string(), "bad\nvalue".to_string());

        let result = effective_headers(&headers);
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_build_client_without_proxy() {
        let result = build_client(Duration::from_secs(1), None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_client_with_socks_proxy() {
        let result = build_client(Duration::from_secs(1), Some("socks5://localhost:1080"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_client_with_invalid_proxy() {
        let result = build_client(Duration::from_secs(1), Some("not a proxy url"));
        assert!(matches!(result, Err(Error::Proxy(_))));
    }

    #[tokio::test]
    async fn test_dry_run_returns_empty_object() {
        // URL intentionally unroutable: a dry run must never touch it.
        let body = request(RequestMethod::Post, "http://192.0.2.1/jobs")
            .body(json!({"job": {"name": "test"}}))
            .dry_run(true)
            .send()
            .await
            .expect("Dry run should not fail");

        assert_eq!(body, ResponseBody::Json(json!({})));
    }

    #[tokio::test]
    async fn test_dry_run_is_idempotent() {
        for _ in 0..3 {
            let body = request(RequestMethod::Delete, "http://192.0.2.1/jobs/1")
                .dry_run(true)
                .send()
                .await
                .expect("Dry run should not fail");
            assert_eq!(body, ResponseBody::Json(json!({})));
        }
    }

    #[tokio::test]
    async fn test_dry_run_with_invalid_header_still_fails() {
        // Header resolution happens before the dry-run short circuit.
        let result = request(RequestMethod::Get, "http://192.0.2.1/jobs")
            .header("Bad Header", "value")
            .dry_run(true)
            .send()
            .await;

        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }
}
