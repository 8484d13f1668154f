//! The Refuge Restrooms client.
//!
//! [`RestroomClient`] exposes the four query operations of the service. Use
//! [`ClientBuilder`] to point it somewhere other than the public API or to
//! change its headers and timeout.

use crate::{
    config::{endpoints, ClientConfig, DEFAULT_BASE_URL},
    params::{DateQuery, ListOptions, LocationQuery, QueryParams, SearchQuery},
    ApiResult, Error, Response, Result,
};
use http::{header, HeaderName, HeaderValue, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Client for the Refuge Restrooms API.
///
/// Configuration is fixed at construction and shared behind an `Arc`, so the
/// client is cheap to clone and can issue calls from many tasks at once.
/// Calls share no mutable state and complete in no particular order.
///
/// The query operations never fail at the type level: every outcome is an
/// [`ApiResult`]. Use [`request`](Self::request) for the typed [`Error`].
///
/// # Examples
///
/// ```no_run
/// use refuge_restrooms::{LocationQuery, RestroomClient};
///
/// # async fn example() -> Result<(), refuge_restrooms::Error> {
/// let client = RestroomClient::new()?;
///
/// let nearby = client
///     .get_by_location(&LocationQuery::new(45.5231, -122.6765).ada(true))
///     .await;
///
/// if let Some(json) = nearby.data() {
///     println!("{}", json);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RestroomClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl RestroomClient {
    /// Creates a client for the public API with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use refuge_restrooms::RestroomClient;
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), refuge_restrooms::Error> {
    /// let client = RestroomClient::builder()
    ///     .base_url("http://localhost:3000/api")?
    ///     .timeout(Duration::from_secs(5))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The immutable configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Restrooms created, or also updated with `updated`, since a date.
    pub async fn get_by_date(&self, query: &DateQuery) -> ApiResult {
        self.normalized(endpoints::BY_DATE, QueryParams::from(query))
            .await
    }

    /// Restrooms closest to a coordinate.
    pub async fn get_by_location(&self, query: &LocationQuery) -> ApiResult {
        self.normalized(endpoints::BY_LOCATION, QueryParams::from(query))
            .await
    }

    /// Free-text search over names and addresses.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use refuge_restrooms::{RestroomClient, SearchQuery};
    ///
    /// # async fn example() -> Result<(), refuge_restrooms::Error> {
    /// let client = RestroomClient::new()?;
    /// let result = client
    ///     .search(&SearchQuery::new("coffee shop").unisex(true).per_page(25))
    ///     .await;
    ///
    /// match result.into_result() {
    ///     Ok(json) => println!("{}", json),
    ///     Err(err) => eprintln!("search failed: {}", err),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &SearchQuery) -> ApiResult {
        self.normalized(endpoints::SEARCH, QueryParams::from(query))
            .await
    }

    /// Every restroom, one page at a time.
    pub async fn list_all(&self, options: &ListOptions) -> ApiResult {
        self.normalized(endpoints::ALL, QueryParams::from(options))
            .await
    }

    async fn normalized(&self, endpoint: &str, params: QueryParams) -> ApiResult {
        let result = self.request(endpoint, &params).await;

        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                endpoint = endpoint,
                "Request failed"
            );
        }

        ApiResult::from(result)
    }

    /// Sends a GET to `endpoint` with `params` and decodes the JSON body.
    ///
    /// `endpoint` is appended to the base URL's path; a missing leading `/`
    /// is added, so `v1/restrooms` and `/v1/restrooms` are the same call.
    /// Only `200 OK` counts as success; any other status is
    /// [`Error::HttpError`]. This is what the query operations call before
    /// flattening the outcome into an [`ApiResult`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use refuge_restrooms::{config::endpoints, QueryParams, RestroomClient};
    ///
    /// # async fn example() -> Result<(), refuge_restrooms::Error> {
    /// let client = RestroomClient::new()?;
    /// let params = QueryParams::new().with("page", 1).with("per_page", 5);
    ///
    /// let response = client.request(endpoints::ALL, &params).await?;
    /// println!("{} ({:?})", response.status, response.latency);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(&self, endpoint: &str, params: &QueryParams) -> Result<Response<Value>> {
        let url = self
            .inner
            .config
            .endpoint_url(endpoint, &params.to_query_string())?;

        tracing::debug!(
            method = "GET",
            url = %url,
            "Executing HTTP request"
        );

        let start_time = Instant::now();

        let mut request = self
            .inner
            .http_client
            .get(url)
            .headers(self.inner.config.headers.clone());

        if let Some(timeout) = self.inner.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        self.parse_response(response, start_time).await
    }

    /// Turns a raw response into decoded JSON or an error.
    async fn parse_response(
        &self,
        response: reqwest::Response,
        start_time: Instant,
    ) -> Result<Response<Value>> {
        let status = response.status();
        let headers = response.headers().clone();

        if status != StatusCode::OK {
            let raw_response = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            }

            return Err(Error::HttpError {
                status,
                raw_response,
                headers,
            });
        }

        let raw_body = response.text().await?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        match serde_json::from_str::<Value>(&raw_body) {
            Ok(data) => Ok(Response::new(data, raw_body, status, headers, latency)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }
}

impl std::fmt::Debug for RestroomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestroomClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`RestroomClient`].
///
/// Starts from the public base URL, the fixed JSON headers and certificate
/// validation switched on.
///
/// # Examples
///
/// ```no_run
/// use refuge_restrooms::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), refuge_restrooms::Error> {
/// let client = ClientBuilder::new()
///     .user_agent("restroom-finder/0.3")?
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    headers: http::HeaderMap,
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            headers: ClientConfig::default_headers(),
            accept_invalid_certs: false,
            timeout: None,
        }
    }

    /// Overrides the base URL endpoint paths are appended to.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, or carries a query string
    /// or fragment.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        ClientConfig::validate_base_url(&url)?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Adds or replaces a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Replaces the default browser-like User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid header value.
    pub fn user_agent(self, user_agent: impl AsRef<str>) -> Result<Self> {
        self.default_header(header::USER_AGENT.as_str(), user_agent)
    }

    /// Sets a per-request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables TLS certificate validation.
    ///
    /// Only meant for test servers with self-signed certificates. Never turn
    /// this on against the public API.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Builds the configured `RestroomClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(self) -> Result<RestroomClient> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        ClientConfig::validate_base_url(&base_url)?;

        if self.accept_invalid_certs {
            tracing::warn!(
                base_url = %base_url,
                "TLS certificate validation is disabled"
            );
        }

        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(RestroomClient {
            inner: Arc::new(ClientInner {
                http_client,
                config: ClientConfig {
                    base_url,
                    headers: self.headers,
                    accept_invalid_certs: self.accept_invalid_certs,
                    timeout: self.timeout,
                },
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate_certificates() {
        let client = RestroomClient::new().unwrap();
        let config = client.config();

        assert!(!config.accept_invalid_certs);
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
        assert_eq!(config.headers[header::ACCEPT], "application/json");
    }

    #[test]
    fn test_user_agent_override() {
        let client = RestroomClient::builder()
            .user_agent("tests/1.0")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.config().headers[header::USER_AGENT], "tests/1.0");
    }

    #[test]
    fn test_invalid_header_is_configuration_error() {
        let result = RestroomClient::builder().default_header("bad header", "x");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_base_url_with_query_is_rejected() {
        let result = RestroomClient::builder().base_url("http://localhost/api?key=abc");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));

        let result = RestroomClient::builder().base_url("http://localhost/api#top");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = RestroomClient::builder().base_url("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
