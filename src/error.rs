//! Error types for Refuge Restrooms API calls.
//!
//! [`Error`] is what [`RestroomClient::request`](crate::RestroomClient::request)
//! returns when a call fails. The four query operations never surface it
//! directly; they flatten it into an [`ErrorBody`](crate::ErrorBody) through
//! [`ApiResult`](crate::ApiResult).

use http::{HeaderMap, StatusCode};

/// The main error type for Refuge Restrooms API calls.
///
/// # Examples
///
/// ```no_run
/// use refuge_restrooms::{Error, QueryParams, RestroomClient};
///
/// # async fn example() -> Result<(), Error> {
/// let client = RestroomClient::new()?;
/// let params = QueryParams::new().with("page", 1);
///
/// match client.request("/v1/restrooms", &params).await {
///     Ok(response) => println!("Success: {}", response.data),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("HTTP error {}: {}", status, raw_response);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A transport-level error occurred: connection refused, DNS failure,
    /// TLS handshake failure, timeout, or a body that could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    ///
    /// Keeps the raw body so the failure can be debugged after the fact.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to decode
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The server answered with a status other than `200 OK`.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// Invalid configuration was provided, such as a malformed header.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The base URL or a request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use refuge_restrooms::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::HttpError {
    ///     status: StatusCode::NOT_FOUND,
    ///     raw_response: String::new(),
    ///     headers: http::HeaderMap::new(),
    /// };
    /// assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    ///
    /// let err = Error::ConfigurationError("bad header".to_string());
    /// assert_eq!(err.status(), None);
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns `true` if the server was reached and answered with a non-200 status.
    pub fn is_http_error(&self) -> bool {
        matches!(self, Error::HttpError { .. })
    }
}

/// A specialized `Result` type for Refuge Restrooms API calls.
pub type Result<T> = std::result::Result<T, Error>;
