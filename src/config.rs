//! Client configuration and service constants.

use http::{header, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

/// Base URL of the public Refuge Restrooms API.
pub const DEFAULT_BASE_URL: &str = "https://www.refugerestrooms.org/api";

/// Browser-like User-Agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Endpoint paths, relative to the base URL.
pub mod endpoints {
    /// Restrooms added or updated since a given date.
    pub const BY_DATE: &str = "/v1/restrooms/by_date";
    /// Restrooms nearest to a coordinate.
    pub const BY_LOCATION: &str = "/v1/restrooms/by_location";
    /// Free-text search.
    pub const SEARCH: &str = "/v1/restrooms/search";
    /// Unfiltered listing.
    pub const ALL: &str = "/v1/restrooms";
}

/// Immutable settings shared by every call a [`RestroomClient`](crate::RestroomClient) makes.
///
/// Built by [`ClientBuilder`](crate::ClientBuilder); never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL that endpoint paths are appended to.
    pub base_url: Url,

    /// Headers attached to every request.
    pub headers: HeaderMap,

    /// Skip TLS certificate validation. Off unless explicitly requested.
    pub accept_invalid_certs: bool,

    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// The fixed headers: JSON `Accept`/`Content-Type` and the default User-Agent.
    pub fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );
        headers
    }

    /// Joins the base URL, an endpoint path and a serialized query string.
    ///
    /// The base path is kept, so `https://host/api` + `/v1/restrooms`
    /// becomes `https://host/api/v1/restrooms`. A missing leading `/` on
    /// `endpoint` is added. Any query or fragment on the base URL is replaced.
    pub fn endpoint_url(&self, endpoint: &str, query: &str) -> crate::Result<Url> {
        if self.base_url.cannot_be_a_base() {
            return Err(crate::Error::ConfigurationError(format!(
                "Base URL cannot carry a path: {}",
                self.base_url
            )));
        }

        let mut url = self.base_url.clone();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        url.set_path(&path);
        url.set_fragment(None);
        url.set_query(query.strip_prefix('?').filter(|q| !q.is_empty()));
        Ok(url)
    }

    /// Checks that `url` can serve as a base: hierarchical, without query or fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`](crate::Error::ConfigurationError) otherwise.
    pub fn validate_base_url(url: &Url) -> crate::Result<()> {
        if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
            return Err(crate::Error::ConfigurationError(format!(
                "Base URL must be a plain path without query or fragment: {}",
                url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> ClientConfig {
        ClientConfig {
            base_url: Url::parse(base).unwrap(),
            headers: ClientConfig::default_headers(),
            accept_invalid_certs: false,
            timeout: None,
        }
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let url = config(DEFAULT_BASE_URL)
            .endpoint_url(endpoints::SEARCH, "?query=cafe")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.refugerestrooms.org/api/v1/restrooms/search?query=cafe"
        );
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        let url = config("http://127.0.0.1:8080/")
            .endpoint_url(endpoints::ALL, "")
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v1/restrooms");
    }

    #[test]
    fn test_endpoint_url_ignores_base_query_and_fragment() {
        let url = config("http://127.0.0.1:1/api?key=abc#top")
            .endpoint_url(endpoints::ALL, "?offset=0&page=1&per_page=10")
            .unwrap();
        assert_eq!(url.path(), "/api/v1/restrooms");
        assert_eq!(url.query(), Some("offset=0&page=1&per_page=10"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_endpoint_url_adds_leading_slash() {
        let url = config("http://127.0.0.1:1/api")
            .endpoint_url("v1/restrooms", "")
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1/api/v1/restrooms");
    }

    #[test]
    fn test_endpoint_url_without_query() {
        let url = config(DEFAULT_BASE_URL)
            .endpoint_url(endpoints::BY_DATE, "")
            .unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_validate_base_url() {
        for ok in [DEFAULT_BASE_URL, "http://localhost:3000/", "http://localhost/api/"] {
            assert!(ClientConfig::validate_base_url(&Url::parse(ok).unwrap()).is_ok());
        }
        for bad in [
            "http://localhost/api?key=abc",
            "http://localhost/api#frag",
            "mailto:someone@example.com",
        ] {
            assert!(matches!(
                ClientConfig::validate_base_url(&Url::parse(bad).unwrap()),
                Err(crate::Error::ConfigurationError(_))
            ));
        }
    }

    #[test]
    fn test_default_headers() {
        let headers = ClientConfig::default_headers();
        assert_eq!(headers[header::ACCEPT], "application/json");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(headers[header::USER_AGENT], DEFAULT_USER_AGENT);
    }
}
