//! The normalized outcome of a query operation.

use crate::{Error, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure reported as data: `{"error": "...", "success": false}`.
///
/// `error` reads `HTTP Error: <code>` when the server answered with a
/// non-200 status, and `Exception: <message>` for everything else
/// (transport failures, undecodable bodies, bad URLs).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error}")]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
    /// Always `false`.
    pub success: bool,
}

impl ErrorBody {
    /// Creates a failure with the given description.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            success: false,
        }
    }
}

impl From<Error> for ErrorBody {
    fn from(err: Error) -> Self {
        match err {
            Error::HttpError { status, .. } => {
                ErrorBody::new(format!("HTTP Error: {}", status.as_u16()))
            }
            other => ErrorBody::new(format!("Exception: {}", other)),
        }
    }
}

/// Either the JSON body of a `200 OK` response, passed through unchanged,
/// or an [`ErrorBody`].
///
/// Serializes untagged, so a failure renders exactly as
/// `{"error": "...", "success": false}` and a success as the server's JSON.
///
/// # Examples
///
/// ```no_run
/// use refuge_restrooms::{ApiResult, RestroomClient, SearchQuery};
///
/// # async fn example() -> Result<(), refuge_restrooms::Error> {
/// let client = RestroomClient::new()?;
///
/// match client.search(&SearchQuery::new("library")).await {
///     ApiResult::Success(json) => println!("{}", json),
///     ApiResult::Failure(err) => eprintln!("{}", err.error),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResult {
    /// The decoded response body.
    Success(Value),
    /// The call failed; see [`ErrorBody`].
    Failure(ErrorBody),
}

impl ApiResult {
    /// Returns `true` for [`ApiResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    /// Returns the failure description, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ApiResult::Success(_) => None,
            ApiResult::Failure(body) => Some(&body.error),
        }
    }

    /// Returns the success payload, if any.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiResult::Success(value) => Some(value),
            ApiResult::Failure(_) => None,
        }
    }

    /// Collapses into a single JSON value; failures become
    /// `{"error": "...", "success": false}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use refuge_restrooms::{ApiResult, ErrorBody};
    /// use serde_json::json;
    ///
    /// let failed = ApiResult::Failure(ErrorBody::new("HTTP Error: 404"));
    /// assert_eq!(
    ///     failed.into_json(),
    ///     json!({"error": "HTTP Error: 404", "success": false})
    /// );
    /// ```
    pub fn into_json(self) -> Value {
        match self {
            ApiResult::Success(value) => value,
            ApiResult::Failure(body) => {
                serde_json::json!({ "error": body.error, "success": body.success })
            }
        }
    }

    /// Converts into a standard `Result` so `?` can be used on it.
    pub fn into_result(self) -> std::result::Result<Value, ErrorBody> {
        match self {
            ApiResult::Success(value) => Ok(value),
            ApiResult::Failure(body) => Err(body),
        }
    }
}

impl From<crate::Result<Response<Value>>> for ApiResult {
    fn from(result: crate::Result<Response<Value>>) -> Self {
        match result {
            Ok(response) => ApiResult::Success(response.data),
            Err(err) => ApiResult::Failure(err.into()),
        }
    }
}

impl From<ApiResult> for Value {
    fn from(result: ApiResult) -> Self {
        result.into_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, StatusCode};
    use serde_json::json;

    #[test]
    fn test_http_error_message() {
        let err = Error::HttpError {
            status: StatusCode::NOT_FOUND,
            raw_response: "Not found".to_string(),
            headers: HeaderMap::new(),
        };
        let body = ErrorBody::from(err);
        assert_eq!(body.error, "HTTP Error: 404");
        assert!(!body.success);
    }

    #[test]
    fn test_other_errors_are_exceptions() {
        let err = Error::DeserializationFailed {
            raw_response: "<html>".to_string(),
            serde_error: "expected value at line 1 column 1".to_string(),
            status: StatusCode::OK,
        };
        let body = ErrorBody::from(err);
        assert!(body.error.starts_with("Exception: "));
        assert!(body.error.contains("expected value"));

        let body = ErrorBody::from(Error::ConfigurationError("bad".to_string()));
        assert_eq!(body.error, "Exception: Configuration error: bad");
    }

    #[test]
    fn test_success_passes_json_through() {
        let data = json!({"restrooms": []});
        let response = Response::new(
            data.clone(),
            data.to_string(),
            StatusCode::OK,
            HeaderMap::new(),
            std::time::Duration::ZERO,
        );
        let result = ApiResult::from(crate::Result::Ok(response));

        assert!(result.is_success());
        assert_eq!(result.error_message(), None);
        assert_eq!(result.into_json(), data);
    }

    #[test]
    fn test_failure_serializes_untagged() {
        let result = ApiResult::Failure(ErrorBody::new("Exception: boom"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"error": "Exception: boom", "success": false})
        );
        assert_eq!(result.clone().into_result().unwrap_err().to_string(), "Exception: boom");
        assert_eq!(Value::from(result), json!({"error": "Exception: boom", "success": false}));
    }
}
