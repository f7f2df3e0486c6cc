use regex::Regex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// Failure reported by the remote service, either through an HTTP status
/// outside 2xx or through an in-band `"status": "error"` body.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message} (HTTP {status_code})")]
pub struct ApiError {
    /// Human readable message
    pub message: String,
    /// Provider-defined status code such as `"error"` or `"invalid_grant"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// HTTP status of the response
    #[serde(default)]
    pub status_code: u16,
    /// Request identifier, from the body or the `X-Request-Id` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiError {
    /// Build an error from a raw response body.
    ///
    /// Never fails: a body that is not JSON is treated as text (HTML tags
    /// stripped), and an empty or unusable body falls back to the reason
    /// phrase of `status_code`.
    pub fn from_response(status_code: u16, body: &[u8], request_id: Option<String>) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(status_code, &value, request_id),
            Err(_) => {
                let text = strip_html(&String::from_utf8_lossy(body));
                let message = if text.is_empty() {
                    stock_message(status_code)
                } else {
                    text
                };
                ApiError {
                    message,
                    status: None,
                    status_code,
                    request_id,
                }
            }
        }
    }

    /// Build an error from an already parsed body.
    pub fn from_value(status_code: u16, body: &Value, request_id: Option<String>) -> Self {
        let field = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| body.get(*name).and_then(Value::as_str))
                .map(str::to_string)
        };

        let message = match body {
            Value::String(text) if !text.trim().is_empty() => strip_html(text),
            _ => field(&["message", "error_description"])
                .unwrap_or_else(|| stock_message(status_code)),
        };

        ApiError {
            message,
            status: field(&["status", "error"]),
            status_code,
            request_id: field(&["requestId"]).or(request_id),
        }
    }
}

fn stock_message(status_code: u16) -> String {
    StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP status {}", status_code))
}

/// Remove markup from an HTML error page and collapse whitespace.
pub(crate) fn strip_html(text: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    static SPACE: OnceLock<Regex> = OnceLock::new();

    let tags = TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"));
    let space = SPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

    let stripped = tags.replace_all(text, " ");
    space.replace_all(&stripped, " ").trim().to_string()
}

/// Main error type for HubSpot API operations
#[derive(Debug, Error)]
pub enum HubSpotError {
    /// Client configuration rejected at construction
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request never reached the remote service
    #[error("connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Compressed response body could not be decoded
    #[error("failed to decompress response: {0}")]
    Decompression(#[source] std::io::Error),

    /// Response body was not JSON where JSON was expected
    #[error("failed to parse response (HTTP {status}): {source}")]
    Parse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Error reported by the remote service
    #[error("API error: {0}")]
    Api(ApiError),

    #[error("no refresh token available to renew the access token")]
    NoRefreshToken,

    #[error("client_id and client_secret are required for OAuth requests")]
    NoClientCredentials,

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Blocking task behind an async call panicked or was cancelled
    #[error("request task failed: {0}")]
    Task(String),
}

impl From<ApiError> for HubSpotError {
    fn from(err: ApiError) -> Self {
        HubSpotError::Api(err)
    }
}

impl HubSpotError {
    /// The remote error, if this is one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            HubSpotError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Get the HTTP status code if the remote service answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HubSpotError::Api(err) => Some(err.status_code),
            HubSpotError::Parse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is an unauthorized error (401)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, HubSpotError::Api(ApiError { status_code: 401, .. }))
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, HubSpotError::Api(ApiError { status_code: 404, .. }))
    }
}

/// Result type for HubSpot operations
pub type Result<T> = std::result::Result<T, HubSpotError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_from_json_body() {
        let body = br#"{"status":"error","message":"Contact does not exist","requestId":"req-1"}"#;
        let err = ApiError::from_response(404, body, None);

        assert_eq!(err.message, "Contact does not exist");
        assert_eq!(err.status.as_deref(), Some("error"));
        assert_eq!(err.status_code, 404);
        assert_eq!(err.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_error_from_oauth_body() {
        let body = br#"{"error":"invalid_grant","error_description":"missing or unknown refresh token"}"#;
        let err = ApiError::from_response(400, body, None);

        assert_eq!(err.message, "missing or unknown refresh token");
        assert_eq!(err.status.as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn test_error_from_html() {
        let body = b"<html><body>Internal Server Error</body></html>";
        let err = ApiError::from_response(500, body, Some("hdr-7".to_string()));

        assert_eq!(err.message, "Internal Server Error");
        assert_eq!(err.status, None);
        assert_eq!(err.status_code, 500);
        assert_eq!(err.request_id.as_deref(), Some("hdr-7"));
    }

    #[test]
    fn test_error_stock_message() {
        assert_eq!(ApiError::from_response(502, b"", None).message, "Bad Gateway");
        assert_eq!(ApiError::from_response(503, b"<p></p>", None).message, "Service Unavailable");
        assert_eq!(ApiError::from_value(418, &json!([1, 2]), None).message, "I'm a teapot");
        assert_eq!(ApiError::from_response(599, b"", None).message, "HTTP status 599");
    }

    #[test]
    fn test_error_body_request_id_wins() {
        let err = ApiError::from_value(
            400,
            &json!({"message": "bad", "requestId": "body"}),
            Some("header".to_string()),
        );
        assert_eq!(err.request_id.as_deref(), Some("body"));
    }

    #[test]
    fn test_error_serialize_roundtrip() {
        let original = ApiError {
            message: "Property values were not valid".to_string(),
            status: Some("error".to_string()),
            status_code: 400,
            request_id: Some("abc-123".to_string()),
        };
        let body = serde_json::to_vec(&original).unwrap();
        assert!(String::from_utf8_lossy(&body).contains("requestId"));

        let normalized = ApiError::from_response(400, &body, None);
        assert_eq!(normalized, original);
    }

    #[test]
    fn test_error_predicates() {
        let err = HubSpotError::from(ApiError::from_response(401, b"", None));
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
        assert_eq!(err.status_code(), Some(401));
        assert!(HubSpotError::NoRefreshToken.api_error().is_none());
    }

    #[test]
    fn test_strip_html_multiline() {
        let page = "<html>\n<head><title>502</title></head>\n<body>\n  Bad   gateway\n</body></html>";
        assert_eq!(strip_html(page), "502 Bad gateway");
    }
}
