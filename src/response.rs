use crate::error::{HubSpotError, Result};
use flate2::read::{GzDecoder, ZlibDecoder};
use serde_json::Value;
use std::io::Read;

/// Response represents a successful API response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Parsed JSON body; `None` for a body-less 204
    pub data: Option<Value>,

    /// Request id from the `X-Request-Id` response header
    pub request_id: Option<String>,
}

impl Response {
    /// Get the raw data value from the response
    pub fn raw(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Take ownership of the parsed body
    pub fn into_value(self) -> Option<Value> {
        self.data
    }

    /// Apply unmarshals the response data into the provided type
    pub fn apply<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let data = self.data.clone().unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(HubSpotError::from)
    }

    /// Get a value from the response data by a slash-separated path.
    /// For example, "properties/email/value" reads a contact's email.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = self.data.as_ref()?;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value from the response data by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }
}

/// Undo the `Content-Encoding` of a response body.
///
/// Unknown or absent encodings, and empty bodies, pass through untouched.
pub(crate) fn decode_body(content_encoding: Option<&str>, body: &[u8]) -> Result<Vec<u8>> {
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let encoding = content_encoding.map(|e| e.trim().to_ascii_lowercase());
    let mut decoded = Vec::new();

    match encoding.as_deref() {
        Some("gzip") | Some("x-gzip") => {
            GzDecoder::new(body)
                .read_to_end(&mut decoded)
                .map_err(HubSpotError::Decompression)?;
        }
        Some("deflate") => {
            ZlibDecoder::new(body)
                .read_to_end(&mut decoded)
                .map_err(HubSpotError::Decompression)?;
        }
        _ => decoded.extend_from_slice(body),
    }

    Ok(decoded)
}
