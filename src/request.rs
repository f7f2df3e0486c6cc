use crate::error::{HubSpotError, Result};
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

/// Params is the parameter bag passed to an operation.
pub type Params = serde_json::Map<String, Value>;

/// HTTP verbs understood by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    pub(crate) fn method(&self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }

    /// Where parameters go for this verb, given the caller's preference.
    ///
    /// GET and DELETE always use the query string and PUT always sends
    /// JSON; POST and PATCH honor the preference and default to a form body.
    pub fn encoding(&self, requested: Option<Encoding>) -> Encoding {
        match self {
            Verb::Get | Verb::Delete => Encoding::Query,
            Verb::Put => Encoding::Json,
            Verb::Post | Verb::Patch => requested.unwrap_or(Encoding::Form),
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verb {
    type Err = HubSpotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "PATCH" => Ok(Verb::Patch),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(HubSpotError::RequestBuild(format!(
                "Unsupported HTTP method: {}",
                s
            ))),
        }
    }
}

/// Parameter placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Query string, one `key=value` pair per array element
    Query,
    /// `application/x-www-form-urlencoded` body
    Form,
    /// JSON-serialized body
    Json,
}

/// One call to the remote API
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub verb: Verb,
    /// Path relative to the base URL, may carry its own query string
    pub path: String,
    pub params: Params,
    /// Preferred encoding; only POST and PATCH take it into account
    pub encoding: Option<Encoding>,
}

impl OperationRequest {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        OperationRequest {
            verb,
            path: path.into(),
            params: Params::new(),
            encoding: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Verb::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Verb::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Send POST/PATCH parameters as a JSON body instead of a form
    pub fn json(mut self) -> Self {
        self.encoding = Some(Encoding::Json);
        self
    }

    pub fn encoded_as(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// The encoding actually used for this request
    pub fn effective_encoding(&self) -> Encoding {
        self.verb.encoding(self.encoding)
    }
}

/// Convert any serializable value into a parameter bag.
///
/// `null` yields an empty bag; anything other than an object is rejected.
pub fn to_params<P: Serialize>(param: P) -> Result<Params> {
    match serde_json::to_value(param)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(HubSpotError::RequestBuild(format!(
            "parameters must be an object, got {}",
            other
        ))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

/// Flatten parameters into `(key, value)` pairs.
///
/// Arrays produce one pair per element under the same key, never
/// bracket-indexed keys. Nested objects are sent as JSON text.
pub fn flatten_params(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().map(|item| (key.clone(), scalar(item))));
            }
            other => pairs.push((key.clone(), scalar(other))),
        }
    }
    pairs
}

/// Serialize parameters as `key=a&key=b` form/query text
pub fn encode_params(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(flatten_params(params))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        to_params(value).unwrap()
    }

    #[test]
    fn test_array_repeats_key() {
        let encoded = encode_params(&params(json!({
            "property": ["email", "firstname"],
            "vid": [1, 2, 3]
        })));

        assert_eq!(encoded, "property=email&property=firstname&vid=1&vid=2&vid=3");
        assert!(!encoded.contains("%5B"));
        assert!(!encoded.contains('['));
    }

    #[test]
    fn test_scalar_encoding() {
        let encoded = encode_params(&params(json!({
            "count": 10,
            "q": "a b&c",
            "showListMemberships": true,
            "vidOffset": null
        })));

        assert_eq!(encoded, "count=10&q=a+b%26c&showListMemberships=true&vidOffset=");
    }

    #[test]
    fn test_nested_object_sent_as_json() {
        let pairs = flatten_params(&params(json!({"filter": {"a": 1}})));
        assert_eq!(pairs, vec![("filter".to_string(), r#"{"a":1}"#.to_string())]);
    }

    #[test]
    fn test_verb_encoding_policy() {
        assert_eq!(Verb::Get.encoding(Some(Encoding::Json)), Encoding::Query);
        assert_eq!(Verb::Delete.encoding(None), Encoding::Query);
        assert_eq!(Verb::Put.encoding(Some(Encoding::Form)), Encoding::Json);
        assert_eq!(Verb::Post.encoding(None), Encoding::Form);
        assert_eq!(Verb::Post.encoding(Some(Encoding::Json)), Encoding::Json);
        assert_eq!(Verb::Patch.encoding(None), Encoding::Form);
    }

    #[test]
    fn test_verb_parse() {
        assert_eq!("delete".parse::<Verb>().unwrap(), Verb::Delete);
        assert!("HEAD".parse::<Verb>().is_err());
    }

    #[test]
    fn test_to_params() {
        assert!(to_params(Value::Null).unwrap().is_empty());
        assert!(to_params(json!([1, 2])).is_err());

        let request = OperationRequest::post("contacts/v1/contact").json();
        assert_eq!(request.effective_encoding(), Encoding::Json);
    }
}
