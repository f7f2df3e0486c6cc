use crate::catalog::oauth;
use crate::client::{create_http_client, ClientConfig};
use crate::error::{ApiError, HubSpotError, Result};
use crate::request::{encode_params, flatten_params, to_params, Encoding, OperationRequest, Verb};
use crate::response::{decode_body, Response};
use crate::token::{Auth, Token, TokenStore};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderName, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT,
};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::debug;
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const API_KEY_PARAM: &str = "hapikey";

struct Inner {
    http: Client,
    config: ClientConfig,
    tokens: TokenStore,
    /// Held while a token refresh is in flight
    refresh_lock: Mutex<()>,
}

/// Client for the HubSpot API.
///
/// Cloning is cheap; clones share the HTTP connection pool and the token
/// pair, so a refresh performed through one clone is seen by all of them.
#[derive(Clone)]
pub struct HubSpot {
    inner: Arc<Inner>,
}

impl HubSpot {
    /// Create a client, failing when the configuration lacks the
    /// credentials its auth mode needs.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let tokens = TokenStore::new(config.access_token.clone(), config.refresh_token.clone());
        Ok(HubSpot {
            inner: Arc::new(Inner {
                http: create_http_client()?,
                config,
                tokens,
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    /// Configuration the client was built with.
    ///
    /// Token fields reflect construction time; use [`HubSpot::access_token`]
    /// and [`HubSpot::refresh_token`] for the current values.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.tokens.access_token()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.tokens.refresh_token()
    }

    /// Expiry of the last token obtained from the token endpoint
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.tokens.expires_at()
    }

    /// Replace the token pair, e.g. after an authorization code exchange
    pub fn set_token(&self, token: &Token) {
        let _guard = self
            .inner
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.tokens.store(token);
    }

    /// Credential for the next request; the API key wins when both are set
    pub(crate) fn auth(&self) -> Option<Auth> {
        if let Some(ref key) = self.inner.config.api_key {
            return Some(Auth::ApiKey(key.clone()));
        }
        self.inner.tokens.access_token().map(Auth::Bearer)
    }

    /// Make an API request and unmarshal the response data into the target type
    pub fn apply<T, P>(&self, verb: Verb, path: &str, param: P) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        P: Serialize,
    {
        self.request(verb, path, param)?.apply()
    }

    /// Make an API request with the default encoding for `verb`
    pub fn request<P>(&self, verb: Verb, path: &str, param: P) -> Result<Response>
    where
        P: Serialize,
    {
        let request = OperationRequest::new(verb, path).params(to_params(param)?);
        self.execute(&request)
    }

    /// Execute one request with the client's credentials
    pub fn execute(&self, request: &OperationRequest) -> Result<Response> {
        self.send(request, self.auth().as_ref())
    }

    /// Execute a request, renewing the access token once on HTTP 401.
    ///
    /// A rejected bearer token triggers a single refresh followed by a
    /// single retry. A failed refresh, or a failed retry, is returned as is.
    /// API-key clients never refresh.
    pub fn execute_with_refresh(&self, request: &OperationRequest) -> Result<Response> {
        let auth = self.auth();
        let rejected = match self.send(request, auth.as_ref()) {
            Err(err) if err.is_unauthorized() => err,
            other => return other,
        };

        let stale = match auth {
            Some(Auth::Bearer(token)) => token,
            _ => return Err(rejected),
        };

        if self.inner.config.debug {
            debug!(verb = %request.verb, path = %request.path, "access token rejected, refreshing");
        }
        self.refresh_rejected(&stale)?;

        if self.inner.config.debug {
            debug!(verb = %request.verb, path = %request.path, "retrying with refreshed token");
        }
        self.send(request, self.auth().as_ref())
    }

    /// Exchange the refresh token for a new access token and store it
    pub fn refresh_access_token(&self) -> Result<Token> {
        let _guard = self
            .inner
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.renew_token()
    }

    /// Refresh after `stale` was rejected, unless another caller already did
    fn refresh_rejected(&self, stale: &str) -> Result<()> {
        let _guard = self
            .inner
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if self.inner.tokens.access_token().as_deref() != Some(stale) {
            return Ok(());
        }
        self.renew_token().map(|_| ())
    }

    /// Caller must hold `refresh_lock`
    fn renew_token(&self) -> Result<Token> {
        let refresh_token = self
            .inner
            .tokens
            .refresh_token()
            .ok_or(HubSpotError::NoRefreshToken)?;

        let request = oauth::refresh_request(&self.inner.config, &refresh_token)?;
        let token: Token = self.send(&request, None)?.apply()?;
        self.inner.tokens.store(&token);

        if self.inner.config.debug {
            debug!(expires_in = ?token.expires_in, rotated = token.refresh_token.is_some(), "access token refreshed");
        }
        Ok(token)
    }

    /// Build, send and decode one HTTP request
    pub(crate) fn send(&self, request: &OperationRequest, auth: Option<&Auth>) -> Result<Response> {
        let config = &self.inner.config;
        let mut url = Url::parse(&format!(
            "{}/{}",
            config.base_url(),
            request.path.trim_start_matches('/')
        ))?;

        let mut content_type = config.content_type_header().to_string();
        let mut body: Option<Vec<u8>> = None;

        match request.effective_encoding() {
            Encoding::Query => {
                let pairs = flatten_params(&request.params);
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
            }
            Encoding::Form => {
                content_type = FORM_CONTENT_TYPE.to_string();
                body = Some(encode_params(&request.params).into_bytes());
            }
            Encoding::Json => {
                body = Some(serde_json::to_vec(&request.params)?);
            }
        }

        let mut headers: Vec<(HeaderName, String)> = vec![
            (CONTENT_TYPE, content_type),
            (USER_AGENT, config.user_agent_header().to_string()),
            (ACCEPT_ENCODING, "gzip, deflate".to_string()),
        ];

        match auth {
            Some(Auth::ApiKey(key)) => {
                url.query_pairs_mut().append_pair(API_KEY_PARAM, key);
            }
            Some(Auth::Bearer(token)) => {
                headers.push((AUTHORIZATION, format!("Bearer {}", token)));
            }
            None => {}
        }

        if config.debug {
            let shown: Vec<(&str, &str)> = headers
                .iter()
                .map(|(name, value)| {
                    let value = if *name == AUTHORIZATION { "<redacted>" } else { value.as_str() };
                    (name.as_str(), value)
                })
                .collect();
            let params = Value::Object(request.params.clone());
            debug!(
                verb = %request.verb,
                url = %redacted_url(&url),
                headers = ?shown,
                params = %params,
                "hubspot request"
            );
        }

        let mut builder = self.inner.http.request(request.verb.method(), url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let start = Instant::now();
        let http_response = builder.send()?;
        let status = http_response.status();

        let header = |name: &str| {
            http_response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        };
        let content_encoding = header(CONTENT_ENCODING.as_str());
        let request_id = header("X-Request-Id");

        let raw = http_response.bytes()?;
        let body = decode_body(content_encoding.as_deref(), &raw)?;

        if config.debug {
            debug!(
                status = status.as_u16(),
                elapsed = ?start.elapsed(),
                body = %String::from_utf8_lossy(&body),
                "hubspot response"
            );
        }

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body, request_id).into());
        }

        let data = match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(_) if status == StatusCode::NO_CONTENT => None,
            Err(source) => {
                return Err(HubSpotError::Parse {
                    status: status.as_u16(),
                    source,
                })
            }
        };

        if let Some(ref value) = data {
            if value.get("status").and_then(Value::as_str) == Some("error") {
                return Err(ApiError::from_value(status.as_u16(), value, request_id).into());
            }
        }

        Ok(Response {
            status: status.as_u16(),
            data,
            request_id,
        })
    }

    /// Run a blocking call on tokio's blocking pool and await its result.
    ///
    /// The client itself should be created and dropped outside of async
    /// contexts, as required by reqwest's blocking transport.
    #[cfg(feature = "async")]
    pub async fn call_async<F, T>(&self, call: F) -> Result<T>
    where
        F: FnOnce(&HubSpot) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || call(&client))
            .await
            .map_err(|e| HubSpotError::Task(e.to_string()))?
    }

    /// Async counterpart of [`HubSpot::execute`]
    #[cfg(feature = "async")]
    pub async fn execute_async(&self, request: OperationRequest) -> Result<Response> {
        self.call_async(move |client| client.execute(&request)).await
    }
}

impl std::fmt::Debug for HubSpot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpot")
            .field("config", &self.inner.config)
            .finish()
    }
}

/// URL for trace output, with the API key masked
fn redacted_url(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "<redacted>".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
