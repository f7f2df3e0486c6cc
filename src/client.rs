use crate::error::{HubSpotError, Result};
use reqwest::blocking::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;

/// Base URL of the HubSpot API
pub const BASE_URL: &str = "https://api.hubapi.com";

/// Content type sent when the configuration does not override it
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// User agent sent when the configuration does not override it
pub const DEFAULT_USER_AGENT: &str = concat!("hubspot-rs/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used for API requests
pub fn create_http_client() -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(300))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(HubSpotError::from)
}

/// Configuration for a [`HubSpot`](crate::HubSpot) client.
///
/// Exactly one credential is used per request: the API key when present,
/// otherwise the access token. Field names follow the option names
/// applications commonly keep in their settings files:
///
/// ```
/// let config: hubspot::ClientConfig = serde_json::from_str(r#"{
///     "access_token": "token",
///     "refresh_token": "refresh",
///     "client_id": "id",
///     "client_secret": "secret",
///     "DEBUG": true
/// }"#).unwrap();
/// assert!(config.debug);
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Static developer key, sent as the `hapikey` query parameter
    pub api_key: Option<String>,
    /// OAuth access token, sent as a bearer token
    pub access_token: Option<String>,
    /// OAuth refresh token used to renew `access_token`
    pub refresh_token: Option<String>,
    /// Application id, required by timeline and settings operations
    pub application_id: Option<String>,
    /// OAuth client id
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// OAuth redirect URI registered for the application
    pub redirect_uri: Option<String>,
    /// Content-Type header value (defaults to `application/json`)
    #[serde(rename = "contentType")]
    pub content_type: Option<String>,
    /// User-Agent header value
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    /// Trace every request and response through `tracing`
    #[serde(rename = "DEBUG")]
    pub debug: bool,
    /// Override of [`BASE_URL`], for proxies and test servers
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Configuration authenticating with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Configuration authenticating with an OAuth access token
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        ClientConfig {
            access_token: Some(access_token.into()),
            ..Default::default()
        }
    }

    pub fn refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the base URL for API requests, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(BASE_URL)
            .trim_end_matches('/')
    }

    pub fn content_type_header(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn user_agent_header(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Check that the credentials required by the chosen auth mode are present
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("api_key", &self.api_key),
            ("access_token", &self.access_token),
            ("refresh_token", &self.refresh_token),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];
        for (name, value) in named {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(HubSpotError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.api_key.is_none() && self.access_token.is_none() {
            return Err(HubSpotError::Config(
                "either api_key or access_token is required".to_string(),
            ));
        }

        if self.api_key.is_none()
            && self.refresh_token.is_some()
            && (self.client_id.is_none() || self.client_secret.is_none())
        {
            return Err(HubSpotError::Config(
                "refresh_token requires client_id and client_secret".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("application_id", &self.application_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("redirect_uri", &self.redirect_uri)
            .field("content_type", &self.content_type)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .field("base_url", &self.base_url)
            .finish()
    }
}
