use super::Endpoint;
use crate::client::ClientConfig;
use crate::error::{HubSpotError, Result};
use crate::request::{OperationRequest, Params};
use crate::rest::HubSpot;
use crate::token::Token;
use serde_json::Value;
use url::Url;

/// Page users are sent to for granting access
pub const AUTHORIZE_URL: &str = "https://app.hubspot.com/oauth/authorize";

/// Token endpoint, form encoded and sent without credentials
pub const TOKEN: Endpoint = Endpoint::post("oauth.token", "oauth/v1/token");

fn client_credentials(config: &ClientConfig) -> Result<(&str, &str)> {
    match (config.client_id.as_deref(), config.client_secret.as_deref()) {
        (Some(id), Some(secret)) => Ok((id, secret)),
        _ => Err(HubSpotError::NoClientCredentials),
    }
}

fn token_request(config: &ClientConfig, grant: &[(&str, &str)]) -> Result<OperationRequest> {
    let (client_id, client_secret) = client_credentials(config)?;

    let mut params = Params::new();
    for (key, value) in grant {
        params.insert((*key).to_string(), Value::from(*value));
    }
    params.insert("client_id".to_string(), Value::from(client_id));
    params.insert("client_secret".to_string(), Value::from(client_secret));

    TOKEN.request(&[], params)
}

/// Request trading a refresh token for a new access token
pub(crate) fn refresh_request(config: &ClientConfig, refresh_token: &str) -> Result<OperationRequest> {
    token_request(
        config,
        &[("grant_type", "refresh_token"), ("refresh_token", refresh_token)],
    )
}

/// OAuth2 authorization flow
pub struct OAuth<'a> {
    pub(crate) client: &'a HubSpot,
}

impl OAuth<'_> {
    /// URL to send a user to so they can authorize the application
    pub fn authorization_url(&self, scopes: &[&str]) -> Result<String> {
        let config = self.client.config();
        let client_id = config.client_id.as_deref().ok_or(HubSpotError::NoClientCredentials)?;
        let redirect_uri = config
            .redirect_uri
            .as_deref()
            .ok_or_else(|| HubSpotError::Config("redirect_uri is required for authorization".to_string()))?;

        let mut url = Url::parse(AUTHORIZE_URL)?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &scopes.join(" "));
        Ok(url.to_string())
    }

    /// Trade an authorization code for tokens and start using them
    pub fn exchange_code(&self, code: &str) -> Result<Token> {
        let config = self.client.config();
        let redirect_uri = config.redirect_uri.as_deref().ok_or_else(|| {
            HubSpotError::Config("redirect_uri is required to exchange an authorization code".to_string())
        })?;

        let request = token_request(
            config,
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ],
        )?;
        let token: Token = self.client.send(&request, None)?.apply()?;
        self.client.set_token(&token);
        Ok(token)
    }

    /// Renew the access token with the stored refresh token
    pub fn refresh_access_token(&self) -> Result<Token> {
        self.client.refresh_access_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Encoding;
    use serde_json::json;

    #[test]
    fn test_refresh_request_shape() {
        let config = ClientConfig::with_access_token("T1")
            .refresh_token("R1")
            .client_credentials("id", "secret");
        let request = refresh_request(&config, "R1").unwrap();

        assert_eq!(request.path, "oauth/v1/token");
        assert_eq!(request.effective_encoding(), Encoding::Form);
        assert_eq!(
            Value::Object(request.params),
            json!({
                "grant_type": "refresh_token",
                "client_id": "id",
                "client_secret": "secret",
                "refresh_token": "R1"
            })
        );
    }

    #[test]
    fn test_refresh_request_ignores_redirect_uri() {
        let config = ClientConfig::with_access_token("T1")
            .refresh_token("R1")
            .client_credentials("id", "secret")
            .redirect_uri("https://app.example.com/callback");
        let request = refresh_request(&config, "R1").unwrap();

        assert_eq!(request.params.len(), 4);
        assert!(!request.params.contains_key("redirect_uri"));
    }

    #[test]
    fn test_refresh_request_needs_client_credentials() {
        let config = ClientConfig::with_access_token("T1");
        assert!(matches!(
            refresh_request(&config, "R1"),
            Err(HubSpotError::NoClientCredentials)
        ));
    }

    #[test]
    fn test_authorization_url() {
        let client = HubSpot::new(
            ClientConfig::with_api_key("k")
                .client_credentials("id", "secret")
                .redirect_uri("https://app.example.com/callback"),
        )
        .unwrap();

        let url = client.oauth().authorization_url(&["contacts", "timeline"]).unwrap();
        assert_eq!(
            url,
            "https://app.hubspot.com/oauth/authorize?client_id=id&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&scope=contacts+timeline"
        );
    }
}
