use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};

/// Token represents an OAuth2 token as returned by the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Access token for API requests
    pub access_token: String,

    /// Refresh token; absent when the provider does not rotate it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Token type (usually "bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Token lifetime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Token {
    /// Create a new Token
    pub fn new(access_token: String, refresh_token: Option<String>, expires_in: Option<i64>) -> Self {
        Token {
            access_token,
            refresh_token,
            token_type: default_token_type(),
            expires_in,
        }
    }
}

/// Credential attached to one outgoing request.
#[derive(Clone, PartialEq, Eq)]
pub(crate) enum Auth {
    /// `hapikey` query parameter
    ApiKey(String),
    /// `Authorization: Bearer` header
    Bearer(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TokenState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Mutable token pair shared by every clone of a client.
///
/// Only the access and refresh tokens change after construction. Writers
/// hold the write lock for the whole update so both values land together.
#[derive(Debug, Default)]
pub(crate) struct TokenStore {
    state: RwLock<TokenState>,
}

impl TokenStore {
    pub(crate) fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        TokenStore {
            state: RwLock::new(TokenState {
                access_token,
                refresh_token,
                expires_at: None,
            }),
        }
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    pub(crate) fn refresh_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    pub(crate) fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).expires_at
    }

    /// Store a freshly issued token; keeps the old refresh token unless rotated.
    pub(crate) fn store(&self, token: &Token) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.access_token = Some(token.access_token.clone());
        if let Some(ref refresh) = token.refresh_token {
            state.refresh_token = Some(refresh.clone());
        }
        // Lifetimes chrono cannot represent are treated as unknown
        state.expires_at = token
            .expires_in
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_deserialization() {
        let token: Token = serde_json::from_str(
            r#"{"access_token": "T2", "refresh_token": "R2", "expires_in": 21600}"#,
        )
        .unwrap();

        assert_eq!(token.access_token, "T2");
        assert_eq!(token.refresh_token.as_deref(), Some("R2"));
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, Some(21600));
    }

    #[test]
    fn test_store_keeps_refresh_token_when_not_rotated() {
        let store = TokenStore::new(Some("T1".to_string()), Some("R1".to_string()));
        store.store(&Token::new("T2".to_string(), None, None));

        assert_eq!(store.access_token().as_deref(), Some("T2"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));
        assert!(store.expires_at().is_none());
    }

    #[test]
    fn test_store_rotates_and_tracks_expiry() {
        let store = TokenStore::new(Some("T1".to_string()), Some("R1".to_string()));
        store.store(&Token::new("T2".to_string(), Some("R2".to_string()), Some(3600)));

        assert_eq!(store.refresh_token().as_deref(), Some("R2"));
        let expires_at = store.expires_at().unwrap();
        assert!(expires_at > Utc::now() + Duration::seconds(3500));
    }

    #[test]
    fn test_store_out_of_range_expiry() {
        let store = TokenStore::new(Some("T1".to_string()), None);
        store.store(&Token::new("T2".to_string(), None, Some(i64::MAX)));
        assert_eq!(store.access_token().as_deref(), Some("T2"));
        assert!(store.expires_at().is_none());

        store.store(&Token::new("T3".to_string(), None, Some(i64::MIN)));
        assert!(store.expires_at().is_none());
    }
}
