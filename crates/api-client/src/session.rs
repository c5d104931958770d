//! Session token storage
//!
//! Holds the tokens issued at login. One store is shared between the REST
//! client (which attaches the access token to requests) and the login flow
//! (which fills it).

use parking_lot::RwLock;

use crate::models::AuthTokens;

/// In-memory store for the current session's tokens
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: RwLock<Option<AuthTokens>>,
}

impl TokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored tokens
    pub fn set(&self, tokens: AuthTokens) {
        *self.tokens.write() = Some(tokens);
    }

    /// Current tokens, if any
    pub fn get(&self) -> Option<AuthTokens> {
        self.tokens.read().clone()
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|t| t.access_token.clone())
    }

    /// Current refresh token, if any
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|t| t.refresh_token.clone())
    }

    /// Whether a session is active
    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().is_some()
    }

    /// Forget the stored tokens
    pub fn clear(&self) {
        *self.tokens.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "access_123".to_string(),
            refresh_token: "refresh_123".to_string(),
        }
    }

    #[test]
    fn test_empty_store() {
        let store = TokenStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.access_token(), None);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_and_clear() {
        let store = TokenStore::new();
        store.set(tokens());

        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("access_123"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh_123"));

        store.clear();
        assert!(!store.is_authenticated());
    }
}
