//! Session gate and login/logout flows
//!
//! A session is nothing more than the token in the [`TokenStore`]. The gate
//! decides at startup whether that token still looks usable; the
//! [`Authenticator`] creates and destroys it.

use std::sync::Arc;

use common::TokenStore;
use notes_api::{AuthApi, Credentials};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    claims::{peek_claims, unix_now},
    error::AuthResult,
};

/// Where the user lands on startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

/// Startup check of the persisted session
#[derive(Debug, Clone)]
pub struct SessionGate {
    tokens: Arc<dyn TokenStore>,
}

impl SessionGate {
    /// Create a gate over the given token store
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    /// Check the stored token against the wall clock
    pub fn check(&self) -> SessionState {
        self.check_at(unix_now())
    }

    /// Check the stored token against `now` (seconds since the epoch)
    ///
    /// Expired and unreadable tokens are erased. A store that cannot be read
    /// counts as logged out but is left alone.
    pub fn check_at(&self, now: u64) -> SessionState {
        let token = match self.tokens.get() {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!("No stored session");
                return SessionState::Unauthenticated;
            }
            Err(e) => {
                warn!("Failed to read stored session: {}", e);
                return SessionState::Unauthenticated;
            }
        };

        match peek_claims(&token) {
            Ok(claims) if !claims.is_expired_at(now) => {
                info!("Stored session valid until {}", claims.exp);
                SessionState::Authenticated
            }
            Ok(claims) => {
                info!("Stored session expired at {}", claims.exp);
                self.erase();
                SessionState::Unauthenticated
            }
            Err(e) => {
                warn!("Discarding unreadable session token: {}", e);
                self.erase();
                SessionState::Unauthenticated
            }
        }
    }

    fn erase(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!("Failed to erase session token: {}", e);
        }
    }
}

/// Login, registration and logout against the server and the token store
#[derive(Debug)]
pub struct Authenticator<A> {
    api: Arc<A>,
    tokens: Arc<dyn TokenStore>,
}

impl<A> Clone for Authenticator<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<A: AuthApi> Authenticator<A> {
    pub fn new(api: Arc<A>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// Log in and persist the returned token, replacing any previous one
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<()> {
        info!("Login attempt for user: {}", username);

        let response = self
            .api
            .login(&Credentials::new(username, password))
            .await?;
        self.tokens.set(&response.token)?;

        info!("Session created for user: {}", username);
        Ok(())
    }

    /// Create an account; does not log in
    pub async fn register(&self, username: &str, password: &str) -> AuthResult<Value> {
        info!("Registering user: {}", username);

        let payload = self
            .api
            .register(&Credentials::new(username, password))
            .await?;
        Ok(payload)
    }

    /// Forget the stored token
    pub fn logout(&self) -> AuthResult<()> {
        info!("Deleting session");
        self.tokens.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::{MemoryTokenStore, StoreError, StoreResult};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use notes_api::{ApiError, ApiResult, LoginResponse};
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio_test::{assert_err, assert_ok};

    use crate::error::AuthError;

    fn token_expiring_at(exp: u64) -> String {
        encode(
            &Header::default(),
            &json!({"exp": exp, "sub": 1}),
            &EncodingKey::from_secret(b"server-only"),
        )
        .unwrap()
    }

    #[test]
    fn test_gate_without_token() {
        let gate = SessionGate::new(Arc::new(MemoryTokenStore::new()));
        assert_eq!(gate.check_at(200), SessionState::Unauthenticated);
    }

    #[test]
    fn test_gate_expired_token_is_erased() {
        let tokens = Arc::new(MemoryTokenStore::with_token(token_expiring_at(100)));
        let gate = SessionGate::new(tokens.clone());

        assert_eq!(gate.check_at(200), SessionState::Unauthenticated);
        assert_eq!(tokens.get().unwrap(), None);
    }

    #[test]
    fn test_gate_live_token_is_kept() {
        let token = token_expiring_at(200);
        let tokens = Arc::new(MemoryTokenStore::with_token(token.clone()));
        let gate = SessionGate::new(tokens.clone());

        // Expiry equal to now still counts as live
        assert_eq!(gate.check_at(200), SessionState::Authenticated);
        assert_eq!(gate.check_at(150), SessionState::Authenticated);
        assert_eq!(tokens.get().unwrap(), Some(token));
    }

    #[test]
    fn test_gate_malformed_token_treated_as_expired() {
        let tokens = Arc::new(MemoryTokenStore::with_token("garbage"));
        let gate = SessionGate::new(tokens.clone());

        assert_eq!(gate.check_at(0), SessionState::Unauthenticated);
        assert_eq!(tokens.get().unwrap(), None);
    }

    /// Store whose reads always fail; remembers whether anything tried to clear it
    #[derive(Debug, Default)]
    struct UnreadableStore {
        cleared: AtomicBool,
    }

    impl TokenStore for UnreadableStore {
        fn get(&self) -> StoreResult<Option<String>> {
            Err(StoreError::Poisoned)
        }

        fn set(&self, _token: &str) -> StoreResult<()> {
            Ok(())
        }

        fn clear(&self) -> StoreResult<()> {
            self.cleared.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_gate_unreadable_store_is_left_alone() {
        let tokens = Arc::new(UnreadableStore::default());
        let gate = SessionGate::new(tokens.clone());

        assert_eq!(gate.check_at(0), SessionState::Unauthenticated);
        assert!(!tokens.cleared.load(Ordering::SeqCst));
    }

    #[test]
    fn test_gate_uses_wall_clock() {
        let tokens = Arc::new(MemoryTokenStore::with_token(token_expiring_at(
            unix_now() + 3600,
        )));
        assert_eq!(
            SessionGate::new(tokens).check(),
            SessionState::Authenticated
        );
    }

    #[derive(Default)]
    struct FakeAuth {
        logins: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AuthApi for FakeAuth {
        async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
            self.logins.lock().unwrap().push(credentials.username.clone());
            if credentials.password == "secret" {
                Ok(LoginResponse {
                    token: "fresh-token".to_string(),
                })
            } else {
                Err(ApiError::Server {
                    status: 401,
                    payload: json!({"message": "Invalid username or password"}),
                })
            }
        }

        async fn register(&self, credentials: &Credentials) -> ApiResult<Value> {
            Ok(json!({"message": format!("registered {}", credentials.username)}))
        }
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let tokens = Arc::new(MemoryTokenStore::with_token("old-token"));
        let auth = Authenticator::new(Arc::new(FakeAuth::default()), tokens.clone());

        assert_ok!(auth.login("alice", "secret").await);
        assert_eq!(tokens.get().unwrap().as_deref(), Some("fresh-token"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_untouched() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let api = Arc::new(FakeAuth::default());
        let auth = Authenticator::new(api.clone(), tokens.clone());

        let err = assert_err!(auth.login("alice", "wrong").await);
        assert!(matches!(err, AuthError::Api(_)));
        assert_eq!(err.message(), "Invalid username or password");
        assert_eq!(tokens.get().unwrap(), None);
        assert_eq!(*api.logins.lock().unwrap(), vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn test_register_does_not_log_in() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let auth = Authenticator::new(Arc::new(FakeAuth::default()), tokens.clone());

        let payload = assert_ok!(auth.register("bob", "pw").await);
        assert_eq!(payload["message"], "registered bob");
        assert_eq!(tokens.get().unwrap(), None);
    }

    #[test]
    fn test_logout_clears_token() {
        let tokens = Arc::new(MemoryTokenStore::with_token("t"));
        let auth = Authenticator::new(Arc::new(FakeAuth::default()), tokens.clone());

        auth.logout().unwrap();
        assert_eq!(tokens.get().unwrap(), None);
        assert_eq!(
            SessionGate::new(tokens).check_at(0),
            SessionState::Unauthenticated
        );
    }
}
