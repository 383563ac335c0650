use crate::domain::ports::AuthServiceRef;
use crate::domain::session::Session;
use crate::error::{PaymentError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the live operator session shared by every outgoing gateway call.
///
/// Cloning the store shares the same session. The session is only written by
/// `login` and `logout`, each replacing it whole.
#[derive(Clone)]
pub struct SessionStore {
    auth: AuthServiceRef,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new(auth: AuthServiceRef) -> Self {
        Self {
            auth,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Authenticates against the gateway and makes the resulting session current.
    ///
    /// A failed attempt leaves whatever session was current untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username.is_empty() {
            return Err(PaymentError::Auth("username is required".to_string()));
        }

        let token = match self.auth.login(username, password).await {
            Ok(token) if !token.is_empty() => token,
            Ok(_) => {
                tracing::warn!(username, "login returned an empty token");
                return Err(PaymentError::Auth("empty token".to_string()));
            }
            Err(e) => {
                tracing::warn!(username, "login failed: {}", e);
                return Err(match e {
                    PaymentError::Auth(_) => e,
                    other => PaymentError::Auth(other.to_string()),
                });
            }
        };

        let session = Session::new(username, token);
        *self.current.write().await = Some(session.clone());
        tracing::info!(username, "operator logged in");
        Ok(session)
    }

    /// Drops the current session. Safe to call when already logged out.
    pub async fn logout(&self) {
        if let Some(session) = self.current.write().await.take() {
            tracing::info!(username = session.operator(), "operator logged out");
        }
    }

    /// Bearer credential for the next gateway call.
    pub async fn current_credential(&self) -> Result<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.credential().to_string())
            .ok_or_else(PaymentError::unauthenticated)
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::MockGateway;

    #[tokio::test]
    async fn test_login_stores_session() {
        let gateway = Arc::new(MockGateway::new());
        gateway.accept_login("jwt-1");
        let store = SessionStore::new(gateway.clone());

        let session = store.login("merchant1", "secret").await.unwrap();
        assert_eq!(session.operator(), "merchant1");
        assert_eq!(store.current_credential().await.unwrap(), "jwt-1");
        assert!(store.is_authenticated().await);
        assert_eq!(gateway.login_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_no_state() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_login(Err(PaymentError::Gateway("connection refused".to_string())));
        let store = SessionStore::new(gateway);

        let result = store.login("merchant1", "wrong").await;
        assert!(matches!(result, Err(PaymentError::Auth(_))));
        assert!(store.current().await.is_none());
        assert!(matches!(
            store.current_credential().await,
            Err(PaymentError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let gateway = Arc::new(MockGateway::new());
        gateway.accept_login("");
        let store = SessionStore::new(gateway);

        assert!(matches!(
            store.login("merchant1", "secret").await,
            Err(PaymentError::Auth(_))
        ));
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_empty_username_skips_network() {
        let gateway = Arc::new(MockGateway::new());
        let store = SessionStore::new(gateway.clone());

        assert!(matches!(
            store.login("", "secret").await,
            Err(PaymentError::Auth(_))
        ));
        assert_eq!(gateway.login_calls(), 0);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let gateway = Arc::new(MockGateway::new());
        gateway.accept_login("jwt-1");
        let store = SessionStore::new(gateway);
        store.login("merchant1", "secret").await.unwrap();

        store.logout().await;
        store.logout().await;
        assert!(!store.is_authenticated().await);
        assert!(matches!(
            store.current_credential().await,
            Err(PaymentError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_session() {
        let gateway = Arc::new(MockGateway::new());
        gateway.accept_login("jwt-1");
        let store = SessionStore::new(gateway);
        let shared = store.clone();

        store.login("merchant1", "secret").await.unwrap();
        assert_eq!(shared.current_credential().await.unwrap(), "jwt-1");

        shared.logout().await;
        assert!(!store.is_authenticated().await);
    }
}
