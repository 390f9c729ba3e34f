use std::sync::Arc;

use crate::app::{NewsError, Result};
use crate::auth::{AuthSession, Authenticator};
use crate::domain::User;
use crate::store::KeyValueStore;

pub const SESSION_KEY: &str = "session";

/// Device-local stand-in for the hosted identity provider. Keeps the signed-in
/// user under [`SESSION_KEY`] so the session survives restarts.
pub struct LocalAuthProvider {
    kv: Arc<dyn KeyValueStore + Send + Sync>,
    session: Arc<AuthSession>,
}

impl LocalAuthProvider {
    pub fn new(kv: Arc<dyn KeyValueStore + Send + Sync>, session: Arc<AuthSession>) -> Self {
        Self { kv, session }
    }

    /// Publish the persisted user, if any. Unreadable data means signed out.
    pub fn restore(&self) -> Option<User> {
        let user = match self.kv.get(SESSION_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Option<User>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding corrupt session: {}", e);
                None
            }),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read session: {}", e);
                None
            }
        };
        self.session.set_user(user.clone());
        user
    }

    pub fn sign_in(&self, email: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(NewsError::Validation(format!(
                "'{}' is not an email address",
                email
            )));
        }

        let user = User::new(email.to_lowercase(), email);
        self.persist(Some(&user))?;
        self.session.set_user(Some(user.clone()));
        tracing::info!("Signed in as {}", user.email);
        Ok(user)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.persist(None)?;
        self.session.set_user(None);
        tracing::info!("Signed out");
        Ok(())
    }

    fn persist(&self, user: Option<&User>) -> Result<()> {
        let raw =
            serde_json::to_string(&user).map_err(|e| NewsError::write_failed("session", e))?;
        self.kv
            .set(SESSION_KEY, &raw)
            .map_err(|e| NewsError::write_failed("session", e))
    }
}

impl Authenticator for LocalAuthProvider {
    fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }
}
