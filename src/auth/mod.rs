//! Authentication state.
//!
//! Sign-in itself belongs to an external provider; this module only tracks
//! who is signed in and lets consumers observe changes.

pub mod local;

use tokio::sync::watch;

use crate::domain::User;

pub use local::LocalAuthProvider;

/// Read-only view of the current authentication state.
pub trait Authenticator {
    fn current_user(&self) -> Option<User>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Observable signed-in user. The provider owning the session is the only writer.
#[derive(Debug)]
pub struct AuthSession {
    tx: watch::Sender<Option<User>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSession {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    pub(crate) fn set_user(&self, user: Option<User>) {
        self.tx.send_replace(user);
    }

    /// Start observing. Dropping the subscription unsubscribes.
    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Authenticator for AuthSession {
    fn current_user(&self) -> Option<User> {
        self.tx.borrow().clone()
    }
}

pub struct AuthSubscription {
    rx: watch::Receiver<Option<User>>,
}

impl AuthSubscription {
    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the next sign-in or sign-out. Returns `None` once the
    /// session is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        let signed_in = self.rx.borrow_and_update().is_some();
        Some(signed_in)
    }
}
