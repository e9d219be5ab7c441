// In memory implementation of the SessionProvider port.
//
// Purpose
// - Drive views through sign-in, sign-out and token refresh without an identity backend.

use crate::shared::core::primitives::UserId;
use crate::shared::core::session::{Session, SessionChange};
use crate::shared::infrastructure::session::{SessionError, SessionProvider, SessionSubscription};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{RwLock, broadcast};

const CHANGE_CAPACITY: usize = 16;

pub struct InMemorySessionProvider {
    session: RwLock<Session>,
    changes: broadcast::Sender<SessionChange>,
    is_offline: AtomicBool,
}

impl Default for InMemorySessionProvider {
    fn default() -> Self {
        Self::with_session(Session::Anonymous)
    }
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            session: RwLock::new(session),
            changes,
            is_offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.is_offline.store(offline, Ordering::SeqCst);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }

    pub async fn sign_in(&self, user_id: UserId) {
        *self.session.write().await = Session::Authenticated(user_id.clone());
        self.publish(SessionChange::signed_in(user_id));
    }

    pub async fn refresh_token(&self) {
        let session = self.session.read().await.clone();
        if let Session::Authenticated(user_id) = session {
            self.publish(SessionChange::token_refreshed(user_id));
        }
    }

    fn publish(&self, change: SessionChange) {
        // no subscribers is not an error
        let _ = self.changes.send(change);
    }

    fn ensure_online(&self) -> Result<(), SessionError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(SessionError::Backend("Session provider offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn current_session(&self) -> Result<Session, SessionError> {
        self.ensure_online()?;
        Ok(self.session.read().await.clone())
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.changes.subscribe())
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.ensure_online()?;
        *self.session.write().await = Session::Anonymous;
        self.publish(SessionChange::signed_out());
        Ok(())
    }
}
