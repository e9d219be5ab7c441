// Port for the identity/session collaborator.
//
// Responsibilities
// - Answer "who is signed in right now".
// - Deliver every later auth transition to subscribers until they drop their handle.
// - Sign the current user out.

use crate::shared::core::session::{Session, SessionChange};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session backend error: {0}")]
    Backend(String),
}

/// Receiving end of a session subscription. Dropping it unsubscribes.
pub struct SessionSubscription {
    receiver: broadcast::Receiver<SessionChange>,
}

impl SessionSubscription {
    pub fn new(receiver: broadcast::Receiver<SessionChange>) -> Self {
        Self { receiver }
    }

    /// Waits for the next transition. `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<SessionChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "session subscription lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> Result<Session, SessionError>;
    fn subscribe(&self) -> SessionSubscription;
    async fn sign_out(&self) -> Result<(), SessionError>;
}

pub mod in_memory;
