use crate::modules::campus::core::collections::Collection;
use crate::modules::campus::core::view_state::ViewState;
use crate::shared::core::session::{Session, SessionChange};
use crate::shared::infrastructure::session::{SessionProvider, SessionSubscription};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Keeps the view's session in line with the session provider.
pub struct SessionObserver<C: Collection> {
    session: Arc<dyn SessionProvider>,
    state: Arc<RwLock<ViewState<C::Record>>>,
}

impl<C: Collection> SessionObserver<C> {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        state: Arc<RwLock<ViewState<C::Record>>>,
    ) -> Self {
        Self { session, state }
    }

    pub fn subscribe(&self) -> SessionSubscription {
        self.session.subscribe()
    }

    /// One lookup of the existing session. A failed lookup counts as anonymous.
    /// Returns true when the identity changed.
    pub async fn lookup(&self) -> bool {
        let session = match self.session.current_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(collection = C::TABLE, error = %e, "session lookup failed");
                Session::Anonymous
            }
        };
        let mut state = self.state.write().await;
        if state.torn_down {
            return false;
        }
        state.apply_session(session)
    }

    /// Applies one transition from the subscription. Returns true when the identity changed.
    pub async fn apply(&self, change: SessionChange) -> bool {
        let mut state = self.state.write().await;
        if state.torn_down {
            return false;
        }
        let changed = state.apply_session(change.session);
        info!(
            collection = C::TABLE,
            transition = ?change.transition,
            identity_changed = changed,
            "session transition"
        );
        changed
    }
}
