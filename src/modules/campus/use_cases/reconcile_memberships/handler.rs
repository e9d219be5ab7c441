// Derives the membership index from the store for the current user.
//
// Responsibilities
// - Skip when nobody is signed in.
// - Replace the index with the set of record ids of the user's edges.
// - Drop the result if the identity changed or the view was torn down meanwhile.

use crate::modules::campus::adapters::outbound::store::EdgeStore;
use crate::modules::campus::core::collections::Collection;
use crate::modules::campus::core::edges::MembershipIndex;
use crate::modules::campus::core::view_state::ViewState;
use crate::modules::campus::errors::ApplicationError;
use crate::shared::infrastructure::notices::{Notice, Notifier};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied { memberships: usize },
    Skipped,
    Stale,
}

pub struct MembershipReconciler<C: Collection> {
    edges: Arc<dyn EdgeStore<C>>,
    notifier: Arc<dyn Notifier>,
    state: Arc<RwLock<ViewState<C::Record>>>,
}

impl<C: Collection> MembershipReconciler<C> {
    pub fn new(
        edges: Arc<dyn EdgeStore<C>>,
        notifier: Arc<dyn Notifier>,
        state: Arc<RwLock<ViewState<C::Record>>>,
    ) -> Self {
        Self {
            edges,
            notifier,
            state,
        }
    }

    pub async fn reconcile(&self) -> Result<ReconcileOutcome, ApplicationError> {
        let (user_id, epoch) = {
            let state = self.state.read().await;
            match state.session.user_id() {
                Some(user_id) if !state.torn_down => (user_id.clone(), state.epoch),
                _ => return Ok(ReconcileOutcome::Skipped),
            }
        };

        match self.edges.list_for_user(&user_id).await {
            Ok(rows) => {
                let mut state = self.state.write().await;
                if !state.accepts(epoch) {
                    debug!(collection = C::TABLE, %user_id, "dropping stale membership read");
                    return Ok(ReconcileOutcome::Stale);
                }
                state.edges =
                    MembershipIndex::from_edges(rows.iter().filter(|e| e.user_id == user_id));
                let memberships = state.edges.len();
                info!(collection = C::TABLE, %user_id, memberships, "memberships reconciled");
                Ok(ReconcileOutcome::Applied { memberships })
            }
            Err(e) => {
                warn!(collection = C::TABLE, %user_id, error = %e, "membership fetch failed");
                self.notifier.notify(Notice::destructive(
                    C::WORDING.memberships_failed,
                    e.to_string(),
                ));
                Err(e.into())
            }
        }
    }
}
