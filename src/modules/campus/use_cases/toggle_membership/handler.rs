// Join/leave command handler for one collection.
//
// Responsibilities
// - Decide against the current view state and mark the record in flight.
// - Send one insert or delete to the store.
// - Patch the membership index only after the store acknowledged, and only for the identity
//   the write was issued for.
// - Surface the result as a notice; never retry.

use crate::modules::campus::adapters::outbound::store::EdgeStore;
use crate::modules::campus::core::collections::{Collection, Wording};
use crate::modules::campus::core::view_state::ViewState;
use crate::modules::campus::errors::ApplicationError;
use crate::modules::campus::use_cases::toggle_membership::decide::{decide_join, decide_leave};
use crate::modules::campus::use_cases::toggle_membership::decision::{Decision, MutationOutcome};
use crate::shared::core::primitives::RecordId;
use crate::shared::infrastructure::navigation::{Navigator, Route};
use crate::shared::infrastructure::notices::{Notice, Notifier};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Join,
    Leave,
}

pub struct MembershipMutator<C: Collection> {
    edges: Arc<dyn EdgeStore<C>>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: Arc<RwLock<ViewState<C::Record>>>,
}

impl<C: Collection> MembershipMutator<C> {
    pub fn new(
        edges: Arc<dyn EdgeStore<C>>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        state: Arc<RwLock<ViewState<C::Record>>>,
    ) -> Self {
        Self {
            edges,
            navigator,
            notifier,
            state,
        }
    }

    pub async fn join(&self, record_id: &RecordId) -> Result<MutationOutcome, ApplicationError> {
        self.handle(Action::Join, record_id).await
    }

    pub async fn leave(&self, record_id: &RecordId) -> Result<MutationOutcome, ApplicationError> {
        self.handle(Action::Leave, record_id).await
    }

    async fn handle(
        &self,
        action: Action,
        record_id: &RecordId,
    ) -> Result<MutationOutcome, ApplicationError> {
        let (decision, name) = {
            let mut state = self.state.write().await;
            if state.torn_down {
                return Err(ApplicationError::TornDown);
            }
            let decision = match action {
                Action::Join => decide_join(&state, record_id, C::GUARD_DUPLICATE_JOIN),
                Action::Leave => decide_leave(&state, record_id),
            };
            if matches!(decision, Decision::Dispatch { .. }) {
                state.in_flight.insert(record_id.clone());
            }
            (decision, state.display_name(record_id))
        };

        let (user_id, epoch) = match decision {
            Decision::Skip { outcome } => {
                self.report_skip(outcome, record_id, &name);
                return Ok(outcome);
            }
            Decision::Dispatch { user_id, epoch } => (user_id, epoch),
        };

        let result = match action {
            Action::Join => self.edges.insert(&user_id, record_id).await.map(|_| ()),
            Action::Leave => self.edges.delete(&user_id, record_id).await,
        };

        let mut state = self.state.write().await;
        let current = state.accepts(epoch);
        if state.epoch == epoch {
            state.in_flight.remove(record_id);
        }
        match result {
            Ok(()) => {
                if current {
                    match action {
                        Action::Join => state.edges.insert(record_id.clone()),
                        Action::Leave => state.edges.remove(record_id),
                    };
                }
                drop(state);
                info!(collection = C::TABLE, %user_id, %record_id, ?action, "membership updated");
                let wording = C::WORDING;
                let (outcome, notice) = match action {
                    Action::Join => (
                        MutationOutcome::Joined,
                        Notice::info(wording.joined, Wording::detail(wording.joined_detail, &name)),
                    ),
                    Action::Leave => (
                        MutationOutcome::Left,
                        Notice::info(wording.left, Wording::detail(wording.left_detail, &name)),
                    ),
                };
                if current {
                    self.notifier.notify(notice);
                } else {
                    debug!(collection = C::TABLE, %record_id, "acknowledged write no longer matches the view");
                }
                Ok(outcome)
            }
            Err(e) => {
                drop(state);
                warn!(collection = C::TABLE, %user_id, %record_id, ?action, error = %e, "membership update failed");
                if current {
                    let title = match action {
                        Action::Join => C::WORDING.join_failed,
                        Action::Leave => C::WORDING.leave_failed,
                    };
                    self.notifier
                        .notify(Notice::destructive(title, e.to_string()));
                }
                Err(e.into())
            }
        }
    }

    fn report_skip(&self, outcome: MutationOutcome, record_id: &RecordId, name: &str) {
        match outcome {
            MutationOutcome::RedirectedToSignIn => {
                self.notifier.notify(Notice::info(
                    "Sign in required",
                    C::WORDING.sign_in_required,
                ));
                self.navigator.navigate(Route::SignIn);
            }
            MutationOutcome::AlreadyMember => {
                self.notifier.notify(Notice::info(
                    C::WORDING.already_member,
                    Wording::detail(C::WORDING.already_member_detail, name),
                ));
            }
            MutationOutcome::InFlight => {
                debug!(collection = C::TABLE, %record_id, "membership update already in flight");
            }
            MutationOutcome::Joined | MutationOutcome::Left => {}
        }
    }
}
