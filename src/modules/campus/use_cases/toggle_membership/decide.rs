// Pure decision functions for join/leave.
//
// Rules, in order
// - No user: redirect to sign-in.
// - A mutation on the same record is outstanding: reject as in flight.
// - Join on a record already in the index: answered locally when the collection guards duplicates.
// - Otherwise dispatch to the store.

use crate::modules::campus::core::records::CampusRecord;
use crate::modules::campus::core::view_state::ViewState;
use crate::modules::campus::use_cases::toggle_membership::decision::{Decision, MutationOutcome};
use crate::shared::core::primitives::RecordId;

pub fn decide_join<R: CampusRecord>(
    state: &ViewState<R>,
    record_id: &RecordId,
    guard_duplicates: bool,
) -> Decision {
    let Some(user_id) = state.session.user_id() else {
        return Decision::Skip {
            outcome: MutationOutcome::RedirectedToSignIn,
        };
    };
    if state.in_flight.contains(record_id) {
        return Decision::Skip {
            outcome: MutationOutcome::InFlight,
        };
    }
    if guard_duplicates && state.edges.contains(record_id) {
        return Decision::Skip {
            outcome: MutationOutcome::AlreadyMember,
        };
    }
    Decision::Dispatch {
        user_id: user_id.clone(),
        epoch: state.epoch,
    }
}

pub fn decide_leave<R: CampusRecord>(state: &ViewState<R>, record_id: &RecordId) -> Decision {
    let Some(user_id) = state.session.user_id() else {
        return Decision::Skip {
            outcome: MutationOutcome::RedirectedToSignIn,
        };
    };
    if state.in_flight.contains(record_id) {
        return Decision::Skip {
            outcome: MutationOutcome::InFlight,
        };
    }
    Decision::Dispatch {
        user_id: user_id.clone(),
        epoch: state.epoch,
    }
}
