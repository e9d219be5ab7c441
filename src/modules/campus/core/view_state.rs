// Local state of one list view (events or clubs).
//
// Invariants
// - `edges` and `in_flight` only ever concern `session`'s user; both are emptied on every identity change.
// - `epoch` increases on every identity change so late responses can be recognised and dropped.
// - Nothing is applied once `torn_down` is set.

use crate::modules::campus::core::edges::MembershipIndex;
use crate::modules::campus::core::records::CampusRecord;
use crate::shared::core::primitives::RecordId;
use crate::shared::core::session::Session;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Loaded,
}

#[derive(Debug, Clone)]
pub struct ViewState<R> {
    pub session: Session,
    pub records: Vec<R>,
    pub edges: MembershipIndex,
    pub phase: LoadPhase,
    pub epoch: u64,
    pub in_flight: HashSet<RecordId>,
    pub torn_down: bool,
}

impl<R> Default for ViewState<R> {
    fn default() -> Self {
        Self {
            session: Session::Anonymous,
            records: Vec::new(),
            edges: MembershipIndex::new(),
            phase: LoadPhase::Loading,
            epoch: 0,
            in_flight: HashSet::new(),
            torn_down: false,
        }
    }
}

impl<R: CampusRecord> ViewState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_member(&self, record_id: &RecordId) -> bool {
        self.session.is_authenticated() && self.edges.contains(record_id)
    }

    /// Installs `session`. Returns true when the authenticated identity changed,
    /// in which case the membership index and the in-flight set have been emptied.
    pub fn apply_session(&mut self, session: Session) -> bool {
        let changed = self.session.user_id() != session.user_id();
        if changed {
            self.epoch += 1;
            self.edges.clear();
            self.in_flight.clear();
        }
        self.session = session;
        changed
    }

    /// Whether a response issued at `epoch` may still be applied.
    pub fn accepts(&self, epoch: u64) -> bool {
        !self.torn_down && self.epoch == epoch
    }

    pub fn record(&self, record_id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == record_id)
    }

    pub fn display_name(&self, record_id: &RecordId) -> String {
        self.record(record_id)
            .map(|r| r.display_name().to_string())
            .unwrap_or_else(|| record_id.to_string())
    }
}
