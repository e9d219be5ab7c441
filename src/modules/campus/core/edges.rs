use crate::shared::core::primitives::{RecordId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A registration or club membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEdge {
    pub edge_id: String,
    pub user_id: UserId,
    pub record_id: RecordId,
    pub created_at: i64,
}

impl MembershipEdge {
    pub fn new(user_id: UserId, record_id: RecordId, created_at: i64) -> Self {
        Self {
            edge_id: Uuid::now_v7().to_string(),
            user_id,
            record_id,
            created_at,
        }
    }
}

/// Record ids the current user is linked to, keyed by record rather than by
/// edge so duplicate rows collapse into one membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipIndex {
    record_ids: HashSet<RecordId>,
}

impl MembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a MembershipEdge>) -> Self {
        Self {
            record_ids: edges.into_iter().map(|e| e.record_id.clone()).collect(),
        }
    }

    pub fn contains(&self, record_id: &RecordId) -> bool {
        self.record_ids.contains(record_id)
    }

    pub fn insert(&mut self, record_id: RecordId) -> bool {
        self.record_ids.insert(record_id)
    }

    pub fn remove(&mut self, record_id: &RecordId) -> bool {
        self.record_ids.remove(record_id)
    }

    pub fn clear(&mut self) {
        self.record_ids.clear();
    }

    pub fn len(&self) -> usize {
        self.record_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_ids.is_empty()
    }
}
