// Ports for the relational store collaborator.
//
// Boundaries
// - The store owns the schema and enforces (user, record) uniqueness on edge tables.
// - Implementations: in memory (tests, demo) and PostgREST over HTTP.

use crate::modules::campus::core::collections::Collection;
use crate::modules::campus::core::edges::MembershipEdge;
use crate::modules::campus::core::profile::{ClubMembershipDetail, Profile};
use crate::modules::campus::core::records::SortKey;
use crate::shared::core::primitives::{RecordId, UserId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate {table} row for user {user_id} and record {record_id}")]
    UniqueViolation {
        table: String,
        user_id: UserId,
        record_id: RecordId,
    },

    #[error("no {table} row found")]
    NotFound { table: String },

    #[error("malformed {table} row: {reason}")]
    Malformed { table: String, reason: String },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait RecordStore<C: Collection>: Send + Sync {
    async fn list_ordered(&self, order_by: SortKey) -> Result<Vec<C::Record>, StoreError>;
}

#[async_trait]
pub trait EdgeStore<C: Collection>: Send + Sync {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<MembershipEdge>, StoreError>;

    async fn insert(
        &self,
        user_id: &UserId,
        record_id: &RecordId,
    ) -> Result<MembershipEdge, StoreError>;

    /// Deletes the edge matching (user, record). Deleting nothing is not an error.
    async fn delete(&self, user_id: &UserId, record_id: &RecordId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn profile(&self, user_id: &UserId) -> Result<Profile, StoreError>;
    async fn club_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ClubMembershipDetail>, StoreError>;
}
