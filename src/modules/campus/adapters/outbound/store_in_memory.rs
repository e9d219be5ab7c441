// In memory implementation of the store ports.
//
// Purpose
// - Support view tests and the demo binary without a hosted backend.
//
// Responsibilities
// - Keep records and edges per collection in memory.
// - Enforce (user, record) uniqueness on insert, like the hosted store does.
// - Simulate outages and latency on demand.

use crate::modules::campus::adapters::outbound::store::{
    EdgeStore, ProfileStore, RecordStore, StoreError,
};
use crate::modules::campus::core::collections::{Clubs, Collection, Events};
use crate::modules::campus::core::edges::MembershipEdge;
use crate::modules::campus::core::profile::{ClubMembershipDetail, Profile};
use crate::modules::campus::core::records::{CampusRecord, SortKey};
use crate::shared::core::primitives::{RecordId, UserId, now_millis};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

pub struct InMemoryTable<C: Collection> {
    records: RwLock<Vec<C::Record>>,
    edges: RwLock<Vec<MembershipEdge>>,
    is_offline: AtomicBool,
    delay_ms: AtomicU64,
    writes: AtomicUsize,
}

impl<C: Collection> Default for InMemoryTable<C> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<C: Collection> InMemoryTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<C::Record>) -> Self {
        Self {
            records: RwLock::new(records),
            edges: RwLock::new(Vec::new()),
            is_offline: AtomicBool::new(false),
            delay_ms: AtomicU64::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.is_offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    /// Inserts and deletes that reached the table, successful or not.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Adds an edge without the uniqueness check, to model rows the store already holds.
    pub async fn seed_edge(&self, edge: MembershipEdge) {
        self.edges.write().await.push(edge);
    }

    pub async fn edges(&self) -> Vec<MembershipEdge> {
        self.edges.read().await.clone()
    }

    pub async fn records(&self) -> Vec<C::Record> {
        self.records.read().await.clone()
    }

    async fn round_trip(&self, table: &str) -> Result<(), StoreError> {
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!("{table} table offline")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C: Collection> RecordStore<C> for InMemoryTable<C> {
    async fn list_ordered(&self, order_by: SortKey) -> Result<Vec<C::Record>, StoreError> {
        self.round_trip(C::TABLE).await?;
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| a.compare_by(b, order_by));
        Ok(records)
    }
}

#[async_trait::async_trait]
impl<C: Collection> EdgeStore<C> for InMemoryTable<C> {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<MembershipEdge>, StoreError> {
        self.round_trip(C::EDGE_TABLE).await?;
        Ok(self
            .edges
            .read()
            .await
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        user_id: &UserId,
        record_id: &RecordId,
    ) -> Result<MembershipEdge, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.round_trip(C::EDGE_TABLE).await?;
        let mut edges = self.edges.write().await;
        if edges
            .iter()
            .any(|e| &e.user_id == user_id && &e.record_id == record_id)
        {
            return Err(StoreError::UniqueViolation {
                table: C::EDGE_TABLE.to_string(),
                user_id: user_id.clone(),
                record_id: record_id.clone(),
            });
        }
        let edge = MembershipEdge::new(user_id.clone(), record_id.clone(), now_millis());
        edges.push(edge.clone());
        Ok(edge)
    }

    async fn delete(&self, user_id: &UserId, record_id: &RecordId) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.round_trip(C::EDGE_TABLE).await?;
        self.edges
            .write()
            .await
            .retain(|e| !(&e.user_id == user_id && &e.record_id == record_id));
        Ok(())
    }
}

/// Both collections plus the profiles table.
#[derive(Default)]
pub struct InMemoryCampusStore {
    events: Arc<InMemoryTable<Events>>,
    clubs: Arc<InMemoryTable<Clubs>>,
    profiles: RwLock<HashMap<UserId, Profile>>,
    is_offline: AtomicBool,
}

impl InMemoryCampusStore {
    pub fn new(events: InMemoryTable<Events>, clubs: InMemoryTable<Clubs>) -> Self {
        Self {
            events: Arc::new(events),
            clubs: Arc::new(clubs),
            profiles: RwLock::new(HashMap::new()),
            is_offline: AtomicBool::new(false),
        }
    }

    pub fn events(&self) -> Arc<InMemoryTable<Events>> {
        self.events.clone()
    }

    pub fn clubs(&self) -> Arc<InMemoryTable<Clubs>> {
        self.clubs.clone()
    }

    pub async fn put_profile(&self, profile: Profile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }

    /// Takes the profiles table offline; the collection tables have their own switch.
    pub fn set_offline(&self, offline: bool) {
        self.is_offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("profiles table offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryCampusStore {
    async fn profile(&self, user_id: &UserId) -> Result<Profile, StoreError> {
        self.ensure_online()?;
        self.profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                table: "profiles".into(),
            })
    }

    async fn club_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ClubMembershipDetail>, StoreError> {
        let edges = EdgeStore::<Clubs>::list_for_user(self.clubs.as_ref(), user_id).await?;
        let clubs = self.clubs.records().await;
        Ok(edges
            .into_iter()
            .filter_map(|edge| {
                let club = clubs.iter().find(|c| c.id == edge.record_id)?;
                Some(ClubMembershipDetail {
                    membership_id: edge.edge_id,
                    club_id: edge.record_id,
                    joined_at: edge.created_at,
                    club_name: club.name.clone(),
                    category: club.category.clone(),
                    icon: club.icon.clone(),
                })
            })
            .collect())
    }
}
