use crate::modules::campus::adapters::outbound::store::RecordStore;
use crate::modules::campus::core::collections::Collection;
use crate::modules::campus::core::view_state::{LoadPhase, ViewState};
use crate::modules::campus::errors::ApplicationError;
use crate::shared::infrastructure::notices::{Notice, Notifier};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct CollectionFetcher<C: Collection> {
    records: Arc<dyn RecordStore<C>>,
    notifier: Arc<dyn Notifier>,
    state: Arc<RwLock<ViewState<C::Record>>>,
}

impl<C: Collection> CollectionFetcher<C> {
    pub fn new(
        records: Arc<dyn RecordStore<C>>,
        notifier: Arc<dyn Notifier>,
        state: Arc<RwLock<ViewState<C::Record>>>,
    ) -> Self {
        Self {
            records,
            notifier,
            state,
        }
    }

    /// Replaces the local collection with one ordered read. On failure the
    /// previous collection stays. The view leaves `Loading` either way.
    pub async fn fetch(&self) -> Result<usize, ApplicationError> {
        let result = self.records.list_ordered(C::SORT_KEY).await;
        let mut state = self.state.write().await;
        state.phase = LoadPhase::Loaded;
        match result {
            Ok(records) => {
                let count = records.len();
                if !state.torn_down {
                    state.records = records;
                }
                info!(collection = C::TABLE, count, "collection loaded");
                Ok(count)
            }
            Err(e) => {
                drop(state);
                warn!(collection = C::TABLE, error = %e, "collection fetch failed");
                self.notifier
                    .notify(Notice::destructive(C::WORDING.load_failed, e.to_string()));
                Err(e.into())
            }
        }
    }
}
