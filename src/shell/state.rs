use crate::modules::campus::adapters::outbound::store::ProfileStore;
use crate::modules::campus::adapters::outbound::store_in_memory::{
    InMemoryCampusStore, InMemoryTable,
};
use crate::modules::campus::adapters::outbound::store_postgrest::PostgrestStore;
use crate::modules::campus::core::collections::{Clubs, Events};
use crate::modules::campus::core::profile::Profile;
use crate::modules::campus::core::records::{Club, Event};
use crate::modules::campus::use_cases::load_profile::handler::ProfileLoader;
use crate::modules::campus::use_cases::sign_out::handler::SignOutHandler;
use crate::modules::campus::view::{ClubsView, EventsView, ViewPorts};
use crate::shared::core::primitives::{UserId, now_millis};
use crate::shared::core::session::Session;
use crate::shared::infrastructure::navigation::Navigator;
use crate::shared::infrastructure::notices::Notifier;
use crate::shared::infrastructure::session::SessionProvider;
use crate::shared::infrastructure::session::in_memory::InMemorySessionProvider;
use crate::shell::config::{Config, StoreBackend};
use crate::shell::presenters::{TracingNavigator, TracingNotifier};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

const SEED_EVENTS: &str = include_str!("seed/events.json");
const SEED_CLUBS: &str = include_str!("seed/clubs.json");

#[derive(Clone)]
pub struct AppState {
    pub events: ViewPorts<Events>,
    pub clubs: ViewPorts<Clubs>,
    pub profiles: Arc<dyn ProfileStore>,
    pub session: Arc<dyn SessionProvider>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let session = match &config.user_id {
            Some(user_id) => Session::Authenticated(UserId::new(user_id.as_str())),
            None => Session::Anonymous,
        };
        let session: Arc<dyn SessionProvider> =
            Arc::new(InMemorySessionProvider::with_session(session));
        let navigator: Arc<dyn Navigator> = Arc::new(TracingNavigator);
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);

        match &config.store {
            StoreBackend::InMemory => {
                let store = Arc::new(seeded_store()?);
                if let Some(user_id) = &config.user_id {
                    store.put_profile(demo_profile(user_id)).await;
                }
                info!("using the in-memory store");
                Ok(Self {
                    events: ViewPorts {
                        records: store.events(),
                        edges: store.events(),
                        session: session.clone(),
                        navigator: navigator.clone(),
                        notifier: notifier.clone(),
                    },
                    clubs: ViewPorts {
                        records: store.clubs(),
                        edges: store.clubs(),
                        session: session.clone(),
                        navigator: navigator.clone(),
                        notifier: notifier.clone(),
                    },
                    profiles: store,
                    session,
                    navigator,
                    notifier,
                })
            }
            StoreBackend::Postgrest {
                url,
                api_key,
                access_token,
            } => {
                let mut store = PostgrestStore::new(url.as_str(), api_key.as_str());
                if let Some(token) = access_token {
                    store = store.with_access_token(token.as_str());
                }
                let store = Arc::new(store);
                info!(%url, "using the postgrest store");
                Ok(Self {
                    events: ViewPorts {
                        records: store.clone(),
                        edges: store.clone(),
                        session: session.clone(),
                        navigator: navigator.clone(),
                        notifier: notifier.clone(),
                    },
                    clubs: ViewPorts {
                        records: store.clone(),
                        edges: store.clone(),
                        session: session.clone(),
                        navigator: navigator.clone(),
                        notifier: notifier.clone(),
                    },
                    profiles: store,
                    session,
                    navigator,
                    notifier,
                })
            }
        }
    }

    pub fn events_view(&self) -> EventsView {
        EventsView::new(self.events.clone())
    }

    pub fn clubs_view(&self) -> ClubsView {
        ClubsView::new(self.clubs.clone())
    }

    pub fn profile_loader(&self) -> ProfileLoader {
        ProfileLoader::new(
            self.session.clone(),
            self.profiles.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
        )
    }

    pub fn sign_out_handler(&self) -> SignOutHandler {
        SignOutHandler::new(
            self.session.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
        )
    }
}

/// The demo catalogue: the six campus clubs plus a handful of events.
pub fn seeded_store() -> anyhow::Result<InMemoryCampusStore> {
    let events: Vec<Event> =
        serde_json::from_str(SEED_EVENTS).context("parsing seed/events.json")?;
    let clubs: Vec<Club> = serde_json::from_str(SEED_CLUBS).context("parsing seed/clubs.json")?;
    Ok(InMemoryCampusStore::new(
        InMemoryTable::with_records(events),
        InMemoryTable::with_records(clubs),
    ))
}

fn demo_profile(user_id: &str) -> Profile {
    Profile {
        user_id: UserId::new(user_id),
        full_name: "Demo Student".to_string(),
        email: format!("{user_id}@campus.example.edu"),
        created_at: now_millis(),
    }
}
