// One events or clubs list view, from activation to teardown.
//
// Responsibilities
// - Subscribe to session transitions, then look the session up and fetch the collection concurrently.
// - Re-derive memberships whenever the authenticated identity changes (sign-in, sign-out, switch).
// - Route join/leave through the mutator.
// - Release the subscription on teardown and ignore anything that arrives afterwards.

use crate::modules::campus::adapters::outbound::store::{EdgeStore, RecordStore};
use crate::modules::campus::core::collections::{Clubs, Collection, Events};
use crate::modules::campus::core::view_state::{LoadPhase, ViewState};
use crate::modules::campus::errors::ApplicationError;
use crate::modules::campus::use_cases::fetch_collection::handler::CollectionFetcher;
use crate::modules::campus::use_cases::observe_session::handler::SessionObserver;
use crate::modules::campus::use_cases::observe_session::listener::SessionListener;
use crate::modules::campus::use_cases::reconcile_memberships::handler::{
    MembershipReconciler, ReconcileOutcome,
};
use crate::modules::campus::use_cases::toggle_membership::decision::MutationOutcome;
use crate::modules::campus::use_cases::toggle_membership::handler::MembershipMutator;
use crate::shared::core::primitives::RecordId;
use crate::shared::core::session::{Session, SessionChange};
use crate::shared::infrastructure::navigation::Navigator;
use crate::shared::infrastructure::notices::Notifier;
use crate::shared::infrastructure::session::SessionProvider;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

pub type EventsView = MembershipView<Events>;
pub type ClubsView = MembershipView<Clubs>;

pub struct ViewPorts<C: Collection> {
    pub records: Arc<dyn RecordStore<C>>,
    pub edges: Arc<dyn EdgeStore<C>>,
    pub session: Arc<dyn SessionProvider>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl<C: Collection> Clone for ViewPorts<C> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            edges: self.edges.clone(),
            session: self.session.clone(),
            navigator: self.navigator.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationReport {
    /// `None` when the collection fetch failed.
    pub records: Option<usize>,
    /// `None` when nobody is signed in or the membership fetch failed.
    pub memberships: Option<usize>,
}

pub struct MembershipView<C: Collection> {
    state: Arc<RwLock<ViewState<C::Record>>>,
    observer: Arc<SessionObserver<C>>,
    fetcher: CollectionFetcher<C>,
    reconciler: Arc<MembershipReconciler<C>>,
    mutator: MembershipMutator<C>,
    listener: Mutex<Option<SessionListener>>,
}

impl<C: Collection> MembershipView<C> {
    pub fn new(ports: ViewPorts<C>) -> Self {
        let state = Arc::new(RwLock::new(ViewState::new()));
        Self {
            observer: Arc::new(SessionObserver::new(ports.session, state.clone())),
            fetcher: CollectionFetcher::new(ports.records, ports.notifier.clone(), state.clone()),
            reconciler: Arc::new(MembershipReconciler::new(
                ports.edges.clone(),
                ports.notifier.clone(),
                state.clone(),
            )),
            mutator: MembershipMutator::new(ports.edges, ports.navigator, ports.notifier, state.clone()),
            listener: Mutex::new(None),
            state,
        }
    }

    pub async fn activate(&self) -> ActivationReport {
        // subscribe first so no transition between lookup and listener start is lost
        let subscription = self.observer.subscribe();
        let (_, fetched) = tokio::join!(self.observer.lookup(), self.fetcher.fetch());

        let observer = self.observer.clone();
        let reconciler = self.reconciler.clone();
        let listener = SessionListener::spawn(subscription, move |change| {
            let observer = observer.clone();
            let reconciler = reconciler.clone();
            async move {
                let _ = rederive(&observer, &reconciler, change).await;
            }
        });
        if let Some(previous) = self.listener.lock().await.replace(listener) {
            previous.release().await;
        }

        let memberships = match self.reconciler.reconcile().await {
            Ok(ReconcileOutcome::Applied { memberships }) => Some(memberships),
            _ => None,
        };
        let report = ActivationReport {
            records: fetched.ok(),
            memberships,
        };
        info!(collection = C::TABLE, ?report, "view activated");
        report
    }

    /// Applies one session transition directly, as the subscription does.
    pub async fn on_session_changed(
        &self,
        change: SessionChange,
    ) -> Result<ReconcileOutcome, ApplicationError> {
        rederive(&self.observer, &self.reconciler, change).await
    }

    pub async fn refresh(&self) -> Result<usize, ApplicationError> {
        self.fetcher.fetch().await
    }

    pub async fn join(&self, record_id: &RecordId) -> Result<MutationOutcome, ApplicationError> {
        self.mutator.join(record_id).await
    }

    pub async fn leave(&self, record_id: &RecordId) -> Result<MutationOutcome, ApplicationError> {
        self.mutator.leave(record_id).await
    }

    pub async fn is_member(&self, record_id: &RecordId) -> bool {
        self.state.read().await.is_member(record_id)
    }

    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    pub async fn phase(&self) -> LoadPhase {
        self.state.read().await.phase
    }

    pub async fn records(&self) -> Vec<C::Record> {
        self.state.read().await.records.clone()
    }

    pub async fn snapshot(&self) -> ViewState<C::Record> {
        self.state.read().await.clone()
    }

    /// Marks the view disposed and releases the session subscription.
    pub async fn teardown(&self) {
        self.state.write().await.torn_down = true;
        if let Some(listener) = self.listener.lock().await.take() {
            listener.release().await;
        }
        info!(collection = C::TABLE, "view torn down");
    }
}

async fn rederive<C: Collection>(
    observer: &SessionObserver<C>,
    reconciler: &MembershipReconciler<C>,
    change: SessionChange,
) -> Result<ReconcileOutcome, ApplicationError> {
    if observer.apply(change).await {
        reconciler.reconcile().await
    } else {
        Ok(ReconcileOutcome::Skipped)
    }
}
