use crate::modules::campus::adapters::outbound::store::ProfileStore;
use crate::modules::campus::use_cases::load_profile::projection::ProfileSummary;
use crate::shared::core::session::Session;
use crate::shared::infrastructure::navigation::{Navigator, Route};
use crate::shared::infrastructure::notices::{Notice, Notifier};
use crate::shared::infrastructure::session::SessionProvider;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    Loaded(ProfileSummary),
    RedirectedToSignIn,
}

pub struct ProfileLoader {
    session: Arc<dyn SessionProvider>,
    profiles: Arc<dyn ProfileStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl ProfileLoader {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        profiles: Arc<dyn ProfileStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            profiles,
            navigator,
            notifier,
        }
    }

    /// Loads the profile row and the club memberships of the signed-in user.
    /// Each read fails on its own: a notice is shown and the other part still loads.
    /// A failed session lookup counts as signed out.
    pub async fn load(&self) -> ProfileOutcome {
        let session = match self.session.current_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "session lookup failed");
                Session::Anonymous
            }
        };
        let Some(user_id) = session.user_id().cloned() else {
            self.navigator.navigate(Route::SignIn);
            return ProfileOutcome::RedirectedToSignIn;
        };

        let profile = match self.profiles.profile(&user_id).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(%user_id, error = %e, "profile fetch failed");
                self.notifier
                    .notify(Notice::destructive("Error loading profile", e.to_string()));
                None
            }
        };

        let memberships = match self.profiles.club_memberships(&user_id).await {
            Ok(memberships) => memberships,
            Err(e) => {
                warn!(%user_id, error = %e, "club memberships fetch failed");
                self.notifier
                    .notify(Notice::destructive("Error loading memberships", e.to_string()));
                Vec::new()
            }
        };

        info!(%user_id, memberships = memberships.len(), "profile loaded");
        ProfileOutcome::Loaded(ProfileSummary {
            user_id,
            profile,
            memberships,
        })
    }
}
