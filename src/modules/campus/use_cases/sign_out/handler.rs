use crate::modules::campus::errors::ApplicationError;
use crate::shared::infrastructure::navigation::{Navigator, Route};
use crate::shared::infrastructure::notices::{Notice, Notifier};
use crate::shared::infrastructure::session::SessionProvider;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SignOutHandler {
    session: Arc<dyn SessionProvider>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl SignOutHandler {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            navigator,
            notifier,
        }
    }

    pub async fn handle(&self) -> Result<(), ApplicationError> {
        match self.session.sign_out().await {
            Ok(()) => {
                info!("signed out");
                self.notifier.notify(Notice::info(
                    "Signed out",
                    "You've been successfully signed out.",
                ));
                self.navigator.navigate(Route::Home);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "sign out failed");
                self.notifier
                    .notify(Notice::destructive("Error signing out", e.to_string()));
                Err(e.into())
            }
        }
    }
}
