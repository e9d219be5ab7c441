// Notifier and navigator for the binary: both write to the log.

use crate::shared::infrastructure::navigation::{Navigator, Route};
use crate::shared::infrastructure::notices::{Notice, NoticeVariant, Notifier};
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.variant {
            NoticeVariant::Default => {
                info!(title = %notice.title, description = %notice.description, "notice")
            }
            NoticeVariant::Destructive => {
                warn!(title = %notice.title, description = %notice.description, "notice")
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        info!(path = route.path(), "navigate");
    }
}
