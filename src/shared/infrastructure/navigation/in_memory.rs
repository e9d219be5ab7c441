use crate::shared::infrastructure::navigation::{Navigator, Route};
use std::sync::Mutex;

/// Records every redirect instead of performing it.
#[derive(Default)]
pub struct InMemoryNavigator {
    visited: Mutex<Vec<Route>>,
}

impl InMemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.visited().last().copied()
    }
}

impl Navigator for InMemoryNavigator {
    fn navigate(&self, route: Route) {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(route);
    }
}
