// Scoped ownership of a session subscription.
//
// The listener task lives exactly as long as this guard: `release` (or drop)
// aborts it, which drops the subscription and unsubscribes from the provider.

use crate::shared::core::session::SessionChange;
use crate::shared::infrastructure::session::SessionSubscription;
use std::future::Future;
use tokio::task::JoinHandle;

pub struct SessionListener {
    handle: Option<JoinHandle<()>>,
}

impl SessionListener {
    pub fn spawn<F, Fut>(mut subscription: SessionSubscription, on_change: F) -> Self
    where
        F: Fn(SessionChange) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            while let Some(change) = subscription.next().await {
                on_change(change).await;
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Stops the listener and waits until the subscription is gone.
    pub async fn release(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for SessionListener {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
