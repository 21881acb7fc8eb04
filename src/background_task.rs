use std::sync::Arc;

use crate::cache::{InvalidationReceiver, PageCache};

/// Consumes invalidation events and drops the matching cached pages.
/// Runs for the life of the server; mutations never wait on it.
pub async fn start_revalidation_task(cache: Arc<PageCache>, mut rx: InvalidationReceiver) {
    while let Some(paths) = rx.recv().await {
        for path in &paths {
            cache.remove(path);
        }
        tracing::debug!("Invalidated {} cached path(s)", paths.len());
    }

    tracing::warn!("Revalidation channel closed; cached pages will go stale");
}
