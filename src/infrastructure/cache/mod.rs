use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::warn;

/// Rendered-response cache keyed by public path (`/blog`, `/blog/{slug}`,
/// `/`, ...). Values are serialized JSON bodies.
#[derive(Default)]
pub struct PageCache {
    entries: DashMap<String, String>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, path: impl Into<String>, body: String) {
        self.entries.insert(path.into(), body);
    }

    pub fn remove(&self, path: &str) {
        self.entries.remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type InvalidationReceiver = mpsc::UnboundedReceiver<Vec<String>>;

/// Emits path-invalidation events after successful writes. Delivery is
/// fire-and-forget: a send failure is logged and never unwinds the write
/// that triggered it.
#[derive(Clone)]
pub struct Revalidator {
    tx: mpsc::UnboundedSender<Vec<String>>,
}

impl Revalidator {
    pub fn channel() -> (Self, InvalidationReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn revalidate_paths<I, S>(&self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        if let Err(e) = self.tx.send(paths) {
            warn!("Cache invalidation event dropped: {}", e);
        }
    }
}
