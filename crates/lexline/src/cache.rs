//! Optional sense cache consulted by [`Lexicon::find_sense`].
//!
//! The cache is a plain synchronous key-value collaborator keyed by the
//! caller's full query string. The engine always holds *some*
//! implementation — [`NoopCache`] by default — so cache absence never leaks
//! into the lookup logic.
//!
//! [`Lexicon::find_sense`]: crate::Lexicon::find_sense

use dashmap::DashMap;

use lexline_types::SenseRecord;

/// Get/put collaborator consulted before the file path and populated after
/// a miss. Implementations bring their own eviction and concurrency story.
pub trait SenseCache: Send + Sync {
    fn get(&self, key: &str) -> Option<SenseRecord>;
    fn put(&self, key: &str, record: SenseRecord);
}

/// The default cache: remembers nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCache;

impl SenseCache for NoopCache {
    fn get(&self, _key: &str) -> Option<SenseRecord> {
        None
    }

    fn put(&self, _key: &str, _record: SenseRecord) {}
}

/// Unbounded in-process cache backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, SenseRecord>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SenseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<SenseRecord> {
        self.entries.get(key).map(|hit| hit.value().clone())
    }

    fn put(&self, key: &str, record: SenseRecord) {
        self.entries.insert(key.to_string(), record);
    }
}
