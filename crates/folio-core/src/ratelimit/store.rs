//! Storage for rate-limit windows.
//!
//! The limiter only needs keyed get/set/delete plus an atomic
//! read-modify-write, so a shared external store can replace
//! [`MemoryStore`] without touching the window algorithm.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Bookkeeping for one client's current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    /// Requests observed in the current window.
    pub count: u32,
    /// Epoch milliseconds at which the window closes.
    pub reset_at_ms: u64,
}

impl RateLimitEntry {
    /// Opens a window at `now_ms` holding a single request.
    pub fn first(now_ms: u64, window_ms: u64) -> Self {
        Self {
            count: 1,
            reset_at_ms: now_ms.saturating_add(window_ms),
        }
    }

    /// Returns `true` once `now_ms` has reached the window's reset time.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.reset_at_ms
    }
}

/// Keyed storage for [`RateLimitEntry`] values.
pub trait RateLimitStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<RateLimitEntry>;

    fn set(&self, key: &str, entry: RateLimitEntry);

    /// Removes the entry under `key`, returning it if there was one.
    fn delete(&self, key: &str) -> Option<RateLimitEntry>;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deletes every entry expired at `now_ms` and returns how many went.
    fn remove_expired(&self, now_ms: u64) -> usize;

    /// Replaces the entry under `key` with `f(current)` and returns it.
    ///
    /// The provided implementation is a plain get-then-set and is only
    /// atomic if the store is used from a single task. Shared stores must
    /// override it so the read and the write happen under one lock.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<RateLimitEntry>) -> RateLimitEntry,
    ) -> RateLimitEntry {
        let next = f(self.get(key));
        self.set(key, next);
        next
    }
}

/// Process-local store backed by a sharded concurrent map.
///
/// Rate-limit history lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, RateLimitEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for MemoryStore {
    fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|e| *e)
    }

    fn set(&self, key: &str, entry: RateLimitEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    fn delete(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.remove(key).map(|(_, entry)| entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn remove_expired(&self, now_ms: u64) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now_ms);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    // The shard write lock is held from the read to the write.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<RateLimitEntry>) -> RateLimitEntry,
    ) -> RateLimitEntry {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let next = f(Some(*occupied.get()));
                *occupied.get_mut() = next;
                next
            }
            Entry::Vacant(vacant) => {
                let next = f(None);
                vacant.insert(next);
                next
            }
        }
    }
}
