//! Keyed query cache with freshness windows and latest-request-wins writes.
//!
//! DESIGN
//! ======
//! Each key remembers the ticket of the most recently issued fetch. A response
//! may only be stored if its ticket is still the latest for that key, so a
//! slow response for an old request cannot overwrite a newer one. Entries are
//! never patched in place: mutations invalidate and the next read refetches.
//! Invalidation also revokes in-flight tickets, so a response that started
//! before the mutation is never stored as fresh.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    fetched_at: u64,
    last_used: u64,
    invalidated: bool,
}

/// Ticket for one in-flight fetch, returned by [`QueryCache::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Clone, Debug)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    in_flight: HashMap<K, u64>,
    next_ticket: u64,
    stale_ms: u64,
    gc_ms: u64,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(stale_ms: u64, gc_ms: u64) -> Self {
        Self { entries: HashMap::new(), in_flight: HashMap::new(), next_ticket: 0, stale_ms, gc_ms }
    }

    /// Cached value if it is younger than the freshness window and has not
    /// been invalidated.
    pub fn fresh(&mut self, key: &K, now: u64) -> Option<V> {
        let stale_ms = self.stale_ms;
        let entry = self.entries.get_mut(key)?;
        entry.last_used = now;
        let age = now.saturating_sub(entry.fetched_at);
        (!entry.invalidated && age < stale_ms).then(|| entry.value.clone())
    }

    /// Last stored value regardless of freshness, for display while a
    /// refetch is running.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|e| e.value.clone())
    }

    /// Record a new fetch for `key`; it supersedes any earlier one.
    pub fn begin(&mut self, key: &K) -> FetchTicket {
        self.next_ticket += 1;
        self.in_flight.insert(key.clone(), self.next_ticket);
        FetchTicket(self.next_ticket)
    }

    /// Store `value` if `ticket` is still the latest fetch for `key`.
    ///
    /// Returns whether the value was stored.
    pub fn complete(&mut self, key: &K, ticket: FetchTicket, value: V, now: u64) -> bool {
        if self.in_flight.get(key) != Some(&ticket.0) {
            return false;
        }
        self.in_flight.remove(key);
        self.entries
            .insert(key.clone(), Entry { value, fetched_at: now, last_used: now, invalidated: false });
        self.evict_unused(now);
        true
    }

    /// Forget a failed fetch so it does not block later ones.
    pub fn abandon(&mut self, key: &K, ticket: FetchTicket) {
        if self.in_flight.get(key) == Some(&ticket.0) {
            self.in_flight.remove(key);
        }
    }

    /// Mark `key` stale. A fetch already in flight for it can no longer
    /// store its result, since it may predate the change.
    pub fn invalidate(&mut self, key: &K) {
        self.in_flight.remove(key);
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    pub fn invalidate_all(&mut self) {
        self.in_flight.clear();
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_unused(&mut self, now: u64) {
        let gc_ms = self.gc_ms;
        self.entries.retain(|_, e| now.saturating_sub(e.last_used) < gc_ms);
    }
}
