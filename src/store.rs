//! Client-side cache of server collections
//!
//! The server is the single source of truth. A cache holds the last fetched
//! collection, applies a mutation only after the server acknowledged it, and
//! is marked stale after every successful mutation so the next visit refetches.

use crate::error::ApiError;
use crate::model::{GraphQlStub, RequestLog, ScenarioState, SoapStub, Stub};

/// Records addressable by their server-assigned id
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Stub {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for GraphQlStub {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for SoapStub {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ScenarioState {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RequestLog {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheStatus {
    /// Never fetched, or invalidated since the last fetch
    Stale,
    Loading,
    Fresh,
}

#[derive(Debug, Clone)]
pub struct ResourceCache<T> {
    items: Vec<T>,
    status: CacheStatus,
    /// Last fetch or mutation failure, shown inline by the owning page
    pub error: Option<String>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: CacheStatus::Stale,
            error: None,
        }
    }
}

impl<T> ResourceCache<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> &CacheStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == CacheStatus::Loading
    }

    pub fn needs_fetch(&self) -> bool {
        self.status == CacheStatus::Stale
    }

    pub fn mark_loading(&mut self) {
        self.status = CacheStatus::Loading;
    }

    pub fn invalidate(&mut self) {
        self.status = CacheStatus::Stale;
    }

    /// A completed fetch replaces the whole collection
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = CacheStatus::Fresh;
        self.error = None;
    }

    /// A failed fetch keeps whatever was shown before. The cache settles so it
    /// is not refetched in a loop; the user retries explicitly.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        if self.status == CacheStatus::Loading {
            self.status = CacheStatus::Fresh;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.mutated();
    }

    pub fn mutation_failed(&mut self, action: &str, err: &ApiError) {
        tracing::warn!(action, error = %err, "mutation failed");
        self.error = Some(err.failure_message(action));
    }

    fn mutated(&mut self) {
        self.error = None;
        self.status = CacheStatus::Stale;
    }
}

impl<T: Keyed> ResourceCache<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    pub fn apply_created(&mut self, item: T) {
        self.items.push(item);
        self.mutated();
    }

    /// Replace by id. An id the cache has not seen is appended.
    pub fn apply_updated(&mut self, item: T) {
        match self.items.iter_mut().find(|i| i.key() == item.key()) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
        self.mutated();
    }

    pub fn apply_removed(&mut self, id: &str) {
        self.items.retain(|item| item.key() != id);
        self.mutated();
    }
}
