//! Route registry: an ordered list of `(pattern, handler)` entries.
//!
//! # Matching
//!
//! - A pattern matches a url when the url starts with it. No segment
//!   splitting and no parameters.
//! - The empty pattern `""` matches every url and acts as a catch-all.
//! - Entries are searched most-recently-registered first; the first match
//!   wins. Registration order is the only priority rule.
//! - Several entries may share a pattern. Removing the newest one exposes the
//!   next-most-recent match again.
//!
//! # Examples
//!
//! ```
//! use navigator_core::registry::RouteRegistry;
//! use navigator_core::sync_handler_fn;
//!
//! let mut registry = RouteRegistry::new();
//! let all = registry.insert("", sync_handler_fn(|_, _| Ok(())));
//! let users = registry.insert("/users", sync_handler_fn(|_, _| Ok(())));
//!
//! assert_eq!(registry.resolve("/users/42").unwrap().id(), users);
//! assert_eq!(registry.resolve("/about").unwrap().id(), all);
//!
//! registry.remove(users);
//! assert_eq!(registry.resolve("/users/42").unwrap().id(), all);
//! ```

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ResolveCache};
use crate::handler::RouteHandler;
use crate::trace_log;
use std::fmt;
use std::sync::Arc;

/// Opaque identity of a registered route.
///
/// Ids are never reused within a registry, so two registrations of the same
/// pattern stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(u64);

impl RouteId {
    /// Build an id from its raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value of this id.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// A registered route.
pub struct RouteEntry {
    id: RouteId,
    pattern: String,
    handler: Arc<dyn RouteHandler>,
}

impl RouteEntry {
    /// Identity of this entry.
    pub fn id(&self) -> RouteId {
        self.id
    }

    /// Prefix pattern this entry matches.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Handler invoked for navigations that resolve to this entry.
    pub fn handler(&self) -> &Arc<dyn RouteHandler> {
        &self.handler
    }

    /// Whether this entry's pattern is a prefix of `url`.
    pub fn matches(&self, url: &str) -> bool {
        url.starts_with(self.pattern.as_str())
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("id", &self.id)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of route entries.
///
/// Entries are stored oldest first; lookups walk the list backwards.
pub struct RouteRegistry {
    entries: Vec<Arc<RouteEntry>>,
    next_id: u64,
    #[cfg(feature = "cache")]
    cache: ResolveCache,
}

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            #[cfg(feature = "cache")]
            cache: ResolveCache::new(),
        }
    }

    /// Create an empty registry whose resolve cache holds `capacity` urls.
    #[cfg(feature = "cache")]
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: ResolveCache::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Add an entry at the top (highest priority) position.
    pub fn insert(&mut self, pattern: impl Into<String>, handler: impl RouteHandler) -> RouteId {
        self.insert_arc(pattern, Arc::new(handler))
    }

    /// Add an entry with an already shared handler.
    ///
    /// The same handler may back several patterns.
    pub fn insert_arc(
        &mut self,
        pattern: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> RouteId {
        self.next_id += 1;
        let id = RouteId(self.next_id);
        let pattern = pattern.into();
        trace_log!("Inserting {} with pattern '{}'", id, pattern);
        self.entries.push(Arc::new(RouteEntry {
            id,
            pattern,
            handler,
        }));
        self.invalidate();
        id
    }

    /// Remove the entry with the given id.
    ///
    /// Returns `false` if no such entry exists (already removed).
    pub fn remove(&mut self, id: RouteId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        self.entries.remove(index);
        self.invalidate();
        true
    }

    /// Find the most recently inserted entry whose pattern prefixes `url`.
    ///
    /// Only returns `None` when no pattern matches, which with a catch-all
    /// `""` entry registered means the registry is empty.
    pub fn resolve(&mut self, url: &str) -> Option<Arc<RouteEntry>> {
        #[cfg(feature = "cache")]
        if let Some(id) = self.cache.get(url) {
            if let Some(entry) = self.get(id) {
                return Some(entry);
            }
        }

        let entry = self.scan(url)?;

        #[cfg(feature = "cache")]
        self.cache.insert(url.to_string(), entry.id);

        Some(entry)
    }

    /// Uncached lookup, usable through a shared reference.
    pub fn scan(&self, url: &str) -> Option<Arc<RouteEntry>> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.matches(url))
            .cloned()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: RouteId) -> Option<Arc<RouteEntry>> {
        self.entries.iter().find(|entry| entry.id == id).cloned()
    }

    /// Registered patterns in priority order (most recent first).
    pub fn patterns(&self) -> Vec<String> {
        self.entries
            .iter()
            .rev()
            .map(|entry| entry.pattern.clone())
            .collect()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve cache statistics.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    fn invalidate(&mut self) {
        #[cfg(feature = "cache")]
        self.cache.clear();
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
