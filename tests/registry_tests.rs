//! Property tests for route resolution order.

use navigator_core::{sync_handler_fn, RouteId, RouteRegistry};
use proptest::prelude::*;

const PATTERNS: &[&str] = &["", "/", "/a", "/a/", "/a/b", "/ab", "/b"];
const URLS: &[&str] = &["", "/", "/a", "/a/1", "/a/b/c", "/ab", "/abc", "/b", "/c"];

fn pattern_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PATTERNS)
}

/// Reference model: newest-first linear scan over `(id, pattern)` pairs.
fn expected(model: &[(RouteId, &str)], url: &str) -> Option<RouteId> {
    model
        .iter()
        .rev()
        .find(|(_, pattern)| url.starts_with(pattern))
        .map(|(id, _)| *id)
}

proptest! {
    #[test]
    fn proptest_resolve_returns_most_recent_prefix(
        patterns in prop::collection::vec(pattern_strategy(), 0..12),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let mut registry = RouteRegistry::new();
        let mut model = Vec::new();

        for pattern in &patterns {
            let id = registry.insert(*pattern, sync_handler_fn(|_, _| Ok(())));
            model.push((id, *pattern));
        }

        for url in URLS {
            prop_assert_eq!(registry.resolve(url).map(|e| e.id()), expected(&model, url));
        }

        for removal in &removals {
            if model.is_empty() {
                break;
            }
            let (id, _) = model.remove(removal.index(model.len()));
            prop_assert!(registry.remove(id));
            prop_assert!(!registry.remove(id));

            for url in URLS {
                // Resolve twice so cached answers are checked as well.
                prop_assert_eq!(registry.resolve(url).map(|e| e.id()), expected(&model, url));
                prop_assert_eq!(registry.resolve(url).map(|e| e.id()), expected(&model, url));
            }
        }

        prop_assert_eq!(registry.len(), model.len());
    }

    #[test]
    fn proptest_catch_all_always_matches(
        patterns in prop::collection::vec(pattern_strategy(), 0..8),
        url in "[/a-c0-9]{0,8}",
    ) {
        let mut registry = RouteRegistry::new();
        registry.insert("", sync_handler_fn(|_, _| Ok(())));
        for pattern in &patterns {
            registry.insert(*pattern, sync_handler_fn(|_, _| Ok(())));
        }
        prop_assert!(registry.resolve(&url).is_some());
    }
}
