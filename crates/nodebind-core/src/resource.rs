use std::{cell::RefCell, collections::BTreeMap, sync::Arc};

///
/// ResourceLoader
///
/// Best-effort binary lookup (icons, templates) by name, path, or URL.
/// The contract is total: failures resolve to `None`, never an error.
///

pub trait ResourceLoader {
    fn load(&self, name: &str) -> Option<Vec<u8>>;
}

///
/// ResourceCache
///
/// Per-instance memo over a loader: each name is resolved once on first
/// access and the outcome (including "no resource") is kept for the life
/// of the instance. No invalidation. Instances are single-threaded per
/// the host's evaluation model, so a `RefCell` suffices.
///

#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: RefCell<BTreeMap<String, Option<Arc<[u8]>>>>,
}

impl ResourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, name: &str, loader: &dyn ResourceLoader) -> Option<Arc<[u8]>> {
        if let Some(hit) = self.entries.borrow().get(name) {
            return hit.clone();
        }

        let loaded: Option<Arc<[u8]>> = loader.load(name).map(Arc::from);
        self.entries
            .borrow_mut()
            .insert(name.to_string(), loaded.clone());

        loaded
    }
}

///
/// TESTS
///
