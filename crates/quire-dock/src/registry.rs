//! Flat registry of tab contents, keyed by tab id.

use indexmap::IndexMap;

use crate::error::{DockError, DockResult};
use crate::node::TabId;

/// Tab contents in declaration order.
///
/// The tree only stores tab ids; what a tab displays lives here and is never
/// inspected by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TabRegistry<C> {
    entries: IndexMap<TabId, C>,
}

impl<C> Default for TabRegistry<C> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<C> TabRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tab; ids must be unique.
    pub fn insert(&mut self, id: TabId, content: C) -> DockResult<()> {
        if self.entries.contains_key(&id) {
            return Err(DockError::DuplicateTab(id));
        }
        self.entries.insert(id, content);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&C> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut C> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Remove a tab, keeping the order of the remaining entries.
    pub fn remove(&mut self, id: &str) -> Option<C> {
        self.entries.shift_remove(id)
    }

    /// Keep only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&TabId) -> bool) {
        self.entries.retain(|id, _| keep(id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TabId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TabId, &C)> {
        self.entries.iter()
    }
}
