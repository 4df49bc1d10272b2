//! Explicit dock state: the current snapshot, tab contents and history.

use crate::action::{Action, dispatch};
use crate::address::IdAllocator;
use crate::config::DockStyle;
use crate::error::{DockError, DockResult, SerializeError};
use crate::history::History;
use crate::invariants::{InvariantViolation, check_invariants};
use crate::node::{LayoutNode, LayoutTree, TabId, WindowNode};
use crate::normalize::cleanup;
use crate::registry::TabRegistry;
use crate::serializer::{Element, Serialized, serialize};

/// Owns the current layout and everything needed to move it forward or back.
#[derive(Debug, Clone)]
pub struct DockState<C> {
    tree: LayoutTree,
    tabs: TabRegistry<C>,
    history: History,
}

impl<C> DockState<C> {
    /// Start from a serialized description; its weights are normalized here.
    pub fn new(serialized: Serialized<C>) -> Self {
        Self {
            tree: cleanup(&serialized.tree),
            tabs: serialized.tabs,
            history: History::new(),
        }
    }

    /// Apply the settings of `style` that the state owns (the history limit).
    pub fn with_style(self, style: &DockStyle) -> Self {
        self.with_history_limit(style.history_limit)
    }

    /// Serialize `description` and start from the result.
    pub fn from_description(description: impl Into<Element<C>>) -> Result<Self, SerializeError> {
        serialize(description).map(Self::new)
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history.set_max_size(limit);
        self
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn tabs(&self) -> &TabRegistry<C> {
        &self.tabs
    }

    /// Content of a registered tab.
    pub fn content(&self, tab: &str) -> Option<&C> {
        self.tabs.get(tab)
    }

    pub fn content_mut(&mut self, tab: &str) -> Option<&mut C> {
        self.tabs.get_mut(tab)
    }

    /// Apply an action to the current snapshot.
    ///
    /// On success the previous snapshot is pushed to the undo history and the
    /// redo history is cleared. Actions that change nothing leave the history
    /// alone.
    pub fn dispatch(&mut self, action: Action) -> DockResult<&LayoutTree> {
        if let Action::AddPanel { node } = &action {
            if let Some(tab) = node.tab_ids().into_iter().find(|tab| !self.tabs.contains(tab.as_str())) {
                return Err(DockError::UnknownTab(tab));
            }
        }
        let next = dispatch(&self.tree, action)?;
        self.commit(next);
        Ok(&self.tree)
    }

    /// Register tab contents and append `node` (which holds those tabs) to the
    /// root in one step.
    pub fn add_panel(&mut self, node: LayoutNode, contents: impl IntoIterator<Item = (TabId, C)>) -> DockResult<&LayoutTree> {
        let contents: Vec<(TabId, C)> = contents.into_iter().collect();
        let mut seen = quire_core::alloc::HashSet::new();
        for (tab, _) in &contents {
            if self.tabs.contains(tab.as_str()) || !seen.insert(tab.clone()) {
                return Err(DockError::DuplicateTab(tab.clone()));
            }
        }
        if let Some(tab) = node.tab_ids().into_iter().find(|tab| !seen.contains(tab)) {
            return Err(DockError::UnknownTab(tab));
        }

        let next = dispatch(&self.tree, Action::AddPanel { node })?;
        for (tab, content) in contents {
            self.tabs.insert(tab, content)?;
        }
        self.commit(next);
        Ok(&self.tree)
    }

    /// Open a new tab in its own window at the end of the root.
    pub fn add_tab(&mut self, tab: impl Into<TabId>, content: C) -> DockResult<&LayoutTree> {
        let tab = tab.into();
        let window = WindowNode::single(IdAllocator::for_tree(&self.tree).next_window(), tab.clone());
        self.add_panel(window.into(), [(tab, content)])
    }

    fn commit(&mut self, next: LayoutTree) {
        if next.ptr_eq(&self.tree) {
            return;
        }
        let previous = std::mem::replace(&mut self.tree, next);
        self.history.push(previous);
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back to the previous snapshot. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.tree);
        if undone {
            tracing::debug!(undo = self.history.undo_count(), redo = self.history.redo_count(), "undo");
        }
        undone
    }

    /// Re-apply the last undone snapshot. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.tree);
        if redone {
            tracing::debug!(undo = self.history.undo_count(), redo = self.history.redo_count(), "redo");
        }
        redone
    }

    /// Drop the contents of tabs the current snapshot no longer references.
    ///
    /// Older snapshots may still reference them, so the history is cleared.
    /// Returns how many entries were removed.
    pub fn prune_registry(&mut self) -> usize {
        let live: quire_core::alloc::HashSet<TabId> = self.tree.tab_ids().into_iter().collect();
        let before = self.tabs.len();
        self.tabs.retain(|tab| live.contains(tab));
        self.history.clear();
        let removed = before - self.tabs.len();
        tracing::debug!(removed, "pruned tab registry");
        removed
    }

    /// Every invariant the current snapshot violates.
    pub fn check(&self) -> Vec<InvariantViolation> {
        check_invariants(&self.tree, &self.tabs)
    }
}
