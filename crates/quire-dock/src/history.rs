//! Undo/redo history of layout snapshots.

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::node::LayoutTree;

/// Snapshot history with undo/redo stacks.
///
/// Snapshots share unchanged subtrees, so keeping a history of them costs
/// little more than the nodes each action actually touched.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<LayoutTree>,
    redo_stack: Vec<LayoutTree>,
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a new history with the default max size
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new history keeping at most `max_size` undo snapshots
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the max size, dropping the oldest snapshots that no longer fit
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.trim();
    }

    /// Record the snapshot being replaced (clears the redo stack)
    pub fn push(&mut self, previous: LayoutTree) {
        self.redo_stack.clear();
        self.undo_stack.push(previous);
        self.trim();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Swap `current` with the last recorded snapshot. Returns `false` if
    /// there is nothing to undo.
    pub fn undo(&mut self, current: &mut LayoutTree) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(current, previous));
        true
    }

    /// Swap `current` with the last undone snapshot. Returns `false` if
    /// there is nothing to redo.
    pub fn redo(&mut self, current: &mut LayoutTree) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(std::mem::replace(current, next));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
