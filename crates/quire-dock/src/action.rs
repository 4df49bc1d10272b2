//! Reducer actions for modifying the docking layout.
//!
//! [`dispatch`] is a pure function: it takes a snapshot and an [`Action`],
//! builds a new snapshot by copying only the nodes on the edited paths, and
//! finishes every branch with [`cleanup`]. A failed action leaves nothing
//! behind; the input snapshot is never touched.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quire_core::alloc::HashSet;
use quire_core::profiling::profile_function;

use crate::address::{Address, IdAllocator, panel_mut, window_mut};
use crate::error::{DockError, DockResult};
use crate::node::{
    DockSide, LayoutNode, LayoutTree, NodeId, Orientation, PanelNode, Reselect, TabId, WindowNode,
};
use crate::normalize::cleanup;

/// A state transition of the layout tree.
///
/// Addresses are resolved against the snapshot the action is dispatched on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Action {
    /// Overwrite the weights of a panel's children, one entry per child.
    Resize { panel: Address, weights: Vec<f64> },
    /// Append a fully formed node as the last child of the root.
    AddPanel { node: LayoutNode },
    /// Move a tab out of its window into a new window spliced into `target`
    /// at `index + 1`.
    InsertPanel {
        tab: TabId,
        source: Address,
        target: Address,
        index: usize,
    },
    /// Move `source` to the position of `target` within the same window.
    ReorderTabs {
        source: TabId,
        target: TabId,
        window: Address,
    },
    SelectTab { tab: TabId, window: Address },
    /// Move a tab to the end of another window and select it there.
    MoveTab {
        tab: TabId,
        source: Address,
        target: Address,
    },
    /// Move a tab into a new window next to `target` (a window, or the root).
    ///
    /// `orientation` is the orientation of the panel enclosing `target`.
    SplitWindow {
        tab: TabId,
        source: Address,
        target: Address,
        direction: DockSide,
        orientation: Orientation,
    },
    /// Remove a tab from its window.
    CloseTab { tab: TabId, window: Address },
    /// Append every tab of `source` to `target`.
    MergeWindow { source: Address, target: Address },
}

impl Action {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Resize { .. } => "resize",
            Action::AddPanel { .. } => "add_panel",
            Action::InsertPanel { .. } => "insert_panel",
            Action::ReorderTabs { .. } => "reorder_tabs",
            Action::SelectTab { .. } => "select_tab",
            Action::MoveTab { .. } => "move_tab",
            Action::SplitWindow { .. } => "split_window",
            Action::CloseTab { .. } => "close_tab",
            Action::MergeWindow { .. } => "merge_window",
        }
    }
}

/// Apply `action` to `tree`, returning the normalized successor snapshot.
pub fn dispatch(tree: &LayoutTree, action: Action) -> DockResult<LayoutTree> {
    profile_function!();

    let name = action.name();
    tracing::debug!(action = name, "dispatch");

    let result = match action {
        Action::Resize { panel, weights } => resize(tree, &panel, weights),
        Action::AddPanel { node } => add_panel(tree, node),
        Action::InsertPanel {
            tab,
            source,
            target,
            index,
        } => insert_panel(tree, &tab, &source, &target, index),
        Action::ReorderTabs {
            source,
            target,
            window,
        } => reorder_tabs(tree, &source, &target, &window),
        Action::SelectTab { tab, window } => select_tab(tree, &tab, &window),
        Action::MoveTab { tab, source, target } => move_tab(tree, &tab, &source, &target),
        Action::SplitWindow {
            tab,
            source,
            target,
            direction,
            orientation,
        } => split_window(tree, &tab, &source, &target, direction, orientation),
        Action::CloseTab { tab, window } => close_tab(tree, &tab, &window),
        Action::MergeWindow { source, target } => merge_window(tree, &source, &target),
    };

    match result {
        Ok(next) => {
            let next = cleanup(&next);
            debug_assert!(
                crate::invariants::check_structure(&next).is_empty(),
                "{} left the tree in an invalid state",
                name
            );
            Ok(next)
        }
        Err(err) => {
            tracing::debug!(action = name, error = %err, "action rejected");
            Err(err)
        }
    }
}

/// Error for a tab missing from `window`: unknown if it is nowhere in the tree.
fn missing_tab(tree: &LayoutTree, tab: &TabId, window: &Address) -> DockError {
    if tree.find_tab(tab).is_some() {
        DockError::TabNotInWindow {
            tab: tab.clone(),
            window: window.clone(),
        }
    } else {
        DockError::UnknownTab(tab.clone())
    }
}

/// Resolve `window` and check that it owns `tab`.
fn window_with_tab<'a>(tree: &'a LayoutTree, tab: &TabId, window: &Address) -> DockResult<&'a WindowNode> {
    let node = tree.window(window)?;
    if !node.contains(tab) {
        return Err(missing_tab(tree, tab, window));
    }
    Ok(node)
}

/// Weights must be finite and positive. All zeros is the one exception and
/// normalizes to an even split.
fn validate_weights(weights: &[f64]) -> DockResult<()> {
    let all_zero = weights.iter().all(|w| *w == 0.0);
    match weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0 || (**w == 0.0 && !all_zero))
    {
        Some((index, &value)) => Err(DockError::InvalidWeight { index, value }),
        None => Ok(()),
    }
}

fn resize(tree: &LayoutTree, panel: &Address, weights: Vec<f64>) -> DockResult<LayoutTree> {
    let current = tree.panel(panel)?;
    if weights.len() != current.len() {
        return Err(DockError::WeightCountMismatch {
            expected: current.len(),
            found: weights.len(),
        });
    }
    validate_weights(&weights)?;

    let mut root = tree.root().clone();
    let target = panel_mut(&mut root, panel)?;
    for (child, weight) in target.children_mut().iter_mut().zip(weights) {
        child.set_size(weight);
    }
    Ok(LayoutTree::from_root(root))
}

fn add_panel(tree: &LayoutTree, node: LayoutNode) -> DockResult<LayoutTree> {
    // Tab ids stay globally unique
    let mut seen: HashSet<TabId> = tree.tab_ids().into_iter().collect();
    for tab in node.tab_ids() {
        if !seen.insert(tab.clone()) {
            return Err(DockError::DuplicateTab(tab));
        }
    }
    let size = node.size();
    if !size.is_finite() || size <= 0.0 {
        return Err(DockError::InvalidWeight {
            index: tree.root().len(),
            value: size,
        });
    }
    validate_child_sizes(&node)?;

    let mut root = tree.root().clone();
    root.children_mut().push(node);
    Ok(LayoutTree::from_root(root))
}

fn validate_child_sizes(node: &LayoutNode) -> DockResult<()> {
    if let LayoutNode::Panel(panel) = node {
        validate_weights(&panel.weights())?;
        for child in panel.children() {
            validate_child_sizes(child)?;
        }
    }
    Ok(())
}

fn insert_panel(
    tree: &LayoutTree,
    tab: &TabId,
    source: &Address,
    target: &Address,
    index: usize,
) -> DockResult<LayoutTree> {
    window_with_tab(tree, tab, source)?;
    let target_panel = tree.panel(target)?;
    let len = target_panel.len();
    if index >= len {
        return Err(DockError::InsertIndexOutOfRange { index, len });
    }

    // The new window takes an average share of the panel
    let size = target_panel.weights().iter().sum::<f64>() / len as f64;
    let window = WindowNode::single(IdAllocator::for_tree(tree).next_window(), tab.clone()).with_size(size);

    let mut root = tree.root().clone();
    window_mut(&mut root, source)?.remove_tab(tab, Reselect::First);
    panel_mut(&mut root, target)?
        .children_mut()
        .insert(index + 1, window.into());
    Ok(LayoutTree::from_root(root))
}

fn reorder_tabs(tree: &LayoutTree, source: &TabId, target: &TabId, window: &Address) -> DockResult<LayoutTree> {
    let current = window_with_tab(tree, source, window)?;
    let to = current
        .position(target)
        .ok_or_else(|| missing_tab(tree, target, window))?;
    let from = current.position(source).ok_or_else(|| missing_tab(tree, source, window))?;

    if from == to && current.selected() == Some(source) {
        tracing::trace!("reorder onto itself, nothing to do");
        return Ok(tree.clone());
    }

    let mut root = tree.root().clone();
    let node = window_mut(&mut root, window)?;
    node.move_tab(from, to);
    node.select(source);
    Ok(LayoutTree::from_root(root))
}

fn select_tab(tree: &LayoutTree, tab: &TabId, window: &Address) -> DockResult<LayoutTree> {
    let current = window_with_tab(tree, tab, window)?;
    if current.selected() == Some(tab) {
        return Ok(tree.clone());
    }

    let mut root = tree.root().clone();
    window_mut(&mut root, window)?.select(tab);
    Ok(LayoutTree::from_root(root))
}

fn move_tab(tree: &LayoutTree, tab: &TabId, source: &Address, target: &Address) -> DockResult<LayoutTree> {
    window_with_tab(tree, tab, source)?;
    tree.window(target)?;
    if source == target {
        tracing::trace!(%tab, "move into the same window, nothing to do");
        return Ok(tree.clone());
    }

    let mut root = tree.root().clone();
    window_mut(&mut root, source)?.remove_tab(tab, Reselect::IfSelected);
    window_mut(&mut root, target)?.push_tab(tab.clone());
    Ok(LayoutTree::from_root(root))
}

fn split_window(
    tree: &LayoutTree,
    tab: &TabId,
    source: &Address,
    target: &Address,
    direction: DockSide,
    orientation: Orientation,
) -> DockResult<LayoutTree> {
    let source_window = window_with_tab(tree, tab, source)?;

    // Validate target: a window, or the root itself
    let enclosing = match target.parent() {
        None => tree.root(),
        Some(parent) => {
            if tree.resolve(target)?.as_window().is_none() {
                return Err(DockError::NotWindowOrRoot(target.clone()));
            }
            tree.panel(&parent)?
        }
    };
    if enclosing.orientation != orientation {
        return Err(DockError::OrientationMismatch {
            expected: enclosing.orientation,
            found: orientation,
        });
    }

    if source == target && source_window.len() == 1 {
        tracing::trace!(%tab, "splitting a window with a single tab, nothing to do");
        return Ok(tree.clone());
    }

    let mut ids = IdAllocator::for_tree(tree);
    let mut root = tree.root().clone();
    window_mut(&mut root, source)?.remove_tab(tab, Reselect::First);
    let new_window = WindowNode::single(ids.next_window(), tab.clone());

    let Some((parent, index)) = target.split_last() else {
        // Docking against the whole layout: the old root moves into a panel
        // next to the new window.
        let mut old_root = root;
        old_root.id = ids.next_panel();
        old_root.size = 1.0;
        let new_root = PanelNode::new(NodeId::root(), direction.axis())
            .with_children(ordered(direction, new_window.into(), old_root.into()));
        return Ok(LayoutTree::from_root(new_root));
    };

    let panel = panel_mut(&mut root, &parent)?;
    let children = panel.children_mut();
    if direction.is_aligned_with(orientation) {
        let half = children[index].size() / 2.0;
        children[index].set_size(half);
        let at = if direction.is_before() { index } else { index + 1 };
        children.insert(at, new_window.with_size(half).into());
    } else {
        let mut existing = children[index].clone();
        let size = existing.size();
        existing.set_size(1.0);
        let wrapper = PanelNode::new(ids.next_panel(), orientation.perpendicular())
            .with_size(size)
            .with_children(ordered(direction, new_window.into(), existing));
        children[index] = wrapper.into();
    }
    Ok(LayoutTree::from_root(root))
}

/// Put `new` before `existing` for Left/Top, after it for Right/Bottom.
fn ordered(direction: DockSide, new: LayoutNode, existing: LayoutNode) -> [LayoutNode; 2] {
    if direction.is_before() {
        [new, existing]
    } else {
        [existing, new]
    }
}

fn close_tab(tree: &LayoutTree, tab: &TabId, window: &Address) -> DockResult<LayoutTree> {
    window_with_tab(tree, tab, window)?;

    let mut root = tree.root().clone();
    window_mut(&mut root, window)?.remove_tab(tab, Reselect::IfSelected);
    Ok(LayoutTree::from_root(root))
}

fn merge_window(tree: &LayoutTree, source: &Address, target: &Address) -> DockResult<LayoutTree> {
    tree.window(source)?;
    let kept = tree.window(target)?.selected().cloned();
    if source == target {
        return Ok(tree.clone());
    }

    let mut root = tree.root().clone();
    let tabs = window_mut(&mut root, source)?.take_tabs();
    let window = window_mut(&mut root, target)?;
    let first = tabs.first().cloned();
    for tab in tabs {
        window.push_tab(tab);
    }
    if let Some(selected) = kept.or(first) {
        window.select(&selected);
    }
    Ok(LayoutTree::from_root(root))
}
