//! Structural cleanup run after every reducer action.
//!
//! Depth-first, per panel:
//! 1. children panels are cleaned first,
//! 2. a child panel whose only child is a panel is replaced by that
//!    grandchild, which inherits the child's weight,
//! 3. windows without tabs and panels without children are dropped,
//! 4. the remaining weights are rescaled to sum to 1 (uniform if they sum
//!    to 0).
//!
//! The root cannot be replaced, so when it ends up holding a single panel it
//! takes over that panel's orientation and children instead.
//!
//! Subtrees that need no change are reused as-is, so the output shares them
//! with the input snapshot.

use quire_core::math::approx_eq;
use quire_core::profiling::profile_function;

use crate::node::{LayoutNode, LayoutTree, PanelNode};

/// Weight sums closer to 1 than this are left untouched, which keeps
/// `cleanup(cleanup(t)) == cleanup(t)` exact.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Restore the structural invariants of a snapshot.
pub fn cleanup(tree: &LayoutTree) -> LayoutTree {
    profile_function!();

    let cleaned = normalize_panel(tree.root());
    let current = cleaned.as_ref().unwrap_or(tree.root());
    if !matches!(current.children(), [LayoutNode::Panel(_)]) {
        return match cleaned {
            Some(root) => LayoutTree::from_root(root),
            None => tree.clone(),
        };
    }

    let mut root = current.clone();
    while let [LayoutNode::Panel(only)] = root.children() {
        let only = only.clone();
        root.orientation = only.orientation;
        root.replace_children(only.children().to_vec());
    }

    LayoutTree::from_root(root)
}

/// Returns `None` when the panel already satisfies every rule.
fn normalize_panel(panel: &PanelNode) -> Option<PanelNode> {
    let mut changed = false;
    let mut children = Vec::with_capacity(panel.len());

    for child in panel.children() {
        match child {
            LayoutNode::Window(window) if window.is_empty() => changed = true,
            LayoutNode::Window(_) => children.push(child.clone()),
            LayoutNode::Panel(inner) => {
                let cleaned = normalize_panel(inner);
                changed |= cleaned.is_some();
                let inner = cleaned.unwrap_or_else(|| inner.clone());

                match inner.children() {
                    [] => changed = true,
                    [LayoutNode::Panel(grandchild)] => {
                        changed = true;
                        let mut grandchild = grandchild.clone();
                        grandchild.size *= inner.size;
                        children.push(LayoutNode::Panel(grandchild));
                    }
                    _ => children.push(LayoutNode::Panel(inner)),
                }
            }
        }
    }

    changed |= renormalize(&mut children);

    if !changed {
        return None;
    }
    let mut cleaned = panel.clone();
    cleaned.replace_children(children);
    Some(cleaned)
}

/// Rescale weights to sum to 1. Returns `true` if any weight changed.
pub(crate) fn renormalize(children: &mut [LayoutNode]) -> bool {
    if children.is_empty() {
        return false;
    }
    let sum: f64 = children.iter().map(LayoutNode::size).sum();
    if approx_eq(sum, 1.0, WEIGHT_SUM_TOLERANCE) {
        return false;
    }

    if sum > 0.0 && sum.is_finite() {
        for child in children.iter_mut() {
            let size = child.size() / sum;
            child.set_size(size);
        }
    } else {
        let uniform = 1.0 / children.len() as f64;
        for child in children.iter_mut() {
            child.set_size(uniform);
        }
    }
    true
}
