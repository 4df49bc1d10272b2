//! Structural invariant checks.
//!
//! Every snapshot returned by [`dispatch`](crate::action::dispatch) satisfies
//! all of these. The checks report every violation they find instead of
//! stopping at the first, which makes failing property tests easier to read.

use std::fmt;

use quire_core::alloc::HashSet;
use quire_core::math::approx_eq;

use crate::address::Address;
use crate::node::{LayoutTree, NodeRef, TabId};
use crate::registry::TabRegistry;

/// Tolerance used when checking that weights sum to one.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// A broken invariant, located by address.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// Children weights of a non-empty panel do not sum to 1.
    WeightSum { panel: Address, sum: f64 },
    /// A weight is zero, negative or not finite.
    BadWeight { node: Address, value: f64 },
    /// A window without tabs.
    EmptyWindow { window: Address },
    /// A panel whose only child is a panel.
    RedundantNesting { panel: Address },
    /// A non-root panel without children.
    EmptyPanel { panel: Address },
    /// `selected` is missing or names a tab the window does not hold.
    BadSelection {
        window: Address,
        selected: Option<TabId>,
    },
    /// A tab appears more than once in the tree.
    DuplicateTab(TabId),
    /// A tab in the tree has no registry entry.
    UnregisteredTab(TabId),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::WeightSum { panel, sum } => {
                write!(f, "Weights of panel {} sum to {}", panel, sum)
            }
            InvariantViolation::BadWeight { node, value } => {
                write!(f, "Node {} has weight {}", node, value)
            }
            InvariantViolation::EmptyWindow { window } => write!(f, "Window {} has no tabs", window),
            InvariantViolation::RedundantNesting { panel } => {
                write!(f, "Panel {} has a single panel child", panel)
            }
            InvariantViolation::EmptyPanel { panel } => write!(f, "Panel {} has no children", panel),
            InvariantViolation::BadSelection { window, selected } => {
                write!(f, "Window {} selects {:?}, which it does not hold", window, selected)
            }
            InvariantViolation::DuplicateTab(tab) => write!(f, "Tab '{}' appears more than once", tab),
            InvariantViolation::UnregisteredTab(tab) => write!(f, "Tab '{}' is not registered", tab),
        }
    }
}

/// Check the structural invariants that do not need the tab registry:
/// weight sums, empty windows and panels, redundant nesting, selections and
/// tab uniqueness.
pub fn check_structure(tree: &LayoutTree) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut tabs = HashSet::new();

    tree.walk(|address, node| {
        match node {
            NodeRef::Panel(panel) => {
                if panel.is_empty() {
                    if !address.is_root() {
                        violations.push(InvariantViolation::EmptyPanel {
                            panel: address.clone(),
                        });
                    }
                    return;
                }

                let sum: f64 = panel.weights().iter().sum();
                if !approx_eq(sum, 1.0, WEIGHT_TOLERANCE) {
                    violations.push(InvariantViolation::WeightSum {
                        panel: address.clone(),
                        sum,
                    });
                }
                for (index, child) in panel.children().iter().enumerate() {
                    let value = child.size();
                    if !value.is_finite() || value <= 0.0 {
                        violations.push(InvariantViolation::BadWeight {
                            node: address.child(index),
                            value,
                        });
                    }
                }
                if panel.len() == 1 && panel.children()[0].is_panel() {
                    violations.push(InvariantViolation::RedundantNesting {
                        panel: address.clone(),
                    });
                }
            }
            NodeRef::Window(window) => {
                if window.is_empty() {
                    violations.push(InvariantViolation::EmptyWindow {
                        window: address.clone(),
                    });
                    return;
                }

                let selected_ok = window.selected().is_some_and(|tab| window.contains(tab));
                if !selected_ok {
                    violations.push(InvariantViolation::BadSelection {
                        window: address.clone(),
                        selected: window.selected().cloned(),
                    });
                }
                for tab in window.tabs() {
                    if !tabs.insert(tab.clone()) {
                        violations.push(InvariantViolation::DuplicateTab(tab.clone()));
                    }
                }
            }
        }
    });

    violations
}

/// Check every invariant, including that each tab in the tree is registered.
pub fn check_invariants<C>(tree: &LayoutTree, registry: &TabRegistry<C>) -> Vec<InvariantViolation> {
    let mut violations = check_structure(tree);
    violations.extend(
        tree.tab_ids()
            .into_iter()
            .filter(|tab| !registry.contains(tab.as_str()))
            .map(InvariantViolation::UnregisteredTab),
    );
    violations
}
