//! Assertions shared by the dock test suites.

use std::collections::BTreeMap;

use quire_dock::{LayoutTree, TabId, TabRegistry, check_invariants, check_structure};

/// Panic with every violated structural invariant.
#[track_caller]
pub fn assert_invariants(tree: &LayoutTree) {
    let violations = check_structure(tree);
    if !violations.is_empty() {
        let report: Vec<String> = violations.iter().map(ToString::to_string).collect();
        panic!("tree violates invariants:\n  {}\n{:#?}", report.join("\n  "), tree);
    }
}

/// Like [`assert_invariants`], also requiring every tab to be registered.
#[track_caller]
pub fn assert_invariants_with<C>(tree: &LayoutTree, registry: &TabRegistry<C>) {
    let violations = check_invariants(tree, registry);
    if !violations.is_empty() {
        let report: Vec<String> = violations.iter().map(ToString::to_string).collect();
        panic!("tree violates invariants:\n  {}", report.join("\n  "));
    }
}

/// How many times each tab occurs in the tree.
pub fn tab_multiset(tree: &LayoutTree) -> BTreeMap<TabId, usize> {
    let mut counts = BTreeMap::new();
    for tab in tree.tab_ids() {
        *counts.entry(tab).or_insert(0) += 1;
    }
    counts
}

/// Element-wise comparison within `1e-6`.
#[track_caller]
pub fn assert_weights_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "weights {:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-6, "weights {:?} vs {:?}", actual, expected);
    }
}
