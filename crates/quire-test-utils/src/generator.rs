//! Deterministic random action streams.
//!
//! Actions are always built against the tree they will be dispatched on, so
//! every generated action is valid and `dispatch` must succeed on it.

use quire_dock::{Action, Address, DockSide, LayoutTree, Orientation, PanelNode, TabId, WindowNode};

/// Small linear congruential generator; fully determined by its seed.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
    fresh: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
            fresh: 0,
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.state >> 11
    }

    pub fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.choose_index(items.len())]
    }

    pub fn choose_bool(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }

    /// A tab id never handed out before by this generator.
    pub fn fresh_tab(&mut self) -> TabId {
        self.fresh += 1;
        TabId::from(format!("gen-{}", self.fresh))
    }
}

fn fresh_tab(tree: &LayoutTree, rng: &mut Lcg) -> TabId {
    loop {
        let tab = rng.fresh_tab();
        if tree.find_tab(&tab).is_none() {
            return tab;
        }
    }
}

/// Orientation of the panel enclosing `target` (the root encloses itself).
fn enclosing_orientation(tree: &LayoutTree, target: &Address) -> Orientation {
    target
        .parent()
        .and_then(|parent| tree.panel(&parent).ok())
        .map_or(tree.root().orientation, |panel| panel.orientation)
}

/// Pick a random action that is valid for `tree`.
///
/// The tree must hold at least one tab. `CloseTab` is only produced while
/// more than one tab is left, so streams never empty the layout.
pub fn random_action(tree: &LayoutTree, rng: &mut Lcg) -> Action {
    let windows: Vec<(Address, Vec<TabId>)> = tree
        .windows()
        .into_iter()
        .map(|(address, window)| (address, window.tabs().to_vec()))
        .collect();
    let panels: Vec<(Address, usize)> = tree
        .panels()
        .into_iter()
        .map(|(address, panel)| (address, panel.len()))
        .filter(|(_, len)| *len > 0)
        .collect();
    assert!(!windows.is_empty(), "random_action needs a tree with tabs");

    let (source, tabs) = rng.choose(&windows).clone();
    let tab = rng.choose(&tabs).clone();
    let (other, _) = rng.choose(&windows).clone();

    match rng.choose_index(9) {
        0 => {
            let (panel, len) = rng.choose(&panels).clone();
            // Either all zero or all positive; mixed zeros are rejected
            let weights = if rng.choose_index(8) == 0 {
                vec![0.0; len]
            } else {
                (0..len).map(|_| (rng.choose_index(7) + 1) as f64).collect()
            };
            Action::Resize { panel, weights }
        }
        1 => {
            let first = fresh_tab(tree, rng);
            let window = WindowNode::single(format!("added-{}", first), first);
            let node = if rng.choose_bool() {
                window.into()
            } else {
                let second = fresh_tab(tree, rng);
                PanelNode::new(format!("added-panel-{}", second), Orientation::Column)
                    .child(window)
                    .child(WindowNode::single(format!("added-{}", second), second))
                    .into()
            };
            Action::AddPanel { node }
        }
        2 => {
            let (target, len) = rng.choose(&panels).clone();
            Action::InsertPanel {
                tab,
                source,
                target,
                index: rng.choose_index(len),
            }
        }
        3 => Action::ReorderTabs {
            source: tab,
            target: rng.choose(&tabs).clone(),
            window: source,
        },
        4 => Action::SelectTab { tab, window: source },
        5 => Action::MoveTab {
            tab,
            source,
            target: other,
        },
        6 => {
            let target = if rng.choose_index(4) == 0 { Address::root() } else { other };
            Action::SplitWindow {
                orientation: enclosing_orientation(tree, &target),
                tab,
                source,
                target,
                direction: *rng.choose(&DockSide::ALL),
            }
        }
        7 if tree.tab_count() > 1 => Action::CloseTab { tab, window: source },
        _ => Action::MergeWindow { source, target: other },
    }
}
