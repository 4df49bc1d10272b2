//! Index-path addressing into a snapshot.
//!
//! An [`Address`] is the list of child indices from the root to a node. It is
//! only meaningful for the snapshot it was computed against; callers derive a
//! fresh address for every action instead of holding on to node handles.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DockError, DockResult};
use crate::node::{LayoutNode, LayoutTree, NodeId, NodeRef, PanelNode, TabId, WindowNode};

/// Path of child indices from the root panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Address(Vec<usize>);

impl Address {
    /// The address of the root panel.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Address of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// Parent address and this node's index in it. `None` for the root.
    pub fn split_last(&self) -> Option<(Address, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((Address(parent.to_vec()), last))
    }

    pub fn parent(&self) -> Option<Address> {
        self.split_last().map(|(parent, _)| parent)
    }

    /// `true` if `self` is `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &Address) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for Address {
    fn from(path: Vec<usize>) -> Self {
        Self(path)
    }
}

impl<const N: usize> From<[usize; N]> for Address {
    fn from(path: [usize; N]) -> Self {
        Self(path.to_vec())
    }
}

impl From<&[usize]> for Address {
    fn from(path: &[usize]) -> Self {
        Self(path.to_vec())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

fn out_of_range(address: &Address, depth: usize) -> DockError {
    DockError::AddressOutOfRange {
        address: address.clone(),
        depth,
    }
}

/// Resolve `address` against the root panel.
///
/// `[]` is the root, `[i]` is `root.children[i]`, longer paths recurse. Any
/// index that does not exist (including a path that continues below a window)
/// is an error; no default node is ever substituted.
pub fn resolve<'a>(root: &'a PanelNode, address: &Address) -> DockResult<NodeRef<'a>> {
    let mut current = NodeRef::Panel(root);
    for (depth, &index) in address.as_slice().iter().enumerate() {
        let NodeRef::Panel(panel) = current else {
            return Err(out_of_range(address, depth));
        };
        let child = panel
            .children()
            .get(index)
            .ok_or_else(|| out_of_range(address, depth))?;
        current = child.node_ref();
    }
    Ok(current)
}

/// Resolve an address that must name a panel.
pub fn resolve_panel<'a>(root: &'a PanelNode, address: &Address) -> DockResult<&'a PanelNode> {
    resolve(root, address)?
        .as_panel()
        .ok_or_else(|| DockError::NotAPanel(address.clone()))
}

/// Resolve an address that must name a window.
pub fn resolve_window<'a>(root: &'a PanelNode, address: &Address) -> DockResult<&'a WindowNode> {
    resolve(root, address)?
        .as_window()
        .ok_or_else(|| DockError::NotAWindow(address.clone()))
}

/// Mutable access to the node at a non-root address, copying every child list
/// on the way down that is still shared with another snapshot.
pub(crate) fn node_mut<'a>(root: &'a mut PanelNode, address: &Address) -> DockResult<&'a mut LayoutNode> {
    let Some((&first, rest)) = address.as_slice().split_first() else {
        return Err(DockError::NotWindowOrRoot(address.clone()));
    };
    let mut current = root
        .children_mut()
        .get_mut(first)
        .ok_or_else(|| out_of_range(address, 0))?;
    for (offset, &index) in rest.iter().enumerate() {
        let LayoutNode::Panel(panel) = current else {
            return Err(out_of_range(address, offset + 1));
        };
        current = panel
            .children_mut()
            .get_mut(index)
            .ok_or_else(|| out_of_range(address, offset + 1))?;
    }
    Ok(current)
}

/// Mutable access to a panel; the empty address yields the root itself.
pub(crate) fn panel_mut<'a>(root: &'a mut PanelNode, address: &Address) -> DockResult<&'a mut PanelNode> {
    if address.is_root() {
        return Ok(root);
    }
    match node_mut(root, address)? {
        LayoutNode::Panel(panel) => Ok(panel),
        LayoutNode::Window(_) => Err(DockError::NotAPanel(address.clone())),
    }
}

/// Mutable access to a window.
pub(crate) fn window_mut<'a>(root: &'a mut PanelNode, address: &Address) -> DockResult<&'a mut WindowNode> {
    if address.is_root() {
        return Err(DockError::NotAWindow(address.clone()));
    }
    match node_mut(root, address)? {
        LayoutNode::Window(window) => Ok(window),
        LayoutNode::Panel(_) => Err(DockError::NotAWindow(address.clone())),
    }
}

impl LayoutTree {
    /// See [`resolve`].
    pub fn resolve(&self, address: &Address) -> DockResult<NodeRef<'_>> {
        resolve(self.root(), address)
    }

    pub fn panel(&self, address: &Address) -> DockResult<&PanelNode> {
        resolve_panel(self.root(), address)
    }

    pub fn window(&self, address: &Address) -> DockResult<&WindowNode> {
        resolve_window(self.root(), address)
    }

    /// Visit every node in pre-order, the root first.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&Address, NodeRef<'a>)) {
        fn walk_panel<'a>(
            panel: &'a PanelNode,
            address: &mut Vec<usize>,
            visit: &mut impl FnMut(&Address, NodeRef<'a>),
        ) {
            for (index, child) in panel.children().iter().enumerate() {
                address.push(index);
                visit(&Address::from(address.as_slice()), child.node_ref());
                if let LayoutNode::Panel(inner) = child {
                    walk_panel(inner, address, visit);
                }
                address.pop();
            }
        }

        visit(&Address::root(), NodeRef::Panel(self.root()));
        walk_panel(self.root(), &mut Vec::new(), &mut visit);
    }

    /// Every window with its address, in pre-order.
    pub fn windows(&self) -> Vec<(Address, &WindowNode)> {
        let mut out = Vec::new();
        self.walk(|address, node| {
            if let NodeRef::Window(window) = node {
                out.push((address.clone(), window));
            }
        });
        out
    }

    /// Every panel (root included) with its address, in pre-order.
    pub fn panels(&self) -> Vec<(Address, &PanelNode)> {
        let mut out = Vec::new();
        self.walk(|address, node| {
            if let NodeRef::Panel(panel) = node {
                out.push((address.clone(), panel));
            }
        });
        out
    }

    /// Address of the window that owns `tab`.
    pub fn find_tab(&self, tab: &TabId) -> Option<Address> {
        self.windows()
            .into_iter()
            .find(|(_, window)| window.contains(tab))
            .map(|(address, _)| address)
    }

    /// Address of the node with the given id.
    pub fn find_node(&self, id: &NodeId) -> Option<Address> {
        let mut found = None;
        self.walk(|address, node| {
            if found.is_none() && node.id() == id {
                found = Some(address.clone());
            }
        });
        found
    }
}

/// Deterministic generator of synthetic node ids (`panel-<n>`, `window-<n>`).
///
/// Seeded from a snapshot, it never hands out an id already present in it.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_panel: u64,
    next_window: u64,
}

impl IdAllocator {
    pub const PANEL_PREFIX: &'static str = "panel-";
    pub const WINDOW_PREFIX: &'static str = "window-";

    /// Fresh allocator starting at `panel-1` / `window-1`.
    pub fn new() -> Self {
        Self {
            next_panel: 1,
            next_window: 1,
        }
    }

    /// Allocator that continues past the highest synthetic id in `tree`.
    pub fn for_tree(tree: &LayoutTree) -> Self {
        let mut allocator = Self::new();
        tree.walk(|_, node| allocator.observe(node.id()));
        allocator
    }

    fn observe(&mut self, id: &NodeId) {
        let id = id.as_str();
        if let Some(n) = id.strip_prefix(Self::PANEL_PREFIX).and_then(|n| n.parse::<u64>().ok()) {
            self.next_panel = self.next_panel.max(n.saturating_add(1));
        } else if let Some(n) = id.strip_prefix(Self::WINDOW_PREFIX).and_then(|n| n.parse::<u64>().ok()) {
            self.next_window = self.next_window.max(n.saturating_add(1));
        }
    }

    pub fn next_panel(&mut self) -> NodeId {
        let id = NodeId::from(format!("{}{}", Self::PANEL_PREFIX, self.next_panel));
        self.next_panel += 1;
        id
    }

    pub fn next_window(&mut self) -> NodeId {
        let id = NodeId::from(format!("{}{}", Self::WINDOW_PREFIX, self.next_window));
        self.next_window += 1;
        id
    }
}
