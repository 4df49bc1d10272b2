//! Layout tree data model.
//!
//! A [`LayoutTree`] is one immutable snapshot of the dock layout. Panels keep
//! their children behind an [`Arc`], so cloning a snapshot is O(1) and an
//! update only copies the nodes on the path it touches; every other subtree is
//! shared with the previous snapshot.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a tab. Globally unique across a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TabId(Arc<str>);

impl TabId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for TabId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a panel or window node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Id of the implicit root panel.
    pub const ROOT: &'static str = "root";

    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self::new(Self::ROOT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Axis along which a panel lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Orientation {
    /// Children side by side, left to right.
    #[default]
    Row,
    /// Children stacked, top to bottom.
    Column,
}

impl Orientation {
    /// Get the perpendicular orientation.
    pub fn perpendicular(&self) -> Self {
        match self {
            Orientation::Row => Orientation::Column,
            Orientation::Column => Orientation::Row,
        }
    }
}

/// Side of a window (or of the whole dock) a tab can be split towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DockSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl DockSide {
    pub const ALL: [DockSide; 4] = [DockSide::Left, DockSide::Right, DockSide::Top, DockSide::Bottom];

    /// Orientation a panel needs to place a new node on this side.
    pub fn axis(&self) -> Orientation {
        match self {
            DockSide::Left | DockSide::Right => Orientation::Row,
            DockSide::Top | DockSide::Bottom => Orientation::Column,
        }
    }

    /// Check if this side puts the new node before the existing content.
    pub fn is_before(&self) -> bool {
        matches!(self, DockSide::Left | DockSide::Top)
    }

    /// Whether a split towards this side can reuse a panel of `orientation`.
    pub fn is_aligned_with(&self, orientation: Orientation) -> bool {
        self.axis() == orientation
    }
}

/// A panel: lays out its children along `orientation`, proportionally to
/// their weights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelNode {
    pub id: NodeId,
    /// Weight relative to the siblings in the parent panel.
    pub size: f64,
    pub orientation: Orientation,
    children: Arc<Vec<LayoutNode>>,
}

impl PanelNode {
    pub fn new(id: impl Into<NodeId>, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            size: 1.0,
            orientation,
            children: Arc::new(Vec::new()),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = LayoutNode>) -> Self {
        self.children = Arc::new(children.into_iter().collect());
        self
    }

    pub fn child(mut self, child: impl Into<LayoutNode>) -> Self {
        self.children_mut().push(child.into());
        self
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    /// Copy-on-write access: clones the child list only if another snapshot
    /// still shares it.
    pub(crate) fn children_mut(&mut self) -> &mut Vec<LayoutNode> {
        Arc::make_mut(&mut self.children)
    }

    pub(crate) fn replace_children(&mut self, children: Vec<LayoutNode>) {
        self.children = Arc::new(children);
    }

    /// `true` if both panels point at the very same child list.
    pub fn shares_children_with(&self, other: &PanelNode) -> bool {
        Arc::ptr_eq(&self.children, &other.children)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.children.iter().map(LayoutNode::size).collect()
    }
}

/// How to pick a new selection after removing a tab from a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reselect {
    /// Always select the first remaining tab.
    First,
    /// Only move the selection if the removed tab was the selected one.
    IfSelected,
}

/// A window: an ordered set of tabs and the one currently shown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowNode {
    pub id: NodeId,
    /// Weight relative to the siblings in the parent panel.
    pub size: f64,
    tabs: Arc<Vec<TabId>>,
    selected: Option<TabId>,
}

impl WindowNode {
    /// Create a window holding `tabs`, with the first tab selected.
    pub fn new(id: impl Into<NodeId>, tabs: impl IntoIterator<Item = TabId>) -> Self {
        let tabs: Vec<TabId> = tabs.into_iter().collect();
        let selected = tabs.first().cloned();
        Self {
            id: id.into(),
            size: 1.0,
            tabs: Arc::new(tabs),
            selected,
        }
    }

    /// A window with a single tab, selected.
    pub fn single(id: impl Into<NodeId>, tab: TabId) -> Self {
        Self::new(id, [tab])
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Select `tab` if this window owns it; otherwise the selection is kept.
    pub fn with_selected(mut self, tab: &TabId) -> Self {
        self.select(tab);
        self
    }

    pub fn tabs(&self) -> &[TabId] {
        &self.tabs
    }

    pub fn selected(&self) -> Option<&TabId> {
        self.selected.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, tab: &TabId) -> bool {
        self.tabs.contains(tab)
    }

    pub fn position(&self, tab: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t == tab)
    }

    /// Select a tab owned by this window. Returns `false` if it is not here.
    pub fn select(&mut self, tab: &TabId) -> bool {
        if self.contains(tab) {
            self.selected = Some(tab.clone());
            true
        } else {
            false
        }
    }

    /// Append a tab and select it.
    pub(crate) fn push_tab(&mut self, tab: TabId) {
        Arc::make_mut(&mut self.tabs).push(tab.clone());
        self.selected = Some(tab);
    }

    /// Remove a tab, returning `false` if it was not in this window.
    pub(crate) fn remove_tab(&mut self, tab: &TabId, reselect: Reselect) -> bool {
        let Some(index) = self.position(tab) else {
            return false;
        };
        Arc::make_mut(&mut self.tabs).remove(index);

        let was_selected = self.selected.as_ref() == Some(tab);
        if was_selected || reselect == Reselect::First {
            self.selected = self.tabs.first().cloned();
        }
        true
    }

    /// Move the tab at `from` to `to`, shifting the tabs in between.
    pub(crate) fn move_tab(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let tabs = Arc::make_mut(&mut self.tabs);
        let tab = tabs.remove(from);
        tabs.insert(to, tab);
    }

    /// Remove every tab, handing them to the caller in order.
    pub(crate) fn take_tabs(&mut self) -> Vec<TabId> {
        self.selected = None;
        std::mem::take(Arc::make_mut(&mut self.tabs))
    }
}

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum LayoutNode {
    Panel(PanelNode),
    Window(WindowNode),
}

impl LayoutNode {
    pub fn id(&self) -> &NodeId {
        match self {
            LayoutNode::Panel(panel) => &panel.id,
            LayoutNode::Window(window) => &window.id,
        }
    }

    pub fn size(&self) -> f64 {
        match self {
            LayoutNode::Panel(panel) => panel.size,
            LayoutNode::Window(window) => window.size,
        }
    }

    pub fn set_size(&mut self, size: f64) {
        match self {
            LayoutNode::Panel(panel) => panel.size = size,
            LayoutNode::Window(window) => window.size = size,
        }
    }

    pub fn as_panel(&self) -> Option<&PanelNode> {
        match self {
            LayoutNode::Panel(panel) => Some(panel),
            LayoutNode::Window(_) => None,
        }
    }

    pub fn as_window(&self) -> Option<&WindowNode> {
        match self {
            LayoutNode::Window(window) => Some(window),
            LayoutNode::Panel(_) => None,
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, LayoutNode::Panel(_))
    }

    pub fn is_window(&self) -> bool {
        matches!(self, LayoutNode::Window(_))
    }

    pub fn node_ref(&self) -> NodeRef<'_> {
        match self {
            LayoutNode::Panel(panel) => NodeRef::Panel(panel),
            LayoutNode::Window(window) => NodeRef::Window(window),
        }
    }

    /// Every tab id in this subtree, in depth-first order.
    pub fn tab_ids(&self) -> Vec<TabId> {
        let mut out = Vec::new();
        collect_tabs(self.node_ref(), &mut out);
        out
    }
}

impl From<PanelNode> for LayoutNode {
    fn from(panel: PanelNode) -> Self {
        LayoutNode::Panel(panel)
    }
}

impl From<WindowNode> for LayoutNode {
    fn from(window: WindowNode) -> Self {
        LayoutNode::Window(window)
    }
}

/// Borrowed view of a node; the root panel is not a [`LayoutNode`] but can
/// still be resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Panel(&'a PanelNode),
    Window(&'a WindowNode),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a NodeId {
        match self {
            NodeRef::Panel(panel) => &panel.id,
            NodeRef::Window(window) => &window.id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeRef::Panel(_) => "panel",
            NodeRef::Window(_) => "window",
        }
    }

    pub fn as_panel(&self) -> Option<&'a PanelNode> {
        match self {
            NodeRef::Panel(panel) => Some(panel),
            NodeRef::Window(_) => None,
        }
    }

    pub fn as_window(&self) -> Option<&'a WindowNode> {
        match self {
            NodeRef::Window(window) => Some(window),
            NodeRef::Panel(_) => None,
        }
    }
}

fn collect_tabs(node: NodeRef<'_>, out: &mut Vec<TabId>) {
    match node {
        NodeRef::Panel(panel) => {
            for child in panel.children() {
                collect_tabs(child.node_ref(), out);
            }
        }
        NodeRef::Window(window) => out.extend(window.tabs().iter().cloned()),
    }
}

/// One immutable snapshot of the dock layout.
///
/// The root is always a panel with id `"root"`; its own weight is irrelevant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutTree {
    root: PanelNode,
}

static_assertions::assert_impl_all!(LayoutTree: Send, Sync);

impl LayoutTree {
    /// An empty layout whose root lays children out along `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            root: PanelNode::new(NodeId::root(), orientation),
        }
    }

    /// Wrap a panel as the root; its id is forced to `"root"`.
    pub fn from_root(mut root: PanelNode) -> Self {
        root.id = NodeId::root();
        root.size = 1.0;
        Self { root }
    }

    pub fn root(&self) -> &PanelNode {
        &self.root
    }

    pub(crate) fn into_root(self) -> PanelNode {
        self.root
    }

    /// `true` if both snapshots share the same root child list, i.e. one was
    /// produced from the other without any structural change.
    pub fn ptr_eq(&self, other: &LayoutTree) -> bool {
        self.root.orientation == other.root.orientation && self.root.shares_children_with(&other.root)
    }

    /// Every tab id in the tree, in depth-first order.
    pub fn tab_ids(&self) -> Vec<TabId> {
        let mut out = Vec::new();
        collect_tabs(NodeRef::Panel(&self.root), &mut out);
        out
    }

    pub fn tab_count(&self) -> usize {
        self.tab_ids().len()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new(Orientation::Row)
    }
}
