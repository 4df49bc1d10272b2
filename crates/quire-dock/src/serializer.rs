//! Turns a declarative panel/window/tab description into the initial tree.
//!
//! # Example
//!
//! ```
//! use quire_dock::serializer::{row, serialize, tab, window};
//!
//! let layout = row()
//!     .child(window().child(tab("editor", "Editor")).child(tab("notes", "Notes")))
//!     .child(window().child(tab("inspector", "Inspector")))
//!     .size(2.0);
//!
//! let serialized = serialize(layout).unwrap();
//! assert_eq!(serialized.tree.root().len(), 2);
//! assert_eq!(serialized.tabs.len(), 3);
//! ```

use crate::address::IdAllocator;
use crate::error::SerializeError;
use crate::node::{LayoutNode, LayoutTree, NodeId, Orientation, PanelNode, TabId, WindowNode};
use crate::registry::TabRegistry;

/// One element of a declarative layout description.
#[derive(Debug, Clone, PartialEq)]
pub enum Element<C> {
    Panel(PanelElement<C>),
    Window(WindowElement<C>),
    Tab(TabElement<C>),
}

impl<C> Element<C> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Panel(_) => "panel",
            Element::Window(_) => "window",
            Element::Tab(_) => "tab",
        }
    }
}

/// A panel description. Orientation defaults to [`Orientation::Row`].
#[derive(Debug, Clone, PartialEq)]
pub struct PanelElement<C> {
    pub orientation: Option<Orientation>,
    pub size: Option<f64>,
    pub children: Vec<Element<C>>,
}

impl<C> PanelElement<C> {
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn child(mut self, child: impl Into<Element<C>>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<E: Into<Element<C>>>(mut self, children: impl IntoIterator<Item = E>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

/// A window description. `selected` is an index into its tabs (default 0).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowElement<C> {
    pub size: Option<f64>,
    pub selected: Option<usize>,
    pub children: Vec<Element<C>>,
}

impl<C> WindowElement<C> {
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    pub fn child(mut self, child: impl Into<Element<C>>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<E: Into<Element<C>>>(mut self, children: impl IntoIterator<Item = E>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

/// A tab description: an id and the content the host will display for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TabElement<C> {
    pub id: String,
    pub content: C,
}

impl<C> From<PanelElement<C>> for Element<C> {
    fn from(panel: PanelElement<C>) -> Self {
        Element::Panel(panel)
    }
}

impl<C> From<WindowElement<C>> for Element<C> {
    fn from(window: WindowElement<C>) -> Self {
        Element::Window(window)
    }
}

impl<C> From<TabElement<C>> for Element<C> {
    fn from(tab: TabElement<C>) -> Self {
        Element::Tab(tab)
    }
}

/// A panel with the default orientation.
pub fn panel<C>() -> PanelElement<C> {
    PanelElement {
        orientation: None,
        size: None,
        children: Vec::new(),
    }
}

/// A panel laying its children out left to right.
pub fn row<C>() -> PanelElement<C> {
    panel().orientation(Orientation::Row)
}

/// A panel stacking its children top to bottom.
pub fn column<C>() -> PanelElement<C> {
    panel().orientation(Orientation::Column)
}

pub fn window<C>() -> WindowElement<C> {
    WindowElement {
        size: None,
        selected: None,
        children: Vec::new(),
    }
}

pub fn tab<C>(id: impl Into<String>, content: C) -> TabElement<C> {
    TabElement {
        id: id.into(),
        content,
    }
}

/// Output of [`serialize`]: the initial tree and the tab contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized<C> {
    pub tree: LayoutTree,
    pub tabs: TabRegistry<C>,
}

/// Build the initial tree from a description.
///
/// A top-level panel becomes the root (id `"root"`); a top-level window or tab
/// is placed inside a row root. Sizes are copied as given (missing sizes are
/// `1`) and are not normalized here.
pub fn serialize<C>(description: impl Into<Element<C>>) -> Result<Serialized<C>, SerializeError> {
    let mut pass = SerializePass {
        ids: IdAllocator::new(),
        tabs: TabRegistry::new(),
    };

    let root = match description.into() {
        Element::Panel(panel) => {
            let orientation = panel.orientation.unwrap_or_default();
            let children = pass.panel_children(panel.children)?;
            PanelNode::new(NodeId::root(), orientation).with_children(children)
        }
        other => {
            let child = pass.panel_child(other)?;
            PanelNode::new(NodeId::root(), Orientation::Row).child(child)
        }
    };

    tracing::debug!(tabs = pass.tabs.len(), "serialized layout description");
    Ok(Serialized {
        tree: LayoutTree::from_root(root),
        tabs: pass.tabs,
    })
}

struct SerializePass<C> {
    ids: IdAllocator,
    tabs: TabRegistry<C>,
}

impl<C> SerializePass<C> {
    fn panel_children(&mut self, children: Vec<Element<C>>) -> Result<Vec<LayoutNode>, SerializeError> {
        children.into_iter().map(|child| self.panel_child(child)).collect()
    }

    fn panel_child(&mut self, element: Element<C>) -> Result<LayoutNode, SerializeError> {
        match element {
            Element::Panel(panel) => {
                let id = self.ids.next_panel();
                let size = checked_size(panel.size)?;
                let orientation = panel.orientation.unwrap_or_default();
                let children = self.panel_children(panel.children)?;
                Ok(PanelNode::new(id, orientation)
                    .with_size(size)
                    .with_children(children)
                    .into())
            }
            Element::Window(window) => self.window(window).map(LayoutNode::from),
            // A bare tab inside a panel gets its own window.
            Element::Tab(tab) => {
                let id = self.ids.next_window();
                let tab_id = self.register(tab)?;
                Ok(WindowNode::single(id, tab_id).into())
            }
        }
    }

    fn window(&mut self, window: WindowElement<C>) -> Result<WindowNode, SerializeError> {
        let id = self.ids.next_window();
        let size = checked_size(window.size)?;

        let mut tabs = Vec::with_capacity(window.children.len());
        for child in window.children {
            match child {
                Element::Tab(tab) => tabs.push(self.register(tab)?),
                other => {
                    return Err(SerializeError::UnexpectedChild {
                        parent: "window",
                        found: other.kind_name(),
                    });
                }
            }
        }
        if tabs.is_empty() {
            return Err(SerializeError::EmptyWindow);
        }

        let selected = window.selected.unwrap_or(0);
        let Some(selected_tab) = tabs.get(selected).cloned() else {
            return Err(SerializeError::SelectedOutOfRange {
                selected,
                len: tabs.len(),
            });
        };

        Ok(WindowNode::new(id, tabs)
            .with_size(size)
            .with_selected(&selected_tab))
    }

    fn register(&mut self, tab: TabElement<C>) -> Result<TabId, SerializeError> {
        if tab.id.is_empty() {
            return Err(SerializeError::MissingTabId);
        }
        let id = TabId::from(tab.id);
        match self.tabs.insert(id.clone(), tab.content) {
            Ok(()) => Ok(id),
            Err(_) => Err(SerializeError::DuplicateTabId(id)),
        }
    }
}

fn checked_size(size: Option<f64>) -> Result<f64, SerializeError> {
    match size {
        None => Ok(1.0),
        Some(size) if size.is_finite() && size > 0.0 => Ok(size),
        Some(size) => Err(SerializeError::InvalidSize(size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_ids_follow_traversal_order() {
        let description = row()
            .child(column().child(window().child(tab("a", ()))).child(tab("b", ())))
            .child(window().child(tab("c", ())));
        let serialized = serialize(description).unwrap();
        let root = serialized.tree.root();

        let inner = root.children()[0].as_panel().unwrap();
        assert_eq!(inner.id.as_str(), "panel-1");
        assert_eq!(inner.children()[0].id().as_str(), "window-1");
        assert_eq!(inner.children()[1].id().as_str(), "window-2");
        assert_eq!(root.children()[1].id().as_str(), "window-3");
    }

    #[test]
    fn test_bare_tab_is_wrapped_in_window() {
        let serialized = serialize(row().child(tab("solo", "Solo"))).unwrap();
        let window = serialized.tree.root().children()[0].as_window().unwrap();
        assert_eq!(window.tabs(), &[TabId::from("solo")]);
        assert_eq!(window.selected(), Some(&TabId::from("solo")));
    }

    #[test]
    fn test_top_level_window_gets_row_root() {
        let serialized = serialize(window().child(tab("a", ()))).unwrap();
        assert_eq!(serialized.tree.root().orientation, Orientation::Row);
        assert_eq!(serialized.tree.root().len(), 1);
    }

    #[test]
    fn test_sizes_are_not_normalized() {
        let description = row()
            .child(window().size(3.0).child(tab("a", ())))
            .child(window().child(tab("b", ())));
        let serialized = serialize(description).unwrap();
        assert_eq!(serialized.tree.root().weights(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_selected_index() {
        let description = window().selected(1).child(tab("a", ())).child(tab("b", ()));
        let serialized = serialize(description).unwrap();
        let window = serialized.tree.root().children()[0].as_window().unwrap();
        assert_eq!(window.selected(), Some(&TabId::from("b")));
    }

    #[test]
    fn test_structural_errors() {
        let nested = window::<()>().child(window().child(tab("a", ())));
        assert_eq!(
            serialize(nested),
            Err(SerializeError::UnexpectedChild {
                parent: "window",
                found: "window"
            })
        );

        let duplicate = row()
            .child(window().child(tab("a", ())))
            .child(window().child(tab("a", ())));
        assert_eq!(
            serialize(duplicate),
            Err(SerializeError::DuplicateTabId(TabId::from("a")))
        );

        assert_eq!(
            serialize(row().child(tab("", ()))),
            Err(SerializeError::MissingTabId)
        );
        assert_eq!(
            serialize(row::<()>().child(window())),
            Err(SerializeError::EmptyWindow)
        );
        assert_eq!(
            serialize(window().selected(2).child(tab("a", ()))),
            Err(SerializeError::SelectedOutOfRange { selected: 2, len: 1 })
        );
        assert_eq!(
            serialize(row().child(window().size(0.0).child(tab("a", ())))),
            Err(SerializeError::InvalidSize(0.0))
        );
    }

    #[test]
    fn test_registry_keeps_declaration_order() {
        let description = row()
            .child(window().child(tab("z", 1)).child(tab("a", 2)))
            .child(tab("m", 3));
        let serialized = serialize(description).unwrap();
        let ids: Vec<_> = serialized.tabs.ids().map(TabId::as_str).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(serialized.tabs.get("m"), Some(&3));
    }
}
