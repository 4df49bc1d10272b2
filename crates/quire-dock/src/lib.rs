//! Quire Dock - docking layout engine
//!
//! A tree of resizable panels and tabbed windows that can be split, merged,
//! reordered and dragged between at runtime:
//! - Persistent snapshots with structural sharing
//! - Pure reducer over index-path addresses
//! - Tiered drop target resolution
//! - Cascading minimum-size resize math
//!
//! The engine renders nothing and never decides what a tab shows; it turns
//! descriptions and gestures into snapshots and pixel sizes.
//!
//! ## Quick Start
//!
//! ```rust
//! use quire_dock::serializer::{row, tab, window};
//! use quire_dock::{Action, Address, DockState, TabId};
//!
//! let mut state = DockState::from_description(
//!     row()
//!         .child(window().child(tab("editor", "Editor")).child(tab("notes", "Notes")))
//!         .child(window().child(tab("inspector", "Inspector"))),
//! )
//! .unwrap();
//!
//! state
//!     .dispatch(Action::MoveTab {
//!         tab: TabId::from("notes"),
//!         source: Address::from([0]),
//!         target: Address::from([1]),
//!     })
//!     .unwrap();
//!
//! let inspector = state.tree().window(&Address::from([1])).unwrap();
//! assert_eq!(inspector.selected(), Some(&TabId::from("notes")));
//! assert!(state.undo());
//! ```

pub mod action;
pub mod address;
pub mod collision;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod invariants;
pub mod node;
pub mod normalize;
pub mod registry;
pub mod resize;
pub mod serializer;
pub mod state;

pub use action::{Action, dispatch};
pub use address::{Address, IdAllocator, resolve, resolve_panel, resolve_window};
pub use collision::{
    CollisionTier, DropRegion, DropTarget, DropTargetResolver, EdgeZoneDetector, RegionKind,
    resolve_drop_target,
};
pub use config::DockStyle;
pub use error::{DockError, DockResult, SerializeError};
pub use geometry::{LayoutMap, compute_layout, drop_regions};
pub use gesture::{DragGesture, DragPhase, HandleDrag, HandleItem, TabDrag, TabItem};
pub use history::History;
pub use invariants::{InvariantViolation, check_invariants, check_structure};
pub use node::{DockSide, LayoutNode, LayoutTree, NodeId, NodeRef, Orientation, PanelNode, TabId, WindowNode};
pub use normalize::cleanup;
pub use registry::TabRegistry;
pub use resize::{ResizeDrag, compute_resize, pixels_to_weights, weights_to_pixels};
pub use serializer::{Element, Serialized, serialize};
pub use state::DockState;

// Re-export geometry types used in the public API
pub use quire_core::geometry::Rect;
pub use quire_core::math::Vec2;
