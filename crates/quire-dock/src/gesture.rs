//! Drag gesture sessions.
//!
//! A gesture goes `Idle -> Pending -> Dragging` and back to `Idle` on drop or
//! cancel. While it lasts it only updates transient state (the hinted drop
//! target, or the pixel sizes of a resize); the tree is changed once, by the
//! action returned from `on_drop`.
//!
//! The sessions know nothing about the input system that feeds them.

use quire_core::geometry::Rect;
use quire_core::math::Vec2;

use crate::action::Action;
use crate::address::Address;
use crate::collision::{DropRegion, DropTarget, DropTargetResolver, EdgeZoneDetector, RegionKind};
use crate::config::DockStyle;
use crate::error::DockResult;
use crate::geometry::LayoutMap;
use crate::node::{LayoutTree, Orientation, TabId};
use crate::resize::ResizeDrag;

/// Where a gesture is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pressed, but the pointer has not travelled past the drag threshold.
    Pending,
    Dragging,
}

/// Minimal interface a pointer-drag source drives.
pub trait DragGesture {
    /// What is being dragged.
    type Item;

    /// The pointer was pressed on `item`.
    fn on_start(&mut self, item: Self::Item, pointer: Vec2);

    /// The pointer moved. `candidates` are the drop regions currently
    /// registered; gestures that do not drop onto regions ignore them.
    fn on_move(&mut self, pointer: Vec2, candidates: &[DropRegion]);

    /// The pointer was released. Returns the single action to dispatch, if
    /// any, and resets the gesture.
    fn on_drop(&mut self, tree: &LayoutTree) -> DockResult<Option<Action>>;

    /// Abort, discarding all transient state.
    fn on_cancel(&mut self);

    fn phase(&self) -> DragPhase;
}

/// Pointer travel since the press, with the threshold latch.
#[derive(Debug, Clone, PartialEq)]
struct PointerTrack {
    start: Vec2,
    current: Vec2,
    active: bool,
}

impl PointerTrack {
    fn new(start: Vec2) -> Self {
        Self {
            start,
            current: start,
            active: false,
        }
    }

    /// Update the position; once past `threshold` the drag stays active.
    fn update(&mut self, pos: Vec2, threshold: f32) {
        self.current = pos;
        if !self.active && self.delta().length() >= threshold {
            self.active = true;
        }
    }

    fn delta(&self) -> Vec2 {
        self.current - self.start
    }

    fn phase(&self) -> DragPhase {
        if self.active { DragPhase::Dragging } else { DragPhase::Pending }
    }
}

/// A tab picked up from a window.
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem {
    pub tab: TabId,
    /// Address of the window the tab is dragged out of.
    pub window: Address,
}

#[derive(Debug, Clone)]
struct TabSession {
    item: TabItem,
    pointer: PointerTrack,
    target: Option<DropTarget>,
}

/// Dragging a tab onto a drop target.
#[derive(Debug, Clone)]
pub struct TabDrag {
    resolver: DropTargetResolver,
    edges: EdgeZoneDetector,
    threshold: f32,
    session: Option<TabSession>,
}

impl Default for TabDrag {
    fn default() -> Self {
        Self::new(&DockStyle::default())
    }
}

impl TabDrag {
    pub fn new(style: &DockStyle) -> Self {
        Self {
            resolver: DropTargetResolver::from_style(style),
            edges: EdgeZoneDetector::new().with_edge_threshold(style.edge_threshold),
            threshold: style.drag_threshold,
            session: None,
        }
    }

    /// Target the tab would land on if dropped now, for drawing a hint.
    pub fn target(&self) -> Option<&DropTarget> {
        self.session.as_ref().and_then(|s| s.target.as_ref())
    }

    /// Bounds of the current hint: where the new window would land for an
    /// edge target, the hit region for any other target.
    pub fn preview(&self, layout: &LayoutMap) -> Option<Rect<f32>> {
        let target = self.target()?;
        match &target.kind {
            RegionKind::Edge { target: node, side } => {
                layout.get(node).map(|bounds| self.edges.preview_bounds(*side, bounds))
            }
            _ => Some(target.rect),
        }
    }

    pub fn item(&self) -> Option<&TabItem> {
        self.session.as_ref().map(|s| &s.item)
    }

    /// Pointer travel since the press.
    pub fn delta(&self) -> Option<Vec2> {
        self.session.as_ref().map(|s| s.pointer.delta())
    }
}

impl DragGesture for TabDrag {
    type Item = TabItem;

    fn on_start(&mut self, item: TabItem, pointer: Vec2) {
        tracing::trace!(tab = %item.tab, "tab drag pending");
        self.session = Some(TabSession {
            item,
            pointer: PointerTrack::new(pointer),
            target: None,
        });
    }

    fn on_move(&mut self, pointer: Vec2, candidates: &[DropRegion]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pointer.update(pointer, self.threshold);
        if session.pointer.active {
            session.target = self.resolver.resolve(pointer, candidates);
        }
    }

    fn on_drop(&mut self, tree: &LayoutTree) -> DockResult<Option<Action>> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        match session.target {
            Some(target) if session.pointer.active => target.to_action(tree, &session.item.tab, &session.item.window),
            _ => {
                tracing::trace!(tab = %session.item.tab, "tab dropped without a target");
                Ok(None)
            }
        }
    }

    fn on_cancel(&mut self) {
        self.session = None;
    }

    fn phase(&self) -> DragPhase {
        self.session.as_ref().map_or(DragPhase::Idle, |s| s.pointer.phase())
    }
}

/// A panel resize handle picked up for dragging.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleItem {
    pub panel: Address,
    pub orientation: Orientation,
    resize: ResizeDrag,
}

impl HandleItem {
    /// Capture the handle after child `handle` of `panel`, using the live
    /// child extents from `layout`.
    pub fn new(
        tree: &LayoutTree,
        layout: &LayoutMap,
        panel: Address,
        handle: usize,
        style: &DockStyle,
    ) -> DockResult<Self> {
        let node = tree.panel(&panel)?;
        let extents = layout.child_extents(tree, &panel)?;
        let resize = ResizeDrag::new(handle, &node.weights(), &extents, style.min_pane_size)?;
        Ok(Self {
            orientation: node.orientation,
            panel,
            resize,
        })
    }

    pub fn handle(&self) -> usize {
        self.resize.handle()
    }
}

/// Dragging a resize handle between two siblings.
#[derive(Debug, Clone)]
pub struct HandleDrag {
    threshold: f32,
    session: Option<(HandleItem, PointerTrack)>,
}

impl Default for HandleDrag {
    fn default() -> Self {
        Self::new(&DockStyle::default())
    }
}

impl HandleDrag {
    pub fn new(style: &DockStyle) -> Self {
        Self {
            threshold: style.drag_threshold,
            session: None,
        }
    }

    /// Pixel sizes to render the panel's children with while dragging.
    pub fn sizes(&self) -> Option<&[f32]> {
        self.session.as_ref().map(|(item, _)| item.resize.sizes())
    }
}

impl DragGesture for HandleDrag {
    type Item = HandleItem;

    fn on_start(&mut self, item: HandleItem, pointer: Vec2) {
        self.session = Some((item, PointerTrack::new(pointer)));
    }

    fn on_move(&mut self, pointer: Vec2, _candidates: &[DropRegion]) {
        let Some((item, track)) = self.session.as_mut() else {
            return;
        };
        track.update(pointer, self.threshold);
        if track.active {
            let delta = match item.orientation {
                Orientation::Row => track.delta().x,
                Orientation::Column => track.delta().y,
            };
            item.resize.update(delta);
        }
    }

    fn on_drop(&mut self, _tree: &LayoutTree) -> DockResult<Option<Action>> {
        let Some((item, track)) = self.session.take() else {
            return Ok(None);
        };
        if !track.active {
            return Ok(None);
        }
        Ok(Some(Action::Resize {
            panel: item.panel,
            weights: item.resize.finish(),
        }))
    }

    fn on_cancel(&mut self) {
        self.session = None;
    }

    fn phase(&self) -> DragPhase {
        self.session.as_ref().map_or(DragPhase::Idle, |(_, track)| track.phase())
    }
}
