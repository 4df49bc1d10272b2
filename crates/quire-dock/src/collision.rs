//! Drop target resolution for tab drags.
//!
//! Candidate regions fall into three tiers, checked strictly in order: tabs
//! and tab bars, then insert dividers, then window edge zones. The first tier
//! with any hit wins and lower tiers are not looked at.
//!
//! Tiers 1 and 2 use a rectangle intersection test against a small probe
//! around the pointer. Edge zones can be thin and overlap at the corners, so
//! tier 3 picks the zone whose center is closest to the pointer instead.

use quire_core::geometry::Rect;
use quire_core::math::Vec2;
use quire_core::profiling::profile_function;

use crate::action::Action;
use crate::address::Address;
use crate::config::{DEFAULT_EDGE_THRESHOLD, DockStyle};
use crate::error::{DockError, DockResult};
use crate::node::{DockSide, LayoutTree, TabId};

/// Priority tier of a drop region; lower tiers win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollisionTier {
    Tab = 1,
    Divider = 2,
    Edge = 3,
}

/// What dropping on a region does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The empty part of a window's tab bar: move the tab into that window.
    TabBar { window: Address },
    /// A single tab: reorder within its window, or move into it.
    Tab { window: Address, tab: TabId },
    /// The gap after child `index` of `panel`: insert a new window there.
    Divider { panel: Address, index: usize },
    /// An edge of a window, or of the root: split towards `side`.
    Edge { target: Address, side: DockSide },
}

impl RegionKind {
    pub fn tier(&self) -> CollisionTier {
        match self {
            RegionKind::TabBar { .. } | RegionKind::Tab { .. } => CollisionTier::Tab,
            RegionKind::Divider { .. } => CollisionTier::Divider,
            RegionKind::Edge { .. } => CollisionTier::Edge,
        }
    }
}

/// A candidate region registered for the current drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DropRegion {
    pub kind: RegionKind,
    pub rect: Rect<f32>,
}

impl DropRegion {
    pub fn new(kind: RegionKind, rect: Rect<f32>) -> Self {
        Self { kind, rect }
    }
}

/// The single region picked for a pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub kind: RegionKind,
    /// Bounds of the region that was hit, for drawing a hint.
    pub rect: Rect<f32>,
}

impl DropTarget {
    pub fn tier(&self) -> CollisionTier {
        self.kind.tier()
    }

    /// Check if this is an edge drop (requires a split).
    pub fn is_edge_drop(&self) -> bool {
        matches!(self.kind, RegionKind::Edge { .. })
    }

    /// Translate the target into the action a drop of `tab` (currently in
    /// the window at `source`) should dispatch.
    ///
    /// Returns `Ok(None)` when dropping here would not change anything, such
    /// as dropping a tab back onto itself or its own tab bar.
    pub fn to_action(&self, tree: &LayoutTree, tab: &TabId, source: &Address) -> DockResult<Option<Action>> {
        let source_window = tree.window(source)?;
        if !source_window.contains(tab) {
            return Err(DockError::TabNotInWindow {
                tab: tab.clone(),
                window: source.clone(),
            });
        }

        let action = match &self.kind {
            RegionKind::TabBar { window } if window == source => None,
            RegionKind::TabBar { window } => Some(Action::MoveTab {
                tab: tab.clone(),
                source: source.clone(),
                target: window.clone(),
            }),
            RegionKind::Tab { window, tab: over } if window == source => {
                (over != tab).then(|| Action::ReorderTabs {
                    source: tab.clone(),
                    target: over.clone(),
                    window: window.clone(),
                })
            }
            RegionKind::Tab { window, .. } => Some(Action::MoveTab {
                tab: tab.clone(),
                source: source.clone(),
                target: window.clone(),
            }),
            RegionKind::Divider { panel, index } => Some(Action::InsertPanel {
                tab: tab.clone(),
                source: source.clone(),
                target: panel.clone(),
                index: *index,
            }),
            RegionKind::Edge { target, .. } if target == source && source_window.len() == 1 => None,
            RegionKind::Edge { target, side } => {
                let orientation = match target.parent() {
                    Some(parent) => tree.panel(&parent)?.orientation,
                    None => tree.root().orientation,
                };
                Some(Action::SplitWindow {
                    tab: tab.clone(),
                    source: source.clone(),
                    target: target.clone(),
                    direction: *side,
                    orientation,
                })
            }
        };
        Ok(action)
    }
}

/// Picks one target out of the candidate regions.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTargetResolver {
    /// Half-size of the square probe used for tiers 1 and 2.
    pub pointer_radius: f32,
    /// How far outside an edge zone the pointer may be and still hit it.
    pub edge_slop: f32,
}

impl Default for DropTargetResolver {
    fn default() -> Self {
        Self::from_style(&DockStyle::default())
    }
}

impl DropTargetResolver {
    pub fn from_style(style: &DockStyle) -> Self {
        Self {
            pointer_radius: style.pointer_radius,
            edge_slop: style.edge_slop,
        }
    }

    /// Resolve the drop target under `pointer`.
    ///
    /// Within a tier the first candidate in `candidates` order wins (for edge
    /// zones: the first of the equally close ones).
    pub fn resolve(&self, pointer: Vec2, candidates: &[DropRegion]) -> Option<DropTarget> {
        profile_function!();

        let probe = Rect::around(pointer, self.pointer_radius);
        for tier in [CollisionTier::Tab, CollisionTier::Divider] {
            let hit = candidates
                .iter()
                .find(|region| region.kind.tier() == tier && region.rect.intersects(&probe));
            if let Some(region) = hit {
                return Some(target_of(region));
            }
        }

        let mut closest: Option<(&DropRegion, f32)> = None;
        for region in candidates.iter().filter(|r| r.kind.tier() == CollisionTier::Edge) {
            if !region.rect.inflate(self.edge_slop, self.edge_slop).contains(pointer) {
                continue;
            }
            let distance = region.rect.center().distance_squared(pointer);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((region, distance));
            }
        }
        closest.map(|(region, _)| target_of(region))
    }
}

fn target_of(region: &DropRegion) -> DropTarget {
    DropTarget {
        kind: region.kind.clone(),
        rect: region.rect,
    }
}

/// [`DropTargetResolver::resolve`] with the default probe and slop.
pub fn resolve_drop_target(pointer: Vec2, candidates: &[DropRegion]) -> Option<DropTarget> {
    DropTargetResolver::default().resolve(pointer, candidates)
}

/// Edge zone geometry of a window.
///
/// Each edge zone covers `edge_threshold` of the window's width (left/right)
/// or height (top/bottom); the zones overlap at the corners.
#[derive(Debug, Clone)]
pub struct EdgeZoneDetector {
    /// Edge threshold as a fraction (0.1-0.5).
    pub edge_threshold: f32,
}

impl Default for EdgeZoneDetector {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
        }
    }
}

impl EdgeZoneDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom edge threshold.
    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.clamp(0.1, 0.5);
        self
    }

    /// The side whose zone contains `cursor`, or `None` in the center or
    /// outside `bounds`.
    pub fn detect_side(&self, cursor: Vec2, bounds: Rect<f32>) -> Option<DockSide> {
        // Guard against zero-area bounds (avoid division by zero)
        if bounds.is_empty() || !bounds.contains(cursor) {
            return None;
        }

        let rel_x = (cursor.x - bounds.x) / bounds.width;
        let rel_y = (cursor.y - bounds.y) / bounds.height;

        if rel_x < self.edge_threshold {
            Some(DockSide::Left)
        } else if rel_x > 1.0 - self.edge_threshold {
            Some(DockSide::Right)
        } else if rel_y < self.edge_threshold {
            Some(DockSide::Top)
        } else if rel_y > 1.0 - self.edge_threshold {
            Some(DockSide::Bottom)
        } else {
            None
        }
    }

    /// The zone rectangle for `side` of `bounds`.
    pub fn edge_rect(&self, side: DockSide, bounds: Rect<f32>) -> Rect<f32> {
        let width = bounds.width * self.edge_threshold;
        let height = bounds.height * self.edge_threshold;
        match side {
            DockSide::Left => Rect::new(bounds.x, bounds.y, width, bounds.height),
            DockSide::Right => Rect::new(bounds.right() - width, bounds.y, width, bounds.height),
            DockSide::Top => Rect::new(bounds.x, bounds.y, bounds.width, height),
            DockSide::Bottom => Rect::new(bounds.x, bounds.bottom() - height, bounds.width, height),
        }
    }

    /// All four zones, in [`DockSide::ALL`] order.
    pub fn edge_rects(&self, bounds: Rect<f32>) -> [(DockSide, Rect<f32>); 4] {
        DockSide::ALL.map(|side| (side, self.edge_rect(side, bounds)))
    }

    /// Where the new window would land if dropped on `side`.
    pub fn preview_bounds(&self, side: DockSide, target: Rect<f32>) -> Rect<f32> {
        // Doubled for visibility
        let width = (target.width * self.edge_threshold * 2.0).min(target.width);
        let height = (target.height * self.edge_threshold * 2.0).min(target.height);
        match side {
            DockSide::Left => Rect::new(target.x, target.y, width, target.height),
            DockSide::Right => Rect::new(target.right() - width, target.y, width, target.height),
            DockSide::Top => Rect::new(target.x, target.y, target.width, height),
            DockSide::Bottom => Rect::new(target.x, target.bottom() - height, target.width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect<f32> {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn test_detect_side() {
        let detector = EdgeZoneDetector::new();
        let bounds = rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(detector.detect_side(Vec2::new(10.0, 50.0), bounds), Some(DockSide::Left));
        assert_eq!(detector.detect_side(Vec2::new(90.0, 50.0), bounds), Some(DockSide::Right));
        assert_eq!(detector.detect_side(Vec2::new(50.0, 10.0), bounds), Some(DockSide::Top));
        assert_eq!(detector.detect_side(Vec2::new(50.0, 90.0), bounds), Some(DockSide::Bottom));
        assert_eq!(detector.detect_side(Vec2::new(50.0, 50.0), bounds), None);
        assert_eq!(detector.detect_side(Vec2::new(150.0, 50.0), bounds), None);
    }

    #[test]
    fn test_edge_rects() {
        let detector = EdgeZoneDetector::new();
        let [(_, left), (_, right), (_, top), (_, bottom)] = detector.edge_rects(rect(0.0, 0.0, 200.0, 100.0));
        assert_eq!(left, rect(0.0, 0.0, 50.0, 100.0));
        assert_eq!(right, rect(150.0, 0.0, 50.0, 100.0));
        assert_eq!(top, rect(0.0, 0.0, 200.0, 25.0));
        assert_eq!(bottom, rect(0.0, 75.0, 200.0, 25.0));
    }

    #[test]
    fn test_higher_tier_wins_regardless_of_order() {
        let point = Vec2::new(10.0, 10.0);
        let edge = DropRegion::new(
            RegionKind::Edge {
                target: Address::from([0]),
                side: DockSide::Left,
            },
            rect(0.0, 0.0, 20.0, 100.0),
        );
        let divider = DropRegion::new(
            RegionKind::Divider {
                panel: Address::root(),
                index: 0,
            },
            rect(5.0, 0.0, 10.0, 100.0),
        );
        let tab = DropRegion::new(
            RegionKind::Tab {
                window: Address::from([0]),
                tab: TabId::from("a"),
            },
            rect(0.0, 0.0, 50.0, 20.0),
        );

        let target = resolve_drop_target(point, &[edge.clone(), divider.clone(), tab]).unwrap();
        assert_eq!(target.tier(), CollisionTier::Tab);

        let target = resolve_drop_target(point, &[edge.clone(), divider]).unwrap();
        assert_eq!(target.tier(), CollisionTier::Divider);

        let target = resolve_drop_target(point, &[edge]).unwrap();
        assert!(target.is_edge_drop());
    }

    #[test]
    fn test_first_match_wins_within_tier() {
        let first = DropRegion::new(
            RegionKind::TabBar {
                window: Address::from([0]),
            },
            rect(0.0, 0.0, 100.0, 20.0),
        );
        let second = DropRegion::new(
            RegionKind::TabBar {
                window: Address::from([1]),
            },
            rect(0.0, 0.0, 100.0, 20.0),
        );
        let target = resolve_drop_target(Vec2::new(5.0, 5.0), &[first.clone(), second]).unwrap();
        assert_eq!(target.kind, first.kind);
    }

    #[test]
    fn test_closest_edge_center_wins() {
        let left = DropRegion::new(
            RegionKind::Edge {
                target: Address::from([0]),
                side: DockSide::Left,
            },
            rect(0.0, 0.0, 25.0, 100.0),
        );
        let top = DropRegion::new(
            RegionKind::Edge {
                target: Address::from([0]),
                side: DockSide::Top,
            },
            rect(0.0, 0.0, 100.0, 25.0),
        );
        // In the overlapping corner, nearer the left zone's center
        let target = resolve_drop_target(Vec2::new(12.0, 20.0), &[top.clone(), left.clone()]).unwrap();
        assert_eq!(target.kind, left.kind);

        // Just outside the zone but within slop
        let target = resolve_drop_target(Vec2::new(30.0, 50.0), &[top, left.clone()]).unwrap();
        assert_eq!(target.kind, left.kind);
    }

    #[test]
    fn test_no_hit_is_none() {
        let region = DropRegion::new(
            RegionKind::TabBar {
                window: Address::from([0]),
            },
            rect(0.0, 0.0, 100.0, 20.0),
        );
        assert_eq!(resolve_drop_target(Vec2::new(500.0, 500.0), &[region]), None);
        assert_eq!(resolve_drop_target(Vec2::ZERO, &[]), None);
    }
}
