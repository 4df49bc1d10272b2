//! Drop target resolution and translation into actions.

use quire_dock::geometry::{compute_layout, drop_regions};
use quire_dock::{
    Action, Address, CollisionTier, DockSide, DockStyle, DropRegion, DropTargetResolver, EdgeZoneDetector,
    LayoutTree, Orientation, Rect, RegionKind, TabId, Vec2, cleanup, resolve_drop_target,
};
use quire_test_utils::scenario_tree;

fn tab(id: &str) -> TabId {
    TabId::from(id)
}

fn tab_region(window: &[usize], id: &str, rect: Rect<f32>) -> DropRegion {
    DropRegion::new(
        RegionKind::Tab {
            window: Address::from(window),
            tab: tab(id),
        },
        rect,
    )
}

fn divider_region(index: usize, rect: Rect<f32>) -> DropRegion {
    DropRegion::new(
        RegionKind::Divider {
            panel: Address::root(),
            index,
        },
        rect,
    )
}

fn edge_region(window: &[usize], side: DockSide, rect: Rect<f32>) -> DropRegion {
    DropRegion::new(
        RegionKind::Edge {
            target: Address::from(window),
            side,
        },
        rect,
    )
}

#[test]
fn test_tab_tier_beats_divider_and_edge() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let candidates = vec![
        edge_region(&[0], DockSide::Left, rect),
        divider_region(0, rect),
        tab_region(&[0], "a", rect),
    ];
    let pointer = Vec2::new(50.0, 50.0);

    let target = resolve_drop_target(pointer, &candidates).unwrap();
    assert_eq!(target.tier(), CollisionTier::Tab);

    let target = resolve_drop_target(pointer, &candidates[..2]).unwrap();
    assert_eq!(target.tier(), CollisionTier::Divider);

    let target = resolve_drop_target(pointer, &candidates[..1]).unwrap();
    assert_eq!(target.tier(), CollisionTier::Edge);
    assert!(target.is_edge_drop());
}

#[test]
fn test_first_candidate_wins_within_tier() {
    let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
    let candidates = vec![tab_region(&[0], "a", rect), tab_region(&[1], "b", rect)];
    let target = resolve_drop_target(Vec2::new(10.0, 10.0), &candidates).unwrap();
    assert_eq!(
        target.kind,
        RegionKind::Tab {
            window: Address::from([0]),
            tab: tab("a")
        }
    );
}

#[test]
fn test_edges_pick_closest_center() {
    let detector = EdgeZoneDetector::new();
    let bounds = Rect::new(0.0, 0.0, 400.0, 400.0);
    let candidates: Vec<DropRegion> = detector
        .edge_rects(bounds)
        .into_iter()
        .map(|(side, rect)| edge_region(&[0], side, rect))
        .collect();

    // Top-left corner: both left and top zones contain it, left's center is closer
    let target = resolve_drop_target(Vec2::new(20.0, 90.0), &candidates).unwrap();
    assert_eq!(
        target.kind,
        RegionKind::Edge {
            target: Address::from([0]),
            side: DockSide::Left
        }
    );

    let target = resolve_drop_target(Vec2::new(90.0, 20.0), &candidates).unwrap();
    assert!(matches!(target.kind, RegionKind::Edge { side: DockSide::Top, .. }));

    // Exactly on the diagonal both are equally close; the first listed wins
    let target = resolve_drop_target(Vec2::new(50.0, 50.0), &candidates).unwrap();
    assert!(matches!(target.kind, RegionKind::Edge { side: DockSide::Left, .. }));
}

#[test]
fn test_edge_slop_and_miss() {
    let zone = Rect::new(0.0, 0.0, 10.0, 100.0);
    let candidates = vec![edge_region(&[0], DockSide::Left, zone)];
    assert!(resolve_drop_target(Vec2::new(16.0, 50.0), &candidates).is_some());
    assert!(resolve_drop_target(Vec2::new(40.0, 50.0), &candidates).is_none());
    assert!(resolve_drop_target(Vec2::new(40.0, 50.0), &[]).is_none());
}

#[test]
fn test_pointer_radius_widens_probe() {
    let candidates = vec![tab_region(&[0], "a", Rect::new(0.0, 0.0, 50.0, 20.0))];
    let pointer = Vec2::new(53.0, 10.0);
    assert!(resolve_drop_target(pointer, &candidates).is_none());

    let resolver = DropTargetResolver::from_style(&DockStyle::new().pointer_radius(4.0));
    assert!(resolver.resolve(pointer, &candidates).is_some());
}

/// Cleaned scenario tree laid out in 800x600: windows at x 0..399 and 401..800.
fn laid_out() -> (LayoutTree, Vec<DropRegion>) {
    let tree = cleanup(&scenario_tree());
    let style = DockStyle::default();
    let layout = compute_layout(&tree, Rect::new(0.0, 0.0, 800.0, 600.0), &style);
    let regions = drop_regions(&tree, &layout, &style);
    (tree, regions)
}

fn action_at(x: f32, y: f32, dragged: &str) -> Option<Action> {
    let (tree, regions) = laid_out();
    let source = tree.find_tab(&tab(dragged)).unwrap();
    let target = resolve_drop_target(Vec2::new(x, y), &regions)?;
    target.to_action(&tree, &tab(dragged), &source).unwrap()
}

#[test]
fn test_layout_regions_resolve_by_tier() {
    let (_, regions) = laid_out();

    let target = resolve_drop_target(Vec2::new(130.0, 10.0), &regions).unwrap();
    assert_eq!(
        target.kind,
        RegionKind::Tab {
            window: Address::from([0]),
            tab: tab("b")
        }
    );

    let target = resolve_drop_target(Vec2::new(300.0, 10.0), &regions).unwrap();
    assert_eq!(
        target.kind,
        RegionKind::TabBar {
            window: Address::from([0])
        }
    );

    let target = resolve_drop_target(Vec2::new(400.0, 300.0), &regions).unwrap();
    assert_eq!(
        target.kind,
        RegionKind::Divider {
            panel: Address::root(),
            index: 0
        }
    );

    // Middle of a window: nothing
    assert!(resolve_drop_target(Vec2::new(200.0, 300.0), &regions).is_none());
}

#[test]
fn test_drop_on_tabs_and_bars() {
    // Onto itself
    assert_eq!(action_at(10.0, 10.0, "a"), None);
    // Own tab bar
    assert_eq!(action_at(300.0, 10.0, "a"), None);

    assert_eq!(
        action_at(130.0, 10.0, "a"),
        Some(Action::ReorderTabs {
            source: tab("a"),
            target: tab("b"),
            window: Address::from([0]),
        })
    );
    assert_eq!(
        action_at(600.0, 10.0, "a"),
        Some(Action::MoveTab {
            tab: tab("a"),
            source: Address::from([0]),
            target: Address::from([1]),
        })
    );
}

#[test]
fn test_drop_on_divider_and_edges() {
    assert_eq!(
        action_at(400.0, 300.0, "c"),
        Some(Action::InsertPanel {
            tab: tab("c"),
            source: Address::from([1]),
            target: Address::root(),
            index: 0,
        })
    );

    assert_eq!(
        action_at(200.0, 590.0, "a"),
        Some(Action::SplitWindow {
            tab: tab("a"),
            source: Address::from([0]),
            target: Address::from([0]),
            direction: DockSide::Bottom,
            orientation: Orientation::Row,
        })
    );

    // Own edge of a single-tab window changes nothing
    assert_eq!(action_at(600.0, 590.0, "c"), None);

    // The outer strip targets the root
    assert_eq!(
        action_at(3.0, 300.0, "c"),
        Some(Action::SplitWindow {
            tab: tab("c"),
            source: Address::from([1]),
            target: Address::root(),
            direction: DockSide::Left,
            orientation: Orientation::Row,
        })
    );
}

#[test]
fn test_to_action_checks_source() {
    let (tree, regions) = laid_out();
    let target = resolve_drop_target(Vec2::new(600.0, 10.0), &regions).unwrap();
    assert!(target.to_action(&tree, &tab("c"), &Address::from([0])).is_err());
}
