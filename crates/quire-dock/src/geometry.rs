//! Pixel layout of a snapshot and the drop regions derived from it.

use indexmap::IndexMap;
use quire_core::geometry::Rect;
use quire_core::math::Vec2;
use quire_core::profiling::profile_function;

use crate::address::Address;
use crate::collision::{DropRegion, EdgeZoneDetector, RegionKind};
use crate::config::DockStyle;
use crate::error::{DockError, DockResult};
use crate::node::{DockSide, LayoutTree, NodeRef, Orientation};
use crate::resize::weights_to_pixels;

/// Rectangle of every node of a snapshot, keyed by address, in pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutMap {
    rects: IndexMap<Address, Rect<f32>>,
}

impl LayoutMap {
    pub fn get(&self, address: &Address) -> Option<Rect<f32>> {
        self.rects.get(address).copied()
    }

    pub fn root(&self) -> Option<Rect<f32>> {
        self.get(&Address::root())
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Rect<f32>)> {
        self.rects.iter()
    }

    /// Live extents of a panel's children along the panel's axis.
    pub fn child_extents(&self, tree: &LayoutTree, panel: &Address) -> DockResult<Vec<f32>> {
        let node = tree.panel(panel)?;
        (0..node.len())
            .map(|index| {
                let address = panel.child(index);
                let rect = self.get(&address).ok_or(DockError::AddressOutOfRange {
                    depth: panel.depth(),
                    address,
                })?;
                Ok(extent(rect, node.orientation))
            })
            .collect()
    }
}

fn extent(rect: Rect<f32>, orientation: Orientation) -> f32 {
    match orientation {
        Orientation::Row => rect.width,
        Orientation::Column => rect.height,
    }
}

/// Split `rect` along `orientation` proportionally to `weights`, leaving
/// `separator` pixels between neighbours.
pub fn child_rects(rect: Rect<f32>, orientation: Orientation, weights: &[f64], separator: f32) -> Vec<Rect<f32>> {
    if weights.is_empty() {
        return Vec::new();
    }
    let gaps = separator * (weights.len() - 1) as f32;
    let available = (extent(rect, orientation) - gaps).max(0.0);
    let sizes = weights_to_pixels(weights, available);

    let mut offset = 0.0;
    sizes
        .into_iter()
        .map(|size| {
            let child = match orientation {
                Orientation::Row => Rect::new(rect.x + offset, rect.y, size, rect.height),
                Orientation::Column => Rect::new(rect.x, rect.y + offset, rect.width, size),
            };
            offset += size + separator;
            child
        })
        .collect()
}

/// Hit rect of the handle between `children[index]` and `children[index + 1]`,
/// widened by the separator tolerance on both sides.
pub fn handle_rect(children: &[Rect<f32>], orientation: Orientation, index: usize, style: &DockStyle) -> Option<Rect<f32>> {
    let before = children.get(index)?;
    let after = children.get(index + 1)?;
    let tolerance = style.separator_tolerance;
    let rect = match orientation {
        Orientation::Row => {
            Rect::new(before.right(), before.y, after.x - before.right(), before.height).inflate(tolerance, 0.0)
        }
        Orientation::Column => {
            Rect::new(before.x, before.bottom(), before.width, after.y - before.bottom()).inflate(0.0, tolerance)
        }
    };
    Some(rect)
}

/// Every handle hit rect of a panel, in sibling order.
pub fn handle_rects(children: &[Rect<f32>], orientation: Orientation, style: &DockStyle) -> Vec<Rect<f32>> {
    (0..children.len().saturating_sub(1))
        .filter_map(|index| handle_rect(children, orientation, index, style))
        .collect()
}

/// Lay out `tree` inside `bounds`.
pub fn compute_layout(tree: &LayoutTree, bounds: Rect<f32>, style: &DockStyle) -> LayoutMap {
    profile_function!();

    let mut rects = IndexMap::new();
    rects.insert(Address::root(), bounds);
    tree.walk(|address, node| {
        let NodeRef::Panel(panel) = node else {
            return;
        };
        let Some(&rect) = rects.get(address) else {
            return;
        };
        let children = child_rects(rect, panel.orientation, &panel.weights(), style.separator_size);
        for (index, child) in children.into_iter().enumerate() {
            rects.insert(address.child(index), child);
        }
    });

    // Children were inserted when their panel was visited; reorder so that
    // iteration matches `LayoutTree::walk`.
    let mut ordered = IndexMap::with_capacity(rects.len());
    tree.walk(|address, _| {
        if let Some(rect) = rects.get(address) {
            ordered.insert(address.clone(), *rect);
        }
    });
    LayoutMap { rects: ordered }
}

/// Tab bar strip at the top of a window.
pub fn tab_bar_rect(window: Rect<f32>, style: &DockStyle) -> Rect<f32> {
    Rect::new(window.x, window.y, window.width, style.tab_bar_height.min(window.height))
}

/// Rect of the `index`-th tab, clipped to the tab bar. `None` if the tab does
/// not fit at all.
pub fn tab_rect(window: Rect<f32>, index: usize, style: &DockStyle) -> Option<Rect<f32>> {
    let bar = tab_bar_rect(window, style);
    let x = bar.x + index as f32 * style.tab_width;
    if x >= bar.right() {
        return None;
    }
    Some(Rect::new(x, bar.y, style.tab_width.min(bar.right() - x), bar.height))
}

/// Build the candidate drop regions of a laid out snapshot.
///
/// Regions come out grouped by tier (tabs and tab bars, dividers, edges) and
/// in pre-order within a tier, with each tab before its window's tab bar.
pub fn drop_regions(tree: &LayoutTree, layout: &LayoutMap, style: &DockStyle) -> Vec<DropRegion> {
    profile_function!();

    let mut tabs = Vec::new();
    let mut dividers = Vec::new();
    let mut edges = Vec::new();
    let detector = EdgeZoneDetector::new().with_edge_threshold(style.edge_threshold);

    tree.walk(|address, node| {
        let Some(rect) = layout.get(address) else {
            return;
        };
        match node {
            NodeRef::Window(window) => {
                for (index, tab) in window.tabs().iter().enumerate() {
                    if let Some(bounds) = tab_rect(rect, index, style) {
                        let kind = RegionKind::Tab {
                            window: address.clone(),
                            tab: tab.clone(),
                        };
                        tabs.push(DropRegion::new(kind, bounds));
                    }
                }
                let bar = tab_bar_rect(rect, style);
                if !bar.is_empty() {
                    let kind = RegionKind::TabBar {
                        window: address.clone(),
                    };
                    tabs.push(DropRegion::new(kind, bar));
                }
                if !rect.is_empty() {
                    for (side, zone) in detector.edge_rects(rect) {
                        let kind = RegionKind::Edge {
                            target: address.clone(),
                            side,
                        };
                        edges.push(DropRegion::new(kind, zone));
                    }
                }
            }
            NodeRef::Panel(panel) => {
                let children: Vec<Rect<f32>> = (0..panel.len())
                    .filter_map(|index| layout.get(&address.child(index)))
                    .collect();
                for (index, handle) in handle_rects(&children, panel.orientation, style).into_iter().enumerate() {
                    let kind = RegionKind::Divider {
                        panel: address.clone(),
                        index,
                    };
                    dividers.push(DropRegion::new(kind, handle));
                }
            }
        }
    });

    if let Some(bounds) = layout.root().filter(|rect| !rect.is_empty()) {
        for side in DockSide::ALL {
            let kind = RegionKind::Edge {
                target: Address::root(),
                side,
            };
            edges.push(DropRegion::new(kind, root_edge_rect(bounds, side, style.root_edge_size)));
        }
    }

    tabs.extend(dividers);
    tabs.extend(edges);
    tabs
}

fn root_edge_rect(bounds: Rect<f32>, side: DockSide, depth: f32) -> Rect<f32> {
    let width = depth.min(bounds.width);
    let height = depth.min(bounds.height);
    match side {
        DockSide::Left => Rect::new(bounds.x, bounds.y, width, bounds.height),
        DockSide::Right => Rect::new(bounds.right() - width, bounds.y, width, bounds.height),
        DockSide::Top => Rect::new(bounds.x, bounds.y, bounds.width, height),
        DockSide::Bottom => Rect::new(bounds.x, bounds.bottom() - height, bounds.width, height),
    }
}

/// Address of the window under `point`.
pub fn window_at(tree: &LayoutTree, layout: &LayoutMap, point: Vec2) -> Option<Address> {
    tree.windows()
        .into_iter()
        .map(|(address, _)| address)
        .find(|address| layout.get(address).is_some_and(|rect| rect.contains(point)))
}

/// The panel handle under `point`, as `(panel address, handle index)`.
pub fn handle_at(tree: &LayoutTree, layout: &LayoutMap, point: Vec2, style: &DockStyle) -> Option<(Address, usize)> {
    tree.panels().into_iter().find_map(|(address, panel)| {
        let children: Vec<Rect<f32>> = (0..panel.len())
            .filter_map(|index| layout.get(&address.child(index)))
            .collect();
        handle_rects(&children, panel.orientation, style)
            .iter()
            .position(|rect| rect.contains(point))
            .map(|index| (address, index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{PanelNode, TabId, WindowNode};

    fn tree() -> LayoutTree {
        LayoutTree::from_root(
            PanelNode::new("root", Orientation::Row)
                .child(WindowNode::new("w1", [TabId::from("a"), TabId::from("b")]).with_size(0.5))
                .child(
                    PanelNode::new("p", Orientation::Column)
                        .with_size(0.5)
                        .child(WindowNode::single("w2", TabId::from("c")).with_size(0.5))
                        .child(WindowNode::single("w3", TabId::from("d")).with_size(0.5)),
                ),
        )
    }

    fn style() -> DockStyle {
        DockStyle::default().separator_size(0.0)
    }

    #[test]
    fn test_child_rects_leave_separator_gaps() {
        let rects = child_rects(Rect::new(0.0, 0.0, 202.0, 50.0), Orientation::Row, &[1.0, 1.0], 2.0);
        assert_eq!(rects, vec![Rect::new(0.0, 0.0, 100.0, 50.0), Rect::new(102.0, 0.0, 100.0, 50.0)]);
    }

    #[test]
    fn test_compute_layout() {
        let layout = compute_layout(&tree(), Rect::new(0.0, 0.0, 800.0, 600.0), &style());
        assert_eq!(layout.len(), 5);
        assert_eq!(layout.get(&Address::from([0])), Some(Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert_eq!(layout.get(&Address::from([1, 1])), Some(Rect::new(400.0, 300.0, 400.0, 300.0)));

        let order: Vec<_> = layout.iter().map(|(address, _)| address.clone()).collect();
        assert_eq!(
            order,
            vec![
                Address::root(),
                Address::from([0]),
                Address::from([1]),
                Address::from([1, 0]),
                Address::from([1, 1]),
            ]
        );
        assert_eq!(layout.child_extents(&tree(), &Address::from([1])), Ok(vec![300.0, 300.0]));
    }

    #[test]
    fn test_drop_regions_are_grouped_by_tier() {
        let tree = tree();
        let style = style();
        let layout = compute_layout(&tree, Rect::new(0.0, 0.0, 800.0, 600.0), &style);
        let regions = drop_regions(&tree, &layout, &style);

        let tiers: Vec<_> = regions.iter().map(|r| r.kind.tier()).collect();
        let mut sorted = tiers.clone();
        sorted.sort();
        assert_eq!(tiers, sorted);

        // 4 tabs + 3 tab bars, 2 dividers, 3 * 4 window edges + 4 root edges
        assert_eq!(regions.len(), 7 + 2 + 16);
        assert_eq!(
            regions[0].kind,
            RegionKind::Tab {
                window: Address::from([0]),
                tab: TabId::from("a")
            }
        );
    }

    #[test]
    fn test_hit_helpers() {
        let tree = tree();
        let style = style();
        let layout = compute_layout(&tree, Rect::new(0.0, 0.0, 800.0, 600.0), &style);
        assert_eq!(window_at(&tree, &layout, Vec2::new(600.0, 500.0)), Some(Address::from([1, 1])));
        assert_eq!(handle_at(&tree, &layout, Vec2::new(401.0, 100.0), &style), Some((Address::root(), 0)));
        assert_eq!(
            handle_at(&tree, &layout, Vec2::new(600.0, 302.0), &style),
            Some((Address::from([1]), 0))
        );
    }
}
