//! Proptest strategies for layout descriptions and weights.

use proptest::prelude::*;
use quire_dock::Orientation;
use quire_dock::serializer::{PanelElement, WindowElement, panel, tab, window};

/// Shape of a description before tab ids are assigned.
#[derive(Debug, Clone)]
enum Shape {
    Window { tabs: usize, selected: usize, size: f64 },
    Panel { orientation: Orientation, size: f64, children: Vec<Shape> },
}

fn arb_orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Row), Just(Orientation::Column)]
}

fn arb_window_shape() -> impl Strategy<Value = Shape> {
    (1usize..4)
        .prop_flat_map(|tabs| (Just(tabs), 0..tabs, 0.25f64..4.0))
        .prop_map(|(tabs, selected, size)| Shape::Window { tabs, selected, size })
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    arb_window_shape().prop_recursive(3, 24, 4, |inner| {
        (arb_orientation(), 0.25f64..4.0, prop::collection::vec(inner, 1..4)).prop_map(
            |(orientation, size, children)| Shape::Panel {
                orientation,
                size,
                children,
            },
        )
    })
}

/// Hands out `t0`, `t1`, ... so every generated tab id is unique.
#[derive(Default)]
struct Build {
    next_tab: usize,
}

impl Build {
    fn window(&mut self, tabs: usize, selected: usize, size: f64) -> WindowElement<()> {
        let mut element = window().size(size).selected(selected);
        for _ in 0..tabs {
            element = element.child(tab(format!("t{}", self.next_tab), ()));
            self.next_tab += 1;
        }
        element
    }

    fn panel(&mut self, orientation: Orientation, children: Vec<Shape>) -> PanelElement<()> {
        let mut element = panel().orientation(orientation);
        for child in children {
            element = match child {
                Shape::Window { tabs, selected, size } => element.child(self.window(tabs, selected, size)),
                Shape::Panel {
                    orientation,
                    size,
                    children,
                } => element.child(self.panel(orientation, children).size(size)),
            };
        }
        element
    }
}

/// Valid descriptions: non-empty windows, unique tab ids, positive sizes and
/// up to three levels of nested panels. The root may hold a single panel.
pub fn arb_description() -> impl Strategy<Value = PanelElement<()>> {
    (arb_orientation(), prop::collection::vec(arb_shape(), 1..4))
        .prop_map(|(orientation, children)| Build::default().panel(orientation, children))
}

/// `len` weights that `Resize` accepts: all positive, or all zero.
pub fn arb_weights(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop_oneof![
        1 => Just(vec![0.0; len]),
        6 => prop::collection::vec(0.01f64..10.0, len),
    ]
}
