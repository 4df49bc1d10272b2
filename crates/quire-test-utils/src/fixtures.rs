//! Hand-built layouts.

use quire_dock::serializer::{PanelElement, column, row, serialize, tab, window};
use quire_dock::{LayoutTree, Orientation, PanelNode, TabId, WindowNode};

/// `row[ window{a, b}, window{c} ]` as a description.
pub fn scenario_description() -> PanelElement<&'static str> {
    row()
        .child(window().child(tab("a", "A")).child(tab("b", "B")))
        .child(window().child(tab("c", "C")))
}

/// [`scenario_description`] serialized; weights are the raw `[1, 1]`.
pub fn scenario_tree() -> LayoutTree {
    match serialize(scenario_description()) {
        Ok(serialized) => serialized.tree,
        Err(err) => panic!("scenario description is valid: {err}"),
    }
}

/// Three single-tab windows `x`, `y`, `z` side by side with equal weights.
pub fn three_column_tree() -> LayoutTree {
    let third = 1.0 / 3.0;
    LayoutTree::from_root(
        PanelNode::new("root", Orientation::Row).with_children(["x", "y", "z"].into_iter().enumerate().map(
            |(index, id)| {
                WindowNode::single(format!("window-{}", index + 1), TabId::from(id))
                    .with_size(third)
                    .into()
            },
        )),
    )
}

/// `row[ window{a, b}, column[ window{c}, row[ window{d}, window{e} ] ] ]`,
/// normalized.
pub fn nested_tree() -> LayoutTree {
    let description = row()
        .child(window().child(tab("a", ())).child(tab("b", ())))
        .child(
            column()
                .child(window().child(tab("c", ())))
                .child(row().child(tab("d", ())).child(tab("e", ()))),
        );
    match serialize(description) {
        Ok(serialized) => quire_dock::cleanup(&serialized.tree),
        Err(err) => panic!("nested description is valid: {err}"),
    }
}
