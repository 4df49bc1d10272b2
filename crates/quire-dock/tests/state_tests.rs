//! Explicit dock state: registry, history and pruning.

use quire_dock::{Action, Address, DockError, DockState, PanelNode, Orientation, TabId, WindowNode};
use quire_test_utils::{assert_invariants_with, scenario_description};

fn tab(id: &str) -> TabId {
    TabId::from(id)
}

fn state() -> DockState<&'static str> {
    DockState::from_description(scenario_description()).unwrap()
}

fn close(state: &mut DockState<&'static str>, id: &str) {
    let window = state.tree().find_tab(&tab(id)).unwrap();
    state.dispatch(Action::CloseTab { tab: tab(id), window }).unwrap();
}

#[test]
fn test_initial_state_is_normalized() {
    let state = state();
    assert_eq!(state.tree().root().weights(), vec![0.5, 0.5]);
    assert!(state.check().is_empty());
    assert!(!state.can_undo());
    assert!(!state.can_redo());
}

#[test]
fn test_undo_redo_round_trip() {
    let mut state = state();
    let initial = state.tree().clone();

    state
        .dispatch(Action::MoveTab {
            tab: tab("b"),
            source: Address::from([0]),
            target: Address::from([1]),
        })
        .unwrap();
    let moved = state.tree().clone();
    assert_ne!(moved, initial);

    assert!(state.undo());
    assert!(state.tree().ptr_eq(&initial));
    assert!(state.can_redo());

    assert!(state.redo());
    assert!(state.tree().ptr_eq(&moved));
    assert!(!state.redo());
}

#[test]
fn test_new_action_clears_redo() {
    let mut state = state();
    close(&mut state, "c");
    assert!(state.undo());
    state
        .dispatch(Action::SelectTab {
            tab: tab("b"),
            window: Address::from([0]),
        })
        .unwrap();
    assert!(!state.can_redo());
}

#[test]
fn test_failed_dispatch_changes_nothing() {
    let mut state = state();
    let before = state.tree().clone();
    let err = state.dispatch(Action::SelectTab {
        tab: tab("zz"),
        window: Address::from([0]),
    });
    assert_eq!(err, Err(DockError::UnknownTab(tab("zz"))));
    assert!(state.tree().ptr_eq(&before));
    assert!(!state.can_undo());
}

#[test]
fn test_closed_tab_content_survives_until_pruned() {
    let mut state = state();
    close(&mut state, "c");
    assert_eq!(state.content("c"), Some(&"C"));
    assert!(state.check().is_empty());

    // Undo brings the tab back with its content
    assert!(state.undo());
    assert_eq!(state.tree().find_tab(&tab("c")), Some(Address::from([1])));
    assert!(state.redo());

    assert_eq!(state.prune_registry(), 1);
    assert_eq!(state.content("c"), None);
    assert!(!state.can_undo());
    assert_invariants_with(state.tree(), state.tabs());
}

#[test]
fn test_add_panel_registers_contents() {
    let mut state = state();
    let node = PanelNode::new("tools", Orientation::Column)
        .child(WindowNode::single("tools-top", tab("x")))
        .child(WindowNode::single("tools-bottom", tab("y")));
    state
        .add_panel(node.into(), [(tab("x"), "X"), (tab("y"), "Y")])
        .unwrap();

    assert_eq!(state.tree().root().len(), 3);
    assert_eq!(state.content("y"), Some(&"Y"));
    assert!(state.check().is_empty());

    // Undo drops the panel but keeps the registry entries
    assert!(state.undo());
    assert_eq!(state.tree().root().len(), 2);
    assert_eq!(state.content("x"), Some(&"X"));
}

#[test]
fn test_add_panel_requires_matching_contents() {
    let mut state = state();
    let node = WindowNode::new("w", [tab("x"), tab("y")]);
    assert_eq!(
        state.add_panel(node.into(), [(tab("x"), "X")]),
        Err(DockError::UnknownTab(tab("y")))
    );
    assert_eq!(state.content("x"), None);

    assert_eq!(
        state.dispatch(Action::AddPanel {
            node: WindowNode::single("w", tab("fresh")).into(),
        }),
        Err(DockError::UnknownTab(tab("fresh")))
    );
}

#[test]
fn test_content_mut() {
    let mut state: DockState<String> = DockState::from_description(
        quire_dock::serializer::window().child(quire_dock::serializer::tab("notes", String::from("draft"))),
    )
    .unwrap();
    state.content_mut("notes").unwrap().push_str(" v2");
    assert_eq!(state.content("notes").map(String::as_str), Some("draft v2"));
}
