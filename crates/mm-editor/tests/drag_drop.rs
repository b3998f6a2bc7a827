//! Integration tests: the full drag-to-reparent pipeline (mm-editor).
//!
//! Each scenario runs press → motion* → release against a Session and
//! asserts on both the live preview and the committed forest.

use mm_core::{Canvas, Direction, MapConfig, Point, TreeNode};
use mm_editor::Session;
use smallvec::smallvec;
use std::rc::Rc;

/// Root at the origin with two right leaves `a` and `b`.
fn two_leaf_session() -> Session {
    let mut root = TreeNode::new_root("Root", Point::ORIGIN);
    root.children = vec![
        Rc::new(TreeNode::new("a", Direction::Right)),
        Rc::new(TreeNode::new("b", Direction::Right)),
    ];
    Session::with_text_metrics(
        Canvas::new(vec![Rc::new(root)]),
        MapConfig::default(),
    )
}

/// Where a node's box currently sits on screen.
fn coord_of(session: &Session, label: &str) -> Point {
    let mut found = None;
    for root in &session.view().children {
        root.walk(&mut |n| {
            if n.label == label {
                found = Some(n.coord);
            }
        });
    }
    found.expect("node on screen")
}

// ─── Reparenting drop ───────────────────────────────────────────────────

#[test]
fn dropping_a_on_b_makes_a_the_first_child() {
    let mut session = two_leaf_session();
    let grab = coord_of(&session, "a");

    session.press(smallvec![0, 0], grab).unwrap();
    // hover in the eligible band right of b (b recenters once a is lifted)
    session.motion(Point::new(120.0, 10.0)).unwrap();
    assert!(session.is_dragging());
    session.release(Point::new(120.0, 10.0)).unwrap();

    let root = &session.canvas().children[0];
    assert_eq!(root.children.len(), 1, "a is gone from its old parent");
    let b = &root.children[0];
    assert_eq!(b.label, "b");
    assert_eq!(b.children[0].label, "a", "a landed as b's first child");

    // the gesture is one single undoable commit
    assert!(session.undo());
    assert_eq!(session.canvas().children[0].children.len(), 2);
    assert!(!session.can_undo());
}

#[test]
fn preview_shows_ghost_then_commit_drops_it() {
    let mut session = two_leaf_session();
    let grab = coord_of(&session, "a");

    session.press(smallvec![0, 0], grab).unwrap();
    session.motion(Point::new(120.0, 10.0)).unwrap();

    let expected: mm_core::NodePath = smallvec![0, 0, 0];
    assert_eq!(session.view().drop_target.as_ref(), Some(&expected));
    let ghost = &session.view().children[0].children[0].children[0];
    assert!(ghost.drop_preview, "preview carries the ghost");

    session.release(Point::new(120.0, 10.0)).unwrap();
    assert_eq!(session.view().drop_target, None, "preview state is cleared");
    let committed = &session.view().children[0].children[0].children[0];
    assert!(!committed.drop_preview, "the committed child is real");
}

// ─── Detached drop ──────────────────────────────────────────────────────

#[test]
fn dropping_nowhere_creates_a_new_tree_at_the_pointer() {
    let mut session = two_leaf_session();
    let grab = coord_of(&session, "a");

    session.press(smallvec![0, 0], grab).unwrap();
    session.motion(Point::new(-250.0, 150.0)).unwrap();
    let floating = session
        .view()
        .drag_source
        .as_ref()
        .expect("no target, so the source floats");
    assert_eq!(floating.coord, Point::new(-250.0, 150.0));

    session.release(Point::new(-250.0, 150.0)).unwrap();
    let canvas = session.canvas();
    assert_eq!(canvas.children.len(), 2);
    let island = &canvas.children[1];
    assert_eq!(island.label, "a");
    assert!(island.root);
    assert_eq!(island.coord, Some(Point::new(-250.0, 150.0)));
    assert_eq!(session.view().drag_source, None);
}

// ─── Click fallthrough ──────────────────────────────────────────────────

#[test]
fn a_click_never_edits_the_forest() {
    let mut session = two_leaf_session();
    let before = session.canvas().clone();
    let grab = coord_of(&session, "a");

    session.press(smallvec![0, 0], grab).unwrap();
    session.motion(grab.translate(1.0, 1.0)).unwrap();
    session.release(grab.translate(1.0, 1.0)).unwrap();

    assert_eq!(*session.canvas(), before);
    assert!(!session.can_undo(), "a click leaves no history entry");
}

// ─── Paths stay coherent across mixed directions ────────────────────────

#[test]
fn resolver_paths_match_the_logical_order_under_mixed_directions() {
    // Logical child order: l1 (left), r1 (right), r2 (right). A view that
    // emitted right-side children first would give r1 view-index 0, and a
    // drop resolved against it would edit l1 instead. The committed forest
    // proves the path addressed the logical node.
    let mut root = TreeNode::new_root("Root", Point::ORIGIN);
    root.children = vec![
        Rc::new(TreeNode::new("l1", Direction::Left)),
        Rc::new(TreeNode::new("r1", Direction::Right)),
        Rc::new(TreeNode::new("r2", Direction::Right)),
    ];
    let mut session = Session::with_text_metrics(
        Canvas::new(vec![Rc::new(root)]),
        MapConfig::default(),
    );

    let grab = coord_of(&session, "r2");
    session.press(smallvec![0, 2], grab).unwrap();
    // with r2 lifted, r1 centers right of the root; hover just right of it
    let r1 = coord_of(&session, "r1");
    session.motion(r1.translate(50.0, 25.0)).unwrap();
    session.release(r1.translate(50.0, 25.0)).unwrap();

    let root = &session.canvas().children[0];
    assert_eq!(root.children.len(), 2);
    let l1 = &root.children[0];
    let r1 = &root.children[1];
    assert_eq!(l1.label, "l1");
    assert!(l1.children.is_empty(), "the left branch was not touched");
    assert_eq!(r1.label, "r1");
    assert_eq!(r1.children[0].label, "r2", "r2 landed under r1");
}

// ─── Dragging a subtree keeps it intact ─────────────────────────────────

#[test]
fn a_dragged_branch_carries_its_children() {
    let mut branch = TreeNode::new("branch", Direction::Right);
    branch.children = vec![Rc::new(TreeNode::new("inner", Direction::Right))];
    let mut root = TreeNode::new_root("Root", Point::ORIGIN);
    root.children = vec![
        Rc::new(branch),
        Rc::new(TreeNode::new("b", Direction::Right)),
    ];
    let mut session = Session::with_text_metrics(
        Canvas::new(vec![Rc::new(root)]),
        MapConfig::default(),
    );

    let grab = coord_of(&session, "branch");
    session.press(smallvec![0, 0], grab).unwrap();
    let b = coord_of(&session, "b");
    session.motion(b.translate(50.0, 0.0)).unwrap();
    session.release(b.translate(50.0, 0.0)).unwrap();

    let root = &session.canvas().children[0];
    let b = &root.children[0];
    let moved = &b.children[0];
    assert_eq!(moved.label, "branch");
    assert_eq!(moved.children[0].label, "inner", "the subtree moved whole");
}
