use proptest::prelude::*;
use seatplan_designer::engine::{get_nearest, plan_group_move, plan_move};
use seatplan_designer::model::Edge;
use seatplan_designer::{
    Bounds, Entity, EntityKind, Lane, MoveOutcome, Orientation, Rect, Scene,
};
use std::collections::BTreeSet;

fn block(x: f64, y: f64, w: f64, h: f64) -> Entity {
    Entity::new(
        Rect::new(x, y, w, h),
        EntityKind::Lane(Lane::new("", Orientation::Horizontal)),
    )
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-50i32..50, -50i32..50, -30i32..30, -30i32..30)
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy(), edges in any::<bool>()) {
        prop_assert_eq!(a.is_overlapping(&b, edges), b.is_overlapping(&a, edges));
    }

    #[test]
    fn shared_edge_overlaps_only_with_edges(x in -100i32..100, y in -100i32..100, w in 1i32..50, h in 1i32..50) {
        let a = Rect::new(x as f64, y as f64, w as f64, h as f64);
        let b = Rect::new((x + w) as f64, y as f64, w as f64, h as f64);
        prop_assert!(!a.is_overlapping(&b, false));
        prop_assert!(a.is_overlapping(&b, true));
    }
}

#[test]
fn test_hit_test_excludes_boundary() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.hit_test(5.0, 5.0));
    assert!(!r.hit_test(0.0, 5.0));
    assert!(!r.hit_test(10.0, 5.0));
    assert!(!r.hit_test(5.0, 0.0));
    assert!(!r.hit_test(5.0, 10.0));
}

#[test]
fn test_nearest_without_perpendicular_overlap() {
    let others = [block(100.0, 100.0, 10.0, 10.0)];
    let nearest = get_nearest(&Rect::new(0.0, 0.0, 10.0, 10.0), others.iter());
    for edge in Edge::ALL {
        assert!(nearest.get(edge).is_none());
        assert_eq!(nearest.distance(edge), f64::INFINITY);
    }
}

#[test]
fn test_adjacent_move_into_neighbour_rejected() {
    let a = block(0.0, 0.0, 10.0, 10.0);
    let b = block(10.0, 0.0, 10.0, 10.0);
    let bounds = Bounds::new(1200.0, 800.0);
    assert_eq!(
        plan_move(&a.rect, [&b], 1.0, 0.0, bounds, false),
        MoveOutcome::Rejected
    );
    // Moving away is fine.
    assert_eq!(
        plan_move(&a.rect, [&b], 0.0, 1.0, bounds, false),
        MoveOutcome::Moved(Rect::new(0.0, 1.0, 10.0, 10.0))
    );
}

#[test]
fn test_move_clamps_into_bounds() {
    let bounds = Bounds::new(100.0, 100.0);
    let r = Rect::new(80.0, 5.0, 10.0, 10.0);
    assert_eq!(
        plan_move(&r, std::iter::empty(), 50.0, -20.0, bounds, false),
        MoveOutcome::Moved(Rect::new(90.0, 0.0, 10.0, 10.0))
    );
    assert!(matches!(
        plan_move(&r, std::iter::empty(), 50.0, 0.0, bounds, true),
        MoveOutcome::Moved(moved) if moved.x == 130.0
    ));
}

#[test]
fn test_group_move_is_atomic() {
    let mut editor = seatplan_designer::Editor::default();
    let lane = || seatplan_designer::CreateRequest::Lane {
        text: "L".into(),
        orientation: Orientation::Vertical,
        width: 10.0,
        height: 10.0,
    };
    let a = editor.create((0.0, 0.0), lane()).unwrap()[0];
    let b = editor.create((20.0, 0.0), lane()).unwrap()[0];
    let c = editor.create((45.0, 0.0), lane()).unwrap()[0];
    let scene: &Scene = editor.scene();
    let bounds = editor.bounds();
    let ids: BTreeSet<_> = [a, b].into_iter().collect();

    // b would hit c: neither moves.
    assert_eq!(
        plan_group_move(scene, &ids, 16.0, 0.0, bounds, false),
        MoveOutcome::Rejected
    );
    // a would leave the canvas: neither moves.
    assert_eq!(
        plan_group_move(scene, &ids, -1.0, 0.0, bounds, false),
        MoveOutcome::Rejected
    );
    match plan_group_move(scene, &ids, 5.0, 5.0, bounds, false) {
        MoveOutcome::Moved(moves) => {
            assert_eq!(moves.len(), 2);
            assert!(moves.iter().all(|(id, _)| *id != c));
        }
        other => panic!("expected a move, got {:?}", other),
    }
}
