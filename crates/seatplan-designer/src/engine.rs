//! Collision and alignment queries.
//!
//! Everything here is a pure function of a rectangle and the entities it is
//! compared against. Callers decide which entities count as "others"; the
//! moving entity itself must not be among them.

use std::collections::BTreeSet;

use seatplan_core::math::{self, Interval};

use crate::model::{Edge, Entity, EntityId, Rect};
use crate::scene::Scene;

/// Area entities are kept inside unless free placement is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        !rect.is_out_of_bounds(self.width, self.height)
    }
}

/// `true` if `rect` overlaps any of `others`. Shared edges do not count.
pub fn overlaps_any<'a>(rect: &Rect, others: impl IntoIterator<Item = &'a Entity>) -> bool {
    others.into_iter().any(|o| rect.is_overlapping(&o.rect, false))
}

/// With a target, whether it overlaps any other entity. Without one,
/// whether any pair of entities overlaps.
pub fn check_for_overlaps(entities: &[Entity], target: Option<EntityId>) -> bool {
    match target {
        Some(id) => match entities.iter().find(|e| e.id() == id) {
            Some(t) => overlaps_any(&t.rect, entities.iter().filter(|e| e.id() != id)),
            None => false,
        },
        None => {
            let mut rest = entities;
            while let Some((first, tail)) = rest.split_first() {
                if overlaps_any(&first.rect, tail) {
                    return true;
                }
                rest = tail;
            }
            false
        }
    }
}

/// Closest entity beyond one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: EntityId,
    pub rect: Rect,
    /// Gap between the edge and the neighbour's facing edge.
    pub distance: f64,
}

/// Closest entity beyond each edge, `None` where nothing qualifies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Nearest {
    pub top: Option<Neighbor>,
    pub bottom: Option<Neighbor>,
    pub left: Option<Neighbor>,
    pub right: Option<Neighbor>,
}

impl Nearest {
    pub fn get(&self, edge: Edge) -> Option<&Neighbor> {
        match edge {
            Edge::Top => self.top.as_ref(),
            Edge::Bottom => self.bottom.as_ref(),
            Edge::Left => self.left.as_ref(),
            Edge::Right => self.right.as_ref(),
        }
    }

    fn slot(&mut self, edge: Edge) -> &mut Option<Neighbor> {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
        }
    }

    /// Distance to the neighbour beyond `edge`; infinite when there is none.
    pub fn distance(&self, edge: Edge) -> f64 {
        self.get(edge).map_or(f64::INFINITY, |n| n.distance)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Edge, &Neighbor)> {
        Edge::ALL
            .into_iter()
            .filter_map(move |edge| self.get(edge).map(|n| (edge, n)))
    }
}

/// `true` if `other` lies entirely on the far side of `edge`, touching allowed.
fn is_beyond(rect: &Rect, other: &Rect, edge: Edge) -> bool {
    match edge {
        Edge::Top => other.bottom() <= rect.top(),
        Edge::Bottom => other.top() >= rect.bottom(),
        Edge::Left => other.right() <= rect.left(),
        Edge::Right => other.left() >= rect.right(),
    }
}

/// For each edge, the closest entity beyond it whose perpendicular range
/// shares at least a point with the rectangle's. Ties keep scene order.
pub fn get_nearest<'a>(rect: &Rect, others: impl IntoIterator<Item = &'a Entity>) -> Nearest {
    let mut nearest = Nearest::default();
    for other in others {
        for edge in Edge::ALL {
            if !is_beyond(rect, &other.rect, edge) {
                continue;
            }
            let perpendicular = rect.perpendicular_range(edge);
            if math::is_disjoint(perpendicular, other.rect.perpendicular_range(edge)) {
                continue;
            }
            let distance = (rect.edge(edge) - other.rect.edge(edge.opposite())).abs();
            let slot = nearest.slot(edge);
            if slot.is_none_or(|n| distance < n.distance) {
                *slot = Some(Neighbor {
                    id: other.id(),
                    rect: other.rect,
                    distance,
                });
            }
        }
    }
    nearest
}

/// Neighbours touching the rectangle, as offered by "match size" actions.
pub fn adjacent_neighbors<'a>(
    rect: &Rect,
    others: impl IntoIterator<Item = &'a Entity>,
) -> Vec<(Edge, Neighbor)> {
    get_nearest(rect, others)
        .iter()
        .filter(|(_, n)| n.distance == 0.0)
        .map(|(edge, n)| (edge, *n))
        .collect()
}

/// A solid guide: entities sharing one of the rectangle's edge coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedGuide {
    pub edge: Edge,
    pub coordinate: f64,
    /// Union of the perpendicular ranges of everything on the line.
    pub span: Interval,
    pub ids: Vec<EntityId>,
}

/// Exact alignments: an other is aligned on `edge` if its same or opposite
/// edge has exactly the rectangle's coordinate.
pub fn aligned_guides<'a>(
    rect: &Rect,
    others: impl IntoIterator<Item = &'a Entity> + Clone,
) -> Vec<AlignedGuide> {
    let mut guides = Vec::new();
    for edge in Edge::ALL {
        let coordinate = rect.edge(edge);
        let mut span = rect.perpendicular_range(edge);
        let mut ids = Vec::new();
        for other in others.clone() {
            if other.rect.edge(edge) == coordinate || other.rect.edge(edge.opposite()) == coordinate
            {
                span = span.hull(&other.rect.perpendicular_range(edge));
                ids.push(other.id());
            }
        }
        if !ids.is_empty() {
            guides.push(AlignedGuide {
                edge,
                coordinate,
                span,
                ids,
            });
        }
    }
    guides
}

/// An edge of an other that is close to, but not on, one of the rectangle's edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearAlignment {
    pub edge: Edge,
    pub id: EntityId,
    /// The other's edge: `edge` itself or its opposite.
    pub other_edge: Edge,
    pub coordinate: f64,
    pub distance: f64,
}

/// All near alignments within `(0, threshold]`, by edge then scene order.
pub fn almost_aligned<'a>(
    rect: &Rect,
    others: impl IntoIterator<Item = &'a Entity> + Clone,
    threshold: f64,
) -> Vec<NearAlignment> {
    let mut out = Vec::new();
    for edge in Edge::ALL {
        let own = rect.edge(edge);
        for other in others.clone() {
            for other_edge in [edge, edge.opposite()] {
                let coordinate = other.rect.edge(other_edge);
                let distance = (own - coordinate).abs();
                if 0.0 < distance && distance <= threshold {
                    out.push(NearAlignment {
                        edge,
                        id: other.id(),
                        other_edge,
                        coordinate,
                        distance,
                    });
                }
            }
        }
    }
    out
}

/// Offset that snaps the rectangle onto its closest near alignment, one
/// candidate per axis. The first candidate wins among equal distances.
pub fn snap_offset<'a>(
    rect: &Rect,
    others: impl IntoIterator<Item = &'a Entity> + Clone,
    threshold: f64,
) -> (f64, f64) {
    let mut best_x: Option<f64> = None;
    let mut best_y: Option<f64> = None;
    for near in almost_aligned(rect, others, threshold) {
        let delta = near.coordinate - rect.edge(near.edge);
        let best = if near.edge.is_horizontal() {
            &mut best_y
        } else {
            &mut best_x
        };
        if best.is_none_or(|b| delta.abs() < b.abs()) {
            *best = Some(delta);
        }
    }
    (best_x.unwrap_or(0.0), best_y.unwrap_or(0.0))
}

/// Result of planning a move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome<T> {
    /// Nothing to do: zero delta, or clamping undid the whole move.
    Unchanged,
    Moved(T),
    /// The move would collide, or leave the bounds for a group move.
    Rejected,
}

/// Plans moving `rect` by `(dx, dy)`.
///
/// Unless `free` is set the result is clamped into `bounds` and rejected if
/// it overlaps any of `others`. A rectangle that already overlaps may move,
/// but only to a position that no longer overlaps.
pub fn plan_move<'a>(
    rect: &Rect,
    others: impl IntoIterator<Item = &'a Entity>,
    dx: f64,
    dy: f64,
    bounds: Bounds,
    free: bool,
) -> MoveOutcome<Rect> {
    if dx == 0.0 && dy == 0.0 {
        return MoveOutcome::Unchanged;
    }
    let mut moved = rect.translated(dx, dy);
    if free {
        return MoveOutcome::Moved(moved);
    }
    moved.clamp_into(bounds.width, bounds.height);
    if overlaps_any(&moved, others) {
        MoveOutcome::Rejected
    } else if moved == *rect {
        MoveOutcome::Unchanged
    } else {
        MoveOutcome::Moved(moved)
    }
}

/// Plans moving every entity in `ids` by the same delta. All move or none
/// do: any moved rectangle that overlaps a non-moved entity or leaves the
/// bounds rejects the whole group, unless `free` is set.
pub fn plan_group_move(
    scene: &Scene,
    ids: &BTreeSet<EntityId>,
    dx: f64,
    dy: f64,
    bounds: Bounds,
    free: bool,
) -> MoveOutcome<Vec<(EntityId, Rect)>> {
    if dx == 0.0 && dy == 0.0 {
        return MoveOutcome::Unchanged;
    }
    let moved: Vec<(EntityId, Rect)> = scene
        .iter()
        .filter(|e| ids.contains(&e.id()))
        .map(|e| (e.id(), e.rect.translated(dx, dy)))
        .collect();
    if moved.is_empty() {
        return MoveOutcome::Unchanged;
    }
    if !free {
        let stationary = || scene.iter().filter(|e| !ids.contains(&e.id()));
        let blocked = moved
            .iter()
            .any(|(_, r)| !bounds.contains(r) || overlaps_any(r, stationary()));
        if blocked {
            return MoveOutcome::Rejected;
        }
    }
    MoveOutcome::Moved(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, Lane, Orientation};

    fn block(x: f64, y: f64, w: f64, h: f64) -> Entity {
        Entity::new(
            Rect::new(x, y, w, h),
            EntityKind::Lane(Lane::new("", Orientation::Horizontal)),
        )
    }

    const BOUNDS: Bounds = Bounds {
        width: 1000.0,
        height: 1000.0,
    };

    #[test]
    fn test_check_for_overlaps_any_pair() {
        let entities = vec![
            block(0.0, 0.0, 10.0, 10.0),
            block(10.0, 0.0, 10.0, 10.0),
            block(30.0, 0.0, 10.0, 10.0),
        ];
        assert!(!check_for_overlaps(&entities, None));

        let mut overlapping = entities.clone();
        overlapping.push(block(35.0, 5.0, 10.0, 10.0));
        assert!(check_for_overlaps(&overlapping, None));
        assert!(check_for_overlaps(&overlapping, Some(overlapping[2].id())));
        assert!(!check_for_overlaps(&overlapping, Some(overlapping[0].id())));
    }

    #[test]
    fn test_nearest_picks_closest() {
        let me = Rect::new(100.0, 100.0, 50.0, 50.0);
        let far = block(100.0, 0.0, 50.0, 20.0);
        let near = block(120.0, 60.0, 50.0, 20.0);
        let right = block(170.0, 140.0, 20.0, 20.0);
        let nearest = get_nearest(&me, [&far, &near, &right]);

        assert_eq!(nearest.top.map(|n| n.id), Some(near.id()));
        assert_eq!(nearest.distance(Edge::Top), 20.0);
        assert_eq!(nearest.right.map(|n| n.id), Some(right.id()));
        assert_eq!(nearest.distance(Edge::Right), 20.0);
        assert!(nearest.bottom.is_none());
        assert_eq!(nearest.distance(Edge::Left), f64::INFINITY);
    }

    #[test]
    fn test_nearest_requires_perpendicular_overlap() {
        let me = Rect::new(0.0, 100.0, 50.0, 50.0);
        let diagonal = block(60.0, 0.0, 20.0, 20.0);
        let nearest = get_nearest(&me, [&diagonal]);
        assert_eq!(nearest.iter().count(), 0);
    }

    #[test]
    fn test_adjacent_neighbors() {
        let me = Rect::new(0.0, 0.0, 50.0, 50.0);
        let touching = block(50.0, 0.0, 20.0, 80.0);
        let gap = block(0.0, 60.0, 30.0, 10.0);
        let adjacent = adjacent_neighbors(&me, [&touching, &gap]);
        assert_eq!(adjacent.len(), 1);
        assert_eq!(adjacent[0].0, Edge::Right);
        assert_eq!(adjacent[0].1.rect.h, 80.0);
    }

    #[test]
    fn test_aligned_guides() {
        let me = Rect::new(0.0, 0.0, 50.0, 50.0);
        let same_top = block(100.0, 0.0, 20.0, 20.0);
        let stacked = block(200.0, 50.0, 10.0, 10.0);
        let guides = aligned_guides(&me, [&same_top, &stacked]);

        let top = guides.iter().find(|g| g.edge == Edge::Top).unwrap();
        assert_eq!(top.ids, vec![same_top.id()]);
        assert_eq!(top.span, Interval::new(0.0, 120.0));

        let bottom = guides.iter().find(|g| g.edge == Edge::Bottom).unwrap();
        assert_eq!(bottom.ids, vec![stacked.id()]);
        assert_eq!(bottom.span, Interval::new(0.0, 210.0));
    }

    #[test]
    fn test_almost_aligned_threshold() {
        let me = Rect::new(0.0, 0.0, 50.0, 50.0);
        let close = block(100.0, 4.0, 20.0, 20.0);
        let exact = block(100.0, 0.0, 20.0, 20.0);
        let far = block(100.0, 11.0, 20.0, 20.0);

        let near = almost_aligned(&me, [&close, &exact, &far], 10.0);
        let top: Vec<_> = near.iter().filter(|n| n.edge == Edge::Top).collect();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, close.id());
        assert_eq!(top[0].distance, 4.0);
    }

    #[test]
    fn test_snap_offset_closest_wins() {
        let me = Rect::new(0.0, 0.0, 50.0, 50.0);
        let a = block(100.0, 4.0, 20.0, 20.0);
        let b = block(100.0, -2.0, 20.0, 10.0);
        let (dx, dy) = snap_offset(&me, [&a, &b], 5.0);
        assert_eq!(dx, 0.0);
        assert_eq!(dy, -2.0);
    }

    #[test]
    fn test_plan_move_rejects_collision() {
        let a = block(0.0, 0.0, 10.0, 10.0);
        let b = block(10.0, 0.0, 10.0, 10.0);
        assert_eq!(
            plan_move(&a.rect, [&b], 1.0, 0.0, BOUNDS, false),
            MoveOutcome::Rejected
        );
        assert_eq!(
            plan_move(&a.rect, [&b], 1.0, 0.0, BOUNDS, true),
            MoveOutcome::Moved(Rect::new(1.0, 0.0, 10.0, 10.0))
        );
        assert_eq!(
            plan_move(&a.rect, [&b], 0.0, 0.0, BOUNDS, false),
            MoveOutcome::Unchanged
        );
    }

    #[test]
    fn test_plan_move_clamps() {
        let a = block(5.0, 5.0, 10.0, 10.0);
        assert_eq!(
            plan_move(&a.rect, std::iter::empty(), -20.0, 0.0, BOUNDS, false),
            MoveOutcome::Moved(Rect::new(0.0, 5.0, 10.0, 10.0))
        );
        let corner = block(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            plan_move(&corner.rect, std::iter::empty(), -1.0, -1.0, BOUNDS, false),
            MoveOutcome::Unchanged
        );
    }

    #[test]
    fn test_plan_move_out_of_overlap() {
        let a = block(0.0, 0.0, 10.0, 10.0);
        let b = block(5.0, 0.0, 10.0, 10.0);
        assert_eq!(
            plan_move(&a.rect, [&b], 1.0, 0.0, BOUNDS, false),
            MoveOutcome::Rejected
        );
        assert_eq!(
            plan_move(&a.rect, [&b], 0.0, 20.0, BOUNDS, false),
            MoveOutcome::Moved(Rect::new(0.0, 20.0, 10.0, 10.0))
        );
    }
}
