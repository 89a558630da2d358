use std::collections::BTreeSet;

use crate::model::{EntityId, Rect};
use crate::scene::Scene;

/// Tracks which entities are selected and which are being dragged.
///
/// `SelectionManager` is responsible for:
/// - Tracking the selected set (drawn with a green outline)
/// - Tracking the drag set (the entities following the pointer)
/// - Marquee selection over a scene
///
/// # Selection Model
///
/// Entities carry no selection flags. Both sets hold [`EntityId`]s and are
/// kept apart from the scene, so a deleted entity is forgotten by calling
/// [`SelectionManager::remove`] or [`SelectionManager::retain`].
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: BTreeSet<EntityId>,
    dragging: BTreeSet<EntityId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with nothing selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatplan_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.selected().is_empty());
    /// assert_eq!(manager.sole_selected(), None);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &BTreeSet<EntityId> {
        &self.selected
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.contains(&id)
    }

    /// The selected entity when exactly one is selected.
    pub fn sole_selected(&self) -> Option<EntityId> {
        match self.selected.len() {
            1 => self.selected.first().copied(),
            _ => None,
        }
    }

    /// Replaces the selection with a single entity.
    pub fn select_only(&mut self, id: EntityId) {
        self.selected.clear();
        self.selected.insert(id);
    }

    pub fn add(&mut self, id: EntityId) {
        self.selected.insert(id);
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Replaces the selection with every entity touching the marquee.
    ///
    /// The marquee may have a negative extent; shared edges count as touching.
    /// Returns the number of entities selected.
    pub fn select_in_rect(&mut self, scene: &Scene, marquee: &Rect) -> usize {
        let area = marquee.normalized();
        self.selected = scene
            .iter()
            .filter(|e| e.rect.is_overlapping(&area, true))
            .map(|e| e.id())
            .collect();
        self.selected.len()
    }

    pub fn dragging(&self) -> &BTreeSet<EntityId> {
        &self.dragging
    }

    pub fn is_dragging(&self, id: EntityId) -> bool {
        self.dragging.contains(&id)
    }

    /// The dragged entity when exactly one is being dragged.
    pub fn sole_dragging(&self) -> Option<EntityId> {
        match self.dragging.len() {
            1 => self.dragging.first().copied(),
            _ => None,
        }
    }

    pub fn drag_only(&mut self, id: EntityId) {
        self.dragging.clear();
        self.dragging.insert(id);
    }

    /// Makes the whole selection the drag set.
    pub fn drag_selection(&mut self) {
        self.dragging = self.selected.clone();
    }

    pub fn clear_dragging(&mut self) {
        self.dragging.clear();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.dragging.clear();
    }

    /// Forgets an entity in both sets.
    pub fn remove(&mut self, id: EntityId) {
        self.selected.remove(&id);
        self.dragging.remove(&id);
    }

    /// Keeps only ids that still exist in `scene`.
    pub fn retain(&mut self, scene: &Scene) {
        self.selected.retain(|id| scene.contains(*id));
        self.dragging.retain(|id| scene.contains(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, EntityKind, Lane, Orientation};

    fn scene_with(rects: &[Rect]) -> (Scene, Vec<EntityId>) {
        let mut scene = Scene::new();
        let ids = rects
            .iter()
            .map(|r| {
                scene.push(Entity::new(
                    *r,
                    EntityKind::Lane(Lane::new("L", Orientation::Horizontal)),
                ))
            })
            .collect();
        (scene, ids)
    }

    #[test]
    fn test_select_only_replaces() {
        let mut manager = SelectionManager::new();
        manager.add(EntityId(1));
        manager.add(EntityId(2));
        assert_eq!(manager.sole_selected(), None);

        manager.select_only(EntityId(3));
        assert_eq!(manager.sole_selected(), Some(EntityId(3)));
    }

    #[test]
    fn test_select_in_rect_inclusive_and_signed() {
        let (scene, ids) = scene_with(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(50.0, 50.0, 10.0, 10.0),
        ]);
        let mut manager = SelectionManager::new();

        // Dragged up-left from (20, 20) to (10, 10): touches only the first edge.
        let count = manager.select_in_rect(&scene, &Rect::new(20.0, 20.0, -10.0, -10.0));
        assert_eq!(count, 1);
        assert!(manager.is_selected(ids[0]));
        assert!(!manager.is_selected(ids[1]));
    }

    #[test]
    fn test_drag_selection_and_retain() {
        let (mut scene, ids) = scene_with(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 0.0, 10.0, 10.0),
        ]);
        let mut manager = SelectionManager::new();
        manager.add(ids[0]);
        manager.add(ids[1]);
        manager.drag_selection();
        assert_eq!(manager.dragging().len(), 2);

        scene.remove(ids[0]);
        manager.retain(&scene);
        assert_eq!(manager.sole_selected(), Some(ids[1]));
        assert_eq!(manager.sole_dragging(), Some(ids[1]));
    }
}
