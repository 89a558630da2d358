//! Ordered entity storage for one layout mode.

use crate::model::{Entity, EntityId};

/// Entities in insertion order. Later entities are drawn above earlier ones
/// and are hit-tested first.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + Clone {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(Entity::id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Every entity except `id`, in scene order.
    pub fn others(&self, id: EntityId) -> impl Iterator<Item = &Entity> + Clone {
        self.entities.iter().filter(move |e| e.id() != id)
    }

    pub(crate) fn push(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        self.entities.push(entity);
        id
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(index))
    }

    /// Replaces the stored entity with the same id, keeping its z-order.
    pub(crate) fn replace(&mut self, entity: Entity) -> bool {
        match self.get_mut(entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Topmost entity whose interior contains the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.rect.hit_test(x, y))
            .map(Entity::id)
    }
}
