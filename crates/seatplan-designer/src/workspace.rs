//! Both layout scenes, the table-type registry and the seating lookup.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use seatplan_settings::TableTypeSettings;

use crate::model::{Entity, EntityId, EntityKind};
use crate::options::Options;
use crate::scene::Scene;
use crate::seating::TableSeating;

/// Which layout is being edited: the register screen or the handheld map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Register,
    Handy,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Register => "register",
            Mode::Handy => "handy",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the two scenes and keeps the option counts and derived sizes in
/// step with them.
///
/// Every insertion or removal of a panel or group in the register scene
/// adjusts the matching table-type count in the same call, and every change
/// to counts or seating re-derives the size of the to-go blocks.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    register: Scene,
    handy: Scene,
    mode: Mode,
    options: Options,
    seating: TableSeating,
}

impl Workspace {
    pub fn new(options: Options, seating: TableSeating) -> Self {
        Self {
            options,
            seating,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches the active scene. Returns `false` if `mode` was already active.
    pub fn switch_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        info!("Switching layout mode from {} to {}", self.mode, mode);
        self.mode = mode;
        true
    }

    pub fn scene(&self, mode: Mode) -> &Scene {
        match mode {
            Mode::Register => &self.register,
            Mode::Handy => &self.handy,
        }
    }

    fn scene_mut(&mut self, mode: Mode) -> &mut Scene {
        match mode {
            Mode::Register => &mut self.register,
            Mode::Handy => &mut self.handy,
        }
    }

    pub fn active_scene(&self) -> &Scene {
        self.scene(self.mode)
    }

    /// Moving entities in place never changes counts, so plain mutable
    /// access is enough for drags and nudges.
    pub(crate) fn active_scene_mut(&mut self) -> &mut Scene {
        self.scene_mut(self.mode)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn seating(&self) -> &TableSeating {
        &self.seating
    }

    /// Edits the seating lookup, then re-derives the to-go blocks.
    pub fn edit_seating<R>(&mut self, f: impl FnOnce(&mut TableSeating) -> R) -> R {
        let result = f(&mut self.seating);
        self.relayout_togos();
        result
    }

    /// Adds an entity to the active scene, deriving its size first.
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        entity.relayout(&self.options, self.seating.len());
        let mode = self.mode;
        if mode == Mode::Register {
            self.claim(&entity.kind);
        }
        info!(
            "Created {} {} '{}' in {} scene",
            entity.kind.name(),
            entity.id(),
            entity.name,
            mode
        );
        let id = self.scene_mut(mode).push(entity);
        if mode == Mode::Register {
            self.relayout_togos();
        }
        id
    }

    /// Removes an entity from the active scene. A missing id is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let mode = self.mode;
        let Some(entity) = self.scene_mut(mode).remove(id) else {
            debug!("Delete ignored: no entity {} in {} scene", id, mode);
            return None;
        };
        if mode == Mode::Register {
            self.release(&entity.kind);
            self.relayout_togos();
        }
        info!("Deleted {} {} '{}'", entity.kind.name(), id, entity.name);
        Some(entity)
    }

    /// Swaps in an edited copy of an entity, moving its seat count from the
    /// old allocation to the new one.
    pub(crate) fn replace(&mut self, mut entity: Entity) -> bool {
        let mode = self.mode;
        let Some(old_kind) = self.scene(mode).get(entity.id()).map(|e| e.kind.clone()) else {
            return false;
        };
        if mode == Mode::Register {
            self.release(&old_kind);
            self.claim(&entity.kind);
        }
        entity.relayout(&self.options, self.seating.len());
        self.scene_mut(mode).replace(entity);
        if mode == Mode::Register {
            self.relayout_togos();
        }
        true
    }

    fn claim(&mut self, kind: &EntityKind) {
        if let Some((table_type, n)) = kind.allocated_seats() {
            self.options.add_count(table_type, n);
        }
    }

    fn release(&mut self, kind: &EntityKind) {
        if let Some((table_type, n)) = kind.allocated_seats() {
            self.options.remove_count(table_type, n);
        }
    }

    /// Re-derives the size of every to-go block in the register scene.
    pub fn relayout_togos(&mut self) {
        let seating_len = self.seating.len();
        for entity in self.register.iter_mut() {
            if matches!(entity.kind, EntityKind::Togo(_)) {
                entity.relayout(&self.options, seating_len);
            }
        }
    }

    /// Re-derives the size of every entity in both scenes.
    pub fn relayout_all(&mut self) {
        let seating_len = self.seating.len();
        for entity in self.register.iter_mut().chain(self.handy.iter_mut()) {
            entity.relayout(&self.options, seating_len);
        }
    }

    /// Applies new table sizes and colours, keeping counts, and re-derives
    /// every size.
    pub fn apply_table_settings(&mut self, settings: &TableTypeSettings) {
        self.options.apply_settings(settings);
        self.relayout_all();
        debug!("Applied table settings to {} entities", self.register.len() + self.handy.len());
    }
}
