//! Pointer and keyboard handling for the layout canvas.
//!
//! The host forwards raw input to an [`Editor`] and acts on the returned
//! [`EditorAction`]: repaint, ask for a delete confirmation, or open one of
//! the forms. Every handler runs to completion and leaves the scene
//! consistent.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use seatplan_core::math::{self, round_to};
use seatplan_core::{InputError, Result};
use seatplan_settings::{Config, SeatShape, TableDimensions};

use crate::edit::EditSession;
use crate::engine::{
    overlaps_any, plan_group_move, plan_move, snap_offset, Bounds, MoveOutcome,
};
use crate::model::{
    grid_ids, linked_end, Edge, Entity, EntityId, EntityKind, Group, Indent, Lane, Margins,
    Orientation, Panel, Rect, Seat, Togo,
};
use crate::options::{Options, TableType};
use crate::scene::Scene;
use crate::seating::TableSeating;
use crate::selection_manager::SelectionManager;
use crate::viewport::Viewport;
use crate::workspace::{Mode, Workspace};

/// Modifier keys held during an event. Shift both allows free placement
/// while dragging and places quick seats in handy mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

/// A pointer event in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Movement since the previous event, in pixels.
    pub movement_x: f64,
    pub movement_y: f64,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// An event at `(x, y)` that moved by `(movement_x, movement_y)`.
    pub fn moved(x: f64, y: f64, movement_x: f64, movement_y: f64) -> Self {
        Self {
            x,
            y,
            movement_x,
            movement_y,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Enter,
    Shift,
}

/// What the host should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    None,
    Redraw,
    /// Ask the user to confirm deleting these entities, then call
    /// [`Editor::delete_entities`].
    ConfirmDelete { ids: Vec<EntityId> },
    /// Open the edit form for an entity.
    OpenEditor { id: EntityId },
    /// Open the creation form for a new entity at a layout position.
    OpenCreate { at: (f64, f64) },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// The drag set in the selection manager follows the pointer.
    Dragging,
    /// A selection rectangle anchored at `origin` with a signed `extent`.
    Marquee {
        origin: (f64, f64),
        extent: (f64, f64),
    },
}

impl InteractionState {
    pub fn marquee_rect(&self) -> Option<Rect> {
        match *self {
            InteractionState::Marquee { origin, extent } => {
                Some(Rect::new(origin.0, origin.1, extent.0, extent.1))
            }
            _ => None,
        }
    }
}

/// Values collected by the creation form.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateRequest {
    Panel {
        count: u32,
        table_type: TableType,
        orientation: Orientation,
        margins: Margins,
    },
    Lane {
        text: String,
        orientation: Orientation,
        width: f64,
        height: f64,
    },
    Group {
        title: String,
        table_type: TableType,
        panel_counts: Vec<u32>,
    },
    Togo {
        per_row: u32,
    },
    /// A `rows x cols` grid of handy seats labelled from `start` towards `end`.
    Seats {
        rows: u32,
        cols: u32,
        width: f64,
        height: f64,
        shape: SeatShape,
        start: i64,
        end: i64,
    },
}

impl CreateRequest {
    fn kind_name(&self) -> &'static str {
        match self {
            CreateRequest::Panel { .. } => "panel",
            CreateRequest::Lane { .. } => "lane",
            CreateRequest::Group { .. } => "group",
            CreateRequest::Togo { .. } => "togo",
            CreateRequest::Seats { .. } => "seat",
        }
    }

    fn mode(&self) -> Mode {
        match self {
            CreateRequest::Seats { .. } => Mode::Handy,
            _ => Mode::Register,
        }
    }
}

/// Largest count a form accepts, for a single field and for a group's total.
pub const MAX_COUNT: u32 = 999;

pub(crate) fn require_count(field: &str, value: u32) -> std::result::Result<u32, InputError> {
    if value == 0 {
        return Err(InputError::NonPositiveCount {
            field: field.to_string(),
            value: 0,
        });
    }
    if value > MAX_COUNT {
        return Err(InputError::CountTooLarge {
            field: field.to_string(),
            value: i64::from(value),
            max: i64::from(MAX_COUNT),
        });
    }
    Ok(value)
}

pub(crate) fn require_dimension(field: &str, value: f64) -> std::result::Result<f64, InputError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(InputError::NonPositiveDimension {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

fn require_margin(field: &str, value: f64) -> std::result::Result<f64, InputError> {
    if value == 0.0 {
        return Ok(value);
    }
    require_dimension(field, value)
}

/// The editor: both scenes, the selection, the viewport and the gesture in
/// progress.
#[derive(Debug, Clone)]
pub struct Editor {
    pub(crate) workspace: Workspace,
    pub(crate) selection: SelectionManager,
    pub(crate) viewport: Viewport,
    pub(crate) config: Config,
    pub(crate) state: InteractionState,
    pub(crate) modifiers: Modifiers,
    pub(crate) session: Option<EditSession>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Editor {
    pub fn new(config: Config) -> Self {
        Self::with_seating(config, TableSeating::new())
    }

    pub fn with_seating(config: Config, seating: TableSeating) -> Self {
        Self {
            workspace: Workspace::new(Options::from_settings(&config.tables), seating),
            selection: SelectionManager::new(),
            viewport: Viewport::from_settings(&config.view),
            config,
            state: InteractionState::Idle,
            modifiers: Modifiers::default(),
            session: None,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn scene(&self) -> &Scene {
        self.workspace.active_scene()
    }

    pub fn mode(&self) -> Mode {
        self.workspace.mode()
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Layout area entities are kept inside.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.config.canvas.width, self.config.canvas.height)
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Switches scenes, dropping the selection and any gesture in progress.
    pub fn switch_mode(&mut self, mode: Mode) -> EditorAction {
        if self.is_editing() || !self.workspace.switch_mode(mode) {
            return EditorAction::None;
        }
        self.selection.clear();
        self.state = InteractionState::Idle;
        EditorAction::Redraw
    }

    /// Edits the seating lookup. To-go blocks are resized afterwards.
    pub fn edit_seating<R>(&mut self, f: impl FnOnce(&mut TableSeating) -> R) -> R {
        self.workspace.edit_seating(f)
    }

    /// Changes the button size and colour of a table type and re-derives
    /// every size that depends on it.
    pub fn update_table_options(
        &mut self,
        table_type: TableType,
        dimensions: TableDimensions,
    ) -> Result<()> {
        let checked = require_dimension("width", dimensions.width)
            .and_then(|_| require_dimension("height", dimensions.height));
        if let Err(e) = checked {
            warn!("Rejected {} options: {}", table_type, e);
            return Err(e.into());
        }
        let mut tables = self.config.tables.clone();
        match table_type {
            TableType::Table => tables.table = dimensions,
            TableType::Counter => tables.counter = dimensions,
            TableType::Bar => tables.bar = dimensions,
            TableType::Togo => tables.togo = dimensions,
        }
        self.workspace.apply_table_settings(&tables);
        self.config.tables = tables;
        Ok(())
    }

    /// Replaces the configuration, keeping scenes and counts.
    pub fn apply_config(&mut self, config: Config) {
        self.workspace.apply_table_settings(&config.tables);
        self.viewport = Viewport::from_settings(&config.view);
        self.config = config;
    }

    fn round_for_mode(&self, (x, y): (f64, f64)) -> (f64, f64) {
        match self.mode() {
            Mode::Handy => {
                let round = round_to(self.config.snap.grid_step);
                (round(x), round(y))
            }
            Mode::Register => (x.round(), y.round()),
        }
    }

    /// Where a quick seat would go for the current pointer, if it fits.
    pub fn quick_seat_preview(&self) -> Option<Rect> {
        if self.mode() != Mode::Handy {
            return None;
        }
        let round = round_to(self.config.snap.grid_step);
        let (px, py) = self.viewport.pointer();
        let quick = &self.config.quick_seat;
        let rect = Rect::new(round(px), round(py), quick.width, quick.height);
        (!overlaps_any(&rect, self.scene().iter())).then_some(rect)
    }

    fn place_quick_seat(&mut self) -> EditorAction {
        let Some(rect) = self.quick_seat_preview() else {
            debug!("Quick seat blocked at {:?}", self.viewport.pointer());
            return EditorAction::None;
        };
        let seat = Seat::new(self.config.quick_seat.shape, 0);
        self.workspace.insert(Entity::new(rect, EntityKind::Seat(seat)));
        EditorAction::Redraw
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> EditorAction {
        self.modifiers = event.modifiers;
        if self.is_editing() {
            return EditorAction::None;
        }
        let (px, py) = self.viewport.update_pointer(self.mode(), event.x, event.y);
        match self.scene().hit_test(px, py) {
            Some(id) if self.selection.is_selected(id) => {
                self.selection.drag_selection();
                self.state = InteractionState::Dragging;
            }
            Some(id) => {
                self.selection.select_only(id);
                self.selection.drag_only(id);
                self.state = InteractionState::Dragging;
            }
            None if self.mode() == Mode::Handy && event.modifiers.shift => {
                self.selection.clear_dragging();
                return self.place_quick_seat();
            }
            None => {
                self.selection.clear_dragging();
                self.state = InteractionState::Marquee {
                    origin: (px, py),
                    extent: (0.0, 0.0),
                };
            }
        }
        EditorAction::Redraw
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> EditorAction {
        self.modifiers = event.modifiers;
        let (px, py) = self.viewport.update_pointer(self.mode(), event.x, event.y);
        if self.is_editing() {
            return EditorAction::None;
        }
        match self.state {
            InteractionState::Idle => {
                if self.mode() == Mode::Handy && event.modifiers.shift {
                    EditorAction::Redraw
                } else {
                    EditorAction::None
                }
            }
            InteractionState::Marquee { origin, .. } => {
                self.state = InteractionState::Marquee {
                    origin,
                    extent: (px - origin.0, py - origin.1),
                };
                EditorAction::Redraw
            }
            InteractionState::Dragging => {
                let (dx, dy) =
                    self.viewport
                        .movement_delta(self.mode(), event.movement_x, event.movement_y);
                let free = event.modifiers.shift;
                let moved = match self.selection.sole_dragging() {
                    Some(id) => self.move_single(id, dx, dy, free, true),
                    None => {
                        let ids = self.selection.dragging().clone();
                        self.move_group(&ids, dx, dy, free)
                    }
                };
                if moved {
                    EditorAction::Redraw
                } else {
                    EditorAction::None
                }
            }
        }
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> EditorAction {
        self.modifiers = event.modifiers;
        let (px, py) = self.viewport.update_pointer(self.mode(), event.x, event.y);
        let state = std::mem::take(&mut self.state);
        self.selection.clear_dragging();

        let mut marquee_drawn = false;
        if let Some(marquee) = state.marquee_rect() {
            if marquee.w != 0.0 || marquee.h != 0.0 {
                let count = self
                    .selection
                    .select_in_rect(self.workspace.active_scene(), &marquee);
                debug!("Marquee selected {} entities", count);
                marquee_drawn = true;
            }
        }
        if !marquee_drawn {
            let over_selection = self
                .scene()
                .iter()
                .any(|e| self.selection.is_selected(e.id()) && e.rect.hit_test(px, py));
            if !over_selection {
                self.selection.deselect_all();
            }
        }
        EditorAction::Redraw
    }

    /// The pointer left the canvas: the gesture and the selection are dropped.
    pub fn pointer_leave(&mut self) -> EditorAction {
        self.state = InteractionState::Idle;
        self.selection.clear();
        EditorAction::Redraw
    }

    pub fn double_click(&mut self, event: PointerEvent) -> EditorAction {
        self.modifiers = event.modifiers;
        let pointer = self.viewport.update_pointer(self.mode(), event.x, event.y);
        if self.is_editing() {
            return EditorAction::None;
        }
        self.open_at(pointer)
    }

    fn open_at(&self, (x, y): (f64, f64)) -> EditorAction {
        match self.scene().hit_test(x, y) {
            Some(id) => EditorAction::OpenEditor { id },
            None => EditorAction::OpenCreate {
                at: self.round_for_mode((x, y)),
            },
        }
    }

    pub fn key_down(&mut self, key: Key) -> EditorAction {
        if key == Key::Shift {
            self.modifiers.shift = true;
            return if self.mode() == Mode::Handy {
                EditorAction::Redraw
            } else {
                EditorAction::None
            };
        }
        if self.is_editing() || self.selection.selected().is_empty() {
            return EditorAction::None;
        }
        let moved = match key {
            Key::Char('w') => self.nudge(0.0, -1.0),
            Key::Char('a') => self.nudge(-1.0, 0.0),
            Key::Char('s') => self.nudge(0.0, 1.0),
            Key::Char('d') => self.nudge(1.0, 0.0),
            Key::Char('W') => self.step_edge(Edge::Top),
            Key::Char('A') => self.step_edge(Edge::Left),
            Key::Char('S') => self.step_edge(Edge::Bottom),
            Key::Char('D') => self.step_edge(Edge::Right),
            Key::Delete => {
                return EditorAction::ConfirmDelete {
                    ids: self.selection.selected().iter().copied().collect(),
                }
            }
            Key::Enter => {
                return match self.selection.sole_selected().and_then(|id| self.scene().get(id)) {
                    Some(entity) => self.open_at(entity.rect.center()),
                    None => EditorAction::None,
                };
            }
            Key::Char(_) | Key::Shift => false,
        };
        if moved {
            EditorAction::Redraw
        } else {
            EditorAction::None
        }
    }

    pub fn key_up(&mut self, key: Key) -> EditorAction {
        if key == Key::Shift && self.modifiers.shift {
            self.modifiers.shift = false;
            if self.mode() == Mode::Handy {
                return EditorAction::Redraw;
            }
        }
        EditorAction::None
    }

    fn nudge(&mut self, dx: f64, dy: f64) -> bool {
        match self.selection.sole_selected() {
            Some(id) => self.move_single(id, dx, dy, false, false),
            None => {
                let ids = self.selection.selected().clone();
                self.move_group(&ids, dx, dy, false)
            }
        }
    }

    /// Moves one edge of the sole selected entity to the next multiple of
    /// the decagrid step, then clamps it into bounds.
    fn step_edge(&mut self, edge: Edge) -> bool {
        let step = self.config.snap.decagrid_step;
        let bounds = self.bounds();
        let Some(id) = self.selection.sole_selected() else {
            return false;
        };
        let Some(entity) = self.workspace.active_scene_mut().get_mut(id) else {
            return false;
        };
        let current = entity.rect.edge(edge);
        let target = match edge {
            Edge::Top | Edge::Left => step * ((current - 1.0) / step).floor(),
            Edge::Bottom | Edge::Right => step * ((current + 1.0) / step).ceil(),
        };
        let before = entity.rect;
        entity.rect.set_edge(edge, target);
        entity.rect.clamp_into(bounds.width, bounds.height);
        entity.rect != before
    }

    /// Moves one entity, snapping it onto near-aligned neighbours when
    /// `snap` is set and the snapped position is still valid.
    pub(crate) fn move_single(
        &mut self,
        id: EntityId,
        dx: f64,
        dy: f64,
        free: bool,
        snap: bool,
    ) -> bool {
        let bounds = self.bounds();
        let threshold = self.config.snap.snap_threshold;
        let scene = self.workspace.active_scene();
        let Some(entity) = scene.get(id) else {
            return false;
        };
        let planned = match plan_move(&entity.rect, scene.others(id), dx, dy, bounds, free) {
            MoveOutcome::Moved(rect) if snap && !free => {
                let (sx, sy) = snap_offset(&rect, scene.others(id), threshold);
                let snapped = rect.translated(sx, sy);
                if (sx != 0.0 || sy != 0.0)
                    && bounds.contains(&snapped)
                    && !overlaps_any(&snapped, scene.others(id))
                {
                    MoveOutcome::Moved(snapped)
                } else {
                    MoveOutcome::Moved(rect)
                }
            }
            other => other,
        };
        match planned {
            MoveOutcome::Moved(rect) => {
                if let Some(entity) = self.workspace.active_scene_mut().get_mut(id) {
                    entity.rect = rect;
                }
                true
            }
            MoveOutcome::Rejected => {
                debug!("Move of {} by ({}, {}) rejected: collision", id, dx, dy);
                false
            }
            MoveOutcome::Unchanged => false,
        }
    }

    pub(crate) fn move_group(
        &mut self,
        ids: &BTreeSet<EntityId>,
        dx: f64,
        dy: f64,
        free: bool,
    ) -> bool {
        let bounds = self.bounds();
        match plan_group_move(self.workspace.active_scene(), ids, dx, dy, bounds, free) {
            MoveOutcome::Moved(moves) => {
                let scene = self.workspace.active_scene_mut();
                for (id, rect) in moves {
                    if let Some(entity) = scene.get_mut(id) {
                        entity.rect = rect;
                    }
                }
                true
            }
            MoveOutcome::Rejected => {
                debug!(
                    "Group move of {} entities by ({}, {}) rejected",
                    ids.len(),
                    dx,
                    dy
                );
                false
            }
            MoveOutcome::Unchanged => false,
        }
    }

    /// Creates entities from a confirmed creation form at layout position
    /// `at`. Every value is checked before anything is added.
    pub fn create(&mut self, at: (f64, f64), request: CreateRequest) -> Result<Vec<EntityId>> {
        match self.build(at, request) {
            Ok(entities) => Ok(entities
                .into_iter()
                .map(|e| self.workspace.insert(e))
                .collect()),
            Err(e) => {
                warn!("Rejected creation form: {}", e);
                Err(e)
            }
        }
    }

    fn build(&self, (x, y): (f64, f64), request: CreateRequest) -> Result<Vec<Entity>> {
        if request.mode() != self.mode() {
            return Err(InputError::WrongKind {
                operation: format!("create {}", request.kind_name()),
                kind: format!("{} scene", self.mode()),
            }
            .into());
        }
        let origin = Rect::new(x, y, 0.0, 0.0);
        let entity = match request {
            CreateRequest::Panel {
                count,
                table_type,
                orientation,
                margins,
            } => {
                require_count("count", count)?;
                require_margin("margin top", margins.top)?;
                require_margin("margin bottom", margins.bottom)?;
                require_margin("margin left", margins.left)?;
                require_margin("margin right", margins.right)?;
                let panel = Panel::new(count, table_type, orientation).with_margins(margins);
                Entity::new(origin, EntityKind::Panel(panel))
            }
            CreateRequest::Lane {
                text,
                orientation,
                width,
                height,
            } => {
                require_dimension("width", width)?;
                require_dimension("height", height)?;
                Entity::new(
                    Rect::new(x, y, width, height),
                    EntityKind::Lane(Lane::new(text, orientation)),
                )
            }
            CreateRequest::Group {
                title,
                table_type,
                panel_counts,
            } => {
                if panel_counts.is_empty() {
                    return Err(InputError::NonPositiveCount {
                        field: "panels".to_string(),
                        value: 0,
                    }
                    .into());
                }
                for &n in &panel_counts {
                    require_count("panel table count", n)?;
                }
                let total = panel_counts
                    .iter()
                    .try_fold(0u32, |total, &n| total.checked_add(n))
                    .unwrap_or(u32::MAX);
                require_count("group table count", total)?;
                let group = Group::new(
                    title,
                    table_type,
                    panel_counts,
                    Group::DEFAULT_HEIGHT,
                    Indent::Left,
                );
                Entity::new(origin, EntityKind::Group(group))
            }
            CreateRequest::Togo { per_row } => {
                require_count("per row", per_row)?;
                Entity::new(origin, EntityKind::Togo(Togo::new(per_row)))
            }
            CreateRequest::Seats {
                rows,
                cols,
                width,
                height,
                shape,
                start,
                end,
            } => {
                require_count("rows", rows)?;
                require_count("columns", cols)?;
                require_dimension("width", width)?;
                require_dimension("height", height)?;
                let end = linked_end(rows, cols, start, end).ok_or_else(|| {
                    InputError::InvalidRange {
                        start,
                        end,
                        reason: "seating ids out of range".to_string(),
                    }
                })?;
                if start.min(end) < 1 {
                    return Err(InputError::InvalidRange {
                        start,
                        end,
                        reason: "seating ids start at 1".to_string(),
                    }
                    .into());
                }
                return Ok(seat_grid((x, y), (width, height), shape, rows, cols, start, end));
            }
        };
        Ok(vec![entity])
    }

    /// Deletes entities by id. Missing ids are skipped. Returns how many
    /// were removed.
    pub fn delete_entities(&mut self, ids: &[EntityId]) -> usize {
        let mut removed = 0;
        for &id in ids {
            if self.session.as_ref().is_some_and(|s| s.id() == id) {
                // Counts were claimed for the snapshot, not the live edits.
                if let Some(session) = self.session.take() {
                    self.workspace.active_scene_mut().replace(session.into_snapshot());
                }
            }
            if self.workspace.remove(id).is_some() {
                removed += 1;
            }
            self.selection.remove(id);
        }
        if removed > 0 {
            info!("Deleted {} of {} requested entities", removed, ids.len());
        }
        removed
    }

    /// Whether any entity in the active scene overlaps another.
    pub fn has_overlaps(&self) -> bool {
        crate::engine::check_for_overlaps(self.scene().entities(), None)
    }

    /// Area of every entity in the active scene combined.
    pub fn total_area(&self) -> f64 {
        math::sum(
            &self
                .scene()
                .iter()
                .map(|e| (e.rect.w * e.rect.h).abs())
                .collect::<Vec<_>>(),
        )
    }
}

fn seat_grid(
    (x, y): (f64, f64),
    (width, height): (f64, f64),
    shape: SeatShape,
    rows: u32,
    cols: u32,
    start: i64,
    end: i64,
) -> Vec<Entity> {
    let mut seats = Vec::with_capacity((rows * cols) as usize);
    for (r, row) in grid_ids(rows, cols, start, end).into_iter().enumerate() {
        for (c, seating_id) in row.into_iter().enumerate() {
            let rect = Rect::new(
                x + c as f64 * (width + Seat::GRID_SPACING),
                y + r as f64 * (height + Seat::GRID_SPACING),
                width,
                height,
            );
            seats.push(Entity::new(rect, EntityKind::Seat(Seat::new(shape, seating_id))));
        }
    }
    seats
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_core::Error;

    fn lane_at(editor: &mut Editor, x: f64, y: f64, w: f64, h: f64) -> EntityId {
        editor
            .create(
                (x, y),
                CreateRequest::Lane {
                    text: "L".into(),
                    orientation: Orientation::Horizontal,
                    width: w,
                    height: h,
                },
            )
            .unwrap()[0]
    }

    #[test]
    fn test_click_selects_and_drags() {
        let mut editor = Editor::default();
        let id = lane_at(&mut editor, 100.0, 100.0, 50.0, 20.0);

        editor.pointer_down(PointerEvent::at(110.0, 110.0));
        assert_eq!(editor.state(), InteractionState::Dragging);
        assert_eq!(editor.selection().sole_selected(), Some(id));

        editor.pointer_move(PointerEvent::moved(140.0, 110.0, 30.0, 0.0));
        assert_eq!(editor.scene().get(id).unwrap().rect.x, 130.0);

        editor.pointer_up(PointerEvent::at(140.0, 110.0));
        assert_eq!(editor.state(), InteractionState::Idle);
        assert!(editor.selection().dragging().is_empty());
        // Released over the selected lane: the selection stays.
        assert!(editor.selection().is_selected(id));
    }

    #[test]
    fn test_drag_snaps_to_neighbour() {
        let mut editor = Editor::default();
        let fixed = lane_at(&mut editor, 100.0, 100.0, 50.0, 20.0);
        let moving = lane_at(&mut editor, 100.0, 300.0, 50.0, 20.0);
        let _ = fixed;

        editor.pointer_down(PointerEvent::at(110.0, 310.0));
        editor.pointer_move(PointerEvent::moved(113.0, 310.0, 3.0, 0.0));
        // 3 units off the fixed lane's left edge: snapped back.
        assert_eq!(editor.scene().get(moving).unwrap().rect.x, 100.0);

        editor.pointer_move(PointerEvent::moved(113.0, 310.0, 3.0, 0.0).with_shift());
        assert_eq!(editor.scene().get(moving).unwrap().rect.x, 103.0);
    }

    #[test]
    fn test_marquee_selects() {
        let mut editor = Editor::default();
        let a = lane_at(&mut editor, 10.0, 10.0, 20.0, 20.0);
        let b = lane_at(&mut editor, 100.0, 10.0, 20.0, 20.0);

        editor.pointer_down(PointerEvent::at(0.0, 0.0));
        editor.pointer_move(PointerEvent::moved(50.0, 50.0, 50.0, 50.0));
        assert_eq!(
            editor.state().marquee_rect(),
            Some(Rect::new(0.0, 0.0, 50.0, 50.0))
        );
        editor.pointer_up(PointerEvent::at(50.0, 50.0));
        assert!(editor.selection().is_selected(a));
        assert!(!editor.selection().is_selected(b));
        assert_eq!(editor.state(), InteractionState::Idle);
    }

    #[test]
    fn test_click_on_empty_space_clears_selection() {
        let mut editor = Editor::default();
        let a = lane_at(&mut editor, 10.0, 10.0, 20.0, 20.0);
        editor.pointer_down(PointerEvent::at(15.0, 15.0));
        editor.pointer_up(PointerEvent::at(15.0, 15.0));
        assert!(editor.selection().is_selected(a));

        editor.pointer_down(PointerEvent::at(500.0, 500.0));
        editor.pointer_up(PointerEvent::at(500.0, 500.0));
        assert!(editor.selection().selected().is_empty());
    }

    #[test]
    fn test_pointer_leave_clears() {
        let mut editor = Editor::default();
        lane_at(&mut editor, 10.0, 10.0, 20.0, 20.0);
        editor.pointer_down(PointerEvent::at(15.0, 15.0));
        editor.pointer_leave();
        assert!(editor.selection().selected().is_empty());
        assert_eq!(editor.state(), InteractionState::Idle);
    }

    #[test]
    fn test_keyboard_nudge_and_step() {
        let mut editor = Editor::default();
        let id = lane_at(&mut editor, 23.0, 47.0, 20.0, 20.0);
        editor.pointer_down(PointerEvent::at(30.0, 50.0));
        editor.pointer_up(PointerEvent::at(30.0, 50.0));

        assert_eq!(editor.key_down(Key::Char('d')), EditorAction::Redraw);
        assert_eq!(editor.scene().get(id).unwrap().rect.x, 24.0);

        editor.key_down(Key::Char('A'));
        assert_eq!(editor.scene().get(id).unwrap().rect.x, 20.0);
        editor.key_down(Key::Char('A'));
        assert_eq!(editor.scene().get(id).unwrap().rect.x, 10.0);

        // Bottom edge at 67 steps to 70.
        editor.key_down(Key::Char('S'));
        assert_eq!(editor.scene().get(id).unwrap().rect.bottom(), 70.0);
    }

    #[test]
    fn test_step_edge_clamps_at_origin() {
        let mut editor = Editor::default();
        let id = lane_at(&mut editor, 0.0, 5.0, 20.0, 20.0);
        editor.pointer_down(PointerEvent::at(10.0, 10.0));
        editor.key_down(Key::Char('A'));
        assert_eq!(editor.scene().get(id).unwrap().rect.x, 0.0);
    }

    #[test]
    fn test_delete_and_enter_keys() {
        let mut editor = Editor::default();
        let id = lane_at(&mut editor, 10.0, 10.0, 20.0, 20.0);
        assert_eq!(editor.key_down(Key::Delete), EditorAction::None);

        editor.pointer_down(PointerEvent::at(15.0, 15.0));
        assert_eq!(
            editor.key_down(Key::Delete),
            EditorAction::ConfirmDelete { ids: vec![id] }
        );
        assert_eq!(editor.key_down(Key::Enter), EditorAction::OpenEditor { id });
    }

    #[test]
    fn test_double_click() {
        let mut editor = Editor::default();
        let id = lane_at(&mut editor, 10.0, 10.0, 20.0, 20.0);
        assert_eq!(
            editor.double_click(PointerEvent::at(15.0, 15.0)),
            EditorAction::OpenEditor { id }
        );
        assert_eq!(
            editor.double_click(PointerEvent::at(101.4, 203.6)),
            EditorAction::OpenCreate { at: (101.0, 204.0) }
        );
    }

    #[test]
    fn test_handy_double_click_rounds_to_grid() {
        let mut editor = Editor::default();
        editor.switch_mode(Mode::Handy);
        // Handy scale 0.8: 81.6 px is 102 layout units.
        assert_eq!(
            editor.double_click(PointerEvent::at(81.6, 160.0)),
            EditorAction::OpenCreate { at: (100.0, 200.0) }
        );
    }

    #[test]
    fn test_quick_seat() {
        let mut editor = Editor::default();
        editor.switch_mode(Mode::Handy);
        let action = editor.pointer_down(PointerEvent::at(84.0, 84.0).with_shift());
        assert_eq!(action, EditorAction::Redraw);
        assert_eq!(editor.scene().len(), 1);
        let seat = &editor.scene().entities()[0];
        assert_eq!(seat.rect, Rect::new(105.0, 105.0, 50.0, 50.0));

        // Inside the new seat: a hit, not a second seat.
        editor.pointer_up(PointerEvent::at(100.0, 100.0));
        editor.pointer_down(PointerEvent::at(100.0, 100.0).with_shift());
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn test_create_rejects_wrong_mode_and_bad_counts() {
        let mut editor = Editor::default();
        let err = editor
            .create((0.0, 0.0), CreateRequest::Togo { per_row: 0 })
            .unwrap_err();
        assert!(err.is_input_error());

        let seats = CreateRequest::Seats {
            rows: 1,
            cols: 1,
            width: 10.0,
            height: 10.0,
            shape: SeatShape::Rectangle,
            start: 1,
            end: 1,
        };
        assert!(matches!(
            editor.create((0.0, 0.0), seats),
            Err(Error::InvalidInput(InputError::WrongKind { .. }))
        ));
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn test_create_rejects_oversized_counts() {
        let mut editor = Editor::default();
        let group = CreateRequest::Group {
            title: "Bar".into(),
            table_type: TableType::Counter,
            panel_counts: vec![u32::MAX, 1],
        };
        assert!(matches!(
            editor.create((0.0, 0.0), group),
            Err(Error::InvalidInput(InputError::CountTooLarge { .. }))
        ));
        let group = CreateRequest::Group {
            title: "Bar".into(),
            table_type: TableType::Counter,
            panel_counts: vec![MAX_COUNT, 1],
        };
        assert!(matches!(
            editor.create((0.0, 0.0), group),
            Err(Error::InvalidInput(InputError::CountTooLarge { field, .. })) if field == "group table count"
        ));
        let panel = CreateRequest::Panel {
            count: u32::MAX,
            table_type: TableType::Table,
            orientation: Orientation::Horizontal,
            margins: Margins::default(),
        };
        assert!(editor.create((0.0, 0.0), panel).unwrap_err().is_input_error());
        assert!(editor.scene().is_empty());
        assert_eq!(editor.workspace().options().allocated(), 0);

        editor.switch_mode(Mode::Handy);
        let seats = CreateRequest::Seats {
            rows: 2,
            cols: 2,
            width: 10.0,
            height: 10.0,
            shape: SeatShape::Rectangle,
            start: i64::MAX - 1,
            end: i64::MAX,
        };
        assert!(matches!(
            editor.create((0.0, 0.0), seats),
            Err(Error::InvalidInput(InputError::InvalidRange { .. }))
        ));
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn test_create_seat_grid() {
        let mut editor = Editor::default();
        editor.switch_mode(Mode::Handy);
        let ids = editor
            .create(
                (0.0, 0.0),
                CreateRequest::Seats {
                    rows: 2,
                    cols: 2,
                    width: 40.0,
                    height: 30.0,
                    shape: SeatShape::Ellipse,
                    start: 8,
                    end: 1,
                },
            )
            .unwrap();
        assert_eq!(ids.len(), 4);
        let last = editor.scene().get(ids[3]).unwrap();
        assert_eq!(last.rect, Rect::new(50.0, 40.0, 40.0, 30.0));
        match &last.kind {
            EntityKind::Seat(seat) => assert_eq!(seat.seating_id, 5),
            other => panic!("unexpected {:?}", other),
        }

        let err = editor.create(
            (200.0, 200.0),
            CreateRequest::Seats {
                rows: 2,
                cols: 2,
                width: 40.0,
                height: 30.0,
                shape: SeatShape::Ellipse,
                start: 2,
                end: 0,
            },
        );
        assert!(matches!(
            err,
            Err(Error::InvalidInput(InputError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_update_table_options_relayouts() {
        let mut editor = Editor::default();
        let ids = editor
            .create(
                (0.0, 0.0),
                CreateRequest::Panel {
                    count: 2,
                    table_type: TableType::Table,
                    orientation: Orientation::Horizontal,
                    margins: Margins::zero(),
                },
            )
            .unwrap();
        assert_eq!(editor.scene().get(ids[0]).unwrap().rect.w, 210.0);

        editor
            .update_table_options(
                TableType::Table,
                TableDimensions {
                    width: 50.0,
                    height: 50.0,
                    color: "#ffa500".into(),
                },
            )
            .unwrap();
        assert_eq!(editor.scene().get(ids[0]).unwrap().rect.w, 110.0);
        assert_eq!(editor.workspace().options().table.count, 2);

        let bad = TableDimensions {
            width: 0.0,
            height: 50.0,
            color: "#ffa500".into(),
        };
        assert!(editor.update_table_options(TableType::Table, bad).is_err());
    }
}
