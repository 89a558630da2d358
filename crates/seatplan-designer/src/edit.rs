//! Edit sessions: the state behind an entity's property form.
//!
//! Opening a session snapshots the entity. Setters change the live entity so
//! the canvas shows the result right away; each one validates its input
//! first and applies nothing when it fails. Confirming keeps the changes and
//! settles the option counts, cancelling puts the snapshot back. While a
//! session is open the pointer and keyboard handlers do nothing.

use tracing::{info, warn};

use seatplan_core::{Error, InputError, Result};

use crate::engine::{adjacent_neighbors, Neighbor};
use crate::interaction::{require_count, require_dimension, Editor};
use crate::model::{Edge, Entity, EntityId, EntityKind, Indent, SeatRange};
use crate::seating::NOT_AVAILABLE;

/// Open form state: the entity being edited and how it looked before.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: EntityId,
    snapshot: Entity,
}

impl EditSession {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn snapshot(&self) -> &Entity {
        &self.snapshot
    }

    pub(crate) fn into_snapshot(self) -> Entity {
        self.snapshot
    }
}

/// Parses an integer form field.
pub fn parse_int(field: &str, raw: &str) -> std::result::Result<i64, InputError> {
    raw.trim().parse().map_err(|_| InputError::NotANumber {
        field: field.to_string(),
        raw: raw.to_string(),
    })
}

/// Parses a decimal form field. Non-finite values are not numbers here.
pub fn parse_number(field: &str, raw: &str) -> std::result::Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            field: field.to_string(),
            raw: raw.to_string(),
        })
}

/// Parses a count form field: a whole number of at least one.
pub fn parse_count(field: &str, raw: &str) -> std::result::Result<u32, InputError> {
    let value = parse_int(field, raw)?;
    let count = u32::try_from(value).map_err(|_| {
        if value > 0 {
            InputError::CountTooLarge {
                field: field.to_string(),
                value,
                max: i64::from(crate::interaction::MAX_COUNT),
            }
        } else {
            InputError::NonPositiveCount {
                field: field.to_string(),
                value,
            }
        }
    })?;
    require_count(field, count)
}

fn wrong_kind(operation: &str, entity: &Entity) -> InputError {
    InputError::WrongKind {
        operation: operation.to_string(),
        kind: entity.kind.name().to_string(),
    }
}

fn seating_mut<'a>(
    entity: &'a mut Entity,
    operation: &str,
) -> std::result::Result<&'a mut SeatRange, InputError> {
    let unsupported = wrong_kind(operation, entity);
    match &mut entity.kind {
        EntityKind::Panel(panel) => Ok(&mut panel.seating),
        EntityKind::Group(group) => Ok(&mut group.seating),
        _ => Err(unsupported),
    }
}

const NUMBER_WORDS: [&str; 10] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
];

impl Editor {
    /// Opens the form for `id`, freezing pointer and keyboard handling.
    pub fn begin_edit(&mut self, id: EntityId) -> Result<&Entity> {
        if let Some(session) = &self.session {
            return Err(Error::EditInProgress { id: session.id.0 });
        }
        let snapshot = self
            .scene()
            .get(id)
            .cloned()
            .ok_or(Error::UnknownEntity { id: id.0 })?;
        info!("Editing {} {} '{}'", snapshot.kind.name(), id, snapshot.name);
        self.state = Default::default();
        self.selection.clear_dragging();
        self.session = Some(EditSession { id, snapshot });
        self.edit_entity()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    fn session_id(&self) -> Result<EntityId> {
        self.session.as_ref().map(|s| s.id).ok_or(Error::NoEditSession)
    }

    /// The entity under edit, with every change made so far.
    pub fn edit_entity(&self) -> Result<&Entity> {
        let id = self.session_id()?;
        self.scene().get(id).ok_or(Error::UnknownEntity { id: id.0 })
    }

    /// Unchecked access to the entity under edit. Derived sizes are
    /// recomputed on commit.
    pub fn edit_entity_mut(&mut self) -> Result<&mut Entity> {
        let id = self.session_id()?;
        self.workspace
            .active_scene_mut()
            .get_mut(id)
            .ok_or(Error::UnknownEntity { id: id.0 })
    }

    /// Applies a validated change to the entity under edit and re-derives
    /// its size.
    fn apply_edit(
        &mut self,
        operation: &str,
        change: impl FnOnce(&mut Entity) -> std::result::Result<(), InputError>,
    ) -> Result<()> {
        let options = self.workspace.options().clone();
        let seating_len = self.workspace.seating().len();
        let entity = self.edit_entity_mut()?;
        match change(&mut *entity) {
            Ok(()) => {
                entity.relayout(&options, seating_len);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected {} on {}: {}", operation, entity.id(), e);
                Err(e.into())
            }
        }
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim().to_string();
        self.apply_edit("set name", |e| {
            e.name = name;
            Ok(())
        })
    }

    /// Sets the first seating id of a panel or group. The last id follows
    /// so the range keeps its length.
    pub fn set_seating_start(&mut self, raw: &str) -> Result<()> {
        self.apply_edit("set seating start", |e| {
            let start = parse_int("seating start", raw)?;
            let range = seating_mut(e, "set seating start")?;
            let span = range.span();
            let end = start.checked_add(span).ok_or_else(|| InputError::InvalidRange {
                start,
                end: start.saturating_add(span),
                reason: "ids out of range".to_string(),
            })?;
            if start < 1 {
                return Err(InputError::InvalidRange {
                    start,
                    end,
                    reason: "ids start at 1".to_string(),
                });
            }
            *range = SeatRange::new(start, end);
            Ok(())
        })
    }

    /// Sets the last seating id of a panel or group. The first id follows.
    pub fn set_seating_end(&mut self, raw: &str) -> Result<()> {
        self.apply_edit("set seating end", |e| {
            let end = parse_int("seating end", raw)?;
            let range = seating_mut(e, "set seating end")?;
            let span = range.span();
            let start = end.checked_sub(span).ok_or_else(|| InputError::InvalidRange {
                start: end.saturating_sub(span),
                end,
                reason: "ids out of range".to_string(),
            })?;
            if start < 1 {
                return Err(InputError::InvalidRange {
                    start,
                    end,
                    reason: "ids start at 1".to_string(),
                });
            }
            *range = SeatRange::new(start, end);
            Ok(())
        })
    }

    /// Requested inner height of a group. The group still grows to fit its
    /// longest panel.
    pub fn set_group_height(&mut self, raw: &str) -> Result<()> {
        self.apply_edit("set group height", |e| {
            let height = require_dimension("height", parse_number("height", raw)?)?;
            match &mut e.kind {
                EntityKind::Group(group) => {
                    group.set_height(height);
                    Ok(())
                }
                _ => Err(wrong_kind("set group height", e)),
            }
        })
    }

    pub fn set_group_indent(&mut self, indent: Indent) -> Result<()> {
        self.apply_edit("set group indent", |e| match &mut e.kind {
            EntityKind::Group(group) => {
                group.indent = indent;
                Ok(())
            }
            _ => Err(wrong_kind("set group indent", e)),
        })
    }

    pub fn set_group_title(&mut self, title: &str) -> Result<()> {
        self.apply_edit("set group title", |e| match &mut e.kind {
            EntityKind::Group(group) => {
                group.title = title.to_string();
                Ok(())
            }
            _ => Err(wrong_kind("set group title", e)),
        })
    }

    pub fn set_togo_per_row(&mut self, raw: &str) -> Result<()> {
        self.apply_edit("set per row", |e| {
            let per_row = parse_count("per row", raw)?;
            match &mut e.kind {
                EntityKind::Togo(togo) => {
                    togo.per_row = per_row;
                    Ok(())
                }
                _ => Err(wrong_kind("set per row", e)),
            }
        })
    }

    pub fn set_seat_id(&mut self, raw: &str) -> Result<()> {
        self.apply_edit("set seat id", |e| {
            let id = parse_int("seating id", raw)?;
            match &mut e.kind {
                EntityKind::Seat(seat) => {
                    seat.seating_id = id;
                    Ok(())
                }
                _ => Err(wrong_kind("set seat id", e)),
            }
        })
    }

    pub fn set_lane_text(&mut self, text: &str) -> Result<()> {
        self.apply_edit("set lane text", |e| match &mut e.kind {
            EntityKind::Lane(lane) => {
                lane.text = text.to_string();
                Ok(())
            }
            _ => Err(wrong_kind("set lane text", e)),
        })
    }

    pub fn set_lane_width(&mut self, raw: &str) -> Result<()> {
        self.apply_edit("set lane width", |e| {
            let width = require_dimension("width", parse_number("width", raw)?)?;
            match e.kind {
                EntityKind::Lane(_) => {
                    e.rect.w = width;
                    Ok(())
                }
                _ => Err(wrong_kind("set lane width", e)),
            }
        })
    }

    pub fn set_lane_height(&mut self, raw: &str) -> Result<()> {
        self.apply_edit("set lane height", |e| {
            let height = require_dimension("height", parse_number("height", raw)?)?;
            match e.kind {
                EntityKind::Lane(_) => {
                    e.rect.h = height;
                    Ok(())
                }
                _ => Err(wrong_kind("set lane height", e)),
            }
        })
    }

    /// Neighbours touching the lane under edit, one per side at most.
    pub fn lane_matches(&self) -> Result<Vec<(Edge, Neighbor)>> {
        let lane = self.edit_entity()?;
        if !matches!(lane.kind, EntityKind::Lane(_)) {
            return Err(wrong_kind("match size", lane).into());
        }
        Ok(adjacent_neighbors(&lane.rect, self.scene().others(lane.id())))
    }

    /// Copies the width (top and bottom) or height (left and right) of the
    /// neighbour touching `edge`.
    pub fn apply_lane_match(&mut self, edge: Edge) -> Result<()> {
        let neighbor = self
            .lane_matches()?
            .into_iter()
            .find(|(e, _)| *e == edge)
            .map(|(_, n)| n);
        self.apply_edit("match size", |e| {
            let Some(other) = neighbor else {
                return Err(InputError::WrongKind {
                    operation: format!("match {}", edge),
                    kind: "lane without a touching neighbour".to_string(),
                });
            };
            if edge.is_horizontal() {
                e.rect.w = other.rect.w;
            } else {
                e.rect.h = other.rect.h;
            }
            Ok(())
        })
    }

    /// Seating names shown in the form, one list per panel.
    pub fn seating_preview(&self) -> Result<Vec<Vec<String>>> {
        let entity = self.edit_entity()?;
        let seating = self.workspace.seating();
        let ranges = match &entity.kind {
            EntityKind::Panel(panel) => vec![panel.seating],
            EntityKind::Group(group) => group.split_seating(group.seating),
            _ => return Err(wrong_kind("seating preview", entity).into()),
        };
        ranges
            .into_iter()
            .map(|r| {
                seating.get_range(r.start, r.end, false).ok_or_else(|| {
                    InputError::InvalidRange {
                        start: r.start,
                        end: r.end,
                        reason: "ids start at 1".to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// A name for the entity under edit that does not clash with others.
    ///
    /// Panels are named after their first and last seating names, lanes after
    /// their orientation, groups after their table type. Clashes get a number
    /// word appended.
    pub fn suggest_name(&self) -> Result<String> {
        let entity = self.edit_entity()?;
        let seating = self.workspace.seating();
        let (mut name, include_one) = match &entity.kind {
            EntityKind::Panel(panel) => {
                let names = seating
                    .get_range(panel.seating.start, panel.seating.end, false)
                    .unwrap_or_default();
                match (names.first(), names.last()) {
                    (Some(first), Some(last))
                        if !names.iter().any(|n| n == NOT_AVAILABLE) =>
                    {
                        (format!("panel{}to{}", first, last), false)
                    }
                    _ => (format!("panel{}", panel.orientation.tag()), true),
                }
            }
            EntityKind::Lane(lane) => (format!("lane{}", lane.orientation.tag()), true),
            EntityKind::Group(group) => (format!("{}Area", group.table_type), false),
            EntityKind::Togo(_) => ("togoPanel".to_string(), false),
            EntityKind::Seat(seat) => (format!("seat{}", seat.seating_id), false),
        };
        let duplicates = self
            .scene()
            .others(entity.id())
            .filter(|o| o.name.starts_with(&name))
            .count();
        if duplicates == 0 && include_one {
            name.push_str(NUMBER_WORDS[0]);
        } else if duplicates > 0 {
            match NUMBER_WORDS.get(duplicates) {
                Some(word) => name.push_str(word),
                None => name.push_str(&duplicates.to_string()),
            }
        }
        Ok(name)
    }

    /// Keeps the changes, settles option counts and re-derives the size.
    pub fn commit_edit(&mut self) -> Result<EntityId> {
        let session = self.session.take().ok_or(Error::NoEditSession)?;
        let id = session.id;
        let Some(edited) = self.scene().get(id).cloned() else {
            return Err(Error::UnknownEntity { id: id.0 });
        };
        // Counts still reflect the snapshot; swap it back in so the
        // replacement moves the allocation from old to new.
        self.workspace.active_scene_mut().replace(session.snapshot);
        self.workspace.replace(edited);
        info!("Committed edit of {}", id);
        Ok(id)
    }

    /// Restores the snapshot taken when the session began.
    pub fn cancel_edit(&mut self) -> Result<()> {
        let session = self.session.take().ok_or(Error::NoEditSession)?;
        let id = session.id;
        let options = self.workspace.options().clone();
        let seating_len = self.workspace.seating().len();
        let scene = self.workspace.active_scene_mut();
        scene.replace(session.snapshot);
        if let Some(entity) = scene.get_mut(id) {
            entity.relayout(&options, seating_len);
        }
        info!("Cancelled edit of {}", id);
        Ok(())
    }

    /// Deletes the entity under edit and closes the session.
    pub fn delete_edited(&mut self) -> Result<EntityId> {
        let session = self.session.take().ok_or(Error::NoEditSession)?;
        let id = session.id;
        // Removal releases the counts recorded for the snapshot.
        self.workspace.active_scene_mut().replace(session.into_snapshot());
        self.workspace.remove(id);
        self.selection.remove(id);
        Ok(id)
    }
}
