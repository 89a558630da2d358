//! Entity model: the rectangles placed on a floor plan and the kinds of
//! content they carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

mod group;
mod lane;
mod panel;
mod rect;
mod seat;
mod togo;

pub use group::{Group, Indent};
pub use lane::Lane;
pub use panel::Panel;
pub use rect::{Edge, Rect};
pub use seat::{grid_ids, linked_end, Seat, SeatShape};
pub use togo::Togo;

use crate::options::{Options, TableType};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique entity identifier. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    pub fn next() -> Self {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Single-letter tag used in suggested names.
    pub fn tag(self) -> &'static str {
        match self {
            Orientation::Horizontal => "H",
            Orientation::Vertical => "V",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn uniform(m: f64) -> Self {
        Self {
            top: m,
            bottom: m,
            left: m,
            right: m,
        }
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(Panel::DEFAULT_MARGIN)
    }
}

/// Inclusive range of seating ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRange {
    pub start: i64,
    pub end: i64,
}

impl SeatRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// `[1, n]`
    pub fn first(n: u32) -> Self {
        Self::new(1, i64::from(n))
    }

    /// Distance between the ends; stays fixed while the range is edited.
    pub fn span(&self) -> i64 {
        self.end - self.start
    }
}

/// Content of an entity. Matches over this enum are exhaustive so that a new
/// kind cannot silently miss a layout, render or export rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Panel(Panel),
    Lane(Lane),
    Group(Group),
    Togo(Togo),
    Seat(Seat),
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Panel(_) => "panel",
            EntityKind::Lane(_) => "lane",
            EntityKind::Group(_) => "group",
            EntityKind::Togo(_) => "togo",
            EntityKind::Seat(_) => "seat",
        }
    }

    pub fn table_type(&self) -> Option<TableType> {
        match self {
            EntityKind::Panel(p) => Some(p.table_type),
            EntityKind::Group(g) => Some(g.table_type),
            EntityKind::Togo(t) => Some(t.table_type),
            EntityKind::Lane(_) | EntityKind::Seat(_) => None,
        }
    }

    /// Seats this entity claims from the option counts.
    pub fn allocated_seats(&self) -> Option<(TableType, u32)> {
        match self {
            EntityKind::Panel(p) => Some((p.table_type, p.count)),
            EntityKind::Group(g) => Some((g.table_type, g.total_seats())),
            EntityKind::Lane(_) | EntityKind::Togo(_) | EntityKind::Seat(_) => None,
        }
    }

    /// Seating range edited through the linked start/end fields.
    pub fn seating(&self) -> Option<SeatRange> {
        match self {
            EntityKind::Panel(p) => Some(p.seating),
            EntityKind::Group(g) => Some(g.seating),
            EntityKind::Lane(_) | EntityKind::Togo(_) | EntityKind::Seat(_) => None,
        }
    }
}

/// A named rectangle on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    pub name: String,
    pub rect: Rect,
    pub kind: EntityKind,
}

impl Entity {
    /// Creates an entity with a fresh id and the default name `table<id>`.
    pub fn new(rect: Rect, kind: EntityKind) -> Self {
        let id = EntityId::next();
        Self {
            id,
            name: format!("table{}", id),
            rect,
            kind,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_overlapping(&self, other: &Entity, include_edges: bool) -> bool {
        self.rect.is_overlapping(&other.rect, include_edges)
    }

    /// Recomputes the derived size from the current options. Lanes and
    /// seats keep their explicit size.
    pub fn relayout(&mut self, options: &Options, seating_len: usize) {
        match &mut self.kind {
            EntityKind::Panel(panel) => {
                let (w, h) = panel.size(options.dimensions(panel.table_type));
                self.rect.w = w;
                self.rect.h = h;
            }
            EntityKind::Group(group) => {
                let dims = options.dimensions(group.table_type);
                group.sync_panels();
                self.rect.w = group.width(dims);
                self.rect.h = group.height(dims);
            }
            EntityKind::Togo(togo) => {
                let slots = Togo::slot_count(seating_len, options.allocated());
                let (w, h) = togo.size(options.dimensions(togo.table_type), slots);
                self.rect.w = w;
                self.rect.h = h;
            }
            EntityKind::Lane(_) | EntityKind::Seat(_) => {}
        }
    }
}
