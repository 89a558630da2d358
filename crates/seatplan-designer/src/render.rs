//! Display list for the layout canvas.
//!
//! [`build_frame`] turns the editor state into plain drawing instructions:
//! one item per entity with its seat buttons and labels, alignment guides
//! for the selection, the marquee and the quick-seat preview. The host
//! paints the frame; nothing here touches a drawing surface.

use seatplan_core::math::{self, Interval};
use seatplan_settings::SeatShape;

use crate::engine::{aligned_guides, almost_aligned, check_for_overlaps, get_nearest, Bounds};
use crate::interaction::Editor;
use crate::model::{Edge, Entity, EntityKind, Rect, Togo};
use crate::options::Options;
use crate::seating::TableSeating;
use crate::workspace::Mode;

const LANE_FILL: &str = "#5C8A8A";
const SEAT_FILL: &str = "white";
const SEAT_STROKE: &str = "black";
const SELECTED_STROKE: &str = "green";
const INVALID_STROKE: &str = "red";
const SELECTION_BOX_STROKE: &str = "darkgrey";
const DEFAULT_FILL: &str = "lightgrey";
const ACTIVE_FILL: &str = "darkgrey";

/// Distance between grid lines that are drawn darker.
const MAJOR_GRID: f64 = 100.0;

/// How an entity's outline is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub fill: String,
    /// `None` leaves the outline transparent.
    pub stroke: Option<&'static str>,
    pub line_width: f64,
    pub show_name: bool,
    /// The entity is being dragged; its name is drawn solid instead of faded.
    pub active: bool,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL.to_string(),
            stroke: None,
            line_width: 1.0,
            show_name: true,
            active: false,
        }
    }
}

/// One button inside a panel, group or to-go block.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatButton {
    pub rect: Rect,
    pub label: String,
}

/// Kind-specific content drawn on top of an entity's rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Buttons(Vec<SeatButton>),
    Lane { text: String, vertical: bool },
    Group { title: String, buttons: Vec<SeatButton> },
    Seat { shape: SeatShape, label: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub name: String,
    pub rect: Rect,
    pub style: DrawStyle,
    pub content: Content,
}

/// Lines drawn around the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Guide {
    /// From an edge to the closest neighbour beyond it.
    Nearest {
        start: (f64, f64),
        end: (f64, f64),
        distance: f64,
        /// Rounded distance and where to print it; absent for short gaps.
        label: Option<(i64, (f64, f64))>,
    },
    /// Solid line along an edge shared with other entities.
    Aligned { start: (f64, f64), end: (f64, f64) },
    /// Dashed line across the canvas at an edge that is nearly shared.
    NearAligned { start: (f64, f64), end: (f64, f64) },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub vertical: bool,
    pub position: f64,
    pub major: bool,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: Mode,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    pub grid: Vec<GridLine>,
    /// Screen area of the register terminal, drawn dashed in register mode.
    pub pos_bounds: Option<Rect>,
    pub items: Vec<DrawItem>,
    pub guides: Vec<Guide>,
    /// Bounding box of a multi-selection.
    pub selection_box: Option<Rect>,
    pub selection_box_stroke: &'static str,
    pub marquee: Option<Rect>,
    pub preview: Option<Rect>,
}

/// Builds the display list for the active scene.
pub fn build_frame(editor: &Editor) -> Frame {
    let config = editor.config();
    let scene = editor.scene();
    let selection = editor.selection();
    let workspace = editor.workspace();
    let bounds = editor.bounds();

    let items = scene
        .iter()
        .map(|entity| {
            let mut style = base_style(entity, workspace.options());
            style.active = selection.is_dragging(entity.id());
            if style.active && !matches!(entity.kind, EntityKind::Seat(_)) {
                style.fill = ACTIVE_FILL.to_string();
            }
            if selection.is_selected(entity.id()) {
                style.stroke = Some(SELECTED_STROKE);
            }
            if !bounds.contains(&entity.rect)
                || check_for_overlaps(scene.entities(), Some(entity.id()))
            {
                style.stroke = Some(INVALID_STROKE);
                style.line_width = 2.0;
            }
            DrawItem {
                name: entity.name.clone(),
                rect: entity.rect,
                style,
                content: content(entity, workspace.options(), workspace.seating()),
            }
        })
        .collect();

    let selected: Vec<&Entity> = scene
        .iter()
        .filter(|e| selection.is_selected(e.id()))
        .collect();
    let focus = match selected.as_slice() {
        [] => None,
        [only] => Some(only.rect),
        many => Rect::bounding(many.iter().map(|e| &e.rect)),
    };
    let mut guides = Vec::new();
    if let Some(rect) = focus {
        let others = scene.iter().filter(|e| !selection.is_selected(e.id()));
        guides = selection_guides(
            &rect,
            others,
            bounds,
            config.snap.guide_threshold,
            config.snap.label_threshold,
        );
    }

    let preview = if editor.modifiers().shift {
        editor.quick_seat_preview()
    } else {
        None
    };

    Frame {
        mode: editor.mode(),
        scale: editor.viewport().scale(editor.mode()),
        width: bounds.width,
        height: bounds.height,
        grid: grid_lines(bounds, config.snap.decagrid_step),
        pos_bounds: (editor.mode() == Mode::Register)
            .then(|| Rect::new(0.0, 0.0, config.canvas.pos_width, config.canvas.pos_height)),
        items,
        guides,
        selection_box: if selected.len() > 1 { focus } else { None },
        selection_box_stroke: SELECTION_BOX_STROKE,
        marquee: editor.state().marquee_rect(),
        preview,
    }
}

fn base_style(entity: &Entity, options: &Options) -> DrawStyle {
    match &entity.kind {
        EntityKind::Panel(p) => DrawStyle {
            fill: options.get(p.table_type).color.clone(),
            ..DrawStyle::default()
        },
        EntityKind::Group(g) => DrawStyle {
            fill: options.get(g.table_type).color.clone(),
            ..DrawStyle::default()
        },
        EntityKind::Togo(t) => DrawStyle {
            fill: options.get(t.table_type).color.clone(),
            ..DrawStyle::default()
        },
        EntityKind::Lane(_) => DrawStyle {
            fill: LANE_FILL.to_string(),
            ..DrawStyle::default()
        },
        EntityKind::Seat(_) => DrawStyle {
            fill: SEAT_FILL.to_string(),
            stroke: Some(SEAT_STROKE),
            show_name: false,
            ..DrawStyle::default()
        },
    }
}

fn buttons(rects: Vec<Rect>, labels: Option<Vec<String>>) -> Vec<SeatButton> {
    let mut labels = labels.unwrap_or_default().into_iter();
    rects
        .into_iter()
        .map(|rect| SeatButton {
            rect,
            label: labels.next().unwrap_or_default(),
        })
        .collect()
}

fn content(entity: &Entity, options: &Options, seating: &TableSeating) -> Content {
    let rect = &entity.rect;
    match &entity.kind {
        EntityKind::Panel(panel) => {
            let dims = options.dimensions(panel.table_type);
            Content::Buttons(buttons(
                panel.seat_rects(rect, dims),
                seating.get_range(panel.seating.start, panel.seating.end, true),
            ))
        }
        EntityKind::Group(group) => {
            let dims = options.dimensions(group.table_type);
            let seat_buttons = group
                .panels()
                .iter()
                .zip(group.panel_rects(rect, dims))
                .flat_map(|(panel, panel_rect)| {
                    buttons(
                        panel.seat_rects(&panel_rect, dims),
                        seating.get_range(panel.seating.start, panel.seating.end, true),
                    )
                })
                .collect();
            Content::Group {
                title: group.title.clone(),
                buttons: seat_buttons,
            }
        }
        EntityKind::Togo(togo) => {
            let allocated = options.allocated();
            let slots = Togo::slot_count(seating.len(), allocated);
            let first = i64::from(allocated) + 1;
            Content::Buttons(buttons(
                togo.slot_rects(rect, options.dimensions(togo.table_type), slots),
                seating.get_range(first, first + slots as i64 - 1, false),
            ))
        }
        EntityKind::Lane(lane) => Content::Lane {
            text: lane.text.clone(),
            vertical: lane.is_vertical(),
        },
        EntityKind::Seat(seat) => Content::Seat {
            shape: seat.shape,
            label: seating.get(seat.seating_id, true),
        },
    }
}

/// A point on the line crossing `edge` at `across`, `along` units down that line.
fn axial_point(edge: Edge, across: f64, along: f64) -> (f64, f64) {
    if edge.is_horizontal() {
        (across, along)
    } else {
        (along, across)
    }
}

/// A point on the line running along `edge` at `coordinate`.
fn along_edge(edge: Edge, coordinate: f64, t: f64) -> (f64, f64) {
    if edge.is_horizontal() {
        (t, coordinate)
    } else {
        (coordinate, t)
    }
}

/// Nearest connectors, aligned lines and near-aligned lines for `rect`.
pub fn selection_guides<'a>(
    rect: &Rect,
    others: impl Iterator<Item = &'a Entity> + Clone,
    bounds: Bounds,
    guide_threshold: f64,
    label_threshold: f64,
) -> Vec<Guide> {
    let mut guides = Vec::new();

    for guide in aligned_guides(rect, others.clone()) {
        guides.push(Guide::Aligned {
            start: along_edge(guide.edge, guide.coordinate, guide.span.min),
            end: along_edge(guide.edge, guide.coordinate, guide.span.max),
        });
    }

    for (edge, neighbor) in get_nearest(rect, others.clone()).iter() {
        let overlap = math::intersection(
            rect.perpendicular_range(edge),
            neighbor.rect.perpendicular_range(edge),
        );
        let across = overlap.midpoint();
        let start = rect.edge(edge);
        let end = neighbor.rect.edge(edge.opposite());
        let label = (neighbor.distance >= label_threshold).then(|| {
            let at = math::average(&[start, end]).min(start + 100.0);
            (neighbor.distance.round() as i64, axial_point(edge, across, at))
        });
        guides.push(Guide::Nearest {
            start: axial_point(edge, across, start),
            end: axial_point(edge, across, end),
            distance: neighbor.distance,
            label,
        });
    }

    let length = bounds.width.max(bounds.height);
    let full = Interval::new(0.0, length);
    for near in almost_aligned(rect, others, guide_threshold) {
        guides.push(Guide::NearAligned {
            start: along_edge(near.edge, near.coordinate, full.min),
            end: along_edge(near.edge, near.coordinate, full.max),
        });
    }
    guides
}

fn grid_lines(bounds: Bounds, step: f64) -> Vec<GridLine> {
    if step <= 0.0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for (vertical, limit) in [(true, bounds.width), (false, bounds.height)] {
        let mut i = 0u32;
        loop {
            let position = f64::from(i) * step;
            if position >= limit {
                break;
            }
            lines.push(GridLine {
                vertical,
                position,
                major: position % MAJOR_GRID == 0.0,
            });
            i += 1;
        }
    }
    lines
}
