use serde::{Deserialize, Serialize};

pub use seatplan_settings::SeatShape;

/// A single handy-mode seat mapped to one seating id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub shape: SeatShape,
    pub seating_id: i64,
}

impl Seat {
    /// Gap between seats replicated into a grid.
    pub const GRID_SPACING: f64 = 10.0;

    pub fn new(shape: SeatShape, seating_id: i64) -> Self {
        Self { shape, seating_id }
    }

    /// Shape code written to the handheld XML.
    pub fn shape_code(&self) -> u8 {
        match self.shape {
            SeatShape::Rectangle => 0,
            SeatShape::Ellipse => 1,
        }
    }
}

/// Seating ids for a `rows x cols` grid, filled row by row starting at
/// `start` and counting towards `end`.
pub fn grid_ids(rows: u32, cols: u32, start: i64, end: i64) -> Vec<Vec<i64>> {
    let step = if start < end { 1 } else { -1 };
    let cols = i64::from(cols);
    (0..i64::from(rows))
        .map(|r| (0..cols).map(|c| start + step * (r * cols + c)).collect())
        .collect()
}

/// The end id that keeps `start..end` the size of a `rows x cols` grid,
/// preserving the direction of `current_end`. `None` when the end does not
/// fit in an id.
pub fn linked_end(rows: u32, cols: u32, start: i64, current_end: i64) -> Option<i64> {
    let span = i64::from(rows) * i64::from(cols) - 1;
    if start < current_end || (start == current_end && span == 0) {
        start.checked_add(span)
    } else {
        start.checked_sub(span)
    }
}
