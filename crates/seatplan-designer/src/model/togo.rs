use serde::{Deserialize, Serialize};

use super::Rect;
use crate::options::TableType;

/// A block of anonymous to-go slots.
///
/// The block shows every seating id not claimed by tables, counters and
/// bars, and at least twenty of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Togo {
    pub per_row: u32,
    pub table_type: TableType,
}

impl Togo {
    pub const H_SPACING: f64 = 5.0;
    pub const V_SPACING: f64 = 5.0;
    pub const MARGIN: f64 = 10.0;
    pub const EXPECTED_COUNT: usize = 20;

    pub fn new(per_row: u32) -> Self {
        Self {
            per_row,
            table_type: TableType::Togo,
        }
    }

    /// Number of slots for `seating_len` rows when `allocated` are taken.
    pub fn slot_count(seating_len: usize, allocated: u32) -> usize {
        let unused = seating_len.saturating_sub(allocated as usize);
        unused.max(Self::EXPECTED_COUNT)
    }

    pub fn rows(&self, slots: usize) -> usize {
        let per_row = self.per_row.max(1) as usize;
        slots.div_ceil(per_row)
    }

    pub fn size(&self, (width, height): (f64, f64), slots: usize) -> (f64, f64) {
        let per_row = f64::from(self.per_row);
        let rows = self.rows(slots) as f64;
        let w = per_row * width + (per_row - 1.0) * Self::H_SPACING + Self::MARGIN * 2.0;
        let h = rows * height + (rows - 1.0) * Self::V_SPACING + Self::MARGIN * 2.0;
        (w, h)
    }

    pub fn slot_rects(&self, rect: &Rect, (width, height): (f64, f64), slots: usize) -> Vec<Rect> {
        let per_row = self.per_row.max(1) as usize;
        (0..slots)
            .map(|i| {
                let col = (i % per_row) as f64;
                let row = (i / per_row) as f64;
                Rect::new(
                    rect.left() + col * (width + Self::H_SPACING) + Self::MARGIN,
                    rect.top() + row * (height + Self::V_SPACING) + Self::MARGIN,
                    width,
                    height,
                )
            })
            .collect()
    }
}
