use serde::{Deserialize, Serialize};

use super::{Margins, Orientation, Rect, SeatRange};
use crate::options::TableType;

/// A single line of seat buttons of one table type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub count: u32,
    pub table_type: TableType,
    pub orientation: Orientation,
    pub margins: Margins,
    /// Seating ids labelling the buttons, first to last.
    pub seating: SeatRange,
}

impl Panel {
    pub const TABLE_SPACING: f64 = 10.0;
    pub const DEFAULT_MARGIN: f64 = 3.0;

    pub fn new(count: u32, table_type: TableType, orientation: Orientation) -> Self {
        Self {
            count,
            table_type,
            orientation,
            margins: Margins::default(),
            seating: SeatRange::first(count),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Outer size for buttons of `(width, height)`.
    pub fn size(&self, (width, height): (f64, f64)) -> (f64, f64) {
        let mut w = self.margins.left + width + self.margins.right;
        let mut h = self.margins.top + height + self.margins.bottom;
        let extra = f64::from(self.count.saturating_sub(1));
        match self.orientation {
            Orientation::Vertical => h += (height + Self::TABLE_SPACING) * extra,
            Orientation::Horizontal => w += (width + Self::TABLE_SPACING) * extra,
        }
        (w, h)
    }

    /// Button rectangles for a panel placed at `rect`.
    pub fn seat_rects(&self, rect: &Rect, (width, height): (f64, f64)) -> Vec<Rect> {
        let mut button = Rect::new(
            rect.left() + self.margins.left,
            rect.top() + self.margins.top,
            width,
            height,
        );
        let mut out = Vec::with_capacity(self.count as usize);
        for _ in 0..self.count {
            out.push(button);
            match self.orientation {
                Orientation::Vertical => button.y += Self::TABLE_SPACING + height,
                Orientation::Horizontal => button.x += Self::TABLE_SPACING + width,
            }
        }
        out
    }
}
