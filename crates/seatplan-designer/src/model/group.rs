use serde::{Deserialize, Serialize};

use super::{Margins, Orientation, Panel, Rect, SeatRange};
use crate::options::TableType;

/// Which side of a group has its panel pushed down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    #[default]
    Left,
    Right,
}

/// A titled row of vertical panels, as the register draws counter areas.
///
/// The group owns its panels; they are rebuilt from `panel_counts` and carry
/// no margins. The group's seating range is split across them in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub title: String,
    pub table_type: TableType,
    /// Requested inner height; the group never gets shorter than its longest panel.
    pub default_height: f64,
    pub indent: Indent,
    pub seating: SeatRange,
    panel_counts: Vec<u32>,
    panels: Vec<Panel>,
}

impl Group {
    pub const MARGIN: f64 = 3.0;
    /// Height of the 12pt title.
    pub const TEXT_HEIGHT: f64 = 12.0 * 4.0 / 3.0;
    pub const EXTRA_HEIGHT: f64 = Self::MARGIN * 2.0 + Self::TEXT_HEIGHT;
    pub const DEFAULT_HEIGHT: f64 = 100.0;
    pub const DEFAULT_TITLE: &'static str = "Sushi bar";

    pub fn new(
        title: impl Into<String>,
        table_type: TableType,
        panel_counts: Vec<u32>,
        default_height: f64,
        indent: Indent,
    ) -> Self {
        let total = saturating_total(&panel_counts);
        let panels = panel_counts
            .iter()
            .map(|&n| {
                Panel::new(n, table_type, Orientation::Vertical).with_margins(Margins::zero())
            })
            .collect();
        let mut group = Self {
            title: title.into(),
            table_type,
            default_height,
            indent,
            seating: SeatRange::first(total),
            panel_counts,
            panels,
        };
        group.sync_panels();
        group
    }

    pub fn panel_counts(&self) -> &[u32] {
        &self.panel_counts
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn total_seats(&self) -> u32 {
        saturating_total(&self.panel_counts)
    }

    pub fn width(&self, (width, _): (f64, f64)) -> f64 {
        width * self.panel_counts.len() as f64 + Self::MARGIN * 2.0
    }

    /// Inner height needed by the longest panel.
    pub fn min_height(&self, (_, height): (f64, f64)) -> f64 {
        let longest = self.panel_counts.iter().copied().max().unwrap_or(0);
        f64::from(longest) * (height + Panel::TABLE_SPACING) - Panel::TABLE_SPACING
    }

    /// Outer height, title included.
    pub fn height(&self, dims: (f64, f64)) -> f64 {
        self.min_height(dims).max(self.default_height) + Self::EXTRA_HEIGHT
    }

    pub fn set_height(&mut self, height: f64) {
        self.default_height = height;
    }

    /// Splits `range` into one consecutive sub-range per panel.
    ///
    /// ```
    /// use seatplan_designer::model::{Group, Indent, SeatRange};
    /// use seatplan_designer::TableType;
    ///
    /// let group = Group::new("Bar", TableType::Bar, vec![3, 2], 100.0, Indent::Left);
    /// assert_eq!(
    ///     group.split_seating(SeatRange::new(1, 5)),
    ///     vec![SeatRange::new(1, 3), SeatRange::new(4, 5)]
    /// );
    /// ```
    pub fn split_seating(&self, range: SeatRange) -> Vec<SeatRange> {
        let mut start = range.start;
        self.panel_counts
            .iter()
            .map(|&n| {
                let n = i64::from(n);
                let sub = SeatRange::new(start, start.saturating_add(n - 1));
                start = start.saturating_add(n);
                sub
            })
            .collect()
    }

    /// Pushes the group's seating range down to its panels.
    pub fn sync_panels(&mut self) {
        let ranges = self.split_seating(self.seating);
        for (panel, range) in self.panels.iter_mut().zip(ranges) {
            panel.seating = range;
        }
    }

    /// Index of the panel that may be pushed down.
    pub fn indent_index(&self) -> usize {
        match self.indent {
            Indent::Left => 0,
            Indent::Right => self.panel_counts.len().saturating_sub(1),
        }
    }

    /// Vertical offset of panel `index` inside a group of outer height `h`.
    ///
    /// Only the indented panel moves, and only when the group is taller than
    /// its longest panel requires.
    pub fn panel_offset(&self, index: usize, h: f64, dims: (f64, f64)) -> f64 {
        let can_indent = h - Self::EXTRA_HEIGHT == self.default_height;
        match self.panels.get(index) {
            Some(panel) if can_indent && index == self.indent_index() => {
                let (_, panel_h) = panel.size(dims);
                h - (panel_h + Self::EXTRA_HEIGHT)
            }
            _ => 0.0,
        }
    }

    /// Rectangles of the child panels for a group placed at `rect`.
    pub fn panel_rects(&self, rect: &Rect, dims: (f64, f64)) -> Vec<Rect> {
        let (width, _) = dims;
        let h = rect.bottom() - rect.top();
        self.panels
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                let (pw, ph) = panel.size(dims);
                Rect::new(
                    rect.left() + width * i as f64 + Self::MARGIN,
                    rect.top() + Self::TEXT_HEIGHT + Self::MARGIN + self.panel_offset(i, h, dims),
                    pw,
                    ph,
                )
            })
            .collect()
    }
}

fn saturating_total(panel_counts: &[u32]) -> u32 {
    panel_counts.iter().fold(0u32, |total, &n| total.saturating_add(n))
}
