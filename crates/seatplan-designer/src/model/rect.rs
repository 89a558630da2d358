use serde::{Deserialize, Serialize};
use std::fmt;

use seatplan_core::math::{self, Interval};

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Canonical edge order used whenever all four edges are visited.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// `true` for top and bottom, whose coordinate is a y value.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned rectangle anchored at `(x, y)` with a signed extent.
///
/// A negative `w` or `h` extends the rectangle to the left or upwards, which
/// is what a marquee dragged up-left produces. The edge accessors always
/// return the normalized sides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle containing every input, `None` for no input.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        let mut iter = rects.into_iter();
        let first = iter.next()?;
        let (mut left, mut top, mut right, mut bottom) =
            (first.left(), first.top(), first.right(), first.bottom());
        for r in iter {
            left = left.min(r.left());
            top = top.min(r.top());
            right = right.max(r.right());
            bottom = bottom.max(r.bottom());
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    pub fn top(&self) -> f64 {
        self.y.min(self.y + self.h)
    }

    pub fn bottom(&self) -> f64 {
        self.y.max(self.y + self.h)
    }

    pub fn left(&self) -> f64 {
        self.x.min(self.x + self.w)
    }

    pub fn right(&self) -> f64 {
        self.x.max(self.x + self.w)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// `true` when the rectangle has no area along either axis.
    pub fn is_degenerate(&self) -> bool {
        self.w == 0.0 || self.h == 0.0
    }

    pub fn h_range(&self) -> Interval {
        Interval::new(self.left(), self.right())
    }

    pub fn v_range(&self) -> Interval {
        Interval::new(self.top(), self.bottom())
    }

    /// The range a connector leaving `edge` can start from: the horizontal
    /// range for top/bottom, the vertical range for left/right.
    pub fn perpendicular_range(&self, edge: Edge) -> Interval {
        if edge.is_horizontal() {
            self.h_range()
        } else {
            self.v_range()
        }
    }

    pub fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top(),
            Edge::Bottom => self.bottom(),
            Edge::Left => self.left(),
            Edge::Right => self.right(),
        }
    }

    /// Moves (never resizes) the rectangle so that `edge` lands on `value`.
    pub fn set_edge(&mut self, edge: Edge, value: f64) {
        let delta = value - self.edge(edge);
        if edge.is_horizontal() {
            self.y += delta;
        } else {
            self.x += delta;
        }
    }

    /// Strict interior test: points on the boundary do not hit.
    pub fn hit_test(&self, px: f64, py: f64) -> bool {
        (self.left() < px && px < self.right()) && (self.top() < py && py < self.bottom())
    }

    /// Both axis projections overlap. With `include_edges` unset, rectangles
    /// that only share a side do not overlap.
    pub fn is_overlapping(&self, other: &Rect, include_edges: bool) -> bool {
        math::is_overlapping(self.h_range(), other.h_range(), include_edges)
            && math::is_overlapping(self.v_range(), other.v_range(), include_edges)
    }

    /// `true` unless the rectangle lies fully inside `[0, max_w] x [0, max_h]`.
    pub fn is_out_of_bounds(&self, max_w: f64, max_h: f64) -> bool {
        self.left() < 0.0 || self.top() < 0.0 || self.right() > max_w || self.bottom() > max_h
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Shifts the rectangle the least amount that puts it inside the bounds.
    /// A rectangle larger than the bounds ends up flush with the top-left.
    pub fn clamp_into(&mut self, max_w: f64, max_h: f64) {
        let dx = math::clamp(-self.left(), 0.0, max_w - self.right());
        let dy = math::clamp(-self.top(), 0.0, max_h - self.bottom());
        self.translate(dx, dy);
    }

    /// Copy with a non-negative extent, anchored at the top-left corner.
    pub fn normalized(&self) -> Rect {
        Rect::new(
            self.left(),
            self.top(),
            self.right() - self.left(),
            self.bottom() - self.top(),
        )
    }
}
