use serde::{Deserialize, Serialize};

use super::Orientation;

/// A labelled strip, such as a walkway or a conveyor lane. Its size is set
/// directly instead of being derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub text: String,
    pub orientation: Orientation,
}

impl Lane {
    pub const DEFAULT_TEXT: &'static str = "SUSHI LANE";

    pub fn new(text: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            text: text.into(),
            orientation,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Size offered by the creation form for an orientation.
    pub fn default_size(orientation: Orientation) -> (f64, f64) {
        match orientation {
            Orientation::Vertical => (20.0, 100.0),
            Orientation::Horizontal => (100.0, 20.0),
        }
    }
}
