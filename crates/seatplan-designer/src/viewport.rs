//! Viewport and coordinate transformation for canvas input.
//!
//! Converts pointer positions and movements from screen pixels into layout
//! units. Each mode has its own scale; the layout origin is the top-left
//! corner of the canvas in both spaces.

use std::fmt;

use seatplan_settings::ViewSettings;

use crate::workspace::Mode;

/// Per-mode scale and the last known pointer position.
#[derive(Debug, Clone)]
pub struct Viewport {
    register_scale: f64,
    handy_scale: f64,
    pointer: (f64, f64),
}

impl Viewport {
    /// Creates a viewport with the given register and handy scales.
    /// Non-positive scales fall back to 1.0.
    pub fn new(register_scale: f64, handy_scale: f64) -> Self {
        let valid = |s: f64| if s.is_finite() && s > 0.0 { s } else { 1.0 };
        Self {
            register_scale: valid(register_scale),
            handy_scale: valid(handy_scale),
            pointer: (0.0, 0.0),
        }
    }

    pub fn from_settings(settings: &ViewSettings) -> Self {
        Self::new(settings.register_scale, settings.handy_scale)
    }

    /// Scale used while `mode` is active.
    pub fn scale(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Register => self.register_scale,
            Mode::Handy => self.handy_scale,
        }
    }

    /// Sets the scale for `mode`. Non-positive or non-finite values are ignored.
    pub fn set_scale(&mut self, mode: Mode, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        match mode {
            Mode::Register => self.register_scale = scale,
            Mode::Handy => self.handy_scale = scale,
        }
    }

    /// Last pointer position in layout units.
    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    /// Converts a screen position to layout units.
    ///
    /// Formula:
    /// ```text
    /// world_x = pixel_x / scale
    /// world_y = pixel_y / scale
    /// ```
    pub fn screen_to_world(&self, mode: Mode, px: f64, py: f64) -> (f64, f64) {
        let scale = self.scale(mode);
        (px / scale, py / scale)
    }

    /// Converts a layout position to screen pixels.
    pub fn world_to_screen(&self, mode: Mode, x: f64, y: f64) -> (f64, f64) {
        let scale = self.scale(mode);
        (x * scale, y * scale)
    }

    /// Movement in layout units for a raw pointer movement in pixels.
    pub fn movement_delta(&self, mode: Mode, movement_x: f64, movement_y: f64) -> (f64, f64) {
        self.screen_to_world(mode, movement_x, movement_y)
    }

    /// Records the pointer from a screen position and returns it in layout units.
    pub fn update_pointer(&mut self, mode: Mode, px: f64, py: f64) -> (f64, f64) {
        self.pointer = self.screen_to_world(mode, px, py);
        self.pointer
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_settings(&ViewSettings::default())
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(register: {:.0}%, handy: {:.0}%, pointer: ({:.1}, {:.1}))",
            self.register_scale * 100.0,
            self.handy_scale * 100.0,
            self.pointer.0,
            self.pointer.1
        )
    }
}
