//! Seatplan Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{
    CanvasSettings, Config, QuickSeatSettings, SeatShape, SnapSettings, TableDimensions,
    TableTypeSettings, ViewSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
