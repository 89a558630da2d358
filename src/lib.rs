//! # Seatplan
//!
//! Restaurant floor-plan layout editor. Tables, lanes, counter groups and
//! to-go blocks are placed on the register screen, and seats on the handheld
//! map. The layouts are then exported for the point-of-sale system.
//!
//! ## Architecture
//!
//! Seatplan is organized as a workspace with multiple crates:
//!
//! 1. **seatplan-core** - Error types and interval math
//! 2. **seatplan-settings** - Configuration files and validation
//! 3. **seatplan-designer** - Entity model, layout engine, editor, render and export
//! 4. **seatplan** - This crate: re-exports, logging setup and the demo binary

pub use seatplan_designer as designer;
pub use seatplan_designer::export;

pub use seatplan_core::{Error, InputError, Result};
pub use seatplan_designer::{
    build_frame, CreateRequest, Editor, EditorAction, Entity, EntityId, EntityKind, Frame, Key,
    Mode, Orientation, PointerEvent, Rect, TableSeating, TableType,
};
pub use seatplan_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so that exports written to stdout stay clean. The
/// level defaults to INFO and can be changed through `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
