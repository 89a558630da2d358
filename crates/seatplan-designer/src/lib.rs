//! # Seatplan Designer
//!
//! Layout engine for restaurant floor plans. It places table panels, lanes,
//! counter groups, to-go blocks and handheld seats on a fixed canvas. It also
//! keeps them from overlapping and exports what the point-of-sale system needs.
//!
//! ## Core Components
//!
//! - **Model**: entity rectangles and their kinds ([`model`])
//! - **Engine**: overlap, nearest-neighbour, alignment and snapping geometry
//! - **Workspace**: the register and handy scenes with the table-type counts
//! - **Editor**: pointer and keyboard handling, creation and edit sessions
//! - **Render**: a display list for the host to paint
//! - **Export**: Java layout, handheld XML and `table_seating` SQL
//!
//! ## Architecture
//!
//! ```text
//! Editor (pointer, keys, forms)
//!   ├── Workspace
//!   │     ├── Scene (register)
//!   │     ├── Scene (handy)
//!   │     ├── Options (table types, counts)
//!   │     └── TableSeating
//!   ├── SelectionManager
//!   └── Viewport
//!
//! render::build_frame(&Editor) -> Frame
//! export::{java_layout, seats_xml, seating_sql}
//! ```
//!
//! ## Usage
//!
//! ```
//! use seatplan_designer::{CreateRequest, Editor, Orientation, Margins, TableType};
//! use seatplan_settings::Config;
//!
//! let mut editor = Editor::new(Config::default());
//! let ids = editor
//!     .create(
//!         (10.0, 10.0),
//!         CreateRequest::Panel {
//!             count: 4,
//!             table_type: TableType::Table,
//!             orientation: Orientation::Horizontal,
//!             margins: Margins::default(),
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(ids.len(), 1);
//! assert_eq!(editor.workspace().options().table.count, 4);
//! ```

pub mod edit;
pub mod engine;
pub mod export;
pub mod interaction;
pub mod model;
pub mod options;
pub mod render;
pub mod scene;
pub mod seating;
pub mod selection_manager;
pub mod viewport;
pub mod workspace;

pub use edit::EditSession;
pub use engine::{Bounds, MoveOutcome, Nearest, Neighbor};
pub use interaction::{
    CreateRequest, Editor, EditorAction, InteractionState, Key, Modifiers, PointerEvent,
    MAX_COUNT,
};
pub use model::{
    Edge, Entity, EntityId, EntityKind, Group, Indent, Lane, Margins, Orientation, Panel, Rect,
    Seat, SeatRange, SeatShape, Togo,
};
pub use options::{Options, TableOptions, TableType};
pub use render::{build_frame, Frame};
pub use scene::Scene;
pub use seating::{SeatingRow, TableSeating};
pub use selection_manager::SelectionManager;
pub use viewport::Viewport;
pub use workspace::{Mode, Workspace};
