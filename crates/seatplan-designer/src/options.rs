//! Table type registry.
//!
//! Each table type carries the button size used to lay out panels, the border
//! colour, the names of the constants emitted in the Java layout, and the
//! number of seats of that type currently placed in the register scene.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use seatplan_core::InputError;
use seatplan_settings::{TableDimensions, TableTypeSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    Table,
    Counter,
    Bar,
    Togo,
}

impl TableType {
    pub const ALL: [TableType; 4] = [
        TableType::Table,
        TableType::Counter,
        TableType::Bar,
        TableType::Togo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableType::Table => "table",
            TableType::Counter => "counter",
            TableType::Bar => "bar",
            TableType::Togo => "togo",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(TableType::Table),
            "counter" => Ok(TableType::Counter),
            "bar" => Ok(TableType::Bar),
            "togo" => Ok(TableType::Togo),
            _ => Err(InputError::WrongKind {
                operation: "table type".to_string(),
                kind: s.to_string(),
            }),
        }
    }
}

/// Settings and live allocation count for one table type.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub width_constant: &'static str,
    pub height_constant: &'static str,
    /// Seats of this type placed in the register scene.
    pub count: u32,
}

impl TableOptions {
    fn new(dims: &TableDimensions, width_constant: &'static str, height_constant: &'static str) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            color: dims.color.clone(),
            width_constant,
            height_constant,
            count: 0,
        }
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub table: TableOptions,
    pub counter: TableOptions,
    pub bar: TableOptions,
    pub togo: TableOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_settings(&TableTypeSettings::default())
    }
}

impl Options {
    pub fn from_settings(settings: &TableTypeSettings) -> Self {
        Self {
            table: TableOptions::new(
                &settings.table,
                "TABLE_BUTTON_WIDTH",
                "TABLE_BUTTON_HEIGHT",
            ),
            counter: TableOptions::new(
                &settings.counter,
                "COUNTER_BUTTON_WIDTH",
                "COUNTER_BUTTON_HEIGHT",
            ),
            bar: TableOptions::new(&settings.bar, "BAR_BUTTON_WIDTH", "BAR_BUTTON_HEIGHT"),
            togo: TableOptions::new(&settings.togo, "TOGO_BUTTON_WIDTH", "TOGO_BUTTON_HEIGHT"),
        }
    }

    pub fn get(&self, table_type: TableType) -> &TableOptions {
        match table_type {
            TableType::Table => &self.table,
            TableType::Counter => &self.counter,
            TableType::Bar => &self.bar,
            TableType::Togo => &self.togo,
        }
    }

    pub fn get_mut(&mut self, table_type: TableType) -> &mut TableOptions {
        match table_type {
            TableType::Table => &mut self.table,
            TableType::Counter => &mut self.counter,
            TableType::Bar => &mut self.bar,
            TableType::Togo => &mut self.togo,
        }
    }

    pub fn dimensions(&self, table_type: TableType) -> (f64, f64) {
        self.get(table_type).dimensions()
    }

    /// Seating ids claimed by tables, counters and bars. The ids after these
    /// are shown in the to-go block.
    pub fn allocated(&self) -> u32 {
        self.table
            .count
            .saturating_add(self.counter.count)
            .saturating_add(self.bar.count)
    }

    pub(crate) fn add_count(&mut self, table_type: TableType, n: u32) {
        let opts = self.get_mut(table_type);
        opts.count = opts.count.saturating_add(n);
    }

    pub(crate) fn remove_count(&mut self, table_type: TableType, n: u32) {
        let opts = self.get_mut(table_type);
        opts.count = opts.count.saturating_sub(n);
    }

    /// Replaces sizes and colours, keeping the live counts.
    pub(crate) fn apply_settings(&mut self, settings: &TableTypeSettings) {
        let mut fresh = Self::from_settings(settings);
        for t in TableType::ALL {
            fresh.get_mut(t).count = self.get(t).count;
        }
        *self = fresh;
    }
}

/// Splits a `#rrggbb` colour into its components.
pub fn rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
