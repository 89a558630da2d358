//! The `table_seating` lookup: the ordered list of seating ids and the names
//! the point-of-sale system shows for them.

use serde::{Deserialize, Serialize};

/// Label used for ids with no `table_seating` row.
pub const NOT_AVAILABLE: &str = "[N/A]";

/// Rows added by [`TableSeating::add_togo_block`].
pub const TOGO_BLOCK_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingRow {
    pub id: i64,
    pub name: String,
    pub is_togo: bool,
}

/// Seating rows with ids `1..=len`. Ids are positional: removing the last
/// row is the only removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSeating {
    rows: Vec<SeatingRow>,
}

impl TableSeating {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `n` rows named `T1..Tn`.
    pub fn with_rows(n: usize) -> Self {
        let mut seating = Self::new();
        seating.add_rows(n);
        seating
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SeatingRow] {
        &self.rows
    }

    /// Appends a row named `T<id>` and returns its id.
    pub fn add_row(&mut self) -> i64 {
        let id = self.rows.len() as i64 + 1;
        self.rows.push(SeatingRow {
            id,
            name: format!("T{}", id),
            is_togo: false,
        });
        id
    }

    pub fn add_rows(&mut self, n: usize) {
        for _ in 0..n {
            self.add_row();
        }
    }

    pub fn remove_last_row(&mut self) -> Option<SeatingRow> {
        self.rows.pop()
    }

    /// Appends twenty to-go rows named `TOGO1..TOGO20`.
    pub fn add_togo_block(&mut self) {
        for i in 1..=TOGO_BLOCK_SIZE {
            let id = self.add_row();
            self.set_row(id, format!("TOGO{}", i), true);
        }
    }

    /// Renames a row. Returns `false` when the id is out of range.
    pub fn set_row(&mut self, id: i64, name: impl Into<String>, is_togo: bool) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.name = name.into();
                row.is_togo = is_togo;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.row(id).is_some()
    }

    fn row(&self, id: i64) -> Option<&SeatingRow> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.rows.get(index)
    }

    fn row_mut(&mut self, id: i64) -> Option<&mut SeatingRow> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.rows.get_mut(index)
    }

    /// Name of the row with `id`, or `[N/A]`. With `include_id` the id is
    /// appended as `" (id)"`.
    pub fn get(&self, id: i64, include_id: bool) -> String {
        let name = self.row(id).map_or(NOT_AVAILABLE, |row| row.name.as_str());
        if include_id {
            format!("{} ({})", name, id)
        } else {
            name.to_string()
        }
    }

    /// Names for `start..=end`. `None` when `start < 1`; empty when
    /// `end < start`.
    pub fn get_range(&self, start: i64, end: i64, include_id: bool) -> Option<Vec<String>> {
        if start < 1 {
            return None;
        }
        Some((start..=end).map(|id| self.get(id, include_id)).collect())
    }
}
