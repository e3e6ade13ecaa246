use serde::Serialize;
use std::fmt;

/// Columns of the allocation table, in display order.
///
/// The discriminant is the column's position in the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Column {
    Snapshot = 0,
    TypeName = 1,
    Alignment = 2,
    AllocationSize = 3,
    Current = 4,
    Peak = 5,
    AllocatedIn = 6,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Snapshot,
        Column::TypeName,
        Column::Alignment,
        Column::AllocationSize,
        Column::Current,
        Column::Peak,
        Column::AllocatedIn,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Checked conversion from a raw table index.
    pub fn from_index(index: usize) -> Result<Self, TableError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(TableError::NoSuchColumn(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Header text shown in the dashboard.
    pub fn title(self) -> &'static str {
        match self {
            Column::Snapshot => "Snapshot",
            Column::TypeName => "Type Name",
            Column::Alignment => "Alignment",
            Column::AllocationSize => "Size of allocation",
            Column::Current => "Currently allocated",
            Column::Peak => "Peak",
            Column::AllocatedIn => "Allocated in",
        }
    }

    /// Numeric columns sort as integers instead of as text.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::TypeName | Column::AllocatedIn)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("no column at index {0} (table has 7 columns)")]
    NoSuchColumn(usize),

    #[error("row has {0} cells, expected 7")]
    WrongWidth(usize),
}

/// One table record: the text of every cell, addressed by [`Column`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: [String; Column::COUNT],
}

impl Row {
    /// Build a row from cell texts in column order.
    pub fn from_cells(cells: Vec<String>) -> Result<Self, TableError> {
        let width = cells.len();
        let cells: [String; Column::COUNT] =
            cells.try_into().map_err(|_| TableError::WrongWidth(width))?;
        Ok(Self { cells })
    }

    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn type_name(&self) -> &str {
        self.cell(Column::TypeName)
    }

    pub fn allocation_size(&self) -> &str {
        self.cell(Column::AllocationSize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn column_index_round_trips() {
        for (i, col) in Column::ALL.iter().enumerate() {
            assert_eq!(col.index(), i);
            assert_eq!(Column::from_index(i), Ok(*col));
        }
    }

    #[test]
    fn out_of_range_column_is_rejected() {
        assert_eq!(Column::from_index(7), Err(TableError::NoSuchColumn(7)));
    }

    #[test]
    fn row_width_is_checked() {
        let err = Row::from_cells(cells(&["0", "Foo"])).unwrap_err();
        assert_eq!(err, TableError::WrongWidth(2));
    }

    #[test]
    fn cells_are_addressed_by_name() {
        let row = Row::from_cells(cells(&["3", "Foo", "8", "16", "2", "4", "main"])).unwrap();
        assert_eq!(row.type_name(), "Foo");
        assert_eq!(row.allocation_size(), "16");
        assert_eq!(row.cell(Column::AllocatedIn), "main");
    }
}
