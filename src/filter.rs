//! Multi-column substring filter over table rows.

use crate::table::{Column, Row, TableError};

/// Ordered (column, needle) constraints; a row passes when every needle is a
/// substring of its column's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    constraints: Vec<(Column, String)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's two inputs: type filter on column 1, function filter on column 6.
    pub fn dashboard(type_text: &str, function_text: &str) -> Self {
        Self::new()
            .with(Column::TypeName, type_text)
            .with(Column::AllocatedIn, function_text)
    }

    pub fn with(mut self, column: Column, needle: impl Into<String>) -> Self {
        self.constraints.push((column, needle.into()));
        self
    }

    /// Add a constraint on a raw column index; indices outside the table fail.
    pub fn with_index(self, index: usize, needle: impl Into<String>) -> Result<Self, TableError> {
        Ok(self.with(Column::from_index(index)?, needle))
    }

    #[cfg(test)]
    pub fn constraints(&self) -> &[(Column, String)] {
        &self.constraints
    }
}

/// Case-sensitive AND of every constraint; an empty spec accepts every row.
pub fn matches(row: &Row, spec: &FilterSpec) -> bool {
    spec.constraints
        .iter()
        .all(|(column, needle)| row.cell(*column).contains(needle.as_str()))
}

/// Rows passing `spec`, in their original order.
pub fn visible_rows<'a>(rows: &'a [Row], spec: &FilterSpec) -> Vec<&'a Row> {
    let visible: Vec<&Row> = rows.iter().filter(|r| matches(r, spec)).collect();
    log::debug!(
        "filter with {} constraint(s): {} of {} rows visible",
        spec.constraints.len(),
        visible.len(),
        rows.len()
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: [&str; 7]) -> Row {
        Row::from_cells(cells.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            row(["0", "Foo", "f1", "8", "5", "5", "alloc_foo"]),
            row(["1", "Foo", "f1", "8", "9", "9", "alloc_foo"]),
            row(["1", "Bar", "f2", "8", "2", "3", "alloc_bar"]),
        ]
    }

    fn snapshots(rows: &[&Row]) -> Vec<String> {
        rows.iter()
            .map(|r| format!("{}:{}", r.cell(Column::Snapshot), r.type_name()))
            .collect()
    }

    #[test]
    fn empty_spec_matches_everything() {
        let spec = FilterSpec::new();
        for r in sample_rows() {
            assert!(matches(&r, &spec));
        }
    }

    #[test]
    fn empty_needle_matches_everything() {
        let spec = FilterSpec::dashboard("", "");
        assert_eq!(visible_rows(&sample_rows(), &spec).len(), 3);
    }

    #[test]
    fn type_filter_keeps_matching_rows() {
        let rows = sample_rows();
        let spec = FilterSpec::new().with(Column::TypeName, "Foo");
        assert_eq!(snapshots(&visible_rows(&rows, &spec)), vec!["0:Foo", "1:Foo"]);
    }

    #[test]
    fn constraints_combine_with_and() {
        let rows = sample_rows();
        let spec = FilterSpec::dashboard("Foo", "zzz");
        assert!(visible_rows(&rows, &spec).is_empty());
    }

    #[test]
    fn matching_is_case_sensitive_substring() {
        let rows = sample_rows();
        assert_eq!(
            visible_rows(&rows, &FilterSpec::dashboard("a", "bar")).len(),
            1
        );
        assert!(visible_rows(&rows, &FilterSpec::dashboard("foo", "")).is_empty());
    }

    #[test]
    fn row_matches_its_own_cells() {
        for r in sample_rows() {
            for column in Column::ALL {
                let spec = FilterSpec::new().with(column, r.cell(column));
                assert!(matches(&r, &spec), "{:?} on {}", r, column);
            }
        }
    }

    #[test]
    fn adding_constraints_never_widens_the_result() {
        let rows = sample_rows();
        let base = FilterSpec::new().with(Column::AllocationSize, "8");
        let narrowed = base.clone().with(Column::AllocatedIn, "foo");
        for r in &rows {
            if matches(r, &narrowed) {
                assert!(matches(r, &base));
            }
        }
        assert_eq!(visible_rows(&rows, &base).len(), 3);
        assert_eq!(visible_rows(&rows, &narrowed).len(), 2);
    }

    #[test]
    fn order_of_constraints_does_not_matter() {
        let rows = sample_rows();
        let a = FilterSpec::new()
            .with(Column::TypeName, "Foo")
            .with(Column::Current, "9");
        let b = FilterSpec::new()
            .with(Column::Current, "9")
            .with(Column::TypeName, "Foo");
        assert_eq!(visible_rows(&rows, &a), visible_rows(&rows, &b));
    }

    #[test]
    fn raw_index_outside_table_fails_fast() {
        let err = FilterSpec::new().with_index(9, "x").unwrap_err();
        assert_eq!(err, TableError::NoSuchColumn(9));

        let spec = FilterSpec::new().with_index(6, "bar").unwrap();
        assert_eq!(spec.constraints(), &[(Column::AllocatedIn, "bar".to_string())]);
    }
}
