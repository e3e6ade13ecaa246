//! Dashboard model: table rows plus what the page needs to filter, sort, and chart them.

use crate::chart::ChartStyle;
use crate::series::series_keys;
use crate::table::{Column, NumericRadix, Row};
use serde::Serialize;
use std::collections::BTreeSet;

/// Knobs that differ between dashboard variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Columns that get a text filter input, in input order.
    pub filter_columns: Vec<Column>,
    /// Radix for sorting numeric columns.
    pub radix: NumericRadix,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            filter_columns: vec![Column::TypeName, Column::AllocatedIn],
            radix: NumericRadix::Decimal,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub index: usize,
    pub title: &'static str,
    pub numeric: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterInputView {
    pub column: usize,
    pub id: String,
    pub placeholder: String,
    /// Distinct non-empty values of the column, offered as completions.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub rows: usize,
    pub snapshots: usize,
    pub types: usize,
    pub series: usize,
}

/// Series are not embedded: the page extracts them from `rows` on click, in
/// the table's current order.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub columns: Vec<ColumnView>,
    pub filters: Vec<FilterInputView>,
    pub radix: u32,
    pub chart_style: ChartStyle,
    pub rows: Vec<Row>,
    pub totals: TotalsView,
}

pub fn build_dashboard_data(rows: &[Row], config: &DashboardConfig) -> DashboardData {
    let columns = Column::ALL
        .iter()
        .map(|c| ColumnView {
            index: c.index(),
            title: c.title(),
            numeric: c.is_numeric(),
        })
        .collect();

    let filters = config
        .filter_columns
        .iter()
        .map(|c| FilterInputView {
            column: c.index(),
            id: format!("filter-{}", c.index()),
            placeholder: format!("Filter by {}...", c.title().to_lowercase()),
            suggestions: distinct_values(rows, *c),
        })
        .collect();

    let snapshots: BTreeSet<&str> = rows.iter().map(|r| r.cell(Column::Snapshot)).collect();
    let types: BTreeSet<&str> = rows.iter().map(|r| r.type_name()).collect();

    DashboardData {
        columns,
        filters,
        radix: config.radix.base(),
        chart_style: ChartStyle::default(),
        totals: TotalsView {
            rows: rows.len(),
            snapshots: snapshots.len(),
            types: types.len(),
            series: series_keys(rows).len(),
        },
        rows: rows.to_vec(),
    }
}

fn distinct_values(rows: &[Row], column: Column) -> Vec<String> {
    rows.iter()
        .map(|r| r.cell(column))
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: [&str; 7]) -> Row {
        Row::from_cells(cells.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn builds_columns_filters_and_totals() {
        let rows = vec![
            row(["0", "Foo", "8", "8", "5", "5", "alloc_foo"]),
            row(["1", "Foo", "8", "8", "9", "9", "alloc_foo"]),
            row(["1", "Bar", "8", "8", "2", "3", "alloc_bar"]),
        ];
        let data = build_dashboard_data(&rows, &DashboardConfig::default());

        assert_eq!(data.columns.len(), 7);
        assert!(data.columns[0].numeric);
        assert!(!data.columns[1].numeric);

        let filter_cols: Vec<usize> = data.filters.iter().map(|f| f.column).collect();
        assert_eq!(filter_cols, vec![1, 6]);
        assert_eq!(data.filters[0].placeholder, "Filter by type name...");

        assert_eq!(data.radix, 10);
        assert_eq!(data.chart_style.y_axis_label, "Allocations");
        assert_eq!(data.totals.rows, 3);
        assert_eq!(data.totals.snapshots, 2);
        assert_eq!(data.totals.types, 2);
        assert_eq!(data.totals.series, 2);
    }

    #[test]
    fn filter_inputs_suggest_distinct_column_values() {
        let rows = vec![
            row(["0", "Foo", "8", "8", "5", "5", "make_foo"]),
            row(["1", "Foo", "8", "16", "9", "9", ""]),
            row(["1", "Bar", "4", "4", "2", "3", "make_bar"]),
        ];
        let data = build_dashboard_data(&rows, &DashboardConfig::default());
        assert_eq!(data.filters[0].suggestions, vec!["Bar", "Foo"]);
        assert_eq!(data.filters[1].suggestions, vec!["make_bar", "make_foo"]);
    }

    #[test]
    fn hex_variant_reports_base_16() {
        let config = DashboardConfig {
            radix: NumericRadix::Hex,
            ..DashboardConfig::default()
        };
        let data = build_dashboard_data(&[], &config);
        assert_eq!(data.radix, 16);
        assert_eq!(data.totals.series, 0);
    }
}
