use crate::table::{Column, Row};
use serde::Serialize;
use std::cmp::Ordering;

/// Radix used when numeric columns are sorted as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NumericRadix {
    #[default]
    Decimal,
    Hex,
}

impl NumericRadix {
    pub fn base(self) -> u32 {
        match self {
            NumericRadix::Decimal => 10,
            NumericRadix::Hex => 16,
        }
    }

    pub fn from_base(base: u32) -> Option<Self> {
        match base {
            10 => Some(NumericRadix::Decimal),
            16 => Some(NumericRadix::Hex),
            _ => None,
        }
    }
}

/// Lenient integer parse of cell text.
///
/// Leading whitespace and a sign are accepted, then the longest run of digits
/// valid in `radix`. Trailing garbage is ignored. Text with no leading digit
/// yields `None`.
pub fn parse_int_prefix(text: &str, radix: NumericRadix) -> Option<i128> {
    let s = text.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let s = match radix {
        NumericRadix::Hex => s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s),
        NumericRadix::Decimal => s,
    };

    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix.base()))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = i128::from_str_radix(&s[..end], radix.base()).ok()?;
    Some(if negative { -value } else { value })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Stable sort of `rows` by one column.
///
/// Numeric columns compare as integers in `radix`; cells that do not parse
/// sort after every number regardless of order. Text columns compare as text.
pub fn sort_rows(rows: &mut [Row], column: Column, order: SortOrder, radix: NumericRadix) {
    if column.is_numeric() {
        let unparsable = rows
            .iter()
            .filter(|r| parse_int_prefix(r.cell(column), radix).is_none())
            .count();
        if unparsable > 0 {
            log::warn!(
                "{} cell(s) in column '{}' are not base-{} integers; sorting them last",
                unparsable,
                column,
                radix.base()
            );
        }
        rows.sort_by(|a, b| {
            let x = parse_int_prefix(a.cell(column), radix);
            let y = parse_int_prefix(b.cell(column), radix);
            match (x, y) {
                (Some(x), Some(y)) => directed(x.cmp(&y), order),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    } else {
        rows.sort_by(|a, b| directed(a.cell(column).cmp(b.cell(column)), order));
    }
}

fn directed(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    }
}
