//! Conversions between worksheet value grids and records.
//!
//! Row 1 of every worksheet is the header; its cells name the record fields.

use serde_json::Value;

use crate::store::{with_row_number, Record, ROW_NUMBER_FIELD};

/// Text of a header cell.
pub(crate) fn cell_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn a `values` grid (header first) into records numbered by sheet row.
pub(crate) fn grid_to_records(grid: Vec<Vec<Value>>) -> Vec<Record> {
    let mut rows = grid.into_iter();
    let header: Vec<String> = match rows.next() {
        Some(h) => h.iter().map(cell_text).collect(),
        None => return Vec::new(),
    };

    rows.enumerate()
        .map(|(i, row)| {
            let mut record = Record::new();
            for (name, cell) in header.iter().zip(row) {
                if !name.is_empty() {
                    record.insert(name.clone(), cell);
                }
            }
            with_row_number(record, i as u64 + 2)
        })
        .collect()
}

/// Lay `record` out in header order. Absent fields become empty cells.
pub(crate) fn record_to_row(header: &[String], record: &Record) -> Vec<Value> {
    header
        .iter()
        .map(|name| match record.get(name) {
            None | Some(Value::Null) => Value::String(String::new()),
            Some(v @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => v.clone(),
            Some(nested) => Value::String(nested.to_string()),
        })
        .collect()
}

/// Fields of `record` that have no column in `header`.
pub(crate) fn unmapped_fields<'a>(header: &[String], record: &'a Record) -> Vec<&'a str> {
    record
        .keys()
        .filter(|k| k.as_str() != ROW_NUMBER_FIELD && !header.iter().any(|h| h == *k))
        .map(String::as_str)
        .collect()
}

/// Sheet row of an A1 range such as `users!A5:C5` or `'My Sheet'!A12`.
pub(crate) fn row_of_range(range: &str) -> Option<u64> {
    let cells = range.rsplit_once('!').map_or(range, |(_, cells)| cells);
    let first = cells.split(':').next()?;
    let digits = first.trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '$');
    digits.trim_start_matches('$').parse().ok()
}
