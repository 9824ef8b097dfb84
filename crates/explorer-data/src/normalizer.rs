//! Turns a [`RawTable`] into a typed [`NormalizedTable`].
//!
//! Column names are canonicalized, `created_at` is parsed into timestamps
//! with `order_month` / `order_date` derived from it, and `grand_total` is
//! coerced to a number. Values that fail coercion become
//! [`CellValue::Missing`]; rows are never dropped here.

use explorer_core::data_processors::{ColumnNameProcessor, NumberProcessor, TimestampProcessor};
use explorer_core::models::{
    CellValue, Column, NormalizedTable, YearMonth, CREATED_AT, GRAND_TOTAL, ORDER_DATE,
    ORDER_MONTH,
};
use tracing::{debug, warn};

use crate::reader::RawTable;

/// Build the normalized table from parsed CSV content.
pub fn from_raw(raw: RawTable) -> NormalizedTable {
    let RawTable { headers, rows, .. } = raw;

    let mut values: Vec<Vec<CellValue>> = headers
        .iter()
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();
    for row in rows {
        for (column, field) in values.iter_mut().zip(row) {
            column.push(CellValue::from_raw(field));
        }
    }

    let columns = headers
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    normalize(NormalizedTable::new(columns))
}

/// Normalize `table` in full.
///
/// Idempotent: normalizing an already normalized table returns an equal
/// table.
pub fn normalize(table: NormalizedTable) -> NormalizedTable {
    let mut table = canonicalize_columns(table);

    let timestamps: Option<Vec<CellValue>> = table
        .column(CREATED_AT)
        .map(|c| c.values.iter().map(coerce_timestamp).collect());
    if let Some(timestamps) = timestamps {
        let months = timestamps
            .iter()
            .map(|v| match v.as_timestamp() {
                Some(ts) => CellValue::Month(YearMonth::from_date(&ts)),
                None => CellValue::Missing,
            })
            .collect();
        let dates = timestamps
            .iter()
            .map(|v| match v.as_timestamp() {
                Some(ts) => CellValue::Date(ts.date()),
                None => CellValue::Missing,
            })
            .collect();

        debug!(
            "Parsed {} timestamps ({} missing)",
            timestamps.len(),
            timestamps.iter().filter(|v| v.is_missing()).count()
        );

        table.insert_or_replace_column(Column::new(CREATED_AT, timestamps));
        table.insert_or_replace_column(Column::new(ORDER_MONTH, months));
        table.insert_or_replace_column(Column::new(ORDER_DATE, dates));
    }

    let totals: Option<Vec<CellValue>> = table
        .column(GRAND_TOTAL)
        .map(|c| c.values.iter().map(coerce_number).collect());
    if let Some(totals) = totals {
        debug!(
            "Coerced {} amounts ({} missing)",
            totals.len(),
            totals.iter().filter(|v| v.is_missing()).count()
        );
        table.insert_or_replace_column(Column::new(GRAND_TOTAL, totals));
    }

    table
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Rename every column to its canonical form. A later column whose canonical
/// name collides with an earlier one replaces it.
fn canonicalize_columns(table: NormalizedTable) -> NormalizedTable {
    let mut out = NormalizedTable::default();
    for column in table.into_columns() {
        let canonical = ColumnNameProcessor::canonicalize(&column.name);
        if out.has_column(&canonical) {
            warn!(
                "Column {:?} collides with an earlier column after canonicalization; keeping the later one as {:?}",
                column.name, canonical
            );
        }
        out.insert_or_replace_column(Column::new(canonical, column.values));
    }
    out
}

fn coerce_timestamp(value: &CellValue) -> CellValue {
    match value {
        CellValue::Timestamp(_) => value.clone(),
        CellValue::Text(s) => TimestampProcessor::parse(s)
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Missing),
        CellValue::Date(d) => d
            .and_hms_opt(0, 0, 0)
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Missing),
        _ => CellValue::Missing,
    }
}

fn coerce_number(value: &CellValue) -> CellValue {
    match value {
        CellValue::Number(n) if n.is_nan() => CellValue::Missing,
        CellValue::Number(_) => value.clone(),
        CellValue::Text(s) => NumberProcessor::parse(s)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Missing),
        _ => CellValue::Missing,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|f| f.to_string()).collect())
                .collect(),
            skipped_rows: 0,
        }
    }

    fn sample() -> NormalizedTable {
        from_raw(raw(
            &[" Created At ", "Grand Total", "Customer ID", "sku"],
            &[
                &["2017-03-15 10:00:00", "1,234.50", "C1", "X-1"],
                &["garbage", "abc", "C2", "X-2"],
                &["", "", "", ""],
            ],
        ))
    }

    #[test]
    fn test_column_names_are_canonical() {
        let table = sample();
        assert_eq!(
            table.column_names(),
            vec![
                "created_at",
                "grand_total",
                "customer_id",
                "sku",
                "order_month",
                "order_date"
            ]
        );
    }

    #[test]
    fn test_number_coercion_strips_separators() {
        let table = sample();
        let totals = &table.column(GRAND_TOTAL).unwrap().values;
        assert_eq!(totals[0], CellValue::Number(1234.5));
        assert_eq!(totals[1], CellValue::Missing);
        assert_eq!(totals[2], CellValue::Missing);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_date_derivation() {
        let table = sample();
        let month = &table.column(ORDER_MONTH).unwrap().values;
        let date = &table.column(ORDER_DATE).unwrap().values;

        assert_eq!(month[0], CellValue::Month(YearMonth::new(2017, 3).unwrap()));
        assert_eq!(month[0].to_string(), "2017-03");
        assert_eq!(
            date[0],
            CellValue::Date(NaiveDate::from_ymd_opt(2017, 3, 15).unwrap())
        );
    }

    #[test]
    fn test_unparsable_timestamp_yields_missing_derived_fields() {
        let table = sample();
        for name in [CREATED_AT, ORDER_MONTH, ORDER_DATE] {
            assert!(table.column(name).unwrap().values[1].is_missing(), "{name}");
        }
    }

    #[test]
    fn test_other_columns_pass_through() {
        let table = sample();
        let sku = &table.column("sku").unwrap().values;
        assert_eq!(sku[0], CellValue::Text("X-1".into()));
        assert_eq!(sku[2], CellValue::Missing);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = sample();
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_without_known_columns() {
        let table = from_raw(raw(&["A", "B"], &[&["1", "2"]]));
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert!(!table.has_column(ORDER_MONTH));
        assert_eq!(table.column("a").unwrap().values[0], CellValue::Text("1".into()));
    }

    #[test]
    fn test_collision_keeps_later_column() {
        let table = from_raw(raw(&["Status", " status"], &[&["old", "new"]]));
        assert_eq!(table.column_count(), 1);
        assert_eq!(
            table.column("status").unwrap().values[0],
            CellValue::Text("new".into())
        );
    }

    #[test]
    fn test_header_only_table() {
        let table = from_raw(raw(&["created_at", "grand_total"], &[]));
        assert!(table.is_empty());
        assert!(table.has_column(ORDER_MONTH));
    }

    #[test]
    fn test_empty_raw_table() {
        let table = from_raw(RawTable::default());
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_existing_numbers_pass_through() {
        let table = normalize(NormalizedTable::new(vec![Column::new(
            "Grand Total",
            vec![CellValue::Number(7.5), CellValue::Number(f64::NAN)],
        )]));
        let totals = &table.column(GRAND_TOTAL).unwrap().values;
        assert_eq!(totals[0], CellValue::Number(7.5));
        assert!(totals[1].is_missing());
    }
}
