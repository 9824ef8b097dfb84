use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

// ── Canonical column names ────────────────────────────────────────────────────

/// Order timestamp, parsed from free text during normalization.
pub const CREATED_AT: &str = "created_at";
/// Calendar month derived from [`CREATED_AT`].
pub const ORDER_MONTH: &str = "order_month";
/// Calendar date derived from [`CREATED_AT`].
pub const ORDER_DATE: &str = "order_date";
/// Line amount, numeric after separator stripping.
pub const GRAND_TOTAL: &str = "grand_total";
/// Order identifier; one order may span several line-item rows.
pub const INCREMENT_ID: &str = "increment_id";
/// Customer identifier.
pub const CUSTOMER_ID: &str = "customer_id";
/// Order status (e.g. `complete`, `canceled`).
pub const STATUS: &str = "status";
/// Payment method (e.g. `cod`, `Easypay`).
pub const PAYMENT_METHOD: &str = "payment_method";
/// Top-level product category.
pub const CATEGORY: &str = "category_name_1";

// ── YearMonth ─────────────────────────────────────────────────────────────────

/// A calendar month at year+month granularity, e.g. `2017-03`.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a month, returning `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: &impl Datelike) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── CellValue ─────────────────────────────────────────────────────────────────

/// One field of the normalized table.
///
/// Blank source fields and fields that failed type coercion are
/// [`CellValue::Missing`]; every aggregate skips them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
    Month(YearMonth),
    Date(NaiveDate),
}

impl CellValue {
    /// Wrap a raw CSV field. Empty strings load as missing.
    pub fn from_raw(field: impl Into<String>) -> Self {
        let field = field.into();
        if field.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(field)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_month(&self) -> Option<YearMonth> {
        match self {
            CellValue::Month(m) => Some(*m),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Key used when grouping or counting distinct values.
    ///
    /// Returns `None` for missing values so they never form a group.
    pub fn group_key(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            CellValue::Text(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Month(m) => write!(f, "{}", m),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Missing => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            other => serializer.collect_str(other),
        }
    }
}

// ── Column / NormalizedTable ──────────────────────────────────────────────────

/// A named column of cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The cleaned, column-major in-memory dataset.
///
/// Every column holds exactly [`NormalizedTable::row_count`] values. Consumers
/// treat a table as read-only and derive filtered copies instead of mutating
/// it; only the normalizer inserts columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl NormalizedTable {
    /// Build a table from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        debug_assert!(
            columns.iter().all(|c| c.len() == row_count),
            "all columns must have the same length"
        );
        Self { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Look up a column by canonical name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the table holds no rows (it may still have a header).
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// All values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// A copy holding the first `n` rows.
    pub fn head(&self, n: usize) -> NormalizedTable {
        self.filter_rows(|i| i < n)
    }

    /// A copy holding only rows whose index satisfies `keep`.
    pub fn filter_rows(&self, keep: impl Fn(usize) -> bool) -> NormalizedTable {
        let kept: Vec<usize> = (0..self.row_count).filter(|&i| keep(i)).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: kept.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect();
        NormalizedTable {
            columns,
            row_count: kept.len(),
        }
    }

    /// Add `column`, or replace the existing column of the same name in place.
    ///
    /// The first column inserted into an empty table fixes the row count.
    pub fn insert_or_replace_column(&mut self, column: Column) {
        if self.columns.is_empty() {
            self.row_count = column.len();
        }
        debug_assert_eq!(column.len(), self.row_count, "column length mismatch");

        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
