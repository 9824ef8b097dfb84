//! Grouped sums and counts over the normalized table.
//!
//! Every function is pure: it reads the table it is given (usually a
//! year-filtered copy) and returns a fresh summary. Missing values never
//! contribute to a sum or form a group. When a required column is absent the
//! result is `None`, which views render as "N/A".

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{Datelike, Weekday};
use explorer_core::models::{CellValue, Column, NormalizedTable, YearMonth, CREATED_AT};
use serde::{Serialize, Serializer};

use crate::capabilities::Aggregate;

/// How many categories the category ranking keeps.
pub const TOP_CATEGORY_LIMIT: usize = 10;

/// Calendar display order for the weekday breakdown.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of `day`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

// ── Result rows ───────────────────────────────────────────────────────────────

/// Revenue summed over one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRevenue {
    pub month: YearMonth,
    pub revenue: f64,
}

/// Row count for one value of a categorical dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Revenue summed for one value of a categorical dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRevenue {
    pub label: String,
    pub revenue: f64,
}

/// Row count for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    pub count: usize,
}

// ── RevenueMatrix ─────────────────────────────────────────────────────────────

/// Revenue pivoted by category (rows) and month (columns).
///
/// Every (category, month) cell is present; combinations with no sales are
/// `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueMatrix {
    /// Column labels, chronological.
    pub months: Vec<YearMonth>,
    /// Row labels, lexicographic.
    pub categories: Vec<String>,
    /// `values[row][col]` for `categories[row]` and `months[col]`.
    pub values: Vec<Vec<f64>>,
}

impl RevenueMatrix {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty() || self.categories.is_empty()
    }

    /// Revenue for `category` in `month`, or `None` if either label is
    /// unknown.
    pub fn get(&self, category: &str, month: YearMonth) -> Option<f64> {
        let row = self.categories.iter().position(|c| c == category)?;
        let col = self.months.iter().position(|m| *m == month)?;
        Some(self.values[row][col])
    }

    /// Smallest and largest cell, for colour scaling.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

// ── Aggregator ────────────────────────────────────────────────────────────────

/// Stateless helper computing every dashboard aggregate.
pub struct Aggregator;

impl Aggregator {
    /// Sum of `grand_total`; `0.0` when every amount is missing.
    pub fn total_revenue(table: &NormalizedTable) -> Option<f64> {
        let [totals] = Self::columns::<1>(table, Aggregate::TotalRevenue)?;
        // `f64::sum` starts from -0.0.
        Some(
            totals
                .values
                .iter()
                .filter_map(CellValue::as_number)
                .fold(0.0, |acc, v| acc + v),
        )
    }

    /// Number of distinct `increment_id` values (orders, not line rows).
    pub fn total_orders(table: &NormalizedTable) -> Option<usize> {
        let [ids] = Self::columns::<1>(table, Aggregate::TotalOrders)?;
        Some(distinct_count(ids))
    }

    /// Number of distinct `customer_id` values.
    pub fn total_customers(table: &NormalizedTable) -> Option<usize> {
        let [ids] = Self::columns::<1>(table, Aggregate::TotalCustomers)?;
        Some(distinct_count(ids))
    }

    /// Mean of per-order revenue.
    ///
    /// Line rows are first summed per `increment_id`, then the per-order
    /// sums are averaged. `None` when there are no orders.
    pub fn average_order_value(table: &NormalizedTable) -> Option<f64> {
        let [ids, totals] = Self::columns::<2>(table, Aggregate::AverageOrderValue)?;
        let per_order = sum_by_key(ids, totals);
        if per_order.is_empty() {
            return None;
        }
        let sum = per_order.iter().fold(0.0, |acc, (_, v)| acc + v);
        Some(sum / per_order.len() as f64)
    }

    /// Revenue per `order_month`, chronological.
    pub fn monthly_revenue(table: &NormalizedTable) -> Option<Vec<MonthRevenue>> {
        let [months, totals] = Self::columns::<2>(table, Aggregate::MonthlyRevenue)?;

        let mut by_month: BTreeMap<YearMonth, f64> = BTreeMap::new();
        for (month, total) in months.values.iter().zip(&totals.values) {
            if let Some(month) = month.as_month() {
                *by_month.entry(month).or_default() += total.as_number().unwrap_or(0.0);
            }
        }

        Some(
            by_month
                .into_iter()
                .map(|(month, revenue)| MonthRevenue { month, revenue })
                .collect(),
        )
    }

    /// Rows per order status, most frequent first.
    pub fn status_counts(table: &NormalizedTable) -> Option<Vec<LabelCount>> {
        let [status] = Self::columns::<1>(table, Aggregate::StatusCounts)?;
        Some(count_by_value(status))
    }

    /// Rows per payment method, most frequent first.
    pub fn payment_method_counts(table: &NormalizedTable) -> Option<Vec<LabelCount>> {
        let [methods] = Self::columns::<1>(table, Aggregate::PaymentMethodCounts)?;
        Some(count_by_value(methods))
    }

    /// The [`TOP_CATEGORY_LIMIT`] most frequent categories.
    pub fn top_categories(table: &NormalizedTable) -> Option<Vec<LabelCount>> {
        let [categories] = Self::columns::<1>(table, Aggregate::TopCategories)?;
        let mut counts = count_by_value(categories);
        counts.truncate(TOP_CATEGORY_LIMIT);
        Some(counts)
    }

    /// Rows per weekday of `created_at`, always Monday through Sunday.
    pub fn weekday_counts(table: &NormalizedTable) -> Option<Vec<WeekdayCount>> {
        let [created] = Self::columns::<1>(table, Aggregate::WeekdayCounts)?;

        let mut counts = [0usize; 7];
        for ts in created.values.iter().filter_map(CellValue::as_timestamp) {
            counts[ts.weekday().num_days_from_monday() as usize] += 1;
        }

        Some(
            WEEKDAYS
                .iter()
                .zip(counts)
                .map(|(&weekday, count)| WeekdayCount { weekday, count })
                .collect(),
        )
    }

    /// Revenue per payment method, highest first.
    pub fn revenue_by_payment_method(table: &NormalizedTable) -> Option<Vec<LabelRevenue>> {
        let [methods, totals] = Self::columns::<2>(table, Aggregate::RevenueByPaymentMethod)?;
        let mut rows: Vec<LabelRevenue> = sum_by_key(methods, totals)
            .into_iter()
            .map(|(label, revenue)| LabelRevenue { label, revenue })
            .collect();
        rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        Some(rows)
    }

    /// Revenue pivoted by category and month, zero-filled.
    pub fn category_month_matrix(table: &NormalizedTable) -> Option<RevenueMatrix> {
        let [months, categories, totals] =
            Self::columns::<3>(table, Aggregate::CategoryMonthMatrix)?;

        let mut cells: HashMap<(String, YearMonth), f64> = HashMap::new();
        let mut month_set: BTreeSet<YearMonth> = BTreeSet::new();
        let mut category_set: BTreeSet<String> = BTreeSet::new();

        for ((month, category), total) in months
            .values
            .iter()
            .zip(&categories.values)
            .zip(&totals.values)
        {
            let (Some(month), Some(category)) = (month.as_month(), category.group_key()) else {
                continue;
            };
            month_set.insert(month);
            category_set.insert(category.clone());
            *cells.entry((category, month)).or_default() += total.as_number().unwrap_or(0.0);
        }

        let months: Vec<YearMonth> = month_set.into_iter().collect();
        let categories: Vec<String> = category_set.into_iter().collect();
        let values = categories
            .iter()
            .map(|category| {
                months
                    .iter()
                    .map(|&month| {
                        cells
                            .get(&(category.clone(), month))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();

        Some(RevenueMatrix {
            months,
            categories,
            values,
        })
    }

    /// Distinct calendar years in `created_at`, ascending.
    pub fn available_years(table: &NormalizedTable) -> Vec<i32> {
        let Some(created) = table.column(CREATED_AT) else {
            return Vec::new();
        };
        created
            .values
            .iter()
            .filter_map(CellValue::as_timestamp)
            .map(|ts| ts.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Copy of `table` holding only rows whose `created_at` falls in `year`.
    ///
    /// Rows with a missing timestamp, and every row of a table without
    /// `created_at`, are excluded.
    pub fn filter_year(table: &NormalizedTable, year: i32) -> NormalizedTable {
        match table.column(CREATED_AT) {
            Some(created) => table.filter_rows(|i| {
                created.values[i]
                    .as_timestamp()
                    .is_some_and(|ts| ts.year() == year)
            }),
            None => table.filter_rows(|_| false),
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Look up the required columns of `aggregate`, in table order of
    /// [`Aggregate::required_columns`]. `None` if any is absent.
    fn columns<'a, const N: usize>(
        table: &'a NormalizedTable,
        aggregate: Aggregate,
    ) -> Option<[&'a Column; N]> {
        let required = aggregate.required_columns();
        debug_assert_eq!(required.len(), N);
        let found: Vec<&Column> = required
            .iter()
            .map(|name| table.column(name))
            .collect::<Option<_>>()?;
        found.try_into().ok()
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn distinct_count(column: &Column) -> usize {
    column
        .values
        .iter()
        .filter_map(CellValue::group_key)
        .collect::<HashSet<_>>()
        .len()
}

/// Count rows per non-missing value, descending; ties keep first appearance.
fn count_by_value(column: &Column) -> Vec<LabelCount> {
    let mut order: Vec<LabelCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for key in column.values.iter().filter_map(CellValue::group_key) {
        match index.get(&key) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(key.clone(), order.len());
                order.push(LabelCount {
                    label: key,
                    count: 1,
                });
            }
        }
    }

    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

/// Sum `totals` per non-missing `keys` value, in first-appearance order.
/// Missing amounts add nothing but still open their group.
fn sum_by_key(keys: &Column, totals: &Column) -> Vec<(String, f64)> {
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (key, total) in keys.values.iter().zip(&totals.values) {
        let Some(key) = key.group_key() else {
            continue;
        };
        let amount = total.as_number().unwrap_or(0.0);
        match index.get(&key) {
            Some(&i) => order[i].1 += amount,
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, amount));
            }
        }
    }

    order
}

// ── Tests ─────────────────────────────────────────────────────────────────────
