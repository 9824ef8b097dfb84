//! Per-view bundles of aggregates.
//!
//! Each bundle gathers what one dashboard tab displays, so the
//! presentation layer only formats and draws.

use explorer_core::error::Result;
use explorer_core::models::NormalizedTable;
use serde::Serialize;

use crate::aggregator::{
    Aggregator, LabelCount, LabelRevenue, MonthRevenue, RevenueMatrix, WeekdayCount,
};
use crate::analysis::{LoadMetadata, LoadedDataset};
use crate::capabilities::{Aggregate, Capabilities};

/// Rows shown in the overview's data preview.
pub const PREVIEW_ROWS: usize = 20;

// ── OverviewSummary ───────────────────────────────────────────────────────────

/// Headline KPIs plus a preview of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSummary {
    pub total_revenue: Option<f64>,
    pub total_orders: Option<usize>,
    pub total_customers: Option<usize>,
    pub average_order_value: Option<f64>,
    pub row_count: usize,
    #[serde(skip)]
    pub preview: NormalizedTable,
}

impl OverviewSummary {
    /// `None` for an empty table.
    pub fn compute(table: &NormalizedTable) -> Option<Self> {
        if table.is_empty() {
            return None;
        }
        Some(Self {
            total_revenue: Aggregator::total_revenue(table),
            total_orders: Aggregator::total_orders(table),
            total_customers: Aggregator::total_customers(table),
            average_order_value: Aggregator::average_order_value(table),
            row_count: table.row_count(),
            preview: table.head(PREVIEW_ROWS),
        })
    }
}

// ── YearlyAnalysis ────────────────────────────────────────────────────────────

/// The six breakdowns of the visual-analysis tab for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAnalysis {
    pub year: i32,
    /// Rows of `year`; zero means the charts have nothing to show.
    pub row_count: usize,
    pub monthly_revenue: Option<Vec<MonthRevenue>>,
    pub status_counts: Option<Vec<LabelCount>>,
    pub payment_method_counts: Option<Vec<LabelCount>>,
    pub top_categories: Option<Vec<LabelCount>>,
    pub weekday_counts: Option<Vec<WeekdayCount>>,
    pub revenue_by_payment_method: Option<Vec<LabelRevenue>>,
}

impl YearlyAnalysis {
    /// Restrict `table` to `year` and compute every breakdown on the copy.
    pub fn compute(table: &NormalizedTable, year: i32) -> Self {
        let filtered = Aggregator::filter_year(table, year);
        Self {
            year,
            row_count: filtered.row_count(),
            monthly_revenue: Aggregator::monthly_revenue(&filtered),
            status_counts: Aggregator::status_counts(&filtered),
            payment_method_counts: Aggregator::payment_method_counts(&filtered),
            top_categories: Aggregator::top_categories(&filtered),
            weekday_counts: Aggregator::weekday_counts(&filtered),
            revenue_by_payment_method: Aggregator::revenue_by_payment_method(&filtered),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

// ── CategoryHeatmap ───────────────────────────────────────────────────────────

/// State of the deeper-analysis heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CategoryHeatmap {
    Available(RevenueMatrix),
    /// The table (or its month/category data) is empty.
    NoData,
    /// The listed required columns are absent.
    MissingColumns(Vec<&'static str>),
}

impl CategoryHeatmap {
    /// Pivot the whole table; the heatmap ignores the year selection.
    pub fn compute(table: &NormalizedTable) -> Self {
        let missing = Capabilities::missing_columns(table, Aggregate::CategoryMonthMatrix);
        if !missing.is_empty() {
            return CategoryHeatmap::MissingColumns(missing);
        }
        match Aggregator::category_month_matrix(table) {
            Some(matrix) if !matrix.is_empty() => CategoryHeatmap::Available(matrix),
            _ => CategoryHeatmap::NoData,
        }
    }

    pub fn matrix(&self) -> Option<&RevenueMatrix> {
        match self {
            CategoryHeatmap::Available(matrix) => Some(matrix),
            _ => None,
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// Everything the dashboard shows, as one serializable document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: LoadMetadata,
    pub unavailable: Vec<Aggregate>,
    pub available_years: Vec<i32>,
    pub overview: Option<OverviewSummary>,
    pub years: Vec<YearlyAnalysis>,
    pub heatmap: CategoryHeatmap,
}

impl Report {
    /// Build the report for `year`, or for every available year when
    /// `year` is `None`.
    pub fn build(dataset: &LoadedDataset, year: Option<i32>) -> Self {
        let table = &dataset.table;
        let available_years = Aggregator::available_years(table);
        let selected: Vec<i32> = match year {
            Some(y) => vec![y],
            None => available_years.clone(),
        };

        Self {
            metadata: dataset.metadata.clone(),
            unavailable: dataset.capabilities.unavailable(),
            available_years,
            overview: OverviewSummary::compute(table),
            years: selected
                .into_iter()
                .map(|y| YearlyAnalysis::compute(table, y))
                .collect(),
            heatmap: CategoryHeatmap::compute(table),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
