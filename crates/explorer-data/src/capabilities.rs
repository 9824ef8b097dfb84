//! Fixed table of the columns each aggregate needs.
//!
//! Checked once after load; views consult [`Capabilities`] instead of
//! probing the table before every computation.

use std::collections::BTreeSet;
use std::fmt;

use explorer_core::models::{
    NormalizedTable, CATEGORY, CREATED_AT, CUSTOMER_ID, GRAND_TOTAL, INCREMENT_ID, ORDER_MONTH,
    PAYMENT_METHOD, STATUS,
};
use serde::Serialize;

/// Every aggregate the explorer can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    TotalRevenue,
    TotalOrders,
    TotalCustomers,
    AverageOrderValue,
    MonthlyRevenue,
    StatusCounts,
    PaymentMethodCounts,
    TopCategories,
    WeekdayCounts,
    RevenueByPaymentMethod,
    CategoryMonthMatrix,
}

impl Aggregate {
    pub const ALL: [Aggregate; 11] = [
        Aggregate::TotalRevenue,
        Aggregate::TotalOrders,
        Aggregate::TotalCustomers,
        Aggregate::AverageOrderValue,
        Aggregate::MonthlyRevenue,
        Aggregate::StatusCounts,
        Aggregate::PaymentMethodCounts,
        Aggregate::TopCategories,
        Aggregate::WeekdayCounts,
        Aggregate::RevenueByPaymentMethod,
        Aggregate::CategoryMonthMatrix,
    ];

    /// Canonical column names that must be present for this aggregate.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Aggregate::TotalRevenue => &[GRAND_TOTAL],
            Aggregate::TotalOrders => &[INCREMENT_ID],
            Aggregate::TotalCustomers => &[CUSTOMER_ID],
            Aggregate::AverageOrderValue => &[INCREMENT_ID, GRAND_TOTAL],
            Aggregate::MonthlyRevenue => &[ORDER_MONTH, GRAND_TOTAL],
            Aggregate::StatusCounts => &[STATUS],
            Aggregate::PaymentMethodCounts => &[PAYMENT_METHOD],
            Aggregate::TopCategories => &[CATEGORY],
            Aggregate::WeekdayCounts => &[CREATED_AT],
            Aggregate::RevenueByPaymentMethod => &[PAYMENT_METHOD, GRAND_TOTAL],
            Aggregate::CategoryMonthMatrix => &[ORDER_MONTH, CATEGORY, GRAND_TOTAL],
        }
    }

    /// Human-readable name used in captions and logs.
    pub fn label(self) -> &'static str {
        match self {
            Aggregate::TotalRevenue => "Total Revenue",
            Aggregate::TotalOrders => "Total Orders",
            Aggregate::TotalCustomers => "Total Customers",
            Aggregate::AverageOrderValue => "Average Order Value",
            Aggregate::MonthlyRevenue => "Monthly Revenue Trend",
            Aggregate::StatusCounts => "Orders by Status",
            Aggregate::PaymentMethodCounts => "Payment Methods",
            Aggregate::TopCategories => "Top 10 Categories",
            Aggregate::WeekdayCounts => "Orders by Day of Week",
            Aggregate::RevenueByPaymentMethod => "Revenue by Payment Method",
            Aggregate::CategoryMonthMatrix => "Revenue Heatmap: Month vs Category",
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of aggregates a given table supports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    available: BTreeSet<Aggregate>,
}

impl Capabilities {
    /// Check every aggregate's required columns against `table`.
    pub fn detect(table: &NormalizedTable) -> Self {
        let available = Aggregate::ALL
            .into_iter()
            .filter(|agg| {
                agg.required_columns()
                    .iter()
                    .all(|name| table.has_column(name))
            })
            .collect();
        Self { available }
    }

    pub fn supports(&self, aggregate: Aggregate) -> bool {
        self.available.contains(&aggregate)
    }

    /// Aggregates that cannot be computed, in declaration order.
    pub fn unavailable(&self) -> Vec<Aggregate> {
        Aggregate::ALL
            .into_iter()
            .filter(|agg| !self.supports(*agg))
            .collect()
    }

    /// Required columns absent from the table for `aggregate`.
    pub fn missing_columns(
        table: &NormalizedTable,
        aggregate: Aggregate,
    ) -> Vec<&'static str> {
        aggregate
            .required_columns()
            .iter()
            .copied()
            .filter(|name| !table.has_column(name))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_core::models::Column;

    fn table_with(names: &[&str]) -> NormalizedTable {
        NormalizedTable::new(
            names
                .iter()
                .map(|n| Column::new(*n, Vec::new()))
                .collect(),
        )
    }

    #[test]
    fn test_full_table_supports_everything() {
        let table = table_with(&[
            CREATED_AT,
            ORDER_MONTH,
            GRAND_TOTAL,
            INCREMENT_ID,
            CUSTOMER_ID,
            STATUS,
            PAYMENT_METHOD,
            CATEGORY,
        ]);
        let caps = Capabilities::detect(&table);
        assert!(caps.unavailable().is_empty());
    }

    #[test]
    fn test_missing_grand_total_disables_revenue_aggregates() {
        let table = table_with(&[
            CREATED_AT,
            ORDER_MONTH,
            INCREMENT_ID,
            CUSTOMER_ID,
            STATUS,
            PAYMENT_METHOD,
            CATEGORY,
        ]);
        let caps = Capabilities::detect(&table);

        assert!(!caps.supports(Aggregate::TotalRevenue));
        assert!(!caps.supports(Aggregate::AverageOrderValue));
        assert!(!caps.supports(Aggregate::MonthlyRevenue));
        assert!(!caps.supports(Aggregate::RevenueByPaymentMethod));
        assert!(!caps.supports(Aggregate::CategoryMonthMatrix));
        assert!(caps.supports(Aggregate::TotalOrders));
        assert!(caps.supports(Aggregate::WeekdayCounts));
    }

    #[test]
    fn test_empty_table_supports_nothing() {
        let caps = Capabilities::detect(&NormalizedTable::default());
        assert_eq!(caps.unavailable().len(), Aggregate::ALL.len());
    }

    #[test]
    fn test_missing_columns_lists_only_absent() {
        let table = table_with(&[GRAND_TOTAL]);
        assert_eq!(
            Capabilities::missing_columns(&table, Aggregate::CategoryMonthMatrix),
            vec![ORDER_MONTH, CATEGORY]
        );
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Aggregate::TopCategories.to_string(), "Top 10 Categories");
    }
}
