//! Interactive dashboard state.
//!
//! [`DashboardSession`] borrows the loaded dataset and tracks the selected
//! tab and year. View bundles are recomputed only when the selection that
//! feeds them changes.

use std::fmt;

use explorer_data::aggregator::Aggregator;
use explorer_data::analysis::LoadedDataset;
use explorer_data::views::{CategoryHeatmap, OverviewSummary, YearlyAnalysis};
use tracing::{debug, warn};

// ── Tab ───────────────────────────────────────────────────────────────────────

/// The five dashboard views, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Visual,
    Deeper,
    Conclusion,
    Credits,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Visual,
        Tab::Deeper,
        Tab::Conclusion,
        Tab::Credits,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview & KPIs",
            Tab::Visual => "Visual Analysis",
            Tab::Deeper => "Deeper Analysis",
            Tab::Conclusion => "Conclusion",
            Tab::Credits => "Credits",
        }
    }

    /// Position in [`Tab::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::ALL.get(index).copied()
    }

    /// The following tab, wrapping around.
    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    /// The preceding tab, wrapping around.
    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ── DashboardSession ──────────────────────────────────────────────────────────

/// Selection state plus the bundles derived from it.
pub struct DashboardSession<'a> {
    dataset: &'a LoadedDataset,
    tab: Tab,
    years: Vec<i32>,
    year_index: Option<usize>,
    overview: Option<OverviewSummary>,
    heatmap: CategoryHeatmap,
    yearly: Option<YearlyAnalysis>,
}

impl<'a> DashboardSession<'a> {
    /// Start a session on the overview tab.
    ///
    /// `initial_year` is used when the dataset contains it; otherwise the
    /// earliest available year is selected.
    pub fn new(dataset: &'a LoadedDataset, initial_year: Option<i32>) -> Self {
        let table = &dataset.table;
        let years = Aggregator::available_years(table);

        let year_index = match initial_year {
            Some(year) => match years.iter().position(|&y| y == year) {
                Some(i) => Some(i),
                None => {
                    warn!("Year {} not present in dataset; using earliest year", year);
                    (!years.is_empty()).then_some(0)
                }
            },
            None => (!years.is_empty()).then_some(0),
        };

        let mut session = Self {
            dataset,
            tab: Tab::default(),
            years,
            year_index,
            overview: OverviewSummary::compute(table),
            heatmap: CategoryHeatmap::compute(table),
            yearly: None,
        };
        session.recompute_yearly();
        session
    }

    pub fn dataset(&self) -> &'a LoadedDataset {
        self.dataset
    }

    /// `true` when the loaded table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dataset.table.is_empty()
    }

    // ── Tabs ──────────────────────────────────────────────────────────────────

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    // ── Years ─────────────────────────────────────────────────────────────────

    /// Distinct years of the dataset, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.year_index.map(|i| self.years[i])
    }

    /// Select `year`. Returns `true` if the selection changed.
    pub fn select_year(&mut self, year: i32) -> bool {
        match self.years.iter().position(|&y| y == year) {
            Some(i) => self.select_year_index(i),
            None => false,
        }
    }

    /// Move to the next later year, if any.
    pub fn next_year(&mut self) -> bool {
        match self.year_index {
            Some(i) if i + 1 < self.years.len() => self.select_year_index(i + 1),
            _ => false,
        }
    }

    /// Move to the next earlier year, if any.
    pub fn previous_year(&mut self) -> bool {
        match self.year_index {
            Some(i) if i > 0 => self.select_year_index(i - 1),
            _ => false,
        }
    }

    // ── Bundles ───────────────────────────────────────────────────────────────

    /// KPIs for the whole table; `None` if it is empty.
    pub fn overview(&self) -> Option<&OverviewSummary> {
        self.overview.as_ref()
    }

    /// Breakdowns for the selected year; `None` if no year is available.
    pub fn yearly(&self) -> Option<&YearlyAnalysis> {
        self.yearly.as_ref()
    }

    pub fn heatmap(&self) -> &CategoryHeatmap {
        &self.heatmap
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn select_year_index(&mut self, index: usize) -> bool {
        if self.year_index == Some(index) {
            return false;
        }
        self.year_index = Some(index);
        self.recompute_yearly();
        true
    }

    fn recompute_yearly(&mut self) {
        self.yearly = self.selected_year().map(|year| {
            debug!("Computing yearly analysis for {}", year);
            YearlyAnalysis::compute(&self.dataset.table, year)
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
