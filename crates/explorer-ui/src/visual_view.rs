//! Visual analysis tab: six bar charts for the selected year.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use explorer_core::formatting::{format_compact, format_count};
use explorer_data::aggregator::weekday_name;
use explorer_data::capabilities::Aggregate;
use explorer_data::views::YearlyAnalysis;

use crate::components::bar_chart::{render_chart_panel, Bar, ChartData};
use crate::themes::Theme;

/// One chart of the grid, ready to draw.
#[derive(Debug, Clone)]
pub struct ChartPanel {
    pub aggregate: Aggregate,
    pub caption: &'static str,
    /// `None` when a required column is missing.
    pub bars: Option<Vec<Bar>>,
    /// Revenue charts use the revenue bar colour.
    pub revenue: bool,
}

impl ChartPanel {
    fn new(aggregate: Aggregate, caption: &'static str, bars: Option<Vec<Bar>>, revenue: bool) -> Self {
        Self {
            aggregate,
            caption,
            bars,
            revenue,
        }
    }
}

fn count_bar(label: &str, count: usize) -> Bar {
    Bar::new(label, count as f64, format_count(count))
}

fn revenue_bar(label: String, revenue: f64) -> Bar {
    Bar::new(label, revenue, format_compact(revenue))
}

/// Build the six chart panels, in grid order, from a yearly bundle.
pub fn chart_panels(analysis: &YearlyAnalysis) -> Vec<ChartPanel> {
    vec![
        ChartPanel::new(
            Aggregate::MonthlyRevenue,
            "Seasonal revenue trend.",
            analysis.monthly_revenue.as_ref().map(|rows| {
                rows.iter()
                    .map(|r| revenue_bar(r.month.to_string(), r.revenue))
                    .collect()
            }),
            true,
        ),
        ChartPanel::new(
            Aggregate::StatusCounts,
            "Distribution of order statuses.",
            analysis
                .status_counts
                .as_ref()
                .map(|rows| rows.iter().map(|r| count_bar(&r.label, r.count)).collect()),
            false,
        ),
        ChartPanel::new(
            Aggregate::PaymentMethodCounts,
            "Payment method breakdown.",
            analysis
                .payment_method_counts
                .as_ref()
                .map(|rows| rows.iter().map(|r| count_bar(&r.label, r.count)).collect()),
            false,
        ),
        ChartPanel::new(
            Aggregate::TopCategories,
            "Top product categories.",
            analysis
                .top_categories
                .as_ref()
                .map(|rows| rows.iter().map(|r| count_bar(&r.label, r.count)).collect()),
            false,
        ),
        ChartPanel::new(
            Aggregate::WeekdayCounts,
            "Which days drive most sales?",
            analysis.weekday_counts.as_ref().map(|rows| {
                rows.iter()
                    .map(|r| count_bar(weekday_name(r.weekday), r.count))
                    .collect()
            }),
            false,
        ),
        ChartPanel::new(
            Aggregate::RevenueByPaymentMethod,
            "Revenue by each payment option.",
            analysis.revenue_by_payment_method.as_ref().map(|rows| {
                rows.iter()
                    .map(|r| revenue_bar(r.label.clone(), r.revenue))
                    .collect()
            }),
            true,
        ),
    ]
}

/// Year selector line: every year, the selected one highlighted.
pub fn year_selector_line(years: &[i32], selected: Option<i32>, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("Select Year: ", theme.label)];
    for year in years {
        if Some(*year) == selected {
            spans.push(Span::styled(format!("[{}]", year), theme.tab_active));
        } else {
            spans.push(Span::styled(format!(" {} ", year), theme.tab_inactive));
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("(\u{2191}/\u{2193} to change)", theme.dim));
    Line::from(spans)
}

/// Render the visual analysis tab.
///
/// `analysis` is `None` when the dataset has no parseable order dates.
pub fn render_visual(
    frame: &mut Frame,
    area: Rect,
    years: &[i32],
    analysis: Option<&YearlyAnalysis>,
    theme: &Theme,
) {
    let Some(analysis) = analysis else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No order dates available; yearly analysis cannot be shown.",
                theme.warning,
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(6)])
        .split(area);

    let mut header = vec![year_selector_line(years, Some(analysis.year), theme)];
    header.push(Line::from(Span::styled(
        format!("{} orders in {}", format_count(analysis.row_count), analysis.year),
        theme.dim,
    )));
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);

    let panels = chart_panels(analysis);
    for (row_index, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2); 2])
            .split(*row_area);
        for (col_index, cell) in cols.iter().enumerate() {
            if let Some(panel) = panels.get(row_index * 2 + col_index) {
                draw_panel(frame, *cell, panel, analysis.is_empty(), theme);
            }
        }
    }
}

fn draw_panel(frame: &mut Frame, area: Rect, panel: &ChartPanel, year_empty: bool, theme: &Theme) {
    let data = match &panel.bars {
        None => ChartData::Unavailable,
        Some(bars) if year_empty || bars.is_empty() => ChartData::Empty,
        Some(bars) => ChartData::Bars(bars),
    };
    let style: Style = if panel.revenue {
        theme.bar_revenue
    } else {
        theme.bar_count
    };
    render_chart_panel(
        frame,
        area,
        panel.aggregate.label(),
        panel.caption,
        data,
        style,
        theme,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
