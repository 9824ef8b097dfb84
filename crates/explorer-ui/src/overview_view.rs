//! Overview tab: headline KPIs and a preview of the first rows.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use explorer_core::formatting::{format_count, format_measure, NOT_AVAILABLE};
use explorer_data::views::OverviewSummary;

use crate::components::kpi::KpiCard;
use crate::themes::Theme;

/// Preview columns never grow wider than this.
const MAX_PREVIEW_COLUMN_WIDTH: usize = 24;

const INTRO: [&str; 2] = [
    "This project explores over 500,000 e-commerce transactions in Pakistan (March 2016 - August 2018).",
    "Target audience: Business analysts, data scientists, e-commerce professionals, and startups.",
];

/// The four KPI cards as `(label, formatted value)`.
///
/// Revenue is shown without decimals and the average order value with two;
/// unavailable metrics read `N/A`.
pub fn kpi_values(summary: &OverviewSummary) -> [(&'static str, String); 4] {
    let count = |c: Option<usize>| c.map(format_count).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    [
        ("Total Revenue", format_measure(summary.total_revenue, 0)),
        ("Total Orders", count(summary.total_orders)),
        ("Total Customers", count(summary.total_customers)),
        ("Avg. Order Value", format_measure(summary.average_order_value, 2)),
    ]
}

/// Render the overview tab. `summary` is `None` for an empty dataset.
pub fn render_overview(
    frame: &mut Frame,
    area: Rect,
    summary: Option<&OverviewSummary>,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(area);

    let intro: Vec<Line> = INTRO
        .iter()
        .map(|s| Line::from(Span::styled(*s, theme.text)))
        .collect();
    frame.render_widget(Paragraph::new(intro).wrap(Wrap { trim: true }), chunks[0]);

    let Some(summary) = summary else {
        render_empty_dataset(frame, chunks[1].union(chunks[2]), theme);
        return;
    };

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    for ((label, value), card_area) in kpi_values(summary).into_iter().zip(cards.iter()) {
        KpiCard::new(label, value, theme).render(frame, *card_area);
    }

    render_preview(frame, chunks[2], summary, theme);
}

/// First rows of the normalized table, one column per field.
fn render_preview(frame: &mut Frame, area: Rect, summary: &OverviewSummary, theme: &Theme) {
    let preview = &summary.preview;
    let names = preview.column_names();

    let widths: Vec<Constraint> = preview
        .columns()
        .iter()
        .map(|column| {
            let widest = column
                .values
                .iter()
                .map(|v| v.to_string().width())
                .chain(std::iter::once(column.name.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_PREVIEW_COLUMN_WIDTH);
            Constraint::Length(widest as u16)
        })
        .collect();

    let header = Row::new(
        names
            .iter()
            .map(|name| Cell::from(name.to_string()).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = (0..preview.row_count())
        .filter_map(|i| preview.row(i).map(|cells| (i, cells)))
        .map(|(i, cells)| {
            Row::new(cells.into_iter().map(|c| Cell::from(c.to_string()))).style(theme.row_style(i))
        })
        .collect();

    let title = format!(
        " Data Preview ({} of {} rows) ",
        preview.row_count(),
        format_count(summary.row_count)
    );
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

fn render_empty_dataset(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Dataset is empty or not loaded properly.",
            theme.warning,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
