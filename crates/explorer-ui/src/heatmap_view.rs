//! Deeper analysis tab: monthly revenue heatmap by category.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use explorer_core::formatting::format_compact;
use explorer_data::aggregator::RevenueMatrix;
use explorer_data::views::CategoryHeatmap;

use crate::components::bar_chart::fit_to_width;
use crate::themes::Theme;

const TITLE: &str = "Monthly Revenue Heatmap by Category";
const CAPTION: &str = "Shows monthly revenue distribution across categories.";
const MAX_CATEGORY_WIDTH: usize = 22;
/// `2017-03` plus padding; also fits `999.9K`.
const MONTH_COLUMN_WIDTH: u16 = 8;

/// Render the deeper analysis tab.
pub fn render_heatmap(frame: &mut Frame, area: Rect, heatmap: &CategoryHeatmap, theme: &Theme) {
    match heatmap {
        CategoryHeatmap::Available(matrix) => render_matrix(frame, area, matrix, theme),
        CategoryHeatmap::NoData => render_message(
            frame,
            area,
            vec![Line::from(Span::styled(
                "No month/category revenue to display.",
                theme.warning,
            ))],
            theme,
        ),
        CategoryHeatmap::MissingColumns(columns) => render_message(
            frame,
            area,
            vec![
                Line::from(Span::styled(
                    "Required columns not found for deeper analysis.",
                    theme.warning,
                )),
                Line::from(Span::styled(
                    format!("Missing: {}", columns.join(", ")),
                    theme.dim,
                )),
            ],
            theme,
        ),
    }
}

/// Colour legend from the coolest to the hottest band.
pub fn legend_line(min: f64, max: f64, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{} ", format_compact(min)), theme.dim)];
    for color in theme.heat_scale {
        spans.push(Span::styled("   ", Style::default().bg(color)));
    }
    spans.push(Span::styled(format!(" {}", format_compact(max)), theme.dim));
    Line::from(spans)
}

fn render_matrix(frame: &mut Frame, area: Rect, matrix: &RevenueMatrix, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(area);

    let (min, max) = matrix.value_range().unwrap_or((0.0, 0.0));

    let category_width = matrix
        .categories
        .iter()
        .map(|c| c.width())
        .chain(std::iter::once("Category".len()))
        .max()
        .unwrap_or(0)
        .min(MAX_CATEGORY_WIDTH);

    let header = Row::new(
        std::iter::once(Cell::from("Category"))
            .chain(matrix.months.iter().map(|m| Cell::from(m.to_string())))
            .map(|cell| cell.style(theme.table_header)),
    );

    let rows: Vec<Row> = matrix
        .categories
        .iter()
        .zip(matrix.values.iter())
        .map(|(category, values)| {
            let label = Cell::from(fit_to_width(category, category_width)).style(theme.bar_label);
            let cells = values.iter().map(|&v| {
                Cell::from(format!("{:>7}", format_compact(v))).style(theme.heat_style(v, min, max))
            });
            Row::new(std::iter::once(label).chain(cells))
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(category_width as u16))
        .chain(matrix.months.iter().map(|_| Constraint::Length(MONTH_COLUMN_WIDTH)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(0)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(format!(" {} ", TITLE), theme.header)),
        )
        .style(theme.text);
    frame.render_widget(table, chunks[0]);

    let footer = vec![
        legend_line(min, max, theme),
        Line::from(Span::styled(CAPTION, theme.dim)),
    ];
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

fn render_message(frame: &mut Frame, area: Rect, mut lines: Vec<Line<'static>>, theme: &Theme) {
    lines.insert(0, Line::from(""));
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", TITLE)),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
