use crate::themes::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const FILLED: &str = "\u{2588}"; // █  FULL BLOCK
const ELLIPSIS: char = '\u{2026}';

/// Widest the label column may get, in terminal columns.
const MAX_LABEL_WIDTH: usize = 22;

/// One bar: a label, the measure that sets its length, and the text shown
/// after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub value_text: String,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64, value_text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            value_text: value_text.into(),
        }
    }
}

/// What a chart panel has to show.
#[derive(Debug, Clone, Copy)]
pub enum ChartData<'d> {
    Bars(&'d [Bar]),
    /// No rows for the current selection.
    Empty,
    /// A required column is missing.
    Unavailable,
}

/// Horizontal bar chart drawn with block characters.
///
/// Each line reads `label ████████ value`; bar lengths are proportional to
/// the largest value. Negative values draw no bar.
pub struct HorizontalBarChart<'a> {
    pub bars: &'a [Bar],
    pub bar_style: Style,
    pub theme: &'a Theme,
}

impl<'a> HorizontalBarChart<'a> {
    pub fn new(bars: &'a [Bar], bar_style: Style, theme: &'a Theme) -> Self {
        Self {
            bars,
            bar_style,
            theme,
        }
    }

    /// Lay the chart out for `width` terminal columns.
    pub fn to_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.width())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH)
            .min(width / 3);
        let value_width = self
            .bars
            .iter()
            .map(|b| b.value_text.width())
            .max()
            .unwrap_or(0);
        let bar_width = width.saturating_sub(label_width + value_width + 2);

        let max = self
            .bars
            .iter()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);

        self.bars
            .iter()
            .map(|bar| {
                let filled = if bar_width > 0 && max > 0.0 && bar.value.is_finite() && bar.value > 0.0 {
                    (((bar.value / max) * bar_width as f64).round() as usize).clamp(1, bar_width)
                } else {
                    0
                };
                let label = fit_to_width(&bar.label, label_width);
                Line::from(vec![
                    Span::styled(label, self.theme.bar_label),
                    Span::raw(" "),
                    Span::styled(FILLED.repeat(filled), self.bar_style),
                    Span::raw(" "),
                    Span::styled(bar.value_text.clone(), self.theme.value),
                ])
            })
            .collect()
    }
}

/// Truncate or right-pad `text` to exactly `width` columns.
pub fn fit_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{}{}", text, " ".repeat(pad));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

/// Draw a titled chart panel with a caption under the bars.
pub fn render_chart_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    caption: &str,
    data: ChartData<'_>,
    bar_style: Style,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(format!(" {} ", title), theme.header));
    let inner_width = area.width.saturating_sub(2);

    let mut lines: Vec<Line> = match data {
        ChartData::Bars(bars) => HorizontalBarChart::new(bars, bar_style, theme).to_lines(inner_width),
        ChartData::Empty => vec![Line::from(Span::styled(
            "No data for the selected year",
            theme.dim,
        ))],
        ChartData::Unavailable => vec![Line::from(Span::styled(
            "N/A: required column not found",
            theme.warning,
        ))],
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(caption.to_string(), theme.dim)));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn bars() -> Vec<Bar> {
        vec![
            Bar::new("cod", 300.0, "300"),
            Bar::new("Easypay", 150.0, "150"),
            Bar::new("voucher", 0.0, "0"),
        ]
    }

    // ── fit_to_width ──────────────────────────────────────────────────────────

    #[test]
    fn test_fit_pads_short_text() {
        assert_eq!(fit_to_width("cod", 6), "cod   ");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        let out = fit_to_width("Men's Fashion", 6);
        assert_eq!(out, "Men's\u{2026}");
        assert_eq!(out.width(), 6);
    }

    #[test]
    fn test_fit_handles_wide_chars() {
        // Two-column glyphs cannot fill the last odd column.
        let out = fit_to_width("日本語テキスト", 4);
        assert_eq!(out, "日\u{2026} ");
        assert_eq!(out.width(), 4);
    }

    #[test]
    fn test_fit_zero_width() {
        assert_eq!(fit_to_width("anything", 0), "");
    }

    // ── HorizontalBarChart ────────────────────────────────────────────────────

    #[test]
    fn test_bar_lengths_proportional() {
        let theme = Theme::dark();
        let bars = bars();
        // label 7 + value 3 + 2 spaces = 12; bar width 30.
        let lines = HorizontalBarChart::new(&bars, theme.bar_count, &theme).to_lines(42);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[2].content.chars().count(), 30);
        assert_eq!(lines[1].spans[2].content.chars().count(), 15);
        assert_eq!(lines[2].spans[2].content.chars().count(), 0);
        assert!(line_text(&lines[0]).starts_with("cod     "));
        assert!(line_text(&lines[0]).ends_with("300"));
    }

    #[test]
    fn test_bar_chart_all_zero() {
        let theme = Theme::dark();
        let bars = vec![Bar::new("Monday", 0.0, "0")];
        let lines = HorizontalBarChart::new(&bars, theme.bar_count, &theme).to_lines(40);
        assert_eq!(lines[0].spans[2].content, "");
    }

    #[test]
    fn test_tiny_positive_value_still_visible() {
        let theme = Theme::dark();
        let bars = vec![Bar::new("a", 1_000_000.0, "1M"), Bar::new("b", 1.0, "1")];
        let lines = HorizontalBarChart::new(&bars, theme.bar_count, &theme).to_lines(40);
        assert_eq!(lines[1].spans[2].content.chars().count(), 1);
    }

    // ── render_chart_panel ────────────────────────────────────────────────────

    fn render(data: ChartData<'_>) -> String {
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(50, 10)).unwrap();
        terminal
            .draw(|frame| {
                render_chart_panel(
                    frame,
                    frame.area(),
                    "Payment Methods",
                    "Payment method breakdown.",
                    data,
                    theme.bar_count,
                    &theme,
                );
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_panel_renders_bars_and_caption() {
        let bars = bars();
        let text = render(ChartData::Bars(&bars));
        assert!(text.contains("Payment Methods"));
        assert!(text.contains("Easypay"));
        assert!(text.contains("Payment method breakdown."));
    }

    #[test]
    fn test_panel_unavailable() {
        let text = render(ChartData::Unavailable);
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_panel_empty() {
        let text = render(ChartData::Empty);
        assert!(text.contains("No data for the selected year"));
    }
}
