use crate::themes::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A single headline metric: a label above a large value.
///
/// The value is pre-formatted; unavailable metrics pass
/// [`explorer_core::formatting::NOT_AVAILABLE`].
pub struct KpiCard<'a> {
    pub label: &'a str,
    pub value: String,
    pub theme: &'a Theme,
}

impl<'a> KpiCard<'a> {
    pub fn new(label: &'a str, value: String, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            theme,
        }
    }

    /// Card body: a blank spacer line and the value.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(""),
            Line::from(Span::styled(self.value.clone(), self.theme.kpi_value)),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.kpi_border)
            .title(Span::styled(format!(" {} ", self.label), self.theme.label));
        frame.render_widget(
            Paragraph::new(self.to_lines())
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_kpi_lines_carry_value() {
        let theme = Theme::dark();
        let card = KpiCard::new("Total Orders", "1,234".to_string(), &theme);
        let lines = card.to_lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].content, "1,234");
        assert_eq!(lines[1].spans[0].style, theme.kpi_value);
    }

    #[test]
    fn test_kpi_render_shows_label_and_value() {
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|frame| {
                KpiCard::new("Total Revenue", "N/A".to_string(), &theme)
                    .render(frame, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Total Revenue"));
        assert!(text.contains("N/A"));
    }
}
