//! Static text tabs: conclusion and credits.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::themes::Theme;

const TAKEAWAYS: [&str; 4] = [
    "Seasonal revenue peaks around major holidays and sale events.",
    "A handful of product categories account for most of the revenue.",
    "Cash on Delivery is the most preferred payment method.",
    "Order volume concentrates midweek and on weekends.",
];

pub const DATASET_SOURCE: &str = "Pakistan's Largest E-commerce Dataset (Kaggle)";
pub const DATASET_URL: &str =
    "https://www.kaggle.com/datasets/zusmani/pakistans-largest-ecommerce-dataset";

pub fn conclusion_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Key Takeaways", theme.bold)),
        Line::from(""),
    ];
    lines.extend(
        TAKEAWAYS
            .iter()
            .map(|t| Line::from(vec![Span::styled("  \u{2022} ", theme.info), Span::styled(*t, theme.text)])),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "These patterns can guide promotion timing, category focus and checkout options.",
        theme.dim,
    )));
    lines
}

pub fn credits_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("About", theme.bold)),
        Line::from(""),
        Line::from(Span::styled(
            "An interactive terminal explorer for a large Pakistani e-commerce transaction dataset.",
            theme.text,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Dataset Source: ", theme.label),
            Span::styled(DATASET_SOURCE, theme.value),
        ]),
        Line::from(Span::styled(DATASET_URL, theme.info)),
    ]
}

pub fn render_conclusion(frame: &mut Frame, area: Rect, theme: &Theme) {
    render_notes(frame, area, " Conclusion ", conclusion_lines(theme), theme);
}

pub fn render_credits(frame: &mut Frame, area: Rect, theme: &Theme) {
    render_notes(frame, area, " Credits ", credits_lines(theme), theme);
}

fn render_notes(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.separator)
                .title(title.to_string()),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
