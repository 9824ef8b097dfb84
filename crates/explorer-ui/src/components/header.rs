use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Application title shown on the first header line.
pub const TITLE: &str = "PAKISTAN E-COMMERCE DATASET EXPLORER";

/// Dashboard header rendering four lines:
///
/// 1. Application title.
/// 2. A 60-column `=` separator.
/// 3. Dataset information in `[ entry | rows ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Name of the CSV entry the table was loaded from.
    pub source: &'a str,
    /// Rows in the loaded table.
    pub rows: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, rows: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            rows,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!(
                        "{} rows",
                        explorer_core::formatting::format_count(self.rows)
                    ),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new("orders.csv", 10, &theme).to_lines();
        assert_eq!(lines.len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new("orders.csv", 10, &theme).to_lines();
        assert_eq!(line_text(&lines[0]), TITLE);
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new("orders.csv", 10, &theme).to_lines();
        let sep = line_text(&lines[1]);

        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line_groups_row_count() {
        let theme = Theme::dark();
        let lines = Header::new("cleaned_ecommerce_data.csv", 584_524, &theme).to_lines();

        assert_eq!(
            line_text(&lines[2]),
            "[ cleaned_ecommerce_data.csv | 584,524 rows ]"
        );
        assert_eq!(lines[2].spans.len(), 5);
    }

    #[test]
    fn test_header_empty_fourth_line() {
        let theme = Theme::dark();
        let lines = Header::new("orders.csv", 0, &theme).to_lines();
        assert!(line_text(&lines[3]).is_empty());
    }
}
