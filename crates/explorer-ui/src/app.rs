//! Main application state and TUI event loop for the dataset explorer.
//!
//! [`App`] owns the theme and the quit flag; the selection state lives in a
//! [`DashboardSession`] that the event loop mutates in response to keys.

use std::io;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::debug;

use explorer_runtime::dashboard::{DashboardSession, Tab};

use crate::components::header::Header;
use crate::themes::Theme;
use crate::{heatmap_view, notes_view, overview_view, visual_view};

const HELP: &str =
    "Tab/\u{2190}\u{2192} switch view \u{2502} 1-5 jump \u{2502} \u{2191}/\u{2193} change year \u{2502} q/Esc quit";

const TICK_RATE: Duration = Duration::from_millis(250);

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Raw mode plus alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    }
}

/// Wait up to `timeout` for a key press.
fn read_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            // Windows reports releases too.
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the explorer TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without spinning. The loop yields to the runtime every
    /// tick, and the terminal is restored even if this future is dropped.
    pub async fn run(mut self, mut session: DashboardSession<'_>) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        self.event_loop(&mut terminal, &mut session, read_key).await
    }

    /// Draw, wait up to one tick for a key, apply it, yield; until quit.
    async fn event_loop<B, K>(
        &mut self,
        terminal: &mut Terminal<B>,
        session: &mut DashboardSession<'_>,
        mut next_key: K,
    ) -> io::Result<()>
    where
        B: Backend,
        K: FnMut(Duration) -> io::Result<Option<KeyEvent>>,
    {
        while !self.should_quit {
            terminal
                .draw(|frame| self.render(frame, session))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if let Some(key) = next_key(TICK_RATE)? {
                self.handle_key(session, key);
            }

            tokio::task::yield_now().await;
        }
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the session.
    pub fn handle_key(&mut self, session: &mut DashboardSession<'_>, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => session.next_tab(),
            KeyCode::BackTab | KeyCode::Left => session.previous_tab(),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                if let Some(tab) = Tab::from_index(index) {
                    session.set_tab(tab);
                }
            }
            KeyCode::Up | KeyCode::Char('+') => {
                if session.next_year() {
                    debug!("Selected year {:?}", session.selected_year());
                }
            }
            KeyCode::Down | KeyCode::Char('-') => {
                if session.previous_year() {
                    debug!("Selected year {:?}", session.selected_year());
                }
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the header, the tab bar, the active tab and the key help.
    pub fn render(&self, frame: &mut Frame, session: &DashboardSession<'_>) {
        let dataset = session.dataset();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let header = Header::new(
            &dataset.metadata.entry_name,
            dataset.table.row_count(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines()), chunks[0]);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(session.tab().index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider(Span::styled("\u{2502}", self.theme.separator));
        frame.render_widget(tabs, chunks[1]);

        let body = chunks[2];
        match session.tab() {
            Tab::Overview => {
                overview_view::render_overview(frame, body, session.overview(), &self.theme)
            }
            Tab::Visual => visual_view::render_visual(
                frame,
                body,
                session.years(),
                session.yearly(),
                &self.theme,
            ),
            Tab::Deeper => heatmap_view::render_heatmap(frame, body, session.heatmap(), &self.theme),
            Tab::Conclusion => notes_view::render_conclusion(frame, body, &self.theme),
            Tab::Credits => notes_view::render_credits(frame, body, &self.theme),
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(HELP, self.theme.dim))),
            chunks[3],
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_data::analysis::{LoadMetadata, LoadedDataset};
    use explorer_data::capabilities::Capabilities;
    use explorer_data::normalizer;
    use explorer_data::reader::parse_csv;
    use ratatui::backend::TestBackend;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    const ORDERS_CSV: &str = "\
increment_id,customer_id,created_at,grand_total,status,payment_method,category_name_1
A100,C1,2016-07-01 10:00:00,100,complete,cod,Mobiles
A101,C2,2017-03-15 10:00:00,1200,complete,Easypay,Books
A102,C2,2017-04-20 09:00:00,300,canceled,cod,Books
";

    fn dataset() -> LoadedDataset {
        let raw = parse_csv(ORDERS_CSV.as_bytes()).unwrap();
        let table = normalizer::from_raw(raw);
        LoadedDataset {
            capabilities: Capabilities::detect(&table),
            metadata: LoadMetadata {
                generated_at: "2024-01-01T00:00:00Z".into(),
                archive_path: "orders.zip".into(),
                entry_name: "orders.csv".into(),
                rows_loaded: table.row_count(),
                rows_skipped: 0,
                column_count: table.column_count(),
                load_time_seconds: 0.0,
                normalize_time_seconds: 0.0,
            },
            table,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render_text(app: &App, session: &DashboardSession<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|frame| app.render(frame, session)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = App::new("dark");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        // Must not panic.
        let app = App::new("nonexistent");
        assert!(!app.should_quit);
    }

    // ── handle_key ────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let dataset = dataset();
        for event in [
            key(KeyCode::Char('q')),
            key(KeyCode::Char('Q')),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut session = DashboardSession::new(&dataset, None);
            let mut app = App::new("dark");
            app.handle_key(&mut session, event);
            assert!(app.should_quit);
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let dataset = dataset();
        let mut session = DashboardSession::new(&dataset, None);
        let mut app = App::new("dark");
        app.handle_key(&mut session, key(KeyCode::Char('c')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_keys() {
        let dataset = dataset();
        let mut session = DashboardSession::new(&dataset, None);
        let mut app = App::new("dark");

        app.handle_key(&mut session, key(KeyCode::Tab));
        assert_eq!(session.tab(), Tab::Visual);
        app.handle_key(&mut session, key(KeyCode::Left));
        app.handle_key(&mut session, key(KeyCode::Left));
        assert_eq!(session.tab(), Tab::Credits);
        app.handle_key(&mut session, key(KeyCode::Char('3')));
        assert_eq!(session.tab(), Tab::Deeper);
        app.handle_key(&mut session, key(KeyCode::Char('9')));
        assert_eq!(session.tab(), Tab::Deeper);
    }

    #[test]
    fn test_year_keys() {
        let dataset = dataset();
        let mut session = DashboardSession::new(&dataset, None);
        let mut app = App::new("dark");

        assert_eq!(session.selected_year(), Some(2016));
        app.handle_key(&mut session, key(KeyCode::Up));
        assert_eq!(session.selected_year(), Some(2017));
        app.handle_key(&mut session, key(KeyCode::Up));
        assert_eq!(session.selected_year(), Some(2017));
        app.handle_key(&mut session, key(KeyCode::Char('-')));
        assert_eq!(session.selected_year(), Some(2016));
    }

    // ── event_loop ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_event_loop_yields_to_runtime_each_tick() {
        let dataset = dataset();
        let mut session = DashboardSession::new(&dataset, None);
        let mut app = App::new("dark");
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        // On the current-thread runtime this task only runs if the loop yields.
        let other_task_ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&other_task_ran);
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        let mut ticks = 0;
        let next_key = |_: Duration| -> io::Result<Option<KeyEvent>> {
            ticks += 1;
            if other_task_ran.load(Ordering::SeqCst) {
                Ok(Some(key(KeyCode::Char('q'))))
            } else if ticks > 100 {
                Err(io::Error::other("event loop never yielded"))
            } else {
                Ok(None)
            }
        };

        app.event_loop(&mut terminal, &mut session, next_key)
            .await
            .unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_event_loop_applies_keys_until_quit() {
        let dataset = dataset();
        let mut session = DashboardSession::new(&dataset, None);
        let mut app = App::new("dark");
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        let mut keys = vec![key(KeyCode::Char('q')), key(KeyCode::Tab), key(KeyCode::Tab)];
        app.event_loop(&mut terminal, &mut session, |_| Ok(keys.pop()))
            .await
            .unwrap();

        assert!(app.should_quit);
        assert_eq!(session.tab(), Tab::Deeper);
    }

    // ── render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_every_tab() {
        let dataset = dataset();
        let mut session = DashboardSession::new(&dataset, Some(2017));
        let app = App::new("dark");

        let text = render_text(&app, &session);
        assert!(text.contains("PAKISTAN E-COMMERCE DATASET EXPLORER"));
        assert!(text.contains("Overview & KPIs"));
        assert!(text.contains("Total Revenue"));

        session.set_tab(Tab::Visual);
        let text = render_text(&app, &session);
        assert!(text.contains("[2017]"));
        assert!(text.contains("Orders by Status"));

        session.set_tab(Tab::Deeper);
        assert!(render_text(&app, &session).contains("Monthly Revenue Heatmap by Category"));

        session.set_tab(Tab::Conclusion);
        assert!(render_text(&app, &session).contains("Key Takeaways"));

        session.set_tab(Tab::Credits);
        assert!(render_text(&app, &session).contains("Dataset Source"));
    }
}
