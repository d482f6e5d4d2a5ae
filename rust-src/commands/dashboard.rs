//! Interactive dashboard command.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::config::{contact_href, TUI_POLL_INTERVAL_MS};
use crate::dashboard::{DashboardView, RenderOptions, DASHBOARD_ANCHOR};
use crate::data::STORE;
use crate::visualization::{anchor_row, body_len, DashboardScreen};


/// Key-driven state around the dashboard view.
pub struct DashboardApp {
    view: DashboardView,
    scroll: usize,
    running: bool,
    status: Option<String>,
}


impl DashboardApp {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            view: DashboardView::new(&STORE, options),
            scroll: 0,
            running: true,
            status: None,
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    #[cfg(test)]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply one key press. `body_rows` bounds the scroll offset.
    pub fn handle_key(&mut self, code: KeyCode, body_rows: usize) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') | KeyCode::Char(' ') => {
                let state = self.view.flip();
                self.status = Some(format!("Atomicity chart {}", if state.is_visible() { "shown" } else { "hidden" }));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(body_rows.saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Home => self.scroll = 0,
            KeyCode::Char('g') => {
                if let Some(row) = anchor_row(self.view.document(), DASHBOARD_ANCHOR) {
                    self.scroll = row;
                }
            }
            KeyCode::Char('c') => self.status = Some(contact_href()),
            _ => {}
        }
    }

    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while self.running {
            terminal.draw(|frame| {
                let screen = DashboardScreen {
                    document: self.view.document(),
                    scroll: self.scroll,
                    status: self.status.as_deref(),
                };
                frame.render_widget(screen, frame.area());
            })?;

            if event::poll(Duration::from_millis(TUI_POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let width = terminal.size()?.width;
                        let rows = body_len(self.view.document(), width);
                        debug!(key = ?key.code, "key press");
                        self.handle_key(key.code, rows);
                    }
                }
            }
        }

        Ok(())
    }
}


/// Run the dashboard command.
pub fn run(options: RenderOptions) -> Result<()> {
    let mut app = DashboardApp::new(options);

    enable_raw_mode()?;

    let result = execute!(stdout(), EnterAlternateScreen)
        .map_err(anyhow::Error::from)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout())).map_err(anyhow::Error::from))
        .and_then(|mut terminal| app.run(&mut terminal));

    // Restore the terminal even if setup or drawing failed
    let restored = restore_terminal(disable_raw_mode, || execute!(stdout(), LeaveAlternateScreen));

    result.and(restored.map_err(anyhow::Error::from))
}


/// Run both restore steps and return the first error.
fn restore_terminal(
    raw_mode: impl FnOnce() -> io::Result<()>,
    alternate_screen: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let raw = raw_mode();
    let screen = alternate_screen();
    raw.and(screen)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{PanelId, ToggleState};

    #[test]
    fn test_t_flips_and_rerenders() {
        let mut app = DashboardApp::new(RenderOptions::default());
        assert!(app.view().document().has_panel(PanelId::Atomicity));

        app.handle_key(KeyCode::Char('t'), 30);
        assert_eq!(app.view().toggle_state(), ToggleState::Hidden);
        assert!(!app.view().document().has_panel(PanelId::Atomicity));

        app.handle_key(KeyCode::Char(' '), 30);
        assert_eq!(app.view().toggle_state(), ToggleState::Visible);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut app = DashboardApp::new(RenderOptions::default());
        app.handle_key(KeyCode::Up, 3);
        assert_eq!(app.scroll(), 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::Char('j'), 3);
        }
        assert_eq!(app.scroll(), 2);
        app.handle_key(KeyCode::Home, 3);
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn test_jump_to_dashboard() {
        let mut app = DashboardApp::new(RenderOptions::default());
        app.handle_key(KeyCode::Char('g'), 30);
        assert_eq!(app.scroll(), anchor_row(app.view().document(), DASHBOARD_ANCHOR).unwrap());
        assert!(app.scroll() > 0);
    }

    #[test]
    fn test_restore_runs_both_steps_on_failure() {
        let mut left_screen = false;
        let result = restore_terminal(
            || Err(io::Error::other("raw mode")),
            || {
                left_screen = true;
                Err(io::Error::other("screen"))
            },
        );
        assert!(left_screen);
        assert_eq!(result.unwrap_err().to_string(), "raw mode");

        assert!(restore_terminal(|| Ok(()), || Ok(())).is_ok());
    }

    #[test]
    fn test_quit() {
        let mut app = DashboardApp::new(RenderOptions::default());
        app.handle_key(KeyCode::Char('q'), 30);
        assert!(!app.is_running());
    }
}
