//! Full-screen plan dashboard.
//!
//! Task tree on the left, details of the selected row on the right and a
//! progress header on top. Status changes are written back to the plan
//! file on `s`.

mod render;
mod state;

use std::{
    io::{self, Stdout},
    path::Path,
};

use anyhow::{Context, Result};
use aria_core::{Plan, PlanStore};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};

use state::{Action, DashboardState};

/// Restores the terminal when dropped, including on early returns.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("Failed to create terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {e}");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {e}");
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Run the dashboard until the user quits. Returns whether unsaved
/// changes were left behind.
pub fn run(plan: &mut Plan, store: &PlanStore, path: &Path) -> Result<bool> {
    let mut guard = TerminalGuard::enter()?;
    let mut state = DashboardState::new(plan);

    loop {
        guard
            .terminal
            .draw(|frame| render::draw(frame, plan, &state))
            .context("Failed to draw dashboard")?;

        let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.handle_key(key.code, plan) {
            Action::Continue => {}
            Action::Save => match store.save(plan, Some(path)) {
                Ok(saved) => state.mark_saved(&saved.display().to_string()),
                Err(e) => state.message = Some(format!("Save failed: {e}")),
            },
            Action::Quit => break,
        }
    }

    Ok(state.dirty)
}
