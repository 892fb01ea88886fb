//! Interactive terminal frontend
//!
//! Draws the board and score plot with ratatui and uses the time between
//! frames to poll the keyboard, so pacing and input share one wait.
//!
//! # Controls
//!
//! - 1-4: Speed (slow, normal, fast, max)
//! - Q/Esc/Ctrl+C: Quit

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Instant;

use crate::game::GameState;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::TrainingStats;
use crate::render::{Control, Frontend, Renderer, Speed};

pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    input: InputHandler,
    speed: Speed,

    /// Score history as of the last finished episode
    scores: Vec<u32>,

    /// Latest progress line, shown in the footer
    status: String,

    /// Set once the terminal has been handed back
    restored: bool,
}

impl TerminalFrontend {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new(speed: Speed) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let terminal = undo_on_error(enter_screen, leave_screen)?;

        Ok(Self {
            terminal,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            speed,
            scores: Vec::new(),
            status: String::new(),
            restored: false,
        })
    }

    /// Hand the terminal back to the shell
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    /// Wait out the current tick while handling key presses
    fn wait_for_tick(&mut self) -> Result<Control> {
        let deadline = Instant::now() + self.speed.tick_interval();

        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout).context("Failed to poll terminal events")? {
                return Ok(Control::Continue);
            }

            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.input.handle_key_event(key) {
                    KeyAction::Quit => return Ok(Control::Quit),
                    // New speed applies from the next frame
                    KeyAction::SetSpeed(speed) => self.speed = speed,
                    KeyAction::None => {}
                }
            }

            if timeout.is_zero() {
                return Ok(Control::Continue);
            }
        }
    }
}

/// Run `setup`, calling `undo` if it fails
fn undo_on_error<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| undo())
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort teardown for a half-initialised terminal
fn leave_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(stderr(), LeaveAlternateScreen, Show);
}

impl Frontend for TerminalFrontend {
    fn present(&mut self, state: &GameState, stats: &TrainingStats) -> Result<Control> {
        let Self {
            terminal,
            renderer,
            scores,
            speed,
            status,
            ..
        } = self;

        terminal
            .draw(|frame| renderer.render(frame, state, stats, scores.as_slice(), *speed, status))
            .context("Failed to draw frame")?;

        self.wait_for_tick()
    }

    fn plot(&mut self, scores: &[u32], _mean_scores: &[f32]) -> Result<()> {
        self.scores.clear();
        self.scores.extend_from_slice(scores);
        Ok(())
    }

    fn log(&mut self, message: &str) {
        self.status.clear();
        self.status.push_str(message);
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
