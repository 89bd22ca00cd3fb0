//! crossterm screen handling for the interactive session

use crate::config::DisplayConfig;
use crate::game_of_life::{Board, Coordinate};
use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Raw-mode alternate screen; the terminal is restored on drop
pub struct TerminalScreen {
    stdout: Stdout,
    alive_glyph: char,
    dead_glyph: char,
}

impl TerminalScreen {
    pub fn enter(display: &DisplayConfig) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))
            .context("failed to enter alternate screen")?;
        Ok(Self {
            stdout,
            alive_glyph: display.alive_glyph,
            dead_glyph: display.dead_glyph,
        })
    }

    /// Terminal size as (rows, columns)
    pub fn size() -> Result<(usize, usize)> {
        let (columns, rows) = terminal::size().context("failed to query terminal size")?;
        Ok((rows as usize, columns as usize))
    }

    /// Wait up to `timeout` for a key press
    pub fn poll_key(timeout: Duration) -> Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    /// Draw every cell, highlighting the cursor while editing
    pub fn draw(&mut self, board: &Board, cursor: Option<Coordinate>) -> Result<()> {
        let Some((rows, columns)) = board.dimensions() else {
            return Ok(());
        };

        for row in 0..rows {
            let line = render_row(board, row, columns, self.alive_glyph, self.dead_glyph)?;
            let (x, y) = screen_position(Coordinate::new(row, 0))?;
            queue!(self.stdout, MoveTo(x, y), Print(line))?;
        }

        if let Some(pos) = cursor {
            let glyph = if board.is_alive(pos)? {
                self.alive_glyph
            } else {
                self.dead_glyph
            };
            let (x, y) = screen_position(pos)?;
            queue!(self.stdout, MoveTo(x, y), PrintStyledContent(glyph.reverse()))?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.stdout, Show, LeaveAlternateScreen) {
            tracing::error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            tracing::error!(?err, "failed to disable raw mode");
        }
    }
}

/// Terminal (x, y) of a board cell; crossterm addresses cells with `u16`
pub fn screen_position(pos: Coordinate) -> Result<(u16, u16)> {
    let x = u16::try_from(pos.column)
        .with_context(|| format!("column {} is past the terminal's addressable width", pos.column))?;
    let y = u16::try_from(pos.row)
        .with_context(|| format!("row {} is past the terminal's addressable height", pos.row))?;
    Ok((x, y))
}

/// One board row as glyphs
pub fn render_row(
    board: &Board,
    row: usize,
    columns: usize,
    alive_glyph: char,
    dead_glyph: char,
) -> Result<String> {
    (0..columns)
        .map(|column| -> Result<char> {
            let alive = board.is_alive(Coordinate::new(row, column))?;
            Ok(if alive { alive_glyph } else { dead_glyph })
        })
        .collect()
}
