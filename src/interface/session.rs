//! Interactive session state: board, cursor, pause flag and preset rotation

use super::input::{translate, Command, Cursor};
use crate::config::Settings;
use crate::game_of_life::{Board, Coordinate, Pattern, Preset};
use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::num::NonZeroU32;
use tracing::{debug, info};

/// Whether the control loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    board: Board,
    cursor: Cursor,
    paused: bool,
    next_preset: Preset,
    denominator: NonZeroU32,
    rng: StdRng,
}

impl Session {
    /// Build a session on a fresh `rows x columns` board and apply the
    /// configured starting preset, if any
    pub fn new(rows: usize, columns: usize, settings: &Settings) -> Result<Self> {
        let board = Board::with_dimensions(rows, columns)
            .with_context(|| format!("Failed to initialize {}x{} board", rows, columns))?;
        let rng = match settings.preset.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut session = Self {
            board,
            cursor: Cursor::centered(rows, columns, settings.input.cursor_jump),
            paused: settings.simulation.start_paused,
            next_preset: Preset::Random,
            denominator: settings.preset.random_denominator,
            rng,
        };
        if let Some(preset) = settings.preset.initial {
            session.apply_preset(preset)?;
        }
        info!(rows, columns, paused = session.paused, "session started");
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Coordinate {
        self.cursor.position()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Translate a key press and act on it. The cursor only moves while
    /// paused, since it is hidden while the simulation runs.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        let mut cursor = self.cursor;
        let command = translate(&mut cursor, key);
        if self.paused {
            self.cursor = cursor;
        }
        match command {
            Some(command) => self.handle(command),
            None => Ok(Flow::Continue),
        }
    }

    /// Act on a command. Editing (`MoveTo`, `Confirm`) is ignored while the
    /// simulation runs.
    pub fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::MoveTo(_) => {}
            Command::Confirm(pos) if !self.paused => {
                debug!(row = pos.row, column = pos.column, "edit ignored while running");
            }
            Command::Confirm(pos) => {
                let alive = self.board.toggle(pos).context("Failed to toggle cell")?;
                debug!(row = pos.row, column = pos.column, alive, "cell toggled");
            }
            Command::Pause => {
                self.paused = !self.paused;
                if !self.paused {
                    self.cursor.recenter();
                }
                debug!(paused = self.paused, "pause toggled");
            }
            Command::Step => {
                self.board.tick().context("Failed to advance generation")?;
            }
            Command::CyclePreset => {
                self.board.clear().context("Failed to clear board")?;
                let preset = self.next_preset;
                self.apply_preset(preset)?;
            }
            Command::Quit => {
                info!(generation = self.board.generation(), "quit requested");
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// One simulation step of the control loop; a no-op while paused
    pub fn advance(&mut self) -> Result<()> {
        if !self.paused {
            self.board.tick().context("Failed to advance generation")?;
        }
        Ok(())
    }

    /// Stamp a pattern in the middle of the board
    pub fn load_pattern(&mut self, pattern: &Pattern) -> Result<()> {
        let (rows, columns) = self
            .board
            .dimensions()
            .context("Board is not initialized")?;
        pattern
            .stamp(&mut self.board, pattern.centered_origin(rows, columns))
            .with_context(|| {
                format!(
                    "Pattern of {}x{} does not fit a {}x{} board",
                    pattern.rows(),
                    pattern.columns(),
                    rows,
                    columns
                )
            })
    }

    fn apply_preset(&mut self, preset: Preset) -> Result<()> {
        preset
            .apply(&mut self.board, self.denominator, &mut self.rng)
            .with_context(|| format!("Failed to apply {} preset", preset))?;
        self.next_preset = preset.next();
        info!(%preset, living = self.board.living_count(), "preset applied");
        Ok(())
    }
}
