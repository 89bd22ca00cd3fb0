//! Conway's Game of Life in the terminal
//!
//! The [`game_of_life`] module holds the board engine: a bit-packed grid with
//! an explicit initialize/shutdown lifecycle, advanced one generation at a
//! time. [`interface`] drives it from the keyboard; [`config`] and
//! [`telemetry`] carry the ambient settings and logging.

pub mod config;
pub mod game_of_life;
pub mod interface;
pub mod telemetry;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Board, BoardError, Coordinate, InitError, Preset, ShutdownError};

use anyhow::{Context, Result};
use game_of_life::Pattern;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run a board forward without a terminal.
///
/// Dimensions come from `settings.board`, falling back to the pattern's own
/// size. The configured preset is applied first, then the pattern is stamped
/// in the middle, then the board advances `generations` ticks.
pub fn simulate(settings: &Settings, pattern: Option<&Pattern>, generations: usize) -> Result<Board> {
    let rows = settings.board.rows.or(pattern.map(Pattern::rows));
    let columns = settings.board.columns.or(pattern.map(Pattern::columns));
    let (Some(rows), Some(columns)) = (rows, columns) else {
        anyhow::bail!("Board dimensions are required when no pattern is given");
    };

    let mut board = Board::with_dimensions(rows, columns)
        .with_context(|| format!("Failed to initialize {}x{} board", rows, columns))?;

    if let Some(preset) = settings.preset.initial {
        let mut rng = match settings.preset.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        preset
            .apply(&mut board, settings.preset.random_denominator, &mut rng)
            .with_context(|| format!("Failed to apply {} preset", preset))?;
    }
    if let Some(pattern) = pattern {
        pattern
            .stamp(&mut board, pattern.centered_origin(rows, columns))
            .context("Pattern does not fit the board")?;
    }

    board
        .tick_n(generations)
        .context("Failed to advance generations")?;
    Ok(board)
}
