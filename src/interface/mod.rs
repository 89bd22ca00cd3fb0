//! Terminal front end: key translation, session state and the control loop

pub mod input;
pub mod session;
pub mod terminal;

pub use input::{translate, Command, Cursor};
pub use session::{Flow, Session};
pub use terminal::TerminalScreen;

use crate::config::Settings;
use crate::game_of_life::Pattern;
use anyhow::{bail, Result};
use std::time::{Duration, Instant};

/// Board dimensions for a terminal of `terminal` (rows, columns).
///
/// Unset dimensions take the terminal's; configured ones must fit on screen.
pub fn fit_to_terminal(
    rows: Option<usize>,
    columns: Option<usize>,
    terminal: (usize, usize),
) -> Result<(usize, usize)> {
    let (term_rows, term_columns) = terminal;
    let rows = rows.unwrap_or(term_rows);
    let columns = columns.unwrap_or(term_columns);
    if rows > term_rows || columns > term_columns {
        bail!(
            "Board of {}x{} does not fit the {}x{} terminal",
            rows,
            columns,
            term_rows,
            term_columns
        );
    }
    Ok((rows, columns))
}

/// Run the interactive session until the user quits.
///
/// The board takes the configured dimensions, falling back to the terminal
/// size for whichever is unset.
pub fn run(settings: &Settings, pattern: Option<&Pattern>) -> Result<()> {
    let (rows, columns) = fit_to_terminal(
        settings.board.rows,
        settings.board.columns,
        TerminalScreen::size()?,
    )?;

    let mut session = Session::new(rows, columns, settings)?;
    if let Some(pattern) = pattern {
        session.load_pattern(pattern)?;
    }

    let mut screen = TerminalScreen::enter(&settings.display)?;
    let tick_interval = Duration::from_millis(settings.simulation.tick_interval_ms);
    let mut last_tick = Instant::now();

    loop {
        let cursor = session.is_paused().then(|| session.cursor());
        screen.draw(session.board(), cursor)?;

        let wait = if session.is_paused() {
            tick_interval
        } else {
            (last_tick + tick_interval).saturating_duration_since(Instant::now())
        };
        if let Some(key) = TerminalScreen::poll_key(wait)? {
            if session.handle_key(key)? == Flow::Quit {
                break;
            }
        }

        if last_tick.elapsed() >= tick_interval {
            session.advance()?;
            last_tick = Instant::now();
        }
    }

    Ok(())
}
