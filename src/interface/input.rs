//! Key translation for the interactive session
//!
//! Raw key events become [`Command`] values; the board engine never sees
//! key codes.

use crate::game_of_life::Coordinate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The cursor moved; nothing else changes
    MoveTo(Coordinate),
    /// Toggle the cell under the cursor
    Confirm(Coordinate),
    /// Pause or resume the simulation
    Pause,
    Quit,
    /// Clear the board and apply the next preset
    CyclePreset,
    /// Advance exactly one generation
    Step,
}

/// Editing cursor kept inside a `rows x columns` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: Coordinate,
    rows: usize,
    columns: usize,
    jump: usize,
}

impl Cursor {
    /// A cursor at the centre of the grid. `rows` and `columns` must be non-zero.
    pub fn centered(rows: usize, columns: usize, jump: usize) -> Self {
        Self {
            position: Coordinate::new(rows / 2, columns / 2),
            rows,
            columns,
            jump,
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn recenter(&mut self) {
        self.position = Coordinate::new(self.rows / 2, self.columns / 2);
    }

    pub fn up(&mut self, steps: usize) {
        self.position.row = self.position.row.saturating_sub(steps);
    }

    pub fn down(&mut self, steps: usize) {
        self.position.row = self.position.row.saturating_add(steps).min(self.rows - 1);
    }

    pub fn left(&mut self, steps: usize) {
        self.position.column = self.position.column.saturating_sub(steps);
    }

    pub fn right(&mut self, steps: usize) {
        self.position.column = self
            .position
            .column
            .saturating_add(steps)
            .min(self.columns - 1);
    }
}

/// Translate a key press, moving the cursor when it is a movement key.
///
/// Arrows and WASD move one cell, h/j/k/l move by the cursor's jump.
/// Returns `None` for keys with no binding and for key releases.
pub fn translate(cursor: &mut Cursor, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let jump = cursor.jump;
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Command::Quit),
        (KeyCode::Char('q') | KeyCode::Esc, _) => return Some(Command::Quit),
        (KeyCode::Char('p'), _) => return Some(Command::Pause),
        (KeyCode::Char('.'), _) => return Some(Command::Step),
        (KeyCode::Char('c'), _) => return Some(Command::CyclePreset),
        (KeyCode::Enter | KeyCode::Char(' '), _) => {
            return Some(Command::Confirm(cursor.position()))
        }
        (KeyCode::Up | KeyCode::Char('w'), _) => cursor.up(1),
        (KeyCode::Down | KeyCode::Char('s'), _) => cursor.down(1),
        (KeyCode::Left | KeyCode::Char('a'), _) => cursor.left(1),
        (KeyCode::Right | KeyCode::Char('d'), _) => cursor.right(1),
        (KeyCode::Char('k'), _) => cursor.up(jump),
        (KeyCode::Char('j'), _) => cursor.down(jump),
        (KeyCode::Char('h'), _) => cursor.left(jump),
        (KeyCode::Char('l'), _) => cursor.right(jump),
        _ => return None,
    }
    Some(Command::MoveTo(cursor.position()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_single_steps_and_clamping() {
        let mut cursor = Cursor::centered(3, 3, 10);
        assert_eq!(cursor.position(), Coordinate::new(1, 1));

        assert_eq!(
            translate(&mut cursor, press(KeyCode::Up)),
            Some(Command::MoveTo(Coordinate::new(0, 1)))
        );
        assert_eq!(
            translate(&mut cursor, press(KeyCode::Char('w'))),
            Some(Command::MoveTo(Coordinate::new(0, 1)))
        );
        translate(&mut cursor, press(KeyCode::Char('d')));
        translate(&mut cursor, press(KeyCode::Right));
        assert_eq!(cursor.position(), Coordinate::new(0, 2));
        translate(&mut cursor, press(KeyCode::Down));
        translate(&mut cursor, press(KeyCode::Char('s')));
        translate(&mut cursor, press(KeyCode::Char('s')));
        assert_eq!(cursor.position(), Coordinate::new(2, 2));
        translate(&mut cursor, press(KeyCode::Char('a')));
        assert_eq!(cursor.position(), Coordinate::new(2, 1));
    }

    #[test]
    fn test_jumps_clamp_to_edges() {
        let mut cursor = Cursor::centered(40, 100, 10);
        assert_eq!(cursor.position(), Coordinate::new(20, 50));

        translate(&mut cursor, press(KeyCode::Char('l')));
        assert_eq!(cursor.position(), Coordinate::new(20, 60));
        translate(&mut cursor, press(KeyCode::Char('j')));
        translate(&mut cursor, press(KeyCode::Char('j')));
        assert_eq!(cursor.position(), Coordinate::new(39, 60));
        for _ in 0..7 {
            translate(&mut cursor, press(KeyCode::Char('h')));
        }
        assert_eq!(cursor.position(), Coordinate::new(39, 0));
        for _ in 0..5 {
            translate(&mut cursor, press(KeyCode::Char('k')));
        }
        assert_eq!(cursor.position(), Coordinate::new(0, 0));
    }

    #[test]
    fn test_command_keys() {
        let mut cursor = Cursor::centered(5, 5, 2);
        assert_eq!(
            translate(&mut cursor, press(KeyCode::Enter)),
            Some(Command::Confirm(Coordinate::new(2, 2)))
        );
        assert_eq!(
            translate(&mut cursor, press(KeyCode::Char(' '))),
            Some(Command::Confirm(Coordinate::new(2, 2)))
        );
        assert_eq!(translate(&mut cursor, press(KeyCode::Char('p'))), Some(Command::Pause));
        assert_eq!(translate(&mut cursor, press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(translate(&mut cursor, press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(translate(&mut cursor, press(KeyCode::Char('.'))), Some(Command::Step));
        assert_eq!(
            translate(&mut cursor, press(KeyCode::Char('c'))),
            Some(Command::CyclePreset)
        );
        assert_eq!(
            translate(
                &mut cursor,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Command::Quit)
        );
        assert_eq!(translate(&mut cursor, press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut cursor = Cursor::centered(5, 5, 2);
        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(&mut cursor, release), None);
        assert_eq!(cursor.position(), Coordinate::new(2, 2));
    }
}
