//! Starting patterns applied through the board's public mutation API

use super::board::{Board, Coordinate};
use super::error::BoardError;
use clap::ValueEnum;
use itertools::iproduct;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Built-in starting patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Every cell independently alive with probability 1/denominator
    Random,
    /// A full-width line across the middle row
    HorizontalLine,
    /// A full-height line down the middle column
    VerticalLine,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Random, Preset::HorizontalLine, Preset::VerticalLine];

    /// The preset after this one in cycling order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Preset::Random => Preset::HorizontalLine,
            Preset::HorizontalLine => Preset::VerticalLine,
            Preset::VerticalLine => Preset::Random,
        }
    }

    /// Write the pattern onto an initialized board.
    ///
    /// Lines only set cells alive; the random fill overwrites every cell.
    pub fn apply<R: Rng + ?Sized>(
        self,
        board: &mut Board,
        denominator: NonZeroU32,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        match self {
            Preset::Random => random_fill(board, denominator, rng),
            Preset::HorizontalLine => horizontal_line(board),
            Preset::VerticalLine => vertical_line(board),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Random => "random",
            Preset::HorizontalLine => "horizontal line",
            Preset::VerticalLine => "vertical line",
        };
        f.write_str(name)
    }
}

fn dimensions(board: &Board) -> Result<(usize, usize), BoardError> {
    board.dimensions().ok_or(BoardError::NotInitialized)
}

/// Decide every cell independently: alive when a uniform draw from
/// `0..denominator` comes up zero
pub fn random_fill<R: Rng + ?Sized>(
    board: &mut Board,
    denominator: NonZeroU32,
    rng: &mut R,
) -> Result<(), BoardError> {
    let (rows, columns) = dimensions(board)?;
    for (row, column) in iproduct!(0..rows, 0..columns) {
        let alive = rng.random_range(0..denominator.get()) == 0;
        board.set_cell(Coordinate::new(row, column), alive)?;
    }
    Ok(())
}

pub fn horizontal_line(board: &mut Board) -> Result<(), BoardError> {
    let (rows, columns) = dimensions(board)?;
    let row = rows / 2;
    for column in 0..columns {
        board.set_cell(Coordinate::new(row, column), true)?;
    }
    Ok(())
}

pub fn vertical_line(board: &mut Board) -> Result<(), BoardError> {
    let (rows, columns) = dimensions(board)?;
    let column = columns / 2;
    for row in 0..rows {
        board.set_cell(Coordinate::new(row, column), true)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn denominator(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn test_horizontal_line() {
        let mut board = Board::with_dimensions(5, 8).unwrap();
        horizontal_line(&mut board).unwrap();
        assert_eq!(board.living_count(), 8);
        assert!(board.living_cells().iter().all(|pos| pos.row == 2));
    }

    #[test]
    fn test_vertical_line() {
        let mut board = Board::with_dimensions(6, 7).unwrap();
        vertical_line(&mut board).unwrap();
        assert_eq!(board.living_count(), 6);
        assert!(board.living_cells().iter().all(|pos| pos.column == 3));
    }

    #[test]
    fn test_random_fill_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::with_dimensions(10, 10).unwrap();

        random_fill(&mut board, denominator(1), &mut rng).unwrap();
        assert_eq!(board.living_count(), 100);

        // overwrites cells that were alive before
        let mut sparse = Board::with_dimensions(40, 40).unwrap();
        horizontal_line(&mut sparse).unwrap();
        random_fill(&mut sparse, denominator(u32::MAX), &mut rng).unwrap();
        assert!(sparse.living_count() < 5);
    }

    #[test]
    fn test_random_fill_is_reproducible() {
        let mut a = Board::with_dimensions(20, 30).unwrap();
        let mut b = Board::with_dimensions(20, 30).unwrap();
        random_fill(&mut a, denominator(2), &mut StdRng::seed_from_u64(42)).unwrap();
        random_fill(&mut b, denominator(2), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        // roughly half of 600 cells
        let living = a.living_count();
        assert!((200..400).contains(&living), "living = {}", living);
    }

    #[test]
    fn test_presets_require_initialized_board() {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(1);
        for preset in Preset::ALL {
            assert_eq!(
                preset.apply(&mut board, denominator(2), &mut rng),
                Err(BoardError::NotInitialized)
            );
        }
    }

    #[test]
    fn test_cycle_order() {
        let mut preset = Preset::Random;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(preset);
            preset = preset.next();
        }
        assert_eq!(seen, Preset::ALL.to_vec());
        assert_eq!(preset, Preset::Random);
    }
}
