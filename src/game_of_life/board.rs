//! Bit-packed Game of Life board
//!
//! The board is the only stateful piece of the engine. It starts out
//! uninitialized, gains a generation through [`Board::initialize`], and gives
//! its storage back through [`Board::shutdown`]. Every cell access is bounds
//! checked; neighbors outside the grid count as dead.

use super::error::{BoardError, InitError, ShutdownError};
use super::rules::LifeRules;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use std::fmt;

const WORD_BITS: usize = u64::BITS as usize;

/// A (row, column) position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub column: usize,
}

impl Coordinate {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// One generation of cells packed 64 to a word, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cells {
    rows: usize,
    columns: usize,
    words: Vec<u64>,
}

impl Cells {
    /// All-dead storage. `rows * columns` must already be known not to overflow.
    fn zeroed(rows: usize, columns: usize) -> Result<Self, TryReserveError> {
        let count = (rows * columns).div_ceil(WORD_BITS);
        let mut words = Vec::new();
        words.try_reserve_exact(count)?;
        words.resize(count, 0);
        Ok(Self { rows, columns, words })
    }

    #[inline]
    fn contains(&self, pos: Coordinate) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    #[inline]
    fn bit(&self, row: usize, column: usize) -> (usize, u64) {
        let index = row * self.columns + column;
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> bool {
        let (word, mask) = self.bit(row, column);
        self.words[word] & mask != 0
    }

    #[inline]
    fn set(&mut self, row: usize, column: usize, alive: bool) {
        let (word, mask) = self.bit(row, column);
        if alive {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    fn count_neighbors(&self, row: usize, column: usize) -> u8 {
        LifeRules::NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| {
                match (row.checked_add_signed(dr), column.checked_add_signed(dc)) {
                    (Some(r), Some(c)) if r < self.rows && c < self.columns => self.get(r, c),
                    _ => false, // off the edge is dead
                }
            })
            .count() as u8
    }

    fn out_of_bounds(&self, pos: Coordinate) -> BoardError {
        BoardError::OutOfBounds {
            pos,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

/// A fixed-size Life board with explicit initialize/shutdown lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: Option<Cells>,
    generation: u64,
}

impl Board {
    /// Create an uninitialized board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board and initialize it in one step
    pub fn with_dimensions(rows: usize, columns: usize) -> Result<Self, InitError> {
        let mut board = Self::new();
        board.initialize(rows, columns)?;
        Ok(board)
    }

    /// Allocate an all-dead generation of `rows * columns` cells
    pub fn initialize(&mut self, rows: usize, columns: usize) -> Result<(), InitError> {
        if self.cells.is_some() {
            return Err(InitError::AlreadyInitialized);
        }
        let invalid = InitError::InvalidDimensions { rows, columns };
        if rows == 0 || columns == 0 {
            return Err(invalid);
        }
        let count = rows.checked_mul(columns).ok_or(invalid)?;

        let cells = Cells::zeroed(rows, columns)
            .map_err(|_| InitError::AllocationFailed { cells: count })?;
        self.cells = Some(cells);
        self.generation = 0;
        Ok(())
    }

    /// Release storage and return to the uninitialized state
    pub fn shutdown(&mut self) -> Result<(), ShutdownError> {
        self.cells.take().map(drop).ok_or(ShutdownError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.cells.is_some()
    }

    /// `(rows, columns)` when initialized
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.cells.as_ref().map(|cells| (cells.rows, cells.columns))
    }

    /// Number of ticks applied since the last `initialize`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `pos` lies on the board. Always false when uninitialized.
    pub fn contains(&self, pos: Coordinate) -> bool {
        self.cells.as_ref().is_some_and(|cells| cells.contains(pos))
    }

    pub fn is_alive(&self, pos: Coordinate) -> Result<bool, BoardError> {
        let cells = self.checked(pos)?;
        Ok(cells.get(pos.row, pos.column))
    }

    /// Set a cell in the current generation; visible immediately
    pub fn set_cell(&mut self, pos: Coordinate, alive: bool) -> Result<(), BoardError> {
        self.checked_mut(pos)?.set(pos.row, pos.column, alive);
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, pos: Coordinate) -> Result<bool, BoardError> {
        let cells = self.checked_mut(pos)?;
        let alive = !cells.get(pos.row, pos.column);
        cells.set(pos.row, pos.column, alive);
        Ok(alive)
    }

    /// Kill every cell without touching the generation counter
    pub fn clear(&mut self) -> Result<(), BoardError> {
        let cells = self.cells.as_mut().ok_or(BoardError::NotInitialized)?;
        cells.words.fill(0);
        Ok(())
    }

    /// Advance one generation.
    ///
    /// Every transition is computed from the current generation as it stood
    /// before the call; the result is built in a fresh buffer and swapped in
    /// only once complete. On allocation failure nothing changes.
    pub fn tick(&mut self) -> Result<(), BoardError> {
        self.tick_into(Cells::zeroed)
    }

    /// `tick` with the next-generation buffer obtained from `allocate`
    fn tick_into<F>(&mut self, allocate: F) -> Result<(), BoardError>
    where
        F: FnOnce(usize, usize) -> Result<Cells, TryReserveError>,
    {
        let current = self.cells.as_ref().ok_or(BoardError::NotInitialized)?;
        let mut next =
            allocate(current.rows, current.columns).map_err(|_| BoardError::AllocationFailed)?;

        for (row, column) in iproduct!(0..current.rows, 0..current.columns) {
            let alive = current.get(row, column);
            if LifeRules::next_state(alive, current.count_neighbors(row, column)) {
                next.set(row, column, true);
            }
        }

        // the previous generation is dropped here
        self.cells = Some(next);
        self.generation += 1;
        Ok(())
    }

    /// Apply `generations` ticks, stopping at the first failure
    pub fn tick_n(&mut self, generations: usize) -> Result<(), BoardError> {
        for _ in 0..generations {
            self.tick()?;
        }
        Ok(())
    }

    /// Count living neighbors of an in-range cell
    pub fn neighbor_count(&self, pos: Coordinate) -> Result<u8, BoardError> {
        let cells = self.checked(pos)?;
        Ok(cells.count_neighbors(pos.row, pos.column))
    }

    /// Total living cells; zero when uninitialized
    pub fn living_count(&self) -> usize {
        self.cells.as_ref().map_or(0, |cells| {
            cells.words.iter().map(|w| w.count_ones() as usize).sum()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.living_count() == 0
    }

    /// Living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<Coordinate> {
        let Some(cells) = self.cells.as_ref() else {
            return Vec::new();
        };
        iproduct!(0..cells.rows, 0..cells.columns)
            .filter(|&(row, column)| cells.get(row, column))
            .map(Coordinate::from)
            .collect()
    }

    fn checked(&self, pos: Coordinate) -> Result<&Cells, BoardError> {
        let cells = self.cells.as_ref().ok_or(BoardError::NotInitialized)?;
        if cells.contains(pos) {
            Ok(cells)
        } else {
            Err(cells.out_of_bounds(pos))
        }
    }

    fn checked_mut(&mut self, pos: Coordinate) -> Result<&mut Cells, BoardError> {
        let cells = self.cells.as_mut().ok_or(BoardError::NotInitialized)?;
        if cells.contains(pos) {
            Ok(cells)
        } else {
            Err(cells.out_of_bounds(pos))
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(cells) = self.cells.as_ref() else {
            return Ok(());
        };
        for row in 0..cells.rows {
            for column in 0..cells.columns {
                let symbol = if cells.get(row, column) { '@' } else { '.' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(rows: usize, columns: usize, alive: &[(usize, usize)]) -> Board {
        let mut board = Board::with_dimensions(rows, columns).unwrap();
        for &pos in alive {
            board.set_cell(pos.into(), true).unwrap();
        }
        board
    }

    fn alive_set(board: &Board) -> Vec<(usize, usize)> {
        board
            .living_cells()
            .into_iter()
            .map(|pos| (pos.row, pos.column))
            .collect()
    }

    #[test]
    fn test_initial_state_is_dead() {
        let board = Board::with_dimensions(7, 13).unwrap();
        assert_eq!(board.dimensions(), Some((7, 13)));
        assert_eq!(board.generation(), 0);
        for (row, column) in iproduct!(0..7, 0..13) {
            assert!(!board.is_alive(Coordinate::new(row, column)).unwrap());
        }
        assert!(board.is_empty());
    }

    #[test]
    fn test_bounds_invariant() {
        let mut board = Board::with_dimensions(3, 5).unwrap();
        for (row, column) in iproduct!(0..3, 0..5) {
            let pos = Coordinate::new(row, column);
            assert!(board.is_alive(pos).is_ok());
            assert!(board.set_cell(pos, false).is_ok());
        }

        for pos in [
            Coordinate::new(3, 0),
            Coordinate::new(0, 5),
            Coordinate::new(3, 5),
            Coordinate::new(usize::MAX, 0),
            Coordinate::new(0, usize::MAX),
        ] {
            let expected = BoardError::OutOfBounds { pos, rows: 3, columns: 5 };
            assert_eq!(board.is_alive(pos), Err(expected.clone()));
            assert_eq!(board.set_cell(pos, true), Err(expected));
        }
        assert!(board.is_empty());
    }

    #[test]
    fn test_set_get_round_trip_touches_one_cell() {
        // 9x9 = 81 cells, spans a word boundary
        let mut board = Board::with_dimensions(9, 9).unwrap();
        for (row, column) in iproduct!(0..9, 0..9) {
            let pos = Coordinate::new(row, column);
            board.set_cell(pos, true).unwrap();
            assert!(board.is_alive(pos).unwrap());
            assert_eq!(board.living_count(), 1);

            board.set_cell(pos, false).unwrap();
            assert!(!board.is_alive(pos).unwrap());
            assert!(board.is_empty());
        }
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut board = Board::with_dimensions(4, 4).unwrap();
        let pos = Coordinate::new(2, 3);
        assert!(board.toggle(pos).unwrap());
        assert!(board.is_alive(pos).unwrap());
        assert!(!board.toggle(pos).unwrap());
        assert!(!board.is_alive(pos).unwrap());

        board.set_cell(Coordinate::new(0, 0), true).unwrap();
        board.set_cell(Coordinate::new(3, 3), true).unwrap();
        board.clear().unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_block_is_still_life() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let mut board = board_with(4, 4, &block);
        for _ in 0..5 {
            board.tick().unwrap();
            assert_eq!(alive_set(&board), block.to_vec());
        }
        assert_eq!(board.generation(), 5);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = vec![(2, 1), (2, 2), (2, 3)];
        let vertical = vec![(1, 2), (2, 2), (3, 2)];
        let mut board = board_with(5, 5, &horizontal);

        board.tick().unwrap();
        assert_eq!(alive_set(&board), vertical);

        board.tick().unwrap();
        assert_eq!(alive_set(&board), horizontal);
    }

    #[test]
    fn test_underpopulation_and_overpopulation() {
        let mut lonely = board_with(3, 3, &[(1, 1)]);
        lonely.tick().unwrap();
        assert!(lonely.is_empty());

        // plus sign: centre has four neighbors
        let mut crowded = board_with(5, 5, &[(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)]);
        assert_eq!(crowded.neighbor_count(Coordinate::new(2, 2)).unwrap(), 4);
        crowded.tick().unwrap();
        assert!(!crowded.is_alive(Coordinate::new(2, 2)).unwrap());
    }

    #[test]
    fn test_birth_rule() {
        let target = Coordinate::new(2, 2);

        let mut three = board_with(5, 5, &[(1, 1), (1, 3), (3, 2)]);
        three.tick().unwrap();
        assert!(three.is_alive(target).unwrap());

        let mut two = board_with(5, 5, &[(1, 1), (3, 3)]);
        two.tick().unwrap();
        assert!(!two.is_alive(target).unwrap());

        let mut four = board_with(5, 5, &[(1, 1), (1, 3), (3, 1), (3, 3)]);
        four.tick().unwrap();
        assert!(!four.is_alive(target).unwrap());
    }

    #[test]
    fn test_tick_reads_frozen_generation() {
        // An in-place left-to-right update would kill (0, 1) before (0, 2)
        // is evaluated and lose the births above and below the centre.
        let mut board = board_with(3, 5, &[(1, 1), (1, 2), (1, 3)]);
        board.tick().unwrap();
        assert_eq!(alive_set(&board), vec![(0, 2), (1, 2), (2, 2)]);

        let mut edge = board_with(1, 3, &[(0, 0), (0, 1), (0, 2)]);
        edge.tick().unwrap();
        assert_eq!(alive_set(&edge), vec![(0, 1)]);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        // a blinker against the left edge would survive if the board wrapped
        let mut board = board_with(5, 5, &[(1, 0), (2, 0), (3, 0)]);
        board.tick().unwrap();
        assert_eq!(alive_set(&board), vec![(2, 0), (2, 1)]);

        let corner = board_with(3, 3, &[(0, 1), (1, 0), (1, 1)]);
        assert_eq!(corner.neighbor_count(Coordinate::new(0, 0)).unwrap(), 3);
        assert_eq!(corner.neighbor_count(Coordinate::new(2, 2)).unwrap(), 1);
    }

    #[test]
    fn test_glider_travels() {
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut board = board_with(8, 8, &glider);
        board.tick_n(4).unwrap();
        let shifted: Vec<_> = glider.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(alive_set(&board), shifted);
        assert_eq!(board.generation(), 4);
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut board = Board::new();
        assert_eq!(board.shutdown(), Err(ShutdownError::NotInitialized));
        assert_eq!(board.tick(), Err(BoardError::NotInitialized));
        assert_eq!(board.is_alive(Coordinate::new(0, 0)), Err(BoardError::NotInitialized));
        assert_eq!(
            board.set_cell(Coordinate::new(0, 0), true),
            Err(BoardError::NotInitialized)
        );

        board.initialize(4, 4).unwrap();
        assert_eq!(board.initialize(4, 4), Err(InitError::AlreadyInitialized));

        board.shutdown().unwrap();
        assert!(!board.is_initialized());
        assert_eq!(board.is_alive(Coordinate::new(0, 0)), Err(BoardError::NotInitialized));
        assert_eq!(board.shutdown(), Err(ShutdownError::NotInitialized));

        // re-initialization after shutdown starts fresh
        board.initialize(2, 2).unwrap();
        assert_eq!(board.dimensions(), Some((2, 2)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut board = Board::new();
        assert_eq!(
            board.initialize(0, 5),
            Err(InitError::InvalidDimensions { rows: 0, columns: 5 })
        );
        assert_eq!(
            board.initialize(5, 0),
            Err(InitError::InvalidDimensions { rows: 5, columns: 0 })
        );
        assert_eq!(
            board.initialize(usize::MAX, 2),
            Err(InitError::InvalidDimensions { rows: usize::MAX, columns: 2 })
        );
        assert!(!board.is_initialized());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocation_failure_leaves_board_uninitialized() {
        let mut board = Board::new();
        let rows = 1usize << 40;
        let columns = 1usize << 22;
        assert_eq!(
            board.initialize(rows, columns),
            Err(InitError::AllocationFailed { cells: rows * columns })
        );
        assert!(!board.is_initialized());
        board.initialize(3, 3).unwrap();
    }

    #[test]
    fn test_tick_allocation_failure_keeps_generation() {
        let mut board = board_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        board.tick().unwrap();
        let before = alive_set(&board);

        let err = Vec::<u64>::new().try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(board.tick_into(|_, _| Err(err)), Err(BoardError::AllocationFailed));
        assert_eq!(board.generation(), 1);
        assert_eq!(alive_set(&board), before);

        // a later tick with working allocation carries on from the same state
        board.tick().unwrap();
        assert_eq!(board.generation(), 2);
        assert_eq!(alive_set(&board), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_display() {
        let board = board_with(2, 3, &[(0, 0), (1, 2)]);
        assert_eq!(board.to_string(), "@..\n..@\n");
        assert_eq!(Board::new().to_string(), "");
    }
}
