//! Pattern files and board snapshots

use super::board::{Board, Coordinate};
use super::error::BoardError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A rectangular block of cells read from a text pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Build a pattern from row-major cells
    pub fn new(rows: usize, columns: usize, cells: Vec<bool>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            anyhow::bail!("Pattern dimensions must be positive, got {}x{}", rows, columns);
        }
        if rows.checked_mul(columns) != Some(cells.len()) {
            anyhow::bail!(
                "Pattern of {}x{} needs {} cells, got {}",
                rows,
                columns,
                rows.saturating_mul(columns),
                cells.len()
            );
        }
        Ok(Self { rows, columns, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Offsets of the living cells, row-major
    pub fn living_offsets(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(index, _)| Coordinate::new(index / self.columns, index % self.columns))
    }

    /// Write the pattern's living cells onto `board` with its top-left corner
    /// at `origin`. Dead cells of the pattern leave the board untouched.
    ///
    /// Nothing is written unless the whole pattern fits.
    pub fn stamp(&self, board: &mut Board, origin: Coordinate) -> Result<(), BoardError> {
        let far_corner = Coordinate::new(
            origin.row.saturating_add(self.rows.saturating_sub(1)),
            origin.column.saturating_add(self.columns.saturating_sub(1)),
        );
        if !board.contains(far_corner) {
            // surface the real error (uninitialized vs. out of bounds)
            board.is_alive(far_corner)?;
        }
        for offset in self.living_offsets() {
            let pos = Coordinate::new(origin.row + offset.row, origin.column + offset.column);
            board.set_cell(pos, true)?;
        }
        Ok(())
    }

    /// Origin that places the pattern in the middle of a `rows x columns` board
    pub fn centered_origin(&self, rows: usize, columns: usize) -> Coordinate {
        Coordinate::new(
            rows.saturating_sub(self.rows) / 2,
            columns.saturating_sub(self.columns) / 2,
        )
    }
}

/// Serializable view of a board for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub generation: u64,
    pub living: Vec<Coordinate>,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Result<Self> {
        let (rows, columns) = board
            .dimensions()
            .ok_or(BoardError::NotInitialized)
            .context("Cannot snapshot board")?;
        Ok(Self {
            rows,
            columns,
            generation: board.generation(),
            living: board.living_cells(),
        })
    }
}

/// Load a pattern from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a pattern from its text representation
pub fn parse_pattern(content: &str) -> Result<Pattern> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let rows = lines.len();
    let columns = lines[0].chars().count();
    let mut cells = Vec::with_capacity(rows * columns);

    for (row_idx, line) in lines.iter().enumerate() {
        let length = line.chars().count();
        if length != columns {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                length,
                columns
            );
        }

        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => cells.push(false),
                '1' => cells.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
    }

    Pattern::new(rows, columns, cells)
}

/// Convert a board to the pattern text format
pub fn board_to_string(board: &Board) -> String {
    let Some((rows, columns)) = board.dimensions() else {
        return String::new();
    };
    let mut result = String::with_capacity(rows * (columns + 1));

    for row in 0..rows {
        for column in 0..columns {
            let alive = board.is_alive(Coordinate::new(row, column)).unwrap_or(false);
            result.push(if alive { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Save a board in the pattern text format
pub fn save_board_to_file<P: AsRef<Path>>(board: &Board, path: P) -> Result<()> {
    let content = board_to_string(board);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Write a handful of classic patterns to `output_dir`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        ("glider.txt", "010\n001\n111\n"),
        ("blinker.txt", "000\n111\n000\n"),
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        ("beacon.txt", "1100\n1100\n0011\n0011\n"),
    ];
    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
