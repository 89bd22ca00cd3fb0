//! Error types returned by the board engine

use super::board::Coordinate;
use thiserror::Error;

/// Errors from [`Board::initialize`](super::Board::initialize)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The board already holds a generation; shut it down first.
    #[error("board is already initialized")]
    AlreadyInitialized,

    /// Zero rows or columns, or a cell count that overflows `usize`.
    #[error("invalid board dimensions {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    /// Backing storage could not be reserved.
    #[error("failed to allocate storage for {cells} cells")]
    AllocationFailed { cells: usize },
}

/// Errors from [`Board::shutdown`](super::Board::shutdown)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShutdownError {
    #[error("board is not initialized")]
    NotInitialized,
}

/// Errors from cell access and generation updates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board is not initialized")]
    NotInitialized,

    #[error("coordinate {pos} out of bounds for {rows}x{columns} board")]
    OutOfBounds {
        pos: Coordinate,
        rows: usize,
        columns: usize,
    },

    /// The next-generation buffer could not be reserved. The current
    /// generation is left untouched.
    #[error("failed to allocate next-generation buffer")]
    AllocationFailed,
}
