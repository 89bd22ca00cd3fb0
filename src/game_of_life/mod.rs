//! Game of Life engine: board storage, the transition rule and presets

pub mod board;
pub mod error;
pub mod io;
pub mod presets;
pub mod rules;

pub use board::{Board, Coordinate};
pub use error::{BoardError, InitError, ShutdownError};
pub use io::{create_example_patterns, load_pattern_from_file, save_board_to_file, BoardSnapshot, Pattern};
pub use presets::Preset;
pub use rules::LifeRules;
