//! Display and output formatting utilities

use crate::game_of_life::{Board, BoardSnapshot, Coordinate};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Output format for headless runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Block glyphs with row/column rulers
    Text,
    /// `BoardSnapshot` as pretty JSON
    Json,
    /// The `0`/`1` pattern format, loadable with `--pattern`
    Pattern,
}

/// Format boards for console output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format a board with coordinates
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::new();
        let Some((rows, columns)) = board.dimensions() else {
            return output;
        };

        // Header with column numbers
        output.push_str("   ");
        for column in 0..columns {
            output.push_str(&format!("{:2}", column % 10));
        }
        output.push('\n');

        for row in 0..rows {
            output.push_str(&format!("{:2} ", row % 100));
            for column in 0..columns {
                output.push_str(if Self::alive(board, row, column) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line statistics
    pub fn format_summary(board: &Board) -> String {
        match board.dimensions() {
            Some((rows, columns)) => {
                let living = board.living_count();
                format!(
                    "Generation {} | {}x{} | Living: {} | Density: {:.1}%",
                    board.generation(),
                    rows,
                    columns,
                    living,
                    living as f64 / (rows * columns) as f64 * 100.0
                )
            }
            None => "Board not initialized".to_string(),
        }
    }

    /// Render a board in the requested format
    pub fn render(board: &Board, format: OutputFormat) -> Result<String> {
        let rendered = match format {
            OutputFormat::Text => Self::format_board_with_coords(board),
            OutputFormat::Json => {
                let snapshot = BoardSnapshot::capture(board)?;
                let mut json = serde_json::to_string_pretty(&snapshot)?;
                json.push('\n');
                json
            }
            OutputFormat::Pattern => crate::game_of_life::io::board_to_string(board),
        };
        Ok(rendered)
    }

    /// Render and write a board to `path`, creating parent directories
    pub fn save<P: AsRef<Path>>(board: &Board, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::render(board, format)?)?;
        Ok(())
    }

    fn alive(board: &Board, row: usize, column: usize) -> bool {
        board.is_alive(Coordinate::new(row, column)).unwrap_or(false)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
