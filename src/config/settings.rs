//! Configuration settings for the Life console

use crate::game_of_life::Preset;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    pub simulation: SimulationConfig,
    pub preset: PresetConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Board dimensions; unset values follow the terminal size
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub start_paused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    pub initial: Option<Preset>,
    pub random_denominator: NonZeroU32,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub cursor_jump: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub alive_glyph: char,
    pub dead_glyph: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            start_paused: true,
        }
    }
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            initial: None,
            random_denominator: NonZeroU32::MIN.saturating_add(1),
            seed: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { cursor_jump: 10 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alive_glyph: '@',
            dead_glyph: ' ',
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.rows == Some(0) || self.board.columns == Some(0) {
            anyhow::bail!("Board rows and columns must be positive");
        }

        if self.simulation.tick_interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if self.input.cursor_jump == 0 {
            anyhow::bail!("Cursor jump must be positive");
        }

        if self.display.alive_glyph == self.display.dead_glyph {
            anyhow::bail!("Alive and dead glyphs must differ");
        }

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("Logging level must not be empty");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.board.rows = Some(rows);
        }
        if let Some(columns) = cli_overrides.columns {
            self.board.columns = Some(columns);
        }
        if let Some(interval) = cli_overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = interval;
        }
        if let Some(preset) = cli_overrides.preset {
            self.preset.initial = Some(preset);
        }
        if let Some(seed) = cli_overrides.seed {
            self.preset.seed = Some(seed);
        }
        if let Some(ref file) = cli_overrides.log_file {
            self.logging.file = Some(file.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub preset: Option<Preset>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}
