//! Configuration management for the Life console

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, DisplayConfig, InputConfig, LoggingConfig, PresetConfig, Settings,
    SimulationConfig,
};
