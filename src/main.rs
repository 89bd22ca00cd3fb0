//! Command line entry point for the Life console

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_console::{
    config::{CliOverrides, Settings},
    game_of_life::{create_example_patterns, load_pattern_from_file, Pattern, Preset},
    interface,
    telemetry::{init_telemetry, LogSink},
    utils::{BoardFormatter, ColorOutput, OutputFormat},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "life_console")]
#[command(about = "Conway's Game of Life in the terminal")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit and run a board interactively
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board rows (defaults to terminal height)
        #[arg(long)]
        rows: Option<usize>,

        /// Board columns (defaults to terminal width)
        #[arg(long)]
        columns: Option<usize>,

        /// Starting preset
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// Pattern file stamped in the middle of the board
        #[arg(long)]
        pattern: Option<PathBuf>,

        /// Milliseconds between generations
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Seed for the random preset
        #[arg(long)]
        seed: Option<u64>,

        /// Write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Advance a board without a terminal and print the result
    Simulate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board rows (defaults to the pattern's height)
        #[arg(long)]
        rows: Option<usize>,

        /// Board columns (defaults to the pattern's width)
        #[arg(long)]
        columns: Option<usize>,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Starting preset
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// Pattern file stamped in the middle of the board
        #[arg(long)]
        pattern: Option<PathBuf>,

        /// Seed for the random preset
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the final board here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_report(&err));
            ExitCode::FAILURE
        }
    }
}

/// The error and its context chain, one cause per line
fn error_report(err: &anyhow::Error) -> String {
    let mut report = ColorOutput::error(&format!("Error: {}", err));
    for cause in err.chain().skip(1) {
        report.push_str(&format!("\n  caused by: {}", cause));
    }
    report
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config, rows, columns, preset, pattern, interval_ms, seed, log_file,
        } => {
            let overrides = CliOverrides {
                rows,
                columns,
                tick_interval_ms: interval_ms,
                preset,
                seed,
                log_file,
            };
            run_command(&config, &overrides, pattern.as_deref())
        }
        Commands::Simulate {
            config, rows, columns, generations, preset, pattern, seed, format, output,
        } => {
            let overrides = CliOverrides {
                rows,
                columns,
                preset,
                seed,
                ..CliOverrides::default()
            };
            simulate_command(&config, &overrides, pattern.as_deref(), generations, format, output)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn load_pattern(path: Option<&Path>) -> Result<Option<Pattern>> {
    path.map(load_pattern_from_file).transpose()
}

fn run_command(config_path: &PathBuf, overrides: &CliOverrides, pattern: Option<&Path>) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    init_telemetry(&settings.logging, LogSink::FileOnly)?;
    let pattern = load_pattern(pattern)?;

    interface::run(&settings, pattern.as_ref())
}

fn simulate_command(
    config_path: &PathBuf,
    overrides: &CliOverrides,
    pattern: Option<&Path>,
    generations: usize,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    init_telemetry(&settings.logging, LogSink::Stderr)?;
    let pattern = load_pattern(pattern)?;

    let start_time = Instant::now();
    let board = life_console::simulate(&settings, pattern.as_ref(), generations)?;
    info!(
        generations,
        living = board.living_count(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "simulation finished"
    );

    match output {
        Some(path) => {
            BoardFormatter::save(&board, &path, format)
                .with_context(|| format!("Failed to write board to {}", path.display()))?;
            println!("{}", ColorOutput::success(&format!("Board saved to {}", path.display())));
        }
        None => print!("{}", BoardFormatter::render(&board, format)?),
    }
    if format == OutputFormat::Text {
        println!("{}", ColorOutput::info(&BoardFormatter::format_summary(&board)));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: life_console run --pattern {}", pattern_dir.join("glider.txt").display());

    Ok(())
}
