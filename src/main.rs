mod render;
mod replay;
mod scroll;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use daybreak_config::{get_data_dir, Config, LoggingSettings};
use daybreak_logger::LogLevel;
use daybreak_theme::{load_stages, ThemeEngine};

use render::CssRenderer;
use replay::{Command, Replay};

const USAGE: &str = "Usage: daybreak [SCRIPT]\n\n\
Replays scroll commands from SCRIPT (or stdin) and prints the resulting\n\
theme palettes as CSS custom properties.";

/// Configured log file, or `daybreak.log` in the data directory.
fn log_file_path(settings: &LoggingSettings) -> Option<PathBuf> {
    match &settings.file_path {
        Some(path) => Some(PathBuf::from(path)),
        None => get_data_dir().ok().map(|dir| dir.join("daybreak.log")),
    }
}

fn init_logging(settings: &LoggingSettings) {
    let min_level = settings.min_level.parse().unwrap_or(LogLevel::Info);
    daybreak_logger::init(log_file_path(settings), settings.max_entries, min_level);
}

/// Fall back to defaults on a broken config, logging why.
///
/// Call after the logger is initialized so the warning is kept.
fn report_config_error(error: Option<anyhow::Error>) {
    if let Some(e) = error {
        daybreak_logger::warn(format!("Failed to load config, using defaults: {:#}", e));
    }
}

/// Engine over the configured stage file, or the built-in stages.
fn build_engine(config: &Config) -> Result<ThemeEngine> {
    match config.stages_file_path() {
        Some(path) => {
            let stages = load_stages(&path)?;
            daybreak_logger::info(format!(
                "Loaded {} stages from {}",
                stages.len(),
                path.display()
            ));
            ThemeEngine::new(stages)
        }
        None => Ok(ThemeEngine::with_default_stages()),
    }
}

fn main() -> Result<()> {
    let script = std::env::args().nth(1);
    if matches!(script.as_deref(), Some("-h" | "--help")) {
        println!("{}", USAGE);
        return Ok(());
    }

    // Broken config should not block a replay
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config.logging);
    report_config_error(config_error);

    let engine = build_engine(&config)?;
    let mut replay = Replay::new(
        engine,
        CssRenderer::from_settings(&config.render),
        config.render.continuous,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    replay.render_current(&mut out)?;
    if let Some(initial) = &config.theme.initial {
        replay.apply(Command::Theme(initial.clone()), &mut out)?;
    }

    match script.as_deref() {
        None | Some("-") => replay.run(io::stdin().lock(), &mut out)?,
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            replay.run(BufReader::new(file), &mut out)?;
        }
    }

    daybreak_logger::info(format!(
        "Replay finished on '{}' at {:.3}",
        replay.engine().current_theme(),
        replay.engine().progress()
    ));

    for entry in daybreak_logger::get_entries()
        .iter()
        .filter(|e| e.level >= LogLevel::Warn)
    {
        eprintln!("{}", entry);
    }

    Ok(())
}
