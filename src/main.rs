//! Brick Breaker entry point
//!
//! Loads settings, takes over the terminal and runs the game loop. Logs go to
//! a file because the terminal is busy drawing the game.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Result;
use env_logger::Target;

use brick_breaker::Game;
use brick_breaker::audio::Mixer;
use brick_breaker::platform::TerminalPlatform;
use brick_breaker::settings::{DEFAULT_SETTINGS_FILE, Settings};

const LOG_FILE: &str = "brick-breaker.log";

/// Log file target, or stderr when the file can't be created
fn log_target(path: &Path) -> (Target, Option<io::Error>) {
    match File::create(path) {
        Ok(file) => (Target::Pipe(Box::new(file)), None),
        Err(e) => (Target::Stderr, Some(e)),
    }
}

fn init_logging() {
    let (target, err) = log_target(Path::new(LOG_FILE));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(target)
        .init();
    if let Some(e) = err {
        log::warn!("Cannot write {}, logging to stderr: {}", LOG_FILE, e);
    }
}

fn main() -> Result<()> {
    init_logging();
    log::info!("Brick Breaker starting");

    let settings_path = Path::new(DEFAULT_SETTINGS_FILE);
    let settings = Settings::load(settings_path);
    if !settings_path.exists() {
        // Leave an editable copy of the defaults behind
        settings.save(settings_path);
    }

    let mut game = Game::new(&settings);
    let mixer = Mixer::from_settings(&settings);
    let mut platform = TerminalPlatform::new(settings.effective_fps(), mixer)?;

    let result = game.run(&mut platform);

    // Always try to restore terminal state.
    if let Err(e) = platform.shutdown() {
        log::error!("Failed to restore terminal: {}", e);
    }
    if let Err(e) = &result {
        log::error!("Game loop failed: {:#}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_target_falls_back_to_stderr() {
        let path = std::env::temp_dir()
            .join("brick_breaker_missing_dir")
            .join("nested")
            .join(LOG_FILE);
        let (target, err) = log_target(&path);
        assert!(matches!(target, Target::Stderr));
        assert!(err.is_some());
    }

    #[test]
    fn test_log_target_uses_file() {
        let path = std::env::temp_dir().join(format!("brick_breaker_{}.log", std::process::id()));
        let (target, err) = log_target(&path);
        assert!(matches!(target, Target::Pipe(_)));
        assert!(err.is_none());
        let _ = std::fs::remove_file(&path);
    }
}
