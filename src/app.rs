//! The frame loop
//!
//! [`Game`] is the explicit context that survives between sessions: the current
//! screen, the high score and where it is stored, the control mode and the RNG.
//! Each call to [`Game::frame`] handles input, advances the current screen,
//! plays sounds for what happened and draws the result.

use anyhow::Result;

use crate::audio::{MusicTrack, SoundEffect};
use crate::highscores::HighScoreStore;
use crate::platform::{Key, Platform};
use crate::settings::{ControlMode, Settings};
use crate::sim::{
    Difficulty, GameEvent, GamePhase, GameRng, PaddleInput, Screen, StartScreen, TickInput,
    TickOutcome,
};
use crate::ui;

pub struct Game {
    screen: Screen,
    high_score: u32,
    store: HighScoreStore,
    control_mode: ControlMode,
    rng: GameRng,
    events: Vec<GameEvent>,
}

impl Game {
    /// Build from settings, loading the recorded high score
    pub fn new(settings: &Settings) -> Self {
        let store = HighScoreStore::new(&settings.high_score_file);
        let rng = match settings.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::info!(
            "Control mode {}, RNG seed {}",
            settings.control_mode.as_str(),
            rng.seed()
        );
        Self::with_parts(store, settings.control_mode, rng)
    }

    pub fn with_parts(store: HighScoreStore, control_mode: ControlMode, rng: GameRng) -> Self {
        let high_score = store.load();
        Self {
            screen: Screen::Start(StartScreen),
            high_score,
            store,
            control_mode,
            rng,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.screen.phase()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Run until the platform asks to close
    pub fn run(&mut self, platform: &mut impl Platform) -> Result<()> {
        platform.play_music(MusicTrack::Background);
        while !platform.should_close() {
            self.frame(platform)?;
        }
        log::info!("Window closed, high score {}", self.high_score);
        Ok(())
    }

    /// One full frame: input, update, render, pacing
    pub fn frame(&mut self, platform: &mut impl Platform) -> Result<()> {
        platform.begin_frame()?;
        platform.update_music();
        self.update(platform);
        self.render(platform);
        platform.end_frame()
    }

    fn update(&mut self, platform: &mut impl Platform) {
        self.screen = match std::mem::take(&mut self.screen) {
            Screen::Start(start) => match menu_choice(&*platform) {
                Some(difficulty) => Screen::Playing(start.select(difficulty)),
                None => Screen::Start(start),
            },
            Screen::Playing(mut playing) => {
                let input = self.tick_input(&*platform);
                self.events.clear();
                let outcome = playing.update(&input, &mut self.rng, &mut self.events);
                self.play_event_sounds(platform);

                match outcome {
                    TickOutcome::Continue => Screen::Playing(playing),
                    TickOutcome::Lost => {
                        platform.play_sound(SoundEffect::GameOver);
                        Screen::GameOver(playing.lose())
                    }
                    TickOutcome::Won => {
                        platform.play_sound(SoundEffect::GameClear);
                        self.record_high_score(playing.session.score);
                        Screen::Ending(playing.win())
                    }
                }
            }
            Screen::GameOver(over) => {
                if platform.key_pressed(Key::Enter) {
                    Screen::Start(over.restart())
                } else {
                    Screen::GameOver(over)
                }
            }
            Screen::Ending(ending) => {
                if platform.key_pressed(Key::Enter) {
                    Screen::Start(ending.restart())
                } else {
                    Screen::Ending(ending)
                }
            }
        };
    }

    fn render(&self, platform: &mut impl Platform) {
        match &self.screen {
            Screen::Start(_) => ui::draw_start(platform, self.high_score),
            Screen::Playing(playing) => {
                ui::draw_playing(platform, &playing.session, self.high_score)
            }
            Screen::GameOver(over) => ui::draw_finished(platform, false, over.final_score),
            Screen::Ending(ending) => ui::draw_finished(platform, true, ending.final_score),
        }
    }

    fn tick_input(&self, platform: &impl Platform) -> TickInput {
        let paddle = match self.control_mode {
            ControlMode::Mouse => PaddleInput::Pointer {
                x: platform.pointer_position().x,
            },
            ControlMode::Keyboard => PaddleInput::Keys {
                left: platform.key_down(Key::Left) || platform.key_down(Key::A),
                right: platform.key_down(Key::Right) || platform.key_down(Key::D),
            },
        };
        TickInput { paddle }
    }

    fn play_event_sounds(&self, platform: &mut impl Platform) {
        for event in &self.events {
            match event {
                GameEvent::BlockBroken { .. } => platform.play_sound(SoundEffect::BlockBreak),
                GameEvent::ItemCollected { kind } => log::debug!("Collected {:?}", kind),
                _ => {}
            }
        }
    }

    /// Update and persist the high score if `score` beats it
    fn record_high_score(&mut self, score: u32) {
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        if let Err(e) = self.store.save(score) {
            log::warn!("High score not saved: {}", e);
        }
    }
}

/// Difficulty picked on the start screen this frame, click before keys
fn menu_choice(platform: &impl Platform) -> Option<Difficulty> {
    let clicked = platform
        .pointer_pressed()
        .then(|| ui::button_at(platform.pointer_position()))
        .flatten();
    clicked.or_else(|| {
        [
            (Key::One, Difficulty::Easy),
            (Key::Two, Difficulty::Normal),
            (Key::Three, Difficulty::Hard),
        ]
        .into_iter()
        .find(|(key, _)| platform.key_pressed(*key))
        .map(|(_, difficulty)| difficulty)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::HeadlessPlatform;
    use glam::Vec2;
    use std::path::PathBuf;

    fn temp_store(name: &str) -> HighScoreStore {
        let path: PathBuf = std::env::temp_dir().join(format!(
            "brick_breaker_app_{}_{}.txt",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    fn game(name: &str) -> Game {
        Game::with_parts(temp_store(name), ControlMode::Keyboard, GameRng::new(17))
    }

    fn session_mut(game: &mut Game) -> &mut crate::sim::Session {
        game.screen.session_mut().expect("playing")
    }

    #[test]
    fn test_key_selects_difficulty() {
        let mut game = game("key_select");
        let mut platform = HeadlessPlatform::new();
        game.frame(&mut platform).expect("frame");
        assert_eq!(game.phase(), GamePhase::Start);
        assert!(platform.drew_text("Select Difficulty"));

        platform.press(Key::Two);
        game.frame(&mut platform).expect("frame");
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(
            game.screen().session().map(|s| s.difficulty),
            Some(Difficulty::Normal)
        );
        assert!(platform.drew_text("Lives: 5"));
    }

    #[test]
    fn test_click_selects_button() {
        let mut game = game("click_select");
        let mut platform = HeadlessPlatform::new();

        // Click outside any button does nothing
        platform.click(Vec2::new(50.0, 50.0));
        game.frame(&mut platform).expect("frame");
        assert_eq!(game.phase(), GamePhase::Start);

        platform.click(Vec2::new(800.0, 560.0));
        game.frame(&mut platform).expect("frame");
        assert_eq!(
            game.screen().session().map(|s| s.difficulty),
            Some(Difficulty::Hard)
        );
    }

    #[test]
    fn test_click_beats_key_on_same_frame() {
        let mut game = game("click_key");
        let mut platform = HeadlessPlatform::new();
        platform.click(Vec2::new(800.0, 400.0));
        platform.press(Key::Three);
        game.frame(&mut platform).expect("frame");
        assert_eq!(
            game.screen().session().map(|s| s.difficulty),
            Some(Difficulty::Easy)
        );

        // A click that misses every button falls through to the keys
        let mut game = Game::with_parts(
            temp_store("click_miss_key"),
            ControlMode::Keyboard,
            GameRng::new(17),
        );
        let mut platform = HeadlessPlatform::new();
        platform.click(Vec2::new(50.0, 50.0));
        platform.press(Key::Three);
        game.frame(&mut platform).expect("frame");
        assert_eq!(
            game.screen().session().map(|s| s.difficulty),
            Some(Difficulty::Hard)
        );
    }

    #[test]
    fn test_last_life_goes_to_game_over() {
        let mut game = game("game_over");
        let mut platform = HeadlessPlatform::new();
        platform.press(Key::One);
        game.frame(&mut platform).expect("frame");

        let session = session_mut(&mut game);
        session.lives = 1;
        session.ball.pos = Vec2::new(300.0, 899.0);
        session.ball.vel = Vec2::new(0.0, 5.0);
        game.frame(&mut platform).expect("frame");

        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(platform.sounds.contains(&SoundEffect::GameOver));
        assert!(platform.drew_text("GAME OVER"));

        // Only Enter leaves the game-over screen
        platform.press(Key::One);
        game.frame(&mut platform).expect("frame");
        assert_eq!(game.phase(), GamePhase::GameOver);
        platform.press(Key::Enter);
        game.frame(&mut platform).expect("frame");
        assert_eq!(game.phase(), GamePhase::Start);
    }

    #[test]
    fn test_win_persists_high_score() {
        let store = temp_store("win");
        std::fs::write(store.path(), "1200").expect("seed high score");
        let path = store.path().to_path_buf();
        let mut game = Game::with_parts(store, ControlMode::Keyboard, GameRng::new(3));
        assert_eq!(game.high_score(), 1200);

        let mut platform = HeadlessPlatform::new();
        platform.press(Key::Three);
        game.frame(&mut platform).expect("frame");
        session_mut(&mut game).score = WIN_SCORE;
        game.frame(&mut platform).expect("frame");

        assert_eq!(game.phase(), GamePhase::Ending);
        assert_eq!(game.high_score(), 1500);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "1500");
        assert!(platform.sounds.contains(&SoundEffect::GameClear));
        assert!(platform.drew_text("YOU WON!"));

        platform.press(Key::Enter);
        game.frame(&mut platform).expect("frame");
        assert_eq!(game.phase(), GamePhase::Start);
        assert!(platform.drew_text("High Score: 1500"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_win_below_high_score_keeps_file() {
        let store = temp_store("win_low");
        std::fs::write(store.path(), "9999").expect("seed high score");
        let path = store.path().to_path_buf();
        let mut game = Game::with_parts(store, ControlMode::Keyboard, GameRng::new(3));

        let mut platform = HeadlessPlatform::new();
        platform.press(Key::One);
        game.frame(&mut platform).expect("frame");
        session_mut(&mut game).score = WIN_SCORE;
        game.frame(&mut platform).expect("frame");

        assert_eq!(game.phase(), GamePhase::Ending);
        assert_eq!(game.high_score(), 9999);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "9999");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_block_break_plays_sound() {
        let mut game = game("break_sound");
        let mut platform = HeadlessPlatform::new();
        platform.press(Key::One);
        game.frame(&mut platform).expect("frame");

        let session = session_mut(&mut game);
        let target = session.blocks.slots.get(0).copied().unwrap_or_default();
        session.ball.pos = Vec2::new(target.rect.center().x, target.rect.bottom() + 12.0);
        session.ball.vel = Vec2::new(0.0, -5.0);
        game.frame(&mut platform).expect("frame");

        assert_eq!(platform.sounds, vec![SoundEffect::BlockBreak]);
        assert!(platform.drew_text("Score: 10"));
    }

    #[test]
    fn test_mouse_mode_follows_pointer() {
        let mut game = Game::with_parts(temp_store("mouse"), ControlMode::Mouse, GameRng::new(1));
        let mut platform = HeadlessPlatform::new();
        platform.press(Key::Two);
        game.frame(&mut platform).expect("frame");

        platform.pointer = Vec2::new(300.0, 10.0);
        game.frame(&mut platform).expect("frame");
        let x = game.screen().session().map(|s| s.paddle.rect.x);
        assert_eq!(x, Some(300.0 - PADDLE_WIDTH / 2.0));
    }

    #[test]
    fn test_keyboard_mode_ignores_pointer() {
        let mut game = game("keyboard");
        let mut platform = HeadlessPlatform::new();
        platform.press(Key::Two);
        game.frame(&mut platform).expect("frame");

        platform.pointer = Vec2::new(300.0, 10.0);
        platform.held.push(Key::D);
        game.frame(&mut platform).expect("frame");
        let x = game.screen().session().map(|s| s.paddle.rect.x);
        assert_eq!(x, Some(PADDLE_START_X + PADDLE_KEY_STEP));
    }

    #[test]
    fn test_run_stops_when_platform_closes() {
        let mut game = game("run");
        let mut platform = HeadlessPlatform::with_max_frames(5);
        game.run(&mut platform).expect("run");
        assert_eq!(platform.frames, 5);
        assert_eq!(platform.music, Some(MusicTrack::Background));
        assert_eq!(platform.music_updates, 5);
    }
}
