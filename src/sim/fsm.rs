//! Screen state machine
//!
//! Each screen is its own type and every legal edge is a method that consumes
//! the source screen, so an illegal transition (say, game-over straight to
//! playing) has no function to call.
//!
//! ```text
//! Start --select--> Playing --lose--> GameOver --restart--> Start
//!                           \--win--> Ending   --restart--> Start
//! ```

use super::rng::GameRng;
use super::state::{Difficulty, GameEvent, GamePhase, Session};
use super::tick::{TickInput, TickOutcome, tick};

/// Difficulty select menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartScreen;

impl StartScreen {
    /// Begin a fresh session on `difficulty`
    pub fn select(self, difficulty: Difficulty) -> PlayingScreen {
        log::info!("Starting new game on {}", difficulty.as_str());
        PlayingScreen {
            session: Session::new(difficulty),
        }
    }
}

/// Active gameplay
#[derive(Debug, Clone, PartialEq)]
pub struct PlayingScreen {
    pub session: Session,
}

impl PlayingScreen {
    /// Advance one frame
    pub fn update(
        &mut self,
        input: &TickInput,
        rng: &mut GameRng,
        events: &mut Vec<GameEvent>,
    ) -> TickOutcome {
        tick(&mut self.session, input, rng, events)
    }

    pub fn lose(self) -> GameOverScreen {
        log::info!("Game over with score {}", self.session.score);
        GameOverScreen {
            final_score: self.session.score,
        }
    }

    pub fn win(self) -> EndingScreen {
        log::info!("Game won with score {}", self.session.score);
        EndingScreen {
            final_score: self.session.score,
        }
    }
}

/// Shown after the last life is lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverScreen {
    pub final_score: u32,
}

impl GameOverScreen {
    pub fn restart(self) -> StartScreen {
        StartScreen
    }
}

/// Shown after the win threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndingScreen {
    pub final_score: u32,
}

impl EndingScreen {
    pub fn restart(self) -> StartScreen {
        StartScreen
    }
}

/// Whichever screen is current
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Start(StartScreen),
    Playing(PlayingScreen),
    GameOver(GameOverScreen),
    Ending(EndingScreen),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Start(StartScreen)
    }
}

impl Screen {
    pub fn phase(&self) -> GamePhase {
        match self {
            Screen::Start(_) => GamePhase::Start,
            Screen::Playing(_) => GamePhase::Playing,
            Screen::GameOver(_) => GamePhase::GameOver,
            Screen::Ending(_) => GamePhase::Ending,
        }
    }

    /// The live session, only while playing
    pub fn session(&self) -> Option<&Session> {
        match self {
            Screen::Playing(playing) => Some(&playing.session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            Screen::Playing(playing) => Some(&mut playing.session),
            _ => None,
        }
    }
}
