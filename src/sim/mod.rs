//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One update per frame, fixed per-frame steps
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod fsm;
pub mod pool;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_collision};
pub use fsm::{EndingScreen, GameOverScreen, PlayingScreen, Screen, StartScreen};
pub use pool::SlotPool;
pub use rng::GameRng;
pub use state::{
    Ball, Block, BlockGrid, Difficulty, GameEvent, GamePhase, Item, ItemKind, ItemPool, Paddle,
    Session,
};
pub use tick::{PaddleInput, TickInput, TickOutcome, tick};
