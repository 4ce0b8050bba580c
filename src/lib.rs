//! Brick Breaker - A single-screen block breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, screen state machine)
//! - `platform`: Drawing/input/audio/pacing abstraction plus terminal backend
//! - `renderer`: Character framebuffer and terminal flushing
//! - `ui`: Screen layouts (menu buttons, HUD, end screens)
//! - `app`: The frame loop tying simulation, platform and persistence together
//! - `highscores`: Single-integer high score file
//! - `settings`: JSON-backed preferences

pub mod app;
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::Game;
pub use highscores::HighScoreStore;
pub use settings::{ControlMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (world units)
    pub const SCREEN_WIDTH: f32 = 1600.0;
    pub const SCREEN_HEIGHT: f32 = 900.0;

    /// Default frame rate the loop paces itself to
    pub const TARGET_FPS: u32 = 60;

    /// Block grid: 25 columns x 6 rows
    pub const MAX_BLOCKS: usize = 150;
    pub const BLOCK_COLUMNS: usize = 25;
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_ORIGIN_X: f32 = 15.0;
    pub const BLOCK_ORIGIN_Y: f32 = 50.0;
    /// Column pitch (block width + 3px gap)
    pub const BLOCK_PITCH_X: f32 = 63.0;
    /// Row pitch (block height + 10px gap)
    pub const BLOCK_PITCH_Y: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    pub const BALL_START_VX: f32 = 5.0;
    pub const BALL_START_VY: f32 = -5.0;
    /// Per-axis speed cap applied by the speed-up item
    pub const BALL_MAX_AXIS_SPEED: f32 = 12.0;
    pub const SPEED_UP_FACTOR: f32 = 1.2;

    /// Paddle defaults
    pub const PADDLE_START_X: f32 = SCREEN_WIDTH / 2.0 - 100.0;
    pub const PADDLE_Y: f32 = 800.0;
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_MIN_WIDTH: f32 = 60.0;
    pub const PADDLE_SHRINK_STEP: f32 = 30.0;
    /// Keyboard movement per frame
    pub const PADDLE_KEY_STEP: f32 = 8.0;

    /// Items
    pub const MAX_ITEMS: usize = 20;
    pub const ITEM_SIZE: f32 = 20.0;
    pub const ITEM_FALL_SPEED: f32 = 3.0;
    /// Percent chance a broken block drops an item
    pub const ITEM_DROP_CHANCE: u32 = 20;
    /// Percent of drops that are shrink-paddle (rest are speed-up)
    pub const ITEM_SHRINK_CHANCE: u32 = 50;

    /// Session
    pub const STARTING_LIVES: u8 = 5;
    pub const SCORE_PER_BLOCK: u32 = 10;
    pub const WIN_SCORE: u32 = 1500;
}
