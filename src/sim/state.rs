//! Session state and core simulation types
//!
//! Everything the per-frame update mutates lives in [`Session`]. The high
//! score is deliberately not part of it: it outlives sessions and is owned by
//! the game loop.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::pool::SlotPool;
use super::rng::GameRng;
use crate::consts::*;

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Difficulty select menu
    Start,
    /// Active gameplay
    Playing,
    /// All lives lost
    GameOver,
    /// Win threshold reached
    Ending,
}

/// Difficulty preset, controls initial block health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Health every block starts with
    pub fn block_health(self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 3,
            Difficulty::Hard => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }
}

/// A block entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub health: i32,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(BALL_START_VX, BALL_START_VY),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Back to screen center with the launch velocity
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale both axes by the speed-up factor, capped per axis
    pub fn speed_up(&mut self) {
        self.vel = (self.vel * SPEED_UP_FACTOR)
            .clamp(Vec2::splat(-BALL_MAX_AXIS_SPEED), Vec2::splat(BALL_MAX_AXIS_SPEED));
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(PADDLE_START_X, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }
}

impl Paddle {
    /// Center the paddle on a pointer x coordinate
    pub fn follow(&mut self, pointer_x: f32) {
        self.rect.x = pointer_x - self.rect.width / 2.0;
    }

    /// Move by `dx` world units
    pub fn nudge(&mut self, dx: f32) {
        self.rect.x += dx;
    }

    /// Keep the paddle fully on-screen
    pub fn clamp_to_screen(&mut self) {
        self.rect.x = self.rect.x.clamp(0.0, SCREEN_WIDTH - self.rect.width);
    }

    /// Shrink width by one step, never below the minimum
    pub fn shrink(&mut self) {
        self.rect.width = (self.rect.width - PADDLE_SHRINK_STEP).max(PADDLE_MIN_WIDTH);
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    /// Placeholder held by unused pool slots
    #[default]
    None,
    ShrinkPaddle,
    SpeedUp,
}

/// A falling power-up
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub kind: ItemKind,
}

impl Item {
    /// Hitbox, `pos` is the top-left corner
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ITEM_SIZE, ITEM_SIZE)
    }
}

/// Fixed 150-slot block grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockGrid {
    pub slots: SlotPool<Block, MAX_BLOCKS>,
}

impl BlockGrid {
    /// Fill all slots for `difficulty` in a 25-column grid.
    ///
    /// Fully overwrites any prior block state.
    pub fn reset(&mut self, difficulty: Difficulty) {
        let health = difficulty.block_health();
        for i in 0..MAX_BLOCKS {
            let col = (i % BLOCK_COLUMNS) as f32;
            let row = (i / BLOCK_COLUMNS) as f32;
            let rect = Rect::new(
                BLOCK_ORIGIN_X + col * BLOCK_PITCH_X,
                BLOCK_ORIGIN_Y + row * BLOCK_PITCH_Y,
                BLOCK_WIDTH,
                BLOCK_HEIGHT,
            );
            self.slots.set(i, Block { rect, health });
        }
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let mut grid = Self::default();
        grid.reset(difficulty);
        grid
    }

    pub fn remaining(&self) -> usize {
        self.slots.active_count()
    }
}

/// Fixed 20-slot item pool
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemPool {
    pub slots: SlotPool<Item, MAX_ITEMS>,
}

impl ItemPool {
    /// Activate the first free slot at `pos` with a random kind.
    ///
    /// Silently drops the spawn when the pool is full. No roll is drawn in
    /// that case, so a full pool does not advance the RNG.
    pub fn spawn(&mut self, pos: Vec2, rng: &mut GameRng) -> Option<usize> {
        if self.slots.is_full() {
            return None;
        }
        let kind = if rng.chance(ITEM_SHRINK_CHANCE) {
            ItemKind::ShrinkPaddle
        } else {
            ItemKind::SpeedUp
        };
        self.slots.activate_first_free(Item { pos, kind })
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PaddleHit,
    BlockDamaged { index: usize, health: i32 },
    BlockBroken { index: usize },
    ItemSpawned { slot: usize, kind: ItemKind },
    ItemCollected { kind: ItemKind },
    BallLost { lives_left: u8 },
}

/// Everything that gets reset when a new game starts
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub difficulty: Difficulty,
    pub score: u32,
    pub lives: u8,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: BlockGrid,
    pub items: ItemPool,
}

impl Session {
    /// Fresh session: full grid, no items, starting lives, zero score
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            score: 0,
            lives: STARTING_LIVES,
            paddle: Paddle::default(),
            ball: Ball::default(),
            blocks: BlockGrid::for_difficulty(difficulty),
            items: ItemPool::default(),
        }
    }

    pub fn has_won(&self) -> bool {
        self.score >= WIN_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_fills_grid_for_every_difficulty() {
        for difficulty in Difficulty::ALL {
            let grid = BlockGrid::for_difficulty(difficulty);
            assert_eq!(grid.remaining(), MAX_BLOCKS);
            for (i, block) in grid.slots.iter_active() {
                assert_eq!(block.health, difficulty.block_health());
                let col = (i % 25) as f32;
                let row = (i / 25) as f32;
                assert_eq!(block.rect.x, 15.0 + col * 63.0);
                assert_eq!(block.rect.y, 50.0 + row * 30.0);
                assert_eq!(block.rect.width, 60.0);
                assert_eq!(block.rect.height, 20.0);
            }
        }
    }

    #[test]
    fn test_reset_overwrites_damaged_grid() {
        let mut grid = BlockGrid::for_difficulty(Difficulty::Hard);
        grid.slots.deactivate(3);
        if let Some(block) = grid.slots.get_mut(7) {
            block.health = 1;
        }
        grid.reset(Difficulty::Easy);
        assert_eq!(grid.remaining(), MAX_BLOCKS);
        assert!(grid.slots.iter_active().all(|(_, b)| b.health == 1));
    }

    #[test]
    fn test_grid_last_block_on_screen() {
        let grid = BlockGrid::for_difficulty(Difficulty::Normal);
        let last = grid.slots.get(MAX_BLOCKS - 1).copied().unwrap_or_default();
        assert!(last.rect.right() <= SCREEN_WIDTH);
        assert_eq!(last.rect.y, 200.0);
    }

    #[test]
    fn test_spawn_fills_pool_then_drops() {
        let mut pool = ItemPool::default();
        let mut rng = GameRng::new(3);
        for i in 0..MAX_ITEMS {
            assert_eq!(pool.spawn(Vec2::new(i as f32, 0.0), &mut rng), Some(i));
        }
        assert_eq!(pool.spawn(Vec2::ZERO, &mut rng), None);
        assert_eq!(pool.slots.active_count(), MAX_ITEMS);
        assert!(
            pool.slots
                .iter_active()
                .all(|(_, item)| item.kind != ItemKind::None)
        );
    }

    #[test]
    fn test_spawn_kind_split() {
        let mut rng = GameRng::new(99);
        let mut shrink = 0;
        for _ in 0..2000 {
            let mut pool = ItemPool::default();
            pool.spawn(Vec2::ZERO, &mut rng);
            if pool.slots.get(0).map(|i| i.kind) == Some(ItemKind::ShrinkPaddle) {
                shrink += 1;
            }
        }
        // 50/50 split, generous tolerance
        assert!((800..1200).contains(&shrink), "shrink count {}", shrink);
    }

    #[test]
    fn test_speed_up_caps_per_axis() {
        let mut ball = Ball {
            vel: Vec2::new(10.0, -10.0),
            ..Default::default()
        };
        ball.speed_up();
        assert_eq!(ball.vel, Vec2::new(12.0, -12.0));

        let mut ball = Ball::default();
        ball.speed_up();
        assert!((ball.vel.x - 6.0).abs() < 1e-5);
        assert!((ball.vel.y + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_shrink_floor() {
        let mut paddle = Paddle::default();
        paddle.shrink();
        assert_eq!(paddle.rect.width, 120.0);
        for _ in 0..10 {
            paddle.shrink();
        }
        assert_eq!(paddle.rect.width, PADDLE_MIN_WIDTH);
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::default();
        paddle.nudge(-5000.0);
        paddle.clamp_to_screen();
        assert_eq!(paddle.rect.x, 0.0);

        paddle.follow(SCREEN_WIDTH + 100.0);
        paddle.clamp_to_screen();
        assert_eq!(paddle.rect.right(), SCREEN_WIDTH);
    }
}
