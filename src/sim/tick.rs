//! Per-frame simulation step
//!
//! Advances a playing [`Session`] by one frame: paddle input, ball
//! integration, wall/paddle/block collisions, falling items and the win check.

use glam::Vec2;

use super::collision::{circle_rect_collision, reflect_axis};
use super::rng::GameRng;
use super::state::{GameEvent, ItemKind, Session};
use crate::consts::*;

/// Paddle control for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleInput {
    /// Center follows the pointer x coordinate
    Pointer { x: f32 },
    /// Fixed step per held direction
    Keys { left: bool, right: bool },
}

impl Default for PaddleInput {
    fn default() -> Self {
        PaddleInput::Keys {
            left: false,
            right: false,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub paddle: PaddleInput,
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep playing
    Continue,
    /// Last life lost
    Lost,
    /// Score threshold reached
    Won,
}

/// Advance the session by one frame.
///
/// Events are appended to `events` in the order they happen.
pub fn tick(
    session: &mut Session,
    input: &TickInput,
    rng: &mut GameRng,
    events: &mut Vec<GameEvent>,
) -> TickOutcome {
    move_paddle(session, input);

    let ball = &mut session.ball;
    ball.pos += ball.vel;

    reflect_off_walls(session);

    if session.ball.pos.y > SCREEN_HEIGHT {
        session.lives = session.lives.saturating_sub(1);
        session.ball.reset();
        events.push(GameEvent::BallLost {
            lives_left: session.lives,
        });
        log::debug!("Ball lost, {} lives left", session.lives);
        if session.lives == 0 {
            return TickOutcome::Lost;
        }
    }

    let ball = &mut session.ball;
    let paddle = &session.paddle.rect;
    if circle_rect_collision(ball.pos, ball.radius, paddle) {
        ball.vel.y = -ball.vel.y.abs();
        ball.pos.y = paddle.y - ball.radius;
        events.push(GameEvent::PaddleHit);
    }

    hit_first_block(session, rng, events);
    update_items(session, events);

    if session.has_won() {
        return TickOutcome::Won;
    }
    TickOutcome::Continue
}

fn move_paddle(session: &mut Session, input: &TickInput) {
    let paddle = &mut session.paddle;
    match input.paddle {
        PaddleInput::Pointer { x } => paddle.follow(x),
        PaddleInput::Keys { left, right } => {
            if left {
                paddle.nudge(-PADDLE_KEY_STEP);
            }
            if right {
                paddle.nudge(PADDLE_KEY_STEP);
            }
        }
    }
    paddle.clamp_to_screen();
}

fn reflect_off_walls(session: &mut Session) {
    let ball = &mut session.ball;
    if ball.pos.x < ball.radius {
        ball.vel.x = reflect_axis(ball.vel.x, -1.0);
    } else if ball.pos.x > SCREEN_WIDTH - ball.radius {
        ball.vel.x = reflect_axis(ball.vel.x, 1.0);
    }
    if ball.pos.y < ball.radius {
        ball.vel.y = reflect_axis(ball.vel.y, -1.0);
    }
}

/// Damage the lowest-index active block touching the ball. At most one block
/// is hit per frame.
fn hit_first_block(session: &mut Session, rng: &mut GameRng, events: &mut Vec<GameEvent>) {
    let ball = session.ball;
    let hit = session
        .blocks
        .slots
        .iter_active()
        .find(|(_, block)| circle_rect_collision(ball.pos, ball.radius, &block.rect))
        .map(|(index, _)| index);

    let Some(index) = hit else { return };
    let Some(block) = session.blocks.slots.get_mut(index) else {
        return;
    };

    block.health -= 1;
    let health = block.health;
    let rect = block.rect;
    session.ball.vel.y = -session.ball.vel.y;

    if health > 0 {
        events.push(GameEvent::BlockDamaged { index, health });
        return;
    }

    session.blocks.slots.deactivate(index);
    session.score += SCORE_PER_BLOCK;
    events.push(GameEvent::BlockBroken { index });

    if rng.chance(ITEM_DROP_CHANCE) {
        let drop_pos = Vec2::new(rect.x + BLOCK_WIDTH / 2.0, rect.y + BLOCK_HEIGHT);
        if let Some(slot) = session.items.spawn(drop_pos, rng) {
            let kind = session
                .items
                .slots
                .get(slot)
                .map(|item| item.kind)
                .unwrap_or_default();
            events.push(GameEvent::ItemSpawned { slot, kind });
        }
    }
}

fn update_items(session: &mut Session, events: &mut Vec<GameEvent>) {
    for slot in 0..MAX_ITEMS {
        let Some(item) = session.items.slots.get_mut(slot) else {
            continue;
        };
        item.pos.y += ITEM_FALL_SPEED;
        let item = *item;

        if item.rect().overlaps(&session.paddle.rect) {
            match item.kind {
                ItemKind::ShrinkPaddle => session.paddle.shrink(),
                ItemKind::SpeedUp => session.ball.speed_up(),
                ItemKind::None => {}
            }
            session.items.slots.deactivate(slot);
            events.push(GameEvent::ItemCollected { kind: item.kind });
            continue;
        }

        if item.pos.y > SCREEN_HEIGHT {
            session.items.slots.deactivate(slot);
        }
    }
}
