//! Screen layouts and drawing
//!
//! Pure layout helpers (button rectangles, palette) plus one draw function per
//! screen, all written against the [`Platform`] draw primitives.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Color, Platform};
use crate::sim::{Difficulty, ItemKind, Rect, Session};

const BUTTON_WIDTH: f32 = 300.0;
const BUTTON_HEIGHT: f32 = 60.0;

/// Block color by remaining health (index clamped to 0..=5)
pub const HEALTH_COLORS: [Color; 6] = [
    Color::GRAY,
    Color::GREEN,
    Color::BLUE,
    Color::ORANGE,
    Color::RED,
    Color::MAROON,
];

pub fn health_color(health: i32) -> Color {
    HEALTH_COLORS[health.clamp(0, 5) as usize]
}

pub fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::ShrinkPaddle => Color::PURPLE,
        _ => Color::YELLOW,
    }
}

/// Difficulty buttons, top to bottom
pub fn difficulty_buttons() -> [(Difficulty, Rect); 3] {
    let x = SCREEN_WIDTH / 2.0 - BUTTON_WIDTH / 2.0;
    let mid = SCREEN_HEIGHT / 2.0;
    [
        (Difficulty::Easy, Rect::new(x, mid - 80.0, BUTTON_WIDTH, BUTTON_HEIGHT)),
        (Difficulty::Normal, Rect::new(x, mid, BUTTON_WIDTH, BUTTON_HEIGHT)),
        (Difficulty::Hard, Rect::new(x, mid + 80.0, BUTTON_WIDTH, BUTTON_HEIGHT)),
    ]
}

/// Which difficulty button (if any) is under `point`
pub fn button_at(point: Vec2) -> Option<Difficulty> {
    difficulty_buttons()
        .into_iter()
        .find(|(_, rect)| rect.contains_point(point))
        .map(|(difficulty, _)| difficulty)
}

pub fn draw_start(platform: &mut impl Platform, high_score: u32) {
    platform.clear(Color::BLACK);
    platform.draw_text(
        "Select Difficulty",
        Vec2::new(SCREEN_WIDTH / 2.0 - 150.0, SCREEN_HEIGHT / 2.0 - 150.0),
        40.0,
        Color::WHITE,
    );
    platform.draw_text(
        &format!("High Score: {}", high_score),
        Vec2::new(SCREEN_WIDTH / 2.0 - 100.0, 50.0),
        20.0,
        Color::GOLD,
    );

    let pointer = platform.pointer_position();
    for (difficulty, rect) in difficulty_buttons() {
        let fill = if rect.contains_point(pointer) {
            Color::LIGHT_GRAY
        } else {
            Color::DARK_GRAY
        };
        platform.draw_rect(rect, fill);

        let label = difficulty.as_str();
        // Roughly center the label for a 30px font
        let text_x = rect.x + (BUTTON_WIDTH - label.len() as f32 * 20.0) / 2.0;
        platform.draw_text(label, Vec2::new(text_x, rect.y + 15.0), 30.0, Color::WHITE);
    }

    platform.draw_text(
        "Keys 1 / 2 / 3 also select",
        Vec2::new(SCREEN_WIDTH / 2.0 - 130.0, SCREEN_HEIGHT / 2.0 + 170.0),
        20.0,
        Color::GRAY,
    );
}

pub fn draw_playing(platform: &mut impl Platform, session: &Session, high_score: u32) {
    platform.clear(Color::BLACK);

    for (_, block) in session.blocks.slots.iter_active() {
        platform.draw_rect(block.rect, health_color(block.health));
    }
    for (_, item) in session.items.slots.iter_active() {
        platform.draw_rect(item.rect(), item_color(item.kind));
    }

    platform.draw_rect(session.paddle.rect, Color::WHITE);
    platform.draw_circle(session.ball.pos, session.ball.radius, Color::WHITE);

    platform.draw_text(
        &format!("Score: {}", session.score),
        Vec2::new(20.0, 20.0),
        20.0,
        Color::WHITE,
    );
    platform.draw_text(
        &format!("Lives: {}", session.lives),
        Vec2::new(SCREEN_WIDTH - 120.0, 20.0),
        20.0,
        Color::RED,
    );
    platform.draw_text(
        &format!("High Score: {}", high_score),
        Vec2::new(SCREEN_WIDTH / 2.0 - 100.0, 20.0),
        20.0,
        Color::GOLD,
    );
}

/// Game-over (`won == false`) or ending screen
pub fn draw_finished(platform: &mut impl Platform, won: bool, final_score: u32) {
    platform.clear(Color::BLACK);
    let (title, color) = if won {
        ("YOU WON!", Color::GREEN)
    } else {
        ("GAME OVER", Color::RED)
    };
    platform.draw_text(
        title,
        Vec2::new(SCREEN_WIDTH / 2.0 - 150.0, SCREEN_HEIGHT / 2.0 - 60.0),
        60.0,
        color,
    );
    platform.draw_text(
        &format!("Score: {}", final_score),
        Vec2::new(SCREEN_WIDTH / 2.0 - 80.0, SCREEN_HEIGHT / 2.0 - 110.0),
        20.0,
        Color::WHITE,
    );
    platform.draw_text(
        "Press ENTER to Restart",
        Vec2::new(SCREEN_WIDTH / 2.0 - 180.0, SCREEN_HEIGHT / 2.0 + 10.0),
        30.0,
        Color::LIGHT_GRAY,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::sim::Item;

    #[test]
    fn test_buttons_stack_without_overlap() {
        let buttons = difficulty_buttons();
        assert_eq!(buttons[0].1, Rect::new(650.0, 370.0, 300.0, 60.0));
        assert_eq!(buttons[1].1.y, 450.0);
        assert_eq!(buttons[2].1.y, 530.0);
        assert!(!buttons[0].1.overlaps(&buttons[1].1));
    }

    #[test]
    fn test_button_hit_testing() {
        assert_eq!(button_at(Vec2::new(800.0, 400.0)), Some(Difficulty::Easy));
        assert_eq!(button_at(Vec2::new(800.0, 480.0)), Some(Difficulty::Normal));
        assert_eq!(button_at(Vec2::new(651.0, 589.0)), Some(Difficulty::Hard));
        // Gap between buttons
        assert_eq!(button_at(Vec2::new(800.0, 435.0)), None);
        assert_eq!(button_at(Vec2::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_health_palette_clamps() {
        assert_eq!(health_color(-3), Color::GRAY);
        assert_eq!(health_color(1), Color::GREEN);
        assert_eq!(health_color(5), Color::MAROON);
        assert_eq!(health_color(9), Color::MAROON);
    }

    #[test]
    fn test_start_screen_draws_three_buttons() {
        let mut platform = HeadlessPlatform::new();
        draw_start(&mut platform, 700);
        assert_eq!(platform.rects_drawn, 3);
        assert_eq!(platform.circles_drawn, 0);
        assert!(platform.drew_text("High Score: 700"));
        assert!(platform.drew_text("NORMAL"));
    }

    #[test]
    fn test_playing_draws_active_entities_only() {
        let mut session = Session::new(Difficulty::Normal);
        session.blocks.slots.deactivate(0);
        session.blocks.slots.deactivate(7);
        session.items.slots.set(
            2,
            Item {
                pos: Vec2::new(100.0, 300.0),
                kind: ItemKind::SpeedUp,
            },
        );

        let mut platform = HeadlessPlatform::new();
        draw_playing(&mut platform, &session, 0);
        // 148 blocks, one item, the paddle
        assert_eq!(platform.rects_drawn, 150);
        assert_eq!(platform.circles_drawn, 1);
        assert!(platform.drew_text("Lives: 5"));
    }
}
