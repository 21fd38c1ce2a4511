//! Level layout
//!
//! Walls on three sides (the bottom stays open) and a grid of bricks along
//! the top of the window.

use glam::Vec2;
use rand::Rng;

use super::entities::Wall;
use super::factory::StrategyFactory;
use super::rect::Rect;
use super::registry::{Entity, Registry};
use super::state::GameState;
use crate::consts::*;
use crate::settings::Settings;

/// Left, right and top walls
pub fn add_walls(registry: &mut Registry, window: Vec2) {
    let walls = [
        Rect::new(Vec2::ZERO, Vec2::new(BORDER_SIZE, window.y)),
        Rect::new(Vec2::new(window.x - BORDER_SIZE, 0.0), Vec2::new(BORDER_SIZE, window.y)),
        Rect::new(Vec2::ZERO, Vec2::new(window.x, BORDER_SIZE)),
    ];
    for rect in walls {
        let id = registry.next_id();
        registry.add(Entity::Wall(Wall { id, rect }));
    }
}

/// Brick rectangles, row by row, left to right
pub fn brick_layout(settings: &Settings) -> Vec<Rect> {
    let per_row = settings.bricks_per_row.max(1);
    let gaps = BRICKS_SPACE * (per_row - 1) as f32;
    let width = (settings.window_width - 2.0 * BORDER_SIZE - gaps) / per_row as f32;
    let size = Vec2::new(width, BRICK_HEIGHT);

    (0..settings.brick_rows)
        .flat_map(|row| (0..per_row).map(move |col| (row, col)))
        .map(|(row, col)| {
            let pos = Vec2::new(
                BORDER_SIZE + col as f32 * (width + BRICKS_SPACE),
                BORDER_SIZE + row as f32 * (BRICK_HEIGHT + BRICKS_SPACE),
            );
            Rect::new(pos, size)
        })
        .collect()
}

/// Fill the level with bricks, one freshly built strategy each
pub fn lay_bricks<R: Rng + ?Sized>(
    state: &mut GameState,
    factory: &mut StrategyFactory,
    rng: &mut R,
) {
    for rect in brick_layout(&state.settings) {
        let strategy = factory.build(rng);
        state.add_brick(rect, strategy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Tag;

    #[test]
    fn test_default_layout() {
        let rects = brick_layout(&Settings::default());
        assert_eq!(rects.len(), 56);

        // (700 - 20 - 35) / 8
        let width = 80.625;
        assert_eq!(rects[0].pos, Vec2::new(BORDER_SIZE, BORDER_SIZE));
        assert_eq!(rects[0].size, Vec2::new(width, BRICK_HEIGHT));
        assert_eq!(rects[1].pos.x, BORDER_SIZE + width + BRICKS_SPACE);
        assert_eq!(rects[8].pos.y, BORDER_SIZE + BRICK_HEIGHT + BRICKS_SPACE);
        assert_eq!(rects[7].max().x, WINDOW_WIDTH - BORDER_SIZE);
    }

    #[test]
    fn test_layout_follows_settings() {
        let mut settings = Settings::default();
        settings.apply_args(["3", "2"]);
        let rects = brick_layout(&settings);
        assert_eq!(rects.len(), 6);
        assert!(rects.iter().all(|r| r.pos.x >= BORDER_SIZE));
    }

    #[test]
    fn test_oversized_layout_stays_inside_window() {
        let mut settings = Settings::default();
        settings.apply_args(["100000", "100000"]);
        let rects = brick_layout(&settings);
        assert_eq!(rects.len() as i32, settings.brick_count());
        assert!(rects.iter().all(|r| r.size.x >= MIN_BRICK_WIDTH));
        assert!(rects.iter().all(|r| r.max().x <= WINDOW_WIDTH - BORDER_SIZE + 1e-3));
        let paddle_top = WINDOW_HEIGHT - MIN_DIST - PADDLE_HEIGHT;
        assert!(rects.iter().all(|r| r.max().y < paddle_top));
    }

    #[test]
    fn test_walls_leave_bottom_open() {
        let mut registry = Registry::new();
        add_walls(&mut registry, Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        assert_eq!(registry.count_tag(Tag::Wall), 3);
        let floor = Rect::new(
            Vec2::new(BORDER_SIZE, WINDOW_HEIGHT - 1.0),
            Vec2::new(WINDOW_WIDTH - 2.0 * BORDER_SIZE, BORDER_SIZE),
        );
        assert!(registry.walls.iter().all(|w| !w.rect.intersects(&floor)));
    }
}
