//! Game entities
//!
//! Plain data plus the small per-entity behaviors (movement, one-shot brick
//! destruction, extra paddle wear). Anything that touches more than one
//! entity lives in `handlers` or `strategy`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::reflect_velocity;
use super::counter::Counter;
use super::rect::Rect;
use super::strategy::CollisionStrategy;
use crate::assets::ImageHandle;
use crate::consts::*;

/// Entity identifier, unique within one level
pub type EntityId = u32;

/// Role tag used for collision filtering and registry scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    MainBall,
    Puck,
    MainPaddle,
    ExtraPaddle,
    Brick,
    DroppingHeart,
    Wall,
}

/// A destructible brick holding one collision strategy
#[derive(Debug, Clone)]
pub struct Brick {
    pub id: EntityId,
    pub rect: Rect,
    pub sprite: ImageHandle,
    strategy: Option<CollisionStrategy>,
    destroyed: bool,
}

impl Brick {
    pub fn new(id: EntityId, rect: Rect, sprite: ImageHandle, strategy: CollisionStrategy) -> Self {
        Self {
            id,
            rect,
            sprite,
            strategy: Some(strategy),
            destroyed: false,
        }
    }

    /// Register a hit. The first call marks the brick destroyed and hands
    /// out its strategy; every later call returns `None`.
    pub fn on_hit(&mut self) -> Option<CollisionStrategy> {
        if self.destroyed {
            return None;
        }
        self.destroyed = true;
        self.strategy.take()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Main ball or a puck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallRole {
    /// The ball whose loss costs a life; drives the follow camera
    Main,
    /// Extra ball spawned by a brick; carries no handler
    Puck,
}

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: EntityId,
    pub rect: Rect,
    pub vel: Vec2,
    pub role: BallRole,
    pub sprite: ImageHandle,
    /// Collisions since spawn
    pub collision_count: u32,
}

impl Ball {
    pub fn new_main(id: EntityId, center: Vec2, vel: Vec2, sprite: ImageHandle) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::splat(BALL_SIZE)),
            vel,
            role: BallRole::Main,
            sprite,
            collision_count: 0,
        }
    }

    pub fn new_puck(id: EntityId, center: Vec2, vel: Vec2, sprite: ImageHandle) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::splat(PUCK_SIZE)),
            vel,
            role: BallRole::Puck,
            sprite,
            collision_count: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_main(&self) -> bool {
        self.role == BallRole::Main
    }

    pub fn tag(&self) -> Tag {
        match self.role {
            BallRole::Main => Tag::MainBall,
            BallRole::Puck => Tag::Puck,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.rect.translate(self.vel * dt);
    }

    /// Reflect off a surface and step out of it
    pub fn bounce(&mut self, normal: Vec2, penetration: f32) {
        self.vel = reflect_velocity(self.vel, normal);
        self.rect.translate(normal * penetration);
        self.collision_count += 1;
    }

    /// Place at `center` with a new velocity
    pub fn respawn(&mut self, center: Vec2, vel: Vec2) {
        self.rect.set_center(center);
        self.vel = vel;
    }

    /// True once the center has dropped below the bottom edge
    pub fn is_below(&self, window_height: f32) -> bool {
        self.center().y > window_height
    }
}

/// Main paddle or the temporary extra paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleKind {
    Main,
    Extra { hits: Counter },
}

/// A player-controlled paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub id: EntityId,
    pub rect: Rect,
    pub kind: PaddleKind,
    pub sprite: ImageHandle,
}

impl Paddle {
    pub fn new_main(id: EntityId, center: Vec2, sprite: ImageHandle) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT)),
            kind: PaddleKind::Main,
            sprite,
        }
    }

    pub fn new_extra(id: EntityId, center: Vec2, sprite: ImageHandle) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT)),
            kind: PaddleKind::Extra {
                hits: Counter::default(),
            },
            sprite,
        }
    }

    pub fn tag(&self) -> Tag {
        match self.kind {
            PaddleKind::Main => Tag::MainPaddle,
            PaddleKind::Extra { .. } => Tag::ExtraPaddle,
        }
    }

    /// Move horizontally (`direction` in -1..=1), staying inside the side walls
    pub fn steer(&mut self, direction: f32, speed: f32, dt: f32, window_width: f32) {
        self.rect.pos.x += direction * speed * dt;

        let max_x = window_width - BORDER_SIZE - self.rect.size.x;
        self.rect.pos.x = self.rect.pos.x.min(max_x).max(BORDER_SIZE);
    }

    /// Count a ball/puck hit. Returns true when an extra paddle has worn out.
    /// The main paddle never wears out.
    pub fn register_hit(&mut self, limit: i32) -> bool {
        match &mut self.kind {
            PaddleKind::Main => false,
            PaddleKind::Extra { hits } => {
                hits.increment();
                hits.value() >= limit
            }
        }
    }
}

/// Falling heart pickup
#[derive(Debug, Clone)]
pub struct DroppingHeart {
    pub id: EntityId,
    pub rect: Rect,
    pub vel: Vec2,
    pub sprite: ImageHandle,
}

impl DroppingHeart {
    pub fn new(id: EntityId, center: Vec2, fall_speed: f32, sprite: ImageHandle) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::splat(HEART_SIZE)),
            vel: Vec2::new(0.0, fall_speed),
            sprite,
        }
    }

    pub fn fall(&mut self, dt: f32) {
        self.rect.translate(self.vel * dt);
    }

    /// Only the main paddle can catch a heart
    pub fn should_collide_with(&self, tag: Tag) -> bool {
        tag == Tag::MainPaddle
    }

    /// True once the whole heart has left through the bottom edge
    pub fn is_off_screen(&self, window_height: f32) -> bool {
        self.rect.top() > window_height
    }
}

/// Static border
#[derive(Debug, Clone)]
pub struct Wall {
    pub id: EntityId,
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_fires_once() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(60.0, 15.0));
        let mut brick = Brick::new(1, rect, ImageHandle::default(), CollisionStrategy::AddHeart);

        assert_eq!(brick.on_hit(), Some(CollisionStrategy::AddHeart));
        assert!(brick.is_destroyed());
        for _ in 0..5 {
            assert_eq!(brick.on_hit(), None);
        }
    }

    #[test]
    fn test_ball_bounce() {
        let mut ball = Ball::new_main(1, Vec2::new(100.0, 100.0), Vec2::new(250.0, -250.0), ImageHandle(0));
        ball.bounce(Vec2::Y, 2.0);
        assert_eq!(ball.vel, Vec2::new(250.0, 250.0));
        assert_eq!(ball.center(), Vec2::new(100.0, 102.0));
        assert_eq!(ball.collision_count, 1);
    }

    #[test]
    fn test_paddle_clamped_to_walls() {
        let mut paddle = Paddle::new_main(1, Vec2::new(350.0, 470.0), ImageHandle(0));
        for _ in 0..200 {
            paddle.steer(-1.0, PADDLE_SPEED, FRAME_DT, WINDOW_WIDTH);
        }
        assert_eq!(paddle.rect.pos.x, BORDER_SIZE);
        for _ in 0..200 {
            paddle.steer(1.0, PADDLE_SPEED, FRAME_DT, WINDOW_WIDTH);
        }
        assert_eq!(paddle.rect.max().x, WINDOW_WIDTH - BORDER_SIZE);
    }

    #[test]
    fn test_extra_paddle_wears_out() {
        let mut paddle = Paddle::new_extra(1, Vec2::new(350.0, 250.0), ImageHandle(0));
        assert!(!paddle.register_hit(4));
        assert!(!paddle.register_hit(4));
        assert!(!paddle.register_hit(4));
        assert!(paddle.register_hit(4));

        let mut main = Paddle::new_main(2, Vec2::new(350.0, 470.0), ImageHandle(0));
        assert!((0..10).all(|_| !main.register_hit(4)));
    }

    #[test]
    fn test_heart_only_collides_with_main_paddle() {
        let heart = DroppingHeart::new(1, Vec2::new(50.0, 50.0), HEART_FALL_SPEED, ImageHandle(0));
        assert!(heart.should_collide_with(Tag::MainPaddle));
        assert!(!heart.should_collide_with(Tag::ExtraPaddle));
        assert!(!heart.should_collide_with(Tag::MainBall));
    }

    #[test]
    fn test_heart_leaves_screen() {
        let mut heart = DroppingHeart::new(1, Vec2::new(50.0, 490.0), HEART_FALL_SPEED, ImageHandle(0));
        assert!(!heart.is_off_screen(WINDOW_HEIGHT));
        heart.fall(0.5);
        assert!(heart.is_off_screen(WINDOW_HEIGHT));
    }
}
