//! Collision handlers
//!
//! Reactions that run when the tick resolves a contact: a brick firing its
//! strategy, the main ball counting down the follow camera, an extra paddle
//! wearing out, a heart being caught. Each runs to completion before the
//! next contact is resolved.

use rand::Rng;

use super::entities::EntityId;
use super::state::{GameEvent, GameState};
use super::strategy::BrickContact;

/// A ball touched a brick. Fires the brick's strategy the first time only;
/// returns whether it fired.
pub fn brick_hit<R: Rng + ?Sized>(
    state: &mut GameState,
    brick: EntityId,
    other: EntityId,
    rng: &mut R,
) -> bool {
    let Some(target) = state.registry.brick_mut(brick) else {
        return false;
    };
    let center = target.rect.center();
    let Some(strategy) = target.on_hit() else {
        return false;
    };

    state.bricks.decrement();
    log::debug!(
        "Brick {} destroyed ({}), {} left",
        brick,
        strategy.name(),
        state.bricks.value()
    );
    state.push_event(GameEvent::BrickDestroyed {
        brick,
        strategy: strategy.name(),
    });
    strategy.on_collision(state, &BrickContact { brick, center }, other, rng);
    true
}

/// The main ball collided with something. While the follow camera is on,
/// count the collision. The `camera_collisions`-th collision after the camera
/// switched on switches it back off.
pub fn main_ball_collision(state: &mut GameState) {
    if !state.camera.is_active() {
        return;
    }

    state.camera.collisions.increment();
    if state.camera.collisions.value() >= state.settings.camera_collisions {
        state.camera.target = None;
        state.camera.collisions.reset();
        log::debug!("Camera back to full view");
        state.push_event(GameEvent::CameraFollow {
            target: None,
            frame_scale: 1.0,
        });
    }
}

/// A ball or puck hit a paddle. Extra paddles are removed once worn out.
pub fn paddle_hit(state: &mut GameState, paddle: EntityId) {
    let limit = state.settings.extra_paddle_hits;
    let worn_out = state
        .registry
        .paddle_mut(paddle)
        .is_some_and(|p| p.register_hit(limit));

    if worn_out && state.registry.remove(paddle) {
        log::debug!("Extra paddle {} worn out", paddle);
        state.push_event(GameEvent::ExtraPaddleDestroyed { paddle });
    }
}

/// The main paddle caught a heart. Grants a life unless already at the cap;
/// the heart is removed either way. Returns whether a life was granted.
pub fn catch_heart(state: &mut GameState, heart: EntityId) -> bool {
    if !state.registry.remove(heart) {
        return false;
    }

    let granted = state.lives.value() < state.settings.max_lives;
    if granted {
        state.lives.increment();
    }
    state.push_event(GameEvent::HeartCaught { heart, granted });
    granted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::settings::Settings;
    use crate::sim::counter::Counter;
    use crate::sim::entities::{DroppingHeart, Paddle, Tag};
    use crate::sim::rect::Rect;
    use crate::sim::registry::Entity;
    use crate::sim::strategy::CollisionStrategy;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(7);
        let state = GameState::empty(&Settings::default(), Assets::default(), &mut rng);
        (state, rng)
    }

    fn add_heart(state: &mut GameState) -> EntityId {
        let id = state.registry.next_id();
        let heart = DroppingHeart::new(id, Vec2::new(100.0, 100.0), 100.0, state.assets.heart);
        state.registry.add(Entity::Heart(heart))
    }

    #[test]
    fn test_brick_fires_once() {
        let (mut state, mut rng) = setup();
        let rect = Rect::new(Vec2::new(50.0, 50.0), Vec2::new(60.0, 15.0));
        let brick = state.add_brick(rect, CollisionStrategy::AddHeart);
        state.add_brick(rect, CollisionStrategy::Remove);
        let ball = state.main_ball;
        assert_eq!(state.bricks.value(), 2);

        assert!(brick_hit(&mut state, brick, ball, &mut rng));
        assert!(!brick_hit(&mut state, brick, ball, &mut rng));
        assert!(!brick_hit(&mut state, brick, ball, &mut rng));

        assert_eq!(state.bricks.value(), 1);
        assert_eq!(state.registry.hearts.len(), 1);
    }

    #[test]
    fn test_camera_resets_after_threshold() {
        let (mut state, _) = setup();
        // Inactive camera ignores collisions
        main_ball_collision(&mut state);
        assert_eq!(state.camera.collisions.value(), 0);

        state.camera.target = Some(state.main_ball);
        for _ in 0..3 {
            main_ball_collision(&mut state);
            assert!(state.camera.is_active());
        }
        main_ball_collision(&mut state);
        assert!(!state.camera.is_active());
        assert_eq!(state.camera.collisions.value(), 0);
        assert!(state.drain_events().contains(&GameEvent::CameraFollow {
            target: None,
            frame_scale: 1.0
        }));
    }

    #[test]
    fn test_extra_paddle_removed_after_four_hits() {
        let (mut state, _) = setup();
        let id = state.registry.next_id();
        let extra = Paddle::new_extra(id, state.window_center(), state.assets.paddle);
        state.registry.add(Entity::Paddle(extra));

        for _ in 0..3 {
            paddle_hit(&mut state, id);
            assert!(state.registry.contains(id));
        }
        paddle_hit(&mut state, id);
        assert!(!state.registry.contains(id));
        assert_eq!(state.registry.count_tag(Tag::ExtraPaddle), 0);

        // The main paddle never wears out
        let main = state.main_paddle;
        for _ in 0..10 {
            paddle_hit(&mut state, main);
        }
        assert!(state.registry.contains(main));
    }

    #[test]
    fn test_catch_heart_at_cap() {
        let (mut state, _) = setup();
        state.lives = Counter::new(state.settings.max_lives);
        let heart = add_heart(&mut state);

        assert!(!catch_heart(&mut state, heart));
        assert_eq!(state.lives.value(), state.settings.max_lives);
        assert!(!state.registry.contains(heart));
    }

    proptest! {
        #[test]
        fn lives_never_exceed_cap(catches in 0usize..20, lost in 0i32..3) {
            let (mut state, _) = setup();
            for _ in 0..lost {
                state.lives.decrement();
            }
            for _ in 0..catches {
                let heart = add_heart(&mut state);
                catch_heart(&mut state, heart);
                prop_assert!(state.lives.value() <= state.settings.max_lives);
            }
            prop_assert!(state.registry.hearts.is_empty());
        }
    }
}
