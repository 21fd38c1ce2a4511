//! Brick collision strategies
//!
//! What a brick does when a ball destroys it. The set of behaviors is closed,
//! so a strategy is an enum dispatched through one `match`; `Compose` nests
//! two strategies to stack their effects.

use glam::Vec2;
use rand::Rng;

use super::entities::{Ball, DroppingHeart, EntityId, Paddle, Tag};
use super::registry::Entity;
use super::state::{GameEvent, GameState};
use crate::random_diagonal_velocity;

/// Reaction attached to a brick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// Take the brick out of play
    Remove,
    /// Remove, then drop a heart from the brick
    AddHeart,
    /// Remove, then add a temporary second paddle unless one exists
    SpawnExtraPaddle,
    /// Remove, then release two pucks from the brick
    SpawnExtraPucks,
    /// Remove, then make the camera follow the main ball
    ToggleCamera,
    /// Run both strategies, first then second
    Compose(Box<CollisionStrategy>, Box<CollisionStrategy>),
}

/// The brick whose strategy is firing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickContact {
    pub brick: EntityId,
    /// Center of the brick at the moment it was hit
    pub center: Vec2,
}

impl CollisionStrategy {
    pub fn compose(first: CollisionStrategy, second: CollisionStrategy) -> Self {
        CollisionStrategy::Compose(Box::new(first), Box::new(second))
    }

    /// Apply the strategy for a brick hit by `other`
    pub fn on_collision<R: Rng + ?Sized>(
        &self,
        state: &mut GameState,
        contact: &BrickContact,
        other: EntityId,
        rng: &mut R,
    ) {
        match self {
            CollisionStrategy::Remove => remove_brick(state, contact),
            CollisionStrategy::AddHeart => {
                remove_brick(state, contact);
                drop_heart(state, contact.center);
            }
            CollisionStrategy::SpawnExtraPaddle => {
                remove_brick(state, contact);
                spawn_extra_paddle(state);
            }
            CollisionStrategy::SpawnExtraPucks => {
                remove_brick(state, contact);
                spawn_pucks(state, contact.center, rng);
            }
            CollisionStrategy::ToggleCamera => {
                remove_brick(state, contact);
                follow_main_ball(state, other);
            }
            CollisionStrategy::Compose(first, second) => {
                first.on_collision(state, contact, other, rng);
                second.on_collision(state, contact, other, rng);
            }
        }
    }

    /// Compose nesting depth (0 for a plain strategy)
    pub fn depth(&self) -> usize {
        match self {
            CollisionStrategy::Compose(a, b) => 1 + a.depth().max(b.depth()),
            _ => 0,
        }
    }

    /// Plain strategies in firing order
    pub fn leaves(&self) -> Vec<&CollisionStrategy> {
        match self {
            CollisionStrategy::Compose(a, b) => {
                let mut leaves = a.leaves();
                leaves.extend(b.leaves());
                leaves
            }
            leaf => vec![leaf],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollisionStrategy::Remove => "remove",
            CollisionStrategy::AddHeart => "add-heart",
            CollisionStrategy::SpawnExtraPaddle => "extra-paddle",
            CollisionStrategy::SpawnExtraPucks => "extra-pucks",
            CollisionStrategy::ToggleCamera => "camera",
            CollisionStrategy::Compose(..) => "compose",
        }
    }
}

fn remove_brick(state: &mut GameState, contact: &BrickContact) {
    state.registry.remove(contact.brick);
}

fn drop_heart(state: &mut GameState, center: Vec2) {
    let id = state.registry.next_id();
    let heart = DroppingHeart::new(id, center, state.settings.heart_fall_speed, state.assets.heart);
    state.registry.add(Entity::Heart(heart));
    state.push_event(GameEvent::HeartSpawned { heart: id });
}

fn spawn_extra_paddle(state: &mut GameState) {
    if state.registry.iter().any(|e| e.tag == Tag::ExtraPaddle) {
        return;
    }

    let id = state.registry.next_id();
    let paddle = Paddle::new_extra(id, state.window_center(), state.assets.paddle);
    state.registry.add(Entity::Paddle(paddle));
    log::debug!("Extra paddle {} spawned", id);
    state.push_event(GameEvent::ExtraPaddleSpawned { paddle: id });
}

fn spawn_pucks<R: Rng + ?Sized>(state: &mut GameState, center: Vec2, rng: &mut R) {
    let speed = state.settings.ball_speed;
    let mut pucks = [0; 2];
    for puck_id in pucks.iter_mut() {
        let id = state.registry.next_id();
        let vel = random_diagonal_velocity(speed, rng);
        state
            .registry
            .add(Entity::Ball(Ball::new_puck(id, center, vel, state.assets.puck)));
        *puck_id = id;
    }
    state.push_event(GameEvent::PucksSpawned { pucks });
}

fn follow_main_ball(state: &mut GameState, other: EntityId) {
    if state.camera.is_active() || other != state.main_ball {
        return;
    }

    state.camera.target = Some(state.main_ball);
    state.camera.collisions.reset();
    log::debug!("Camera following main ball");
    state.push_event(GameEvent::CameraFollow {
        target: Some(state.main_ball),
        frame_scale: state.settings.camera_frame_scale,
    });
}
