//! Frame tick
//!
//! Advances one level by one frame: paddles, balls (with collision
//! dispatch), hearts, then the end-of-frame lives and win/loss checks.

use rand::Rng;

use super::collision::{CollisionResult, rect_collision};
use super::entities::{Ball, EntityId};
use super::handlers;
use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::platform::{Input, Key};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Debug: declare the level won
    pub force_win: bool,
}

impl TickInput {
    /// Read the keys once for this frame
    pub fn poll<I: Input + ?Sized>(input: &I) -> Self {
        Self {
            left: input.is_pressed(Key::Left),
            right: input.is_pressed(Key::Right),
            force_win: input.is_pressed(Key::W),
        }
    }

    /// Horizontal steering: -1, 0 or 1
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Paddle distance (px) the autopilot tolerates before steering
const AUTOPILOT_DEADZONE: f32 = 4.0;

/// Demo player: chases the main ball, or a falling heart while the ball is
/// on its way up
pub fn autopilot(state: &GameState) -> TickInput {
    let paddle = state.registry.paddle(state.main_paddle);
    let (Some(paddle), Some(ball)) = (paddle, state.main_ball_ref()) else {
        return TickInput::default();
    };

    let heart = if ball.vel.y < 0.0 {
        state
            .registry
            .hearts
            .iter()
            .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()))
    } else {
        None
    };

    let target_x = match heart {
        Some(heart) => heart.rect.center().x,
        None => {
            // Oscillating offset so the demo misses now and then
            let t = state.time_ticks as f32 * 0.01;
            let offset = (t.sin() * 0.6 + (t * 0.7).sin() * 0.3) * PADDLE_WIDTH;
            ball.center().x + offset
        }
    };

    let dx = target_x - paddle.rect.center().x;
    TickInput {
        left: dx < -AUTOPILOT_DEADZONE,
        right: dx > AUTOPILOT_DEADZONE,
        force_win: false,
    }
}

/// Advance the level by one frame and return the resulting phase
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> GamePhase {
    // Nothing moves once the level is decided
    if state.is_over() {
        return state.phase;
    }

    state.time_ticks += 1;

    // Both paddles read the same input
    let direction = input.direction();
    let speed = state.settings.paddle_speed;
    let width = state.settings.window_width;
    for paddle in &mut state.registry.paddles {
        paddle.steer(direction, speed, dt, width);
    }

    // Pucks spawned during this frame start moving next frame
    let ball_ids: Vec<EntityId> = state.registry.balls.iter().map(|b| b.id).collect();
    for id in ball_ids {
        advance_ball(state, id, dt, rng);
    }

    advance_hearts(state, dt);
    remove_fallen_pucks(state);
    check_end_conditions(state, input, rng);

    state.hud.reconcile(&state.lives);
    state.registry.normalize_order();
    state.phase
}

fn advance_ball<R: Rng + ?Sized>(state: &mut GameState, id: EntityId, dt: f32, rng: &mut R) {
    let Some(ball) = state.registry.ball(id) else {
        return;
    };

    // Substep so a fast ball never skips through a brick
    let travel = ball.vel.length() * dt;
    let substeps = ((travel / (PUCK_SIZE / 2.0)).ceil() as u32).clamp(1, MAX_SUBSTEPS);
    let sub_dt = dt / substeps as f32;

    for _ in 0..substeps {
        let Some(ball) = state.registry.ball_mut(id) else {
            return;
        };
        ball.advance(sub_dt);
        resolve_contacts(state, id, rng);
    }
}

/// First obstacle the ball is moving into
fn first_contact<'a>(
    ball: &Ball,
    obstacles: impl IntoIterator<Item = (EntityId, &'a Rect)>,
) -> Option<(EntityId, CollisionResult)> {
    obstacles
        .into_iter()
        .map(|(id, rect)| (id, rect_collision(&ball.rect, rect)))
        .find(|(_, hit)| hit.is_approaching(ball.vel))
}

/// Walls, then paddles, then at most one brick, then other balls
fn resolve_contacts<R: Rng + ?Sized>(state: &mut GameState, id: EntityId, rng: &mut R) {
    let Some(ball) = state.registry.ball(id) else {
        return;
    };
    let wall = first_contact(ball, state.registry.walls.iter().map(|w| (w.id, &w.rect)));
    if let Some((_, hit)) = wall {
        bounce(state, id, &hit);
    }

    let Some(ball) = state.registry.ball(id) else {
        return;
    };
    let paddle = first_contact(ball, state.registry.paddles.iter().map(|p| (p.id, &p.rect)));
    if let Some((paddle, hit)) = paddle {
        bounce(state, id, &hit);
        handlers::paddle_hit(state, paddle);
    }

    let Some(ball) = state.registry.ball(id) else {
        return;
    };
    let brick = first_contact(
        ball,
        state
            .registry
            .bricks
            .iter()
            .filter(|b| !b.is_destroyed())
            .map(|b| (b.id, &b.rect)),
    );
    if let Some((brick, hit)) = brick {
        bounce(state, id, &hit);
        handlers::brick_hit(state, brick, id, rng);
    }

    let Some(ball) = state.registry.ball(id) else {
        return;
    };
    let other = first_contact(
        ball,
        state
            .registry
            .balls
            .iter()
            .filter(|b| b.id != id)
            .map(|b| (b.id, &b.rect)),
    );
    if let Some((other, hit)) = other {
        bounce(state, id, &hit);
        // The mover was already pushed out, so the struck ball only reflects
        let struck = CollisionResult {
            normal: -hit.normal,
            penetration: 0.0,
            ..hit
        };
        if state.registry.ball(other).is_some_and(|b| struck.is_approaching(b.vel)) {
            bounce(state, other, &struck);
        }
    }
}

/// Reflect the ball, then let the main ball count the collision before the
/// obstacle reacts
fn bounce(state: &mut GameState, id: EntityId, hit: &CollisionResult) {
    let Some(ball) = state.registry.ball_mut(id) else {
        return;
    };
    ball.bounce(hit.normal, hit.penetration);
    let is_main = ball.is_main();

    state.push_event(GameEvent::BallBounced { ball: id });
    if is_main {
        handlers::main_ball_collision(state);
    }
}

fn advance_hearts(state: &mut GameState, dt: f32) {
    for heart in &mut state.registry.hearts {
        heart.fall(dt);
    }

    let height = state.settings.window_height;
    let snapshot = state.registry.snapshot();
    let mut caught = Vec::new();
    let mut missed = Vec::new();
    for heart in &state.registry.hearts {
        let touching = snapshot
            .iter()
            .any(|e| heart.should_collide_with(e.tag) && heart.rect.intersects(&e.rect));
        if touching {
            caught.push(heart.id);
        } else if heart.is_off_screen(height) {
            missed.push(heart.id);
        }
    }

    for heart in caught {
        handlers::catch_heart(state, heart);
    }
    for heart in missed {
        state.registry.remove(heart);
        state.push_event(GameEvent::HeartMissed { heart });
    }
}

fn remove_fallen_pucks(state: &mut GameState) {
    let height = state.settings.window_height;
    let fallen: Vec<EntityId> = state
        .registry
        .balls
        .iter()
        .filter(|b| !b.is_main() && b.is_below(height))
        .map(|b| b.id)
        .collect();

    for id in fallen {
        state.registry.remove(id);
        log::debug!("Puck {} fell out", id);
    }
}

/// Lost ball, then loss, then win. Loss wins a tie.
fn check_end_conditions<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    let height = state.settings.window_height;
    if state.main_ball_ref().is_some_and(|b| b.is_below(height)) {
        state.lives.decrement();
        let remaining = state.lives.value();
        log::info!("Ball lost, {} lives left", remaining);
        state.push_event(GameEvent::LifeLost { remaining });
        state.respawn_main_ball(rng);
    }

    if state.lives.value() <= 0 {
        state.phase = GamePhase::Lost;
        log::info!("Game lost with {} bricks standing", state.bricks.value());
    } else if state.bricks.value() <= 0 || input.force_win {
        state.phase = GamePhase::Won;
        log::info!("Game won with {} lives left", state.lives.value());
    }
}
