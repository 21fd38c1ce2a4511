//! Game state and core simulation types
//!
//! Everything one level needs lives here: the shared counters, the entity
//! registry, the follow camera and the outbox of events for the host.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::counter::Counter;
use super::entities::{Ball, Brick, EntityId, Paddle};
use super::factory::StrategyFactory;
use super::hud::LifeDisplays;
use super::level;
use super::rect::Rect;
use super::registry::{Entity, Registry};
use super::strategy::CollisionStrategy;
use crate::assets::Assets;
use crate::consts::*;
use crate::random_diagonal_velocity;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every brick destroyed (or the win key pressed)
    Won,
    /// Out of lives
    Lost,
}

/// Follow camera toggled by bricks
#[derive(Debug, Clone, Default)]
pub struct CameraState {
    /// Entity being followed; `None` is the fixed full-window view
    pub target: Option<EntityId>,
    /// Main-ball collisions since the camera switched on
    pub collisions: Counter,
}

impl CameraState {
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }
}

/// Things the host reacts to (sound, camera, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BallBounced { ball: EntityId },
    BrickDestroyed { brick: EntityId, strategy: &'static str },
    HeartSpawned { heart: EntityId },
    /// `granted` is false when lives were already at the cap
    HeartCaught { heart: EntityId, granted: bool },
    HeartMissed { heart: EntityId },
    ExtraPaddleSpawned { paddle: EntityId },
    ExtraPaddleDestroyed { paddle: EntityId },
    PucksSpawned { pucks: [EntityId; 2] },
    CameraFollow { target: Option<EntityId>, frame_scale: f32 },
    LifeLost { remaining: i32 },
}

/// Complete state of one level
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub assets: Assets,
    /// Remaining lives
    pub lives: Counter,
    /// Bricks still standing
    pub bricks: Counter,
    pub registry: Registry,
    pub hud: LifeDisplays,
    pub camera: CameraState,
    pub phase: GamePhase,
    pub main_ball: EntityId,
    pub main_paddle: EntityId,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh level: walls, paddle, ball and the full brick grid
    pub fn new<R: Rng + ?Sized>(settings: &Settings, assets: Assets, rng: &mut R) -> Self {
        let mut state = Self::empty(settings, assets, rng);
        let mut factory = StrategyFactory::new();
        level::lay_bricks(&mut state, &mut factory, rng);
        factory.log_summary();
        log::info!(
            "New level: {}x{} bricks, {} lives",
            settings.bricks_per_row,
            settings.brick_rows,
            state.lives.value()
        );
        state
    }

    /// A level with no bricks. The bricks counter starts at zero.
    pub fn empty<R: Rng + ?Sized>(settings: &Settings, assets: Assets, rng: &mut R) -> Self {
        let window = settings.window_size();
        let lives = Counter::new(settings.initial_lives);
        let mut registry = Registry::new();
        level::add_walls(&mut registry, window);

        let main_paddle = registry.next_id();
        let paddle_center = Vec2::new(window.x / 2.0, window.y - MIN_DIST - PADDLE_HEIGHT / 2.0);
        registry.add(Entity::Paddle(Paddle::new_main(main_paddle, paddle_center, assets.paddle)));

        let main_ball = registry.next_id();
        let vel = random_diagonal_velocity(settings.ball_speed, rng);
        registry.add(Entity::Ball(Ball::new_main(main_ball, window / 2.0, vel, assets.ball)));

        Self {
            settings: settings.clone(),
            assets,
            hud: LifeDisplays::new(window, settings.max_lives, &lives),
            lives,
            bricks: Counter::default(),
            registry,
            camera: CameraState::default(),
            phase: GamePhase::Playing,
            main_ball,
            main_paddle,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn window(&self) -> Vec2 {
        self.settings.window_size()
    }

    pub fn window_center(&self) -> Vec2 {
        self.window() / 2.0
    }

    /// Place a brick and count it
    pub fn add_brick(&mut self, rect: Rect, strategy: CollisionStrategy) -> EntityId {
        let id = self.registry.next_id();
        self.registry
            .add(Entity::Brick(Brick::new(id, rect, self.assets.brick, strategy)));
        self.bricks.increment();
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The main ball, if still registered
    pub fn main_ball_ref(&self) -> Option<&Ball> {
        self.registry.ball(self.main_ball)
    }

    /// Put the main ball back at the window center with a fresh direction
    pub fn respawn_main_ball<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let center = self.window_center();
        let vel = random_diagonal_velocity(self.settings.ball_speed, rng);
        if let Some(ball) = self.registry.ball_mut(self.main_ball) {
            ball.respawn(center, vel);
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }
}
