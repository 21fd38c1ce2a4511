//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform concerns:
//! - Fixed timestep driven by the host
//! - Randomness injected by the caller
//! - Stable iteration order (by entity ID)

pub mod collision;
pub mod counter;
pub mod entities;
pub mod factory;
pub mod handlers;
pub mod hud;
pub mod level;
pub mod rect;
pub mod registry;
pub mod state;
pub mod strategy;
pub mod tick;

pub use collision::{CollisionResult, rect_collision, reflect_velocity};
pub use counter::Counter;
pub use entities::{Ball, BallRole, Brick, DroppingHeart, EntityId, Paddle, PaddleKind, Tag, Wall};
pub use factory::{StrategyFactory, StrategyKind};
pub use hud::{GraphicLifeCounter, LifeColor, LifeDisplays, NumericLifeCounter};
pub use rect::Rect;
pub use registry::{Entity, EntityView, Layer, Registry};
pub use state::{CameraState, GameEvent, GamePhase, GameState};
pub use strategy::{BrickContact, CollisionStrategy};
pub use tick::{TickInput, autopilot, tick};
