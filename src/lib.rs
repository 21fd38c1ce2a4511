//! Bricker - a Breakout-style arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collision strategies, game state, frame tick)
//! - `platform`: Host engine abstraction (input, dialogs, assets, audio, camera)
//! - `session`: Frame loop shell that drives `sim` against a platform
//! - `settings`: Data-driven game configuration

pub mod assets;
pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use assets::Assets;
pub use error::AssetError;
pub use session::{FrameOutcome, Session};
pub use settings::Settings;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Frame timestep driven by the host (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum collision substeps per ball per frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window dimensions (y grows downward)
    pub const WINDOW_WIDTH: f32 = 700.0;
    pub const WINDOW_HEIGHT: f32 = 500.0;
    pub const WINDOW_TITLE: &str = "Bricker";
    /// Thickness of the left, right and top walls
    pub const BORDER_SIZE: f32 = 10.0;
    /// Gap between the main paddle and the bottom edge
    pub const MIN_DIST: f32 = 20.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Per-axis speed of a freshly served ball or puck
    pub const BALL_SPEED: f32 = 250.0;
    pub const PUCK_SIZE: f32 = 0.75 * BALL_SIZE;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 400.0;
    pub const PADDLE_HITS_TILL_DESTRUCTION: i32 = 4;

    /// Brick layout
    pub const BRICK_HEIGHT: f32 = 15.0;
    pub const BRICKS_SPACE: f32 = 5.0;
    pub const DEFAULT_BRICKS_PER_ROW: u32 = 8;
    pub const DEFAULT_BRICK_ROWS: u32 = 7;
    /// Layout caps; rows past the cap would reach the paddle
    pub const MAX_BRICKS_PER_ROW: u32 = 64;
    pub const MAX_BRICK_ROWS: u32 = 20;
    pub const MIN_BRICK_WIDTH: f32 = 4.0;

    /// Hearts and lives
    pub const HEART_SIZE: f32 = 15.0;
    pub const HEART_FALL_SPEED: f32 = 100.0;
    pub const DIGIT_TEXT_SIZE: f32 = 15.0;
    pub const INITIAL_LIVES: i32 = 3;
    pub const MAX_LIVES: i32 = 4;

    /// Follow camera
    pub const CAMERA_COLLISIONS_TILL_RESET: i32 = 4;
    /// Camera frame size relative to the window
    pub const CAMERA_FRAME_SCALE: f32 = 1.2;

    /// End-of-game prompts
    pub const WIN_MESSAGE: &str = "You Win! Play again?";
    pub const LOSS_MESSAGE: &str = "You Lost! Play again?";

    /// Asset paths, relative to the asset root
    pub mod paths {
        pub const BALL_IMAGE: &str = "assets/ball.png";
        pub const PUCK_IMAGE: &str = "assets/mockBall.png";
        pub const PADDLE_IMAGE: &str = "assets/paddle.png";
        pub const BRICK_IMAGE: &str = "assets/brick.png";
        pub const HEART_IMAGE: &str = "assets/heart.png";
        pub const BACKGROUND_IMAGE: &str = "assets/DARK_BG2_small.jpeg";
        pub const BALL_SOUND: &str = "assets/blop_cut_silenced.wav";
    }
}

/// Uniformly random +1.0 or -1.0
#[inline]
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { -1.0 } else { 1.0 }
}

/// Velocity with `speed` on both axes and an independent random sign per axis
#[inline]
pub fn random_diagonal_velocity<R: Rng + ?Sized>(speed: f32, rng: &mut R) -> Vec2 {
    let x = speed * random_sign(rng);
    let y = speed * random_sign(rng);
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_diagonal_velocity_covers_all_quadrants() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let v = random_diagonal_velocity(250.0, &mut rng);
            assert_eq!(v.x.abs(), 250.0);
            assert_eq!(v.y.abs(), 250.0);
            let quadrant = (v.x > 0.0) as usize * 2 + (v.y > 0.0) as usize;
            seen[quadrant] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
