//! Game settings
//!
//! Defaults come from [`crate::consts`]. An optional JSON file can override
//! any subset of fields, and the command line overrides the brick layout.
//! Configuration problems are never fatal: anything unreadable falls back to
//! the defaults.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Level layout ===
    pub bricks_per_row: u32,
    pub brick_rows: u32,

    // === Lives ===
    pub initial_lives: i32,
    /// Heart catches never raise lives above this
    pub max_lives: i32,

    // === Speeds (pixels/s) ===
    pub ball_speed: f32,
    pub paddle_speed: f32,
    pub heart_fall_speed: f32,

    // === Effect thresholds ===
    /// Ball/puck hits an extra paddle survives
    pub extra_paddle_hits: i32,
    /// Main-ball collisions before the follow camera resets
    pub camera_collisions: i32,
    pub camera_frame_scale: f32,

    /// Directory the asset paths are resolved against. `None` runs headless
    /// without touching the filesystem.
    pub asset_root: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            bricks_per_row: DEFAULT_BRICKS_PER_ROW,
            brick_rows: DEFAULT_BRICK_ROWS,

            initial_lives: INITIAL_LIVES,
            max_lives: MAX_LIVES,

            ball_speed: BALL_SPEED,
            paddle_speed: PADDLE_SPEED,
            heart_fall_speed: HEART_FALL_SPEED,

            extra_paddle_hits: PADDLE_HITS_TILL_DESTRUCTION,
            camera_collisions: CAMERA_COLLISIONS_TILL_RESET,
            camera_frame_scale: CAMERA_FRAME_SCALE,

            asset_root: None,
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    const FILE_NAME: &'static str = "bricker_settings.json";

    /// Load settings from the working directory, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Self::FILE_NAME)
    }

    /// Load settings from a JSON file. Missing fields take their defaults; a
    /// missing or malformed file yields `Settings::default()`.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::warn!("Malformed settings in {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings JSON, then repair values the game cannot run with
    pub fn from_json(json: &str) -> Option<Self> {
        let mut settings: Self = serde_json::from_str(json).ok()?;
        settings.sanitize();
        Some(settings)
    }

    /// Overlay the positional command-line arguments: bricks per row, then
    /// brick rows. Missing, non-numeric or non-positive values keep the
    /// current layout; oversized values are clamped to what the window fits.
    pub fn apply_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        if let Some(per_row) = args.next().and_then(|a| parse_positive(a.as_ref())) {
            self.bricks_per_row = per_row;
        }
        if let Some(rows) = args.next().and_then(|a| parse_positive(a.as_ref())) {
            self.brick_rows = rows;
        }
        self.clamp_layout();
    }

    /// Window dimensions as a vector
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Total bricks in a fresh level
    pub fn brick_count(&self) -> i32 {
        let count = self.bricks_per_row.saturating_mul(self.brick_rows);
        i32::try_from(count).unwrap_or(i32::MAX)
    }

    /// Most bricks a row can hold while each stays `MIN_BRICK_WIDTH` wide
    pub fn max_bricks_per_row(&self) -> u32 {
        let inner = self.window_width - 2.0 * BORDER_SIZE + BRICKS_SPACE;
        let fits = (inner / (MIN_BRICK_WIDTH + BRICKS_SPACE)).floor().max(1.0) as u32;
        fits.min(MAX_BRICKS_PER_ROW)
    }

    fn clamp_layout(&mut self) {
        let max_per_row = self.max_bricks_per_row();
        if self.bricks_per_row > max_per_row {
            log::warn!("{} bricks per row do not fit, using {}", self.bricks_per_row, max_per_row);
            self.bricks_per_row = max_per_row;
        }
        if self.brick_rows > MAX_BRICK_ROWS {
            log::warn!("{} brick rows do not fit, using {}", self.brick_rows, MAX_BRICK_ROWS);
            self.brick_rows = MAX_BRICK_ROWS;
        }
    }

    fn sanitize(&mut self) {
        let defaults = Self::default();
        if self.bricks_per_row == 0 {
            self.bricks_per_row = defaults.bricks_per_row;
        }
        if self.brick_rows == 0 {
            self.brick_rows = defaults.brick_rows;
        }
        if self.window_width <= 2.0 * BORDER_SIZE || self.window_height <= 0.0 {
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }
        self.clamp_layout();
        if self.initial_lives <= 0 {
            self.initial_lives = defaults.initial_lives;
        }
        if self.max_lives < self.initial_lives {
            self.max_lives = self.initial_lives;
        }
        if self.extra_paddle_hits <= 0 {
            self.extra_paddle_hits = defaults.extra_paddle_hits;
        }
        if self.camera_collisions <= 0 {
            self.camera_collisions = defaults.camera_collisions;
        }
    }
}

fn parse_positive(arg: &str) -> Option<u32> {
    arg.trim().parse::<u32>().ok().filter(|&n| n > 0)
}
