//! Platform abstraction layer
//!
//! The hosting engine supplies everything outside the simulation:
//! - Input polling
//! - Blocking yes/no dialogs
//! - Asset loading
//! - Sound playback
//! - Camera follow
//!
//! `headless` implements all of them without a window.

pub mod headless;

pub use headless::{HeadlessAssets, HeadlessPlatform};

use crate::assets::{ImageHandle, SoundHandle};
use crate::error::Result;
use crate::sim::EntityId;

/// Keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Debug: declare the level won
    W,
}

/// Keyboard state, polled once per frame
pub trait Input {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Blocking yes/no prompt. The frame loop is suspended until it returns.
pub trait Dialog {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Image and sound loading
pub trait AssetLoader {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle>;
    fn load_sound(&mut self, path: &str) -> Result<SoundHandle>;
}

/// Sound playback
pub trait AudioSink {
    fn play(&mut self, sound: SoundHandle);
}

/// Camera control. `None` restores the fixed full-window view.
pub trait CameraHost {
    fn set_follow(&mut self, target: Option<EntityId>, frame_scale: f32);
}

/// Everything the frame loop needs from the host
pub trait Platform: Input + Dialog + AudioSink + CameraHost {}

impl<T: Input + Dialog + AudioSink + CameraHost> Platform for T {}
