//! Asset handles
//!
//! The core never looks inside an image or sound; it only stores the opaque
//! handles the host hands back and reuses them when spawning entities.

use serde::{Deserialize, Serialize};

use crate::consts::paths;
use crate::error::Result;
use crate::platform::AssetLoader;

/// Opaque handle to a loaded image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Opaque handle to a loaded sound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// Every asset the game uses, loaded once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assets {
    pub ball: ImageHandle,
    pub puck: ImageHandle,
    pub paddle: ImageHandle,
    pub brick: ImageHandle,
    pub heart: ImageHandle,
    pub background: ImageHandle,
    pub ball_sound: SoundHandle,
}

impl Assets {
    /// Load all assets. The first failure aborts; there is no retry.
    pub fn load<L: AssetLoader + ?Sized>(loader: &mut L) -> Result<Self> {
        let assets = Self {
            ball: loader.load_image(paths::BALL_IMAGE)?,
            puck: loader.load_image(paths::PUCK_IMAGE)?,
            paddle: loader.load_image(paths::PADDLE_IMAGE)?,
            brick: loader.load_image(paths::BRICK_IMAGE)?,
            heart: loader.load_image(paths::HEART_IMAGE)?,
            background: loader.load_image(paths::BACKGROUND_IMAGE)?,
            ball_sound: loader.load_sound(paths::BALL_SOUND)?,
        };
        log::debug!("Loaded assets: {:?}", assets);
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetError;

    struct CountingLoader {
        next: u32,
        missing: Option<&'static str>,
    }

    impl AssetLoader for CountingLoader {
        fn load_image(&mut self, path: &str) -> Result<ImageHandle> {
            if self.missing == Some(path) {
                return Err(AssetError::NotFound { path: path.to_string() });
            }
            self.next += 1;
            Ok(ImageHandle(self.next))
        }

        fn load_sound(&mut self, path: &str) -> Result<SoundHandle> {
            if self.missing == Some(path) {
                return Err(AssetError::NotFound { path: path.to_string() });
            }
            self.next += 1;
            Ok(SoundHandle(self.next))
        }
    }

    #[test]
    fn test_load_assigns_distinct_handles() {
        let mut loader = CountingLoader { next: 0, missing: None };
        let assets = Assets::load(&mut loader).unwrap();
        assert_ne!(assets.ball, assets.puck);
        assert_eq!(assets.ball_sound, SoundHandle(7));
    }

    #[test]
    fn test_missing_asset_is_fatal() {
        let mut loader = CountingLoader {
            next: 0,
            missing: Some(paths::HEART_IMAGE),
        };
        let err = Assets::load(&mut loader).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { ref path } if path == paths::HEART_IMAGE));
    }
}
