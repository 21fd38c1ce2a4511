//! Headless host
//!
//! Runs the game without a window: keys are driven by the autopilot or by
//! tests, dialogs read stdin or a script, sounds and camera moves are only
//! recorded. Assets are checked on disk when an asset root is configured.

use std::collections::{HashSet, VecDeque};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use super::{AssetLoader, AudioSink, CameraHost, Dialog, Input, Key};
use crate::assets::{ImageHandle, SoundHandle};
use crate::error::{AssetError, Result};
use crate::sim::{EntityId, GameState, autopilot};

/// Where dialog answers come from
#[derive(Debug)]
enum Answers {
    /// Ask on stdout, read y/n from stdin
    Stdin,
    /// Pre-recorded answers; an exhausted script answers "no"
    Scripted(VecDeque<bool>),
}

/// Window-less platform
#[derive(Debug)]
pub struct HeadlessPlatform {
    pressed: HashSet<Key>,
    answers: Answers,
    /// Every dialog message shown, in order
    pub prompts: Vec<String>,
    pub sounds_played: usize,
    /// Current camera target (`None` is the full-window view)
    pub follow: Option<EntityId>,
    pub frame_scale: f32,
}

impl HeadlessPlatform {
    fn with_answers(answers: Answers) -> Self {
        Self {
            pressed: HashSet::new(),
            answers,
            prompts: Vec::new(),
            sounds_played: 0,
            follow: None,
            frame_scale: 1.0,
        }
    }

    /// Dialogs are answered on the terminal
    pub fn interactive() -> Self {
        Self::with_answers(Answers::Stdin)
    }

    /// Dialogs are answered from `answers`, in order
    pub fn scripted(answers: impl IntoIterator<Item = bool>) -> Self {
        Self::with_answers(Answers::Scripted(answers.into_iter().collect()))
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Hold whatever keys the autopilot wants this frame
    pub fn steer(&mut self, state: &GameState) {
        let input = autopilot(state);
        for (key, down) in [(Key::Left, input.left), (Key::Right, input.right)] {
            if down {
                self.press(key);
            } else {
                self.release(key);
            }
        }
    }
}

impl Input for HeadlessPlatform {
    fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

impl Dialog for HeadlessPlatform {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        match &mut self.answers {
            Answers::Scripted(answers) => answers.pop_front().unwrap_or(false),
            Answers::Stdin => match ask(message) {
                Ok(answer) => answer,
                Err(e) => {
                    log::warn!("Could not read answer: {}; quitting", e);
                    false
                }
            },
        }
    }
}

fn ask(message: &str) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{} [y/N] ", message)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

impl AudioSink for HeadlessPlatform {
    fn play(&mut self, sound: SoundHandle) {
        self.sounds_played += 1;
        log::trace!("Play sound {:?}", sound);
    }
}

impl CameraHost for HeadlessPlatform {
    fn set_follow(&mut self, target: Option<EntityId>, frame_scale: f32) {
        log::debug!("Camera follow {:?} at {:.1}x", target, frame_scale);
        self.follow = target;
        self.frame_scale = frame_scale;
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
const SOUND_EXTENSIONS: &[&str] = &["wav"];

/// Asset loader that hands out handles, checking files when given a root
#[derive(Debug, Default)]
pub struct HeadlessAssets {
    root: Option<PathBuf>,
    next: u32,
}

impl HeadlessAssets {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root, next: 0 }
    }

    fn load(&mut self, path: &str, kind: &'static str, extensions: &[&str]) -> Result<u32> {
        let supported = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext.to_ascii_lowercase().as_str()));
        if !supported {
            return Err(AssetError::UnsupportedFormat {
                kind,
                path: path.to_string(),
            });
        }

        if let Some(root) = &self.root {
            let full = root.join(path);
            match std::fs::metadata(&full) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    return Err(AssetError::NotFound {
                        path: full.display().to_string(),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(AssetError::NotFound {
                        path: full.display().to_string(),
                    });
                }
                Err(source) => {
                    return Err(AssetError::Io {
                        path: full.display().to_string(),
                        source,
                    });
                }
            }
        }

        self.next += 1;
        Ok(self.next)
    }
}

impl AssetLoader for HeadlessAssets {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle> {
        self.load(path, "image", IMAGE_EXTENSIONS).map(ImageHandle)
    }

    fn load_sound(&mut self, path: &str) -> Result<SoundHandle> {
        self.load(path, "sound", SOUND_EXTENSIONS).map(SoundHandle)
    }
}
