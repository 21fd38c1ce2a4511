//! Game session
//!
//! The frame loop shell around `sim`: polls input, ticks the level, forwards
//! events to the host and, once a level is decided, blocks on the
//! play-again prompt to either rebuild the level or quit.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::Assets;
use crate::consts::*;
use crate::error::Result;
use crate::platform::{AssetLoader, CameraHost, Platform};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Longest frame the simulation accepts; slower frames are clamped
const MAX_FRAME_DT: f32 = 0.1;

/// What a frame ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Level still in play
    Running,
    /// Level decided and the player chose to play again
    Restarted,
    /// Level decided and the player chose to quit
    Quit,
}

/// One run of the game, across any number of levels
pub struct Session<R: Rng = Pcg32> {
    settings: Settings,
    assets: Assets,
    state: GameState,
    rng: R,
    /// Levels started, including the current one
    levels: u32,
}

impl Session<Pcg32> {
    /// Load assets and build the first level. Asset failures are fatal.
    pub fn new<L: AssetLoader + ?Sized>(settings: Settings, loader: &mut L) -> Result<Self> {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(settings, loader, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng<L: AssetLoader + ?Sized>(
        settings: Settings,
        loader: &mut L,
        mut rng: R,
    ) -> Result<Self> {
        let assets = Assets::load(loader)?;
        let state = GameState::new(&settings, assets, &mut rng);
        Ok(Self {
            settings,
            assets,
            state,
            rng,
            levels: 1,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Run one frame, reading the keys from the platform
    pub fn frame<P: Platform + ?Sized>(&mut self, platform: &mut P, dt: f32) -> FrameOutcome {
        let input = TickInput::poll(&*platform);
        self.step(platform, &input, dt)
    }

    /// Run one frame with an explicit input snapshot
    pub fn step<P: Platform + ?Sized>(
        &mut self,
        platform: &mut P,
        input: &TickInput,
        dt: f32,
    ) -> FrameOutcome {
        let phase = tick(&mut self.state, input, dt.min(MAX_FRAME_DT), &mut self.rng);
        self.forward_events(platform);

        match phase {
            GamePhase::Playing => FrameOutcome::Running,
            GamePhase::Won => self.conclude(platform, WIN_MESSAGE),
            GamePhase::Lost => self.conclude(platform, LOSS_MESSAGE),
        }
    }

    fn forward_events<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::BallBounced { .. } => platform.play(self.assets.ball_sound),
                GameEvent::CameraFollow {
                    target,
                    frame_scale,
                } => platform.set_follow(target, frame_scale),
                other => log::debug!("{:?}", other),
            }
        }
    }

    /// Block on the play-again prompt
    fn conclude<P: Platform + ?Sized>(&mut self, platform: &mut P, message: &str) -> FrameOutcome {
        if platform.confirm(message) {
            self.restart(platform);
            FrameOutcome::Restarted
        } else {
            log::info!("Quitting after {} level(s)", self.levels);
            FrameOutcome::Quit
        }
    }

    /// Fresh level: new strategies, counters and entities; camera off
    fn restart<C: CameraHost + ?Sized>(&mut self, camera: &mut C) {
        self.state = GameState::new(&self.settings, self.assets, &mut self.rng);
        self.levels += 1;
        camera.set_follow(None, 1.0);
        log::info!("Starting level {}", self.levels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{HeadlessAssets, HeadlessPlatform, Key};
    use crate::sim::Counter;
    use glam::Vec2;

    fn session(seed: u64) -> Session {
        let mut loader = HeadlessAssets::new(None);
        Session::with_rng(Settings::default(), &mut loader, Pcg32::seed_from_u64(seed)).unwrap()
    }

    fn drop_main_ball(session: &mut Session) {
        let id = session.state.main_ball;
        let ball = session.state.registry.ball_mut(id).unwrap();
        ball.rect.set_center(Vec2::new(100.0, 499.0));
        ball.vel = Vec2::new(0.0, BALL_SPEED);
    }

    #[test]
    fn test_quit_after_win() {
        let mut session = session(1);
        let mut platform = HeadlessPlatform::scripted([false]);
        platform.press(Key::W);

        assert_eq!(session.frame(&mut platform, FRAME_DT), FrameOutcome::Quit);
        assert_eq!(platform.prompts, vec![WIN_MESSAGE]);
        assert_eq!(session.levels(), 1);
    }

    #[test]
    fn test_restart_after_loss() {
        let mut session = session(2);
        let mut platform = HeadlessPlatform::scripted([true]);
        session.state.lives = Counter::new(1);
        session.state.camera.target = Some(session.state.main_ball);
        drop_main_ball(&mut session);

        assert_eq!(session.frame(&mut platform, FRAME_DT), FrameOutcome::Restarted);
        assert_eq!(platform.prompts, vec![LOSS_MESSAGE]);
        assert_eq!(session.levels(), 2);

        let state = session.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives.value(), INITIAL_LIVES);
        assert_eq!(state.bricks.value(), Settings::default().brick_count());
        assert!(!state.camera.is_active());
        assert_eq!(platform.follow, None);
    }

    #[test]
    fn test_events_reach_platform() {
        let mut session = session(3);
        let mut platform = HeadlessPlatform::scripted([false]);
        let ball = session.state.main_ball;
        session.state.push_event(GameEvent::CameraFollow {
            target: Some(ball),
            frame_scale: CAMERA_FRAME_SCALE,
        });
        session.state.push_event(GameEvent::BallBounced { ball });

        assert_eq!(session.frame(&mut platform, FRAME_DT), FrameOutcome::Running);
        assert_eq!(platform.follow, Some(ball));
        assert_eq!(platform.frame_scale, CAMERA_FRAME_SCALE);
        assert!(platform.sounds_played >= 1);
    }

    #[test]
    fn test_autopilot_session_bounces() {
        let mut session = session(4);
        let mut platform = HeadlessPlatform::scripted([false]);
        for _ in 0..240 {
            platform.steer(session.state());
            if session.frame(&mut platform, FRAME_DT) != FrameOutcome::Running {
                break;
            }
        }
        assert!(platform.sounds_played > 0);
    }
}
