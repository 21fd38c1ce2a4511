//! Bricker entry point
//!
//! Loads settings, overlays the command line (bricks per row, brick rows)
//! and runs the headless frame loop until the player quits.

use std::process::ExitCode;

use bricker::consts::*;
use bricker::platform::{HeadlessAssets, HeadlessPlatform};
use bricker::{FrameOutcome, Session, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("{} starting...", WINDOW_TITLE);

    let mut settings = Settings::load();
    settings.apply_args(std::env::args().skip(1));
    log::info!(
        "{}x{} bricks, {}x{} window",
        settings.bricks_per_row,
        settings.brick_rows,
        settings.window_width,
        settings.window_height
    );

    let mut loader = HeadlessAssets::new(settings.asset_root.clone());
    let mut session = match Session::new(settings, &mut loader) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut platform = HeadlessPlatform::interactive();
    loop {
        platform.steer(session.state());
        if session.frame(&mut platform, FRAME_DT) == FrameOutcome::Quit {
            break;
        }
    }

    log::info!("Played {} level(s)", session.levels());
    ExitCode::SUCCESS
}
