//! Frame-synchronous game loop

use crate::terminal::{BellCues, CameraStatus, Terminal};
use runner_core::{GameConfig, Result, Round, RoundSummary};
use runner_pose::traits::LandmarkSource;
use runner_pose::PoseController;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const FPS: u32 = 60;
/// Longest step fed to the simulation after a stall
const MAX_DT: f32 = 0.1;

/// Play one round until it is lost or the player quits. Each tick runs
/// input, classification and the round in a fixed order; quitting takes
/// effect after the current tick completes.
pub fn run<S: LandmarkSource>(
    config: &GameConfig,
    mut pose: Option<PoseController<S>>,
) -> Result<RoundSummary> {
    let frame = Duration::from_secs(1) / FPS;
    let mut round = Round::new(config).with_cues(Box::new(BellCues));

    {
        let mut term = Terminal::enter()?;
        let mut last = Instant::now();

        loop {
            let started = Instant::now();
            let dt = started.duration_since(last).as_secs_f32().min(MAX_DT);
            last = started;

            let input = term.poll_input()?;
            let mut actions = input.actions;
            if let Some(pose) = pose.as_mut() {
                actions.push(pose.next_action());
            }

            let report = round.tick(dt, &actions);
            let camera = pose.as_ref().map(|p| CameraStatus {
                frames: p.session().frames_received(),
                reading: p.last_reading().copied(),
            });
            term.draw(config, &round, camera.as_ref())?;

            if input.quit || report.round_over {
                break;
            }

            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    if let Some(pose) = pose.as_mut() {
        pose.release();
    }
    info!(score = round.score(), "game finished");
    Ok(round.summary())
}
