// tests/core_tests.rs
use proptest::prelude::*;
use runner_core::{
    Action, EncounterEngine, GameConfig, Obstacle, ObstacleId, ObstacleKind, ObstacleSpawner,
    PlayerState, Round,
};
use runner_pose::{BodyPoint, LandmarkFrame, PoseController, ReplaySource};
use std::io::Cursor;
use std::time::Duration;

fn seeded_round(config: &GameConfig, seed: u64) -> Round {
    Round::with_parts(
        config,
        ObstacleSpawner::seeded(config, seed),
        EncounterEngine::new(config),
    )
}

fn blocker(id: u64, lane: usize, center_x: f32, top: f32) -> Obstacle {
    let kind = ObstacleKind::MustAvoid;
    Obstacle::new(ObstacleId(id), lane, kind, center_x, top, 64.0, 64.0)
}

fn action_from(n: u8) -> Action {
    match n % 6 {
        0 => Action::Jump,
        1 => Action::Duck,
        2 => Action::Left,
        3 => Action::Right,
        _ => Action::None,
    }
}

/// Upright player facing the camera, shoulders centred
fn standing_frame() -> LandmarkFrame {
    LandmarkFrame::new(640.0, 480.0)
        .with_point(BodyPoint::Nose, 320.0, 150.0)
        .with_point(BodyPoint::LeftWrist, 250.0, 320.0)
        .with_point(BodyPoint::RightWrist, 390.0, 320.0)
        .with_point(BodyPoint::LeftShoulder, 280.0, 200.0)
        .with_point(BodyPoint::RightShoulder, 360.0, 200.0)
        .with_point(BodyPoint::LeftHip, 290.0, 400.0)
        .with_point(BodyPoint::RightHip, 350.0, 400.0)
}

fn hands_up_frame() -> LandmarkFrame {
    standing_frame()
        .with_point(BodyPoint::LeftWrist, 250.0, 100.0)
        .with_point(BodyPoint::RightWrist, 390.0, 100.0)
}

/// Shoulders shifted well towards the image's left edge
fn leaning_frame() -> LandmarkFrame {
    standing_frame()
        .with_point(BodyPoint::LeftShoulder, 100.0, 200.0)
        .with_point(BodyPoint::RightShoulder, 180.0, 200.0)
}

fn recording(lines: &[Option<&LandmarkFrame>]) -> Cursor<Vec<u8>> {
    let mut text = String::new();
    for line in lines {
        match line {
            Some(frame) => text.push_str(&serde_json::to_string(frame).unwrap()),
            None => text.push_str("null"),
        }
        text.push('\n');
    }
    Cursor::new(text.into_bytes())
}

type ReplayController = PoseController<ReplaySource<Cursor<Vec<u8>>>>;

fn controller(lines: &[Option<&LandmarkFrame>], mirror: bool) -> ReplayController {
    let mut config = GameConfig::default();
    config.gesture.mirror_input = mirror;
    // Generous budget so slow CI machines never drop a replayed frame
    config.gesture.capture_poll_budget_ms = 10_000;
    PoseController::new(ReplaySource::from_reader(recording(lines)), &config)
}

#[test]
fn test_round_runs_to_game_over() {
    let config = GameConfig::default();
    let mut round = seeded_round(&config, 7);

    // Standing still in the middle lane eventually loses every life
    let mut ticks = 0;
    while !round.is_over() {
        round.tick(1.0 / 60.0, &[]);
        ticks += 1;
        assert!(ticks < 200_000, "round never ended");
    }

    let summary = round.summary();
    assert_eq!(summary.collisions, config.scoring.max_collisions);
    let per_evade = u64::from(config.scoring.points_per_evade);
    assert_eq!(summary.score, u64::from(summary.evaded) * per_evade);
    assert_eq!(round.remaining_collisions(), 0);

    // Further ticks change nothing
    let report = round.tick(1.0 / 60.0, &[Action::Jump]);
    assert!(report.round_over);
    assert_eq!(round.summary().ticks, summary.ticks);
}

#[test]
fn test_restart_clears_round() {
    let config = GameConfig::default();
    let mut round = seeded_round(&config, 3);
    for _ in 0..600 {
        round.tick(1.0 / 60.0, &[Action::Left]);
    }
    assert!(round.spawned() > 0);

    round.restart();
    assert_eq!(round.score(), 0);
    assert_eq!(round.collisions(), 0);
    assert_eq!(round.spawned(), 0);
    assert_eq!(round.engine().live_count(), 0);
    assert_eq!(round.player().current_lane(), 1);
}

#[test]
fn test_player_stays_on_lane_edges() {
    let config = GameConfig::default();
    let mut player = PlayerState::new(&config);

    assert!(player.apply(Action::Left));
    assert!(!player.apply(Action::Left));
    assert_eq!(player.current_lane(), 0);

    assert!(player.apply(Action::Right));
    assert!(player.apply(Action::Right));
    assert!(!player.apply(Action::Right));
    assert_eq!(player.current_lane(), config.lane_count() - 1);
}

#[test]
fn test_escape_counts_once() {
    let config = GameConfig::default();
    let mut engine = EncounterEngine::new(&config);
    let mut player = PlayerState::new(&config);
    player.apply(Action::Left);

    // Lane 2 obstacle just above the exit line, player away in lane 0
    engine.insert(blocker(1, 2, 600.0, 695.0));

    assert_eq!(engine.advance(0.1), 1);
    assert_eq!(engine.advance(0.1), 0);
    assert!(engine.resolve(&player).is_empty());
    assert_eq!(engine.evaded_total(), 1);
    assert_eq!(engine.collisions_total(), 0);
}

#[test]
fn test_resolve_is_idempotent() {
    let config = GameConfig::default();
    let mut engine = EncounterEngine::new(&config);
    let player = PlayerState::new(&config);

    engine.insert(blocker(1, 1, 450.0, 460.0));

    assert_eq!(engine.resolve(&player).collisions, 1);
    assert!(engine.resolve(&player).is_empty());
    assert_eq!(engine.collisions_total(), 1);
    assert_eq!(engine.live_count(), 0);
}

#[test]
fn test_jump_clears_barrier_in_round() {
    let config = GameConfig::default();
    let mut round = seeded_round(&config, 11);

    // Launch, then let the player rise well past the tolerance line
    round.tick(0.0, &[Action::Jump]);
    for _ in 0..10 {
        round.tick(0.0, &[]);
    }
    assert!(round.player().is_airborne());

    let bottom = round.player().bottom();
    let mut barrier = blocker(100, 1, 450.0, bottom - 10.0);
    barrier.kind = ObstacleKind::NeedJump;
    round.engine_mut().insert(barrier);

    let report = round.tick(0.0, &[]);
    assert_eq!(report.encounters.evasions, 1);
    assert_eq!(report.score_delta, u64::from(config.scoring.points_per_evade));
    assert_eq!(round.collisions(), 0);
}

#[test]
fn test_replay_hands_up_jumps() {
    let hands_up = hands_up_frame();
    let standing = standing_frame();
    let lines = [
        Some(&hands_up),
        Some(&hands_up),
        None,
        Some(&standing),
        Some(&hands_up),
    ];
    let mut pose = controller(&lines, false);

    assert_eq!(pose.next_action_at(Duration::from_millis(0)), Action::Jump);
    // Inside the debounce window
    assert_eq!(pose.next_action_at(Duration::from_millis(100)), Action::None);
    // No pose this tick
    assert_eq!(pose.next_action_at(Duration::from_millis(200)), Action::None);
    assert_eq!(pose.next_action_at(Duration::from_millis(500)), Action::None);
    assert_eq!(pose.next_action_at(Duration::from_millis(900)), Action::Jump);
    // Recording exhausted
    assert_eq!(pose.next_action_at(Duration::from_millis(1500)), Action::None);

    assert_eq!(pose.session().frames_received(), 4);
    pose.release();
    assert!(pose.session().is_released());
    assert_eq!(pose.next_action_at(Duration::from_millis(2000)), Action::None);
}

#[test]
fn test_controller_keeps_last_reading() {
    let hands_up = hands_up_frame();
    let lean = leaning_frame();
    let mut pose = controller(&[Some(&hands_up), Some(&lean), None], false);
    assert!(pose.last_reading().is_none());

    assert_eq!(pose.next_action_at(Duration::ZERO), Action::Jump);
    let reading = pose.last_reading().unwrap();
    assert!(reading.jump);
    assert!(!reading.debounced);

    // Held back by the debounce gate, tilt still reported
    assert_eq!(pose.next_action_at(Duration::from_millis(100)), Action::None);
    let reading = pose.last_reading().unwrap();
    assert!(reading.debounced);
    assert!(reading.left);
    assert!(reading.tilt < -0.25);

    // A tick without a pose keeps the previous readout
    pose.next_action_at(Duration::from_millis(200));
    assert!(pose.last_reading().unwrap().debounced);

    pose.reset();
    assert!(pose.last_reading().is_none());
}

#[test]
fn test_replay_mirroring_flips_lean() {
    let lean = leaning_frame();

    let mut plain = controller(&[Some(&lean)], false);
    assert_eq!(plain.next_action_at(Duration::ZERO), Action::Left);

    let mut mirrored = controller(&[Some(&lean)], true);
    assert_eq!(mirrored.next_action_at(Duration::ZERO), Action::Right);
}

#[test]
fn test_pose_actions_drive_round() {
    let config = GameConfig::default();
    let mut round = seeded_round(&config, 5);
    let lean = leaning_frame();
    let mut pose = controller(&[Some(&lean)], false);

    let action = pose.next_action_at(Duration::ZERO);
    round.tick(1.0 / 60.0, &[action]);
    assert_eq!(round.player().current_lane(), 0);
}

proptest! {
    #[test]
    fn prop_every_spawn_is_accounted_for(
        seed in any::<u64>(),
        moves in prop::collection::vec(any::<u8>(), 1..2000),
    ) {
        let mut config = GameConfig::default();
        config.scoring.max_collisions = u32::MAX;
        let mut round = seeded_round(&config, seed);

        for n in moves {
            round.tick(1.0 / 30.0, &[action_from(n)]);

            let engine = round.engine();
            let resolved = u64::from(engine.collisions_total()) + u64::from(engine.evaded_total());
            prop_assert_eq!(resolved + engine.live_count() as u64, round.spawned());
            prop_assert!(round.player().current_lane() < config.lane_count());
            prop_assert!(round.player().bottom() <= config.field.ground_y);
        }

        let summary = round.summary();
        let per_evade = u64::from(config.scoring.points_per_evade);
        prop_assert_eq!(summary.score, u64::from(summary.evaded) * per_evade);
    }
}
