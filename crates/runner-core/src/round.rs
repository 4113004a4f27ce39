//! One round of play: the fixed per-frame tick order and scoring

use crate::action::Action;
use crate::config::GameConfig;
use crate::cue::{play_quietly, Cue, CueSink};
use crate::obstacle::{
    EncounterCounters, EncounterEngine, EncounterSummary, ObstacleId, ObstacleSpawner,
};
use crate::player::PlayerState;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundState {
    Running,
    Over,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub spawned: Option<ObstacleId>,
    pub escaped: u32,
    pub encounters: EncounterSummary,
    pub score_delta: u64,
    pub round_over: bool,
}

/// Final numbers of a round, ready for whoever stores high scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub score: u64,
    pub collisions: u32,
    pub evaded: u32,
    pub spawned: u64,
    pub ticks: u64,
    pub elapsed_seconds: f32,
}

pub struct Round<R: Rng = StdRng> {
    player: PlayerState,
    spawner: ObstacleSpawner<R>,
    engine: EncounterEngine,
    config: GameConfig,
    state: RoundState,
    score: u64,
    seen: EncounterCounters,
    spawned: u64,
    ticks: u64,
    elapsed: f32,
}

impl Round<StdRng> {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_parts(config, ObstacleSpawner::new(config), EncounterEngine::new(config))
    }
}

impl<R: Rng> Round<R> {
    pub fn with_parts(
        config: &GameConfig,
        spawner: ObstacleSpawner<R>,
        engine: EncounterEngine,
    ) -> Self {
        info!(
            lanes = config.lane_count(),
            max_collisions = config.scoring.max_collisions,
            "round started"
        );
        Self {
            player: PlayerState::new(config),
            spawner,
            engine,
            config: config.clone(),
            state: RoundState::Running,
            score: 0,
            seen: EncounterCounters::default(),
            spawned: 0,
            ticks: 0,
            elapsed: 0.0,
        }
    }

    pub fn with_cues(mut self, cues: Box<dyn CueSink>) -> Self {
        self.engine = self.engine.with_cues(cues);
        self
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn engine(&self) -> &EncounterEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EncounterEngine {
        &mut self.engine
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == RoundState::Over
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn collisions(&self) -> u32 {
        self.engine.collisions_total()
    }

    /// Lives left before the round ends
    pub fn remaining_collisions(&self) -> u32 {
        self.config.scoring.max_collisions.saturating_sub(self.collisions())
    }

    /// Obstacles spawned during this round
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Run one frame: actions, player physics, spawn, advance, resolve, score.
    /// A finished round ignores further ticks.
    pub fn tick(&mut self, dt: f32, actions: &[Action]) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            report.round_over = true;
            return report;
        }

        for &action in actions {
            if self.player.apply(action) && action == Action::Jump {
                play_quietly(self.engine.cues_mut(), Cue::Jump);
            }
        }
        self.player.update();

        if let Some(obstacle) = self.spawner.tick(dt) {
            report.spawned = Some(obstacle.id);
            self.spawned += 1;
            self.engine.insert(obstacle);
        }

        report.escaped = self.engine.advance(dt);
        report.encounters = self.engine.resolve(&self.player);

        let counters = self.engine.counters();
        let evaded_delta = counters.evaded.saturating_sub(self.seen.evaded);
        report.score_delta =
            u64::from(evaded_delta) * u64::from(self.config.scoring.points_per_evade);
        self.score += report.score_delta;
        self.seen = counters;

        self.ticks += 1;
        self.elapsed += dt;

        if counters.collisions >= self.config.scoring.max_collisions {
            self.state = RoundState::Over;
            report.round_over = true;
            info!(
                score = self.score,
                collisions = counters.collisions,
                evaded = counters.evaded,
                "round over"
            );
        }

        report
    }

    /// Start over with a fresh player, empty field and zero score
    pub fn restart(&mut self) {
        self.engine.clear();
        self.spawner.reset();
        self.player = PlayerState::new(&self.config);
        self.state = RoundState::Running;
        self.score = 0;
        self.seen = EncounterCounters::default();
        self.spawned = 0;
        self.ticks = 0;
        self.elapsed = 0.0;
        info!("round restarted");
    }

    pub fn summary(&self) -> RoundSummary {
        let counters = self.engine.counters();
        RoundSummary {
            score: self.score,
            collisions: counters.collisions,
            evaded: counters.evaded,
            spawned: self.spawned,
            ticks: self.ticks,
            elapsed_seconds: self.elapsed,
        }
    }
}
