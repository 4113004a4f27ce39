//! Encounter engine: moves live obstacles and settles each one exactly once
//!
//! An obstacle leaves the live set in one of two ways. Either it scrolls past
//! the bottom of the field untouched (evaded), or it overlaps the player and
//! its kind decides between hit and evaded. Either way it is marked and
//! dropped in the same pass, so nothing is ever counted twice.

use super::{Obstacle, ObstacleKind, Resolution};
use crate::config::GameConfig;
use crate::cue::{play_quietly, Cue, CueSink, NullCues};
use crate::error::GeometryFault;
use crate::player::PlayerState;
use serde::Serialize;
use tracing::{debug, warn};

/// Running totals for one round; never decrease until `clear`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EncounterCounters {
    pub collisions: u32,
    pub evaded: u32,
}

/// Outcome of a single `resolve` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EncounterSummary {
    pub collisions: u32,
    pub evasions: u32,
}

impl EncounterSummary {
    pub fn is_empty(&self) -> bool {
        self.collisions == 0 && self.evasions == 0
    }
}

pub struct EncounterEngine {
    obstacles: Vec<Obstacle>,
    counters: EncounterCounters,
    speed: f32,
    exit_line: f32,
    tolerance_ratio: f32,
    min_tolerance: f32,
    lane_count: usize,
    cues: Box<dyn CueSink>,
}

impl EncounterEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            obstacles: Vec::new(),
            counters: EncounterCounters::default(),
            speed: config.obstacle_speed,
            exit_line: config.field.height + config.field.exit_margin,
            tolerance_ratio: config.obstacle.jump_tolerance_ratio,
            min_tolerance: config.obstacle.min_jump_tolerance,
            lane_count: config.lane_count(),
            cues: Box::new(NullCues),
        }
    }

    pub fn with_cues(mut self, cues: Box<dyn CueSink>) -> Self {
        self.cues = cues;
        self
    }

    pub fn cues_mut(&mut self) -> &mut dyn CueSink {
        self.cues.as_mut()
    }

    /// Add a freshly spawned obstacle to the live set
    pub fn insert(&mut self, obstacle: Obstacle) {
        if !obstacle.is_unresolved() {
            debug!(id = %obstacle.id, "ignoring already resolved obstacle");
            return;
        }
        self.obstacles.push(obstacle);
    }

    pub fn live(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn live_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn counters(&self) -> EncounterCounters {
        self.counters
    }

    pub fn collisions_total(&self) -> u32 {
        self.counters.collisions
    }

    pub fn evaded_total(&self) -> u32 {
        self.counters.evaded
    }

    /// Drop all live obstacles and zero the counters (round restart)
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.counters = EncounterCounters::default();
    }

    /// Scroll every obstacle down by `speed * dt`. Unresolved obstacles
    /// whose top edge passes the exit line count as evaded and are dropped.
    /// Returns how many escaped this call.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let step = self.speed * dt;
        let exit_line = self.exit_line;
        let mut escaped = 0;

        for obstacle in &mut self.obstacles {
            obstacle.position_y += step;
            if obstacle.is_unresolved() && obstacle.position_y > exit_line {
                obstacle.resolved = Resolution::Evaded;
                escaped += 1;
                debug!(id = %obstacle.id, lane = obstacle.lane, "obstacle escaped off-screen");
            }
        }

        self.counters.evaded += escaped;
        self.obstacles.retain(Obstacle::is_unresolved);
        escaped
    }

    /// Settle every unresolved obstacle overlapping the player.
    pub fn resolve(&mut self, player: &PlayerState) -> EncounterSummary {
        let mut summary = EncounterSummary::default();

        for i in 0..self.obstacles.len() {
            if !self.obstacles[i].is_unresolved() {
                continue;
            }

            let outcome = match self.judge(&self.obstacles[i], player) {
                Ok(None) => continue,
                Ok(Some(outcome)) => outcome,
                Err(fault) => {
                    warn!(
                        id = %self.obstacles[i].id,
                        %fault,
                        "bad encounter geometry, counting as collision"
                    );
                    Resolution::Hit
                }
            };

            let obstacle = &mut self.obstacles[i];
            obstacle.resolved = outcome;
            debug!(
                id = %obstacle.id,
                kind = ?obstacle.kind,
                lane = obstacle.lane,
                player_lane = player.current_lane(),
                ?outcome,
                "obstacle resolved"
            );

            if outcome == Resolution::Hit {
                self.counters.collisions += 1;
                summary.collisions += 1;
                play_quietly(self.cues.as_mut(), Cue::Collision);
            } else {
                self.counters.evaded += 1;
                summary.evasions += 1;
            }
        }

        self.obstacles.retain(Obstacle::is_unresolved);
        summary
    }

    /// `None` when the obstacle does not touch the player
    fn judge(
        &self,
        obstacle: &Obstacle,
        player: &PlayerState,
    ) -> Result<Option<Resolution>, GeometryFault> {
        if obstacle.lane >= self.lane_count {
            return Err(GeometryFault::UnknownLane {
                lane: obstacle.lane,
                lanes: self.lane_count,
            });
        }

        let ob_rect = obstacle.rect();
        if !player.rect().overlaps(&ob_rect)? {
            return Ok(None);
        }

        let other_lane = player.current_lane() != obstacle.lane;
        let evaded = match obstacle.kind {
            ObstacleKind::NeedJump => {
                let tolerance = self.min_tolerance.max(obstacle.height * self.tolerance_ratio);
                let cleared = player.is_airborne() && player.bottom() <= ob_rect.top() + tolerance;
                cleared || other_lane
            }
            ObstacleKind::MustAvoid => other_lane,
        };

        Ok(Some(if evaded { Resolution::Evaded } else { Resolution::Hit }))
    }
}
