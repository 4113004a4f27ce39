//! Randomised obstacle spawning

use super::{Obstacle, ObstacleCatalog, ObstacleId};
use crate::config::GameConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

/// Spawn timing state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpawnSchedule {
    pub elapsed: f32,
    pub next_interval: f32,
    pub last_lane: Option<usize>,
}

/// Emits obstacles at jittered intervals, steering away from repeating
/// the previous lane.
pub struct ObstacleSpawner<R: Rng = StdRng> {
    schedule: SpawnSchedule,
    base_interval: f32,
    jitter_factor: f32,
    lanes: Vec<f32>,
    width: f32,
    height: f32,
    spawn_offset_max: u32,
    catalog: ObstacleCatalog,
    rng: R,
    next_id: u64,
}

impl ObstacleSpawner<StdRng> {
    /// Seeded from `config.seed`, or from OS entropy when unset
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ObstacleSpawner<R> {
    pub fn with_rng(config: &GameConfig, mut rng: R) -> Self {
        let base_interval = config.spawn_base_interval;
        let jitter_factor = config.spawn_jitter_factor;
        let next_interval = draw_interval(&mut rng, base_interval, jitter_factor);

        Self {
            schedule: SpawnSchedule {
                elapsed: 0.0,
                next_interval,
                last_lane: None,
            },
            base_interval,
            jitter_factor,
            lanes: config.lane_positions.clone(),
            width: config.obstacle.width,
            height: config.obstacle.height,
            spawn_offset_max: config.field.spawn_offset_max,
            catalog: ObstacleCatalog::from_config(config),
            rng,
            next_id: 0,
        }
    }

    pub fn with_catalog(mut self, catalog: ObstacleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    /// Number of obstacles emitted so far
    pub fn spawned(&self) -> u64 {
        self.next_id
    }

    /// Fresh schedule for a new round. Ids keep counting up.
    pub fn reset(&mut self) {
        self.schedule = SpawnSchedule {
            elapsed: 0.0,
            next_interval: draw_interval(&mut self.rng, self.base_interval, self.jitter_factor),
            last_lane: None,
        };
    }

    /// Advance the timer; returns an obstacle when the interval elapses.
    /// A spawner without lanes never emits.
    pub fn tick(&mut self, dt: f32) -> Option<Obstacle> {
        if self.lanes.is_empty() {
            return None;
        }

        self.schedule.elapsed += dt;
        if self.schedule.elapsed < self.schedule.next_interval {
            return None;
        }

        self.schedule.elapsed = 0.0;
        self.schedule.next_interval =
            draw_interval(&mut self.rng, self.base_interval, self.jitter_factor);

        let lane = self.choose_lane();
        self.schedule.last_lane = Some(lane);

        let (variant, kind) = self.catalog.pick(&mut self.rng);
        let variant = variant.to_string();
        let lift = self.rng.gen_range(0..=self.spawn_offset_max) as f32;

        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        let top = -self.height - lift;
        let obstacle = Obstacle::new(id, lane, kind, self.lanes[lane], top, self.width, self.height)
            .with_variant(variant);

        debug!(
            id = %obstacle.id,
            lane,
            kind = ?obstacle.kind,
            variant = %obstacle.variant,
            next_interval = self.schedule.next_interval,
            "spawned obstacle"
        );

        Some(obstacle)
    }

    /// Uniform lane; a repeat of the last lane is redrawn once from the others
    fn choose_lane(&mut self) -> usize {
        let count = self.lanes.len();
        let lane = self.rng.gen_range(0..count);

        match self.schedule.last_lane {
            Some(last) if lane == last && count > 1 => {
                let alternatives: Vec<usize> = (0..count).filter(|&i| i != last).collect();
                alternatives[self.rng.gen_range(0..alternatives.len())]
            }
            _ => lane,
        }
    }
}

/// Uniform in `[base, base * jitter]`. A degenerate range (jitter below
/// one, non-finite or negative values) collapses to `max(base, 0)`.
fn draw_interval<R: Rng + ?Sized>(rng: &mut R, base: f32, jitter: f32) -> f32 {
    let upper = base * jitter;
    if base.is_finite() && upper.is_finite() && base >= 0.0 && upper > base {
        rng.gen_range(base..=upper)
    } else {
        base.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn total_ticks_until_spawn(spawner: &mut ObstacleSpawner, dt: f32) -> (u32, Obstacle) {
        for n in 1..10_000 {
            if let Some(o) = spawner.tick(dt) {
                return (n, o);
            }
        }
        panic!("spawner never fired");
    }

    #[test]
    fn test_spawn_interval_within_bounds() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::seeded(&config, 42);

        for _ in 0..20 {
            let interval = spawner.schedule().next_interval;
            assert!((1.2..=1.2 * 1.6).contains(&interval));
            let (ticks, _) = total_ticks_until_spawn(&mut spawner, 0.01);
            let waited = ticks as f32 * 0.01;
            assert!(waited >= interval - 1e-3 && waited <= interval + 0.011);
            assert_eq!(spawner.schedule().elapsed, 0.0);
        }
    }

    #[test]
    fn test_no_consecutive_lane_repeat() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::seeded(&config, 3);

        let mut previous = None;
        for _ in 0..200 {
            let (_, o) = total_ticks_until_spawn(&mut spawner, 0.1);
            assert_ne!(Some(o.lane), previous);
            assert_eq!(spawner.schedule().last_lane, Some(o.lane));
            previous = Some(o.lane);
        }
    }

    #[test]
    fn test_single_lane_repeats() {
        let config = GameConfig {
            lane_positions: vec![450.0],
            ..Default::default()
        };
        let mut spawner = ObstacleSpawner::seeded(&config, 9);
        for _ in 0..5 {
            let (_, o) = total_ticks_until_spawn(&mut spawner, 0.5);
            assert_eq!(o.lane, 0);
        }
    }

    #[test]
    fn test_spawned_above_field() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::seeded(&config, 11);

        for expected_id in 0..30 {
            let (_, o) = total_ticks_until_spawn(&mut spawner, 0.25);
            assert_eq!(o.id, ObstacleId(expected_id));
            assert!(o.is_unresolved());
            assert!(o.rect().bottom() <= 0.0);
            assert!(o.position_y >= -64.0 - 80.0);
            assert_eq!(o.center_x, config.lane_positions[o.lane]);
        }
        assert_eq!(spawner.spawned(), 30);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let config = GameConfig::default();
        let mut a = ObstacleSpawner::seeded(&config, 5);
        let mut b = ObstacleSpawner::seeded(&config, 5);
        for _ in 0..500 {
            let (x, y) = (a.tick(1.0 / 60.0), b.tick(1.0 / 60.0));
            assert_eq!(
                x.map(|o| (o.lane, o.kind, o.position_y)),
                y.map(|o| (o.lane, o.kind, o.position_y))
            );
        }
    }

    #[test]
    fn test_jitter_below_one_does_not_panic() {
        let config = GameConfig {
            spawn_jitter_factor: 0.9,
            ..Default::default()
        };
        let mut spawner = ObstacleSpawner::seeded(&config, 1);
        assert_eq!(spawner.schedule().next_interval, config.spawn_base_interval);

        let (ticks, _) = total_ticks_until_spawn(&mut spawner, 0.1);
        assert!(ticks >= 12);
        assert_eq!(spawner.schedule().next_interval, config.spawn_base_interval);
    }

    #[test]
    fn test_non_finite_interval_collapses_to_zero() {
        let config = GameConfig {
            spawn_base_interval: f32::NAN,
            ..Default::default()
        };
        let mut spawner = ObstacleSpawner::seeded(&config, 1);
        assert_eq!(spawner.schedule().next_interval, 0.0);
        assert!(spawner.tick(0.0).is_some());
    }

    #[test]
    fn test_no_lanes_never_spawns() {
        let config = GameConfig {
            lane_positions: vec![],
            ..Default::default()
        };
        let mut spawner = ObstacleSpawner::seeded(&config, 1);
        for _ in 0..100 {
            assert!(spawner.tick(1.0).is_none());
        }
        assert_eq!(spawner.spawned(), 0);
    }

    proptest! {
        #[test]
        fn prop_interval_redrawn_in_range(
            seed in any::<u64>(),
            base in 0.1f32..5.0,
            jitter in 1.0f32..3.0,
        ) {
            let config = GameConfig {
                spawn_base_interval: base,
                spawn_jitter_factor: jitter,
                ..Default::default()
            };
            let mut spawner = ObstacleSpawner::seeded(&config, seed);
            for _ in 0..10 {
                let upper = base * jitter;
                let interval = spawner.schedule().next_interval;
                prop_assert!(interval >= base && interval <= upper);
                // One oversized step always fires
                prop_assert!(spawner.tick(upper + 1.0).is_some());
            }
        }
    }
}
