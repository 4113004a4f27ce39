//! Game configuration

use crate::error::ConfigError;
use crate::obstacle::ObstacleKind;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main game configuration
///
/// The flat keys are the tunables shared by the classifier and the obstacle
/// engine; the nested sections hold layout, physics and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub debounce_seconds: f64,
    pub tilt_threshold: f32,
    pub duck_ratio: f32,
    pub spawn_base_interval: f32,
    pub spawn_jitter_factor: f32,
    pub obstacle_speed: f32,
    pub lane_positions: Vec<f32>,
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub obstacle: ObstacleConfig,
    pub scoring: ScoringConfig,
    pub gesture: GestureConfig,
    pub catalog: Vec<CatalogEntry>,
    pub seed: Option<u64>,
}

/// Play field geometry, in pixels; y grows downwards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    /// Distance past the bottom edge before an obstacle counts as escaped
    pub exit_margin: f32,
    /// Extra random lift above the top edge for freshly spawned obstacles
    pub spawn_offset_max: u32,
}

/// Player box and per-tick jump physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Defaults to the middle lane when unset
    pub start_lane: Option<usize>,
}

/// Obstacle box and jump clearance tolerance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f32,
    pub height: f32,
    pub jump_tolerance_ratio: f32,
    pub min_jump_tolerance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub max_collisions: u32,
    pub points_per_evade: u32,
}

/// Gesture pipeline options beyond the flat thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub smoothing_window: usize,
    /// Right wrist crossing the hip midline also steers left/right
    pub hand_cross_gesture: bool,
    /// Flip frames horizontally before classification (selfie view)
    pub mirror_input: bool,
    pub capture_poll_budget_ms: u64,
}

/// Named obstacle variant; the kind is inferred from the name unless given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ObstacleKind>,
}

impl CatalogEntry {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: None,
        }
    }
}

const DEFAULT_CATALOG: [&str; 5] = [
    "obstaculo.barra",
    "obstaculo.buraco",
    "obstaculo.bola",
    "obstaculo.cometa",
    "obstaculo.cone",
];

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            debounce_seconds: 0.35,
            tilt_threshold: 0.25,
            duck_ratio: 0.22,
            spawn_base_interval: 1.2,
            spawn_jitter_factor: 1.6,
            obstacle_speed: 220.0,
            lane_positions: vec![300.0, 450.0, 600.0],
            field: FieldConfig::default(),
            player: PlayerConfig::default(),
            obstacle: ObstacleConfig::default(),
            scoring: ScoringConfig::default(),
            gesture: GestureConfig::default(),
            catalog: DEFAULT_CATALOG
                .into_iter()
                .map(CatalogEntry::named)
                .collect(),
            seed: None,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            ground_y: 500.0,
            exit_margin: 100.0,
            spawn_offset_max: 80,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            jump_velocity: -16.0,
            gravity: 1.0,
            start_lane: None,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            jump_tolerance_ratio: 0.25,
            min_jump_tolerance: 8.0,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_collisions: 10,
            points_per_evade: 10,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            hand_cross_gesture: false,
            mirror_input: true,
            capture_poll_budget_ms: 33,
        }
    }
}

impl GameConfig {
    /// Slower obstacles and more lives, for the youngest players
    pub fn gentle() -> Self {
        Self {
            spawn_base_interval: 1.8,
            obstacle_speed: 160.0,
            scoring: ScoringConfig {
                max_collisions: 20,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Load and validate a JSON config file. Missing keys take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    pub fn lane_count(&self) -> usize {
        self.lane_positions.len()
    }

    /// Middle lane unless the config pins one, clamped into range
    pub fn start_lane(&self) -> usize {
        let last = self.lane_count().saturating_sub(1);
        self.player
            .start_lane
            .unwrap_or(self.lane_count() / 2)
            .min(last)
    }

    /// Catalog entries with their resolved obstacle kind
    pub fn catalog_kinds(&self) -> Vec<(String, ObstacleKind)> {
        self.catalog
            .iter()
            .map(|entry| {
                let kind = entry
                    .kind
                    .unwrap_or_else(|| ObstacleKind::from_asset_name(&entry.name));
                (entry.name.clone(), kind)
            })
            .collect()
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.lane_positions.is_empty() {
            return Err(ConfigError::NoLanes);
        }
        for &x in &self.lane_positions {
            finite("lane_positions", x as f64)?;
        }

        positive("debounce_seconds", self.debounce_seconds, true)?;
        positive("duck_ratio", self.duck_ratio as f64, false)?;
        positive("spawn_base_interval", self.spawn_base_interval as f64, false)?;
        positive("obstacle_speed", self.obstacle_speed as f64, false)?;

        finite("tilt_threshold", self.tilt_threshold as f64)?;
        if self.tilt_threshold <= 0.0 || self.tilt_threshold > 1.0 {
            return Err(ConfigError::TiltThresholdOutOfRange(self.tilt_threshold as f64));
        }

        finite("spawn_jitter_factor", self.spawn_jitter_factor as f64)?;
        if self.spawn_jitter_factor < 1.0 {
            return Err(ConfigError::JitterBelowOne(self.spawn_jitter_factor as f64));
        }

        positive("field.width", self.field.width as f64, false)?;
        positive("field.height", self.field.height as f64, false)?;
        positive("field.exit_margin", self.field.exit_margin as f64, true)?;
        finite("field.ground_y", self.field.ground_y as f64)?;

        positive("player.width", self.player.width as f64, false)?;
        positive("player.height", self.player.height as f64, false)?;
        finite("player.jump_velocity", self.player.jump_velocity as f64)?;
        positive("player.gravity", self.player.gravity as f64, false)?;

        positive("obstacle.width", self.obstacle.width as f64, false)?;
        positive("obstacle.height", self.obstacle.height as f64, false)?;
        positive("obstacle.jump_tolerance_ratio", self.obstacle.jump_tolerance_ratio as f64, true)?;
        positive("obstacle.min_jump_tolerance", self.obstacle.min_jump_tolerance as f64, true)?;

        if self.gesture.smoothing_window == 0 {
            return Err(ConfigError::EmptySmoothingWindow);
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(
    field: &'static str,
    value: f64,
    allow_zero: bool,
) -> std::result::Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 || (allow_zero && value == 0.0) {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
