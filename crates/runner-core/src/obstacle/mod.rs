//! Obstacles: catalog, spawning and encounter resolution

pub mod catalog;
pub mod encounter;
pub mod spawner;

pub use catalog::ObstacleCatalog;
pub use encounter::{EncounterCounters, EncounterEngine, EncounterSummary};
pub use spawner::{ObstacleSpawner, SpawnSchedule};

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObstacleId(pub u64);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an obstacle must be evaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Jump over it or leave its lane
    NeedJump,
    /// Only leaving its lane helps
    MustAvoid,
}

impl ObstacleKind {
    /// Infer the kind from an asset name such as `obstaculo.barra.png`.
    /// Unrecognised names are treated as lane-change obstacles.
    pub fn from_asset_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("barra") || name.contains("buraco") {
            ObstacleKind::NeedJump
        } else {
            ObstacleKind::MustAvoid
        }
    }
}

/// Fate of an obstacle; leaves `Unresolved` at most once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Unresolved,
    Hit,
    Evaded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub lane: usize,
    pub kind: ObstacleKind,
    /// Catalog entry this obstacle was drawn from
    pub variant: String,
    pub center_x: f32,
    /// y of the top edge
    pub position_y: f32,
    pub width: f32,
    pub height: f32,
    pub resolved: Resolution,
}

impl Obstacle {
    pub fn new(
        id: ObstacleId,
        lane: usize,
        kind: ObstacleKind,
        center_x: f32,
        position_y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            id,
            lane,
            kind,
            variant: String::new(),
            center_x,
            position_y,
            width,
            height,
            resolved: Resolution::Unresolved,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::from_top_center(self.center_x, self.position_y, self.width, self.height)
    }

    pub fn is_unresolved(&self) -> bool {
        self.resolved == Resolution::Unresolved
    }
}
