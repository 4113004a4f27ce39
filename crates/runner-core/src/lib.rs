//! Kids Runner game rules
//!
//! Lane/jump player state, obstacle spawning and the encounter engine that
//! resolves every obstacle exactly once. Nothing here touches a terminal,
//! a camera or the filesystem beyond config loading.

pub mod action;
pub mod config;
pub mod cue;
pub mod error;
pub mod geometry;
pub mod obstacle;
pub mod player;
pub mod round;

// Re-export commonly used types
pub use action::Action;
pub use config::GameConfig;
pub use cue::{Cue, CueSink, NullCues};
pub use error::{ConfigError, CueError, GeometryFault};
pub use geometry::Rect;
pub use obstacle::{
    EncounterCounters, EncounterEngine, EncounterSummary, Obstacle, ObstacleCatalog, ObstacleId,
    ObstacleKind, ObstacleSpawner, Resolution,
};
pub use player::{PlayerState, VerticalState};
pub use round::{Round, RoundState, RoundSummary, TickReport};

// Error handling
pub type Result<T> = anyhow::Result<T>;
