//! Obstacle variants available to the spawner

use super::ObstacleKind;
use crate::config::GameConfig;
use rand::Rng;

/// Named obstacle variants with their evasion kind
#[derive(Debug, Clone, Default)]
pub struct ObstacleCatalog {
    entries: Vec<(String, ObstacleKind)>,
}

impl ObstacleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            entries: config.catalog_kinds(),
        }
    }

    /// Add a variant, inferring its kind from the name
    pub fn add(mut self, name: &str) -> Self {
        self.entries.push((name.to_string(), ObstacleKind::from_asset_name(name)));
        self
    }

    pub fn add_with_kind(mut self, name: &str, kind: ObstacleKind) -> Self {
        self.entries.push((name.to_string(), kind));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniform pick; an empty catalog yields an unnamed lane-change obstacle
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> (&str, ObstacleKind) {
        if self.entries.is_empty() {
            return ("", ObstacleKind::MustAvoid);
        }
        let (name, kind) = &self.entries[rng.gen_range(0..self.entries.len())];
        (name.as_str(), *kind)
    }
}
