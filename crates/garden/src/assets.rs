//! Opaque asset ids for flowers and props.
//!
//! The engine never loads anything itself; it only hands the renderer an id
//! per flower stage and per obstacle kind. Gaps in the catalog resolve to
//! `PLACEHOLDER_ASSET` and are reported as `MissingAsset`.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::growth::{MAX_STAGE, MIN_STAGE};
use crate::scatter::ObstacleKind;
use crate::warnings::SceneWarning;

pub const PLACEHOLDER_ASSET: &str = "placeholder";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AssetCatalog {
    pub stages: HashMap<u8, String>,
    pub obstacles: HashMap<ObstacleKind, String>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        let stages = [
            (1, "flower_seedling"),
            (2, "flower_sprout"),
            (3, "flower_bud"),
            (4, "flower_bloom"),
            (5, "flower_full_bloom"),
        ]
        .into_iter()
        .map(|(stage, id)| (stage, id.to_string()))
        .collect();
        let obstacles = [
            (ObstacleKind::Tree, "tree"),
            (ObstacleKind::Rock, "rock"),
            (ObstacleKind::Patch, "patch_soil"),
            (ObstacleKind::SpecialArea, "pond"),
        ]
        .into_iter()
        .map(|(kind, id)| (kind, id.to_string()))
        .collect();
        Self { stages, obstacles }
    }
}

impl AssetCatalog {
    pub fn empty() -> Self {
        Self {
            stages: HashMap::new(),
            obstacles: HashMap::new(),
        }
    }

    pub fn stage_asset(&self, stage: u8) -> Option<&str> {
        self.stages.get(&stage).map(String::as_str)
    }

    pub fn obstacle_asset(&self, kind: ObstacleKind) -> Option<&str> {
        self.obstacles.get(&kind).map(String::as_str)
    }

    /// Asset id for `stage`, falling back to the placeholder.
    pub fn resolve_stage(&self, stage: u8) -> &str {
        self.stage_asset(stage).unwrap_or(PLACEHOLDER_ASSET)
    }

    pub fn resolve_obstacle(&self, kind: ObstacleKind) -> &str {
        self.obstacle_asset(kind).unwrap_or(PLACEHOLDER_ASSET)
    }

    /// One warning per stage or kind the catalog cannot serve.
    ///
    /// Only stages and kinds that actually appear are checked, so a garden
    /// with no rocks does not complain about a missing rock model.
    pub fn missing(
        &self,
        stages: impl IntoIterator<Item = u8>,
        kinds: impl IntoIterator<Item = ObstacleKind>,
    ) -> Vec<SceneWarning> {
        let mut stages: Vec<u8> = stages.into_iter().collect();
        stages.sort_unstable();
        stages.dedup();
        let mut kinds: Vec<ObstacleKind> = kinds.into_iter().collect();
        kinds.sort_by_key(|k| k.label());
        kinds.dedup();

        let stage_gaps = stages
            .into_iter()
            .filter(|s| self.stage_asset(*s).is_none())
            .map(|s| SceneWarning::MissingAsset {
                key: format!("stage:{s}"),
            });
        let kind_gaps = kinds
            .into_iter()
            .filter(|k| self.obstacle_asset(*k).is_none())
            .map(|k| SceneWarning::MissingAsset {
                key: format!("obstacle:{}", k.label()),
            });
        stage_gaps.chain(kind_gaps).collect()
    }

    pub fn covers_all_stages(&self) -> bool {
        (MIN_STAGE..=MAX_STAGE).all(|s| self.stage_asset(s).is_some())
    }
}
