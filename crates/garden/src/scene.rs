//! Whole-garden assembly: layout, flowers, props, grass.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::assets::AssetCatalog;
use crate::config::GardenConfig;
use crate::layout::{layout_goals, Patch};
use crate::phyllotaxis::{flowers_for_patch, Flower};
use crate::scatter::{
    patch_exclusion_zones, scatter_field, scatter_obstacles, special_area_zones, FieldElement,
    Obstacle, ObstacleKind,
};
use crate::snapshot::{GardenSnapshot, Goal};
use crate::warnings::SceneWarning;

/// Everything the renderer needs for one snapshot.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GardenScene {
    /// Goals that received a patch, in grid order. `Patch::goal_index` indexes this.
    pub goals: Vec<Goal>,
    pub patches: Vec<Patch>,
    pub flowers: Vec<Flower>,
    /// Scattered props and special areas. Patches are not repeated here.
    pub obstacles: Vec<Obstacle>,
    pub grass: Vec<FieldElement>,
    pub warnings: Vec<SceneWarning>,
    /// Bumped on every rebuild.
    pub generation: u64,
}

impl GardenScene {
    pub fn goal_for_patch(&self, patch: &Patch) -> Option<&Goal> {
        self.goals.get(patch.goal_index)
    }

    pub fn flowers_of(&self, goal_index: usize) -> impl Iterator<Item = &Flower> {
        self.flowers.iter().filter(move |f| f.goal_index == goal_index)
    }

    pub fn obstacles_of(&self, kind: ObstacleKind) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(move |o| o.kind == kind)
    }

    /// All zones grass keeps clear of.
    pub fn exclusion_zones(&self) -> Vec<Obstacle> {
        self.patches
            .iter()
            .map(|p| Obstacle::zone(ObstacleKind::Patch, p.ground_position(), p.radius))
            .chain(self.obstacles.iter().cloned())
            .collect()
    }
}

/// Build the garden for `snapshot`.
///
/// Trees and rocks come from a fresh RNG seeded with `config.layout_seed`, so
/// they are identical across rebuilds; grass draws from `session_rng`.
pub fn build_scene<R: Rng + ?Sized>(
    snapshot: &GardenSnapshot,
    config: &GardenConfig,
    catalog: &AssetCatalog,
    session_rng: &mut R,
) -> GardenScene {
    let mut warnings = Vec::new();

    let layout = layout_goals(&snapshot.goals, config);
    warnings.extend(layout.warning());

    let placed: Vec<Goal> = snapshot.goals[..layout.patches.len()].to_vec();
    warnings.extend(
        placed
            .iter()
            .flat_map(|g| &g.habits)
            .filter(|h| h.is_malformed())
            .map(|h| SceneWarning::MalformedHabit {
                habit_id: h.id.clone(),
            }),
    );

    let flowers: Vec<Flower> = layout
        .patches
        .iter()
        .flat_map(|patch| flowers_for_patch(patch, &placed[patch.goal_index], config))
        .collect();

    let patch_zones = patch_exclusion_zones(&layout);
    let mut obstacles = special_area_zones(config);

    let mut layout_rng = ChaCha8Rng::seed_from_u64(config.layout_seed);
    for ring in [&config.trees, &config.rocks] {
        let existing: Vec<Obstacle> = patch_zones.iter().chain(&obstacles).cloned().collect();
        let sampled = scatter_obstacles(&mut layout_rng, ring, &existing);
        warnings.extend(sampled.underflow(ring.kind.label()));
        if sampled.relaxed > 0 {
            debug!(
                "{} of {} {} placed without full spacing",
                sampled.relaxed,
                ring.count,
                ring.kind.label()
            );
        }
        obstacles.extend(sampled.items);
    }

    let zones: Vec<Obstacle> = patch_zones.iter().chain(&obstacles).cloned().collect();
    let grass = scatter_field(session_rng, &config.field, &zones);
    warnings.extend(grass.underflow("grass blades"));

    warnings.extend(catalog.missing(
        flowers.iter().map(|f| f.stage),
        obstacles.iter().map(|o| o.kind).chain(
            (!layout.patches.is_empty()).then_some(ObstacleKind::Patch),
        ),
    ));

    GardenScene {
        goals: placed,
        patches: layout.patches,
        flowers,
        obstacles,
        grass: grass.items,
        warnings,
        generation: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::snapshot::Habit;

    fn snapshot(goal_count: usize) -> GardenSnapshot {
        let goals = (0..goal_count)
            .map(|g| {
                let habits = (0..4)
                    .map(|h| Habit::new(format!("g{g}h{h}"), format!("Habit {h}"), (h * 9) as i64))
                    .collect();
                Goal::new(format!("g{g}"), format!("Goal {g}"), habits)
            })
            .collect();
        GardenSnapshot::new("tester", goals)
    }

    fn small_config() -> GardenConfig {
        GardenConfig {
            field: FieldConfig {
                count: 800,
                ..FieldConfig::default()
            },
            ..GardenConfig::default()
        }
    }

    fn build(snapshot: &GardenSnapshot, config: &GardenConfig, seed: u64) -> GardenScene {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        build_scene(snapshot, config, &AssetCatalog::default(), &mut rng)
    }

    #[test]
    fn test_counts_follow_snapshot() {
        let config = small_config();
        let scene = build(&snapshot(3), &config, 1);
        assert_eq!(scene.patches.len(), 3);
        assert_eq!(scene.flowers.len(), 12);
        assert_eq!(scene.obstacles_of(ObstacleKind::Tree).count(), config.trees.count);
        assert_eq!(scene.obstacles_of(ObstacleKind::Rock).count(), config.rocks.count);
        assert_eq!(scene.obstacles_of(ObstacleKind::SpecialArea).count(), 1);
        assert!(scene.warnings.is_empty(), "{:?}", scene.warnings);
    }

    #[test]
    fn test_obstacles_stable_across_sessions() {
        let config = small_config();
        let a = build(&snapshot(2), &config, 1);
        let b = build(&snapshot(2), &config, 2);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.flowers, b.flowers);
        assert_ne!(a.grass, b.grass, "grass is session-random");
    }

    #[test]
    fn test_grass_clears_patches_and_props() {
        let config = small_config();
        let scene = build(&snapshot(9), &config, 3);
        let zones = scene.exclusion_zones();
        for blade in &scene.grass {
            for z in &zones {
                let d = blade.position.distance(z.position);
                assert!(d >= z.required_clearance(config.field.safety_margin) - 1e-4);
            }
        }
    }

    #[test]
    fn test_over_capacity_warns_and_truncates() {
        let scene = build(&snapshot(11), &small_config(), 4);
        assert_eq!(scene.goals.len(), 9);
        assert!(scene.warnings.contains(&SceneWarning::CapacityExceeded {
            dropped: 2,
            capacity: 9
        }));
    }

    #[test]
    fn test_malformed_habit_warns() {
        let mut snap = snapshot(1);
        snap.goals[0].habits[2].streak = None;
        let scene = build(&snap, &small_config(), 5);
        assert!(scene.warnings.contains(&SceneWarning::MalformedHabit {
            habit_id: "g0h2".to_string()
        }));
        let flower = scene
            .flowers
            .iter()
            .find(|f| f.habit_id == "g0h2")
            .expect("malformed habit still gets a flower");
        assert_eq!(flower.stage, 1);
    }

    #[test]
    fn test_missing_asset_warns() {
        let mut catalog = AssetCatalog::default();
        catalog.obstacles.remove(&ObstacleKind::Rock);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let scene = build_scene(&snapshot(1), &small_config(), &catalog, &mut rng);
        assert!(scene.warnings.contains(&SceneWarning::MissingAsset {
            key: "obstacle:rocks".to_string()
        }));
    }

    #[test]
    fn test_empty_snapshot_still_has_scenery() {
        let scene = build(&GardenSnapshot::default(), &small_config(), 7);
        assert!(scene.patches.is_empty());
        assert!(scene.flowers.is_empty());
        assert!(!scene.obstacles.is_empty());
        assert!(!scene.grass.is_empty());
    }

    #[test]
    fn test_flowers_inside_their_patch() {
        let config = small_config();
        let scene = build(&snapshot(9), &config, 8);
        for flower in &scene.flowers {
            let patch = &scene.patches[flower.goal_index];
            let offset = flower.world_position - patch.position;
            let planar = Vec2::new(offset.x, offset.z).length();
            assert!(planar <= patch.radius * config.flower_margin + 1e-4);
        }
    }
}
