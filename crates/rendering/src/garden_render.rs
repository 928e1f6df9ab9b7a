//! Garden scene -> entities.
//!
//! Every asset id from `AssetCatalog` maps to a primitive mesh and material
//! built once at startup. Ids nothing knows about render as a magenta
//! placeholder cube so a bad catalog is visible instead of silent.
//!
//! The whole garden is respawned when `GardenScene` changes; between rebuilds
//! only the hover highlight touches it.

use std::collections::HashMap;

use bevy::prelude::*;

use garden::assets::AssetCatalog;
use garden::config::{GardenConfig, FLOWER_RENDER_SIZE};
use garden::growth::{MAX_STAGE, MIN_STAGE};
use garden::hover::{HoverInfo, HoverState};
use garden::scatter::{Obstacle, ObstacleKind};
use garden::scene::GardenScene;

// =============================================================================
// Constants
// =============================================================================

/// Extra scale applied to the hovered flower.
const HOVER_GROW: f32 = 1.25;

/// Ground disk reaches this far past the grass.
const GROUND_MARGIN: f32 = 10.0;

const SOIL_COLOR: Color = Color::srgb(0.42, 0.30, 0.20);
const GROUND_COLOR: Color = Color::srgb(0.36, 0.55, 0.28);
const GRASS_COLOR: Color = Color::srgb(0.30, 0.62, 0.25);
const TREE_COLOR: Color = Color::srgb(0.18, 0.45, 0.22);
const ROCK_COLOR: Color = Color::srgb(0.55, 0.55, 0.52);
const POND_COLOR: Color = Color::srgb(0.25, 0.50, 0.75);
const PLACEHOLDER_COLOR: Color = Color::srgb(1.0, 0.0, 1.0);

/// Flower head colour per growth stage, seedling to full bloom.
const STAGE_COLORS: [Color; 5] = [
    Color::srgb(0.55, 0.75, 0.35),
    Color::srgb(0.70, 0.85, 0.40),
    Color::srgb(0.95, 0.80, 0.35),
    Color::srgb(0.95, 0.55, 0.45),
    Color::srgb(0.90, 0.35, 0.60),
];

// =============================================================================
// Components
// =============================================================================

/// Marker on everything spawned from a `GardenScene`.
#[derive(Component)]
pub struct GardenEntity;

#[derive(Component)]
pub struct GoalPatch {
    pub goal_index: usize,
}

#[derive(Component)]
pub struct HabitFlower {
    pub habit_id: String,
    pub base_scale: f32,
}

#[derive(Component)]
pub struct GardenProp(pub ObstacleKind);

#[derive(Component)]
pub struct GrassBlade;

// =============================================================================
// Asset id -> primitive
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveShape {
    Flower(u8),
    Tree,
    Rock,
    Soil,
    Pond,
    Placeholder,
}

/// Which primitive draws asset `id`.
pub fn shape_for_asset(id: &str) -> PrimitiveShape {
    match id {
        "flower_seedling" => PrimitiveShape::Flower(1),
        "flower_sprout" => PrimitiveShape::Flower(2),
        "flower_bud" => PrimitiveShape::Flower(3),
        "flower_bloom" => PrimitiveShape::Flower(4),
        "flower_full_bloom" => PrimitiveShape::Flower(5),
        "tree" => PrimitiveShape::Tree,
        "rock" => PrimitiveShape::Rock,
        "patch_soil" => PrimitiveShape::Soil,
        "pond" => PrimitiveShape::Pond,
        _ => PrimitiveShape::Placeholder,
    }
}

pub fn stage_color(stage: u8) -> Color {
    let i = stage.clamp(MIN_STAGE, MAX_STAGE) - MIN_STAGE;
    STAGE_COLORS[i as usize]
}

#[derive(Clone)]
pub struct MeshPair {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Meshes and materials shared by every garden entity.
#[derive(Resource)]
pub struct GardenMeshes {
    shapes: HashMap<PrimitiveShape, MeshPair>,
    placeholder: MeshPair,
    pub grass: MeshPair,
    pub ground: MeshPair,
}

impl GardenMeshes {
    pub fn get(&self, shape: PrimitiveShape) -> MeshPair {
        self.shapes
            .get(&shape)
            .unwrap_or(&self.placeholder)
            .clone()
    }

    pub fn for_asset(&self, id: &str) -> MeshPair {
        self.get(shape_for_asset(id))
    }
}

pub fn setup_garden_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut pair = |mesh: Mesh, color: Color| MeshPair {
        mesh: meshes.add(mesh),
        material: materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.9,
            ..default()
        }),
    };

    let mut shapes = HashMap::new();
    for stage in MIN_STAGE..=MAX_STAGE {
        shapes.insert(
            PrimitiveShape::Flower(stage),
            // Unit diameter; scaled by FLOWER_RENDER_SIZE * growth at spawn.
            pair(Mesh::from(Sphere::new(0.5)), stage_color(stage)),
        );
    }
    shapes.insert(
        PrimitiveShape::Tree,
        pair(Mesh::from(Cone { radius: 1.0, height: 3.0 }), TREE_COLOR),
    );
    shapes.insert(
        PrimitiveShape::Rock,
        pair(Mesh::from(Sphere::new(1.0)), ROCK_COLOR),
    );
    shapes.insert(
        PrimitiveShape::Soil,
        pair(Mesh::from(Cylinder::new(1.0, 0.1)), SOIL_COLOR),
    );
    shapes.insert(
        PrimitiveShape::Pond,
        pair(Mesh::from(Cylinder::new(1.0, 0.05)), POND_COLOR),
    );
    let placeholder = pair(Mesh::from(Cuboid::new(1.0, 1.0, 1.0)), PLACEHOLDER_COLOR);
    let grass = pair(Mesh::from(Cuboid::new(0.06, 1.0, 0.06)), GRASS_COLOR);
    let ground = pair(Mesh::from(Cylinder::new(1.0, 0.02)), GROUND_COLOR);

    commands.insert_resource(GardenMeshes {
        shapes,
        placeholder,
        grass,
        ground,
    });
}

// =============================================================================
// Transforms
// =============================================================================

/// Transform for a placed obstacle of the given primitive.
pub fn obstacle_transform(obstacle: &Obstacle, shape: PrimitiveShape) -> Transform {
    let r = obstacle.base_radius * obstacle.scale;
    let base = Transform::from_translation(obstacle.world_position())
        .with_rotation(Quat::from_rotation_y(obstacle.heading));
    match shape {
        PrimitiveShape::Tree => base
            .with_translation(obstacle.world_position() + Vec3::Y * 1.5 * r)
            .with_scale(Vec3::splat(r)),
        PrimitiveShape::Rock => base.with_scale(Vec3::new(r, r * 0.6, r)),
        PrimitiveShape::Soil | PrimitiveShape::Pond => base.with_scale(Vec3::new(r, 1.0, r)),
        PrimitiveShape::Flower(_) | PrimitiveShape::Placeholder => {
            base.with_translation(obstacle.world_position() + Vec3::Y * 0.5 * r)
                .with_scale(Vec3::splat(r))
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Despawn and respawn the garden whenever the scene is rebuilt.
pub fn sync_garden_scene(
    mut commands: Commands,
    scene: Res<GardenScene>,
    config: Res<GardenConfig>,
    catalog: Res<AssetCatalog>,
    meshes: Option<Res<GardenMeshes>>,
    existing: Query<Entity, With<GardenEntity>>,
) {
    let Some(meshes) = meshes else {
        return;
    };
    if !scene.is_changed() && !meshes.is_added() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let ground_radius = config.field.radius + GROUND_MARGIN;
    commands.spawn((
        GardenEntity,
        Mesh3d(meshes.ground.mesh.clone()),
        MeshMaterial3d(meshes.ground.material.clone()),
        Transform::from_xyz(0.0, -0.02, 0.0).with_scale(Vec3::new(ground_radius, 1.0, ground_radius)),
    ));

    let soil = meshes.for_asset(catalog.resolve_obstacle(ObstacleKind::Patch));
    for patch in &scene.patches {
        commands.spawn((
            GardenEntity,
            GoalPatch {
                goal_index: patch.goal_index,
            },
            Mesh3d(soil.mesh.clone()),
            MeshMaterial3d(soil.material.clone()),
            Transform::from_translation(patch.position + Vec3::Y * 0.05)
                .with_scale(Vec3::new(patch.radius, 1.0, patch.radius)),
        ));
    }

    for flower in &scene.flowers {
        let pair = meshes.for_asset(catalog.resolve_stage(flower.stage));
        let base_scale = flower.scale * FLOWER_RENDER_SIZE;
        commands.spawn((
            GardenEntity,
            HabitFlower {
                habit_id: flower.habit_id.clone(),
                base_scale,
            },
            Mesh3d(pair.mesh),
            MeshMaterial3d(pair.material),
            Transform::from_translation(flower.world_position + Vec3::Y * 0.5 * base_scale)
                .with_rotation(Quat::from_rotation_y(flower.heading))
                .with_scale(Vec3::splat(base_scale)),
        ));
    }

    for obstacle in &scene.obstacles {
        let id = catalog.resolve_obstacle(obstacle.kind);
        let shape = shape_for_asset(id);
        let pair = meshes.get(shape);
        commands.spawn((
            GardenEntity,
            GardenProp(obstacle.kind),
            Mesh3d(pair.mesh),
            MeshMaterial3d(pair.material),
            obstacle_transform(obstacle, shape),
        ));
    }

    for blade in &scene.grass {
        commands.spawn((
            GardenEntity,
            GrassBlade,
            Mesh3d(meshes.grass.mesh.clone()),
            MeshMaterial3d(meshes.grass.material.clone()),
            Transform::from_translation(blade.world_position() + Vec3::Y * 0.5 * blade.height)
                .with_rotation(Quat::from_rotation_y(blade.heading))
                .with_scale(Vec3::new(1.0, blade.height, 1.0)),
        ));
    }

    debug!(
        "Spawned garden generation {} ({} grass blades)",
        scene.generation,
        scene.grass.len()
    );
}

/// Grow the hovered flower a little. Respawned flowers pick the highlight
/// back up after a rebuild.
pub fn highlight_hovered_flower(
    hover: Res<HoverState>,
    scene: Res<GardenScene>,
    respawned: Query<(), Added<HabitFlower>>,
    mut flowers: Query<(&HabitFlower, &mut Transform)>,
) {
    if !hover.is_changed() && !scene.is_changed() && respawned.is_empty() {
        return;
    }
    let hovered = match &hover.0 {
        Some(HoverInfo::Habit { habit_id, .. }) => Some(habit_id.as_str()),
        _ => None,
    };
    for (flower, mut transform) in &mut flowers {
        let grow = if hovered == Some(flower.habit_id.as_str()) {
            HOVER_GROW
        } else {
            1.0
        };
        transform.scale = Vec3::splat(flower.base_scale * grow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_ids_have_primitives() {
        let catalog = AssetCatalog::default();
        for stage in MIN_STAGE..=MAX_STAGE {
            assert_eq!(
                shape_for_asset(catalog.resolve_stage(stage)),
                PrimitiveShape::Flower(stage)
            );
        }
        for kind in [
            ObstacleKind::Tree,
            ObstacleKind::Rock,
            ObstacleKind::Patch,
            ObstacleKind::SpecialArea,
        ] {
            assert_ne!(
                shape_for_asset(catalog.resolve_obstacle(kind)),
                PrimitiveShape::Placeholder,
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_unknown_asset_is_placeholder() {
        assert_eq!(shape_for_asset("placeholder"), PrimitiveShape::Placeholder);
        assert_eq!(shape_for_asset("dragon"), PrimitiveShape::Placeholder);
    }

    #[test]
    fn test_stage_color_clamps() {
        assert_eq!(stage_color(0), stage_color(1));
        assert_eq!(stage_color(9), stage_color(5));
        assert_ne!(stage_color(1), stage_color(5));
    }

    #[test]
    fn test_tree_sits_on_ground() {
        let tree = Obstacle {
            kind: ObstacleKind::Tree,
            position: Vec2::new(3.0, -4.0),
            base_radius: 1.0,
            scale: 2.0,
            heading: 0.5,
        };
        let t = obstacle_transform(&tree, PrimitiveShape::Tree);
        // Cone of height 3 centred at its midpoint: base lands on y = 0.
        assert!((t.translation.y - 1.5 * t.scale.y).abs() < 1e-5);
        assert_eq!(t.translation.x, 3.0);
        assert_eq!(t.translation.z, -4.0);
    }

    fn highlight_app(hovered: &str) -> App {
        let mut app = App::new();
        app.insert_resource(GardenScene::default())
            .insert_resource(HoverState(Some(HoverInfo::Habit {
                habit_id: hovered.into(),
                habit_name: "Run".into(),
                goal_id: "fit".into(),
                goal_name: "Fitness".into(),
                stage: 2,
                streak: 4,
            })))
            .add_systems(Update, highlight_hovered_flower);
        app
    }

    fn spawn_flower(app: &mut App, habit_id: &str) -> Entity {
        app.world_mut()
            .spawn((
                HabitFlower {
                    habit_id: habit_id.into(),
                    base_scale: 2.0,
                },
                Transform::default(),
            ))
            .id()
    }

    fn scale_of(app: &App, entity: Entity) -> f32 {
        app.world()
            .get::<Transform>(entity)
            .expect("flower transform")
            .scale
            .x
    }

    #[test]
    fn test_hovered_flower_is_highlighted() {
        let mut app = highlight_app("run");
        let run = spawn_flower(&mut app, "run");
        let other = spawn_flower(&mut app, "read");
        app.update();
        assert!((scale_of(&app, run) - 2.0 * HOVER_GROW).abs() < 1e-6);
        assert!((scale_of(&app, other) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_highlight_survives_respawn() {
        let mut app = highlight_app("run");
        let first = spawn_flower(&mut app, "run");
        app.update();
        app.update();

        // Rebuild: old flower gone, fresh one spawned, hover untouched.
        app.world_mut().despawn(first);
        let respawned = spawn_flower(&mut app, "run");
        app.update();
        assert!((scale_of(&app, respawned) - 2.0 * HOVER_GROW).abs() < 1e-6);
    }
}
