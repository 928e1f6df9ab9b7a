//! Habit garden scene engine.
//!
//! Turns a snapshot of goals and habits into a placed 3D scene: one soil
//! patch per goal on a square grid, one flower per habit grown from its
//! streak, and a ring of trees, rocks, and grass around them. Nothing here
//! draws; the rendering crate turns `GardenScene` into entities.

use bevy::prelude::*;

pub mod assets;
pub mod config;
pub mod growth;
pub mod hover;
pub mod layout;
pub mod orbit;
pub mod phyllotaxis;
pub mod rng;
pub mod scatter;
pub mod scene;
pub mod snapshot;
pub mod warnings;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use assets::AssetCatalog;
use config::{CameraConfig, GardenConfig};
use hover::{HoverChanged, HoverState};
use rng::GardenRng;
use scene::{build_scene, GardenScene};
use snapshot::{GardenFeed, GardenSnapshot, ReloadGarden};

pub struct GardenPlugin;

impl Plugin for GardenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GardenConfig>()
            .init_resource::<CameraConfig>()
            .init_resource::<AssetCatalog>()
            .init_resource::<GardenRng>()
            .init_resource::<GardenSnapshot>()
            .init_resource::<GardenScene>()
            .init_resource::<HoverState>()
            .add_event::<ReloadGarden>()
            .add_event::<HoverChanged>()
            .add_systems(Startup, load_initial_snapshot)
            .add_systems(
                Update,
                (reload_snapshot, rebuild_garden_scene, track_hover).chain(),
            );
    }
}

fn load_initial_snapshot(feed: Option<Res<GardenFeed>>, mut snapshot: ResMut<GardenSnapshot>) {
    let Some(feed) = feed else {
        return;
    };
    *snapshot = feed.load();
    info!(
        "Loaded {} goal(s) with {} habit(s) for '{}'",
        snapshot.goals.len(),
        snapshot.habit_count(),
        feed.user_id
    );
}

fn reload_snapshot(
    mut events: EventReader<ReloadGarden>,
    feed: Option<Res<GardenFeed>>,
    mut snapshot: ResMut<GardenSnapshot>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    let Some(feed) = feed else {
        warn!("Reload requested but no goal feed is configured");
        return;
    };
    // Identical data keeps the current scene (and its grass) untouched.
    if !snapshot.set_if_neq(feed.load()) {
        debug!("Goal feed unchanged for '{}'", feed.user_id);
    }
}

/// Rebuild the scene whenever its inputs change.
pub fn rebuild_garden_scene(
    snapshot: Res<GardenSnapshot>,
    config: Res<GardenConfig>,
    catalog: Res<AssetCatalog>,
    mut rng: ResMut<GardenRng>,
    mut scene: ResMut<GardenScene>,
) {
    if !(snapshot.is_changed() || config.is_changed() || catalog.is_changed()) {
        return;
    }

    let fallback;
    let config = match config.validate() {
        Ok(()) => &*config,
        Err(e) => {
            warn!("Invalid garden config ({}); using defaults", e);
            fallback = GardenConfig::default();
            &fallback
        }
    };

    let generation = scene.generation + 1;
    let mut built = build_scene(&snapshot, config, &catalog, &mut rng.0);
    built.generation = generation;

    for warning in &built.warnings {
        warn!("Garden: {}", warning);
    }
    info!(
        "Garden rebuilt: {} patches, {} flowers, {} obstacles, {} grass blades",
        built.patches.len(),
        built.flowers.len(),
        built.obstacles.len(),
        built.grass.len()
    );
    *scene = built;
}

fn track_hover(mut events: EventReader<HoverChanged>, mut state: ResMut<HoverState>) {
    if let Some(HoverChanged(latest)) = events.read().last() {
        state.set_if_neq(HoverState(latest.clone()));
    }
}
