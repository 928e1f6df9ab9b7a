//! # TestGarden: headless harness around `GardenPlugin`
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` so scene rebuilds, feed
//! reloads, and hover tracking can be driven without a window.

use bevy::app::App;
use bevy::prelude::*;

use crate::config::GardenConfig;
use crate::hover::{HoverChanged, HoverInfo, HoverState};
use crate::rng::GardenRng;
use crate::scene::GardenScene;
use crate::snapshot::{GardenFeed, GardenSnapshot, Goal, GoalFeed, ReloadGarden};
use crate::GardenPlugin;

pub struct TestGarden {
    app: App,
}

impl Default for TestGarden {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGarden {
    /// An empty garden with a pinned session seed. Startup has already run.
    pub fn new() -> Self {
        Self::build(|_| {})
    }

    /// A garden whose startup snapshot comes from `feed`.
    pub fn with_feed(user_id: &str, feed: impl GoalFeed + Send + Sync + 'static) -> Self {
        let feed = GardenFeed::new(user_id, feed);
        Self::build(move |app| {
            app.insert_resource(feed);
        })
    }

    fn build(setup: impl FnOnce(&mut App)) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(GardenPlugin);
        app.insert_resource(GardenRng::from_seed_u64(1234));
        setup(&mut app);
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    pub fn with_goals(mut self, goals: Vec<Goal>) -> Self {
        self.set_goals(goals);
        self
    }

    /// Replace the snapshot and run one frame.
    pub fn set_goals(&mut self, goals: Vec<Goal>) {
        self.app
            .insert_resource(GardenSnapshot::new("test-user", goals));
        self.tick();
    }

    pub fn set_config(&mut self, config: GardenConfig) {
        self.app.insert_resource(config);
        self.tick();
    }

    pub fn request_reload(&mut self) {
        self.app.world_mut().send_event(ReloadGarden);
        self.tick();
    }

    pub fn hover(&mut self, info: Option<HoverInfo>) {
        self.app.world_mut().send_event(HoverChanged(info));
        self.tick();
    }

    pub fn tick(&mut self) {
        self.app.update();
    }

    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn scene(&self) -> &GardenScene {
        self.resource::<GardenScene>()
    }

    pub fn snapshot(&self) -> &GardenSnapshot {
        self.resource::<GardenSnapshot>()
    }

    pub fn hovered(&self) -> Option<&HoverInfo> {
        self.resource::<HoverState>().0.as_ref()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
