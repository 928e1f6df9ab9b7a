use bevy::prelude::*;
use bevy::window::PresentMode;

use garden::config::GardenConfig;
use garden::rng::GardenRng;
use garden::snapshot::{FileFeed, GardenFeed, StaticFeed};

mod settings;

use settings::Settings;

/// Goals shown when no feed directory is configured.
const DEMO_GOALS: &str = include_str!("../assets/demo_goals.json");

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Habit Garden".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.70, 0.84, 0.95)))
    .add_plugins((
        garden::GardenPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    // LogPlugin is live from here on.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}; using default settings", e);
            Settings {
                user_id: settings::DEFAULT_USER.to_string(),
                ..Settings::default()
            }
        }
    };

    let config = settings.load_config().unwrap_or_else(|e| {
        warn!("{}; using default garden config", e);
        GardenConfig::default()
    });
    app.insert_resource(config);

    let seed = settings.seed.unwrap_or_else(rand::random);
    info!("Session seed {}", seed);
    app.insert_resource(GardenRng::from_seed_u64(seed));

    app.insert_resource(feed_for(&settings));

    app.run();
}

fn feed_for(settings: &Settings) -> GardenFeed {
    if let Some(dir) = &settings.feed_dir {
        info!("Reading goals for '{}' from {}", settings.user_id, dir.display());
        return GardenFeed::new(&settings.user_id, FileFeed::new(dir));
    }
    match StaticFeed::from_json(DEMO_GOALS) {
        Ok(feed) => GardenFeed::new(&settings.user_id, feed),
        Err(e) => {
            warn!("Demo goals failed to parse: {}", e);
            GardenFeed::new(&settings.user_id, StaticFeed::default())
        }
    }
}
