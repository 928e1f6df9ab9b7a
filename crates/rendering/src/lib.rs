use bevy::prelude::*;

use garden::snapshot::ReloadGarden;

pub mod camera;
pub mod egui_input_guard;
pub mod garden_render;
pub mod hover;

use camera::CameraDrag;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraDrag>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    garden_render::setup_garden_meshes,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::sync_camera_config,
                    camera::camera_drag_input,
                    camera::advance_orbit,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    garden_render::sync_garden_scene.after(garden::rebuild_garden_scene),
                    hover::update_hover
                        .after(garden::rebuild_garden_scene)
                        .after(camera::camera_drag_input),
                    garden_render::highlight_hovered_flower
                        .after(garden_render::sync_garden_scene),
                    reload_on_key,
                ),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.95, 0.95, 1.0),
        brightness: 350.0,
    });

    // Low sun so the props cast readable shading on the ground.
    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}

/// F5 re-fetches goals from the configured feed.
fn reload_on_key(keys: Res<ButtonInput<KeyCode>>, mut events: EventWriter<ReloadGarden>) {
    if keys.just_pressed(KeyCode::F5) {
        events.send(ReloadGarden);
    }
}
