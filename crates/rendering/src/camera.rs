//! Orbit camera: pointer input feeds `OrbitCameraRig`, the rig advances once
//! per frame, and the result is written to the `Camera3d` transform.
//!
//! The three systems are chained so the rig has exactly one writer per frame.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use garden::config::CameraConfig;
use garden::orbit::OrbitController;

use crate::egui_input_guard::egui_wants_pointer;

/// Owns the orbit state; nothing else mutates the camera angle.
#[derive(Resource, Default)]
pub struct OrbitCameraRig(pub OrbitController);

/// Left-button drag tracking in window pixels.
#[derive(Resource, Default)]
pub struct CameraDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands, config: Res<CameraConfig>) {
    let rig = OrbitCameraRig(OrbitController::new(config.clone()));
    commands.spawn((Camera3d::default(), rig.0.transform()));
    commands.insert_resource(rig);
}

/// Rebuild the rig when the camera tuning is replaced.
pub fn sync_camera_config(config: Res<CameraConfig>, mut rig: ResMut<OrbitCameraRig>) {
    if config.is_changed() && !config.is_added() {
        rig.0 = OrbitController::new(config.clone());
    }
}

/// Left-mouse drag rotates the garden; Home snaps back to the start pose.
pub fn camera_drag_input(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut drag: ResMut<CameraDrag>,
    mut rig: ResMut<OrbitCameraRig>,
) {
    if keys.just_pressed(KeyCode::Home) {
        rig.0.reset();
        drag.dragging = false;
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
            rig.0.drag_start();
        }
    }

    if !drag.dragging {
        return;
    }

    if buttons.just_released(MouseButton::Left) || !buttons.pressed(MouseButton::Left) {
        drag.dragging = false;
        rig.0.drag_end();
        return;
    }

    // Pointer left the window mid-drag: end it like a release.
    let Some(pos) = window.cursor_position() else {
        drag.dragging = false;
        rig.0.drag_end();
        return;
    };
    let dx = pos.x - drag.last_pos.x;
    if dx != 0.0 {
        rig.0.drag_move(dx);
    }
    drag.last_pos = pos;
}

pub fn advance_orbit(time: Res<Time>, mut rig: ResMut<OrbitCameraRig>) {
    rig.0.advance(time.delta_secs());
}

/// Apply the rig to the camera transform.
pub fn apply_orbit_camera(
    rig: Res<OrbitCameraRig>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !rig.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = rig.0.transform();
}
