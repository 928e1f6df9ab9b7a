//! Cursor ray -> ground point -> `HoverChanged`.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use garden::hover::{pick, HoverChanged, HoverInfo};
use garden::scene::GardenScene;

use crate::camera::CameraDrag;
use crate::egui_input_guard::egui_wants_pointer;

/// Where `ray` crosses the y = 0 ground plane, as (world x, world z).
pub fn ground_hit(ray: Ray3d) -> Option<Vec2> {
    if ray.direction.y.abs() <= 0.001 {
        return None;
    }
    let t = -ray.origin.y / ray.direction.y;
    if t <= 0.0 {
        return None;
    }
    let hit = ray.origin + ray.direction * t;
    Some(Vec2::new(hit.x, hit.z))
}

/// Emit `HoverChanged` when the element under the cursor changes.
///
/// Dragging the camera, egui, and a cursor outside the window all count as
/// hovering nothing.
pub fn update_hover(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    scene: Res<GardenScene>,
    drag: Res<CameraDrag>,
    mut contexts: EguiContexts,
    mut last: Local<Option<HoverInfo>>,
    mut events: EventWriter<HoverChanged>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };

    let current = if drag.dragging || egui_wants_pointer(&mut contexts) {
        None
    } else {
        window
            .cursor_position()
            .and_then(|pos| camera.viewport_to_world(cam_transform, pos).ok())
            .and_then(ground_hit)
            .and_then(|ground| pick(&scene, ground))
    };

    if *last != current {
        *last = current.clone();
        events.send(HoverChanged(current));
    }
}
