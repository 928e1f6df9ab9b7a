//! Collapsible summary window: whose garden, how much is in it, and any
//! warnings from the last rebuild.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use garden::scene::GardenScene;
use garden::snapshot::{GardenSnapshot, ReloadGarden};

#[derive(Resource)]
pub struct GardenPanelVisible(pub bool);

impl Default for GardenPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// One-line summary shown at the top of the panel.
pub fn summary_line(scene: &GardenScene) -> String {
    let habits = scene.flowers.len();
    match scene.goals.len() {
        0 => "No goals yet".to_string(),
        1 => format!("1 goal, {habits} habit(s)"),
        n => format!("{n} goals, {habits} habit(s)"),
    }
}

pub fn toggle_garden_panel(keys: Res<ButtonInput<KeyCode>>, mut visible: ResMut<GardenPanelVisible>) {
    if keys.just_pressed(KeyCode::Tab) {
        visible.0 = !visible.0;
    }
}

pub fn garden_panel_ui(
    mut contexts: EguiContexts,
    visible: Res<GardenPanelVisible>,
    snapshot: Res<GardenSnapshot>,
    scene: Res<GardenScene>,
    mut reload: EventWriter<ReloadGarden>,
) {
    if !visible.0 {
        return;
    }

    egui::Window::new("Garden")
        .default_pos(egui::pos2(12.0, 12.0))
        .resizable(false)
        .collapsible(true)
        .show(contexts.ctx_mut(), |ui| {
            if !snapshot.user_id.is_empty() {
                ui.label(egui::RichText::new(&snapshot.user_id).strong());
            }
            ui.label(summary_line(&scene));

            if !scene.warnings.is_empty() {
                ui.separator();
                for warning in &scene.warnings {
                    ui.label(
                        egui::RichText::new(warning.to_string())
                            .size(11.0)
                            .color(crate::theme::WARNING),
                    );
                }
            }

            ui.separator();
            if ui.button("Reload (F5)").clicked() {
                reload.send(ReloadGarden);
            }
            ui.label(
                egui::RichText::new("Drag to rotate, Home to reset view, Tab to hide")
                    .size(10.0)
                    .color(egui::Color32::GRAY),
            );
        });
}
