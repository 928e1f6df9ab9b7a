//! Tooltip for the hovered patch or flower.
//!
//! Reads `HoverState`, which the rendering crate keeps current through
//! `HoverChanged`. The tooltip waits a short delay on the same target and
//! hides while the camera is being dragged.

use bevy::prelude::*;

use bevy_egui::{egui, EguiContexts};

use garden::hover::{HoverInfo, HoverState};
use rendering::camera::CameraDrag;

/// Seconds the cursor must rest on the same target before the tooltip shows.
const HOVER_DELAY: f32 = 0.25;

/// Pixel offset from the cursor to the tooltip.
const TOOLTIP_OFFSET: f32 = 18.0;

#[derive(Resource, Default)]
pub struct TooltipTimer {
    pub elapsed: f32,
}

pub struct GardenTooltipPlugin;

impl Plugin for GardenTooltipPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TooltipTimer>()
            .add_systems(Update, garden_tooltip_ui);
    }
}

pub fn stage_label(stage: u8) -> &'static str {
    match stage {
        0 | 1 => "Seedling",
        2 => "Sprout",
        3 => "Bud",
        4 => "Bloom",
        _ => "Full bloom",
    }
}

pub fn streak_label(streak: u32) -> String {
    match streak {
        1 => "1 day".to_string(),
        n => format!("{n} days"),
    }
}

/// Title plus (label, value) rows for a hover target.
pub fn tooltip_rows(info: &HoverInfo) -> (String, Vec<(&'static str, String)>) {
    match info {
        HoverInfo::Patch {
            goal_name,
            habit_count,
            ..
        } => (
            goal_name.clone(),
            vec![("Habits:", habit_count.to_string())],
        ),
        HoverInfo::Habit {
            habit_name,
            goal_name,
            stage,
            streak,
            ..
        } => (
            habit_name.clone(),
            vec![
                ("Goal:", goal_name.clone()),
                ("Streak:", streak_label(*streak)),
                ("Stage:", format!("{} ({stage}/5)", stage_label(*stage))),
            ],
        ),
    }
}

fn garden_tooltip_ui(
    mut contexts: EguiContexts,
    hover: Res<HoverState>,
    drag: Res<CameraDrag>,
    time: Res<Time>,
    mut timer: ResMut<TooltipTimer>,
) {
    if hover.is_changed() {
        timer.elapsed = 0.0;
    }
    let Some(info) = hover.0.as_ref() else {
        return;
    };
    if drag.dragging {
        return;
    }

    timer.elapsed += time.delta_secs();
    if timer.elapsed < HOVER_DELAY {
        return;
    }

    let ctx = contexts.ctx_mut();
    let Some(pointer_pos) = ctx.pointer_hover_pos() else {
        return;
    };
    let label_pos = pointer_pos + egui::vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET);
    let (title, rows) = tooltip_rows(info);

    egui::Area::new(egui::Id::new("garden_hover_tooltip"))
        .fixed_pos(label_pos)
        .interactable(false)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(crate::theme::TOOLTIP_FILL)
                .show(ui, |ui| {
                    ui.set_max_width(220.0);
                    ui.label(
                        egui::RichText::new(title)
                            .strong()
                            .size(13.0)
                            .color(egui::Color32::WHITE),
                    );
                    ui.separator();
                    for (label, value) in rows {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(label)
                                    .size(11.0)
                                    .color(egui::Color32::LIGHT_GRAY),
                            );
                            ui.label(
                                egui::RichText::new(value)
                                    .size(11.0)
                                    .color(egui::Color32::WHITE),
                            );
                        });
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_labels() {
        assert_eq!(stage_label(1), "Seedling");
        assert_eq!(stage_label(3), "Bud");
        assert_eq!(stage_label(5), "Full bloom");
    }

    #[test]
    fn test_streak_label_pluralizes() {
        assert_eq!(streak_label(0), "0 days");
        assert_eq!(streak_label(1), "1 day");
        assert_eq!(streak_label(12), "12 days");
    }

    #[test]
    fn test_habit_rows() {
        let info = HoverInfo::Habit {
            habit_id: "h".into(),
            habit_name: "Read".into(),
            goal_id: "g".into(),
            goal_name: "Learning".into(),
            stage: 4,
            streak: 20,
        };
        let (title, rows) = tooltip_rows(&info);
        assert_eq!(title, "Read");
        assert_eq!(rows[0], ("Goal:", "Learning".to_string()));
        assert_eq!(rows[1], ("Streak:", "20 days".to_string()));
        assert_eq!(rows[2], ("Stage:", "Bloom (4/5)".to_string()));
    }

    #[test]
    fn test_patch_rows() {
        let info = HoverInfo::Patch {
            goal_id: "g".into(),
            goal_name: "Health".into(),
            habit_count: 3,
        };
        let (title, rows) = tooltip_rows(&info);
        assert_eq!(title, "Health");
        assert_eq!(rows, vec![("Habits:", "3".to_string())]);
    }
}
