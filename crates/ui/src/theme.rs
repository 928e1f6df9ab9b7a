//! Moss-and-bark egui styling shared by the panel and tooltip.

use bevy_egui::{egui, EguiContexts};

pub const PANEL: egui::Color32 = egui::Color32::from_rgb(30, 38, 32);
pub const WIDGET: egui::Color32 = egui::Color32::from_rgb(45, 58, 48);
pub const WIDGET_HOVER: egui::Color32 = egui::Color32::from_rgb(62, 84, 66);
pub const LEAF: egui::Color32 = egui::Color32::from_rgb(120, 190, 110);
pub const WARNING: egui::Color32 = egui::Color32::from_rgb(230, 180, 80);
pub const TOOLTIP_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(28, 36, 28, 225);

/// Widget styling for the garden overlay, applied once on startup.
pub fn garden_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();

    for (widget, fill) in [
        (&mut visuals.widgets.noninteractive, PANEL),
        (&mut visuals.widgets.inactive, WIDGET),
        (&mut visuals.widgets.hovered, WIDGET_HOVER),
        (&mut visuals.widgets.active, LEAF),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.corner_radius = egui::CornerRadius::same(6);
    }

    visuals.window_fill = PANEL;
    visuals.panel_fill = PANEL;
    visuals.extreme_bg_color = egui::Color32::from_rgb(24, 30, 26);
    visuals.window_corner_radius = egui::CornerRadius::same(8);
    visuals.selection.bg_fill = LEAF;
    visuals.selection.stroke = egui::Stroke::new(1.0, LEAF);
    visuals
}

pub fn apply_garden_theme(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(garden_visuals());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_use_palette() {
        let visuals = garden_visuals();
        assert_eq!(visuals.window_fill, PANEL);
        assert_eq!(visuals.widgets.active.bg_fill, LEAF);
        assert_eq!(visuals.widgets.hovered.weak_bg_fill, WIDGET_HOVER);
        assert!(visuals.dark_mode);
    }
}
