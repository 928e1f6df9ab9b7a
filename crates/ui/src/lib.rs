use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod garden_panel;
pub mod garden_tooltip;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<garden_panel::GardenPanelVisible>()
            .add_systems(Startup, theme::apply_garden_theme)
            .add_systems(
                Update,
                (
                    garden_panel::toggle_garden_panel,
                    garden_panel::garden_panel_ui,
                ),
            )
            .add_plugins(garden_tooltip::GardenTooltipPlugin);
    }
}
