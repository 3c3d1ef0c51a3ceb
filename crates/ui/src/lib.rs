use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use terrain::FrameSet;

pub mod terrain_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<terrain_panel::TerrainPanel>()
            .add_systems(Startup, terrain_panel::init_panel_paths)
            .add_systems(
                Update,
                (
                    terrain_panel::terrain_panel_keybind,
                    terrain_panel::terrain_panel_ui,
                )
                    .chain()
                    .before(FrameSet::Input),
            );
    }
}
