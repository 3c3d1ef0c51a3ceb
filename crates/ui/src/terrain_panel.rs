//! "Terrain Controls" window.
//!
//! Edits [`TerrainSettings`], requests texture loads and terrain rebuilds,
//! and shows texture status plus a camera readout. Toggled with F1.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::textures::{LoadTexture, TerrainTextures, TextureKind};
use terrain::config::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use terrain::{CameraController, CameraState, Lifecycle, RegenerateTerrain, TerrainSettings};

pub const MIN_WORLD_SCALE: f32 = 0.01;

const TOGGLE_KEY: KeyCode = KeyCode::F1;

/// Window visibility and the path text fields, which only reach the settings
/// when their Load button is pressed.
#[derive(Resource, Debug, Clone)]
pub struct TerrainPanel {
    pub visible: bool,
    pub terrain_path: String,
    pub panorama_path: String,
}

impl Default for TerrainPanel {
    fn default() -> Self {
        Self {
            visible: true,
            terrain_path: String::new(),
            panorama_path: String::new(),
        }
    }
}

/// Keep overlay edits inside the range the terrain core accepts.
pub fn clamp_edits(settings: &mut TerrainSettings) {
    settings.grid_size = settings.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
    if !settings.world_scale.is_finite() || settings.world_scale < MIN_WORLD_SCALE {
        settings.world_scale = MIN_WORLD_SCALE;
    }
}

pub fn camera_readout(state: &CameraState) -> [String; 3] {
    let p = state.position;
    let lifecycle = match state.lifecycle {
        Lifecycle::Grounded => "grounded",
        Lifecycle::Airborne => "airborne",
    };
    [
        format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
        format!("Yaw {:.1}°  Pitch {:.1}°", state.yaw, state.pitch),
        format!("State: {lifecycle}"),
    ]
}

/// Path field contents → settings value. Blank means "no panorama".
fn optional_path(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn init_panel_paths(settings: Res<TerrainSettings>, mut panel: ResMut<TerrainPanel>) {
    panel.terrain_path = settings.terrain_texture_path.clone();
    panel.panorama_path = settings.panorama_path.clone().unwrap_or_default();
}

pub fn terrain_panel_keybind(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<TerrainPanel>,
    mut contexts: EguiContexts,
) {
    if contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_keyboard_input())
    {
        return;
    }
    if keyboard.just_pressed(TOGGLE_KEY) {
        panel.visible = !panel.visible;
    }
}

pub fn terrain_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<TerrainPanel>,
    mut settings: ResMut<TerrainSettings>,
    textures: Res<TerrainTextures>,
    controller: Res<CameraController>,
    mut loads: EventWriter<LoadTexture>,
    mut regenerate: EventWriter<RegenerateTerrain>,
) {
    if !panel.visible {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    let mut edited = settings.clone();
    let mut open = true;
    let panel = &mut *panel;

    egui::Window::new("Terrain Controls")
        .open(&mut open)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            ui.heading("Textures");
            ui.separator();

            ui.label("Panorama:");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut panel.panorama_path);
                if ui.button("Load").clicked() {
                    edited.panorama_path = optional_path(&panel.panorama_path);
                    loads.send(LoadTexture {
                        kind: TextureKind::Panorama,
                        path: panel.panorama_path.trim().to_string(),
                    });
                }
            });

            ui.label("Terrain texture:");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut panel.terrain_path);
                if ui.button("Load").clicked() {
                    edited.terrain_texture_path = panel.terrain_path.trim().to_string();
                    loads.send(LoadTexture {
                        kind: TextureKind::Terrain,
                        path: edited.terrain_texture_path.clone(),
                    });
                }
            });

            for kind in [TextureKind::Terrain, TextureKind::Panorama] {
                ui.label(
                    egui::RichText::new(format!(
                        "{}: {}",
                        kind.label(),
                        textures.slot(kind).status_line()
                    ))
                    .small()
                    .color(egui::Color32::from_gray(160)),
                );
            }

            ui.add_space(8.0);
            ui.heading("Terrain");
            ui.separator();

            egui::Grid::new("terrain_params")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Grid size");
                    ui.add(
                        egui::DragValue::new(&mut edited.grid_size)
                            .range(MIN_GRID_SIZE..=MAX_GRID_SIZE)
                            .speed(1.0),
                    );
                    ui.end_row();

                    ui.label("World scale");
                    ui.add(
                        egui::DragValue::new(&mut edited.world_scale)
                            .range(MIN_WORLD_SCALE..=f32::MAX)
                            .speed(0.01),
                    );
                    ui.end_row();

                    ui.label("Height scale");
                    ui.add(egui::DragValue::new(&mut edited.height_scale).speed(0.1));
                    ui.end_row();

                    ui.label("Texture tile");
                    ui.add(egui::DragValue::new(&mut edited.texture_tile).speed(0.1));
                    ui.end_row();

                    ui.label("Noise frequency");
                    ui.add(
                        egui::DragValue::new(&mut edited.noise_frequency)
                            .speed(0.001)
                            .max_decimals(4),
                    );
                    ui.end_row();
                });

            if ui.button("Regenerate Terrain").clicked() {
                regenerate.send(RegenerateTerrain);
            }

            ui.add_space(8.0);
            ui.heading("Camera");
            ui.separator();
            for line in camera_readout(&controller.state) {
                ui.label(line);
            }
            ui.label(
                egui::RichText::new("Tab: toggle mouse capture  F1: hide panel")
                    .small()
                    .color(egui::Color32::from_gray(140)),
            );
        });

    clamp_edits(&mut edited);
    if edited != *settings {
        *settings = edited;
    }
    if !open {
        panel.visible = false;
    }
}
