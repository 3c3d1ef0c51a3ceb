use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, WindowMode};
use bevy::winit::WinitSettings;
use clap::Parser;

use terrain::{SettingsError, TerrainSettings};

#[derive(Parser, Debug)]
#[command(name = "terrain-walker")]
#[command(author, version, about = "Walk a procedurally generated terrain", long_about = None)]
struct LaunchOptions {
    /// Start in borderless fullscreen on the primary monitor
    #[arg(long)]
    fullscreen: bool,

    /// Present frames without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,

    /// JSON file with terrain settings; invalid files fall back to defaults
    #[arg(long, value_name = "FILE", env = "TERRAIN_SETTINGS")]
    settings: Option<PathBuf>,
}

impl LaunchOptions {
    fn present_mode(&self) -> PresentMode {
        if self.no_vsync {
            PresentMode::AutoNoVsync
        } else {
            PresentMode::AutoVsync
        }
    }

    fn window_mode(&self) -> WindowMode {
        if self.fullscreen {
            WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
        } else {
            WindowMode::Windowed
        }
    }
}

/// How the startup settings were obtained; logged once the app is running.
#[derive(Resource, Debug)]
struct LaunchReport {
    source: Option<PathBuf>,
    error: Option<SettingsError>,
}

fn load_settings(path: Option<&PathBuf>) -> (TerrainSettings, Option<SettingsError>) {
    let Some(path) = path else {
        return (TerrainSettings::default(), None);
    };
    match TerrainSettings::from_json_file(path) {
        Ok(settings) => (settings, None),
        Err(e) => (TerrainSettings::default(), Some(e)),
    }
}

fn report_launch(report: Res<LaunchReport>, settings: Res<TerrainSettings>) {
    match (&report.source, &report.error) {
        (Some(path), Some(e)) => {
            warn!("Could not load settings from {}: {e}; using defaults", path.display());
        }
        (Some(path), None) => info!("Loaded settings from {}", path.display()),
        (None, _) => info!("Using default terrain settings"),
    }
    info!(
        "Terrain: {}x{} grid, scale {}, height {}",
        settings.grid_size, settings.grid_size, settings.world_scale, settings.height_scale
    );
}

fn main() {
    let options = LaunchOptions::parse();
    let (settings, error) = load_settings(options.settings.as_ref());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Procedural Terrain".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: options.present_mode(),
            mode: options.window_mode(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings::game())
    .insert_resource(settings)
    .insert_resource(LaunchReport {
        source: options.settings,
        error,
    })
    .add_plugins((
        terrain::TerrainPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ))
    .add_systems(
        Startup,
        report_launch.before(terrain::regeneration::init_terrain),
    );

    app.run();
}
