//! Terrain texture and sky panorama loading.
//!
//! Each image lives in a [`TextureSlot`] that moves
//! `Empty → Loading → Ready | Failed`. A failed slot is logged and shown in
//! the overlay; the consumer simply draws without that texture.

use bevy::asset::LoadState;
use bevy::image::{
    ImageAddressMode, ImageFormatSetting, ImageLoaderSettings, ImageSampler,
    ImageSamplerDescriptor,
};
use bevy::prelude::*;

use terrain::TerrainSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Terrain,
    Panorama,
}

impl TextureKind {
    pub fn label(self) -> &'static str {
        match self {
            TextureKind::Terrain => "Terrain texture",
            TextureKind::Panorama => "Panorama",
        }
    }
}

/// Request to (re)load one slot from `path`. An empty path clears the slot.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LoadTexture {
    pub kind: TextureKind,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotState {
    #[default]
    Empty,
    Loading(Handle<Image>),
    Ready(Handle<Image>),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct TextureSlot {
    pub path: String,
    pub state: SlotState,
}

impl TextureSlot {
    pub fn begin_load(&mut self, path: String, handle: Handle<Image>) {
        self.path = path;
        self.state = SlotState::Loading(handle);
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.state = SlotState::Empty;
    }

    /// Only a slot that is still loading can finish.
    pub fn finish(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SlotState::Loading(handle) => {
                self.state = SlotState::Ready(handle);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        if !matches!(self.state, SlotState::Loading(_)) {
            return false;
        }
        self.state = SlotState::Failed(reason.into());
        true
    }

    pub fn loading_handle(&self) -> Option<&Handle<Image>> {
        match &self.state {
            SlotState::Loading(handle) => Some(handle),
            _ => None,
        }
    }

    /// The texture to bind, if any.
    pub fn ready_handle(&self) -> Option<Handle<Image>> {
        match &self.state {
            SlotState::Ready(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn status_line(&self) -> String {
        match &self.state {
            SlotState::Empty => "none".to_string(),
            SlotState::Loading(_) => format!("loading {}", self.path),
            SlotState::Ready(_) => format!("{} loaded", self.path),
            SlotState::Failed(reason) => format!("failed: {reason}"),
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TerrainTextures {
    pub terrain: TextureSlot,
    pub panorama: TextureSlot,
}

impl TerrainTextures {
    pub fn slot(&self, kind: TextureKind) -> &TextureSlot {
        match kind {
            TextureKind::Terrain => &self.terrain,
            TextureKind::Panorama => &self.panorama,
        }
    }

    pub fn slot_mut(&mut self, kind: TextureKind) -> &mut TextureSlot {
        match kind {
            TextureKind::Terrain => &mut self.terrain,
            TextureKind::Panorama => &mut self.panorama,
        }
    }
}

/// Loader settings for every terrain-side image: format chosen from the file
/// contents (HDR decodes to float pixels, PNG/JPEG to 8 bit) and a repeating
/// sampler so UVs above 1 tile the texture.
pub fn configure_loader(settings: &mut ImageLoaderSettings) {
    settings.format = ImageFormatSetting::Guess;
    settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        address_mode_w: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    });
}

/// Startup: queue the images named by the settings.
pub fn request_initial_textures(
    settings: Res<TerrainSettings>,
    mut requests: EventWriter<LoadTexture>,
) {
    requests.send(LoadTexture {
        kind: TextureKind::Terrain,
        path: settings.terrain_texture_path.clone(),
    });
    if let Some(path) = &settings.panorama_path {
        requests.send(LoadTexture {
            kind: TextureKind::Panorama,
            path: path.clone(),
        });
    }
}

pub fn start_texture_loads(
    mut requests: EventReader<LoadTexture>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<TerrainTextures>,
) {
    for request in requests.read() {
        let slot = textures.slot_mut(request.kind);
        let path = request.path.trim();
        if path.is_empty() {
            info!("{} cleared", request.kind.label());
            slot.clear();
            continue;
        }
        let handle: Handle<Image> =
            asset_server.load_with_settings(path.to_string(), configure_loader);
        info!("{} loading from {path}", request.kind.label());
        slot.begin_load(path.to_string(), handle);
    }
}

/// Advance loading slots from the asset server's load state.
pub fn poll_texture_loads(
    asset_server: Res<AssetServer>,
    mut textures: ResMut<TerrainTextures>,
) {
    for kind in [TextureKind::Terrain, TextureKind::Panorama] {
        let Some(id) = textures.slot(kind).loading_handle().map(Handle::id) else {
            continue;
        };
        match asset_server.get_load_state(id) {
            Some(LoadState::Loaded) => {
                let slot = textures.slot_mut(kind);
                slot.finish();
                info!("{} ready: {}", kind.label(), slot.path);
            }
            Some(LoadState::Failed(err)) => {
                let slot = textures.slot_mut(kind);
                warn!("{} failed to load from {}: {err}", kind.label(), slot.path);
                slot.fail(err.to_string());
            }
            _ => {}
        }
    }
}
