use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use terrain::{PublishedTerrain, TerrainMesh};

use crate::textures::TerrainTextures;

/// Marker for the single terrain entity.
#[derive(Component)]
pub struct TerrainSurface {
    /// Generation of the mesh currently uploaded.
    pub generation: u64,
}

/// Convert the CPU mesh into an engine mesh (positions, normals, UVs and
/// `u32` indices).
pub fn to_render_mesh(mesh: &TerrainMesh) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, mesh.positions())
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, mesh.normals())
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, mesh.uvs())
    .with_inserted_indices(Indices::U32(mesh.indices.clone()))
}

pub fn spawn_terrain_surface(
    mut commands: Commands,
    published: Res<PublishedTerrain>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(to_render_mesh(published.mesh()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.95,
            reflectance: 0.1,
            ..default()
        })),
        Transform::IDENTITY,
        TerrainSurface {
            generation: published.generation(),
        },
    ));
}

/// Re-upload the mesh when a new generation has been published.
pub fn sync_terrain_mesh(
    published: Res<PublishedTerrain>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surfaces: Query<(&Mesh3d, &mut TerrainSurface)>,
) {
    let Ok((mesh3d, mut surface)) = surfaces.get_single_mut() else {
        return;
    };
    if surface.generation == published.generation() {
        return;
    }
    meshes.insert(mesh3d.0.id(), to_render_mesh(published.mesh()));
    surface.generation = published.generation();
    debug!(
        "Uploaded terrain generation {} ({} triangles)",
        surface.generation,
        published.mesh().triangle_count()
    );
}

/// Bind or unbind the terrain texture as its slot changes.
pub fn apply_terrain_texture(
    textures: Res<TerrainTextures>,
    surfaces: Query<&MeshMaterial3d<StandardMaterial>, With<TerrainSurface>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !textures.is_changed() {
        return;
    }
    let texture = textures.terrain.ready_handle();
    for material in &surfaces {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color_texture = texture.clone();
        }
    }
}
