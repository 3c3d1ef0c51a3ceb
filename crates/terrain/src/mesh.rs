//! Grid mesh construction from the height field.
//!
//! Produces plain vertex/index data only. Turning it into an engine mesh
//! asset is the renderer's job.

use bevy::math::{Vec2, Vec3};

use crate::height::HeightFieldSampler;

/// Normal used for vertices whose accumulated face normals cancel out.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Y;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Immutable terrain mesh: `grid_size²` vertices in row-major order and
/// `6·(grid_size−1)²` triangle-list indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    pub grid_size: u32,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.position.to_array()).collect()
    }

    pub fn normals(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.normal.to_array()).collect()
    }

    pub fn uvs(&self) -> Vec<[f32; 2]> {
        self.vertices.iter().map(|v| v.uv.to_array()).collect()
    }
}

/// Triangle-list indices for an `n × n` vertex grid.
///
/// Each quad emits `(tl, bl, br)` then `(tl, br, tr)`, counter-clockwise when
/// seen from above. Grids smaller than 2×2 have no quads.
pub fn grid_indices(n: u32) -> Vec<u32> {
    let cells = n.saturating_sub(1) as usize;
    let mut indices = Vec::with_capacity(cells * cells * 6);
    for z in 0..n.saturating_sub(1) {
        for x in 0..n.saturating_sub(1) {
            let tl = z * n + x;
            let tr = tl + 1;
            let bl = (z + 1) * n + x;
            let br = bl + 1;
            indices.extend_from_slice(&[tl, bl, br, tl, br, tr]);
        }
    }
    indices
}

/// Unit face normal of triangle `(a, b, c)`; zero for degenerate triangles.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Smooth per-vertex normals: every triangle adds its unit face normal to its
/// three corners, and each sum is normalized at the end.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = face_normal(positions[i0], positions[i1], positions[i2]);
        sums[i0] += n;
        sums[i1] += n;
        sums[i2] += n;
    }
    sums.into_iter()
        .map(|sum| sum.try_normalize().unwrap_or(FALLBACK_NORMAL))
        .collect()
}

/// Build the full terrain mesh from `sampler`.
///
/// `texture_tile` is how many times the UV range `[0, 1]` repeats across the
/// grid.
pub fn build_terrain_mesh(sampler: &HeightFieldSampler, texture_tile: f32) -> TerrainMesh {
    let n = sampler.grid_size;
    let scale = sampler.world_scale;
    let half = sampler.half_extent();
    // Avoid dividing by zero for a single-vertex grid.
    let uv_span = n.saturating_sub(1).max(1) as f32;

    let mut positions = Vec::with_capacity((n as usize) * (n as usize));
    let mut uvs = Vec::with_capacity(positions.capacity());
    for z in 0..n {
        for x in 0..n {
            let wx = x as f32 * scale - half;
            let wz = z as f32 * scale - half;
            positions.push(Vec3::new(wx, sampler.height(wx, wz), wz));
            uvs.push(Vec2::new(
                x as f32 / uv_span * texture_tile,
                z as f32 / uv_span * texture_tile,
            ));
        }
    }

    let indices = grid_indices(n);
    let normals = vertex_normals(&positions, &indices);

    let vertices = positions
        .into_iter()
        .zip(normals)
        .zip(uvs)
        .map(|((position, normal), uv)| Vertex {
            position,
            normal,
            uv,
        })
        .collect();

    TerrainMesh {
        grid_size: n,
        vertices,
        indices,
    }
}
