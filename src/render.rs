use bytemuck::{Pod, Zeroable};

use crate::terrain::mesh::TerrainMesh;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct TerrainPoint {
    pub position: [f32; 3],
}

/// Borrowed view of a finished mesh's flat buffers, in the layout a GPU
/// backend uploads directly: positions and normals as f32 triples,
/// triangle indices as u32 triples, edge indices as u32 pairs.
#[derive(Clone, Copy)]
pub struct MeshBuffers<'a> {
    pub positions: &'a [f32],
    pub normals: &'a [f32],
    pub triangle_indices: &'a [u32],
    pub edge_indices: &'a [u32],
}

impl<'a> MeshBuffers<'a> {
    pub fn from_mesh(mesh: &'a TerrainMesh) -> Self {
        Self {
            positions: mesh.positions(),
            normals: mesh.normals(),
            triangle_indices: mesh.triangle_indices(),
            edge_indices: mesh.edge_indices(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_index_count(&self) -> u32 {
        self.triangle_indices.len() as u32
    }

    pub fn edge_index_count(&self) -> u32 {
        self.edge_indices.len() as u32
    }

    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    pub fn normal_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.normals)
    }

    pub fn triangle_index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.triangle_indices)
    }

    pub fn edge_index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.edge_indices)
    }

    pub fn position_points(&self) -> &'a [TerrainPoint] {
        bytemuck::cast_slice(self.positions)
    }
}

/// The drawing side of the terrain contract. Implemented by whatever
/// owns the GPU context; the mesh itself never touches one.
pub trait RenderBackend {
    fn upload_terrain(&mut self, buffers: &MeshBuffers);
    fn draw_solid(&mut self);
    fn draw_wireframe(&mut self);
}
