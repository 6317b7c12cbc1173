use glam::Vec3;
use tracing::{debug, trace};

use crate::error::TerrainError;
use crate::render::MeshBuffers;
use crate::terrain::fault::{self, FaultConfig};

/// Upper bound on grid divisions. Keeps every face-index computation
/// (`row * (div + 1) + col`, up to `(div + 1)^2 - 1`) far below u32
/// range; the arithmetic would wrap beyond 65534.
pub const MAX_DIVISIONS: u32 = 16_384;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainConfig {
    /// Number of grid cells along each axis.
    pub divisions: u32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub fault: FaultConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            divisions: 64,
            min_x: -1.0,
            max_x: 1.0,
            min_y: -1.0,
            max_y: 1.0,
            fault: FaultConfig::default(),
        }
    }
}

impl TerrainConfig {
    pub(crate) fn validate(&self) -> Result<(), TerrainError> {
        if self.divisions == 0 || self.divisions > MAX_DIVISIONS {
            return Err(TerrainError::InvalidDivisions(self.divisions));
        }
        if !(self.min_x < self.max_x && self.min_y < self.max_y) {
            return Err(TerrainError::InvalidBounds {
                min_x: self.min_x,
                max_x: self.max_x,
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        self.fault.validate()
    }
}

/// Regular-grid triangle mesh with procedurally sculpted elevations.
///
/// All buffers are flat and render-ready: positions and normals as
/// `[x, y, z]` triples per vertex, faces as index triples, edges as
/// index pairs. A mesh only exists in its finished state; `build` runs
/// the whole pipeline (grid, edges, sculpt, normals) before returning.
#[derive(Debug)]
pub struct TerrainMesh {
    divisions: u32,
    position_data: Vec<f32>,
    normal_data: Vec<f32>,
    face_data: Vec<u32>,
    edge_data: Vec<u32>,
}

impl TerrainMesh {
    pub fn build(config: &TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;

        let mut mesh = Self {
            divisions: config.divisions,
            position_data: Vec::new(),
            normal_data: Vec::new(),
            face_data: Vec::new(),
            edge_data: Vec::new(),
        };

        mesh.generate_grid(config);
        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "generated grid"
        );

        mesh.generate_lines();
        debug!(edges = mesh.edge_data.len() / 2, "generated wireframe edges");

        fault::sculpt(&mut mesh, config);
        debug!(iterations = config.fault.iterations, "sculpted terrain");

        mesh.calculate_normals();
        debug!("computed vertex normals");

        Ok(mesh)
    }

    /// Uniform (div+1) x (div+1) lattice at z = 0, split into two
    /// triangles per cell. Vertex index is `row * (div + 1) + col`, so
    /// adjacent cells share vertices instead of duplicating them.
    fn generate_grid(&mut self, config: &TerrainConfig) {
        let div = self.divisions as usize;
        let dx = (config.max_x - config.min_x) / config.divisions as f32;
        let dy = (config.max_y - config.min_y) / config.divisions as f32;

        self.position_data.reserve((div + 1) * (div + 1) * 3);
        for i in 0..=div {
            for j in 0..=div {
                self.position_data.push(config.min_x + dx * j as f32);
                self.position_data.push(config.min_y + dy * i as f32);
                self.position_data.push(0.0);
            }
        }
        self.normal_data = vec![0.0; self.position_data.len()];

        let stride = self.divisions + 1;
        self.face_data.reserve(div * div * 6);
        for i in 0..self.divisions {
            for j in 0..self.divisions {
                let corner = i * stride + j;
                self.face_data
                    .extend_from_slice(&[corner, corner + 1, corner + stride]);
                self.face_data
                    .extend_from_slice(&[corner + 1, corner + stride + 1, corner + stride]);
            }
        }
    }

    /// Each face contributes its three edges as index pairs. Shared
    /// edges are emitted twice, which is acceptable for line drawing.
    fn generate_lines(&mut self) {
        self.edge_data.reserve(self.face_data.len() * 2);
        for face in self.face_data.chunks_exact(3) {
            self.edge_data
                .extend_from_slice(&[face[0], face[1], face[1], face[2], face[2], face[0]]);
        }
    }

    /// Accumulates half of each face's edge cross product into the
    /// normals of its three vertices, then normalizes. The cross product
    /// magnitude is twice the face area, so this weights every vertex
    /// normal by the areas of its adjacent faces. A vertex with zero
    /// accumulation (impossible on a connected grid) keeps a zero normal
    /// rather than dividing by zero.
    fn calculate_normals(&mut self) {
        for f in 0..self.face_count() {
            let a = self.face_data[f * 3] as usize;
            let b = self.face_data[f * 3 + 1] as usize;
            let c = self.face_data[f * 3 + 2] as usize;

            let v0 = self.vertex(a);
            let v1 = self.vertex(b);
            let v2 = self.vertex(c);
            let face_normal = (v1 - v0).cross(v2 - v0) * 0.5;

            for vi in [a, b, c] {
                self.normal_data[vi * 3] += face_normal.x;
                self.normal_data[vi * 3 + 1] += face_normal.y;
                self.normal_data[vi * 3 + 2] += face_normal.z;
            }
        }

        for v in 0..self.vertex_count() {
            let n = Vec3::new(
                self.normal_data[v * 3],
                self.normal_data[v * 3 + 1],
                self.normal_data[v * 3 + 2],
            )
            .normalize_or_zero();
            self.normal_data[v * 3] = n.x;
            self.normal_data[v * 3 + 1] = n.y;
            self.normal_data[v * 3 + 2] = n.z;
        }
    }

    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.position_data[i * 3],
            self.position_data[i * 3 + 1],
            self.position_data[i * 3 + 2],
        )
    }

    pub(crate) fn set_vertex(&mut self, i: usize, v: Vec3) {
        self.position_data[i * 3] = v.x;
        self.position_data[i * 3 + 1] = v.y;
        self.position_data[i * 3 + 2] = v.z;
    }

    pub fn vertex_count(&self) -> usize {
        self.position_data.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.face_data.len() / 3
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn positions(&self) -> &[f32] {
        &self.position_data
    }

    pub fn normals(&self) -> &[f32] {
        &self.normal_data
    }

    pub fn triangle_indices(&self) -> &[u32] {
        &self.face_data
    }

    pub fn edge_indices(&self) -> &[u32] {
        &self.edge_data
    }

    pub fn buffers(&self) -> MeshBuffers<'_> {
        MeshBuffers::from_mesh(self)
    }

    pub fn min_elevation(&self) -> f32 {
        self.position_data
            .chunks_exact(3)
            .map(|v| v[2])
            .fold(f32::INFINITY, f32::min)
    }

    pub fn max_elevation(&self) -> f32 {
        self.position_data
            .chunks_exact(3)
            .map(|v| v[2])
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Logs every buffer entry at trace level.
    pub fn dump_buffers(&self) {
        for i in 0..self.vertex_count() {
            let v = self.vertex(i);
            trace!(i, x = v.x, y = v.y, z = v.z, "v");
        }
        for (i, n) in self.normal_data.chunks_exact(3).enumerate() {
            trace!(i, x = n[0], y = n[1], z = n[2], "n");
        }
        for (i, f) in self.face_data.chunks_exact(3).enumerate() {
            trace!(i, a = f[0], b = f[1], c = f[2], "f");
        }
    }
}
