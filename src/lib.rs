//! Procedural terrain core: a regular-grid triangle mesh sculpted by
//! random fault planes, with area-weighted vertex normals and flat
//! render-ready buffers. Drawing is left to a [`render::RenderBackend`].

pub mod error;
pub mod render;
pub mod terrain;

pub use error::TerrainError;
pub use render::{MeshBuffers, RenderBackend, TerrainPoint};
pub use terrain::{
    DeltaDecay, FaultConfig, MAX_DIVISIONS, TERRAIN_PRESETS, TerrainCommand, TerrainConfig,
    TerrainEngine, TerrainMesh, TerrainPreset, TerrainResult,
};
