pub mod engine;
pub mod fault;
pub mod mesh;
pub mod presets;

pub use engine::{TerrainCommand, TerrainEngine, TerrainResult};
pub use fault::{DeltaDecay, FaultConfig};
pub use mesh::{MAX_DIVISIONS, TerrainConfig, TerrainMesh};
pub use presets::{TERRAIN_PRESETS, TerrainPreset};
