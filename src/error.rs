use thiserror::Error;

use crate::terrain::mesh::MAX_DIVISIONS;

/// Invalid construction parameters. Every variant is caught before any
/// buffer allocation; a build either fully succeeds or fails here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("divisions must be between 1 and {max}, got {0}", max = MAX_DIVISIONS)]
    InvalidDivisions(u32),

    #[error("bounding rectangle is degenerate: x [{min_x}, {max_x}], y [{min_y}, {max_y}]")]
    InvalidBounds {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },

    #[error("initial fault delta must be positive and finite, got {0}")]
    InvalidDelta(f32),

    #[error("iterations per halving must be positive and finite, got {0}")]
    InvalidDecay(f32),
}
