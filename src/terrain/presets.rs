use crate::terrain::fault::{DeltaDecay, FaultConfig};
use crate::terrain::mesh::TerrainConfig;

pub struct TerrainPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub divisions: u32,
    pub iterations: u32,
    pub initial_delta: f32,
    pub decay: DeltaDecay,
}

impl TerrainPreset {
    /// Preset parameters on the unit rectangle, with the caller's seed.
    pub fn config(&self, seed: u64) -> TerrainConfig {
        TerrainConfig {
            divisions: self.divisions,
            min_x: -1.0,
            max_x: 1.0,
            min_y: -1.0,
            max_y: 1.0,
            fault: FaultConfig {
                iterations: self.iterations,
                initial_delta: self.initial_delta,
                decay: self.decay,
                seed,
            },
        }
    }
}

pub const TERRAIN_PRESETS: &[TerrainPreset] = &[
    TerrainPreset {
        name: "Rolling Hills",
        description: "Coarse faults at constant strength.",
        divisions: 64,
        iterations: 100,
        initial_delta: 0.01,
        decay: DeltaDecay::Constant,
    },
    TerrainPreset {
        name: "Alpine",
        description: "Many decaying faults, fine ridges over coarse relief.",
        divisions: 128,
        iterations: 400,
        initial_delta: 0.02,
        decay: DeltaDecay::Halving {
            iterations_per_halving: 100.0,
        },
    },
    TerrainPreset {
        name: "Plateau",
        description: "A few strong faults, large flat steps.",
        divisions: 32,
        iterations: 12,
        initial_delta: 0.05,
        decay: DeltaDecay::Constant,
    },
];
