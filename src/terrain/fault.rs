use glam::Vec2;
use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand_chacha::ChaCha8Rng;

use crate::error::TerrainError;
use crate::terrain::mesh::{TerrainConfig, TerrainMesh};

/// How the fault displacement shrinks across iterations. Later faults
/// add fine detail on top of the coarse structure laid down early.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeltaDecay {
    /// Every fault displaces by the initial delta.
    Constant,
    /// Delta is halved every `iterations_per_halving` iterations.
    Halving { iterations_per_halving: f32 },
}

impl DeltaDecay {
    pub fn delta_at(&self, initial_delta: f32, iteration: u32) -> f32 {
        match *self {
            DeltaDecay::Constant => initial_delta,
            DeltaDecay::Halving {
                iterations_per_halving,
            } => initial_delta / 2f32.powf(iteration as f32 / iterations_per_halving),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaultConfig {
    /// Number of fault planes to apply. Zero leaves the grid flat.
    pub iterations: u32,
    pub initial_delta: f32,
    pub decay: DeltaDecay,
    pub seed: u64,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            initial_delta: 0.01,
            decay: DeltaDecay::Constant,
            seed: 12345,
        }
    }
}

impl FaultConfig {
    pub(crate) fn validate(&self) -> Result<(), TerrainError> {
        if !(self.initial_delta > 0.0 && self.initial_delta.is_finite()) {
            return Err(TerrainError::InvalidDelta(self.initial_delta));
        }
        if let DeltaDecay::Halving {
            iterations_per_halving,
        } = self.decay
        {
            if !(iterations_per_halving > 0.0 && iterations_per_halving.is_finite()) {
                return Err(TerrainError::InvalidDecay(iterations_per_halving));
            }
        }
        Ok(())
    }
}

/// Repeatedly splits the grid with a random fault plane, raising every
/// vertex on the plane's positive side and lowering the rest. The RNG is
/// seeded from the config, so identical inputs produce bit-identical
/// elevations.
pub(crate) fn sculpt(mesh: &mut TerrainMesh, config: &TerrainConfig) {
    let fault = &config.fault;
    let mut rng = ChaCha8Rng::seed_from_u64(fault.seed);
    let point_x = Uniform::new_inclusive(config.min_x, config.max_x);
    let point_y = Uniform::new_inclusive(config.min_y, config.max_y);

    for iteration in 0..fault.iterations {
        let point = Vec2::new(point_x.sample(&mut rng), point_y.sample(&mut rng));
        let normal = random_unit_direction(&mut rng);
        let delta = fault.decay.delta_at(fault.initial_delta, iteration);

        for i in 0..mesh.vertex_count() {
            let mut vertex = mesh.vertex(i);
            if (vertex.truncate() - point).dot(normal) >= 0.0 {
                vertex.z += delta;
            } else {
                vertex.z -= delta;
            }
            mesh.set_vertex(i, vertex);
        }
    }
}

/// Rejection-samples the unit disc and normalizes. Zero-length and
/// out-of-disc draws are retried, so the result is never the zero vector.
fn random_unit_direction(rng: &mut ChaCha8Rng) -> Vec2 {
    let component = Uniform::new_inclusive(-1.0f32, 1.0);
    loop {
        let candidate = Vec2::new(component.sample(rng), component.sample(rng));
        let len_sq = candidate.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return candidate / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded_config(seed: u64) -> TerrainConfig {
        TerrainConfig {
            divisions: 10,
            fault: FaultConfig {
                iterations: 100,
                seed,
                ..FaultConfig::default()
            },
            ..TerrainConfig::default()
        }
    }

    fn elevations(mesh: &TerrainMesh) -> Vec<f32> {
        mesh.positions().chunks_exact(3).map(|v| v[2]).collect()
    }

    #[test]
    fn same_seed_gives_identical_elevations() {
        let a = TerrainMesh::build(&seeded_config(42)).unwrap();
        let b = TerrainMesh::build(&seeded_config(42)).unwrap();
        assert_eq!(elevations(&a), elevations(&b));
    }

    // Recorded from this exact pipeline: div=10 on (-1,1,-1,1), 100
    // iterations, constant delta 0.01, seed 42. ChaCha8 has a portable
    // output stream, so these values hold on every platform. Any change
    // to the RNG consumption order or the fault arithmetic shows up here.
    #[rustfmt::skip]
    const SEED_42_ELEVATIONS: [f32; 121] = [
        -0.18, -0.13999999, -0.07999999, -0.059999995, -0.02, -0.04, -0.07999999, -0.07999999, -0.09999999, -0.04, -0.02,
        -0.11999998, -0.13999999, -0.16, -0.11999998, -0.059999995, -0.02, -0.11999998, -0.13999999, -0.09999999, -0.04, -0.059999995,
        -0.07999999, -0.09999999, -0.09999999, -0.09999999, -0.02, -0.04, -0.13999999, -0.13999999, -0.09999999, -0.059999995, -0.02,
        -0.04, -0.07999999, -0.11999998, -0.059999995, 0.02, -0.059999995, -0.13999999, -0.09999999, -0.07999999, -0.07999999, -0.02,
        0.02, -0.02, -0.059999995, -0.09999999, -0.02, -0.02, -0.07999999, -0.13999997, -0.07999999, 0.0, -0.04,
        -0.04, -0.07999999, -0.059999995, -0.04, -0.04, -0.02, -0.04, -0.07999999, -0.04, 0.02, 0.059999995,
        -0.04, -0.13999999, -0.11999998, -0.059999995, 0.02, 0.0, -0.02, -0.04, 0.04, 0.02, 0.059999995,
        -0.02, -0.04, -0.02, 0.07999999, 0.059999995, 0.059999995, 0.07999999, 0.02, 0.04, 0.04, 0.13999999,
        -0.04, -0.02, -0.04, 0.02, -0.02, 0.0, 0.02, 0.07999999, 0.07999999, 0.059999995, 0.13999999,
        -0.04, -0.07999999, -0.059999995, -0.059999995, -0.059999995, -0.04, 0.0, 0.059999995, 0.11999998, 0.11999998, 0.16,
        -0.02, -0.04, -0.07999999, -0.09999999, -0.07999999, -0.13999999, -0.04, 0.02, 0.11999998, 0.11999998, 0.11999998,
    ];

    #[test]
    fn seed_42_matches_recorded_elevations() {
        let mesh = TerrainMesh::build(&seeded_config(42)).unwrap();
        assert_eq!(elevations(&mesh).as_slice(), SEED_42_ELEVATIONS.as_slice());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = TerrainMesh::build(&seeded_config(42)).unwrap();
        let b = TerrainMesh::build(&seeded_config(43)).unwrap();
        assert_ne!(elevations(&a), elevations(&b));
    }

    #[test]
    fn sculpting_displaces_some_vertices() {
        let mesh = TerrainMesh::build(&seeded_config(42)).unwrap();
        assert!(elevations(&mesh).iter().any(|&z| z != 0.0));
    }

    #[test]
    fn sculpting_only_touches_elevation() {
        let flat_config = TerrainConfig {
            fault: FaultConfig {
                iterations: 0,
                ..FaultConfig::default()
            },
            ..seeded_config(42)
        };
        let flat = TerrainMesh::build(&flat_config).unwrap();
        let sculpted = TerrainMesh::build(&seeded_config(42)).unwrap();
        for i in 0..flat.vertex_count() {
            let a = flat.vertex(i);
            let b = sculpted.vertex(i);
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn zero_iterations_leaves_grid_flat() {
        let config = TerrainConfig {
            fault: FaultConfig {
                iterations: 0,
                ..FaultConfig::default()
            },
            ..TerrainConfig::default()
        };
        let mesh = TerrainMesh::build(&config).unwrap();
        assert!(elevations(&mesh).iter().all(|&z| z == 0.0));
    }

    #[test]
    fn constant_decay_keeps_delta_fixed() {
        let decay = DeltaDecay::Constant;
        for it in [0, 1, 50, 1000] {
            assert_eq!(decay.delta_at(0.01, it), 0.01);
        }
    }

    #[test]
    fn halving_decay_halves_on_schedule() {
        let decay = DeltaDecay::Halving {
            iterations_per_halving: 10.0,
        };
        assert_relative_eq!(decay.delta_at(0.08, 0), 0.08, epsilon = 1e-7);
        assert_relative_eq!(decay.delta_at(0.08, 10), 0.04, epsilon = 1e-7);
        assert_relative_eq!(decay.delta_at(0.08, 20), 0.02, epsilon = 1e-7);

        let mut previous = f32::INFINITY;
        for it in 0..100 {
            let delta = decay.delta_at(0.08, it);
            assert!(delta > 0.0);
            assert!(delta <= previous);
            previous = delta;
        }
    }

    #[test]
    fn random_directions_are_unit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let dir = random_unit_direction(&mut rng);
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_non_positive_halving_interval() {
        let config = FaultConfig {
            decay: DeltaDecay::Halving {
                iterations_per_halving: 0.0,
            },
            ..FaultConfig::default()
        };
        assert_eq!(config.validate(), Err(TerrainError::InvalidDecay(0.0)));
    }
}
