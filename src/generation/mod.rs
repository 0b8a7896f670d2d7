//! Cave generation pipeline
//!
//! The pipeline orchestrates:
//! 1. Random seed fill of the occupancy volume
//! 2. Cellular-automata smoothing passes
//! 3. Central chamber and tunnel carving
//! 4. Height field derivation
//! 5. Normal field derivation
//!
//! Every step runs to completion before the next begins; the whole pass is
//! synchronous and single-threaded, driven by one RNG stream.

pub mod params;
pub mod tunnel;

pub use params::CaveParams;

use std::time::Instant;

use rand::Rng;

use crate::noise::Perlin;
use crate::terrain::{HeightField, NormalField};
use crate::voxel::volume::CaveVolume;

/// Product of one full generation pass
pub struct GeneratedCave {
    pub volume: CaveVolume,
    pub heightfield: HeightField,
    pub normals: NormalField,
}

/// Orchestrates volume population and surface-field derivation
pub struct CaveGenerator {
    params: CaveParams,
    noise: Perlin,
}

impl CaveGenerator {
    /// Create a generator from parameters
    ///
    /// Parameters are taken as given; the fallible path is
    /// [`CaveParams::load_sync`], which validates.
    pub fn new(params: CaveParams) -> Self {
        Self {
            params,
            noise: Perlin::new(),
        }
    }

    pub fn params(&self) -> &CaveParams {
        &self.params
    }

    pub fn noise(&self) -> &Perlin {
        &self.noise
    }

    /// Run the full pipeline using the session RNG stream
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedCave {
        let start = Instant::now();
        let p = &self.params;

        // 1. Seed the volume with random walls
        let mut volume = CaveVolume::new(p.width, p.height, p.depth);
        volume.fill_random(rng, p.wall_percent);

        // 2. Smooth the noise into coherent rock
        volume.smooth(p.smoothing_iterations);

        // 3. Carve the guaranteed-traversable interior
        let center = volume.center();
        volume.carve_sphere(center, p.chamber_radius);
        let tunnels = rng.random_range(p.tunnels_min..=p.tunnels_max);
        for _ in 0..tunnels {
            let steps = rng.random_range(p.tunnel_steps_min..=p.tunnel_steps_max);
            tunnel::carve_tunnel(&mut volume, center, steps, rng);
        }

        // 4. + 5. Derive the surface fields
        let heightfield = HeightField::from_volume(&volume, &self.noise);
        let normals = NormalField::from_heightfield(&heightfield);

        log::info!(
            "Generated {}x{}x{} cave: {} tunnels, {:.0}% walls in {:.0}ms",
            p.width,
            p.height,
            p.depth,
            tunnels,
            volume.wall_count() as f64 / volume.cells().len() as f64 * 100.0,
            start.elapsed().as_secs_f64() * 1000.0,
        );

        GeneratedCave {
            volume,
            heightfield,
            normals,
        }
    }
}
