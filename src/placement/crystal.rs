//! Decorative crystals placed against cave walls

use glam::{IVec3, Vec3};
use rand::Rng;

use super::{PLACEMENT_ATTEMPTS, PlacementStats};
use crate::terrain::HeightField;
use crate::voxel::volume::CaveVolume;

/// Fixed crystal palette: blue, green, purple, orange
pub const CRYSTAL_PALETTE: [Vec3; 4] = [
    Vec3::new(0.2, 0.4, 1.0),
    Vec3::new(0.2, 1.0, 0.4),
    Vec3::new(0.8, 0.2, 1.0),
    Vec3::new(1.0, 0.6, 0.2),
];

/// Crystals sit this far above the surface height at their column
const SURFACE_OFFSET: f32 = 0.2;

/// A decorative crystal
///
/// Failed placement slots keep this default zero state (origin, zero
/// size) and show up in [`PlacementStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Crystal {
    pub position: Vec3,
    pub size: f32,
    pub rotation: f32,
    pub color: Vec3,
    pub glow: f32,
}

/// Place `count` crystals against cave walls
///
/// Samples the footprint freely and the depth axis only in a band around
/// mid-depth; accepts strictly interior spots whose 3x3x3 block touches
/// rock (the sampled cell itself may be rock). Elevation comes from the
/// height field plus a fixed offset; the footprint axes pass through the
/// shared world mapping.
pub fn place_crystals(
    volume: &CaveVolume,
    heightfield: &HeightField,
    count: usize,
    rng: &mut impl Rng,
) -> (Vec<Crystal>, PlacementStats) {
    let mut crystals = vec![Crystal::default(); count];
    let mut stats = PlacementStats {
        requested: count,
        placed: 0,
    };

    for crystal in &mut crystals {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = rng.random_range(0..volume.width()) as i32;
            let y = rng.random_range(0..volume.height()) as i32;
            let z = volume.depth() as i32 / 2 + rng.random_range(0..10) - 5;
            let p = IVec3::new(x, y, z);

            if !volume.is_interior(p) || !volume.near_wall(p) {
                continue;
            }

            // The footprint's second axis renders as world z; elevation
            // comes from the surface field, not the sampled depth.
            let ground = volume.voxel_to_world(p);
            *crystal = Crystal {
                position: Vec3::new(
                    ground.x,
                    heightfield.get(x as usize, y as usize) + SURFACE_OFFSET,
                    ground.y,
                ),
                size: rng.random_range(0.1..0.6),
                rotation: rng.random_range(0.0..std::f32::consts::TAU),
                color: CRYSTAL_PALETTE[rng.random_range(0..CRYSTAL_PALETTE.len())],
                glow: rng.random_range(0.5..1.0),
            };
            stats.placed += 1;
            break;
        }
    }

    if stats.failed() > 0 {
        log::debug!(
            "{} of {} crystal slots found no wall-adjacent spot",
            stats.failed(),
            count
        );
    }
    (crystals, stats)
}
