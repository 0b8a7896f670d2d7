//! Spawn point search: expanding rings around the cave center

use glam::{IVec3, Vec3};
use rand::Rng;

use crate::voxel::volume::CaveVolume;

const MAX_RING: i32 = 20;
const ATTEMPTS_PER_RING: u32 = 100;

/// Find an open interior cell near the center of the volume
///
/// Samples cells uniformly from cubes of growing half-extent around the
/// center, 100 attempts per ring, and returns the world position of the
/// first Empty interior cell. A ring of 0 checks the center cell itself.
/// Falls back to the world origin when every ring comes up solid.
pub fn find_spawn(volume: &CaveVolume, rng: &mut impl Rng) -> Vec3 {
    let center = volume.center();

    for ring in 0..MAX_RING {
        for _ in 0..ATTEMPTS_PER_RING {
            let p = center
                + IVec3::new(
                    rng.random_range(-ring..=ring),
                    rng.random_range(-ring..=ring),
                    rng.random_range(-ring..=ring),
                );
            if volume.is_interior(p) && volume.is_empty(p) {
                return volume.voxel_to_world(p);
            }
        }
    }

    log::warn!("no open cell within {MAX_RING} rings of center, spawning at origin");
    Vec3::ZERO
}
