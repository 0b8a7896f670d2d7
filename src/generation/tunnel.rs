//! Tunnel carving: random walks emanating from the central chamber

use glam::IVec3;
use rand::Rng;

use crate::voxel::volume::CaveVolume;

/// Carve one tunnel walk starting at `start`
///
/// The walk keeps a heading (horizontal angle over the full circle,
/// vertical within +-30 degrees), clears a sphere of radius 3-4 at each
/// step, then advances about two cells with per-axis jitter and drifts the
/// heading by a small bounded angle. Carving clips to the volume interior,
/// so a walk wandering out of bounds simply stops removing cells.
pub fn carve_tunnel(volume: &mut CaveVolume, start: IVec3, steps: u32, rng: &mut impl Rng) {
    let mut angle_h = rng.random_range(0.0f32..360.0).to_radians();
    let mut angle_v = rng.random_range(-30.0f32..30.0).to_radians();
    let (mut dir_x, mut dir_y, mut dir_z) = heading(angle_h, angle_v);

    let mut x = start.x as f32;
    let mut y = start.y as f32;
    let mut z = start.z as f32;

    for _ in 0..steps {
        let pos = IVec3::new(x as i32, y as i32, z as i32);
        let radius = rng.random_range(3..=4);
        volume.carve_sphere_inclusive(pos, radius);

        // Advance with per-axis jitter, vertical kept a little tighter.
        x += dir_x * 2.0 + rng.random_range(-0.5..0.5);
        y += dir_y * 2.0 + rng.random_range(-0.3..0.3);
        z += dir_z * 2.0 + rng.random_range(-0.5..0.5);

        angle_h += rng.random_range(-2.0f32..2.0).to_radians();
        angle_v += rng.random_range(-1.0f32..1.0).to_radians();
        (dir_x, dir_y, dir_z) = heading(angle_h, angle_v);
    }
}

fn heading(angle_h: f32, angle_v: f32) -> (f32, f32, f32) {
    (
        angle_h.cos() * angle_v.cos(),
        angle_v.sin(),
        angle_h.sin() * angle_v.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn solid(extent: usize) -> CaveVolume {
        let mut volume = CaveVolume::new(extent, extent, extent);
        let mut rng = StdRng::seed_from_u64(0);
        volume.fill_random(&mut rng, 100);
        volume
    }

    #[test]
    fn test_tunnel_removes_walls() {
        let mut volume = solid(40);
        let before = volume.wall_count();
        let start = volume.center();
        let mut rng = StdRng::seed_from_u64(21);
        carve_tunnel(&mut volume, start, 20, &mut rng);
        assert!(volume.wall_count() < before);
    }

    #[test]
    fn test_tunnel_is_deterministic() {
        let mut a = solid(32);
        let mut b = solid(32);
        let start = a.center();
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);
        carve_tunnel(&mut a, start, 30, &mut rng_a);
        carve_tunnel(&mut b, start, 30, &mut rng_b);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_tunnel_never_breaches_border() {
        // Long walk in a small volume: it will hit the walls many times
        // over, and every carve must clip to the interior.
        let mut volume = solid(12);
        let start = volume.center();
        let mut rng = StdRng::seed_from_u64(33);
        carve_tunnel(&mut volume, start, 200, &mut rng);

        for z in 0..12 {
            for y in 0..12 {
                for x in 0..12 {
                    let p = IVec3::new(x, y, z);
                    if !volume.is_interior(p) {
                        assert!(volume.is_wall(p), "border breached at {p}");
                    }
                }
            }
        }
    }
}
