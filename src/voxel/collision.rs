//! Sphere-vs-wall collision query
//!
//! Used by the external movement loop to reject per-axis motion into rock.
//! Shares the volume's world<->voxel mapping; no coordinate math happens
//! here beyond it.

use glam::{IVec3, Vec3};

use super::volume::{CaveVolume, WORLD_SPAN};

/// Test whether a sphere at `center` overlaps any wall cell
///
/// A center outside the cave counts as a boundary collision. The scanned
/// cube's half-width derives from the width-axis cell size on every axis;
/// the per-cell distance test discards the overscan on coarser axes.
pub fn collides(volume: &CaveVolume, center: Vec3, radius: f32) -> bool {
    let cell = volume.world_to_voxel(center);
    if !volume.in_bounds(cell) {
        return true;
    }

    let reach = (radius * volume.width() as f32 / WORLD_SPAN) as i32 + 1;
    for dz in -reach..=reach {
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let p = cell + IVec3::new(dx, dy, dz);
                if !volume.in_bounds(p) || !volume.is_wall(p) {
                    continue;
                }
                if volume.voxel_to_world(p).distance(center) < radius {
                    return true;
                }
            }
        }
    }
    false
}
