//! Dense voxel occupancy grid for a single cave

use glam::{IVec3, Vec3};
use rand::Rng;

/// World-space span of the cave on every axis, in world units
///
/// The cave always occupies [-5, 5] in world space regardless of voxel
/// resolution; finer grids mean smaller cells, not a bigger cave.
pub const WORLD_SPAN: f32 = 10.0;

/// World-space coordinate of voxel index 0 on every axis
pub const WORLD_MIN: f32 = -5.0;

/// Threshold for the cellular-automata smoothing rule: a cell becomes a
/// wall when strictly more than this many of its 26 neighbors are walls.
const SMOOTH_WALL_LIMIT: u32 = 13;

/// Single cell of the occupancy grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::NoUninit)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Wall = 1,
}

/// Dense 3D occupancy grid
///
/// Cells live in one flat contiguous buffer indexed
/// `(z * height + y) * width + x`. Dimensions are fixed at creation and
/// must be nonzero. Coordinate queries outside the grid are a caller
/// error; [`CaveVolume::in_bounds`] is the cheap explicit check.
#[derive(Clone)]
pub struct CaveVolume {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<Cell>,
}

impl CaveVolume {
    /// Create a volume with every cell Empty
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        debug_assert!(width > 0 && height > 0 && depth > 0);
        Self {
            width,
            height,
            depth,
            cells: vec![Cell::Empty; width * height * depth],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Voxel coordinate of the volume's geometric center
    pub fn center(&self) -> IVec3 {
        IVec3::new(
            self.width as i32 / 2,
            self.height as i32 / 2,
            self.depth as i32 / 2,
        )
    }

    /// True if `p` addresses a cell of the grid
    pub fn in_bounds(&self, p: IVec3) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && (p.x as usize) < self.width
            && (p.y as usize) < self.height
            && (p.z as usize) < self.depth
    }

    /// True if `p` lies strictly inside the 1-cell border shell
    pub fn is_interior(&self, p: IVec3) -> bool {
        p.x > 0
            && p.y > 0
            && p.z > 0
            && (p.x as usize) < self.width - 1
            && (p.y as usize) < self.height - 1
            && (p.z as usize) < self.depth - 1
    }

    fn index(&self, p: IVec3) -> usize {
        debug_assert!(self.in_bounds(p), "voxel out of bounds: {p}");
        (p.z as usize * self.height + p.y as usize) * self.width + p.x as usize
    }

    pub fn get(&self, p: IVec3) -> Cell {
        self.cells[self.index(p)]
    }

    pub fn set(&mut self, p: IVec3, cell: Cell) {
        let i = self.index(p);
        self.cells[i] = cell;
    }

    pub fn is_wall(&self, p: IVec3) -> bool {
        self.get(p) == Cell::Wall
    }

    pub fn is_empty(&self, p: IVec3) -> bool {
        self.get(p) == Cell::Empty
    }

    /// Flat cell buffer in `(z * height + y) * width + x` order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Raw byte view of the cell buffer, for upload to an external stage
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Total number of wall cells
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Wall).count()
    }

    /// Set every cell (borders included) to Wall with `wall_percent` percent
    /// probability, else Empty
    pub fn fill_random(&mut self, rng: &mut impl Rng, wall_percent: u32) {
        for cell in &mut self.cells {
            *cell = if rng.random_range(0..100) < wall_percent {
                Cell::Wall
            } else {
                Cell::Empty
            };
        }
    }

    /// Count wall cells among the 26 neighbors of `p`, the center excluded
    ///
    /// `p` must be interior so the whole 3x3x3 block is in bounds.
    pub fn count_wall_neighbors(&self, p: IVec3) -> u32 {
        let mut walls = 0;
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    if self.is_wall(p + IVec3::new(dx, dy, dz)) {
                        walls += 1;
                    }
                }
            }
        }
        walls
    }

    /// True if any cell of the 3x3x3 block centered on `p` is a wall,
    /// the center cell included
    ///
    /// The whole block must be in bounds; placement margins guarantee this.
    pub fn near_wall(&self, p: IVec3) -> bool {
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if self.is_wall(p + IVec3::new(dx, dy, dz)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Run the cellular-automata smoothing rule `iterations` times
    ///
    /// Each pass reads the complete previous state and writes every
    /// interior cell of a scratch buffer, then the buffers swap; cells are
    /// never mutated mid-pass, so the result is order-independent. The
    /// 1-cell border shell is never written and keeps its seeded state.
    pub fn smooth(&mut self, iterations: u32) {
        if iterations == 0 {
            return;
        }
        let mut scratch = self.cells.clone();
        for _ in 0..iterations {
            for z in 1..self.depth - 1 {
                for y in 1..self.height - 1 {
                    for x in 1..self.width - 1 {
                        let p = IVec3::new(x as i32, y as i32, z as i32);
                        let walls = self.count_wall_neighbors(p);
                        scratch[(z * self.height + y) * self.width + x] =
                            if walls > SMOOTH_WALL_LIMIT {
                                Cell::Wall
                            } else {
                                Cell::Empty
                            };
                    }
                }
            }
            std::mem::swap(&mut self.cells, &mut scratch);
        }
    }

    /// Clear interior cells strictly inside the ball around `center`
    ///
    /// Cells at exactly `radius` distance stay; chambers use this so their
    /// shell reads as a wall surface.
    pub fn carve_sphere(&mut self, center: IVec3, radius: i32) {
        self.carve_ball(center, radius, false);
    }

    /// Clear interior cells inside or on the ball surface (`dist <= radius`)
    ///
    /// Tunnel steps use this; the inclusive surface keeps consecutive
    /// overlapping spheres free of pinch rings.
    pub fn carve_sphere_inclusive(&mut self, center: IVec3, radius: i32) {
        self.carve_ball(center, radius, true);
    }

    fn carve_ball(&mut self, center: IVec3, radius: i32, include_surface: bool) {
        for dz in -radius..=radius {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let p = center + IVec3::new(dx, dy, dz);
                    if !self.is_interior(p) {
                        continue;
                    }
                    let dist = ((dx * dx + dy * dy + dz * dz) as f32).sqrt();
                    let inside = if include_surface {
                        dist <= radius as f32
                    } else {
                        dist < radius as f32
                    };
                    if inside {
                        self.set(p, Cell::Empty);
                    }
                }
            }
        }
    }

    /// Map a voxel coordinate to its world-space position
    ///
    /// This mapping and [`CaveVolume::world_to_voxel`] are the single
    /// source of truth shared by carving, spawn, placement, collision and
    /// collection; no caller re-derives it.
    pub fn voxel_to_world(&self, p: IVec3) -> Vec3 {
        Vec3::new(
            p.x as f32 / self.width as f32 * WORLD_SPAN + WORLD_MIN,
            p.y as f32 / self.height as f32 * WORLD_SPAN + WORLD_MIN,
            p.z as f32 / self.depth as f32 * WORLD_SPAN + WORLD_MIN,
        )
    }

    /// Map a world-space position to the voxel cell containing it
    ///
    /// Positions outside the cave span produce out-of-range coordinates;
    /// callers bounds-check with [`CaveVolume::in_bounds`].
    pub fn world_to_voxel(&self, w: Vec3) -> IVec3 {
        IVec3::new(
            ((w.x - WORLD_MIN) / WORLD_SPAN * self.width as f32).floor() as i32,
            ((w.y - WORLD_MIN) / WORLD_SPAN * self.height as f32).floor() as i32,
            ((w.z - WORLD_MIN) / WORLD_SPAN * self.depth as f32).floor() as i32,
        )
    }
}
