//! Surface height field derived from the cave volume

use glam::IVec3;

use crate::noise::Perlin;
use crate::voxel::volume::CaveVolume;

/// Elevation contributed by each open cell along a footprint column
const OPEN_CELL_STEP: f32 = 0.02;

/// 2D elevation grid over the volume's footprint
///
/// One sample per (x, y) column, indexed `y * width + x`. More open space
/// along a column reads as higher ground; two fractal terms add broad
/// undulation and fine detail on top.
pub struct HeightField {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl HeightField {
    /// Derive the field from a volume's column openness
    pub fn from_volume(volume: &CaveVolume, noise: &Perlin) -> Self {
        let (width, height) = (volume.width(), volume.height());
        let mut samples = vec![0.0f32; width * height];

        for y in 0..height {
            for x in 0..width {
                let mut base = 0.0;
                for z in 0..volume.depth() {
                    if volume.is_empty(IVec3::new(x as i32, y as i32, z as i32)) {
                        base += OPEN_CELL_STEP;
                    }
                }

                let broad = noise.fractal_3d(x as f32 * 0.1, y as f32 * 0.1, 0.0, 4, 0.5);
                let detail = noise.fractal_3d(x as f32 * 0.5, y as f32 * 0.5, 0.0, 2, 0.3);

                samples[y * width + x] = base + broad * 0.3 + detail * 0.1;
            }
        }

        Self {
            width,
            height,
            samples,
        }
    }

    /// Build from precomputed samples; `samples.len()` must be
    /// `width * height`
    pub fn from_samples(width: usize, height: usize, samples: Vec<f32>) -> Self {
        debug_assert_eq!(samples.len(), width * height);
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at footprint cell (x, y)
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.width + x]
    }

    /// Flat sample buffer in `y * width + x` order, for upload
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}
