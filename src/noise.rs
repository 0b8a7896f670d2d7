//! Fixed-table gradient noise
//!
//! Classic improved Perlin noise over the standard 256-entry reference
//! permutation, with the usual fractal octave sum on top. The sampler is a
//! plain value with no global or lazy state; every instance produces
//! bit-identical output. Internal math runs in f64, the public surface is f32.

/// The reference permutation: a fixed shuffle of 0..=255.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194,
    233, 7, 225, 140, 36, 103, 30, 69, 142, 8, 99, 37, 240,
    21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197,
    62, 94, 252, 219, 203, 117, 35, 11, 32, 57, 177, 33, 88,
    237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175, 74,
    165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111,
    229, 122, 60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245,
    40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73,
    209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116,
    188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64, 52, 217,
    226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85,
    212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42,
    223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163, 70, 221,
    153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98,
    108, 110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97,
    228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181,
    199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4,
    150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243,
    141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// 3D gradient noise sampler
///
/// Construct once and share by reference; the doubled permutation table is
/// built up front so hash lookups never wrap.
#[derive(Clone)]
pub struct Perlin {
    perm: [u8; 512],
}

impl Perlin {
    pub fn new() -> Self {
        let mut perm = [0u8; 512];
        for (i, &v) in PERMUTATION.iter().enumerate() {
            perm[i] = v;
            perm[i + 256] = v;
        }
        Self { perm }
    }

    /// Sample noise at a point
    ///
    /// Result is roughly in [-1, 1] and exactly 0.0 at integer lattice
    /// points.
    pub fn sample_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let zi = (zf as i32 & 255) as usize;

        let fx = (x - xf) as f64;
        let fy = (y - yf) as f64;
        let fz = (z - zf) as f64;

        let u = fade(fx);
        let v = fade(fy);
        let w = fade(fz);

        // Hash coordinates of the cube corners.
        let a = self.perm[xi] as usize + yi;
        let aa = self.perm[a] as usize + zi;
        let ab = self.perm[a + 1] as usize + zi;
        let b = self.perm[xi + 1] as usize + yi;
        let ba = self.perm[b] as usize + zi;
        let bb = self.perm[b + 1] as usize + zi;

        let result = lerp(
            w,
            lerp(
                v,
                lerp(
                    u,
                    grad(self.perm[aa], fx, fy, fz),
                    grad(self.perm[ba], fx - 1.0, fy, fz),
                ),
                lerp(
                    u,
                    grad(self.perm[ab], fx, fy - 1.0, fz),
                    grad(self.perm[bb], fx - 1.0, fy - 1.0, fz),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(self.perm[aa + 1], fx, fy, fz - 1.0),
                    grad(self.perm[ba + 1], fx - 1.0, fy, fz - 1.0),
                ),
                lerp(
                    u,
                    grad(self.perm[ab + 1], fx, fy - 1.0, fz - 1.0),
                    grad(self.perm[bb + 1], fx - 1.0, fy - 1.0, fz - 1.0),
                ),
            ),
        );

        result as f32
    }

    /// Fractal octave sum
    ///
    /// Frequency doubles and amplitude decays by `persistence` each octave;
    /// the sum is normalized by the total amplitude so the range stays
    /// comparable across octave counts. `octaves` must be at least 1.
    pub fn fractal_3d(&self, x: f32, y: f32, z: f32, octaves: u32, persistence: f32) -> f32 {
        let mut total = 0.0f32;
        let mut frequency = 1.0f32;
        let mut amplitude = 1.0f32;
        let mut max_value = 0.0f32;

        for _ in 0..octaves {
            total += self.sample_3d(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        total / max_value
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_across_instances() {
        let a = Perlin::new();
        let b = Perlin::new();
        for i in 0..64 {
            let t = i as f32 * 0.37;
            assert_eq!(a.sample_3d(t, t * 0.5, -t), b.sample_3d(t, t * 0.5, -t));
        }
    }

    #[test]
    fn test_repeated_sampling_is_stable() {
        let noise = Perlin::new();
        let first = noise.sample_3d(1.2, 3.4, 5.6);
        for _ in 0..10 {
            assert_eq!(noise.sample_3d(1.2, 3.4, 5.6), first);
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = Perlin::new();
        for x in -2i32..3 {
            for y in -2i32..3 {
                for z in -2i32..3 {
                    assert_eq!(noise.sample_3d(x as f32, y as f32, z as f32), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_sample_range_and_variation() {
        let noise = Perlin::new();
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..1000 {
            let t = i as f32;
            let v = noise.sample_3d(t * 0.113, t * 0.071, t * 0.053);
            min = min.min(v);
            max = max.max(v);
        }
        assert!(min >= -1.5 && max <= 1.5, "range [{min}, {max}]");
        assert!(max > min, "noise should not be constant");
    }

    #[test]
    fn test_single_octave_matches_base_sample() {
        let noise = Perlin::new();
        let (x, y, z) = (0.7, 1.9, -2.3);
        assert_eq!(noise.fractal_3d(x, y, z, 1, 0.5), noise.sample_3d(x, y, z));
    }

    #[test]
    fn test_fractal_stays_normalized() {
        let noise = Perlin::new();
        for i in 0..500 {
            let t = i as f32 * 0.17;
            let v = noise.fractal_3d(t, t * 0.3, t * 0.9, 4, 0.5);
            assert!(v.abs() <= 1.5, "octave sum escaped range: {v}");
        }
    }

    #[test]
    fn test_smoothness() {
        let noise = Perlin::new();
        let base = noise.sample_3d(3.21, 4.56, 7.89);
        let nudged = noise.sample_3d(3.211, 4.56, 7.89);
        assert!((base - nudged).abs() < 0.05);
    }
}
