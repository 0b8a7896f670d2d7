//! Surface normals derived from the height field

use glam::Vec3;

use super::heightfield::HeightField;

/// Per-sample surface normals for a height field
///
/// Computed from centered finite differences for interior samples only;
/// the 1-sample border stays zeroed. Components are remapped from [-1, 1]
/// to [0, 1] for storage, the way a normal texture expects them.
pub struct NormalField {
    width: usize,
    height: usize,
    normals: Vec<Vec3>,
}

impl NormalField {
    pub fn from_heightfield(field: &HeightField) -> Self {
        let (width, height) = (field.width(), field.height());
        let mut normals = vec![Vec3::ZERO; width * height];

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let h_l = field.get(x - 1, y);
                let h_r = field.get(x + 1, y);
                let h_d = field.get(x, y - 1);
                let h_u = field.get(x, y + 1);

                let n = Vec3::new((h_r - h_l) * 2.0, (h_u - h_d) * 2.0, 1.0).normalize();
                normals[y * width + x] = n * 0.5 + 0.5;
            }
        }

        Self {
            width,
            height,
            normals,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Normal at footprint cell (x, y); zero on the border
    pub fn get(&self, x: usize, y: usize) -> Vec3 {
        self.normals[y * self.width + x]
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Flat f32 view (xyz per sample) in `y * width + x` order, for upload
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }
}
