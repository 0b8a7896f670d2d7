//! Cave generation parameters

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Parameters controlling cave generation
///
/// Defaults reproduce the standard cave: a 100x100x50 volume at 45% initial
/// fill, five smoothing passes, a radius-15 central chamber with 6-9
/// tunnels, 100 crystals and 200 gems.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaveParams {
    pub seed: u64,                 // RNG stream seed for the session
    pub width: usize,              // Voxel extent on the world x axis
    pub height: usize,             // Voxel extent on the world y axis
    pub depth: usize,              // Voxel extent on the world z axis
    pub wall_percent: u32,         // Initial wall fill chance, 0-100
    pub smoothing_iterations: u32, // Cellular-automata passes
    pub chamber_radius: i32,       // Central chamber radius in cells
    pub tunnels_min: u32,          // Fewest tunnels carved from the chamber
    pub tunnels_max: u32,          // Most tunnels carved from the chamber
    pub tunnel_steps_min: u32,     // Shortest tunnel walk, in steps
    pub tunnel_steps_max: u32,     // Longest tunnel walk, in steps
    pub crystal_count: usize,      // Crystal slots to place
    pub gem_count: usize,          // Gem slots to place
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            width: 100,
            height: 100,
            depth: 50,
            wall_percent: 45,
            smoothing_iterations: 5,
            chamber_radius: 15,
            tunnels_min: 6,
            tunnels_max: 9,
            tunnel_steps_min: 20,
            tunnel_steps_max: 49,
            crystal_count: 100,
            gem_count: 200,
        }
    }
}

impl CaveParams {
    /// Reject impossible configurations
    ///
    /// Degenerate-but-valid settings (tiny volumes, zero objects) pass;
    /// they produce boring caves, not broken ones.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(Error::Params("volume extents must be nonzero".into()));
        }
        if self.wall_percent > 100 {
            return Err(Error::Params(format!(
                "wall_percent must be 0-100, got {}",
                self.wall_percent
            )));
        }
        if self.chamber_radius < 0 {
            return Err(Error::Params(format!(
                "chamber_radius must be non-negative, got {}",
                self.chamber_radius
            )));
        }
        if self.tunnels_min > self.tunnels_max {
            return Err(Error::Params(format!(
                "tunnel count range inverted: {}..{}",
                self.tunnels_min, self.tunnels_max
            )));
        }
        if self.tunnel_steps_min > self.tunnel_steps_max {
            return Err(Error::Params(format!(
                "tunnel step range inverted: {}..{}",
                self.tunnel_steps_min, self.tunnel_steps_max
            )));
        }
        Ok(())
    }

    /// Save to a JSON file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file (sync) and validate
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(CaveParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_extent() {
        let params = CaveParams {
            depth: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::Params(_))));
    }

    #[test]
    fn test_validate_rejects_bad_percent() {
        let params = CaveParams {
            wall_percent: 101,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let params = CaveParams {
            tunnels_min: 9,
            tunnels_max: 6,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = CaveParams {
            tunnel_steps_min: 50,
            tunnel_steps_max: 20,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cave_params.json");

        let params = CaveParams {
            seed: 777,
            width: 64,
            height: 64,
            depth: 32,
            crystal_count: 12,
            gem_count: 34,
            ..Default::default()
        };
        params.save_sync(&path).unwrap();

        let loaded = CaveParams::load_sync(&path).unwrap();
        assert_eq!(loaded.seed, 777);
        assert_eq!(loaded.width, 64);
        assert_eq!(loaded.height, 64);
        assert_eq!(loaded.depth, 32);
        assert_eq!(loaded.wall_percent, params.wall_percent);
        assert_eq!(loaded.crystal_count, 12);
        assert_eq!(loaded.gem_count, 34);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");

        let params = CaveParams {
            width: 0,
            ..Default::default()
        };
        // Save skips validation so the file itself can be written.
        params.save_sync(&path).unwrap();
        assert!(CaveParams::load_sync(&path).is_err());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(CaveParams::load_sync(&path), Err(Error::Json(_))));
    }
}
