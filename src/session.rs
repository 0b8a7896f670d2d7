//! Live cave session: one seeded world plus its pickups and queries
//!
//! [`CaveSession`] owns the generator and the session RNG. All randomness
//! flows through that single `StdRng`, so a seed fully determines the
//! first world, and each `regenerate` continues the same stream rather
//! than restarting it.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::generation::{CaveGenerator, CaveParams};
use crate::placement::{
    Crystal, Gem, GemKind, GemTally, PlacementStats, collect_gem, place_crystals, place_gems,
    respawn_gem,
};
use crate::spawn::find_spawn;
use crate::terrain::{HeightField, NormalField};
use crate::voxel::{CaveVolume, collides};

pub struct CaveSession {
    generator: CaveGenerator,
    rng: StdRng,
    volume: CaveVolume,
    heightfield: HeightField,
    normals: NormalField,
    crystals: Vec<Crystal>,
    crystal_stats: PlacementStats,
    gems: Vec<Gem>,
    gem_stats: PlacementStats,
    spawn: Vec3,
    tally: GemTally,
}

/// Everything one generation pass produces, built complete before the
/// session swaps it in.
struct World {
    volume: CaveVolume,
    heightfield: HeightField,
    normals: NormalField,
    crystals: Vec<Crystal>,
    crystal_stats: PlacementStats,
    gems: Vec<Gem>,
    gem_stats: PlacementStats,
    spawn: Vec3,
}

fn build_world(generator: &CaveGenerator, rng: &mut StdRng) -> World {
    let cave = generator.generate(rng);
    let params = generator.params();

    let (crystals, crystal_stats) =
        place_crystals(&cave.volume, &cave.heightfield, params.crystal_count, rng);
    let (gems, gem_stats) = place_gems(&cave.volume, params.gem_count, rng);
    let spawn = find_spawn(&cave.volume, rng);

    log::info!(
        "Placed {}/{} crystals and {}/{} gems, spawn at ({:.2}, {:.2}, {:.2})",
        crystal_stats.placed,
        crystal_stats.requested,
        gem_stats.placed,
        gem_stats.requested,
        spawn.x,
        spawn.y,
        spawn.z
    );

    World {
        volume: cave.volume,
        heightfield: cave.heightfield,
        normals: cave.normals,
        crystals,
        crystal_stats,
        gems,
        gem_stats,
        spawn,
    }
}

impl CaveSession {
    /// Generate the first world for `params.seed`
    pub fn new(params: CaveParams) -> Self {
        let generator = CaveGenerator::new(params);
        let mut rng = StdRng::seed_from_u64(generator.params().seed);
        let world = build_world(&generator, &mut rng);

        Self {
            generator,
            rng,
            volume: world.volume,
            heightfield: world.heightfield,
            normals: world.normals,
            crystals: world.crystals,
            crystal_stats: world.crystal_stats,
            gems: world.gems,
            gem_stats: world.gem_stats,
            spawn: world.spawn,
            tally: GemTally::default(),
        }
    }

    /// Replace the world with the next one in the session's RNG stream
    ///
    /// The tally survives: collected gems belong to the player, not to
    /// the cave that happened to hold them.
    pub fn regenerate(&mut self) {
        let world = build_world(&self.generator, &mut self.rng);
        self.volume = world.volume;
        self.heightfield = world.heightfield;
        self.normals = world.normals;
        self.crystals = world.crystals;
        self.crystal_stats = world.crystal_stats;
        self.gems = world.gems;
        self.gem_stats = world.gem_stats;
        self.spawn = world.spawn;
    }

    /// Try to pick up a gem near `player`, recording it on success
    pub fn collect(&mut self, player: Vec3, radius: f32) -> Option<GemKind> {
        let kind = collect_gem(&mut self.gems, player, radius)?;
        self.tally.record(kind);
        Some(kind)
    }

    /// Respawn the gem at `index` somewhere open; ignores bad indices
    pub fn respawn(&mut self, index: usize) {
        if let Some(gem) = self.gems.get_mut(index) {
            respawn_gem(gem, &self.volume, &mut self.rng);
        }
    }

    /// Sphere-vs-cave collision query against the current volume
    pub fn collides(&self, center: Vec3, radius: f32) -> bool {
        collides(&self.volume, center, radius)
    }

    pub fn params(&self) -> &CaveParams {
        self.generator.params()
    }

    pub fn volume(&self) -> &CaveVolume {
        &self.volume
    }

    pub fn heightfield(&self) -> &HeightField {
        &self.heightfield
    }

    pub fn normals(&self) -> &NormalField {
        &self.normals
    }

    pub fn crystals(&self) -> &[Crystal] {
        &self.crystals
    }

    pub fn crystal_stats(&self) -> PlacementStats {
        self.crystal_stats
    }

    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    pub fn gem_stats(&self) -> PlacementStats {
        self.gem_stats
    }

    pub fn spawn(&self) -> Vec3 {
        self.spawn
    }

    pub fn tally(&self) -> &GemTally {
        &self.tally
    }
}
