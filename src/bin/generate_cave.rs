//! Cave generator binary — generates a cave and writes a JSON manifest.
//!
//! Usage: cargo run --release --bin generate_cave -- [OPTIONS]
//!
//! Options:
//!   --params <FILE>   Load parameters from a JSON file (CLI flags override)
//!   --seed <SEED>     Random seed (default: 12345)
//!   --width <CELLS>   Volume width in cells (default: 100)
//!   --height <CELLS>  Volume height in cells (default: 100)
//!   --depth <CELLS>   Volume depth in cells (default: 50)
//!   --crystals <N>    Crystal count (default: 100)
//!   --gems <N>        Gem count (default: 200)
//!   --out <FILE>      Manifest path (default: cave_manifest.json)
//!
//! The manifest records the volume dimensions, wall ratio, spawn point,
//! and every placed crystal and gem, so external tooling can render or
//! diff a cave without linking the crate.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use karst::generation::CaveParams;
use karst::session::CaveSession;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();

    let mut params = match parse_str_arg(&args, "--params") {
        Some(path) => CaveParams::load_sync(&PathBuf::from(path))
            .expect("Failed to load parameter file"),
        None => CaveParams::default(),
    };
    if let Some(seed) = parse_u64_arg(&args, "--seed") {
        params.seed = seed;
    }
    if let Some(width) = parse_usize_arg(&args, "--width") {
        params.width = width;
    }
    if let Some(height) = parse_usize_arg(&args, "--height") {
        params.height = height;
    }
    if let Some(depth) = parse_usize_arg(&args, "--depth") {
        params.depth = depth;
    }
    if let Some(crystals) = parse_usize_arg(&args, "--crystals") {
        params.crystal_count = crystals;
    }
    if let Some(gems) = parse_usize_arg(&args, "--gems") {
        params.gem_count = gems;
    }
    params.validate().expect("Invalid cave parameters");

    let out_path = PathBuf::from(
        parse_str_arg(&args, "--out").unwrap_or_else(|| "cave_manifest.json".to_string()),
    );

    println!("=== Karst Cave Generator ===");
    println!("Volume: {} x {} x {} cells", params.width, params.height, params.depth);
    println!("Seed:   {}", params.seed);
    println!("Fill:   {}%, {} smoothing passes", params.wall_percent, params.smoothing_iterations);
    println!("Place:  {} crystals, {} gems", params.crystal_count, params.gem_count);
    println!("Output: {}", out_path.display());
    println!();

    let start = Instant::now();
    let seed = params.seed;
    let session = CaveSession::new(params);
    let elapsed = start.elapsed();

    let volume = session.volume();
    let total_cells = volume.width() * volume.height() * volume.depth();
    let wall_ratio = volume.wall_count() as f64 / total_cells as f64;

    let crystal_stats = session.crystal_stats();
    let gem_stats = session.gem_stats();
    let spawn = session.spawn();

    println!("Cave:     {} cells, {:.1}% walls in {:.1}s",
        total_cells, wall_ratio * 100.0, elapsed.as_secs_f64());
    println!("Crystals: {}/{} placed", crystal_stats.placed, crystal_stats.requested);
    println!("Gems:     {}/{} placed", gem_stats.placed, gem_stats.requested);
    println!("Spawn:    ({:.2}, {:.2}, {:.2})", spawn.x, spawn.y, spawn.z);

    // Failed slots keep the zero-size default and stay out of the manifest.
    let placed_crystals: Vec<_> = session.crystals().iter()
        .filter(|c| c.size > 0.0)
        .collect();
    let placed_gems: Vec<_> = session.gems().iter()
        .filter(|g| g.size > 0.0)
        .collect();

    let mut kind_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for gem in &placed_gems {
        *kind_counts.entry(gem.kind.name()).or_insert(0) += 1;
    }

    let manifest = json!({
        "seed": seed,
        "width": volume.width(),
        "height": volume.height(),
        "depth": volume.depth(),
        "wall_ratio": wall_ratio,
        "spawn": [spawn.x, spawn.y, spawn.z],
        "crystals": {
            "requested": crystal_stats.requested,
            "placed": crystal_stats.placed,
            "entries": placed_crystals.iter().map(|c| {
                json!({
                    "position": [c.position.x, c.position.y, c.position.z],
                    "size": c.size,
                    "glow": c.glow,
                })
            }).collect::<Vec<_>>(),
        },
        "gems": {
            "requested": gem_stats.requested,
            "placed": gem_stats.placed,
            "kinds": kind_counts,
            "entries": placed_gems.iter().map(|g| {
                json!({
                    "position": [g.position.x, g.position.y, g.position.z],
                    "kind": g.kind.name(),
                    "size": g.size,
                })
            }).collect::<Vec<_>>(),
        },
    });

    std::fs::write(&out_path, serde_json::to_string_pretty(&manifest).unwrap())
        .expect("Failed to write manifest");

    println!();
    println!("=== Generation Complete ===");
    println!("Manifest: {}", out_path.display());
    println!();
    println!("To regenerate this exact cave:");
    println!("  cargo run --release --bin generate_cave -- --seed {}", seed);
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
