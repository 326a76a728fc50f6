//! Ambience simulator: walks an observer across a procedural world and
//! prints what the engine would play.
//!
//! Usage: cargo run --release --bin ambience_sim -- [OPTIONS]
//!
//! Options:
//!   --ticks <N>        Ticks to simulate (default: 600)
//!   --seed <SEED>      World and engine seed (default: 12345)
//!   --profile <PATH>   Profile JSON (default: built-in demo profile)
//!   --rain <PERCENT>   Run `/rain <PERCENT>` before the first tick
//!   --every <N>        Print diagnostics every N ticks (default: 100)
//!   --report           Print the association report and exit

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use glam::{IVec3, Vec3};

use ambience::atmosphere::FogMode;
use ambience::effects::{EffectCandidate, EffectSink, ParticleKind};
use ambience::engine::AmbienceEngine;
use ambience::profile::AmbienceProfile;
use ambience::terrain::{NoiseWorld, TerrainParams};
use ambience::world::{ObserverStatus, WorldView};

const DEMO_PROFILE: &str = r#"{
    "associations": {
        "core:grass": "grass",
        "core:dirt": "dirt",
        "core:sand": "sand",
        "core:stone": "stone",
        "core:snow": "snow"
    },
    "tile_effects": [
        { "tiles": ["core:lava"], "effects": [{ "kind": "lava", "chance": 20 }, { "kind": "fire", "chance": 40 }],
          "sounds": [{ "sound": "ambience:lava.pop", "spot_sound": true }] },
        { "tiles": ["core:water"], "sound_chance": 600,
          "effects": [{ "kind": "bubble", "clearance": "liquid" }],
          "sounds": [{ "sound": "ambience:water.drip", "spot_sound": true }] },
        { "tiles": ["core:grass"], "sound_chance": 400,
          "sounds": [{ "sound": "ambience:crickets", "conditions": ".*#night#.*", "spot_sound": true }] }
    ],
    "region_sounds": {
        "Plains": [{ "sound": "ambience:wind.plains", "sound_type": "background" }],
        "Forest": [{ "sound": "ambience:birds", "repeat_delay": 200, "repeat_delay_random": 100 }],
        "Desert": [{ "sound": "ambience:wind.desert", "sound_type": "background", "volume": 0.6 }],
        "Underground": [{ "sound": "ambience:cave", "sound_type": "background" }]
    },
    "zones": [{ "zone_id": 0, "sky_height": 256 }]
}"#;

/// Counts what the engine asks for.
#[derive(Default)]
struct TallySink {
    sounds: BTreeMap<String, usize>,
    particles: BTreeMap<&'static str, usize>,
}

impl EffectSink for TallySink {
    fn play_at(&mut self, effect: &EffectCandidate, _pitch: f32, _pos: IVec3) {
        *self.sounds.entry(effect.name().to_string()).or_default() += 1;
    }

    fn play(&mut self, effect: &EffectCandidate, _pitch: f32) {
        *self.sounds.entry(effect.name().to_string()).or_default() += 1;
    }

    fn spawn_particle(&mut self, kind: ParticleKind, _pos: Vec3) {
        let name = match kind {
            ParticleKind::Steam => "steam",
            ParticleKind::Fire => "fire",
            ParticleKind::Bubble => "bubble",
            ParticleKind::Lava => "lava",
            ParticleKind::Dust => "dust",
            ParticleKind::Fountain => "fountain",
        };
        *self.particles.entry(name).or_default() += 1;
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();
    let ticks: u64 = parse_arg(&args, "--ticks").unwrap_or(600);
    let seed: u32 = parse_arg(&args, "--seed").unwrap_or(12345);
    let every: u64 = parse_arg::<u64>(&args, "--every").unwrap_or(100).max(1);
    let rain: Option<String> = parse_arg(&args, "--rain");
    let profile_path: Option<PathBuf> = parse_arg(&args, "--profile");

    let mut profile = match &profile_path {
        Some(path) => match AmbienceProfile::load_sync(path) {
            Ok(profile) => profile,
            Err(e) => {
                eprintln!("Failed to load profile {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => match AmbienceProfile::from_json(DEMO_PROFILE) {
            Ok(profile) => profile,
            Err(e) => {
                eprintln!("Built-in profile is invalid: {}", e);
                std::process::exit(1);
            }
        },
    };
    let mut engine_config = profile.engine_config();
    engine_config.rng_seed.get_or_insert(seed as u64);
    profile.engine = Some(engine_config);

    let mut world = NoiseWorld::new(TerrainParams { seed, ..Default::default() });
    let mut engine = AmbienceEngine::new(world.catalog().clone(), &profile);

    if args.iter().any(|a| a == "--report") {
        for line in engine.association_report() {
            println!("{}", line);
        }
        return;
    }

    println!("=== Ambience Simulator ===");
    println!("Seed:    {}", seed);
    println!("Ticks:   {}", ticks);
    println!("Profile: {}", profile_path.as_ref().map_or("built-in".to_string(), |p| p.display().to_string()));
    println!();

    let mut sink = TallySink::default();
    engine.on_world_load(&world, &mut sink);

    if let Some(rain) = rain {
        match engine.command(&rain, world.rain_strength()) {
            Ok(message) => println!("{}", message),
            Err(e) => println!("{}", e),
        }
        world.rain = 1.0;
    }

    let start = Instant::now();
    let mut samples = 0usize;
    let mut steps = 0usize;
    for tick in 0..ticks {
        // Walk east along z = 0.
        let x = (tick / 4) as i32;
        let ground = world.height_at(x, 0).max(world.params().sea_level);
        let observer = ObserverStatus {
            position: Vec3::new(x as f32 + 0.5, (ground + 2) as f32, 0.5),
            moved: tick % 4 == 0,
            ..Default::default()
        };

        let stats = engine.tick(&world, &observer, &mut sink);
        samples += stats.samples;
        steps += stats.step as usize;
        engine.fog(&world, 256.0, FogMode::Terrain);
        world.advance();

        if tick % every == 0 {
            let fog = engine.fog(&world, 256.0, FogMode::Terrain);
            println!("--- tick {} ---", tick);
            for line in engine.diagnostics() {
                println!("  {}", line);
            }
            println!("  Fog: start {:.1} end {:.1} scale {:.2}", fog.start, fog.end, fog.scale);
        }
    }
    let elapsed = start.elapsed();

    println!();
    println!("=== Summary ===");
    println!(
        "{} ticks in {:.2?} ({:.1} us/tick), {} samples, {} footsteps",
        ticks,
        elapsed,
        elapsed.as_secs_f64() * 1e6 / ticks.max(1) as f64,
        samples,
        steps
    );
    println!("Sounds:");
    for (name, count) in &sink.sounds {
        println!("  {:<28} {}", name, count);
    }
    println!("Particles:");
    for (name, count) in &sink.particles {
        println!("  {:<28} {}", name, count);
    }
}

fn parse_arg<T: FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}
