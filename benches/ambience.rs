use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::Vec3;

use ambience::atmosphere::{FogMode, FogRangeCalculator};
use ambience::effects::LogSink;
use ambience::engine::AmbienceEngine;
use ambience::profile::AmbienceProfile;
use ambience::terrain::{NoiseWorld, TerrainParams};
use ambience::world::ObserverStatus;

const PROFILE: &str = r#"{
    "associations": { "core:grass": "grass", "core:stone": "stone" },
    "tile_effects": [
        { "tiles": ["core:lava"], "effects": [{ "kind": "lava" }] },
        { "tiles": ["core:grass"], "sounds": [{ "sound": "crickets", "spot_sound": true }] }
    ],
    "engine": { "rng_seed": 1 }
}"#;

fn bench_fog_scan(c: &mut Criterion) {
    let world = NoiseWorld::new(TerrainParams::default());
    let mut fog = FogRangeCalculator::new();

    c.bench_function("fog_scan_uncached", |b| {
        let mut x = 0;
        b.iter(|| {
            x += 1;
            fog.calculate(&world, black_box(x), 0, 0.5, 256.0, FogMode::Terrain)
        });
    });

    c.bench_function("fog_scan_cached", |b| {
        b.iter(|| fog.calculate(&world, black_box(0), 0, 0.5, 256.0, FogMode::Terrain));
    });
}

fn bench_engine_tick(c: &mut Criterion) {
    let world = NoiseWorld::new(TerrainParams::default());
    let profile = AmbienceProfile::from_json(PROFILE).unwrap();
    let mut engine = AmbienceEngine::new(world.catalog().clone(), &profile);
    let mut sink = LogSink;
    let ground = world.height_at(0, 0);
    let observer = ObserverStatus {
        position: Vec3::new(0.5, (ground + 2) as f32, 0.5),
        moved: true,
        ..Default::default()
    };

    c.bench_function("engine_tick_range_24", |b| {
        b.iter(|| engine.tick(&world, black_box(&observer), &mut sink));
    });
}

criterion_group!(benches, bench_fog_scan, bench_engine_tick);
criterion_main!(benches);
