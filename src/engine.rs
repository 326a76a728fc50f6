//! The ambience engine: owns every registry and cache, and drives them from
//! the host's tick and render callbacks.
//!
//! A host calls, in order:
//! - [`AmbienceEngine::on_world_load`] when a zone is entered,
//! - [`AmbienceEngine::tick`] once per simulation tick,
//! - [`AmbienceEngine::fog`] from render callbacks, any number of times.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::atmosphere::{FogMode, FogRangeCalculator, FogResult, WeatherBounds, WeatherIntensity, WeatherUpdate, DEFAULT_FOG_SCALE};
use crate::command::{CommandError, WeatherAuthority, WeatherCommand};
use crate::core::EngineConfig;
use crate::effects::{EffectCandidate, EffectSink, SoundHandle, SoundLibrary, TileEffectRegistry};
use crate::environ::{diagnostics, ConditionTagger, EnvironSnapshot, PerTickStateSampler};
use crate::fx::{AmbientSoundScheduler, EventSounds, ObserverEvent, SampleStats, SpatialEffectSampler};
use crate::profile::AmbienceProfile;
use crate::tiles::{AssociationTable, TileCatalog};
use crate::world::{ObserverStatus, Tile, WorldView};
use crate::zone::ZoneRegistry;

pub struct AmbienceEngine {
    config: EngineConfig,
    catalog: TileCatalog,
    associations: AssociationTable,
    tile_effects: TileEffectRegistry,
    zones: ZoneRegistry,
    weather: WeatherIntensity,
    authority: WeatherAuthority,
    fog: FogRangeCalculator,
    sampler: PerTickStateSampler,
    spatial: SpatialEffectSampler,
    region_sounds: AmbientSoundScheduler,
    events: EventSounds,
    library: SoundLibrary,
    rng: ChaCha8Rng,
}

impl AmbienceEngine {
    /// Build every table from `profile` against the host's tile catalog.
    pub fn new(catalog: TileCatalog, profile: &AmbienceProfile) -> Self {
        let config = profile.engine_config();
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let bounds = WeatherBounds::new(config.weather_min, config.weather_max);

        let mut engine = Self {
            associations: profile.build_associations(&catalog),
            tile_effects: profile.build_tile_effects(&catalog),
            region_sounds: profile.build_region_sounds(),
            zones: ZoneRegistry::new(),
            weather: WeatherIntensity::new(),
            authority: WeatherAuthority::new(bounds),
            fog: FogRangeCalculator::new(),
            sampler: PerTickStateSampler::new(ConditionTagger::new(&config)),
            spatial: SpatialEffectSampler::new(config.effect_range),
            events: EventSounds::new(config.craft_sound_cooldown_ticks),
            library: SoundLibrary::new(),
            catalog,
            config,
            rng,
        };
        engine.zones.process(&profile.zones);
        log::info!(
            "Ambience engine ready: {} tiles, {} associations, {} tile effect entries, range {}",
            engine.catalog.len(),
            engine.associations.len(),
            engine.tile_effects.len(),
            engine.spatial.range()
        );
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn associations(&self) -> &AssociationTable {
        &self.associations
    }

    pub fn weather(&self) -> &WeatherIntensity {
        &self.weather
    }

    pub fn authority(&self) -> &WeatherAuthority {
        &self.authority
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// Snapshot from the most recent tick.
    pub fn snapshot(&self) -> Option<&EnvironSnapshot> {
        self.sampler.snapshot()
    }

    /// A new zone was entered: resolve its config and drop tick state.
    pub fn on_world_load(&mut self, world: &dyn WorldView, sink: &mut dyn EffectSink) {
        self.zones.on_world_load(world.zone());
        self.region_sounds.stop_all(sink);
        self.sampler.reset();
        self.fog.invalidate();
    }

    /// Run one simulation tick.
    pub fn tick(&mut self, world: &dyn WorldView, observer: &ObserverStatus, sink: &mut dyn EffectSink) -> SampleStats {
        let snapshot = self.sampler.refresh(world, observer, &mut self.zones);

        let mut stats = SampleStats::default();
        if self.config.enable_block_effects {
            stats = self
                .spatial
                .sample(world, &self.catalog, &self.tile_effects, snapshot, sink, &mut self.rng);
        }
        if self.config.enable_step_sounds {
            stats.step = self
                .spatial
                .step(world, &self.catalog, &self.tile_effects, snapshot, sink, &mut self.rng)
                || self
                    .spatial
                    .footstep(world, &self.associations, snapshot, sink, &mut self.rng);
        }
        if self.config.enable_region_sounds {
            self.region_sounds.update(snapshot, sink, &mut self.rng);
        }
        stats
    }

    /// Sound for a discrete observer action. Returns true if one played.
    pub fn on_event(&mut self, event: ObserverEvent, sink: &mut dyn EffectSink) -> bool {
        if !self.config.enable_event_sounds {
            return false;
        }
        self.events.handle(event, self.sampler.ticks(), sink, &mut self.rng)
    }

    /// Fog range for a render pass. Before the first tick there is no
    /// observer position and the default fog is returned.
    pub fn fog(&mut self, world: &dyn WorldView, far_plane: f32, mode: FogMode) -> FogResult {
        let Some(snapshot) = self.sampler.snapshot() else {
            return FogResult::new(mode, far_plane, DEFAULT_FOG_SCALE);
        };
        let (x, z) = (snapshot.position.x, snapshot.position.z);
        self.fog.calculate(world, x, z, self.weather.level(), far_plane, mode)
    }

    /// Push a raw intensity from the weather authority.
    pub fn set_weather(&mut self, raw: f32) -> WeatherUpdate {
        let update = self.weather.set_intensity(raw, self.authority.bounds());
        if update.needs_refresh() {
            log::info!("Weather now {}", self.weather.bucket());
        }
        update
    }

    /// Run a `/rain` command line and apply the resulting intensity.
    pub fn command(&mut self, line: &str, rain_strength: f32) -> Result<String, CommandError> {
        let command = WeatherCommand::parse_line(line)?;
        let message = self.authority.execute(command, rain_strength);
        self.set_weather(self.authority.intensity());
        Ok(message)
    }

    /// Storm sound with its volume scaled to the current weather.
    pub fn storm_sound(&self) -> EffectCandidate {
        let volume = self.weather.current_volume(self.config.sound_level);
        EffectCandidate::with_volume_pitch(self.weather.storm_sound(), volume, 1.0)
    }

    /// Record the sound assets the host can play.
    pub fn register_sounds<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.library.register(name);
        }
    }

    /// Host handle for an effect; silence for unknown assets.
    pub fn sound_handle(&mut self, effect: &EffectCandidate) -> SoundHandle {
        self.library.resolve(effect.name())
    }

    /// Association for a tile, for hosts that route their own effects.
    pub fn association(&self, tile: Tile) -> Option<&str> {
        self.associations.resolve(tile)
    }

    pub fn association_report(&self) -> Vec<String> {
        self.associations.report(&self.catalog)
    }

    /// Debug overlay lines for the last tick.
    pub fn diagnostics(&self) -> Vec<String> {
        match self.sampler.snapshot() {
            Some(snapshot) => diagnostics(snapshot, &self.weather),
            None => vec![self.weather.diagnostic(0.0)],
        }
    }

    /// Rebuild every table from a new profile. Weather state and registered
    /// sound assets survive; caches, zone configs and loops do not.
    pub fn reload(&mut self, profile: &AmbienceProfile, sink: &mut dyn EffectSink) {
        self.region_sounds.stop_all(sink);

        self.config = profile.engine_config();
        self.associations = profile.build_associations(&self.catalog);
        self.tile_effects = profile.build_tile_effects(&self.catalog);
        self.region_sounds = profile.build_region_sounds();
        self.zones = ZoneRegistry::new();
        self.zones.process(&profile.zones);

        self.sampler = PerTickStateSampler::new(ConditionTagger::new(&self.config));
        self.spatial = SpatialEffectSampler::new(self.config.effect_range);
        self.events = EventSounds::new(self.config.craft_sound_cooldown_ticks);
        self.authority = WeatherAuthority::new(WeatherBounds::new(self.config.weather_min, self.config.weather_max));
        self.fog = FogRangeCalculator::new();
        if let Some(seed) = self.config.rng_seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        log::info!("Ambience profile reloaded: {} associations", self.associations.len());
    }
}
