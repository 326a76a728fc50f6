//! Stochastic sampling of tiles around the observer.
//!
//! Each tick a fixed number of tiles near the observer are picked with a
//! center-biased distribution. Sampled tiles run their effect chains and may
//! play one of their spot sounds.

use glam::IVec3;
use rand::Rng;

use crate::effects::{run_chain, EffectCandidate, EffectSink, TileEffectRegistry};
use crate::environ::EnvironSnapshot;
use crate::tiles::{AssociationTable, Substrate, TileCatalog, MESSY_GROUND, NOT_EMITTER};
use crate::world::WorldView;

/// Samples per tick relative to the volume of the `(2R-1)^3` cube.
pub const SAMPLE_RATIO: f64 = 0.0335671847202175;

/// Step sounds come from the tile this far below the observer's position.
pub const STEP_DEPTH: i32 = 2;

/// Volume of footsteps resolved through the association table.
pub const FOOTSTEP_VOLUME: f32 = 0.3;

/// Samples per tick for radius `range`.
pub fn sample_count(range: i32) -> usize {
    let side = (2 * range.max(1) - 1) as f64;
    (side * side * side * SAMPLE_RATIO).floor() as usize
}

/// Offset along one axis: the difference of two uniform draws in `[0, range)`.
pub fn axis_offset<R: Rng + ?Sized>(range: i32, rng: &mut R) -> i32 {
    rng.gen_range(0..range) - rng.gen_range(0..range)
}

/// What one tick of sampling did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleStats {
    pub samples: usize,
    pub non_empty: usize,
    pub effects: usize,
    pub sounds: usize,
    pub step: bool,
}

#[derive(Clone, Debug)]
pub struct SpatialEffectSampler {
    range: i32,
    count: usize,
}

impl SpatialEffectSampler {
    pub fn new(range: i32) -> Self {
        let range = range.max(1);
        Self {
            range,
            count: sample_count(range),
        }
    }

    pub fn range(&self) -> i32 {
        self.range
    }

    pub fn sample_count(&self) -> usize {
        self.count
    }

    /// A random tile position near `center`.
    pub fn sample_position<R: Rng + ?Sized>(&self, center: IVec3, rng: &mut R) -> IVec3 {
        center
            + IVec3::new(
                axis_offset(self.range, rng),
                axis_offset(self.range, rng),
                axis_offset(self.range, rng),
            )
    }

    /// Run tile effects and spot sounds for one tick.
    pub fn sample<R: Rng>(
        &self,
        world: &dyn WorldView,
        catalog: &TileCatalog,
        registry: &TileEffectRegistry,
        snapshot: &EnvironSnapshot,
        sink: &mut dyn EffectSink,
        rng: &mut R,
    ) -> SampleStats {
        let mut stats = SampleStats { samples: self.count, ..Default::default() };

        for _ in 0..self.count {
            let pos = self.sample_position(snapshot.position, rng);
            let tile = world.tile_at(pos);
            if tile.is_empty() {
                continue;
            }
            stats.non_empty += 1;

            let Some(effects) = registry.get(tile.id) else {
                continue;
            };
            stats.effects += run_chain(&effects.chain, world, catalog, pos, sink, rng);

            if let Some(sound) = registry.sound(tile.id, &snapshot.conditions, rng) {
                let pitch = sound.pitch(rng);
                sink.play_at(sound, pitch, pos);
                stats.sounds += 1;
            }
        }

        log::trace!(
            "sampled {} tiles: {} solid, {} effects, {} sounds",
            stats.samples,
            stats.non_empty,
            stats.effects,
            stats.sounds
        );
        stats
    }

    /// Step sound for the tile under a walking observer. Returns true if one
    /// was played.
    pub fn step<R: Rng>(
        &self,
        world: &dyn WorldView,
        catalog: &TileCatalog,
        registry: &TileEffectRegistry,
        snapshot: &EnvironSnapshot,
        sink: &mut dyn EffectSink,
        rng: &mut R,
    ) -> bool {
        if !snapshot.is_walking() {
            return false;
        }
        let pos = snapshot.position - IVec3::new(0, STEP_DEPTH, 0);
        let tile = world.tile_at(pos);
        if tile.is_empty() || catalog.is_liquid(tile.id) {
            return false;
        }
        match registry.step_sound(tile.id, &snapshot.conditions, rng) {
            Some(sound) => {
                let pitch = sound.pitch(rng);
                sink.play_at(sound, pitch, pos);
                true
            }
            None => false,
        }
    }

    /// Footstep named by the association of the tile under a walking
    /// observer. Foliage on top of that tile takes precedence.
    pub fn footstep<R: Rng>(
        &self,
        world: &dyn WorldView,
        associations: &AssociationTable,
        snapshot: &EnvironSnapshot,
        sink: &mut dyn EffectSink,
        rng: &mut R,
    ) -> bool {
        if !snapshot.is_walking() {
            return false;
        }
        let pos = snapshot.position - IVec3::new(0, STEP_DEPTH, 0);
        let cover = world.tile_at(pos + IVec3::Y);
        let name = associations
            .resolve_substrate(cover, Substrate::Foliage)
            .or_else(|| associations.resolve(world.tile_at(pos)));

        match name {
            Some(name) if name != NOT_EMITTER && name != MESSY_GROUND => {
                let sound = EffectCandidate::variable(name, FOOTSTEP_VOLUME, 1.0);
                let pitch = sound.pitch(rng);
                sink.play_at(&sound, pitch, pos);
                true
            }
            _ => false,
        }
    }
}
