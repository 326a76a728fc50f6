//! Per-tile effect chains, spot sounds and step sounds.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::candidate::{EffectCandidate, EffectKind, SoundConfig};
use super::particles::{JetConfig, ParticleJet, TileEffect};
use super::selection::EffectSet;
use crate::core::{Error, Result};
use crate::tiles::{TileCatalog, TileId};

/// Default odds that a sampled tile plays one of its spot sounds (1 in N).
pub const DEFAULT_SOUND_CHANCE: u32 = 1200;

/// Profile record attaching effects to a group of tiles.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TileEffectsConfig {
    /// Symbolic tile names.
    pub tiles: Vec<String>,
    pub sound_chance: Option<u32>,
    pub sounds: Vec<SoundConfig>,
    pub effects: Vec<JetConfig>,
}

/// Everything attached to one tile type.
#[derive(Debug)]
pub struct TileEffects {
    pub chain: Vec<Box<dyn TileEffect>>,
    pub sounds: EffectSet,
    pub step_sounds: EffectSet,
    pub sound_chance: u32,
}

impl Default for TileEffects {
    fn default() -> Self {
        Self {
            chain: Vec::new(),
            sounds: EffectSet::new(),
            step_sounds: EffectSet::new(),
            sound_chance: DEFAULT_SOUND_CHANCE,
        }
    }
}

impl TileEffects {
    /// Add a sound: step sounds go to the step set, everything else is
    /// played as a one-shot at the tile.
    pub fn add_sound(&mut self, effect: EffectCandidate) {
        if effect.kind() == EffectKind::Step {
            self.step_sounds.add(effect);
        } else {
            self.sounds.add(effect.with_kind(EffectKind::OneShot));
        }
    }
}

#[derive(Debug, Default)]
pub struct TileEffectRegistry {
    by_tile: HashMap<TileId, TileEffects>,
}

impl TileEffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tile: TileId) -> Option<&TileEffects> {
        self.by_tile.get(&tile)
    }

    pub fn entry(&mut self, tile: TileId) -> &mut TileEffects {
        self.by_tile.entry(tile).or_default()
    }

    pub fn len(&self) -> usize {
        self.by_tile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tile.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_tile.clear();
    }

    /// Attach one profile record. Unknown tile names are skipped with a
    /// warning; an invalid sound pattern fails the whole record.
    pub fn register(&mut self, catalog: &TileCatalog, config: &TileEffectsConfig) -> Result<()> {
        let sounds = config
            .sounds
            .iter()
            .map(EffectCandidate::from_config)
            .collect::<Result<Vec<_>>>()?;

        for name in &config.tiles {
            let Some(tile) = catalog.lookup(name).filter(|id| !id.is_empty()) else {
                log::warn!("{}", Error::UnknownTile(name.clone()));
                continue;
            };
            let effects = self.entry(tile);
            if let Some(chance) = config.sound_chance {
                effects.sound_chance = chance.max(1);
            }
            for sound in &sounds {
                effects.add_sound(sound.clone());
            }
            for jet in &config.effects {
                effects.chain.push(Box::new(ParticleJet::from(*jet)));
            }
        }
        Ok(())
    }

    /// Spot sound for a sampled tile, gated by the tile's sound chance.
    pub fn sound<R: Rng + ?Sized>(&self, tile: TileId, tags: &str, rng: &mut R) -> Option<&EffectCandidate> {
        let effects = self.by_tile.get(&tile)?;
        if effects.sounds.is_empty() || rng.gen_range(0..effects.sound_chance) != 0 {
            return None;
        }
        effects.sounds.select(tags, EffectKind::OneShot, rng)
    }

    pub fn step_sound<R: Rng + ?Sized>(&self, tile: TileId, tags: &str, rng: &mut R) -> Option<&EffectCandidate> {
        self.by_tile
            .get(&tile)?
            .step_sounds
            .select(tags, EffectKind::Step, rng)
    }
}
