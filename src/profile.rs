//! Ambience profiles: JSON documents describing associations, tile effects,
//! region sounds and zone overrides.
//!
//! ```json
//! {
//!   "associations": { "core:stone": "stone", "core:wheat": "#wheat" },
//!   "legacy_associations": { "35^4": "rug" },
//!   "dictionary": { "hardmetal": ["core:iron_block"] },
//!   "tile_effects": [{ "tiles": ["core:lava"], "effects": [{ "kind": "fire" }] }],
//!   "region_sounds": { "Plains": [{ "sound": "wind", "sound_type": "background" }] },
//!   "zones": [{ "zone_id": 0, "sea_level": 63 }],
//!   "engine": { "effect_range": 16 }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, Result};
use crate::effects::{SoundConfig, TileEffectRegistry, TileEffectsConfig};
use crate::fx::AmbientSoundScheduler;
use crate::tiles::{AssociationTable, MaterialDictionary, TileCatalog};
use crate::zone::ZoneOverride;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbienceProfile {
    pub associations: BTreeMap<String, String>,
    /// Keys that may use numeric tile ids.
    pub legacy_associations: BTreeMap<String, String>,
    pub dictionary: MaterialDictionary,
    pub tile_effects: Vec<TileEffectsConfig>,
    pub region_sounds: BTreeMap<String, Vec<SoundConfig>>,
    pub zones: Vec<ZoneOverride>,
    pub engine: Option<EngineConfig>,
}

impl AmbienceProfile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let profile = Self::from_json(&json)?;
        log::info!(
            "Loaded profile {}: {} associations, {} tile effect groups, {} zones",
            path.display(),
            profile.associations.len() + profile.legacy_associations.len(),
            profile.tile_effects.len(),
            profile.zones.len()
        );
        Ok(profile)
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load several profiles in order, skipping files that fail to load.
    pub fn load_all(paths: &[&Path]) -> Self {
        let mut merged = Self::default();
        for path in paths {
            match Self::load_sync(path) {
                Ok(profile) => merged.merge(profile),
                Err(e) => log::warn!("Unable to process profile {}: {}", path.display(), e),
            }
        }
        merged
    }

    /// Append `later` to this profile. Later associations replace earlier
    /// ones with the same key; zone records keep their order so the first
    /// one still wins; the first engine config wins.
    pub fn merge(&mut self, later: AmbienceProfile) {
        self.associations.extend(later.associations);
        self.legacy_associations.extend(later.legacy_associations);
        for (value, keys) in later.dictionary {
            self.dictionary.entry(value).or_default().extend(keys);
        }
        self.tile_effects.extend(later.tile_effects);
        for (region, sounds) in later.region_sounds {
            self.region_sounds.entry(region).or_default().extend(sounds);
        }
        self.zones.extend(later.zones);
        if self.engine.is_none() {
            self.engine = later.engine;
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }

    /// Build the association table. Bad entries are logged and skipped.
    pub fn build_associations(&self, catalog: &TileCatalog) -> AssociationTable {
        let mut table = AssociationTable::new();
        table.register_dictionary(catalog, &self.dictionary);
        for (key, value) in &self.legacy_associations {
            table.register_legacy(catalog, key, value);
        }
        for (key, value) in &self.associations {
            table.register(catalog, key, value);
        }
        log::info!("Association table built with {} entries", table.len());
        table
    }

    /// Build tile effects. A group with a bad sound pattern is skipped.
    pub fn build_tile_effects(&self, catalog: &TileCatalog) -> TileEffectRegistry {
        let mut registry = TileEffectRegistry::new();
        for group in &self.tile_effects {
            if let Err(e) = registry.register(catalog, group) {
                log::warn!("Skipping tile effect group {:?}: {}", group.tiles, e);
            }
        }
        registry
    }

    /// Build the region sound scheduler. A region with a bad pattern is skipped.
    pub fn build_region_sounds(&self) -> AmbientSoundScheduler {
        let mut scheduler = AmbientSoundScheduler::new();
        for (region, sounds) in &self.region_sounds {
            if let Err(e) = scheduler.register(region, sounds) {
                log::warn!("Skipping sounds for region {}: {}", region, e);
            }
        }
        scheduler
    }
}
