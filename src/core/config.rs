//! Engine-wide tunables.

use serde::{Deserialize, Serialize};

/// Configuration for the ambience engine. Every field has a default so a
/// profile only needs to name what it changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Radius (in tiles) of the spatial effect sampler.
    pub effect_range: i32,
    /// Health at or below which the observer counts as hurt.
    pub hurt_threshold: f32,
    /// Food level at or below which the observer counts as hungry.
    pub hunger_threshold: i32,
    /// Sample tiles around the observer for effects and spot sounds.
    pub enable_block_effects: bool,
    /// Play step sounds for the tile under a moving observer.
    pub enable_step_sounds: bool,
    /// Play periodic/background sounds registered per region.
    pub enable_region_sounds: bool,
    /// Play jump/swing/craft/bow sounds.
    pub enable_event_sounds: bool,
    /// Minimum ticks between two crafting sounds.
    pub craft_sound_cooldown_ticks: u64,
    /// Lower clamp for the weather intensity pushed by the authority.
    pub weather_min: f32,
    /// Upper clamp for the weather intensity pushed by the authority.
    pub weather_max: f32,
    /// Master sound level applied to weather sounds.
    pub sound_level: f32,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            effect_range: 24,
            hurt_threshold: 6.0,
            hunger_threshold: 8,
            enable_block_effects: true,
            enable_step_sounds: true,
            enable_region_sounds: true,
            enable_event_sounds: true,
            craft_sound_cooldown_ticks: 30,
            weather_min: 0.0,
            weather_max: 1.0,
            sound_level: 1.0,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{ "effect_range": 8 }"#).unwrap();
        assert_eq!(cfg.effect_range, 8);
        assert_eq!(cfg.hunger_threshold, 8);
        assert!(cfg.enable_step_sounds);
        assert_eq!(cfg.rng_seed, None);
    }
}
