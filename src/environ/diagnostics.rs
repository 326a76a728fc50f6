//! Debug overlay lines. Human-readable only; the format may change.

use super::sampler::EnvironSnapshot;
use crate::atmosphere::WeatherIntensity;

pub fn diagnostics(snapshot: &EnvironSnapshot, weather: &WeatherIntensity) -> Vec<String> {
    let o = &snapshot.observer;
    vec![
        format!("Dim: {}/{}", snapshot.zone_id, snapshot.zone_name),
        format!("Player: h {}/{}; f {}; s {}", o.health, o.max_health, o.food_level, o.saturation),
        weather.diagnostic(snapshot.rain_strength),
        format!("Biome: {}", snapshot.region.name),
        format!("Conditions: {}", snapshot.conditions),
    ]
}
