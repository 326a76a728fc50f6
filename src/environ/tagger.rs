//! Observer predicates and the condition tag string built from them.
//!
//! The tag string is the zone's tokens followed by the observer's, each
//! token prefixed with `#` in a fixed order, ending with a trailing `#`:
//!
//! ```text
//! #day#Overworld#noseason##burning#inwater#tcmedium#
//! ```
//!
//! Effect condition patterns are regular expressions over this string.

use crate::core::EngineConfig;
use crate::terrain::{Region, TempCategory};
use crate::world::{Mount, ObserverStatus};

/// True-region temperature below which the observer is freezing.
pub const FREEZING_TEMPERATURE: f32 = 0.15;

const SEPARATOR: char = '#';

/// Observer facts that produce condition tokens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObserverPredicates {
    pub hurt: bool,
    pub hungry: bool,
    pub burning: bool,
    pub no_air: bool,
    pub flying: bool,
    pub sprinting: bool,
    pub in_lava: bool,
    pub invisible: bool,
    pub blind: bool,
    pub in_water: bool,
    pub freezing: bool,
    pub fog: bool,
    pub humid: bool,
    pub dry: bool,
    pub inside: bool,
    pub mount: Option<Mount>,
    pub temp_category: Option<TempCategory>,
}

/// Derives predicates from host status and builds the tag string.
#[derive(Clone, Debug)]
pub struct ConditionTagger {
    hurt_threshold: f32,
    hunger_threshold: i32,
}

impl Default for ConditionTagger {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ConditionTagger {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            hurt_threshold: config.hurt_threshold,
            hunger_threshold: config.hunger_threshold,
        }
    }

    /// Predicates for an observer standing in `true_region` at `temperature`.
    /// Creative observers are never hurt or hungry.
    pub fn predicates(&self, observer: &ObserverStatus, true_region: &Region, temperature: f32) -> ObserverPredicates {
        ObserverPredicates {
            hurt: !observer.creative && observer.health <= self.hurt_threshold,
            hungry: !observer.creative && observer.food_level <= self.hunger_threshold,
            burning: observer.burning,
            no_air: observer.air <= 0,
            flying: observer.flying,
            sprinting: observer.sprinting,
            in_lava: observer.in_lava,
            invisible: observer.invisible,
            blind: observer.blind,
            in_water: observer.in_water,
            freezing: temperature < FREEZING_TEMPERATURE,
            fog: true_region.has_fog(),
            humid: true_region.high_humidity,
            dry: true_region.is_dry(),
            inside: observer.inside,
            mount: observer.mount,
            temp_category: Some(true_region.temp_category()),
        }
    }

    /// Observer part of the tag string, starting and ending with `#`.
    pub fn observer_tokens(&self, p: &ObserverPredicates) -> String {
        let flags = [
            (p.hurt, "hurt"),
            (p.hungry, "hungry"),
            (p.burning, "burning"),
            (p.no_air, "noair"),
            (p.flying, "flying"),
            (p.sprinting, "sprinting"),
            (p.in_lava, "inlava"),
            (p.invisible, "invisible"),
            (p.blind, "blind"),
            (p.in_water, "inwater"),
            (p.freezing, "freezing"),
            (p.fog, "fog"),
            (p.humid, "humid"),
            (p.dry, "dry"),
            (p.inside, "inside"),
        ];

        let mut tags = String::with_capacity(64);
        for (_, token) in flags.iter().filter(|(set, _)| *set) {
            tags.push(SEPARATOR);
            tags.push_str(token);
        }
        if let Some(mount) = p.mount {
            tags.push(SEPARATOR);
            tags.push_str(mount_token(mount));
        }
        tags.push(SEPARATOR);
        tags.push_str(p.temp_category.unwrap_or(TempCategory::Medium).token());
        tags.push(SEPARATOR);
        tags
    }

    /// Full tag string: zone tokens then observer tokens.
    pub fn tag_string(&self, zone_conditions: &str, predicates: &ObserverPredicates) -> String {
        let mut tags = String::from(zone_conditions);
        tags.push_str(&self.observer_tokens(predicates));
        tags
    }
}

fn mount_token(mount: Mount) -> &'static str {
    match mount {
        Mount::Minecart => "ridingminecart",
        Mount::Horse => "ridinghorse",
        Mount::Boat => "ridingboat",
        Mount::Pig => "ridingpig",
        Mount::Other => "riding",
    }
}
