//! Zone override records and resolved zone configuration.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::ZoneDescriptor;

/// Space height sits this far above the sky height.
pub const SPACE_HEIGHT_OFFSET: i32 = 32;

/// Profile record overriding a zone's defaults. Matched by id, else by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneOverride {
    pub zone_id: Option<i32>,
    pub name: Option<String>,
    pub sea_level: Option<i32>,
    pub sky_height: Option<i32>,
    pub cloud_height: Option<i32>,
    pub has_haze: Option<bool>,
    pub has_auroras: Option<bool>,
    pub has_weather: Option<bool>,
}

impl ZoneOverride {
    /// Records naming neither an id nor a name are ignored.
    pub fn is_addressed(&self) -> bool {
        self.zone_id.is_some() || self.name.is_some()
    }

    /// Same target zone as `other`, by id or by name.
    pub fn same_target(&self, other: &ZoneOverride) -> bool {
        (self.zone_id.is_some() && self.zone_id == other.zone_id)
            || (self.name.is_some() && self.name == other.name)
    }

    pub fn applies_to(&self, zone: &ZoneDescriptor) -> bool {
        self.zone_id == Some(zone.id) || self.name.as_deref() == Some(zone.name.as_str())
    }

    /// Fill fields that are still unset from `later`.
    pub fn fill_from(&mut self, later: &ZoneOverride) {
        fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(value);
            }
        }
        fill(&mut self.zone_id, &later.zone_id);
        fill(&mut self.name, &later.name);
        fill(&mut self.sea_level, &later.sea_level);
        fill(&mut self.sky_height, &later.sky_height);
        fill(&mut self.cloud_height, &later.cloud_height);
        fill(&mut self.has_haze, &later.has_haze);
        fill(&mut self.has_auroras, &later.has_auroras);
        fill(&mut self.has_weather, &later.has_weather);
    }
}

/// Fully resolved zone configuration. Never changes once built.
#[derive(Clone, Debug)]
pub struct ZoneConfig {
    pub id: i32,
    pub name: String,
    pub sea_level: i32,
    pub sky_height: i32,
    pub cloud_height: i32,
    pub space_height: i32,
    pub has_haze: bool,
    pub has_auroras: bool,
    pub has_weather: bool,
}

impl ZoneConfig {
    /// Host defaults with the override applied where it has values.
    pub fn resolve(zone: &ZoneDescriptor, overrides: Option<&ZoneOverride>) -> Self {
        let o = overrides.cloned().unwrap_or_default();
        let sky_height = o.sky_height.unwrap_or(zone.height);
        let has_haze = o.has_haze.unwrap_or(zone.has_sky);
        let cloud_height = o
            .cloud_height
            .unwrap_or(if has_haze { sky_height / 2 } else { sky_height });

        Self {
            id: zone.id,
            name: zone.name.clone(),
            sea_level: o.sea_level.unwrap_or(zone.average_ground_level),
            sky_height,
            cloud_height,
            space_height: sky_height + SPACE_HEIGHT_OFFSET,
            has_haze,
            has_auroras: o.has_auroras.unwrap_or(zone.has_sky),
            has_weather: o.has_weather.unwrap_or(zone.has_sky),
        }
    }
}

impl fmt::Display for ZoneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: seaLevel:{} cloudH:{} skyH:{} haze:{} aurora:{} weather:{}",
            self.id,
            self.name,
            self.sea_level,
            self.cloud_height,
            self.sky_height,
            self.has_haze,
            self.has_auroras,
            self.has_weather
        )
    }
}

impl PartialEq for ZoneConfig {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for ZoneConfig {}

impl PartialOrd for ZoneConfig {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZoneConfig {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id).then_with(|| self.name.cmp(&other.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_host() {
        let zone = ZoneDescriptor::new(0, "Overworld");
        let config = ZoneConfig::resolve(&zone, None);
        assert_eq!(config.sea_level, 64);
        assert_eq!(config.sky_height, 256);
        assert_eq!(config.cloud_height, 128);
        assert_eq!(config.space_height, 288);
        assert!(config.has_haze && config.has_auroras && config.has_weather);
    }

    #[test]
    fn test_no_sky_zone() {
        let mut zone = ZoneDescriptor::new(-1, "Nether");
        zone.has_sky = false;
        zone.height = 128;
        let config = ZoneConfig::resolve(&zone, None);
        assert!(!config.has_haze && !config.has_weather);
        assert_eq!(config.cloud_height, 128);
    }

    #[test]
    fn test_partial_override() {
        let zone = ZoneDescriptor::new(0, "Overworld");
        let o = ZoneOverride { zone_id: Some(0), sea_level: Some(40), ..Default::default() };
        let config = ZoneConfig::resolve(&zone, Some(&o));
        assert_eq!(config.sea_level, 40);
        assert_eq!(config.sky_height, 256);
    }

    #[test]
    fn test_explicit_cloud_height() {
        let zone = ZoneDescriptor::new(0, "Overworld");
        let o = ZoneOverride { cloud_height: Some(200), has_haze: Some(true), ..Default::default() };
        assert_eq!(ZoneConfig::resolve(&zone, Some(&o)).cloud_height, 200);
    }

    #[test]
    fn test_fill_keeps_first_values() {
        let mut first = ZoneOverride { zone_id: Some(1), sea_level: Some(30), ..Default::default() };
        let later = ZoneOverride {
            zone_id: Some(1),
            sea_level: Some(90),
            has_haze: Some(false),
            ..Default::default()
        };
        assert!(first.same_target(&later));
        first.fill_from(&later);
        assert_eq!(first.sea_level, Some(30));
        assert_eq!(first.has_haze, Some(false));
    }

    #[test]
    fn test_display_and_order() {
        let a = ZoneConfig::resolve(&ZoneDescriptor::new(1, "End"), None);
        let b = ZoneConfig::resolve(&ZoneDescriptor::new(0, "Overworld"), None);
        assert_eq!(
            b.to_string(),
            "0/Overworld: seaLevel:64 cloudH:128 skyH:256 haze:true aurora:true weather:true"
        );
        assert!(b < a);
    }
}
