//! Memoized per-zone configuration.

use std::collections::HashMap;

use super::config::{ZoneConfig, ZoneOverride};
use crate::world::{WorldView, ZoneDescriptor};

/// Season token when the host has no calendar.
pub const NO_SEASON: &str = "noseason";

const SEPARATOR: char = '#';

#[derive(Debug, Default)]
pub struct ZoneRegistry {
    overrides: Vec<ZoneOverride>,
    zones: HashMap<i32, ZoneConfig>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add override records. The first record for a zone wins; later records
    /// only fill fields it left unset.
    pub fn process(&mut self, records: &[ZoneOverride]) {
        for record in records.iter().filter(|r| r.is_addressed()) {
            match self.overrides.iter_mut().find(|o| o.same_target(record)) {
                Some(existing) => existing.fill_from(record),
                None => self.overrides.push(record.clone()),
            }
        }
    }

    /// Resolved configuration for a zone, built on first access.
    pub fn get(&mut self, zone: &ZoneDescriptor) -> &ZoneConfig {
        let overrides = &self.overrides;
        self.zones.entry(zone.id).or_insert_with(|| {
            let found = overrides
                .iter()
                .find(|o| o.zone_id == Some(zone.id))
                .or_else(|| overrides.iter().find(|o| o.applies_to(zone)));
            let config = ZoneConfig::resolve(zone, found);
            log::info!("Zone initialized {}", config);
            config
        })
    }

    /// Already-resolved configuration, if any.
    pub fn find(&self, id: i32) -> Option<&ZoneConfig> {
        self.zones.get(&id)
    }

    /// Host finished loading a zone.
    pub fn on_world_load(&mut self, zone: &ZoneDescriptor) {
        self.get(zone);
    }

    /// Sea level, except that a flat overworld always reports 0.
    pub fn sea_level(&mut self, zone: &ZoneDescriptor) -> i32 {
        if zone.id == 0 && zone.flat {
            return 0;
        }
        self.get(zone).sea_level
    }

    /// `#day|night#<zone>[#raining]#<season>#`
    pub fn conditions(&mut self, world: &dyn WorldView) -> String {
        let zone = world.zone();
        self.get(zone);

        let mut tags = String::with_capacity(48);
        tags.push(SEPARATOR);
        tags.push_str(if world.is_daytime() { "day" } else { "night" });
        tags.push(SEPARATOR);
        tags.push_str(&zone.name);
        if world.rain_strength() > 0.0 {
            tags.push(SEPARATOR);
            tags.push_str("raining");
        }
        tags.push(SEPARATOR);
        tags.push_str(season(world));
        tags.push(SEPARATOR);
        tags
    }

    /// Initialized zones, sorted by id then name.
    pub fn dump(&self) -> Vec<String> {
        let mut zones: Vec<&ZoneConfig> = self.zones.values().collect();
        zones.sort();
        zones.into_iter().map(ZoneConfig::to_string).collect()
    }

    pub fn log_dump(&self) {
        log::info!("*** ZONE REGISTRY ***");
        for line in self.dump() {
            log::info!("{}", line);
        }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

pub fn season(world: &dyn WorldView) -> &str {
    world.season().unwrap_or(NO_SEASON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FlatWorld;

    #[test]
    fn test_memoized() {
        let mut registry = ZoneRegistry::new();
        let zone = ZoneDescriptor::new(0, "Overworld");
        let first = registry.get(&zone).clone();
        let mut changed = zone.clone();
        changed.height = 512;
        let second = registry.get(&changed);
        assert_eq!(first.cloud_height, second.cloud_height);
        assert_eq!(first.space_height, second.space_height);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sea_level_override_keeps_sky_default() {
        let mut registry = ZoneRegistry::new();
        registry.process(&[ZoneOverride { zone_id: Some(0), sea_level: Some(50), ..Default::default() }]);
        let config = registry.get(&ZoneDescriptor::new(0, "Overworld"));
        assert_eq!(config.sea_level, 50);
        assert_eq!(config.sky_height, 256);
    }

    #[test]
    fn test_first_record_wins() {
        let mut registry = ZoneRegistry::new();
        registry.process(&[ZoneOverride { zone_id: Some(7), sea_level: Some(10), ..Default::default() }]);
        registry.process(&[ZoneOverride {
            zone_id: Some(7),
            sea_level: Some(99),
            sky_height: Some(300),
            ..Default::default()
        }]);
        let config = registry.get(&ZoneDescriptor::new(7, "Mining"));
        assert_eq!(config.sea_level, 10);
        assert_eq!(config.sky_height, 300);
    }

    #[test]
    fn test_match_by_name() {
        let mut registry = ZoneRegistry::new();
        registry.process(&[ZoneOverride {
            name: Some("Twilight".into()),
            has_weather: Some(false),
            ..Default::default()
        }]);
        assert!(!registry.get(&ZoneDescriptor::new(7, "Twilight")).has_weather);
        assert!(registry.get(&ZoneDescriptor::new(8, "Other")).has_weather);
    }

    #[test]
    fn test_unaddressed_records_ignored() {
        let mut registry = ZoneRegistry::new();
        registry.process(&[ZoneOverride { sea_level: Some(1), ..Default::default() }]);
        assert_eq!(registry.get(&ZoneDescriptor::new(0, "Overworld")).sea_level, 64);
    }

    #[test]
    fn test_flat_overworld_sea_level() {
        let mut registry = ZoneRegistry::new();
        let mut zone = ZoneDescriptor::new(0, "Overworld");
        zone.flat = true;
        registry.on_world_load(&zone);
        assert_eq!(registry.sea_level(&zone), 0);

        let other = ZoneDescriptor { flat: true, ..ZoneDescriptor::new(3, "Flatland") };
        assert_eq!(registry.sea_level(&other), 64);

        // A fresh registry that never saw the load still knows.
        assert_eq!(ZoneRegistry::new().sea_level(&zone), 0);
    }

    #[test]
    fn test_conditions() {
        let mut registry = ZoneRegistry::new();
        let mut world = FlatWorld::new();
        assert_eq!(registry.conditions(&world), "#day#Overworld#noseason#");

        world.daytime = false;
        world.rain = 0.3;
        world.season = Some("winter".into());
        assert_eq!(registry.conditions(&world), "#night#Overworld#raining#winter#");
    }

    #[test]
    fn test_dump_sorted() {
        let mut registry = ZoneRegistry::new();
        registry.get(&ZoneDescriptor::new(1, "End"));
        registry.get(&ZoneDescriptor::new(-1, "Nether"));
        registry.get(&ZoneDescriptor::new(0, "Overworld"));
        let dump = registry.dump();
        assert!(dump[0].starts_with("-1/Nether"));
        assert!(dump[2].starts_with("1/End"));
    }
}
