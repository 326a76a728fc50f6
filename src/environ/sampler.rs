//! Once-per-tick snapshot of everything the effect systems read.

use glam::IVec3;

use super::tagger::{ConditionTagger, ObserverPredicates};
use crate::terrain::Region;
use crate::world::{ObserverStatus, WorldView};
use crate::zone::{ZoneConfig, ZoneRegistry};

/// Depth below sea level at which the observer counts as underground.
pub const UNDERGROUND_DEPTH: i32 = 8;

/// Immutable facts for one tick.
#[derive(Clone, Debug)]
pub struct EnvironSnapshot {
    pub tick: u64,
    pub position: IVec3,
    /// Region as the effect systems see it; may be a pseudo-region.
    pub region: Region,
    /// Region the host reports for the observer's column.
    pub true_region: Region,
    pub predicates: ObserverPredicates,
    pub zone_id: i32,
    pub zone_name: String,
    pub rain_strength: f32,
    pub conditions: String,
    pub observer: ObserverStatus,
}

impl EnvironSnapshot {
    pub fn is_freezing(&self) -> bool {
        self.predicates.freezing
    }

    pub fn is_humid(&self) -> bool {
        self.predicates.humid
    }

    pub fn is_dry(&self) -> bool {
        self.predicates.dry
    }

    pub fn is_foggy(&self) -> bool {
        self.predicates.fog
    }

    pub fn is_inside(&self) -> bool {
        self.predicates.inside
    }

    pub fn is_underground(&self) -> bool {
        self.region.name == crate::terrain::region::UNDERGROUND
    }

    /// Grounded and moved since the previous tick.
    pub fn is_walking(&self) -> bool {
        self.observer.on_ground && self.observer.moved
    }
}

/// Gathers world and observer state once per tick.
#[derive(Debug, Default)]
pub struct PerTickStateSampler {
    tagger: ConditionTagger,
    snapshot: Option<EnvironSnapshot>,
    ticks: u64,
}

impl PerTickStateSampler {
    pub fn new(tagger: ConditionTagger) -> Self {
        Self {
            tagger,
            snapshot: None,
            ticks: 0,
        }
    }

    /// Take a new snapshot. Must run before anything else reads tick state.
    pub fn refresh(
        &mut self,
        world: &dyn WorldView,
        observer: &ObserverStatus,
        zones: &mut ZoneRegistry,
    ) -> &EnvironSnapshot {
        self.ticks += 1;
        let position = observer.position.floor().as_ivec3();
        let descriptor = world.zone();
        let sea_level = zones.sea_level(descriptor);
        let zone = zones.get(descriptor).clone();

        let true_region = world.region_at(position.x, position.z).clone();
        let region = effective_region(&true_region, &zone, sea_level, position.y);
        let temperature = world.temperature_at(position);
        let predicates = self.tagger.predicates(observer, &true_region, temperature);
        let conditions = self.tagger.tag_string(&zones.conditions(world), &predicates);

        log::trace!("tick {} conditions {}", self.ticks, conditions);

        self.snapshot.insert(EnvironSnapshot {
            tick: self.ticks,
            position,
            region,
            true_region,
            predicates,
            zone_id: zone.id,
            zone_name: zone.name,
            rain_strength: world.rain_strength(),
            conditions,
            observer: observer.clone(),
        })
    }

    /// Snapshot from the last refresh.
    pub fn snapshot(&self) -> Option<&EnvironSnapshot> {
        self.snapshot.as_ref()
    }

    /// Number of refreshes so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Forget the snapshot, e.g. when the world unloads.
    pub fn reset(&mut self) {
        self.snapshot = None;
    }
}

/// Pseudo-region for the observer's height, or the true region.
pub fn effective_region(true_region: &Region, zone: &ZoneConfig, sea_level: i32, y: i32) -> Region {
    if zone.has_haze && y >= zone.space_height {
        Region::outer_space()
    } else if zone.has_haze && y >= zone.cloud_height {
        Region::clouds()
    } else if y < sea_level - UNDERGROUND_DEPTH {
        Region::underground()
    } else {
        true_region.clone()
    }
}
