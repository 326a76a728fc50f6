//! Region ambience: looping background sounds, periodic sounds and
//! occasional spot sounds chosen by the observer's region and conditions.

use std::collections::HashMap;

use rand::Rng;

use crate::core::Result;
use crate::effects::{EffectCandidate, EffectKind, EffectSet, EffectSink, EffectThrottle, SoundConfig};
use crate::environ::EnvironSnapshot;

/// A region spot sound is attempted once in this many ticks on average.
pub const SPOT_SOUND_CHANCE: u32 = 75;

/// Schedules region sounds tick by tick.
#[derive(Debug, Default)]
pub struct AmbientSoundScheduler {
    regions: HashMap<String, EffectSet>,
    throttle: EffectThrottle,
    /// Background loops started and still wanted.
    active: Vec<EffectCandidate>,
}

impl AmbientSoundScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add sound records for a region name.
    pub fn register(&mut self, region: &str, records: &[SoundConfig]) -> Result<()> {
        let sounds = records
            .iter()
            .map(EffectCandidate::from_config)
            .collect::<Result<Vec<_>>>()?;
        let set = self.regions.entry(region.to_string()).or_default();
        for sound in sounds {
            set.add(sound);
        }
        Ok(())
    }

    pub fn sounds_for(&self, region: &str) -> Option<&EffectSet> {
        self.regions.get(region)
    }

    pub fn active(&self) -> &[EffectCandidate] {
        &self.active
    }

    /// Update background loops, then play due periodic and spot sounds.
    pub fn update<R: Rng>(&mut self, snapshot: &EnvironSnapshot, sink: &mut dyn EffectSink, rng: &mut R) {
        let tick = snapshot.tick;
        let tags = snapshot.conditions.as_str();
        let empty = EffectSet::new();
        let set = self.regions.get(&snapshot.region.name).unwrap_or(&empty);

        let wanted: Vec<&EffectCandidate> = set.matching(tags, EffectKind::Background).collect();
        for stale in self.active.iter().filter(|a| !wanted.contains(a)) {
            sink.stop(stale);
        }
        self.active.retain(|a| wanted.contains(&a));
        // A loop held back by its repeat delay is retried on later ticks.
        for fresh in wanted {
            if self.active.contains(fresh) || !self.throttle.is_ready(fresh, tick) {
                continue;
            }
            sink.play(fresh, fresh.pitch(rng));
            self.throttle.arm(fresh, tick, rng);
            self.active.push(fresh.clone());
        }

        for sound in set.matching(tags, EffectKind::Periodic) {
            if self.throttle.is_ready(sound, tick) {
                sink.play(sound, sound.pitch(rng));
                self.throttle.arm(sound, tick, rng);
            }
        }

        if rng.gen_range(0..SPOT_SOUND_CHANCE) == 0 {
            if let Some(sound) = set.select(tags, EffectKind::OneShot, rng) {
                sink.play(sound, sound.pitch(rng));
            }
        }

        if tick % 1200 == 0 {
            self.throttle.prune(tick);
        }
    }

    /// Stop every loop, e.g. on world unload or reload.
    pub fn stop_all(&mut self, sink: &mut dyn EffectSink) {
        for sound in self.active.drain(..) {
            sink.stop(&sound);
        }
        self.throttle.clear();
    }

    /// Drop all registered sounds and timers. Loops are forgotten, not stopped.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.active.clear();
        self.throttle.clear();
    }
}
