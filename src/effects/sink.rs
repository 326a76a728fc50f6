//! Output side of the engine: where selected effects are sent.

use glam::{IVec3, Vec3};

use super::candidate::EffectCandidate;
use super::particles::ParticleKind;

/// Receives effects chosen by the engine. Hosts route these to their audio
/// and particle systems.
pub trait EffectSink {
    /// Play an effect at a tile position.
    fn play_at(&mut self, effect: &EffectCandidate, pitch: f32, pos: IVec3);

    /// Play an effect at the observer.
    fn play(&mut self, effect: &EffectCandidate, pitch: f32);

    /// Stop a looping effect started with [`play`](Self::play).
    fn stop(&mut self, _effect: &EffectCandidate) {}

    fn spawn_particle(&mut self, _kind: ParticleKind, _pos: Vec3) {}
}

/// One call received by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Positioned { name: String, volume: f32, pitch: f32, pos: IVec3 },
    Observer { name: String, volume: f32, pitch: f32 },
    Stopped { name: String },
    Particle { kind: ParticleKind, pos: Vec3 },
}

impl SinkEvent {
    pub fn name(&self) -> Option<&str> {
        match self {
            SinkEvent::Positioned { name, .. } | SinkEvent::Observer { name, .. } => Some(name),
            SinkEvent::Stopped { .. } | SinkEvent::Particle { .. } => None,
        }
    }
}

/// Sink that keeps every call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all sounds played, in order.
    pub fn sound_names(&self) -> Vec<&str> {
        self.events.iter().filter_map(SinkEvent::name).collect()
    }

    pub fn particle_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Particle { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EffectSink for RecordingSink {
    fn play_at(&mut self, effect: &EffectCandidate, pitch: f32, pos: IVec3) {
        self.events.push(SinkEvent::Positioned {
            name: effect.name().to_string(),
            volume: effect.volume(),
            pitch,
            pos,
        });
    }

    fn play(&mut self, effect: &EffectCandidate, pitch: f32) {
        self.events.push(SinkEvent::Observer {
            name: effect.name().to_string(),
            volume: effect.volume(),
            pitch,
        });
    }

    fn stop(&mut self, effect: &EffectCandidate) {
        self.events.push(SinkEvent::Stopped { name: effect.name().to_string() });
    }

    fn spawn_particle(&mut self, kind: ParticleKind, pos: Vec3) {
        self.events.push(SinkEvent::Particle { kind, pos });
    }
}

/// Sink that logs effects at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EffectSink for LogSink {
    fn play_at(&mut self, effect: &EffectCandidate, pitch: f32, pos: IVec3) {
        log::trace!("play {} at {} (pitch {:.2})", effect, pos, pitch);
    }

    fn play(&mut self, effect: &EffectCandidate, pitch: f32) {
        log::trace!("play {} (pitch {:.2})", effect, pitch);
    }

    fn stop(&mut self, effect: &EffectCandidate) {
        log::trace!("stop {}", effect.name());
    }

    fn spawn_particle(&mut self, kind: ParticleKind, pos: Vec3) {
        log::trace!("particle {:?} at {}", kind, pos);
    }
}
