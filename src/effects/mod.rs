//! Sound and particle effects: candidates, selection, throttling and output.

pub mod candidate;
pub mod library;
pub mod particles;
pub mod registry;
pub mod selection;
pub mod sink;
pub mod throttle;

pub use candidate::{EffectCandidate, EffectKind, SoundConfig, MATCH_ALL, PITCH_DELTAS};
pub use library::{SoundHandle, SoundLibrary};
pub use particles::{run_chain, Clearance, JetConfig, ParticleJet, ParticleKind, TileEffect};
pub use registry::{TileEffectRegistry, TileEffects, TileEffectsConfig, DEFAULT_SOUND_CHANCE};
pub use selection::EffectSet;
pub use sink::{EffectSink, LogSink, RecordingSink, SinkEvent};
pub use throttle::EffectThrottle;
