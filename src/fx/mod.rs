//! Effect dispatch driven by the per-tick snapshot.

pub mod events;
pub mod region_sounds;
pub mod spatial;

pub use events::{EventSounds, ObserverEvent, Weapon};
pub use region_sounds::AmbientSoundScheduler;
pub use spatial::{sample_count, SampleStats, SpatialEffectSampler, SAMPLE_RATIO};
