//! Per-tick environment state: observer predicates, condition tags and the
//! snapshot every other system reads.

pub mod diagnostics;
pub mod sampler;
pub mod tagger;

pub use diagnostics::diagnostics;
pub use sampler::{effective_region, EnvironSnapshot, PerTickStateSampler, UNDERGROUND_DEPTH};
pub use tagger::{ConditionTagger, ObserverPredicates, FREEZING_TEMPERATURE};
