//! Per-zone configuration: host defaults merged with profile overrides.

pub mod config;
pub mod registry;

pub use config::{ZoneConfig, ZoneOverride, SPACE_HEIGHT_OFFSET};
pub use registry::{season, ZoneRegistry, NO_SEASON};
