//! Ambience - environmental effect resolution for tick-based voxel worlds

pub mod core;
pub mod world;
pub mod terrain;
pub mod tiles;
pub mod effects;
pub mod atmosphere;
pub mod zone;
pub mod environ;
pub mod fx;
pub mod command;
pub mod profile;
pub mod engine;
pub mod testing;
