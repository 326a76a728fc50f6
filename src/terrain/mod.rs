//! Region classification and a procedural world built on it

pub mod region;
pub use region::{Region, TempCategory, CLOUDS, OUTER_SPACE, UNDERGROUND};

pub mod biome;
pub use biome::{Biome, BiomeMap};

pub mod world;
pub use world::{NoiseWorld, TerrainParams, DAY_LENGTH};
