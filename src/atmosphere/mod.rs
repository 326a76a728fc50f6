//! Weather intensity and fog range.
//!
//! [`WeatherIntensity`] classifies the authority's weather level into a
//! bucket with its resources. [`FogRangeCalculator`] blends the host's fog
//! distance with the fog of the surrounding regions.

pub mod fog;
pub mod weather;

pub use fog::{FogMode, FogRangeCalculator, FogResult, DEFAULT_FOG_SCALE};
pub use weather::{
    WeatherBounds, WeatherBucket, WeatherIntensity, WeatherTextures, WeatherUpdate, USE_HOST_DEFAULT,
};
