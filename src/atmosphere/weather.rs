//! Weather intensity state machine.
//!
//! The weather authority pushes a raw level in `[0, 1]` (or [`USE_HOST_DEFAULT`]).
//! The level is clamped into the zone's bounds and classified into a
//! [`WeatherBucket`], which selects the active precipitation resources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw level meaning "let the host render its own weather".
pub const USE_HOST_DEFAULT: f32 = -10.0;

/// Fog density curve: `(level + FOG_OFFSET)^2 * FOG_SCALE`.
pub const FOG_OFFSET: f32 = 0.01;
pub const FOG_SCALE: f32 = 0.13;

/// Volume used for storm sounds while the host renders its own weather.
pub const HOST_DEFAULT_VOLUME: f32 = 0.66;

pub const STORM_SOUND: &str = "ambience:rain";
pub const DUST_SOUND: &str = "ambience:dust";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeatherBucket {
    /// Host default weather.
    #[default]
    Disabled,
    None,
    Calm,
    Light,
    Normal,
    Heavy,
}

struct BucketSpec {
    bucket: WeatherBucket,
    threshold: f32,
    suffix: &'static str,
}

/// Bucket table in threshold order.
const BUCKETS: [BucketSpec; 6] = [
    BucketSpec { bucket: WeatherBucket::Disabled, threshold: USE_HOST_DEFAULT, suffix: "calm" },
    BucketSpec { bucket: WeatherBucket::None, threshold: 0.0, suffix: "calm" },
    BucketSpec { bucket: WeatherBucket::Calm, threshold: 0.1, suffix: "calm" },
    BucketSpec { bucket: WeatherBucket::Light, threshold: 0.33, suffix: "light" },
    BucketSpec { bucket: WeatherBucket::Normal, threshold: 0.66, suffix: "normal" },
    BucketSpec { bucket: WeatherBucket::Heavy, threshold: 1.0, suffix: "heavy" },
];

impl WeatherBucket {
    fn spec(self) -> &'static BucketSpec {
        &BUCKETS[self as usize]
    }

    pub fn threshold(self) -> f32 {
        self.spec().threshold
    }

    /// Resource-name suffix (`calm`, `light`, `normal`, `heavy`).
    pub fn suffix(self) -> &'static str {
        self.spec().suffix
    }

    /// Classify a clamped level. Zero or below is `None`; otherwise the first
    /// bucket whose threshold the level is strictly below, else `Heavy`.
    pub fn classify(level: f32) -> Self {
        if level <= WeatherBucket::None.threshold() {
            return WeatherBucket::None;
        }
        BUCKETS[2..]
            .iter()
            .find(|spec| level < spec.threshold)
            .map_or(WeatherBucket::Heavy, |spec| spec.bucket)
    }

    pub fn name(self) -> &'static str {
        match self {
            WeatherBucket::Disabled => "DISABLED",
            WeatherBucket::None => "NONE",
            WeatherBucket::Calm => "CALM",
            WeatherBucket::Light => "LIGHT",
            WeatherBucket::Normal => "NORMAL",
            WeatherBucket::Heavy => "HEAVY",
        }
    }
}

impl fmt::Display for WeatherBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Precipitation textures for a bucket. `None` means the host's own texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherTextures {
    pub rain: Option<String>,
    pub snow: Option<String>,
    pub dust: String,
}

impl WeatherTextures {
    pub fn for_bucket(bucket: WeatherBucket) -> Self {
        let suffix = bucket.suffix();
        let texture = |kind: &str| format!("textures/environment/{kind}_{suffix}.png");
        let host = bucket == WeatherBucket::Disabled;
        Self {
            rain: (!host).then(|| texture("rain")),
            snow: (!host).then(|| texture("snow")),
            dust: texture("dust"),
        }
    }
}

/// Inclusive clamp range for authority levels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherBounds {
    pub min: f32,
    pub max: f32,
}

impl WeatherBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max: max.max(min) }
    }

    pub fn clamp(&self, level: f32) -> f32 {
        level.clamp(self.min, self.max)
    }
}

impl Default for WeatherBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Result of pushing a raw level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherUpdate {
    /// Stored level unchanged; nothing to do.
    Unchanged,
    /// Level and fog density changed within the same bucket.
    Level,
    /// Bucket changed; precipitation resources must be refreshed.
    Bucket,
}

impl WeatherUpdate {
    pub fn needs_refresh(&self) -> bool {
        matches!(self, WeatherUpdate::Bucket)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherIntensity {
    bucket: WeatherBucket,
    level: f32,
    fog_density: f32,
}

impl Default for WeatherIntensity {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherIntensity {
    /// Starts on the host default.
    pub fn new() -> Self {
        Self {
            bucket: WeatherBucket::Disabled,
            level: 0.0,
            fog_density: 0.0,
        }
    }

    /// Push a raw level from the weather authority.
    pub fn set_intensity(&mut self, raw: f32, bounds: WeatherBounds) -> WeatherUpdate {
        if raw == USE_HOST_DEFAULT {
            let was = self.bucket;
            *self = Self::new();
            return if was == WeatherBucket::Disabled {
                WeatherUpdate::Unchanged
            } else {
                log::debug!("Weather intensity: host default");
                WeatherUpdate::Bucket
            };
        }

        let level = bounds.clamp(raw);
        if level == self.level && self.bucket != WeatherBucket::Disabled {
            return WeatherUpdate::Unchanged;
        }

        self.level = level;
        self.fog_density = fog_density(level);
        let bucket = WeatherBucket::classify(level);
        if bucket == self.bucket {
            return WeatherUpdate::Level;
        }
        log::debug!("Weather intensity: {} -> {} (level {:.2})", self.bucket, bucket, level);
        self.bucket = bucket;
        WeatherUpdate::Bucket
    }

    pub fn bucket(&self) -> WeatherBucket {
        self.bucket
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn fog_density(&self) -> f32 {
        self.fog_density
    }

    pub fn is_host_default(&self) -> bool {
        self.bucket == WeatherBucket::Disabled
    }

    pub fn is_raining(&self) -> bool {
        self.level > 0.0
    }

    pub fn textures(&self) -> WeatherTextures {
        WeatherTextures::for_bucket(self.bucket)
    }

    pub fn storm_sound(&self) -> &'static str {
        STORM_SOUND
    }

    pub fn dust_sound(&self) -> &'static str {
        DUST_SOUND
    }

    /// Storm sound volume for the configured sound level.
    pub fn current_volume(&self, sound_level: f32) -> f32 {
        let base = if self.is_host_default() { HOST_DEFAULT_VOLUME } else { self.level };
        base * sound_level
    }

    /// `Storm: <BUCKET> level:<l> str:<host rain strength>`
    pub fn diagnostic(&self, rain_strength: f32) -> String {
        format!("Storm: {} level:{:.2} str:{:.2}", self.bucket, self.level, rain_strength)
    }
}

/// Fog density for a clamped level.
pub fn fog_density(level: f32) -> f32 {
    if level > 0.0 {
        let l = level + FOG_OFFSET;
        l * l * FOG_SCALE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WeatherBounds {
        WeatherBounds::default()
    }

    #[test]
    fn test_bucket_sequence_is_monotonic() {
        let mut weather = WeatherIntensity::new();
        let levels = [0.0, 0.05, 0.1, 0.4, 0.7, 1.0];
        let expected = [
            WeatherBucket::None,
            WeatherBucket::Calm,
            WeatherBucket::Light,
            WeatherBucket::Normal,
            WeatherBucket::Heavy,
            WeatherBucket::Heavy,
        ];
        let mut last = WeatherBucket::Disabled;
        for (level, bucket) in levels.iter().zip(expected) {
            weather.set_intensity(*level, bounds());
            assert_eq!(weather.bucket(), bucket, "level {level}");
            assert!(weather.bucket() >= last);
            last = weather.bucket();
        }
    }

    #[test]
    fn test_same_level_twice_is_unchanged() {
        let mut weather = WeatherIntensity::new();
        assert_eq!(weather.set_intensity(0.5, bounds()), WeatherUpdate::Bucket);
        assert_eq!(weather.set_intensity(0.5, bounds()), WeatherUpdate::Unchanged);
        assert_eq!(weather.set_intensity(0.6, bounds()), WeatherUpdate::Level);
        assert!(!WeatherUpdate::Level.needs_refresh());
    }

    #[test]
    fn test_host_default_resets() {
        let mut weather = WeatherIntensity::new();
        weather.set_intensity(0.8, bounds());
        assert!(weather.fog_density() > 0.0);

        let update = weather.set_intensity(USE_HOST_DEFAULT, bounds());
        assert!(update.needs_refresh());
        assert_eq!(weather.bucket(), WeatherBucket::Disabled);
        assert_eq!(weather.level(), 0.0);
        assert_eq!(weather.fog_density(), 0.0);
        assert_eq!(weather.set_intensity(USE_HOST_DEFAULT, bounds()), WeatherUpdate::Unchanged);
    }

    #[test]
    fn test_leaving_host_default_at_zero() {
        let mut weather = WeatherIntensity::new();
        assert_eq!(weather.set_intensity(0.0, bounds()), WeatherUpdate::Bucket);
        assert_eq!(weather.bucket(), WeatherBucket::None);
    }

    #[test]
    fn test_clamped_into_bounds() {
        let mut weather = WeatherIntensity::new();
        let bounds = WeatherBounds::new(0.2, 0.5);
        weather.set_intensity(0.9, bounds);
        assert!((weather.level() - 0.5).abs() < 1e-6);
        weather.set_intensity(0.0, bounds);
        assert!((weather.level() - 0.2).abs() < 1e-6);
        assert_eq!(weather.bucket(), WeatherBucket::Light);
    }

    #[test]
    fn test_fog_density_curve() {
        assert_eq!(fog_density(0.0), 0.0);
        assert!((fog_density(1.0) - 1.01 * 1.01 * 0.13).abs() < 1e-6);
        assert!(fog_density(0.5) < fog_density(0.6));
    }

    #[test]
    fn test_textures_and_volume() {
        let mut weather = WeatherIntensity::new();
        let host = weather.textures();
        assert_eq!(host.rain, None);
        assert_eq!(host.dust, "textures/environment/dust_calm.png");
        assert!((weather.current_volume(1.0) - HOST_DEFAULT_VOLUME).abs() < 1e-6);

        weather.set_intensity(0.7, bounds());
        let heavy = weather.textures();
        assert_eq!(heavy.rain.as_deref(), Some("textures/environment/rain_heavy.png"));
        assert_eq!(heavy.snow.as_deref(), Some("textures/environment/snow_heavy.png"));
        assert!((weather.current_volume(0.5) - 0.35).abs() < 1e-6);
        assert_eq!(weather.diagnostic(1.0), "Storm: HEAVY level:0.70 str:1.00");
    }
}
