//! Region classification: the climate facts the engine reads per world column.

/// Temperature at or below which a region counts as cold.
const COLD_TEMPERATURE: f32 = 0.2;
/// Temperature below which a region counts as medium.
const WARM_TEMPERATURE: f32 = 1.0;
/// Elevation above which temperature starts to drop.
const LAPSE_BASE_HEIGHT: i32 = 64;
/// Temperature lost per tile of elevation above `LAPSE_BASE_HEIGHT`.
const LAPSE_RATE: f32 = 0.05 / 30.0;

/// Coarse temperature bucket, emitted as a `tc*` condition token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TempCategory {
    Ocean,
    Cold,
    Medium,
    Warm,
}

impl TempCategory {
    pub fn from_temperature(temperature: f32) -> Self {
        if temperature < COLD_TEMPERATURE {
            TempCategory::Cold
        } else if temperature < WARM_TEMPERATURE {
            TempCategory::Medium
        } else {
            TempCategory::Warm
        }
    }

    /// Condition token, e.g. `tccold`.
    pub fn token(&self) -> &'static str {
        match self {
            TempCategory::Ocean => "tcocean",
            TempCategory::Cold => "tccold",
            TempCategory::Medium => "tcmedium",
            TempCategory::Warm => "tcwarm",
        }
    }
}

/// Climate description of a region.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub name: String,
    /// Base temperature at sea level.
    pub temperature: f32,
    /// Rainfall fraction; zero means dry.
    pub rainfall: f32,
    pub high_humidity: bool,
    /// Raises dust instead of rain.
    pub has_dust: bool,
    /// Intrinsic fog: fraction of the normal fog distance.
    pub fog_density: Option<f32>,
    pub ocean: bool,
}

impl Region {
    pub fn new(name: impl Into<String>, temperature: f32, rainfall: f32) -> Self {
        Self {
            name: name.into(),
            temperature,
            rainfall,
            high_humidity: false,
            has_dust: false,
            fog_density: None,
            ocean: false,
        }
    }

    pub fn with_humidity(mut self) -> Self {
        self.high_humidity = true;
        self
    }

    pub fn with_dust(mut self) -> Self {
        self.has_dust = true;
        self
    }

    pub fn with_fog(mut self, density: f32) -> Self {
        self.fog_density = Some(density);
        self
    }

    pub fn as_ocean(mut self) -> Self {
        self.ocean = true;
        self
    }

    /// Temperature at height `y`, cooling above the lapse base height.
    pub fn temperature_at(&self, y: i32) -> f32 {
        let above = (y - LAPSE_BASE_HEIGHT).max(0) as f32;
        self.temperature - above * LAPSE_RATE
    }

    pub fn temp_category(&self) -> TempCategory {
        if self.ocean {
            TempCategory::Ocean
        } else {
            TempCategory::from_temperature(self.temperature)
        }
    }

    #[inline]
    pub fn is_dry(&self) -> bool {
        self.rainfall == 0.0
    }

    #[inline]
    pub fn has_fog(&self) -> bool {
        self.fog_density.is_some()
    }

    /// Pseudo-region reported below the surface.
    pub fn underground() -> Self {
        Self::new(UNDERGROUND, 0.5, 0.0)
    }

    /// Pseudo-region reported inside the cloud layer.
    pub fn clouds() -> Self {
        Self::new(CLOUDS, 0.1, 0.5).with_fog(0.5)
    }

    /// Pseudo-region reported above the space height.
    pub fn outer_space() -> Self {
        Self::new(OUTER_SPACE, -1.0, 0.0)
    }

    /// True for the underground, clouds and outer space pseudo-regions.
    pub fn is_pseudo(&self) -> bool {
        matches!(self.name.as_str(), UNDERGROUND | CLOUDS | OUTER_SPACE)
    }
}

pub const UNDERGROUND: &str = "Underground";
pub const CLOUDS: &str = "Clouds";
pub const OUTER_SPACE: &str = "OuterSpace";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_categories() {
        assert_eq!(TempCategory::from_temperature(-0.5), TempCategory::Cold);
        assert_eq!(TempCategory::from_temperature(0.8), TempCategory::Medium);
        assert_eq!(TempCategory::from_temperature(2.0), TempCategory::Warm);
        assert_eq!(Region::new("Sea", 0.5, 0.5).as_ocean().temp_category(), TempCategory::Ocean);
    }

    #[test]
    fn test_elevation_cools() {
        let region = Region::new("Hills", 0.2, 0.3);
        assert_eq!(region.temperature_at(10), 0.2);
        assert!(region.temperature_at(200) < 0.15);
    }

    #[test]
    fn test_pseudo_regions() {
        assert!(Region::underground().is_pseudo());
        assert!(Region::clouds().has_fog());
        assert!(!Region::new("Plains", 0.8, 0.4).is_pseudo());
        assert!(Region::outer_space().is_dry());
    }
}
