//! Biome system based on temperature and moisture

use noise::{NoiseFn, Perlin};

use super::region::Region;

/// Biome types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Ocean,
    Beach,
    Desert,
    Grassland,
    Forest,
    Swamp,
    Taiga,
    Tundra,
    Mountains,
    Snow,
}

impl Biome {
    pub const ALL: [Biome; 10] = [
        Biome::Ocean,
        Biome::Beach,
        Biome::Desert,
        Biome::Grassland,
        Biome::Forest,
        Biome::Swamp,
        Biome::Taiga,
        Biome::Tundra,
        Biome::Mountains,
        Biome::Snow,
    ];

    /// Index into [`Biome::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Climate description used by the ambience engine.
    pub fn region(&self) -> Region {
        match self {
            Biome::Ocean => Region::new("Ocean", 0.5, 0.5).as_ocean(),
            Biome::Beach => Region::new("Beach", 0.8, 0.4),
            Biome::Desert => Region::new("Desert", 2.0, 0.0).with_dust(),
            Biome::Grassland => Region::new("Plains", 0.8, 0.4),
            Biome::Forest => Region::new("Forest", 0.7, 0.8),
            Biome::Swamp => Region::new("Swampland", 0.8, 0.9).with_humidity().with_fog(0.4),
            Biome::Taiga => Region::new("Taiga", 0.05, 0.8),
            Biome::Tundra => Region::new("Ice Plains", 0.0, 0.5),
            Biome::Mountains => Region::new("Extreme Hills", 0.2, 0.3),
            Biome::Snow => Region::new("Ice Mountains", -0.5, 0.5),
        }
    }

    /// Tile name of the top layer.
    pub fn surface_tile(&self) -> &'static str {
        match self {
            Biome::Ocean | Biome::Beach | Biome::Desert => "core:sand",
            Biome::Grassland | Biome::Forest | Biome::Swamp | Biome::Taiga => "core:grass",
            Biome::Tundra | Biome::Snow => "core:snow",
            Biome::Mountains => "core:stone",
        }
    }

    /// Tile name below the top layer.
    pub fn underground_tile(&self) -> &'static str {
        match self {
            Biome::Ocean | Biome::Beach | Biome::Desert => "core:sandstone",
            Biome::Grassland | Biome::Forest | Biome::Swamp | Biome::Taiga => "core:dirt",
            Biome::Tundra | Biome::Mountains | Biome::Snow => "core:stone",
        }
    }

    /// Whether this biome can have vegetation
    pub fn has_vegetation(&self) -> bool {
        matches!(
            self,
            Biome::Grassland | Biome::Forest | Biome::Swamp | Biome::Taiga
        )
    }
}

/// Biome map generator
pub struct BiomeMap {
    temperature_noise: Perlin,
    moisture_noise: Perlin,
    temp_scale: f32,
    moisture_scale: f32,
}

impl BiomeMap {
    /// Create new biome map with given seed
    pub fn new(seed: u32) -> Self {
        Self {
            temperature_noise: Perlin::new(seed),
            moisture_noise: Perlin::new(seed.wrapping_add(1000)),
            temp_scale: 0.004,     // Temperature zones a few hundred tiles across
            moisture_scale: 0.006, // Moisture varies a bit faster
        }
    }

    /// Get temperature at world position (-1 to 1, cold to hot)
    pub fn temperature_at(&self, x: f32, z: f32) -> f32 {
        let temp = self.temperature_noise.get([
            (x * self.temp_scale) as f64,
            (z * self.temp_scale) as f64,
        ]) as f32;

        // Latitude gradient: colder towards the edges
        let latitude_factor = (z * 0.0002).abs().min(1.0);
        temp - latitude_factor * 0.5
    }

    /// Get moisture at world position (0 to 1, dry to wet)
    pub fn moisture_at(&self, x: f32, z: f32) -> f32 {
        let moisture = self.moisture_noise.get([
            (x * self.moisture_scale) as f64,
            (z * self.moisture_scale) as f64,
        ]) as f32;

        (moisture + 1.0) * 0.5
    }

    /// Get biome at world position based on temp, moisture, and height
    pub fn biome_at(&self, x: f32, z: f32, height: f32, sea_level: f32) -> Biome {
        if height < sea_level - 2.0 {
            return Biome::Ocean;
        }
        if height < sea_level + 1.0 {
            return Biome::Beach;
        }

        let altitude_factor = (height - sea_level) / 100.0;
        if altitude_factor > 0.8 {
            return Biome::Snow;
        }
        if altitude_factor > 0.6 {
            return Biome::Mountains;
        }

        let temp = self.temperature_at(x, z);
        let moisture = self.moisture_at(x, z);
        match (temp, moisture) {
            (t, m) if t < -0.3 => {
                if m > 0.5 { Biome::Taiga } else { Biome::Tundra }
            }
            (t, m) if t > 0.3 => {
                if m > 0.75 {
                    Biome::Swamp
                } else if m > 0.3 {
                    Biome::Grassland
                } else {
                    Biome::Desert
                }
            }
            (_, m) => {
                if m > 0.6 {
                    Biome::Forest
                } else if m > 0.3 {
                    Biome::Grassland
                } else {
                    Biome::Desert
                }
            }
        }
    }
}
