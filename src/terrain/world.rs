//! Noise-based procedural world for the simulator and benches.

use glam::IVec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::biome::{Biome, BiomeMap};
use super::region::Region;
use crate::tiles::{TileCatalog, TileId};
use crate::world::{Tile, WorldView, ZoneDescriptor};

/// Ticks in one full day; the first half is daytime.
pub const DAY_LENGTH: u64 = 24_000;

/// Parameters controlling terrain generation
#[derive(Clone, Debug)]
pub struct TerrainParams {
    pub seed: u32,
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub height_scale: f32, // Vertical range above `base_height`
    pub base_height: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub sea_level: i32,
    /// Lava fills caves below this height.
    pub lava_level: i32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 100.0,
            height_scale: 64.0,
            base_height: 40.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            sea_level: 63,
            lava_level: 10,
        }
    }
}

/// Tiles placed by the generator.
#[derive(Clone, Copy, Debug)]
struct Palette {
    stone: TileId,
    water: TileId,
    lava: TileId,
    bedrock: TileId,
}

/// Heightmap world: biome surface over stone, water up to sea level,
/// a lava layer in caves near the bottom.
pub struct NoiseWorld {
    params: TerrainParams,
    noise: Fbm<Perlin>,
    caves: Perlin,
    biomes: BiomeMap,
    regions: Vec<Region>,
    catalog: TileCatalog,
    palette: Palette,
    zone: ZoneDescriptor,
    pub time: u64,
    pub rain: f32,
}

impl NoiseWorld {
    pub fn new(params: TerrainParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        let mut catalog = TileCatalog::new();
        let palette = Palette {
            stone: catalog.insert("core:stone", Some(1), false),
            water: catalog.insert("core:water", Some(9), true),
            lava: catalog.insert("core:lava", Some(11), true),
            bedrock: catalog.insert("core:bedrock", Some(7), false),
        };
        catalog.insert("core:grass", Some(2), false);
        catalog.insert("core:dirt", Some(3), false);
        catalog.insert("core:sand", Some(12), false);
        catalog.insert("core:sandstone", Some(24), false);
        catalog.insert("core:snow", Some(80), false);

        let mut zone = ZoneDescriptor::new(0, "Overworld");
        zone.average_ground_level = params.sea_level;

        Self {
            caves: Perlin::new(params.seed.wrapping_add(7)),
            biomes: BiomeMap::new(params.seed),
            regions: Biome::ALL.iter().map(Biome::region).collect(),
            noise,
            params,
            catalog,
            palette,
            zone,
            time: 0,
            rain: 0.0,
        }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Advance the clock by one tick.
    pub fn advance(&mut self) {
        self.time += 1;
    }

    /// Surface height of a column: the top solid tile.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let nx = (x as f32 / self.params.scale) as f64;
        let nz = (z as f32 / self.params.scale) as f64;
        let normalized = (self.noise.get([nx, nz]) + 1.0) / 2.0;
        (self.params.base_height + normalized as f32 * self.params.height_scale) as i32
    }

    pub fn biome_at(&self, x: i32, z: i32) -> Biome {
        let height = self.height_at(x, z) as f32;
        self.biomes.biome_at(x as f32, z as f32, height, self.params.sea_level as f32)
    }

    fn named(&self, name: &str) -> TileId {
        self.catalog.lookup(name).unwrap_or(self.palette.stone)
    }

    fn is_cave(&self, pos: IVec3) -> bool {
        let p = [pos.x as f64 * 0.08, pos.y as f64 * 0.12, pos.z as f64 * 0.08];
        self.caves.get(p) > 0.45
    }
}

impl WorldView for NoiseWorld {
    fn zone(&self) -> &ZoneDescriptor {
        &self.zone
    }

    fn tile_at(&self, pos: IVec3) -> Tile {
        if pos.y < 0 || pos.y >= self.zone.height {
            return Tile::EMPTY;
        }
        if pos.y == 0 {
            return Tile::new(self.palette.bedrock, 0);
        }

        let surface = self.height_at(pos.x, pos.z);
        if pos.y > surface {
            return if pos.y <= self.params.sea_level {
                Tile::new(self.palette.water, 0)
            } else {
                Tile::EMPTY
            };
        }
        if pos.y < surface - 4 && self.is_cave(pos) {
            return if pos.y <= self.params.lava_level {
                Tile::new(self.palette.lava, 0)
            } else {
                Tile::EMPTY
            };
        }

        let biome = self.biome_at(pos.x, pos.z);
        let id = if pos.y == surface {
            self.named(biome.surface_tile())
        } else if pos.y > surface - 4 {
            self.named(biome.underground_tile())
        } else {
            self.palette.stone
        };
        Tile::new(id, 0)
    }

    fn region_at(&self, x: i32, z: i32) -> &Region {
        &self.regions[self.biome_at(x, z).index()]
    }

    fn rain_strength(&self) -> f32 {
        self.rain
    }

    fn is_daytime(&self) -> bool {
        self.time % DAY_LENGTH < DAY_LENGTH / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_layers() {
        let world = NoiseWorld::new(TerrainParams::default());
        let (x, z) = (5, -12);
        let surface = world.height_at(x, z);
        assert!(!world.tile_at(IVec3::new(x, surface, z)).is_empty());
        assert_eq!(world.tile_at(IVec3::new(x, 0, z)).id, world.catalog().lookup("core:bedrock").unwrap());
        assert!(world.tile_at(IVec3::new(x, 255, z)).is_empty());
        assert!(world.tile_at(IVec3::new(x, -3, z)).is_empty());
    }

    #[test]
    fn test_water_fills_to_sea_level() {
        let world = NoiseWorld::new(TerrainParams {
            base_height: 20.0,
            height_scale: 10.0,
            ..Default::default()
        });
        let water = world.catalog().lookup("core:water").unwrap();
        let surface = world.height_at(0, 0);
        assert!(surface < world.params().sea_level);
        assert_eq!(world.tile_at(IVec3::new(0, world.params().sea_level, 0)).id, water);
        assert_eq!(world.region_at(0, 0).name, "Ocean");
    }

    #[test]
    fn test_day_cycle() {
        let mut world = NoiseWorld::new(TerrainParams::default());
        assert!(world.is_daytime());
        world.time = DAY_LENGTH / 2;
        assert!(!world.is_daytime());
        world.advance();
        world.time = DAY_LENGTH - 1;
        world.advance();
        assert!(world.is_daytime());
    }

    #[test]
    fn test_deterministic() {
        let a = NoiseWorld::new(TerrainParams::default());
        let b = NoiseWorld::new(TerrainParams::default());
        for (x, z) in [(0, 0), (100, -40), (-333, 17)] {
            assert_eq!(a.height_at(x, z), b.height_at(x, z));
            assert_eq!(a.region_at(x, z), b.region_at(x, z));
        }
    }
}
