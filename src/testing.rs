//! In-memory world for tests, benches and the simulator.

use std::collections::HashMap;

use glam::IVec3;

use crate::terrain::Region;
use crate::tiles::{TileCatalog, TileId};
use crate::world::{Tile, WorldView, ZoneDescriptor};

/// Flat world: stone below the surface, one layer of grass, air above.
/// Single tiles and the region can be overridden.
#[derive(Clone, Debug)]
pub struct FlatWorld {
    catalog: TileCatalog,
    zone: ZoneDescriptor,
    region: Region,
    ground_level: i32,
    stone: TileId,
    grass: TileId,
    overrides: HashMap<IVec3, Tile>,
    hollow: bool,
    pub rain: f32,
    pub daytime: bool,
    pub season: Option<String>,
}

impl FlatWorld {
    pub const GROUND_LEVEL: i32 = 64;

    pub fn new() -> Self {
        let mut catalog = TileCatalog::new();
        let stone = catalog.insert("core:stone", Some(1), false);
        let grass = catalog.insert("core:grass", Some(2), false);
        catalog.insert("core:water", Some(9), true);
        catalog.insert("core:lava", Some(11), true);
        catalog.insert("core:sand", Some(12), false);

        Self {
            catalog,
            zone: ZoneDescriptor::new(0, "Overworld"),
            region: Region::new("Plains", 0.8, 0.4),
            ground_level: Self::GROUND_LEVEL,
            stone,
            grass,
            overrides: HashMap::new(),
            hollow: false,
            rain: 0.0,
            daytime: true,
            season: None,
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_zone(mut self, zone: ZoneDescriptor) -> Self {
        self.zone = zone;
        self
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut TileCatalog {
        &mut self.catalog
    }

    /// First empty layer; the grass layer is `ground_level - 1`.
    pub fn ground_level(&self) -> i32 {
        self.ground_level
    }

    /// Tile id by name; the empty tile for unknown names.
    pub fn tile_id(&self, name: &str) -> TileId {
        self.catalog.lookup(name).unwrap_or(TileId::EMPTY)
    }

    pub fn set_tile(&mut self, pos: IVec3, tile: Tile) {
        self.overrides.insert(pos, tile);
    }

    /// Replace every tile with the empty tile.
    pub fn clear(&mut self) {
        self.hollow = true;
        self.overrides.clear();
    }
}

impl Default for FlatWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldView for FlatWorld {
    fn zone(&self) -> &ZoneDescriptor {
        &self.zone
    }

    fn tile_at(&self, pos: IVec3) -> Tile {
        if let Some(tile) = self.overrides.get(&pos) {
            return *tile;
        }
        if self.hollow || pos.y >= self.ground_level {
            Tile::EMPTY
        } else if pos.y == self.ground_level - 1 {
            Tile::new(self.grass, 0)
        } else {
            Tile::new(self.stone, 0)
        }
    }

    fn region_at(&self, _x: i32, _z: i32) -> &Region {
        &self.region
    }

    fn rain_strength(&self) -> f32 {
        self.rain
    }

    fn is_daytime(&self) -> bool {
        self.daytime
    }

    fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers() {
        let world = FlatWorld::new();
        let g = world.ground_level();
        assert!(world.tile_at(IVec3::new(0, g, 0)).is_empty());
        assert_eq!(world.tile_at(IVec3::new(0, g - 1, 0)).id, world.tile_id("core:grass"));
        assert_eq!(world.tile_at(IVec3::new(0, g - 5, 0)).id, world.tile_id("core:stone"));
    }

    #[test]
    fn test_overrides_and_clear() {
        let mut world = FlatWorld::new();
        let lava = Tile::new(world.tile_id("core:lava"), 0);
        world.set_tile(IVec3::new(3, 70, 3), lava);
        assert_eq!(world.tile_at(IVec3::new(3, 70, 3)), lava);
        world.clear();
        assert!(world.tile_at(IVec3::new(0, 0, 0)).is_empty());
    }
}
