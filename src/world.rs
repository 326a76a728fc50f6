//! Boundary between the engine and the host game.
//!
//! The host implements [`WorldView`] for its live world and fills an
//! [`ObserverStatus`] once per tick. Nothing in the engine holds on to either
//! beyond the call that receives them.

use glam::{IVec3, Vec3};

use crate::terrain::Region;
use crate::tiles::TileId;

/// A tile as stored in the world grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub variant: u16,
}

impl Tile {
    pub const EMPTY: Self = Self { id: TileId::EMPTY, variant: 0 };

    pub fn new(id: TileId, variant: u16) -> Self {
        Self { id, variant }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Identity of a zone plus the defaults the host reports for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneDescriptor {
    pub id: i32,
    pub name: String,
    /// Host's average ground level, used as the default sea level.
    pub average_ground_level: i32,
    /// Host's world height, used as the default sky height.
    pub height: i32,
    /// Zones without a sky default to no haze, auroras or weather.
    pub has_sky: bool,
    /// World generated with the flat preset.
    pub flat: bool,
}

impl ZoneDescriptor {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            average_ground_level: 64,
            height: 256,
            has_sky: true,
            flat: false,
        }
    }
}

/// Read access to the world the observer is in.
///
/// Every method may be expensive on the host side; the engine calls
/// `region_at` and `tile_at` in bounded loops only.
pub trait WorldView {
    /// The zone currently loaded.
    fn zone(&self) -> &ZoneDescriptor;

    /// Tile at a world position. Out-of-world positions are empty.
    fn tile_at(&self, pos: IVec3) -> Tile;

    /// Region classification of a world column.
    fn region_at(&self, x: i32, z: i32) -> &Region;

    /// Temperature at a position; regions cool with elevation by default.
    fn temperature_at(&self, pos: IVec3) -> f32 {
        self.region_at(pos.x, pos.z).temperature_at(pos.y)
    }

    /// Host precipitation fraction in `[0, 1]`.
    fn rain_strength(&self) -> f32;

    fn is_daytime(&self) -> bool;

    /// Season name if the host runs a calendar.
    fn season(&self) -> Option<&str> {
        None
    }
}

/// What the observer is riding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mount {
    Minecart,
    Horse,
    Boat,
    Pig,
    Other,
}

/// Per-tick facts about the observer, filled in by the host.
#[derive(Clone, Debug)]
pub struct ObserverStatus {
    pub position: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub food_level: i32,
    pub saturation: f32,
    pub creative: bool,
    pub burning: bool,
    /// Remaining air; zero or less means suffocating.
    pub air: i32,
    pub flying: bool,
    pub sprinting: bool,
    pub in_lava: bool,
    pub invisible: bool,
    pub blind: bool,
    pub in_water: bool,
    pub mount: Option<Mount>,
    pub on_ground: bool,
    /// Walked distance changed since the previous tick.
    pub moved: bool,
    /// Host's "really inside" test (roofed and enclosed).
    pub inside: bool,
}

impl Default for ObserverStatus {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            health: 20.0,
            max_health: 20.0,
            food_level: 20,
            saturation: 5.0,
            creative: false,
            burning: false,
            air: 300,
            flying: false,
            sprinting: false,
            in_lava: false,
            invisible: false,
            blind: false,
            in_water: false,
            mount: None,
            on_ground: true,
            moved: false,
            inside: false,
        }
    }
}

impl ObserverStatus {
    /// Position floored to the containing tile.
    pub fn tile_position(&self) -> IVec3 {
        self.position.floor().as_ivec3()
    }
}
