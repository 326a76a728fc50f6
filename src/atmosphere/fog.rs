//! Region-weighted fog distance with a per-mode result cache.
//!
//! Render callbacks may ask for fog several times per tick, once per fog
//! mode. Each mode has its own slot so that alternating sky and terrain
//! passes do not evict each other.

use crate::world::WorldView;

/// Half-width of the scanned square, in columns.
pub const SCAN_DISTANCE: i32 = 20;

/// How strongly falling dust shortens the fog distance at full intensity.
pub const DUST_FOG_IMPACT: f32 = 0.9;

/// Far-plane distance a fully fogged column contributes.
pub const BIOME_FAR_PLANE: f32 = 240.0;

/// Fog start scale for a fully fogged column and for a clear one.
pub const BIOME_FOG_SCALE: f32 = 0.1;
pub const DEFAULT_FOG_SCALE: f32 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FogMode {
    Sky,
    Terrain,
}

impl FogMode {
    /// Host fog-mode code: `-1` is the sky pass, anything else terrain.
    pub fn from_code(code: i32) -> Self {
        if code == -1 { FogMode::Sky } else { FogMode::Terrain }
    }

    fn slot(self) -> usize {
        match self {
            FogMode::Sky => 0,
            FogMode::Terrain => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogResult {
    pub mode: FogMode,
    pub start: f32,
    pub end: f32,
    pub scale: f32,
}

impl FogResult {
    /// Sky fog starts at the camera; terrain fog starts at `end * scale`.
    pub fn new(mode: FogMode, end: f32, scale: f32) -> Self {
        let start = match mode {
            FogMode::Sky => 0.0,
            FogMode::Terrain => end * scale,
        };
        Self { mode, start, end, scale }
    }
}

/// Cache key for one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FogKey {
    x: i32,
    z: i32,
    level: f32,
    far_plane: f32,
}

#[derive(Clone, Copy, Debug, Default)]
struct FogSlot {
    valid: bool,
    key: Option<FogKey>,
    result: Option<FogResult>,
}

impl FogSlot {
    fn hit(&self, key: &FogKey) -> Option<FogResult> {
        if self.valid && self.key.as_ref() == Some(key) {
            self.result
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct FogRangeCalculator {
    slots: [FogSlot; 2],
    scans: u64,
}

impl FogRangeCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fog range for the observer column `(x, z)`.
    ///
    /// `level` is the weather intensity level; anything above zero counts as
    /// raining over dusty regions. Dust follows `level` alone, not the host
    /// rain state, so a cached result only depends on its key.
    pub fn calculate(
        &mut self,
        world: &dyn WorldView,
        x: i32,
        z: i32,
        level: f32,
        far_plane: f32,
        mode: FogMode,
    ) -> FogResult {
        let key = FogKey { x, z, level, far_plane };
        let slot = &mut self.slots[mode.slot()];
        if let Some(result) = slot.hit(&key) {
            return result;
        }

        let result = scan(world, x, z, level, far_plane, mode);
        *slot = FogSlot {
            valid: true,
            key: Some(key),
            result: Some(result),
        };
        self.scans += 1;
        result
    }

    /// Mark every slot dirty.
    pub fn invalidate(&mut self) {
        for slot in &mut self.slots {
            slot.valid = false;
        }
    }

    /// Number of region scans performed so far.
    pub fn scans(&self) -> u64 {
        self.scans
    }
}

fn scan(world: &dyn WorldView, x: i32, z: i32, level: f32, far_plane: f32, mode: FogMode) -> FogResult {
    let raining = level > 0.0;
    let mut fog_sum = 0.0f32;
    let mut fog_weight = 0.0f32;

    for dx in -SCAN_DISTANCE..=SCAN_DISTANCE {
        for dz in -SCAN_DISTANCE..=SCAN_DISTANCE {
            let region = world.region_at(x + dx, z + dz);
            let part = if raining && region.has_dust {
                1.0 - DUST_FOG_IMPACT * level
            } else if let Some(density) = region.fog_density {
                density
            } else {
                continue;
            };
            fog_sum += part;
            fog_weight += 1.0;
        }
    }

    let side = (SCAN_DISTANCE * 2 + 1) as f32;
    let total_weight = side * side;
    let default_weight = total_weight - fog_weight;
    let fog_avg = if fog_weight == 0.0 { 0.0 } else { fog_sum / fog_weight };

    let end = ((fog_sum * BIOME_FAR_PLANE + far_plane * default_weight) / total_weight).min(far_plane);
    let biome_scale = BIOME_FOG_SCALE * (1.0 - fog_avg) + DEFAULT_FOG_SCALE * fog_avg;
    let scale = (biome_scale * fog_weight + DEFAULT_FOG_SCALE * default_weight) / total_weight;

    FogResult::new(mode, end, scale)
}
