//! Tile effect chains: per-tile triggers that spawn particle jets.

use std::fmt;

use glam::{IVec3, Vec3};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::sink::EffectSink;
use crate::tiles::TileCatalog;
use crate::world::WorldView;

/// Particle jets a host is expected to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Steam,
    Fire,
    Bubble,
    Lava,
    Dust,
    Fountain,
}

/// What must be directly above the tile for a jet to fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clearance {
    /// Empty tile above (steam, fire, fountains).
    #[default]
    Empty,
    /// Liquid above (bubbles).
    Liquid,
    /// Anything (dust falling below is checked by the host).
    Any,
}

/// One link in a tile's effect chain. `apply` runs only when `trigger`
/// returned true for the same position.
pub trait TileEffect: fmt::Debug + Send + Sync {
    fn trigger(&self, world: &dyn WorldView, catalog: &TileCatalog, pos: IVec3, rng: &mut dyn RngCore) -> bool;

    fn apply(&self, pos: IVec3, sink: &mut dyn EffectSink, rng: &mut dyn RngCore);
}

/// Profile record describing a particle jet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JetConfig {
    pub kind: ParticleKind,
    /// Fires on average once in `chance` samples.
    #[serde(default = "default_chance")]
    pub chance: u32,
    #[serde(default)]
    pub clearance: Clearance,
}

fn default_chance() -> u32 {
    ParticleJet::DEFAULT_CHANCE
}

/// Spawns a particle jet from the top face of a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleJet {
    kind: ParticleKind,
    chance: u32,
    clearance: Clearance,
}

impl ParticleJet {
    pub const DEFAULT_CHANCE: u32 = 10;

    pub fn new(kind: ParticleKind, chance: u32, clearance: Clearance) -> Self {
        Self {
            kind,
            chance: chance.max(1),
            clearance,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }
}

impl From<JetConfig> for ParticleJet {
    fn from(config: JetConfig) -> Self {
        Self::new(config.kind, config.chance, config.clearance)
    }
}

impl TileEffect for ParticleJet {
    fn trigger(&self, world: &dyn WorldView, catalog: &TileCatalog, pos: IVec3, rng: &mut dyn RngCore) -> bool {
        if rng.gen_range(0..self.chance) != 0 {
            return false;
        }
        let above = world.tile_at(pos + IVec3::Y);
        match self.clearance {
            Clearance::Empty => above.is_empty(),
            Clearance::Liquid => catalog.is_liquid(above.id),
            Clearance::Any => true,
        }
    }

    fn apply(&self, pos: IVec3, sink: &mut dyn EffectSink, rng: &mut dyn RngCore) {
        let jitter = Vec3::new(rng.gen_range(0.2..0.8), 0.0, rng.gen_range(0.2..0.8));
        sink.spawn_particle(self.kind, pos.as_vec3() + Vec3::Y + jitter);
    }
}

/// Run a chain at one position: every effect whose trigger fires is applied.
/// Returns the number applied.
pub fn run_chain(
    chain: &[Box<dyn TileEffect>],
    world: &dyn WorldView,
    catalog: &TileCatalog,
    pos: IVec3,
    sink: &mut dyn EffectSink,
    rng: &mut dyn RngCore,
) -> usize {
    let mut applied = 0;
    for effect in chain {
        if effect.trigger(world, catalog, pos, rng) {
            effect.apply(pos, sink, rng);
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::sink::{RecordingSink, SinkEvent};
    use crate::testing::FlatWorld;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_jet_requires_clearance() {
        let world = FlatWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let jet = ParticleJet::new(ParticleKind::Steam, 1, Clearance::Empty);

        // Below ground: stone above, never fires.
        let buried = IVec3::new(0, world.ground_level() - 3, 0);
        assert!(!jet.trigger(&world, world.catalog(), buried, &mut rng));

        // Surface tile: air above.
        let surface = IVec3::new(0, world.ground_level() - 1, 0);
        assert!(jet.trigger(&world, world.catalog(), surface, &mut rng));
    }

    #[test]
    fn test_chain_spawns_above_tile() {
        let world = FlatWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let chain: Vec<Box<dyn TileEffect>> = vec![
            Box::new(ParticleJet::new(ParticleKind::Fire, 1, Clearance::Empty)),
            Box::new(ParticleJet::new(ParticleKind::Bubble, 1, Clearance::Liquid)),
        ];
        let mut sink = RecordingSink::new();
        let pos = IVec3::new(4, world.ground_level() - 1, 4);

        let applied = run_chain(&chain, &world, world.catalog(), pos, &mut sink, &mut rng);
        assert_eq!(applied, 1);
        match &sink.events[0] {
            SinkEvent::Particle { kind, pos: at } => {
                assert_eq!(*kind, ParticleKind::Fire);
                assert!(at.y >= pos.y as f32 + 1.0);
                assert!(at.x > 4.0 && at.x < 5.0);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_chance_thins_triggers() {
        let world = FlatWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let jet = ParticleJet::new(ParticleKind::Dust, 20, Clearance::Any);
        let fired = (0..2000)
            .filter(|_| jet.trigger(&world, world.catalog(), IVec3::ZERO, &mut rng))
            .count();
        assert!(fired > 40 && fired < 180, "fired {fired}");
    }

    #[test]
    fn test_jet_config_defaults() {
        let config: JetConfig = serde_json::from_str(r#"{"kind":"steam"}"#).unwrap();
        assert_eq!(config.chance, ParticleJet::DEFAULT_CHANCE);
        assert_eq!(config.clearance, Clearance::Empty);
        assert_eq!(ParticleJet::from(config).kind(), ParticleKind::Steam);
    }
}
