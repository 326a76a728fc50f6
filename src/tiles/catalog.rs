//! Tile identities: symbolic names, legacy numeric ids and material flags.

use std::collections::HashMap;

/// Compact tile type identifier. `TileId::EMPTY` is the empty (air) tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TileId(pub u16);

impl TileId {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

#[derive(Clone, Debug)]
struct CatalogEntry {
    name: String,
    legacy_id: Option<u32>,
    liquid: bool,
}

/// Registry of the tile types the host knows about.
///
/// Built once when the host finishes loading its content and handed to the
/// association tables by reference.
#[derive(Clone, Debug)]
pub struct TileCatalog {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, TileId>,
    by_legacy: HashMap<u32, TileId>,
}

impl TileCatalog {
    /// Symbolic name of the empty tile.
    pub const EMPTY_NAME: &'static str = "core:air";

    /// Catalog holding only the empty tile (legacy id 0).
    pub fn new() -> Self {
        let mut catalog = Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            by_legacy: HashMap::new(),
        };
        catalog.insert(Self::EMPTY_NAME, Some(0), false);
        catalog
    }

    /// Add a tile type. Re-inserting a known name returns its existing id.
    pub fn insert(&mut self, name: &str, legacy_id: Option<u32>, liquid: bool) -> TileId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = TileId(self.entries.len() as u16);
        self.entries.push(CatalogEntry {
            name: name.to_string(),
            legacy_id,
            liquid,
        });
        self.by_name.insert(name.to_string(), id);
        if let Some(legacy) = legacy_id {
            self.by_legacy.insert(legacy, id);
        }
        id
    }

    pub fn lookup(&self, name: &str) -> Option<TileId> {
        self.by_name.get(name).copied()
    }

    pub fn by_legacy_id(&self, legacy_id: u32) -> Option<TileId> {
        self.by_legacy.get(&legacy_id).copied()
    }

    pub fn name_of(&self, id: TileId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.name.as_str())
    }

    pub fn legacy_id_of(&self, id: TileId) -> Option<u32> {
        self.entries.get(id.0 as usize).and_then(|e| e.legacy_id)
    }

    pub fn is_liquid(&self, id: TileId) -> bool {
        self.entries.get(id.0 as usize).is_some_and(|e| e.liquid)
    }

    /// All tiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (TileId(i as u16), e.name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_catalog_has_empty_tile() {
        let catalog = TileCatalog::new();
        assert_eq!(catalog.lookup(TileCatalog::EMPTY_NAME), Some(TileId::EMPTY));
        assert_eq!(catalog.by_legacy_id(0), Some(TileId::EMPTY));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_insert_is_idempotent_by_name() {
        let mut catalog = TileCatalog::new();
        let a = catalog.insert("core:stone", Some(1), false);
        let b = catalog.insert("core:stone", Some(1), false);
        assert_eq!(a, b);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name_of(a), Some("core:stone"));
        assert_eq!(catalog.legacy_id_of(a), Some(1));
    }

    #[test]
    fn test_liquid_flag() {
        let mut catalog = TileCatalog::new();
        let water = catalog.insert("core:water", Some(9), true);
        let stone = catalog.insert("core:stone", None, false);
        assert!(catalog.is_liquid(water));
        assert!(!catalog.is_liquid(stone));
        assert!(!catalog.is_liquid(TileId(999)));
    }
}
