//! Tile → effect-name association tables.
//!
//! Keys take the form `namespace:identifier[^variant][+substrate]`. Values are
//! effect names, or a macro reference (`#wheat`) that expands into several
//! entries at once. Tables are filled at load time and only read afterwards.

use std::collections::HashMap;

use super::catalog::{TileCatalog, TileId};
use super::key::{ParsedKey, Substrate, TileKey};
use super::macros::{MacroLibrary, MACRO_MARKER, NOT_EMITTER};
use crate::core::{Error, Result};
use crate::world::Tile;

/// Effect names keyed by tile, with optional per-substrate override tables.
#[derive(Clone, Debug)]
pub struct AssociationTable {
    entries: HashMap<TileKey, String>,
    substrates: HashMap<Substrate, HashMap<TileKey, String>>,
    macros: MacroLibrary,
}

impl AssociationTable {
    /// Empty table using the built-in macros. The empty tile is mapped to
    /// `NOT_EMITTER` for every variant.
    pub fn new() -> Self {
        Self::with_macros(MacroLibrary::builtin())
    }

    pub fn with_macros(macros: MacroLibrary) -> Self {
        let mut table = Self {
            entries: HashMap::new(),
            substrates: HashMap::new(),
            macros,
        };
        table.put(TileKey::generic(TileId::EMPTY), None, NOT_EMITTER);
        table
    }

    pub fn macros(&self) -> &MacroLibrary {
        &self.macros
    }

    pub fn macros_mut(&mut self) -> &mut MacroLibrary {
        &mut self.macros
    }

    /// Register one `key = value` pair. Malformed keys, unknown tiles and
    /// unknown macros are logged and dropped.
    pub fn register(&mut self, catalog: &TileCatalog, key: &str, value: &str) {
        if let Err(e) = self.try_register(catalog, key, value) {
            log::debug!("Skipping association '{}' = '{}': {}", key, value, e);
        }
    }

    /// Like [`register`](Self::register) but reports why an entry was dropped.
    /// The table is unchanged when an error is returned.
    pub fn try_register(&mut self, catalog: &TileCatalog, key: &str, value: &str) -> Result<()> {
        let parsed = ParsedKey::parse(key)?;
        let tile = catalog
            .lookup(parsed.name)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::UnknownTile(parsed.name.to_string()))?;

        if value.starts_with(MACRO_MARKER) {
            return self.expand(tile, value);
        }

        let substrate = parsed.substrate.map(str::parse::<Substrate>).transpose()?;
        self.put(TileKey::new(tile, parsed.variant), substrate, value);
        Ok(())
    }

    fn expand(&mut self, tile: TileId, name: &str) -> Result<()> {
        let entries = self
            .macros
            .get(name)
            .ok_or_else(|| Error::UnknownMacro(name.to_string()))?
            .to_vec();
        for entry in entries {
            self.put(TileKey::new(tile, entry.variant), entry.substrate, &entry.value);
        }
        Ok(())
    }

    fn put(&mut self, key: TileKey, substrate: Option<Substrate>, value: &str) {
        let map = match substrate {
            None => &mut self.entries,
            Some(s) => self.substrates.entry(s).or_default(),
        };
        map.insert(key, value.to_string());
    }

    /// Effect name for a tile: the exact variant first, then the generic entry.
    pub fn resolve(&self, tile: Tile) -> Option<&str> {
        lookup(&self.entries, tile)
    }

    /// Same two-step lookup scoped to one substrate table.
    pub fn resolve_substrate(&self, tile: Tile, substrate: Substrate) -> Option<&str> {
        self.substrates
            .get(&substrate)
            .and_then(|table| lookup(table, tile))
    }

    /// Number of entries across the main and substrate tables.
    pub fn len(&self) -> usize {
        self.entries.len() + self.substrates.values().map(HashMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One `name = value` line per catalog tile with its generic association
    /// (or `NO_ASSOCIATION`), sorted by name.
    pub fn report(&self, catalog: &TileCatalog) -> Vec<String> {
        let mut lines: Vec<String> = catalog
            .iter()
            .map(|(id, name)| {
                let value = self
                    .entries
                    .get(&TileKey::generic(id))
                    .map_or("NO_ASSOCIATION", String::as_str);
                format!("{name} = {value}")
            })
            .collect();
        lines.sort();
        lines
    }
}

impl Default for AssociationTable {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(table: &HashMap<TileKey, String>, tile: Tile) -> Option<&str> {
    let key = TileKey::exact(tile);
    table
        .get(&key)
        .or_else(|| table.get(&key.as_generic()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::key::Variant;
    use crate::tiles::macros::{MacroEntry, MESSY_GROUND};

    fn catalog() -> TileCatalog {
        let mut catalog = TileCatalog::new();
        catalog.insert("modns:stone", Some(1), false);
        catalog.insert("core:wheat", Some(59), false);
        catalog.insert("core:fence", Some(85), false);
        catalog
    }

    fn tile(catalog: &TileCatalog, name: &str, variant: u16) -> Tile {
        Tile::new(catalog.lookup(name).unwrap(), variant)
    }

    #[test]
    fn test_generic_fallback() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        table.register(&catalog, "modns:stone", "rock");
        assert_eq!(table.resolve(tile(&catalog, "modns:stone", 3)), Some("rock"));
    }

    #[test]
    fn test_specific_beats_generic() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        table.register(&catalog, "modns:stone", "rock");
        table.register(&catalog, "modns:stone^2", "marble");
        assert_eq!(table.resolve(tile(&catalog, "modns:stone", 2)), Some("marble"));
        assert_eq!(table.resolve(tile(&catalog, "modns:stone", 5)), Some("rock"));
    }

    #[test]
    fn test_unregistered_tile_resolves_none() {
        let catalog = catalog();
        let table = AssociationTable::new();
        assert_eq!(table.resolve(tile(&catalog, "modns:stone", 0)), None);
    }

    #[test]
    fn test_empty_tile_is_not_emitter() {
        let table = AssociationTable::new();
        assert_eq!(table.resolve(Tile::EMPTY), Some(NOT_EMITTER));
    }

    #[test]
    fn test_refuses_empty_tile_key() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        let before = table.len();
        assert!(matches!(
            table.try_register(&catalog, TileCatalog::EMPTY_NAME, "stone"),
            Err(Error::UnknownTile(_))
        ));
        assert_eq!(table.len(), before);
    }

    #[test]
    fn test_malformed_and_unknown_are_skipped() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        let before = table.len();
        table.register(&catalog, "no-namespace", "rock");
        table.register(&catalog, "modns:missing", "rock");
        table.register(&catalog, "modns:stone+gravel", "rock");
        assert_eq!(table.len(), before);
        // Later entries still load.
        table.register(&catalog, "modns:stone", "rock");
        assert_eq!(table.len(), before + 1);
    }

    #[test]
    fn test_substrate_lookup() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        table.register(&catalog, "core:fence+bigger", "bluntwood");
        let fence = tile(&catalog, "core:fence", 0);
        assert_eq!(table.resolve_substrate(fence, Substrate::Bigger), Some("bluntwood"));
        assert_eq!(table.resolve_substrate(fence, Substrate::Foliage), None);
        assert_eq!(table.resolve(fence), None);
    }

    #[test]
    fn test_macro_equals_manual_registration() {
        let catalog = catalog();
        let mut by_macro = AssociationTable::new();
        by_macro.register(&catalog, "core:wheat", "#wheat");

        let mut manual = AssociationTable::new();
        for entry in MacroLibrary::builtin().get("#wheat").unwrap() {
            let mut key = String::from("core:wheat");
            if let Variant::Exact(v) = entry.variant {
                key.push_str(&format!("^{v}"));
            }
            if let Some(s) = entry.substrate {
                key.push('+');
                key.push_str(s.name());
            }
            manual.register(&catalog, &key, &entry.value);
        }

        assert_eq!(by_macro.len(), manual.len());
        for variant in 0..10 {
            let t = tile(&catalog, "core:wheat", variant);
            assert_eq!(by_macro.resolve(t), manual.resolve(t));
            for s in [Substrate::Foliage, Substrate::Messy] {
                assert_eq!(by_macro.resolve_substrate(t, s), manual.resolve_substrate(t, s));
            }
        }
        let wheat = tile(&catalog, "core:wheat", 6);
        assert_eq!(by_macro.resolve_substrate(wheat, Substrate::Foliage), Some("straw"));
        assert_eq!(by_macro.resolve_substrate(wheat, Substrate::Messy), Some(MESSY_GROUND));
        assert_eq!(by_macro.resolve(wheat), Some(NOT_EMITTER));
    }

    #[test]
    fn test_unknown_macro_leaves_table_unchanged() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        let before = table.len();
        assert!(matches!(
            table.try_register(&catalog, "modns:stone", "#nothing"),
            Err(Error::UnknownMacro(_))
        ));
        table.register(&catalog, "modns:stone", "#nothing");
        assert_eq!(table.len(), before);
        assert_eq!(table.resolve(tile(&catalog, "modns:stone", 0)), None);
    }

    #[test]
    fn test_custom_macro() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        table
            .macros_mut()
            .define("#stonework", vec![MacroEntry::any(None, "rock"), MacroEntry::exact(1, None, "brick")]);
        table.register(&catalog, "modns:stone", "#stonework");
        assert_eq!(table.resolve(tile(&catalog, "modns:stone", 1)), Some("brick"));
        assert_eq!(table.resolve(tile(&catalog, "modns:stone", 4)), Some("rock"));
    }

    #[test]
    fn test_report_sorted() {
        let catalog = catalog();
        let mut table = AssociationTable::new();
        table.register(&catalog, "modns:stone", "rock");
        let report = table.report(&catalog);
        assert_eq!(report.len(), catalog.len());
        assert!(report.contains(&"modns:stone = rock".to_string()));
        assert!(report.contains(&"core:fence = NO_ASSOCIATION".to_string()));
        let mut sorted = report.clone();
        sorted.sort();
        assert_eq!(report, sorted);
    }
}
