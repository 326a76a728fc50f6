//! Migration of numeric-id association keys (`"<id>^<variant>"`, `"<id>.<suffix>"`).

use super::association::AssociationTable;
use super::catalog::TileCatalog;

/// Rewrite a numeric-id key to its symbolic form. Returns `None` when the
/// prefix is not a number or the number is not a known legacy id.
pub fn migrate_key(catalog: &TileCatalog, key: &str) -> Option<String> {
    let end = key.find('^').or_else(|| key.find('.')).unwrap_or(key.len());
    let legacy_id = key[..end].parse::<u32>().ok()?;
    let tile = catalog.by_legacy_id(legacy_id)?;
    let name = catalog.name_of(tile)?;
    Some(format!("{name}{}", &key[end..]))
}

impl AssociationTable {
    /// Register a key that may use a legacy numeric tile id. Keys that do not
    /// start with a known numeric id are registered as-is.
    pub fn register_legacy(&mut self, catalog: &TileCatalog, key: &str, value: &str) {
        match migrate_key(catalog, key) {
            Some(rebuilt) => {
                log::debug!("Adding legacy key: {} for {}", rebuilt, key);
                self.register(catalog, &rebuilt, value);
            }
            None => self.register(catalog, key, value),
        }
    }
}
