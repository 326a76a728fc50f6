//! Bulk registration from a material dictionary: one effect value shared by a
//! list of tile keys.

use std::collections::BTreeMap;

use super::association::AssociationTable;
use super::catalog::TileCatalog;

/// Effect value → tile keys (`namespace:identifier[^variant]`).
pub type MaterialDictionary = BTreeMap<String, Vec<String>>;

impl AssociationTable {
    /// Register every tile key of every dictionary group under its value.
    /// Keys naming unknown tiles are skipped like any other registration.
    pub fn register_dictionary(&mut self, catalog: &TileCatalog, dictionary: &MaterialDictionary) {
        let before = self.len();
        for (value, keys) in dictionary {
            for key in keys {
                self.register(catalog, key, value);
            }
        }
        log::debug!(
            "Material dictionary added {} associations from {} groups",
            self.len().saturating_sub(before),
            dictionary.len()
        );
    }
}
