//! Tile identities and the tile → effect association resolver.

pub mod association;
pub mod catalog;
pub mod dictionary;
pub mod key;
pub mod legacy;
pub mod macros;

pub use association::AssociationTable;
pub use catalog::{TileCatalog, TileId};
pub use dictionary::MaterialDictionary;
pub use key::{ParsedKey, Substrate, TileKey, Variant};
pub use macros::{MacroEntry, MacroLibrary, MACRO_MARKER, MESSY_GROUND, NOT_EMITTER};
