//! Lookup keys for the association tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::TileId;
use crate::core::Error;
use crate::world::Tile;

/// Variant part of a key: a specific variant, or the wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Any,
    Exact(u16),
}

impl Variant {
    /// Wildcard-aware comparison: `Any` matches every variant.
    pub fn matches(self, other: Variant) -> bool {
        match (self, other) {
            (Variant::Any, _) | (_, Variant::Any) => true,
            (Variant::Exact(a), Variant::Exact(b)) => a == b,
        }
    }
}

/// (tile type, variant) pair. Hash and `Eq` are structural so a table holds
/// the specific and the generic entry side by side; [`TileKey::matches`]
/// gives the wildcard comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub tile: TileId,
    pub variant: Variant,
}

impl TileKey {
    pub fn new(tile: TileId, variant: Variant) -> Self {
        Self { tile, variant }
    }

    pub fn exact(tile: Tile) -> Self {
        Self::new(tile.id, Variant::Exact(tile.variant))
    }

    pub fn generic(tile: TileId) -> Self {
        Self::new(tile, Variant::Any)
    }

    pub fn as_generic(&self) -> Self {
        Self::generic(self.tile)
    }

    /// Equal, or same tile type with one side being the wildcard.
    pub fn matches(&self, other: &TileKey) -> bool {
        self.tile == other.tile && self.variant.matches(other.variant)
    }
}

/// Secondary classification layered on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Substrate {
    /// Vegetation growing on the tile.
    Foliage,
    /// Loose ground such as tilled soil.
    Messy,
    /// Tall hitbox, e.g. fences.
    Bigger,
    Carpet,
    Fence,
}

impl Substrate {
    pub fn name(&self) -> &'static str {
        match self {
            Substrate::Foliage => "foliage",
            Substrate::Messy => "messy",
            Substrate::Bigger => "bigger",
            Substrate::Carpet => "carpet",
            Substrate::Fence => "fence",
        }
    }
}

impl FromStr for Substrate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "foliage" => Ok(Substrate::Foliage),
            "messy" => Ok(Substrate::Messy),
            "bigger" => Ok(Substrate::Bigger),
            "carpet" => Ok(Substrate::Carpet),
            "fence" => Ok(Substrate::Fence),
            _ => Err(Error::UnknownSubstrate(s.to_string())),
        }
    }
}

impl fmt::Display for Substrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed form of `namespace:identifier[^variant][+substrate]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedKey<'a> {
    pub name: &'a str,
    pub variant: Variant,
    pub substrate: Option<&'a str>,
}

impl<'a> ParsedKey<'a> {
    pub fn parse(key: &'a str) -> Result<Self, Error> {
        let malformed = || Error::MalformedKey(key.to_string());

        let name_end = key.find(['^', '+']).unwrap_or(key.len());
        let (name, mut rest) = key.split_at(name_end);
        let (namespace, ident) = name.split_once(':').ok_or_else(malformed)?;
        if namespace.is_empty() || ident.is_empty() {
            return Err(malformed());
        }

        let mut variant = Variant::Any;
        if let Some(tail) = rest.strip_prefix('^') {
            let digits = tail
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(tail.len());
            let number = tail[..digits].parse::<u16>().map_err(|_| malformed())?;
            variant = Variant::Exact(number);
            rest = &tail[digits..];
        }

        let substrate = if rest.is_empty() {
            None
        } else {
            let word = rest.strip_prefix('+').ok_or_else(malformed)?;
            if word.is_empty() || !word.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(malformed());
            }
            Some(word)
        };

        Ok(Self { name, variant, substrate })
    }
}
