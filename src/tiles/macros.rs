//! Association macros: named templates that expand into several table entries.

use std::collections::HashMap;

use super::key::{Substrate, Variant};

/// Prefix marking an association value as a macro reference.
pub const MACRO_MARKER: char = '#';

pub const NOT_EMITTER: &str = "NOT_EMITTER";
pub const MESSY_GROUND: &str = "MESSY_GROUND";

/// One entry of a macro: `(variant, substrate, value)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroEntry {
    pub variant: Variant,
    pub substrate: Option<Substrate>,
    pub value: String,
}

impl MacroEntry {
    pub fn any(substrate: Option<Substrate>, value: &str) -> Self {
        Self {
            variant: Variant::Any,
            substrate,
            value: value.to_string(),
        }
    }

    pub fn exact(variant: u16, substrate: Option<Substrate>, value: &str) -> Self {
        Self {
            variant: Variant::Exact(variant),
            substrate,
            value: value.to_string(),
        }
    }
}

/// Named macro templates, keyed including the marker (e.g. `#wheat`).
#[derive(Clone, Debug, Default)]
pub struct MacroLibrary {
    macros: HashMap<String, Vec<MacroEntry>>,
}

impl MacroLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock macros for plants, crops and fences.
    pub fn builtin() -> Self {
        let mut lib = Self::empty();

        let plant = vec![
            MacroEntry::any(None, NOT_EMITTER),
            MacroEntry::any(Some(Substrate::Messy), MESSY_GROUND),
            MacroEntry::any(Some(Substrate::Foliage), "straw"),
        ];
        lib.define("#sapling", plant.clone());
        lib.define("#reed", plant);

        let wheat_foliage = [
            NOT_EMITTER,
            NOT_EMITTER,
            "brush",
            "brush",
            "brush_straw_transition",
            "brush_straw_transition",
            "straw",
            "straw",
        ];
        lib.define("#wheat", growth_stages(&wheat_foliage));

        let crop_foliage = [
            NOT_EMITTER,
            NOT_EMITTER,
            NOT_EMITTER,
            NOT_EMITTER,
            "brush",
            "brush",
            "brush",
            "brush",
        ];
        lib.define("#crop", growth_stages(&crop_foliage));

        lib.define("#fence", vec![MacroEntry::any(Some(Substrate::Bigger), "bluntwood")]);
        lib
    }

    /// Add or replace a macro. The marker is prepended if missing.
    pub fn define(&mut self, name: &str, entries: Vec<MacroEntry>) {
        let key = if name.starts_with(MACRO_MARKER) {
            name.to_string()
        } else {
            format!("{MACRO_MARKER}{name}")
        };
        self.macros.insert(key, entries);
    }

    pub fn get(&self, name: &str) -> Option<&[MacroEntry]> {
        self.macros.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

/// Crop-style macro: not an emitter, messy ground, then one foliage value per
/// growth stage.
fn growth_stages(foliage: &[&str]) -> Vec<MacroEntry> {
    let mut entries = vec![
        MacroEntry::any(None, NOT_EMITTER),
        MacroEntry::any(Some(Substrate::Messy), MESSY_GROUND),
    ];
    entries.extend(
        foliage
            .iter()
            .enumerate()
            .map(|(stage, value)| MacroEntry::exact(stage as u16, Some(Substrate::Foliage), value)),
    );
    entries
}
