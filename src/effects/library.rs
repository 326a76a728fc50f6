//! Maps sound names to host handles, substituting silence for missing assets.

use std::collections::{HashMap, HashSet};

/// Opaque handle to a host sound asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

impl SoundHandle {
    pub const SILENCE: Self = Self(0);
}

#[derive(Debug)]
pub struct SoundLibrary {
    assets: HashMap<String, SoundHandle>,
    reported: HashSet<String>,
}

impl SoundLibrary {
    pub const SILENCE_NAME: &'static str = "ambience:silence";

    pub fn new() -> Self {
        let mut assets = HashMap::new();
        assets.insert(Self::SILENCE_NAME.to_string(), SoundHandle::SILENCE);
        Self {
            assets,
            reported: HashSet::new(),
        }
    }

    /// Register an asset name and return its handle.
    pub fn register(&mut self, name: &str) -> SoundHandle {
        let next = SoundHandle(self.assets.len() as u32);
        *self.assets.entry(name.to_string()).or_insert(next)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    /// Handle for a name. Unknown names resolve to silence and are reported
    /// once each.
    pub fn resolve(&mut self, name: &str) -> SoundHandle {
        if let Some(handle) = self.assets.get(name) {
            return *handle;
        }
        if self.reported.insert(name.to_string()) {
            log::warn!("Unable to locate sound '{}', using silence", name);
        }
        SoundHandle::SILENCE
    }

    /// Names that resolved to silence so far.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.reported.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for SoundLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut library = SoundLibrary::new();
        let rain = library.register("ambience:rain");
        assert_ne!(rain, SoundHandle::SILENCE);
        assert_eq!(library.register("ambience:rain"), rain);
        assert_eq!(library.resolve("ambience:rain"), rain);
        assert_eq!(library.resolve(SoundLibrary::SILENCE_NAME), SoundHandle::SILENCE);
    }

    #[test]
    fn test_missing_resolves_to_silence_once() {
        let mut library = SoundLibrary::new();
        assert_eq!(library.resolve("nope"), SoundHandle::SILENCE);
        assert_eq!(library.resolve("nope"), SoundHandle::SILENCE);
        assert_eq!(library.missing().count(), 1);
    }
}
