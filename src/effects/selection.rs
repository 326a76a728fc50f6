//! Weighted selection among effect candidates.

use rand::Rng;

use super::candidate::{EffectCandidate, EffectKind};

/// An ordered set of candidates for one emitter.
#[derive(Clone, Debug, Default)]
pub struct EffectSet {
    candidates: Vec<EffectCandidate>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. A candidate with the same name replaces the old one.
    pub fn add(&mut self, candidate: EffectCandidate) {
        match self.candidates.iter_mut().find(|c| **c == candidate) {
            Some(slot) => *slot = candidate,
            None => self.candidates.push(candidate),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectCandidate> {
        self.candidates.iter()
    }

    /// Candidates of one kind whose conditions match the tag string.
    pub fn matching<'a, 't>(
        &'a self,
        tags: &'t str,
        kind: EffectKind,
    ) -> impl Iterator<Item = &'a EffectCandidate> + use<'a, 't> {
        self.candidates
            .iter()
            .filter(move |c| c.kind() == kind && c.matches(tags))
    }

    /// Weighted pick among matching candidates of `kind`. Non-matching
    /// candidates are never chosen regardless of weight.
    pub fn select<R: Rng + ?Sized>(&self, tags: &str, kind: EffectKind, rng: &mut R) -> Option<&EffectCandidate> {
        let total: u32 = self.matching(tags, kind).map(EffectCandidate::weight).sum();
        if total == 0 {
            return None;
        }

        let mut target = rng.gen_range(0..total);
        for candidate in self.matching(tags, kind) {
            if target < candidate.weight() {
                return Some(candidate);
            }
            target -= candidate.weight();
        }
        None
    }
}

impl FromIterator<EffectCandidate> for EffectSet {
    fn from_iter<I: IntoIterator<Item = EffectCandidate>>(iter: I) -> Self {
        let mut set = EffectSet::new();
        for candidate in iter {
            set.add(candidate);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const BURNING_TAGS: &str = "#day#Overworld#noseason##burning#tcmedium#";
    const PLAIN_TAGS: &str = "#day#Overworld#noseason##tcmedium#";

    fn set() -> EffectSet {
        [
            EffectCandidate::spot("sizzle")
                .with_conditions(".*#burning#.*")
                .unwrap()
                .with_weight(10),
            EffectCandidate::spot("birds")
                .with_conditions(".*#night#.*")
                .unwrap()
                .with_weight(1000),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_non_matching_never_selected() {
        let set = set();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let chosen = set.select(BURNING_TAGS, EffectKind::OneShot, &mut rng).unwrap();
            assert_eq!(chosen.name(), "sizzle");
        }
    }

    #[test]
    fn test_nothing_matches() {
        let set = set();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(set.select(PLAIN_TAGS, EffectKind::OneShot, &mut rng).is_none());
        assert!(set.select(BURNING_TAGS, EffectKind::Step, &mut rng).is_none());
        assert!(EffectSet::new().select(PLAIN_TAGS, EffectKind::OneShot, &mut rng).is_none());
    }

    #[test]
    fn test_weights_bias_selection() {
        let set: EffectSet = [
            EffectCandidate::spot("common").with_weight(90),
            EffectCandidate::spot("rare").with_weight(10),
        ]
        .into_iter()
        .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let common = (0..2000)
            .filter(|_| set.select(PLAIN_TAGS, EffectKind::OneShot, &mut rng).unwrap().name() == "common")
            .count();
        assert!(common > 1600 && common < 1960, "common picked {common} times");
    }

    #[test]
    fn test_add_replaces_by_name() {
        let mut set = EffectSet::new();
        set.add(EffectCandidate::spot("wind").with_weight(1));
        set.add(EffectCandidate::spot("wind").with_weight(7));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().weight(), 7);
    }
}
