//! Per-effect repeat throttling, keyed by effect name.

use std::collections::HashMap;

use rand::Rng;

use super::candidate::EffectCandidate;

#[derive(Clone, Debug, Default)]
pub struct EffectThrottle {
    blocked_until: HashMap<String, u64>,
}

impl EffectThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `effect` may play at `tick`.
    pub fn is_ready(&self, effect: &EffectCandidate, tick: u64) -> bool {
        self.blocked_until
            .get(effect.name())
            .is_none_or(|&until| tick >= until)
    }

    /// Block `effect` for its repeat delay starting at `tick`.
    pub fn arm<R: Rng + ?Sized>(&mut self, effect: &EffectCandidate, tick: u64, rng: &mut R) {
        let delay = effect.repeat_delay(rng) as u64;
        self.block_for(effect.name(), tick, delay);
    }

    /// Block a name for a fixed number of ticks.
    pub fn block_for(&mut self, name: &str, tick: u64, ticks: u64) {
        if ticks > 0 {
            self.blocked_until.insert(name.to_string(), tick + ticks);
        }
    }

    /// Drop entries that have expired by `tick`.
    pub fn prune(&mut self, tick: u64) {
        self.blocked_until.retain(|_, until| *until > tick);
    }

    pub fn clear(&mut self) {
        self.blocked_until.clear();
    }

    pub fn len(&self) -> usize {
        self.blocked_until.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked_until.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_blocks_until_delay_elapses() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut throttle = EffectThrottle::new();
        let owl = EffectCandidate::spot("owl").with_repeat_delay(100, 0);

        assert!(throttle.is_ready(&owl, 0));
        throttle.arm(&owl, 10, &mut rng);
        assert!(!throttle.is_ready(&owl, 50));
        assert!(!throttle.is_ready(&owl, 109));
        assert!(throttle.is_ready(&owl, 110));
    }

    #[test]
    fn test_keyed_by_name() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut throttle = EffectThrottle::new();
        let loud = EffectCandidate::spot("owl").with_repeat_delay(20, 0);
        let quiet = loud.scaled_volume(0.1);
        throttle.arm(&loud, 0, &mut rng);
        assert!(!throttle.is_ready(&quiet, 5));
        assert!(throttle.is_ready(&EffectCandidate::spot("wolf"), 5));
    }

    #[test]
    fn test_zero_delay_never_blocks() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut throttle = EffectThrottle::new();
        let effect = EffectCandidate::spot("drip");
        throttle.arm(&effect, 0, &mut rng);
        assert!(throttle.is_empty());
        assert!(throttle.is_ready(&effect, 0));
    }

    #[test]
    fn test_prune() {
        let mut throttle = EffectThrottle::new();
        throttle.block_for("a", 0, 10);
        throttle.block_for("b", 0, 100);
        throttle.prune(50);
        assert_eq!(throttle.len(), 1);
    }
}
