//! Sounds for discrete observer actions reported by the host.

use rand::Rng;

use crate::effects::{EffectCandidate, EffectSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weapon {
    Sword,
    Axe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserverEvent {
    Jump,
    /// Attack with the held item, if it is a weapon that swooshes.
    Swing(Option<Weapon>),
    Craft,
    BowPull,
}

#[derive(Debug)]
pub struct EventSounds {
    jump: EffectCandidate,
    sword: EffectCandidate,
    axe: EffectCandidate,
    craft: EffectCandidate,
    bow_pull: EffectCandidate,
    craft_cooldown: u64,
    last_craft: Option<u64>,
}

impl EventSounds {
    pub fn new(craft_cooldown: u64) -> Self {
        Self {
            jump: EffectCandidate::variable("ambience:jump", 0.2, 1.0),
            sword: EffectCandidate::with_volume_pitch("ambience:swoosh", 1.0, 1.0),
            axe: EffectCandidate::with_volume_pitch("ambience:swoosh", 1.0, 0.5),
            craft: EffectCandidate::spot("ambience:crafting"),
            bow_pull: EffectCandidate::spot("ambience:bowpull"),
            craft_cooldown,
            last_craft: None,
        }
    }

    /// Play the sound for `event` at the observer. Returns true if played.
    pub fn handle<R: Rng>(&mut self, event: ObserverEvent, tick: u64, sink: &mut dyn EffectSink, rng: &mut R) -> bool {
        let sound = match event {
            ObserverEvent::Jump => &self.jump,
            ObserverEvent::Swing(Some(Weapon::Sword)) => &self.sword,
            ObserverEvent::Swing(Some(Weapon::Axe)) => &self.axe,
            ObserverEvent::Swing(None) => return false,
            ObserverEvent::Craft => {
                if self
                    .last_craft
                    .is_some_and(|last| tick.saturating_sub(last) <= self.craft_cooldown)
                {
                    return false;
                }
                self.last_craft = Some(tick);
                &self.craft
            }
            ObserverEvent::BowPull => &self.bow_pull,
        };
        sink.play(sound, sound.pitch(rng));
        true
    }
}

impl Default for EventSounds {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{RecordingSink, SinkEvent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_swing_pitch_by_weapon() {
        let mut events = EventSounds::default();
        let mut sink = RecordingSink::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(events.handle(ObserverEvent::Swing(Some(Weapon::Axe)), 0, &mut sink, &mut rng));
        assert!(!events.handle(ObserverEvent::Swing(None), 0, &mut sink, &mut rng));
        assert_eq!(
            sink.events,
            vec![SinkEvent::Observer { name: "ambience:swoosh".into(), volume: 1.0, pitch: 0.5 }]
        );
    }

    #[test]
    fn test_craft_cooldown() {
        let mut events = EventSounds::new(30);
        let mut sink = RecordingSink::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(events.handle(ObserverEvent::Craft, 100, &mut sink, &mut rng));
        assert!(!events.handle(ObserverEvent::Craft, 110, &mut sink, &mut rng));
        assert!(!events.handle(ObserverEvent::Craft, 130, &mut sink, &mut rng));
        assert!(events.handle(ObserverEvent::Craft, 131, &mut sink, &mut rng));
    }

    #[test]
    fn test_jump_is_quiet_and_jittered() {
        let mut events = EventSounds::default();
        let mut sink = RecordingSink::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        events.handle(ObserverEvent::Jump, 0, &mut sink, &mut rng);
        match &sink.events[0] {
            SinkEvent::Observer { volume, pitch, .. } => {
                assert!((volume - 0.2).abs() < 1e-6);
                assert!((0.8..=1.2).contains(pitch));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
