//! Sound effect descriptors and their selection parameters.

use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Pitch offsets for variable-pitch effects, biased towards no change and
/// towards sharpening.
pub const PITCH_DELTAS: [f32; 6] = [-0.2, 0.0, 0.0, 0.2, 0.2, 0.2];

/// Condition pattern that matches every tag string.
pub const MATCH_ALL: &str = ".*";

/// Name given to records that leave `sound` empty.
pub const MISSING_SOUND: &str = "MISSING SOUND";

/// Weight used when a record does not give one.
pub const DEFAULT_WEIGHT: u32 = 10;

/// How an effect is played and throttled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Looping ambience tied to the current conditions.
    Background,
    /// Played once at a sampled position.
    #[serde(alias = "spot")]
    OneShot,
    /// Played for the tile under a walking observer.
    Step,
    /// Repeats after its repeat delay.
    Periodic,
}

impl EffectKind {
    /// Case-insensitive name lookup; unknown names fall back to `Background`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "background" => EffectKind::Background,
            "spot" | "oneshot" => EffectKind::OneShot,
            "step" => EffectKind::Step,
            "periodic" => EffectKind::Periodic,
            other => {
                log::warn!("Unknown sound type '{}', using background", other);
                EffectKind::Background
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Background => "BACKGROUND",
            EffectKind::OneShot => "SPOT",
            EffectKind::Step => "STEP",
            EffectKind::Periodic => "PERIODIC",
        }
    }
}

/// Sound record as written in a profile. Every field is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub sound: Option<String>,
    pub conditions: Option<String>,
    pub volume: Option<f32>,
    pub pitch: Option<f32>,
    pub weight: Option<u32>,
    pub variable: Option<bool>,
    pub repeat_delay: Option<u32>,
    pub repeat_delay_random: Option<u32>,
    pub sound_type: Option<EffectKind>,
    pub step: Option<bool>,
    pub spot_sound: Option<bool>,
}

impl SoundConfig {
    /// Explicit `sound_type`, else inferred from the legacy flags.
    pub fn kind(&self) -> EffectKind {
        if let Some(kind) = self.sound_type {
            return kind;
        }
        if self.repeat_delay.is_some_and(|d| d > 0) {
            EffectKind::Periodic
        } else if self.step == Some(true) {
            EffectKind::Step
        } else if self.spot_sound == Some(true) {
            EffectKind::OneShot
        } else {
            EffectKind::Background
        }
    }
}

/// An immutable sound effect candidate.
///
/// Identity is the sound name: two candidates with the same name are the same
/// effect for throttling even when their volumes differ.
#[derive(Clone, Debug)]
pub struct EffectCandidate {
    name: String,
    conditions: String,
    /// `None` matches every tag string.
    pattern: Option<Regex>,
    weight: u32,
    volume: f32,
    pitch: f32,
    variable: bool,
    repeat_delay: u32,
    repeat_delay_random: u32,
    kind: EffectKind,
}

impl EffectCandidate {
    /// One-shot effect at full volume and normal pitch, matching everything.
    pub fn spot(name: &str) -> Self {
        Self::with_volume_pitch(name, 1.0, 1.0)
    }

    pub fn with_volume_pitch(name: &str, volume: f32, pitch: f32) -> Self {
        Self {
            name: name.to_string(),
            conditions: MATCH_ALL.to_string(),
            pattern: None,
            weight: 1,
            volume,
            pitch,
            variable: false,
            repeat_delay: 0,
            repeat_delay_random: 0,
            kind: EffectKind::OneShot,
        }
    }

    /// One-shot effect whose pitch is jittered on every play.
    pub fn variable(name: &str, volume: f32, pitch: f32) -> Self {
        Self {
            variable: true,
            ..Self::with_volume_pitch(name, volume, pitch)
        }
    }

    pub fn from_config(record: &SoundConfig) -> Result<Self> {
        let name = record
            .sound
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING_SOUND);
        let conditions = record
            .conditions
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(MATCH_ALL);

        Ok(Self {
            name: name.to_string(),
            conditions: conditions.to_string(),
            pattern: compile_conditions(conditions)?,
            weight: record.weight.unwrap_or(DEFAULT_WEIGHT).max(1),
            volume: record.volume.unwrap_or(1.0),
            pitch: record.pitch.unwrap_or(1.0),
            variable: record.variable.unwrap_or(false),
            repeat_delay: record.repeat_delay.unwrap_or(0),
            repeat_delay_random: record.repeat_delay_random.unwrap_or(0),
            kind: record.kind(),
        })
    }

    /// Builder-style condition pattern.
    pub fn with_conditions(mut self, conditions: &str) -> Result<Self> {
        self.pattern = compile_conditions(conditions)?;
        self.conditions = conditions.to_string();
        Ok(self)
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight.max(1);
        self
    }

    pub fn with_kind(mut self, kind: EffectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_repeat_delay(mut self, base: u32, random: u32) -> Self {
        self.repeat_delay = base;
        self.repeat_delay_random = random;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conditions(&self) -> &str {
        &self.conditions
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn base_pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_variable(&self) -> bool {
        self.variable
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// True iff the condition pattern matches the whole tag string.
    pub fn matches(&self, tags: &str) -> bool {
        self.pattern.as_ref().is_none_or(|p| p.is_match(tags))
    }

    /// Pitch for one play: base pitch plus a jitter delta if variable.
    pub fn pitch<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.variable {
            self.pitch + PITCH_DELTAS[rng.gen_range(0..PITCH_DELTAS.len())]
        } else {
            self.pitch
        }
    }

    /// Ticks before this effect may be triggered again.
    pub fn repeat_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.repeat_delay_random == 0 {
            self.repeat_delay
        } else {
            self.repeat_delay + rng.gen_range(0..self.repeat_delay_random)
        }
    }

    /// Copy with the volume multiplied by `scale`.
    pub fn scaled_volume(&self, scale: f32) -> Self {
        Self {
            volume: self.volume * scale,
            ..self.clone()
        }
    }
}

impl PartialEq for EffectCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EffectCandidate {}

impl Hash for EffectCandidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for EffectCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.name)?;
        if !self.conditions.is_empty() {
            write!(f, "({})", self.conditions)?;
        }
        write!(f, ", v:{}, p:{}, t:{}", self.volume, self.pitch, self.kind.name())?;
        if self.kind == EffectKind::OneShot {
            write!(f, ", w:{}", self.weight)?;
        }
        if self.repeat_delay != 0 || self.repeat_delay_random != 0 {
            write!(f, ", d:{}+{}", self.repeat_delay, self.repeat_delay_random)?;
        }
        write!(f, "]")
    }
}

fn compile_conditions(conditions: &str) -> Result<Option<Regex>> {
    if conditions == MATCH_ALL {
        return Ok(None);
    }
    Regex::new(&format!("^(?:{conditions})$"))
        .map(Some)
        .map_err(|source| Error::InvalidPattern {
            pattern: conditions.to_string(),
            source,
        })
}
