//! `/rain` command: inspect and steer the weather authority.
//!
//! ```text
//! /rain status          show intensity and bounds
//! /rain reset           hand weather back to the host
//! /rain <0-100>         set intensity in percent
//! /rain setmin <0-100>  set lower bound in percent
//! /rain setmax <0-100>  set upper bound in percent
//! ```

use std::fmt;

use thiserror::Error;

use crate::atmosphere::{WeatherBounds, USE_HOST_DEFAULT};

pub const USAGE: &str = "/rain <status | reset | 1-100 | <<setmax|setmin> 0-100>";

/// User-facing command failure. `Display` is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("{}", USAGE)]
    Usage,

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("The number you have entered ({0}) is out of range, it must be between 0 and 100")]
    OutOfRange(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeatherCommand {
    Status,
    Reset,
    /// Intensity as a fraction in `[0, 1]`.
    Set(f32),
    SetMin(f32),
    SetMax(f32),
}

impl WeatherCommand {
    /// Parse whitespace-separated arguments (without the command name).
    pub fn parse_line(line: &str) -> Result<Self, CommandError> {
        let args: Vec<&str> = line.split_whitespace().collect();
        Self::parse(&args)
    }

    pub fn parse(args: &[&str]) -> Result<Self, CommandError> {
        match args {
            [word] if word.eq_ignore_ascii_case("status") => Ok(WeatherCommand::Status),
            [word] if word.eq_ignore_ascii_case("reset") => Ok(WeatherCommand::Reset),
            [value] => percent(value).map(WeatherCommand::Set),
            [word, value] if word.eq_ignore_ascii_case("setmin") => percent(value).map(WeatherCommand::SetMin),
            [word, value] if word.eq_ignore_ascii_case("setmax") => percent(value).map(WeatherCommand::SetMax),
            _ => Err(CommandError::Usage),
        }
    }
}

/// Parse a percentage in `[0, 100]` into a fraction.
fn percent(text: &str) -> Result<f32, CommandError> {
    let value: f64 = text
        .parse()
        .map_err(|_| CommandError::NotANumber(text.to_string()))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(CommandError::OutOfRange(value));
    }
    Ok((value / 100.0) as f32)
}

/// Weather state held by the authority for one zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherAuthority {
    intensity: f32,
    min: f32,
    max: f32,
}

impl Default for WeatherAuthority {
    fn default() -> Self {
        Self::new(WeatherBounds::default())
    }
}

impl WeatherAuthority {
    /// Starts on the host default.
    pub fn new(bounds: WeatherBounds) -> Self {
        Self {
            intensity: USE_HOST_DEFAULT,
            min: bounds.min,
            max: bounds.max,
        }
    }

    /// Raw level to push to the weather state machine.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn bounds(&self) -> WeatherBounds {
        WeatherBounds::new(self.min, self.max)
    }

    pub fn is_host_default(&self) -> bool {
        self.intensity == USE_HOST_DEFAULT
    }

    pub fn set_intensity(&mut self, level: f32) {
        self.intensity = level.clamp(self.min, self.max);
    }

    pub fn set_min(&mut self, level: f32) {
        self.min = level.clamp(0.0, self.max);
    }

    pub fn set_max(&mut self, level: f32) {
        self.max = level.clamp(self.min, 1.0);
    }

    pub fn reset(&mut self) {
        self.intensity = USE_HOST_DEFAULT;
    }

    /// Apply a command and return the message for the user.
    /// `rain_strength` is the host's current precipitation, for `status`.
    pub fn execute(&mut self, command: WeatherCommand, rain_strength: f32) -> String {
        match command {
            WeatherCommand::Status => format!("{}; strength: {:.1}", self, rain_strength * 100.0),
            WeatherCommand::Reset => {
                self.reset();
                "Rain intensity reset to host default".to_string()
            }
            WeatherCommand::Set(level) => {
                self.set_intensity(level);
                format!("Rain intensity set to {:.1}", self.intensity * 100.0)
            }
            WeatherCommand::SetMin(level) => {
                self.set_min(level);
                format!("Minimum rain intensity set to {:.1}", self.min * 100.0)
            }
            WeatherCommand::SetMax(level) => {
                self.set_max(level);
                format!("Maximum rain intensity set to {:.1}", self.max * 100.0)
            }
        }
    }
}

impl fmt::Display for WeatherAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_host_default() {
            write!(f, "intensity: default")?;
        } else {
            write!(f, "intensity: {:.1}", self.intensity * 100.0)?;
        }
        write!(f, "; min: {:.1}; max: {:.1}", self.min * 100.0, self.max * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(WeatherCommand::parse_line("status"), Ok(WeatherCommand::Status));
        assert_eq!(WeatherCommand::parse_line("RESET"), Ok(WeatherCommand::Reset));
        assert_eq!(WeatherCommand::parse_line("50"), Ok(WeatherCommand::Set(0.5)));
        assert_eq!(WeatherCommand::parse_line("setmin 10"), Ok(WeatherCommand::SetMin(0.1)));
        assert_eq!(WeatherCommand::parse_line("setMax 80"), Ok(WeatherCommand::SetMax(0.8)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(WeatherCommand::parse_line(""), Err(CommandError::Usage));
        assert_eq!(WeatherCommand::parse_line("setfoo 10"), Err(CommandError::Usage));
        assert_eq!(WeatherCommand::parse_line("a b c"), Err(CommandError::Usage));
        assert_eq!(WeatherCommand::parse_line("lots"), Err(CommandError::NotANumber("lots".into())));
        assert_eq!(WeatherCommand::parse_line("150"), Err(CommandError::OutOfRange(150.0)));
        assert_eq!(WeatherCommand::parse_line("setmin -1"), Err(CommandError::OutOfRange(-1.0)));
        assert_eq!(CommandError::Usage.to_string(), USAGE);
    }

    #[test]
    fn test_execute() {
        let mut authority = WeatherAuthority::default();
        assert!(authority.is_host_default());

        assert_eq!(authority.execute(WeatherCommand::Set(0.5), 0.0), "Rain intensity set to 50.0");
        assert_eq!(authority.intensity(), 0.5);

        authority.execute(WeatherCommand::SetMax(0.3), 0.0);
        authority.execute(WeatherCommand::Set(0.9), 0.0);
        assert!((authority.intensity() - 0.3).abs() < 1e-6);

        assert_eq!(
            authority.execute(WeatherCommand::Status, 0.25),
            "intensity: 30.0; min: 0.0; max: 30.0; strength: 25.0"
        );

        authority.execute(WeatherCommand::Reset, 0.0);
        assert_eq!(authority.intensity(), USE_HOST_DEFAULT);
    }

    #[test]
    fn test_bounds_stay_ordered() {
        let mut authority = WeatherAuthority::default();
        authority.set_max(0.4);
        authority.set_min(0.9);
        assert_eq!(authority.bounds(), WeatherBounds::new(0.4, 0.4));
    }
}
