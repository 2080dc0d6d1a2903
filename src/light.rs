//! The smart light used throughout the documentation and tests.
//!
//! The light is the receiver side of the crate's examples: commands mutate it
//! through its own methods and it knows nothing about the history tracking
//! them.

use crate::Command;
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A light with a power switch and a brightness level.
///
/// # Examples
/// ```
/// use rewind::light::{Light, LightCommand};
/// use rewind::History;
///
/// let mut light = Light::new();
/// let mut history = History::new();
///
/// history.perform(&mut light, LightCommand::TurnOn).unwrap();
/// assert!(light.is_on());
/// history.undo(&mut light).unwrap();
/// assert!(!light.is_on());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Light {
    on: bool,
    brightness: u8,
}

impl Light {
    /// The highest brightness level the light supports.
    pub const MAX_BRIGHTNESS: u8 = 100;

    /// Returns a light that is switched off.
    pub fn new() -> Light {
        Light::default()
    }

    /// Returns `true` if the light is on.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Returns the current brightness level.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Turns the light on at full brightness.
    pub fn turn_on(&mut self) {
        self.on = true;
        self.brightness = Light::MAX_BRIGHTNESS;
    }

    /// Turns the light off.
    pub fn turn_off(&mut self) {
        self.on = false;
        self.brightness = 0;
    }

    /// Sets the brightness level.
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }
}

/// The commands understood by the light.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LightCommand {
    /// Turn the light on at full brightness.
    TurnOn,
    /// Turn the light off.
    TurnOff,
    /// Change the brightness level.
    SetBrightness {
        /// The level to change to.
        to: u8,
        /// The level the light had when the command was created.
        ///
        /// Captured up front: by the time the command is undone, the old
        /// level can no longer be read back from the light.
        previous: u8,
    },
}

impl LightCommand {
    /// Returns a brightness change, capturing the current level for undo.
    pub fn set_brightness(light: &Light, to: u8) -> LightCommand {
        LightCommand::SetBrightness {
            to,
            previous: light.brightness(),
        }
    }
}

impl Command for LightCommand {
    type Target = Light;
    type Error = LightError;

    fn apply(&mut self, light: &mut Light) -> Result<(), LightError> {
        match *self {
            LightCommand::TurnOn => light.turn_on(),
            LightCommand::TurnOff => light.turn_off(),
            LightCommand::SetBrightness { to, .. } => {
                if to > Light::MAX_BRIGHTNESS {
                    return Err(LightError::OutOfRange(to));
                }
                light.set_brightness(to);
            }
        }
        Ok(())
    }

    fn undo(&mut self, light: &mut Light) -> Result<(), LightError> {
        match *self {
            LightCommand::TurnOn => light.turn_off(),
            LightCommand::TurnOff => light.turn_on(),
            LightCommand::SetBrightness { previous, .. } => light.set_brightness(previous),
        }
        Ok(())
    }

    fn text(&self) -> String {
        match *self {
            LightCommand::TurnOn => String::from("turn the light on"),
            LightCommand::TurnOff => String::from("turn the light off"),
            LightCommand::SetBrightness { to, .. } => format!("set brightness to {to}"),
        }
    }
}

/// The ways a light command can fail.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LightError {
    /// The requested brightness level is above [`Light::MAX_BRIGHTNESS`].
    OutOfRange(u8),
}

impl Display for LightError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LightError::OutOfRange(level) => write!(
                f,
                "brightness level {level} is out of range (max {})",
                Light::MAX_BRIGHTNESS
            ),
        }
    }
}

impl std::error::Error for LightError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch() {
        let mut light = Light::new();
        assert!(!light.is_on());
        light.turn_on();
        assert!(light.is_on());
        assert_eq!(light.brightness(), Light::MAX_BRIGHTNESS);
        light.turn_off();
        assert!(!light.is_on());
        assert_eq!(light.brightness(), 0);
    }

    #[test]
    fn set_brightness_captures_previous() {
        let mut light = Light::new();
        light.turn_on();
        light.set_brightness(60);
        let command = LightCommand::set_brightness(&light, 20);
        assert_eq!(command, LightCommand::SetBrightness { to: 20, previous: 60 });
    }

    #[test]
    fn brightness_out_of_range() {
        let mut light = Light::new();
        light.turn_on();
        let mut command = LightCommand::set_brightness(&light, 150);
        assert_eq!(command.apply(&mut light), Err(LightError::OutOfRange(150)));
        assert_eq!(light.brightness(), Light::MAX_BRIGHTNESS);
    }
}
