//! GPIO capability used by the command dispatcher and the button poller.
//!
//! The firmware implements [`OutputPins`] over embassy-nrf outputs; tests
//! implement it over plain fields.

/// Logic level of a pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Logical role of an output line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    Light,
    Led,
}

/// The two output lines, addressed by role.
///
/// `set` must not block. `get` reports the last level driven.
pub trait OutputPins {
    fn set(&mut self, pin: PinRole, level: Level);
    fn get(&mut self, pin: PinRole) -> Level;
}

/// Level the button input reads while pressed (pulled up, shorts to ground).
pub const BUTTON_ACTIVE_LEVEL: Level = Level::Low;

/// Whether a sampled button level means "pressed".
pub fn button_pressed(level: Level) -> bool {
    level == BUTTON_ACTIVE_LEVEL
}
