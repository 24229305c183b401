//! ASCII command parsing and dispatch for the command characteristic.
//!
//! A write payload is bounded by its reported length and ends early at the
//! first NUL, so both `b"LIGHT ON"` and `b"LIGHT ON\0"` select the same
//! command. Whatever remains must equal a command literal byte for byte;
//! anything else is [`Command::Unrecognized`] and touches no pin.

use crate::gpio::{Level, OutputPins, PinRole};

/// A recognised command, or the catch-all for everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    LightOn,
    LightOff,
    LedOn,
    LedOff,
    Unrecognized,
}

/// Literal → command, matched in order; first match wins.
const COMMAND_TABLE: [(&[u8], Command); 4] = [
    (b"LIGHT ON", Command::LightOn),
    (b"LIGHT OFF", Command::LightOff),
    (b"LED ON", Command::LedOn),
    (b"LED OFF", Command::LedOff),
];

impl Command {
    pub fn parse(payload: &[u8]) -> Self {
        let text = match payload.iter().position(|&b| b == 0) {
            Some(end) => &payload[..end],
            None => payload,
        };

        COMMAND_TABLE
            .iter()
            .find(|(literal, _)| *literal == text)
            .map(|&(_, command)| command)
            .unwrap_or(Command::Unrecognized)
    }

    /// The pin write this command performs, if any.
    pub fn action(self) -> Option<(PinRole, Level)> {
        match self {
            Command::LightOn => Some((PinRole::Light, Level::High)),
            Command::LightOff => Some((PinRole::Light, Level::Low)),
            Command::LedOn => Some((PinRole::Led, Level::High)),
            Command::LedOff => Some((PinRole::Led, Level::Low)),
            Command::Unrecognized => None,
        }
    }
}

/// Handle one write to the command characteristic.
///
/// Performs at most one `set`, then zero-fills `buf` across its whole
/// length whether or not the payload was recognised. Never fails; the
/// returned command is for logging.
pub fn dispatch<P: OutputPins>(buf: &mut [u8], pins: &mut P) -> Command {
    let command = Command::parse(buf);
    if let Some((pin, level)) = command.action() {
        pins.set(pin, level);
    }
    buf.fill(0);
    command
}
