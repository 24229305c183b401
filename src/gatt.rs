//! The light-control GATT service: one primary service, three characteristics.
//!
//! ```text
//! 0x0180  primary service
//! ├─ 0xFEF4  read   → "Data from the server"
//! ├─ 0xDEAD  write  → command dispatcher
//! └─ 0xDEAE  read   → "Message from Innovate Yourself"
//! ```
//!
//! Reads are served from fixed payloads and never change state; writes go
//! through [`crate::command::dispatch`].

use crate::config::{COMMAND_CHAR_UUID, DATA_CHAR_UUID, MESSAGE_CHAR_UUID, SERVICE_UUID};
use crate::error::Error;
use heapless::Vec;

pub const DATA_PAYLOAD: &[u8] = b"Data from the server";
pub const MESSAGE_PAYLOAD: &[u8] = b"Message from Innovate Yourself";

/// Attribute access permitted on a characteristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Properties {
    pub read: bool,
    pub write: bool,
}

impl Properties {
    pub const READ: Self = Self {
        read: true,
        write: false,
    };
    pub const WRITE: Self = Self {
        read: false,
        write: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Characteristic {
    Data,
    Command,
    Message,
}

impl Characteristic {
    pub fn uuid(self) -> u16 {
        match self {
            Characteristic::Data => DATA_CHAR_UUID,
            Characteristic::Command => COMMAND_CHAR_UUID,
            Characteristic::Message => MESSAGE_CHAR_UUID,
        }
    }

    pub fn properties(self) -> Properties {
        match self {
            Characteristic::Data | Characteristic::Message => Properties::READ,
            Characteristic::Command => Properties::WRITE,
        }
    }

    /// Fixed value returned to readers; `None` for the write-only command.
    pub fn read_payload(self) -> Option<&'static [u8]> {
        match self {
            Characteristic::Data => Some(DATA_PAYLOAD),
            Characteristic::Message => Some(MESSAGE_PAYLOAD),
            Characteristic::Command => None,
        }
    }

    /// Append the read payload to `out`.
    ///
    /// Leaves `out` untouched for a characteristic without one.
    pub fn read_into<const N: usize>(self, out: &mut Vec<u8, N>) -> Result<(), Error> {
        match self.read_payload() {
            Some(payload) => out
                .extend_from_slice(payload)
                .map_err(|_| Error::BufferOverflow),
            None => Ok(()),
        }
    }
}

/// Static description of a primary service.
pub struct ServiceDef {
    pub uuid: u16,
    pub characteristics: [Characteristic; 3],
}

/// The service registered with the stack at boot.
pub const SERVICE: ServiceDef = ServiceDef {
    uuid: SERVICE_UUID,
    characteristics: [
        Characteristic::Data,
        Characteristic::Command,
        Characteristic::Message,
    ],
};

impl ServiceDef {
    /// Characteristics whose value is loaded into the attribute table at boot.
    pub fn readable(&self) -> impl Iterator<Item = Characteristic> + '_ {
        self.characteristics
            .iter()
            .copied()
            .filter(|c| c.properties().read)
    }
}
