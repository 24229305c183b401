//! SoftDevice GATT server for the light-control service.
//!
//! The `gatt_service` UUIDs mirror `ble_light::config` (`SERVICE_UUID`,
//! `DATA_CHAR_UUID`, `COMMAND_CHAR_UUID`, `MESSAGE_CHAR_UUID`).

use ble_light::command::{self, Command};
use ble_light::config::{COMMAND_MAX_LEN, READ_VALUE_MAX_LEN};
use ble_light::gatt::{Characteristic, SERVICE};
use ble_light::gpio::OutputPins;
use ble_light::Error;
use defmt::{debug, info, warn};
use heapless::Vec;

#[nrf_softdevice::gatt_service(uuid = "0180")]
pub struct LightService {
    // "Data from the server"
    #[characteristic(uuid = "fef4", read)]
    pub data: Vec<u8, READ_VALUE_MAX_LEN>,

    // ASCII commands ("LIGHT ON", "LED OFF", ...)
    #[characteristic(uuid = "dead", write)]
    pub command: Vec<u8, COMMAND_MAX_LEN>,

    // "Message from Innovate Yourself"
    #[characteristic(uuid = "deae", read)]
    pub message: Vec<u8, READ_VALUE_MAX_LEN>,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub light: LightService,
}

/// Load the read-only payloads into the attribute table.
///
/// The SoftDevice answers reads from the table itself, so this happens once
/// at boot and reads never reach the application.
pub fn seed_read_values(server: &Server) -> Result<(), Error> {
    for characteristic in SERVICE.readable() {
        let mut value: Vec<u8, READ_VALUE_MAX_LEN> = Vec::new();
        characteristic.read_into(&mut value)?;

        let stored = match characteristic {
            Characteristic::Data => server.light.data_set(&value),
            Characteristic::Message => server.light.message_set(&value),
            Characteristic::Command => continue,
        };
        stored.map_err(|_| Error::AttributeValue)?;
        debug!("Seeded {=u16:#x} ({} bytes)", characteristic.uuid(), value.len());
    }

    Ok(())
}

/// Handle one GATT server event.
pub fn on_event<P: OutputPins>(server: &Server, event: ServerEvent, pins: &mut P) {
    match event {
        ServerEvent::Light(LightServiceEvent::CommandWrite(mut value)) => {
            let len = value.len();
            match command::dispatch(&mut value, pins) {
                Command::Unrecognized => warn!("Unrecognized command ({} bytes)", len),
                cmd => info!("Command: {}", cmd),
            }

            // The stack keeps its own copy of the written value; clear that too.
            if let Err(e) = server.light.command_set(&value) {
                warn!("Could not clear command value: {:?}", e);
            }
        }
    }
}
