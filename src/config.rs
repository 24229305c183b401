//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// GAP

/// Name written into the SoftDevice GAP service and advertised as the
/// complete local name.
pub const DEVICE_NAME: &str = "BLE-Server";

// GATT
//
// The `gatt_service` attributes in `src/ble/server.rs` repeat these as
// string literals (the macro does not accept constants); keep them in sync.

/// Primary service UUID (16-bit).
pub const SERVICE_UUID: u16 = 0x0180;

/// Read-only characteristic returning [`crate::gatt::DATA_PAYLOAD`].
pub const DATA_CHAR_UUID: u16 = 0xFEF4;

/// Write-only characteristic receiving ASCII commands.
pub const COMMAND_CHAR_UUID: u16 = 0xDEAD;

/// Read-only characteristic returning [`crate::gatt::MESSAGE_PAYLOAD`].
///
/// Older firmware reused `0xDEAD` here, which made the two attributes
/// indistinguishable by UUID.
pub const MESSAGE_CHAR_UUID: u16 = 0xDEAE;

/// Largest command write accepted (default ATT MTU of 23 minus the 3-byte header).
pub const COMMAND_MAX_LEN: usize = 20;

/// Storage size for the read-only characteristic values.
pub const READ_VALUE_MAX_LEN: usize = 32;

// HCI status codes carried by GAP events

pub const HCI_SUCCESS: u8 = 0x00;
pub const HCI_REMOTE_USER_TERMINATED: u8 = 0x13;
pub const HCI_CONN_FAILED_TO_BE_ESTABLISHED: u8 = 0x3E;

// Advertising

/// Pause before reporting a failed advertising attempt, so a stack that
/// keeps refusing cannot starve the executor.
pub const ADV_RETRY_BACKOFF_MS: u64 = 1000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button (advertise) → P0.11  (DK Button 1, active-low, internal pull-up)
//   Light              → P0.03
//   LED                → P0.04

/// Button must be held this long before advertising is enabled (ms).
pub const LONG_PRESS_MS: u64 = 2000;

/// Hold-off after a long press fires, before the next press is timed (ms).
pub const LONG_PRESS_DEBOUNCE_MS: u64 = 100;

/// Button sampling period (ms).
pub const BUTTON_POLL_MS: u64 = 10;

// Settings storage

/// Flash page index where the settings partition starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for the settings partition.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
