//! Host-testable library interface for ble-light.
//!
//! Everything that decides *what* the firmware does lives here and builds
//! on the host without hardware: command parsing and dispatch, the GATT
//! service table, the advertising controller, the GAP event handler and
//! the long-press detector. The embedded binary (`main.rs`, `#![no_std]`,
//! `#![no_main]`) binds these to the SoftDevice, GPIO and flash.
//!
//! Usage: `cargo test --lib --tests`
//!
//! Firmware: `cargo build --release --features embedded --target thumbv7em-none-eabihf`

#![cfg_attr(not(test), no_std)]

pub mod advertising;
pub mod command;
pub mod config;
pub mod error;
pub mod gap;
pub mod gatt;
pub mod gpio;
pub mod long_press;

#[cfg(test)]
mod testing;

pub use error::{AdvStartError, Error};
