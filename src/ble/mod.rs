//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **GATT server** - the light-control service; command writes are
//!    dispatched straight to the board outputs.
//! 2. **Advertiser** - the SoftDevice side of the advertising controller;
//!    start requests are handed to the peripheral task through a signal.
//! 3. **Peripheral task** - advertises, serves one connection at a time and
//!    reports connect/disconnect/adv-complete to the GAP event handler.

pub mod advertiser;
pub mod server;

use ble_light::config::DEVICE_NAME;
use core::mem;
use nrf_softdevice::{raw, Softdevice};

/// Enable the SoftDevice: one peripheral link, no central role, GAP name
/// [`DEVICE_NAME`].
pub fn enable_softdevice() -> &'static mut Softdevice {
    let config = nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    };

    Softdevice::enable(&config)
}

/// Run the SoftDevice event loop - must be spawned as a dedicated Embassy task.
///
/// All GATT writes and GAP outcomes are produced on behalf of this loop.
pub async fn run_softdevice(sd: &'static Softdevice) -> ! {
    sd.run().await
}
