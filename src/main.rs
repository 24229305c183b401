//! ble-light firmware - BLE GATT peripheral driving a light and an LED.
//!
//! Target: nRF52840 with SoftDevice S140.
//!
//! Architecture:
//!   ┌───────────────┐   ┌──────────────────┐   ┌──────────────┐
//!   │  SoftDevice   │   │  Peripheral task │   │  Button task │
//!   │  event loop   │──▶│  advertise/GATT  │◀─▶│  long press  │
//!   └───────────────┘   └────────┬─────────┘   └──────────────┘
//!                                │ commands
//!                         ┌──────▼──────┐
//!                         │ Light / LED │
//!                         └─────────────┘
//!
//! The peripheral task and the button task share one advertising
//! controller behind a mutex; the button task only asks for advertising,
//! the peripheral task owns the radio.

#![no_std]
#![no_main]

mod ble;
mod board;
mod button;
mod storage;

use {defmt_rtt as _, panic_probe as _};

use ble::advertiser::{self, AdvSignal, SharedAdvertising, SignalSink, SoftdeviceAdvertiser};
use ble::server::{self, Server};
use ble_light::advertising::AdvertisingController;
use ble_light::config::DEVICE_NAME;
use ble_light::Error;
use board::BoardOutputs;
use defmt::{error, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::config::Config;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use nrf_softdevice::{Flash, Softdevice};
use static_cell::StaticCell;

static SERVER: StaticCell<Server> = StaticCell::new();
static ADVERTISING: StaticCell<SharedAdvertising> = StaticCell::new();
static ADV_REQUESTS: AdvSignal = Signal::new();

type BoardPins = BoardOutputs<Output<'static>>;

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    ble::run_softdevice(sd).await
}

#[embassy_executor::task]
async fn peripheral_task(
    sd: &'static Softdevice,
    server: &'static Server,
    ctx: &'static SharedAdvertising,
    mut pins: BoardPins,
) -> ! {
    advertiser::run_peripheral(sd, server, ctx, &ADV_REQUESTS, &mut pins).await
}

#[embassy_executor::task]
async fn button_task(button: Input<'static>, ctx: &'static SharedAdvertising) -> ! {
    button::long_press_task(button, ctx).await
}

/// Fatal startup error: log it and stop here.
fn halt(step: &str, e: Error) -> ! {
    error!("{} failed: {}", step, e);
    loop {
        cortex_m::asm::wfi();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ble-light starting");

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    // GPIO: button P0.11, Light P0.03, LED P0.04.
    let button = Input::new(p.P0_11, Pull::Up);
    let light = Output::new(p.P0_03, Level::Low, OutputDrive::Standard);
    let led = Output::new(p.P0_04, Level::Low, OutputDrive::Standard);
    let pins = BoardOutputs::new(light, led);

    let sd = ble::enable_softdevice();

    let server = match Server::new(sd) {
        Ok(server) => SERVER.init(server),
        Err(e) => {
            error!("GATT registration error: {:?}", e);
            halt("GATT registration", Error::ServiceRegistration)
        }
    };
    if let Err(e) = server::seed_read_values(server) {
        halt("Attribute seeding", e);
    }
    info!("GATT service registered");

    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(softdevice_task(sd)));

    if let Err(e) = storage::init(&mut Flash::take(sd)).await {
        halt("Storage init", e);
    }

    let radio = SoftdeviceAdvertiser::new(DEVICE_NAME, SignalSink(&ADV_REQUESTS));
    let controller = AdvertisingController::new(radio);
    let ctx: &'static SharedAdvertising = ADVERTISING.init(Mutex::new(controller));

    // Stack is up: prepare the advertisement but wait for the button.
    if let Err(e) = ctx.lock().await.refresh_fields() {
        warn!("Advertising fields not set: {}", e);
    }

    unwrap!(spawner.spawn(peripheral_task(sd, server, ctx, pins)));
    unwrap!(spawner.spawn(button_task(button, ctx)));

    info!("Ready - hold the button for 2 s to advertise");
}
