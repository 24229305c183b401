//! SoftDevice side of the advertising controller.
//!
//! Start gating lives in [`LinkGatedAdvertiser`]; accepted requests reach
//! the peripheral task through [`AdvSignal`]. The peripheral task owns the
//! radio: it advertises, serves the connection and turns every outcome into
//! a [`GapEvent`] for the connection event handler.

use crate::ble::server::{self, Server};
use ble_light::advertising::{
    AdvRequest, AdvRequestSink, AdvertisingController, LinkGatedAdvertiser, LinkState,
    StartOutcome,
};
use ble_light::config::{
    ADV_RETRY_BACKOFF_MS, HCI_CONN_FAILED_TO_BE_ESTABLISHED, HCI_REMOTE_USER_TERMINATED,
    HCI_SUCCESS,
};
use ble_light::gap::{handle_gap_event, GapEvent, GapResponse};
use ble_light::gpio::OutputPins;
use defmt::{debug, info, trace, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::ble::peripheral::{self, AdvertiseError, ConnectableAdvertisement};
use nrf_softdevice::Softdevice;

pub type AdvSignal = Signal<CriticalSectionRawMutex, AdvRequest>;

/// Hands accepted requests to the peripheral task.
pub struct SignalSink(pub &'static AdvSignal);

impl AdvRequestSink for SignalSink {
    fn submit(&mut self, request: AdvRequest) {
        self.0.signal(request);
    }
}

pub type SoftdeviceAdvertiser = LinkGatedAdvertiser<SignalSink>;

/// The advertising context shared by the peripheral task and the button task.
pub type SharedAdvertising = Mutex<CriticalSectionRawMutex, AdvertisingController<SoftdeviceAdvertiser>>;

/// Log what a start request came to. Over-calls are routine once the
/// long-press latch is set, so they stay at trace level.
pub fn log_start(outcome: StartOutcome) {
    match outcome {
        StartOutcome::Started => info!("Advertising started"),
        StartOutcome::Ignored(e) if e.is_over_call() => trace!("Advertising start ignored: {}", e),
        StartOutcome::Ignored(e) => warn!("Advertising start failed: {}", e),
    }
}

async fn set_link(ctx: &SharedAdvertising, link: LinkState) {
    ctx.lock().await.advertiser_mut().set_link(link);
}

/// Run the connection event handler under the context lock and log its response.
async fn deliver(ctx: &SharedAdvertising, event: GapEvent) {
    info!("GAP event: {}", event);
    let response = handle_gap_event(&mut *ctx.lock().await, event);
    match response {
        GapResponse::NoAction => debug!("GAP: no advertising action"),
        GapResponse::Restarted(restart) => {
            if let Err(e) = restart.fields {
                warn!("Advertising fields not refreshed: {}", e);
            }
            log_start(restart.start);
        }
    }
}

/// Peripheral loop - waits for an advertising request, advertises until a
/// central connects, then serves GATT until the link drops.
pub async fn run_peripheral<P: OutputPins>(
    sd: &'static Softdevice,
    server: &'static Server,
    ctx: &'static SharedAdvertising,
    requests: &'static AdvSignal,
    pins: &mut P,
) -> ! {
    loop {
        let request = requests.wait().await;
        debug!("Advertising with {}", request.params);

        let adv = ConnectableAdvertisement::ScannableUndirected {
            adv_data: &request.adv_data,
            scan_data: &[],
        };
        // No timeout: broadcast until a central connects.
        let config = peripheral::Config::default();

        let event = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => {
                set_link(ctx, LinkState::Connected).await;
                deliver(
                    ctx,
                    GapEvent::Connect {
                        status: HCI_SUCCESS,
                    },
                )
                .await;

                let disconnected =
                    gatt_server::run(&conn, server, |e| server::on_event(server, e, pins)).await;
                info!("Connection closed: {:?}", disconnected);

                set_link(ctx, LinkState::Idle).await;
                // Not the real HCI reason: `gatt_server::run` does not report it.
                // Always non-zero, so every disconnect re-advertises.
                GapEvent::Disconnect {
                    reason: HCI_REMOTE_USER_TERMINATED,
                }
            }
            Err(AdvertiseError::Timeout) => {
                set_link(ctx, LinkState::Idle).await;
                GapEvent::AdvComplete
            }
            Err(e) => {
                warn!("Advertising failed: {:?}", e);
                set_link(ctx, LinkState::Idle).await;
                Timer::after(Duration::from_millis(ADV_RETRY_BACKOFF_MS)).await;
                GapEvent::Connect {
                    status: HCI_CONN_FAILED_TO_BE_ESTABLISHED,
                }
            }
        };

        deliver(ctx, event).await;
    }
}
