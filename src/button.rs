//! Advertise button polling.
//!
//! The button (active-low with internal pull-up) is sampled every
//! `BUTTON_POLL_MS`. Holding it for `LONG_PRESS_MS` starts advertising and
//! latches advertising on; from then on every tick re-issues a start.

use crate::ble::advertiser::{log_start, SharedAdvertising};
use ble_light::config::{BUTTON_POLL_MS, LONG_PRESS_DEBOUNCE_MS};
use ble_light::gpio::{button_pressed, Level};
use ble_light::long_press::{Clock, LongPressTrigger};
use defmt::info;
use embassy_nrf::gpio::Input;
use embassy_time::{Duration, Instant, Timer};

/// Milliseconds since boot, from the Embassy time driver.
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Run the long-press loop forever.
pub async fn long_press_task(button: Input<'static>, ctx: &'static SharedAdvertising) -> ! {
    let clock = UptimeClock;
    let mut trigger = LongPressTrigger::default();

    loop {
        let pressed = button_pressed(Level::from(button.is_high()));

        let fired = trigger.sample(&clock, pressed, &mut *ctx.lock().await);
        if let Some(outcome) = fired {
            info!("Long press detected, advertising enabled");
            log_start(outcome);
            // Debounce: keep a held button from firing again straight away.
            Timer::after(Duration::from_millis(LONG_PRESS_DEBOUNCE_MS)).await;
        }

        Timer::after(Duration::from_millis(BUTTON_POLL_MS)).await;

        if let Some(outcome) = trigger.reassert(&mut *ctx.lock().await) {
            log_start(outcome);
        }
    }
}
