//! Long-press detection for the advertise button.
//!
//! The button is sampled every [`BUTTON_POLL_MS`](crate::config::BUTTON_POLL_MS).
//! A press held continuously for the hold time fires once; the detector
//! then holds off for the debounce time before timing the next press, so
//! a button that stays down fires once per hold + debounce window.
//!
//! ```text
//!            pressed                 held ≥ hold
//!   Idle ─────────────▶ Pressed(since) ──────────▶ Triggered(at)
//!    ▲                      │   ▲                      │
//!    └──── released ────────┘   └── pressed: since =  ─┘
//!    ▲                               at + debounce     │
//!    └──────────────── released ───────────────────────┘
//! ```
//!
//! The first firing latches advertising on for the rest of the process;
//! from then on [`LongPressTrigger::reassert`] re-issues a start every poll.

use crate::advertising::{AdvertisingController, GapAdvertiser, StartOutcome};
use crate::config::{LONG_PRESS_DEBOUNCE_MS, LONG_PRESS_MS};

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressState {
    #[default]
    Idle,
    Pressed { since: u64 },
    Triggered { at: u64 },
}

/// Clock-driven press timer; knows nothing about advertising.
#[derive(Clone, Debug)]
pub struct PressDetector {
    hold_ms: u64,
    debounce_ms: u64,
    state: PressState,
}

impl Default for PressDetector {
    fn default() -> Self {
        Self::new(LONG_PRESS_MS, LONG_PRESS_DEBOUNCE_MS)
    }
}

impl PressDetector {
    pub const fn new(hold_ms: u64, debounce_ms: u64) -> Self {
        Self {
            hold_ms,
            debounce_ms,
            state: PressState::Idle,
        }
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    /// Feed one sample. Returns `true` on the sample where the hold time is reached.
    pub fn sample(&mut self, now_ms: u64, pressed: bool) -> bool {
        let since = match (self.state, pressed) {
            (_, false) => {
                self.state = PressState::Idle;
                return false;
            }
            (PressState::Idle, true) => now_ms,
            (PressState::Pressed { since }, true) => since,
            (PressState::Triggered { at }, true) => at + self.debounce_ms,
        };

        if now_ms.saturating_sub(since) >= self.hold_ms {
            self.state = PressState::Triggered { at: now_ms };
            true
        } else {
            self.state = PressState::Pressed { since };
            false
        }
    }
}

/// Press detector plus the advertising-enabled latch.
///
/// Owned by the button task, so the latch needs no lock; the controller
/// it drives is the shared one.
#[derive(Clone, Debug, Default)]
pub struct LongPressTrigger {
    detector: PressDetector,
    advertising_enabled: bool,
}

impl LongPressTrigger {
    pub fn new(detector: PressDetector) -> Self {
        Self {
            detector,
            advertising_enabled: false,
        }
    }

    /// Sample the button. On a long press, starts advertising and latches
    /// the enabled flag; the caller then sleeps the debounce time.
    pub fn sample<C: Clock, A: GapAdvertiser>(
        &mut self,
        clock: &C,
        pressed: bool,
        ctrl: &mut AdvertisingController<A>,
    ) -> Option<StartOutcome> {
        if !self.detector.sample(clock.now_ms(), pressed) {
            return None;
        }
        let outcome = ctrl.start();
        self.advertising_enabled = true;
        Some(outcome)
    }

    /// Once latched, issue another start regardless of what the radio is doing.
    pub fn reassert<A: GapAdvertiser>(
        &mut self,
        ctrl: &mut AdvertisingController<A>,
    ) -> Option<StartOutcome> {
        self.advertising_enabled.then(|| ctrl.start())
    }

    pub fn advertising_enabled(&self) -> bool {
        self.advertising_enabled
    }

    pub fn state(&self) -> PressState {
        self.detector.state()
    }
}
