//! In-memory stand-ins for the GPIO, BLE stack and clock, shared by the
//! unit tests.

use core::cell::Cell;
use std::vec::Vec;

use crate::advertising::{AdvFields, AdvParams, GapAdvertiser, LinkState};
use crate::error::{AdvStartError, Error};
use crate::gpio::{Level, OutputPins, PinRole};
use crate::long_press::Clock;

#[derive(Default)]
pub struct FakePins {
    pub light: Level,
    pub led: Level,
    pub writes: Vec<(PinRole, Level)>,
}

impl FakePins {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputPins for FakePins {
    fn set(&mut self, pin: PinRole, level: Level) {
        self.writes.push((pin, level));
        match pin {
            PinRole::Light => self.light = level,
            PinRole::Led => self.led = level,
        }
    }

    fn get(&mut self, pin: PinRole) -> Level {
        match pin {
            PinRole::Light => self.light,
            PinRole::Led => self.led,
        }
    }
}

/// Records every call and gates starts on [`LinkState`] like the firmware does.
pub struct FakeAdvertiser {
    pub name: &'static str,
    pub link: LinkState,
    pub fields: Option<AdvFields>,
    pub set_fields_calls: usize,
    pub start_calls: Vec<AdvParams>,
}

impl FakeAdvertiser {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            link: LinkState::Idle,
            fields: None,
            set_fields_calls: 0,
            start_calls: Vec::new(),
        }
    }
}

impl GapAdvertiser for FakeAdvertiser {
    fn device_name(&self) -> &str {
        self.name
    }

    fn set_fields(&mut self, fields: &AdvFields) -> Result<(), Error> {
        self.set_fields_calls += 1;
        self.fields = Some(fields.clone());
        Ok(())
    }

    fn adv_start(&mut self, params: &AdvParams) -> Result<(), AdvStartError> {
        self.start_calls.push(*params);
        self.link.admit_start()?;
        self.link = LinkState::Advertising;
        Ok(())
    }
}

pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
