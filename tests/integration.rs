//! Integration tests for ble-light host-testable logic.
//!
//! Wires the library pieces together the way the firmware does, with the
//! radio, pins and clock replaced by in-memory stand-ins.

use std::cell::Cell;

use ble_light::advertising::{
    AdvParams, AdvRequest, AdvRequestSink, AdvertisingController, LinkGatedAdvertiser, LinkState,
    StartOutcome,
};
use ble_light::command::{dispatch, Command};
use ble_light::config::{
    BUTTON_POLL_MS, COMMAND_CHAR_UUID, DATA_CHAR_UUID, DEVICE_NAME, HCI_CONN_FAILED_TO_BE_ESTABLISHED,
    HCI_SUCCESS, LONG_PRESS_DEBOUNCE_MS, MESSAGE_CHAR_UUID,
};
use ble_light::gap::{handle_gap_event, GapEvent, GapResponse};
use ble_light::gatt::{Characteristic, SERVICE};
use ble_light::gpio::{Level, OutputPins, PinRole};
use ble_light::long_press::{Clock, LongPressTrigger};
use ble_light::AdvStartError;

/// Collects what the advertiser hands to the radio.
#[derive(Default)]
struct Broadcasts(Vec<AdvRequest>);

impl AdvRequestSink for Broadcasts {
    fn submit(&mut self, request: AdvRequest) {
        self.0.push(request);
    }
}

type Radio = LinkGatedAdvertiser<Broadcasts>;

fn radio() -> Radio {
    LinkGatedAdvertiser::new(DEVICE_NAME, Broadcasts::default())
}

#[derive(Default)]
struct Pins {
    light: Level,
    led: Level,
}

impl OutputPins for Pins {
    fn set(&mut self, pin: PinRole, level: Level) {
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

#[derive(Default)]
struct TestClock(Cell<u64>);

impl Clock for TestClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

impl TestClock {
    fn tick(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

/// One button-task iteration: sample, debounce if fired, poll sleep, reassert.
fn button_tick(
    trigger: &mut LongPressTrigger,
    clock: &TestClock,
    pressed: bool,
    ctrl: &mut AdvertisingController<Radio>,
) -> Option<StartOutcome> {
    let fired = trigger.sample(clock, pressed, ctrl);
    if fired.is_some() {
        clock.tick(LONG_PRESS_DEBOUNCE_MS);
    }
    clock.tick(BUTTON_POLL_MS);
    trigger.reassert(ctrl);
    fired
}

/// Simulated GATT write: the stack hands over at most 20 bytes.
fn write_command(payload: &[u8], pins: &mut Pins) -> Command {
    let mut buf = [0u8; 20];
    buf[..payload.len()].copy_from_slice(payload);
    let cmd = dispatch(&mut buf[..payload.len()], pins);
    assert!(buf.iter().all(|&b| b == 0));
    cmd
}

#[test]
fn boot_long_press_connect_and_control() {
    let clock = TestClock::default();
    let mut pins = Pins::default();
    let mut ctrl = AdvertisingController::new(radio());
    let mut trigger = LongPressTrigger::default();

    // Boot: fields prepared, nothing broadcast.
    ctrl.refresh_fields().unwrap();
    assert!(ctrl.advertiser().sink().0.is_empty());

    // Hold the button for 2.1 s.
    let mut fired = Vec::new();
    while clock.now_ms() < 2100 {
        if let Some(outcome) = button_tick(&mut trigger, &clock, true, &mut ctrl) {
            fired.push(outcome);
        }
    }
    assert_eq!(fired, vec![StartOutcome::Started]);
    assert!(trigger.advertising_enabled());
    assert_eq!(ctrl.params(), AdvParams::CONNECTABLE_GENERAL);

    // Advertised name is "BLE-Server".
    let adv = &ctrl.advertiser().sink().0[0].adv_data;
    assert_eq!(&adv[..3], &[0x02, 0x01, 0x06]);
    assert_eq!(adv[4], 0x09);
    assert_eq!(&adv[5..], DEVICE_NAME.as_bytes());

    // Client connects.
    ctrl.advertiser_mut().set_link(LinkState::Connected);
    assert_eq!(
        handle_gap_event(&mut ctrl, GapEvent::Connect { status: HCI_SUCCESS }),
        GapResponse::NoAction
    );

    // The latched trigger keeps asking; the stack refuses while connected.
    assert_eq!(
        trigger.reassert(&mut ctrl),
        Some(StartOutcome::Ignored(AdvStartError::Busy))
    );

    assert_eq!(write_command(b"LIGHT ON", &mut pins), Command::LightOn);
    assert_eq!(pins.get(PinRole::Light), Level::High);

    assert_eq!(write_command(b"LED ON", &mut pins), Command::LedOn);
    assert_eq!(write_command(b"LED OFF", &mut pins), Command::LedOff);
    assert_eq!(u8::from(pins.get(PinRole::Led)), 0);
    assert_eq!(u8::from(pins.get(PinRole::Light)), 1);

    // Client drops with a failure status; advertising resumes by itself.
    ctrl.advertiser_mut().set_link(LinkState::Idle);
    let response = handle_gap_event(
        &mut ctrl,
        GapEvent::Disconnect {
            reason: HCI_CONN_FAILED_TO_BE_ESTABLISHED,
        },
    );
    match response {
        GapResponse::Restarted(restart) => {
            assert_eq!(restart.fields, Ok(()));
            assert_eq!(restart.start, StartOutcome::Started);
        }
        other => panic!("expected a restart, got {:?}", other),
    }
    assert_eq!(ctrl.advertiser().link(), LinkState::Advertising);
    let requests = &ctrl.advertiser().sink().0;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1], requests[0]);
}

#[test]
fn no_advertising_without_long_press() {
    let clock = TestClock::default();
    let mut ctrl = AdvertisingController::new(radio());
    let mut trigger = LongPressTrigger::default();
    ctrl.refresh_fields().unwrap();

    // Two short presses with a release in between.
    for pressed in [true, false, true] {
        let until = clock.now_ms() + 1500;
        while clock.now_ms() < until {
            assert_eq!(button_tick(&mut trigger, &clock, pressed, &mut ctrl), None);
        }
    }

    assert!(!trigger.advertising_enabled());
    assert!(ctrl.advertiser().sink().0.is_empty());
}

#[test]
fn unknown_writes_leave_outputs_alone() {
    let mut pins = Pins::default();
    write_command(b"LIGHT ON", &mut pins);

    let payloads: [&[u8]; 5] = [b"light on", b"LIGHT  ON", b"LIGHT ON\n", b"", b"LED"];
    for payload in payloads {
        assert_eq!(write_command(payload, &mut pins), Command::Unrecognized);
    }

    assert_eq!(pins.light, Level::High);
    assert_eq!(pins.led, Level::Low);
}

#[test]
fn service_table_matches_the_wire_contract() {
    assert_eq!(SERVICE.uuid, 0x0180);
    let uuids = SERVICE.characteristics.map(Characteristic::uuid);
    assert_eq!(uuids, [DATA_CHAR_UUID, COMMAND_CHAR_UUID, MESSAGE_CHAR_UUID]);
    assert_eq!(uuids, [0xFEF4, 0xDEAD, 0xDEAE]);

    let mut out: heapless::Vec<u8, 32> = heapless::Vec::new();
    Characteristic::Data.read_into(&mut out).unwrap();
    assert_eq!(out.as_slice(), b"Data from the server");

    out.clear();
    Characteristic::Message.read_into(&mut out).unwrap();
    assert_eq!(out.as_slice(), b"Message from Innovate Yourself");
}
