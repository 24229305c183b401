//! Board output lines.

use ble_light::gpio::{Level, OutputPins, PinRole};
use core::convert::Infallible;
use embedded_hal::digital::StatefulOutputPin;

/// Light and LED outputs, addressed by role.
///
/// Direction is fixed when the pins are constructed (`embassy_nrf::gpio::Output`),
/// so every call here is infallible.
pub struct BoardOutputs<P> {
    light: P,
    led: P,
}

impl<P> BoardOutputs<P>
where
    P: StatefulOutputPin<Error = Infallible>,
{
    pub fn new(light: P, led: P) -> Self {
        Self { light, led }
    }

    fn pin(&mut self, role: PinRole) -> &mut P {
        match role {
            PinRole::Light => &mut self.light,
            PinRole::Led => &mut self.led,
        }
    }
}

impl<P> OutputPins for BoardOutputs<P>
where
    P: StatefulOutputPin<Error = Infallible>,
{
    fn set(&mut self, role: PinRole, level: Level) {
        let pin = self.pin(role);
        let result = match level {
            Level::High => pin.set_high(),
            Level::Low => pin.set_low(),
        };
        infallible(result)
    }

    fn get(&mut self, role: PinRole) -> Level {
        Level::from(infallible(self.pin(role).is_set_high()))
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(v) => v,
        Err(never) => match never {},
    }
}
