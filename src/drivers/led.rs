// Activity LED pin driven by a tick-paced Blinker. poll() is called on
// every timer wake, so the loop never sleeps in here.

use embedded_hal::digital::OutputPin;
use gallery_core::Blinker;

pub struct ActivityLed<P> {
    pin: P,
    blinker: Blinker,
}

impl<P: OutputPin> ActivityLed<P> {
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self {
            pin,
            blinker: Blinker::new(),
        }
    }

    pub fn set(&mut self, on: bool) {
        let level = self.blinker.set(on);
        self.drive(level);
    }

    pub fn is_on(&self) -> bool {
        self.blinker.is_on()
    }

    pub fn start_blink(&mut self, times: u8, half_period: u32, now: u32) {
        let level = self.blinker.start(times, half_period, now);
        self.drive(level);
    }

    pub fn poll(&mut self, now: u32) {
        let level = self.blinker.poll(now);
        self.drive(level);
    }

    fn drive(&mut self, level: Option<bool>) {
        let Some(on) = level else {
            return;
        };
        let _ = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}
