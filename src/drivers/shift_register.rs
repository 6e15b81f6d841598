// 74HC165 parallel-in / serial-out shift register, bit-banged.
// Pulse SH/LD low to capture the eight parallel inputs, then clock
// them out MSB (input H) first. One full read takes ~20us.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

const SETTLE_NS: u32 = 1_000;

pub struct ShiftRegister<CLK, LATCH, DATA, D> {
    clock: CLK,
    latch: LATCH,
    data: DATA,
    delay: D,
}

impl<CLK, LATCH, DATA, D> ShiftRegister<CLK, LATCH, DATA, D>
where
    CLK: OutputPin,
    LATCH: OutputPin,
    DATA: InputPin,
    D: DelayNs,
{
    pub fn new(mut clock: CLK, mut latch: LATCH, data: DATA, delay: D) -> Self {
        let _ = clock.set_low();
        let _ = latch.set_high();
        Self {
            clock,
            latch,
            data,
            delay,
        }
    }

    /// Latch and read all eight inputs; first bit shifted out lands in bit 7.
    pub fn read(&mut self) -> u8 {
        let _ = self.latch.set_low();
        self.delay.delay_ns(SETTLE_NS);
        let _ = self.latch.set_high();
        self.delay.delay_ns(SETTLE_NS);

        let mut sample = 0u8;
        for _ in 0..8 {
            let bit = self.data.is_high().unwrap_or(false);
            sample = (sample << 1) | bit as u8;
            let _ = self.clock.set_high();
            self.delay.delay_ns(SETTLE_NS);
            let _ = self.clock.set_low();
            self.delay.delay_ns(SETTLE_NS);
        }
        sample
    }
}
