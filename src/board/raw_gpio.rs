//! Output-only GPIO for the SPI flash pins esp-hal does not expose.
//!
//! With the flash in DIO mode GPIO12 (SPIHD) and GPIO13 (SPIWP) are
//! free, but esp-hal 1.0 generates no peripheral types for GPIO12-17 on
//! the ESP32-C3. The SD chip select and the activity LED live there, so
//! they are driven through the GPIO matrix registers directly.

const GPIO_OUT: u32 = 0x6000_4004;
const GPIO_OUT_W1TS: u32 = 0x6000_4008;
const GPIO_OUT_W1TC: u32 = 0x6000_400C;
const GPIO_ENABLE_W1TS: u32 = 0x6000_4024;
const GPIO_FUNC_OUT_SEL_CFG: u32 = 0x6000_4554;
const IO_MUX_BASE: u32 = 0x6000_9000;

// IO_MUX_GPIOn_REG lives at BASE + 4 + 4n
const IO_MUX_PIN_OFFSET: u32 = 0x04;

// simple GPIO output signal in the GPIO matrix
const SIG_GPIO_OUT: u32 = 0x80;

pub struct RawOutputPin {
    mask: u32,
}

impl RawOutputPin {
    /// Configure `pin` as a push-pull output driven to `high`.
    ///
    /// # Safety
    /// The pin must not be wired to an active flash line, and nothing
    /// else may drive it.
    pub unsafe fn new(pin: u8, high: bool) -> Self {
        let mask = 1u32 << pin;

        unsafe {
            // MCU_SEL (bits 2:0) = 1 selects the GPIO function
            let mux = (IO_MUX_BASE + IO_MUX_PIN_OFFSET + pin as u32 * 4) as *mut u32;
            let val = mux.read_volatile();
            mux.write_volatile((val & !0b111) | 1);

            let out_sel = (GPIO_FUNC_OUT_SEL_CFG + pin as u32 * 4) as *mut u32;
            out_sel.write_volatile(SIG_GPIO_OUT);

            let level = if high { GPIO_OUT_W1TS } else { GPIO_OUT_W1TC };
            (level as *mut u32).write_volatile(mask);
            (GPIO_ENABLE_W1TS as *mut u32).write_volatile(mask);
        }

        Self { mask }
    }

    #[inline]
    fn out_is_set(&self) -> bool {
        unsafe { (GPIO_OUT as *const u32).read_volatile() & self.mask != 0 }
    }
}

impl embedded_hal::digital::ErrorType for RawOutputPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for RawOutputPin {
    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        unsafe {
            (GPIO_OUT_W1TS as *mut u32).write_volatile(self.mask);
        }
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        unsafe {
            (GPIO_OUT_W1TC as *mut u32).write_volatile(self.mask);
        }
        Ok(())
    }
}

impl embedded_hal::digital::StatefulOutputPin for RawOutputPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.out_is_set())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.out_is_set())
    }
}
