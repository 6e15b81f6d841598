// SSD1677 e-paper driver, landscape 800x480 (GDEQ0426T82 glass).
// No framebuffer; each refresh streams the frame through a 4KB
// StripBuffer. Gallery pictures are always drawn with a full GC
// refresh, then the panel is powered down until the next press.

use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use esp_hal::delay::Delay;

use super::strip::{STRIP_COUNT, StripBuffer};

pub const WIDTH: u16 = 800;
pub const HEIGHT: u16 = 480;

const POWER_OFF_TIME_MS: u32 = 200;
const FULL_REFRESH_TIME_MS: u32 = 1600;

mod cmd {
    pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01;
    pub const BOOSTER_SOFT_START: u8 = 0x0C;
    pub const DEEP_SLEEP: u8 = 0x10;
    pub const DATA_ENTRY_MODE: u8 = 0x11;
    pub const SW_RESET: u8 = 0x12;
    pub const TEMPERATURE_SENSOR: u8 = 0x18;
    pub const MASTER_ACTIVATION: u8 = 0x20;
    pub const DISPLAY_UPDATE_CONTROL_1: u8 = 0x21;
    pub const DISPLAY_UPDATE_CONTROL_2: u8 = 0x22;
    pub const WRITE_RAM_BW: u8 = 0x24;
    pub const WRITE_RAM_RED: u8 = 0x26;
    pub const BORDER_WAVEFORM: u8 = 0x3C;
    pub const SET_RAM_X_RANGE: u8 = 0x44;
    pub const SET_RAM_Y_RANGE: u8 = 0x45;
    pub const SET_RAM_X_COUNTER: u8 = 0x4E;
    pub const SET_RAM_Y_COUNTER: u8 = 0x4F;
}

pub struct DisplayDriver<SPI, DC, RST, BUSY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    power_is_on: bool,
    init_done: bool,
    refreshes: u32,
}

impl<SPI, DC, RST, BUSY> DisplayDriver<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            power_is_on: false,
            init_done: false,
            refreshes: 0,
        }
    }

    pub fn reset(&mut self, delay: &mut Delay) {
        let _ = self.rst.set_high();
        delay.delay_millis(20);
        let _ = self.rst.set_low();
        delay.delay_millis(2);
        let _ = self.rst.set_high();
        delay.delay_millis(20);
    }

    pub fn init(&mut self, delay: &mut Delay) {
        self.reset(delay);
        self.init_display(delay);
    }

    /// Full GC refresh. `draw` runs once per strip and plane, so it must
    /// paint the same content every time it is called.
    pub fn render_full<F>(&mut self, strip: &mut StripBuffer, delay: &mut Delay, mut draw: F)
    where
        F: FnMut(&mut StripBuffer),
    {
        if !self.init_done {
            self.reset(delay);
            self.init_display(delay);
        }

        delay.delay_millis(1);

        // identical content to both planes: no differential ghosting
        for &ram_cmd in &[cmd::WRITE_RAM_RED, cmd::WRITE_RAM_BW] {
            self.set_ram_area(0, 0, WIDTH, HEIGHT);
            self.send_command(ram_cmd);
            delay.delay_millis(1);

            for i in 0..STRIP_COUNT {
                strip.begin_strip(i);
                draw(strip);
                self.send_data(strip.data());
            }
        }

        self.update_full();
        self.refreshes = self.refreshes.wrapping_add(1);
    }

    /// Analog off; RAM contents are kept.
    pub fn power_off(&mut self) {
        if self.power_is_on {
            self.send_command(cmd::DISPLAY_UPDATE_CONTROL_2);
            self.send_data(&[0x83]);
            self.send_command(cmd::MASTER_ACTIVATION);
            self.wait_busy(POWER_OFF_TIME_MS);
            self.power_is_on = false;
        }
    }

    /// Deep sleep; a hardware reset is required before the next refresh.
    pub fn hibernate(&mut self) {
        self.power_off();
        self.send_command(cmd::DEEP_SLEEP);
        self.send_data(&[0x01]);
        self.init_done = false;
    }

    pub fn refresh_count(&self) -> u32 {
        self.refreshes
    }

    fn init_display(&mut self, delay: &mut Delay) {
        self.send_command(cmd::SW_RESET);
        delay.delay_millis(10);

        self.send_command(cmd::TEMPERATURE_SENSOR);
        self.send_data(&[0x80]);

        self.send_command(cmd::BOOSTER_SOFT_START);
        self.send_data(&[0xAE, 0xC7, 0xC3, 0xC0, 0x80]);

        self.send_command(cmd::DRIVER_OUTPUT_CONTROL);
        self.send_data(&[((HEIGHT - 1) & 0xFF) as u8, ((HEIGHT - 1) >> 8) as u8, 0x02]);

        self.send_command(cmd::BORDER_WAVEFORM);
        self.send_data(&[0x01]);

        self.set_ram_area(0, 0, WIDTH, HEIGHT);

        self.init_done = true;
    }

    // gates are wired in reverse: Y counts down from the bottom row
    fn set_ram_area(&mut self, x: u16, y: u16, w: u16, h: u16) {
        let y0 = HEIGHT - y - h;
        let x_end = x + w - 1;
        let y_end = y0 + h - 1;

        self.send_command(cmd::DATA_ENTRY_MODE);
        self.send_data(&[0x01]); // X+, Y-

        self.send_command(cmd::SET_RAM_X_RANGE);
        self.send_data(&[lo(x), hi(x), lo(x_end), hi(x_end)]);

        self.send_command(cmd::SET_RAM_Y_RANGE);
        self.send_data(&[lo(y_end), hi(y_end), lo(y0), hi(y0)]);

        self.send_command(cmd::SET_RAM_X_COUNTER);
        self.send_data(&[lo(x), hi(x)]);

        self.send_command(cmd::SET_RAM_Y_COUNTER);
        self.send_data(&[lo(y_end), hi(y_end)]);
    }

    fn update_full(&mut self) {
        // bypass RED as 0, BW normal
        self.send_command(cmd::DISPLAY_UPDATE_CONTROL_1);
        self.send_data(&[0x40, 0x00]);

        // clock + analog on, GC waveform, keep analog on afterwards
        self.send_command(cmd::DISPLAY_UPDATE_CONTROL_2);
        self.send_data(&[0xF7]);

        self.send_command(cmd::MASTER_ACTIVATION);
        self.wait_busy(FULL_REFRESH_TIME_MS);

        self.power_is_on = true;
    }

    // WFI between polls; the 10ms timer tick bounds each sleep
    fn wait_busy(&mut self, timeout_ms: u32) {
        use esp_hal::time::{Duration, Instant};

        let deadline = Instant::now() + Duration::from_millis(timeout_ms as u64);
        loop {
            if self.busy.is_low().unwrap_or(true) {
                return;
            }
            if Instant::now() >= deadline {
                log::warn!("epd: busy timeout after {}ms", timeout_ms);
                return;
            }
            crate::kernel::wake::wait_for_interrupt();
        }
    }

    fn send_command(&mut self, cmd: u8) {
        let _ = self.dc.set_low();
        let _ = self.spi.write(&[cmd]);
        let _ = self.dc.set_high();
    }

    fn send_data(&mut self, data: &[u8]) {
        let _ = self.dc.set_high();
        let _ = self.spi.write(data);
    }
}

impl<SPI, DC, RST, BUSY> OriginDimensions for DisplayDriver<SPI, DC, RST, BUSY> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

#[inline]
fn lo(v: u16) -> u8 {
    (v & 0xFF) as u8
}

#[inline]
fn hi(v: u16) -> u8 {
    (v >> 8) as u8
}
