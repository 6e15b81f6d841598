//! GPIO |     Function       |      Notes
//! -----+--------------------+----------------------------------
//!  0   | 74HC165 CLK        | Shift register clock (rising edge shifts)
//!  1   | 74HC165 SH/LD      | Low = load parallel inputs
//!  2   | 74HC165 QH         | Serial data out, MSB (button A) first
//!  3   | Group NEXT (red)   | Active LOW, internal pullup, falling-edge IRQ
//!  4   | EPD DC             | Data/Command select
//!  5   | EPD RST            | Reset (active low)
//!  6   | EPD BUSY           | Busy signal from display
//!  7   | SPI2 MISO          | SD card data out (display is write-only)
//!  8   | SPI2 SCK           | Shared SPI clock
//!  9   | Group PREV (blue)  | Active LOW, internal pullup, falling-edge IRQ
//! 10   | SPI2 MOSI          | Shared SPI data out
//! 12   | SD CS              | Raw GPIO (flash SPIHD, free in DIO mode)
//! 13   | Activity LED       | Raw GPIO (flash SPIWP), active HIGH
//! 21   | EPD CS             | Display chip select

// ----- Front buttons (shift register) -----
pub const SR_CLOCK: u8 = 0;
pub const SR_LATCH: u8 = 1;
pub const SR_DATA: u8 = 2;

// ----- External two-button module -----
pub const BTN_NEXT: u8 = 3;
pub const BTN_PREV: u8 = 9;

// ----- E-Paper Display -----
pub const EPD_CS: u8 = 21;
pub const EPD_DC: u8 = 4;
pub const EPD_RST: u8 = 5;
pub const EPD_BUSY: u8 = 6;

// ----- SD Card -----
pub const SD_CS: u8 = 12;

// ----- SPI Bus (shared: EPD + SD) -----
pub const SPI_SCK: u8 = 8;
pub const SPI_MOSI: u8 = 10;
pub const SPI_MISO: u8 = 7;

// ----- Status -----
pub const ACTIVITY_LED: u8 = 13;
