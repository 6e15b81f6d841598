//! Board support for the gallery frame (ESP32-C3 + SSD1677 + SD).
//!
//! Maps physical hardware to named subsystems so the rest of the
//! firmware never needs a GPIO number; see `pins` for the wiring.
//!
//! Panel and SD card share SPI2. The bus sits in a `StaticCell` and
//! each device borrows it through a `RefCellDevice`, which is sound
//! here because the main loop never touches both devices at once.

pub mod pins;
pub mod raw_gpio;

use core::cell::RefCell;

use embedded_hal_bus::spi::RefCellDevice;
use esp_hal::{
    Blocking,
    delay::Delay,
    gpio::{Input, InputConfig, Io, Level, Output, OutputConfig, Pull},
    peripherals::Peripherals,
    spi,
    time::Rate,
};
use log::{info, warn};
use static_cell::StaticCell;

use crate::drivers::led::ActivityLed;
use crate::drivers::sdcard::{SD_INIT_FREQ_HZ, SD_NORMAL_FREQ_HZ, SdStorage};
use crate::drivers::shift_register::ShiftRegister;
use crate::drivers::ssd1677::DisplayDriver;
use raw_gpio::RawOutputPin;

// Type Aliases
pub type SpiBus = spi::master::Spi<'static, Blocking>;
pub type EpdSpi = RefCellDevice<'static, SpiBus, Output<'static>, Delay>;
pub type SdSpi = RefCellDevice<'static, SpiBus, RawOutputPin, Delay>;
pub type Epd = DisplayDriver<EpdSpi, Output<'static>, Output<'static>, Input<'static>>;
pub type Sd = SdStorage<SdSpi>;
pub type FrontButtons = ShiftRegister<Output<'static>, Output<'static>, Input<'static>, Delay>;
pub type Led = ActivityLed<RawOutputPin>;

static SPI_BUS: StaticCell<RefCell<SpiBus>> = StaticCell::new();

// Hardware Bundles
/// Display subsystem: e-paper panel on the shared bus.
pub struct DisplayHw {
    pub epd: Epd,
}

/// Storage subsystem: SD card on the shared bus, already probed.
pub struct StorageHw {
    pub sd: Sd,
}

/// External group buttons, handed to the GPIO interrupt by the caller.
pub struct GroupButtonsHw {
    pub io: Io<'static>,
    pub next: Input<'static>,
    pub prev: Input<'static>,
}

pub struct Board {
    pub display: DisplayHw,
    pub storage: StorageHw,
    pub front: FrontButtons,
    pub group_buttons: GroupButtonsHw,
    pub led: Led,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        // SPI bus starts slow for SD card identification
        let spi_cfg = spi::master::Config::default().with_frequency(Rate::from_hz(SD_INIT_FREQ_HZ));
        let spi_bus = spi::master::Spi::new(p.SPI2, spi_cfg)
            .unwrap()
            .with_sck(p.GPIO8)
            .with_mosi(p.GPIO10)
            .with_miso(p.GPIO7);
        let bus: &'static RefCell<SpiBus> = SPI_BUS.init(RefCell::new(spi_bus));

        // Safety: GPIO12 is SPIHD, unused by the DIO flash
        let sd_cs = unsafe { RawOutputPin::new(pins::SD_CS, true) };
        let sd_dev = RefCellDevice::new(bus, sd_cs, Delay::new()).unwrap();
        let sd = SdStorage::new(sd_dev);

        let fast = spi::master::Config::default().with_frequency(Rate::from_hz(SD_NORMAL_FREQ_HZ));
        match bus.borrow_mut().apply_config(&fast) {
            Ok(()) => info!("spi: {} MHz", SD_NORMAL_FREQ_HZ / 1_000_000),
            Err(e) => warn!("spi: keeping init clock: {:?}", e),
        }

        let display = Self::init_display(
            bus,
            Output::new(p.GPIO21, Level::High, OutputConfig::default()),
            Output::new(p.GPIO4, Level::High, OutputConfig::default()),
            Output::new(p.GPIO5, Level::High, OutputConfig::default()),
            Input::new(p.GPIO6, InputConfig::default().with_pull(Pull::None)),
        );

        // 74HC165 drives QH push-pull; no pull needed
        let front = ShiftRegister::new(
            Output::new(p.GPIO0, Level::Low, OutputConfig::default()),
            Output::new(p.GPIO1, Level::High, OutputConfig::default()),
            Input::new(p.GPIO2, InputConfig::default().with_pull(Pull::None)),
            Delay::new(),
        );

        let group_buttons = GroupButtonsHw {
            io: Io::new(p.IO_MUX),
            next: Input::new(p.GPIO3, InputConfig::default().with_pull(Pull::Up)),
            prev: Input::new(p.GPIO9, InputConfig::default().with_pull(Pull::Up)),
        };

        // Safety: GPIO13 is SPIWP, unused by the DIO flash
        let led = ActivityLed::new(unsafe { RawOutputPin::new(pins::ACTIVITY_LED, false) });

        Board {
            display,
            storage: StorageHw { sd },
            front,
            group_buttons,
            led,
        }
    }

    fn init_display(
        bus: &'static RefCell<SpiBus>,
        cs: Output<'static>,
        dc: Output<'static>,
        rst: Output<'static>,
        busy: Input<'static>,
    ) -> DisplayHw {
        let spi_dev = RefCellDevice::new(bus, cs, Delay::new()).unwrap();
        DisplayHw {
            epd: DisplayDriver::new(spi_dev, dc, rst, busy),
        }
    }
}
