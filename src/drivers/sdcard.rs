// SD card over SPI with FAT volume manager
// No RTC on board; file timestamps are fixed to 2025-01-01 (the
// gallery never writes, but the volume manager wants a clock).

use embedded_sdmmc::{SdCard, TimeSource, Timestamp, VolumeIdx, VolumeManager};
use log::{info, warn};

// card identification must run at <= 400 kHz; the board raises the
// bus clock once the probe has succeeded
pub const SD_INIT_FREQ_HZ: u32 = 400_000;
pub const SD_NORMAL_FREQ_HZ: u32 = 20_000_000;

#[derive(Default, Clone, Copy)]
pub struct FixedTimeSource;

impl TimeSource for FixedTimeSource {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 55,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

pub struct SdStorage<SPI>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    pub volume_mgr: VolumeManager<SdCard<SPI, esp_hal::delay::Delay>, FixedTimeSource>,
    card_bytes: Option<u64>,
}

impl<SPI> SdStorage<SPI>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    /// Wrap the card, running the SPI-mode init sequence immediately.
    pub fn new(spi: SPI) -> Self {
        let sdcard = SdCard::new(spi, esp_hal::delay::Delay::new());

        let card_bytes = match sdcard.num_bytes() {
            Ok(bytes) => {
                info!("SD card: {} bytes ({} MB)", bytes, bytes / 1024 / 1024);
                Some(bytes)
            }
            Err(e) => {
                warn!("SD card probe failed: {:?}", e);
                None
            }
        };

        let volume_mgr = VolumeManager::new(sdcard, FixedTimeSource);
        Self {
            volume_mgr,
            card_bytes,
        }
    }

    /// Card answered the probe and volume 0 holds a FAT filesystem.
    pub fn is_mounted(&self) -> bool {
        self.card_bytes.is_some() && self.volume_mgr.open_volume(VolumeIdx(0)).is_ok()
    }

    pub fn card_bytes(&self) -> Option<u64> {
        self.card_bytes
    }
}
