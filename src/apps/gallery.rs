// Gallery glue between the SD card, the JPEG decoder and the panel.
//
// Boot: settings -> directory walk -> catalog -> viewer. Every failure
// on that path becomes a BootError whose message is put on the panel
// before the firmware halts.
//
// Rendering: the picture is decoded straight from the SD card in 4KB
// reads into a 1-bit dithered bitmap no larger than the panel, then
// streamed to the panel strip by strip, centred on white.

use alloc::vec::Vec;
use core::fmt;

use esp_hal::delay::Delay;
use gallery_core::catalog::ImageName;
use gallery_core::settings::SETTINGS_FILE;
use gallery_core::{
    CatalogBuilder, ConfigurationError, GROUP_SIZE, GallerySettings, GroupNavigator, ImageRenderer,
    Viewer,
};
use log::info;

use crate::board::{Epd, Sd};
use crate::drivers::ssd1677::{HEIGHT, WIDTH};
use crate::drivers::storage;
use crate::drivers::strip::StripBuffer;

// GALLERY.TXT is a handful of short lines
const SETTINGS_BUF: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// No card, no FAT volume, or no image folder.
    NoCard,
    /// Image folder holds no JPEG files.
    NoImages,
    Config(ConfigurationError),
}

impl BootError {
    /// Text for the panel, one entry per line.
    pub fn screen_lines(&self) -> &'static [&'static str] {
        match self {
            Self::NoCard => &["No SD-Card found."],
            Self::NoImages | Self::Config(ConfigurationError::EmptyCatalog) => {
                &["No image files found on SD-Card."]
            }
            Self::Config(_) => &["Please make it a multiple of 5 image files."],
        }
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCard => f.write_str("no SD card or image folder"),
            Self::NoImages => f.write_str("no image files found"),
            Self::Config(e) => write!(f, "catalog rejected: {}", e),
        }
    }
}

/// GALLERY.TXT from the SD root, or defaults if it is missing.
pub fn load_settings(sd: &Sd) -> GallerySettings {
    let mut buf = [0u8; SETTINGS_BUF];
    match storage::read_file_start(sd, SETTINGS_FILE, &mut buf) {
        Ok((size, n)) => {
            if size as usize > n {
                log::warn!("settings: {} truncated to {} bytes", SETTINGS_FILE, n);
            }
            let s = GallerySettings::parse(&buf[..n]);
            info!("settings: loaded {}", SETTINGS_FILE);
            s
        }
        Err(_) => {
            info!("settings: no {}, using defaults", SETTINGS_FILE);
            GallerySettings::defaults()
        }
    }
}

/// Sorted JPEG names from `dir`.
pub fn load_catalog(sd: &Sd, dir: &str) -> Result<Vec<ImageName>, BootError> {
    if !sd.is_mounted() || !storage::dir_exists(sd, dir) {
        return Err(BootError::NoCard);
    }
    if let Some(bytes) = sd.card_bytes() {
        info!("catalog: card {} MB", bytes / (1024 * 1024));
    }

    let mut builder = CatalogBuilder::new();
    storage::for_each_file_in_dir(sd, dir, |name, size| {
        builder.push(name, size);
    })
    .map_err(|_| BootError::NoCard)?;

    info!(
        "catalog: {} images in /{} ({} other entries skipped)",
        builder.len(),
        dir,
        builder.skipped()
    );
    if builder.is_empty() {
        return Err(BootError::NoImages);
    }
    Ok(builder.finish())
}

pub fn build_viewer(images: Vec<ImageName>) -> Result<Viewer<ImageName>, BootError> {
    let nav = GroupNavigator::build(images, GROUP_SIZE).map_err(BootError::Config)?;
    info!(
        "catalog: {} groups of {}",
        nav.group_count(),
        nav.group_size()
    );
    Ok(Viewer::new(nav))
}

/// Decodes catalog images from the SD card onto the panel.
pub struct PanelRenderer<'a> {
    pub epd: &'a mut Epd,
    pub sd: &'a Sd,
    pub strip: &'a mut StripBuffer,
    pub delay: &'a mut Delay,
    pub dir: &'a str,
}

impl ImageRenderer<ImageName> for PanelRenderer<'_> {
    type Error = &'static str;

    fn render(&mut self, index: usize, image: &ImageName) -> Result<(), Self::Error> {
        let name = image.as_str();
        let (sd, dir) = (self.sd, self.dir);

        let size = storage::file_size_in_dir(sd, dir, name)?;
        let bitmap = smol_epub::jpeg::decode_jpeg_sd(
            |offset, buf| storage::read_file_chunk_in_dir(sd, dir, name, offset, buf),
            0,
            size,
            WIDTH,
            HEIGHT,
        )?;

        let (w, h) = (bitmap.width as usize, bitmap.height as usize);
        let gx = (WIDTH as i32 - w as i32) / 2;
        let gy = (HEIGHT as i32 - h as i32) / 2;
        info!(
            "render: #{} {} ({} bytes) -> {}x{} at {},{}",
            index + 1,
            name,
            size,
            w,
            h,
            gx,
            gy
        );

        self.epd.render_full(self.strip, self.delay, |s| {
            s.blit_1bpp(&bitmap.data, 0, w, h, bitmap.stride, gx, gy, true);
        });
        self.epd.power_off();
        log::debug!("render: panel refresh #{}", self.epd.refresh_count());
        Ok(())
    }
}
