// SD card file operations for the gallery.
// Every call opens volume -> root (-> subdir) afresh and closes the
// handles on return, so only one file is ever open and an ejected
// card surfaces as an error on the next press rather than a stale
// handle.

use embedded_sdmmc::{Mode, ShortFileName, VolumeIdx};
use gallery_core::catalog::ImageName;

use crate::drivers::sdcard::SdStorage;

// open volume -> root, execute body with the root handle
macro_rules! with_root {
    ($sd:expr, |$root:ident| $body:expr) => {{
        let volume = $sd
            .volume_mgr
            .open_volume(VolumeIdx(0))
            .map_err(|_| "open volume failed")?;
        let $root = volume.open_root_dir().map_err(|_| "open root dir failed")?;
        $body
    }};
}

// open volume -> root -> subdir, execute body with the subdir handle
macro_rules! with_subdir {
    ($sd:expr, $dir:expr, |$sub:ident| $body:expr) => {{
        with_root!($sd, |root| {
            let $sub = root.open_dir($dir).map_err(|_| "open dir failed")?;
            $body
        })
    }};
}

pub fn dir_exists<SPI>(sd: &SdStorage<SPI>, dir: &str) -> bool
where
    SPI: embedded_hal::spi::SpiDevice,
{
    fn open<SPI>(sd: &SdStorage<SPI>, dir: &str) -> Result<(), &'static str>
    where
        SPI: embedded_hal::spi::SpiDevice,
    {
        with_subdir!(sd, dir, |_sub| Ok(()))
    }
    open(sd, dir).is_ok()
}

/// Call `f` with the 8.3 name and size of every visible regular file in `dir`.
pub fn for_each_file_in_dir<SPI, F>(
    sd: &SdStorage<SPI>,
    dir: &str,
    mut f: F,
) -> Result<(), &'static str>
where
    SPI: embedded_hal::spi::SpiDevice,
    F: FnMut(&str, u32),
{
    with_subdir!(sd, dir, |sub| {
        sub.iterate_dir(|entry| {
            let attrs = entry.attributes;
            if attrs.is_directory() || attrs.is_volume() || attrs.is_lfn() || attrs.is_hidden() {
                return;
            }
            if let Some(name) = format_83_name(&entry.name) {
                f(name.as_str(), entry.size);
            }
        })
        .map_err(|_| "iterate dir failed")
    })
}

pub fn file_size_in_dir<SPI>(
    sd: &SdStorage<SPI>,
    dir: &str,
    name: &str,
) -> Result<u32, &'static str>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    with_subdir!(sd, dir, |sub| {
        let file = sub
            .open_file_in_dir(name, Mode::ReadOnly)
            .map_err(|_| "open file failed")?;
        Ok(file.length())
    })
}

pub fn read_file_chunk_in_dir<SPI>(
    sd: &SdStorage<SPI>,
    dir: &str,
    name: &str,
    offset: u32,
    buf: &mut [u8],
) -> Result<usize, &'static str>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    with_subdir!(sd, dir, |sub| {
        let file = sub
            .open_file_in_dir(name, Mode::ReadOnly)
            .map_err(|_| "open file failed")?;
        file.seek_from_start(offset).map_err(|_| "seek failed")?;
        let mut total = 0;
        while !file.is_eof() && total < buf.len() {
            let n = file.read(&mut buf[total..]).map_err(|_| "read failed")?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    })
}

// open a file in the SD root, return (size, bytes_read) from offset 0
pub fn read_file_start<SPI>(
    sd: &SdStorage<SPI>,
    name: &str,
    buf: &mut [u8],
) -> Result<(u32, usize), &'static str>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    with_root!(sd, |root| {
        let file = root
            .open_file_in_dir(name, Mode::ReadOnly)
            .map_err(|_| "open file failed")?;
        let size = file.length();
        let mut total = 0;
        while !file.is_eof() && total < buf.len() {
            let n = file.read(&mut buf[total..]).map_err(|_| "read failed")?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok((size, total))
    })
}

// "JWST1   JPG" -> "JWST1.JPG"; None for names that are not ASCII
fn format_83_name(sfn: &ShortFileName) -> Option<ImageName> {
    let trim = |s: &[u8]| -> usize { s.iter().position(|&b| b == b' ').unwrap_or(s.len()) };

    let base = sfn.base_name();
    let ext = sfn.extension();
    let base = &base[..trim(base)];
    let ext = &ext[..trim(ext)];
    if base.is_empty() || !base.is_ascii() || !ext.is_ascii() {
        return None;
    }

    let mut out = ImageName::new();
    for &b in base {
        out.push(b as char).ok()?;
    }
    if !ext.is_empty() {
        out.push('.').ok()?;
        for &b in ext {
            out.push(b as char).ok()?;
        }
    }
    Some(out)
}
