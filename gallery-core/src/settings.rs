// Gallery settings from GALLERY.TXT in the SD root.
// Text key=value lines; '#' starts a comment line; unknown keys are
// ignored; out-of-range numbers are clamped by sanitize().

use crate::flag::DEFAULT_DEBOUNCE_US;

pub const SETTINGS_FILE: &str = "GALLERY.TXT";

/// Longest FAT short directory name.
pub const DIR_NAME_CAP: usize = 8;

pub const DEFAULT_IMAGE_DIR: &str = "IMAGES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySettings {
    pub image_dir: heapless::String<DIR_NAME_CAP>,
    pub debounce_us: u32,  // external button debounce window
    pub blink_ms: u16,     // activity LED half-period
    pub group_blink: bool, // blink the group number on group change
    pub list_on_boot: bool,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl GallerySettings {
    pub fn defaults() -> Self {
        let mut image_dir = heapless::String::new();
        let _ = image_dir.push_str(DEFAULT_IMAGE_DIR);
        Self {
            image_dir,
            debounce_us: DEFAULT_DEBOUNCE_US,
            blink_ms: 500,
            group_blink: true,
            list_on_boot: true,
        }
    }

    /// Defaults overridden by whatever `data` sets.
    pub fn parse(data: &[u8]) -> Self {
        let mut s = Self::defaults();
        for line in data.split(|&b| b == b'\n') {
            let line = trim(line);
            if line.is_empty() || line[0] == b'#' {
                continue;
            }
            if let Some(eq) = line.iter().position(|&b| b == b'=') {
                s.apply(trim(&line[..eq]), trim(&line[eq + 1..]));
            }
        }
        s.sanitize();
        s
    }

    fn apply(&mut self, key: &[u8], val: &[u8]) {
        match key {
            b"image_dir" => {
                if let Some(dir) = parse_dir_name(val) {
                    self.image_dir = dir;
                }
            }
            b"debounce_us" => {
                if let Some(v) = parse_u32(val) {
                    self.debounce_us = v;
                }
            }
            b"blink_ms" => {
                if let Some(v) = parse_u32(val) {
                    self.blink_ms = v.min(u16::MAX as u32) as u16;
                }
            }
            b"group_blink" => {
                if let Some(v) = parse_bool(val) {
                    self.group_blink = v;
                }
            }
            b"list_on_boot" => {
                if let Some(v) = parse_bool(val) {
                    self.list_on_boot = v;
                }
            }
            _ => {}
        }
    }

    fn sanitize(&mut self) {
        self.debounce_us = self.debounce_us.clamp(500, 100_000);
        self.blink_ms = self.blink_ms.clamp(50, 2000);
    }
}

fn trim(s: &[u8]) -> &[u8] {
    let mut start = 0;
    let mut end = s.len();
    while start < end && matches!(s[start], b' ' | b'\t' | b'\r') {
        start += 1;
    }
    while end > start && matches!(s[end - 1], b' ' | b'\t' | b'\r') {
        end -= 1;
    }
    &s[start..end]
}

fn parse_u32(s: &[u8]) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut val: u32 = 0;
    for &b in s {
        if !b.is_ascii_digit() {
            return None;
        }
        val = val.checked_mul(10)?.checked_add((b - b'0') as u32)?;
    }
    Some(val)
}

fn parse_bool(s: &[u8]) -> Option<bool> {
    match s {
        b"1" | b"true" | b"yes" | b"on" => Some(true),
        b"0" | b"false" | b"no" | b"off" => Some(false),
        _ => None,
    }
}

// 8.3 directory names: 1..=8 chars of A-Z, 0-9, '_' or '-'
fn parse_dir_name(s: &[u8]) -> Option<heapless::String<DIR_NAME_CAP>> {
    if s.is_empty() || s.len() > DIR_NAME_CAP {
        return None;
    }
    let mut out = heapless::String::new();
    for &b in s {
        if !(b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
            return None;
        }
        out.push(b.to_ascii_uppercase() as char).ok()?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_defaults() {
        assert_eq!(GallerySettings::parse(b""), GallerySettings::defaults());
        assert_eq!(GallerySettings::defaults().image_dir.as_str(), "IMAGES");
    }

    #[test]
    fn parses_known_keys() {
        let txt = b"# gallery\r\nimage_dir = photos\r\ndebounce_us=5000\nblink_ms = 250\ngroup_blink = off\nlist_on_boot=0\n";
        let s = GallerySettings::parse(txt);
        assert_eq!(s.image_dir.as_str(), "PHOTOS");
        assert_eq!(s.debounce_us, 5000);
        assert_eq!(s.blink_ms, 250);
        assert!(!s.group_blink);
        assert!(!s.list_on_boot);
    }

    #[test]
    fn ignores_garbage_and_unknown_keys() {
        let txt = b"colour=red\nimage_dir=../etc\ndebounce_us=fast\nno equals sign\n";
        assert_eq!(GallerySettings::parse(txt), GallerySettings::defaults());
    }

    #[test]
    fn clamps_out_of_range_values() {
        let s = GallerySettings::parse(b"debounce_us=1\nblink_ms=99999\n");
        assert_eq!(s.debounce_us, 500);
        assert_eq!(s.blink_ms, 2000);
    }

    #[test]
    fn rejects_overlong_directory_names() {
        let s = GallerySettings::parse(b"image_dir=WAYTOOLONGNAME\n");
        assert_eq!(s.image_dir.as_str(), DEFAULT_IMAGE_DIR);
    }
}
