// Image catalog construction from an SD directory walk.
//
// FAT directory order is whatever the host OS left behind, so names
// are sorted case-insensitively once all entries are collected; the
// resulting order is what group/slot numbers refer to.

use alloc::vec::Vec;
use core::fmt;

use log::warn;

/// FAT 8.3 file name, e.g. `JWST1.JPG`.
pub type ImageName = heapless::String<12>;

const IMAGE_EXTENSIONS: [&str; 3] = ["JPG", "JPE", "JPEG"];

// AppleDouble `._NAME.JPG` files carry metadata only
const RESOURCE_FORK_MAX_BYTES: u32 = 4096;

/// True for names with a JPEG extension (any case).
pub fn is_image_name(name: &str) -> bool {
    let Some((base, ext)) = name.rsplit_once('.') else {
        return false;
    };
    !base.is_empty() && IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// Name without its extension.
pub fn stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, _)) if !base.is_empty() => base,
        _ => name,
    }
}

fn is_resource_fork(name: &str, size: u32) -> bool {
    name.starts_with('_') && stem(name).contains('~') && size <= RESOURCE_FORK_MAX_BYTES
}

#[derive(Default)]
pub struct CatalogBuilder {
    names: Vec<ImageName>,
    skipped: usize,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one directory entry; returns true if it joined the catalog.
    ///
    /// Non-JPEG files, dot files and macOS resource forks are skipped.
    /// A fork of `._X.JPG` shows up in 8.3 form as a tiny `_X~1.JPG`;
    /// ordinary names starting with `_` are kept.
    pub fn push(&mut self, name: &str, size: u32) -> bool {
        if name.starts_with('.') || is_resource_fork(name, size) || !is_image_name(name) {
            self.skipped += 1;
            return false;
        }
        let Ok(owned) = ImageName::try_from(name) else {
            warn!("catalog: name too long, skipped: {}", name);
            self.skipped += 1;
            return false;
        };
        self.names.push(owned);
        true
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries that were not images.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(mut self) -> Vec<ImageName> {
        self.names.sort_unstable_by(|a, b| {
            let al = a.bytes().map(|c| c.to_ascii_lowercase());
            let bl = b.bytes().map(|c| c.to_ascii_lowercase());
            al.cmp(bl)
        });
        self.names
    }
}

/// Boot-time listing of every image with its group and image number.
pub struct CatalogTable<'a, T> {
    images: &'a [T],
    group_size: usize,
}

impl<'a, T: AsRef<str>> CatalogTable<'a, T> {
    pub fn new(images: &'a [T], group_size: usize) -> Self {
        Self {
            images,
            group_size: group_size.max(1),
        }
    }
}

const RULE: &str = "+-----+-----+--------------------------------------------------+";

impl<T: AsRef<str>> fmt::Display for CatalogTable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "| GRP | IMG | {:<48} |", "FILENAME")?;
        write!(f, "{}", RULE)?;
        for (i, image) in self.images.iter().enumerate() {
            let group = i / self.group_size + 1;
            write!(
                f,
                "\n| {:2}  | {:3} | {:<48} |\n{}",
                group,
                i + 1,
                stem(image.as_ref()),
                RULE
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn recognises_jpeg_extensions() {
        assert!(is_image_name("JWST1.JPG"));
        assert!(is_image_name("photo.jpeg"));
        assert!(is_image_name("MSFS20~1.JPE"));
        assert!(!is_image_name("README.TXT"));
        assert!(!is_image_name("JPG"));
        assert!(!is_image_name(".JPG"));
    }

    #[test]
    fn builder_skips_non_images_and_resource_forks() {
        let mut b = CatalogBuilder::new();
        assert!(b.push("JWST2.JPG", 180_000));
        assert!(!b.push("._JWST2.JPG", 4096));
        assert!(!b.push("_JWST2~1.JPG", 4096));
        assert!(!b.push("NOTES.TXT", 120));
        assert!(b.push("jwst1.jpg", 95_000));
        assert_eq!(b.len(), 2);
        assert_eq!(b.skipped(), 3);
    }

    #[test]
    fn builder_keeps_underscore_images() {
        let mut b = CatalogBuilder::new();
        assert!(b.push("_SUNSET.JPG", 210_000));
        // full-size picture that happens to have a short alias
        assert!(b.push("_BEACH~1.JPG", 150_000));
        assert_eq!(b.len(), 2);
        assert_eq!(b.skipped(), 0);
    }

    #[test]
    fn builder_sorts_case_insensitively() {
        let mut b = CatalogBuilder::new();
        for name in ["MSFS2.JPG", "jwst2.jpg", "JWST1.JPG", "msfs1.jpg"] {
            b.push(name, 100_000);
        }
        let names = b.finish();
        let names: alloc::vec::Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["JWST1.JPG", "jwst2.jpg", "msfs1.jpg", "MSFS2.JPG"]);
    }

    #[test]
    fn stem_drops_extension() {
        assert_eq!(stem("JWST1.JPG"), "JWST1");
        assert_eq!(stem("NOEXT"), "NOEXT");
    }

    #[test]
    fn table_numbers_groups_from_one() {
        let images = ["A.JPG", "B.JPG", "C.JPG", "D.JPG"];
        let table = CatalogTable::new(&images, 2).to_string();
        let rows: alloc::vec::Vec<&str> = table.lines().filter(|l| l.starts_with("| ")).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[1].starts_with("|  1  |   1 | A "));
        assert!(rows[3].starts_with("|  2  |   3 | C "));
        assert!(rows[4].starts_with("|  2  |   4 | D "));
    }
}
