// Applications built on the board and drivers.
// The gallery is the only one: it owns the boot-time catalog load and
// the SD -> JPEG -> panel render path.

pub mod gallery;
