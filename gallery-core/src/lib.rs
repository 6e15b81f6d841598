// gallery-core: board-independent logic for the inky-gallery firmware.
// navigator: fixed-size image groups with cyclic navigation + session memory
// viewer:    input events -> render calls, duplicate suppression
// catalog:   JPEG listing -> ordered catalog, boot-time table
// blink:     activity LED blink sequencing
// input:     slot buttons, shift-register decoding, group steps
// flag:      ISR -> main loop test-and-clear flags, debounce
// settings:  GALLERY.TXT key=value configuration
// scheduler: fixed-capacity priority job queue for the main loop

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod blink;
pub mod catalog;
pub mod error;
pub mod flag;
pub mod input;
pub mod navigator;
pub mod scheduler;
pub mod settings;
pub mod viewer;

pub use blink::Blinker;
pub use catalog::{CatalogBuilder, CatalogTable, is_image_name};
pub use error::ConfigurationError;
pub use flag::{Debounce, EventFlag, PressCounter};
pub use input::{GroupStep, SlotButton, decode_shift_register};
pub use navigator::{GroupNavigator, GroupReport};
pub use scheduler::{Job, Scheduler};
pub use settings::GallerySettings;
pub use viewer::{ImageRenderer, Outcome, Viewer};

/// Images per group; one per front button.
pub const GROUP_SIZE: usize = 5;
