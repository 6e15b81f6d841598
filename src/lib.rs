// e-paper image gallery firmware for an ESP32-C3 frame
// (SSD1677 panel, SD card, five front buttons, two group buttons)

#![no_std]

extern crate alloc;

pub mod apps;
pub mod board;
pub mod drivers;
pub mod kernel;
pub mod ui;
