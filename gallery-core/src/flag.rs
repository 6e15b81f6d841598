// ISR -> main loop signalling for the external group buttons.
//
// The ISR only ever raises a flag and bumps a counter; the main loop
// takes (test-and-clear) the flag and applies the group step itself.
// Critical sections guard the read-modify-write: riscv32imc has no
// atomic RMW instructions.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

/// Single-producer / single-consumer "something happened" flag.
///
/// Repeated raises before a take collapse into one event.
pub struct EventFlag {
    raised: AtomicBool,
}

impl EventFlag {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        critical_section::with(|_| {
            let was = self.raised.load(Ordering::Acquire);
            if was {
                self.raised.store(false, Ordering::Relaxed);
            }
            was
        })
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for EventFlag {
    fn default() -> Self {
        Self::new()
    }
}

pub const DEFAULT_DEBOUNCE_US: u32 = 3000;

/// Edge filter: an edge is accepted only if more than `window_us`
/// passed since the previously accepted one.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    window_us: u32,
    last_us: Option<u64>,
}

impl Debounce {
    pub const fn new(window_us: u32) -> Self {
        Self {
            window_us,
            last_us: None,
        }
    }

    pub fn accept(&mut self, now_us: u64) -> bool {
        if let Some(last) = self.last_us
            && now_us.wrapping_sub(last) <= self.window_us as u64
        {
            return false;
        }
        self.last_us = Some(now_us);
        true
    }

    pub fn window_us(&self) -> u32 {
        self.window_us
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_US)
    }
}

/// Accepted external button presses since boot.
pub struct PressCounter {
    count: Mutex<Cell<u32>>,
}

impl PressCounter {
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    pub fn increment(&self) -> u32 {
        critical_section::with(|cs| {
            let c = self.count.borrow(cs);
            let n = c.get().wrapping_add(1);
            c.set(n);
            n
        })
    }

    pub fn get(&self) -> u32 {
        critical_section::with(|cs| self.count.borrow(cs).get())
    }
}

impl Default for PressCounter {
    fn default() -> Self {
        Self::new()
    }
}
