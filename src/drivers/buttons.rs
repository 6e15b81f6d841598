// External two-button module: red steps to the next group, blue to
// the previous one. Both inputs are active low with pull-ups and fire
// a falling-edge GPIO interrupt.
//
// The handler debounces each button on its own, raises the matching
// EventFlag and counts the press. It never touches gallery state; the
// main loop takes the flags and applies the step.

use core::cell::RefCell;

use critical_section::Mutex;
use esp_hal::gpio::{Event, Input, Io};
use esp_hal::time::Instant;
use gallery_core::{Debounce, EventFlag, GroupStep, PressCounter};
use log::info;

use crate::kernel::wake::signal_button;

static NEXT_PRESSED: EventFlag = EventFlag::new();
static PREV_PRESSED: EventFlag = EventFlag::new();
static PRESSES: PressCounter = PressCounter::new();

struct Channel {
    pin: Input<'static>,
    debounce: Debounce,
    step: GroupStep,
}

static CHANNELS: Mutex<RefCell<Option<[Channel; 2]>>> = Mutex::new(RefCell::new(None));

fn flag(step: GroupStep) -> &'static EventFlag {
    match step {
        GroupStep::Next => &NEXT_PRESSED,
        GroupStep::Prev => &PREV_PRESSED,
    }
}

#[esp_hal::handler(priority = esp_hal::interrupt::Priority::Priority2)]
fn group_button_handler() {
    let now_us = Instant::now().duration_since_epoch().as_micros();
    let mut accepted = false;

    critical_section::with(|cs| {
        let mut channels = CHANNELS.borrow_ref_mut(cs);
        let Some(channels) = channels.as_mut() else {
            return;
        };
        for ch in channels.iter_mut() {
            if !ch.pin.is_interrupt_set() {
                continue;
            }
            ch.pin.clear_interrupt();
            if ch.debounce.accept(now_us) {
                flag(ch.step).raise();
                PRESSES.increment();
                accepted = true;
            }
        }
    });

    if accepted {
        signal_button();
    }
}

/// Hand both inputs to the GPIO interrupt and start listening.
pub fn install(
    io: &mut Io<'static>,
    mut next: Input<'static>,
    mut prev: Input<'static>,
    debounce_us: u32,
) {
    io.set_interrupt_handler(group_button_handler);
    critical_section::with(|cs| {
        next.listen(Event::FallingEdge);
        prev.listen(Event::FallingEdge);
        CHANNELS.borrow_ref_mut(cs).replace([
            Channel {
                pin: next,
                debounce: Debounce::new(debounce_us),
                step: GroupStep::Next,
            },
            Channel {
                pin: prev,
                debounce: Debounce::new(debounce_us),
                step: GroupStep::Prev,
            },
        ]);
    });
    info!("group buttons: listening, debounce {}us", debounce_us);
}

/// Test-and-clear the flag for `step`.
pub fn take(step: GroupStep) -> bool {
    flag(step).take()
}

pub fn press_count() -> u32 {
    PRESSES.get()
}
