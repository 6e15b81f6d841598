// Wake flag signalling between ISRs and the main loop
//
// ISRs set atomic flags; the main loop consumes them via try_wake().
// Independent flags keep a timer tick from swallowing a button edge.
// Critical section guards riscv32imc (no atomic RMW).
// Uptime counts 10ms timer ticks.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

pub const TICK_MS: u32 = 10;

static WAKE_BUTTON: AtomicBool = AtomicBool::new(false);
static WAKE_TIMER: AtomicBool = AtomicBool::new(false);

static UPTIME_TICKS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

#[derive(Debug, Clone, Copy)]
pub struct WakeFlags {
    /// External group button edge accepted by its ISR.
    pub button: bool,
    /// Periodic tick: time to sample the front buttons.
    pub timer: bool,
}

pub fn try_wake() -> Option<WakeFlags> {
    critical_section::with(|_| {
        let button = WAKE_BUTTON.load(Ordering::Relaxed);
        let timer = WAKE_TIMER.load(Ordering::Relaxed);

        if !button && !timer {
            return None;
        }

        WAKE_BUTTON.store(false, Ordering::Relaxed);
        WAKE_TIMER.store(false, Ordering::Relaxed);

        Some(WakeFlags { button, timer })
    })
}

#[inline]
pub fn signal_button() {
    WAKE_BUTTON.store(true, Ordering::Release);
}

#[inline]
pub fn signal_timer() {
    WAKE_TIMER.store(true, Ordering::Release);
    critical_section::with(|cs| {
        let ticks = UPTIME_TICKS.borrow(cs);
        ticks.set(ticks.get().wrapping_add(1));
    });
}

pub fn uptime_ticks() -> u32 {
    critical_section::with(|cs| UPTIME_TICKS.borrow(cs).get())
}

pub fn ms_to_ticks(ms: u32) -> u32 {
    ms.div_ceil(TICK_MS).max(1)
}

#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack));
    }

    #[cfg(not(target_arch = "riscv32"))]
    core::hint::spin_loop();
}
