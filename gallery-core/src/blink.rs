// Activity LED sequencing, kept apart from the pin.
//
// The LED has a steady state (on while the gallery waits for a press,
// off after a picture has been drawn). A blink sequence overrides it
// for `times` flashes and then hands the LED back to the steady state.
// Every method returns the level to drive, or None if the pin should
// stay as it is.

struct Sequence {
    toggles_left: u16,
    half_period: u32,
    next_tick: u32,
    lit: bool,
}

#[derive(Default)]
pub struct Blinker {
    steady_on: bool,
    seq: Option<Sequence>,
}

impl Blinker {
    pub const fn new() -> Self {
        Self {
            steady_on: false,
            seq: None,
        }
    }

    /// New steady state; it takes effect after a running blink.
    pub fn set(&mut self, on: bool) -> Option<bool> {
        self.steady_on = on;
        self.seq.is_none().then_some(on)
    }

    pub fn is_on(&self) -> bool {
        self.steady_on
    }

    pub fn is_blinking(&self) -> bool {
        self.seq.is_some()
    }

    /// Flash `times` times, `half_period` ticks on and off. Starts dark
    /// so a count of one is visible even while the LED is lit.
    pub fn start(&mut self, times: u8, half_period: u32, now: u32) -> Option<bool> {
        if times == 0 {
            return None;
        }
        let half_period = half_period.max(1);
        self.seq = Some(Sequence {
            toggles_left: times as u16 * 2,
            half_period,
            next_tick: now.wrapping_add(half_period),
            lit: false,
        });
        Some(false)
    }

    pub fn poll(&mut self, now: u32) -> Option<bool> {
        let seq = self.seq.as_mut()?;
        // wrapping compare; ticks wrap after ~497 days at 10ms
        if (now.wrapping_sub(seq.next_tick) as i32) < 0 {
            return None;
        }
        seq.lit = !seq.lit;
        seq.toggles_left -= 1;
        seq.next_tick = now.wrapping_add(seq.half_period);
        if seq.toggles_left == 0 {
            self.seq = None;
            return Some(self.steady_on);
        }
        Some(seq.lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    // (tick, level) for every change over `ticks` ticks starting at `from`
    fn run(b: &mut Blinker, from: u32, ticks: u32) -> Vec<(u32, bool)> {
        (0..ticks)
            .map(|i| from.wrapping_add(i))
            .filter_map(|t| b.poll(t).map(|level| (t, level)))
            .collect()
    }

    #[test]
    fn two_blinks_toggle_four_times_then_restore_dark() {
        let mut b = Blinker::new();
        b.set(false);
        assert_eq!(b.start(2, 5, 0), Some(false));
        let changes = run(&mut b, 0, 100);
        assert_eq!(changes, [(5, true), (10, false), (15, true), (20, false)]);
        assert!(!b.is_blinking());
    }

    #[test]
    fn blink_hands_back_to_lit_steady_state() {
        let mut b = Blinker::new();
        assert_eq!(b.set(true), Some(true));
        assert_eq!(b.start(2, 5, 0), Some(false));
        let levels: Vec<bool> = run(&mut b, 0, 100).into_iter().map(|(_, l)| l).collect();
        assert_eq!(levels, [true, false, true, true]);
    }

    #[test]
    fn set_during_blink_is_deferred() {
        let mut b = Blinker::new();
        b.start(1, 3, 0);
        assert_eq!(b.set(true), None);
        assert!(b.is_on());
        let changes = run(&mut b, 0, 20);
        assert_eq!(changes, [(3, true), (6, true)]);
        assert_eq!(b.set(false), Some(false));
    }

    #[test]
    fn zero_times_does_nothing() {
        let mut b = Blinker::new();
        assert_eq!(b.start(0, 5, 0), None);
        assert!(!b.is_blinking());
        assert!(run(&mut b, 0, 50).is_empty());
    }

    #[test]
    fn survives_tick_wraparound() {
        let mut b = Blinker::new();
        let start = u32::MAX - 6;
        b.start(1, 5, start);
        let changes = run(&mut b, start, 20);
        assert_eq!(changes, [(u32::MAX - 1, true), (3, false)]);
    }

    #[test]
    fn zero_half_period_still_advances() {
        let mut b = Blinker::new();
        b.start(1, 0, 10);
        assert_eq!(b.poll(10), None);
        assert_eq!(b.poll(11), Some(true));
        assert_eq!(b.poll(12), Some(false));
    }
}
