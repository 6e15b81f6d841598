//! Front button row and external group buttons.
//!
//! The five front buttons A..E sit on a 74HC165 parallel-in/serial-out
//! shift register. After a latch + 8 clocks the byte holds one bit per
//! input; A..E occupy bits 7 down to 3 (1 = pressed). Bits 2..0 are
//! wired to other board signals and ignored here.

/// One of the five front buttons; each selects a slot of the active group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotButton {
    A,
    B,
    C,
    D,
    E,
}

impl SlotButton {
    /// Scan order; earlier buttons win when several are held.
    pub const ALL: [SlotButton; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Slot within the active group (0..=4).
    pub const fn slot(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
        }
    }

    /// Bit position in the shift-register byte.
    pub const fn bit(self) -> u8 {
        7 - self.slot() as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

impl core::fmt::Display for SlotButton {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode a shift-register sample to the pressed front button, if any.
pub fn decode_shift_register(sample: u8) -> Option<SlotButton> {
    SlotButton::ALL
        .into_iter()
        .find(|b| sample & (1 << b.bit()) != 0)
}

/// External two-button module: red steps forward, blue steps back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStep {
    Next,
    Prev,
}

impl GroupStep {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_sample_decodes_to_none() {
        // low bits carry unrelated board signals
        assert_eq!(decode_shift_register(0b0000_0111), None);
        assert_eq!(decode_shift_register(0), None);
    }

    #[test]
    fn each_button_maps_to_its_bit() {
        assert_eq!(decode_shift_register(0b1000_0000), Some(SlotButton::A));
        assert_eq!(decode_shift_register(0b0100_0000), Some(SlotButton::B));
        assert_eq!(decode_shift_register(0b0010_0000), Some(SlotButton::C));
        assert_eq!(decode_shift_register(0b0001_0000), Some(SlotButton::D));
        assert_eq!(decode_shift_register(0b0000_1000), Some(SlotButton::E));
    }

    #[test]
    fn first_button_in_scan_order_wins() {
        assert_eq!(decode_shift_register(0b0101_1000), Some(SlotButton::B));
        assert_eq!(decode_shift_register(0b0001_1101), Some(SlotButton::D));
    }

    #[test]
    fn slots_follow_button_order() {
        for (i, b) in SlotButton::ALL.iter().enumerate() {
            assert_eq!(b.slot(), i);
        }
    }
}
