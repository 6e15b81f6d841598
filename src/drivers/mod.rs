// Hardware drivers: chip-level and protocol-level.
//
// Chip drivers are generic over embedded-hal traits; only pin
// assignments and bus wiring (in board/) are board-specific. The
// group-button ISR is the exception: it owns esp-hal GPIO inputs.

pub mod buttons;
pub mod led;
pub mod sdcard;
pub mod shift_register;
pub mod ssd1677;
pub mod storage;
pub mod strip;
