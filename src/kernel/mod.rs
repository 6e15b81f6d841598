// Wake/sleep primitives for the single-threaded main loop.
// Single core, no preemption beyond ISRs that only raise flags;
// WFI idles the CPU between events. The job queue itself lives in
// gallery_core::scheduler so it can be tested on the host.

pub mod wake;

pub use gallery_core::scheduler::{Job, Scheduler};
