// Priority job queue for the gallery main loop.
// No dynamic allocation; one fixed-size ring per priority tier.
//
// Group steps sit in the high tier so a step raised by the external
// buttons is applied before a front-button press sampled in the same
// wake, and slow LED blinks never delay either.
use core::fmt;

use crate::input::{GroupStep, SlotButton};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    StepGroup(GroupStep),
    ScanButtons,
    ShowSlot(SlotButton),
    Blink(u8),
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Job::StepGroup(step) => write!(f, "StepGroup({})", step.name()),
            Job::ScanButtons => write!(f, "ScanButtons"),
            Job::ShowSlot(button) => write!(f, "ShowSlot({})", button),
            Job::Blink(times) => write!(f, "Blink({})", times),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High = 0,
    Normal = 1,
    Low = 2,
}

impl Job {
    pub const fn priority(&self) -> Priority {
        match self {
            Job::StepGroup(_) => Priority::High,
            Job::ScanButtons | Job::ShowSlot(_) => Priority::Normal,
            Job::Blink(_) => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushError {
    /// Tier for this job's priority is full
    Full(Job),
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Full(job) => write!(f, "queue full, rejected {}", job),
        }
    }
}

// ring buffer for one tier
pub struct JobQueue<const N: usize> {
    buf: [Option<Job>; N],
    head: usize, // next to read
    len: usize,
}

impl<const N: usize> JobQueue<N> {
    pub const fn new() -> Self {
        Self {
            buf: [None; N],
            head: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, job: Job) -> Result<(), Job> {
        if self.len >= N {
            return Err(job);
        }
        self.buf[(self.head + self.len) % N] = Some(job);
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Job> {
        if self.len == 0 {
            return None;
        }
        let job = self.buf[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        job
    }

    pub fn contains(&self, job: &Job) -> bool {
        (0..self.len).any(|i| self.buf[(self.head + i) % N].as_ref() == Some(job))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

impl<const N: usize> Default for JobQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Scheduler {
    high: JobQueue<4>,
    normal: JobQueue<4>,
    low: JobQueue<4>,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            high: JobQueue::new(),
            normal: JobQueue::new(),
            low: JobQueue::new(),
        }
    }

    pub fn push(&mut self, job: Job) -> Result<(), PushError> {
        self.tier_mut(job.priority())
            .push(job)
            .map_err(PushError::Full)
    }

    // no-op if an identical job is already queued in its tier
    pub fn push_unique(&mut self, job: Job) -> Result<(), PushError> {
        let tier = self.tier_mut(job.priority());
        if tier.contains(&job) {
            return Ok(());
        }
        tier.push(job).map_err(PushError::Full)
    }

    // highest priority first, FIFO within a tier
    pub fn pop(&mut self) -> Option<Job> {
        self.high
            .pop()
            .or_else(|| self.normal.pop())
            .or_else(|| self.low.pop())
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.normal.is_empty() && self.low.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.high.len() + self.normal.len() + self.low.len()
    }

    pub fn clear(&mut self) {
        self.high.clear();
        self.normal.clear();
        self.low.clear();
    }

    fn tier_mut(&mut self, priority: Priority) -> &mut JobQueue<4> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Normal => &mut self.normal,
            Priority::Low => &mut self.low,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_steps_run_before_slot_presses() {
        let mut s = Scheduler::new();
        s.push(Job::Blink(2)).unwrap();
        s.push(Job::ShowSlot(SlotButton::C)).unwrap();
        s.push(Job::StepGroup(GroupStep::Next)).unwrap();

        assert_eq!(s.pop(), Some(Job::StepGroup(GroupStep::Next)));
        assert_eq!(s.pop(), Some(Job::ShowSlot(SlotButton::C)));
        assert_eq!(s.pop(), Some(Job::Blink(2)));
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn fifo_within_a_tier() {
        let mut s = Scheduler::new();
        s.push(Job::StepGroup(GroupStep::Next)).unwrap();
        s.push(Job::StepGroup(GroupStep::Prev)).unwrap();
        assert_eq!(s.pop(), Some(Job::StepGroup(GroupStep::Next)));
        assert_eq!(s.pop(), Some(Job::StepGroup(GroupStep::Prev)));
    }

    #[test]
    fn push_unique_deduplicates() {
        let mut s = Scheduler::new();
        s.push_unique(Job::ScanButtons).unwrap();
        s.push_unique(Job::ScanButtons).unwrap();
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn full_tier_rejects_job() {
        let mut s = Scheduler::new();
        for n in 0..4 {
            s.push(Job::Blink(n)).unwrap();
        }
        assert_eq!(s.push(Job::Blink(9)), Err(PushError::Full(Job::Blink(9))));
        // other tiers unaffected
        assert!(s.push(Job::ScanButtons).is_ok());
    }

    #[test]
    fn ring_wraps_around() {
        let mut q: JobQueue<2> = JobQueue::new();
        for n in 0..5 {
            q.push(Job::Blink(n)).unwrap();
            assert_eq!(q.pop(), Some(Job::Blink(n)));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn clear_empties_every_tier() {
        let mut s = Scheduler::new();
        s.push(Job::ScanButtons).unwrap();
        s.push(Job::Blink(1)).unwrap();
        s.clear();
        assert!(s.is_empty());
    }
}
