//! Virtual-time timer queue.
//!
//! Timers are ordered by due time and then by scheduling order, so two
//! timers due at the same instant fire in the order they were set.

use std::{cmp::Ordering, collections::BinaryHeap, time::Duration};

use crate::dom::SlotId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Staggered start of the typing effect for a slot.
    StartTyping { slot: SlotId },
    /// Next character of a typing run.
    TypeNext { slot: SlotId, run: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct Entry {
    due: Duration,
    id: TimerId,
    task: TimerTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap yields the earliest timer.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.id).cmp(&(self.due, self.id))
    }
}

#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Entry>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|entry| entry.due)
    }

    pub fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Entry {
            due: self.now + delay,
            id,
            task,
        });
        id
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerTask> {
        if self.next_due()? > until {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Moves the clock forward to `until` once nothing earlier is pending.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
