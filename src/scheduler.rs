//! Deferred task scheduling on a virtual clock.
//!
//! The engine never sleeps. Anything that must happen later (the long-press
//! timeout, the settle delay before a boundary-crossing motion) is handed to
//! a [`Scheduler`] together with a payload describing the work. The host
//! drives time forward and routes due payloads back to their owner.
//!
//! [`ManualScheduler`] is the in-crate implementation: an advanceable clock
//! used by the replay loop and by tests.

use std::time::Duration;

/// Milliseconds on the host's event clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Timestamp `delay` later, saturating at the end of time.
    pub fn saturating_add(self, delay: Duration) -> Self {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }

    /// Time elapsed since `earlier`; zero if `earlier` is in the future.
    pub fn saturating_duration_since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

/// Handle to a scheduled task, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Clock plus deferred task queue.
///
/// `T` is the payload handed back when the task comes due.
pub trait Scheduler<T> {
    /// Current time.
    fn now(&self) -> Timestamp;

    /// Schedule `task` to come due `delay` from now.
    fn schedule(&mut self, delay: Duration, task: T) -> TimerId;

    /// Cancel a pending task. Returns false if it already ran or never existed.
    fn cancel(&mut self, id: TimerId) -> bool;
}

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    due: Timestamp,
    task: T,
}

/// Advanceable scheduler with no wall-clock dependency.
#[derive(Debug)]
pub struct ManualScheduler<T> {
    now: Timestamp,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ManualScheduler<T> {
    /// Scheduler whose clock starts at zero.
    pub fn new() -> Self {
        Self::starting_at(Timestamp::ZERO)
    }

    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Move the clock forward by `by` and return every task that came due.
    pub fn advance(&mut self, by: Duration) -> Vec<(TimerId, T)> {
        let target = self.now.saturating_add(by);
        self.advance_to(target)
    }

    /// Move the clock to `target` and return every task that came due.
    ///
    /// Tasks are returned in due order; ties keep scheduling order. The clock
    /// never moves backwards: a `target` in the past only collects overdue tasks.
    pub fn advance_to(&mut self, target: Timestamp) -> Vec<(TimerId, T)> {
        if target > self.now {
            self.now = target;
        }
        let now = self.now;

        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|p| (p.due, p.id));
        due.into_iter().map(|p| (p.id, p.task)).collect()
    }

    /// Run the clock to the last pending deadline and return everything.
    pub fn drain(&mut self) -> Vec<(TimerId, T)> {
        match self.pending.iter().map(|p| p.due).max() {
            Some(last) => self.advance_to(last),
            None => Vec::new(),
        }
    }

    /// Number of tasks waiting to come due.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Scheduler<T> for ManualScheduler<T> {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay),
            task,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }
}
