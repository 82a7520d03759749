//! A single-threaded, virtual-clock event loop.
//!
//! Every recurring callback of a round (frames, countdown, spawners) is a task
//! on this loop. Nothing runs in parallel: the owner drains due tasks one at a
//! time with [`EventLoop::pop_due`] and acts on each before asking for the next.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

use tracing::trace;

/// Identifies a scheduled task. Ids are never reused, so a handle to a
/// cancelled or finished task can never match a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// A task that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<K> {
    pub handle: TaskHandle,
    pub kind: K,
    /// The virtual time the task was due at.
    pub at: Duration,
}

#[derive(Debug)]
struct Task<K> {
    kind: K,
    period: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due: Duration,
    seq: u64,
    handle: TaskHandle,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
pub struct EventLoop<K> {
    now: Duration,
    next_id: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<Pending>>,
    tasks: HashMap<TaskHandle, Task<K>>,
}

impl<K> Default for EventLoop<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            seq: 0,
            queue: BinaryHeap::new(),
            tasks: HashMap::new(),
        }
    }
}

impl<K: Copy + std::fmt::Debug> EventLoop<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `kind` to fire once, `delay` from now.
    pub fn schedule_once(&mut self, kind: K, delay: Duration) -> TaskHandle {
        self.insert(kind, delay, None)
    }

    /// Schedules `kind` to fire every `period`, first at `now + period`.
    ///
    /// A zero period is bumped to one millisecond so the loop always makes progress.
    pub fn schedule_repeating(&mut self, kind: K, period: Duration) -> TaskHandle {
        let period = period.max(Duration::from_millis(1));
        self.insert(kind, period, Some(period))
    }

    fn insert(&mut self, kind: K, delay: Duration, period: Option<Duration>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.insert(handle, Task { kind, period });
        self.enqueue(handle, self.now + delay);
        trace!(?handle, ?kind, ?delay, ?period, "Task scheduled");
        handle
    }

    fn enqueue(&mut self, handle: TaskHandle, due: Duration) {
        self.queue.push(Reverse(Pending {
            due,
            seq: self.seq,
            handle,
        }));
        self.seq += 1;
    }

    /// Cancels a task. Returns `false` if it had already been cancelled or had fired for the last time.
    ///
    /// Queue entries of a cancelled task stay in the heap and are discarded when they surface.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let removed = self.tasks.remove(&handle);
        if let Some(task) = &removed {
            trace!(?handle, kind = ?task.kind, "Task cancelled");
        }
        removed.is_some()
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle)
    }

    /// Number of live (not cancelled, not finished) tasks.
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// The due time of the earliest live task.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue.peek().map(|Reverse(pending)| pending.due)
    }

    /// Pops the earliest live task due at or before `until`, advancing the clock to its due time.
    ///
    /// Repeating tasks are re-queued one period after their due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<K>> {
        self.discard_stale();
        let Reverse(pending) = *self.queue.peek()?;
        if pending.due > until {
            return None;
        }
        self.queue.pop();
        self.now = self.now.max(pending.due);

        let task = self.tasks.get(&pending.handle)?;
        let kind = task.kind;
        match task.period {
            Some(period) => self.enqueue(pending.handle, pending.due + period),
            None => {
                self.tasks.remove(&pending.handle);
            }
        }

        Some(Fired {
            handle: pending.handle,
            kind,
            at: pending.due,
        })
    }

    /// Moves the clock forward to `time`. The clock never moves backwards.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse(pending)) = self.queue.peek() {
            if self.tasks.contains_key(&pending.handle) {
                break;
            }
            self.queue.pop();
        }
    }
}
