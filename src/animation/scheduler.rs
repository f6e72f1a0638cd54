use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use tracing::trace;

use super::clock::{Clock, ManualClock};

pub type TimerTask = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Timer primitive consumed by animators.
///
/// Implementations run on the single UI thread: tasks fire in due-time
/// order, never overlap, and a cancelled task never runs.
pub trait Scheduler {
    fn now(&self) -> Duration;
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId;
    /// Returns `true` when a pending timer was removed.
    fn cancel(&self, id: TimerId) -> bool;
}

#[derive(Default)]
struct TimerQueueState {
    next_id: u64,
    pending: BTreeMap<(Duration, u64), TimerTask>,
    due_by_id: HashMap<u64, Duration>,
}

/// Ordered timer queue driven by the host event loop.
///
/// The host calls [`TimerQueue::run_due`] once per loop turn (and may sleep
/// until [`TimerQueue::next_deadline`]). Timers sharing a due time fire in
/// scheduling order.
pub struct TimerQueue<C: Clock> {
    clock: C,
    state: RefCell<TimerQueueState>,
}

impl<C: Clock> fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.clock.now())
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl<C: Clock + Default> Default for TimerQueue<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: Clock> TimerQueue<C> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: RefCell::new(TimerQueueState::default()),
        }
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state
            .borrow()
            .pending
            .keys()
            .next()
            .map(|(due, _)| *due)
    }

    /// Runs every timer due at the current clock time, including timers
    /// scheduled by tasks during this call. Returns the number of tasks run.
    pub fn run_due(&self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop_due(self.clock.now()) {
            task();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self, now: Duration) -> Option<TimerTask> {
        let mut state = self.state.borrow_mut();
        let (&(due, id), _) = state.pending.iter().next()?;
        if due > now {
            return None;
        }
        state.due_by_id.remove(&id);
        state.pending.remove(&(due, id))
    }
}

impl TimerQueue<ManualClock> {
    /// Advances the manual clock to `target`, firing timers in order.
    ///
    /// Each task observes the clock at its own due time.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut ran = 0;
        loop {
            let Some(due) = self.next_deadline() else {
                break;
            };
            if due > target {
                break;
            }
            if due > self.clock.now() {
                self.clock.set(due);
            }
            ran += self.run_due();
        }
        if target > self.clock.now() {
            self.clock.set(target);
        }
        ran
    }

    pub fn advance_by(&self, delta: Duration) -> usize {
        self.advance_to(self.clock.now().saturating_add(delta))
    }

    /// Fires every pending timer, including ones scheduled along the way.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(due) = self.next_deadline() {
            ran += self.advance_to(due);
        }
        ran
    }
}

impl<C: Clock> Scheduler for TimerQueue<C> {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId {
        let due = self.clock.now().saturating_add(delay);
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.pending.insert((due, id), task);
        state.due_by_id.insert(id, due);
        trace!(timer_id = id, due_ms = due.as_secs_f64() * 1000.0, "schedule timer");
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(due) = state.due_by_id.remove(&id.0) else {
            return false;
        };
        state.pending.remove(&(due, id.0)).is_some()
    }
}
