use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

use super::scheduler::{Scheduler, TimerId, TimerTask};

/// One displayed value and the animation-relative time it was produced at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterTick {
    pub elapsed: Duration,
    pub value: i64,
}

/// Snapshot of the animation request currently driving a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub current_value: i64,
    pub start_value: i64,
    pub end_value: i64,
    pub duration: Duration,
    pub started_at: Duration,
}

/// Adaptive step computation shared by [`advance`] and [`CounterAnimator`].
#[derive(Debug, Clone, Copy)]
struct CounterStepper {
    start: i64,
    end: i64,
    duration_ms: f64,
    increment: u64,
}

impl CounterStepper {
    fn new(start: i64, end: i64, duration_ms: f64) -> ChartResult<Self> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "counter duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            start,
            end,
            duration_ms,
            increment: 0,
        })
    }

    fn distance(self) -> u64 {
        self.start.abs_diff(self.end)
    }

    fn current(self) -> i64 {
        let offset = i128::from(self.increment);
        let value = if self.end >= self.start {
            i128::from(self.start) + offset
        } else {
            i128::from(self.start) - offset
        };
        // `increment <= distance` keeps the value between start and end.
        value as i64
    }

    fn is_finished(self) -> bool {
        self.increment >= self.distance()
    }

    fn first_delay(self) -> Option<Duration> {
        if self.is_finished() {
            return None;
        }
        Some(ms_to_duration(self.duration_ms / self.distance() as f64))
    }

    /// Applies one tick at `elapsed_ms` and returns the new value plus the
    /// delay until the following tick (`None` once `end` is reached).
    fn tick(&mut self, elapsed_ms: f64) -> (i64, Option<Duration>) {
        let distance = self.distance();
        let percent_elapsed = if self.duration_ms > 0.0 {
            elapsed_ms / self.duration_ms
        } else {
            1.0
        };
        let target = (percent_elapsed * distance as f64).ceil();
        let target = if target.is_finite() && target > 0.0 {
            target.min(distance as f64) as u64
        } else {
            0
        };
        // A late or early wake-up never repeats a value or overshoots `end`.
        self.increment = target.max(self.increment + 1).min(distance);

        let value = self.current();
        if self.is_finished() {
            return (value, None);
        }
        let remaining_ms = (self.duration_ms - elapsed_ms).max(0.0);
        let remaining_steps = (distance - self.increment) as f64;
        (value, Some(ms_to_duration(remaining_ms / remaining_steps)))
    }
}

fn ms_to_duration(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Lazy, finite tick sequence for one counter animation.
///
/// The sequence simulates the scheduler: each item is produced at the time
/// the previous tick asked to be woken up. Once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct CounterSequence {
    stepper: CounterStepper,
    elapsed: Duration,
    next_delay: Option<Duration>,
}

impl Iterator for CounterSequence {
    type Item = CounterTick;

    fn next(&mut self) -> Option<Self::Item> {
        let delay = self.next_delay.take()?;
        self.elapsed = self.elapsed.saturating_add(delay);
        let (value, next_delay) = self.stepper.tick(duration_to_ms(self.elapsed));
        self.next_delay = next_delay;
        Some(CounterTick {
            elapsed: self.elapsed,
            value,
        })
    }
}

/// Tick sequence animating `start_value` to `end_value` over `duration_ms`.
///
/// Equal start and end values produce an empty sequence.
pub fn advance(start_value: i64, end_value: i64, duration_ms: f64) -> ChartResult<CounterSequence> {
    let stepper = CounterStepper::new(start_value, end_value, duration_ms)?;
    Ok(CounterSequence {
        stepper,
        elapsed: Duration::ZERO,
        next_delay: stepper.first_delay(),
    })
}

type CounterListener = Box<dyn FnMut(i64)>;

struct CounterShared {
    value: i64,
    state: Option<CounterState>,
    stepper: Option<CounterStepper>,
    pending: Option<TimerId>,
    generation: u64,
    listener: Option<CounterListener>,
}

/// Animates a displayed integer using an injected [`Scheduler`].
///
/// At most one timer is pending per animator. Starting a new animation, an
/// explicit cancel and dropping the animator all clear the pending timer.
pub struct CounterAnimator<S: Scheduler + ?Sized + 'static> {
    scheduler: Rc<S>,
    shared: Rc<RefCell<CounterShared>>,
}

impl<S: Scheduler + ?Sized + 'static> fmt::Debug for CounterAnimator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("CounterAnimator")
            .field("value", &shared.value)
            .field("state", &shared.state)
            .field("pending", &shared.pending)
            .finish()
    }
}

impl<S: Scheduler + ?Sized + 'static> CounterAnimator<S> {
    #[must_use]
    pub fn new(scheduler: Rc<S>, initial_value: i64) -> Self {
        Self {
            scheduler,
            shared: Rc::new(RefCell::new(CounterShared {
                value: initial_value,
                state: None,
                stepper: None,
                pending: None,
                generation: 0,
                listener: None,
            })),
        }
    }

    /// Installs the callback receiving every displayed value.
    pub fn set_listener(&mut self, listener: impl FnMut(i64) + 'static) {
        self.shared.borrow_mut().listener = Some(Box::new(listener));
    }

    #[must_use]
    pub fn current_value(&self) -> i64 {
        self.shared.borrow().value
    }

    #[must_use]
    pub fn state(&self) -> Option<CounterState> {
        self.shared.borrow().state
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.shared.borrow().pending.is_some()
    }

    /// Starts animating from `start_value` to `end_value`, replacing any
    /// animation in flight.
    pub fn start_animation(
        &mut self,
        start_value: i64,
        end_value: i64,
        duration_ms: f64,
    ) -> ChartResult<CounterAnimation<S>> {
        let stepper = CounterStepper::new(start_value, end_value, duration_ms)?;
        self.cancel();

        let generation = {
            let mut shared = self.shared.borrow_mut();
            shared.generation += 1;
            shared.value = start_value;
            shared.generation
        };
        debug!(start_value, end_value, duration_ms, "start counter animation");

        match stepper.first_delay() {
            None => {
                self.shared.borrow_mut().value = end_value;
                notify(&self.shared, end_value);
            }
            Some(delay) => {
                let started_at = self.scheduler.now();
                {
                    let mut shared = self.shared.borrow_mut();
                    shared.stepper = Some(stepper);
                    shared.state = Some(CounterState {
                        current_value: start_value,
                        start_value,
                        end_value,
                        duration: ms_to_duration(duration_ms),
                        started_at,
                    });
                }
                schedule_tick(&self.scheduler, &self.shared, generation, delay);
            }
        }

        Ok(CounterAnimation {
            scheduler: Rc::downgrade(&self.scheduler),
            shared: Rc::downgrade(&self.shared),
            generation,
        })
    }

    /// Cancels the animation in flight, leaving the current value displayed.
    ///
    /// Returns `true` when a pending tick was cleared.
    pub fn cancel(&mut self) -> bool {
        cancel_pending(self.scheduler.as_ref(), &self.shared)
    }
}

impl<S: Scheduler + ?Sized + 'static> Drop for CounterAnimator<S> {
    fn drop(&mut self) {
        cancel_pending(self.scheduler.as_ref(), &self.shared);
    }
}

/// Cancellation handle for one `start_animation` call.
///
/// Cancelling a handle whose animation already finished or was replaced is a
/// no-op.
pub struct CounterAnimation<S: Scheduler + ?Sized + 'static> {
    scheduler: Weak<S>,
    shared: Weak<RefCell<CounterShared>>,
    generation: u64,
}

impl<S: Scheduler + ?Sized + 'static> fmt::Debug for CounterAnimation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterAnimation")
            .field("generation", &self.generation)
            .finish()
    }
}

impl<S: Scheduler + ?Sized + 'static> CounterAnimation<S> {
    pub fn cancel(&self) -> bool {
        let (Some(scheduler), Some(shared)) = (self.scheduler.upgrade(), self.shared.upgrade())
        else {
            return false;
        };
        if shared.borrow().generation != self.generation {
            return false;
        }
        cancel_pending(scheduler.as_ref(), &shared)
    }
}

fn cancel_pending<S: Scheduler + ?Sized>(scheduler: &S, shared: &RefCell<CounterShared>) -> bool {
    let pending = {
        let mut shared = shared.borrow_mut();
        shared.stepper = None;
        shared.state = None;
        shared.pending.take()
    };
    match pending {
        Some(id) => {
            trace!(timer_id = id.raw(), "cancel counter tick");
            scheduler.cancel(id)
        }
        None => false,
    }
}

fn schedule_tick<S: Scheduler + ?Sized + 'static>(
    scheduler: &Rc<S>,
    shared: &Rc<RefCell<CounterShared>>,
    generation: u64,
    delay: Duration,
) {
    let weak_scheduler = Rc::downgrade(scheduler);
    let weak_shared = Rc::downgrade(shared);
    let task: TimerTask = Box::new(move || {
        let (Some(scheduler), Some(shared)) = (weak_scheduler.upgrade(), weak_shared.upgrade())
        else {
            return;
        };
        run_tick(&scheduler, &shared, generation);
    });
    let id = scheduler.schedule(delay, task);
    shared.borrow_mut().pending = Some(id);
}

fn run_tick<S: Scheduler + ?Sized + 'static>(
    scheduler: &Rc<S>,
    shared: &Rc<RefCell<CounterShared>>,
    generation: u64,
) {
    let (value, next_delay) = {
        let mut inner = shared.borrow_mut();
        if inner.generation != generation {
            return;
        }
        inner.pending = None;
        let Some(started_at) = inner.state.map(|state| state.started_at) else {
            return;
        };
        let Some(stepper) = inner.stepper.as_mut() else {
            return;
        };
        let elapsed = scheduler.now().saturating_sub(started_at);
        let (value, next_delay) = stepper.tick(duration_to_ms(elapsed));
        inner.value = value;
        if let Some(state) = inner.state.as_mut() {
            state.current_value = value;
        }
        if next_delay.is_none() {
            inner.stepper = None;
            inner.state = None;
        }
        (value, next_delay)
    };
    trace!(value, "counter tick");

    if let Some(delay) = next_delay {
        schedule_tick(scheduler, shared, generation, delay);
    }
    notify(shared, value);
}

fn notify(shared: &RefCell<CounterShared>, value: i64) {
    // The listener runs without a borrow held so it may restart the animator.
    let listener = shared.borrow_mut().listener.take();
    if let Some(mut listener) = listener {
        listener(value);
        let mut inner = shared.borrow_mut();
        if inner.listener.is_none() {
            inner.listener = Some(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CounterStepper;

    #[test]
    fn stepper_never_repeats_a_value_on_early_wakeup() {
        let mut stepper = CounterStepper::new(0, 10, 100.0).expect("valid stepper");
        let (first, _) = stepper.tick(0.0);
        let (second, _) = stepper.tick(0.0);
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn stepper_clamps_late_wakeup_to_end() {
        let mut stepper = CounterStepper::new(5, -5, 100.0).expect("valid stepper");
        let (value, next) = stepper.tick(10_000.0);
        assert_eq!(value, -5);
        assert!(next.is_none());
    }

    #[test]
    fn stepper_rejects_invalid_duration() {
        assert!(CounterStepper::new(0, 1, f64::NAN).is_err());
        assert!(CounterStepper::new(0, 1, -1.0).is_err());
    }
}
