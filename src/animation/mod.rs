//! Timer-driven numeric count-up animation.
//!
//! The scheduling primitive is injected through [`Scheduler`]; hosts drive a
//! [`TimerQueue`] from their event loop, tests drive it with [`ManualClock`].

pub mod clock;
pub mod counter;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::{
    CounterAnimation, CounterAnimator, CounterSequence, CounterState, CounterTick, advance,
};
pub use scheduler::{Scheduler, TimerId, TimerQueue, TimerTask};
