//! Observer hooks for host applications.
//!
//! Listeners watch chart lifecycle events without mutating chart internals.

pub mod listeners;

pub use listeners::{ChartEvent, ChartListener, ListenerContext};
