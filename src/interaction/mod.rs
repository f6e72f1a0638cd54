//! Pointer and keyboard interaction over a committed chart layout.

mod scrubber;

pub use scrubber::{ScrubberController, ScrubberInput, ScrubberPhase, ScrubberState};
