use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::api::ChartContext;
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrubberPhase {
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubberState {
    pub scrubbing_enabled: bool,
    pub highlighted_index: Option<usize>,
}

impl Default for ScrubberState {
    fn default() -> Self {
        Self {
            scrubbing_enabled: true,
            highlighted_index: None,
        }
    }
}

/// Host input routed to the scrubber. Pointer coordinates are in container
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrubberInput {
    PointerMove { x: f64 },
    PointerLeave,
    InteractionEnd,
    StepBackward,
    StepForward,
    First,
    Last,
}

type ScrubberListener = Box<dyn FnMut(ScrubberState)>;

/// Highlighted-index state machine driven by pointer and keyboard input.
///
/// Every input funnels through `update_highlighted_index`, so the listener
/// fires once per actual change.
pub struct ScrubberController {
    state: ScrubberState,
    active_series: Option<String>,
    listener: Option<ScrubberListener>,
}

impl Default for ScrubberController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Debug for ScrubberController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrubberController")
            .field("state", &self.state)
            .field("active_series", &self.active_series)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl ScrubberController {
    #[must_use]
    pub fn new(scrubbing_enabled: bool) -> Self {
        Self {
            state: ScrubberState {
                scrubbing_enabled,
                highlighted_index: None,
            },
            active_series: None,
            listener: None,
        }
    }

    /// Controller seeded with the context's scrubbing flag.
    pub fn for_context<L>(context: &ChartContext<L>) -> ChartResult<Self> {
        Ok(Self::new(context.scrubbing_enabled()?))
    }

    #[must_use]
    pub fn state(&self) -> ScrubberState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> ScrubberPhase {
        if self.state.highlighted_index.is_some() {
            ScrubberPhase::Active
        } else {
            ScrubberPhase::Idle
        }
    }

    #[must_use]
    pub fn highlighted_index(&self) -> Option<usize> {
        self.state.highlighted_index
    }

    #[must_use]
    pub fn is_scrubbing_enabled(&self) -> bool {
        self.state.scrubbing_enabled
    }

    #[must_use]
    pub fn active_series(&self) -> Option<&str> {
        self.active_series.as_deref()
    }

    /// Series the scrubber resolves against; `None` follows the first series.
    pub fn set_active_series(&mut self, series_id: Option<String>) {
        self.active_series = series_id;
    }

    pub fn set_listener(&mut self, listener: impl FnMut(ScrubberState) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Disabling drops any highlight. Returns whether the state changed.
    pub fn set_scrubbing_enabled(&mut self, enabled: bool) -> bool {
        if self.state.scrubbing_enabled == enabled {
            return false;
        }
        self.state.scrubbing_enabled = enabled;
        if !enabled {
            self.state.highlighted_index = None;
        }
        trace!(enabled, "scrubbing toggled");
        self.notify();
        true
    }

    /// Sets the highlighted index. Returns whether the state changed.
    ///
    /// A disabled scrubber refuses `Some`.
    pub fn update_highlighted_index(&mut self, index: Option<usize>) -> bool {
        if index.is_some() && !self.state.scrubbing_enabled {
            warn!(?index, "ignoring highlight while scrubbing is disabled");
            return false;
        }
        if self.state.highlighted_index == index {
            return false;
        }
        trace!(
            previous = ?self.state.highlighted_index,
            next = ?index,
            "scrubber highlight changed"
        );
        self.state.highlighted_index = index;
        self.notify();
        true
    }

    /// Applies one input against the committed layout of `context`.
    /// Returns whether the highlighted index changed.
    pub fn handle_input<L: Clone + PartialEq>(
        &mut self,
        context: &ChartContext<L>,
        input: ScrubberInput,
    ) -> ChartResult<bool> {
        match input {
            ScrubberInput::PointerLeave | ScrubberInput::InteractionEnd => {
                Ok(self.update_highlighted_index(None))
            }
            _ if !self.state.scrubbing_enabled => Ok(false),
            ScrubberInput::PointerMove { x } => {
                let index = self.resolve_index(context, x)?;
                Ok(self.update_highlighted_index(index))
            }
            step => {
                let len = self.active_len(context)?;
                let index = step_index(self.state.highlighted_index, len, step);
                Ok(self.update_highlighted_index(index))
            }
        }
    }

    /// Maps a container pixel x to a data index of the active series.
    ///
    /// Ordinal x-axes resolve to the nearest label slot; numeric axes to the
    /// nearest data point. The result is clamped to the series bounds and is
    /// `None` when no scale is published or the series is empty.
    pub fn resolve_index<L: Clone + PartialEq>(
        &self,
        context: &ChartContext<L>,
        pixel_x: f64,
    ) -> ChartResult<Option<usize>> {
        let Some(series) = context.series(self.active_series.as_deref())? else {
            return Ok(None);
        };
        if series.is_empty() || !pixel_x.is_finite() {
            return Ok(None);
        }
        let Some(scale) = context.x_scale()? else {
            return Ok(None);
        };
        let last = series.len() - 1;
        Ok(match scale.as_ordinal() {
            Some(ordinal) => ordinal.inverse_index(pixel_x).map(|index| index.min(last)),
            None => series.nearest_index(scale.inverse(pixel_x)),
        })
    }

    /// Re-validates the highlight after the active series changed length.
    pub fn retain_valid(&mut self, series_len: usize) -> bool {
        match self.state.highlighted_index {
            Some(index) if index >= series_len => {
                let clamped = series_len.checked_sub(1);
                self.update_highlighted_index(clamped)
            }
            _ => false,
        }
    }

    fn active_len<L>(&self, context: &ChartContext<L>) -> ChartResult<usize> {
        Ok(context
            .series(self.active_series.as_deref())?
            .map_or(0, |series| series.len()))
    }

    fn notify(&mut self) {
        let state = self.state;
        if let Some(listener) = self.listener.as_mut() {
            listener(state);
        }
    }
}

fn step_index(current: Option<usize>, len: usize, input: ScrubberInput) -> Option<usize> {
    let last = len.checked_sub(1)?;
    Some(match (input, current) {
        (ScrubberInput::First, _) => 0,
        (ScrubberInput::Last, _) => last,
        (ScrubberInput::StepForward, None) => 0,
        (ScrubberInput::StepForward, Some(index)) => (index + 1).min(last),
        (ScrubberInput::StepBackward, None) => last,
        (ScrubberInput::StepBackward, Some(index)) => index.saturating_sub(1).min(last),
        _ => return current,
    })
}
