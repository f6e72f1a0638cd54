use serde::{Deserialize, Serialize};

use crate::core::{ContainerSize, Rect};

/// Read-only state snapshot passed to listener hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListenerContext {
    pub layout_revision: u64,
    pub container: Option<ContainerSize>,
    pub drawing_area: Option<Rect>,
    pub registered_axes: usize,
    pub series_count: usize,
}

/// Event stream exposed to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// A batch was applied and a new layout published.
    LayoutCommitted { revision: u64, drawing_area: Rect },
    SeriesUpdated { series_count: usize },
    /// Last event a listener receives before it is released.
    Unmounted,
}

/// Extension hook interface for host-side observers.
pub trait ChartListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ChartEvent, context: ListenerContext);
}
