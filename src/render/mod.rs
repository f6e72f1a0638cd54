mod frame;
mod null_renderer;

pub use frame::{AxisFrame, LayoutFrame};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `LayoutFrame` so
/// drawing code remains isolated from chart coordination and interaction logic.
pub trait Renderer<L = String> {
    fn render(&mut self, frame: &LayoutFrame<L>) -> ChartResult<()>;
}
