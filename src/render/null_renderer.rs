use crate::error::ChartResult;
use crate::render::{LayoutFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend consumes it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_revision: Option<u64>,
    pub last_axis_count: usize,
}

impl<L> Renderer<L> for NullRenderer {
    fn render(&mut self, frame: &LayoutFrame<L>) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_revision = Some(frame.revision);
        self.last_axis_count = frame.axes.len();
        Ok(())
    }
}
