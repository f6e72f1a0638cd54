use indexmap::IndexMap;

use crate::error::ChartResult;
use crate::render::{AxisFrame, LayoutFrame, Renderer};

use super::ChartContext;

impl<L: Clone> ChartContext<L> {
    /// Materializes the committed layout. `None` before a container has been
    /// measured.
    pub fn snapshot(&self) -> ChartResult<Option<LayoutFrame<L>>> {
        self.ensure_active("snapshot")?;
        let Some(layout) = self.published.as_ref() else {
            return Ok(None);
        };

        let axes = self
            .model
            .registry
            .axes()
            .filter_map(|axis| {
                layout.axis_strips.get(&axis.id).map(|bounds| AxisFrame {
                    id: axis.id.clone(),
                    axis_type: axis.axis_type,
                    position: axis.position,
                    size: axis.size,
                    bounds: *bounds,
                })
            })
            .collect();
        let y_scales = layout
            .y_scales
            .iter()
            .map(|(id, scale)| (id.clone(), scale.as_ref().clone()))
            .collect();
        let series_lengths: IndexMap<String, usize> = self
            .model
            .series
            .iter()
            .map(|series| (series.id.clone(), series.len()))
            .collect();

        Ok(Some(LayoutFrame {
            revision: layout.revision,
            container: layout.container,
            drawing_area: layout.drawing_area,
            axes,
            x_scale: layout.x_scale.as_deref().cloned(),
            y_scales,
            series_lengths,
            highlighted_index: None,
        }))
    }

    /// Hands the committed layout to `renderer`. Returns `false` when there
    /// is nothing to draw yet.
    pub fn render<R: Renderer<L>>(
        &self,
        renderer: &mut R,
        highlighted_index: Option<usize>,
    ) -> ChartResult<bool> {
        let Some(frame) = self.snapshot()? else {
            return Ok(false);
        };
        renderer.render(&frame.with_highlighted_index(highlighted_index))?;
        Ok(true)
    }
}
