use std::sync::Arc;

use crate::core::{
    AccessibleRegion, AxisRegistry, ChartPadding, ChartScale, ContainerSize, DataPoint, Rect,
    Series, map_to_accessible_regions,
};
use crate::error::ChartResult;

use super::{AxisConfig, ChartContext};

impl<L> ChartContext<L> {
    /// Series by id; `None` selects the first series.
    pub fn series(&self, id: Option<&str>) -> ChartResult<Option<&Series>> {
        self.ensure_active("series")?;
        Ok(match id {
            Some(id) => self.model.series.iter().find(|series| series.id == id),
            None => self.model.series.first(),
        })
    }

    pub fn series_data(&self, id: Option<&str>) -> ChartResult<Option<&[Option<DataPoint>]>> {
        Ok(self.series(id)?.map(|series| series.data.as_slice()))
    }

    pub fn series_list(&self) -> ChartResult<&[Series]> {
        self.ensure_active("series_list")?;
        Ok(&self.model.series)
    }

    /// Published x scale. `None` until a container has been measured or when
    /// the x-axis has no domain to map.
    pub fn x_scale(&self) -> ChartResult<Option<Arc<ChartScale<L>>>> {
        self.ensure_active("x_scale")?;
        Ok(self
            .published
            .as_ref()
            .and_then(|layout| layout.x_scale.clone()))
    }

    /// Published scale for a y-axis; `None` selects the first configured
    /// y-axis.
    pub fn y_scale(&self, axis_id: Option<&str>) -> ChartResult<Option<Arc<ChartScale<L>>>> {
        self.ensure_active("y_scale")?;
        let Some(layout) = self.published.as_ref() else {
            return Ok(None);
        };
        let axis_id = match axis_id {
            Some(id) => Some(id),
            None => self.model.y_axes.first().map(|axis| axis.id.as_str()),
        };
        Ok(axis_id.and_then(|id| layout.y_scales.get(id).cloned()))
    }

    pub fn drawing_area(&self) -> ChartResult<Option<Rect>> {
        self.ensure_active("drawing_area")?;
        Ok(self.published.as_ref().map(|layout| layout.drawing_area))
    }

    /// Strip reserved by one registered axis around the drawing area.
    pub fn axis_bounds(&self, id: &str) -> ChartResult<Option<Rect>> {
        self.ensure_active("axis_bounds")?;
        Ok(self
            .published
            .as_ref()
            .and_then(|layout| layout.axis_strips.get(id).copied()))
    }

    pub fn container_size(&self) -> ChartResult<Option<ContainerSize>> {
        self.ensure_active("container_size")?;
        Ok(self.model.container)
    }

    pub fn padding(&self) -> ChartResult<ChartPadding> {
        self.ensure_active("padding")?;
        Ok(self.model.padding)
    }

    pub fn registry(&self) -> ChartResult<&AxisRegistry> {
        self.ensure_active("registry")?;
        Ok(&self.model.registry)
    }

    pub fn x_axis_config(&self) -> ChartResult<&AxisConfig<L>> {
        self.ensure_active("x_axis_config")?;
        Ok(&self.model.x_axis)
    }

    pub fn y_axis_configs(&self) -> ChartResult<&[AxisConfig<L>]> {
        self.ensure_active("y_axis_configs")?;
        Ok(&self.model.y_axes)
    }

    /// Number of committed layout passes.
    pub fn layout_revision(&self) -> ChartResult<u64> {
        self.ensure_active("layout_revision")?;
        Ok(self.revision)
    }

    pub fn scrubbing_enabled(&self) -> ChartResult<bool> {
        self.ensure_active("scrubbing_enabled")?;
        Ok(self.scrubbing_enabled)
    }

    pub fn set_scrubbing_enabled(&mut self, enabled: bool) -> ChartResult<()> {
        self.ensure_active("set_scrubbing_enabled")?;
        self.scrubbing_enabled = enabled;
        Ok(())
    }

    pub fn accessible_region_count(&self) -> ChartResult<usize> {
        self.ensure_active("accessible_region_count")?;
        Ok(self.accessible_region_count)
    }

    /// Sparkline regions for one series using the configured region count.
    /// Unknown series map to no regions.
    pub fn accessible_regions(
        &self,
        series_id: Option<&str>,
    ) -> ChartResult<Vec<AccessibleRegion<Option<DataPoint>>>> {
        let count = self.accessible_region_count()?;
        Ok(self
            .series_data(series_id)?
            .map(|data| map_to_accessible_regions(data, count))
            .unwrap_or_default())
    }
}
