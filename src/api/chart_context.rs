use indexmap::IndexMap;
use tracing::debug;

use crate::core::{AxisPosition, AxisRegistry, AxisType, ChartPadding, ContainerSize, Series};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, ChartListener};

use super::chart_model::{ChartModel, PublishedLayout};
use super::layout_batch::{LayoutDelta, validate_series, validate_y_axes};
use super::{AxisConfig, ChartContextConfig, LayoutBatch};

/// Coordinator that owns one chart's data, axis reservations and published
/// geometry.
///
/// Every mutation goes through a layout pass ([`ChartContext::update`]); the
/// drawing area and scales are rebuilt once per pass and only the committed
/// result is observable. After [`ChartContext::unmount`] every query fails
/// with [`ChartError::ContextInactive`].
pub struct ChartContext<L = String> {
    pub(super) model: ChartModel<L>,
    pub(super) published: Option<PublishedLayout<L>>,
    pub(super) revision: u64,
    pub(super) scrubbing_enabled: bool,
    pub(super) accessible_region_count: usize,
    pub(super) active: bool,
    pub(super) listeners: IndexMap<String, Box<dyn ChartListener>>,
}

impl<L: Clone + PartialEq> ChartContext<L> {
    pub fn new(config: ChartContextConfig<L>) -> ChartResult<Self> {
        let ChartContextConfig {
            container,
            padding,
            x_axis,
            y_axes,
            series,
            scrubbing_enabled,
            accessible_region_count,
        } = config;

        if let Some(container) = container {
            if !container.is_valid() {
                return Err(ChartError::InvalidContainer {
                    width: container.width,
                    height: container.height,
                });
            }
        }
        if !padding.is_valid() {
            return Err(ChartError::InvalidData(
                "chart padding must be finite and >= 0".to_owned(),
            ));
        }
        x_axis.validate(AxisType::X)?;
        validate_y_axes(&y_axes)?;
        validate_series(&series)?;

        let mut model = ChartModel {
            container,
            padding,
            registry: AxisRegistry::new(),
            series,
            x_axis,
            y_axes,
            config_reservations: Vec::new(),
        };
        model.sync_config_reservations();

        let mut context = Self {
            model,
            published: None,
            revision: 0,
            scrubbing_enabled,
            accessible_region_count,
            active: true,
            listeners: IndexMap::new(),
        };
        if container.is_some() {
            context.published = context.model.build_layout(1)?;
            context.revision = 1;
        }
        Ok(context)
    }

    /// Runs one layout pass.
    ///
    /// Changes queued on the batch are applied together when `pass` returns
    /// `Ok`; an `Err` discards all of them. A non-empty pass bumps
    /// [`ChartContext::layout_revision`] exactly once.
    pub fn update<T>(
        &mut self,
        pass: impl FnOnce(&mut LayoutBatch<L>) -> ChartResult<T>,
    ) -> ChartResult<T> {
        self.ensure_active("update")?;
        let mut batch = LayoutBatch::default();
        let output = pass(&mut batch)?;
        self.commit(batch)?;
        Ok(output)
    }

    fn commit(&mut self, batch: LayoutBatch<L>) -> ChartResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut next = self.model.clone();
        let mut series_changed = false;
        for delta in batch.into_deltas() {
            series_changed |= matches!(delta, LayoutDelta::Series(_));
            next.apply(delta);
        }
        let revision = self.revision + 1;
        let layout = next.build_layout(revision)?;

        self.model = next;
        self.published = layout;
        self.revision = revision;

        match self.published.as_ref().map(|layout| layout.drawing_area) {
            Some(drawing_area) => {
                debug!(
                    revision,
                    x = drawing_area.x,
                    y = drawing_area.y,
                    width = drawing_area.width,
                    height = drawing_area.height,
                    axes = self.model.registry.len(),
                    "layout committed"
                );
                self.emit_event(ChartEvent::LayoutCommitted {
                    revision,
                    drawing_area,
                });
            }
            None => debug!(revision, "layout committed without a measured container"),
        }
        if series_changed {
            let series_count = self.model.series.len();
            self.emit_event(ChartEvent::SeriesUpdated { series_count });
        }
        Ok(())
    }

    /// Registers or replaces one axis reservation in its own pass.
    pub fn register_axis(
        &mut self,
        id: impl Into<String>,
        axis_type: AxisType,
        position: AxisPosition,
        size: f64,
    ) -> ChartResult<()> {
        self.update(|batch| batch.register_axis(id, axis_type, position, size))
    }

    /// Removes one axis reservation. Returns `false` for unknown ids, in
    /// which case nothing is committed.
    pub fn unregister_axis(&mut self, id: &str) -> ChartResult<bool> {
        self.ensure_active("unregister_axis")?;
        if !self.model.registry.contains(id) {
            return Ok(false);
        }
        self.update(|batch| {
            batch.unregister_axis(id);
            Ok(true)
        })
    }

    pub fn set_container_size(&mut self, container: ContainerSize) -> ChartResult<()> {
        self.update(|batch| batch.set_container_size(container))
    }

    pub fn set_padding(&mut self, padding: ChartPadding) -> ChartResult<()> {
        self.update(|batch| batch.set_padding(padding))
    }

    pub fn set_series(&mut self, series: Vec<Series>) -> ChartResult<()> {
        self.update(|batch| batch.set_series(series))
    }

    pub fn set_x_axis(&mut self, axis: AxisConfig<L>) -> ChartResult<()> {
        self.update(|batch| batch.set_x_axis(axis))
    }

    pub fn set_y_axes(&mut self, axes: Vec<AxisConfig<L>>) -> ChartResult<()> {
        self.update(|batch| batch.set_y_axes(axes))
    }

    /// Replaces the x-axis and every y-axis in one pass.
    pub fn set_axis_configs(
        &mut self,
        x_axis: AxisConfig<L>,
        y_axes: Vec<AxisConfig<L>>,
    ) -> ChartResult<()> {
        self.update(|batch| {
            batch.set_x_axis(x_axis)?;
            batch.set_y_axes(y_axes)
        })
    }
}

impl<L> ChartContext<L> {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ends the chart lifetime.
    ///
    /// Listeners get a final [`ChartEvent::Unmounted`] and are released.
    /// Returns `false` when the context was already unmounted.
    pub fn unmount(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.emit_event(ChartEvent::Unmounted);
        self.listeners.clear();
        self.published = None;
        self.active = false;
        debug!(revision = self.revision, "chart context unmounted");
        true
    }

    pub(super) fn ensure_active(&self, operation: &'static str) -> ChartResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(ChartError::ContextInactive { operation })
        }
    }
}
