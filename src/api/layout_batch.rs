use smallvec::SmallVec;

use crate::core::{AxisPosition, AxisType, ChartPadding, ContainerSize, RegisteredAxis, Series};
use crate::error::{ChartError, ChartResult};

use super::AxisConfig;

/// One pending change collected during a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum LayoutDelta<L> {
    RegisterAxis(RegisteredAxis),
    UnregisterAxis(String),
    Resize(ContainerSize),
    Padding(ChartPadding),
    Series(Vec<Series>),
    XAxis(AxisConfig<L>),
    YAxes(Vec<AxisConfig<L>>),
}

/// Pending-changes buffer for one logical update pass.
///
/// Every change is validated when it is queued, so applying the batch cannot
/// fail halfway. Nothing queued here is observable until the owning
/// [`ChartContext::update`](super::ChartContext::update) call returns.
#[derive(Debug)]
pub struct LayoutBatch<L = String> {
    deltas: SmallVec<[LayoutDelta<L>; 8]>,
}

impl<L> Default for LayoutBatch<L> {
    fn default() -> Self {
        Self {
            deltas: SmallVec::new(),
        }
    }
}

impl<L> LayoutBatch<L> {
    pub fn register_axis(
        &mut self,
        id: impl Into<String>,
        axis_type: AxisType,
        position: AxisPosition,
        size: f64,
    ) -> ChartResult<()> {
        let axis = RegisteredAxis::validated(id, axis_type, position, size)?;
        self.deltas.push(LayoutDelta::RegisterAxis(axis));
        Ok(())
    }

    pub fn unregister_axis(&mut self, id: impl Into<String>) {
        self.deltas.push(LayoutDelta::UnregisterAxis(id.into()));
    }

    pub fn set_container_size(&mut self, container: ContainerSize) -> ChartResult<()> {
        if !container.is_valid() {
            return Err(ChartError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        self.deltas.push(LayoutDelta::Resize(container));
        Ok(())
    }

    pub fn set_padding(&mut self, padding: ChartPadding) -> ChartResult<()> {
        if !padding.is_valid() {
            return Err(ChartError::InvalidData(
                "chart padding must be finite and >= 0".to_owned(),
            ));
        }
        self.deltas.push(LayoutDelta::Padding(padding));
        Ok(())
    }

    pub fn set_series(&mut self, series: Vec<Series>) -> ChartResult<()> {
        validate_series(&series)?;
        self.deltas.push(LayoutDelta::Series(series));
        Ok(())
    }

    pub fn set_x_axis(&mut self, axis: AxisConfig<L>) -> ChartResult<()> {
        axis.validate(AxisType::X)?;
        self.deltas.push(LayoutDelta::XAxis(axis));
        Ok(())
    }

    pub fn set_y_axes(&mut self, axes: Vec<AxisConfig<L>>) -> ChartResult<()> {
        validate_y_axes(&axes)?;
        self.deltas.push(LayoutDelta::YAxes(axes));
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub(super) fn into_deltas(self) -> SmallVec<[LayoutDelta<L>; 8]> {
        self.deltas
    }
}

pub(super) fn validate_series(series: &[Series]) -> ChartResult<()> {
    for (position, entry) in series.iter().enumerate() {
        if entry.id.is_empty() {
            return Err(ChartError::InvalidData(format!(
                "series at position {position} has an empty id"
            )));
        }
        if series[..position].iter().any(|other| other.id == entry.id) {
            return Err(ChartError::InvalidData(format!(
                "duplicate series id `{}`",
                entry.id
            )));
        }
        if entry
            .data
            .iter()
            .flatten()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(ChartError::InvalidData(format!(
                "series `{}` contains non-finite points",
                entry.id
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_y_axes<L>(axes: &[AxisConfig<L>]) -> ChartResult<()> {
    for (position, axis) in axes.iter().enumerate() {
        axis.validate(AxisType::Y)?;
        if axes[..position].iter().any(|other| other.id == axis.id) {
            return Err(ChartError::InvalidData(format!(
                "duplicate y-axis id `{}`",
                axis.id
            )));
        }
    }
    Ok(())
}
