use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::core::{AxisPosition, AxisType};
use crate::error::{ChartError, ChartResult};

/// Runtime reservation record for one mounted axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredAxis {
    pub id: String,
    pub axis_type: AxisType,
    pub position: AxisPosition,
    pub size: f64,
}

impl RegisteredAxis {
    /// Checks the id is non-empty and the size finite and `>= 0`.
    pub(crate) fn validated(
        id: impl Into<String>,
        axis_type: AxisType,
        position: AxisPosition,
        size: f64,
    ) -> ChartResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ChartError::InvalidData("axis id must not be empty".to_owned()));
        }
        let size = ensure_finite(size, "axis size")?;
        if size < 0.0 {
            return Err(ChartError::InvalidData("axis size must be >= 0".to_owned()));
        }
        Ok(Self {
            id,
            axis_type,
            position,
            size,
        })
    }
}

/// Axis-size declarations keyed by axis id.
///
/// Iteration follows registration order, which is also the stacking order of
/// axes sharing one side (first registered sits next to the plot).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisRegistry {
    axes: IndexMap<String, RegisteredAxis>,
}

impl AxisRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the reservation for `id`.
    ///
    /// Replacing keeps the axis in its original stacking slot.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        axis_type: AxisType,
        position: AxisPosition,
        size: f64,
    ) -> ChartResult<()> {
        self.insert(RegisteredAxis::validated(id, axis_type, position, size)?);
        Ok(())
    }

    /// Inserts an already validated record.
    pub(crate) fn insert(&mut self, axis: RegisteredAxis) {
        self.axes.insert(axis.id.clone(), axis);
    }

    /// Removes the reservation for `id`. Unknown ids are a no-op.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.axes.shift_remove(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RegisteredAxis> {
        self.axes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.axes.contains_key(id)
    }

    /// Total pixels reserved on one side by every axis registered there.
    #[must_use]
    pub fn inset(&self, axis_type: AxisType, position: AxisPosition) -> f64 {
        self.axes_on(axis_type, position).map(|axis| axis.size).sum()
    }

    /// Pixels reserved on the same side by axes registered before `id`.
    #[must_use]
    pub fn offset_before(&self, id: &str) -> Option<f64> {
        let target = self.axes.get(id)?;
        Some(
            self.axes_on(target.axis_type, target.position)
                .take_while(|axis| axis.id != target.id)
                .map(|axis| axis.size)
                .sum(),
        )
    }

    pub fn axes(&self) -> impl Iterator<Item = &RegisteredAxis> {
        self.axes.values()
    }

    pub fn axes_on(
        &self,
        axis_type: AxisType,
        position: AxisPosition,
    ) -> impl Iterator<Item = &RegisteredAxis> {
        self.axes
            .values()
            .filter(move |axis| axis.axis_type == axis_type && axis.position == position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn clear(&mut self) {
        self.axes.clear();
    }
}
