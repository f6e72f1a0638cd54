use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AxisPosition, AxisType, ChartScale, ContainerSize, Rect};
use crate::error::{ChartError, ChartResult};

/// Reserved strip of one registered axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub id: String,
    pub axis_type: AxisType,
    pub position: AxisPosition,
    pub size: f64,
    pub bounds: Rect,
}

/// Backend-agnostic geometry for one chart draw pass.
///
/// Renderers paint series, axes and overlays from this frame; they never see
/// the coordinator's mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "L: Serialize",
    deserialize = "L: Deserialize<'de>"
))]
pub struct LayoutFrame<L = String> {
    pub revision: u64,
    pub container: ContainerSize,
    pub drawing_area: Rect,
    pub axes: Vec<AxisFrame>,
    pub x_scale: Option<ChartScale<L>>,
    pub y_scales: IndexMap<String, ChartScale<L>>,
    pub series_lengths: IndexMap<String, usize>,
    #[serde(default)]
    pub highlighted_index: Option<usize>,
}

impl<L> LayoutFrame<L> {
    #[must_use]
    pub fn with_highlighted_index(mut self, index: Option<usize>) -> Self {
        self.highlighted_index = index;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_rect(self.drawing_area, "drawing area")?;
        for axis in &self.axes {
            validate_rect(axis.bounds, "axis bounds")?;
        }
        if let Some(index) = self.highlighted_index {
            let longest = self.series_lengths.values().copied().max().unwrap_or(0);
            if index >= longest {
                return Err(ChartError::InvalidData(format!(
                    "highlighted index {index} is outside every series"
                )));
            }
        }
        Ok(())
    }
}

fn validate_rect(rect: Rect, field_name: &str) -> ChartResult<()> {
    let finite = [rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|value| value.is_finite());
    if !finite || rect.width < 0.0 || rect.height < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{field_name} must be finite with non-negative extent"
        )));
    }
    Ok(())
}
