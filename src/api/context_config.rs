use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{AxisType, ChartPadding, ContainerSize, DEFAULT_REGION_COUNT, Series};
use crate::error::{ChartError, ChartResult};

use super::AxisConfig;

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can keep chart setup in
/// fixtures without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "L: Serialize",
    deserialize = "L: Deserialize<'de>"
))]
pub struct ChartContextConfig<L = String> {
    /// Measured container size; `None` until the host has laid the chart out.
    #[serde(default)]
    pub container: Option<ContainerSize>,
    #[serde(default)]
    pub padding: ChartPadding,
    #[serde(default = "AxisConfig::with_x_default")]
    pub x_axis: AxisConfig<L>,
    #[serde(default = "default_y_axes")]
    pub y_axes: Vec<AxisConfig<L>>,
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default = "default_scrubbing_enabled")]
    pub scrubbing_enabled: bool,
    #[serde(default = "default_region_count")]
    pub accessible_region_count: usize,
}

fn default_y_axes<L>() -> Vec<AxisConfig<L>> {
    vec![AxisConfig::with_y_default()]
}

fn default_scrubbing_enabled() -> bool {
    true
}

fn default_region_count() -> usize {
    DEFAULT_REGION_COUNT
}

impl<L> AxisConfig<L> {
    fn with_x_default() -> Self {
        Self::with_orientation(super::DEFAULT_X_AXIS_ID, AxisType::X)
    }

    fn with_y_default() -> Self {
        Self::with_orientation(super::DEFAULT_Y_AXIS_ID, AxisType::Y)
    }
}

impl<L> Default for ChartContextConfig<L> {
    fn default() -> Self {
        Self {
            container: None,
            padding: ChartPadding::default(),
            x_axis: AxisConfig::with_x_default(),
            y_axes: default_y_axes(),
            series: Vec::new(),
            scrubbing_enabled: default_scrubbing_enabled(),
            accessible_region_count: default_region_count(),
        }
    }
}

impl ChartContextConfig {
    /// Creates a config with a measured container and default auto axes.
    #[must_use]
    pub fn new(container: ContainerSize) -> Self {
        Self::default().with_container(container)
    }
}

impl<L> ChartContextConfig<L> {
    #[must_use]
    pub fn with_container(mut self, container: ContainerSize) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: ChartPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig<L>) -> Self {
        self.x_axis = axis;
        self
    }

    /// Replaces every y-axis with `axes`. The first one is the default axis.
    #[must_use]
    pub fn with_y_axes(mut self, axes: Vec<AxisConfig<L>>) -> Self {
        self.y_axes = axes;
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: Vec<Series>) -> Self {
        self.series = series;
        self
    }

    #[must_use]
    pub fn with_scrubbing_enabled(mut self, enabled: bool) -> Self {
        self.scrubbing_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_accessible_region_count(mut self, count: usize) -> Self {
        self.accessible_region_count = count;
        self
    }
}

impl<L: Serialize> ChartContextConfig<L> {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

impl<L: DeserializeOwned> ChartContextConfig<L> {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))
    }
}
