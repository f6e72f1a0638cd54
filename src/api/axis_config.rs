use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::core::{AxisPosition, AxisType};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_X_AXIS_ID: &str = "x";
pub const DEFAULT_Y_AXIS_ID: &str = "y";

/// Data domain declared for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDomain<L> {
    /// Derived from the extent of every series bound to the axis.
    Auto,
    Numeric { min: f64, max: f64 },
    /// Finite label set laid out as evenly spaced bands.
    Ordinal(Vec<L>),
}

impl<L> Default for AxisDomain<L> {
    fn default() -> Self {
        Self::Auto
    }
}

/// Declarative axis configuration supplied by the caller.
///
/// A config carrying `size` reserves a strip in the axis registry when it is
/// committed; without it the axis only contributes a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "L: Serialize", deserialize = "L: Deserialize<'de>"))]
pub struct AxisConfig<L = String> {
    pub id: String,
    pub orientation: AxisType,
    #[serde(default)]
    pub domain: AxisDomain<L>,
    pub position: AxisPosition,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub clamp: bool,
}

impl AxisConfig {
    #[must_use]
    pub fn new(id: impl Into<String>, orientation: AxisType) -> Self {
        Self::with_orientation(id, orientation)
    }

    #[must_use]
    pub fn x() -> Self {
        Self::new(DEFAULT_X_AXIS_ID, AxisType::X)
    }

    #[must_use]
    pub fn y() -> Self {
        Self::new(DEFAULT_Y_AXIS_ID, AxisType::Y)
    }
}

impl<L> AxisConfig<L> {
    /// Label-type agnostic constructor; x-axes default to the bottom edge and
    /// y-axes to the left edge.
    #[must_use]
    pub fn with_orientation(id: impl Into<String>, orientation: AxisType) -> Self {
        Self {
            id: id.into(),
            orientation,
            domain: AxisDomain::Auto,
            position: match orientation {
                AxisType::X => AxisPosition::End,
                AxisType::Y => AxisPosition::Start,
            },
            size: None,
            clamp: false,
        }
    }

    /// Ordinal axis over caller-defined labels.
    #[must_use]
    pub fn ordinal(id: impl Into<String>, orientation: AxisType, labels: Vec<L>) -> Self {
        let mut config = Self::with_orientation(id, orientation);
        config.domain = AxisDomain::Ordinal(labels);
        config
    }

    #[must_use]
    pub fn with_numeric_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = AxisDomain::Numeric { min, max };
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<L>) -> Self {
        self.domain = AxisDomain::Ordinal(labels);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub(crate) fn validate(&self, expected: AxisType) -> ChartResult<()> {
        if self.id.is_empty() {
            return Err(ChartError::InvalidData(
                "axis config id must not be empty".to_owned(),
            ));
        }
        if self.orientation != expected {
            return Err(ChartError::InvalidData(format!(
                "axis `{}` is configured as {:?} but used as {expected:?}",
                self.id, self.orientation
            )));
        }
        if let AxisDomain::Numeric { min, max } = self.domain {
            ensure_finite(min, "axis domain min")?;
            ensure_finite(max, "axis domain max")?;
        }
        if let Some(size) = self.size {
            if !size.is_finite() || size < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis `{}` size must be finite and >= 0",
                    self.id
                )));
            }
        }
        Ok(())
    }
}
