use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::error::{ChartError, ChartResult};

/// Closed numeric interval. `min` and `max` may be in either order for pixel
/// ranges (y ranges are usually inverted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        self.min + self.span() * 0.5
    }

    fn validate(self, field_name: &str) -> ChartResult<Self> {
        ensure_finite(self.min, field_name)?;
        ensure_finite(self.max, field_name)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Ordinal,
}

/// Linear domain→pixel mapping with its algebraic inverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Interval,
    range: Interval,
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: Interval, range: Interval) -> ChartResult<Self> {
        Ok(Self {
            domain: domain.validate("scale domain")?,
            range: range.validate("scale pixel range")?,
            clamp: false,
        })
    }

    /// Enables clamping of `forward` output to the pixel range and `inverse`
    /// output to the domain.
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    #[must_use]
    pub fn domain(self) -> Interval {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> Interval {
        self.range
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.clamp
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain.span() == 0.0
    }

    #[must_use]
    pub fn forward(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.range.midpoint();
        }
        let normalized = (value - self.domain.min) / self.domain.span();
        let pixel = self.range.min + normalized * self.range.span();
        if self.clamp {
            clamp_between(pixel, self.range)
        } else {
            pixel
        }
    }

    #[must_use]
    pub fn inverse(self, pixel: f64) -> f64 {
        let range_span = self.range.span();
        if self.is_degenerate() || range_span == 0.0 {
            return self.domain.min;
        }
        let normalized = (pixel - self.range.min) / range_span;
        let value = self.domain.min + normalized * self.domain.span();
        if self.clamp {
            clamp_between(value, self.domain)
        } else {
            value
        }
    }
}

/// Maps a finite label set to evenly spaced band centers.
///
/// The engine treats labels opaquely; it only compares them for equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale<L> {
    labels: Vec<L>,
    range: Interval,
}

impl<L: Clone + PartialEq> OrdinalScale<L> {
    pub fn new(labels: Vec<L>, range: Interval) -> ChartResult<Self> {
        Ok(Self {
            labels,
            range: range.validate("scale pixel range")?,
        })
    }

    #[must_use]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    #[must_use]
    pub fn range(&self) -> Interval {
        self.range
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pixel distance between two neighbouring band centers (signed).
    #[must_use]
    pub fn step(&self) -> f64 {
        if self.labels.is_empty() {
            0.0
        } else {
            self.range.span() / self.labels.len() as f64
        }
    }

    /// Band center for a (possibly fractional) label index.
    #[must_use]
    pub fn forward_index(&self, index: f64) -> f64 {
        if self.labels.is_empty() {
            return self.range.midpoint();
        }
        self.range.min + self.step() * (index + 0.5)
    }

    #[must_use]
    pub fn forward_label(&self, label: &L) -> Option<f64> {
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .map(|index| self.forward_index(index as f64))
    }

    /// Nearest label index by pixel distance; ties go to the lower index.
    #[must_use]
    pub fn inverse_index(&self, pixel: f64) -> Option<usize> {
        let last = self.labels.len().checked_sub(1)?;
        let step = self.step();
        if step == 0.0 {
            return Some(0);
        }
        // Band centers sit at integer positions of `(pixel - min) / step - 0.5`;
        // rounding half-down keeps ties on the lower index.
        let position = (pixel - self.range.min) / step - 0.5;
        let lower = position.floor();
        let index = if position - lower > 0.5 { lower + 1.0 } else { lower };
        Some(index.clamp(0.0, last as f64) as usize)
    }

    #[must_use]
    pub fn inverse_label(&self, pixel: f64) -> Option<&L> {
        self.inverse_index(pixel)
            .and_then(|index| self.labels.get(index))
    }
}

/// Scale published by the chart context for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartScale<L> {
    Linear(LinearScale),
    Ordinal(OrdinalScale<L>),
}

impl<L: Clone + PartialEq> ChartScale<L> {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Ordinal(_) => ScaleKind::Ordinal,
        }
    }

    #[must_use]
    pub fn range(&self) -> Interval {
        match self {
            Self::Linear(scale) => scale.range(),
            Self::Ordinal(scale) => scale.range(),
        }
    }

    /// Domain value to pixel. Ordinal scales read the value as a label index.
    #[must_use]
    pub fn forward(&self, value: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.forward(value),
            Self::Ordinal(scale) => scale.forward_index(value),
        }
    }

    /// Pixel to domain value. Ordinal scales return the nearest label index.
    #[must_use]
    pub fn inverse(&self, pixel: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.inverse(pixel),
            Self::Ordinal(scale) => scale
                .inverse_index(pixel)
                .map_or(0.0, |index| index as f64),
        }
    }

    #[must_use]
    pub fn as_linear(&self) -> Option<LinearScale> {
        match self {
            Self::Linear(scale) => Some(*scale),
            Self::Ordinal(_) => None,
        }
    }

    #[must_use]
    pub fn as_ordinal(&self) -> Option<&OrdinalScale<L>> {
        match self {
            Self::Linear(_) => None,
            Self::Ordinal(scale) => Some(scale),
        }
    }
}

/// Domain fed into [`create_scale`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleDomain<L> {
    Numeric(Interval),
    Labels(Vec<L>),
}

/// Builds a fresh scale for `domain` over `pixel_range`.
///
/// Numeric domains only build linear scales and label domains only build
/// ordinal ones.
pub fn create_scale<L: Clone + PartialEq>(
    domain: ScaleDomain<L>,
    pixel_range: Interval,
    kind: ScaleKind,
) -> ChartResult<ChartScale<L>> {
    match (domain, kind) {
        (ScaleDomain::Numeric(domain), ScaleKind::Linear) => {
            LinearScale::new(domain, pixel_range).map(ChartScale::Linear)
        }
        (ScaleDomain::Labels(labels), ScaleKind::Ordinal) => {
            OrdinalScale::new(labels, pixel_range).map(ChartScale::Ordinal)
        }
        (ScaleDomain::Labels(_), ScaleKind::Linear) => Err(ChartError::InvalidData(
            "label domains require an ordinal scale".to_owned(),
        )),
        (ScaleDomain::Numeric(_), ScaleKind::Ordinal) => Err(ChartError::InvalidData(
            "ordinal scales require a label domain".to_owned(),
        )),
    }
}

fn clamp_between(value: f64, bounds: Interval) -> f64 {
    let (low, high) = if bounds.min <= bounds.max {
        (bounds.min, bounds.max)
    } else {
        (bounds.max, bounds.min)
    };
    value.clamp(low, high)
}

#[cfg(test)]
mod tests {
    use super::{Interval, OrdinalScale};

    #[test]
    fn ordinal_inverse_rounds_half_down() {
        let scale = OrdinalScale::new(vec!["a", "b", "c", "d"], Interval::new(0.0, 400.0))
            .expect("valid scale");
        // centers: 50, 150, 250, 350; midpoint between a and b is 100
        assert_eq!(scale.inverse_index(100.0), Some(0));
        assert_eq!(scale.inverse_index(100.5), Some(1));
        assert_eq!(scale.inverse_index(-80.0), Some(0));
        assert_eq!(scale.inverse_index(9_999.0), Some(3));
    }

    #[test]
    fn ordinal_inverse_handles_inverted_range() {
        let scale =
            OrdinalScale::new(vec![1, 2], Interval::new(200.0, 0.0)).expect("valid scale");
        // centers: 150 (index 0), 50 (index 1)
        assert_eq!(scale.inverse_index(160.0), Some(0));
        assert_eq!(scale.inverse_index(40.0), Some(1));
        assert_eq!(scale.inverse_index(100.0), Some(0));
    }
}
