use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

/// One data series as supplied by the caller.
///
/// `None` entries in `data` are gaps: they keep their index slot (so the
/// scrubber and sparkline regions stay aligned) but carry no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub data: Vec<Option<DataPoint>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub x_axis_id: Option<String>,
    #[serde(default)]
    pub y_axis_id: Option<String>,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Vec<Option<DataPoint>>) -> Self {
        Self {
            id: id.into(),
            data,
            color: None,
            x_axis_id: None,
            y_axis_id: None,
        }
    }

    /// Builds an index-positioned series where `x` is the sample index.
    #[must_use]
    pub fn from_values(id: impl Into<String>, values: &[Option<f64>]) -> Self {
        let data = values
            .iter()
            .enumerate()
            .map(|(index, value)| value.map(|y| DataPoint::new(index as f64, y)))
            .collect();
        Self::new(id, data)
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis_id: impl Into<String>) -> Self {
        self.x_axis_id = Some(axis_id.into());
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis_id: impl Into<String>) -> Self {
        self.y_axis_id = Some(axis_id.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn defined_points(&self) -> impl Iterator<Item = DataPoint> + '_ {
        self.data.iter().flatten().copied()
    }

    /// Whether every defined point sits at its slot index, as produced by
    /// [`Series::from_values`].
    #[must_use]
    pub fn is_index_positioned(&self) -> bool {
        self.data
            .iter()
            .enumerate()
            .all(|(index, point)| point.as_ref().is_none_or(|point| point.x == index as f64))
    }

    /// Index of the defined point nearest to `domain_x`.
    ///
    /// Ties resolve toward the lower index. Gap slots never win while a
    /// defined point exists; a series with no defined points is treated as
    /// index-positioned.
    #[must_use]
    pub fn nearest_index(&self, domain_x: f64) -> Option<usize> {
        let last = self.data.len().checked_sub(1)?;
        let nearest = self
            .data
            .iter()
            .enumerate()
            .filter_map(|(index, point)| point.map(|point| (index, (point.x - domain_x).abs())))
            .fold(None, |best: Option<(usize, f64)>, candidate| match best {
                Some(best) if best.1 <= candidate.1 => Some(best),
                _ => Some(candidate),
            });

        match nearest {
            Some((index, _)) => Some(index),
            None => {
                let rounded = domain_x.round().max(0.0);
                Some((rounded as usize).min(last))
            }
        }
    }
}
