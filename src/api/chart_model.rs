use std::sync::Arc;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::{
    AxisRegistry, AxisType, ChartPadding, ChartScale, ContainerSize, DataPoint, Interval, Rect,
    RegisteredAxis, ScaleDomain, ScaleKind, Series, axis_strip, compute_drawing_area_with_padding,
    create_scale,
};
use crate::error::ChartResult;

use super::layout_batch::LayoutDelta;
use super::{AxisConfig, AxisDomain};

/// Core chart state owned by one [`ChartContext`](super::ChartContext).
///
/// Mutated only while a committed batch is applied; everything consumers see
/// is read from the [`PublishedLayout`] built afterwards.
#[derive(Debug, Clone)]
pub(super) struct ChartModel<L> {
    pub(super) container: Option<ContainerSize>,
    pub(super) padding: ChartPadding,
    pub(super) registry: AxisRegistry,
    pub(super) series: Vec<Series>,
    pub(super) x_axis: AxisConfig<L>,
    pub(super) y_axes: Vec<AxisConfig<L>>,
    /// Registry ids reserved through axis config `size` rather than explicit
    /// registration.
    pub(super) config_reservations: Vec<String>,
}

/// Geometry published after a commit. Immutable once built.
#[derive(Debug)]
pub(super) struct PublishedLayout<L> {
    pub(super) revision: u64,
    pub(super) container: ContainerSize,
    pub(super) drawing_area: Rect,
    pub(super) axis_strips: IndexMap<String, Rect>,
    pub(super) x_scale: Option<Arc<ChartScale<L>>>,
    pub(super) y_scales: IndexMap<String, Arc<ChartScale<L>>>,
}

impl<L: Clone + PartialEq> ChartModel<L> {
    pub(super) fn apply(&mut self, delta: LayoutDelta<L>) {
        match delta {
            LayoutDelta::RegisterAxis(axis) => self.registry.insert(axis),
            LayoutDelta::UnregisterAxis(id) => {
                self.registry.unregister(&id);
                self.config_reservations.retain(|reserved| *reserved != id);
            }
            LayoutDelta::Resize(container) => self.container = Some(container),
            LayoutDelta::Padding(padding) => self.padding = padding,
            LayoutDelta::Series(series) => self.series = series,
            LayoutDelta::XAxis(axis) => {
                self.x_axis = axis;
                self.sync_config_reservations();
            }
            LayoutDelta::YAxes(axes) => {
                self.y_axes = axes;
                self.sync_config_reservations();
            }
        }
    }

    /// Mirrors axis config sizes into the registry.
    pub(super) fn sync_config_reservations(&mut self) {
        let wanted: Vec<RegisteredAxis> = std::iter::once(&self.x_axis)
            .chain(self.y_axes.iter())
            .filter_map(|axis| {
                axis.size.map(|size| RegisteredAxis {
                    id: axis.id.clone(),
                    axis_type: axis.orientation,
                    position: axis.position,
                    size,
                })
            })
            .collect();

        for stale in &self.config_reservations {
            if !wanted.iter().any(|axis| axis.id == *stale) {
                self.registry.unregister(stale);
            }
        }
        self.config_reservations = wanted.iter().map(|axis| axis.id.clone()).collect();
        for axis in wanted {
            self.registry.insert(axis);
        }
    }

    pub(super) fn build_layout(&self, revision: u64) -> ChartResult<Option<PublishedLayout<L>>> {
        let Some(container) = self.container else {
            return Ok(None);
        };
        let drawing_area = compute_drawing_area_with_padding(
            container.width,
            container.height,
            &self.registry,
            self.padding,
        );
        let axis_strips = self
            .registry
            .axes()
            .filter_map(|axis| {
                axis_strip(&self.registry, drawing_area, &axis.id)
                    .map(|strip| (axis.id.clone(), strip))
            })
            .collect();

        let x_range = Interval::new(drawing_area.x, drawing_area.right());
        let x_series: Vec<&Series> = self.series.iter().collect();
        let x_scale = build_axis_scale(&self.x_axis, &x_series, x_range, |point| point.x)?
            .map(Arc::new);

        let y_range = Interval::new(drawing_area.bottom(), drawing_area.y);
        let mut y_scales = IndexMap::new();
        for (position, axis) in self.y_axes.iter().enumerate() {
            let bound = self.series_bound_to_y_axis(axis, position == 0);
            if let Some(scale) = build_axis_scale(axis, &bound, y_range, |point| point.y)? {
                y_scales.insert(axis.id.clone(), Arc::new(scale));
            }
        }

        Ok(Some(PublishedLayout {
            revision,
            container,
            drawing_area,
            axis_strips,
            x_scale,
            y_scales,
        }))
    }

    fn series_bound_to_y_axis(&self, axis: &AxisConfig<L>, is_default: bool) -> Vec<&Series> {
        self.series
            .iter()
            .filter(|series| match series.y_axis_id.as_deref() {
                Some(id) => id == axis.id,
                None => is_default,
            })
            .collect()
    }
}

/// Builds the scale for one axis. Auto domains with no bound data publish no
/// scale at all.
fn build_axis_scale<L: Clone + PartialEq>(
    axis: &AxisConfig<L>,
    bound: &[&Series],
    range: Interval,
    component: impl Fn(DataPoint) -> f64,
) -> ChartResult<Option<ChartScale<L>>> {
    let (domain, kind) = match &axis.domain {
        AxisDomain::Ordinal(labels) => (ScaleDomain::Labels(labels.clone()), ScaleKind::Ordinal),
        AxisDomain::Numeric { min, max } => (
            ScaleDomain::Numeric(Interval::new(*min, *max)),
            ScaleKind::Linear,
        ),
        AxisDomain::Auto => {
            let Some(domain) = auto_domain(axis.orientation, bound, &component) else {
                return Ok(None);
            };
            (ScaleDomain::Numeric(domain), ScaleKind::Linear)
        }
    };

    let scale = create_scale(domain, range, kind)?;
    Ok(Some(match scale {
        ChartScale::Linear(linear) => ChartScale::Linear(linear.with_clamp(axis.clamp)),
        ordinal => ordinal,
    }))
}

/// Extent of `component` across bound series.
///
/// On the x-axis, index-positioned series also span their full slot range
/// `[0, len - 1]` so edge gaps stay inside the plot. Y-axes without any
/// defined value fall back to a degenerate `[0, 0]` domain.
fn auto_domain(
    orientation: AxisType,
    bound: &[&Series],
    component: &impl Fn(DataPoint) -> f64,
) -> Option<Interval> {
    let longest = bound.iter().map(|series| series.len()).max()?;
    if longest == 0 {
        return None;
    }

    let values = extent(bound, component);
    match orientation {
        AxisType::X => {
            let slots = bound
                .iter()
                .filter(|series| !series.is_empty() && series.is_index_positioned())
                .map(|series| (0.0, (series.len() - 1) as f64))
                .reduce(|(min, max), (_, slot_max)| (min, f64::max(max, slot_max)));
            let (min, max) = match (values, slots) {
                (Some((min, max)), Some((slot_min, slot_max))) => {
                    (min.min(slot_min), max.max(slot_max))
                }
                (Some(range), None) | (None, Some(range)) => range,
                (None, None) => (0.0, (longest - 1) as f64),
            };
            Some(Interval::new(min, max))
        }
        AxisType::Y => {
            let (min, max) = values.unwrap_or((0.0, 0.0));
            Some(Interval::new(min, max))
        }
    }
}

fn extent(bound: &[&Series], component: &impl Fn(DataPoint) -> f64) -> Option<(f64, f64)> {
    let mut values = bound
        .iter()
        .flat_map(|series| series.defined_points())
        .map(|point| OrderedFloat(component(point)));
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    Some((min.0, max.0))
}
