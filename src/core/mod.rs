pub mod axis_registry;
pub mod drawing_area;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod sparkline;
pub mod types;

pub use axis_registry::{AxisRegistry, RegisteredAxis};
pub use drawing_area::{axis_strip, compute_drawing_area, compute_drawing_area_with_padding};
pub use scale::{
    ChartScale, Interval, LinearScale, OrdinalScale, ScaleDomain, ScaleKind, create_scale,
};
pub use series::Series;
pub use sparkline::{AccessibleRegion, DEFAULT_REGION_COUNT, map_to_accessible_regions};
pub use types::{AxisPosition, AxisType, ChartPadding, ContainerSize, DataPoint, Rect};
