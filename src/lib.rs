//! chart-geometry: layout and interaction core for interactive charts.
//!
//! The crate owns the geometry behind a chart view: axis space reservation,
//! the plot rectangle, domain/pixel scales, scrubbing over series data,
//! animated counters and sparkline accessibility regions. Drawing itself is
//! left to a [`render::Renderer`] implementation supplied by the host.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartContext, ChartContextConfig};
pub use error::{ChartError, ChartResult};
