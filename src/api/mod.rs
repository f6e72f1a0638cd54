mod axis_config;
mod chart_context;
mod chart_model;
mod context_accessors;
mod context_config;
mod context_snapshot;
mod json_contract;
mod layout_batch;
mod listener_dispatch;
mod listener_registry;

pub use axis_config::{AxisConfig, AxisDomain, DEFAULT_X_AXIS_ID, DEFAULT_Y_AXIS_ID};
pub use chart_context::ChartContext;
pub use context_config::ChartContextConfig;
pub use json_contract::{LAYOUT_SNAPSHOT_JSON_SCHEMA_V1, LayoutSnapshotJsonContractV1};
pub use layout_batch::LayoutBatch;
