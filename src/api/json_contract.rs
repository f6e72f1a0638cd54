use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::LayoutFrame;

use super::ChartContext;

pub const LAYOUT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "L: Serialize",
    deserialize = "L: Deserialize<'de>"
))]
pub struct LayoutSnapshotJsonContractV1<L = String> {
    pub schema_version: u32,
    pub snapshot: LayoutFrame<L>,
}

impl<L: Clone + Serialize> LayoutFrame<L> {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = LayoutSnapshotJsonContractV1 {
            schema_version: LAYOUT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }
}

/// Accepted wire shapes for a stored layout frame.
#[derive(Deserialize)]
#[serde(untagged, bound(deserialize = "L: Deserialize<'de>"))]
enum LayoutSnapshotPayload<L> {
    Versioned(LayoutSnapshotJsonContractV1<L>),
    Bare(LayoutFrame<L>),
}

impl<L: DeserializeOwned> LayoutFrame<L> {
    /// Accepts both the bare frame and the versioned contract envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let payload: LayoutSnapshotPayload<L> = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        match payload {
            LayoutSnapshotPayload::Bare(frame) => Ok(frame),
            LayoutSnapshotPayload::Versioned(contract)
                if contract.schema_version == LAYOUT_SNAPSHOT_JSON_SCHEMA_V1 =>
            {
                Ok(contract.snapshot)
            }
            LayoutSnapshotPayload::Versioned(contract) => Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                contract.schema_version
            ))),
        }
    }
}

impl<L: Clone + Serialize> ChartContext<L> {
    pub fn snapshot_json_pretty(&self) -> ChartResult<Option<String>> {
        self.snapshot()?
            .map(|frame| frame.to_json_contract_v1_pretty())
            .transpose()
    }
}
