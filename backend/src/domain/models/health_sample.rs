use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One physiological sample mirrored from the device health store.
///
/// The id is the upstream sample id, so re-mirroring the same sample
/// overwrites rather than duplicates, and deletions can be mirrored
/// by id. This pathway is independent of the baby/entry data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSample {
    pub id: String,
    /// Sample kind identifier, e.g. `stepCount`
    pub kind: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}
