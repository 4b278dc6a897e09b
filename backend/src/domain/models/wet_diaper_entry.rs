use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntryRecord, VolumeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WetDiaperColor {
    Yellow,
    Pink,
    RedTinged,
}

/// One wet-diaper observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WetDiaperEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub volume: VolumeLevel,
    pub color: WetDiaperColor,
}

impl WetDiaperEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        volume: VolumeLevel,
        color: WetDiaperColor,
    ) -> Self {
        Self {
            id: None,
            timestamp,
            volume,
            color,
        }
    }

    /// Concentrated (pink or red-tinged) urine is an early dehydration
    /// sign.
    pub fn dehydration_alert(&self) -> bool {
        matches!(self.color, WetDiaperColor::Pink | WetDiaperColor::RedTinged)
    }
}

impl EntryRecord for WetDiaperEntry {
    const COLLECTION: &'static str = "wetDiaperEntries";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
