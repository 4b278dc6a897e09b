use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntryRecord, VolumeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoolColor {
    Black,
    DarkGreen,
    Green,
    Brown,
    Yellow,
    Beige,
}

/// One stool observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoolEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub volume: VolumeLevel,
    pub color: StoolColor,
}

impl StoolEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        volume: VolumeLevel,
        color: StoolColor,
    ) -> Self {
        Self {
            id: None,
            timestamp,
            volume,
            color,
        }
    }

    /// Beige stool can indicate a bile-flow problem and warrants a
    /// medical check.
    pub fn medical_alert(&self) -> bool {
        self.color == StoolColor::Beige
    }
}

impl EntryRecord for StoolEntry {
    const COLLECTION: &'static str = "stoolEntries";

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
