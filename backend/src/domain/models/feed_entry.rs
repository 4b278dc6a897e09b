use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntryRecord;

/// How a feed was given.
///
/// Modeled as a sum type so that a breastfeeding entry can never carry a
/// bottle volume and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feedType", rename_all = "camelCase")]
pub enum FeedingMethod {
    #[serde(rename_all = "camelCase")]
    DirectBreastfeeding { minutes: u32 },
    #[serde(rename_all = "camelCase")]
    Bottle { volume_ml: f64, milk_type: MilkType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MilkType {
    Breastmilk,
    Formula,
}

/// One feed, either at the breast or from a bottle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub method: FeedingMethod,
}

impl FeedEntry {
    pub fn direct_breastfeeding(timestamp: DateTime<Utc>, minutes: u32) -> Self {
        Self {
            id: None,
            timestamp,
            method: FeedingMethod::DirectBreastfeeding { minutes },
        }
    }

    pub fn bottle(timestamp: DateTime<Utc>, volume_ml: f64, milk_type: MilkType) -> Self {
        Self {
            id: None,
            timestamp,
            method: FeedingMethod::Bottle {
                volume_ml,
                milk_type,
            },
        }
    }

    /// Magnitude used by the feed chart: minutes at the breast, or
    /// milliliters from the bottle.
    pub fn magnitude(&self) -> f64 {
        match self.method {
            FeedingMethod::DirectBreastfeeding { minutes } => minutes as f64,
            FeedingMethod::Bottle { volume_ml, .. } => volume_ml,
        }
    }
}

impl EntryRecord for FeedEntry {
    const COLLECTION: &'static str = "feedEntries";

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
