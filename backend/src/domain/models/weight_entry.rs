use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntryRecord;
use crate::domain::units;

/// One weight measurement.
///
/// The canonical value is integer grams; kilogram and pound readings are
/// derived on demand and only rounded when displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub grams: u32,
}

impl WeightEntry {
    pub fn from_grams(timestamp: DateTime<Utc>, grams: u32) -> Self {
        Self {
            id: None,
            timestamp,
            grams,
        }
    }

    pub fn from_kilograms(timestamp: DateTime<Utc>, kilograms: f64) -> Self {
        Self::from_grams(timestamp, units::kilograms_to_grams(kilograms))
    }

    pub fn from_pounds_ounces(timestamp: DateTime<Utc>, pounds: f64, ounces: f64) -> Self {
        Self::from_grams(timestamp, units::pounds_ounces_to_grams(pounds, ounces))
    }

    pub fn kilograms(&self) -> f64 {
        units::grams_to_kilograms(self.grams)
    }

    pub fn pounds(&self) -> f64 {
        units::grams_to_pounds(self.grams)
    }
}

impl EntryRecord for WeightEntry {
    const COLLECTION: &'static str = "weightEntries";

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
