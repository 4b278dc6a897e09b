//! Domain models for the baby tracker.
//!
//! Entry documents serialize with camelCase keys and camelCase enum raw
//! values, mirroring the document-store wire format.

pub mod baby;
pub mod dehydration_check;
pub mod feed_entry;
pub mod health_sample;
pub mod settings;
pub mod stool_entry;
pub mod weight_entry;
pub mod wet_diaper_entry;

pub use baby::{Baby, BabySummary};
pub use dehydration_check::DehydrationCheck;
pub use feed_entry::{FeedEntry, FeedingMethod, MilkType};
pub use health_sample::HealthSample;
pub use settings::{UserSettings, WeightUnit};
pub use stool_entry::{StoolColor, StoolEntry};
pub use weight_entry::WeightEntry;
pub use wet_diaper_entry::{WetDiaperColor, WetDiaperEntry};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Rough quantity of a stool or wet-diaper observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeLevel {
    Light,
    Medium,
    Heavy,
}

/// Common shape of the five entry kinds, letting one storage repository
/// handle any of them.
///
/// Identity is assigned by the store on first persistence and never
/// changes afterwards; entries are corrected by delete + re-add, never
/// mutated in place.
pub trait EntryRecord:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Sub-collection name under the baby document, e.g. `feedEntries`.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    fn timestamp(&self) -> DateTime<Utc>;
}
