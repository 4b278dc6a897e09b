//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are
//! **not** exposed over the public API; the REST layer maps the DTOs in
//! the `shared` crate to these internal types.

pub mod babies {
    use chrono::{DateTime, Utc};

    use crate::domain::models::{Baby, BabySummary};

    /// Input for registering one baby.
    #[derive(Debug, Clone)]
    pub struct NewBaby {
        pub name: String,
        pub date_of_birth: DateTime<Utc>,
    }

    /// Batch registration; writes apply sequentially and stop at the
    /// first failure, so earlier babies may already be persisted.
    #[derive(Debug, Clone)]
    pub struct AddBabiesCommand {
        pub babies: Vec<NewBaby>,
    }

    #[derive(Debug, Clone)]
    pub struct AddBabiesResult {
        pub babies: Vec<BabySummary>,
    }

    #[derive(Debug, Clone)]
    pub struct ListBabiesResult {
        pub babies: Vec<BabySummary>,
    }

    #[derive(Debug, Clone)]
    pub struct GetBabyCommand {
        pub baby_id: String,
    }

    /// Detail read: the baby plus all five hydrated sub-collections.
    #[derive(Debug, Clone)]
    pub struct GetBabyResult {
        pub baby: Option<Baby>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteBabyCommand {
        pub baby_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteBabyResult {
        pub success_message: String,
    }
}

pub mod entries {
    use chrono::{DateTime, Utc};

    use crate::domain::models::{
        DehydrationCheck, FeedEntry, FeedingMethod, StoolColor, StoolEntry, VolumeLevel,
        WeightEntry, WetDiaperColor, WetDiaperEntry,
    };

    #[derive(Debug, Clone)]
    pub struct AddFeedEntryCommand {
        pub baby_id: String,
        pub timestamp: DateTime<Utc>,
        pub method: FeedingMethod,
    }

    #[derive(Debug, Clone)]
    pub struct AddFeedEntryResult {
        pub entry: FeedEntry,
    }

    /// A weight reading in whichever unit it was taken; normalized to
    /// grams at construction.
    #[derive(Debug, Clone)]
    pub enum WeightMeasurement {
        Grams(u32),
        Kilograms(f64),
        PoundsOunces { pounds: f64, ounces: f64 },
    }

    #[derive(Debug, Clone)]
    pub struct AddWeightEntryCommand {
        pub baby_id: String,
        pub timestamp: DateTime<Utc>,
        pub measurement: WeightMeasurement,
    }

    #[derive(Debug, Clone)]
    pub struct AddWeightEntryResult {
        pub entry: WeightEntry,
    }

    #[derive(Debug, Clone)]
    pub struct AddStoolEntryCommand {
        pub baby_id: String,
        pub timestamp: DateTime<Utc>,
        pub volume: VolumeLevel,
        pub color: StoolColor,
    }

    #[derive(Debug, Clone)]
    pub struct AddStoolEntryResult {
        pub entry: StoolEntry,
    }

    #[derive(Debug, Clone)]
    pub struct AddWetDiaperEntryCommand {
        pub baby_id: String,
        pub timestamp: DateTime<Utc>,
        pub volume: VolumeLevel,
        pub color: WetDiaperColor,
    }

    #[derive(Debug, Clone)]
    pub struct AddWetDiaperEntryResult {
        pub entry: WetDiaperEntry,
    }

    #[derive(Debug, Clone)]
    pub struct AddDehydrationCheckCommand {
        pub baby_id: String,
        pub timestamp: DateTime<Utc>,
        pub poor_skin_elasticity: bool,
        pub dry_mucous_membranes: bool,
    }

    #[derive(Debug, Clone)]
    pub struct AddDehydrationCheckResult {
        pub entry: DehydrationCheck,
    }

    /// Entries are addressed by their (baby, entry) id pair.
    #[derive(Debug, Clone)]
    pub struct DeleteEntryCommand {
        pub baby_id: String,
        pub entry_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteEntryResult {
        pub success_message: String,
    }
}

pub mod settings {
    use crate::domain::models::{UserSettings, WeightUnit};

    /// Partial update; `None` fields stay unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSettingsCommand {
        pub selected_baby_id: Option<String>,
        pub weight_unit: Option<WeightUnit>,
    }

    #[derive(Debug, Clone)]
    pub struct SettingsResult {
        pub settings: UserSettings,
    }
}
