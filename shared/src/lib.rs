use serde::{Deserialize, Serialize};

/// Summary of a tracked baby as returned by list endpoints.
///
/// Sub-collections are never joined into the summary; use the detail
/// endpoint to get a fully hydrated view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabySummary {
    pub id: String,
    pub name: String,
    /// Date of birth with timezone (RFC 3339)
    pub date_of_birth: String,
}

/// Fully hydrated baby with all five entry collections and derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyDetail {
    pub id: String,
    pub name: String,
    /// Date of birth with timezone (RFC 3339)
    pub date_of_birth: String,
    /// Whole months elapsed since birth
    pub age_in_months: u32,
    /// Most recent weight in the user's preferred display unit, rounded to
    /// 2 decimal places. None when no weight has been recorded yet.
    pub current_weight: Option<f64>,
    /// True when any of the latest stool / wet-diaper / dehydration
    /// observations carries an alert.
    pub has_active_alerts: bool,
    pub feed_entries: Vec<FeedEntry>,
    pub weight_entries: Vec<WeightEntry>,
    pub stool_entries: Vec<StoolEntry>,
    pub wet_diaper_entries: Vec<WetDiaperEntry>,
    pub dehydration_checks: Vec<DehydrationCheck>,
}

/// How a feed was given. Exactly one payload shape is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feed_type", rename_all = "camelCase")]
pub enum FeedingMethod {
    DirectBreastfeeding {
        /// Duration of the feed in minutes
        minutes: u32,
    },
    Bottle {
        /// Volume given in milliliters
        volume_ml: f64,
        milk_type: MilkType,
    },
}

/// What kind of milk was in the bottle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MilkType {
    Breastmilk,
    Formula,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: String,
    /// Time of the feed (RFC 3339)
    pub timestamp: String,
    #[serde(flatten)]
    pub method: FeedingMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: String,
    /// Time of the measurement (RFC 3339)
    pub timestamp: String,
    /// Canonical weight in integer grams
    pub grams: u32,
    /// Weight in kilograms, rounded to 2 decimal places
    pub kilograms: f64,
    /// Weight in pounds, rounded to 2 decimal places
    pub pounds: f64,
}

/// Rough quantity of a stool or wet-diaper observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeLevel {
    Light,
    Medium,
    Heavy,
}

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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoolEntry {
    pub id: String,
    /// Time of the observation (RFC 3339)
    pub timestamp: String,
    pub volume: VolumeLevel,
    pub color: StoolColor,
    /// True when the color indicates a possible medical concern
    pub medical_alert: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WetDiaperColor {
    Yellow,
    Pink,
    RedTinged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WetDiaperEntry {
    pub id: String,
    /// Time of the observation (RFC 3339)
    pub timestamp: String,
    pub volume: VolumeLevel,
    pub color: WetDiaperColor,
    /// True when the color indicates possible dehydration
    pub dehydration_alert: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DehydrationCheck {
    pub id: String,
    /// Time of the check (RFC 3339)
    pub timestamp: String,
    pub poor_skin_elasticity: bool,
    pub dry_mucous_membranes: bool,
    /// True when either symptom was observed
    pub dehydration_alert: bool,
}

/// Request to register one new baby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBabyRequest {
    pub name: String,
    /// Date of birth (RFC 3339); must not be in the future
    pub date_of_birth: String,
}

/// Request to register a batch of babies. Writes are applied sequentially
/// and stop at the first failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBabiesRequest {
    pub babies: Vec<NewBabyRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBabiesResponse {
    pub babies: Vec<BabySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBabiesResponse {
    pub babies: Vec<BabySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteBabyResponse {
    pub success_message: String,
}

/// Request to record a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFeedEntryRequest {
    /// Optional timestamp override (RFC 3339) - uses current time if not provided
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub method: FeedingMethod,
}

/// One weight measurement in whichever unit it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "camelCase")]
pub enum WeightMeasurement {
    Grams { grams: u32 },
    Kilograms { kilograms: f64 },
    PoundsOunces { pounds: f64, ounces: f64 },
}

/// Request to record a weight measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWeightEntryRequest {
    /// Optional timestamp override (RFC 3339) - uses current time if not provided
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub measurement: WeightMeasurement,
}

/// Request to record a stool observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStoolEntryRequest {
    /// Optional timestamp override (RFC 3339) - uses current time if not provided
    pub timestamp: Option<String>,
    pub volume: VolumeLevel,
    pub color: StoolColor,
}

/// Request to record a wet-diaper observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWetDiaperEntryRequest {
    /// Optional timestamp override (RFC 3339) - uses current time if not provided
    pub timestamp: Option<String>,
    pub volume: VolumeLevel,
    pub color: WetDiaperColor,
}

/// Request to record a dehydration check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDehydrationCheckRequest {
    /// Optional timestamp override (RFC 3339) - uses current time if not provided
    pub timestamp: Option<String>,
    pub poor_skin_elasticity: bool,
    pub dry_mucous_membranes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    pub success_message: String,
}

/// Display unit preference for weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightUnit {
    Kilograms,
    PoundsOunces,
}

/// User preferences persisted across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Baby shown on startup, if one was selected before
    pub selected_baby_id: Option<String>,
    pub weight_unit: WeightUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub selected_baby_id: Option<String>,
    pub weight_unit: Option<WeightUnit>,
}

/// One physiological sample mirrored from the device health store.
/// Mirroring is keyed by the upstream sample id and best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorHealthSampleRequest {
    pub id: String,
    /// Sample kind identifier, e.g. `stepCount`
    pub kind: String,
    pub value: f64,
    /// Sample time (RFC 3339)
    pub timestamp: String,
}

/// Relative bubble size used by the scatter charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BubbleSize {
    Small,
    Medium,
    Large,
}

/// Chart rendering variant; mini charts shrink every bubble proportionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartVariant {
    Full,
    Mini,
}

/// One plotted entry in a per-day scatter chart.
///
/// `daily_index` is 1-based and counts entries within the same calendar
/// day, so the chart can stack same-day observations vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntryPoint {
    pub entry_id: String,
    /// Local calendar day (ISO 8601 date)
    pub day: String,
    pub daily_index: u32,
    pub bubble: BubbleSize,
    /// True when the underlying entry carries an alert
    pub alert: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryChartResponse {
    /// Chart x-axis domain, oldest day first
    pub window: Vec<String>,
    pub points: Vec<DailyEntryPoint>,
}

/// One day's averaged weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightAveragePoint {
    /// Local calendar day (ISO 8601 date)
    pub day: String,
    /// Arithmetic mean of the day's measurements in the requested unit
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightChartResponse {
    pub window: Vec<String>,
    pub unit: WeightUnit,
    pub points: Vec<WeightAveragePoint>,
}

/// State of one cell in the dehydration-alert grid. "No data" and
/// "data, no alert" are deliberately distinct states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DehydrationDayState {
    NoData,
    Ok,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DehydrationDayCell {
    /// Local calendar day (ISO 8601 date)
    pub day: String,
    pub state: DehydrationDayState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DehydrationGridResponse {
    pub days: Vec<DehydrationDayCell>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_entry_serializes_with_tagged_method() {
        let entry = FeedEntry {
            id: "feed-1".to_string(),
            timestamp: "2026-08-01T08:30:00Z".to_string(),
            method: FeedingMethod::Bottle {
                volume_ml: 120.0,
                milk_type: MilkType::Formula,
            },
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"feed_type\":\"bottle\""));
        assert!(json.contains("\"milk_type\":\"formula\""));

        let parsed: FeedEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn feed_entry_breastfeeding_has_no_bottle_fields() {
        let entry = FeedEntry {
            id: "feed-2".to_string(),
            timestamp: "2026-08-01T09:00:00Z".to_string(),
            method: FeedingMethod::DirectBreastfeeding { minutes: 15 },
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"feed_type\":\"directBreastfeeding\""));
        assert!(!json.contains("volume_ml"));
        assert!(!json.contains("milk_type"));
    }

    #[test]
    fn weight_measurement_round_trips_all_units() {
        let measurements = vec![
            WeightMeasurement::Grams { grams: 3200 },
            WeightMeasurement::Kilograms { kilograms: 3.2 },
            WeightMeasurement::PoundsOunces {
                pounds: 7.0,
                ounces: 4.0,
            },
        ];

        for m in measurements {
            let json = serde_json::to_string(&m).unwrap();
            let parsed: WeightMeasurement = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, m);
        }
    }

    #[test]
    fn enum_raw_values_are_camel_case() {
        assert_eq!(
            serde_json::to_string(&StoolColor::DarkGreen).unwrap(),
            "\"darkGreen\""
        );
        assert_eq!(
            serde_json::to_string(&WetDiaperColor::RedTinged).unwrap(),
            "\"redTinged\""
        );
        assert_eq!(
            serde_json::to_string(&WeightUnit::PoundsOunces).unwrap(),
            "\"poundsOunces\""
        );
    }
}
