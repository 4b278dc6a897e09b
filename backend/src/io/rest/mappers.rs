//! Mapping between the public DTOs in `shared` and the internal domain
//! types.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::domain::commands::entries;
use crate::domain::models;
use crate::domain::units;

pub fn parse_timestamp(value: Option<String>) -> Result<DateTime<Utc>> {
    match value {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid timestamp: {}", raw)),
    }
}

pub fn parse_date_of_birth(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid date of birth: {}", raw))
}

pub fn summary_to_dto(summary: models::BabySummary) -> shared::BabySummary {
    shared::BabySummary {
        id: summary.id.unwrap_or_default(),
        name: summary.name,
        date_of_birth: summary.date_of_birth.to_rfc3339(),
    }
}

pub fn baby_to_detail(baby: models::Baby, unit: models::WeightUnit) -> shared::BabyDetail {
    let current_weight = baby.current_weight().map(|entry| {
        let value = match unit {
            models::WeightUnit::Kilograms => entry.kilograms(),
            models::WeightUnit::PoundsOunces => entry.pounds(),
        };
        units::round_for_display(value)
    });

    shared::BabyDetail {
        id: baby.id.clone().unwrap_or_default(),
        name: baby.name.clone(),
        date_of_birth: baby.date_of_birth.to_rfc3339(),
        age_in_months: baby.age_in_months(Utc::now()),
        current_weight,
        has_active_alerts: baby.has_active_alerts(),
        feed_entries: baby.feed_entries.into_iter().map(feed_entry_to_dto).collect(),
        weight_entries: baby
            .weight_entries
            .into_iter()
            .map(weight_entry_to_dto)
            .collect(),
        stool_entries: baby
            .stool_entries
            .into_iter()
            .map(stool_entry_to_dto)
            .collect(),
        wet_diaper_entries: baby
            .wet_diaper_entries
            .into_iter()
            .map(wet_diaper_entry_to_dto)
            .collect(),
        dehydration_checks: baby
            .dehydration_checks
            .into_iter()
            .map(dehydration_check_to_dto)
            .collect(),
    }
}

pub fn feed_entry_to_dto(entry: models::FeedEntry) -> shared::FeedEntry {
    shared::FeedEntry {
        id: entry.id.unwrap_or_default(),
        timestamp: entry.timestamp.to_rfc3339(),
        method: feeding_method_to_dto(entry.method),
    }
}

pub fn weight_entry_to_dto(entry: models::WeightEntry) -> shared::WeightEntry {
    shared::WeightEntry {
        id: entry.id.clone().unwrap_or_default(),
        timestamp: entry.timestamp.to_rfc3339(),
        grams: entry.grams,
        kilograms: units::round_for_display(entry.kilograms()),
        pounds: units::round_for_display(entry.pounds()),
    }
}

pub fn stool_entry_to_dto(entry: models::StoolEntry) -> shared::StoolEntry {
    shared::StoolEntry {
        id: entry.id.clone().unwrap_or_default(),
        timestamp: entry.timestamp.to_rfc3339(),
        medical_alert: entry.medical_alert(),
        volume: volume_to_dto(entry.volume),
        color: stool_color_to_dto(entry.color),
    }
}

pub fn wet_diaper_entry_to_dto(entry: models::WetDiaperEntry) -> shared::WetDiaperEntry {
    shared::WetDiaperEntry {
        id: entry.id.clone().unwrap_or_default(),
        timestamp: entry.timestamp.to_rfc3339(),
        dehydration_alert: entry.dehydration_alert(),
        volume: volume_to_dto(entry.volume),
        color: wet_diaper_color_to_dto(entry.color),
    }
}

pub fn dehydration_check_to_dto(check: models::DehydrationCheck) -> shared::DehydrationCheck {
    shared::DehydrationCheck {
        id: check.id.clone().unwrap_or_default(),
        timestamp: check.timestamp.to_rfc3339(),
        dehydration_alert: check.dehydration_alert(),
        poor_skin_elasticity: check.poor_skin_elasticity,
        dry_mucous_membranes: check.dry_mucous_membranes,
    }
}

pub fn feeding_method_to_dto(method: models::FeedingMethod) -> shared::FeedingMethod {
    match method {
        models::FeedingMethod::DirectBreastfeeding { minutes } => {
            shared::FeedingMethod::DirectBreastfeeding { minutes }
        }
        models::FeedingMethod::Bottle {
            volume_ml,
            milk_type,
        } => shared::FeedingMethod::Bottle {
            volume_ml,
            milk_type: match milk_type {
                models::MilkType::Breastmilk => shared::MilkType::Breastmilk,
                models::MilkType::Formula => shared::MilkType::Formula,
            },
        },
    }
}

pub fn feeding_method_from_dto(method: shared::FeedingMethod) -> models::FeedingMethod {
    match method {
        shared::FeedingMethod::DirectBreastfeeding { minutes } => {
            models::FeedingMethod::DirectBreastfeeding { minutes }
        }
        shared::FeedingMethod::Bottle {
            volume_ml,
            milk_type,
        } => models::FeedingMethod::Bottle {
            volume_ml,
            milk_type: match milk_type {
                shared::MilkType::Breastmilk => models::MilkType::Breastmilk,
                shared::MilkType::Formula => models::MilkType::Formula,
            },
        },
    }
}

pub fn measurement_from_dto(measurement: shared::WeightMeasurement) -> entries::WeightMeasurement {
    match measurement {
        shared::WeightMeasurement::Grams { grams } => entries::WeightMeasurement::Grams(grams),
        shared::WeightMeasurement::Kilograms { kilograms } => {
            entries::WeightMeasurement::Kilograms(kilograms)
        }
        shared::WeightMeasurement::PoundsOunces { pounds, ounces } => {
            entries::WeightMeasurement::PoundsOunces { pounds, ounces }
        }
    }
}

pub fn volume_from_dto(volume: shared::VolumeLevel) -> models::VolumeLevel {
    match volume {
        shared::VolumeLevel::Light => models::VolumeLevel::Light,
        shared::VolumeLevel::Medium => models::VolumeLevel::Medium,
        shared::VolumeLevel::Heavy => models::VolumeLevel::Heavy,
    }
}

pub fn volume_to_dto(volume: models::VolumeLevel) -> shared::VolumeLevel {
    match volume {
        models::VolumeLevel::Light => shared::VolumeLevel::Light,
        models::VolumeLevel::Medium => shared::VolumeLevel::Medium,
        models::VolumeLevel::Heavy => shared::VolumeLevel::Heavy,
    }
}

pub fn stool_color_from_dto(color: shared::StoolColor) -> models::StoolColor {
    match color {
        shared::StoolColor::Black => models::StoolColor::Black,
        shared::StoolColor::DarkGreen => models::StoolColor::DarkGreen,
        shared::StoolColor::Green => models::StoolColor::Green,
        shared::StoolColor::Brown => models::StoolColor::Brown,
        shared::StoolColor::Yellow => models::StoolColor::Yellow,
        shared::StoolColor::Beige => models::StoolColor::Beige,
    }
}

pub fn stool_color_to_dto(color: models::StoolColor) -> shared::StoolColor {
    match color {
        models::StoolColor::Black => shared::StoolColor::Black,
        models::StoolColor::DarkGreen => shared::StoolColor::DarkGreen,
        models::StoolColor::Green => shared::StoolColor::Green,
        models::StoolColor::Brown => shared::StoolColor::Brown,
        models::StoolColor::Yellow => shared::StoolColor::Yellow,
        models::StoolColor::Beige => shared::StoolColor::Beige,
    }
}

pub fn wet_diaper_color_from_dto(color: shared::WetDiaperColor) -> models::WetDiaperColor {
    match color {
        shared::WetDiaperColor::Yellow => models::WetDiaperColor::Yellow,
        shared::WetDiaperColor::Pink => models::WetDiaperColor::Pink,
        shared::WetDiaperColor::RedTinged => models::WetDiaperColor::RedTinged,
    }
}

pub fn wet_diaper_color_to_dto(color: models::WetDiaperColor) -> shared::WetDiaperColor {
    match color {
        models::WetDiaperColor::Yellow => shared::WetDiaperColor::Yellow,
        models::WetDiaperColor::Pink => shared::WetDiaperColor::Pink,
        models::WetDiaperColor::RedTinged => shared::WetDiaperColor::RedTinged,
    }
}

pub fn weight_unit_from_dto(unit: shared::WeightUnit) -> models::WeightUnit {
    match unit {
        shared::WeightUnit::Kilograms => models::WeightUnit::Kilograms,
        shared::WeightUnit::PoundsOunces => models::WeightUnit::PoundsOunces,
    }
}

pub fn settings_to_dto(settings: models::UserSettings) -> shared::SettingsResponse {
    shared::SettingsResponse {
        selected_baby_id: settings.selected_baby_id,
        weight_unit: match settings.weight_unit {
            models::WeightUnit::Kilograms => shared::WeightUnit::Kilograms,
            models::WeightUnit::PoundsOunces => shared::WeightUnit::PoundsOunces,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        let parsed = parse_timestamp(Some("2026-08-01T08:30:00+02:00".to_string())).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 1, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp(Some("yesterday".to_string())).is_err());
    }

    #[test]
    fn test_weight_entry_dto_rounds_for_display() {
        let entry = models::WeightEntry::from_pounds_ounces(
            Utc.with_ymd_and_hms(2026, 8, 1, 8, 0, 0).unwrap(),
            7.0,
            4.0,
        );
        let dto = weight_entry_to_dto(entry);

        assert_eq!(dto.grams, 3289);
        assert_eq!(dto.kilograms, 3.29);
        assert_eq!(dto.pounds, 7.25);
    }

    #[test]
    fn test_baby_detail_prefers_display_unit() {
        let mut baby = models::Baby::new(
            "Mia",
            Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap(),
        );
        baby.id = Some("baby-1".to_string());
        baby.weight_entries.push(models::WeightEntry::from_grams(
            Utc.with_ymd_and_hms(2026, 8, 1, 8, 0, 0).unwrap(),
            3200,
        ));

        let detail = baby_to_detail(baby.clone(), models::WeightUnit::Kilograms);
        assert_eq!(detail.current_weight, Some(3.2));

        let detail = baby_to_detail(baby, models::WeightUnit::PoundsOunces);
        assert_eq!(detail.current_weight, Some(7.05));
    }
}
