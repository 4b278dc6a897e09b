use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::commands::entries::{
    AddDehydrationCheckCommand, AddDehydrationCheckResult, AddFeedEntryCommand,
    AddFeedEntryResult, AddStoolEntryCommand, AddStoolEntryResult, AddWeightEntryCommand,
    AddWeightEntryResult, AddWetDiaperEntryCommand, AddWetDiaperEntryResult, DeleteEntryCommand,
    DeleteEntryResult, WeightMeasurement,
};
use crate::domain::models::{
    DehydrationCheck, EntryRecord, FeedEntry, FeedingMethod, StoolEntry, WeightEntry,
    WetDiaperEntry,
};
use crate::storage::traits::{EntryStorage, IdentityProvider};
use crate::storage::yaml::{YamlConnection, YamlEntryRepository};

/// Service for recording and removing individual entries.
///
/// Entries are never updated in place; a correction is a delete followed
/// by a new add.
#[derive(Clone)]
pub struct EntryService {
    feed_entries: YamlEntryRepository<FeedEntry>,
    weight_entries: YamlEntryRepository<WeightEntry>,
    stool_entries: YamlEntryRepository<StoolEntry>,
    wet_diaper_entries: YamlEntryRepository<WetDiaperEntry>,
    dehydration_checks: YamlEntryRepository<DehydrationCheck>,
}

impl EntryService {
    pub fn new(connection: Arc<YamlConnection>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            feed_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            weight_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            stool_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            wet_diaper_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            dehydration_checks: YamlEntryRepository::new(connection, identity),
        }
    }

    pub async fn add_feed_entry(&self, command: AddFeedEntryCommand) -> Result<AddFeedEntryResult> {
        if let FeedingMethod::Bottle { volume_ml, .. } = command.method {
            if !volume_ml.is_finite() || volume_ml < 0.0 {
                return Err(anyhow::anyhow!("Bottle volume must be a non-negative number"));
            }
        }

        let entry = FeedEntry {
            id: None,
            timestamp: command.timestamp,
            method: command.method,
        };
        let stored = self.feed_entries.store_entry(&command.baby_id, &entry).await?;
        info!(
            "Recorded feed entry {} for baby {}",
            stored.id().unwrap_or("?"),
            command.baby_id
        );
        Ok(AddFeedEntryResult { entry: stored })
    }

    pub async fn add_weight_entry(
        &self,
        command: AddWeightEntryCommand,
    ) -> Result<AddWeightEntryResult> {
        let entry = match command.measurement {
            WeightMeasurement::Grams(grams) => WeightEntry::from_grams(command.timestamp, grams),
            WeightMeasurement::Kilograms(kilograms) => {
                if !kilograms.is_finite() || kilograms < 0.0 {
                    return Err(anyhow::anyhow!("Weight must be a non-negative number"));
                }
                WeightEntry::from_kilograms(command.timestamp, kilograms)
            }
            WeightMeasurement::PoundsOunces { pounds, ounces } => {
                if !pounds.is_finite() || pounds < 0.0 || !ounces.is_finite() || ounces < 0.0 {
                    return Err(anyhow::anyhow!("Weight must be a non-negative number"));
                }
                WeightEntry::from_pounds_ounces(command.timestamp, pounds, ounces)
            }
        };

        let stored = self
            .weight_entries
            .store_entry(&command.baby_id, &entry)
            .await?;
        info!(
            "Recorded weight entry {} ({} g) for baby {}",
            stored.id().unwrap_or("?"),
            stored.grams,
            command.baby_id
        );
        Ok(AddWeightEntryResult { entry: stored })
    }

    pub async fn add_stool_entry(
        &self,
        command: AddStoolEntryCommand,
    ) -> Result<AddStoolEntryResult> {
        let entry = StoolEntry::new(command.timestamp, command.volume, command.color);
        let stored = self
            .stool_entries
            .store_entry(&command.baby_id, &entry)
            .await?;
        info!(
            "Recorded stool entry {} for baby {}",
            stored.id().unwrap_or("?"),
            command.baby_id
        );
        Ok(AddStoolEntryResult { entry: stored })
    }

    pub async fn add_wet_diaper_entry(
        &self,
        command: AddWetDiaperEntryCommand,
    ) -> Result<AddWetDiaperEntryResult> {
        let entry = WetDiaperEntry::new(command.timestamp, command.volume, command.color);
        let stored = self
            .wet_diaper_entries
            .store_entry(&command.baby_id, &entry)
            .await?;
        info!(
            "Recorded wet-diaper entry {} for baby {}",
            stored.id().unwrap_or("?"),
            command.baby_id
        );
        Ok(AddWetDiaperEntryResult { entry: stored })
    }

    pub async fn add_dehydration_check(
        &self,
        command: AddDehydrationCheckCommand,
    ) -> Result<AddDehydrationCheckResult> {
        let entry = DehydrationCheck::new(
            command.timestamp,
            command.poor_skin_elasticity,
            command.dry_mucous_membranes,
        );
        let stored = self
            .dehydration_checks
            .store_entry(&command.baby_id, &entry)
            .await?;
        info!(
            "Recorded dehydration check {} for baby {}",
            stored.id().unwrap_or("?"),
            command.baby_id
        );
        Ok(AddDehydrationCheckResult { entry: stored })
    }

    pub async fn delete_feed_entry(&self, command: DeleteEntryCommand) -> Result<DeleteEntryResult> {
        Self::delete_entry(&self.feed_entries, command).await
    }

    pub async fn delete_weight_entry(
        &self,
        command: DeleteEntryCommand,
    ) -> Result<DeleteEntryResult> {
        Self::delete_entry(&self.weight_entries, command).await
    }

    pub async fn delete_stool_entry(
        &self,
        command: DeleteEntryCommand,
    ) -> Result<DeleteEntryResult> {
        Self::delete_entry(&self.stool_entries, command).await
    }

    pub async fn delete_wet_diaper_entry(
        &self,
        command: DeleteEntryCommand,
    ) -> Result<DeleteEntryResult> {
        Self::delete_entry(&self.wet_diaper_entries, command).await
    }

    pub async fn delete_dehydration_check(
        &self,
        command: DeleteEntryCommand,
    ) -> Result<DeleteEntryResult> {
        Self::delete_entry(&self.dehydration_checks, command).await
    }

    async fn delete_entry<E: EntryRecord>(
        repository: &YamlEntryRepository<E>,
        command: DeleteEntryCommand,
    ) -> Result<DeleteEntryResult> {
        repository
            .delete_entry(&command.baby_id, &command.entry_id)
            .await?;
        info!(
            "Deleted {} entry {} of baby {}",
            E::COLLECTION,
            command.entry_id,
            command.baby_id
        );
        Ok(DeleteEntryResult {
            success_message: format!("Entry '{}' deleted successfully", command.entry_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::babies::{AddBabiesCommand, NewBaby};
    use crate::domain::baby_service::BabyService;
    use crate::domain::models::{MilkType, StoolColor, VolumeLevel, WetDiaperColor};
    use crate::storage::traits::StaticIdentity;
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::tempdir;

    async fn setup_test(dir: &std::path::Path) -> (EntryService, BabyService, String) {
        let conn = Arc::new(YamlConnection::new(dir).unwrap());
        let identity: Arc<dyn IdentityProvider> = Arc::new(StaticIdentity::signed_in("user-1"));
        let babies = BabyService::new(conn.clone(), identity.clone());
        let entries = EntryService::new(conn, identity);

        let created = babies
            .add_babies(AddBabiesCommand {
                babies: vec![NewBaby {
                    name: "Mia".to_string(),
                    date_of_birth: Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap(),
                }],
            })
            .await
            .unwrap();
        let baby_id = created.babies[0].id.clone().unwrap();
        (entries, babies, baby_id)
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_delete_feed_entry() {
        let dir = tempdir().unwrap();
        let (entries, _, baby_id) = setup_test(dir.path()).await;

        let added = entries
            .add_feed_entry(AddFeedEntryCommand {
                baby_id: baby_id.clone(),
                timestamp: ts(8),
                method: FeedingMethod::Bottle {
                    volume_ml: 110.0,
                    milk_type: MilkType::Breastmilk,
                },
            })
            .await
            .unwrap();
        let entry_id = added.entry.id.clone().unwrap();

        entries
            .delete_feed_entry(DeleteEntryCommand {
                baby_id: baby_id.clone(),
                entry_id,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_feed_entry_rejects_negative_volume() {
        let dir = tempdir().unwrap();
        let (entries, _, baby_id) = setup_test(dir.path()).await;

        let result = entries
            .add_feed_entry(AddFeedEntryCommand {
                baby_id,
                timestamp: ts(8),
                method: FeedingMethod::Bottle {
                    volume_ml: -5.0,
                    milk_type: MilkType::Formula,
                },
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_weight_entry_normalizes_units() {
        let dir = tempdir().unwrap();
        let (entries, _, baby_id) = setup_test(dir.path()).await;

        let from_kg = entries
            .add_weight_entry(AddWeightEntryCommand {
                baby_id: baby_id.clone(),
                timestamp: ts(9),
                measurement: WeightMeasurement::Kilograms(3.2),
            })
            .await
            .unwrap();
        assert_eq!(from_kg.entry.grams, 3200);

        let from_lb = entries
            .add_weight_entry(AddWeightEntryCommand {
                baby_id,
                timestamp: ts(10),
                measurement: WeightMeasurement::PoundsOunces {
                    pounds: 7.0,
                    ounces: 4.0,
                },
            })
            .await
            .unwrap();
        assert_eq!(from_lb.entry.grams, 3289);
    }

    #[tokio::test]
    async fn test_add_weight_entry_rejects_negative() {
        let dir = tempdir().unwrap();
        let (entries, _, baby_id) = setup_test(dir.path()).await;

        let result = entries
            .add_weight_entry(AddWeightEntryCommand {
                baby_id,
                timestamp: ts(9),
                measurement: WeightMeasurement::Kilograms(-0.5),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_entries_to_unknown_baby_fails() {
        let dir = tempdir().unwrap();
        let (entries, _, _) = setup_test(dir.path()).await;

        let result = entries
            .add_stool_entry(AddStoolEntryCommand {
                baby_id: "missing".to_string(),
                timestamp: ts(8),
                volume: VolumeLevel::Medium,
                color: StoolColor::Brown,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_observation_entries_round_trip_through_detail() {
        let dir = tempdir().unwrap();
        let (entries, babies, baby_id) = setup_test(dir.path()).await;

        entries
            .add_stool_entry(AddStoolEntryCommand {
                baby_id: baby_id.clone(),
                timestamp: ts(8),
                volume: VolumeLevel::Light,
                color: StoolColor::Beige,
            })
            .await
            .unwrap();
        entries
            .add_wet_diaper_entry(AddWetDiaperEntryCommand {
                baby_id: baby_id.clone(),
                timestamp: ts(9),
                volume: VolumeLevel::Medium,
                color: WetDiaperColor::Yellow,
            })
            .await
            .unwrap();
        entries
            .add_dehydration_check(AddDehydrationCheckCommand {
                baby_id: baby_id.clone(),
                timestamp: ts(10),
                poor_skin_elasticity: false,
                dry_mucous_membranes: true,
            })
            .await
            .unwrap();

        let baby = babies
            .get_baby(crate::domain::commands::babies::GetBabyCommand {
                baby_id: baby_id.clone(),
            })
            .await
            .unwrap()
            .baby
            .unwrap();

        assert_eq!(baby.stool_entries.len(), 1);
        assert!(baby.stool_entries[0].medical_alert());
        assert_eq!(baby.wet_diaper_entries.len(), 1);
        assert!(!baby.wet_diaper_entries[0].dehydration_alert());
        assert_eq!(baby.dehydration_checks.len(), 1);
        assert!(baby.dehydration_checks[0].dehydration_alert());
        assert!(baby.has_active_alerts());
    }

    #[tokio::test]
    async fn test_delete_missing_entry_fails() {
        let dir = tempdir().unwrap();
        let (entries, _, baby_id) = setup_test(dir.path()).await;

        let result = entries
            .delete_weight_entry(DeleteEntryCommand {
                baby_id,
                entry_id: "missing".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
