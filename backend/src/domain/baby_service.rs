use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::babies::{
    AddBabiesCommand, AddBabiesResult, DeleteBabyCommand, DeleteBabyResult, GetBabyCommand,
    GetBabyResult, ListBabiesResult, NewBaby,
};
use crate::domain::models::{
    Baby, BabySummary, DehydrationCheck, EntryRecord, FeedEntry, StoolEntry, WeightEntry,
    WetDiaperEntry,
};
use crate::storage::traits::{BabyStorage, EntryStorage, IdentityProvider};
use crate::storage::yaml::{YamlBabyRepository, YamlConnection, YamlEntryRepository};
use crate::storage::StoreError;

/// Service for managing babies and their owned entry collections.
#[derive(Clone)]
pub struct BabyService {
    babies: YamlBabyRepository,
    feed_entries: YamlEntryRepository<FeedEntry>,
    weight_entries: YamlEntryRepository<WeightEntry>,
    stool_entries: YamlEntryRepository<StoolEntry>,
    wet_diaper_entries: YamlEntryRepository<WetDiaperEntry>,
    dehydration_checks: YamlEntryRepository<DehydrationCheck>,
}

impl BabyService {
    pub fn new(connection: Arc<YamlConnection>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            babies: YamlBabyRepository::new(connection.clone(), identity.clone()),
            feed_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            weight_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            stool_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            wet_diaper_entries: YamlEntryRepository::new(connection.clone(), identity.clone()),
            dehydration_checks: YamlEntryRepository::new(connection, identity),
        }
    }

    /// Persist a batch of babies sequentially, stopping at the first
    /// failure. Babies stored before the failure stay persisted.
    pub async fn add_babies(&self, command: AddBabiesCommand) -> Result<AddBabiesResult> {
        info!("Adding {} babies", command.babies.len());

        let mut stored = Vec::with_capacity(command.babies.len());
        for new_baby in command.babies {
            self.validate_new_baby(&new_baby)?;

            let summary = BabySummary::new(new_baby.name.trim(), new_baby.date_of_birth);
            let persisted = self.babies.store_baby(&summary).await?;
            info!(
                "Created baby: {} with ID: {}",
                persisted.name,
                persisted.id.as_deref().unwrap_or("?")
            );
            stored.push(persisted);
        }

        Ok(AddBabiesResult { babies: stored })
    }

    /// List all babies as summaries; sub-collections are not joined.
    pub async fn list_babies(&self) -> Result<ListBabiesResult> {
        let babies = self.babies.list_babies().await?;
        info!("Found {} babies", babies.len());
        Ok(ListBabiesResult { babies })
    }

    /// Fetch one baby with all five sub-collections hydrated.
    ///
    /// A failed sub-collection fetch is downgraded to an empty collection
    /// rather than failing the whole read, so a partially unreadable baby
    /// can hide entries from the caller.
    pub async fn get_baby(&self, command: GetBabyCommand) -> Result<GetBabyResult> {
        info!("Getting baby: {}", command.baby_id);

        let summary = match self.babies.get_baby(&command.baby_id).await? {
            Some(summary) => summary,
            None => {
                warn!("Baby not found: {}", command.baby_id);
                return Ok(GetBabyResult { baby: None });
            }
        };

        let mut baby = Baby::from_summary(summary);
        baby.feed_entries = self.lenient_entries(&self.feed_entries, &command.baby_id).await;
        baby.weight_entries = self
            .lenient_entries(&self.weight_entries, &command.baby_id)
            .await;
        baby.stool_entries = self
            .lenient_entries(&self.stool_entries, &command.baby_id)
            .await;
        baby.wet_diaper_entries = self
            .lenient_entries(&self.wet_diaper_entries, &command.baby_id)
            .await;
        baby.dehydration_checks = self
            .lenient_entries(&self.dehydration_checks, &command.baby_id)
            .await;

        Ok(GetBabyResult { baby: Some(baby) })
    }

    /// Delete a baby and everything it owns.
    ///
    /// Entries are removed one at a time, collection by collection, then
    /// the baby document itself. The sequence is not transactional: a
    /// crash mid-way leaves already-deleted entries gone and the rest
    /// orphaned under the surviving document.
    pub async fn delete_baby(&self, command: DeleteBabyCommand) -> Result<DeleteBabyResult> {
        info!("Deleting baby: {}", command.baby_id);

        let baby = self
            .babies
            .get_baby(&command.baby_id)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("baby {}", command.baby_id)))?;

        self.delete_all_entries(&self.feed_entries, &command.baby_id).await?;
        self.delete_all_entries(&self.weight_entries, &command.baby_id).await?;
        self.delete_all_entries(&self.stool_entries, &command.baby_id).await?;
        self.delete_all_entries(&self.wet_diaper_entries, &command.baby_id).await?;
        self.delete_all_entries(&self.dehydration_checks, &command.baby_id).await?;

        self.babies.delete_baby(&command.baby_id).await?;
        info!("Deleted baby: {} with ID: {}", baby.name, command.baby_id);

        Ok(DeleteBabyResult {
            success_message: format!("Baby '{}' deleted successfully", baby.name),
        })
    }

    async fn lenient_entries<E: EntryRecord>(
        &self,
        repository: &YamlEntryRepository<E>,
        baby_id: &str,
    ) -> Vec<E> {
        match repository.list_entries(baby_id).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Treating {} of baby {} as empty after fetch failure: {}",
                    E::COLLECTION,
                    baby_id,
                    e
                );
                Vec::new()
            }
        }
    }

    async fn delete_all_entries<E: EntryRecord>(
        &self,
        repository: &YamlEntryRepository<E>,
        baby_id: &str,
    ) -> Result<()> {
        let entries = repository.list_entries(baby_id).await?;
        let count = entries.len();
        for entry in entries {
            if let Some(entry_id) = entry.id() {
                repository.delete_entry(baby_id, entry_id).await?;
            }
        }
        if count > 0 {
            info!("Deleted {} {} of baby {}", count, E::COLLECTION, baby_id);
        }
        Ok(())
    }

    fn validate_new_baby(&self, baby: &NewBaby) -> Result<()> {
        if baby.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Baby name cannot be empty"));
        }
        if baby.name.len() > 100 {
            return Err(anyhow::anyhow!("Baby name cannot exceed 100 characters"));
        }
        if baby.date_of_birth > Utc::now() {
            return Err(anyhow::anyhow!("Date of birth cannot be in the future"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MilkType;
    use crate::storage::traits::StaticIdentity;
    use chrono::{DateTime, Duration, TimeZone};
    use tempfile::tempdir;

    fn setup_test(dir: &std::path::Path) -> BabyService {
        let conn = Arc::new(YamlConnection::new(dir).unwrap());
        BabyService::new(conn, Arc::new(StaticIdentity::signed_in("user-1")))
    }

    fn dob() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap()
    }

    fn new_baby(name: &str) -> NewBaby {
        NewBaby {
            name: name.to_string(),
            date_of_birth: dob(),
        }
    }

    #[tokio::test]
    async fn test_add_babies_assigns_ids_and_trims_names() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let result = service
            .add_babies(AddBabiesCommand {
                babies: vec![new_baby("  Mia "), new_baby("Noah")],
            })
            .await
            .unwrap();

        assert_eq!(result.babies.len(), 2);
        assert_eq!(result.babies[0].name, "Mia");
        assert!(result.babies.iter().all(|b| b.id.is_some()));
    }

    #[tokio::test]
    async fn test_add_babies_validation() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let empty_name = AddBabiesCommand {
            babies: vec![new_baby(" ")],
        };
        assert!(service.add_babies(empty_name).await.is_err());

        let long_name = AddBabiesCommand {
            babies: vec![new_baby(&"a".repeat(101))],
        };
        assert!(service.add_babies(long_name).await.is_err());

        let future_dob = AddBabiesCommand {
            babies: vec![NewBaby {
                name: "Future".to_string(),
                date_of_birth: Utc::now() + Duration::days(2),
            }],
        };
        assert!(service.add_babies(future_dob).await.is_err());
    }

    #[tokio::test]
    async fn test_add_babies_stops_at_first_failure() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let command = AddBabiesCommand {
            babies: vec![new_baby("Mia"), new_baby(" "), new_baby("Noah")],
        };
        assert!(service.add_babies(command).await.is_err());

        // The baby before the failing one was persisted; the one after
        // was never attempted.
        let listed = service.list_babies().await.unwrap();
        assert_eq!(listed.babies.len(), 1);
        assert_eq!(listed.babies[0].name, "Mia");
    }

    #[tokio::test]
    async fn test_list_babies_returns_summaries() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        service
            .add_babies(AddBabiesCommand {
                babies: vec![new_baby("Mia"), new_baby("Noah")],
            })
            .await
            .unwrap();

        let listed = service.list_babies().await.unwrap();
        assert_eq!(listed.babies.len(), 2);
        assert!(listed.babies.iter().any(|b| b.name == "Mia"));
        assert!(listed.babies.iter().any(|b| b.name == "Noah"));
    }

    #[tokio::test]
    async fn test_get_baby_hydrates_sub_collections() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let created = service
            .add_babies(AddBabiesCommand {
                babies: vec![new_baby("Mia")],
            })
            .await
            .unwrap();
        let baby_id = created.babies[0].id.clone().unwrap();

        service
            .feed_entries
            .store_entry(&baby_id, &FeedEntry::bottle(dob(), 90.0, MilkType::Formula))
            .await
            .unwrap();
        service
            .weight_entries
            .store_entry(&baby_id, &WeightEntry::from_grams(dob(), 4100))
            .await
            .unwrap();

        let result = service
            .get_baby(GetBabyCommand {
                baby_id: baby_id.clone(),
            })
            .await
            .unwrap();
        let baby = result.baby.unwrap();

        assert_eq!(baby.id.as_deref(), Some(baby_id.as_str()));
        assert_eq!(baby.feed_entries.len(), 1);
        assert_eq!(baby.weight_entries.len(), 1);
        assert!(baby.stool_entries.is_empty());
    }

    #[tokio::test]
    async fn test_get_baby_treats_broken_sub_collection_as_empty() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let created = service
            .add_babies(AddBabiesCommand {
                babies: vec![new_baby("Mia")],
            })
            .await
            .unwrap();
        let baby_id = created.babies[0].id.clone().unwrap();

        service
            .weight_entries
            .store_entry(&baby_id, &WeightEntry::from_grams(dob(), 4100))
            .await
            .unwrap();

        // Corrupt the feed collection only.
        let feed_dir = dir
            .path()
            .join("users/user-1/babies")
            .join(&baby_id)
            .join("feedEntries");
        std::fs::create_dir_all(&feed_dir).unwrap();
        std::fs::write(feed_dir.join("broken.yaml"), "feedType: [").unwrap();

        let baby = service
            .get_baby(GetBabyCommand {
                baby_id: baby_id.clone(),
            })
            .await
            .unwrap()
            .baby
            .unwrap();

        assert!(baby.feed_entries.is_empty());
        assert_eq!(baby.weight_entries.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_baby_is_none() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let result = service
            .get_baby(GetBabyCommand {
                baby_id: "missing".to_string(),
            })
            .await
            .unwrap();
        assert!(result.baby.is_none());
    }

    #[tokio::test]
    async fn test_delete_baby_cascades_over_all_collections() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let created = service
            .add_babies(AddBabiesCommand {
                babies: vec![new_baby("Mia")],
            })
            .await
            .unwrap();
        let baby_id = created.babies[0].id.clone().unwrap();

        service
            .feed_entries
            .store_entry(&baby_id, &FeedEntry::direct_breastfeeding(dob(), 10))
            .await
            .unwrap();
        service
            .weight_entries
            .store_entry(&baby_id, &WeightEntry::from_grams(dob(), 4100))
            .await
            .unwrap();
        service
            .dehydration_checks
            .store_entry(&baby_id, &DehydrationCheck::new(dob(), false, false))
            .await
            .unwrap();

        service
            .delete_baby(DeleteBabyCommand {
                baby_id: baby_id.clone(),
            })
            .await
            .unwrap();

        // Nothing remains retrievable under the former id.
        assert!(service
            .feed_entries
            .list_entries(&baby_id)
            .await
            .unwrap()
            .is_empty());
        assert!(service
            .weight_entries
            .list_entries(&baby_id)
            .await
            .unwrap()
            .is_empty());
        assert!(service
            .dehydration_checks
            .list_entries(&baby_id)
            .await
            .unwrap()
            .is_empty());
        assert!(service.list_babies().await.unwrap().babies.is_empty());
        assert!(service
            .get_baby(GetBabyCommand { baby_id })
            .await
            .unwrap()
            .baby
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_baby_fails() {
        let dir = tempdir().unwrap();
        let service = setup_test(dir.path());

        let result = service
            .delete_baby(DeleteBabyCommand {
                baby_id: "missing".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unauthenticated_service_fails_closed() {
        let dir = tempdir().unwrap();
        let conn = Arc::new(YamlConnection::new(dir.path()).unwrap());
        let service = BabyService::new(conn, Arc::new(StaticIdentity::signed_out()));

        let err = service
            .add_babies(AddBabiesCommand {
                babies: vec![new_baby("Mia")],
            })
            .await
            .unwrap_err();
        let store_err = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<StoreError>())
            .unwrap();
        assert!(store_err.is_unauthenticated());
    }
}
