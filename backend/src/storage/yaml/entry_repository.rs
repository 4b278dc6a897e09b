use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use super::connection::YamlConnection;
use crate::domain::models::EntryRecord;
use crate::storage::error::StoreError;
use crate::storage::events::{ChangeEvent, ChangeSlice};
use crate::storage::traits::{EntryStorage, IdentityProvider};

/// YAML-document entry repository, one per entry kind.
///
/// Documents live as `<entry_id>.yaml` files inside the kind's
/// sub-collection directory under the baby document.
#[derive(Clone)]
pub struct YamlEntryRepository<E: EntryRecord> {
    connection: Arc<YamlConnection>,
    identity: Arc<dyn IdentityProvider>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntryRecord> YamlEntryRepository<E> {
    pub fn new(connection: Arc<YamlConnection>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            connection,
            identity,
            _marker: PhantomData,
        }
    }

    fn require_user(&self) -> Result<String, StoreError> {
        self.identity
            .current_user_id()
            .ok_or(StoreError::Unauthenticated)
    }

    fn publish_change(&self, user_id: &str, baby_id: &str) {
        if let Some(slice) = ChangeSlice::for_collection(E::COLLECTION) {
            self.connection.publish(ChangeEvent {
                user_id: user_id.to_string(),
                baby_id: baby_id.to_string(),
                slice,
            });
        }
    }

    fn entry_path(&self, user_id: &str, baby_id: &str, entry_id: &str) -> std::path::PathBuf {
        self.connection
            .collection_dir(user_id, baby_id, E::COLLECTION)
            .join(format!("{}.yaml", entry_id))
    }
}

#[async_trait]
impl<E: EntryRecord> EntryStorage<E> for YamlEntryRepository<E> {
    async fn store_entry(&self, baby_id: &str, entry: &E) -> Result<E, StoreError> {
        let user_id = self.require_user()?;

        // Entries are only meaningful inside an existing baby scope.
        if !self
            .connection
            .baby_document_path(&user_id, baby_id)
            .exists()
        {
            return Err(StoreError::not_found(format!("baby {}", baby_id)));
        }

        let entry_id = Uuid::new_v4().to_string();
        let mut stored = entry.clone();
        stored.set_id(entry_id.clone());

        let collection_dir = self
            .connection
            .collection_dir(&user_id, baby_id, E::COLLECTION);
        tokio::fs::create_dir_all(&collection_dir).await?;

        let path = self.entry_path(&user_id, baby_id, &entry_id);
        let yaml = serde_yaml::to_string(&stored)
            .map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?;
        tokio::fs::write(&path, yaml).await?;

        debug!(
            "Stored {} entry {} under baby {}",
            E::COLLECTION,
            entry_id,
            baby_id
        );
        self.publish_change(&user_id, baby_id);

        Ok(stored)
    }

    async fn list_entries(&self, baby_id: &str) -> Result<Vec<E>, StoreError> {
        let user_id = self.require_user()?;
        let collection_dir = self
            .connection
            .collection_dir(&user_id, baby_id, E::COLLECTION);

        if !collection_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&collection_dir).await?;
        while let Some(dir_entry) = dir.next_entry().await? {
            let path = dir_entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }

            let contents = tokio::fs::read_to_string(&path).await?;
            let entry: E = serde_yaml::from_str(&contents)
                .map_err(|source| StoreError::Decode { path, source })?;
            entries.push(entry);
        }

        // Directory order is arbitrary; give callers a stable order.
        entries.sort_by(|a, b| {
            a.timestamp()
                .cmp(&b.timestamp())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(entries)
    }

    async fn delete_entry(&self, baby_id: &str, entry_id: &str) -> Result<(), StoreError> {
        let user_id = self.require_user()?;
        let path = self.entry_path(&user_id, baby_id, entry_id);

        if !path.exists() {
            return Err(StoreError::not_found(format!(
                "{} entry {} under baby {}",
                E::COLLECTION,
                entry_id,
                baby_id
            )));
        }

        tokio::fs::remove_file(&path).await?;

        debug!(
            "Deleted {} entry {} under baby {}",
            E::COLLECTION,
            entry_id,
            baby_id
        );
        self.publish_change(&user_id, baby_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{BabySummary, FeedEntry, MilkType, WeightEntry};
    use crate::storage::traits::{BabyStorage, StaticIdentity};
    use crate::storage::yaml::YamlBabyRepository;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    async fn fixture(
        dir: &std::path::Path,
    ) -> (Arc<YamlConnection>, Arc<StaticIdentity>, String) {
        let conn = Arc::new(YamlConnection::new(dir).unwrap());
        let identity = Arc::new(StaticIdentity::signed_in("user-1"));
        let babies = YamlBabyRepository::new(conn.clone(), identity.clone());
        let baby = babies
            .store_baby(&BabySummary::new(
                "Mia",
                Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap(),
            ))
            .await
            .unwrap();
        (conn, identity, baby.id.unwrap())
    }

    fn ts(day: u32, hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_store_and_list_entries() {
        let dir = tempdir().unwrap();
        let (conn, identity, baby_id) = fixture(dir.path()).await;
        let repo: YamlEntryRepository<FeedEntry> = YamlEntryRepository::new(conn, identity);

        let stored = repo
            .store_entry(&baby_id, &FeedEntry::direct_breastfeeding(ts(1, 8), 15))
            .await
            .unwrap();
        assert!(stored.id().is_some());

        repo.store_entry(&baby_id, &FeedEntry::bottle(ts(1, 12), 90.0, MilkType::Formula))
            .await
            .unwrap();

        let entries = repo.list_entries(&baby_id).await.unwrap();
        assert_eq!(entries.len(), 2);
        // Ordered by timestamp.
        assert_eq!(entries[0].timestamp, ts(1, 8));
        assert_eq!(entries[1].timestamp, ts(1, 12));
    }

    #[tokio::test]
    async fn test_store_under_unknown_baby_is_not_found() {
        let dir = tempdir().unwrap();
        let (conn, identity, _) = fixture(dir.path()).await;
        let repo: YamlEntryRepository<FeedEntry> = YamlEntryRepository::new(conn, identity);

        let err = repo
            .store_entry("missing", &FeedEntry::direct_breastfeeding(ts(1, 8), 5))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let dir = tempdir().unwrap();
        let (conn, identity, baby_id) = fixture(dir.path()).await;
        let repo: YamlEntryRepository<WeightEntry> = YamlEntryRepository::new(conn, identity);

        let stored = repo
            .store_entry(&baby_id, &WeightEntry::from_grams(ts(2, 9), 4100))
            .await
            .unwrap();
        let entry_id = stored.id().unwrap().to_string();

        repo.delete_entry(&baby_id, &entry_id).await.unwrap();
        assert!(repo.list_entries(&baby_id).await.unwrap().is_empty());

        let err = repo.delete_entry(&baby_id, &entry_id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_for_baby_without_collection_is_empty() {
        let dir = tempdir().unwrap();
        let (conn, identity, baby_id) = fixture(dir.path()).await;
        let repo: YamlEntryRepository<WeightEntry> = YamlEntryRepository::new(conn, identity);

        assert!(repo.list_entries(&baby_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_fails_closed() {
        let dir = tempdir().unwrap();
        let (conn, _, baby_id) = fixture(dir.path()).await;
        let repo: YamlEntryRepository<FeedEntry> =
            YamlEntryRepository::new(conn, Arc::new(StaticIdentity::signed_out()));

        let err = repo
            .store_entry(&baby_id, &FeedEntry::direct_breastfeeding(ts(1, 8), 5))
            .await
            .unwrap_err();
        assert!(err.is_unauthenticated());
        assert!(repo.list_entries(&baby_id).await.unwrap_err().is_unauthenticated());
        assert!(repo
            .delete_entry(&baby_id, "x")
            .await
            .unwrap_err()
            .is_unauthenticated());
    }

    #[tokio::test]
    async fn test_corrupted_entry_is_decode_error() {
        let dir = tempdir().unwrap();
        let (conn, identity, baby_id) = fixture(dir.path()).await;
        let repo: YamlEntryRepository<FeedEntry> =
            YamlEntryRepository::new(conn.clone(), identity);

        repo.store_entry(&baby_id, &FeedEntry::direct_breastfeeding(ts(1, 8), 5))
            .await
            .unwrap();

        let collection = conn.collection_dir("user-1", &baby_id, FeedEntry::COLLECTION);
        std::fs::write(collection.join("broken.yaml"), "feedType: [").unwrap();

        let err = repo.list_entries(&baby_id).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
