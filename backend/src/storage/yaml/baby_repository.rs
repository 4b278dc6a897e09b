use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use uuid::Uuid;

use super::connection::YamlConnection;
use crate::domain::models::BabySummary;
use crate::storage::error::StoreError;
use crate::storage::events::{ChangeEvent, ChangeSlice};
use crate::storage::traits::{BabyStorage, IdentityProvider};

/// YAML-document baby repository.
#[derive(Clone)]
pub struct YamlBabyRepository {
    connection: Arc<YamlConnection>,
    identity: Arc<dyn IdentityProvider>,
}

impl YamlBabyRepository {
    pub fn new(connection: Arc<YamlConnection>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            connection,
            identity,
        }
    }

    fn require_user(&self) -> Result<String, StoreError> {
        self.identity
            .current_user_id()
            .ok_or(StoreError::Unauthenticated)
    }

    fn publish_baby_change(&self, user_id: &str, baby_id: &str) {
        self.connection.publish(ChangeEvent {
            user_id: user_id.to_string(),
            baby_id: baby_id.to_string(),
            slice: ChangeSlice::Baby,
        });
    }
}

#[async_trait]
impl BabyStorage for YamlBabyRepository {
    async fn store_baby(&self, baby: &BabySummary) -> Result<BabySummary, StoreError> {
        let user_id = self.require_user()?;

        let baby_id = Uuid::new_v4().to_string();
        let mut stored = baby.clone();
        stored.id = Some(baby_id.clone());

        let baby_dir = self.connection.baby_dir(&user_id, &baby_id);
        tokio::fs::create_dir_all(&baby_dir).await?;

        let path = self.connection.baby_document_path(&user_id, &baby_id);
        let yaml = serde_yaml::to_string(&stored)
            .map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?;
        tokio::fs::write(&path, yaml).await?;

        debug!("Stored baby {} for user {}", baby_id, user_id);
        self.publish_baby_change(&user_id, &baby_id);

        Ok(stored)
    }

    async fn list_babies(&self) -> Result<Vec<BabySummary>, StoreError> {
        let user_id = self.require_user()?;
        let babies_dir = self.connection.babies_dir(&user_id);

        if !babies_dir.exists() {
            return Ok(Vec::new());
        }

        let mut babies = Vec::new();
        let mut entries = tokio::fs::read_dir(&babies_dir).await?;
        while let Some(dir_entry) = entries.next_entry().await? {
            if !dir_entry.path().is_dir() {
                continue;
            }

            let baby_id = match dir_entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    warn!("Skipping baby directory with invalid name: {:?}", dir_entry.path());
                    continue;
                }
            };

            match self.get_baby(&baby_id).await {
                Ok(Some(baby)) => babies.push(baby),
                Ok(None) => debug!("Directory {} has no baby document", baby_id),
                Err(e) => warn!("Skipping unreadable baby {}: {}", baby_id, e),
            }
        }

        // Stable ordering for callers that render lists directly.
        babies.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(babies)
    }

    async fn get_baby(&self, baby_id: &str) -> Result<Option<BabySummary>, StoreError> {
        let user_id = self.require_user()?;
        let path = self.connection.baby_document_path(&user_id, baby_id);

        if !path.exists() {
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let baby = serde_yaml::from_str(&contents)
            .map_err(|source| StoreError::Decode { path, source })?;
        Ok(Some(baby))
    }

    async fn delete_baby(&self, baby_id: &str) -> Result<(), StoreError> {
        let user_id = self.require_user()?;
        let path = self.connection.baby_document_path(&user_id, baby_id);

        if !path.exists() {
            return Err(StoreError::not_found(format!("baby {}", baby_id)));
        }

        tokio::fs::remove_file(&path).await?;

        // Leftover sub-collection directories are only removed when empty;
        // orphaned entries from an interrupted cascade stay on disk.
        let baby_dir = self.connection.baby_dir(&user_id, baby_id);
        if let Ok(mut entries) = tokio::fs::read_dir(&baby_dir).await {
            while let Ok(Some(dir_entry)) = entries.next_entry().await {
                let _ = tokio::fs::remove_dir(dir_entry.path()).await;
            }
        }
        let _ = tokio::fs::remove_dir(&baby_dir).await;

        debug!("Deleted baby document {} for user {}", baby_id, user_id);
        self.publish_baby_change(&user_id, baby_id);

        Ok(())
    }
}
