use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::connection::YamlConnection;
use crate::domain::models::HealthSample;
use crate::storage::error::StoreError;
use crate::storage::traits::{HealthSampleStorage, IdentityProvider};

/// Mirror store for device health samples, one document per sample id.
#[derive(Clone)]
pub struct YamlHealthSampleRepository {
    connection: Arc<YamlConnection>,
    identity: Arc<dyn IdentityProvider>,
}

impl YamlHealthSampleRepository {
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

    fn sample_path(&self, user_id: &str, sample_id: &str) -> std::path::PathBuf {
        self.connection
            .health_kit_dir(user_id)
            .join(format!("{}.yaml", sample_id))
    }
}

#[async_trait]
impl HealthSampleStorage for YamlHealthSampleRepository {
    async fn store_sample(&self, sample: &HealthSample) -> Result<(), StoreError> {
        let user_id = self.require_user()?;

        let dir = self.connection.health_kit_dir(&user_id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = self.sample_path(&user_id, &sample.id);
        let yaml = serde_yaml::to_string(sample)
            .map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?;
        tokio::fs::write(&path, yaml).await?;

        debug!("Mirrored health sample {}", sample.id);
        Ok(())
    }

    async fn delete_sample(&self, sample_id: &str) -> Result<(), StoreError> {
        let user_id = self.require_user()?;
        let path = self.sample_path(&user_id, sample_id);

        if !path.exists() {
            return Ok(());
        }

        tokio::fs::remove_file(&path).await?;
        debug!("Removed mirrored health sample {}", sample_id);
        Ok(())
    }
}
