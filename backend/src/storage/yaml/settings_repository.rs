use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::connection::YamlConnection;
use crate::domain::models::UserSettings;
use crate::storage::error::StoreError;
use crate::storage::traits::{IdentityProvider, SettingsStorage};

/// Stores user preferences in one YAML document under the user scope.
#[derive(Clone)]
pub struct YamlSettingsRepository {
    connection: Arc<YamlConnection>,
    identity: Arc<dyn IdentityProvider>,
}

impl YamlSettingsRepository {
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
}

#[async_trait]
impl SettingsStorage for YamlSettingsRepository {
    async fn get_settings(&self) -> Result<UserSettings, StoreError> {
        let user_id = self.require_user()?;
        let path = self.connection.settings_path(&user_id);

        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let settings = serde_yaml::from_str(&contents)
            .map_err(|source| StoreError::Decode { path, source })?;
        Ok(settings)
    }

    async fn put_settings(&self, settings: &UserSettings) -> Result<(), StoreError> {
        let user_id = self.require_user()?;
        let path = self.connection.settings_path(&user_id);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let yaml = serde_yaml::to_string(settings)
            .map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?;
        tokio::fs::write(&path, yaml).await?;

        debug!("Stored settings for user {}", user_id);
        Ok(())
    }
}
