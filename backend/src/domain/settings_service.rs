use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::settings::{SettingsResult, UpdateSettingsCommand};
use crate::storage::traits::{BabyStorage, IdentityProvider, SettingsStorage};
use crate::storage::yaml::{YamlBabyRepository, YamlConnection, YamlSettingsRepository};
use crate::storage::StoreError;

/// Service for the persisted user preferences: the last-selected baby
/// and the weight display unit.
#[derive(Clone)]
pub struct SettingsService {
    settings: YamlSettingsRepository,
    babies: YamlBabyRepository,
}

impl SettingsService {
    pub fn new(connection: Arc<YamlConnection>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            settings: YamlSettingsRepository::new(connection.clone(), identity.clone()),
            babies: YamlBabyRepository::new(connection, identity),
        }
    }

    /// Current settings. A selection pointing at a baby that no longer
    /// exists is reported as no selection.
    pub async fn get_settings(&self) -> Result<SettingsResult> {
        let mut settings = self.settings.get_settings().await?;

        if let Some(baby_id) = settings.selected_baby_id.clone() {
            if self.babies.get_baby(&baby_id).await?.is_none() {
                warn!("Selected baby {} no longer exists", baby_id);
                settings.selected_baby_id = None;
            }
        }

        Ok(SettingsResult { settings })
    }

    /// Apply a partial update; unspecified fields keep their value.
    pub async fn update_settings(&self, command: UpdateSettingsCommand) -> Result<SettingsResult> {
        let mut settings = self.settings.get_settings().await?;

        if let Some(baby_id) = command.selected_baby_id {
            self.babies
                .get_baby(&baby_id)
                .await?
                .ok_or_else(|| StoreError::not_found(format!("baby {}", baby_id)))?;
            info!("Selected baby: {}", baby_id);
            settings.selected_baby_id = Some(baby_id);
        }

        if let Some(unit) = command.weight_unit {
            info!("Weight unit preference: {:?}", unit);
            settings.weight_unit = unit;
        }

        self.settings.put_settings(&settings).await?;
        Ok(SettingsResult { settings })
    }
}
