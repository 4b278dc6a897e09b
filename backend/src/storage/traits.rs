//! Storage abstraction traits.
//!
//! The domain layer works against these traits so a different backend
//! (remote document store, SQL, in-memory) can replace the YAML store
//! without touching domain code. Every operation is scoped by the user
//! identity injected through [`IdentityProvider`] and fails closed with
//! [`StoreError::Unauthenticated`] when no identity is available.

use async_trait::async_trait;

use crate::domain::models::{BabySummary, EntryRecord, HealthSample, UserSettings};
use crate::storage::error::StoreError;

/// Supplies the opaque id of the currently authenticated user.
///
/// In production this wraps the authentication session; tests and the
/// standalone server use [`StaticIdentity`].
pub trait IdentityProvider: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}

/// Fixed identity, either signed in or signed out.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: Option<String>,
}

impl StaticIdentity {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self { user_id: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// Baby document operations. Sub-collections are never joined here; the
/// service layer hydrates them through [`EntryStorage`].
#[async_trait]
pub trait BabyStorage: Send + Sync {
    /// Persist a baby as a new document, returning it with the assigned id.
    async fn store_baby(&self, baby: &BabySummary) -> Result<BabySummary, StoreError>;

    /// List all baby documents for the user.
    async fn list_babies(&self) -> Result<Vec<BabySummary>, StoreError>;

    /// Fetch one baby document.
    async fn get_baby(&self, baby_id: &str) -> Result<Option<BabySummary>, StoreError>;

    /// Delete the baby document itself. Cascading over sub-collections is
    /// the service layer's job.
    async fn delete_baby(&self, baby_id: &str) -> Result<(), StoreError>;
}

/// Entry operations for one sub-collection kind.
#[async_trait]
pub trait EntryStorage<E: EntryRecord>: Send + Sync {
    /// Persist one entry under the given baby, returning it with the
    /// assigned id. Fails with NotFound when the baby does not exist.
    async fn store_entry(&self, baby_id: &str, entry: &E) -> Result<E, StoreError>;

    /// Full contents of the sub-collection, ordered by timestamp (then id)
    /// for determinism.
    async fn list_entries(&self, baby_id: &str) -> Result<Vec<E>, StoreError>;

    /// Remove one entry by id.
    async fn delete_entry(&self, baby_id: &str, entry_id: &str) -> Result<(), StoreError>;
}

/// Persisted user preferences.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    async fn get_settings(&self) -> Result<UserSettings, StoreError>;

    async fn put_settings(&self, settings: &UserSettings) -> Result<(), StoreError>;
}

/// Mirror of device health samples, one document per sample id.
#[async_trait]
pub trait HealthSampleStorage: Send + Sync {
    async fn store_sample(&self, sample: &HealthSample) -> Result<(), StoreError>;

    /// Idempotent: removing a sample that was never mirrored is not an
    /// error.
    async fn delete_sample(&self, sample_id: &str) -> Result<(), StoreError>;
}
