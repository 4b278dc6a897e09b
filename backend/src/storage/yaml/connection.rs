use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use tokio::sync::broadcast;

use crate::storage::error::StoreError;
use crate::storage::events::ChangeEvent;

/// Document file name for a baby's scalar fields.
pub const BABY_DOCUMENT: &str = "baby.yaml";

/// Preference document under the user scope.
pub const SETTINGS_DOCUMENT: &str = "global_config.yaml";

/// Sub-collection for mirrored health samples.
pub const HEALTH_KIT_COLLECTION: &str = "healthKit";

/// YamlConnection manages the on-disk document hierarchy and the shared
/// change feed.
///
/// Layout mirrors the remote store paths:
/// `users/{user_id}/babies/{baby_id}/<collection>/<entry_id>.yaml`
#[derive(Clone)]
pub struct YamlConnection {
    base_directory: PathBuf,
    events: broadcast::Sender<ChangeEvent>,
}

impl YamlConnection {
    /// Open a connection rooted at `base_directory`, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, StoreError> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        // Capacity only bounds unconsumed backlog; listeners refetch full
        // slices, so lagging receivers just catch up on the next event.
        let (events, _) = broadcast::channel(256);

        Ok(Self {
            base_directory: base_path,
            events,
        })
    }

    /// Open a connection in the default data directory under the user's
    /// documents folder.
    pub fn new_default() -> Result<Self, StoreError> {
        let documents_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                StoreError::Store(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not determine home directory",
                ))
            })?;

        let data_dir = documents_dir.join("Baby Tracker");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn user_dir(&self, user_id: &str) -> PathBuf {
        self.base_directory.join("users").join(user_id)
    }

    pub fn babies_dir(&self, user_id: &str) -> PathBuf {
        self.user_dir(user_id).join("babies")
    }

    pub fn baby_dir(&self, user_id: &str, baby_id: &str) -> PathBuf {
        self.babies_dir(user_id).join(baby_id)
    }

    pub fn baby_document_path(&self, user_id: &str, baby_id: &str) -> PathBuf {
        self.baby_dir(user_id, baby_id).join(BABY_DOCUMENT)
    }

    pub fn collection_dir(&self, user_id: &str, baby_id: &str, collection: &str) -> PathBuf {
        self.baby_dir(user_id, baby_id).join(collection)
    }

    pub fn settings_path(&self, user_id: &str) -> PathBuf {
        self.user_dir(user_id).join(SETTINGS_DOCUMENT)
    }

    pub fn health_kit_dir(&self, user_id: &str) -> PathBuf {
        self.user_dir(user_id).join(HEALTH_KIT_COLLECTION)
    }

    /// Subscribe to the change feed. Events published before the call are
    /// not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Publish a mutation notification. A send error only means nobody is
    /// listening right now.
    pub(crate) fn publish(&self, event: ChangeEvent) {
        let _ = self.events.send(event);
    }
}
