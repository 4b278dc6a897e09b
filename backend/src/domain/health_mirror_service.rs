use log::warn;
use std::sync::Arc;

use crate::domain::models::HealthSample;
use crate::storage::traits::{HealthSampleStorage, IdentityProvider};
use crate::storage::yaml::{YamlConnection, YamlHealthSampleRepository};

/// Best-effort mirror of device health samples into the user's store.
///
/// Failures are logged and dropped; there is no retry. The caller is a
/// fire-and-forget observer of the device health store.
#[derive(Clone)]
pub struct HealthMirrorService {
    samples: YamlHealthSampleRepository,
}

impl HealthMirrorService {
    pub fn new(connection: Arc<YamlConnection>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            samples: YamlHealthSampleRepository::new(connection, identity),
        }
    }

    pub async fn mirror_sample(&self, sample: HealthSample) {
        if let Err(e) = self.samples.store_sample(&sample).await {
            warn!("Failed to mirror health sample {}: {}", sample.id, e);
        }
    }

    pub async fn remove_sample(&self, sample_id: &str) {
        if let Err(e) = self.samples.delete_sample(sample_id).await {
            warn!("Failed to remove mirrored health sample {}: {}", sample_id, e);
        }
    }
}
