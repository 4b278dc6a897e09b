//! Storage layer: abstraction traits, the shared change feed, and the
//! YAML-document backend.

pub mod error;
pub mod events;
pub mod traits;
pub mod yaml;

pub use error::StoreError;
pub use events::{ChangeEvent, ChangeSlice};
pub use traits::{
    BabyStorage, EntryStorage, HealthSampleStorage, IdentityProvider, SettingsStorage,
    StaticIdentity,
};
pub use yaml::{
    YamlBabyRepository, YamlConnection, YamlEntryRepository, YamlHealthSampleRepository,
    YamlSettingsRepository,
};
