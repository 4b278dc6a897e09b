//! YAML-document storage backend.
//!
//! One directory hierarchy per user mirrors the remote store layout;
//! every document is a single YAML file.

pub mod baby_repository;
pub mod connection;
pub mod entry_repository;
pub mod health_sample_repository;
pub mod settings_repository;

pub use baby_repository::YamlBabyRepository;
pub use connection::YamlConnection;
pub use entry_repository::YamlEntryRepository;
pub use health_sample_repository::YamlHealthSampleRepository;
pub use settings_repository::YamlSettingsRepository;
