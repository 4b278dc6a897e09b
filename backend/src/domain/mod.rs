//! Domain layer: models, commands, and the services that implement the
//! application's business rules on top of the storage traits.

pub mod baby_service;
pub mod chart_service;
pub mod commands;
pub mod entry_service;
pub mod health_mirror_service;
pub mod models;
pub mod settings_service;
pub mod units;

pub use baby_service::BabyService;
pub use chart_service::ChartService;
pub use entry_service::EntryService;
pub use health_mirror_service::HealthMirrorService;
pub use settings_service::SettingsService;
