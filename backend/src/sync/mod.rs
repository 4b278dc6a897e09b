//! Live synchronization of one baby's data into an in-memory snapshot.

pub mod live_sync;

pub use live_sync::LiveSync;
