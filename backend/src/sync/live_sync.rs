use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::domain::models::{
    Baby, DehydrationCheck, EntryRecord, FeedEntry, StoolEntry, WeightEntry, WetDiaperEntry,
};
use crate::storage::events::ChangeSlice;
use crate::storage::traits::{BabyStorage, EntryStorage, IdentityProvider};
use crate::storage::yaml::{YamlBabyRepository, YamlConnection, YamlEntryRepository};
use crate::storage::StoreError;

/// Continuously maintained snapshot of one baby.
///
/// `start_listening` registers six subscriptions (the baby document plus
/// its five entry sub-collections) on the store's change feed. Each
/// subscription refetches the full contents of its slice whenever the
/// slice changes and merges the result into a shared in-memory [`Baby`],
/// published to readers through a watch channel.
///
/// The six slices update independently; readers may observe a snapshot
/// whose collections reflect different store states relative to each
/// other. Within one slice, updates are atomic.
pub struct LiveSync {
    connection: Arc<YamlConnection>,
    identity: Arc<dyn IdentityProvider>,
    snapshot_tx: watch::Sender<Option<Baby>>,
    active: Mutex<Option<ActiveSubscription>>,
}

struct ActiveSubscription {
    baby_id: String,
    shared: Arc<SubscriptionShared>,
    tasks: Vec<JoinHandle<()>>,
}

struct SubscriptionShared {
    user_id: String,
    baby_id: String,
    stopped: AtomicBool,
    state: Mutex<SyncState>,
    snapshot_tx: watch::Sender<Option<Baby>>,
}

#[derive(Default)]
struct SyncState {
    baby: Option<Baby>,
    last_error: Option<String>,
}

impl SubscriptionShared {
    /// Apply a merge under the state lock and republish the snapshot.
    /// Nothing is applied once the subscription is stopped.
    fn mutate(&self, apply: impl FnOnce(&mut SyncState)) {
        let mut state = self.state.lock().unwrap();
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        apply(&mut state);
        self.snapshot_tx.send_replace(state.baby.clone());
    }

    fn record_error(&self, context: &str, error: &StoreError) {
        warn!("Live sync {}: {}", context, error);
        let mut state = self.state.lock().unwrap();
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        state.last_error = Some(format!("{}: {}", context, error));
    }
}

impl LiveSync {
    pub fn new(connection: Arc<YamlConnection>, identity: Arc<dyn IdentityProvider>) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            connection,
            identity,
            snapshot_tx,
            active: Mutex::new(None),
        }
    }

    /// Begin listening for one baby. An already-active registration for
    /// another baby is detached first; one instance tracks at most one
    /// baby at a time.
    pub fn start_listening(&self, baby_id: &str) -> Result<(), StoreError> {
        let user_id = self
            .identity
            .current_user_id()
            .ok_or(StoreError::Unauthenticated)?;

        self.stop_listening();
        self.snapshot_tx.send_replace(None);

        let shared = Arc::new(SubscriptionShared {
            user_id,
            baby_id: baby_id.to_string(),
            stopped: AtomicBool::new(false),
            state: Mutex::new(SyncState::default()),
            snapshot_tx: self.snapshot_tx.clone(),
        });

        let tasks = vec![
            self.spawn_baby_slice(shared.clone()),
            self.spawn_entry_slice::<FeedEntry>(shared.clone(), |baby, entries| {
                baby.feed_entries = entries;
            }),
            self.spawn_entry_slice::<WeightEntry>(shared.clone(), |baby, entries| {
                baby.weight_entries = entries;
            }),
            self.spawn_entry_slice::<StoolEntry>(shared.clone(), |baby, entries| {
                baby.stool_entries = entries;
            }),
            self.spawn_entry_slice::<WetDiaperEntry>(shared.clone(), |baby, entries| {
                baby.wet_diaper_entries = entries;
            }),
            self.spawn_entry_slice::<DehydrationCheck>(shared.clone(), |baby, entries| {
                baby.dehydration_checks = entries;
            }),
        ];

        debug!("Started live sync for baby {}", baby_id);
        *self.active.lock().unwrap() = Some(ActiveSubscription {
            baby_id: baby_id.to_string(),
            shared,
            tasks,
        });

        Ok(())
    }

    /// Detach all six subscriptions. Idempotent. After this returns no
    /// further merge is applied to the snapshot.
    pub fn stop_listening(&self) {
        let Some(subscription) = self.active.lock().unwrap().take() else {
            return;
        };

        // Flip the stop flag while holding the state lock so any merge
        // currently applying finishes before the flag is visible, and
        // every later one observes it.
        {
            let _state = subscription.shared.state.lock().unwrap();
            subscription.shared.stopped.store(true, Ordering::SeqCst);
        }
        for task in subscription.tasks {
            task.abort();
        }

        debug!("Stopped live sync for baby {}", subscription.baby_id);
    }

    /// Id of the baby currently being listened to.
    pub fn listening_to(&self) -> Option<String> {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .map(|s| s.baby_id.clone())
    }

    /// Watch the continuously updated snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Baby>> {
        self.snapshot_tx.subscribe()
    }

    /// The current snapshot, if any slice has arrived yet.
    pub fn current(&self) -> Option<Baby> {
        self.snapshot_tx.borrow().clone()
    }

    /// Last decode/fetch failure recorded by any slice, if any. Errors do
    /// not clear previously synced data.
    pub fn last_error(&self) -> Option<String> {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|s| s.shared.state.lock().unwrap().last_error.clone())
    }

    fn spawn_baby_slice(&self, shared: Arc<SubscriptionShared>) -> JoinHandle<()> {
        let repository =
            YamlBabyRepository::new(self.connection.clone(), self.identity.clone());
        let mut events = self.connection.subscribe();

        tokio::spawn(async move {
            refresh_baby_slice(&repository, &shared).await;

            loop {
                match events.recv().await {
                    Ok(event) => {
                        if event.matches(&shared.user_id, &shared.baby_id, ChangeSlice::Baby) {
                            refresh_baby_slice(&repository, &shared).await;
                        }
                    }
                    // Dropped events are harmless: the refresh reads the
                    // full current contents anyway.
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        refresh_baby_slice(&repository, &shared).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    fn spawn_entry_slice<E: EntryRecord>(
        &self,
        shared: Arc<SubscriptionShared>,
        apply: fn(&mut Baby, Vec<E>),
    ) -> JoinHandle<()> {
        let repository: YamlEntryRepository<E> =
            YamlEntryRepository::new(self.connection.clone(), self.identity.clone());
        let mut events = self.connection.subscribe();
        let slice = ChangeSlice::for_collection(E::COLLECTION);

        tokio::spawn(async move {
            let Some(slice) = slice else { return };

            refresh_entry_slice(&repository, &shared, apply).await;

            loop {
                match events.recv().await {
                    Ok(event) => {
                        if event.matches(&shared.user_id, &shared.baby_id, slice) {
                            refresh_entry_slice(&repository, &shared, apply).await;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        refresh_entry_slice(&repository, &shared, apply).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Drop for LiveSync {
    fn drop(&mut self) {
        self.stop_listening();
    }
}

/// Refetch the baby document and merge its scalar fields, keeping the
/// separately synced collections.
async fn refresh_baby_slice(repository: &YamlBabyRepository, shared: &SubscriptionShared) {
    match repository.get_baby(&shared.baby_id).await {
        Ok(Some(summary)) => shared.mutate(|state| {
            if let Some(baby) = state.baby.as_mut() {
                baby.apply_summary(summary);
            } else {
                state.baby = Some(Baby::from_summary(summary));
            }
        }),
        // The document is gone; the snapshot follows it.
        Ok(None) => shared.mutate(|state| state.baby = None),
        Err(e) => shared.record_error("baby document", &e),
    }
}

/// Refetch one sub-collection and replace that slice on the snapshot,
/// starting from an empty baby when no slice has arrived yet.
async fn refresh_entry_slice<E: EntryRecord>(
    repository: &YamlEntryRepository<E>,
    shared: &SubscriptionShared,
    apply: fn(&mut Baby, Vec<E>),
) {
    match repository.list_entries(&shared.baby_id).await {
        Ok(entries) => shared.mutate(|state| {
            // An empty slice on an empty snapshot carries no information;
            // applying it would resurrect a baby deleted by another slice.
            if entries.is_empty() && state.baby.is_none() {
                return;
            }
            let baby = state.baby.get_or_insert_with(Baby::default);
            apply(baby, entries);
        }),
        Err(e) => shared.record_error(E::COLLECTION, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::baby_service::BabyService;
    use crate::domain::commands::babies::{AddBabiesCommand, DeleteBabyCommand, NewBaby};
    use crate::domain::commands::entries::{
        AddFeedEntryCommand, AddWeightEntryCommand, WeightMeasurement,
    };
    use crate::domain::entry_service::EntryService;
    use crate::domain::models::FeedingMethod;
    use crate::storage::events::ChangeEvent;
    use crate::storage::traits::StaticIdentity;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::time::{sleep, timeout};

    struct Fixture {
        connection: Arc<YamlConnection>,
        babies: BabyService,
        entries: EntryService,
        sync: LiveSync,
    }

    async fn setup_test(dir: &std::path::Path) -> (Fixture, String) {
        let connection = Arc::new(YamlConnection::new(dir).unwrap());
        let identity: Arc<dyn IdentityProvider> = Arc::new(StaticIdentity::signed_in("user-1"));

        let babies = BabyService::new(connection.clone(), identity.clone());
        let entries = EntryService::new(connection.clone(), identity.clone());
        let sync = LiveSync::new(connection.clone(), identity);

        let created = babies
            .add_babies(AddBabiesCommand {
                babies: vec![NewBaby {
                    name: "Mia".to_string(),
                    date_of_birth: Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap(),
                }],
            })
            .await
            .unwrap();
        let baby_id = created.babies[0].id.clone().unwrap();

        let fixture = Fixture {
            connection,
            babies,
            entries,
            sync,
        };
        (fixture, baby_id)
    }

    async fn wait_for_snapshot(
        rx: &mut watch::Receiver<Option<Baby>>,
        predicate: impl Fn(&Baby) -> bool,
    ) -> Baby {
        let result = timeout(
            Duration::from_secs(5),
            rx.wait_for(|snapshot| snapshot.as_ref().map(&predicate).unwrap_or(false)),
        )
        .await
        .expect("timed out waiting for snapshot")
        .expect("snapshot channel closed");
        result.clone().unwrap()
    }

    fn feed_command(baby_id: &str, hour: u32) -> AddFeedEntryCommand {
        AddFeedEntryCommand {
            baby_id: baby_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 1, hour, 0, 0).unwrap(),
            method: FeedingMethod::DirectBreastfeeding { minutes: 10 },
        }
    }

    #[tokio::test]
    async fn test_initial_snapshot_hydrates_existing_data() {
        let dir = tempdir().unwrap();
        let (fixture, baby_id) = setup_test(dir.path()).await;

        fixture
            .entries
            .add_feed_entry(feed_command(&baby_id, 8))
            .await
            .unwrap();

        fixture.sync.start_listening(&baby_id).unwrap();
        let mut rx = fixture.sync.subscribe();

        let baby = wait_for_snapshot(&mut rx, |b| {
            b.id.as_deref() == Some(baby_id.as_str()) && b.feed_entries.len() == 1
        })
        .await;
        assert_eq!(baby.name, "Mia");
    }

    #[tokio::test]
    async fn test_new_entries_arrive_in_snapshot() {
        let dir = tempdir().unwrap();
        let (fixture, baby_id) = setup_test(dir.path()).await;

        fixture.sync.start_listening(&baby_id).unwrap();
        let mut rx = fixture.sync.subscribe();
        wait_for_snapshot(&mut rx, |b| b.id.is_some()).await;

        fixture
            .entries
            .add_feed_entry(feed_command(&baby_id, 8))
            .await
            .unwrap();
        fixture
            .entries
            .add_weight_entry(AddWeightEntryCommand {
                baby_id: baby_id.clone(),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap(),
                measurement: WeightMeasurement::Kilograms(4.2),
            })
            .await
            .unwrap();

        let baby = wait_for_snapshot(&mut rx, |b| {
            b.feed_entries.len() == 1 && b.weight_entries.len() == 1
        })
        .await;
        assert_eq!(baby.weight_entries[0].grams, 4200);
    }

    #[tokio::test]
    async fn test_entry_deletion_shrinks_snapshot() {
        let dir = tempdir().unwrap();
        let (fixture, baby_id) = setup_test(dir.path()).await;

        let added = fixture
            .entries
            .add_feed_entry(feed_command(&baby_id, 8))
            .await
            .unwrap();

        fixture.sync.start_listening(&baby_id).unwrap();
        let mut rx = fixture.sync.subscribe();
        wait_for_snapshot(&mut rx, |b| b.feed_entries.len() == 1).await;

        fixture
            .entries
            .delete_feed_entry(crate::domain::commands::entries::DeleteEntryCommand {
                baby_id: baby_id.clone(),
                entry_id: added.entry.id.unwrap(),
            })
            .await
            .unwrap();

        wait_for_snapshot(&mut rx, |b| b.feed_entries.is_empty()).await;
    }

    #[tokio::test]
    async fn test_baby_deletion_clears_snapshot() {
        let dir = tempdir().unwrap();
        let (fixture, baby_id) = setup_test(dir.path()).await;

        fixture.sync.start_listening(&baby_id).unwrap();
        let mut rx = fixture.sync.subscribe();
        wait_for_snapshot(&mut rx, |b| b.id.is_some()).await;

        fixture
            .babies
            .delete_baby(DeleteBabyCommand {
                baby_id: baby_id.clone(),
            })
            .await
            .unwrap();

        timeout(
            Duration::from_secs(5),
            rx.wait_for(|snapshot| snapshot.is_none()),
        )
        .await
        .expect("timed out waiting for cleared snapshot")
        .unwrap();
    }

    #[tokio::test]
    async fn test_decode_failure_keeps_previous_slice() {
        let dir = tempdir().unwrap();
        let (fixture, baby_id) = setup_test(dir.path()).await;

        fixture
            .entries
            .add_feed_entry(feed_command(&baby_id, 8))
            .await
            .unwrap();

        fixture.sync.start_listening(&baby_id).unwrap();
        let mut rx = fixture.sync.subscribe();
        wait_for_snapshot(&mut rx, |b| b.feed_entries.len() == 1).await;

        // Corrupt the collection on disk, then nudge the slice.
        let feed_dir = dir
            .path()
            .join("users/user-1/babies")
            .join(&baby_id)
            .join("feedEntries");
        std::fs::write(feed_dir.join("broken.yaml"), "feedType: [").unwrap();
        fixture.connection.publish(ChangeEvent {
            user_id: "user-1".to_string(),
            baby_id: baby_id.clone(),
            slice: ChangeSlice::FeedEntries,
        });

        sleep(Duration::from_millis(200)).await;

        let baby = fixture.sync.current().unwrap();
        assert_eq!(baby.feed_entries.len(), 1);
        assert!(fixture.sync.last_error().is_some());
    }

    #[tokio::test]
    async fn test_stop_listening_detaches() {
        let dir = tempdir().unwrap();
        let (fixture, baby_id) = setup_test(dir.path()).await;

        fixture.sync.start_listening(&baby_id).unwrap();
        let mut rx = fixture.sync.subscribe();
        wait_for_snapshot(&mut rx, |b| b.id.is_some()).await;

        fixture.sync.stop_listening();
        assert!(fixture.sync.listening_to().is_none());

        fixture
            .entries
            .add_feed_entry(feed_command(&baby_id, 8))
            .await
            .unwrap();
        sleep(Duration::from_millis(200)).await;

        // The snapshot no longer follows the store.
        let baby = fixture.sync.current().unwrap();
        assert!(baby.feed_entries.is_empty());

        // Stopping again is a no-op.
        fixture.sync.stop_listening();
    }

    #[tokio::test]
    async fn test_switching_babies_replaces_snapshot() {
        let dir = tempdir().unwrap();
        let (fixture, baby_id) = setup_test(dir.path()).await;

        let second = fixture
            .babies
            .add_babies(AddBabiesCommand {
                babies: vec![NewBaby {
                    name: "Noah".to_string(),
                    date_of_birth: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
                }],
            })
            .await
            .unwrap();
        let second_id = second.babies[0].id.clone().unwrap();

        fixture.sync.start_listening(&baby_id).unwrap();
        let mut rx = fixture.sync.subscribe();
        wait_for_snapshot(&mut rx, |b| b.name == "Mia").await;

        fixture.sync.start_listening(&second_id).unwrap();
        let mut rx = fixture.sync.subscribe();
        wait_for_snapshot(&mut rx, |b| b.name == "Noah").await;
        assert_eq!(fixture.sync.listening_to().as_deref(), Some(second_id.as_str()));
    }

    #[tokio::test]
    async fn test_start_listening_requires_identity() {
        let dir = tempdir().unwrap();
        let connection = Arc::new(YamlConnection::new(dir.path()).unwrap());
        let sync = LiveSync::new(connection, Arc::new(StaticIdentity::signed_out()));

        let err = sync.start_listening("baby-1").unwrap_err();
        assert!(err.is_unauthenticated());
    }
}
