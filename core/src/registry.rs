//! The driver-side authority for shuffle block locations.

use crate::error::{ShuffleError, ShuffleResult};
use crate::location::ShuffleLocation;
use crate::map_output::MapOutputLocations;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Tracks where shuffle output lives and what has been lost.
///
/// Map tasks register their output locations on completion; reduce tasks
/// look up fetch candidates and report servers they could not reach. The
/// boolean from `report_unreachable` is the sole data-loss signal handed to
/// the scheduler: `true` means at least one partition has no remaining
/// location and upstream work must re-run. Which partitions those are is
/// answered separately by `find_missing_partitions`.
///
/// Abstract so alternative backends (an external metadata store, a
/// URI-keyed transport) can stand in for the in-memory registry; widening
/// the location identity key is an implementation concern, not a new trait.
#[async_trait]
pub trait ShuffleLocationTracker: Send + Sync {
    /// Record the output locations of one successful map task attempt.
    ///
    /// Every reduce partition id in `locations` must lie in
    /// `[0, num_partitions)` or the call fails with
    /// [`ShuffleError::InvalidPartitionRange`] without touching any state.
    /// Registering the same `(shuffle_id, map_id)` again atomically
    /// replaces the previous entry; attempts are never merged. Visible to
    /// all subsequent lookups as soon as the call returns.
    async fn register_map_output(
        &self,
        shuffle_id: u32,
        map_id: u32,
        num_partitions: u32,
        locations: HashMap<u32, Vec<ShuffleLocation>>,
    ) -> ShuffleResult<()>;

    /// Current fetch candidates for `(map_id, reduce_id)`, preferred first.
    ///
    /// An empty vec is a valid outcome meaning the partition is
    /// unfetchable and the caller should escalate to the scheduler.
    async fn get_map_locations(
        &self,
        shuffle_id: u32,
        map_id: u32,
        reduce_id: u32,
    ) -> ShuffleResult<Vec<ShuffleLocation>>;

    /// Remove `(host, port)` from every map entry of the shuffle.
    ///
    /// Returns `true` if any partition anywhere in the shuffle transitioned
    /// to zero remaining locations (data loss, re-execution required),
    /// `false` if every affected partition still has an alternative. A
    /// report matching no records is `Ok(false)`, not an error.
    async fn report_unreachable(
        &self,
        shuffle_id: u32,
        host: &str,
        port: Option<u16>,
    ) -> ShuffleResult<bool>;

    /// Every `(map_id, reduce_id)` pair in the shuffle whose location list
    /// is now empty. This is the batch-scan the scheduler runs after a
    /// `true` loss signal to decide which map tasks to re-run.
    async fn find_missing_partitions(&self, shuffle_id: u32) -> ShuffleResult<Vec<(u32, u32)>>;

    /// Release all entries for the shuffle. Idempotent; subsequent lookups
    /// fail with [`ShuffleError::UnknownShuffle`].
    async fn unregister_shuffle(&self, shuffle_id: u32);
}

type MapEntry = Arc<RwLock<MapOutputLocations>>;
type ShuffleEntries = HashMap<u32, MapEntry>;

/// In-memory [`ShuffleLocationTracker`].
///
/// One instance per process, injected into callers rather than reached
/// through a global. The outer lock guards the shuffle and map tables;
/// each map entry carries its own lock so unreachable-host fan-out and
/// lookups against different map tasks do not serialize. Entry replacement
/// is a single `Arc` swap under the outer write lock, and removal scans
/// run under the outer read lock, so a scan observes any given map task's
/// entry as fully-old or fully-new, never half-written.
#[derive(Debug, Default)]
pub struct ShuffleLocationRegistry {
    shuffles: RwLock<HashMap<u32, ShuffleEntries>>,
}

impl ShuffleLocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any map output is currently registered for the shuffle.
    pub async fn contains_shuffle(&self, shuffle_id: u32) -> bool {
        self.shuffles.read().await.contains_key(&shuffle_id)
    }

    /// Map task ids currently registered for the shuffle, sorted.
    pub async fn registered_map_tasks(&self, shuffle_id: u32) -> ShuffleResult<Vec<u32>> {
        let shuffles = self.shuffles.read().await;
        let entries = shuffles
            .get(&shuffle_id)
            .ok_or(ShuffleError::UnknownShuffle { shuffle_id })?;
        let mut map_ids: Vec<u32> = entries.keys().copied().collect();
        map_ids.sort_unstable();
        Ok(map_ids)
    }
}

#[async_trait]
impl ShuffleLocationTracker for ShuffleLocationRegistry {
    async fn register_map_output(
        &self,
        shuffle_id: u32,
        map_id: u32,
        num_partitions: u32,
        locations: HashMap<u32, Vec<ShuffleLocation>>,
    ) -> ShuffleResult<()> {
        for &reduce_id in locations.keys() {
            if reduce_id >= num_partitions {
                return Err(ShuffleError::InvalidPartitionRange {
                    shuffle_id,
                    map_id,
                    reduce_id,
                    num_partitions,
                });
            }
        }

        let entry = Arc::new(RwLock::new(MapOutputLocations::new(
            map_id,
            num_partitions,
            locations,
        )));

        let mut shuffles = self.shuffles.write().await;
        let entries = shuffles.entry(shuffle_id).or_default();
        if entries.insert(map_id, entry).is_some() {
            debug!(shuffle_id, map_id, "replaced map output registration");
        } else {
            debug!(shuffle_id, map_id, num_partitions, "registered map output");
        }
        Ok(())
    }

    async fn get_map_locations(
        &self,
        shuffle_id: u32,
        map_id: u32,
        reduce_id: u32,
    ) -> ShuffleResult<Vec<ShuffleLocation>> {
        let entry = {
            let shuffles = self.shuffles.read().await;
            let entries = shuffles
                .get(&shuffle_id)
                .ok_or(ShuffleError::UnknownShuffle { shuffle_id })?;
            entries
                .get(&map_id)
                .ok_or(ShuffleError::UnknownMapTask { shuffle_id, map_id })?
                .clone()
        };

        let entry = entry.read().await;
        Ok(entry.locations_for(reduce_id).to_vec())
    }

    async fn report_unreachable(
        &self,
        shuffle_id: u32,
        host: &str,
        port: Option<u16>,
    ) -> ShuffleResult<bool> {
        // Hold the outer read lock for the whole scan so a racing
        // registration cannot interleave a half-visible entry; each entry
        // is drained under its own write lock.
        let shuffles = self.shuffles.read().await;
        let entries = shuffles
            .get(&shuffle_id)
            .ok_or(ShuffleError::UnknownShuffle { shuffle_id })?;

        let mut data_loss = false;
        for (&map_id, entry) in entries.iter() {
            let newly_lost = entry.write().await.remove_location(host, port);
            if !newly_lost.is_empty() {
                warn!(
                    shuffle_id,
                    map_id,
                    host,
                    port = ?port,
                    partitions = ?newly_lost,
                    "partitions lost their last shuffle location"
                );
                data_loss = true;
            }
        }

        if !data_loss {
            debug!(
                shuffle_id,
                host,
                port = ?port,
                "removed unreachable location, all partitions still covered"
            );
        }
        Ok(data_loss)
    }

    async fn find_missing_partitions(&self, shuffle_id: u32) -> ShuffleResult<Vec<(u32, u32)>> {
        let shuffles = self.shuffles.read().await;
        let entries = shuffles
            .get(&shuffle_id)
            .ok_or(ShuffleError::UnknownShuffle { shuffle_id })?;

        let mut missing = Vec::new();
        for (&map_id, entry) in entries.iter() {
            let entry = entry.read().await;
            for reduce_id in entry.lost_partitions() {
                missing.push((map_id, reduce_id));
            }
        }
        missing.sort_unstable();
        Ok(missing)
    }

    async fn unregister_shuffle(&self, shuffle_id: u32) {
        let mut shuffles = self.shuffles.write().await;
        if shuffles.remove(&shuffle_id).is_some() {
            info!(shuffle_id, "unregistered shuffle");
        }
    }
}
