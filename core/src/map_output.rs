//! Per-map-task shuffle output bookkeeping.

use crate::location::ShuffleLocation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where one map task's output blocks live, keyed by reduce partition.
///
/// Created once when a map task reports completion and mutated only by
/// location removal afterwards. A re-run of the same logical map task
/// registers a fresh instance; the registry replaces, it never merges
/// attempts.
///
/// Each partition maps to an ordered, preferred-first list of candidate
/// locations. Redundant-write configurations register more than one
/// location per partition; a partition whose list drains to empty is lost
/// for this map task and requires upstream re-execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapOutputLocations {
    map_id: u32,
    num_partitions: u32,
    partition_locations: HashMap<u32, Vec<ShuffleLocation>>,
}

impl MapOutputLocations {
    /// Build the entry for one completed map task. Partition ids must lie
    /// in `[0, num_partitions)`; the registry validates before calling.
    pub fn new(
        map_id: u32,
        num_partitions: u32,
        partition_locations: HashMap<u32, Vec<ShuffleLocation>>,
    ) -> Self {
        Self {
            map_id,
            num_partitions,
            partition_locations,
        }
    }

    pub fn map_id(&self) -> u32 {
        self.map_id
    }

    pub fn num_partitions(&self) -> u32 {
        self.num_partitions
    }

    /// Current candidate locations for a reduce partition, preferred first.
    ///
    /// Empty both for a partition that has lost every location and for one
    /// this map task never registered; `has_partition` tells them apart.
    pub fn locations_for(&self, reduce_id: u32) -> &[ShuffleLocation] {
        self.partition_locations
            .get(&reduce_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether this map task registered output for the given partition,
    /// regardless of how many locations survive.
    pub fn has_partition(&self, reduce_id: u32) -> bool {
        self.partition_locations.contains_key(&reduce_id)
    }

    /// Drop every record matching `(host, port)` across all partitions.
    ///
    /// Returns the reduce partitions that went from at least one location
    /// to none in this call, sorted. An empty return means every affected
    /// partition still has an alternative location.
    pub fn remove_location(&mut self, host: &str, port: Option<u16>) -> Vec<u32> {
        let mut newly_lost = Vec::new();
        for (&reduce_id, locations) in self.partition_locations.iter_mut() {
            if locations.is_empty() {
                continue;
            }
            locations.retain(|location| !location.is_at(host, port));
            if locations.is_empty() {
                newly_lost.push(reduce_id);
            }
        }
        newly_lost.sort_unstable();
        newly_lost
    }

    /// Partitions registered by this map task that have no surviving
    /// location, sorted.
    pub fn lost_partitions(&self) -> Vec<u32> {
        let mut lost: Vec<u32> = self
            .partition_locations
            .iter()
            .filter(|(_, locations)| locations.is_empty())
            .map(|(&reduce_id, _)| reduce_id)
            .collect();
        lost.sort_unstable();
        lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with(partitions: Vec<(u32, Vec<ShuffleLocation>)>) -> MapOutputLocations {
        MapOutputLocations::new(0, 4, partitions.into_iter().collect())
    }

    #[test]
    fn test_locations_for_preserves_order() {
        let entry = entry_with(vec![(
            0,
            vec![
                ShuffleLocation::new("h1", Some(100)),
                ShuffleLocation::new("h2", Some(200)),
            ],
        )]);

        let locations = entry.locations_for(0);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].host, "h1");
        assert_eq!(locations[1].host, "h2");
    }

    #[test]
    fn test_unregistered_partition_is_empty_not_an_error() {
        let entry = entry_with(vec![(0, vec![ShuffleLocation::new("h1", Some(100))])]);

        assert!(entry.locations_for(3).is_empty());
        assert!(entry.has_partition(0));
        assert!(!entry.has_partition(3));
    }

    #[test]
    fn test_remove_location_reports_newly_lost_partitions() {
        let mut entry = entry_with(vec![
            (
                0,
                vec![
                    ShuffleLocation::new("h1", Some(100)),
                    ShuffleLocation::new("h2", Some(200)),
                ],
            ),
            (1, vec![ShuffleLocation::new("h1", Some(100))]),
        ]);

        let lost = entry.remove_location("h1", Some(100));
        assert_eq!(lost, vec![1]);

        // Partition 0 survives on h2, partition 1 is lost but still known.
        assert_eq!(entry.locations_for(0).len(), 1);
        assert_eq!(entry.locations_for(0)[0].host, "h2");
        assert!(entry.locations_for(1).is_empty());
        assert!(entry.has_partition(1));
        assert_eq!(entry.lost_partitions(), vec![1]);
    }

    #[test]
    fn test_remove_location_matches_port_exactly() {
        let mut entry = entry_with(vec![(
            0,
            vec![
                ShuffleLocation::new("h1", Some(100)),
                ShuffleLocation::new("h1", None),
            ],
        )]);

        // Removing the implicit-port record leaves the concrete-port one.
        let lost = entry.remove_location("h1", None);
        assert!(lost.is_empty());
        assert_eq!(entry.locations_for(0), [ShuffleLocation::new("h1", Some(100))]);
    }

    #[test]
    fn test_remove_location_with_no_match_removes_nothing() {
        let mut entry = entry_with(vec![(0, vec![ShuffleLocation::new("h1", Some(100))])]);

        let lost = entry.remove_location("elsewhere", Some(100));
        assert!(lost.is_empty());
        assert_eq!(entry.locations_for(0).len(), 1);
    }

    #[test]
    fn test_already_lost_partition_is_not_reported_again() {
        let mut entry = entry_with(vec![(1, vec![ShuffleLocation::new("h1", Some(100))])]);

        assert_eq!(entry.remove_location("h1", Some(100)), vec![1]);
        // Second removal for the same server finds nothing to transition.
        assert!(entry.remove_location("h1", Some(100)).is_empty());
        assert_eq!(entry.lost_partitions(), vec![1]);
    }
}
