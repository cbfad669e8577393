//! Shuffle Location Tracking Demo
//!
//! Walks through the driver-side bookkeeping for one shuffle: map tasks
//! register where their output blocks live, reduce tasks look up fetch
//! candidates, a file server becomes unreachable, and the scheduler scans
//! for the partitions that must be recomputed.

use cinder_core::{ShuffleLocation, ShuffleLocationRegistry, ShuffleLocationTracker};
use std::collections::HashMap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Cinder: Shuffle Location Tracking Demo ===\n");

    let registry = ShuffleLocationRegistry::new();
    let shuffle_id = 0;

    // Two map tasks finish and report where their blocks landed. Map task 0
    // wrote partition 0 redundantly to two servers; partition 1 lives only
    // on node-a.
    println!("1. Map tasks register their output locations:");
    let map0: HashMap<u32, Vec<ShuffleLocation>> = [
        (
            0,
            vec![
                ShuffleLocation::new("node-a", Some(7337)),
                ShuffleLocation::new("node-b", Some(7337)),
            ],
        ),
        (1, vec![ShuffleLocation::new("node-a", Some(7337))]),
    ]
    .into();
    registry
        .register_map_output(shuffle_id, 0, 2, map0)
        .await?;

    let map1: HashMap<u32, Vec<ShuffleLocation>> = [
        (0, vec![ShuffleLocation::new("node-b", Some(7337))]),
        (1, vec![ShuffleLocation::new("node-b", Some(7337))]),
    ]
    .into();
    registry
        .register_map_output(shuffle_id, 1, 2, map1)
        .await?;
    println!("   Registered map tasks 0 and 1\n");

    // A reduce task asks where to fetch from.
    println!("2. Reduce task 0 looks up fetch candidates:");
    for map_id in 0..2 {
        let locations = registry.get_map_locations(shuffle_id, map_id, 0).await?;
        let rendered: Vec<String> = locations.iter().map(|l| l.to_string()).collect();
        println!("   map task {map_id}, partition 0 -> {rendered:?}");
    }

    // node-a goes away. Partition 1 of map task 0 had no other copy.
    println!("\n3. A fetch from node-a fails and the scheduler reports it:");
    let data_loss = registry
        .report_unreachable(shuffle_id, "node-a", Some(7337))
        .await?;
    println!("   data loss detected: {data_loss}");

    println!("\n4. Scheduler scans for partitions needing recomputation:");
    let missing = registry.find_missing_partitions(shuffle_id).await?;
    for (map_id, reduce_id) in &missing {
        println!("   map task {map_id} must re-run (partition {reduce_id} unfetchable)");
    }

    // The surviving copy is still served.
    println!("\n5. Partition 0 fails over to the surviving replica:");
    let survivors = registry.get_map_locations(shuffle_id, 0, 0).await?;
    let rendered: Vec<String> = survivors.iter().map(|l| l.to_string()).collect();
    println!("   map task 0, partition 0 -> {rendered:?}");

    registry.unregister_shuffle(shuffle_id).await;
    println!("\n=== Demo complete ===");
    Ok(())
}
