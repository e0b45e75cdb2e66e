//! Shared fixtures for integration tests.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sweep_core::api::autoscaling::AutoscalingApi;
use sweep_core::inventory::{Inventory, InventoryClient};
use sweep_core::retry::ExecutionPolicy;
use sweep_core::sweeper::autoscaling::ConnectFn;
use tempfile::NamedTempFile;

/// Write `contents` to a temp file and load it as an inventory.
pub fn inventory_file(contents: &str) -> (NamedTempFile, Inventory) {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    let inv = Inventory::load(f.path()).unwrap();
    (f, inv)
}

/// Connector handing out region-scoped clients over one shared inventory.
pub fn connector(state: &Arc<Mutex<Inventory>>) -> ConnectFn {
    let state = Arc::clone(state);
    Box::new(move |region: &str| {
        Ok::<_, anyhow::Error>(
            Box::new(InventoryClient::new(Arc::clone(&state), region)) as Box<dyn AutoscalingApi>
        )
    })
}

pub fn fast_policy(deadline_ms: u64) -> ExecutionPolicy {
    ExecutionPolicy::constant(Duration::from_millis(deadline_ms), Duration::from_millis(5)).unwrap()
}
