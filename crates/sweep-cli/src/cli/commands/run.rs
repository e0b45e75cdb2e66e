//! `sweep run` – sweep one or more regions described by an inventory file.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use sweep_core::api::autoscaling::AutoscalingApi;
use sweep_core::config::SweepConfig;
use sweep_core::inventory::{Inventory, InventoryClient};
use sweep_core::sweeper::{self, check_destroyed, run_sweepers};

pub fn run_sweep(
    cfg: &SweepConfig,
    inventory_path: &Path,
    regions: &[String],
    only: &[String],
) -> Result<()> {
    let regions = if regions.is_empty() {
        cfg.regions.as_slice()
    } else {
        regions
    };
    if regions.is_empty() {
        anyhow::bail!("no regions given and none configured");
    }

    let inventory = Inventory::load(inventory_path)
        .with_context(|| format!("load inventory {}", inventory_path.display()))?;
    let state = inventory.into_shared();
    let connect_state = Arc::clone(&state);
    let registry = sweeper::default_registry(
        Box::new(move |region: &str| {
            Ok::<_, anyhow::Error>(Box::new(InventoryClient::new(
                Arc::clone(&connect_state),
                region,
            )) as Box<dyn AutoscalingApi>)
        }),
        cfg.execution_policy()?,
    );

    for region in regions {
        let reports = run_sweepers(&registry, region, only)?;
        for (name, report) in reports {
            if report.skipped {
                println!("{}: {} skipped", region, name);
            } else {
                println!(
                    "{}: {} deleted {} resource(s)",
                    region,
                    name,
                    report.deleted.len()
                );
                for resource in &report.deleted {
                    println!("  - {}", resource);
                }
                let client = InventoryClient::new(Arc::clone(&state), region);
                check_destroyed(&client, &report.deleted)
                    .with_context(|| format!("{} left resources behind in {}", name, region))?;
            }
        }
    }
    Ok(())
}
