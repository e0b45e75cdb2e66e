//! `sweep list` – show registered sweepers.

use anyhow::Result;
use sweep_core::api::autoscaling::AutoscalingApi;
use sweep_core::config::SweepConfig;
use sweep_core::sweeper;

pub fn run_list(cfg: &SweepConfig) -> Result<()> {
    // Listing never connects, so the connector only has to exist.
    let registry = sweeper::default_registry(
        Box::new(|region: &str| -> Result<Box<dyn AutoscalingApi>> {
            anyhow::bail!("no client for {}: listing only", region)
        }),
        cfg.execution_policy()?,
    );
    for s in registry.plan(&[])? {
        if s.dependencies().is_empty() {
            println!("{}", s.name());
        } else {
            println!("{} (after {})", s.name(), s.dependencies().join(", "));
        }
    }
    Ok(())
}
