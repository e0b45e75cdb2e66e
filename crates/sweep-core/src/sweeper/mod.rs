//! Cleanup routines ("sweepers") that remove leftover cloud resources in a region.
//!
//! Sweepers are registered on an explicit [`SweeperRegistry`] built at process
//! start and handed to [`run_sweepers`], which runs them in dependency order.

pub mod autoscaling;
mod registry;

pub use autoscaling::{check_destroyed, sweep_autoscaling_groups, AutoscalingGroupSweeper};
pub use registry::{run_sweepers, RegistryError, SweeperRegistry};

use anyhow::Result;

use crate::retry::ExecutionPolicy;
use autoscaling::ConnectFn;

/// Registry with every built-in sweeper, each connecting through `connect`.
pub fn default_registry(connect: ConnectFn, policy: ExecutionPolicy) -> SweeperRegistry {
    let mut registry = SweeperRegistry::new();
    // Fresh registry; names cannot collide.
    let _ = registry.register(Box::new(AutoscalingGroupSweeper::new(connect, policy)));
    registry
}

/// One named cleanup routine.
pub trait Sweeper {
    /// Unique name, conventionally the resource type (e.g. `aws_autoscaling_group`).
    fn name(&self) -> &str;

    /// Names of sweepers that must run before this one.
    fn dependencies(&self) -> &[String] {
        &[]
    }

    /// Remove this sweeper's resources from `region`.
    fn sweep(&self, region: &str) -> Result<SweepReport>;
}

/// What one sweeper did in one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Resources deleted (or found already gone).
    pub deleted: Vec<String>,
    /// True when the region does not support the API and the sweep was skipped.
    pub skipped: bool,
}

impl SweepReport {
    pub fn skipped() -> Self {
        Self {
            deleted: Vec::new(),
            skipped: true,
        }
    }
}
