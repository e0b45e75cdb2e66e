//! Sweeper for leftover autoscaling groups.

use anyhow::{Context, Result};

use super::{SweepReport, Sweeper};
use crate::api::autoscaling::{classify_delete, AutoscalingApi, DeleteGroupInput};
use crate::api::is_skip_sweep_error;
use crate::retry::{self, ExecutionPolicy};

pub const AUTOSCALING_GROUP_SWEEPER: &str = "aws_autoscaling_group";

/// Builds an autoscaling client for a region.
pub type ConnectFn = Box<dyn Fn(&str) -> Result<Box<dyn AutoscalingApi>>>;

/// Force-deletes every autoscaling group in the region, retrying while the
/// group is busy.
pub struct AutoscalingGroupSweeper {
    connect: ConnectFn,
    policy: ExecutionPolicy,
    dependencies: Vec<String>,
}

impl AutoscalingGroupSweeper {
    pub fn new(connect: ConnectFn, policy: ExecutionPolicy) -> Self {
        Self {
            connect,
            policy,
            dependencies: Vec::new(),
        }
    }
}

impl Sweeper for AutoscalingGroupSweeper {
    fn name(&self) -> &str {
        AUTOSCALING_GROUP_SWEEPER
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    fn sweep(&self, region: &str) -> Result<SweepReport> {
        let api = (self.connect)(region).context("error getting client")?;
        sweep_autoscaling_groups(api.as_ref(), region, &self.policy)
    }
}

/// List all groups in `region` and force-delete each one under `policy`.
///
/// A listing error that means the API is unavailable in this region skips the
/// sweep. The first group that cannot be deleted aborts the sweep.
pub fn sweep_autoscaling_groups(
    api: &dyn AutoscalingApi,
    region: &str,
    policy: &ExecutionPolicy,
) -> Result<SweepReport> {
    let groups = match api.describe_groups() {
        Ok(groups) => groups,
        Err(e) if is_skip_sweep_error(&e) => {
            tracing::warn!("skipping autoscaling group sweep for {}: {}", region, e);
            return Ok(SweepReport::skipped());
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context("Error retrieving AutoScaling Groups in Sweeper"))
        }
    };

    let mut report = SweepReport::default();
    if groups.is_empty() {
        tracing::debug!("no autoscaling groups to sweep in {}", region);
        return Ok(report);
    }

    for group in groups {
        tracing::debug!(
            group = %group.name,
            status = group.status.as_deref().unwrap_or("-"),
            "deleting autoscaling group"
        );
        let input = DeleteGroupInput {
            name: group.name,
            force_delete: true,
        };
        let outcome = retry::execute(policy, || api.delete_group(&input), classify_delete)
            .with_context(|| format!("deleting autoscaling group {}", input.name))?;
        if outcome.is_absorbed() {
            tracing::debug!(group = %input.name, "autoscaling group already gone");
        } else {
            tracing::info!(group = %input.name, region, "deleted autoscaling group");
        }
        report.deleted.push(input.name);
    }
    Ok(report)
}

/// Fails if any of `names` is still present in the region.
pub fn check_destroyed(api: &dyn AutoscalingApi, names: &[String]) -> Result<()> {
    let groups = api
        .describe_groups()
        .context("describing autoscaling groups")?;
    if let Some(left) = groups.iter().find(|g| names.contains(&g.name)) {
        anyhow::bail!("AutoScaling Group still exists: {}", left.name);
    }
    Ok(())
}
