//! File-backed autoscaling API used for offline sweeps and tests.
//!
//! An inventory is a TOML file listing the groups present per region:
//!
//! ```toml
//! unsupported_regions = ["us-gov-west-1"]
//!
//! [[group]]
//! name = "tf-test-a"
//! region = "us-west-2"      # optional; omitted = present in every region
//! busy_deletes = 2          # first N deletes fail with ScalingActivityInProgress
//! fail_code = "AccessDenied" # optional; every delete fails with this code
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::api::autoscaling::{AutoScalingGroup, AutoscalingApi, DeleteGroupInput};
use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("read inventory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse inventory: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryGroup {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub busy_deletes: u32,
    #[serde(default)]
    pub fail_code: Option<String>,
}

impl InventoryGroup {
    fn in_region(&self, region: &str) -> bool {
        self.region.as_deref().map_or(true, |r| r == region)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub unsupported_regions: Vec<String>,
    #[serde(default, rename = "group")]
    pub groups: Vec<InventoryGroup>,
}

impl Inventory {
    pub fn from_toml_str(data: &str) -> Result<Self, InventoryError> {
        Ok(toml::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let data = fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    /// Names of the groups visible in `region`.
    pub fn group_names(&self, region: &str) -> Vec<String> {
        self.groups
            .iter()
            .filter(|g| g.in_region(region))
            .map(|g| g.name.clone())
            .collect()
    }

    /// Wrap for sharing between per-region clients; deletions made through
    /// any client are visible to all of them.
    pub fn into_shared(self) -> Arc<Mutex<Inventory>> {
        Arc::new(Mutex::new(self))
    }
}

/// [`AutoscalingApi`] over a shared [`Inventory`], scoped to one region.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    region: String,
    state: Arc<Mutex<Inventory>>,
}

impl InventoryClient {
    pub fn new(state: Arc<Mutex<Inventory>>, region: &str) -> Self {
        Self {
            region: region.to_string(),
            state,
        }
    }
}

impl AutoscalingApi for InventoryClient {
    fn describe_groups(&self) -> Result<Vec<AutoScalingGroup>, ApiError> {
        let inv = self.state.lock().unwrap();
        if inv.unsupported_regions.iter().any(|r| *r == self.region) {
            return Err(ApiError::new(
                "UnsupportedOperation",
                format!("autoscaling is not available in {}", self.region),
            ));
        }
        Ok(inv
            .groups
            .iter()
            .filter(|g| g.in_region(&self.region))
            .map(|g| AutoScalingGroup {
                name: g.name.clone(),
                status: (g.busy_deletes > 0).then(|| "Delete in progress".to_string()),
            })
            .collect())
    }

    fn delete_group(&self, input: &DeleteGroupInput) -> Result<(), ApiError> {
        let mut inv = self.state.lock().unwrap();
        let region = &self.region;
        let idx = inv
            .groups
            .iter()
            .position(|g| g.name == input.name && g.in_region(region))
            .ok_or_else(|| {
                ApiError::new(
                    "InvalidGroup.NotFound",
                    format!("AutoScalingGroup name not found - {}", input.name),
                )
            })?;
        let group = &mut inv.groups[idx];
        if let Some(code) = &group.fail_code {
            return Err(ApiError::new(code.clone(), "delete rejected"));
        }
        if group.busy_deletes > 0 {
            group.busy_deletes -= 1;
            let code = if input.force_delete {
                "ScalingActivityInProgress"
            } else {
                "ResourceInUse"
            };
            return Err(ApiError::new(
                code,
                format!("{} has a scaling activity in progress", input.name),
            ));
        }
        inv.groups.remove(idx);
        Ok(())
    }
}
