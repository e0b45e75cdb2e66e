use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::{Backoff, ExecutionPolicy};

/// Smallest wait between delete attempts built from config. Also used for
/// `backoff = "none"`, so a busy group is never polled in a tight loop.
pub const MIN_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Shape of the wait between delete attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    None,
    Constant,
    #[default]
    Exponential,
}

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total time allowed for deleting one resource, in seconds.
    pub deadline_secs: u64,
    /// `none` retries after [`MIN_RETRY_DELAY`] rather than immediately.
    #[serde(default)]
    pub backoff: BackoffKind,
    /// First (or constant) delay in seconds, e.g. 0.5 = 500ms. Raised to
    /// [`MIN_RETRY_DELAY`] if smaller.
    pub base_delay_secs: f64,
    /// Upper bound on exponential delays, in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            deadline_secs: 300,
            backoff: BackoffKind::Exponential,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> Result<ExecutionPolicy> {
        let base = Duration::try_from_secs_f64(self.base_delay_secs)
            .with_context(|| format!("invalid base_delay_secs {}", self.base_delay_secs))?
            .max(MIN_RETRY_DELAY);
        let backoff = match self.backoff {
            BackoffKind::None => Backoff::Constant(MIN_RETRY_DELAY),
            BackoffKind::Constant => Backoff::Constant(base),
            BackoffKind::Exponential => Backoff::Exponential {
                base,
                max: Duration::from_secs(self.max_delay_secs),
            },
        };
        Ok(ExecutionPolicy::new(
            Duration::from_secs(self.deadline_secs),
            backoff,
        )?)
    }
}

/// Global configuration loaded from `~/.config/sweep/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Regions swept when `sweep run` is given no `--region`.
    pub regions: Vec<String>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            regions: vec!["us-west-2".to_string()],
            retry: None,
        }
    }
}

impl SweepConfig {
    /// Policy for resource deletion: the `[retry]` section, or defaults.
    pub fn execution_policy(&self) -> Result<ExecutionPolicy> {
        match &self.retry {
            Some(r) => r.to_policy(),
            None => Ok(ExecutionPolicy::default()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sweep")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SweepConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SweepConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SweepConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
