//! Autoscaling-group API seam and its error codes.

use super::ApiError;
use crate::retry::Disposition;

/// Error codes the autoscaling API is known to return for group deletion.
///
/// Transient: `ResourceInUse`, `ScalingActivityInProgress` (instances still
/// terminating, or a scaling activity is running). Already satisfied:
/// `InvalidGroup.NotFound`. Everything else is treated as terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoscalingErrorCode {
    ResourceInUse,
    ScalingActivityInProgress,
    InvalidGroupNotFound,
    Other(String),
}

impl AutoscalingErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "ResourceInUse" => Self::ResourceInUse,
            "ScalingActivityInProgress" => Self::ScalingActivityInProgress,
            "InvalidGroup.NotFound" => Self::InvalidGroupNotFound,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ResourceInUse => "ResourceInUse",
            Self::ScalingActivityInProgress => "ScalingActivityInProgress",
            Self::InvalidGroupNotFound => "InvalidGroup.NotFound",
            Self::Other(code) => code,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ResourceInUse | Self::ScalingActivityInProgress)
    }
}

impl ApiError {
    pub fn autoscaling_code(&self) -> AutoscalingErrorCode {
        AutoscalingErrorCode::parse(&self.code)
    }
}

/// Classifier for `DeleteAutoScalingGroup` failures.
pub fn classify_delete(err: &ApiError) -> Disposition {
    match err.autoscaling_code() {
        AutoscalingErrorCode::InvalidGroupNotFound => Disposition::Success,
        code if code.is_transient() => Disposition::Retryable,
        _ => Disposition::Permanent,
    }
}

/// One autoscaling group as returned by a describe call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoScalingGroup {
    pub name: String,
    /// Set while the group is being torn down (e.g. "Delete in progress").
    pub status: Option<String>,
}

/// Parameters for deleting one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteGroupInput {
    pub name: String,
    /// Delete even if instances are still attached.
    pub force_delete: bool,
}

/// Client for the autoscaling API in one region.
pub trait AutoscalingApi {
    /// List every group visible in the region.
    fn describe_groups(&self) -> Result<Vec<AutoScalingGroup>, ApiError>;

    fn delete_group(&self, input: &DeleteGroupInput) -> Result<(), ApiError>;
}
