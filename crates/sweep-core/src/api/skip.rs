//! Errors that mean "this region cannot be swept", not "the sweep failed".

use super::ApiError;

/// (code, message fragment) pairs for regions or accounts where the API is
/// missing or unsupported. An empty fragment matches any message.
const SKIP_SWEEP_ERRORS: &[(&str, &str)] = &[
    // Missing API endpoint.
    ("RequestError", "send request failed"),
    ("UnsupportedOperation", ""),
    (
        "InvalidParameterValue",
        "not permitted in this API version for your account",
    ),
    ("InvalidParameterValue", "Access Denied to API Version"),
    // GovCloud endpoints that reject the action outright.
    ("InvalidAction", "is not valid"),
];

/// Returns true when a listing error should skip the sweep for this region.
pub fn is_skip_sweep_error(err: &ApiError) -> bool {
    SKIP_SWEEP_ERRORS
        .iter()
        .any(|(code, fragment)| err.matches(code, fragment))
}
