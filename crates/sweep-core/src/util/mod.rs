//! Small helpers shared by sweepers and resource checks: base64 detection,
//! JSON comparison, duration validation and typed resource errors.

mod duration;
mod encoding;
mod json;
mod resource_error;

pub use duration::{parse_go_duration, validate_duration, DurationError, Validation};
pub use encoding::{base64_encode, is_base64_encoded};
pub use json::{json_bytes_equal, looks_like_json_string};
pub use resource_error::{is_resource_not_found_error, is_resource_timeout_error, ResourceError};
