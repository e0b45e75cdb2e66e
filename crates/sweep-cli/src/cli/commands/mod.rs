//! CLI command handlers, one per file.

mod base64;
mod json_eq;
mod list;
mod run;
mod validate_duration;

pub use base64::run_base64;
pub use json_eq::run_json_eq;
pub use list::run_list;
pub use run::run_sweep;
pub use validate_duration::run_validate_duration;
