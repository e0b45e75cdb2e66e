//! Deadline-bounded retry executor.
//!
//! The executor runs a caller-supplied operation until it succeeds, a
//! classifier marks a failure as permanent (or as already satisfied), or the
//! policy deadline runs out. Classification is delegated entirely to the
//! caller so that the loop stays independent of any particular API's error
//! taxonomy.

mod classify;
mod error;
mod policy;
mod run;
mod run_async;

pub use classify::{Classify, Disposition};
pub use error::{Completion, ExecutionError, ExecutionResult};
pub use policy::{Backoff, ExecutionPolicy, PolicyError};
pub use run::{execute, execute_with_abort};
pub use run_async::execute_async;
