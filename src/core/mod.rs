/*!
 * Core Module
 * Shared types and the load-time error taxonomy
 */

pub mod errors;
pub mod types;

pub use errors::{ConfigError, LoadError, WorkloadError};
pub use types::{Address, Pid, Size, Tick};
