/*!
 * Error Types
 * Load-time error taxonomy with thiserror and miette support
 */

use crate::core::types::Pid;
use miette::Diagnostic;
use thiserror::Error;

/// Configuration errors: the workload file itself is unusable.
///
/// All of these are fatal and abort the run before any simulation starts.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read workload file: {0}")]
    #[diagnostic(
        code(config::unreadable),
        help("Check that the path exists and is readable.")
    )]
    Io(#[from] std::io::Error),

    #[error("Malformed workload JSON: {0}")]
    #[diagnostic(
        code(config::malformed),
        help("The workload file must be a JSON object with cpu, memory, and processes sections.")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Unknown scheduling policy '{0}'")]
    #[diagnostic(
        code(config::unknown_policy),
        help("Use FCFS, SPN (or SJF), or RR.")
    )]
    UnknownPolicy(String),

    #[error("Unknown placement strategy '{0}'")]
    #[diagnostic(
        code(config::unknown_strategy),
        help("Use first-fit, best-fit, worst-fit, or next-fit.")
    )]
    UnknownStrategy(String),

    #[error("Round-robin quantum must be positive, got {0}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("Set cpu.quantum to an integer greater than zero.")
    )]
    InvalidQuantum(i64),

    #[error("Total memory size must be positive, got {0}")]
    #[diagnostic(
        code(config::invalid_memory_size),
        help("Set memory.size to an integer greater than zero.")
    )]
    InvalidMemorySize(i64),
}

/// Workload errors: the file parsed but describes an ill-formed simulation.
///
/// Rejected at load time; malformed input never reaches the scheduler or the
/// allocator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum WorkloadError {
    #[error("Pid {0} does not fit an unsigned 32-bit integer")]
    #[diagnostic(code(workload::invalid_pid))]
    InvalidPid(i64),

    #[error("Duplicate pid {0} in process list")]
    #[diagnostic(
        code(workload::duplicate_pid),
        help("Every process needs a unique pid.")
    )]
    DuplicatePid(Pid),

    #[error("Process {pid} has negative arrival time {arrival}")]
    #[diagnostic(code(workload::negative_arrival))]
    NegativeArrival { pid: Pid, arrival: i64 },

    #[error("Process {pid} has non-positive service time {service}")]
    #[diagnostic(
        code(workload::invalid_service),
        help("Service time is total CPU demand and must exceed zero.")
    )]
    InvalidService { pid: Pid, service: i64 },

    #[error("Memory request for pid {pid} has non-positive size {size}")]
    #[diagnostic(code(workload::invalid_request_size))]
    InvalidRequestSize { pid: Pid, size: i64 },
}

/// Any error surfaced while loading a workload, before simulation starts
#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Workload(#[from] WorkloadError),
}
