/*!
 * Workload Configuration
 * JSON workload loading and load-time validation
 */

use crate::core::errors::{ConfigError, LoadError, WorkloadError};
use crate::core::types::{Pid, Size, Tick};
use crate::memory::{MemoryRequest, PlacementStrategy};
use crate::scheduler::{Process, SchedulingPolicy, DEFAULT_QUANTUM};
use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Raw on-disk workload description.
///
/// Numeric fields stay signed here so range violations surface as the
/// dedicated workload errors instead of opaque serde errors.
#[derive(Debug, Deserialize)]
struct RawConfig {
    cpu: RawCpu,
    memory: RawMemory,
    processes: Vec<RawProcess>,
    #[serde(default)]
    requests: Vec<RawRequest>,
}

#[derive(Debug, Deserialize)]
struct RawCpu {
    policy: String,
    quantum: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawMemory {
    size: i64,
    strategy: String,
}

#[derive(Debug, Deserialize)]
struct RawProcess {
    pid: i64,
    arrival: i64,
    service: i64,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    pid: i64,
    size: i64,
}

/// Validated simulation workload
#[derive(Debug, Clone)]
pub struct Workload {
    pub policy: SchedulingPolicy,
    pub quantum: Tick,
    pub processes: Vec<Process>,
    pub strategy: PlacementStrategy,
    pub memory_size: Size,
    pub requests: Vec<MemoryRequest>,
}

/// Load and validate a workload description from a JSON file
pub fn load_workload(path: impl AsRef<Path>) -> Result<Workload, LoadError> {
    let text = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
    let raw: RawConfig = serde_json::from_str(&text).map_err(ConfigError::Parse)?;
    let workload = validate(raw)?;
    info!(
        "Loaded workload: {} process(es), {} memory request(s), policy={}, strategy={}",
        workload.processes.len(),
        workload.requests.len(),
        workload.policy,
        workload.strategy
    );
    Ok(workload)
}

fn validate(raw: RawConfig) -> Result<Workload, LoadError> {
    let policy = SchedulingPolicy::from_str(&raw.cpu.policy)
        .map_err(|_| ConfigError::UnknownPolicy(raw.cpu.policy.clone()))?;

    let quantum = match raw.cpu.quantum {
        Some(q) if q > 0 => q as Tick,
        Some(q) if policy == SchedulingPolicy::RoundRobin => {
            return Err(ConfigError::InvalidQuantum(q).into());
        }
        // Absent, or present but ignored by a non-preemptive policy
        _ => DEFAULT_QUANTUM,
    };

    let strategy = PlacementStrategy::from_str(&raw.memory.strategy)
        .map_err(|_| ConfigError::UnknownStrategy(raw.memory.strategy.clone()))?;

    if raw.memory.size <= 0 {
        return Err(ConfigError::InvalidMemorySize(raw.memory.size).into());
    }
    let memory_size = raw.memory.size as Size;

    let mut seen: HashSet<Pid> = HashSet::with_capacity(raw.processes.len());
    let mut processes = Vec::with_capacity(raw.processes.len());
    for p in &raw.processes {
        let pid = validate_pid(p.pid)?;
        if !seen.insert(pid) {
            return Err(WorkloadError::DuplicatePid(pid).into());
        }
        if p.arrival < 0 {
            return Err(WorkloadError::NegativeArrival {
                pid,
                arrival: p.arrival,
            }
            .into());
        }
        if p.service <= 0 {
            return Err(WorkloadError::InvalidService {
                pid,
                service: p.service,
            }
            .into());
        }
        processes.push(Process::new(pid, p.arrival as Tick, p.service as Tick));
    }

    // Request pids need not reference a scheduled process, but must still be
    // representable.
    let mut requests = Vec::with_capacity(raw.requests.len());
    for r in &raw.requests {
        let pid = validate_pid(r.pid)?;
        if r.size <= 0 {
            return Err(WorkloadError::InvalidRequestSize { pid, size: r.size }.into());
        }
        requests.push(MemoryRequest::new(pid, r.size as Size));
    }

    Ok(Workload {
        policy,
        quantum,
        processes,
        strategy,
        memory_size,
        requests,
    })
}

fn validate_pid(pid: i64) -> Result<Pid, WorkloadError> {
    Pid::try_from(pid).map_err(|_| WorkloadError::InvalidPid(pid))
}
