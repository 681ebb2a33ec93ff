/*!
 * CPU Scheduler
 * Deterministic single-core timeline engine with FCFS, SPN, and
 * round-robin policies
 */

mod timeline;
mod types;

pub use types::{Process, SchedulingPolicy};

use crate::core::types::Tick;
use log::info;

/// Default round-robin quantum, in ticks
pub const DEFAULT_QUANTUM: Tick = 4;

/// CPU scheduler.
///
/// Owns the policy selection and the round-robin quantum. The simulated
/// clock lives inside [`Scheduler::run`], so independent runs do not
/// interfere.
#[derive(Debug, Clone)]
pub struct Scheduler {
    policy: SchedulingPolicy,
    quantum: Tick,
}

impl Scheduler {
    /// Create a scheduler with the default quantum
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self::with_quantum(policy, DEFAULT_QUANTUM)
    }

    /// Create a scheduler with a custom quantum (used by round-robin only)
    pub fn with_quantum(policy: SchedulingPolicy, quantum: Tick) -> Self {
        info!(
            "Scheduler initialized: policy={}, quantum={}",
            policy, quantum
        );
        Self { policy, quantum }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn quantum(&self) -> Tick {
        self.quantum
    }
}
