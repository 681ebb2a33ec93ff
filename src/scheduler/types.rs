/*!
 * Scheduler Types
 * Scheduling policies and the simulated process record
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingPolicy {
    /// First-come-first-served, non-preemptive
    Fcfs,
    /// Shortest-process-next, non-preemptive
    Spn,
    /// Round-robin with fixed time quantum, preemptive
    RoundRobin,
}

impl SchedulingPolicy {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "spn" | "sjf" => Ok(Self::Spn),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(format!("Invalid policy '{}'. Valid: FCFS, SPN, RR", s)),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Spn => "SPN",
            Self::RoundRobin => "RR",
        }
    }
}

impl std::fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A simulated process.
///
/// `start` is set exactly once at first dispatch and `finish` once at
/// completion; both stay `None` until then. `remaining` is mutated only by
/// round-robin slicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival: Tick,
    pub service: Tick,
    pub remaining: Tick,
    pub start: Option<Tick>,
    pub finish: Option<Tick>,
}

impl Process {
    pub fn new(pid: Pid, arrival: Tick, service: Tick) -> Self {
        Self {
            pid,
            arrival,
            service,
            remaining: service,
            start: None,
            finish: None,
        }
    }

    /// Ticks between arrival and first dispatch
    pub fn response(&self) -> Option<Tick> {
        self.start.map(|s| s - self.arrival)
    }

    /// Ticks spent off the CPU between arrival and completion
    pub fn waiting(&self) -> Option<Tick> {
        self.finish.map(|f| f - self.arrival - self.service)
    }

    /// Ticks between arrival and completion
    pub fn turnaround(&self) -> Option<Tick> {
        self.finish.map(|f| f - self.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            SchedulingPolicy::from_str("FCFS").unwrap(),
            SchedulingPolicy::Fcfs
        );
        assert_eq!(
            SchedulingPolicy::from_str("sjf").unwrap(),
            SchedulingPolicy::Spn
        );
        assert_eq!(
            SchedulingPolicy::from_str("rr").unwrap(),
            SchedulingPolicy::RoundRobin
        );
        assert!(SchedulingPolicy::from_str("lottery").is_err());
    }

    #[test]
    fn test_derived_metrics() {
        let mut p = Process::new(1, 2, 5);
        assert_eq!(p.response(), None);
        p.start = Some(4);
        p.finish = Some(12);
        assert_eq!(p.response(), Some(2));
        assert_eq!(p.waiting(), Some(5));
        assert_eq!(p.turnaround(), Some(10));
    }
}
