/*!
 * Timeline Engine
 * Policy state machines advancing the simulated clock
 */

use super::types::{Process, SchedulingPolicy};
use super::Scheduler;
use crate::core::types::Tick;
use log::info;
use std::collections::VecDeque;

impl Scheduler {
    /// Run the configured policy over `processes`, filling in start and
    /// finish times.
    ///
    /// Processes are ordered by (arrival, pid) first, which also fixes the
    /// report order. The workload loader guarantees well-formed input
    /// (unique pids, arrival >= 0, service > 0); the state machines assume
    /// it.
    pub fn run(&self, processes: &mut [Process]) {
        processes.sort_by_key(|p| (p.arrival, p.pid));

        info!(
            "Dispatching {} process(es) under {}",
            processes.len(),
            self.policy()
        );
        match self.policy() {
            SchedulingPolicy::Fcfs => Self::run_fcfs(processes),
            SchedulingPolicy::Spn => Self::run_spn(processes),
            SchedulingPolicy::RoundRobin => self.run_rr(processes),
        }
    }

    /// Non-preemptive arrival-order dispatch
    fn run_fcfs(processes: &mut [Process]) {
        let mut t: Tick = 0;
        for process in processes.iter_mut() {
            if t < process.arrival {
                t = process.arrival;
            }
            process.start = Some(t);
            t += process.service;
            process.finish = Some(t);
        }
    }

    /// Non-preemptive shortest-process-next.
    ///
    /// Once dispatched, a process runs to completion even if a shorter job
    /// arrives in the meantime. Ties break by earliest arrival, then lowest
    /// pid.
    fn run_spn(processes: &mut [Process]) {
        let mut t: Tick = 0;
        let mut pending: VecDeque<usize> = (0..processes.len()).collect();
        let mut ready: Vec<usize> = Vec::new();

        while !pending.is_empty() || !ready.is_empty() {
            Self::admit_arrivals(processes, &mut pending, |idx| ready.push(idx), t);
            if ready.is_empty() {
                if let Some(&next) = pending.front() {
                    // Idle CPU: jump to the next arrival
                    t = processes[next].arrival;
                }
                continue;
            }

            let mut best = 0;
            for pos in 1..ready.len() {
                let candidate = &processes[ready[pos]];
                let current = &processes[ready[best]];
                if (candidate.service, candidate.arrival, candidate.pid)
                    < (current.service, current.arrival, current.pid)
                {
                    best = pos;
                }
            }
            let idx = ready.remove(best);

            let process = &mut processes[idx];
            process.start = Some(t);
            t += process.service;
            process.finish = Some(t);
        }
    }

    /// Preemptive round-robin with fixed quantum
    fn run_rr(&self, processes: &mut [Process]) {
        let quantum = self.quantum();
        let mut t: Tick = 0;
        let mut pending: VecDeque<usize> = (0..processes.len()).collect();
        let mut ready: VecDeque<usize> = VecDeque::new();

        while !pending.is_empty() || !ready.is_empty() {
            Self::admit_arrivals(processes, &mut pending, |idx| ready.push_back(idx), t);
            let Some(idx) = ready.pop_front() else {
                if let Some(&next) = pending.front() {
                    t = processes[next].arrival;
                }
                continue;
            };

            let process = &mut processes[idx];
            if process.start.is_none() {
                process.start = Some(t);
            }
            let slice = quantum.min(process.remaining);
            t += slice;
            process.remaining -= slice;
            let finished = process.remaining == 0;

            // Processes that arrived during the slice enter the queue before
            // the preempted process is requeued.
            Self::admit_arrivals(processes, &mut pending, |idx| ready.push_back(idx), t);

            if finished {
                processes[idx].finish = Some(t);
            } else {
                ready.push_back(idx);
            }
        }
    }

    /// Move every pending process with arrival <= `t` into the ready
    /// collection, in (arrival, pid) order.
    fn admit_arrivals(
        processes: &[Process],
        pending: &mut VecDeque<usize>,
        mut admit: impl FnMut(usize),
        t: Tick,
    ) {
        while let Some(&idx) = pending.front() {
            if processes[idx].arrival > t {
                break;
            }
            pending.pop_front();
            admit(idx);
        }
    }
}
