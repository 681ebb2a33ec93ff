/*!
 * Result Reporting
 * Schedule metrics and plain-text tables for finished runs
 */

use crate::core::types::Tick;
use crate::memory::{MemoryArena, MemoryRequest, PlacementStrategy};
use crate::scheduler::Process;
use serde::Serialize;
use std::fmt::Write;

/// Aggregate schedule metrics over finished processes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleMetrics {
    pub avg_response: f64,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    /// Largest finish time across all processes
    pub makespan: Tick,
    /// Finished processes per tick; `None` when the makespan is zero
    pub throughput: Option<f64>,
}

impl ScheduleMetrics {
    /// Compute metrics over the finished processes in `processes`.
    ///
    /// Returns `None` when nothing finished. Values are exact f64 ratios;
    /// rounding is left to the renderer.
    pub fn compute(processes: &[Process]) -> Option<Self> {
        let mut n: u32 = 0;
        let (mut response, mut waiting, mut turnaround) = (0.0, 0.0, 0.0);
        let mut makespan: Tick = 0;
        for process in processes {
            let (Some(r), Some(w), Some(tr), Some(f)) = (
                process.response(),
                process.waiting(),
                process.turnaround(),
                process.finish,
            ) else {
                continue;
            };
            n += 1;
            response += r as f64;
            waiting += w as f64;
            turnaround += tr as f64;
            makespan = makespan.max(f);
        }
        if n == 0 {
            return None;
        }
        let count = f64::from(n);
        Some(Self {
            avg_response: response / count,
            avg_waiting: waiting / count,
            avg_turnaround: turnaround / count,
            makespan,
            throughput: (makespan > 0).then(|| count / makespan as f64),
        })
    }
}

/// Render the per-process timing table
pub fn process_table(processes: &[Process]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "PID | Arrival | Service | Start | Finish | Response | Waiting | Turnaround"
    );
    let _ = writeln!(
        out,
        "----+---------+---------+-------+--------+----------+---------+-----------"
    );
    for p in processes {
        let _ = writeln!(
            out,
            "{:>3} | {:>7} | {:>7} | {:>5} | {:>6} | {:>8} | {:>7} | {:>10}",
            p.pid,
            p.arrival,
            p.service,
            fmt_tick(p.start),
            fmt_tick(p.finish),
            fmt_tick(p.response()),
            fmt_tick(p.waiting()),
            fmt_tick(p.turnaround()),
        );
    }
    out
}

/// Render averages and throughput
pub fn metrics_summary(metrics: &ScheduleMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Average response   = {:.2}", metrics.avg_response);
    let _ = writeln!(out, "Average waiting    = {:.2}", metrics.avg_waiting);
    let _ = writeln!(out, "Average turnaround = {:.2}", metrics.avg_turnaround);
    match metrics.throughput {
        Some(tp) => {
            let _ = writeln!(out, "Throughput         = {:.2} processes/tick", tp);
        }
        None => {
            let _ = writeln!(out, "Throughput         = n/a");
        }
    }
    out
}

/// Render the block layout and request resolution tables
pub fn memory_report(
    arena: &MemoryArena,
    strategy: PlacementStrategy,
    requests: &[MemoryRequest],
) -> String {
    let stats = arena.stats();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total memory: {} bytes. Strategy: {}",
        arena.total_size(),
        strategy
    );
    let _ = writeln!(
        out,
        "Used: {} bytes in {} block(s), free: {} bytes in {} block(s), largest free: {} bytes",
        stats.used, stats.allocated_blocks, stats.free, stats.free_blocks, stats.largest_free
    );
    let _ = writeln!(out, "Blocks (id | offset | size | free | pid):");
    for view in arena.layout() {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {}",
            view.id,
            view.offset,
            view.size,
            if view.free { "yes" } else { "no" },
            view.owner.map_or_else(|| "-".to_string(), |p| p.to_string()),
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Memory requests (pid | size | block):");
    for request in requests {
        let _ = writeln!(
            out,
            "{} | {} | {}",
            request.pid,
            request.size,
            request
                .block
                .map_or_else(|| "-".to_string(), |b| b.to_string()),
        );
    }
    out
}

fn fmt_tick(value: Option<Tick>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
