/*!
 * OS Simulator - Main Entry Point
 *
 * Loads a JSON workload, runs the one-shot memory allocation pass and the
 * CPU scheduling timeline, then prints the result tables.
 */

use std::error::Error;

use log::info;
use os_sim::{assign_requests, load_workload, report, MemoryArena, ScheduleMetrics, Scheduler};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    info!("Loading workload from {}", config_path);

    let mut workload = load_workload(&config_path)?;

    // Memory: single allocation pass, in workload order
    let mut arena = MemoryArena::new(workload.memory_size);
    assign_requests(&mut arena, workload.strategy, &mut workload.requests);

    // CPU: run the timeline
    let scheduler = Scheduler::with_quantum(workload.policy, workload.quantum);
    scheduler.run(&mut workload.processes);

    println!("{}", report::process_table(&workload.processes));
    match ScheduleMetrics::compute(&workload.processes) {
        Some(metrics) => println!("{}", report::metrics_summary(&metrics)),
        None => println!("No process finished; no schedule metrics."),
    }
    println!(
        "{}",
        report::memory_report(&arena, workload.strategy, &workload.requests)
    );

    Ok(())
}
