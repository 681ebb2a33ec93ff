/*!
 * Simulation Tests
 * End-to-end JSON workload runs and load-time rejection
 */

use os_sim::{
    assign_requests, load_workload, report, ConfigError, LoadError, MemoryArena, Process,
    ScheduleMetrics, Scheduler, SchedulingPolicy, WorkloadError,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn workload_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_end_to_end_fcfs_run() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "FCFS" },
            "memory": { "size": 1000, "strategy": "best-fit" },
            "processes": [
                { "pid": 1, "arrival": 0, "service": 5 },
                { "pid": 2, "arrival": 1, "service": 3 }
            ],
            "requests": [
                { "pid": 1, "size": 300 },
                { "pid": 2, "size": 900 }
            ]
        }"#,
    );

    let mut workload = load_workload(file.path()).unwrap();
    assert_eq!(workload.policy, SchedulingPolicy::Fcfs);

    let mut arena = MemoryArena::new(workload.memory_size);
    assign_requests(&mut arena, workload.strategy, &mut workload.requests);
    assert_eq!(workload.requests[0].block, Some(0));
    // 900 bytes no longer fit after the first placement.
    assert_eq!(workload.requests[1].block, None);

    let scheduler = Scheduler::with_quantum(workload.policy, workload.quantum);
    scheduler.run(&mut workload.processes);

    let metrics = ScheduleMetrics::compute(&workload.processes).unwrap();
    assert_eq!(metrics.makespan, 8);
    assert_eq!(metrics.throughput, Some(0.25));
    assert_eq!(metrics.avg_response, (0.0 + 4.0) / 2.0);
    assert_eq!(metrics.avg_turnaround, (5.0 + 7.0) / 2.0);
}

#[test]
fn test_end_to_end_round_robin_run() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "RR", "quantum": 4 },
            "memory": { "size": 100, "strategy": "first-fit" },
            "processes": [
                { "pid": 1, "arrival": 0, "service": 5 },
                { "pid": 2, "arrival": 1, "service": 3 }
            ]
        }"#,
    );

    let mut workload = load_workload(file.path()).unwrap();
    Scheduler::with_quantum(workload.policy, workload.quantum).run(&mut workload.processes);

    assert_eq!(workload.processes[0].finish, Some(8));
    assert_eq!(workload.processes[1].finish, Some(7));
}

#[test]
fn test_report_renders_all_sections() {
    let mut processes = vec![Process::new(1, 0, 2)];
    Scheduler::new(SchedulingPolicy::Fcfs).run(&mut processes);

    let mut arena = MemoryArena::new(64);
    let mut requests = vec![os_sim::MemoryRequest::new(1, 16)];
    assign_requests(&mut arena, os_sim::PlacementStrategy::FirstFit, &mut requests);

    let table = report::process_table(&processes);
    assert!(table.contains("PID | Arrival"));
    assert!(table.contains("  1 |"));

    let metrics = ScheduleMetrics::compute(&processes).unwrap();
    let summary = report::metrics_summary(&metrics);
    assert!(summary.contains("Throughput"));

    let memory = report::memory_report(&arena, os_sim::PlacementStrategy::FirstFit, &requests);
    assert!(memory.contains("Total memory: 64 bytes. Strategy: first-fit"));
    assert!(memory.contains("Blocks (id | offset | size | free | pid):"));
    assert!(memory.contains("Memory requests (pid | size | block):"));
}

#[test]
fn test_unknown_policy_rejected() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "lottery" },
            "memory": { "size": 100, "strategy": "first-fit" },
            "processes": []
        }"#,
    );
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Config(ConfigError::UnknownPolicy(_)))
    ));
}

#[test]
fn test_unknown_strategy_rejected() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "FCFS" },
            "memory": { "size": 100, "strategy": "buddy" },
            "processes": []
        }"#,
    );
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Config(ConfigError::UnknownStrategy(_)))
    ));
}

#[test]
fn test_non_positive_quantum_rejected_for_rr() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "RR", "quantum": -2 },
            "memory": { "size": 100, "strategy": "first-fit" },
            "processes": []
        }"#,
    );
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Config(ConfigError::InvalidQuantum(-2)))
    ));
}

#[test]
fn test_non_positive_memory_size_rejected() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "FCFS" },
            "memory": { "size": 0, "strategy": "first-fit" },
            "processes": []
        }"#,
    );
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Config(ConfigError::InvalidMemorySize(0)))
    ));
}

#[test]
fn test_negative_arrival_rejected() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "FCFS" },
            "memory": { "size": 100, "strategy": "first-fit" },
            "processes": [ { "pid": 1, "arrival": -1, "service": 3 } ]
        }"#,
    );
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Workload(WorkloadError::NegativeArrival {
            pid: 1,
            arrival: -1
        }))
    ));
}

#[test]
fn test_non_positive_service_rejected() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "FCFS" },
            "memory": { "size": 100, "strategy": "first-fit" },
            "processes": [ { "pid": 1, "arrival": 0, "service": 0 } ]
        }"#,
    );
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Workload(WorkloadError::InvalidService {
            pid: 1,
            service: 0
        }))
    ));
}

#[test]
fn test_non_positive_request_size_rejected() {
    let file = workload_file(
        r#"{
            "cpu": { "policy": "FCFS" },
            "memory": { "size": 100, "strategy": "first-fit" },
            "processes": [],
            "requests": [ { "pid": 9, "size": -4 } ]
        }"#,
    );
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Workload(WorkloadError::InvalidRequestSize {
            pid: 9,
            size: -4
        }))
    ));
}

#[test]
fn test_malformed_json_rejected() {
    let file = workload_file("{ not json");
    assert!(matches!(
        load_workload(file.path()),
        Err(LoadError::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn test_missing_file_rejected() {
    assert!(matches!(
        load_workload("/nonexistent/workload.json"),
        Err(LoadError::Config(ConfigError::Io(_)))
    ));
}

#[test]
fn test_request_pid_may_be_unscheduled() {
    // Request pids do not have to reference a process in the workload.
    let file = workload_file(
        r#"{
            "cpu": { "policy": "SPN" },
            "memory": { "size": 100, "strategy": "worst-fit" },
            "processes": [ { "pid": 1, "arrival": 0, "service": 1 } ],
            "requests": [ { "pid": 42, "size": 10 } ]
        }"#,
    );
    let mut workload = load_workload(file.path()).unwrap();
    let mut arena = MemoryArena::new(workload.memory_size);
    assign_requests(&mut arena, workload.strategy, &mut workload.requests);
    assert_eq!(workload.requests[0].block, Some(0));
}
