/*!
 * Scheduler Tests
 * End-to-end runs of every scheduling algorithm on real core threads
 */

use cpu_sched_sim::{
    LiveTable, Millis, NullObserver, Pid, Priority, ProcessDescriptor, ProcessState,
    RecordingObserver, SchedulingPolicy, Simulation, SimulationConfig, SimulationReport,
};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::collections::HashSet;

const TEST_TICK_MS: Millis = 5;

fn process(pid: Pid, priority: Priority, start_time: Millis, bursts: Vec<Millis>) -> ProcessDescriptor {
    ProcessDescriptor {
        pid,
        priority,
        start_time,
        bursts,
    }
}

fn config(
    cores: u8,
    algorithm: SchedulingPolicy,
    time_slice: Millis,
    processes: Vec<ProcessDescriptor>,
) -> SimulationConfig {
    SimulationConfig {
        cores,
        algorithm,
        time_slice,
        context_switch: 0,
        tick: TEST_TICK_MS,
        processes,
    }
}

fn run(config: &SimulationConfig) -> SimulationReport {
    Simulation::new(config)
        .unwrap()
        .run(&mut NullObserver)
        .unwrap()
}

fn assert_all_terminated(report: &SimulationReport) {
    for p in &report.processes {
        assert_eq!(p.state, ProcessState::Terminated, "pid {}", p.pid);
        assert_eq!(p.metrics.remaining_ms, 0, "pid {}", p.pid);
        assert!(p.finished_at.is_some(), "pid {}", p.pid);
    }
}

#[test]
#[serial]
fn test_fcfs_runs_to_completion_in_arrival_order() {
    let config = config(
        1,
        SchedulingPolicy::Fcfs,
        0,
        vec![process(1, 0, 0, vec![100]), process(2, 0, 0, vec![50])],
    );
    let report = run(&config);

    assert_all_terminated(&report);
    assert_eq!(report.completion_order, vec![1, 2]);

    // B waited out the whole of A's burst
    let b = report.process(2).unwrap();
    assert!(b.metrics.wait_ms >= 95, "wait {}", b.metrics.wait_ms);
    assert_eq!(b.dispatches, 1);
    assert_eq!(report.scheduler.preemptions, 0);
}

#[test]
#[serial]
fn test_clock_starts_at_run_not_construction() {
    let config = config(
        1,
        SchedulingPolicy::Fcfs,
        0,
        vec![process(1, 0, 0, vec![20]), process(2, 0, 100, vec![10])],
    );
    let simulation = Simulation::new(&config).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(300));
    let report = simulation.run(&mut NullObserver).unwrap();

    assert_all_terminated(&report);
    let first = report.process(1).unwrap();
    assert!(first.metrics.turnaround_ms < 150, "turnaround {}", first.metrics.turnaround_ms);
    assert!(first.metrics.wait_ms < 100, "wait {}", first.metrics.wait_ms);

    // The late arrival is admitted relative to the run, not to construction
    let late = report.process(2).unwrap();
    assert!(late.finished_at.unwrap() >= 100);
    assert!(report.elapsed_ms < 300, "elapsed {}", report.elapsed_ms);
}

#[test]
#[serial]
fn test_shortest_remaining_dispatches_shorter_first() {
    let config = config(
        1,
        SchedulingPolicy::ShortestRemainingTime,
        0,
        vec![process(1, 0, 0, vec![100]), process(2, 0, 0, vec![20])],
    );
    let report = run(&config);

    assert_all_terminated(&report);
    assert_eq!(report.completion_order, vec![2, 1]);
    assert_eq!(report.process(1).unwrap().dispatches, 1);
}

#[test]
#[serial]
fn test_priority_arrival_preempts_running_process() {
    let config = config(
        1,
        SchedulingPolicy::PreemptivePriority,
        0,
        vec![process(1, 5, 0, vec![200]), process(2, 1, 50, vec![10])],
    );
    let mut observer = RecordingObserver::default();
    let report = Simulation::new(&config)
        .unwrap()
        .run(&mut observer)
        .unwrap();

    assert_all_terminated(&report);
    assert_eq!(report.completion_order, vec![2, 1]);

    let a = report.process(1).unwrap();
    assert_eq!(a.preemptions, 1);
    assert_eq!(a.dispatches, 2);
    assert_eq!(a.metrics.cpu_ms, 200);

    // A gave up the core shortly after B arrived
    let first_b_run = observer
        .snapshots
        .iter()
        .find(|s| s.get(2).is_some_and(|b| b.state == ProcessState::Running))
        .expect("B was observed running");
    let a_cpu = first_b_run.get(1).unwrap().metrics.cpu_ms;
    assert!((50..150).contains(&a_cpu), "A ran {a_cpu} ms before B");
}

#[test]
#[serial]
fn test_round_robin_slices_single_burst() {
    let config = config(
        1,
        SchedulingPolicy::RoundRobin,
        10,
        vec![process(1, 0, 0, vec![25])],
    );
    let report = run(&config);

    assert_all_terminated(&report);
    let p = report.process(1).unwrap();
    assert_eq!(p.dispatches, 3);
    assert_eq!(p.preemptions, 2);
    assert_eq!(p.metrics.cpu_ms, 25);
    assert_eq!(report.scheduler.dispatches, 3);
}

#[test]
#[serial]
fn test_round_robin_alternates_processes() {
    let config = config(
        1,
        SchedulingPolicy::RoundRobin,
        20,
        vec![process(1, 0, 0, vec![50]), process(2, 0, 0, vec![30])],
    );
    let report = run(&config);

    assert_all_terminated(&report);
    // 1: 20, 2: 20, 1: 20, 2: 10 (done), 1: 10 (done)
    assert_eq!(report.completion_order, vec![2, 1]);
    assert_eq!(report.process(1).unwrap().dispatches, 3);
    assert_eq!(report.process(2).unwrap().dispatches, 2);
}

#[test]
#[serial]
fn test_io_bursts_and_late_arrivals_on_two_cores() {
    let config = config(
        2,
        SchedulingPolicy::Fcfs,
        0,
        vec![
            process(1, 0, 0, vec![30, 40, 20]),
            process(2, 0, 0, vec![60]),
            process(3, 0, 25, vec![10, 10, 10]),
            process(4, 0, 40, vec![15]),
        ],
    );
    let report = run(&config);

    assert_all_terminated(&report);
    assert_eq!(report.completion_order.len(), 4);
    assert_eq!(report.scheduler.completed, 4);

    let total_cpu: Millis = report.processes.iter().map(|p| p.metrics.cpu_ms).sum();
    assert_eq!(total_cpu, 30 + 20 + 60 + 10 + 10 + 15);

    for p in &report.processes {
        assert!(p.metrics.wait_ms <= p.metrics.turnaround_ms);
        assert!(p.metrics.cpu_ms <= p.metrics.turnaround_ms);
    }

    let core_dispatches: u64 = report.cores.iter().map(|c| c.dispatches).sum();
    assert_eq!(report.cores.len(), 2);
    assert_eq!(core_dispatches, report.scheduler.dispatches);
    assert_eq!(report.scheduler.context_switches, report.scheduler.dispatches);

    assert!(report.cpu_utilization > 0.0 && report.cpu_utilization <= 1.0);
    assert!(report.throughput.overall > 0.0);
}

#[test]
#[serial]
fn test_snapshots_stay_consistent() {
    let config = config(
        2,
        SchedulingPolicy::PreemptivePriority,
        0,
        vec![
            process(1, 4, 0, vec![40, 20, 40]),
            process(2, 3, 0, vec![30]),
            process(3, 1, 20, vec![20, 10, 20]),
            process(4, 0, 35, vec![25]),
            process(5, 2, 10, vec![15]),
        ],
    );
    let mut observer = RecordingObserver::default();
    let report = Simulation::new(&config)
        .unwrap()
        .run(&mut observer)
        .unwrap();
    assert_all_terminated(&report);
    assert!(!observer.snapshots.is_empty());

    for snapshot in &observer.snapshots {
        let running: Vec<_> = snapshot
            .processes
            .iter()
            .filter(|p| p.state == ProcessState::Running)
            .collect();
        assert!(running.len() <= config.cores as usize);

        let cores: HashSet<_> = running.iter().map(|p| p.core).collect();
        assert_eq!(cores.len(), running.len(), "two processes on one core");
        assert!(running.iter().all(|p| p.core.is_some()));

        let queued: HashSet<_> = snapshot.ready_queue.iter().collect();
        assert_eq!(queued.len(), snapshot.ready_queue.len(), "duplicate queue entry");
        for pid in &snapshot.ready_queue {
            let state = snapshot.get(*pid).map(|p| p.state);
            assert_eq!(state, Some(ProcessState::Ready), "queued pid {pid}");
        }
    }

    // The last tick only fires once everything has terminated
    let last = observer.snapshots.last().unwrap();
    assert_eq!(last.count_in(ProcessState::Terminated), 5);
}

#[test]
#[serial]
fn test_live_table_output() {
    let config = config(
        1,
        SchedulingPolicy::Fcfs,
        0,
        vec![process(1024, 2, 0, vec![20])],
    );
    let mut table = LiveTable::new(Vec::new());
    Simulation::new(&config).unwrap().run(&mut table).unwrap();

    let output = String::from_utf8(table.into_inner()).unwrap();
    assert!(output.contains("PID"));
    assert!(output.contains("terminated"));
    assert!(output.contains("1024"));
}
