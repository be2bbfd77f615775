/*!
 * Replay Tests
 * Loading scripts from disk and replaying them end to end
 */

use pretty_assertions::assert_eq;
use sched_engine::{ConfigError, Outcome, Policy, Script, SchedulerError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_script(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_replay_psjf_script_from_file() {
    let file = write_script(
        r#"{
            "config": { "cores": 1, "policy": "psjf" },
            "events": [
                { "type": "arrival", "job": 1, "time": 0, "running_time": 10 },
                { "type": "arrival", "job": 2, "time": 2, "running_time": 3 },
                { "type": "finished", "core": 0, "job": 2, "time": 5 },
                { "type": "finished", "core": 0, "job": 1, "time": 13 }
            ]
        }"#,
    );

    let script = Script::from_file(file.path()).unwrap();
    assert_eq!(script.config.policy, Policy::Psjf);

    let report = script.run("psjf.json").unwrap();
    let outcomes: Vec<Outcome> = report.decisions.iter().map(|d| d.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Scheduled { core: 0 },
            Outcome::Scheduled { core: 0 },
            Outcome::Dispatched { job: 1 },
            Outcome::Idle,
        ]
    );
    assert_eq!(report.decisions[1].queue, "2(0) 1(-1)");
    assert_eq!(report.stats.preemptions, 1);
    assert_eq!(report.stats.average_turnaround_time, 8.0);
}

#[test]
fn test_replay_round_robin_script() {
    let script = Script::from_json_str(
        r#"{
            "config": { "cores": 1, "policy": "rr" },
            "events": [
                { "type": "arrival", "job": 1, "time": 0, "running_time": 4 },
                { "type": "arrival", "job": 2, "time": 1, "running_time": 2 },
                { "type": "quantum_expired", "core": 0, "time": 2 },
                { "type": "finished", "core": 0, "job": 2, "time": 4 },
                { "type": "finished", "core": 0, "job": 1, "time": 6 }
            ]
        }"#,
    )
    .unwrap();

    let report = script.run("rr").unwrap();
    assert_eq!(report.decisions[2].outcome, Outcome::Dispatched { job: 2 });
    assert_eq!(report.decisions[3].outcome, Outcome::Dispatched { job: 1 });
    assert_eq!(report.stats.completed_jobs, 2);
    // Job 1 started at 0, job 2 at 2
    assert_eq!(report.stats.average_response_time, 0.5);
}

#[test]
fn test_replay_surfaces_contract_violations() {
    let script = Script::from_json_str(
        r#"{
            "config": { "cores": 1, "policy": "fcfs" },
            "events": [
                { "type": "arrival", "job": 1, "time": 0, "running_time": 4 },
                { "type": "quantum_expired", "core": 0, "time": 2 }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(
        script.run("fcfs").unwrap_err(),
        SchedulerError::QuantumRequiresRoundRobin("fcfs".into())
    );
}

#[test]
fn test_invalid_script_config() {
    let err = Script::from_json_str(r#"{ "config": { "cores": 0 }, "events": [] }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Scheduler(SchedulerError::InvalidCoreCount)
    ));
}

#[test]
fn test_bundled_demo_script() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/psjf_two_cores.json");
    let report = Script::from_file(path).unwrap().run(path).unwrap();

    let outcomes: Vec<Outcome> = report.decisions.iter().map(|d| d.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Scheduled { core: 0 },
            Outcome::Scheduled { core: 1 },
            Outcome::Scheduled { core: 0 },
            Outcome::Queued,
            Outcome::Dispatched { job: 4 },
            Outcome::Dispatched { job: 1 },
            Outcome::Idle,
            Outcome::Idle,
        ]
    );
    // Shorter total demand wins the queue even over a job with less left to run
    assert_eq!(report.decisions[3].queue, "3(0) 2(1) 4(-1) 1(-1)");
    assert_eq!(report.stats.completed_jobs, 4);
}
