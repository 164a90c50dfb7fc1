// tests/runner.rs

mod common;
use crate::common::init_tracing;

use std::fs;

use schedrun::errors::SchedrunError;
use schedrun::exec::{FailureKind, OutputTarget, run_task};
use schedrun::task::TaskDescriptor;
use schedrun::types::LogWriteMode;
use schedrun_test_utils::tasks::{EchoTask, FailingTask, PanickingTask, RecordingTask};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn successful_task_reports_output_and_duration() {
    init_tracing();

    let task = TaskDescriptor::builder("echo.args", EchoTask).build().unwrap();
    let result = run_task(&task, &args(&["one", "two"]));

    assert!(result.success);
    assert!(result.failure.is_none());
    assert_eq!(result.task, "echo.args");
    assert_eq!(result.output, vec!["one", "two"]);
    assert!(result.into_result().is_ok());
}

#[test]
fn arguments_are_passed_through() {
    let body = RecordingTask::default();
    let calls = body.calls.clone();
    let task = TaskDescriptor::builder("record.args", body).build().unwrap();

    run_task(&task, &args(&["--force", "42"]));
    run_task(&task, &[]);

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls, vec![args(&["--force", "42"]), Vec::<String>::new()]);
}

#[test]
fn failing_body_is_captured_not_propagated() {
    init_tracing();

    let task = TaskDescriptor::builder(
        "always.fails",
        FailingTask {
            message: "database unavailable".into(),
        },
    )
    .build()
    .unwrap();

    let result = run_task(&task, &[]);

    assert!(!result.success);
    let failure = result.failure.clone().expect("failure detail");
    assert_eq!(failure.kind, FailureKind::Error);
    assert!(failure.message.contains("database unavailable"));
    // Output written before the failure is kept.
    assert_eq!(result.output, vec!["about to fail"]);

    match result.into_result() {
        Err(SchedrunError::TaskExecution { task, detail }) => {
            assert_eq!(task, "always.fails");
            assert!(detail.contains("database unavailable"));
        }
        other => panic!("expected TaskExecution, got {other:?}"),
    }
}

#[test]
fn panicking_body_is_captured() {
    init_tracing();

    let task = TaskDescriptor::builder("always.panics", PanickingTask)
        .build()
        .unwrap();
    let result = run_task(&task, &[]);

    assert!(!result.success);
    let failure = result.failure.expect("failure detail");
    assert_eq!(failure.kind, FailureKind::Panic);
    assert_eq!(failure.message, "task body exploded");
    assert_eq!(failure.to_string(), "panicked: task body exploded");
}

#[test]
fn output_overwrites_log_file_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("echo.log");
    fs::write(&log, "stale\n").unwrap();

    let task = TaskDescriptor::builder("echo.log", EchoTask)
        .output(OutputTarget::log_file(&log, LogWriteMode::Overwrite))
        .build()
        .unwrap();

    let result = run_task(&task, &args(&["fresh"]));
    assert!(result.output_errors.is_empty());
    assert_eq!(fs::read_to_string(&log).unwrap(), "fresh\n");
}

#[test]
fn output_appends_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("echo.log");

    let task = TaskDescriptor::builder("echo.append", EchoTask)
        .output(OutputTarget::log_file(&log, LogWriteMode::Append))
        .build()
        .unwrap();

    run_task(&task, &args(&["first"]));
    run_task(&task, &args(&["second", "third"]));

    assert_eq!(fs::read_to_string(&log).unwrap(), "first\nsecond\nthird\n");
}

#[test]
fn unwritable_log_target_reports_error_but_keeps_success() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("missing-dir").join("echo.log");

    let task = TaskDescriptor::builder("echo.nowhere", EchoTask)
        .output(OutputTarget::log_file(&log, LogWriteMode::Overwrite))
        .build()
        .unwrap();

    let result = run_task(&task, &args(&["hello"]));
    assert!(result.success);
    assert_eq!(result.output_errors.len(), 1);
    assert!(result.output_errors[0].starts_with("Cannot write to"));
    assert!(!log.exists());
}

#[test]
fn failed_task_still_writes_its_output() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("fail.log");

    let task = TaskDescriptor::builder(
        "fails.logged",
        FailingTask {
            message: "boom".into(),
        },
    )
    .output(OutputTarget::log_file(&log, LogWriteMode::Overwrite))
    .build()
    .unwrap();

    let result = run_task(&task, &[]);
    assert!(!result.success);
    assert_eq!(fs::read_to_string(&log).unwrap(), "about to fail\n");
}
