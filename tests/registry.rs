// tests/registry.rs

use std::path::Path;
use std::sync::Arc;
use std::thread;

use schedrun::errors::SchedrunError;
use schedrun::task::{TaskDescriptor, TaskRegistry, TaskRunCommand};
use schedrun_test_utils::tasks::{EchoTask, FailingTask, echo_descriptor};

#[test]
fn duplicate_registration_is_rejected_and_first_is_kept() {
    let registry = TaskRegistry::new();

    let first = TaskDescriptor::builder("report.daily", EchoTask)
        .cron("0 9 * * *")
        .build()
        .unwrap();
    let second = TaskDescriptor::builder(
        "report.daily",
        FailingTask {
            message: "nope".into(),
        },
    )
    .cron("*/5 * * * *")
    .build()
    .unwrap();

    registry.register(first).unwrap();
    match registry.register(second) {
        Err(SchedrunError::DuplicateTask(name)) => assert_eq!(name, "report.daily"),
        other => panic!("expected DuplicateTask, got {other:?}"),
    }

    assert_eq!(registry.len(), 1);
    let kept = registry.get("report.daily").unwrap();
    assert_eq!(kept.cron().unwrap().as_str(), "0 9 * * *");
}

#[test]
fn iteration_follows_registration_order() {
    let registry = TaskRegistry::new();
    for name in ["zeta.last", "alpha.first", "mid.dle"] {
        registry
            .register(echo_descriptor(name, Some("* * * * *"), &[]))
            .unwrap();
    }

    assert_eq!(registry.names(), vec!["zeta.last", "alpha.first", "mid.dle"]);
    let all: Vec<String> = registry.all().iter().map(|d| d.name().to_string()).collect();
    assert_eq!(all, registry.names());
}

#[test]
fn missing_task_is_a_recoverable_lookup() {
    let registry = TaskRegistry::new();
    registry
        .register(echo_descriptor("known.task", None, &[]))
        .unwrap();

    assert!(registry.get("unknown.task").is_none());
    match registry.require("unknown.task") {
        Err(SchedrunError::TaskNotFound(name)) => assert_eq!(name, "unknown.task"),
        other => panic!("expected TaskNotFound, got {other:?}"),
    }
    assert!(registry.require("known.task").is_ok());
}

#[test]
fn malformed_cron_is_rejected_when_building_the_descriptor() {
    let result = TaskDescriptor::builder("bad.schedule", EchoTask)
        .cron("61 * * * *")
        .build();
    assert!(matches!(result, Err(SchedrunError::MalformedCron { .. })));
}

#[test]
fn invalid_names_are_rejected() {
    for name in ["", "has space", "trailing.", ".leading", "double..dot", "semi;colon"] {
        let result = TaskDescriptor::builder(name, EchoTask).build();
        assert!(
            matches!(result, Err(SchedrunError::InvalidTaskName(_))),
            "expected '{name}' to be rejected"
        );
    }
    assert!(TaskDescriptor::builder("module.sub_task-2", EchoTask).build().is_ok());
}

#[test]
fn empty_environment_set_permits_everything() {
    let open = echo_descriptor("open.task", None, &[]);
    assert!(open.is_permitted_in("live"));
    assert!(open.is_permitted_in("anything"));

    let live_only = echo_descriptor("live.task", None, &["live"]);
    assert!(live_only.is_permitted_in("live"));
    assert!(!live_only.is_permitted_in("staging"));
}

#[test]
fn default_command_line_reinvokes_host_with_task_run() {
    let task = echo_descriptor("cleanup.tmp", Some("*/15 * * * *"), &[]);
    let line = task.command_line(Path::new("/usr/local/bin/schedrun"), "live");

    assert_eq!(line.program, Path::new("/usr/local/bin/schedrun"));
    assert_eq!(
        line.to_string(),
        "/usr/local/bin/schedrun --env=live task:run cleanup.tmp"
    );
}

#[test]
fn command_factory_can_forward_config_path() {
    let task = TaskDescriptor::builder("cleanup.tmp", EchoTask)
        .command_factory(TaskRunCommand::new("cleanup.tmp").with_config("/etc/schedrun.toml"))
        .build()
        .unwrap();

    let line = task.command_line(Path::new("/bin/schedrun"), "staging");
    assert_eq!(
        line.to_string(),
        "/bin/schedrun --config /etc/schedrun.toml --env=staging task:run cleanup.tmp"
    );
}

#[test]
fn concurrent_readers_see_a_consistent_registry() {
    let registry = Arc::new(TaskRegistry::new());
    for i in 0..16 {
        registry
            .register(echo_descriptor(&format!("task.n{i}"), Some("* * * * *"), &[]))
            .unwrap();
    }

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..16 {
                    assert!(registry.get(&format!("task.n{i}")).is_some());
                }
                registry.all().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 16);
    }
}
