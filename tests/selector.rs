// tests/selector.rs

mod common;
use crate::common::at;

use schedrun::schedule::{is_due, select_due};
use schedrun::task::TaskRegistry;
use schedrun_test_utils::tasks::echo_descriptor;

fn names(tasks: &[std::sync::Arc<schedrun::task::TaskDescriptor>]) -> Vec<String> {
    tasks.iter().map(|t| t.name().to_string()).collect()
}

#[test]
fn environment_filter_and_missing_schedule() {
    let registry = TaskRegistry::new();
    registry
        .register(echo_descriptor("A", Some("* * * * *"), &[]))
        .unwrap();
    registry
        .register(echo_descriptor("B", Some("* * * * *"), &["live"]))
        .unwrap();
    registry.register(echo_descriptor("C", None, &[])).unwrap();

    let now = at(2024, 6, 13, 14, 22, 0);
    assert_eq!(names(&select_due(&registry, &now, "staging")), vec!["A"]);
    assert_eq!(names(&select_due(&registry, &now, "live")), vec!["A", "B"]);
}

#[test]
fn daily_report_in_dev_at_nine() {
    let registry = TaskRegistry::new();
    registry
        .register(echo_descriptor("report.daily", Some("0 9 * * *"), &[]))
        .unwrap();
    registry
        .register(echo_descriptor("cleanup.tmp", Some("*/15 * * * *"), &["live"]))
        .unwrap();

    let nine = at(2024, 6, 13, 9, 0, 0);
    assert_eq!(names(&select_due(&registry, &nine, "dev")), vec!["report.daily"]);
    assert_eq!(
        names(&select_due(&registry, &nine, "live")),
        vec!["report.daily", "cleanup.tmp"]
    );

    let quarter_past = at(2024, 6, 13, 9, 15, 0);
    assert!(select_due(&registry, &quarter_past, "dev").is_empty());
}

#[test]
fn selection_is_stable_within_a_minute() {
    let registry = TaskRegistry::new();
    registry
        .register(echo_descriptor("every.five", Some("*/5 * * * *"), &[]))
        .unwrap();
    registry
        .register(echo_descriptor("on.the.hour", Some("0 * * * *"), &[]))
        .unwrap();

    let start = select_due(&registry, &at(2024, 6, 13, 10, 0, 0), "dev");
    let late = select_due(&registry, &at(2024, 6, 13, 10, 0, 59), "dev");
    assert_eq!(names(&start), vec!["every.five", "on.the.hour"]);
    assert_eq!(names(&start), names(&late));
}

#[test]
fn selection_preserves_registration_order() {
    let registry = TaskRegistry::new();
    for name in ["z.task", "a.task", "m.task"] {
        registry
            .register(echo_descriptor(name, Some("* * * * *"), &[]))
            .unwrap();
    }

    let due = select_due(&registry, &at(2024, 6, 13, 10, 0, 0), "dev");
    assert_eq!(names(&due), vec!["z.task", "a.task", "m.task"]);
}

#[test]
fn is_due_checks_each_condition() {
    let now = at(2024, 6, 13, 9, 0, 0);

    let on_demand = echo_descriptor("on.demand", None, &[]);
    assert!(!is_due(&on_demand, &now, "dev"));

    let wrong_time = echo_descriptor("wrong.time", Some("0 10 * * *"), &[]);
    assert!(!is_due(&wrong_time, &now, "dev"));

    let wrong_env = echo_descriptor("wrong.env", Some("0 9 * * *"), &["live", "staging"]);
    assert!(!is_due(&wrong_env, &now, "dev"));
    assert!(is_due(&wrong_env, &now, "staging"));
}
