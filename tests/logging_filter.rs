// tests/logging_filter.rs

use schedrun::cli::LogLevel;
use schedrun::logging::build_filter;
use tracing::level_filters::LevelFilter;

#[test]
fn defaults_to_info() {
    let filter = build_filter(None, None).unwrap();
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));

    let blank = build_filter(None, Some("   ")).unwrap();
    assert_eq!(blank.max_level_hint(), Some(LevelFilter::INFO));
}

#[test]
fn env_accepts_levels_and_directives() {
    let level = build_filter(None, Some("debug")).unwrap();
    assert_eq!(level.max_level_hint(), Some(LevelFilter::DEBUG));

    let directive = build_filter(None, Some("schedrun::exec=trace,warn")).unwrap();
    assert_eq!(directive.max_level_hint(), Some(LevelFilter::TRACE));
}

#[test]
fn cli_level_wins_over_env() {
    let filter = build_filter(Some(LogLevel::Error), Some("trace")).unwrap();
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));

    // A broken env value is ignored when the flag is given.
    assert!(build_filter(Some(LogLevel::Warn), Some("schedrun=loud")).is_ok());
}

#[test]
fn malformed_env_filter_is_an_error() {
    let err = build_filter(None, Some("schedrun=loud")).unwrap_err();
    assert!(err.to_string().contains("SCHEDRUN_LOG"), "{err}");
}
