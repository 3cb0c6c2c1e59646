//! End-to-end binding tests driving the public CommandLine entry point

use argbind::{
    ArgumentBinding, BindError, CommandBinding, CommandLine, EnumRepr, FailureKind, Slot,
};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("argbind=debug")),
        )
        .with_test_writer()
        .try_init()
        .ok();
}

// ============================================================================
// Basic Binding Tests
// ============================================================================

#[test]
fn test_string_and_int_bindings_end_to_end() {
    init_logging();
    let name = Slot::new(String::new());
    let count = Slot::new(0i64);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("name", "player name", &name).unwrap());
    cli.argument(ArgumentBinding::new("count", "spawn count", &count).unwrap());

    let report = cli.init_with(["-name", "alice", "-count", "7"]).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.applied, vec!["name", "count"]);
    assert_eq!(name.get(), "alice");
    assert_eq!(count.get(), 7);
}

#[test]
fn test_value_that_looks_like_a_flag_is_not_consumed() {
    // count's "value" is flag-shaped, so count keeps its prior value and
    // -name is processed as the next flag
    let name = Slot::new(String::new());
    let count = Slot::new(0i64);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("name", "", &name).unwrap());
    cli.argument(ArgumentBinding::new("count", "", &count).unwrap());

    cli.init_with(["-count", "-name", "bob"]).unwrap();

    assert_eq!(count.get(), 0);
    assert_eq!(name.get(), "bob");
}

#[test]
fn test_trailing_flag_leaves_prior_value() {
    let count = Slot::new(13i64);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("count", "", &count).unwrap());

    let report = cli.init_with(["-count"]).unwrap();

    assert!(report.applied.is_empty());
    assert_eq!(count.get(), 13);
}

#[test]
fn test_foreign_arguments_are_tolerated() {
    // The vector may carry argv[0] and flags meant for other consumers
    let count = Slot::new(0i64);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("count", "", &count).unwrap());

    let report = cli
        .init_with(["/usr/bin/game", "-fullscreen", "-count", "4", "trailing"])
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(count.get(), 4);
}

#[test]
fn test_all_builtin_types() {
    let title = Slot::new(String::new());
    let width = Slot::new(0i64);
    let scale = Slot::new(1.0f64);
    let verbose = Slot::new(false);
    let channel = Slot::new(0u8);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("title", "", &title).unwrap());
    cli.argument(ArgumentBinding::new("width", "", &width).unwrap());
    cli.argument(ArgumentBinding::new("scale", "", &scale).unwrap());
    cli.argument(ArgumentBinding::new("verbose", "", &verbose).unwrap());
    cli.argument(ArgumentBinding::new("channel", "", &channel).unwrap());

    cli.init_with([
        "-title", "demo", "-width", "1280", "-scale", "1.5", "-verbose", "true", "-channel", "3",
    ])
    .unwrap();

    assert_eq!(title.get(), "demo");
    assert_eq!(width.get(), 1280);
    assert_eq!(scale.get(), 1.5);
    assert!(verbose.get());
    assert_eq!(channel.get(), 3);
}

#[test]
fn test_unparsable_values_degrade_to_defaults() {
    // Silent default on bad input is the designed conversion behavior
    let width = Slot::new(99i64);
    let verbose = Slot::new(true);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("width", "", &width).unwrap());
    cli.argument(ArgumentBinding::new("verbose", "", &verbose).unwrap());

    let report = cli.init_with(["-width", "abc", "-verbose", "maybe"]).unwrap();

    assert!(report.is_clean());
    assert_eq!(width.get(), 0);
    assert!(!verbose.get());
}

// ============================================================================
// Duplicate Detection Tests
// ============================================================================

#[test]
fn test_duplicate_names_abort_before_anything_applies() {
    let first = Slot::new(String::new());
    let second = Slot::new(String::new());
    let ran = Slot::new(false);
    let ran_clone = ran.clone();

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("name", "", &first).unwrap());
    cli.argument(ArgumentBinding::new("name", "", &second).unwrap());
    cli.command(CommandBinding::from_fn("reset", "", move || ran_clone.set(true)).unwrap());

    let err = cli.init_with(["-name", "alice", "-reset"]).unwrap_err();

    assert!(matches!(err, BindError::DuplicateBinding { .. }));
    assert_eq!(first.get(), "");
    assert_eq!(second.get(), "");
    assert!(!ran.get());
}

// ============================================================================
// Command Dispatch Tests
// ============================================================================

#[test]
fn test_commands_dispatch_after_arguments() {
    // A command action observes values written by argument bindings that
    // appeared later in the input
    let count = Slot::new(0i64);
    let seen_by_command = Slot::new(-1i64);

    let count_for_action = count.clone();
    let seen = seen_by_command.clone();

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::new("count", "", &count).unwrap());
    cli.command(
        CommandBinding::from_fn("snapshot", "", move || seen.set(count_for_action.get())).unwrap(),
    );

    cli.init_with(["-snapshot", "-count", "5"]).unwrap();

    assert_eq!(seen_by_command.get(), 5);
}

#[test]
fn test_failing_command_does_not_block_later_commands() {
    let ran = Slot::new(false);
    let ran_clone = ran.clone();

    let mut cli = CommandLine::new();
    cli.command(CommandBinding::new("boom", "", || anyhow::bail!("kaput")).unwrap());
    cli.command(CommandBinding::from_fn("after", "", move || ran_clone.set(true)).unwrap());

    let report = cli.init_with(["-boom", "-after"]).unwrap();

    assert!(ran.get());
    assert_eq!(report.dispatched, vec!["after"]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].kind,
        FailureKind::ActionFailed { .. }
    ));
}

#[test]
fn test_absent_command_does_not_run() {
    let ran = Slot::new(false);
    let ran_clone = ran.clone();

    let mut cli = CommandLine::new();
    cli.command(CommandBinding::from_fn("reset", "", move || ran_clone.set(true)).unwrap());

    cli.init_with(["-other"]).unwrap();

    assert!(!ran.get());
}

// ============================================================================
// Enum Binding Tests
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Quality {
    Low,
    Medium,
    High,
    Unknown(i64),
}

impl EnumRepr for Quality {
    fn from_repr(repr: i64) -> Self {
        match repr {
            0 => Quality::Low,
            1 => Quality::Medium,
            2 => Quality::High,
            other => Quality::Unknown(other),
        }
    }
}

#[test]
fn test_enum_binding_reinterprets_integer() {
    let quality = Slot::new(Quality::Low);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::enumeration("quality", "", &quality).unwrap());

    cli.init_with(["-quality", "2"]).unwrap();

    assert_eq!(quality.get(), Quality::High);
}

#[test]
fn test_enum_binding_accepts_out_of_range_values() {
    // No bounds validation against the declared members
    let quality = Slot::new(Quality::Low);

    let mut cli = CommandLine::new();
    cli.argument(ArgumentBinding::enumeration("quality", "", &quality).unwrap());

    cli.init_with(["-quality", "42"]).unwrap();

    assert_eq!(quality.get(), Quality::Unknown(42));
}

#[test]
fn test_enum_binding_skips_silently_without_int_reader() {
    let quality = Slot::new(Quality::Medium);

    let mut cli = CommandLine::new();
    cli.unregister_reader("int");
    cli.argument(ArgumentBinding::enumeration("quality", "", &quality).unwrap());

    let report = cli.init_with(["-quality", "2"]).unwrap();

    // Left unchanged, and no failure reported for the enum case
    assert!(report.is_clean());
    assert_eq!(quality.get(), Quality::Medium);
}
