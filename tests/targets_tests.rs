// Tests for target selection and output targets - public API only

mod common;

use benchreport::ErrorTag;
use benchreport::reporters::{
    ParsedArgs, RenderedOutput, Reporter, Target, collect_arg_list, select_targets_from_args,
    target_filesystem,
};
use common::{RecordingReporter, files_under};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn text(value: &str) -> RenderedOutput {
    RenderedOutput::Plain(value.to_string())
}

#[test]
fn test_unique_files_get_increasing_counters() {
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let first = target_filesystem(dir.path(), "csv", "report.csv", &text("1"), true, false).unwrap();
    let second =
        target_filesystem(dir.path(), "csv", "report.csv", &text("2"), true, false).unwrap();

    // Assert
    assert_eq!(first.file_name().unwrap(), "001_report.csv");
    assert_eq!(second.file_name().unwrap(), "002_report.csv");
    assert_eq!(
        files_under(dir.path()),
        vec!["csv/001_report.csv", "csv/002_report.csv"]
    );
    assert_eq!(std::fs::read_to_string(second).unwrap(), "2");
}

#[test]
fn test_unique_fills_first_free_counter() {
    // Arrange
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("001_r.txt"), "taken").unwrap();

    // Act
    let written = target_filesystem(dir.path(), "", "r.txt", &text("new"), true, false).unwrap();

    // Assert
    assert_eq!(written.file_name().unwrap(), "002_r.txt");
}

#[test]
fn test_unique_and_append_together_rejected() {
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let err = target_filesystem(dir.path(), "", "r.txt", &text("x"), true, true).unwrap_err();

    // Assert
    assert!(err.is_value_error());
    assert_eq!(err.tag(), ErrorTag::FilesystemAppendUniqueIncompatible);
    assert!(files_under(dir.path()).is_empty());
}

#[test]
fn test_existing_file_not_overwritten() {
    // Arrange
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("r.txt"), "original").unwrap();

    // Act
    let err = target_filesystem(dir.path(), "", "r.txt", &text("x"), false, false).unwrap_err();

    // Assert
    assert_eq!(err.tag(), ErrorTag::FilesystemOutputFileExists);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("r.txt")).unwrap(),
        "original"
    );
}

#[test]
fn test_defaults_used_without_explicit_targets() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let defaults = BTreeSet::from([Target::Filesystem]);
    let args = ParsedArgs::new().with_targets("--ops", &[]);

    // Act
    let targets = select_targets_from_args(&args, &choice, &defaults).unwrap();

    // Assert
    assert_eq!(targets, defaults);
}

#[test]
fn test_explicit_targets_replace_defaults() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let defaults = BTreeSet::from([Target::Filesystem]);
    let args = ParsedArgs::new().with_targets("--ops", &["console"]);

    // Act
    let targets = select_targets_from_args(&args, &choice, &defaults).unwrap();

    // Assert
    assert_eq!(targets, BTreeSet::from([Target::Console]));
}

#[test]
fn test_comma_and_repeated_targets_combine() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let args = ParsedArgs::new()
        .with_targets("--ops", &["console,callback"])
        .with_targets("--ops", &["CONSOLE"]);

    // Act
    let targets = select_targets_from_args(&args, &choice, &BTreeSet::new()).unwrap();

    // Assert
    assert_eq!(targets, BTreeSet::from([Target::Console, Target::Callback]));
}

#[test]
fn test_unknown_and_unsupported_targets_are_distinct_errors() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let unknown = ParsedArgs::new().with_targets("--ops", &["printer"]);
    let unsupported = ParsedArgs::new().with_targets("--ops", &["custom"]);

    // Act
    let unknown_err = select_targets_from_args(&unknown, &choice, &BTreeSet::new()).unwrap_err();
    let unsupported_err =
        select_targets_from_args(&unsupported, &choice, &BTreeSet::new()).unwrap_err();

    // Assert
    assert_eq!(unknown_err.tag(), ErrorTag::ArgsUnknownTarget);
    assert_eq!(unsupported_err.tag(), ErrorTag::ArgsUnsupportedTarget);
}

#[test]
fn test_collect_arg_list_validates_flag() {
    // Arrange
    let args = ParsedArgs::new().with_targets("--ops", &["console"]);

    // Act
    let err = collect_arg_list(&args, "ops").unwrap_err();
    let absent = collect_arg_list(&args, "--timing").unwrap();

    // Assert
    assert_eq!(err.tag(), ErrorTag::ArgsInvalidFlag);
    assert!(absent.is_empty());
}
