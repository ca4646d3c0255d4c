// Tests for Reporter::report validation and dispatch - public API only

mod common;

use benchreport::reporters::{
    BufferConsole, JsonReporter, ParsedArgs, RenderedOutput, ReportRequest, Reporter,
    ReporterManager, ReporterRuntimeConfig, RichTableReporter, Section,
};
use benchreport::{Case, ErrorTag, Session};
use common::{RecordingReporter, counting_callback, files_under, sample_case};
use std::sync::Arc;
use tempfile::TempDir;

fn session_with_console(console: Arc<BufferConsole>) -> Session {
    Session::new(Arc::new(ReporterManager::new())).with_console(console)
}

#[test]
fn test_ops_console_renders_and_prints_once() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let console = Arc::new(BufferConsole::new());
    let session = session_with_console(console.clone());
    let (callback, received) = counting_callback();
    let dir = TempDir::new().unwrap();
    let args = ParsedArgs::new().with_targets("--ops", &["console"]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    let request = ReportRequest::new(&args, &case, &choice, &runtime)
        .with_path(dir.path())
        .with_session(&session)
        .with_callback(&callback);
    reporter.report(&request).unwrap();

    // Assert
    assert_eq!(reporter.render_count(), 1);
    assert_eq!(console.print_count(), 1);
    assert_eq!(
        console.printed()[0],
        RenderedOutput::Plain("sort list:operations per second\n".to_string())
    );
    assert!(received.lock().unwrap().is_empty());
    assert!(files_under(dir.path()).is_empty());
}

#[test]
fn test_default_target_writes_section_file() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let dir = TempDir::new().unwrap();
    let args = ParsedArgs::new().with_targets("--ops", &[]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    let request = ReportRequest::new(&args, &case, &choice, &runtime).with_path(dir.path());
    reporter.report(&request).unwrap();
    reporter.report(&request).unwrap();

    // Assert
    assert_eq!(
        files_under(dir.path()),
        vec![
            "001_operations_per_second.txt",
            "002_operations_per_second.txt",
        ]
    );
}

#[test]
fn test_path_required_even_when_filesystem_not_selected() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("both").unwrap().clone();
    let (callback, received) = counting_callback();
    let args = ParsedArgs::new().with_targets("--both", &["callback"]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    let request = ReportRequest::new(&args, &case, &choice, &runtime).with_callback(&callback);
    let err = reporter.report(&request).unwrap_err();

    // Assert
    assert_eq!(err.tag(), ErrorTag::ReportFilesystemPathRequired);
    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn test_callback_receives_each_section() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("both").unwrap().clone();
    let (callback, received) = counting_callback();
    let dir = TempDir::new().unwrap();
    let args = ParsedArgs::new().with_targets("--both", &["callback"]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    let request = ReportRequest::new(&args, &case, &choice, &runtime)
        .with_path(dir.path())
        .with_callback(&callback);
    reporter.report(&request).unwrap();

    // Assert
    assert_eq!(reporter.render_count(), 2);
    assert_eq!(
        *received.lock().unwrap(),
        vec![
            "sort list:operations per second\n".to_string(),
            "sort list:per round timings\n".to_string(),
        ]
    );
}

#[test]
fn test_filesystem_choice_requires_path() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let args = ParsedArgs::new().with_targets("--ops", &["console"]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    let err = reporter
        .report(&ReportRequest::new(&args, &case, &choice, &runtime))
        .unwrap_err();

    // Assert
    assert!(matches!(err, benchreport::ReportError::Type { .. }));
    assert_eq!(err.tag(), ErrorTag::ReportFilesystemPathRequired);
    assert_eq!(reporter.render_count(), 0);
}

#[test]
fn test_choice_of_other_reporter_rejected() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let json = JsonReporter::new().unwrap();
    let foreign = json.choices().get("json").unwrap().clone();
    let dir = TempDir::new().unwrap();
    let args = ParsedArgs::new();
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    let err = reporter
        .report(&ReportRequest::new(&args, &case, &foreign, &runtime).with_path(dir.path()))
        .unwrap_err();

    // Assert
    assert!(err.is_value_error());
    assert_eq!(err.tag(), ErrorTag::ReportChoiceReporterMismatch);
}

#[test]
fn test_case_without_results_is_skipped() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("ops").unwrap().clone();
    let dir = TempDir::new().unwrap();
    let args = ParsedArgs::new().with_targets("--ops", &[]);
    let runtime = ReporterRuntimeConfig::new();
    let case = Case::new("sorting", "empty", "no results").unwrap();

    // Act
    reporter
        .report(&ReportRequest::new(&args, &case, &choice, &runtime).with_path(dir.path()))
        .unwrap();

    // Assert
    assert_eq!(reporter.render_count(), 0);
    assert!(files_under(dir.path()).is_empty());
}

#[test]
fn test_unsupported_dispatch_target_fails_fast() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("both").unwrap().clone();
    let console = Arc::new(BufferConsole::new());
    let session = session_with_console(console.clone());
    let dir = TempDir::new().unwrap();
    let args = ParsedArgs::new().with_targets("--both", &["console", "custom"]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    let err = reporter
        .report(
            &ReportRequest::new(&args, &case, &choice, &runtime)
                .with_path(dir.path())
                .with_session(&session),
        )
        .unwrap_err();

    // Assert
    assert!(err.is_value_error());
    assert_eq!(err.tag(), ErrorTag::DispatchUnsupportedTarget);
    assert_eq!(reporter.render_count(), 1);
    assert_eq!(console.print_count(), 1);
}

#[test]
fn test_rich_table_console_gets_styled_and_callback_gets_plain() {
    // Arrange
    let reporter = RichTableReporter::new().unwrap();
    let choice = reporter.choices().get("rich-table-ops").unwrap().clone();
    let console = Arc::new(BufferConsole::new());
    let session = session_with_console(console.clone());
    let (callback, received) = counting_callback();
    let args = ParsedArgs::new().with_targets("--rich-table.ops", &["console", "callback"]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");
    let dir = TempDir::new().unwrap();

    // Act
    reporter
        .report(
            &ReportRequest::new(&args, &case, &choice, &runtime)
                .with_path(dir.path())
                .with_session(&session)
                .with_callback(&callback),
        )
        .unwrap();

    // Assert
    assert!(matches!(console.printed()[0], RenderedOutput::Styled(_)));
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].contains("operations per second"));
    assert!(received[0].contains("mean kOps/s"));
}

#[test]
fn test_json_renders_once_per_case() {
    // Arrange
    let reporter = JsonReporter::new().unwrap();
    let choice = reporter.choices().get("json-data").unwrap().clone();
    let dir = TempDir::new().unwrap();
    let args = ParsedArgs::new().with_targets("--json-data", &[]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");

    // Act
    reporter
        .report(&ReportRequest::new(&args, &case, &choice, &runtime).with_path(dir.path()))
        .unwrap();

    // Assert
    assert_eq!(files_under(dir.path()), vec!["001_sort_list.json"]);
    let content = std::fs::read_to_string(dir.path().join("001_sort_list.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["results"][0]["ops_per_second"]["data"][0], 4000.0);
}

#[test]
fn test_dispatch_without_path_fails_before_printing() {
    // Arrange
    let reporter = RecordingReporter::with_default();
    let choice = reporter.choices().get("both").unwrap().clone();
    let console = Arc::new(BufferConsole::new());
    let session = session_with_console(console.clone());
    let args = ParsedArgs::new().with_targets("--both", &["console", "filesystem"]);
    let runtime = ReporterRuntimeConfig::new();
    let case = sample_case("sort list");
    let output = RenderedOutput::Plain("sort list:operations per second\n".to_string());

    // Act
    let request = ReportRequest::new(&args, &case, &choice, &runtime).with_session(&session);
    let err = reporter
        .dispatch_to_targets(&request, Section::Ops, &output, Section::Ops.label())
        .unwrap_err();

    // Assert
    assert!(matches!(err, benchreport::ReportError::Type { .. }));
    assert_eq!(err.tag(), ErrorTag::DispatchFilesystemPathRequired);
    assert_eq!(console.print_count(), 0);
}
