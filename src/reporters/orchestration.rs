// Rendering loops and target dispatch shared by all reporters

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::args::select_targets_from_args;
use crate::reporters::enums::{Section, Target};
use crate::reporters::output::RenderedOutput;
use crate::reporters::prioritized::Prioritized;
use crate::reporters::reporter::{ReportRequest, Reporter, SectionRenderer};
use crate::reporters::targets::{
    ReportLogEntry, append_report_log, target_callback, target_console, target_filesystem,
};
use crate::utils::sanitize_filename;
use std::path::Path;
use tracing::{debug, info};

/// Render each section of the request's choice and dispatch it.
///
/// Files are named after the section label.
pub fn render_by_section<R: Reporter + ?Sized>(
    reporter: &R,
    request: &ReportRequest<'_>,
    renderer: &SectionRenderer<'_>,
) -> Result<()> {
    let options =
        reporter.get_prioritized_options(request.case, request.choice, request.runtime)?;

    for &section in request.choice.sections() {
        let output = renderer(request.case, section, &options)?;
        reporter.dispatch_to_targets(request, section, &output, section.label())?;
    }
    Ok(())
}

/// Render the whole case once and dispatch it under the case title
pub fn render_by_case<R: Reporter + ?Sized>(
    reporter: &R,
    request: &ReportRequest<'_>,
    renderer: &SectionRenderer<'_>,
) -> Result<()> {
    let options =
        reporter.get_prioritized_options(request.case, request.choice, request.runtime)?;

    let output = renderer(request.case, Section::Null, &options)?;
    reporter.dispatch_to_targets(request, Section::Null, &output, &request.case.title)
}

/// Where one selected target sends its output
enum Destination<'p> {
    Filesystem(&'p Path),
    Console,
    Callback,
    Unsupported(Target),
}

/// Send `output` to every selected target, stopping at the first failure.
///
/// Consoles get the output as rendered; files and callbacks get it flattened
/// to plain text.
pub fn dispatch_to_targets<R: Reporter + ?Sized>(
    reporter: &R,
    request: &ReportRequest<'_>,
    section: Section,
    output: &RenderedOutput,
    filename_base: &str,
) -> Result<()> {
    let choice = request.choice;
    let prioritized = Prioritized::resolve(reporter.config(), choice);
    let targets = select_targets_from_args(request.args, choice, &prioritized.default_targets)?;

    let destinations = targets
        .into_iter()
        .map(|target| match target {
            Target::Filesystem => request.path.map(Destination::Filesystem).ok_or_else(|| {
                ReportError::type_error(
                    ErrorTag::DispatchFilesystemPathRequired,
                    format!(
                        "choice '{}' targets the filesystem but no output path was given",
                        choice.name()
                    ),
                )
            }),
            Target::Console => Ok(Destination::Console),
            Target::Callback => Ok(Destination::Callback),
            other => Ok(Destination::Unsupported(other)),
        })
        .collect::<Result<Vec<_>>>()?;

    let plain = output.flatten_to_plain();
    let output_format = choice.output_format();

    for destination in destinations {
        match destination {
            Destination::Filesystem(path) => {
                let mut filename = sanitize_filename(filename_base);
                if !prioritized.file_suffix.is_empty() {
                    filename.push('.');
                    filename.push_str(&prioritized.file_suffix);
                }
                let written = target_filesystem(
                    path,
                    &prioritized.subdir,
                    &filename,
                    &plain,
                    prioritized.file_unique,
                    prioritized.file_append,
                )?;
                info!(
                    "{} report for '{}' written to {}",
                    reporter.name(),
                    request.case.title,
                    written.display()
                );
                if let Some(log_path) = request.session.and_then(|s| s.reports_log_path()) {
                    let entry =
                        ReportLogEntry::new(request.case, reporter.name(), output_format, &written);
                    append_report_log(log_path, &entry)?;
                }
            }
            Destination::Console => {
                debug!("Printing {} report for '{}'", reporter.name(), request.case.title);
                target_console(request.session, output)?;
            }
            Destination::Callback => {
                target_callback(request.callback, request.case, section, output_format, &plain);
            }
            Destination::Unsupported(target) => {
                return Err(ReportError::value(
                    ErrorTag::DispatchUnsupportedTarget,
                    format!(
                        "reporter '{}' cannot dispatch to target '{}'",
                        reporter.name(),
                        target
                    ),
                ));
            }
        }
    }
    Ok(())
}
