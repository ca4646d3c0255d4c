// Output targets: filesystem, console and callback

use crate::case::{Case, ReporterCallback};
use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::enums::{Format, Section};
use crate::reporters::output::{Console, RenderedOutput, TermConsole};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Width of the uniqueness counter prefix (`001_`)
const UNIQUE_COUNTER_WIDTH: usize = 3;

/// Write `output` to `path/subdir/filename`.
///
/// With `unique`, the name gets the first free `NNN_` prefix counting from 001.
/// With `append`, an existing file is extended. Without either, an existing
/// file is an error. Parent directories are created as needed. Returns the
/// path written.
pub fn target_filesystem(
    path: &Path,
    subdir: &str,
    filename: &str,
    output: &RenderedOutput,
    unique: bool,
    append: bool,
) -> Result<PathBuf> {
    if unique && append {
        return Err(ReportError::value(
            ErrorTag::FilesystemAppendUniqueIncompatible,
            "append and unique options are not compatible when writing to filesystem",
        ));
    }

    let directory = path.join(subdir);
    let filename = if unique {
        let mut counter = 1usize;
        while directory
            .join(unique_name(counter, filename))
            .exists()
        {
            counter += 1;
        }
        unique_name(counter, filename)
    } else {
        filename.to_string()
    };
    let output_path = directory.join(filename);

    std::fs::create_dir_all(&directory).map_err(|e| {
        ReportError::io(
            ErrorTag::FilesystemCreateDir,
            format!("cannot create report directory {}", directory.display()),
            e,
        )
    })?;

    if output_path.exists() && !append {
        return Err(ReportError::value(
            ErrorTag::FilesystemOutputFileExists,
            format!(
                "output file already exists and neither append nor unique is set: {}",
                output_path.display()
            ),
        ));
    }

    let mut options = OpenOptions::new();
    if append {
        options.append(true).create(true);
    } else {
        options.write(true).create_new(true);
    }
    let mut file = options.open(&output_path).map_err(|e| {
        ReportError::io(
            ErrorTag::FilesystemWrite,
            format!("cannot open {}", output_path.display()),
            e,
        )
    })?;
    file.write_all(&output.as_bytes()).map_err(|e| {
        ReportError::io(
            ErrorTag::FilesystemWrite,
            format!("cannot write {}", output_path.display()),
            e,
        )
    })?;

    debug!("Wrote report to {}", output_path.display());
    Ok(output_path)
}

fn unique_name(counter: usize, filename: &str) -> String {
    format!("{:0width$}_{}", counter, filename, width = UNIQUE_COUNTER_WIDTH)
}

/// Print `output` on the session console, or on a fresh terminal console
pub fn target_console(session: Option<&Session>, output: &RenderedOutput) -> Result<()> {
    let printed = match session {
        Some(session) => session.console().print(output),
        None => TermConsole::default().print(output),
    };
    printed.map_err(|e| ReportError::io(ErrorTag::ConsoleWrite, "cannot print report", e))
}

/// Hand `output` to `callback`; nothing happens without one
pub fn target_callback(
    callback: Option<&ReporterCallback>,
    case: &Case,
    section: Section,
    output_format: Format,
    output: &RenderedOutput,
) {
    if let Some(callback) = callback {
        debug!("Invoking callback for '{}' ({})", case.title, section);
        callback(case, section, output_format, output);
    }
}

/// One line of the reports log, written for every report file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLogEntry {
    pub version: u32,
    pub timestamp: String,
    pub benchmark_group: String,
    pub benchmark_title: String,
    pub reporter_name: String,
    pub output_format: String,
    pub filepath: String,
}

impl ReportLogEntry {
    pub fn new(case: &Case, reporter_name: &str, output_format: Format, filepath: &Path) -> Self {
        Self {
            version: 1,
            timestamp: chrono::Local::now().to_rfc3339(),
            benchmark_group: case.group.clone(),
            benchmark_title: case.title.clone(),
            reporter_name: reporter_name.to_string(),
            output_format: output_format.log_name().to_string(),
            filepath: filepath.to_string_lossy().replace('\\', "/"),
        }
    }
}

/// Append `entry` as a single JSON line to the reports log
pub fn append_report_log(log_path: &Path, entry: &ReportLogEntry) -> Result<()> {
    let line = serde_json::to_string(entry).map_err(|e| {
        ReportError::serialization(ErrorTag::ReportsLogWrite, format!("cannot encode log entry: {}", e))
    })?;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReportError::io(
                ErrorTag::ReportsLogWrite,
                format!("cannot create {}", parent.display()),
                e,
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_path)
        .map_err(|e| {
            ReportError::io(
                ErrorTag::ReportsLogWrite,
                format!("cannot open reports log {}", log_path.display()),
                e,
            )
        })?;
    writeln!(file, "{}", line).map_err(|e| {
        ReportError::io(
            ErrorTag::ReportsLogWrite,
            format!("cannot write reports log {}", log_path.display()),
            e,
        )
    })
}
