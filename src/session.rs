// Reporting session: cases, parsed choice flags and shared outputs

use crate::case::Case;
use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::args::ParsedArgs;
use crate::reporters::choice::Choice;
use crate::reporters::manager::ReporterManager;
use crate::reporters::output::{Console, TermConsole};
use crate::reporters::reporter::ReportRequest;
use crate::reporters::runtime::ReporterRuntimeConfig;
use crate::utils::sanitize_filename;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs every selected choice against every case.
///
/// Filesystem reports land in `output_dir/<platform>/<group>/<timestamp>/`.
pub struct Session {
    manager: Arc<ReporterManager>,
    console: Arc<dyn Console>,
    args: ParsedArgs,
    runtime: ReporterRuntimeConfig,
    output_dir: Option<PathBuf>,
    reports_log_path: Option<PathBuf>,
    timestamp: String,
    cases: Vec<Case>,
}

impl Session {
    pub fn new(manager: Arc<ReporterManager>) -> Self {
        Self {
            manager,
            console: Arc::new(TermConsole::default()),
            args: ParsedArgs::new(),
            runtime: ReporterRuntimeConfig::new(),
            output_dir: None,
            reports_log_path: None,
            timestamp: chrono::Local::now().format("%Y%m%d%H%M%S").to_string(),
            cases: Vec::new(),
        }
    }

    pub fn with_console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = console;
        self
    }

    pub fn with_args(mut self, args: ParsedArgs) -> Self {
        self.args = args;
        self
    }

    pub fn with_runtime_config(mut self, runtime: ReporterRuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_reports_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reports_log_path = Some(path.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn add_case(&mut self, case: Case) {
        self.cases.push(case);
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn console(&self) -> &dyn Console {
        self.console.as_ref()
    }

    pub fn manager(&self) -> &ReporterManager {
        &self.manager
    }

    pub fn args(&self) -> &ParsedArgs {
        &self.args
    }

    pub fn runtime(&self) -> &ReporterRuntimeConfig {
        &self.runtime
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn reports_log_path(&self) -> Option<&Path> {
        self.reports_log_path.as_deref()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Directory filesystem reports for `case` are written under
    pub fn case_output_path(&self, case: &Case) -> Option<PathBuf> {
        let platform = sanitize_filename(&format!(
            "{}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        ));
        self.output_dir.as_ref().map(|dir| {
            dir.join(platform)
                .join(sanitize_filename(&case.group))
                .join(&self.timestamp)
        })
    }

    /// Choices whose flags were given
    pub fn selected_choices(&self) -> Vec<Choice> {
        self.manager.selected_choices(&self.args)
    }

    /// Report every case through every selected choice.
    ///
    /// Returns the number of `report` calls made; stops at the first failure.
    pub fn report(&self) -> Result<usize> {
        let choices = self.selected_choices();
        if choices.is_empty() {
            info!("No reporters selected");
            return Ok(0);
        }

        let mut reported = 0;
        for choice in &choices {
            let reporter = self.manager.get(choice.reporter_name()).ok_or_else(|| {
                ReportError::key(
                    ErrorTag::ManagerUnknownReporter,
                    format!(
                        "choice '{}' belongs to unregistered reporter '{}'",
                        choice.name(),
                        choice.reporter_name()
                    ),
                )
            })?;

            for case in &self.cases {
                debug!("Reporting '{}' with choice '{}'", case.title, choice.name());
                let path = self.case_output_path(case);
                let mut request =
                    ReportRequest::new(&self.args, case, choice, &self.runtime).with_session(self);
                if let Some(path) = path.as_deref() {
                    request = request.with_path(path);
                }
                if let Some(callback) = case.callback.as_ref() {
                    request = request.with_callback(callback);
                }
                reporter.report(&request)?;
                reported += 1;
            }
        }
        Ok(reported)
    }
}
