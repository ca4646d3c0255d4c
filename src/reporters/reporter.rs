// Reporter trait and the state every reporter shares

use crate::case::{Case, ReporterCallback};
use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::args::ParsedArgs;
use crate::reporters::choice::{Choice, ChoiceConf};
use crate::reporters::choices::Choices;
use crate::reporters::config::ReporterConfig;
use crate::reporters::enums::{Section, Target};
use crate::reporters::options::{ReporterOptions, find_options_by_kind};
use crate::reporters::orchestration;
use crate::reporters::output::RenderedOutput;
use crate::reporters::runtime::ReporterRuntimeConfig;
use crate::session::Session;
use crate::utils::si_units::{BASE_INTERVAL_UNIT, BASE_MEMORY_UNIT, BASE_OPS_PER_INTERVAL_UNIT};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Renders one section of a case with resolved options
pub type SectionRenderer<'r> =
    dyn Fn(&Case, Section, &ReporterOptions) -> Result<RenderedOutput> + 'r;

/// Everything one `Reporter::report` call works with
#[derive(Clone, Copy)]
pub struct ReportRequest<'a> {
    pub args: &'a ParsedArgs,
    pub case: &'a Case,
    pub choice: &'a Choice,
    /// Base directory for filesystem output
    pub path: Option<&'a Path>,
    pub session: Option<&'a Session>,
    pub callback: Option<&'a ReporterCallback>,
    pub runtime: &'a ReporterRuntimeConfig,
}

impl<'a> ReportRequest<'a> {
    pub fn new(
        args: &'a ParsedArgs,
        case: &'a Case,
        choice: &'a Choice,
        runtime: &'a ReporterRuntimeConfig,
    ) -> Self {
        Self {
            args,
            case,
            choice,
            path: None,
            session: None,
            callback: None,
            runtime,
        }
    }

    pub fn with_path(mut self, path: &'a Path) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_session(mut self, session: &'a Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_callback(mut self, callback: &'a ReporterCallback) -> Self {
        self.callback = Some(callback);
        self
    }
}

/// Configuration plus the live set of choices of a reporter
#[derive(Debug)]
pub struct ReporterCore {
    config: ReporterConfig,
    choices: RwLock<Choices>,
}

impl ReporterCore {
    /// Bind every configured choice to the reporter
    pub fn new(config: ReporterConfig) -> Result<Self> {
        let mut choices = Choices::new();
        for conf in config.choices().iter() {
            choices.add(Choice::new(&config, conf.clone())?)?;
        }
        Ok(Self {
            config,
            choices: RwLock::new(choices),
        })
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Snapshot of the current choices
    pub fn choices(&self) -> Choices {
        self.choices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn add_choice(&self, conf: ChoiceConf) -> Result<Choice> {
        let choice = Choice::new(&self.config, conf)?;
        self.choices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(choice.clone())?;
        Ok(choice)
    }
}

/// A benchmark reporter.
///
/// Implementors supply `core`, `render` and `run_report`; validation,
/// option prioritization and target dispatch are shared.
pub trait Reporter: Send + Sync {
    fn core(&self) -> &ReporterCore;

    /// Render one section of a case
    fn render(
        &self,
        case: &Case,
        section: Section,
        options: &ReporterOptions,
    ) -> Result<RenderedOutput>;

    /// Produce and dispatch output for an already validated request
    fn run_report(&self, request: &ReportRequest<'_>) -> Result<()>;

    fn name(&self) -> &str {
        self.core().config().name()
    }

    fn description(&self) -> &str {
        self.core().config().description()
    }

    fn config(&self) -> &ReporterConfig {
        self.core().config()
    }

    fn choices(&self) -> Choices {
        self.core().choices()
    }

    /// Bind and add a new choice to this reporter
    fn add_choice(&self, conf: ChoiceConf) -> Result<Choice> {
        self.core().add_choice(conf)
    }

    fn get_hardcoded_default_options(&self) -> Option<Arc<ReporterOptions>> {
        self.config().hardcoded_default_options().cloned()
    }

    /// Runtime override when installed, else the hardcoded default
    fn get_default_options(&self, runtime: &ReporterRuntimeConfig) -> Result<Arc<ReporterOptions>> {
        let config = self.config();
        runtime.resolve_default_options(
            config.name(),
            config.options_kind(),
            config.hardcoded_default_options(),
        )
    }

    /// Case options of this reporter's kind, then choice options, then defaults
    fn get_prioritized_options(
        &self,
        case: &Case,
        choice: &Choice,
        runtime: &ReporterRuntimeConfig,
    ) -> Result<Arc<ReporterOptions>> {
        let kind = self.config().options_kind();

        if let Some(options) = find_options_by_kind(&case.options, kind) {
            debug!("Using case options for reporter '{}'", self.name());
            return Ok(options);
        }

        if let Some(options) = choice.options() {
            if options.kind() != kind {
                return Err(ReportError::type_error(
                    ErrorTag::OptionsKindMismatch,
                    format!(
                        "options of choice '{}' must be {:?}, got {:?}",
                        choice.name(),
                        kind,
                        options.kind()
                    ),
                ));
            }
            return Ok(options.clone());
        }

        self.get_default_options(runtime)
    }

    /// Validate the request and run the report
    fn report(&self, request: &ReportRequest<'_>) -> Result<()> {
        let config = self.config();
        let choice = request.choice;

        if choice.reporter_name() != config.name() {
            return Err(ReportError::value(
                ErrorTag::ReportChoiceReporterMismatch,
                format!(
                    "choice '{}' belongs to reporter '{}', not '{}'",
                    choice.name(),
                    choice.reporter_name(),
                    config.name()
                ),
            ));
        }
        if let Some(section) = choice.sections().iter().find(|s| !config.sections().contains(s)) {
            return Err(ReportError::value(
                ErrorTag::ReportUnsupportedSection,
                format!("reporter '{}' does not support section '{}'", config.name(), section),
            ));
        }
        if let Some(target) = choice.targets().iter().find(|t| !config.targets().contains(t)) {
            return Err(ReportError::value(
                ErrorTag::ReportUnsupportedTarget,
                format!("reporter '{}' does not support target '{}'", config.name(), target),
            ));
        }
        if !config.formats().contains(&choice.output_format()) {
            return Err(ReportError::value(
                ErrorTag::ReportUnsupportedFormat,
                format!(
                    "reporter '{}' does not support format '{}'",
                    config.name(),
                    choice.output_format()
                ),
            ));
        }
        if choice.targets().contains(&Target::Filesystem) && request.path.is_none() {
            return Err(ReportError::type_error(
                ErrorTag::ReportFilesystemPathRequired,
                format!(
                    "choice '{}' can write to the filesystem, a report path is required",
                    choice.name()
                ),
            ));
        }

        if request.case.results.is_empty() {
            debug!(
                "Case '{}' has no results, skipping reporter '{}'",
                request.case.title,
                config.name()
            );
            return Ok(());
        }

        self.run_report(request)
    }

    /// Render and dispatch each section of the choice
    fn render_by_section(&self, request: &ReportRequest<'_>) -> Result<()> {
        orchestration::render_by_section(self, request, &|case, section, options| {
            self.render(case, section, options)
        })
    }

    /// Render and dispatch the whole case once
    fn render_by_case(&self, request: &ReportRequest<'_>) -> Result<()> {
        orchestration::render_by_case(self, request, &|case, section, options| {
            self.render(case, section, options)
        })
    }

    /// Deliver rendered output to the targets selected for the request
    fn dispatch_to_targets(
        &self,
        request: &ReportRequest<'_>,
        section: Section,
        output: &RenderedOutput,
        filename_base: &str,
    ) -> Result<()> {
        orchestration::dispatch_to_targets(self, request, section, output, filename_base)
    }

    /// Unit the raw values of `section` are measured in
    fn get_base_unit_for_section(&self, section: Section) -> Result<&'static str> {
        match section {
            Section::Ops => Ok(BASE_OPS_PER_INTERVAL_UNIT),
            Section::Timing => Ok(BASE_INTERVAL_UNIT),
            Section::Memory | Section::PeakMemory => Ok(BASE_MEMORY_UNIT),
            Section::Null => Err(ReportError::not_implemented(
                ErrorTag::SectionBaseUnitNotImplemented,
                format!("no base unit for section '{}'", section),
            )),
        }
    }

    /// Every displayed statistic of `section` across all results of `case`
    fn get_all_stats_values(&self, case: &Case, section: Section) -> Result<Vec<f64>> {
        let mut values = Vec::new();
        for results in &case.results {
            values.extend(results.results_section(section)?.displayed_values());
        }
        Ok(values)
    }
}
