// Registry of reporters and their command-line choices

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::args::{ParsedArgs, add_choice_flags, flag_to_arg};
use crate::reporters::choice::{Choice, ChoiceConf};
use crate::reporters::csv::CsvReporter;
use crate::reporters::graph::ScatterPlotReporter;
use crate::reporters::json::JsonReporter;
use crate::reporters::reporter::Reporter;
use crate::reporters::table::RichTableReporter;
use clap::{ArgMatches, Command};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Registered reporters, kept in registration order.
///
/// Reporter names are unique and no flag belongs to two reporters.
pub struct ReporterManager {
    reporters: RwLock<Vec<Arc<dyn Reporter>>>,
}

impl ReporterManager {
    pub fn new() -> Self {
        Self {
            reporters: RwLock::new(Vec::new()),
        }
    }

    /// Manager holding the csv, rich-table, json and graph reporters
    pub fn with_builtin_reporters() -> Result<Self> {
        let manager = Self::new();
        manager.register(Arc::new(CsvReporter::new()?))?;
        manager.register(Arc::new(RichTableReporter::new()?))?;
        manager.register(Arc::new(JsonReporter::new()?))?;
        manager.register(Arc::new(ScatterPlotReporter::new()?))?;
        Ok(manager)
    }

    pub fn register(&self, reporter: Arc<dyn Reporter>) -> Result<()> {
        let mut reporters = self
            .reporters
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if reporters.iter().any(|r| r.name() == reporter.name()) {
            return Err(ReportError::key(
                ErrorTag::ManagerDuplicateReporter,
                format!("reporter '{}' is already registered", reporter.name()),
            ));
        }

        let claimed: HashSet<String> = reporters
            .iter()
            .flat_map(|r| r.choices().all_choice_flags())
            .collect();
        if let Some(flag) = reporter
            .choices()
            .all_choice_flags()
            .into_iter()
            .find(|flag| claimed.contains(flag))
        {
            return Err(ReportError::value(
                ErrorTag::ManagerDuplicateFlag,
                format!(
                    "flag '{}' of reporter '{}' is already used by another reporter",
                    flag,
                    reporter.name()
                ),
            ));
        }

        tracing::debug!("Registering reporter '{}'", reporter.name());
        reporters.push(reporter);
        Ok(())
    }

    /// Remove a registered reporter
    pub fn unregister(&self, reporter: &Arc<dyn Reporter>) -> Result<()> {
        self.unregister_by_name(reporter.name()).map(|_| ())
    }

    /// Remove a reporter by name
    pub fn unregister_by_name(&self, name: &str) -> Result<Arc<dyn Reporter>> {
        let mut reporters = self
            .reporters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let position = reporters
            .iter()
            .position(|r| r.name() == name)
            .ok_or_else(|| {
                ReportError::key(
                    ErrorTag::ManagerUnknownReporter,
                    format!("reporter '{}' is not registered", name),
                )
            })?;
        Ok(reporters.remove(position))
    }

    pub fn unregister_all(&self) {
        self.reporters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Reporter>> {
        self.reporters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| r.name() == name)
            .cloned()
    }

    pub fn reporters(&self) -> Vec<Arc<dyn Reporter>> {
        self.reporters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.reporters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a choice to a registered reporter, keeping flags unique across reporters
    pub fn add_choice(&self, reporter_name: &str, conf: ChoiceConf) -> Result<Choice> {
        let reporter = self.get(reporter_name).ok_or_else(|| {
            ReportError::key(
                ErrorTag::ManagerUnknownReporter,
                format!("reporter '{}' is not registered", reporter_name),
            )
        })?;

        for other in self.reporters().iter().filter(|r| r.name() != reporter_name) {
            let flags = other.choices().all_choice_flags();
            if let Some(flag) = conf.flags().iter().find(|f| flags.contains(*f)) {
                return Err(ReportError::value(
                    ErrorTag::ManagerDuplicateFlag,
                    format!("flag '{}' is already used by reporter '{}'", flag, other.name()),
                ));
            }
        }

        reporter.add_choice(conf)
    }

    /// Choices of every reporter, in registration order
    pub fn choices(&self) -> Vec<Choice> {
        self.reporters()
            .iter()
            .flat_map(|r| r.choices().iter().cloned().collect::<Vec<_>>())
            .collect()
    }

    /// Choice owning the argument key `arg` (`csv.ops`, `rich_table`)
    pub fn choice_for_arg(&self, arg: &str) -> Option<Choice> {
        self.reporters()
            .iter()
            .find_map(|r| r.choices().get_choice_for_arg(arg).cloned())
    }

    /// Register every choice flag on a clap command
    pub fn add_flags_to_command(&self, command: Command) -> Command {
        self.choices()
            .iter()
            .fold(command, |command, choice| add_choice_flags(command, choice))
    }

    /// Extract choice flags from clap matches
    pub fn parse_args(&self, matches: &ArgMatches) -> ParsedArgs {
        let choices = self.choices();
        ParsedArgs::from_matches(matches, choices.iter())
    }

    /// Choices with at least one flag set in `args`, in registration order
    pub fn selected_choices(&self, args: &ParsedArgs) -> Vec<Choice> {
        self.choices()
            .into_iter()
            .filter(|choice| choice.flags().iter().any(|f| args.is_set(&flag_to_arg(f))))
            .collect()
    }
}

impl Default for ReporterManager {
    fn default() -> Self {
        Self::new()
    }
}
