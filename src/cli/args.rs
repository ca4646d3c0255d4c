// CLI argument definitions using Clap

use crate::config::{Config, REPORTS_LOG_FILENAME, default_output_dir};
use crate::reporters::args::ParsedArgs;
use crate::reporters::manager::ReporterManager;
use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Shells supported by `--completion`
pub const COMPLETION_SHELLS: [&str; 5] = ["bash", "zsh", "fish", "elvish", "powershell"];

/// Benchmark report renderer.
///
/// Reporter flags (`--csv`, `--rich-table.ops`, `--json-data`, ...) are added
/// at runtime from the registered reporters.
#[derive(Parser, Debug)]
#[command(name = "benchreport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render benchmark results as CSV, rich tables, JSON and graphs", long_about = None)]
pub struct Cli {
    /// Results file or directory of *.json results (repeatable)
    #[arg(short = 'i', long = "input", value_name = "RESULTS")]
    pub inputs: Vec<PathBuf>,

    /// Base directory for filesystem reports
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not record written reports in reports.log
    #[arg(long, default_value_t = false)]
    pub no_reports_log: bool,

    /// List reporters and their flags, then exit
    #[arg(long, default_value_t = false)]
    pub list_reporters: bool,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = COMPLETION_SHELLS)]
    pub completion: Option<String>,
}

impl Cli {
    /// Full command: static arguments plus every reporter flag
    pub fn command_with_reporters(manager: &ReporterManager) -> Command {
        manager.add_flags_to_command(Cli::command())
    }

    /// Parse `args`, returning the static arguments and the reporter flags
    pub fn try_parse_with_reporters<I, T>(
        manager: &ReporterManager,
        args: I,
    ) -> Result<(Cli, ParsedArgs), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_with_reporters(manager).try_get_matches_from(args)?;
        Self::from_matches_with_reporters(manager, &matches)
    }

    pub fn from_matches_with_reporters(
        manager: &ReporterManager,
        matches: &ArgMatches,
    ) -> Result<(Cli, ParsedArgs), clap::Error> {
        let cli = Cli::from_arg_matches(matches)?;
        Ok((cli, manager.parse_args(matches)))
    }

    /// Output directory: command line, then config file, then `.benchmarks`
    pub fn effective_output_dir(&self, config: Option<&Config>) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| config.map(|c| c.general.output_dir.clone()))
            .unwrap_or_else(default_output_dir)
    }

    /// Reports log inside the effective output directory, unless disabled
    pub fn effective_reports_log(&self, config: Option<&Config>) -> Option<PathBuf> {
        let enabled = config.is_none_or(|c| c.general.reports_log);
        (enabled && !self.no_reports_log)
            .then(|| self.effective_output_dir(config).join(REPORTS_LOG_FILENAME))
    }

    pub fn effective_verbose(&self, config: Option<&Config>) -> bool {
        self.verbose || config.is_some_and(|c| c.general.verbose)
    }
}
