// Closed vocabularies shared by reporters, choices and targets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Section of benchmark results a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Operations per second
    Ops,
    /// Time per round
    Timing,
    /// Memory usage
    Memory,
    /// Peak memory usage
    PeakMemory,
    /// Whole-case rendering, not tied to one section
    Null,
}

impl Section {
    /// Sections backed by statistics in `Results`
    pub const MEASURED: [Section; 4] = [
        Section::Ops,
        Section::Timing,
        Section::Memory,
        Section::PeakMemory,
    ];

    /// Human readable label, also used to derive per-section filenames
    pub fn label(&self) -> &'static str {
        match self {
            Section::Ops => "operations per second",
            Section::Timing => "per round timings",
            Section::Memory => "memory usage",
            Section::PeakMemory => "peak memory usage",
            Section::Null => "null section",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination a rendered report is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Console,
    Filesystem,
    Callback,
    /// Handled by the reporter itself inside `run_report`
    Custom,
    Null,
    Invalid,
}

impl Target {
    pub const ALL: [Target; 6] = [
        Target::Console,
        Target::Filesystem,
        Target::Callback,
        Target::Custom,
        Target::Null,
        Target::Invalid,
    ];

    /// Token used on the command line (`--csv console`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Console => "console",
            Target::Filesystem => "filesystem",
            Target::Callback => "callback",
            Target::Custom => "custom",
            Target::Null => "null",
            Target::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Target::ALL
            .into_iter()
            .find(|target| target.as_str() == token)
            .ok_or_else(|| format!("unknown target '{}'", s))
    }
}

/// Serialization family of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    PlainText,
    RichText,
    Csv,
    Json,
    Graph,
    Custom,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::PlainText => "plain text",
            Format::RichText => "rich text",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Graph => "graph",
            Format::Custom => "custom",
        }
    }

    /// Upper-case identifier written to the reports log
    pub fn log_name(&self) -> &'static str {
        match self {
            Format::PlainText => "PLAIN_TEXT",
            Format::RichText => "RICH_TEXT",
            Format::Csv => "CSV",
            Format::Json => "JSON",
            Format::Graph => "GRAPH",
            Format::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a choice's flags are exposed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    /// Presence flag, `--json`
    Boolean,
    /// Zero or more target names per occurrence, `--csv console filesystem`
    TargetList,
}
