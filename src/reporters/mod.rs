// Reporters - choices, option resolution and output dispatch

pub mod args;
pub mod choice;
pub mod choices;
pub mod config;
pub mod csv;
pub mod enums;
pub mod graph;
pub mod json;
pub mod manager;
pub mod options;
pub mod orchestration;
pub mod output;
pub mod prioritized;
pub mod reporter;
pub mod runtime;
pub mod table;
pub mod targets;

pub use args::{ArgValue, ParsedArgs, collect_arg_list, flag_to_arg, select_targets_from_args};
pub use choice::{Choice, ChoiceConf};
pub use choices::{Choices, ChoicesConf};
pub use config::ReporterConfig;
pub use csv::CsvReporter;
pub use enums::{FlagType, Format, Section, Target};
pub use graph::ScatterPlotReporter;
pub use json::JsonReporter;
pub use manager::ReporterManager;
pub use options::{
    CsvOptions, CustomOptions, GraphOptions, JsonOptions, OptionsKind, ReporterOptions, TableOptions,
};
pub use output::{BufferConsole, Console, RenderedOutput, StyledDocument, StyledSpan, TermConsole};
pub use prioritized::Prioritized;
pub use reporter::{ReportRequest, Reporter, ReporterCore};
pub use runtime::{DefaultOptions, ReporterRuntimeConfig};
pub use table::RichTableReporter;
pub use targets::{target_callback, target_console, target_filesystem};
