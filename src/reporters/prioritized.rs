// Choice-over-reporter resolution of file and target defaults

use crate::reporters::choice::Choice;
use crate::reporters::config::ReporterConfig;
use crate::reporters::enums::Target;
use std::collections::BTreeSet;

/// Effective dispatch settings for one choice of one reporter.
///
/// Every field takes the choice's value when the choice sets it, else the
/// reporter's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prioritized {
    pub default_targets: BTreeSet<Target>,
    pub subdir: String,
    pub file_suffix: String,
    pub file_unique: bool,
    pub file_append: bool,
}

impl Prioritized {
    pub fn resolve(config: &ReporterConfig, choice: &Choice) -> Self {
        Self {
            default_targets: prioritized_default_targets(config, choice),
            subdir: prioritized_subdir(config, choice),
            file_suffix: prioritized_file_suffix(config, choice),
            file_unique: prioritized_file_unique(config, choice),
            file_append: prioritized_file_append(config, choice),
        }
    }
}

pub fn prioritized_default_targets(config: &ReporterConfig, choice: &Choice) -> BTreeSet<Target> {
    choice
        .default_targets()
        .unwrap_or_else(|| config.default_targets())
        .clone()
}

pub fn prioritized_subdir(config: &ReporterConfig, choice: &Choice) -> String {
    choice.subdir().unwrap_or(config.subdir()).to_string()
}

pub fn prioritized_file_suffix(config: &ReporterConfig, choice: &Choice) -> String {
    choice.file_suffix().unwrap_or(config.file_suffix()).to_string()
}

pub fn prioritized_file_unique(config: &ReporterConfig, choice: &Choice) -> bool {
    choice.file_unique().unwrap_or(config.file_unique())
}

pub fn prioritized_file_append(config: &ReporterConfig, choice: &Choice) -> bool {
    choice.file_append().unwrap_or(config.file_append())
}
