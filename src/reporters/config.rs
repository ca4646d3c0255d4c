// Reporter configuration, validated once at construction

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::choice::{ChoiceConf, MAX_FILE_SUFFIX_LEN, MAX_SUBDIR_LEN, is_alphanumeric_within};
use crate::reporters::choices::ChoicesConf;
use crate::reporters::enums::{Format, Section, Target};
use crate::reporters::options::{OptionsKind, ReporterOptions};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Static description of a reporter: what it supports and its file defaults
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    name: String,
    description: String,
    options_kind: OptionsKind,
    sections: BTreeSet<Section>,
    targets: BTreeSet<Target>,
    default_targets: BTreeSet<Target>,
    formats: BTreeSet<Format>,
    subdir: String,
    file_suffix: String,
    file_unique: bool,
    file_append: bool,
    choices: ChoicesConf,
    hardcoded_default_options: Option<Arc<ReporterOptions>>,
}

impl ReporterConfig {
    pub fn builder(name: impl Into<String>, options_kind: OptionsKind) -> ReporterConfigBuilder {
        ReporterConfigBuilder::new(name, options_kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options_kind(&self) -> OptionsKind {
        self.options_kind
    }

    pub fn sections(&self) -> &BTreeSet<Section> {
        &self.sections
    }

    pub fn targets(&self) -> &BTreeSet<Target> {
        &self.targets
    }

    pub fn default_targets(&self) -> &BTreeSet<Target> {
        &self.default_targets
    }

    pub fn formats(&self) -> &BTreeSet<Format> {
        &self.formats
    }

    pub fn subdir(&self) -> &str {
        &self.subdir
    }

    pub fn file_suffix(&self) -> &str {
        &self.file_suffix
    }

    pub fn file_unique(&self) -> bool {
        self.file_unique
    }

    pub fn file_append(&self) -> bool {
        self.file_append
    }

    pub fn choices(&self) -> &ChoicesConf {
        &self.choices
    }

    pub fn hardcoded_default_options(&self) -> Option<&Arc<ReporterOptions>> {
        self.hardcoded_default_options.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct ReporterConfigBuilder {
    name: String,
    description: String,
    options_kind: OptionsKind,
    sections: BTreeSet<Section>,
    targets: BTreeSet<Target>,
    default_targets: BTreeSet<Target>,
    formats: BTreeSet<Format>,
    subdir: String,
    file_suffix: String,
    file_unique: bool,
    file_append: bool,
    choices: Vec<ChoiceConf>,
    hardcoded_default_options: Option<Arc<ReporterOptions>>,
}

impl ReporterConfigBuilder {
    fn new(name: impl Into<String>, options_kind: OptionsKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            options_kind,
            sections: BTreeSet::new(),
            targets: BTreeSet::new(),
            default_targets: BTreeSet::new(),
            formats: BTreeSet::new(),
            subdir: String::new(),
            file_suffix: String::new(),
            file_unique: true,
            file_append: false,
            choices: Vec::new(),
            hardcoded_default_options: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections = sections.into_iter().collect();
        self
    }

    pub fn targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn default_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.default_targets = targets.into_iter().collect();
        self
    }

    pub fn formats(mut self, formats: impl IntoIterator<Item = Format>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    pub fn subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = subdir.into();
        self
    }

    pub fn file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = suffix.into();
        self
    }

    pub fn file_unique(mut self, unique: bool) -> Self {
        self.file_unique = unique;
        self
    }

    pub fn file_append(mut self, append: bool) -> Self {
        self.file_append = append;
        self
    }

    pub fn choice(mut self, choice: ChoiceConf) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn hardcoded_default_options(mut self, options: ReporterOptions) -> Self {
        self.hardcoded_default_options = Some(Arc::new(options));
        self
    }

    pub fn build(self) -> Result<ReporterConfig> {
        if self.name.trim().is_empty() {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigBlankName,
                "reporter name must not be blank",
            ));
        }
        if self.description.trim().is_empty() {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigBlankDescription,
                format!("reporter '{}' must have a description", self.name),
            ));
        }
        if self.sections.is_empty() {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigEmptySections,
                format!("reporter '{}' must support at least one section", self.name),
            ));
        }
        if self.targets.is_empty() {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigEmptyTargets,
                format!("reporter '{}' must support at least one target", self.name),
            ));
        }
        if self.formats.is_empty() {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigEmptyFormats,
                format!("reporter '{}' must support at least one format", self.name),
            ));
        }
        if !self.default_targets.is_subset(&self.targets) {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigDefaultTargetsNotSubset,
                format!("default targets of reporter '{}' must be among its targets", self.name),
            ));
        }
        if !is_alphanumeric_within(&self.subdir, MAX_SUBDIR_LEN) {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigInvalidSubdir,
                format!(
                    "subdir '{}' of reporter '{}' must be alphanumeric and at most {} characters",
                    self.subdir, self.name, MAX_SUBDIR_LEN
                ),
            ));
        }
        if !is_alphanumeric_within(&self.file_suffix, MAX_FILE_SUFFIX_LEN) {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigInvalidFileSuffix,
                format!(
                    "file suffix '{}' of reporter '{}' must be alphanumeric and at most {} characters",
                    self.file_suffix, self.name, MAX_FILE_SUFFIX_LEN
                ),
            ));
        }
        if self.file_unique == self.file_append {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigFileUniqueAppendConflict,
                format!(
                    "reporter '{}': exactly one of file_unique and file_append must be set",
                    self.name
                ),
            ));
        }
        if self.choices.is_empty() {
            return Err(ReportError::value(
                ErrorTag::ReporterConfigEmptyChoices,
                format!("reporter '{}' must declare at least one choice", self.name),
            ));
        }
        if let Some(options) = &self.hardcoded_default_options
            && options.kind() != self.options_kind
        {
            return Err(ReportError::type_error(
                ErrorTag::OptionsKindMismatch,
                format!(
                    "hardcoded default options of reporter '{}' must be {:?}, got {:?}",
                    self.name,
                    self.options_kind,
                    options.kind()
                ),
            ));
        }

        let choices = ChoicesConf::from_entries(self.choices)?;

        Ok(ReporterConfig {
            name: self.name,
            description: self.description,
            options_kind: self.options_kind,
            sections: self.sections,
            targets: self.targets,
            default_targets: self.default_targets,
            formats: self.formats,
            subdir: self.subdir,
            file_suffix: self.file_suffix,
            file_unique: self.file_unique,
            file_append: self.file_append,
            choices,
            hardcoded_default_options: self.hardcoded_default_options,
        })
    }
}
