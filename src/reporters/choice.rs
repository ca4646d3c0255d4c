// Choice configuration: one named report variant of a reporter

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::args::is_valid_flag;
use crate::reporters::config::ReporterConfig;
use crate::reporters::enums::{FlagType, Format, Section, Target};
use crate::reporters::options::ReporterOptions;
use serde_json::Value;
use std::collections::BTreeSet;
use std::ops::Deref;
use std::sync::Arc;

/// Longest accepted subdirectory override
pub const MAX_SUBDIR_LEN: usize = 64;
/// Longest accepted file suffix override
pub const MAX_FILE_SUFFIX_LEN: usize = 10;

/// Reporter-independent description of a report variant.
///
/// Immutable once built; use `ChoiceConf::builder` to construct one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceConf {
    flags: Vec<String>,
    flag_type: FlagType,
    name: String,
    description: String,
    sections: BTreeSet<Section>,
    targets: BTreeSet<Target>,
    default_targets: Option<BTreeSet<Target>>,
    output_format: Format,
    subdir: Option<String>,
    file_suffix: Option<String>,
    file_unique: Option<bool>,
    file_append: Option<bool>,
    options: Option<Arc<ReporterOptions>>,
    extra: Option<Value>,
}

impl ChoiceConf {
    pub fn builder(name: impl Into<String>) -> ChoiceConfBuilder {
        ChoiceConfBuilder::new(name)
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn flag_type(&self) -> FlagType {
        self.flag_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sections(&self) -> &BTreeSet<Section> {
        &self.sections
    }

    pub fn targets(&self) -> &BTreeSet<Target> {
        &self.targets
    }

    pub fn default_targets(&self) -> Option<&BTreeSet<Target>> {
        self.default_targets.as_ref()
    }

    pub fn output_format(&self) -> Format {
        self.output_format
    }

    pub fn subdir(&self) -> Option<&str> {
        self.subdir.as_deref()
    }

    pub fn file_suffix(&self) -> Option<&str> {
        self.file_suffix.as_deref()
    }

    pub fn file_unique(&self) -> Option<bool> {
        self.file_unique
    }

    pub fn file_append(&self) -> Option<bool> {
        self.file_append
    }

    pub fn options(&self) -> Option<&Arc<ReporterOptions>> {
        self.options.as_ref()
    }

    pub fn extra(&self) -> Option<&Value> {
        self.extra.as_ref()
    }
}

/// Builder for `ChoiceConf`; all validation happens in `build`
#[derive(Debug, Clone)]
pub struct ChoiceConfBuilder {
    name: String,
    flags: Vec<String>,
    flag_type: FlagType,
    description: String,
    sections: BTreeSet<Section>,
    targets: BTreeSet<Target>,
    default_targets: Option<BTreeSet<Target>>,
    output_format: Format,
    subdir: Option<String>,
    file_suffix: Option<String>,
    file_unique: Option<bool>,
    file_append: Option<bool>,
    options: Option<Arc<ReporterOptions>>,
    extra: Option<Value>,
}

impl ChoiceConfBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
            flag_type: FlagType::TargetList,
            description: String::new(),
            sections: BTreeSet::new(),
            targets: BTreeSet::new(),
            default_targets: None,
            output_format: Format::PlainText,
            subdir: None,
            file_suffix: None,
            file_unique: None,
            file_append: None,
            options: None,
            extra: None,
        }
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        let flag = flag.into();
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn flag_type(mut self, flag_type: FlagType) -> Self {
        self.flag_type = flag_type;
        self
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
        self.default_targets = Some(targets.into_iter().collect());
        self
    }

    pub fn output_format(mut self, format: Format) -> Self {
        self.output_format = format;
        self
    }

    pub fn subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    pub fn file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = Some(suffix.into());
        self
    }

    pub fn file_unique(mut self, unique: bool) -> Self {
        self.file_unique = Some(unique);
        self
    }

    pub fn file_append(mut self, append: bool) -> Self {
        self.file_append = Some(append);
        self
    }

    pub fn options(mut self, options: Arc<ReporterOptions>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn build(self) -> Result<ChoiceConf> {
        if self.flags.is_empty() {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfEmptyFlags,
                format!("choice '{}' must declare at least one flag", self.name),
            ));
        }
        if let Some(flag) = self.flags.iter().find(|f| !is_valid_flag(f)) {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfInvalidFlag,
                format!("choice '{}' has invalid flag '{}'", self.name, flag),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfBlankName,
                "choice name must not be blank",
            ));
        }
        if self.description.trim().is_empty() {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfBlankDescription,
                format!("choice '{}' must have a description", self.name),
            ));
        }
        if self.sections.is_empty() {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfEmptySections,
                format!("choice '{}' must declare at least one section", self.name),
            ));
        }
        if self.targets.is_empty() {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfEmptyTargets,
                format!("choice '{}' must declare at least one target", self.name),
            ));
        }
        if let Some(defaults) = &self.default_targets
            && !defaults.is_subset(&self.targets)
        {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfDefaultTargetsNotSubset,
                format!("default targets of choice '{}' must be among its targets", self.name),
            ));
        }
        if let Some(subdir) = &self.subdir
            && !is_alphanumeric_within(subdir, MAX_SUBDIR_LEN)
        {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfInvalidSubdir,
                format!(
                    "subdir '{}' of choice '{}' must be alphanumeric and at most {} characters",
                    subdir, self.name, MAX_SUBDIR_LEN
                ),
            ));
        }
        if let Some(suffix) = &self.file_suffix
            && !is_alphanumeric_within(suffix, MAX_FILE_SUFFIX_LEN)
        {
            return Err(ReportError::value(
                ErrorTag::ChoiceConfInvalidFileSuffix,
                format!(
                    "file suffix '{}' of choice '{}' must be alphanumeric and at most {} characters",
                    suffix, self.name, MAX_FILE_SUFFIX_LEN
                ),
            ));
        }

        let (file_unique, file_append) = match (self.file_unique, self.file_append) {
            (Some(unique), Some(append)) if unique == append => {
                return Err(ReportError::value(
                    ErrorTag::ChoiceConfFileUniqueAppendConflict,
                    format!(
                        "choice '{}': file_unique and file_append must differ, both are {}",
                        self.name, unique
                    ),
                ));
            }
            (Some(unique), None) => (Some(unique), Some(!unique)),
            (None, Some(append)) => (Some(!append), Some(append)),
            other => other,
        };

        Ok(ChoiceConf {
            flags: self.flags,
            flag_type: self.flag_type,
            name: self.name,
            description: self.description,
            sections: self.sections,
            targets: self.targets,
            default_targets: self.default_targets,
            output_format: self.output_format,
            subdir: self.subdir,
            file_suffix: self.file_suffix,
            file_unique,
            file_append,
            options: self.options,
            extra: self.extra,
        })
    }
}

/// Empty or ASCII alphanumeric, no longer than `max_len`
pub(crate) fn is_alphanumeric_within(value: &str, max_len: usize) -> bool {
    value.len() <= max_len && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A `ChoiceConf` bound to the reporter that owns it.
///
/// Holds the owning reporter's name rather than the reporter itself; the
/// reporter is looked up through the `ReporterManager` when needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    conf: Arc<ChoiceConf>,
    reporter: String,
}

impl Choice {
    /// Bind `conf` to a reporter, checking it only uses what the reporter supports
    pub fn new(reporter: &ReporterConfig, conf: ChoiceConf) -> Result<Self> {
        if let Some(section) = conf.sections.iter().find(|s| !reporter.sections().contains(s)) {
            return Err(ReportError::value(
                ErrorTag::ChoiceUnsupportedSection,
                format!(
                    "choice '{}' uses section '{}' not supported by reporter '{}'",
                    conf.name,
                    section,
                    reporter.name()
                ),
            ));
        }
        if let Some(target) = conf.targets.iter().find(|t| !reporter.targets().contains(t)) {
            return Err(ReportError::value(
                ErrorTag::ChoiceUnsupportedTarget,
                format!(
                    "choice '{}' uses target '{}' not supported by reporter '{}'",
                    conf.name,
                    target,
                    reporter.name()
                ),
            ));
        }
        if !reporter.formats().contains(&conf.output_format) {
            return Err(ReportError::value(
                ErrorTag::ChoiceUnsupportedFormat,
                format!(
                    "choice '{}' uses format '{}' not supported by reporter '{}'",
                    conf.name,
                    conf.output_format,
                    reporter.name()
                ),
            ));
        }

        Ok(Self {
            conf: Arc::new(conf),
            reporter: reporter.name().to_string(),
        })
    }

    /// Name of the owning reporter
    pub fn reporter_name(&self) -> &str {
        &self.reporter
    }

    pub fn conf(&self) -> &ChoiceConf {
        &self.conf
    }
}

impl Deref for Choice {
    type Target = ChoiceConf;

    fn deref(&self) -> &Self::Target {
        &self.conf
    }
}
