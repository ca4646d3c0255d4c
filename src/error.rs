// Structured errors for the reporting subsystem

use thiserror::Error;

/// Machine-checkable identifier for the exact site and reason of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorTag {
    // Case / Results / Stats
    CaseParse,
    CaseBlankGroup,
    CaseBlankTitle,
    ResultsUnsupportedSection,
    StatsEmptySamples,

    // Options
    OptionsKindMismatch,
    OptionsMissingHardcodedDefault,
    TableOptionsInvalidVirtualWidth,
    GraphOptionsInvalidSize,

    // ChoiceConf
    ChoiceConfEmptyFlags,
    ChoiceConfInvalidFlag,
    ChoiceConfBlankName,
    ChoiceConfBlankDescription,
    ChoiceConfEmptySections,
    ChoiceConfEmptyTargets,
    ChoiceConfDefaultTargetsNotSubset,
    ChoiceConfInvalidSubdir,
    ChoiceConfInvalidFileSuffix,
    ChoiceConfFileUniqueAppendConflict,

    // Choice bound to a reporter
    ChoiceUnsupportedSection,
    ChoiceUnsupportedTarget,
    ChoiceUnsupportedFormat,

    // Choices / ChoicesConf
    ChoicesDuplicateName,
    ChoicesDuplicateFlag,
    ChoicesKeyNameMismatch,
    ChoicesUnknownName,

    // ReporterConfig
    ReporterConfigBlankName,
    ReporterConfigBlankDescription,
    ReporterConfigEmptySections,
    ReporterConfigEmptyTargets,
    ReporterConfigEmptyFormats,
    ReporterConfigDefaultTargetsNotSubset,
    ReporterConfigInvalidSubdir,
    ReporterConfigInvalidFileSuffix,
    ReporterConfigFileUniqueAppendConflict,
    ReporterConfigEmptyChoices,

    // Reporter::report
    ReportChoiceReporterMismatch,
    ReportUnsupportedSection,
    ReportUnsupportedTarget,
    ReportUnsupportedFormat,
    ReportFilesystemPathRequired,

    // Argument handling
    ArgsInvalidFlag,
    ArgsUnknownTarget,
    ArgsUnsupportedTarget,

    // Dispatch
    DispatchUnsupportedTarget,
    DispatchFilesystemPathRequired,
    SectionBaseUnitNotImplemented,

    // Targets
    FilesystemAppendUniqueIncompatible,
    FilesystemOutputFileExists,
    FilesystemCreateDir,
    FilesystemWrite,
    ReportsLogWrite,
    ConsoleWrite,

    // Renderers
    RenderWrongOptions,
    RenderCsvEncoding,
    RenderJsonEncoding,
    RenderGraph,

    // ReporterManager
    ManagerDuplicateReporter,
    ManagerDuplicateFlag,
    ManagerUnknownReporter,
}

/// Errors raised while configuring reporters or dispatching reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// An argument or value has the wrong kind
    #[error("{message} [{tag:?}]")]
    Type { tag: ErrorTag, message: String },

    /// A value is out of range or conflicts with other configuration
    #[error("{message} [{tag:?}]")]
    Value { tag: ErrorTag, message: String },

    /// Requested behavior has no implementation for this input
    #[error("{message} [{tag:?}]")]
    NotImplemented { tag: ErrorTag, message: String },

    /// Lookup or naming collision in a keyed collection
    #[error("{message} [{tag:?}]")]
    Key { tag: ErrorTag, message: String },

    /// Filesystem or console I/O failed
    #[error("{message}: {source} [{tag:?}]")]
    Io {
        tag: ErrorTag,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoding rendered output failed
    #[error("{message} [{tag:?}]")]
    Serialization { tag: ErrorTag, message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    pub fn type_error(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self::Type {
            tag,
            message: message.into(),
        }
    }

    pub fn value(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self::Value {
            tag,
            message: message.into(),
        }
    }

    pub fn not_implemented(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self::NotImplemented {
            tag,
            message: message.into(),
        }
    }

    pub fn key(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self::Key {
            tag,
            message: message.into(),
        }
    }

    pub fn io(tag: ErrorTag, message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            tag,
            message: message.into(),
            source,
        }
    }

    pub fn serialization(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self::Serialization {
            tag,
            message: message.into(),
        }
    }

    /// Tag identifying where the error was raised
    pub fn tag(&self) -> ErrorTag {
        match self {
            Self::Type { tag, .. }
            | Self::Value { tag, .. }
            | Self::NotImplemented { tag, .. }
            | Self::Key { tag, .. }
            | Self::Io { tag, .. }
            | Self::Serialization { tag, .. } => *tag,
        }
    }

    pub fn is_value_error(&self) -> bool {
        matches!(self, Self::Value { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_accessor() {
        let err = ReportError::value(ErrorTag::ChoicesDuplicateName, "duplicate");
        assert_eq!(err.tag(), ErrorTag::ChoicesDuplicateName);
        assert!(err.is_value_error());
    }

    #[test]
    fn test_io_error_display_includes_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ReportError::io(ErrorTag::FilesystemWrite, "cannot write report", source);

        let text = err.to_string();
        assert!(text.contains("cannot write report"));
        assert!(text.contains("denied"));
        assert!(text.contains("FilesystemWrite"));
    }
}
