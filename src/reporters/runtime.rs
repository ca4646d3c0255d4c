// Runtime configuration threaded through report calls

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::options::{OptionsKind, ReporterOptions};
use std::collections::HashMap;
use std::sync::Arc;

/// Default options slot for one reporter
#[derive(Debug, Clone, Default)]
pub enum DefaultOptions {
    /// Use the reporter's hardcoded default
    #[default]
    Default,
    /// Use these options instead of the hardcoded default
    Override(Arc<ReporterOptions>),
}

/// Per-run settings passed to `Reporter::report`.
///
/// Holds default-options overrides keyed by reporter name. Each run (or test)
/// builds its own value, so nothing leaks between runs.
#[derive(Debug, Clone, Default)]
pub struct ReporterRuntimeConfig {
    default_options: HashMap<String, DefaultOptions>,
}

impl ReporterRuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or reset the default options for a reporter
    pub fn set_default_options(&mut self, reporter: &str, options: DefaultOptions) {
        match options {
            DefaultOptions::Default => {
                self.default_options.remove(reporter);
            }
            overridden => {
                self.default_options.insert(reporter.to_string(), overridden);
            }
        }
    }

    /// Builder form of `set_default_options`
    pub fn with_default_options(mut self, reporter: &str, options: Arc<ReporterOptions>) -> Self {
        self.set_default_options(reporter, DefaultOptions::Override(options));
        self
    }

    pub fn default_options(&self, reporter: &str) -> DefaultOptions {
        self.default_options.get(reporter).cloned().unwrap_or_default()
    }

    /// Resolve the effective default for a reporter: override first, then hardcoded
    pub fn resolve_default_options(
        &self,
        reporter: &str,
        kind: OptionsKind,
        hardcoded: Option<&Arc<ReporterOptions>>,
    ) -> Result<Arc<ReporterOptions>> {
        match self.default_options(reporter) {
            DefaultOptions::Override(options) => {
                if options.kind() != kind {
                    return Err(ReportError::type_error(
                        ErrorTag::OptionsKindMismatch,
                        format!(
                            "default options for reporter '{}' must be {:?}, got {:?}",
                            reporter,
                            kind,
                            options.kind()
                        ),
                    ));
                }
                Ok(options)
            }
            DefaultOptions::Default => hardcoded.cloned().ok_or_else(|| {
                ReportError::not_implemented(
                    ErrorTag::OptionsMissingHardcodedDefault,
                    format!("reporter '{}' does not provide hardcoded default options", reporter),
                )
            }),
        }
    }
}
