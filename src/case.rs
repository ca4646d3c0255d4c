// Benchmark case: a titled group of results plus reporting hooks

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::enums::{Format, Section};
use crate::reporters::options::ReporterOptions;
use crate::reporters::output::RenderedOutput;
use crate::results::Results;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Receives callback-targeted reports: `(case, section, output_format, output)`
pub type ReporterCallback = Arc<dyn Fn(&Case, Section, Format, &RenderedOutput) + Send + Sync>;

/// A benchmarked piece of code and its results
#[derive(Clone, Serialize, Deserialize)]
pub struct Case {
    pub group: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Variation keyword -> column label
    #[serde(default)]
    pub variation_cols: BTreeMap<String, String>,
    #[serde(default)]
    pub results: Vec<Results>,
    /// Reporter options that take precedence over choice and default options
    #[serde(skip)]
    pub options: Vec<Arc<ReporterOptions>>,
    #[serde(skip)]
    pub callback: Option<ReporterCallback>,
}

impl Case {
    pub fn new(
        group: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let case = Self {
            group: group.into(),
            title: title.into(),
            description: description.into(),
            variation_cols: BTreeMap::new(),
            results: Vec::new(),
            options: Vec::new(),
            callback: None,
        };
        case.validate()?;
        Ok(case)
    }

    /// Parse a serialized case
    pub fn from_json(content: &str) -> Result<Self> {
        let case: Case = serde_json::from_str(content).map_err(|e| {
            ReportError::serialization(ErrorTag::CaseParse, format!("invalid case JSON: {}", e))
        })?;
        case.validate()?;
        Ok(case)
    }

    fn validate(&self) -> Result<()> {
        if self.group.trim().is_empty() {
            return Err(ReportError::value(
                ErrorTag::CaseBlankGroup,
                "case group must not be blank",
            ));
        }
        if self.title.trim().is_empty() {
            return Err(ReportError::value(
                ErrorTag::CaseBlankTitle,
                "case title must not be blank",
            ));
        }
        Ok(())
    }

    pub fn with_results(mut self, results: Results) -> Self {
        self.results.push(results);
        self
    }

    pub fn with_variation_col(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.variation_cols.insert(key.into(), label.into());
        self
    }

    pub fn with_options(mut self, options: Arc<ReporterOptions>) -> Self {
        self.options.push(options);
        self
    }

    pub fn with_callback(mut self, callback: ReporterCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// JSON view of the case and its results
    pub fn as_json(&self, full_data: bool) -> Value {
        let results: Vec<Value> = self.results.iter().map(|r| r.as_json(full_data)).collect();
        json!({
            "type": "Case",
            "group": self.group,
            "title": self.title,
            "description": self.description,
            "variation_cols": self.variation_cols,
            "results": results,
        })
    }

    /// Mean of the section means across all results
    pub fn section_mean(&self, section: Section) -> Option<f64> {
        let means: Vec<f64> = self
            .results
            .iter()
            .filter_map(|r| r.results_section(section).ok())
            .map(|stats| stats.mean)
            .collect();
        if means.is_empty() {
            return None;
        }
        Some(means.iter().sum::<f64>() / means.len() as f64)
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("group", &self.group)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("variation_cols", &self.variation_cols)
            .field("results", &self.results.len())
            .field("options", &self.options)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
