// Configuration file handling

use crate::reporters::graph::GRAPH_REPORTER_NAME;
use crate::reporters::json::JSON_REPORTER_NAME;
use crate::reporters::options::{GraphOptions, JsonOptions, ReporterOptions, TableOptions};
use crate::reporters::runtime::ReporterRuntimeConfig;
use crate::reporters::table::RICH_TABLE_REPORTER_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the reports log inside the output directory
pub const REPORTS_LOG_FILENAME: &str = "reports.log";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub json: JsonConfig,

    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Base directory for filesystem reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Record every written report in `<output_dir>/reports.log`
    #[serde(default = "default_reports_log")]
    pub reports_log: bool,

    /// Enable debug logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            reports_log: default_reports_log(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TableConfig {
    /// Line width for tables written to files or callbacks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_width: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JsonConfig {
    /// Include raw samples in JSON reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_data: Option<bool>,
}

/// Overrides for scatter-plot graphs; unset keys keep the built-in values
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_starts_at_zero: Option<bool>,
}

impl GraphConfig {
    fn is_set(&self) -> bool {
        self.width.is_some() || self.height.is_some() || self.y_starts_at_zero.is_some()
    }

    fn to_options(&self) -> crate::Result<GraphOptions> {
        let defaults = GraphOptions::default();
        GraphOptions::new(
            self.width.unwrap_or(defaults.width()),
            self.height.unwrap_or(defaults.height()),
            self.y_starts_at_zero.unwrap_or(defaults.y_starts_at_zero()),
        )
    }
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from(".benchmarks")
}

fn default_reports_log() -> bool {
    true
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // 1. .benchreportrc (current directory)
        // 2. ~/.benchreportrc
        // 3. .benchreportrc.toml (current directory)
        // 4. ~/.benchreportrc.toml
        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".benchreportrc"),
            home.join(".benchreportrc"),
            cwd.join(".benchreportrc.toml"),
            home.join(".benchreportrc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => return Some(config),
                    Err(e) => tracing::warn!("Ignoring {}: {:#}", path.display(), e),
                }
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid configuration")?;
        if let Some(width) = config.table.virtual_width {
            TableOptions::new(Some(width)).context("Invalid [table] section")?;
        }
        if config.graph.is_set() {
            config.graph.to_options().context("Invalid [graph] section")?;
        }
        Ok(config)
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Reports log location, when enabled
    pub fn reports_log_path(&self) -> Option<PathBuf> {
        self.general
            .reports_log
            .then(|| self.general.output_dir.join(REPORTS_LOG_FILENAME))
    }

    /// Default-option overrides for the reporters configured here
    pub fn to_runtime_config(&self) -> Result<ReporterRuntimeConfig> {
        let mut runtime = ReporterRuntimeConfig::new();
        if let Some(width) = self.table.virtual_width {
            let options = TableOptions::new(Some(width)).context("Invalid [table] section")?;
            runtime = runtime
                .with_default_options(RICH_TABLE_REPORTER_NAME, ReporterOptions::Table(options).shared());
        }
        if let Some(full_data) = self.json.full_data {
            runtime = runtime.with_default_options(
                JSON_REPORTER_NAME,
                ReporterOptions::Json(JsonOptions { full_data }).shared(),
            );
        }
        if self.graph.is_set() {
            let options = self.graph.to_options().context("Invalid [graph] section")?;
            runtime = runtime
                .with_default_options(GRAPH_REPORTER_NAME, ReporterOptions::Graph(options).shared());
        }
        Ok(runtime)
    }
}
