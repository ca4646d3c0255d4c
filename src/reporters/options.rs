// Reporter-specific options, selected by an explicit discriminator

use crate::error::{ErrorTag, ReportError, Result};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Discriminator each options variant declares.
///
/// Lookups compare kinds for equality, so options for one reporter never
/// satisfy another reporter even when their shapes look alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsKind {
    Csv,
    Table,
    Json,
    Graph,
    /// Options owned by an externally registered reporter
    Custom(&'static str),
}

/// Options for the CSV reporter (no tunables yet)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvOptions;

/// Allowed range for `TableOptions::virtual_width`
pub const VIRTUAL_WIDTH_RANGE: RangeInclusive<usize> = 80..=10_000;

/// Options for the console table reporter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableOptions {
    virtual_width: Option<usize>,
}

impl TableOptions {
    /// `virtual_width` limits line width when tables go to files or callbacks
    pub fn new(virtual_width: Option<usize>) -> Result<Self> {
        if let Some(width) = virtual_width
            && !VIRTUAL_WIDTH_RANGE.contains(&width)
        {
            return Err(ReportError::value(
                ErrorTag::TableOptionsInvalidVirtualWidth,
                format!(
                    "virtual_width must be between {} and {}, got {}",
                    VIRTUAL_WIDTH_RANGE.start(),
                    VIRTUAL_WIDTH_RANGE.end(),
                    width
                ),
            ));
        }
        Ok(Self { virtual_width })
    }

    pub fn virtual_width(&self) -> Option<usize> {
        self.virtual_width
    }
}

/// Options for the JSON reporter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonOptions {
    /// Include raw samples alongside statistics
    pub full_data: bool,
}

/// Allowed range for graph width and height, in pixels
pub const GRAPH_SIZE_RANGE: RangeInclusive<u32> = 500..=4000;

/// Options for the scatter-plot graph reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    width: u32,
    height: u32,
    y_starts_at_zero: bool,
}

impl GraphOptions {
    pub fn new(width: u32, height: u32, y_starts_at_zero: bool) -> Result<Self> {
        for (name, value) in [("width", width), ("height", height)] {
            if !GRAPH_SIZE_RANGE.contains(&value) {
                return Err(ReportError::value(
                    ErrorTag::GraphOptionsInvalidSize,
                    format!(
                        "graph {} must be between {} and {} pixels, got {}",
                        name,
                        GRAPH_SIZE_RANGE.start(),
                        GRAPH_SIZE_RANGE.end(),
                        value
                    ),
                ));
            }
        }
        Ok(Self {
            width,
            height,
            y_starts_at_zero,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pin the y axis at zero with 10% headroom above the highest point
    pub fn y_starts_at_zero(&self) -> bool {
        self.y_starts_at_zero
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 750,
            y_starts_at_zero: true,
        }
    }
}

/// Free-form options for reporters registered outside this crate
#[derive(Debug, Clone, PartialEq)]
pub struct CustomOptions {
    kind: &'static str,
    pub values: Map<String, Value>,
}

impl CustomOptions {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            values: Map::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Options attached to a case, a choice, or installed as a reporter default
#[derive(Debug, Clone, PartialEq)]
pub enum ReporterOptions {
    Csv(CsvOptions),
    Table(TableOptions),
    Json(JsonOptions),
    Graph(GraphOptions),
    Custom(CustomOptions),
}

impl ReporterOptions {
    pub fn kind(&self) -> OptionsKind {
        match self {
            ReporterOptions::Csv(_) => OptionsKind::Csv,
            ReporterOptions::Table(_) => OptionsKind::Table,
            ReporterOptions::Json(_) => OptionsKind::Json,
            ReporterOptions::Graph(_) => OptionsKind::Graph,
            ReporterOptions::Custom(custom) => OptionsKind::Custom(custom.kind),
        }
    }

    pub fn as_table(&self) -> Option<&TableOptions> {
        match self {
            ReporterOptions::Table(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&JsonOptions> {
        match self {
            ReporterOptions::Json(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphOptions> {
        match self {
            ReporterOptions::Graph(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomOptions> {
        match self {
            ReporterOptions::Custom(options) => Some(options),
            _ => None,
        }
    }

    /// Wrap in the shared handle used by cases, choices and defaults
    pub fn shared(self) -> Arc<ReporterOptions> {
        Arc::new(self)
    }
}

/// First entry in `options` whose kind is exactly `kind`
pub fn find_options_by_kind(
    options: &[Arc<ReporterOptions>],
    kind: OptionsKind,
) -> Option<Arc<ReporterOptions>> {
    options.iter().find(|o| o.kind() == kind).cloned()
}
