// Benchmark results consumed by reporters

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::enums::Section;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Summary statistics for one measured section, expressed in base units
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub mean: f64,
    pub median: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub standard_deviation: f64,
    /// Standard deviation as a percentage of the mean
    pub relative_standard_deviation: f64,
    /// 0th through 100th percentiles, indexed by percent
    #[serde(default)]
    pub percentiles: Vec<f64>,
    /// Raw samples, kept only when the producer exported full data
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<f64>,
}

impl Stats {
    /// Compute statistics from raw samples
    pub fn from_samples(data: Vec<f64>) -> Result<Self> {
        if data.is_empty() {
            return Err(ReportError::value(
                ErrorTag::StatsEmptySamples,
                "cannot compute statistics from an empty sample set",
            ));
        }

        let mut sorted = data.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let count = sorted.len();

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = quantile(&sorted, 0.5);
        let standard_deviation = if count > 1 {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };
        let relative_standard_deviation = if mean != 0.0 {
            standard_deviation / mean * 100.0
        } else {
            0.0
        };
        let percentiles = (0..=100)
            .map(|p| quantile(&sorted, p as f64 / 100.0))
            .collect();

        Ok(Self {
            mean,
            median,
            minimum: sorted[0],
            maximum: sorted[count - 1],
            standard_deviation,
            relative_standard_deviation,
            percentiles,
            data,
        })
    }

    /// Percentile by whole percent; missing percentiles read as zero
    pub fn percentile(&self, percent: usize) -> f64 {
        self.percentiles.get(percent).copied().unwrap_or(0.0)
    }

    /// Values the renderers display, used to pick a shared SI scale
    pub fn displayed_values(&self) -> [f64; 7] {
        [
            self.mean,
            self.median,
            self.minimum,
            self.maximum,
            self.percentile(5),
            self.percentile(95),
            self.standard_deviation,
        ]
    }

    /// Copy without raw samples
    pub fn summary(&self) -> Self {
        Self {
            data: Vec::new(),
            ..self.clone()
        }
    }
}

/// Linear interpolation between closest ranks on sorted data
fn quantile(sorted: &[f64], fraction: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = fraction * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

fn default_rounds() -> u64 {
    1
}

/// Results of one benchmark variation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub group: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Complexity weight of the variation (items processed per action)
    pub n: f64,
    #[serde(default = "default_rounds")]
    pub rounds: u64,
    /// Number of measured iterations
    pub iterations: u64,
    /// Wall-clock seconds spent measuring
    pub total_elapsed: f64,
    #[serde(default)]
    pub variation_marks: BTreeMap<String, Value>,
    pub ops_per_second: Stats,
    pub per_round_timings: Stats,
    #[serde(default)]
    pub memory: Stats,
    #[serde(default)]
    pub peak_memory: Stats,
    #[serde(default)]
    pub extra_info: Map<String, Value>,
}

impl Results {
    /// Create results with timing and throughput statistics; memory sections start empty
    pub fn new(
        group: impl Into<String>,
        title: impl Into<String>,
        n: f64,
        iterations: u64,
        total_elapsed: f64,
        ops_per_second: Stats,
        per_round_timings: Stats,
    ) -> Self {
        Self {
            group: group.into(),
            title: title.into(),
            description: String::new(),
            n,
            rounds: default_rounds(),
            iterations,
            total_elapsed,
            variation_marks: BTreeMap::new(),
            ops_per_second,
            per_round_timings,
            memory: Stats::default(),
            peak_memory: Stats::default(),
            extra_info: Map::new(),
        }
    }

    /// Statistics backing a measured section
    pub fn results_section(&self, section: Section) -> Result<&Stats> {
        match section {
            Section::Ops => Ok(&self.ops_per_second),
            Section::Timing => Ok(&self.per_round_timings),
            Section::Memory => Ok(&self.memory),
            Section::PeakMemory => Ok(&self.peak_memory),
            Section::Null => Err(ReportError::value(
                ErrorTag::ResultsUnsupportedSection,
                format!("section '{}' has no statistics in results", section),
            )),
        }
    }

    /// JSON view of the results; raw samples only when `full_data` is set
    pub fn as_json(&self, full_data: bool) -> Value {
        let mut copy = self.clone();
        if !full_data {
            copy.ops_per_second = copy.ops_per_second.summary();
            copy.per_round_timings = copy.per_round_timings.summary();
            copy.memory = copy.memory.summary();
            copy.peak_memory = copy.peak_memory.summary();
        }
        serde_json::to_value(copy).unwrap_or(Value::Null)
    }
}
