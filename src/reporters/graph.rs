// Scatter-plot graph reporter: one SVG image per section

use crate::case::Case;
use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::choice::ChoiceConf;
use crate::reporters::config::ReporterConfig;
use crate::reporters::csv::mark_text;
use crate::reporters::enums::{FlagType, Format, Section, Target};
use crate::reporters::options::{GraphOptions, OptionsKind, ReporterOptions};
use crate::reporters::output::RenderedOutput;
use crate::reporters::reporter::{ReportRequest, Reporter, ReporterCore};
use crate::utils::{DEFAULT_SIGNIFICANT_FIGURES, si_scale_for_smallest, sigfigs};
use plotters::prelude::*;
use std::ops::Range;

pub const GRAPH_REPORTER_NAME: &str = "graph";

const GRAPH_TARGETS: [Target; 2] = [Target::Filesystem, Target::Callback];

/// Plots the mean of a section for every result of a case
#[derive(Debug)]
pub struct ScatterPlotReporter {
    core: ReporterCore,
}

impl ScatterPlotReporter {
    pub fn new() -> Result<Self> {
        let config = ReporterConfig::builder(GRAPH_REPORTER_NAME, OptionsKind::Graph)
            .description("Outputs benchmark results as graphs.")
            .sections(Section::MEASURED)
            .targets(GRAPH_TARGETS)
            .default_targets([Target::Filesystem])
            .formats([Format::Graph])
            .file_suffix("svg")
            .file_unique(true)
            .file_append(false)
            .hardcoded_default_options(ReporterOptions::Graph(GraphOptions::default()))
            .choice(graph_choice(
                "--scatter-plot",
                "scatter-plot",
                "Output all results as scatter plots (filesystem, callback, default=filesystem)",
                &Section::MEASURED,
            )?)
            .choice(graph_choice(
                "--scatter-plot.ops",
                "scatter-plot-ops",
                "Output ops/second results as a scatter plot (filesystem, callback, default=filesystem)",
                &[Section::Ops],
            )?)
            .choice(graph_choice(
                "--scatter-plot.timings",
                "scatter-plot-timings",
                "Output timing results as a scatter plot (filesystem, callback, default=filesystem)",
                &[Section::Timing],
            )?)
            .choice(graph_choice(
                "--scatter-plot.memory",
                "scatter-plot-memory",
                "Output memory results as scatter plots (filesystem, callback, default=filesystem)",
                &[Section::Memory, Section::PeakMemory],
            )?)
            .build()?;

        Ok(Self {
            core: ReporterCore::new(config)?,
        })
    }
}

fn graph_choice(
    flag: &str,
    name: &str,
    description: &str,
    sections: &[Section],
) -> Result<ChoiceConf> {
    ChoiceConf::builder(name)
        .flag(flag)
        .flag_type(FlagType::TargetList)
        .description(description)
        .sections(sections.iter().copied())
        .targets(GRAPH_TARGETS)
        .default_targets([Target::Filesystem])
        .output_format(Format::Graph)
        .build()
}

fn graph_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::serialization(ErrorTag::RenderGraph, format!("cannot draw graph: {}", e))
}

/// Y range covering `values`, padded by 10% of the span
fn y_range(values: &[f64], starts_at_zero: bool) -> Range<f64> {
    let top = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bottom = values.iter().copied().fold(f64::INFINITY, f64::min);
    if !top.is_finite() || !bottom.is_finite() {
        return 0.0..1.0;
    }
    if starts_at_zero {
        let top = if top > 0.0 { top * 1.10 } else { 1.0 };
        return 0.0..top;
    }
    let pad = match (top - bottom) * 0.10 {
        pad if pad > 0.0 => pad,
        _ => top.abs().max(1.0) * 0.10,
    };
    (bottom - pad)..(top + pad)
}

impl Reporter for ScatterPlotReporter {
    fn core(&self) -> &ReporterCore {
        &self.core
    }

    fn run_report(&self, request: &ReportRequest<'_>) -> Result<()> {
        self.render_by_section(request)
    }

    fn render(
        &self,
        case: &Case,
        section: Section,
        options: &ReporterOptions,
    ) -> Result<RenderedOutput> {
        let options = options.as_graph().ok_or_else(|| {
            ReportError::type_error(
                ErrorTag::RenderWrongOptions,
                format!("graph reporter cannot render with {:?} options", options.kind()),
            )
        })?;

        let base_unit = self.get_base_unit_for_section(section)?;
        let all_values = self.get_all_stats_values(case, section)?;
        let (unit, scale) = si_scale_for_smallest(&all_values, base_unit);

        let mut labels = Vec::with_capacity(case.results.len());
        let mut means = Vec::with_capacity(case.results.len());
        for results in &case.results {
            let marks: Vec<String> = case
                .variation_cols
                .keys()
                .map(|key| mark_text(results.variation_marks.get(key)))
                .collect();
            labels.push(if marks.is_empty() {
                results.n.to_string()
            } else {
                marks.join(" / ")
            });
            means.push(results.results_section(section)?.mean * scale);
        }
        let x_desc = if case.variation_cols.is_empty() {
            "N".to_string()
        } else {
            case.variation_cols.values().cloned().collect::<Vec<_>>().join(" / ")
        };
        let y_desc = format!("{} ({})", section.label(), unit);
        let columns = labels.len().max(1) as i32;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (options.width(), options.height()))
                .into_drawing_area();
            root.fill(&WHITE).map_err(graph_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(
                    &case.title,
                    ("sans-serif", 28).into_font().style(FontStyle::Bold),
                )
                .margin(20)
                .x_label_area_size(60)
                .y_label_area_size(110)
                .build_cartesian_2d(
                    (0..columns).into_segmented(),
                    y_range(&means, options.y_starts_at_zero()),
                )
                .map_err(graph_error)?;

            let x_label = |value: &SegmentValue<i32>| match value {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => usize::try_from(*i)
                    .ok()
                    .and_then(|i| labels.get(i))
                    .cloned()
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            };
            let y_label = |value: &f64| {
                format!("{} {}", sigfigs(*value, DEFAULT_SIGNIFICANT_FIGURES), unit)
            };
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len() + 1)
                .x_label_formatter(&x_label)
                .y_label_formatter(&y_label)
                .x_desc(x_desc)
                .y_desc(y_desc)
                .draw()
                .map_err(graph_error)?;

            chart
                .draw_series(means.iter().enumerate().map(|(i, mean)| {
                    Circle::new((SegmentValue::CenterOf(i as i32), *mean), 5, BLUE.filled())
                }))
                .map_err(graph_error)?;

            root.present().map_err(graph_error)?;
        }

        Ok(RenderedOutput::Binary(svg.into_bytes()))
    }
}
