// Rich table reporter: styled per-section tables for terminals

use crate::case::Case;
use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::choice::ChoiceConf;
use crate::reporters::config::ReporterConfig;
use crate::reporters::csv::mark_text;
use crate::reporters::enums::{FlagType, Format, Section, Target};
use crate::reporters::options::{OptionsKind, ReporterOptions, TableOptions};
use crate::reporters::output::{RenderedOutput, StyledDocument, StyledSpan};
use crate::reporters::reporter::{ReportRequest, Reporter, ReporterCore};
use crate::results::Stats;
use crate::utils::{DEFAULT_SIGNIFICANT_FIGURES, si_scale_for_smallest, sigfigs};
use console::{Alignment, Style, measure_text_width, pad_str};

pub const RICH_TABLE_REPORTER_NAME: &str = "rich-table";

const TABLE_TARGETS: [Target; 3] = [Target::Console, Target::Filesystem, Target::Callback];

/// Renders each section as a boxed table with styled title and header
#[derive(Debug)]
pub struct RichTableReporter {
    core: ReporterCore,
}

impl RichTableReporter {
    pub fn new() -> Result<Self> {
        let config = ReporterConfig::builder(RICH_TABLE_REPORTER_NAME, OptionsKind::Table)
            .description("Displays benchmark results as a rich text table on the console.")
            .sections(Section::MEASURED)
            .targets(TABLE_TARGETS)
            .default_targets([Target::Console])
            .formats([Format::RichText])
            .subdir("rich")
            .file_suffix("txt")
            .file_unique(false)
            .file_append(true)
            .hardcoded_default_options(ReporterOptions::Table(TableOptions::default()))
            .choice(table_choice(
                "--rich-table",
                "rich-table",
                "All results as rich text tables (filesystem, console, callback, default=console)",
                &Section::MEASURED,
            )?)
            .choice(table_choice(
                "--rich-table.ops",
                "rich-table-ops",
                "Ops/second results as rich text tables (filesystem, console, callback, default=console)",
                &[Section::Ops],
            )?)
            .choice(table_choice(
                "--rich-table.timing",
                "rich-table-timing",
                "Timing results as rich text tables (filesystem, console, callback, default=console)",
                &[Section::Timing],
            )?)
            .choice(table_choice(
                "--rich-table.memory",
                "rich-table-memory",
                "Memory results as rich text tables (filesystem, console, callback, default=console)",
                &[Section::Memory, Section::PeakMemory],
            )?)
            .build()?;

        Ok(Self {
            core: ReporterCore::new(config)?,
        })
    }
}

fn table_choice(flag: &str, name: &str, description: &str, sections: &[Section]) -> Result<ChoiceConf> {
    ChoiceConf::builder(name)
        .flag(flag)
        .flag_type(FlagType::TargetList)
        .description(description)
        .sections(sections.iter().copied())
        .targets(TABLE_TARGETS)
        .output_format(Format::RichText)
        .build()
}

/// One statistic column with its own SI scale
struct ScaledColumn {
    label: &'static str,
    unit: String,
    scale: f64,
    value: fn(&Stats) -> f64,
}

impl ScaledColumn {
    fn new(label: &'static str, value: fn(&Stats) -> f64, stats: &[&Stats], base_unit: &str) -> Self {
        let numbers: Vec<f64> = stats.iter().map(|s| value(s)).collect();
        let (unit, scale) = si_scale_for_smallest(&numbers, base_unit);
        Self {
            label,
            unit,
            scale,
            value,
        }
    }

    fn header(&self) -> String {
        format!("{} {}", self.label, self.unit)
    }

    fn cell(&self, stats: &Stats) -> String {
        format!(
            "{:.2}",
            sigfigs((self.value)(stats) * self.scale, DEFAULT_SIGNIFICANT_FIGURES)
        )
    }
}

/// Boxed table layout; cells are centered in their columns
struct TableLayout {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl TableLayout {
    fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
        Self {
            headers,
            rows,
            widths,
        }
    }

    /// Width of a full table line including borders
    fn total_width(&self) -> usize {
        self.widths.iter().map(|w| w + 3).sum::<usize>() + 1
    }

    fn border(&self, left: &str, fill: &str, joint: &str, right: &str) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| fill.repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(joint), right)
    }

    fn line(&self, cells: &[String], edge: &str, cell_style: &Style) -> Vec<StyledSpan> {
        let mut spans = vec![StyledSpan::plain(edge)];
        for (cell, width) in cells.iter().zip(&self.widths) {
            let padded = pad_str(cell, *width, Alignment::Center, None);
            spans.push(StyledSpan::new(format!(" {} ", padded), cell_style.clone()));
            spans.push(StyledSpan::plain(edge));
        }
        spans
    }

    fn render(&self, title: &[String], width: Option<usize>) -> StyledDocument {
        let mut document = StyledDocument::new().with_width(width);
        let title_style = Style::new().bold().green();
        let header_style = Style::new().bold().magenta();
        let table_width = self.total_width();

        for line in title {
            let centered = pad_str(line, table_width, Alignment::Center, None);
            document.push_styled(centered.into_owned(), title_style.clone());
        }
        document.push_plain(self.border("┏", "━", "┳", "┓"));
        document.push_line(self.line(&self.headers, "┃", &header_style));
        document.push_plain(self.border("┡", "━", "╇", "┩"));
        for row in &self.rows {
            document.push_line(self.line(row, "│", &Style::new()));
        }
        document.push_plain(self.border("└", "─", "┴", "┘"));
        document
    }
}

impl Reporter for RichTableReporter {
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
        let options = options.as_table().ok_or_else(|| {
            ReportError::type_error(
                ErrorTag::RenderWrongOptions,
                format!("rich-table reporter cannot render with {:?} options", options.kind()),
            )
        })?;

        let base_unit = self.get_base_unit_for_section(section)?;
        let stats = case
            .results
            .iter()
            .map(|r| r.results_section(section))
            .collect::<Result<Vec<&Stats>>>()?;

        let columns = [
            ScaledColumn::new("mean", |s| s.mean, &stats, base_unit),
            ScaledColumn::new("median", |s| s.median, &stats, base_unit),
            ScaledColumn::new("min", |s| s.minimum, &stats, base_unit),
            ScaledColumn::new("max", |s| s.maximum, &stats, base_unit),
            ScaledColumn::new("5th", |s| s.percentile(5), &stats, base_unit),
            ScaledColumn::new("95th", |s| s.percentile(95), &stats, base_unit),
            ScaledColumn::new("std dev", |s| s.standard_deviation, &stats, base_unit),
        ];

        let mut headers: Vec<String> = ["N", "Iterations", "Rounds", "Elapsed Seconds"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        headers.extend(columns.iter().map(ScaledColumn::header));
        headers.push("rsd%".to_string());
        headers.extend(case.variation_cols.values().cloned());

        let rows = case
            .results
            .iter()
            .zip(&stats)
            .map(|(results, stats)| {
                let mut row = vec![
                    results.n.to_string(),
                    results.iterations.to_string(),
                    results.rounds.to_string(),
                    format!("{:.2}", results.total_elapsed),
                ];
                row.extend(columns.iter().map(|c| c.cell(stats)));
                row.push(format!(
                    "{:.2}%",
                    sigfigs(stats.relative_standard_deviation, DEFAULT_SIGNIFICANT_FIGURES)
                ));
                row.extend(
                    case.variation_cols
                        .keys()
                        .map(|key| mark_text(results.variation_marks.get(key))),
                );
                row
            })
            .collect();

        let title = vec![
            case.title.clone(),
            section.label().to_string(),
            String::new(),
            case.description.clone(),
        ];
        let document = TableLayout::new(headers, rows).render(&title, options.virtual_width());
        Ok(RenderedOutput::Styled(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Results;

    fn case() -> Case {
        let ops = Stats::from_samples(vec![1000.0, 2000.0, 3000.0]).unwrap();
        let timing = Stats::from_samples(vec![0.001, 0.0005, 0.00025]).unwrap();
        Case::new("sorting", "sort list", "sorts a list")
            .unwrap()
            .with_results(Results::new("sorting", "sort list", 10.0, 3, 0.5, ops, timing))
    }

    fn table_options(width: Option<usize>) -> ReporterOptions {
        ReporterOptions::Table(TableOptions::new(width).unwrap())
    }

    #[test]
    fn test_render_produces_styled_table() {
        let reporter = RichTableReporter::new().unwrap();

        let output = reporter
            .render(&case(), Section::Timing, &table_options(None))
            .unwrap();

        let RenderedOutput::Styled(document) = &output else {
            panic!("expected styled output");
        };
        let plain = document.to_plain();
        assert!(plain.contains("sort list"));
        assert!(plain.contains("per round timings"));
        assert!(plain.contains("mean μs"));
        assert!(plain.contains("rsd%"));
        assert!(plain.contains("┏"));
        assert!(document.lines()[0][0].style == Style::new().bold().green());
    }

    #[test]
    fn test_virtual_width_limits_flattened_lines() {
        let reporter = RichTableReporter::new().unwrap();

        let output = reporter
            .render(&case(), Section::Ops, &table_options(Some(80)))
            .unwrap();

        let flattened = output.flatten_to_plain();
        for line in flattened.as_text().lines() {
            assert!(measure_text_width(line) <= 80, "line too wide: {}", line);
        }
    }

    #[test]
    fn test_file_defaults() {
        let reporter = RichTableReporter::new().unwrap();
        let config = reporter.config();

        assert_eq!(config.subdir(), "rich");
        assert_eq!(config.file_suffix(), "txt");
        assert!(config.file_append());
        assert!(!config.file_unique());
        assert!(config.default_targets().contains(&Target::Console));
    }
}
