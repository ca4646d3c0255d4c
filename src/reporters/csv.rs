// CSV reporter: one tagged CSV document per section

use crate::case::Case;
use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::choice::ChoiceConf;
use crate::reporters::config::ReporterConfig;
use crate::reporters::enums::{FlagType, Format, Section, Target};
use crate::reporters::options::{CsvOptions, OptionsKind, ReporterOptions};
use crate::reporters::output::RenderedOutput;
use crate::reporters::reporter::{ReportRequest, Reporter, ReporterCore};
use crate::utils::{DEFAULT_SIGNIFICANT_FIGURES, si_scale_for_smallest, sigfigs};
use ::csv::WriterBuilder;
use serde_json::Value;

pub const CSV_REPORTER_NAME: &str = "csv";

const CSV_TARGETS: [Target; 3] = [Target::Filesystem, Target::Console, Target::Callback];

/// Writes statistics as CSV, tagged with `# title`, `# description` and `# unit` rows
#[derive(Debug)]
pub struct CsvReporter {
    core: ReporterCore,
}

impl CsvReporter {
    pub fn new() -> Result<Self> {
        let config = ReporterConfig::builder(CSV_REPORTER_NAME, OptionsKind::Csv)
            .description("Outputs benchmark results to CSV files.")
            .sections(Section::MEASURED)
            .targets(CSV_TARGETS)
            .default_targets([Target::Filesystem])
            .formats([Format::Csv])
            .file_suffix("csv")
            .file_unique(true)
            .file_append(false)
            .hardcoded_default_options(ReporterOptions::Csv(CsvOptions))
            .choice(csv_choice(
                "--csv",
                "csv",
                "Output all results to CSV (filesystem, console, callback, default=filesystem)",
                &Section::MEASURED,
            )?)
            .choice(csv_choice(
                "--csv.ops",
                "csv-ops",
                "Output ops/second results to CSV (filesystem, console, callback, default=filesystem)",
                &[Section::Ops],
            )?)
            .choice(csv_choice(
                "--csv.timing",
                "csv-timing",
                "Output timing results to CSV (filesystem, console, callback, default=filesystem)",
                &[Section::Timing],
            )?)
            .choice(csv_choice(
                "--csv.memory",
                "csv-memory",
                "Output memory results to CSV (filesystem, console, callback, default=filesystem)",
                &[Section::Memory, Section::PeakMemory],
            )?)
            .build()?;

        Ok(Self {
            core: ReporterCore::new(config)?,
        })
    }
}

fn csv_choice(flag: &str, name: &str, description: &str, sections: &[Section]) -> Result<ChoiceConf> {
    ChoiceConf::builder(name)
        .flag(flag)
        .flag_type(FlagType::TargetList)
        .description(description)
        .sections(sections.iter().copied())
        .targets(CSV_TARGETS)
        .output_format(Format::Csv)
        .build()
}

/// Text for a variation mark cell; strings are written without quotes
pub(crate) fn mark_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn encoding_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::serialization(ErrorTag::RenderCsvEncoding, format!("cannot write CSV: {}", e))
}

impl Reporter for CsvReporter {
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
        if options.kind() != OptionsKind::Csv {
            return Err(ReportError::type_error(
                ErrorTag::RenderWrongOptions,
                format!("csv reporter cannot render with {:?} options", options.kind()),
            ));
        }

        let base_unit = self.get_base_unit_for_section(section)?;
        let all_values = self.get_all_stats_values(case, section)?;
        let (unit, scale) = si_scale_for_smallest(&all_values, base_unit);
        let round = |value: f64| sigfigs(value, DEFAULT_SIGNIFICANT_FIGURES).to_string();

        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        writer
            .write_record([format!("# title: {}", case.title)])
            .map_err(encoding_error)?;
        writer
            .write_record([format!("# description: {}", case.description)])
            .map_err(encoding_error)?;
        writer
            .write_record([format!("# unit: {}", unit)])
            .map_err(encoding_error)?;

        let mut header = vec![
            "N".to_string(),
            "Iterations".to_string(),
            "Elapsed Seconds".to_string(),
            format!("mean ({})", unit),
            format!("median ({})", unit),
            format!("min ({})", unit),
            format!("max ({})", unit),
            format!("5th ({})", unit),
            format!("95th ({})", unit),
            format!("std dev ({})", unit),
            "rsd (%)".to_string(),
        ];
        header.extend(case.variation_cols.values().cloned());
        writer.write_record(&header).map_err(encoding_error)?;

        for results in &case.results {
            let stats = results.results_section(section)?;
            let mut row = vec![
                results.n.to_string(),
                results.iterations.to_string(),
                results.total_elapsed.to_string(),
            ];
            row.extend(stats.displayed_values().iter().map(|v| round(v * scale)));
            row.push(round(stats.relative_standard_deviation));
            row.extend(
                case.variation_cols
                    .keys()
                    .map(|key| mark_text(results.variation_marks.get(key))),
            );
            writer.write_record(&row).map_err(encoding_error)?;
        }

        let bytes = writer.into_inner().map_err(encoding_error)?;
        let text = String::from_utf8(bytes).map_err(encoding_error)?;
        Ok(RenderedOutput::Plain(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::options::JsonOptions;
    use crate::results::{Results, Stats};

    fn case() -> Case {
        let ops = Stats::from_samples(vec![1000.0, 2000.0, 3000.0]).unwrap();
        let timing = Stats::from_samples(vec![0.001, 0.0005, 0.00025]).unwrap();
        let mut results = Results::new("sorting", "sort list", 10.0, 3, 0.5, ops, timing);
        results.variation_marks.insert("size".to_string(), Value::from(10));
        Case::new("sorting", "sort list", "sorts a list")
            .unwrap()
            .with_variation_col("size", "Size")
            .with_results(results)
    }

    #[test]
    fn test_render_ops_section() {
        let reporter = CsvReporter::new().unwrap();

        let output = reporter
            .render(&case(), Section::Ops, &ReporterOptions::Csv(CsvOptions))
            .unwrap();

        let text = output.as_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# title: sort list");
        assert_eq!(lines[1], "# description: sorts a list");
        assert_eq!(lines[2], "# unit: kOps/s");
        assert_eq!(
            lines[3],
            "N,Iterations,Elapsed Seconds,mean (kOps/s),median (kOps/s),min (kOps/s),max (kOps/s),5th (kOps/s),95th (kOps/s),std dev (kOps/s),rsd (%),Size"
        );
        assert!(lines[4].starts_with("10,3,0.5,2,2,1,3,"));
        assert!(lines[4].ends_with(",50,10"));
    }

    #[test]
    fn test_render_rejects_foreign_options() {
        let reporter = CsvReporter::new().unwrap();

        let err = reporter
            .render(&case(), Section::Ops, &ReporterOptions::Json(JsonOptions::default()))
            .unwrap_err();

        assert_eq!(err.tag(), ErrorTag::RenderWrongOptions);
    }

    #[test]
    fn test_choices() {
        let reporter = CsvReporter::new().unwrap();
        let choices = reporter.choices();

        let names: Vec<&str> = choices.names().collect();
        assert_eq!(names, vec!["csv", "csv-ops", "csv-timing", "csv-memory"]);
        let memory = choices.get("csv-memory").unwrap();
        assert_eq!(
            memory.sections().iter().copied().collect::<Vec<_>>(),
            vec![Section::Memory, Section::PeakMemory]
        );
        assert_eq!(memory.reporter_name(), "csv");
    }
}
