// JSON reporter: one document per case

use crate::case::Case;
use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::choice::ChoiceConf;
use crate::reporters::config::ReporterConfig;
use crate::reporters::enums::{FlagType, Format, Section, Target};
use crate::reporters::options::{JsonOptions, OptionsKind, ReporterOptions};
use crate::reporters::output::RenderedOutput;
use crate::reporters::reporter::{ReportRequest, Reporter, ReporterCore};

pub const JSON_REPORTER_NAME: &str = "json";

const JSON_TARGETS: [Target; 3] = [Target::Filesystem, Target::Callback, Target::Console];

#[derive(Debug)]
pub struct JsonReporter {
    core: ReporterCore,
}

impl JsonReporter {
    pub fn new() -> Result<Self> {
        let json = ChoiceConf::builder("json")
            .flag("--json")
            .flag_type(FlagType::TargetList)
            .description("Output results to JSON (filesystem, console, callback, default=filesystem)")
            .sections([Section::Null])
            .targets(JSON_TARGETS)
            .output_format(Format::Json)
            .build()?;
        let json_data = ChoiceConf::builder("json-data")
            .flag("--json-data")
            .flag_type(FlagType::TargetList)
            .description(
                "Output results to JSON with full data (filesystem, console, callback, default=filesystem)",
            )
            .sections([Section::Null])
            .targets(JSON_TARGETS)
            .output_format(Format::Json)
            .options(ReporterOptions::Json(JsonOptions { full_data: true }).shared())
            .build()?;

        let config = ReporterConfig::builder(JSON_REPORTER_NAME, OptionsKind::Json)
            .description("Outputs benchmark results to JSON files.")
            .sections([Section::Null])
            .targets(JSON_TARGETS)
            .default_targets([Target::Filesystem])
            .formats([Format::Json])
            .file_suffix("json")
            .file_unique(true)
            .file_append(false)
            .hardcoded_default_options(ReporterOptions::Json(JsonOptions::default()))
            .choice(json)
            .choice(json_data)
            .build()?;

        Ok(Self {
            core: ReporterCore::new(config)?,
        })
    }
}

impl Reporter for JsonReporter {
    fn core(&self) -> &ReporterCore {
        &self.core
    }

    fn run_report(&self, request: &ReportRequest<'_>) -> Result<()> {
        self.render_by_case(request)
    }

    fn render(
        &self,
        case: &Case,
        _section: Section,
        options: &ReporterOptions,
    ) -> Result<RenderedOutput> {
        let options = options.as_json().ok_or_else(|| {
            ReportError::type_error(
                ErrorTag::RenderWrongOptions,
                format!("json reporter cannot render with {:?} options", options.kind()),
            )
        })?;

        let mut text = serde_json::to_string_pretty(&case.as_json(options.full_data)).map_err(|e| {
            ReportError::serialization(
                ErrorTag::RenderJsonEncoding,
                format!("cannot encode case '{}': {}", case.title, e),
            )
        })?;
        text.push('\n');
        Ok(RenderedOutput::Plain(text))
    }
}
