// Shared fixtures for integration tests

#![allow(dead_code)]

use benchreport::reporters::{
    ChoiceConf, CustomOptions, Format, OptionsKind, RenderedOutput, ReportRequest, Reporter,
    ReporterConfig, ReporterCore, ReporterOptions, Section, Target,
};
use benchreport::results::{Results, Stats};
use benchreport::{Case, ReporterCallback};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const RECORDING_KIND: &str = "recording";

/// Reporter that renders `title:section` lines and counts renders
pub struct RecordingReporter {
    core: ReporterCore,
    renders: AtomicUsize,
    seen_options: Mutex<Vec<Arc<ReporterOptions>>>,
}

impl RecordingReporter {
    pub fn new(hardcoded: Option<CustomOptions>) -> Self {
        let ops = ChoiceConf::builder("ops")
            .flag("--ops")
            .description("operations per second")
            .sections([Section::Ops])
            .targets([Target::Console, Target::Filesystem, Target::Callback])
            .output_format(Format::PlainText)
            .build()
            .unwrap();
        let both = ChoiceConf::builder("both")
            .flag("--both")
            .description("ops and timing")
            .sections([Section::Ops, Section::Timing])
            .targets([Target::Console, Target::Filesystem, Target::Callback, Target::Custom])
            .default_targets([Target::Console])
            .output_format(Format::PlainText)
            .subdir("both")
            .build()
            .unwrap();

        let mut builder = ReporterConfig::builder("recording", OptionsKind::Custom(RECORDING_KIND))
            .description("records what it renders")
            .sections([Section::Ops, Section::Timing])
            .targets([Target::Console, Target::Filesystem, Target::Callback, Target::Custom])
            .default_targets([Target::Filesystem])
            .formats([Format::PlainText])
            .file_suffix("txt")
            .choice(ops)
            .choice(both);
        if let Some(options) = hardcoded {
            builder = builder.hardcoded_default_options(ReporterOptions::Custom(options));
        }

        Self {
            core: ReporterCore::new(builder.build().unwrap()).unwrap(),
            renders: AtomicUsize::new(0),
            seen_options: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default() -> Self {
        Self::new(Some(CustomOptions::new(RECORDING_KIND).with_value("source", "hardcoded".into())))
    }

    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl Reporter for RecordingReporter {
    fn core(&self) -> &ReporterCore {
        &self.core
    }

    fn render(
        &self,
        case: &Case,
        section: Section,
        options: &ReporterOptions,
    ) -> benchreport::Result<RenderedOutput> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        self.seen_options
            .lock()
            .unwrap()
            .push(Arc::new(options.clone()));
        Ok(RenderedOutput::Plain(format!("{}:{}\n", case.title, section.label())))
    }

    fn run_report(&self, request: &ReportRequest<'_>) -> benchreport::Result<()> {
        self.render_by_section(request)
    }
}

pub fn stats(samples: &[f64]) -> Stats {
    Stats::from_samples(samples.to_vec()).unwrap()
}

pub fn sample_case(title: &str) -> Case {
    let results = Results::new(
        "sorting",
        title,
        100.0,
        10,
        0.25,
        stats(&[4000.0, 4100.0, 3900.0]),
        stats(&[0.00025, 0.00024, 0.00026]),
    );
    Case::new("sorting", title, "sorts a list")
        .unwrap()
        .with_results(results)
}

/// Callback counting its invocations and keeping the received text
pub fn counting_callback() -> (ReporterCallback, Arc<Mutex<Vec<String>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let callback: ReporterCallback = Arc::new(move |_case, _section, _format, output| {
        sink.lock().unwrap().push(output.as_text().into_owned());
    });
    (callback, received)
}

/// Names of all files below `dir`, relative to it
pub fn files_under(dir: &std::path::Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
