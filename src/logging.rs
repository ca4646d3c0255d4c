// Log output for the benchreport binary

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Formats events as `emoji LEVEL [HH:MM:SS]: message`
pub struct CustomFormatter;

/// Emoji and label printed before a message of `level`
pub fn level_prefix(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("🔬", "TRACE"),
        Level::DEBUG => ("🐛", "DEBUG"),
        Level::INFO => ("ℹ️ ", "INFO"),
        Level::WARN => ("⚠️ ", "WARN"),
        Level::ERROR => ("❌", "ERROR"),
    }
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "benchreport=debug,warn"
    } else {
        "benchreport=info,warn"
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the verbosity flag
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .event_format(CustomFormatter)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let (emoji, label) = level_prefix(event.metadata().level());
        let timestamp = Local::now().format("%H:%M:%S");

        write!(writer, "{} {} [{}]: ", emoji, label, timestamp)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
