// Rendered report output and the consoles that display it

use console::{Style, Term};
use std::borrow::Cow;
use std::io;
use std::sync::Mutex;

/// Run of text sharing one style
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::new())
    }
}

/// Text with per-span styling, e.g. a rendered table.
///
/// Consoles render the styles; files and callbacks receive the flattened text,
/// cut to `width` when one is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledDocument {
    lines: Vec<Vec<StyledSpan>>,
    width: Option<usize>,
}

impl StyledDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit flattened lines to `width` columns
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn push_line(&mut self, spans: Vec<StyledSpan>) {
        self.lines.push(spans);
    }

    pub fn push_styled(&mut self, text: impl Into<String>, style: Style) {
        self.lines.push(vec![StyledSpan::new(text, style)]);
    }

    pub fn push_plain(&mut self, text: impl Into<String>) {
        self.lines.push(vec![StyledSpan::plain(text)]);
    }

    pub fn lines(&self) -> &[Vec<StyledSpan>] {
        &self.lines
    }

    /// Lines with styles applied, for terminals
    pub fn styled_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|spans| {
                spans
                    .iter()
                    .map(|span| span.style.apply_to(&span.text).to_string())
                    .collect()
            })
            .collect()
    }

    /// Lines without styling, cut to `width` when set
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|spans| {
                let line: String = spans.iter().map(|span| span.text.as_str()).collect();
                let line = line.trim_end().to_string();
                match self.width {
                    Some(width) => console::truncate_str(&line, width, "").into_owned(),
                    None => line,
                }
            })
            .collect()
    }

    pub fn to_plain(&self) -> String {
        let mut text = self.plain_lines().join("\n");
        text.push('\n');
        text
    }
}

/// Output of a renderer
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedOutput {
    Plain(String),
    Binary(Vec<u8>),
    Styled(StyledDocument),
}

impl RenderedOutput {
    /// Styled documents become plain text; other variants are returned as is
    pub fn flatten_to_plain(&self) -> RenderedOutput {
        match self {
            RenderedOutput::Styled(document) => RenderedOutput::Plain(document.to_plain()),
            other => other.clone(),
        }
    }

    /// Bytes written to files
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            RenderedOutput::Plain(text) => Cow::Borrowed(text.as_bytes()),
            RenderedOutput::Binary(bytes) => Cow::Borrowed(bytes.as_slice()),
            RenderedOutput::Styled(document) => Cow::Owned(document.to_plain().into_bytes()),
        }
    }

    /// Textual view; binary output is decoded lossily
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RenderedOutput::Plain(text) => Cow::Borrowed(text.as_str()),
            RenderedOutput::Binary(bytes) => String::from_utf8_lossy(bytes),
            RenderedOutput::Styled(document) => Cow::Owned(document.to_plain()),
        }
    }
}

impl From<String> for RenderedOutput {
    fn from(text: String) -> Self {
        RenderedOutput::Plain(text)
    }
}

/// Sink for console-targeted reports
pub trait Console: Send + Sync {
    fn print(&self, output: &RenderedOutput) -> io::Result<()>;
}

/// Console writing to the process terminal
#[derive(Debug, Clone)]
pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Console for TermConsole {
    fn print(&self, output: &RenderedOutput) -> io::Result<()> {
        match output {
            RenderedOutput::Styled(document) => {
                for line in document.styled_lines() {
                    self.term.write_line(&line)?;
                }
                Ok(())
            }
            other => self.term.write_line(other.as_text().trim_end_matches('\n')),
        }
    }
}

/// Console that records everything printed to it
#[derive(Debug, Default)]
pub struct BufferConsole {
    printed: Mutex<Vec<RenderedOutput>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printed(&self) -> Vec<RenderedOutput> {
        self.printed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn print_count(&self) -> usize {
        self.printed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Console for BufferConsole {
    fn print(&self, output: &RenderedOutput) -> io::Result<()> {
        self.printed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(output.clone());
        Ok(())
    }
}
