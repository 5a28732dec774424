use crate::operator::{DirReport, Operation, Outcome, Reporter};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};
use std::path::Path;

/// Column the colon lands on in `status` output
pub const STATUS_COLUMN: usize = 30;

/// How an outcome should stand out on a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Alert,
    Success,
    Plain,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Alert => Some(Color::DarkRed),
            Tone::Success => Some(Color::DarkGreen),
            Tone::Plain => None,
        }
    }
}

/// Wrap `text` in the escape codes for `tone`, or return it untouched
pub fn paint(text: &str, tone: Tone, color: bool) -> String {
    match tone.color() {
        Some(c) if color => text.with(c).to_string(),
        _ => text.to_string(),
    }
}

/// "dir: ", or for status the name padded so the colon sits at `STATUS_COLUMN`
pub fn prefix(dir: &Path, operation: Operation) -> String {
    let name = dir.display().to_string();
    match operation {
        Operation::Status => {
            let pad = STATUS_COLUMN.saturating_sub(name.chars().count()).max(1);
            format!("{}{}: ", name, " ".repeat(pad))
        }
        _ => format!("{}: ", name),
    }
}

/// Line printed before a subprocess that writes straight to the terminal
pub fn notice(operation: Operation) -> Option<&'static str> {
    match operation {
        Operation::Push => Some("pushing..."),
        Operation::Add => Some("adding..."),
        Operation::Commit => Some("committing..."),
        Operation::Status | Operation::Pull => None,
    }
}

/// Text and tone for an outcome. Raw git output is never colored.
pub fn describe(outcome: &Outcome) -> (&str, Tone) {
    match outcome {
        Outcome::NotARepository => ("Not a git repository", Tone::Alert),
        Outcome::Clean => ("Clean", Tone::Success),
        Outcome::Dirty => ("Dirty", Tone::Alert),
        Outcome::NothingToAdd => ("nothing to add", Tone::Success),
        Outcome::NothingToCommit => ("nothing to commit", Tone::Success),
        Outcome::Ran { output, .. } => (output.as_str(), Tone::Plain),
    }
}

/// Render a report as one line, without the progress notice
pub fn format_line(report: &DirReport, color: bool) -> String {
    let (text, tone) = describe(&report.outcome);
    format!(
        "{}{}",
        prefix(&report.dir, report.operation),
        paint(text.trim_end(), tone, color)
    )
}

/// Streams reports to a terminal as each directory is processed
pub struct TerminalReporter<W: Write> {
    out: W,
    color: bool,
    line_open: bool,
}

impl TerminalReporter<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            line_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // stdout going away mid-batch is not worth aborting the remaining repos for
    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            log::debug!("failed to write report: {}", e);
        }
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn begin(&mut self, dir: &Path, operation: Operation) {
        // Flushed now so it shows up before any inherited git output
        self.emit(&prefix(dir, operation));
        self.line_open = true;
    }

    fn running(&mut self, _dir: &Path, operation: Operation) {
        if let Some(text) = notice(operation) {
            self.emit(&format!("{}\n", text));
            self.line_open = false;
        }
    }

    fn finish(&mut self, report: &DirReport) {
        let (text, tone) = describe(&report.outcome);
        if text.is_empty() && !self.line_open {
            return;
        }
        let mut line = paint(text, tone, self.color);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        self.emit(&line);
        self.line_open = false;
    }
}
