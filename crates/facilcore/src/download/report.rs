//! User-facing status reporting and confirmation prompts.
//!
//! The batch loop never prints directly; it goes through `Reporter` and
//! `Confirmer` so tests can record what would have been shown.

use std::io::{self, BufRead, IsTerminal};

/// Kind of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Neutral information (course summary, batch summary)
    Info,
    /// Work in progress (downloading, retrying)
    Progress,
    /// Something finished successfully
    Success,
    /// Something failed, the batch goes on
    Failure,
    /// The batch stops
    Error,
}

impl ReportKind {
    /// Leading marker of the console line
    pub fn marker(self) -> &'static str {
        match self {
            ReportKind::Info => "",
            ReportKind::Progress => "⠹ ",
            ReportKind::Success => "✓ ",
            ReportKind::Failure => "✗ ",
            ReportKind::Error => "Error! ",
        }
    }
}

/// Where in the batch a status line belongs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContext {
    pub url: Option<String>,
    pub section: Option<String>,
    pub attempt: Option<u32>,
}

impl ReportContext {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_section(mut self, section: Option<&str>) -> Self {
        self.section = section.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }
}

/// Sink for status lines
pub trait Reporter {
    fn report(&mut self, kind: ReportKind, message: &str, context: &ReportContext);
}

/// Yes/no prompt shown before a whole course is downloaded
pub trait Confirmer {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Prints status lines to stdout and mirrors them into the log file
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, kind: ReportKind, message: &str, context: &ReportContext) {
        println!("{}{}", kind.marker(), message);
        log::info!(
            "[{:?}] {} (url: {}, section: {}, attempt: {})",
            kind,
            message,
            context.url.as_deref().unwrap_or("-"),
            context.section.as_deref().unwrap_or("-"),
            context.attempt.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
        );
    }
}

/// Terminal prompt; defaults to "no".
///
/// With a TTY the dialoguer prompt is used. Piped input (`yes | facildl ...`)
/// is read one line per question instead.
#[derive(Debug, Default)]
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&mut self, question: &str) -> bool {
        if !io::stdin().is_terminal() {
            println!("{} [y/N]:", question);
            return read_answer(&mut io::stdin().lock());
        }

        match dialoguer::Confirm::new().with_prompt(question).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Confirmation prompt failed, treating as declined: {}", e);
                false
            }
        }
    }
}

/// Reads one answer line. Anything but an explicit yes (EOF included) is "no".
fn read_answer(input: &mut impl BufRead) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => parse_answer(&line),
        Err(e) => {
            log::warn!("Could not read confirmation from stdin, treating as declined: {}", e);
            false
        }
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "y" | "yes" | "true" | "1" | "s" | "si" | "sí"
    )
}
