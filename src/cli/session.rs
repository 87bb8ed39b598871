// src/cli/session.rs
use crate::application::{FetchOutcome, NoteSource, NoteTableController};
use crate::infrastructure::PdfFileExporter;
use crate::ports::TablePresenter;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error, warn};

const HELP: &str = "\
Commands:
  key <text>             set the query key (no fetch)
  find                   fetch notes for the query key
  date <YYYY-MM-DD> [end] select filter day (end date is ignored)
  date clear             clear the filter day
  filter                 apply the selected day to the table
  show                   print the table
  pdf [path]             export the table as PDF
  help                   this text
  quit                   leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Key(String),
    Find,
    Date(Option<NaiveDate>),
    Filter,
    Show,
    Pdf(Option<PathBuf>),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "key" => SessionCommand::Key(rest.to_string()),
        "find" => SessionCommand::Find,
        "filter" => SessionCommand::Filter,
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        "pdf" => SessionCommand::Pdf((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "date" => {
            let start = rest.split_whitespace().next().unwrap_or("");
            match start {
                "" => return Err("date needs YYYY-MM-DD or 'clear'".to_string()),
                "clear" | "none" => SessionCommand::Date(None),
                raw => {
                    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .map_err(|_| format!("not a date: {raw} (expected YYYY-MM-DD)"))?;
                    SessionCommand::Date(Some(day))
                }
            }
        }
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };
    Ok(Some(command))
}

/// Line-driven stand-in for the note table page.
pub struct Session<S: NoteSource> {
    controller: NoteTableController<S>,
    presenter: TablePresenter,
    exporter: PdfFileExporter,
}

impl<S: NoteSource> Session<S> {
    pub fn new(
        controller: NoteTableController<S>,
        presenter: TablePresenter,
        exporter: PdfFileExporter,
    ) -> Self {
        Self {
            controller,
            presenter,
            exporter,
        }
    }

    pub fn controller(&self) -> &NoteTableController<S> {
        &self.controller
    }

    /// Loads the default key, then executes commands until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        writeln!(output, "Query key: {}", self.controller.query_key())?;
        self.find(output).await?;

        for line in input.lines() {
            let line = line.context("Failed to read session input")?;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(output, "{message}")?;
                    continue;
                }
            };
            debug!(?command, "Session command");

            match command {
                SessionCommand::Quit => break,
                SessionCommand::Help => write!(output, "{HELP}")?,
                SessionCommand::Key(key) => {
                    self.controller.set_query_key(key);
                    writeln!(output, "Query key: {}", self.controller.query_key())?;
                }
                SessionCommand::Find => self.find(output).await?,
                SessionCommand::Date(day) => {
                    self.controller.select_date(day);
                    match day {
                        Some(day) => writeln!(output, "Selected {day}; run 'filter' to apply")?,
                        None => writeln!(output, "Date cleared; run 'filter' to apply")?,
                    }
                }
                SessionCommand::Filter => {
                    self.controller.apply_filter();
                    self.show(output)?;
                }
                SessionCommand::Show => self.show(output)?,
                SessionCommand::Pdf(path) => {
                    if let Some(path) = path {
                        self.exporter.set_output(path);
                    }
                    match self.controller.export_current_view(&mut self.exporter) {
                        Ok(saved) => writeln!(output, "Saved {}", saved.display())?,
                        Err(e) => {
                            error!("Export failed: {e:#}");
                            writeln!(output, "Error: could not export: {e:#}")?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn find<W: Write>(&mut self, output: &mut W) -> Result<()> {
        match self.controller.find().await {
            FetchOutcome::Applied { count, .. } => {
                writeln!(output, "Loaded {count} records")?;
                self.show(output)?;
            }
            FetchOutcome::Skipped => writeln!(output, "Query key is empty; nothing fetched")?,
            FetchOutcome::Stale { seq } => warn!(seq, "Stale fetch in sequential session"),
            FetchOutcome::Failed(e) => {
                writeln!(output, "Error: could not load notes: {e}")?;
                if self.controller.is_loaded() {
                    writeln!(output, "Showing last loaded data")?;
                }
            }
        }
        Ok(())
    }

    fn show<W: Write>(&self, output: &mut W) -> Result<()> {
        write!(output, "{}", self.presenter.render(self.controller.visible_records()))?;
        Ok(())
    }
}
