//! Line-oriented expense shell
//!
//! Reads one command per line and answers on the output stream. Works
//! interactively or with a script piped to stdin. Destructive commands ask
//! for a `y` on the next line before touching the ledger.
//!
//! Input is read on a background thread so the statistics reporter keeps
//! its schedule while the shell waits for the next line.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::audit::AuditHistory;
use crate::config::Settings;
use crate::display::{date_label, format_expense_short, format_expense_table, format_statistics};
use crate::error::LedgerError;
use crate::export::{export_snapshot_json, export_snapshot_yaml};
use crate::models::ExpenseDraft;
use crate::services::{Ledger, StatsReporter};

/// Snapshot output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Commands understood by the shell
#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// Add an expense: add <amount> <date> <description...>
    ///
    /// Missing fields are left to the validator, which names what is wrong.
    Add {
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
        date: Option<String>,
        /// Description as typed, internal spacing included
        #[arg(skip)]
        description: String,
        #[arg(
            value_name = "DESCRIPTION",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        words: Vec<String>,
    },
    /// List expenses, most recent first
    #[command(alias = "ls")]
    List,
    /// Show the running total
    Total,
    /// Show statistics
    Stats,
    /// Delete an expense by ID (asks for confirmation)
    #[command(alias = "rm")]
    Delete { id: String },
    /// Delete every expense (asks for confirmation)
    Clear,
    /// Print a snapshot of the session
    Export {
        #[arg(value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Show recent changes
    History {
        #[arg(default_value_t = 10)]
        count: usize,
    },
    /// Show available commands
    Help,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

impl ShellCommand {
    /// Parse a single input line
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let command = ShellLine::try_parse_from(line.split_whitespace())
            .map(|parsed| parsed.command)
            .map_err(|e| e.render().to_string().trim_end().to_string())?;

        Ok(match command {
            ShellCommand::Add {
                amount,
                date,
                words,
                ..
            } => {
                // Words only follow once amount and date are present
                let description = if words.is_empty() {
                    String::new()
                } else {
                    after_words(line, 3).to_string()
                };
                ShellCommand::Add {
                    amount,
                    date,
                    description,
                    words,
                }
            }
            other => other,
        })
    }
}

/// The text after the first `count` whitespace-separated words
fn after_words(line: &str, count: usize) -> &str {
    let mut rest = line.trim();
    for _ in 0..count {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

/// How often the shell checks the statistics schedule while waiting for input
const STATS_POLL_RATE: Duration = Duration::from_millis(250);

/// Read lines on a background thread; the channel closes at end of input
fn spawn_line_reader<R: BufRead + Send + 'static>(mut input: R) -> Receiver<io::Result<String>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || loop {
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if sender.send(Ok(line)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = sender.send(Err(e));
                break;
            }
        }
    });
    receiver
}

const HELP_TEXT: &str = "\
Commands:
  add <amount> <date> <description...>   Add an expense (date: YYYY-MM-DD, today, yesterday)
  list                                   List expenses, most recent first
  total                                  Show the running total
  stats                                  Show statistics
  delete <id>                            Delete an expense (asks for confirmation)
  clear                                  Delete every expense (asks for confirmation)
  export [json|yaml]                     Print a snapshot of the session
  history [count]                        Show recent changes
  help                                   Show this help
  quit                                   End the session
";

/// Interactive shell over a ledger
pub struct Shell<'a, W> {
    ledger: &'a mut Ledger,
    settings: &'a Settings,
    history: AuditHistory,
    reporter: Option<StatsReporter>,
    lines: Receiver<io::Result<String>>,
    poll_rate: Duration,
    output: W,
    prompt: bool,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new<R: BufRead + Send + 'static>(
        ledger: &'a mut Ledger,
        settings: &'a Settings,
        history: AuditHistory,
        input: R,
        output: W,
    ) -> Self {
        let reporter = settings
            .stats_interval()
            .map(|interval| StatsReporter::new(interval, Instant::now()));
        Self {
            ledger,
            settings,
            history,
            reporter,
            lines: spawn_line_reader(input),
            poll_rate: STATS_POLL_RATE,
            output,
            prompt: false,
        }
    }

    /// Print a prompt before each command (for terminals)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Run until `quit` or end of input
    pub fn run(mut self) -> Result<()> {
        writeln!(
            self.output,
            "Expense ledger - data lives only for this session. Type 'help' for commands."
        )?;

        while let Some(line) = self.read_line("> ")? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match ShellCommand::parse_line(line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn execute(&mut self, command: ShellCommand) -> Result<()> {
        let settings = self.settings;
        let symbol = settings.currency_symbol.as_str();
        let long_format = settings.long_date_format.as_str();

        match command {
            ShellCommand::Add {
                amount,
                date,
                description,
                ..
            } => {
                let draft = ExpenseDraft::from_raw(
                    &description,
                    amount.as_deref().unwrap_or_default(),
                    date.as_deref().unwrap_or_default(),
                    self.ledger.today(),
                );
                match self.ledger.add(draft) {
                    Ok(expense) => writeln!(
                        self.output,
                        "Added {} {} {} ({})",
                        expense.id(),
                        expense.amount().format_with_symbol(symbol),
                        expense.description(),
                        date_label(expense.date(), self.ledger.today(), long_format)
                    )?,
                    Err(reason) => writeln!(self.output, "Rejected: {}", reason)?,
                }
            }
            ShellCommand::List => {
                let table = format_expense_table(
                    self.ledger.sorted_for_display(),
                    self.ledger.today(),
                    symbol,
                    long_format,
                );
                write!(self.output, "{}", table)?;
                writeln!(
                    self.output,
                    "Total: {}",
                    self.ledger.total().format_with_symbol(symbol)
                )?;
            }
            ShellCommand::Total => {
                writeln!(
                    self.output,
                    "Total: {}",
                    self.ledger.total().format_with_symbol(symbol)
                )?;
            }
            ShellCommand::Stats => {
                let stats = self.ledger.statistics();
                write!(self.output, "{}", format_statistics(&stats, symbol))?;
            }
            ShellCommand::Delete { id } => self.delete(&id)?,
            ShellCommand::Clear => self.clear()?,
            ShellCommand::Export { format } => {
                let snapshot = self.ledger.export();
                match format {
                    ExportFormat::Json => export_snapshot_json(&snapshot, &mut self.output)?,
                    ExportFormat::Yaml => export_snapshot_yaml(&snapshot, &mut self.output)?,
                }
            }
            ShellCommand::History { count } => {
                if self.history.is_empty() {
                    writeln!(self.output, "No changes yet.")?;
                }
                for entry in self.history.recent(count) {
                    writeln!(
                        self.output,
                        "{} {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.summary()
                    )?;
                }
            }
            ShellCommand::Help => write!(self.output, "{}", HELP_TEXT)?,
            ShellCommand::Quit => {}
        }

        Ok(())
    }

    fn delete(&mut self, identifier: &str) -> Result<()> {
        let settings = self.settings;
        let symbol = settings.currency_symbol.as_str();
        let expense = match self.ledger.find(identifier) {
            Ok(expense) => expense.clone(),
            Err(e @ (LedgerError::NotFound { .. } | LedgerError::Ambiguous { .. })) => {
                writeln!(self.output, "{}", e)?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let question = format!("Delete {}? [y/N] ", format_expense_short(&expense, symbol));
        if !self.confirm(&question)? {
            writeln!(self.output, "Cancelled.")?;
            return Ok(());
        }

        match self.ledger.delete(expense.id()) {
            Ok(removed) => writeln!(
                self.output,
                "Deleted {}",
                format_expense_short(&removed, symbol)
            )?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.ledger.is_empty() {
            writeln!(self.output, "Nothing to clear.")?;
            return Ok(());
        }

        let question = format!(
            "Delete all {} expense(s)? This cannot be undone. [y/N] ",
            self.ledger.len()
        );
        if !self.confirm(&question)? {
            writeln!(self.output, "Cancelled.")?;
            return Ok(());
        }

        let removed = self.ledger.clear();
        writeln!(self.output, "Cleared {} expense(s).", removed)?;
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let answer = self.read_raw_line()?;
        if !self.prompt {
            writeln!(self.output)?;
        }
        Ok(matches!(
            answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.prompt {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
        }
        self.read_raw_line()
    }

    /// Wait for the next input line, polling the statistics reporter meanwhile
    fn read_raw_line(&mut self) -> Result<Option<String>> {
        loop {
            self.poll_stats();
            match self.lines.recv_timeout(self.poll_rate) {
                Ok(line) => return Ok(Some(line?)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            }
        }
    }

    fn poll_stats(&mut self) {
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.poll(Instant::now(), self.ledger);
        }
    }
}
