use std::fs::OpenOptions;
use std::io::{self, BufReader, IsTerminal};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_ledger::audit::{AuditLogger, DEFAULT_HISTORY_CAPACITY};
use expense_ledger::cli::{ExportFormat, Shell};
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::export::{export_snapshot_json, export_snapshot_yaml};
use expense_ledger::services::Ledger;

/// Environment variable holding the log filter
const LOG_ENV_VAR: &str = "EXPENSES_LOG";

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track expenses for a single terminal session",
    long_about = "Expense Ledger keeps a list of expenses for the length of one \
                  session, with a running total and statistics. Nothing is saved: \
                  when the program exits, the expenses are gone."
)]
struct Cli {
    /// Seconds between statistics log lines (0 disables)
    #[arg(long, global = true, env = "EXPENSES_STATS_INTERVAL", value_name = "SECS")]
    stats_interval: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui {
        /// Print a snapshot of the session to stdout after the UI closes
        #[arg(long, value_enum, value_name = "FORMAT")]
        print_snapshot: Option<ExportFormat>,
    },

    /// Line-oriented shell reading commands from stdin
    Shell,

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file if it does not exist yet
        #[arg(long)]
        init: bool,
    },
}

/// Where log lines are written
enum LogSink {
    /// The session log file (the terminal belongs to the UI)
    File,
    Stderr,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(secs) = cli.stats_interval {
        settings.stats_interval_secs = secs;
    }

    match cli.command.unwrap_or(Commands::Tui {
        print_snapshot: None,
    }) {
        Commands::Tui { print_snapshot } => {
            paths.ensure_directories()?;
            init_logging(&settings, &paths, LogSink::File)?;

            let mut ledger = Ledger::new(settings.validation_limits());
            let (audit, history) = AuditLogger::new(DEFAULT_HISTORY_CAPACITY);
            ledger.subscribe(audit);

            expense_ledger::tui::run_tui(&mut ledger, &settings, history)?;

            if let Some(format) = print_snapshot {
                let snapshot = ledger.export();
                let mut stdout = io::stdout().lock();
                match format {
                    ExportFormat::Json => export_snapshot_json(&snapshot, &mut stdout)?,
                    ExportFormat::Yaml => export_snapshot_yaml(&snapshot, &mut stdout)?,
                }
            }
        }
        Commands::Shell => {
            init_logging(&settings, &paths, LogSink::Stderr)?;

            let mut ledger = Ledger::new(settings.validation_limits());
            let (audit, history) = AuditLogger::new(DEFAULT_HISTORY_CAPACITY);
            ledger.subscribe(audit);

            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            Shell::new(
                &mut ledger,
                &settings,
                history,
                BufReader::new(stdin),
                io::stdout().lock(),
            )
            .with_prompt(interactive)
            .run()?;
        }
        Commands::Config { init } => {
            if init {
                init_settings(&paths, &settings)?;
            }
            print_config(&paths, &settings);
        }
    }

    Ok(())
}

fn init_logging(settings: &Settings, paths: &LedgerPaths, sink: LogSink) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match sink {
        LogSink::File => {
            let log_file = paths.log_file();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogSink::Stderr => builder.with_writer(io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

fn init_settings(paths: &LedgerPaths, settings: &Settings) -> Result<()> {
    let settings_file = paths.settings_file();
    if settings_file.exists() {
        println!("Settings file already exists: {}", settings_file.display());
        return Ok(());
    }

    settings
        .save(paths)
        .with_context(|| format!("Failed to write {}", settings_file.display()))?;
    println!("Wrote {}", settings_file.display());
    println!();
    Ok(())
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    let settings_file = paths.settings_file();
    let settings_state = if settings_file.exists() {
        "loaded"
    } else {
        "not found, using defaults"
    };
    let stats_interval = match settings.stats_interval() {
        Some(interval) => format!("every {}s", interval.as_secs()),
        None => "disabled".to_string(),
    };

    println!("Expense Ledger Configuration");
    println!("============================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {} ({})", settings_file.display(), settings_state);
    println!("Session log:      {}", paths.log_file().display());
    println!();
    println!("Settings (schema v{}):", settings.schema_version);
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Max description:  {} characters", settings.max_description_len);
    println!(
        "  Max amount:       {}",
        settings.max_amount.format_with_symbol(&settings.currency_symbol)
    );
    println!("  Statistics log:   {}", stats_interval);
    println!("  Log level:        {}", settings.log_level);
    println!("  Long date format: {}", settings.long_date_format);
    println!();
    println!("Expenses are kept in memory only and are lost when the program exits.");
}
