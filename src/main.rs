use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use url::Url;

use podqueue::{
    Config, DownloadStatus, NoopObserver, QueueEvent, QueueLoader, QueueObserver, QueueRecord,
    ReloadOutcome, SharedQueueObserver, derive_local_path,
};

// Emoji with fallback for terminals without Unicode support
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static HOURGLASS: Emoji<'_, '_> = Emoji("⏳ ", "[~] ");
static TRASH: Emoji<'_, '_> = Emoji("🗑  ", "[-] ");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

/// Manage a crash-safe podcast download queue file
#[derive(Parser, Debug)]
#[command(name = "podqueue")]
#[command(about = "Manage a crash-safe podcast download queue")]
#[command(version)]
struct Args {
    /// Path to the queue file
    #[arg(long, default_value = "queue")]
    queue: PathBuf,

    /// Path to the configuration file
    #[arg(long, default_value = "podqueue.json")]
    config: PathBuf,

    /// Quiet mode - suppress diagnostics and confirmations
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the queued downloads
    List,

    /// Append a download to the queue file
    Add {
        /// Episode URL to enqueue
        url: String,

        /// Explicit target path (derived from the URL when omitted)
        #[arg(short, long)]
        filename: Option<PathBuf>,
    },

    /// Drop entries whose files are already on disk, rewriting the queue file
    Prune,
}

/// Observer that prints engine diagnostics to stderr
struct TerminalObserver;

impl QueueObserver for TerminalObserver {
    fn notify(&self, event: QueueEvent) {
        match event {
            QueueEvent::ViewUpdateRequired => {}

            QueueEvent::QueueFileUnreadable { path, reason } => {
                eprintln!(
                    "{WARNING}{} {}",
                    format!("Cannot read {}:", path.display()).yellow(),
                    reason.dimmed()
                );
            }

            QueueEvent::FileRemovalFailed { path, reason } => {
                eprintln!(
                    "{WARNING}{} {}",
                    format!("Cannot remove {}:", path.display()).yellow(),
                    reason.dimmed()
                );
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    match args.command {
        Command::List => list(&args.queue, &config),
        Command::Add { url, filename } => add(&args.queue, &url, filename, args.quiet),
        Command::Prune => prune(&args.queue, config, args.quiet),
    }
}

/// Print the queue file records with their local targets
fn list(queue_path: &Path, config: &Config) -> Result<()> {
    let contents = match std::fs::read_to_string(queue_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read queue file {}", queue_path.display()));
        }
    };

    let records: Vec<QueueRecord> = contents.lines().filter_map(QueueRecord::parse).collect();
    if records.is_empty() {
        println!("{}", "The queue is empty.".dimmed());
        return Ok(());
    }

    for record in &records {
        let target = record
            .filename
            .clone()
            .map(PathBuf::from)
            .unwrap_or_else(|| derive_local_path(&record.url, &config.download_dir));

        let marker = if target.exists() {
            format!("{SUCCESS}{}", "on disk".green())
        } else {
            format!("{HOURGLASS}{}", "pending".yellow())
        };

        println!(
            "{} {} {} {}",
            marker,
            record.url.cyan(),
            "->".dimmed(),
            target.display().to_string().dimmed()
        );
    }

    println!("\n{} {}", records.len().to_string().bold(), "entries".dimmed());

    Ok(())
}

/// Append one record to the queue file, the same way external tooling does
/// between reloads. The next reload folds it into the in-memory list.
fn add(queue_path: &Path, url: &str, filename: Option<PathBuf>, quiet: bool) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {url}"))?;

    let record = QueueRecord {
        // The parsed form percent-encodes stray whitespace, keeping the
        // line format unambiguous
        url: parsed.to_string(),
        filename: filename.map(|f| f.display().to_string()),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(queue_path)
        .with_context(|| format!("Failed to open queue file {}", queue_path.display()))?;

    writeln!(file, "{}", record.to_line())
        .with_context(|| format!("Failed to append to queue file {}", queue_path.display()))?;

    if !quiet {
        println!("{SUCCESS}Queued {}", record.url.cyan());
    }

    Ok(())
}

/// Reconcile the queue file, mark entries whose files are already on disk
/// as finished, and drop them. Whether the backing files are removed as
/// well follows the `delete_played_files` configuration option.
fn prune(queue_path: &Path, config: Config, quiet: bool) -> Result<()> {
    let observer: SharedQueueObserver = if quiet {
        NoopObserver::shared()
    } else {
        Arc::new(TerminalObserver)
    };
    let loader = QueueLoader::new(queue_path, config, observer);

    let mut downloads = Vec::new();
    loader
        .reload(&mut downloads, false)
        .context("Failed to load the queue")?;

    for download in &mut downloads {
        if download.filename().exists() {
            download.set_status(DownloadStatus::Finished);
        }
    }

    let outcome = loader
        .reload(&mut downloads, true)
        .context("Failed to rewrite the queue")?;

    if quiet {
        return Ok(());
    }

    match outcome {
        ReloadOutcome::Busy => {
            println!(
                "{WARNING}{}",
                "Downloads are in flight; try again later.".yellow()
            );
        }

        ReloadOutcome::Reloaded { kept, removed } => {
            println!(
                "{TRASH}{} {} removed, {} kept",
                "Queue pruned:".bold().green(),
                removed.to_string().green().bold(),
                kept.to_string().cyan()
            );
        }
    }

    Ok(())
}
