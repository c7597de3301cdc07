//! # threadpack CLI
//!
//! Command-line interface for the threadpack library.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Once;
use std::time::Instant;

use clap::Parser as ClapParser;

use threadpack::cli::Args;
use threadpack::config::ExtractConfig;
use threadpack::core::{ProcessingStats, run_page, run_windows};
use threadpack::format::{OutputFormat, write_to_format};
use threadpack::source::{ArchiveDirSource, load_archive};
use threadpack::window::{DAY, RetrievalWindow, parse_day};
use threadpack::{Record, ThreadpackError};

static INIT_TRACING: Once = Once::new();

fn init_tracing_once() {
    INIT_TRACING.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn main() {
    init_tracing_once();
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when some inputs failed but the run went on.
fn run() -> Result<bool, ThreadpackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let config = args.extract_config();
    let format: OutputFormat = args.format.into();

    println!("📦 threadpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💾 Output:  {}", args.output_dir.display());
    println!("📄 Format:  {format}");
    println!("🕒 Zone:    {}", config.time_zone);
    if config.parallel {
        println!("⚡ Mode:    Parallel");
    }

    fs::create_dir_all(&args.output_dir)
        .map_err(|e| ThreadpackError::destination(&args.output_dir, e))?;

    let (stats, failed) = if args.is_window_mode() {
        (convert_windows(&args, &config, format)?, 0)
    } else {
        convert_files(&args, &config, format)?
    };

    println!();
    println!("📊 Summary:");
    println!("   Threads:    {}", stats.threads);
    println!("   Emails:     {}", stats.with_email);
    println!("   Shift ids:  {}", stats.with_shift_id);
    println!("   Reactions:  {}", stats.with_reaction);
    println!(
        "   Replies:    {} ({:.1}%)",
        stats.with_reply,
        stats.reply_rate()
    );
    if failed > 0 {
        println!("   Failed:     {failed} file(s)");
    }

    println!();
    println!(
        "⚡ Total time:  {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(failed == 0)
}

/// Converts each archive to its own table; a failing archive is logged and skipped.
///
/// An archive whose table name is already taken by an earlier input is refused.
fn convert_files(
    args: &Args,
    config: &ExtractConfig,
    format: OutputFormat,
) -> Result<(ProcessingStats, usize), ThreadpackError> {
    let files = collect_inputs(&args.inputs)?;
    println!("📂 Inputs:  {} archive(s)", files.len());
    println!();

    let mut stats = ProcessingStats::default();
    let mut failed = 0;
    let mut claimed = HashSet::new();

    for file in &files {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "threads".to_string());
        let output = args.output_dir.join(format!("{stem}.{}", format.extension()));

        println!("⏳ {}", file.display());
        if !claimed.insert(output.clone()) {
            tracing::warn!(
                file = %file.display(),
                output = %output.display(),
                "output already written by another input"
            );
            println!(
                "   ❌ {} would overwrite {}, skipped",
                file.display(),
                output.display()
            );
            failed += 1;
            continue;
        }
        let start = Instant::now();
        match convert_file(file, &stem, &output, config, format) {
            Ok(records) => {
                println!(
                    "   {} threads -> {} ({:.2}s)",
                    records.len(),
                    output.display(),
                    start.elapsed().as_secs_f64()
                );
                stats.merge(&ProcessingStats::from_records(&records));
            }
            Err(e) => {
                tracing::error!(file = %file.display(), error = %e, "archive failed");
                println!("   ❌ {e}");
                failed += 1;
            }
        }
    }

    Ok((stats, failed))
}

fn convert_file(
    file: &Path,
    label: &str,
    output: &Path,
    config: &ExtractConfig,
    format: OutputFormat,
) -> Result<Vec<Record>, ThreadpackError> {
    let page = load_archive(file)?;
    let records = run_page(&page, label, config)?;
    write_to_format(&records, output, format)?;
    Ok(records)
}

/// Reads day windows for one channel and writes them as a single table.
fn convert_windows(
    args: &Args,
    config: &ExtractConfig,
    format: OutputFormat,
) -> Result<ProcessingStats, ThreadpackError> {
    let (Some(channel), Some(after), Some(before)) = (&args.channel, &args.after, &args.before)
    else {
        return Err(ThreadpackError::invalid_window(
            "",
            "--channel needs both --after and --before",
        ));
    };
    let [dir] = args.inputs.as_slice() else {
        return Err(ThreadpackError::invalid_window(
            channel.as_str(),
            "window mode takes exactly one archive directory",
        ));
    };

    let start = parse_day(after, config.time_zone)?;
    let end = parse_day(before, config.time_zone)?;
    let windows = RetrievalWindow::plan(channel, start, end, DAY);
    if windows.is_empty() {
        return Err(ThreadpackError::invalid_window(
            format!("{after}..{before}"),
            "--before must be after --after",
        ));
    }

    let range = RetrievalWindow::new(channel.as_str(), start, end);
    let output = args
        .output_dir
        .join(format!("{}.{}", range.file_stem(), format.extension()));

    println!("📂 Archive: {}", dir.display());
    println!("📅 Range:   {after} .. {before} ({} day windows)", windows.len());
    println!();

    let source = ArchiveDirSource::new(dir);
    let records = run_windows(&source, &windows, config).inspect_err(|e| {
        tracing::error!(channel = %channel, error = %e, "window range failed");
    })?;
    write_to_format(&records, &output, format)?;
    println!("✅ {} threads -> {}", records.len(), output.display());

    Ok(ProcessingStats::from_records(&records))
}

/// Expands directories into their `*.json` files, sorted by name.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ThreadpackError> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut archives = Vec::new();
        for entry in fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                archives.push(path);
            } else {
                tracing::warn!(path = %path.display(), "skipping non-archive entry");
            }
        }
        archives.sort();
        files.extend(archives);
    }
    Ok(files)
}
