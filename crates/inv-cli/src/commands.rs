use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use inv_core::{InventoryConfig, InventorySession, NullSink, SessionSink};
use inv_cli::console::{ConsoleSink, ScanTally, run_scan_loop};
use inv_cli::tables::{scanned_table, stats_table, tally_table};
use tracing::{info, info_span};

use crate::cli::Cli;

/// Settings from `--config`, with command-line overrides applied.
pub fn build_config(cli: &Cli) -> Result<InventoryConfig> {
    let mut config = match &cli.config {
        Some(path) => InventoryConfig::from_json_file(path)?,
        None => InventoryConfig::default(),
    };
    if let Some(encoding) = cli.encoding {
        config.format.encoding = encoding.into();
    }
    Ok(config)
}

fn open<S: SessionSink>(config: InventoryConfig, sink: S, file: &Path) -> Result<InventorySession<S>> {
    let mut session = InventorySession::with_sink(config, sink);
    session
        .load(file)
        .with_context(|| format!("open {}", file.display()))?;
    Ok(session)
}

pub fn run_scan(config: InventoryConfig, file: &Path) -> Result<ScanTally> {
    let span = info_span!("scan", file = %file.display());
    let _guard = span.enter();

    let mut session = open(config, ConsoleSink::new(io::stdout()), file)?;
    if let Some(summary) = session.summary() {
        println!("{summary}");
    }
    if !session.scanned_view().is_empty() {
        println!("{}", scanned_table(session.scanned_view()));
    }

    let stdin = io::stdin();
    let tally = run_scan_loop(&mut session, stdin.lock()).context("read barcodes")?;
    info!(
        scanned = tally.newly_found,
        not_found = tally.not_found,
        "Scan input finished"
    );

    println!("{}", tally_table(&tally));
    println!("{}", stats_table(&session.stats()));

    if session.is_dirty() {
        session
            .save()
            .context("the last scans are not saved; the file on disk is unchanged")?;
    }
    if let Some(error) = session.sink_mut().take_error() {
        return Err(error).context("write scan output");
    }
    Ok(tally)
}

pub fn run_stats(config: InventoryConfig, file: &Path) -> Result<()> {
    let session = open(config, NullSink, file)?;
    if let Some(summary) = session.summary() {
        println!("{summary}");
    }
    println!("{}", stats_table(&session.stats()));
    Ok(())
}

pub fn run_scanned(config: InventoryConfig, file: &Path) -> Result<()> {
    let session = open(config, NullSink, file)?;
    if session.scanned_view().is_empty() {
        println!("No items scanned yet.");
        return Ok(());
    }
    println!("{}", scanned_table(session.scanned_view()));
    Ok(())
}

pub fn run_export(
    mut config: InventoryConfig,
    file: &Path,
    output_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = output_dir {
        config.export_dir = Some(dir);
    }
    let dir = config.export_dir();
    if !dir.is_dir() {
        bail!("export directory does not exist: {}", dir.display());
    }

    let session = open(config, NullSink, file)?;
    let path = session
        .export_unscanned()
        .with_context(|| format!("export to {}", dir.display()))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", path.display()).context("write export path")?;
    Ok(path)
}
