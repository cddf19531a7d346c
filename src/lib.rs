// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, Settings};
use crate::engine::{WatchCore, WatchLoop};
use crate::errors::Result;
use crate::exec::ShellDispatcher;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{spawn_watcher, WatchEvent};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings resolution (CLI + optional TOML file) and validation
/// - logging
/// - the watch loop (see [`watch`])
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = load_and_validate(&args)?;
    logging::init_logging(settings.log_level)?;

    info!(regexp = %settings.target.matcher.as_str(), "regexp");
    info!(file = ?settings.target.path, "file");
    info!(exec = %settings.target.command, "exec");

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    watch(settings).await
}

/// Watch the configured file until shutdown or a watcher failure.
///
/// This wires together:
/// - the core (cursor starting at the current end of file)
/// - the `notify` watcher feeding the event channel
/// - Ctrl-C handling
/// - the shell dispatcher
pub async fn watch(settings: Settings) -> Result<()> {
    let target = Arc::new(settings.target);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let core = WatchCore::new(Arc::clone(&target), fs, settings.scan_on)?;

    let (tx, rx) = mpsc::channel::<WatchEvent>(64);
    let _watcher = spawn_watcher(&target.path, tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(WatchEvent::ShutdownRequested).await;
        });
    }

    let dispatcher = ShellDispatcher::new(settings.dispatch_mode);
    WatchLoop::new(core, rx, dispatcher).run().await?;
    Ok(())
}

/// Simple dry-run output: print the resolved settings.
fn print_dry_run(settings: &Settings) {
    println!("trigger dry-run");
    println!("  file:     {}", settings.target.path.display());
    println!("  regexp:   {}", settings.target.matcher.as_str());
    println!("  exec:     {}", settings.target.command);
    println!("  scan_on:  {:?}", settings.scan_on);
    println!("  dispatch: {:?}", settings.dispatch_mode);

    debug!("dry-run complete (not watching)");
}
