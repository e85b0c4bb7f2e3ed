use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use feed_app::terminal::{parse_input, render_screen, Input, HELP};
use feed_app::{load_settings, Cli, Dashboard, UreqTransport};
use feed_core::{FeedClient, Fetcher};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout is the view; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings(&cli);
    info!(base_url = %settings.base_url, mode = ?settings.mode, "starting");

    let transport = Arc::new(UreqTransport::new(settings.timeout));
    let fetcher = Fetcher::new(FeedClient::new(&settings.base_url), transport);
    let (handle, task) = Dashboard::spawn(fetcher, &settings);
    let printer = tokio::spawn(print_snapshots(handle.subscribe()));

    println!("{HELP}");
    let step = settings.viewport_lines as i64;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Refetch(resource)) => handle.refetch(resource)?,
            Ok(Input::ScrollDown) => handle.scroll_by(step)?,
            Ok(Input::ScrollUp) => handle.scroll_by(-step)?,
            Ok(Input::Show) => println!("{}", render_screen(&handle.snapshot())),
            Ok(Input::Help) => println!("{HELP}"),
            Err(msg) => warn!("{msg}"),
        }
    }

    handle.shutdown()?;
    task.await.context("dashboard task failed")?;
    printer.abort();
    Ok(())
}

async fn print_snapshots(mut rx: watch::Receiver<feed_app::Snapshot>) {
    while rx.changed().await.is_ok() {
        let screen = render_screen(&rx.borrow_and_update());
        println!("\n{screen}");
    }
}
