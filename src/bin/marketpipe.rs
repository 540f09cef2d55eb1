//! Replays a LOBSTER message file through the market-event pipeline and
//! prints the per-event latency distribution.

use marketpipe_rs::consts::DEFAULT_PRICE_SPREAD;
use marketpipe_rs::engine::TradingEngine;
use marketpipe_rs::orderbook::OrderBook;
use marketpipe_rs::{fileio, pipeline, report};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;
use std::{env, error};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: marketpipe <message-file.csv>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<(), Box<dyn error::Error>> {
    info!(path, "loading message file");
    let clock_start = Instant::now();
    let events = fileio::load_events(path)?;
    info!(
        events = events.len(),
        elapsed_ms = clock_start.elapsed().as_millis() as u64,
        "parsed message file"
    );

    let mut book = OrderBook::new();
    let mut engine = TradingEngine::new(DEFAULT_PRICE_SPREAD);

    info!(events = events.len(), "processing events");
    let clock_start = Instant::now();
    let latencies = pipeline::run(&events, &mut book, &mut engine);
    info!(
        elapsed_ms = clock_start.elapsed().as_millis() as u64,
        "pipeline complete"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::render_latency_report(&mut out, latencies.as_slice())?;
    out.flush()?;

    Ok(())
}
