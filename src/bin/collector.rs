//! TEMPer Data Collector
//!
//! Headless, scriptable counterpart to the interactive logger: collects one
//! acquisition run and writes it to a CSV file.
//!
//! Usage:
//!   collector --output data.csv --rate 1 --duration 60

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use temper_logger::{csv_format, Acquisition, DecodePolicy, TemperError};

#[derive(Parser, Debug)]
#[command(name = "collector")]
#[command(about = "Collect TEMPer sensor data to a CSV file", long_about = None)]
struct Args {
    /// Output CSV file path
    #[arg(short, long, default_value = "temperature_log.csv")]
    output: PathBuf,

    /// Sampling frequency in Hz
    #[arg(short, long, default_value_t = 1.0)]
    rate: f64,

    /// Duration in seconds (optional, runs until Ctrl+C if omitted)
    #[arg(short, long)]
    duration: Option<u64>,

    /// Fail on unrecognized sensor models instead of the 1.0 °C fallback
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    println!("TEMPer Data Collector");
    println!("=====================");
    println!("Sample rate: {} Hz", args.rate);
    println!("Output file: {}", args.output.display());
    if let Some(duration) = args.duration {
        println!("Duration: {duration} seconds");
    } else {
        println!("Duration: continuous (Ctrl+C to stop)");
    }
    println!();

    let policy = if args.strict {
        DecodePolicy::Strict
    } else {
        DecodePolicy::Lenient
    };

    println!("Searching for sensor...");
    let mut engine = Acquisition::new();
    if let Err(e) = engine.start(args.rate, policy) {
        match e {
            TemperError::SensorNotFound => {
                eprintln!("Error: no TEMPer sensor found.");
                eprintln!("Please check:");
                eprintln!("  1. The sensor is connected via USB");
                eprintln!("  2. No other application is using the device");
            }
            _ => eprintln!("Error starting acquisition: {e}"),
        }
        std::process::exit(1);
    }
    println!("Acquisition started!\n");

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, stopping collection...");
        r.store(false, Ordering::SeqCst);
    })?;

    let collection_start = Instant::now();
    let end_time = args
        .duration
        .map(|d| collection_start + Duration::from_secs(d));

    while running.load(Ordering::SeqCst) {
        if let Some(end) = end_time {
            if Instant::now() >= end {
                break;
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    engine.stop();
    let data = engine.snapshot();
    csv_format::write_log(&args.output, data.samples())?;

    let elapsed = collection_start.elapsed().as_secs_f64();
    let actual_rate = data.len() as f64 / elapsed;
    println!("\nCollection complete!");
    println!("Total samples: {}", data.len());
    println!("Elapsed time: {elapsed:.2} seconds");
    println!("Actual sample rate: {actual_rate:.2} Hz");
    println!("File: {}", args.output.display());

    Ok(())
}
