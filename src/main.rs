//! Interactive temperature logger for laboratory sessions
//!
//! Line-oriented command loop around the acquisition engine: `start` and
//! `stop` bracket runs, `plot` renders the cumulative chart, and every stop
//! writes the full CSV history into the group's session directory.

use std::env;
use std::io::{self, Write};

use chrono::Local;
use clap::Parser;
use temper_logger::{
    csv_format, plot, Acquisition, AcquisitionState, DecodePolicy, Session, TemperError,
};

#[derive(Parser, Debug)]
#[command(name = "temper-logger")]
#[command(about = "Log temperature from a TEMPer USB sensor", long_about = None)]
struct Args {
    /// Sampling frequency in Hz
    #[arg(short, long, default_value_t = 1.0)]
    frequency: f64,

    /// Group ID (skips the interactive prompt)
    #[arg(short, long)]
    group: Option<String>,

    /// Fail on unrecognized sensor models instead of the 1.0 °C fallback
    #[arg(long)]
    strict: bool,
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}\n>> ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_help() {
    println!("\n Commands:");
    println!("      start: starts the data acquisition. Readings are kept in RAM;");
    println!("             nothing is written to disk until the 'stop' command.");
    println!("\n      stop:  stops the acquisition and saves the full history to");
    println!("             log/<group ID>/temperature_log_<HOUR-MIN-SEC>.csv.");
    println!("             First column is the timestamp, second the temperature (°C).");
    println!("\n      plot:  use after 'stop'. Renders every reading taken since the");
    println!("             program was opened, so multiple acquisitions spaced in time");
    println!("             end up on a single chart with their boundaries marked.");
    println!("\n      help:  shows this command description.");
    println!("\n      exit:  stops any active acquisition, saves it, and quits.\n");
}

fn print_intro() {
    println!("\n******************************  Laboratory Classes  ******************************");
    println!("Temperature data logger for physics laboratory exercises. Uses a TEMPer family");
    println!("USB thermometer to record the temperature over time, one reading per second.");
    println!("At start up, enter a unique group identifier; everything the session produces");
    println!("is stored under log/<group ID>/ in the current directory.");
    println!("**********************************************************************************");
    print_help();
}

/// Ask for the group ID, with the same exit-confirmation detour as answering
/// `exit` at the prompt. `None` means the user chose to quit.
fn prompt_group_id() -> io::Result<Option<String>> {
    let group = prompt("What's your group ID?")?;
    if group != "exit" {
        return Ok(Some(group));
    }
    let confirm = prompt("Do you really want to exit? (y/n)")?;
    if confirm == "y" {
        return Ok(None);
    }
    let group = prompt("What's your group ID? (now you can use exit as Group ID)")?;
    Ok(Some(group))
}

/// Stop the engine (no-op when idle) and write the cumulative CSV log
fn stop_and_save(engine: &mut Acquisition, session: &Session) -> temper_logger::Result<()> {
    engine.stop();
    let data = engine.snapshot();
    let path = session.log_path(Local::now());
    csv_format::write_log(&path, data.samples())?;
    println!("Data saved to {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    print_intro();

    let group_id = match args.group {
        Some(group) => group,
        None => match prompt_group_id()? {
            Some(group) => group,
            None => return Ok(()),
        },
    };

    let session = Session::create(env::current_dir()?, &group_id)?;
    println!(
        "        Your data will be saved on:\n          {}\n",
        session.dir().display()
    );

    let policy = if args.strict {
        DecodePolicy::Strict
    } else {
        DecodePolicy::Lenient
    };
    let mut engine = Acquisition::new();

    loop {
        let command = prompt("Enter command (start/stop/plot/help/exit):")?.to_lowercase();
        match command.as_str() {
            "start" => {
                if engine.state() == AcquisitionState::Running {
                    println!("Acquisition is already running; 'stop' it first.");
                    continue;
                }
                match engine.start(args.frequency, policy) {
                    Ok(()) => println!("Acquisition started at {} Hz.\n", args.frequency),
                    Err(TemperError::SensorNotFound) => {
                        eprintln!("No TEMPer sensor found. Check the USB connection and try again.")
                    }
                    Err(e) => eprintln!("Could not start the acquisition: {e}"),
                }
            }
            "stop" => stop_and_save(&mut engine, &session)?,
            "plot" => {
                let data = engine.snapshot();
                let path = session.plot_path(Local::now());
                match plot::render_plot(&path, &data) {
                    Ok(()) => println!("Plot saved to {}", path.display()),
                    Err(TemperError::EmptyData) => {
                        println!("No data acquired yet; run 'start' and 'stop' first.")
                    }
                    Err(e) => eprintln!("Could not render the plot: {e}"),
                }
            }
            "help" => print_help(),
            "exit" => {
                if engine.state() == AcquisitionState::Running {
                    stop_and_save(&mut engine, &session)?;
                }
                break;
            }
            _ => println!("Invalid command. Please enter 'start', 'stop', 'plot', 'help' or 'exit'."),
        }
    }

    Ok(())
}
