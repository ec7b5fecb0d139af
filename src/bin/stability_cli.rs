use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stability_monitor::audio::{CpalPlayback, Playback, StubPlayback};
use stability_monitor::config::AppConfig;
use stability_monitor::controller::StabilityController;
use stability_monitor::display::LogDisplay;
use stability_monitor::error::AudioError;
use stability_monitor::sensors::ReplayFeed;
use stability_monitor::StabilityClassifier;

#[derive(Parser, Debug)]
#[command(
    name = "stability_cli",
    about = "Replay harness for the device stability monitor"
)]
struct Cli {
    /// Override path of the JSON config file (defaults to assets/stability_config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded sample file and print one JSON event per applied state
    Replay {
        /// Newline-delimited JSON sample file
        #[arg(long)]
        samples: PathBuf,
        /// Play the configured tracks through the default output device
        #[arg(long, default_value_t = false)]
        audible: bool,
        /// Invoke the user reset action after the last sample
        #[arg(long, default_value_t = false)]
        reset_after: bool,
    },
    /// Classify a single reading without running a controller
    Classify {
        /// Accelerometer reading as three values: x y z (m/s²)
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        accel: Option<Vec<f32>>,
        /// Gyroscope rotation rate around z (rad/s)
        #[arg(long, allow_negative_numbers = true)]
        rotation_rate_z: Option<f32>,
    },
    /// Print the effective configuration as JSON
    DumpConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);

    match cli.command {
        Commands::Replay {
            samples,
            audible,
            reset_after,
        } => run_replay(&config, &samples, audible, reset_after),
        Commands::Classify {
            accel,
            rotation_rate_z,
        } => run_classify(&config, accel, rotation_rate_z),
        Commands::DumpConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_replay(
    config: &AppConfig,
    samples: &PathBuf,
    audible: bool,
    reset_after: bool,
) -> Result<ExitCode> {
    let playback: Result<Box<dyn Playback>, AudioError> = if audible {
        CpalPlayback::new(&config.audio).map(|p| Box::new(p) as Box<dyn Playback>)
    } else {
        Ok(Box::new(StubPlayback::new()) as Box<dyn Playback>)
    };

    // Playback failure degrades to a silent run; the replay still happens
    let mut controller =
        StabilityController::with_playback(config.thresholds, playback, Box::new(LogDisplay));
    let mut events = controller.subscribe_events();
    controller.resume();

    let feed = ReplayFeed::from_path(samples)?;
    for sample in feed.samples() {
        controller.handle_sample(*sample);
        while let Ok(event) = events.try_recv() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    if reset_after {
        controller.reset();
        while let Ok(event) = events.try_recv() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    controller.pause();
    controller.teardown();
    Ok(ExitCode::SUCCESS)
}

fn run_classify(
    config: &AppConfig,
    accel: Option<Vec<f32>>,
    rotation_rate_z: Option<f32>,
) -> Result<ExitCode> {
    let classifier = StabilityClassifier::new(config.thresholds);

    match (accel, rotation_rate_z) {
        (Some(values), None) => {
            let state = classifier.classify_accelerometer(values[0], values[1], values[2]);
            println!("{}", serde_json::to_string(&serde_json::json!({ "state": state }))?);
        }
        (None, Some(rate)) => {
            // None means the reading says nothing about stability
            let state = classifier.classify_gyroscope(rate);
            println!("{}", serde_json::to_string(&serde_json::json!({ "state": state }))?);
        }
        _ => bail!("pass exactly one of --accel X Y Z or --rotation-rate-z RATE"),
    }

    Ok(ExitCode::SUCCESS)
}
