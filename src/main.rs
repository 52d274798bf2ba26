//! climate-button binary.
//!
//! Without a subcommand this runs the persistent daemon: supervised trigger
//! consumption that never exits voluntarily. With one of the diagnostic
//! subcommands it runs that single vehicle operation, prints any returned
//! value, and exits, bypassing the input source and supervisor entirely.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use climate_button::vehicle::{StateReading, VehicleApi, VehicleControl};
use climate_button::{Config, Daemon};

#[derive(Parser)]
#[command(name = "climate-button", version, about = "Single-button vehicle climate control daemon")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// One-shot diagnostic commands.
#[derive(Subcommand)]
enum Command {
    /// Print whether the vehicle is awake
    IsAwake,
    /// Send a wake command
    Wake,
    /// Start climate control
    StartClimate,
    /// Stop climate control
    StopClimate,
    /// Print the vehicle's reported shift state
    State,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

async fn run_command(config_path: &Path, command: Command) -> anyhow::Result<()> {
    let config = Config::load(config_path)?;
    let vehicle = VehicleApi::from_config(&config);

    match command {
        Command::IsAwake => println!("{}", vehicle.is_awake().await?),
        Command::Wake => vehicle.wake_up().await?,
        Command::StartClimate => vehicle.start_climate_control().await?,
        Command::StopClimate => vehicle.stop_climate_control().await?,
        Command::State => match vehicle.get_state().await? {
            StateReading::Parsed(state) => match state.shift_state {
                Some(shift_state) => println!("shift_state: {shift_state}"),
                None => println!("shift_state: null"),
            },
            StateReading::Malformed => println!("shift_state: <unexpected response>"),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("running climate-button");

    match cli.command {
        Some(command) => run_command(&cli.config, command).await,
        None => {
            Daemon::new(cli.config).run().await;
            Ok(())
        }
    }
}
