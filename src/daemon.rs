//! Daemon wiring: trigger consumption and the supervisor loop.
//!
//! One long-lived consumer reads events from the trigger source
//! sequentially; the read may suspend indefinitely waiting for the next
//! physical press. Each accepted event spawns a short-lived worker task
//! that claims the single-flight slot and runs the climate sequence, so the
//! consumer returns to reading immediately and is never blocked by an
//! in-flight sequence. Triggers that lose the slot are dropped, not queued.
//!
//! The supervisor loop owns process lifetime: any error that escapes the
//! consumer (configuration failure, device I/O failure) is logged, the full
//! setup is torn down, and after a fixed delay everything is rebuilt from
//! scratch: configuration re-read, device reopened, vehicle client
//! reconstructed. It has no termination condition under normal operation.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, trace};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::flight::SingleFlight;
use crate::input::{DeviceKeySource, InputError, TriggerSource};
use crate::sequence::{ClimateSequence, SequenceOutcome};
use crate::vehicle::{MockVehicle, VehicleApi, VehicleControl};

/// Fixed delay between supervisor restarts.
pub const RESTART_DELAY: Duration = Duration::from_secs(10);

/// Claim the single-flight slot and run the sequence once.
///
/// Returns `None` without touching the vehicle when a sequence is already
/// in flight. The permit is held for the whole run and released on every
/// exit path, success or error.
pub async fn run_guarded<V: VehicleControl>(
    flights: &SingleFlight,
    sequence: &ClimateSequence<V>,
) -> Option<Result<SequenceOutcome, V::Error>> {
    let Some(_permit) = flights.try_begin() else {
        info!("mutex locked, ignoring climate activation key press");
        return None;
    };
    Some(sequence.run().await)
}

/// Consume trigger events until the source fails.
///
/// Applies the debounce rule to every event, then dispatches each accepted
/// trigger onto its own task. Only a source error ends this loop; sequence
/// errors are logged on the worker and do not bubble up here.
pub async fn consume_triggers<V, S>(
    source: &mut S,
    sequence: ClimateSequence<V>,
    flights: SingleFlight,
) -> Result<(), InputError>
where
    V: VehicleControl + 'static,
    S: TriggerSource,
{
    let mut debouncer = Debouncer::new();
    loop {
        let event = source.next_event().await?;
        if !debouncer.accept(event.at) {
            trace!("trigger inside debounce window, dropped");
            continue;
        }

        info!("climate activation key pressed");
        let flights = flights.clone();
        let sequence = sequence.clone();
        tokio::spawn(async move {
            match run_guarded(&flights, &sequence).await {
                None => {}
                Some(Ok(outcome)) => debug!(?outcome, "sequence finished"),
                Some(Err(error)) => error!("climate sequence failed: {error}"),
            }
        });
    }
}

/// Run a fallible setup-and-serve function forever.
///
/// A healthy run never returns, so every return is a failure; it is logged
/// and followed by [`RESTART_DELAY`] before the next attempt.
pub async fn supervise<F, Fut>(mut run_once: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    loop {
        if let Err(error) = run_once().await {
            error!("main loop exited with an error: {error:#}");
        }
        info!(
            "waiting {} seconds before starting program again",
            RESTART_DELAY.as_secs()
        );
        sleep(RESTART_DELAY).await;
    }
}

/// The persistent daemon: supervised trigger consumption.
pub struct Daemon {
    config_path: PathBuf,
}

impl Daemon {
    /// Creates a daemon that loads configuration from the given path on
    /// every (re)start.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Run until the process is killed. Never returns under normal
    /// operation; every internal failure restarts the full setup.
    pub async fn run(self) {
        supervise(|| self.run_once()).await;
    }

    /// One full setup-and-serve pass: load config, open the input device,
    /// build the vehicle client, consume triggers.
    async fn run_once(&self) -> anyhow::Result<()> {
        let config = Config::load(&self.config_path)?;
        info!(
            "running with ac duration {}s",
            config.climate_duration_seconds
        );

        let mut source = DeviceKeySource::open(&config.device_id).await?;
        info!("awaiting key press");

        if config.dry_run {
            let sequence =
                ClimateSequence::new(Arc::new(MockVehicle::new()), config.climate_wait());
            consume_triggers(&mut source, sequence, SingleFlight::new()).await?;
        } else {
            let vehicle = Arc::new(VehicleApi::from_config(&config));
            let sequence = ClimateSequence::new(vehicle, config.climate_wait());
            consume_triggers(&mut source, sequence, SingleFlight::new()).await?;
        }
        Ok(())
    }
}
