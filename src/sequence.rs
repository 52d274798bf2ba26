//! The climate activation sequence and its shutoff decision policy.
//!
//! One run walks the vehicle through a fixed series of operations:
//!
//! 1. If the vehicle is asleep, wake it (no completion polling; the start
//!    command is issued immediately after).
//! 2. Start climate control.
//! 3. Wait the configured duration. This happens on the worker task, never
//!    on the input-consumption path.
//! 4. Fetch the vehicle state and decide: climate stays on only when the
//!    reported shift state is one of the four known "car is being operated"
//!    codes. Everything else (parked `null`, an unrecognized code, or a
//!    malformed response) turns climate off, favoring battery conservatism
//!    when the state is uncertain.
//!
//! A run is only entered under a [`SingleFlight`] permit; the sequence
//! never races itself. Transport errors propagate to the caller (the worker
//! task logs them); a malformed state response is not an error, it is the
//! defensive stop branch of the decision policy.
//!
//! [`SingleFlight`]: crate::flight::SingleFlight
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use climate_button::{ClimateSequence, SequenceOutcome};
//! use climate_button::vehicle::MockVehicle;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let vehicle = Arc::new(MockVehicle::new());
//! let sequence = ClimateSequence::new(Arc::clone(&vehicle), Duration::from_secs(300));
//!
//! // Parked car: climate is turned back off after the wait.
//! let outcome = sequence.run().await.unwrap();
//! assert_eq!(outcome, SequenceOutcome::ClimateTurnedOff);
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::vehicle::{ShiftState, StateReading, VehicleControl};

/// Why the decision policy turned climate off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// `shift_state` was `null`: the car is parked and not being driven.
    NotDriven,
    /// `shift_state` carried a code outside the known set.
    UnknownGear(String),
    /// The state response was missing the expected nested fields.
    MalformedState,
}

/// Outcome of the post-wait decision check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClimateDecision {
    /// The car is in active use; leave climate on.
    Keep(ShiftState),
    /// Turn climate off.
    Stop(StopReason),
}

impl ClimateDecision {
    /// Evaluate the decision policy for a state reading.
    ///
    /// Only the four known gear codes suppress the stop; `null`, unknown
    /// codes, and malformed responses all default to stopping.
    pub fn from_reading(reading: &StateReading) -> Self {
        match reading {
            StateReading::Malformed => ClimateDecision::Stop(StopReason::MalformedState),
            StateReading::Parsed(state) => match &state.shift_state {
                None => ClimateDecision::Stop(StopReason::NotDriven),
                Some(ShiftState::Other(code)) => {
                    ClimateDecision::Stop(StopReason::UnknownGear(code.clone()))
                }
                Some(gear) => ClimateDecision::Keep(gear.clone()),
            },
        }
    }
}

/// Terminal state of one sequence run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// The decision check found the car in use; no stop command was issued.
    ClimateLeftOn,
    /// Climate was stopped after the wait.
    ClimateTurnedOff,
}

/// The climate activation sequence.
///
/// Holds the vehicle client and the configured wait duration; each
/// [`run`](Self::run) is one independent pass through the state machine.
/// Clones share the vehicle client.
pub struct ClimateSequence<V> {
    vehicle: Arc<V>,
    wait: Duration,
}

impl<V> Clone for ClimateSequence<V> {
    fn clone(&self) -> Self {
        Self {
            vehicle: Arc::clone(&self.vehicle),
            wait: self.wait,
        }
    }
}

impl<V: VehicleControl> ClimateSequence<V> {
    /// Creates a sequence over the given vehicle client.
    pub fn new(vehicle: Arc<V>, wait: Duration) -> Self {
        Self { vehicle, wait }
    }

    /// The configured wait between starting climate and the decision check.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Run the sequence once.
    ///
    /// The caller must hold the single-flight permit for the duration of
    /// this call. Transport errors from any step propagate; the permit drop
    /// in the caller releases the slot on that path too.
    pub async fn run(&self) -> Result<SequenceOutcome, V::Error> {
        info!("starting start/stop climate sequence");

        if !self.vehicle.is_awake().await? {
            self.vehicle.wake_up().await?;
        }
        self.vehicle.start_climate_control().await?;

        info!(
            "waiting {} seconds to turn climate off",
            self.wait.as_secs()
        );
        tokio::time::sleep(self.wait).await;

        let reading = self.vehicle.get_state().await?;
        let outcome = match ClimateDecision::from_reading(&reading) {
            ClimateDecision::Keep(gear) => {
                info!("car is being used (shift_state={gear}), will not turn climate off");
                SequenceOutcome::ClimateLeftOn
            }
            ClimateDecision::Stop(reason) => {
                match &reason {
                    StopReason::NotDriven => {
                        info!("car is not being driven, turning climate off");
                    }
                    StopReason::UnknownGear(code) => {
                        info!("unknown shift state: {code}, turning climate off");
                    }
                    StopReason::MalformedState => {
                        error!("received an unexpected response from get_state, turning climate off");
                    }
                }
                self.vehicle.stop_climate_control().await?;
                SequenceOutcome::ClimateTurnedOff
            }
        };

        info!("finished start/stop climate sequence");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::VehicleState;

    // =========================================================================
    // Decision Policy Tests
    // =========================================================================

    fn reading(shift_state: Option<ShiftState>) -> StateReading {
        StateReading::Parsed(VehicleState { shift_state })
    }

    #[test]
    fn null_shift_state_stops_climate() {
        assert_eq!(
            ClimateDecision::from_reading(&reading(None)),
            ClimateDecision::Stop(StopReason::NotDriven)
        );
    }

    #[test]
    fn known_gears_keep_climate_on() {
        for gear in [
            ShiftState::Park,
            ShiftState::Drive,
            ShiftState::Reverse,
            ShiftState::Neutral,
        ] {
            assert_eq!(
                ClimateDecision::from_reading(&reading(Some(gear.clone()))),
                ClimateDecision::Keep(gear)
            );
        }
    }

    #[test]
    fn unknown_gear_stops_climate() {
        let decision =
            ClimateDecision::from_reading(&reading(Some(ShiftState::Other("S".to_string()))));
        assert_eq!(
            decision,
            ClimateDecision::Stop(StopReason::UnknownGear("S".to_string()))
        );
    }

    #[test]
    fn malformed_response_stops_climate() {
        assert_eq!(
            ClimateDecision::from_reading(&StateReading::Malformed),
            ClimateDecision::Stop(StopReason::MalformedState)
        );
    }
}
