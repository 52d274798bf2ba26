//! # climate-button
//!
//! A daemon that turns one physical key press into a supervised vehicle
//! climate activation sequence: wake the car if asleep, start climate,
//! wait a configured duration, then stop climate unless the car is being
//! driven.
//!
//! ## Features
//!
//! - **Debounced input**: contact bounce and key auto-repeat collapse into
//!   a single trigger
//! - **Single-flight sequencing**: at most one sequence runs at a time;
//!   extra presses are dropped, never queued
//! - **Conservative shutoff policy**: climate stays on only when the car
//!   reports a known in-use shift state; anything uncertain turns it off
//! - **Crash-recovering supervisor**: a failed HTTP call or unplugged
//!   device restarts the loop after a fixed delay instead of killing the
//!   process
//!
//! ## Architecture
//!
//! The crate is structured so the whole pipeline can be tested without
//! hardware or network:
//!
//! - `vehicle` - Capability trait over the vehicle API, with real and mock
//!   implementations
//! - `input` - Trigger sources (Linux input device, scripted mock)
//! - `debounce` - Duplicate-press suppression
//! - `flight` - The single-flight execution slot
//! - `sequence` - The climate state machine and decision policy
//! - `daemon` - Consumer loop and supervisor
//! - `config` - YAML configuration
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use climate_button::{ClimateSequence, SequenceOutcome, SingleFlight, daemon};
//! use climate_button::vehicle::{MockVehicle, ShiftState};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! // A car being driven keeps its climate on.
//! let vehicle = Arc::new(MockVehicle::new().with_shift_state(Some(ShiftState::Drive)));
//! let sequence = ClimateSequence::new(vehicle, Duration::from_secs(600));
//! let flights = SingleFlight::new();
//!
//! let outcome = daemon::run_guarded(&flights, &sequence).await;
//! assert!(matches!(outcome, Some(Ok(SequenceOutcome::ClimateLeftOn))));
//! # }
//! ```

#![warn(missing_docs)]

/// YAML configuration loading and validation.
pub mod config;
/// Consumer loop and crash-recovering supervisor.
pub mod daemon;
/// Duplicate-trigger suppression.
pub mod debounce;
/// Single-flight execution slot shared by all sequence runs.
pub mod flight;
/// Trigger input sources: Linux input device and scripted mock.
pub mod input;
/// The climate activation sequence and its shutoff decision policy.
pub mod sequence;
/// Vehicle API abstraction with real and mock implementations.
pub mod vehicle;

// Re-exports for convenience
pub use config::{Config, ConfigError};
pub use daemon::{Daemon, RESTART_DELAY};
pub use debounce::Debouncer;
pub use flight::{FlightPermit, SingleFlight};
pub use input::{DeviceKeySource, InputError, MockTriggerSource, TriggerEvent, TriggerSource};
pub use sequence::{ClimateDecision, ClimateSequence, SequenceOutcome, StopReason};
pub use vehicle::{
    MockVehicle, ShiftState, StateReading, VehicleApi, VehicleControl, VehicleError, VehicleState,
};
