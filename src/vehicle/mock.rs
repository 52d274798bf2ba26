//! Scripted vehicle double for tests and dry runs.
//!
//! [`MockVehicle`] performs no network I/O. Responses are fixed at
//! construction time via builder methods, and every operation increments a
//! public call counter so tests can assert exactly which commands the
//! sequence issued.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::Ordering;
//! use climate_button::vehicle::{MockVehicle, ShiftState};
//!
//! let vehicle = MockVehicle::new()
//!     .with_awake(true)
//!     .with_shift_state(Some(ShiftState::Drive));
//!
//! assert_eq!(vehicle.stop_calls.load(Ordering::SeqCst), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use super::state::{ShiftState, StateReading, VehicleState};
use super::VehicleControl;

/// Scripted failure from a [`MockVehicle`] operation.
#[derive(Debug, thiserror::Error)]
#[error("scripted vehicle failure in {0}")]
pub struct MockVehicleError(pub &'static str);

/// Mock vehicle client for testing.
///
/// Defaults mirror a parked, sleeping car: `is_awake` returns `false` and
/// `get_state` reports `shift_state: null`.
#[derive(Debug)]
pub struct MockVehicle {
    awake: bool,
    reading: StateReading,
    fail_get_state: bool,
    ops: Mutex<Vec<&'static str>>,
    /// Number of `is_awake` calls.
    pub awake_calls: AtomicUsize,
    /// Number of `wake_up` calls.
    pub wake_calls: AtomicUsize,
    /// Number of `start_climate_control` calls.
    pub start_calls: AtomicUsize,
    /// Number of `stop_climate_control` calls.
    pub stop_calls: AtomicUsize,
    /// Number of `get_state` calls.
    pub state_calls: AtomicUsize,
}

impl Default for MockVehicle {
    fn default() -> Self {
        Self {
            awake: false,
            reading: StateReading::parked(),
            fail_get_state: false,
            ops: Mutex::new(Vec::new()),
            awake_calls: AtomicUsize::new(0),
            wake_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            state_calls: AtomicUsize::new(0),
        }
    }
}

impl MockVehicle {
    /// Creates a mock of a parked, sleeping vehicle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the `is_awake` answer.
    pub fn with_awake(mut self, awake: bool) -> Self {
        self.awake = awake;
        self
    }

    /// Script the shift state `get_state` reports.
    pub fn with_shift_state(mut self, shift_state: Option<ShiftState>) -> Self {
        self.reading = StateReading::Parsed(VehicleState { shift_state });
        self
    }

    /// Script a response missing the expected nested fields.
    pub fn with_malformed_state(mut self) -> Self {
        self.reading = StateReading::Malformed;
        self
    }

    /// Script `get_state` to fail with a transport-style error.
    pub fn with_get_state_failure(mut self) -> Self {
        self.fail_get_state = true;
        self
    }

    /// The operations performed so far, in call order.
    pub fn operations(&self) -> Vec<&'static str> {
        self.ops.lock().expect("ops lock poisoned").clone()
    }

    fn record(&self, op: &'static str) {
        self.ops.lock().expect("ops lock poisoned").push(op);
    }
}

#[async_trait]
impl VehicleControl for MockVehicle {
    type Error = MockVehicleError;

    async fn is_awake(&self) -> Result<bool, MockVehicleError> {
        info!("mock is_awake");
        self.record("is_awake");
        self.awake_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.awake)
    }

    async fn wake_up(&self) -> Result<(), MockVehicleError> {
        info!("mock wake_up");
        self.record("wake_up");
        self.wake_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn start_climate_control(&self) -> Result<(), MockVehicleError> {
        info!("mock start_climate_control");
        self.record("start_climate_control");
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop_climate_control(&self) -> Result<(), MockVehicleError> {
        info!("mock stop_climate_control");
        self.record("stop_climate_control");
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_state(&self) -> Result<StateReading, MockVehicleError> {
        info!("mock get_state");
        self.record("get_state");
        self.state_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get_state {
            return Err(MockVehicleError("get_state"));
        }
        Ok(self.reading.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_mirror_a_sleeping_parked_car() {
        let vehicle = MockVehicle::new();
        assert!(!vehicle.is_awake().await.unwrap());
        assert_eq!(vehicle.get_state().await.unwrap(), StateReading::parked());
    }

    #[tokio::test]
    async fn calls_are_counted() {
        let vehicle = MockVehicle::new();
        vehicle.wake_up().await.unwrap();
        vehicle.start_climate_control().await.unwrap();
        vehicle.start_climate_control().await.unwrap();

        assert_eq!(vehicle.wake_calls.load(Ordering::SeqCst), 1);
        assert_eq!(vehicle.start_calls.load(Ordering::SeqCst), 2);
        assert_eq!(vehicle.stop_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            vehicle.operations(),
            vec!["wake_up", "start_climate_control", "start_climate_control"]
        );
    }

    #[tokio::test]
    async fn scripted_shift_state() {
        let vehicle = MockVehicle::new().with_shift_state(Some(ShiftState::Drive));
        let reading = vehicle.get_state().await.unwrap();
        assert_eq!(
            reading,
            StateReading::Parsed(VehicleState {
                shift_state: Some(ShiftState::Drive)
            })
        );
    }

    #[tokio::test]
    async fn scripted_get_state_failure() {
        let vehicle = MockVehicle::new().with_get_state_failure();
        assert!(vehicle.get_state().await.is_err());
        assert_eq!(vehicle.state_calls.load(Ordering::SeqCst), 1);
    }
}
