//! Vehicle API abstraction with real and mock implementations.
//!
//! This module defines [`VehicleControl`], the capability set the climate
//! sequence needs from a vehicle, and two implementations:
//!
//! - [`VehicleApi`]: talks to the remote vehicle-control HTTP API
//! - [`MockVehicle`]: scripted in-memory double for tests and dry runs
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`VehicleControl`] | Capability trait (wake, climate, state) |
//! | [`VehicleApi`] | Real HTTP client implementation |
//! | [`MockVehicle`] | Scripted implementation, records calls |
//! | [`StateReading`] | Typed well-formed vs. malformed state response |
//! | [`ShiftState`] | Drive-train position reported by the vehicle |
//!
//! # Example
//!
//! ```rust
//! use climate_button::vehicle::{MockVehicle, MockVehicleError, VehicleControl};
//!
//! # async fn demo() -> Result<(), MockVehicleError> {
//! let vehicle = MockVehicle::new();
//! if !vehicle.is_awake().await? {
//!     vehicle.wake_up().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod mock;
pub mod state;

pub use api::{VehicleApi, VehicleError};
pub use mock::{MockVehicle, MockVehicleError};
pub use state::{ShiftState, StateReading, VehicleState};

use async_trait::async_trait;

/// Capability set the climate sequence needs from a vehicle.
///
/// The real implementation ([`VehicleApi`]) performs network calls; the mock
/// ([`MockVehicle`]) returns scripted values so the sequence and executor can
/// be exercised deterministically.
///
/// # Error Contract
///
/// Transport and decode failures propagate through `Self::Error` and are
/// never swallowed. A *well-formed HTTP response with unexpected content* is
/// not an error: `get_state` models that case as
/// [`StateReading::Malformed`], which the decision policy handles by turning
/// climate off defensively.
#[async_trait]
pub trait VehicleControl: Send + Sync {
    /// Error type for vehicle operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns true only if the vehicle reports the status string `"awake"`.
    async fn is_awake(&self) -> Result<bool, Self::Error>;

    /// Issues a wake command. Fire-and-forget: the response body is not
    /// inspected beyond error propagation.
    async fn wake_up(&self) -> Result<(), Self::Error>;

    /// Starts climate control.
    async fn start_climate_control(&self) -> Result<(), Self::Error>;

    /// Stops climate control.
    async fn stop_climate_control(&self) -> Result<(), Self::Error>;

    /// Fetches the full vehicle state.
    ///
    /// Missing or malformed `drive_state.shift_state` fields surface as
    /// [`StateReading::Malformed`], not as an error.
    async fn get_state(&self) -> Result<StateReading, Self::Error>;
}
