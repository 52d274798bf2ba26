//! Vehicle state types and response classification.
//!
//! The vehicle API returns a nested JSON document; the only part the climate
//! sequence cares about is `drive_state.shift_state`. [`StateReading`] splits
//! the response into a well-formed snapshot ([`VehicleState`]) or
//! [`StateReading::Malformed`] when the expected nesting is absent, so the
//! decision policy can treat "unexpected response" as a typed case rather
//! than a caught error.

use core::fmt;

use serde_json::Value;

/// Drive-train position reported by the vehicle.
///
/// The vehicle reports one of the four gear codes while it is being
/// operated, or `null` when parked and off. Anything else is carried as
/// [`Other`](Self::Other) so the caller can log the raw code.
///
/// # Examples
///
/// ```
/// use climate_button::vehicle::ShiftState;
///
/// assert_eq!(ShiftState::from_code("P"), ShiftState::Park);
/// assert_eq!(ShiftState::from_code("D"), ShiftState::Drive);
/// assert_eq!(ShiftState::from_code("S"), ShiftState::Other("S".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShiftState {
    /// Park (`"P"`).
    Park,
    /// Drive (`"D"`).
    Drive,
    /// Reverse (`"R"`).
    Reverse,
    /// Neutral (`"N"`).
    Neutral,
    /// A code outside the known set, kept verbatim for logging.
    Other(String),
}

impl ShiftState {
    /// Parse a shift state from the vehicle's single-letter code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => ShiftState::Park,
            "D" => ShiftState::Drive,
            "R" => ShiftState::Reverse,
            "N" => ShiftState::Neutral,
            other => ShiftState::Other(other.to_string()),
        }
    }

    /// Returns the code as the vehicle reports it.
    pub fn as_code(&self) -> &str {
        match self {
            ShiftState::Park => "P",
            ShiftState::Drive => "D",
            ShiftState::Reverse => "R",
            ShiftState::Neutral => "N",
            ShiftState::Other(code) => code,
        }
    }

    /// True for the four known "car is being operated" codes.
    pub fn is_known(&self) -> bool {
        !matches!(self, ShiftState::Other(_))
    }
}

impl fmt::Display for ShiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Snapshot of the fields the climate sequence consumes.
///
/// `shift_state` is `None` when the vehicle reports `null` (parked, not
/// being driven).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VehicleState {
    /// Reported drive-train position, or `None` when the car is off.
    pub shift_state: Option<ShiftState>,
}

/// Classified result of a `get_state` call.
///
/// Transport failures are errors on the [`VehicleControl`] call itself; this
/// type only distinguishes whether a successfully fetched document carried
/// the expected `drive_state.shift_state` nesting.
///
/// [`VehicleControl`]: crate::vehicle::VehicleControl
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateReading {
    /// The response carried the expected fields.
    Parsed(VehicleState),
    /// The response was missing `drive_state` or `shift_state`.
    Malformed,
}

impl StateReading {
    /// Classify a raw state document.
    ///
    /// `drive_state` must be an object containing a `shift_state` key. The
    /// key's value may be `null` (parked) or a string code; any other JSON
    /// value is carried as an unknown code so the decision policy stops
    /// climate and logs it.
    pub fn from_value(value: &Value) -> Self {
        let Some(drive_state) = value.get("drive_state").and_then(Value::as_object) else {
            return StateReading::Malformed;
        };
        let Some(shift_state) = drive_state.get("shift_state") else {
            return StateReading::Malformed;
        };

        let shift_state = match shift_state {
            Value::Null => None,
            Value::String(code) => Some(ShiftState::from_code(code)),
            other => Some(ShiftState::Other(other.to_string())),
        };

        StateReading::Parsed(VehicleState { shift_state })
    }

    /// A parked, powered-off snapshot (`shift_state: null`).
    pub fn parked() -> Self {
        StateReading::Parsed(VehicleState { shift_state: None })
    }
}
