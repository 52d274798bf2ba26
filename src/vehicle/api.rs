//! HTTP client for the remote vehicle-control API.
//!
//! Every operation is a `GET {host}/{vin}{path}` carrying a bearer token.
//! Responses are JSON; decode failures are typed errors, while a decoded
//! document with unexpected content is classified by
//! [`StateReading::from_value`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::state::StateReading;
use super::VehicleControl;
use crate::config::Config;

/// Error type for vehicle API operations.
#[derive(Debug, thiserror::Error)]
pub enum VehicleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the remote vehicle-control API.
///
/// # Example
///
/// ```no_run
/// use climate_button::vehicle::{VehicleApi, VehicleControl};
///
/// # async fn demo() -> Result<(), climate_button::vehicle::VehicleError> {
/// let vehicle = VehicleApi::new("https://api.tessie.com", "5YJ3000000NEXUS01", "token");
/// if !vehicle.is_awake().await? {
///     vehicle.wake_up().await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct VehicleApi {
    client: Client,
    host: String,
    vin: String,
    access_token: String,
}

impl VehicleApi {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `host` - Base URL of the API (e.g., "https://api.tessie.com")
    /// * `vin` - Vehicle identifier
    /// * `access_token` - Bearer credential attached to every request
    pub fn new(
        host: impl Into<String>,
        vin: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            host: host.into().trim_end_matches('/').to_string(),
            vin: vin.into(),
            access_token: access_token.into(),
        }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.host, &config.vin, &config.access_token)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}{}", self.host, self.vin, path)
    }

    /// Issue a GET and decode the JSON body.
    ///
    /// `log_response_length` replaces the body with its length in the log
    /// line; the full-state response is large and mostly noise.
    async fn get(&self, path: &str, log_response_length: bool) -> Result<Value, VehicleError> {
        let endpoint = self.endpoint(path);
        let body = self
            .client
            .get(&endpoint)
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .text()
            .await?;
        let json: Value = serde_json::from_str(&body)?;

        if log_response_length {
            debug!("GET {endpoint} -- response length: {}", body.len());
        } else {
            debug!("GET {endpoint} -- {json}");
        }

        Ok(json)
    }
}

#[async_trait]
impl VehicleControl for VehicleApi {
    type Error = VehicleError;

    // Reported statuses: asleep, waiting_for_sleep, awake.
    async fn is_awake(&self) -> Result<bool, VehicleError> {
        info!("checking if vehicle is awake");
        let response = self.get("/status", false).await?;
        Ok(response.get("status").and_then(Value::as_str) == Some("awake"))
    }

    async fn wake_up(&self) -> Result<(), VehicleError> {
        info!("waking vehicle");
        self.get("/wake", false).await?;
        Ok(())
    }

    async fn start_climate_control(&self) -> Result<(), VehicleError> {
        info!("starting climate");
        self.get("/command/start_climate", false).await?;
        Ok(())
    }

    async fn stop_climate_control(&self) -> Result<(), VehicleError> {
        info!("stopping climate");
        self.get("/command/stop_climate", false).await?;
        Ok(())
    }

    async fn get_state(&self) -> Result<StateReading, VehicleError> {
        info!("getting vehicle state");
        let response = self.get("/state", true).await?;
        Ok(StateReading::from_value(&response))
    }
}
