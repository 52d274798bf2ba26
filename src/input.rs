//! Trigger input sources.
//!
//! A [`TriggerSource`] produces a lazy, infinite series of
//! [`TriggerEvent`]s; the read for the next event may suspend indefinitely
//! waiting for a physical press, which is the consumer loop's intended idle
//! state. Debouncing is NOT done here; every raw event is surfaced and the
//! consumer applies the same debounce rule regardless of source.
//!
//! [`DeviceKeySource`] is the hardware implementation: it reads the Linux
//! input device file one byte at a time and treats each successful read as
//! a press event. [`MockTriggerSource`] replays a scripted series of events
//! for tests.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Error type for trigger input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input device could not be opened.
    #[error("failed to open input device {path}: {source}")]
    Open {
        /// Path of the device file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from the device failed.
    #[error("input device read failed: {0}")]
    Read(#[from] io::Error),

    /// The device reached end-of-file (e.g., unplugged).
    #[error("input device closed")]
    Closed,
}

/// A discrete press event. Carries only its timestamp; the press has no
/// payload beyond "run the sequence now."
#[derive(Clone, Copy, Debug)]
pub struct TriggerEvent {
    /// When the event was observed.
    pub at: Instant,
}

/// Source of trigger events.
#[async_trait]
pub trait TriggerSource: Send {
    /// Wait for and return the next press event.
    ///
    /// May suspend indefinitely; that is the consumer's idle state, not a
    /// timeout condition.
    async fn next_event(&mut self) -> Result<TriggerEvent, InputError>;
}

/// Reads press events from a Linux input device file.
///
/// Opens `/dev/input/by-id/<device_id>` and reads one byte at a time; any
/// byte means activity on the device and is reported as an event. The
/// consumer's debouncer collapses the resulting burst into a single
/// accepted trigger.
pub struct DeviceKeySource {
    path: PathBuf,
    file: File,
}

impl DeviceKeySource {
    /// Directory of stable device symlinks.
    pub const DEVICE_DIR: &'static str = "/dev/input/by-id";

    /// Open the device with the given stable ID.
    pub async fn open(device_id: &str) -> Result<Self, InputError> {
        let path = Path::new(Self::DEVICE_DIR).join(device_id);
        let file = File::open(&path).await.map_err(|source| InputError::Open {
            path: path.clone(),
            source,
        })?;
        debug!("opened input device {}", path.display());
        Ok(Self { path, file })
    }

    /// Path of the opened device file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TriggerSource for DeviceKeySource {
    async fn next_event(&mut self) -> Result<TriggerEvent, InputError> {
        let mut byte = [0u8; 1];
        let read = self.file.read(&mut byte).await?;
        if read == 0 {
            return Err(InputError::Closed);
        }
        Ok(TriggerEvent { at: Instant::now() })
    }
}

/// Scripted trigger source for tests.
///
/// Yields the queued events in order, then reports
/// [`InputError::Closed`], which ends the consumer loop the same way an
/// unplugged device would.
#[derive(Debug, Default)]
pub struct MockTriggerSource {
    events: VecDeque<TriggerEvent>,
}

impl MockTriggerSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event at the given timestamp.
    pub fn push(&mut self, at: Instant) {
        self.events.push_back(TriggerEvent { at });
    }

    /// Number of events still queued.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl TriggerSource for MockTriggerSource {
    async fn next_event(&mut self) -> Result<TriggerEvent, InputError> {
        self.events.pop_front().ok_or(InputError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn mock_source_yields_queued_events_in_order() {
        let t0 = Instant::now();
        let mut source = MockTriggerSource::new();
        source.push(t0);
        source.push(t0 + Duration::from_secs(2));
        assert_eq!(source.pending(), 2);

        let first = source.next_event().await.unwrap();
        let second = source.next_event().await.unwrap();
        assert_eq!(first.at, t0);
        assert_eq!(second.at, t0 + Duration::from_secs(2));
    }

    #[tokio::test]
    async fn mock_source_closes_when_drained() {
        let mut source = MockTriggerSource::new();
        assert!(matches!(
            source.next_event().await,
            Err(InputError::Closed)
        ));
    }

    #[tokio::test]
    async fn missing_device_is_an_open_error() {
        let result = DeviceKeySource::open("no-such-device-for-tests").await;
        assert!(matches!(result, Err(InputError::Open { .. })));
    }
}
