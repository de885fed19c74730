use crate::batch::DeviceFailure;
use crate::state::LightId;

/// All error types that can occur when interacting with a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed caller input, rejected before any network call is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A numeric field was outside its documented range.
    #[error("{field} out of range: {value} is not within {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The specified light was never discovered.
    #[error("light {0} not found")]
    LightNotFound(LightId),

    /// The specified scene does not exist on the bridge.
    #[error("scene {0:?} not found")]
    SceneNotFound(String),

    /// A device payload could not be decoded into a state snapshot.
    #[error("malformed device payload: {0}")]
    MalformedState(String),

    /// A transport operation failed; the cause is opaque to this crate.
    #[error("transport {action} error: {source}")]
    Transport {
        action: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A multi-device operation succeeded for only a subset of its targets.
    #[error("operation failed for {} of the targeted lights", .0.len())]
    PartialFailure(Vec<DeviceFailure>),
}

impl Error {
    /// Create a new transport error
    pub fn transport(
        action: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Transport {
            action: action.to_string(),
            source: Box::new(source),
        }
    }

    /// Create a new malformed state error for a single payload key
    pub(crate) fn malformed(key: &str, value: &serde_json::Value) -> Self {
        Error::MalformedState(format!("unexpected value {value} for key {key:?}"))
    }

    /// Create a new out of range error
    pub(crate) fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Error::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
