use std::fmt::{Display, Formatter};

/// Error type for matrix and network operations.
///
/// Every variant is a programmer or configuration error; nothing here is
/// transient or retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two operands had incompatible shapes.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Invalid network configuration (layer list too short, zero-width layer,
    /// non-positive learning rate).
    Config(String),
    /// Backpropagation was invoked without a forward trace to consume.
    TraceConsumed,
    /// Serialized model state could not be decoded.
    Codec(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected ({}, {}), got ({}, {})",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Error::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Error::TraceConsumed => {
                f.write_str("no forward trace available; call feed_forward first")
            }
            Error::Codec(msg) => write!(f, "malformed model state: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Codec(value.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(value: base64::DecodeError) -> Self {
        Error::Codec(value.to_string())
    }
}
