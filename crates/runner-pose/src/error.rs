//! Capture errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed landmark frame on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("capture device fault: {0}")]
    Device(String),

    #[error("capture source already released")]
    Released,
}
