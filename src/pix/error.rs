//! Error types for payment payload handling

use thiserror::Error;

/// Result type alias for payload operations
pub type Result<T> = std::result::Result<T, PixError>;

/// Errors raised while reading or rendering a payload
///
/// Encoding itself never fails; these come from [`decode_payload`](super::decode_payload)
/// and from QR rendering.
#[derive(Debug, Error)]
pub enum PixError {
    /// Payload is not plain ASCII
    #[error("Payload contains non-ASCII characters")]
    NonAscii,

    /// Payload does not end with a checksum header and value
    #[error("Payload is missing its checksum trailer")]
    MissingChecksum,

    /// Trailing checksum does not match the payload
    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },

    /// A field runs past the end of its container
    #[error("Field at offset {offset} is truncated")]
    Truncated { offset: usize },

    /// Length prefix is not two decimal digits
    #[error("Invalid length prefix for tag '{tag}' at offset {offset}")]
    InvalidLength { tag: String, offset: usize },

    /// QR code could not be built from the payload
    #[error("QR rendering failed: {0}")]
    Render(String),
}
