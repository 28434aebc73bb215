use thiserror::Error;

/// Error type for token encoding.
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Error type for token decoding and verification.
///
/// `Expired` is distinguished from `Malformed` so callers can offer a
/// refresh path instead of a hard rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Token is malformed or its signature does not verify: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,
}
