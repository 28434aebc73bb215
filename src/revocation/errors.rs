use thiserror::Error;

/// Transient infrastructure failures from a revocation store backend.
///
/// These are the only faults the validation pipeline propagates: they mean
/// "could not answer", never "revoked" or "not revoked". The in-memory
/// store never produces them; remote-backed stores surface connection and
/// timeout failures through these variants.
#[derive(Debug, Clone, Error)]
pub enum RevocationError {
    #[error("Revocation store connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Revocation store query timed out: {0}")]
    Timeout(String),
}
