pub mod errors;
pub mod memory;

use chrono::DateTime;
use chrono::Utc;

pub use errors::RevocationError;
pub use memory::InMemoryRevocationStore;

/// Record attached to a revoked token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationRecord {
    /// When the token was revoked.
    pub revoked_at: DateTime<Utc>,

    /// When the token would have expired naturally, if known.
    ///
    /// Only used to garbage-collect records that can no longer matter;
    /// correctness never depends on it.
    pub expires_at: Option<DateTime<Utc>>,
}

impl RevocationRecord {
    pub fn new(revoked_at: DateTime<Utc>) -> Self {
        Self {
            revoked_at,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Port for revocation storage.
///
/// Revocation is token-string-scoped: membership is an exact-string match,
/// so revoking one token never invalidates sibling tokens of the same
/// principal. Implementations must be linearizable — once `revoke` returns,
/// every subsequent `is_revoked` call, from any thread, observes it. A
/// persistent implementation must commit before returning from `revoke`;
/// a remote-backed one must bound its queries with a timeout and surface
/// failures as `RevocationError`, never as a membership answer.
pub trait RevocationStore: Send + Sync {
    /// Record a token as revoked.
    ///
    /// Idempotent: revoking an already-revoked token is a no-op success,
    /// and the first record wins.
    ///
    /// # Errors
    /// * `RevocationError` - Backend could not commit the record
    fn revoke(&self, token: &str, record: RevocationRecord) -> Result<(), RevocationError>;

    /// Check whether a token has been revoked.
    ///
    /// # Errors
    /// * `RevocationError` - Backend could not answer
    fn is_revoked(&self, token: &str) -> Result<bool, RevocationError>;
}
