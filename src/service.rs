use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::config::AuthConfig;
use crate::guard::ResourceGuard;
use crate::revocation::RevocationError;
use crate::revocation::RevocationRecord;
use crate::revocation::RevocationStore;
use crate::token::DecodeError;
use crate::token::EncodeError;
use crate::token::Principal;
use crate::token::SignedToken;
use crate::token::TokenClass;
use crate::token::TokenCodec;
use crate::token::TokenPair;
use crate::validator::RejectReason;
use crate::validator::StoreFailurePolicy;
use crate::validator::TokenValidator;
use crate::validator::Verdict;

/// Token lifecycle coordinator.
///
/// Wires the codec, revocation store, and clock into the three flows the
/// surrounding system calls after its own collaborators have done their
/// part: issuing a token pair for a verified principal, exchanging a
/// refresh token for a fresh access token, and revoking on logout.
pub struct AuthService<S, C>
where
    S: RevocationStore,
    C: Clock,
{
    codec: Arc<TokenCodec>,
    store: Arc<S>,
    clock: Arc<C>,
    store_failure_policy: StoreFailurePolicy,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("Failed to encode token: {0}")]
    Encode(#[from] EncodeError),

    #[error("Token rejected: {0}")]
    Rejected(RejectReason),

    #[error("Revocation store unavailable: {0}")]
    Store(#[from] RevocationError),
}

impl<S, C> AuthService<S, C>
where
    S: RevocationStore,
    C: Clock,
{
    /// Create a service with injected dependencies.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            codec,
            store,
            clock,
            store_failure_policy: StoreFailurePolicy::default(),
        }
    }

    /// Build the codec and policy from configuration.
    pub fn from_config(config: &AuthConfig, store: Arc<S>, clock: Arc<C>) -> Self {
        let codec = Arc::new(TokenCodec::new(
            config.secret.as_bytes(),
            Duration::minutes(config.access_expiration_minutes),
            Duration::days(config.refresh_expiration_days),
        ));
        let policy = if config.fail_closed {
            StoreFailurePolicy::FailClosed
        } else {
            StoreFailurePolicy::Propagate
        };
        Self::new(codec, store, clock).with_store_failure_policy(policy)
    }

    /// Override the store failure policy.
    pub fn with_store_failure_policy(mut self, policy: StoreFailurePolicy) -> Self {
        self.store_failure_policy = policy;
        self
    }

    /// Build a validator sharing this service's codec, store, and clock.
    pub fn validator(&self) -> TokenValidator<S, C> {
        TokenValidator::new(
            Arc::clone(&self.codec),
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
        )
        .with_store_failure_policy(self.store_failure_policy)
    }

    /// Build a resource guard over this service's validator.
    pub fn guard(&self) -> ResourceGuard<S, C> {
        ResourceGuard::new(self.validator())
    }

    /// Issue an access/refresh token pair for a verified principal.
    ///
    /// The principal arrives already verified by the identity store; the
    /// core never re-derives it.
    ///
    /// # Errors
    /// * `Encode` - Token signing failed
    pub fn issue_tokens(&self, principal: &Principal) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();
        let access_token = self.codec.issue(principal, TokenClass::Access, now)?;
        let refresh_token = self.codec.issue(principal, TokenClass::Refresh, now)?;

        tracing::info!(principal = %principal, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The presented token must be a valid, unexpired, unrevoked refresh
    /// token; an access token presented here is rejected with `WrongClass`.
    ///
    /// # Errors
    /// * `Rejected` - Presented token failed validation
    /// * `Store` - Revocation store was unavailable
    /// * `Encode` - New token signing failed
    pub fn refresh(&self, refresh_token: &str) -> Result<SignedToken, AuthError> {
        let claims = match self.validator().validate(refresh_token, TokenClass::Refresh)? {
            Verdict::Valid(claims) => claims,
            Verdict::Invalid(reason) => {
                tracing::warn!(%reason, "Refresh rejected");
                return Err(AuthError::Rejected(reason));
            }
        };

        let access_token = self
            .codec
            .issue(&claims.sub, TokenClass::Access, self.clock.now())?;

        tracing::info!(principal = %claims.sub, "Refreshed access token");

        Ok(access_token)
    }

    /// Revoke a presented token (logout).
    ///
    /// Either token class can be logged out. The token must still verify
    /// and be unexpired: revoking an expired token is pointless and is
    /// rejected so the caller learns the session already lapsed. Revoking
    /// an already-revoked token is rejected as `Revoked`.
    ///
    /// # Errors
    /// * `Rejected` - Token was malformed, expired, or already revoked
    /// * `Store` - Revocation store was unavailable
    pub fn logout(&self, token: &str) -> Result<(), AuthError> {
        let now = self.clock.now();

        let claims = self.codec.decode(token, now).map_err(|e| {
            let reason = match e {
                DecodeError::Expired => RejectReason::Expired,
                DecodeError::Malformed(_) => RejectReason::Malformed,
            };
            tracing::warn!(%reason, "Logout rejected");
            AuthError::Rejected(reason)
        })?;

        if self.store.is_revoked(token)? {
            tracing::warn!(principal = %claims.sub, "Logout rejected: already revoked");
            return Err(AuthError::Rejected(RejectReason::Revoked));
        }

        let mut record = RevocationRecord::new(now);
        if let Some(expires_at) = claims.expires_at() {
            record = record.with_expiry(expires_at);
        }
        self.store.revoke(token, record)?;

        tracing::info!(principal = %claims.sub, "Token revoked");

        Ok(())
    }
}
