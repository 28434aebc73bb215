use std::sync::Arc;

use crate::clock::Clock;
use crate::revocation::RevocationError;
use crate::revocation::RevocationStore;
use crate::token::DecodeError;
use crate::token::TokenClaims;
use crate::token::TokenClass;
use crate::token::TokenCodec;

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Unparseable, corrupt, or forged. Never retried.
    Malformed,
    /// Structurally valid but past its expiration. Recoverable: the caller
    /// should attempt a refresh exchange.
    Expired,
    /// Wrong token class for the operation (refresh where access was
    /// required, or vice versa). A caller bug, surfaced as unauthorized.
    WrongClass,
    /// Explicitly invalidated before natural expiry. Never recoverable
    /// from the same token.
    Revoked,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Malformed => write!(f, "malformed"),
            RejectReason::Expired => write!(f, "expired"),
            RejectReason::WrongClass => write!(f, "wrong token class"),
            RejectReason::Revoked => write!(f, "revoked"),
        }
    }
}

/// Terminal classification of a validation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid(TokenClaims),
    Invalid(RejectReason),
}

/// What to do when the revocation store cannot answer.
///
/// `Propagate` surfaces the transient error to the caller as a distinct
/// "validation unavailable" condition — never silently valid or invalid.
/// `FailClosed` treats an unanswerable lookup as revoked and must be
/// opted into explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreFailurePolicy {
    #[default]
    Propagate,
    FailClosed,
}

/// Orchestrates codec decode, class check, and revocation lookup into a
/// single verdict.
///
/// The check order is load-bearing: the signature is verified before any
/// embedded claim is trusted, the class check runs only on verified claims,
/// and the revocation store is consulted last so structurally wrong tokens
/// never cost a store lookup.
pub struct TokenValidator<S, C>
where
    S: RevocationStore,
    C: Clock,
{
    codec: Arc<TokenCodec>,
    store: Arc<S>,
    clock: Arc<C>,
    store_failure_policy: StoreFailurePolicy,
}

impl<S, C> TokenValidator<S, C>
where
    S: RevocationStore,
    C: Clock,
{
    /// Create a validator with injected dependencies.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            codec,
            store,
            clock,
            store_failure_policy: StoreFailurePolicy::default(),
        }
    }

    /// Override the store failure policy.
    pub fn with_store_failure_policy(mut self, policy: StoreFailurePolicy) -> Self {
        self.store_failure_policy = policy;
        self
    }

    /// Validate a presented token against a required class.
    ///
    /// # Returns
    /// `Verdict::Valid(claims)` or `Verdict::Invalid(reason)`; both are
    /// terminal. The only error is a transient revocation-store failure
    /// under `StoreFailurePolicy::Propagate`.
    pub fn validate(
        &self,
        token: &str,
        required: TokenClass,
    ) -> Result<Verdict, RevocationError> {
        let claims = match self.codec.decode(token, self.clock.now()) {
            Ok(claims) => claims,
            Err(DecodeError::Expired) => {
                tracing::debug!("Token rejected: expired");
                return Ok(Verdict::Invalid(RejectReason::Expired));
            }
            Err(DecodeError::Malformed(e)) => {
                tracing::debug!(error = %e, "Token rejected: malformed");
                return Ok(Verdict::Invalid(RejectReason::Malformed));
            }
        };

        if claims.class != required {
            tracing::debug!(
                presented = %claims.class,
                required = %required,
                "Token rejected: wrong class"
            );
            return Ok(Verdict::Invalid(RejectReason::WrongClass));
        }

        match self.store.is_revoked(token) {
            Ok(true) => {
                tracing::debug!("Token rejected: revoked");
                Ok(Verdict::Invalid(RejectReason::Revoked))
            }
            Ok(false) => Ok(Verdict::Valid(claims)),
            Err(e) => match self.store_failure_policy {
                StoreFailurePolicy::Propagate => {
                    tracing::warn!(error = %e, "Revocation store unavailable");
                    Err(e)
                }
                StoreFailurePolicy::FailClosed => {
                    tracing::warn!(error = %e, "Revocation store unavailable, failing closed");
                    Ok(Verdict::Invalid(RejectReason::Revoked))
                }
            },
        }
    }
}
