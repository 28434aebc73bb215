use crate::clock::Clock;
use crate::revocation::RevocationError;
use crate::revocation::RevocationStore;
use crate::token::TokenClaims;
use crate::token::TokenClass;
use crate::validator::RejectReason;
use crate::validator::TokenValidator;
use crate::validator::Verdict;

/// Reason code handed to the unauthorized handler.
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Decision point consumed by every protected operation.
///
/// Takes the presented credential and three outcome handlers, and invokes
/// exactly one of them exactly once. The guard itself never logs, persists,
/// or retries: it is a pure routing decision over the validator's verdict.
pub struct ResourceGuard<S, C>
where
    S: RevocationStore,
    C: Clock,
{
    validator: TokenValidator<S, C>,
}

impl<S, C> ResourceGuard<S, C>
where
    S: RevocationStore,
    C: Clock,
{
    pub fn new(validator: TokenValidator<S, C>) -> Self {
        Self { validator }
    }

    /// Route a request to one of three handlers based on its credential.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value, if present
    /// * `required` - Token class the operation accepts
    /// * `authorized` - Invoked with the decoded claims on a valid token;
    ///   its result is returned verbatim
    /// * `needs_refresh` - Invoked when the token is expired, signaling the
    ///   caller should exchange its refresh token for a new access token
    /// * `unauthorized` - Invoked with a reason code for every other
    ///   rejection, including absent or malformed headers
    ///
    /// # Errors
    /// * `RevocationError` - Revocation store was unavailable and the
    ///   validator's policy is to propagate
    pub fn protect<R, A, N, U>(
        &self,
        authorization: Option<&str>,
        required: TokenClass,
        authorized: A,
        needs_refresh: N,
        unauthorized: U,
    ) -> Result<R, RevocationError>
    where
        A: FnOnce(TokenClaims) -> R,
        N: FnOnce() -> R,
        U: FnOnce(&str) -> R,
    {
        let token = match authorization.and_then(extract_bearer_token) {
            Some(token) => token,
            None => return Ok(unauthorized(UNAUTHORIZED)),
        };

        match self.validator.validate(token, required)? {
            Verdict::Valid(claims) => Ok(authorized(claims)),
            Verdict::Invalid(RejectReason::Expired) => Ok(needs_refresh()),
            Verdict::Invalid(_) => Ok(unauthorized(UNAUTHORIZED)),
        }
    }

    /// `protect` with the required class defaulted to `Access`.
    pub fn protect_access<R, A, N, U>(
        &self,
        authorization: Option<&str>,
        authorized: A,
        needs_refresh: N,
        unauthorized: U,
    ) -> Result<R, RevocationError>
    where
        A: FnOnce(TokenClaims) -> R,
        N: FnOnce() -> R,
        U: FnOnce(&str) -> R,
    {
        self.protect(
            authorization,
            TokenClass::Access,
            authorized,
            needs_refresh,
            unauthorized,
        )
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// Total over arbitrary input: a missing scheme prefix or an empty token
/// after it yields `None`, never a fault.
fn extract_bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        return None;
    }
    Some(token)
}
