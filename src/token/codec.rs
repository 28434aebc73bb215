use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Principal;
use super::claims::SignedToken;
use super::claims::TokenClaims;
use super::claims::TokenClass;
use super::errors::DecodeError;
use super::errors::EncodeError;

/// Signed token codec: mints and verifies bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a process-scoped shared secret.
/// Issuance and decoding are pure functions of their inputs, the secret,
/// and the caller-supplied clock reading; the codec holds no mutable state
/// and needs no locking.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenCodec {
    /// Create a codec from a shared secret and per-class lifetimes.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `access_lifetime` - Lifetime of access tokens (short, minutes)
    /// * `refresh_lifetime` - Lifetime of refresh tokens (long, days)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], access_lifetime: Duration, refresh_lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_lifetime,
            refresh_lifetime,
        }
    }

    /// Lifetime for a token class.
    pub fn lifetime(&self, class: TokenClass) -> Duration {
        match class {
            TokenClass::Access => self.access_lifetime,
            TokenClass::Refresh => self.refresh_lifetime,
        }
    }

    /// Issue a signed token for a principal.
    ///
    /// Claim construction is deterministic: the same principal, class, and
    /// `now` always produce the same token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claim serialization or signing failed
    pub fn issue(
        &self,
        principal: &Principal,
        class: TokenClass,
        now: DateTime<Utc>,
    ) -> Result<SignedToken, EncodeError> {
        let claims = TokenClaims::new(principal.clone(), class, now, self.lifetime(class));
        let header = Header::new(self.algorithm);

        let raw = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        Ok(SignedToken::new(raw))
    }

    /// Decode and verify a token, checking expiry against `now`.
    ///
    /// The signature is verified before any claim is trusted: a forged
    /// "not yet expired" claim is rejected as `Malformed` without its
    /// expiry ever being read. Expiry is then checked against the
    /// caller-supplied clock reading, not the system clock, so tests can
    /// simulate expiry deterministically.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed or the signature does not match
    /// * `Expired` - Claims verified but `now` is past the expiration time
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, DecodeError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is validated against the injected clock below, not by the
        // jsonwebtoken library against the system clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(DecodeError::Expired);
        }

        Ok(claims)
    }
}
