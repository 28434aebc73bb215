use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Opaque, stable identifier for an authenticated entity.
///
/// Supplied by the identity store at issuance time; the core never derives
/// or interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Create a principal from any string-like identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Token class, encoded in the claims.
///
/// The class determines the token's default lifetime and which operations
/// accept it: access tokens gate ordinary protected operations, refresh
/// tokens are only good for obtaining new access tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenClass::Access => write!(f, "access"),
            TokenClass::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried by a signed token.
///
/// A decoded claims value is a read-only snapshot: nothing in the core
/// mutates it after `TokenCodec::decode` returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the principal the token was issued to.
    pub sub: Principal,

    /// Token class (access or refresh).
    pub class: TokenClass,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for a principal with an expiry relative to `now`.
    pub fn new(
        principal: Principal,
        class: TokenClass,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: principal,
            class,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Check whether the token is expired at `now`.
    ///
    /// A token is valid through its exact expiration second; only
    /// `now > exp` counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }

    /// Expiration as a `DateTime`, when representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A signed, tamper-evident token string.
///
/// Opaque to callers; verifiable only with the issuing secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access/refresh token pair minted together at login or registration.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: SignedToken,
    pub refresh_token: SignedToken,
}
