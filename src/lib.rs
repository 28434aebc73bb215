//! Bearer token lifecycle core
//!
//! Issues, validates, refreshes, and revokes the signed tokens that gate
//! protected operations:
//! - Token codec (HS256 signing, class-aware lifetimes)
//! - Revocation store (exact-token-string blacklist)
//! - Token validator (decode + expiry + class + revocation, one verdict)
//! - Resource guard (routes each request to exactly one outcome handler)
//!
//! The surrounding system supplies a verified principal at issuance time and
//! the raw `Authorization` header at request time; everything else
//! (transport, credential verification, persistence choice) stays outside.
//!
//! # Examples
//!
//! ## Issuing and guarding
//! ```
//! use std::sync::Arc;
//!
//! use auth_core::AuthService;
//! use auth_core::InMemoryRevocationStore;
//! use auth_core::Principal;
//! use auth_core::SystemClock;
//! use auth_core::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = Arc::new(TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! ));
//! let store = Arc::new(InMemoryRevocationStore::new());
//! let auth = AuthService::new(codec, store, Arc::new(SystemClock));
//!
//! let pair = auth.issue_tokens(&Principal::from("user123")).unwrap();
//!
//! let guard = auth.guard();
//! let header = format!("Bearer {}", pair.access_token);
//! let greeting = guard
//!     .protect_access(
//!         Some(&header),
//!         |claims| format!("hello {}", claims.sub),
//!         || "please refresh".to_string(),
//!         |reason| reason.to_string(),
//!     )
//!     .unwrap();
//! assert_eq!(greeting, "hello user123");
//! ```
//!
//! ## Logout and refresh
//! ```
//! use std::sync::Arc;
//!
//! use auth_core::AuthService;
//! use auth_core::InMemoryRevocationStore;
//! use auth_core::Principal;
//! use auth_core::SystemClock;
//! use auth_core::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = Arc::new(TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! ));
//! let store = Arc::new(InMemoryRevocationStore::new());
//! let auth = AuthService::new(codec, store, Arc::new(SystemClock));
//!
//! let pair = auth.issue_tokens(&Principal::from("user123")).unwrap();
//!
//! // Exchange the refresh token for a fresh access token.
//! let new_access = auth.refresh(pair.refresh_token.as_str()).unwrap();
//! assert!(!new_access.as_str().is_empty());
//!
//! // Logout revokes only the presented token.
//! auth.logout(pair.refresh_token.as_str()).unwrap();
//! assert!(auth.refresh(pair.refresh_token.as_str()).is_err());
//! ```

pub mod clock;
pub mod config;
pub mod guard;
pub mod revocation;
pub mod service;
pub mod token;
pub mod validator;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::AuthConfig;
pub use guard::ResourceGuard;
pub use guard::UNAUTHORIZED;
pub use revocation::InMemoryRevocationStore;
pub use revocation::RevocationError;
pub use revocation::RevocationRecord;
pub use revocation::RevocationStore;
pub use service::AuthError;
pub use service::AuthService;
pub use token::DecodeError;
pub use token::EncodeError;
pub use token::Principal;
pub use token::SignedToken;
pub use token::TokenClaims;
pub use token::TokenClass;
pub use token::TokenCodec;
pub use token::TokenPair;
pub use validator::RejectReason;
pub use validator::StoreFailurePolicy;
pub use validator::TokenValidator;
pub use validator::Verdict;
