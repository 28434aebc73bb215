//! End-to-end token lifecycle flows: issue, guard, refresh, logout.

use std::sync::Arc;

use auth_core::AuthService;
use auth_core::InMemoryRevocationStore;
use auth_core::ManualClock;
use auth_core::Principal;
use auth_core::ResourceGuard;
use auth_core::TokenClass;
use auth_core::TokenCodec;
use auth_core::Verdict;
use chrono::Duration;
use chrono::Utc;

const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

/// Which handler the guard dispatched to.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Authorized(String),
    NeedsRefresh,
    Unauthorized(String),
}

struct TestAuth {
    clock: Arc<ManualClock>,
    service: AuthService<InMemoryRevocationStore, ManualClock>,
    guard: ResourceGuard<InMemoryRevocationStore, ManualClock>,
}

impl TestAuth {
    fn new() -> Self {
        let codec = Arc::new(TokenCodec::new(
            SECRET,
            Duration::minutes(15),
            Duration::days(7),
        ));
        let store = Arc::new(InMemoryRevocationStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let service = AuthService::new(codec, store, Arc::clone(&clock));
        let guard = service.guard();
        Self {
            clock,
            service,
            guard,
        }
    }

    fn dispatch(&self, authorization: Option<&str>, required: TokenClass) -> Outcome {
        self.guard
            .protect(
                authorization,
                required,
                |claims| Outcome::Authorized(claims.sub.to_string()),
                || Outcome::NeedsRefresh,
                |reason| Outcome::Unauthorized(reason.to_string()),
            )
            .expect("In-memory store should always answer")
    }
}

fn bearer(token: impl std::fmt::Display) -> String {
    format!("Bearer {}", token)
}

#[test]
fn fresh_access_token_is_authorized() {
    let auth = TestAuth::new();
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    let outcome = auth.dispatch(Some(&bearer(&pair.access_token)), TokenClass::Access);
    assert_eq!(outcome, Outcome::Authorized("u1".to_string()));
}

#[test]
fn expired_token_routes_to_needs_refresh_not_unauthorized() {
    let auth = TestAuth::new();
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    // Past even the refresh token's lifetime.
    auth.clock.advance(Duration::days(8));

    let outcome = auth.dispatch(Some(&bearer(&pair.refresh_token)), TokenClass::Refresh);
    assert_eq!(outcome, Outcome::NeedsRefresh);
}

#[test]
fn revoked_token_is_unauthorized() {
    let auth = TestAuth::new();
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    auth.service.logout(pair.access_token.as_str()).unwrap();

    let outcome = auth.dispatch(Some(&bearer(&pair.access_token)), TokenClass::Access);
    assert_eq!(outcome, Outcome::Unauthorized("Unauthorized".to_string()));
}

#[test]
fn empty_bearer_token_is_unauthorized_without_fault() {
    let auth = TestAuth::new();

    let outcome = auth.dispatch(Some("Bearer "), TokenClass::Access);
    assert_eq!(outcome, Outcome::Unauthorized("Unauthorized".to_string()));
}

#[test]
fn missing_header_is_unauthorized_without_fault() {
    let auth = TestAuth::new();

    let outcome = auth.dispatch(None, TokenClass::Access);
    assert_eq!(outcome, Outcome::Unauthorized("Unauthorized".to_string()));
}

#[test]
fn refresh_token_on_access_endpoint_is_unauthorized() {
    let auth = TestAuth::new();
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    let outcome = auth.dispatch(Some(&bearer(&pair.refresh_token)), TokenClass::Access);
    assert_eq!(outcome, Outcome::Unauthorized("Unauthorized".to_string()));
}

#[test]
fn expired_access_token_recovers_through_refresh_exchange() {
    let auth = TestAuth::new();
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    auth.clock.advance(Duration::hours(1));

    // The stale access token asks for a refresh.
    let outcome = auth.dispatch(Some(&bearer(&pair.access_token)), TokenClass::Access);
    assert_eq!(outcome, Outcome::NeedsRefresh);

    // Exchanging the refresh token restores access.
    let new_access = auth.service.refresh(pair.refresh_token.as_str()).unwrap();
    let outcome = auth.dispatch(Some(&bearer(&new_access)), TokenClass::Access);
    assert_eq!(outcome, Outcome::Authorized("u1".to_string()));
}

#[test]
fn logout_then_refresh_is_rejected_but_sibling_access_survives() {
    let auth = TestAuth::new();
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    auth.service.logout(pair.refresh_token.as_str()).unwrap();

    assert!(auth.service.refresh(pair.refresh_token.as_str()).is_err());

    // Revocation is token-string-scoped: the access token still works.
    let outcome = auth.dispatch(Some(&bearer(&pair.access_token)), TokenClass::Access);
    assert_eq!(outcome, Outcome::Authorized("u1".to_string()));
}

#[test]
fn tampered_token_is_unauthorized_even_when_unexpired() {
    let auth = TestAuth::new();
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    let token = pair.access_token.as_str();
    let mid = token.len() / 2;
    let flipped = if &token[mid..=mid] == "a" { "b" } else { "a" };
    let tampered = format!("{}{}{}", &token[..mid], flipped, &token[mid + 1..]);

    let outcome = auth.dispatch(Some(&bearer(&tampered)), TokenClass::Access);
    assert_eq!(outcome, Outcome::Unauthorized("Unauthorized".to_string()));
}

#[test]
fn revocation_is_visible_across_threads_once_revoke_returns() {
    let auth = Arc::new(TestAuth::new());
    let pair = auth.service.issue_tokens(&Principal::from("u1")).unwrap();

    auth.service.logout(pair.access_token.as_str()).unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let auth = Arc::clone(&auth);
            let header = bearer(&pair.access_token);
            std::thread::spawn(move || auth.dispatch(Some(&header), TokenClass::Access))
        })
        .collect();

    for reader in readers {
        let outcome = reader.join().expect("Reader thread panicked");
        assert_eq!(outcome, Outcome::Unauthorized("Unauthorized".to_string()));
    }
}

#[test]
fn round_trip_preserves_principal_and_class() {
    let auth = TestAuth::new();

    for principal in ["u1", "user-with-dashes", "550e8400-e29b-41d4-a716-446655440000"] {
        for class in [TokenClass::Access, TokenClass::Refresh] {
            let pair = auth
                .service
                .issue_tokens(&Principal::from(principal))
                .unwrap();
            let token = match class {
                TokenClass::Access => pair.access_token,
                TokenClass::Refresh => pair.refresh_token,
            };

            let verdict = auth
                .service
                .validator()
                .validate(token.as_str(), class)
                .unwrap();
            match verdict {
                Verdict::Valid(claims) => {
                    assert_eq!(claims.sub.as_str(), principal);
                    assert_eq!(claims.class, class);
                }
                other => panic!("Expected Valid, got {:?}", other),
            }
        }
    }
}
