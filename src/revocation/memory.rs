use std::collections::HashMap;
use std::sync::RwLock;

use chrono::DateTime;
use chrono::Utc;

use super::errors::RevocationError;
use super::RevocationRecord;
use super::RevocationStore;

/// In-memory revocation store backed by a reader-writer lock.
///
/// The write lock in `revoke` and read lock in `is_revoked` give the
/// linearizable visibility the store contract requires: a reader can never
/// miss a revocation whose `revoke` call completed before the read began.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    records: RwLock<HashMap<String, RevocationRecord>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live revocation records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop records for tokens that have passed their natural expiry.
    ///
    /// An expired token is rejected by the codec before the store is ever
    /// consulted, so removing its record cannot change any verdict. Records
    /// without a known expiry are kept.
    ///
    /// Returns the number of records removed.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        let before = records.len();
        records.retain(|_, record| match record.expires_at {
            Some(expires_at) => expires_at >= now,
            None => true,
        });
        before - records.len()
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn revoke(&self, token: &str, record: RevocationRecord) -> Result<(), RevocationError> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.entry(token.to_string()).or_insert(record);
        Ok(())
    }

    fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.contains_key(token))
    }
}
