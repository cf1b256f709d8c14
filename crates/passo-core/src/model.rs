//! Core data types: credential records and the vault that holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stored credential.
///
/// Identity is `id`. Uniqueness is maintained by the owning [`Vault`]
/// operations, not by the codec.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CredentialRecord {
    /// Opaque identifier, unique within a vault
    pub id: String,

    /// Display label (usually a host name)
    pub website: String,

    /// Account identifier (email or username)
    pub login: String,

    /// The plaintext password
    pub secret: String,

    /// When this record was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,

    /// Remote account that owns this record, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// User-supplied fields for a new record.
///
/// The gateway fills in the id, timestamps and owner.
#[derive(Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub website: String,
    pub login: String,
    pub secret: String,
}

impl NewCredential {
    pub fn new(
        website: impl Into<String>,
        login: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            login: login.into(),
            secret: secret.into(),
        }
    }

    /// Build the full record, stamping both timestamps with `now`.
    pub fn into_record(
        self,
        id: String,
        now: DateTime<Utc>,
        owner_id: Option<String>,
    ) -> CredentialRecord {
        CredentialRecord {
            id,
            website: self.website,
            login: self.login,
            secret: self.secret,
            created_at: now,
            updated_at: now,
            owner_id,
        }
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("website", &self.website)
            .field("login", &self.login)
            .field("secret", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

impl std::fmt::Debug for NewCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewCredential")
            .field("website", &self.website)
            .field("login", &self.login)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// The current remote account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Ordered collection of credential records.
///
/// Serialized as a bare JSON array; the whole collection is the unit of
/// encryption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vault {
    records: Vec<CredentialRecord>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CredentialRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CredentialRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Append a record, keeping insertion order.
    pub(crate) fn push(&mut self, record: CredentialRecord) {
        self.records.push(record);
    }

    /// Replace the record with the same id in place.
    ///
    /// Returns `false` if no record with that id exists.
    pub(crate) fn replace(&mut self, record: CredentialRecord) -> bool {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<CredentialRecord> {
        let index = self.records.iter().position(|record| record.id == id)?;
        Some(self.records.remove(index))
    }

    /// Case-insensitive substring match on website or login.
    ///
    /// An empty (or whitespace-only) query matches every record. Vault order
    /// is preserved.
    pub fn search(&self, query: &str) -> Vec<&CredentialRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|record| {
                record.website.to_lowercase().contains(&needle)
                    || record.login.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Vault {
    type Item = &'a CredentialRecord;
    type IntoIter = std::slice::Iter<'a, CredentialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, website: &str, login: &str) -> CredentialRecord {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        NewCredential::new(website, login, "pw").into_record(id.to_string(), t0, None)
    }

    fn sample() -> Vault {
        Vault::from_records(vec![
            record("a", "GitHub.com", "dev@example.com"),
            record("b", "mail.example.org", "Alice"),
            record("c", "bank.test", "alice@bank.test"),
        ])
    }

    #[test]
    fn test_search_matches_website_and_login_case_insensitively() {
        let vault = sample();
        let ids: Vec<&str> = vault.search("ALICE").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);

        let ids: Vec<&str> = vault.search("github").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let vault = sample();
        assert_eq!(vault.search("").len(), 3);
        assert_eq!(vault.search("   ").len(), 3);
    }

    #[test]
    fn test_search_does_not_match_secret() {
        let vault = sample();
        assert!(vault.search("pw").is_empty());
    }

    #[test]
    fn test_replace_and_remove() {
        let mut vault = sample();
        let mut updated = vault.get("b").cloned().unwrap();
        updated.website = "new.example.org".to_string();
        assert!(vault.replace(updated));
        assert_eq!(vault.get("b").unwrap().website, "new.example.org");
        assert_eq!(vault.records()[1].id, "b");

        assert!(!vault.replace(record("zzz", "x", "y")));

        let removed = vault.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(vault.len(), 2);
        assert!(vault.remove("a").is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let new = NewCredential::new("example.com", "a1", "hunter2");
        assert!(!format!("{:?}", new).contains("hunter2"));

        let record = record("a", "example.com", "a1");
        let shown = format!("{:?}", record);
        assert!(shown.contains("example.com"));
        assert!(!shown.contains("\"pw\""));
        assert!(shown.contains("[REDACTED]"));
    }

    #[test]
    fn test_record_serializes_camel_case_without_owner() {
        let json = serde_json::to_value(record("a", "w", "l")).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("ownerId").is_none());
    }
}
