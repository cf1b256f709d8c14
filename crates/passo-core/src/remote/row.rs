//! Row type for remote store queries.

use chrono::{DateTime, Utc};

use super::traits::RemoteCredential;
use crate::error::{PassoError, Result};

/// Raw row data from the `credentials` table, before parsing into domain types.
#[derive(Debug)]
pub(super) struct CredentialRow {
    pub id: String,
    pub owner_id: String,
    pub website: String,
    pub login: String,
    pub encrypted_secret: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CredentialRow {
    pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            website: row.get(2)?,
            login: row.get(3)?,
            encrypted_secret: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PassoError::Decode(format!("Invalid remote timestamp: {}", e)))
}

impl TryFrom<CredentialRow> for RemoteCredential {
    type Error = PassoError;

    fn try_from(row: CredentialRow) -> Result<Self> {
        Ok(RemoteCredential {
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            id: row.id,
            owner_id: row.owner_id,
            website: row.website,
            login: row.login,
            encrypted_secret: row.encrypted_secret,
        })
    }
}
