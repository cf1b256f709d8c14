//! JSON output for scripts.

use passo_core::CredentialRecord;

/// Convert a record to JSON. The secret is only included on request.
pub fn record_json(record: &CredentialRecord, include_secret: bool) -> serde_json::Value {
    let mut value = serde_json::json!({
        "id": record.id,
        "website": record.website,
        "login": record.login,
        "created_at": record.created_at,
        "updated_at": record.updated_at,
        "owner_id": record.owner_id,
    });
    if include_secret {
        value["secret"] = serde_json::Value::String(record.secret.clone());
    }
    value
}

/// Convert records to a JSON array, without secrets.
pub fn records_json(records: &[&CredentialRecord]) -> serde_json::Value {
    serde_json::Value::Array(
        records
            .iter()
            .map(|record| record_json(record, false))
            .collect(),
    )
}

pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
