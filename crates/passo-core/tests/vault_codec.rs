use chrono::{TimeZone, Utc};

use passo_core::{CredentialRecord, DeviceKey, PassoError, Vault, VaultCodec};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 29, 8, 30, 0).unwrap()
}

fn scenario_record() -> CredentialRecord {
    CredentialRecord {
        id: "a1".to_string(),
        website: "example.com".to_string(),
        login: "u@example.com".to_string(),
        secret: "Tr0ub4dor&3".to_string(),
        created_at: t0(),
        updated_at: t0(),
        owner_id: None,
    }
}

/// Replace the character at `index` with a different base64 character.
fn corrupt_at(blob: &str, index: usize) -> String {
    let mut chars: Vec<char> = blob.chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

#[test]
fn test_single_record_round_trip_then_corruption_fails() {
    let codec = VaultCodec::new(DeviceKey::generate());
    let vault = Vault::from_records(vec![scenario_record()]);

    let blob = codec.encode(&vault).expect("encode should succeed");
    let decoded = codec.decode(blob.as_str()).expect("decode should succeed");
    assert_eq!(decoded.records(), &[scenario_record()]);

    let corrupted = corrupt_at(blob.as_str(), blob.as_str().len() / 2);
    let result = codec.decode(&corrupted);
    assert!(matches!(result, Err(PassoError::Decode(_))));
}

#[test]
fn test_every_single_character_corruption_is_detected() {
    let codec = VaultCodec::new(DeviceKey::generate());
    let vault = Vault::from_records(vec![scenario_record()]);
    let blob = codec.encode(&vault).expect("encode should succeed");

    for index in 0..blob.as_str().len() {
        let corrupted = corrupt_at(blob.as_str(), index);
        match codec.decode(&corrupted) {
            Err(PassoError::Decode(_)) => {}
            other => panic!(
                "corruption at {} was not detected: {:?}",
                index,
                other.map(|v| v.len())
            ),
        }
    }
}

#[test]
fn test_truncated_blob_is_decode_error() {
    let codec = VaultCodec::new(DeviceKey::generate());
    let blob = codec
        .encode(&Vault::from_records(vec![scenario_record()]))
        .expect("encode should succeed");
    let text = blob.as_str();

    for cut in [4, text.len() / 2, text.len() - 4] {
        assert!(matches!(
            codec.decode(&text[..cut]),
            Err(PassoError::Decode(_))
        ));
    }
}

#[test]
fn test_decoding_same_blob_twice_is_identical() {
    let codec = VaultCodec::new(DeviceKey::generate());
    let mut second = scenario_record();
    second.id = "b2".to_string();
    second.owner_id = Some("remote-user".to_string());
    let vault = Vault::from_records(vec![scenario_record(), second]);

    let blob = codec.encode(&vault).expect("encode should succeed");
    let first_load = codec.decode(blob.as_str()).expect("first decode");
    let second_load = codec.decode(blob.as_str()).expect("second decode");

    assert_eq!(first_load, second_load);
    assert_eq!(first_load, vault);
}

#[test]
fn test_blob_survives_key_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let key_path = dir.path().join("device.key");

    let blob = {
        let codec = VaultCodec::new(DeviceKey::load_or_create(&key_path).expect("create key"));
        codec
            .encode(&Vault::from_records(vec![scenario_record()]))
            .expect("encode should succeed")
    };

    let codec = VaultCodec::new(DeviceKey::load(&key_path).expect("reload key"));
    let decoded = codec.decode(blob.as_str()).expect("decode with reloaded key");
    assert_eq!(decoded.len(), 1);
}
