use super::error::{PersistenceError, PersistenceResult};
use crate::domain::AppState;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Schema version written into every saved document
pub const SCHEMA_VERSION: u64 = 1;

const VERSION_KEY: &str = "schemaVersion";

#[derive(Serialize)]
struct Document<'a> {
    #[serde(rename = "schemaVersion")]
    schema_version: u64,
    #[serde(flatten)]
    state: &'a AppState,
}

/// Serialize state into the on-disk document
pub fn encode_document(state: &AppState) -> PersistenceResult<String> {
    let doc = Document {
        schema_version: SCHEMA_VERSION,
        state,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse the on-disk document and bring it up to the current schema.
///
/// Documents without a version field predate versioning and are read as
/// version 1. Documents from a newer schema are rejected rather than guessed at.
pub fn decode_document(path: &Path, content: &str) -> PersistenceResult<AppState> {
    let corrupt = |source| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        source,
    };

    let mut value: Value = serde_json::from_str(content).map_err(corrupt)?;

    let version = match value.as_object_mut().and_then(|obj| obj.remove(VERSION_KEY)) {
        Some(v) => v.as_u64().ok_or_else(|| PersistenceError::InvalidVersion {
            path: path.to_path_buf(),
            value: v.to_string(),
        })?,
        None => 1,
    };

    if version > SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    // Only one schema exists so far; future upgrades step from `version` here.
    serde_json::from_value(value).map_err(corrupt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Settings;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_state() -> AppState {
        AppState::new(Settings::default_for(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()))
    }

    #[test]
    fn test_encode_writes_version() {
        let json = encode_document(&sample_state()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert_eq!(value["isSnoozed"], false);
        assert!(value["logs"].is_array());
    }

    #[test]
    fn test_decode_round_trip() {
        let state = sample_state();
        let json = encode_document(&state).unwrap();
        let decoded = decode_document(Path::new("state.json"), &json).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_decode_unversioned_document() {
        let json = serde_json::to_string(&sample_state()).unwrap();
        let decoded = decode_document(Path::new("state.json"), &json).unwrap();
        assert_eq!(decoded, sample_state());
    }

    #[test]
    fn test_decode_rejects_newer_version() {
        let json = encode_document(&sample_state())
            .unwrap()
            .replace("\"schemaVersion\": 1", "\"schemaVersion\": 7");
        let err = decode_document(Path::new("state.json"), &json).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnsupportedVersion { found: 7, supported: 1 }
        ));
        assert!(err.needs_reset());
    }

    #[test]
    fn test_decode_rejects_malformed_version() {
        for bad in [r#""2""#, "-3", "2.5", "null", r#""v9""#] {
            let json = encode_document(&sample_state())
                .unwrap()
                .replace("\"schemaVersion\": 1", &format!("\"schemaVersion\": {}", bad));
            let err = decode_document(Path::new("state.json"), &json).unwrap_err();
            assert!(
                matches!(err, PersistenceError::InvalidVersion { .. }),
                "{} was accepted",
                bad
            );
            assert!(err.needs_reset());
        }
    }

    #[test]
    fn test_decode_corrupt() {
        let err = decode_document(Path::new("state.json"), "{ not json").unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));

        let err = decode_document(Path::new("state.json"), r#"{"logs": 3}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
    }
}
