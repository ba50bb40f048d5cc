//! Versioned encoding for persisted store state.
//!
//! Every slot holds an envelope:
//!
//! ```json
//! { "version": 1, "saved_at": "2026-01-01T00:00:00Z", "items": [ ... ] }
//! ```
//!
//! Decoding never trusts the slot: unknown versions and unexpected shapes are
//! reported as [`DecodeError`] so the store can fall back to empty state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Current envelope version.
pub const SCHEMA_VERSION: u64 = 1;

/// Reasons a persisted slot could not be read back.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Slot contents are not valid JSON, or the items have the wrong shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope written by an unknown schema version.
    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(u64),

    /// Valid JSON that is not an envelope this state type understands.
    #[error("Unrecognised slot shape")]
    UnrecognisedShape,
}

/// State that can be kept in a durable slot.
pub trait Persisted: Clone + Default + PartialEq + Send + Sync + 'static {
    /// Payload stored under `items` in the envelope.
    type Items: Serialize + DeserializeOwned;

    /// Default slot key.
    const SLOT: &'static str;

    fn to_payload(&self) -> Self::Items;

    fn from_payload(items: Self::Items) -> Self;

    /// Read a slot written before the envelope existed.
    ///
    /// `value` is the parsed slot contents; returning `None` rejects it.
    fn migrate_unversioned(_value: Value) -> Option<Self> {
        None
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, I> {
    version: u64,
    saved_at: DateTime<Utc>,
    items: &'a I,
}

/// Encode state into a version-tagged envelope.
///
/// # Errors
///
/// Returns `serde_json::Error` if the items cannot be serialized.
pub fn encode<T: Persisted>(state: &T) -> Result<String, serde_json::Error> {
    let items = state.to_payload();
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        saved_at: Utc::now(),
        items: &items,
    })
}

/// Decode slot contents written by [`encode`] or by a pre-envelope writer.
///
/// # Errors
///
/// Returns `DecodeError` if the slot is not valid JSON, carries an unknown
/// version, or does not match any known shape.
pub fn decode<T: Persisted>(raw: &str) -> Result<T, DecodeError> {
    let mut value: Value = serde_json::from_str(raw)?;

    let version = value.get("version").and_then(Value::as_u64);
    match version {
        Some(SCHEMA_VERSION) => {
            let items = value
                .get_mut("items")
                .map(Value::take)
                .ok_or(DecodeError::UnrecognisedShape)?;
            Ok(T::from_payload(serde_json::from_value(items)?))
        }
        Some(0) | None => T::migrate_unversioned(value).ok_or(DecodeError::UnrecognisedShape),
        Some(other) => Err(DecodeError::UnsupportedVersion(other)),
    }
}
