//! Type guard for raw values crossing a trust boundary.
//!
//! Tagged values decoded from JSON are checked against the closed set of
//! [`FailableState`] labels before they are trusted as a [`Failable`].

use super::error::GuardError;
use super::failable::Failable;
use super::keys::FailableState;
use super::state::StateKey;
use serde::de::DeserializeOwned;
use serde_json::Value;

const DISCRIMINANT: &str = "state";

/// True iff `raw` carries a recognized `state` discriminant.
///
/// Never panics, whatever the input.
///
/// # Example
///
/// ```rust
/// use failable::is_failable;
/// use serde_json::json;
///
/// assert!(is_failable(&json!({"state": "success", "data": 1})));
/// assert!(is_failable(&json!({"state": "pending"})));
/// assert!(!is_failable(&json!({"state": "loading"})));
/// assert!(!is_failable(&json!(42)));
/// ```
pub fn is_failable(raw: &Value) -> bool {
    discriminant(raw).is_ok()
}

fn discriminant(raw: &Value) -> Result<FailableState, GuardError> {
    let label = raw
        .get(DISCRIMINANT)
        .and_then(Value::as_str)
        .ok_or(GuardError::NotTagged)?;
    FailableState::from_name(label).ok_or_else(|| GuardError::UnrecognizedState(label.to_string()))
}

impl<T, E> Failable<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    /// Validate and decode a raw value.
    ///
    /// Fails with [`GuardError`] when the discriminant is missing or
    /// unrecognized, or when the payload does not decode.
    pub fn try_from_json(raw: Value) -> Result<Self, GuardError> {
        discriminant(&raw)?;
        Ok(serde_json::from_value(raw)?)
    }
}
