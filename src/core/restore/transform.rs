//! Record preparation before replay

use crate::domain::{Record, ATTRIBUTES_FIELD, GROUPS_FIELD, SERVER_ID_ATTRIBUTE};
use serde_json::Value;

/// Strips fields the create call must not receive
///
/// - the server-assigned `sub` entry in `Attributes`
/// - a top-level `sub`, if present
/// - `Groups`, which is replayed separately after the create
///
/// Everything else is passed through unchanged.
pub fn prepare_for_restore(mut record: Record) -> Record {
    record.remove(SERVER_ID_ATTRIBUTE);
    record.remove(GROUPS_FIELD);

    if let Some(Value::Array(attributes)) = record.get_mut(ATTRIBUTES_FIELD) {
        attributes.retain(|attr| {
            attr.get("Name").and_then(Value::as_str) != Some(SERVER_ID_ATTRIBUTE)
        });
    }

    record
}
