//! Field-level before/after diffing of resource writes.
//!
//! The raw simulation output only carries the post-state of each written
//! resource; the pre-state is fetched from the node separately. Diffs are
//! capped so a busy transaction stays readable, and unchanged fields are
//! suppressed except for the balance-like ones users always want to see.

use move_studio_types::{ChangeKind, FieldDiff, ResourceDiff};
use serde_json::{Map, Value};

/// At most this many resource diffs are reported per simulation.
pub const MAX_RESOURCE_DIFFS: usize = 10;
/// At most this many field diffs are reported per resource.
pub const MAX_FIELD_DIFFS: usize = 5;

/// Fields reported even when unchanged, since their value is the whole
/// point of looking at the resource.
const HIGH_SIGNAL_FIELDS: &[&str] = &["value", "coin"];

/// Structural bookkeeping fields that never make a useful diff line.
const BOOKKEEPING_FIELDS: &[&str] = &["type", "handle"];

/// Renders a field value as a short display string.
///
/// Wrapped scalars (`{"value": ...}`) are unwrapped, Move vectors
/// (`{"vec": [...]}`) collapse to an item count, other objects fall back
/// to compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Object(map) => {
            if let Some(inner) = map.get("value") {
                return scalar_string(inner);
            }
            if let Some(vec) = map.get("vec") {
                let len = vec.as_array().map(|a| a.len()).unwrap_or(0);
                return format!("[{} items]", len);
            }
            value.to_string()
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// String form of a scalar without JSON quoting.
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Diffs one resource change into display form.
///
/// Bookkeeping fields are skipped in every case. For deletions `after`
/// is `None`: every remaining pre-state field maps to `deleted`, and a
/// missing pre-state still yields a synthetic row so the deletion is
/// visible. For writes, unchanged fields are suppressed unless
/// high-signal.
pub fn diff_resource(
    address: &str,
    resource_type: &str,
    change_type: ChangeKind,
    before: Option<&Map<String, Value>>,
    after: Option<&Map<String, Value>>,
) -> ResourceDiff {
    let mut field_diffs = Vec::new();

    match change_type {
        ChangeKind::Delete => match before {
            Some(before) => {
                for (field, value) in before {
                    if BOOKKEEPING_FIELDS.contains(&field.as_str()) {
                        continue;
                    }
                    field_diffs.push(FieldDiff {
                        field: field.clone(),
                        before: Some(format_value(value)),
                        after: Some("deleted".to_string()),
                    });
                }
            }
            None => {
                field_diffs.push(FieldDiff {
                    field: "resource".to_string(),
                    before: Some("exists".to_string()),
                    after: Some("deleted".to_string()),
                });
            }
        },
        ChangeKind::Write | ChangeKind::Create => {
            let empty = Map::new();
            let after = after.unwrap_or(&empty);
            for (field, after_value) in after {
                if BOOKKEEPING_FIELDS.contains(&field.as_str()) {
                    continue;
                }
                let after_str = format_value(after_value);
                let before_str = before
                    .and_then(|b| b.get(field))
                    .map(format_value);
                if change_type == ChangeKind::Write {
                    if let Some(ref before_str) = before_str {
                        if *before_str == after_str
                            && !HIGH_SIGNAL_FIELDS.contains(&field.as_str())
                        {
                            continue;
                        }
                    }
                }
                field_diffs.push(FieldDiff {
                    field: field.clone(),
                    before: if change_type == ChangeKind::Create {
                        None
                    } else {
                        before_str
                    },
                    after: Some(after_str),
                });
            }
        }
    }

    field_diffs.truncate(MAX_FIELD_DIFFS);

    ResourceDiff {
        resource_type: resource_type.to_string(),
        address: address.to_string(),
        change_type,
        field_diffs,
    }
}
