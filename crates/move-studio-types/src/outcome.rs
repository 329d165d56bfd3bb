//! The decoded result of one dry-run.
//!
//! These types are the decoder's output contract with its UI caller: a
//! plain JSON-serializable value the caller branches on via `status`,
//! never via errors. Field names are camelCase on the wire for direct
//! consumption by web frontends.

use serde::{Deserialize, Serialize};

/// Success/abort/error classification of one dry-run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    /// The transaction would execute successfully.
    Success,
    /// The Move program executed but aborted.
    Abort,
    /// The dry-run itself could not be executed.
    Error,
}

/// How a touched resource changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// An existing resource was modified.
    Write,
    /// The resource was removed.
    Delete,
    /// The resource did not previously exist.
    Create,
}

/// One field-level before/after entry of a [`ResourceDiff`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// The field name within the resource.
    pub field: String,
    /// The formatted prior value, if one existed.
    pub before: Option<String>,
    /// The formatted post-simulation value.
    pub after: Option<String>,
}

/// Per-resource change record with field-level diffs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDiff {
    /// The fully-qualified Move type of the resource.
    pub resource_type: String,
    /// The account address owning the resource.
    pub address: String,
    /// How the resource changed.
    pub change_type: ChangeKind,
    /// Field diffs, capped at 5 entries in field-iteration order.
    pub field_diffs: Vec<FieldDiff>,
}

/// An event the simulated transaction would emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// The event type.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload as JSON.
    pub data: serde_json::Value,
    /// The emitting handle's sequence number, as the node reports it.
    pub sequence_number: String,
}

/// A lightweight summary of one write-set entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChangeSummary {
    /// The raw change type (`write_resource`, `delete_resource`, ...).
    pub change_type: String,
    /// The affected account address.
    pub address: String,
    /// The affected resource type, or the state key hash when no typed
    /// resource is attached to the change.
    pub resource_type: String,
}

/// The decoded result of one dry-run, as returned to the UI caller.
///
/// Constructed fresh per simulation request/response cycle; nothing here
/// persists beyond the response unless the caller stores a receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    /// Success/abort/error classification.
    pub status: SimulationStatus,
    /// Human-readable abort or failure reason, if any.
    pub abort_reason: Option<String>,
    /// Raw gas units as the node reported them.
    pub gas_used: String,
    /// Human-formatted gas, e.g. `1.50K` or `2.00M`.
    pub gas_formatted: String,
    /// Emitted events, in emission order.
    pub events: Vec<EventSummary>,
    /// Write-set summaries, capped at 10 entries.
    pub state_changes: Vec<StateChangeSummary>,
    /// Field-level diffs, one per distinct `(address, resourceType)` pair,
    /// capped at 10 entries.
    pub state_diffs: Vec<ResourceDiff>,
    /// The raw VM status string, kept for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_status: Option<String>,
    /// The raw error text when the dry-run itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_error: Option<String>,
    /// The structured error code when the dry-run itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl SimulationOutcome {
    /// Returns true if the simulated transaction would succeed.
    pub fn is_success(&self) -> bool {
        self.status == SimulationStatus::Success
    }
}
