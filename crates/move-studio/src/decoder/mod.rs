//! Runs an entry function call through the fullnode simulation API and
//! decodes the raw output into a [`SimulationOutcome`].
//!
//! The decoder never propagates errors to its caller: anything that goes
//! wrong (network failure, node rejection, malformed output) is folded
//! into an outcome with [`SimulationStatus::Error`] and a translated
//! message, so a UI can always render something.

pub mod diff;
pub mod status;
pub mod translate;

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::client::FullnodeClient;
use crate::identity::{ResolvedSigner, SimulatorIdentity};
use move_studio_types::{
    CallDescriptor, ChangeKind, EventSummary, ResourceDiff, SimulationOutcome, SimulationStatus,
    StateChangeSummary, StudioError, StudioResult,
};

use diff::{diff_resource, MAX_RESOURCE_DIFFS};
use status::{classify_status, format_gas};
use translate::{extract_error_code, translate_error};

/// Gas parameters used for every simulation. Dry runs do not spend gas,
/// so a generous fixed budget is fine.
const SIMULATION_MAX_GAS: &str = "200000";
const SIMULATION_GAS_UNIT_PRICE: &str = "100";
const SIMULATION_EXPIRY_SECS: u64 = 600;

/// Zeroed 64-byte ed25519 signature; the simulation API skips signature
/// verification.
const ZERO_SIGNATURE: &str = "0x0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000";

pub struct SimulationDecoder {
    client: FullnodeClient,
}

impl SimulationDecoder {
    pub fn new(client: FullnodeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FullnodeClient {
        &self.client
    }

    /// Simulates `descriptor` as `identity` and decodes the result.
    /// Infallible at the signature level; failures become an outcome with
    /// [`SimulationStatus::Error`].
    pub async fn decode(
        &self,
        descriptor: &CallDescriptor,
        identity: &SimulatorIdentity,
    ) -> SimulationOutcome {
        match self.try_decode(descriptor, identity).await {
            Ok(outcome) => {
                info!(
                    function = %descriptor.function_id(),
                    status = ?outcome.status,
                    gas = %outcome.gas_formatted,
                    "simulation decoded"
                );
                outcome
            }
            Err(e) => {
                warn!(function = %descriptor.function_id(), error = %e, "simulation failed");
                error_outcome(&e)
            }
        }
    }

    async fn try_decode(
        &self,
        descriptor: &CallDescriptor,
        identity: &SimulatorIdentity,
    ) -> StudioResult<SimulationOutcome> {
        let signer = identity.resolve();

        // A signer that has never been funded has no account object; it
        // can still simulate with sequence number zero.
        let sequence_number = match self.client.get_sequence_number(&signer.address).await {
            Ok(n) => n,
            Err(e) if e.is_not_found() => 0,
            Err(e) => return Err(e),
        };

        let request = simulation_request(descriptor, &signer, sequence_number);
        debug!(
            function = %descriptor.function_id(),
            sender = %signer.address,
            sequence_number,
            "submitting simulation"
        );

        let outputs = self.client.simulate_transaction(&request).await?;
        let raw = outputs
            .into_iter()
            .next()
            .ok_or_else(|| StudioError::SimulationFailed("empty simulation response".to_string()))?;

        Ok(self.outcome_from_raw(&raw).await)
    }

    async fn outcome_from_raw(&self, raw: &Value) -> SimulationOutcome {
        let success = raw.get("success").and_then(Value::as_bool).unwrap_or(false);
        let vm_status = raw
            .get("vm_status")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let gas_used = raw
            .get("gas_used")
            .and_then(Value::as_str)
            .unwrap_or("0")
            .to_string();

        let (status, abort_reason) = classify_status(success, vm_status);
        let changes = raw
            .get("changes")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        SimulationOutcome {
            status,
            abort_reason,
            gas_formatted: format_gas(&gas_used),
            gas_used,
            events: parse_events(raw),
            state_changes: summarize_changes(&changes),
            state_diffs: self.enrich_state_diffs(&changes).await,
            vm_status: (!vm_status.is_empty()).then(|| vm_status.to_string()),
            raw_error: None,
            error_code: None,
        }
    }

    /// Builds field-level before/after diffs for resource changes.
    ///
    /// Only the first [`MAX_RESOURCE_DIFFS`] changes are considered.
    /// Fetches each touched resource's pre-state from the node; a fetch
    /// failure for a write means the resource did not exist before, so
    /// the change is reported as a creation. Duplicate writes to the same
    /// `(address, resource type)` pair keep only the first occurrence.
    async fn enrich_state_diffs(&self, changes: &[Value]) -> Vec<ResourceDiff> {
        let mut diffs = Vec::new();
        let mut seen = HashSet::new();

        for change in changes.iter().take(MAX_RESOURCE_DIFFS) {
            let change_kind = change.get("type").and_then(Value::as_str).unwrap_or("");
            // Module publishes have no resource data worth diffing.
            let data = match change.get("data") {
                Some(data) if !data.is_null() && change_kind != "write_module" => data,
                _ => continue,
            };

            let address = change
                .get("address")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let resource_type = data
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();

            if !seen.insert(format!("{}::{}", address, resource_type)) {
                continue;
            }

            let after = data
                .get("data")
                .and_then(Value::as_object)
                .cloned()
                .or_else(|| data.as_object().cloned())
                .unwrap_or_default();

            let (kind, before, after) = match change_kind {
                "delete_resource" => {
                    let before = self.fetch_before(&address, &resource_type).await;
                    (ChangeKind::Delete, before, None)
                }
                "write_resource" => {
                    let before = self.fetch_before(&address, &resource_type).await;
                    let kind = if before.is_some() {
                        ChangeKind::Write
                    } else {
                        ChangeKind::Create
                    };
                    (kind, before, Some(after))
                }
                // Table items and other change kinds have no fetchable
                // pre-state; report their payload as a plain write.
                _ => (ChangeKind::Write, None, Some(after)),
            };

            let diff = diff_resource(
                &address,
                &resource_type,
                kind,
                before.as_ref(),
                after.as_ref(),
            );
            if !diff.field_diffs.is_empty() {
                diffs.push(diff);
            }
        }

        diffs
    }

    /// Pre-state of a resource, or `None` if it cannot be fetched. Any
    /// failure (not just 404) counts as absent so a flaky node never
    /// sinks the whole decode.
    async fn fetch_before(
        &self,
        address: &str,
        resource_type: &str,
    ) -> Option<Map<String, Value>> {
        match self.client.get_account_resource(address, resource_type).await {
            Ok(resource) => resource.data.as_object().cloned(),
            Err(e) => {
                if !e.is_not_found() {
                    warn!(error = %e, address, resource_type, "pre-state fetch failed");
                }
                None
            }
        }
    }
}

fn simulation_request(
    descriptor: &CallDescriptor,
    signer: &ResolvedSigner,
    sequence_number: u64,
) -> Value {
    let expiry = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        + SIMULATION_EXPIRY_SECS;

    json!({
        "sender": signer.address,
        "sequence_number": sequence_number.to_string(),
        "max_gas_amount": SIMULATION_MAX_GAS,
        "gas_unit_price": SIMULATION_GAS_UNIT_PRICE,
        "expiration_timestamp_secs": expiry.to_string(),
        "payload": {
            "type": "entry_function_payload",
            "function": descriptor.function_id(),
            "type_arguments": descriptor.type_arguments,
            "arguments": descriptor.arguments,
        },
        "signature": {
            "type": "ed25519_signature",
            "public_key": signer.public_key,
            "signature": ZERO_SIGNATURE,
        },
    })
}

fn parse_events(raw: &Value) -> Vec<EventSummary> {
    raw.get("events")
        .and_then(Value::as_array)
        .map(|events| {
            events
                .iter()
                .map(|event| EventSummary {
                    event_type: event
                        .get("type")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    data: event
                        .get("data")
                        .cloned()
                        .unwrap_or_else(|| Value::Object(Map::new())),
                    sequence_number: event
                        .get("sequence_number")
                        .and_then(Value::as_str)
                        .unwrap_or("0")
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A one-line-per-change overview, capped like the diffs so the two lists
/// line up.
fn summarize_changes(changes: &[Value]) -> Vec<StateChangeSummary> {
    changes
        .iter()
        .take(MAX_RESOURCE_DIFFS)
        .map(|change| StateChangeSummary {
            change_type: change
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            address: change
                .get("address")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            resource_type: change
                .get("data")
                .and_then(|d| d.get("type"))
                .and_then(Value::as_str)
                .or_else(|| change.get("state_key_hash").and_then(Value::as_str))
                .unwrap_or("unknown")
                .to_string(),
        })
        .collect()
}

/// Folds a pipeline error into a renderable outcome.
///
/// The node's structured error code (when the failure was a parsed API
/// error body) is prepended to the text handed to the translator, since
/// the snake_case rules match on the code rather than the free-form
/// message.
fn error_outcome(error: &StudioError) -> SimulationOutcome {
    let raw = error.to_string();
    let abort_reason = match error.error_code() {
        Some(code) => translate_error(&format!("{}: {}", code, raw)),
        None => translate_error(&raw),
    };
    let error_code = error
        .error_code()
        .map(str::to_string)
        .or_else(|| extract_error_code(&raw));

    SimulationOutcome {
        status: SimulationStatus::Error,
        abort_reason: Some(abort_reason),
        gas_used: "0".to_string(),
        gas_formatted: "0".to_string(),
        events: Vec::new(),
        state_changes: Vec::new(),
        state_diffs: Vec::new(),
        vm_status: None,
        raw_error: Some(raw),
        error_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_descriptor;
    use crate::config::StudioConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn decoder_for(server: &MockServer) -> SimulationDecoder {
        let config = StudioConfig::custom("mock", &format!("{}/v1", server.uri())).unwrap();
        SimulationDecoder::new(FullnodeClient::new(config).unwrap())
    }

    fn transfer_descriptor() -> CallDescriptor {
        build_descriptor(
            "0x1::coin",
            "transfer",
            &[
                ("to".to_string(), "0x2".to_string()),
                ("amount".to_string(), "100".to_string()),
            ],
            &["0x1::aptos_coin::AptosCoin".to_string()],
        )
        .unwrap()
    }

    async fn mount_account(server: &MockServer, sequence_number: &str) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/accounts/0x[0-9a-f]+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sequence_number": sequence_number,
                "authentication_key": "0xab"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn successful_transfer_is_decoded_with_diffs() {
        let server = MockServer::start().await;
        mount_account(&server, "3").await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "1500",
                "events": [{
                    "type": "0x1::coin::WithdrawEvent",
                    "data": { "amount": "100" },
                    "sequence_number": "9"
                }],
                "changes": [{
                    "type": "write_resource",
                    "address": "0x1",
                    "data": {
                        "type": "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>",
                        "data": { "coin": { "value": "400" } }
                    }
                }]
            }])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/accounts/0x1/resource/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>",
                "data": { "coin": { "value": "500" } }
            })))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.status, SimulationStatus::Success);
        assert!(outcome.abort_reason.is_none());
        assert_eq!(outcome.gas_formatted, "1.50K");
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].event_type, "0x1::coin::WithdrawEvent");

        assert_eq!(outcome.state_diffs.len(), 1);
        let diff = &outcome.state_diffs[0];
        assert_eq!(diff.change_type, ChangeKind::Write);
        assert_eq!(diff.field_diffs[0].field, "coin");
        assert_eq!(diff.field_diffs[0].before.as_deref(), Some("500"));
        assert_eq!(diff.field_diffs[0].after.as_deref(), Some("400"));
    }

    #[tokio::test]
    async fn unfunded_signer_simulates_with_sequence_zero() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/accounts/0x[0-9a-f]+$"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Account not found",
                "error_code": "account_not_found"
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "5",
                "events": [],
                "changes": []
            }])))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.status, SimulationStatus::Success);
        assert_eq!(outcome.gas_used, "5");
    }

    #[tokio::test]
    async fn missing_module_becomes_a_translated_error() {
        let server = MockServer::start().await;
        mount_account(&server, "0").await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "Module ModuleId { address: 0x1, name: Identifier(\"counter\") } Module name(counter) can't be found",
                "error_code": "module_not_found",
                "vm_error_code": null
            })))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.status, SimulationStatus::Error);
        assert_eq!(
            outcome.abort_reason.as_deref(),
            Some("The module 'counter' does not exist at this address. Check the module address and name.")
        );
        assert_eq!(outcome.error_code.as_deref(), Some("module_not_found"));
        assert!(outcome.raw_error.is_some());
        assert_eq!(outcome.gas_formatted, "0");
    }

    #[tokio::test]
    async fn abort_is_classified_with_its_code() {
        let server = MockServer::start().await;
        mount_account(&server, "0").await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "success": false,
                "vm_status": "Move abort in 0x1::coin: ABORTED with code 65542",
                "gas_used": "120",
                "events": [],
                "changes": []
            }])))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.status, SimulationStatus::Abort);
        assert_eq!(
            outcome.abort_reason.as_deref(),
            Some("Transaction aborted with code 65542")
        );
        assert_eq!(outcome.gas_used, "120");
    }

    #[tokio::test]
    async fn duplicate_writes_keep_the_first_occurrence() {
        let server = MockServer::start().await;
        mount_account(&server, "0").await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "10",
                "events": [],
                "changes": [
                    {
                        "type": "write_resource",
                        "address": "0x1",
                        "data": {
                            "type": "0x1::counter::Counter",
                            "data": { "value": "1" }
                        }
                    },
                    {
                        "type": "write_resource",
                        "address": "0x1",
                        "data": {
                            "type": "0x1::counter::Counter",
                            "data": { "value": "2" }
                        }
                    }
                ]
            }])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/accounts/0x1/resource/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Resource not found",
                "error_code": "resource_not_found"
            })))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.state_diffs.len(), 1);
        assert_eq!(outcome.state_diffs[0].change_type, ChangeKind::Create);
        assert_eq!(outcome.state_diffs[0].field_diffs[0].after.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn resource_diffs_are_capped() {
        let server = MockServer::start().await;
        mount_account(&server, "0").await;

        let changes: Vec<Value> = (0..15)
            .map(|i| {
                json!({
                    "type": "write_resource",
                    "address": format!("0x{:x}", i + 2),
                    "data": {
                        "type": "0x1::counter::Counter",
                        "data": { "value": i.to_string() }
                    }
                })
            })
            .collect();

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "10",
                "events": [],
                "changes": changes
            }])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/accounts/0x[0-9a-f]+/resource/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Resource not found",
                "error_code": "resource_not_found"
            })))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.state_diffs.len(), MAX_RESOURCE_DIFFS);
        assert_eq!(outcome.state_changes.len(), MAX_RESOURCE_DIFFS);
    }

    #[tokio::test]
    async fn deleted_resource_without_prior_state_is_reported() {
        let server = MockServer::start().await;
        mount_account(&server, "0").await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "10",
                "events": [],
                "changes": [{
                    "type": "delete_resource",
                    "address": "0x1",
                    "data": { "type": "0x1::counter::Counter" }
                }]
            }])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/accounts/0x1/resource/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Resource not found",
                "error_code": "resource_not_found"
            })))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.state_diffs.len(), 1);
        let diff = &outcome.state_diffs[0];
        assert_eq!(diff.change_type, ChangeKind::Delete);
        assert_eq!(diff.field_diffs[0].field, "resource");
        assert_eq!(diff.field_diffs[0].after.as_deref(), Some("deleted"));
    }

    #[tokio::test]
    async fn module_publishes_are_not_diffed() {
        let server = MockServer::start().await;
        mount_account(&server, "0").await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "10",
                "events": [],
                "changes": [{
                    "type": "write_module",
                    "address": "0x1",
                    "data": { "type": "module", "data": { "bytecode": "0xa1" } }
                }]
            }])))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert!(outcome.state_diffs.is_empty());
        assert_eq!(outcome.state_changes.len(), 1);
        assert_eq!(outcome.state_changes[0].change_type, "write_module");
    }

    #[tokio::test]
    async fn empty_simulation_response_is_an_error_outcome() {
        let server = MockServer::start().await;
        mount_account(&server, "0").await;

        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let decoder = decoder_for(&server).await;
        let outcome = decoder
            .decode(&transfer_descriptor(), &SimulatorIdentity::Ephemeral)
            .await;

        assert_eq!(outcome.status, SimulationStatus::Error);
        assert!(outcome.raw_error.is_some());
    }

    #[test]
    fn structured_error_code_drives_translation() {
        let err = StudioError::api_with_details(
            404,
            "Account not found by Address(0x9)",
            Some("account_not_found".to_string()),
            None,
        );
        let outcome = error_outcome(&err);
        assert_eq!(outcome.status, SimulationStatus::Error);
        assert_eq!(
            outcome.abort_reason.as_deref(),
            Some("The signer account does not exist on the blockchain. Please fund the account first.")
        );
        assert_eq!(outcome.error_code.as_deref(), Some("account_not_found"));
        // The raw node text is retained untranslated for diagnostics.
        assert!(outcome
            .raw_error
            .as_deref()
            .unwrap()
            .contains("Account not found by Address(0x9)"));
    }
}
