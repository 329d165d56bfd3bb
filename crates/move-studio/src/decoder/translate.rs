//! Maps raw fullnode and VM error text to messages a user can act on.
//!
//! Matching is ordered and first-match-wins, so more specific patterns
//! must come before general ones.

use super::status::abort_code;

/// Translates a raw error string into a human-readable explanation.
pub fn translate_error(raw: &str) -> String {
    if raw.contains("account_not_found") {
        return "The signer account does not exist on the blockchain. Please fund the account first.".to_string();
    }
    if raw.contains("module_not_found") {
        if let Some(name) = extract_module_name(raw) {
            return format!(
                "The module '{}' does not exist at this address. Check the module address and name.",
                name
            );
        }
        return "The specified module does not exist at this address. Check the module address and name.".to_string();
    }
    if raw.contains("function_not_found") {
        return "The specified function does not exist in this module.".to_string();
    }
    if raw.contains("INVALID_ARGUMENT") {
        return "Invalid arguments provided to the function. Check argument types and values."
            .to_string();
    }
    if raw.contains("OUT_OF_GAS") {
        return "Transaction would run out of gas. Try increasing gas limit.".to_string();
    }
    if raw.contains("SEQUENCE_NUMBER") {
        return "Sequence number mismatch. The account state may have changed.".to_string();
    }
    if raw.contains("resource_not_found") {
        return "A required resource does not exist for this account.".to_string();
    }
    if raw.contains("TYPE_MISMATCH") {
        return "Type mismatch in arguments. Check that argument types match the function signature.".to_string();
    }
    // Requires both the ABORTED marker and an extractable code; a bare
    // ABORTED continues down the chain.
    if let Some(code) = abort_code(raw) {
        return format!(
            "Transaction aborted by the smart contract with error code {}.",
            code
        );
    }
    if raw.contains("ECONNREFUSED") || raw.contains("network") {
        return "Could not connect to the blockchain network. Please try again.".to_string();
    }
    strip_transport_boilerplate(raw)
}

/// Fullnode transport errors wrap the useful message in
/// `Request to [Fullnode]: <url> failed with: <message>`; keep only the
/// message.
fn strip_transport_boilerplate(raw: &str) -> String {
    const MARKER: &str = "failed with:";
    if raw.contains("Request to [Fullnode]") {
        if let Some(pos) = raw.find(MARKER) {
            return raw[pos + MARKER.len()..].trim().to_string();
        }
    }
    raw.trim().to_string()
}

/// Pulls the module name out of text like `Module name(counter)`.
fn extract_module_name(raw: &str) -> Option<String> {
    let start = raw.find("Module name(")? + "Module name(".len();
    let rest = &raw[start..];
    let end = rest.find(')')?;
    let name = &rest[..end];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(name.to_string())
}

/// Extracts a short machine-usable error code from raw error text:
/// either the fullnode's own `error_code` field embedded in a JSON body,
/// or a synthesized `ABORT_<n>` for contract aborts.
pub fn extract_error_code(raw: &str) -> Option<String> {
    if let Some(code) = find_json_error_code(raw) {
        return Some(code);
    }
    if let Some(code) = abort_code(raw) {
        return Some(format!("ABORT_{}", code));
    }
    None
}

/// Finds `"error_code": "<value>"` inside error text that embeds a JSON
/// body, tolerating arbitrary whitespace around the colon.
fn find_json_error_code(raw: &str) -> Option<String> {
    let key_pos = raw.find("\"error_code\"")?;
    let rest = &raw[key_pos + "\"error_code\"".len()..];
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}
