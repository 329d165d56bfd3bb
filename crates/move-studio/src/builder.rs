//! Turns untyped form input (module path, function name, string parameters)
//! into a [`CallDescriptor`] ready for simulation.

use move_studio_types::{AccountAddress, CallDescriptor, MoveModuleId, StudioError, StudioResult};
use serde_json::Value;

/// Normalizes an account address to its canonical form: `0x` followed by
/// 64 lowercase hex characters. Idempotent, so already-canonical input
/// passes through unchanged.
pub fn normalize_address(input: &str) -> StudioResult<String> {
    Ok(AccountAddress::from_hex(input)?.to_hex())
}

/// Coerces a raw string parameter for the JSON simulation API.
///
/// Numeric-looking strings are trimmed and kept as strings, since the
/// API expects integer arguments (`u64`, `u128`) in string form.
/// Everything else is passed through untouched; the node's own ABI check
/// reports a type mismatch if the value does not fit the parameter.
pub fn coerce_argument(raw: &str) -> Value {
    let trimmed = raw.trim();
    if !trimmed.is_empty()
        && (trimmed.parse::<u128>().is_ok() || trimmed.parse::<f64>().is_ok())
    {
        return Value::String(trimmed.to_string());
    }
    Value::String(raw.to_string())
}

/// Builds an entry function call descriptor from form input.
///
/// `parameters` is the ordered list of `(name, value)` pairs entered by
/// the user; names are display-only and values become positional
/// arguments in the same order.
///
/// # Errors
///
/// Returns [`StudioError::Validation`] when the module path or function
/// name is empty, or the module path is not `0xaddress::module_name`.
pub fn build_descriptor(
    module: &str,
    function: &str,
    parameters: &[(String, String)],
    type_arguments: &[String],
) -> StudioResult<CallDescriptor> {
    if module.trim().is_empty() {
        return Err(StudioError::validation("Module path is required"));
    }
    if function.trim().is_empty() {
        return Err(StudioError::validation("Function name is required"));
    }
    let module: MoveModuleId = module.trim().parse()?;
    Ok(CallDescriptor {
        module,
        function: function.trim().to_string(),
        type_arguments: type_arguments.to_vec(),
        arguments: parameters
            .iter()
            .map(|(_, value)| coerce_argument(value))
            .collect(),
    })
}
