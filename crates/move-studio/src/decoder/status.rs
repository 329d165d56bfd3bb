use move_studio_types::SimulationStatus;

/// VM status string reported by the node for a clean execution.
pub const SUCCESS_SENTINEL: &str = "Executed successfully";

/// Classifies a simulation output's `success` flag and `vm_status` into a
/// status plus an optional human-oriented note.
///
/// A successful run with an unexpected `vm_status` keeps the Success
/// status but surfaces the status text as a soft warning. A failed run is
/// an Abort with the reason distilled from `vm_status`.
pub fn classify_status(
    success: bool,
    vm_status: &str,
) -> (SimulationStatus, Option<String>) {
    if success {
        let note = if !vm_status.is_empty() && vm_status != SUCCESS_SENTINEL {
            Some(vm_status.to_string())
        } else {
            None
        };
        return (SimulationStatus::Success, note);
    }
    (SimulationStatus::Abort, parse_abort_reason(vm_status))
}

fn parse_abort_reason(vm_status: &str) -> Option<String> {
    if vm_status.is_empty() || vm_status == SUCCESS_SENTINEL {
        return None;
    }
    // An ABORTED status without an extractable code is not an abort
    // summary; it falls through to the later rules.
    if let Some(code) = abort_code(vm_status) {
        return Some(format!("Transaction aborted with code {}", code));
    }
    if vm_status.contains("OUT_OF_GAS") {
        return Some("Transaction ran out of gas".to_string());
    }
    if vm_status.contains("EXECUTION_FAILURE") {
        return Some("Transaction execution failed".to_string());
    }
    Some(vm_status.to_string())
}

/// Extracts the numeric code from text of the shape `ABORTED ... code: <n>`.
///
/// `code` is only searched for after the `ABORTED` marker, both matched
/// case-insensitively, and must be followed by digits with at most a
/// colon and whitespace in between.
pub(crate) fn abort_code(text: &str) -> Option<u64> {
    let upper = text.to_ascii_uppercase();
    let rest = &upper[upper.find("ABORTED")?..];
    let tail = &rest[rest.find("CODE")? + "CODE".len()..];
    let digits: String = tail
        .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Renders an octa gas amount with K/M suffixes for readability:
/// `2500000` becomes `2.50M`, `1500` becomes `1.50K`, small amounts pass
/// through as plain integers. Unparseable input counts as zero.
pub fn format_gas(raw: &str) -> String {
    let n: u64 = raw.parse().unwrap_or(0);
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
