//! The normalized representation of a transaction to simulate.

use crate::move_types::MoveModuleId;
use serde::{Deserialize, Serialize};

/// A normalized entry-function call, ready for dry-run execution.
///
/// Built by `move_studio::builder` from user-entered strings. The module
/// address is carried fully padded by construction; arguments are the raw
/// user values coerced by the numeric-or-string heuristic, in the target
/// function's declared parameter order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDescriptor {
    /// The module containing the function.
    pub module: MoveModuleId,
    /// The function name.
    pub function: String,
    /// Type arguments for generic functions.
    pub type_arguments: Vec<String>,
    /// Positional arguments, as JSON values the node's API accepts.
    pub arguments: Vec<serde_json::Value>,
}

impl CallDescriptor {
    /// Renders the full function id, e.g. `0x0000...0001::coin::transfer`.
    pub fn function_id(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }
}
