//! Move module identifiers.

use crate::address::AccountAddress;
use crate::error::{StudioError, StudioResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Move module identifier: the pairing of a publisher address and a
/// module name, e.g. `0x1::coin`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveModuleId {
    /// The address the module is published under.
    pub address: AccountAddress,
    /// The module name.
    pub name: String,
}

impl MoveModuleId {
    /// Creates a module id from an address and name.
    pub fn new(address: AccountAddress, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }

    /// Parses a module id from an `address::name` string.
    ///
    /// The address part accepts the same short forms as
    /// [`AccountAddress::from_hex`]; a missing `::` separator or an empty
    /// name is a validation error.
    pub fn from_str_strict(s: &str) -> StudioResult<Self> {
        let (address_part, name) = s.split_once("::").ok_or_else(|| {
            StudioError::validation(
                "Invalid module format. Expected format: 0xaddress::module_name",
            )
        })?;

        if name.is_empty() || name.contains("::") {
            return Err(StudioError::validation(
                "Invalid module format. Expected format: 0xaddress::module_name",
            ));
        }

        Ok(Self {
            address: AccountAddress::from_hex(address_part)?,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for MoveModuleId {
    /// Renders with the fully padded address, e.g. `0x0000...0001::coin`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_hex(), self.name)
    }
}

impl FromStr for MoveModuleId {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_strict(s)
    }
}
