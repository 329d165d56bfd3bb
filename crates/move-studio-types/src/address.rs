//! Account address type.
//!
//! Move account addresses are 32-byte values, typically displayed as
//! 64 hexadecimal characters with a `0x` prefix. User input may omit the
//! prefix or the leading zeros; parsing through this type normalizes both.

use crate::error::{StudioError, StudioResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte Move account address.
///
/// # Display Format
///
/// Addresses are displayed as 64 hexadecimal characters with a `0x`
/// prefix. Short addresses (like `0x1` for the core framework) are
/// zero-padded on the left, so rendering is always exactly 66 characters
/// and re-parsing a rendered address is a no-op.
///
/// # Example
///
/// ```rust
/// use move_studio_types::AccountAddress;
///
/// let addr = AccountAddress::from_hex("0x1").unwrap();
/// assert_eq!(addr.to_hex().len(), 66);
/// assert_eq!(addr.to_short_string(), "0x1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    /// The "zero" address (all zeros).
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// The core framework address (0x1).
    pub const ONE: Self = {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = 1;
        Self(bytes)
    };

    /// Creates an address from a byte array.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a hex string (with or without `0x` prefix).
    ///
    /// Short addresses are zero-padded on the left. Empty strings and bare
    /// `0x` prefixes are rejected as invalid addresses.
    pub fn from_hex<T: AsRef<str>>(hex_str: T) -> StudioResult<Self> {
        let hex_str = hex_str.as_ref();

        if hex_str.is_empty() {
            return Err(StudioError::InvalidAddress(
                "address cannot be empty".to_string(),
            ));
        }

        let hex_str = hex_str
            .strip_prefix("0x")
            .or_else(|| hex_str.strip_prefix("0X"))
            .unwrap_or(hex_str);

        if hex_str.is_empty() {
            return Err(StudioError::InvalidAddress(
                "address must contain at least one hex digit".to_string(),
            ));
        }

        if hex_str.len() > ADDRESS_LENGTH * 2 {
            return Err(StudioError::InvalidAddress(format!(
                "address too long: {} characters (max {})",
                hex_str.len(),
                ADDRESS_LENGTH * 2
            )));
        }

        // Zero-pad to full length
        let padded = format!("{:0>64}", hex_str);
        let bytes = hex::decode(&padded)?;

        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(&bytes);
        Ok(Self(address))
    }

    /// Creates an address from a byte slice.
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> StudioResult<Self> {
        let bytes = bytes.as_ref();
        if bytes.len() != ADDRESS_LENGTH {
            return Err(StudioError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(bytes);
        Ok(Self(address))
    }

    /// Returns the address as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the address as a fully padded hex string with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Returns a short hex string, trimming leading zeros.
    ///
    /// For example, `0x0000...0001` becomes `0x1`.
    pub fn to_short_string(&self) -> String {
        let hex = hex::encode(self.0);
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl Default for AccountAddress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_short_string())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        // Full address
        let addr = AccountAddress::from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(addr, AccountAddress::ONE);

        // Short address
        let addr = AccountAddress::from_hex("0x1").unwrap();
        assert_eq!(addr, AccountAddress::ONE);

        // Without prefix
        let addr = AccountAddress::from_hex("1").unwrap();
        assert_eq!(addr, AccountAddress::ONE);
    }

    #[test]
    fn test_to_hex_is_fully_padded() {
        let hex = AccountAddress::ONE.to_hex();
        assert_eq!(hex.len(), 66);
        assert_eq!(
            hex,
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let once = AccountAddress::from_hex("0xabc").unwrap().to_hex();
        let twice = AccountAddress::from_hex(&once).unwrap().to_hex();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_to_short_string() {
        assert_eq!(AccountAddress::ONE.to_short_string(), "0x1");
        assert_eq!(AccountAddress::ZERO.to_short_string(), "0x0");
    }

    #[test]
    fn test_rejects_empty_and_bare_prefix() {
        assert!(AccountAddress::from_hex("").is_err());
        assert!(AccountAddress::from_hex("0x").is_err());
    }

    #[test]
    fn test_rejects_too_long() {
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(AccountAddress::from_hex(&too_long).is_err());
    }

    #[test]
    fn test_from_hex_uppercase_prefix() {
        let addr = AccountAddress::from_hex("0X1").unwrap();
        assert_eq!(addr, AccountAddress::ONE);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(AccountAddress::from_hex("not_hex").is_err());
    }

    #[test]
    fn test_json_serialization() {
        let addr = AccountAddress::ONE;
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(
            json,
            "\"0x0000000000000000000000000000000000000000000000000000000000000001\""
        );

        let parsed: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_from_bytes() {
        let addr = AccountAddress::from_bytes([0u8; ADDRESS_LENGTH]).unwrap();
        assert_eq!(addr, AccountAddress::ZERO);
        assert!(AccountAddress::from_bytes([0u8; 16]).is_err());
    }
}
