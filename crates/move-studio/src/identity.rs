//! Which account a simulation runs as.
//!
//! Simulations are executed with a zeroed-out signature, so no private
//! key ever needs to leave the caller. When no account is supplied we
//! derive a throwaway ed25519 keypair and use its authentication-key
//! address as the sender.

use ed25519_dalek::Keypair;
use move_studio_types::{AccountAddress, StudioResult};
use rand::rngs::OsRng;
use sha3::{Digest, Sha3_256};
use tracing::warn;

/// Single-signer ed25519 scheme identifier, appended to the public key
/// when deriving the authentication key.
const ED25519_SCHEME: u8 = 0x00;

/// The account a dry run is attributed to.
#[derive(Clone, Debug)]
pub enum SimulatorIdentity {
    /// Derive a fresh throwaway keypair per simulation.
    Ephemeral,
    /// Simulate as an existing account. `public_key` is `0x`-prefixed
    /// 32-byte hex; `address` is the account address in any accepted form.
    Provided { public_key: String, address: String },
}

/// The sender resolved from a [`SimulatorIdentity`]: a canonical address
/// and the `0x`-prefixed public key placed in the simulated signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSigner {
    pub address: String,
    pub public_key: String,
}

impl SimulatorIdentity {
    /// Resolves to a concrete sender. A malformed provided identity is
    /// logged and replaced with an ephemeral signer rather than failing
    /// the simulation.
    pub fn resolve(&self) -> ResolvedSigner {
        match self {
            SimulatorIdentity::Ephemeral => ephemeral_signer(),
            SimulatorIdentity::Provided {
                public_key,
                address,
            } => match resolve_provided(public_key, address) {
                Ok(signer) => signer,
                Err(e) => {
                    warn!(error = %e, "invalid simulation identity, falling back to ephemeral signer");
                    ephemeral_signer()
                }
            },
        }
    }
}

fn resolve_provided(public_key: &str, address: &str) -> StudioResult<ResolvedSigner> {
    let stripped = public_key.trim().trim_start_matches("0x");
    let key_bytes = hex::decode(stripped)?;
    ed25519_dalek::PublicKey::from_bytes(&key_bytes)
        .map_err(|e| move_studio_types::StudioError::validation(format!("invalid public key: {}", e)))?;
    let address = AccountAddress::from_hex(address)?;
    Ok(ResolvedSigner {
        address: address.to_hex(),
        public_key: format!("0x{}", hex::encode(&key_bytes)),
    })
}

/// Generates a throwaway keypair and derives its account address as
/// `sha3-256(public_key | scheme)`.
pub fn ephemeral_signer() -> ResolvedSigner {
    let keypair = Keypair::generate(&mut OsRng);
    let public_key = keypair.public.to_bytes();

    let mut hasher = Sha3_256::new();
    hasher.update(public_key);
    hasher.update([ED25519_SCHEME]);
    let digest = hasher.finalize();

    ResolvedSigner {
        address: format!("0x{}", hex::encode(digest)),
        public_key: format!("0x{}", hex::encode(public_key)),
    }
}
